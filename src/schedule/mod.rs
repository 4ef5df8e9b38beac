pub mod book;
pub mod conflict;
pub mod error;
pub mod slot_utils;
pub mod types;

pub use book::ScheduleBook;
pub use conflict::{check_pair, detect_conflicts};
pub use error::ScheduleError;
pub use types::{ClockTime, ConflictKind, ConflictRecord, Schedule, ScheduleDraft, ScheduleKind, SlotDay, TimeSlot};
