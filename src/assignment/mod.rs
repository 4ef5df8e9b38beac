pub mod book;
pub mod commit;
pub mod types;

pub use book::AssignmentBook;
pub use commit::{commit_pair, AssignmentError};
pub use types::{AccessLevel, AssignmentRecord, PointKind};
