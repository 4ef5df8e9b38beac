use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// Not a zero-padded 24-hour `HH:MM` string.
    #[error("invalid time {value:?}, expected zero-padded HH:MM")]
    InvalidTime { value: String },

    /// A slot whose start is not strictly before its end.
    #[error("time slot start {start} must be before end {end}")]
    EmptyInterval { start: String, end: String },

    #[error("day of week {index} is out of range, expected 0 (Sunday) to 6 (Saturday)")]
    InvalidWeekday { index: u8 },

    #[error("slot day {day} disagrees with dayOfWeek ({from_index})")]
    ConflictingDay { day: String, from_index: String },

    #[error("time slot needs a day or a dayOfWeek")]
    MissingDay,

    #[error("schedule name is required")]
    MissingName,

    #[error("schedule {name:?} needs at least one time slot")]
    NoTimeSlots { name: String },

    #[error("validity starts {from} after it ends {until}")]
    InvalidValidity { from: NaiveDate, until: NaiveDate },

    #[error("schedule id {0} is already in use")]
    DuplicateId(String),

    #[error("schedule {0} not found")]
    NotFound(String),
}
