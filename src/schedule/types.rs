use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::error::ScheduleError;
use super::slot_utils::{
    intervals_overlap, minutes_to_time_string, parse_time_to_minutes, weekday_from_index, weekday_index,
};

/// Time of day as minutes since midnight, written as zero-padded `HH:MM`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(u32);

impl ClockTime {
    pub fn minutes(self) -> u32 {
        self.0
    }
}

impl FromStr for ClockTime {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_time_to_minutes(s)
            .map(ClockTime)
            .ok_or_else(|| ScheduleError::InvalidTime { value: s.to_string() })
    }
}

impl TryFrom<String> for ClockTime {
    type Error = ScheduleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(time: ClockTime) -> Self {
        time.to_string()
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&minutes_to_time_string(self.0))
    }
}

/// When a slot recurs: every week on a weekday, or once on a date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SlotDay {
    Weekly(Weekday),
    Date(NaiveDate),
}

impl fmt::Display for SlotDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotDay::Weekly(day) => write!(f, "{}", day),
            SlotDay::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}

/// A window `[start, end)` on one day. `start < end` always holds.
///
/// On the wire a weekly slot may name its day either as `{"weekly":"Mon"}` or
/// as a Sunday-based `dayOfWeek` number (0 = Sunday .. 6 = Saturday). Weekly
/// slots are written with both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTimeSlot", into = "RawTimeSlot")]
pub struct TimeSlot {
    day: SlotDay,
    start: ClockTime,
    end: ClockTime,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTimeSlot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    day: Option<SlotDay>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    day_of_week: Option<u8>,
    start: ClockTime,
    end: ClockTime,
}

impl TryFrom<RawTimeSlot> for TimeSlot {
    type Error = ScheduleError;

    fn try_from(raw: RawTimeSlot) -> Result<Self, Self::Error> {
        let indexed = match raw.day_of_week {
            Some(index) => Some(
                weekday_from_index(index)
                    .map(SlotDay::Weekly)
                    .ok_or(ScheduleError::InvalidWeekday { index })?,
            ),
            None => None,
        };
        if let (Some(day), Some(from_index)) = (raw.day, indexed) {
            if day != from_index {
                return Err(ScheduleError::ConflictingDay {
                    day: day.to_string(),
                    from_index: from_index.to_string(),
                });
            }
        }
        let day = raw.day.or(indexed).ok_or(ScheduleError::MissingDay)?;
        TimeSlot::new(day, raw.start, raw.end)
    }
}

impl From<TimeSlot> for RawTimeSlot {
    fn from(slot: TimeSlot) -> Self {
        let day_of_week = match slot.day {
            SlotDay::Weekly(day) => Some(weekday_index(day)),
            SlotDay::Date(_) => None,
        };
        RawTimeSlot {
            day: Some(slot.day),
            day_of_week,
            start: slot.start,
            end: slot.end,
        }
    }
}

impl TimeSlot {
    pub fn new(day: SlotDay, start: ClockTime, end: ClockTime) -> Result<Self, ScheduleError> {
        if start >= end {
            return Err(ScheduleError::EmptyInterval {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { day, start, end })
    }

    /// Weekly slot from `HH:MM` strings
    pub fn weekly(day: Weekday, start: &str, end: &str) -> Result<Self, ScheduleError> {
        Self::new(SlotDay::Weekly(day), start.parse()?, end.parse()?)
    }

    /// One-off slot from `HH:MM` strings
    pub fn on_date(date: NaiveDate, start: &str, end: &str) -> Result<Self, ScheduleError> {
        Self::new(SlotDay::Date(date), start.parse()?, end.parse()?)
    }

    pub fn day(&self) -> SlotDay {
        self.day
    }

    pub fn start(&self) -> ClockTime {
        self.start
    }

    pub fn end(&self) -> ClockTime {
        self.end
    }

    pub fn duration_minutes(&self) -> u32 {
        self.end.minutes() - self.start.minutes()
    }

    /// Same day and the half-open windows intersect
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.day == other.day
            && intervals_overlap(
                self.start.minutes(),
                self.end.minutes(),
                other.start.minutes(),
                other.end.minutes(),
            )
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}-{}", self.day, self.start, self.end)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleKind {
    #[default]
    Regular,
    Temporary,
    Holiday,
}

impl fmt::Display for ScheduleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleKind::Regular => write!(f, "regular"),
            ScheduleKind::Temporary => write!(f, "temporary"),
            ScheduleKind::Holiday => write!(f, "holiday"),
        }
    }
}

fn default_active() -> bool {
    true
}

/// A weekly (or dated) access window granting a set of users a set of doors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: ScheduleKind,
    #[serde(default)]
    pub valid_from: Option<NaiveDate>,
    #[serde(default)]
    pub valid_until: Option<NaiveDate>,
    #[serde(default)]
    pub time_slots: Vec<TimeSlot>,
    #[serde(default)]
    pub users: Vec<String>,
    #[serde(default)]
    pub doors: Vec<String>,
    #[serde(default = "default_active")]
    pub active: bool,
    /// Display ordering and color only, never conflict precedence
    #[serde(default)]
    pub priority: i32,
}

/// Schedule fields as entered in the edit modal, before an id is assigned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDraft {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: ScheduleKind,
    #[serde(default)]
    pub valid_from: Option<NaiveDate>,
    #[serde(default)]
    pub valid_until: Option<NaiveDate>,
    #[serde(default)]
    pub time_slots: Vec<TimeSlot>,
    #[serde(default)]
    pub users: Vec<String>,
    #[serde(default)]
    pub doors: Vec<String>,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub priority: i32,
}

impl ScheduleDraft {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: ScheduleKind::Regular,
            valid_from: None,
            valid_until: None,
            time_slots: Vec::new(),
            users: Vec::new(),
            doors: Vec::new(),
            active: true,
            priority: 0,
        }
    }

    pub fn into_schedule(self, id: String) -> Schedule {
        Schedule {
            id,
            name: self.name,
            kind: self.kind,
            valid_from: self.valid_from,
            valid_until: self.valid_until,
            time_slots: self.time_slots,
            users: self.users,
            doors: self.doors,
            active: self.active,
            priority: self.priority,
        }
    }
}

impl Schedule {
    /// Checks the fields the edit modal refuses to save without
    pub fn validate(&self) -> Result<(), ScheduleError> {
        if self.name.trim().is_empty() {
            return Err(ScheduleError::MissingName);
        }
        if self.time_slots.is_empty() {
            return Err(ScheduleError::NoTimeSlots {
                name: self.name.clone(),
            });
        }
        if let (Some(from), Some(until)) = (self.valid_from, self.valid_until) {
            if from > until {
                return Err(ScheduleError::InvalidValidity { from, until });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictKind {
    Time,
    User,
    Door,
}

/// Two schedules that grant a common user or door during overlapping windows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictRecord {
    pub schedule1: String,
    pub schedule2: String,
    #[serde(rename = "type")]
    pub kind: ConflictKind,
    pub description: String,
    pub shared_users: Vec<String>,
    pub shared_doors: Vec<String>,
}

impl ConflictRecord {
    pub fn involves(&self, schedule_id: &str) -> bool {
        self.schedule1 == schedule_id || self.schedule2 == schedule_id
    }
}
