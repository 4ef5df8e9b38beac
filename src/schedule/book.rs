use std::cell::OnceCell;

use tracing::info;

use super::conflict::detect_conflicts;
use super::error::ScheduleError;
use super::types::{ConflictRecord, Schedule, ScheduleDraft};
use crate::ids::new_id;

/// The schedule collection of one console session.
///
/// The conflict list is derived, never stored independently: it is computed
/// on first request and dropped by every mutation.
#[derive(Debug, Clone, Default)]
pub struct ScheduleBook {
    schedules: Vec<Schedule>,
    conflicts: OnceCell<Vec<ConflictRecord>>,
}

impl ScheduleBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a book from already-identified schedules, validating each one
    pub fn from_schedules(schedules: Vec<Schedule>) -> Result<Self, ScheduleError> {
        let mut book = Self::new();
        for schedule in schedules {
            book.insert(schedule)?;
        }
        Ok(book)
    }

    pub fn schedules(&self) -> &[Schedule] {
        &self.schedules
    }

    pub fn len(&self) -> usize {
        self.schedules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Schedule> {
        self.schedules.iter().find(|s| s.id == id)
    }

    /// Current conflicts, recomputed in full after any change
    pub fn conflicts(&self) -> &[ConflictRecord] {
        self.conflicts.get_or_init(|| detect_conflicts(&self.schedules))
    }

    pub fn conflicts_for(&self, id: &str) -> Vec<&ConflictRecord> {
        self.conflicts().iter().filter(|c| c.involves(id)).collect()
    }

    /// Schedules in display order: highest priority first, then by name
    pub fn by_priority(&self) -> Vec<&Schedule> {
        let mut ordered: Vec<&Schedule> = self.schedules.iter().collect();
        ordered.sort_by(|a, b| b.priority.cmp(&a.priority).then_with(|| a.name.cmp(&b.name)));
        ordered
    }

    /// Adds a schedule that already carries an id
    pub fn insert(&mut self, schedule: Schedule) -> Result<&Schedule, ScheduleError> {
        schedule.validate()?;
        if self.get(&schedule.id).is_some() {
            return Err(ScheduleError::DuplicateId(schedule.id));
        }
        Ok(self.push(schedule))
    }

    /// Saves a new schedule from the edit modal under a fresh id
    pub fn add(&mut self, draft: ScheduleDraft) -> Result<&Schedule, ScheduleError> {
        let schedule = draft.into_schedule(self.fresh_id(|| new_id("sch")));
        let added = self.insert(schedule)?;
        info!(id = %added.id, name = %added.name, "schedule added");
        Ok(added)
    }

    /// Replaces every field of an existing schedule except its id
    pub fn update(&mut self, id: &str, draft: ScheduleDraft) -> Result<&Schedule, ScheduleError> {
        let index = self.index_of(id)?;
        let schedule = draft.into_schedule(id.to_string());
        schedule.validate()?;
        info!(id, name = %schedule.name, "schedule updated");
        self.schedules[index] = schedule;
        self.invalidate();
        Ok(&self.schedules[index])
    }

    pub fn remove(&mut self, id: &str) -> Result<Schedule, ScheduleError> {
        let index = self.index_of(id)?;
        let removed = self.schedules.remove(index);
        info!(id, name = %removed.name, "schedule removed");
        self.invalidate();
        Ok(removed)
    }

    /// Clones a schedule under a new id with " (Copy)" appended to its name
    pub fn duplicate(&mut self, id: &str) -> Result<&Schedule, ScheduleError> {
        let index = self.index_of(id)?;
        let mut copy = self.schedules[index].clone();
        copy.id = self.fresh_id(|| new_id("sch"));
        copy.name = format!("{} (Copy)", copy.name);
        info!(source = id, id = %copy.id, "schedule duplicated");
        Ok(self.push(copy))
    }

    pub fn set_active(&mut self, id: &str, active: bool) -> Result<&Schedule, ScheduleError> {
        let index = self.index_of(id)?;
        self.schedules[index].active = active;
        self.invalidate();
        Ok(&self.schedules[index])
    }

    /// First generated id not already in the book
    fn fresh_id(&self, mut generate: impl FnMut() -> String) -> String {
        loop {
            let id = generate();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    fn index_of(&self, id: &str) -> Result<usize, ScheduleError> {
        self.schedules
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| ScheduleError::NotFound(id.to_string()))
    }

    fn push(&mut self, schedule: Schedule) -> &Schedule {
        self.schedules.push(schedule);
        self.invalidate();
        &self.schedules[self.schedules.len() - 1]
    }

    fn invalidate(&mut self) {
        self.conflicts = OnceCell::new();
    }
}
