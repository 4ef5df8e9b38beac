use std::collections::{BTreeMap, HashSet};

use tracing::info;

use super::commit::AssignmentError;
use super::types::{AccessLevel, AssignmentRecord, PointKind};

/// Committed door/floor grants. Records are only ever added or deleted.
#[derive(Debug, Clone, Default)]
pub struct AssignmentBook {
    records: Vec<AssignmentRecord>,
}

impl AssignmentBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[AssignmentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn extend(&mut self, records: Vec<AssignmentRecord>) {
        self.records.extend(records);
    }

    pub fn remove(&mut self, id: &str) -> Result<AssignmentRecord, AssignmentError> {
        let index = self
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| AssignmentError::NotFound(id.to_string()))?;
        let removed = self.records.remove(index);
        info!(id, point = %removed.point_id, user = %removed.user_id, "assignment removed");
        Ok(removed)
    }

    /// Bulk delete. Unknown ids are skipped; returns how many records went away.
    pub fn remove_many<S: AsRef<str>>(&mut self, ids: &[S]) -> usize {
        let doomed: HashSet<&str> = ids.iter().map(|id| id.as_ref()).collect();
        let before = self.records.len();
        self.records.retain(|r| !doomed.contains(r.id.as_str()));
        let removed = before - self.records.len();
        info!(requested = ids.len(), removed, "assignments removed in bulk");
        removed
    }

    pub fn for_user(&self, user_id: &str) -> Vec<&AssignmentRecord> {
        self.records.iter().filter(|r| r.user_id == user_id).collect()
    }

    pub fn for_point(&self, kind: PointKind, point_id: &str) -> Vec<&AssignmentRecord> {
        self.records
            .iter()
            .filter(|r| r.point_kind == kind && r.point_id == point_id)
            .collect()
    }

    /// Case-insensitive match on point or user, by name or id
    pub fn search(&self, query: &str) -> Vec<&AssignmentRecord> {
        let query = query.trim().to_lowercase();
        self.records
            .iter()
            .filter(|r| {
                query.is_empty()
                    || [&r.point_id, &r.point_name, &r.user_id, &r.user_name]
                        .iter()
                        .any(|field| field.to_lowercase().contains(&query))
            })
            .collect()
    }

    pub fn count_by_level(&self) -> BTreeMap<AccessLevel, usize> {
        let mut counts = BTreeMap::new();
        for record in &self.records {
            *counts.entry(record.access_level).or_insert(0) += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(id: &str, point: &str, user: &str, level: AccessLevel) -> AssignmentRecord {
        AssignmentRecord {
            id: id.to_string(),
            point_kind: PointKind::Door,
            point_id: point.to_string(),
            point_name: format!("Door {}", point),
            user_id: user.to_string(),
            user_name: format!("User {}", user),
            access_level: level,
            assigned_on: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        }
    }

    fn book() -> AssignmentBook {
        let mut book = AssignmentBook::new();
        book.extend(vec![
            record("a1", "d1", "u1", AccessLevel::Full),
            record("a2", "d1", "u2", AccessLevel::Restricted),
            record("a3", "d2", "u1", AccessLevel::Full),
            record("a4", "d3", "u3", AccessLevel::Emergency),
        ]);
        book
    }

    #[test]
    fn removes_single_record() {
        let mut book = book();
        let removed = book.remove("a2").unwrap();
        assert_eq!(removed.user_id, "u2");
        assert_eq!(book.len(), 3);
        assert_eq!(book.remove("a2"), Err(AssignmentError::NotFound("a2".to_string())));
    }

    #[test]
    fn bulk_remove_skips_unknown_ids() {
        let mut book = book();
        assert_eq!(book.remove_many(&["a1", "a4", "zz"]), 2);
        let ids: Vec<&str> = book.records().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a2", "a3"]);
    }

    #[test]
    fn lookups_by_user_and_point() {
        let book = book();
        assert_eq!(book.for_user("u1").len(), 2);
        assert_eq!(book.for_point(PointKind::Door, "d1").len(), 2);
        assert!(book.for_point(PointKind::Floor, "d1").is_empty());
    }

    #[test]
    fn search_matches_names_and_ids() {
        let book = book();
        assert_eq!(book.search("user u3").len(), 1);
        assert_eq!(book.search("D1").len(), 2);
        assert_eq!(book.search("").len(), 4);
        assert!(book.search("nobody").is_empty());
    }

    #[test]
    fn counts_levels() {
        let counts = book().count_by_level();
        assert_eq!(counts.get(&AccessLevel::Full), Some(&2));
        assert_eq!(counts.get(&AccessLevel::Restricted), Some(&1));
        assert_eq!(counts.get(&AccessLevel::Emergency), Some(&1));
    }
}
