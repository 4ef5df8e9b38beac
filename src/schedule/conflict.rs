use std::collections::BTreeSet;

use tracing::debug;

use super::types::{ConflictKind, ConflictRecord, Schedule};

/// Finds every unordered pair of schedules that share a user or a door and
/// have overlapping time slots on the same day.
///
/// Each pair is reported at most once, in collection order
/// (`schedule1` precedes `schedule2`). The result is a pure function of
/// `schedules` and is meant to be recomputed whenever they change.
pub fn detect_conflicts(schedules: &[Schedule]) -> Vec<ConflictRecord> {
    let mut conflicts = Vec::new();

    for (i, a) in schedules.iter().enumerate() {
        for b in &schedules[i + 1..] {
            if let Some(conflict) = check_pair(a, b) {
                conflicts.push(conflict);
            }
        }
    }

    debug!(schedules = schedules.len(), conflicts = conflicts.len(), "conflict scan finished");
    conflicts
}

/// Conflict between two schedules, if any
pub fn check_pair(a: &Schedule, b: &Schedule) -> Option<ConflictRecord> {
    let shared_users = intersect(&a.users, &b.users);
    let shared_doors = intersect(&a.doors, &b.doors);
    if shared_users.is_empty() && shared_doors.is_empty() {
        return None;
    }

    let overlapping = a
        .time_slots
        .iter()
        .any(|slot_a| b.time_slots.iter().any(|slot_b| slot_a.overlaps(slot_b)));
    if !overlapping {
        return None;
    }

    Some(ConflictRecord {
        schedule1: a.id.clone(),
        schedule2: b.id.clone(),
        kind: ConflictKind::Time,
        description: format!("\"{}\" and \"{}\" have overlapping time slots", a.name, b.name),
        shared_users,
        shared_doors,
    })
}

fn intersect(a: &[String], b: &[String]) -> Vec<String> {
    let left: BTreeSet<&String> = a.iter().collect();
    let right: BTreeSet<&String> = b.iter().collect();
    left.intersection(&right).map(|id| (*id).clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::types::{ScheduleDraft, TimeSlot};
    use chrono::{NaiveDate, Weekday};
    use proptest::prelude::*;

    fn schedule(id: &str, users: &[&str], doors: &[&str], slots: Vec<TimeSlot>) -> Schedule {
        let mut draft = ScheduleDraft::new(&format!("Schedule {}", id));
        draft.users = users.iter().map(|u| u.to_string()).collect();
        draft.doors = doors.iter().map(|d| d.to_string()).collect();
        draft.time_slots = slots;
        draft.into_schedule(id.to_string())
    }

    fn mon(start: &str, end: &str) -> TimeSlot {
        TimeSlot::weekly(Weekday::Mon, start, end).unwrap()
    }

    #[test]
    fn shared_user_with_overlap_conflicts_once() {
        let a = schedule("A", &["u1"], &["d1"], vec![mon("08:00", "18:00")]);
        let b = schedule("B", &["u1"], &["d2"], vec![mon("09:00", "10:00")]);
        let c = schedule("C", &["u2"], &["d3"], vec![mon("09:00", "10:00")]);

        let conflicts = detect_conflicts(&[a, b, c]);
        assert_eq!(conflicts.len(), 1);
        let conflict = &conflicts[0];
        assert_eq!(conflict.schedule1, "A");
        assert_eq!(conflict.schedule2, "B");
        assert_eq!(conflict.kind, ConflictKind::Time);
        assert_eq!(conflict.shared_users, vec!["u1".to_string()]);
        assert!(conflict.shared_doors.is_empty());
        assert!(conflict.description.contains("Schedule A"));
        assert!(conflict.description.contains("Schedule B"));
        assert!(!conflicts.iter().any(|c| c.involves("C")));
    }

    #[test]
    fn touching_slots_do_not_conflict() {
        let a = schedule("A", &["u1"], &[], vec![mon("08:00", "09:00")]);
        let b = schedule("B", &["u1"], &[], vec![mon("09:00", "10:00")]);
        assert!(detect_conflicts(&[a, b]).is_empty());
    }

    #[test]
    fn shared_door_alone_is_enough() {
        let a = schedule("A", &["u1"], &["d9"], vec![mon("08:00", "12:00")]);
        let b = schedule("B", &["u2"], &["d9"], vec![mon("11:59", "13:00")]);
        let conflicts = detect_conflicts(&[a, b]);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].shared_doors, vec!["d9".to_string()]);
    }

    #[test]
    fn disjoint_resources_never_conflict() {
        let a = schedule("A", &["u1"], &["d1"], vec![mon("00:00", "23:59")]);
        let b = schedule("B", &["u2"], &["d2"], vec![mon("00:00", "23:59")]);
        assert!(detect_conflicts(&[a, b]).is_empty());
    }

    #[test]
    fn different_days_never_conflict() {
        let a = schedule("A", &["u1"], &["d1"], vec![mon("08:00", "18:00")]);
        let b = schedule(
            "B",
            &["u1"],
            &["d1"],
            vec![TimeSlot::weekly(Weekday::Tue, "08:00", "18:00").unwrap()],
        );
        assert!(detect_conflicts(&[a, b]).is_empty());
    }

    #[test]
    fn schedules_without_slots_never_conflict() {
        let a = schedule("A", &["u1"], &["d1"], Vec::new());
        let b = schedule("B", &["u1"], &["d1"], vec![mon("08:00", "18:00")]);
        assert!(detect_conflicts(&[a, b]).is_empty());
    }

    #[test]
    fn many_overlapping_slots_still_one_record() {
        let a = schedule("A", &["u1"], &["d1"], vec![mon("08:00", "10:00"), mon("12:00", "14:00")]);
        let b = schedule("B", &["u1"], &["d1"], vec![mon("09:00", "13:00"), mon("13:00", "15:00")]);
        assert_eq!(detect_conflicts(&[a, b]).len(), 1);
    }

    #[test]
    fn a_schedule_is_not_compared_with_itself() {
        let a = schedule("A", &["u1"], &["d1"], vec![mon("08:00", "18:00")]);
        assert!(detect_conflicts(&[a]).is_empty());
    }

    #[test]
    fn dated_slots_conflict_only_on_the_same_date() {
        let day = NaiveDate::from_ymd_opt(2024, 12, 24).unwrap();
        let next = NaiveDate::from_ymd_opt(2024, 12, 25).unwrap();
        let a = schedule("A", &["u1"], &[], vec![TimeSlot::on_date(day, "08:00", "12:00").unwrap()]);
        let b = schedule("B", &["u1"], &[], vec![TimeSlot::on_date(next, "08:00", "12:00").unwrap()]);
        let c = schedule("C", &["u1"], &[], vec![TimeSlot::on_date(day, "11:00", "13:00").unwrap()]);

        let conflicts = detect_conflicts(&[a, b, c]);
        assert_eq!(conflicts.len(), 1);
        assert_eq!((conflicts[0].schedule1.as_str(), conflicts[0].schedule2.as_str()), ("A", "C"));
    }

    fn arb_slot() -> impl Strategy<Value = TimeSlot> {
        (0u8..3, 0u32..23, 1u32..4).prop_map(|(day, start_hour, len)| {
            let weekday = [Weekday::Mon, Weekday::Tue, Weekday::Wed][day as usize];
            let end_hour = (start_hour + len).min(23);
            let start = format!("{:02}:00", start_hour);
            let end = format!("{:02}:00", end_hour);
            TimeSlot::weekly(weekday, &start, &end).unwrap()
        })
    }

    fn arb_schedule(id: usize) -> impl Strategy<Value = Schedule> {
        (
            prop::collection::vec(0u8..4, 0..3),
            prop::collection::vec(0u8..4, 0..3),
            prop::collection::vec(arb_slot(), 0..4),
        )
            .prop_map(move |(users, doors, slots)| {
                let users: Vec<String> = users.iter().map(|u| format!("u{}", u)).collect();
                let doors: Vec<String> = doors.iter().map(|d| format!("d{}", d)).collect();
                let users: Vec<&str> = users.iter().map(String::as_str).collect();
                let doors: Vec<&str> = doors.iter().map(String::as_str).collect();
                schedule(&format!("s{}", id), &users, &doors, slots)
            })
    }

    fn arb_schedules() -> impl Strategy<Value = Vec<Schedule>> {
        (0usize..6).prop_flat_map(|n| (0..n).map(arb_schedule).collect::<Vec<_>>())
    }

    proptest! {
        /// Property: the result does not depend on the order of the pair.
        #[test]
        fn prop_pair_check_is_symmetric(a in arb_schedule(0), b in arb_schedule(1)) {
            prop_assert_eq!(check_pair(&a, &b).is_some(), check_pair(&b, &a).is_some());
        }

        /// Property: each unordered pair appears at most once and never with itself.
        #[test]
        fn prop_each_pair_reported_once(schedules in arb_schedules()) {
            let conflicts = detect_conflicts(&schedules);
            let mut pairs = BTreeSet::new();
            for conflict in &conflicts {
                prop_assert_ne!(&conflict.schedule1, &conflict.schedule2);
                let key = if conflict.schedule1 < conflict.schedule2 {
                    (conflict.schedule1.clone(), conflict.schedule2.clone())
                } else {
                    (conflict.schedule2.clone(), conflict.schedule1.clone())
                };
                prop_assert!(pairs.insert(key));
            }
        }

        /// Property: reported pairs always share a resource and an overlapping same-day slot.
        #[test]
        fn prop_reported_pairs_are_real_conflicts(schedules in arb_schedules()) {
            for conflict in detect_conflicts(&schedules) {
                let a = schedules.iter().find(|s| s.id == conflict.schedule1).unwrap();
                let b = schedules.iter().find(|s| s.id == conflict.schedule2).unwrap();
                let shares = a.users.iter().any(|u| b.users.contains(u)) || a.doors.iter().any(|d| b.doors.contains(d));
                prop_assert!(shares);
                let overlap = a.time_slots.iter().any(|x| b.time_slots.iter().any(|y| x.day() == y.day() && x.start() < y.end() && y.start() < x.end()));
                prop_assert!(overlap);
            }
        }

        /// Property: reversing the collection reports the same unordered pairs.
        #[test]
        fn prop_collection_order_does_not_change_pairs(schedules in arb_schedules()) {
            let normalize = |conflicts: Vec<ConflictRecord>| -> BTreeSet<(String, String)> {
                conflicts
                    .into_iter()
                    .map(|c| if c.schedule1 < c.schedule2 { (c.schedule1, c.schedule2) } else { (c.schedule2, c.schedule1) })
                    .collect()
            };
            let mut reversed = schedules.clone();
            reversed.reverse();
            prop_assert_eq!(normalize(detect_conflicts(&schedules)), normalize(detect_conflicts(&reversed)));
        }
    }
}
