//! Built-in demo data used when no catalog or schedule files are supplied.

use chrono::Weekday;

use crate::catalog::{AccessGroup, Area, Catalog, Controller, Department, Door, Floor, MonitoringPoint, User};
use crate::schedule::{Schedule, ScheduleDraft, ScheduleKind, TimeSlot};

fn door(id: &str, name: &str, location: &str, controller: &str, area: &str) -> Door {
    Door {
        id: id.to_string(),
        name: name.to_string(),
        location: location.to_string(),
        controller_id: Some(controller.to_string()),
        area_id: Some(area.to_string()),
    }
}

fn user(id: &str, name: &str, department: &str, email: &str) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        department: department.to_string(),
        email: email.to_string(),
        card_number: None,
    }
}

pub fn demo_catalog() -> Catalog {
    Catalog {
        doors: vec![
            door("door-1", "Main Entrance", "Building A - Ground Floor", "ctrl-1", "area-1"),
            door("door-2", "Server Room", "Building A - Basement", "ctrl-1", "area-2"),
            door("door-3", "Parking Garage", "Building B - Level -1", "ctrl-2", "area-3"),
            door("door-4", "Emergency Exit", "Building A - East Wing", "ctrl-2", "area-1"),
            door("door-5", "Executive Suite", "Building A - 5th Floor", "ctrl-3", "area-4"),
        ],
        floors: vec![
            Floor::new("floor-0", "Ground Floor", 0),
            Floor::new("floor-1", "Floor 1", 1),
            Floor::new("floor-2", "Floor 2", 2),
            Floor::new("floor-5", "Executive Floor", 5),
        ],
        controllers: vec![
            Controller {
                id: "ctrl-1".to_string(),
                name: "Controller A1".to_string(),
                ip_address: "192.168.1.101".to_string(),
                location: "Building A".to_string(),
            },
            Controller {
                id: "ctrl-2".to_string(),
                name: "Controller B1".to_string(),
                ip_address: "192.168.1.102".to_string(),
                location: "Building B".to_string(),
            },
            Controller {
                id: "ctrl-3".to_string(),
                name: "Controller A5".to_string(),
                ip_address: "192.168.1.105".to_string(),
                location: "Building A".to_string(),
            },
        ],
        areas: vec![
            Area { id: "area-1".to_string(), name: "Lobby".to_string(), parent_id: None },
            Area { id: "area-2".to_string(), name: "Data Center".to_string(), parent_id: None },
            Area { id: "area-3".to_string(), name: "Parking".to_string(), parent_id: None },
            Area { id: "area-4".to_string(), name: "Executive".to_string(), parent_id: Some("area-1".to_string()) },
        ],
        users: vec![
            user("user-1", "Alice Johnson", "IT", "alice.johnson@example.com"),
            user("user-2", "Bob Smith", "Facilities", "bob.smith@example.com"),
            user("user-3", "Carol White", "HR", "carol.white@example.com"),
            user("user-4", "David Brown", "Security", "david.brown@example.com"),
        ],
        departments: ["IT", "Facilities", "HR", "Security"]
            .iter()
            .enumerate()
            .map(|(i, name)| Department {
                id: format!("dept-{}", i + 1),
                name: name.to_string(),
            })
            .collect(),
        access_groups: vec![
            AccessGroup {
                id: "group-1".to_string(),
                name: "Staff".to_string(),
                description: "Standard office access".to_string(),
            },
            AccessGroup {
                id: "group-2".to_string(),
                name: "Night Shift".to_string(),
                description: "After-hours access".to_string(),
            },
        ],
        monitoring_points: vec![
            MonitoringPoint {
                id: "mp-1".to_string(),
                name: "Server Room Door Contact".to_string(),
                location: "Building A - Basement".to_string(),
            },
            MonitoringPoint {
                id: "mp-2".to_string(),
                name: "Garage Motion Sensor".to_string(),
                location: "Building B - Level -1".to_string(),
            },
        ],
    }
}

fn weekday_slots(days: &[Weekday], start: &str, end: &str) -> Vec<TimeSlot> {
    days.iter()
        .filter_map(|day| TimeSlot::weekly(*day, start, end).ok())
        .collect()
}

fn demo(id: &str, draft: ScheduleDraft) -> Schedule {
    draft.into_schedule(id.to_string())
}

/// Three schedules; the first two overlap for Alice on weekday mornings
pub fn demo_schedules() -> Vec<Schedule> {
    const WEEKDAYS: [Weekday; 5] = [Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri];

    let mut office = ScheduleDraft::new("Business Hours");
    office.time_slots = weekday_slots(&WEEKDAYS, "08:00", "18:00");
    office.users = vec!["user-1".to_string(), "user-2".to_string(), "user-3".to_string()];
    office.doors = vec!["door-1".to_string(), "door-2".to_string()];
    office.priority = 1;

    let mut maintenance = ScheduleDraft::new("Server Maintenance");
    maintenance.kind = ScheduleKind::Temporary;
    maintenance.time_slots = weekday_slots(&[Weekday::Tue, Weekday::Thu], "07:00", "09:00");
    maintenance.users = vec!["user-1".to_string()];
    maintenance.doors = vec!["door-2".to_string()];
    maintenance.priority = 2;

    let mut night = ScheduleDraft::new("Night Security");
    night.time_slots = weekday_slots(&WEEKDAYS, "18:00", "23:59");
    night.users = vec!["user-4".to_string()];
    night.doors = vec!["door-1".to_string(), "door-3".to_string(), "door-4".to_string()];

    vec![
        demo("schedule-1", office),
        demo("schedule-2", maintenance),
        demo("schedule-3", night),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::ScheduleBook;

    #[test]
    fn demo_schedules_are_valid_and_conflict_once() {
        let book = ScheduleBook::from_schedules(demo_schedules()).unwrap();
        let conflicts = book.conflicts();
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].schedule1, "schedule-1");
        assert_eq!(conflicts[0].schedule2, "schedule-2");
    }

    #[test]
    fn demo_catalog_doors_reference_known_controllers() {
        let catalog = demo_catalog();
        for door in &catalog.doors {
            let controller = door.controller_id.as_deref().unwrap();
            assert!(catalog.controllers.iter().any(|c| c.id == controller));
        }
    }
}
