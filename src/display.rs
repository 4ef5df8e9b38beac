use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::assignment::AssignmentRecord;
use crate::schedule::{ConflictRecord, Schedule};

/// Formats a schedule label with its kind, e.g. `Night Shift (regular)`
pub fn format_schedule_label(schedule: &Schedule) -> String {
    format!("{} ({})", schedule.name, schedule.kind)
}

/// One line per slot, e.g. `Mon 08:00-18:00, Tue 08:00-18:00`
pub fn format_slots(schedule: &Schedule) -> String {
    if schedule.time_slots.is_empty() {
        return "[NO SLOTS]".to_string();
    }
    schedule
        .time_slots
        .iter()
        .map(|slot| slot.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Renders the conflict report, one conflict per line followed by the shared resources
pub fn render_conflict_report(schedules: &[Schedule], conflicts: &[ConflictRecord]) -> String {
    let mut out = String::new();
    out.push_str(&format!("** Schedule conflicts: {} **\n", conflicts.len()));
    for conflict in conflicts {
        let label = |id: &str| {
            schedules
                .iter()
                .find(|s| s.id == id)
                .map(format_schedule_label)
                .unwrap_or_else(|| id.to_string())
        };
        out.push_str(&format!(
            "{} <-> {}: {}\n",
            label(&conflict.schedule1),
            label(&conflict.schedule2),
            conflict.description
        ));
        if !conflict.shared_users.is_empty() {
            out.push_str(&format!("  users: {}\n", conflict.shared_users.join(", ")));
        }
        if !conflict.shared_doors.is_empty() {
            out.push_str(&format!("  doors: {}\n", conflict.shared_doors.join(", ")));
        }
    }
    out
}

/// Writes the conflict report to a file
pub fn write_conflict_report<P: AsRef<Path>>(
    schedules: &[Schedule],
    conflicts: &[ConflictRecord],
    filename: P,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut file = File::create(filename)?;
    file.write_all(render_conflict_report(schedules, conflicts).as_bytes())?;
    Ok(())
}

/// Prints schedules and their conflicts in a readable format
pub fn print_schedules(schedules: &[Schedule], conflicts: &[ConflictRecord]) {
    println!("\n=== Schedules ({}) ===", schedules.len());
    for schedule in schedules {
        let status = if schedule.active { "" } else { " [INACTIVE]" };
        println!("  {}{} -> {}", format_schedule_label(schedule), status, format_slots(schedule));
        println!("    users: {} | doors: {}", schedule.users.join(", "), schedule.doors.join(", "));
    }

    println!();
    if conflicts.is_empty() {
        println!("No schedule conflicts.");
    } else {
        println!("⚠️  {}", render_conflict_report(schedules, conflicts).trim_end());
    }
}

/// Prints committed assignment records
pub fn print_assignments(records: &[AssignmentRecord]) {
    println!("\n=== Assignments ({}) ===", records.len());
    for record in records {
        println!(
            "  {} {} ({}) -> {} ({}) [{}] on {}",
            record.point_kind,
            record.point_name,
            record.point_id,
            record.user_name,
            record.user_id,
            record.access_level,
            record.assigned_on.format("%Y-%m-%d")
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::detect_conflicts;
    use crate::seed::demo_schedules;

    #[test]
    fn label_includes_kind() {
        let schedules = demo_schedules();
        assert_eq!(format_schedule_label(&schedules[1]), "Server Maintenance (temporary)");
    }

    #[test]
    fn slots_render_weekday_and_times() {
        let schedules = demo_schedules();
        assert!(format_slots(&schedules[1]).starts_with("Tue 07:00-09:00, Thu 07:00-09:00"));
    }

    #[test]
    fn report_lists_each_conflict_with_shared_resources() {
        let schedules = demo_schedules();
        let conflicts = detect_conflicts(&schedules);
        let report = render_conflict_report(&schedules, &conflicts);
        assert!(report.starts_with("** Schedule conflicts: 1 **"));
        assert!(report.contains("Business Hours (regular) <-> Server Maintenance (temporary)"));
        assert!(report.contains("  users: user-1"));
        assert!(report.contains("  doors: door-2"));
    }

    #[test]
    fn report_file_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conflicts.txt");
        write_conflict_report(&demo_schedules(), &[], &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "** Schedule conflicts: 0 **\n");
    }
}
