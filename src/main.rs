use std::path::Path;

use access_console::assignment::{commit_pair, AssignmentRecord, PointKind};
use access_console::catalog::{Door, Floor, User};
use access_console::config::{Cli, Command};
use access_console::display::{print_assignments, print_schedules, write_conflict_report};
use access_console::export::export_assignments_to_csv;
use access_console::parser::{load_items, load_schedule_book, parse_id_list};
use access_console::schedule::ScheduleBook;
use access_console::seed::{demo_catalog, demo_schedules};
use access_console::transfer::{DualList, TransferItem};
use access_console::web::{start_server, AppState};
use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Serve { port, bind, schedules } => {
            let book = schedule_book(schedules.as_deref())?;
            println!("Starting console on {}:{}...", bind, port);
            println!("Loaded {} schedules, {} conflicts", book.len(), book.conflicts().len());
            start_server(&bind, port, AppState::new(demo_catalog(), book))
                .await
                .context("console host stopped")?;
        }
        Command::Conflicts { schedules, out } => {
            let book = schedule_book(schedules.as_deref())?;
            print_schedules(&book.by_priority().into_iter().cloned().collect::<Vec<_>>(), book.conflicts());
            if let Some(out) = out {
                write_conflict_report(book.schedules(), book.conflicts(), &out)
                    .map_err(|e| anyhow::anyhow!("writing {}: {}", out.display(), e))?;
                println!("\nConflict report written to {}", out.display());
            }
        }
        Command::Assign { floors, points_csv, users_csv, points, users, out } => {
            let catalog = demo_catalog();
            let user_items: Vec<User> = match users_csv {
                Some(path) => load_items(&path)?,
                None => catalog.users,
            };
            let point_ids = parse_id_list(&points);
            let user_ids = parse_id_list(&users);

            let records = if floors {
                let floor_items: Vec<Floor> = match points_csv {
                    Some(path) => load_items(&path)?,
                    None => catalog.floors,
                };
                assign(floor_items, user_items, &point_ids, &user_ids, PointKind::Floor)?
            } else {
                let door_items: Vec<Door> = match points_csv {
                    Some(path) => load_items(&path)?,
                    None => catalog.doors,
                };
                assign(door_items, user_items, &point_ids, &user_ids, PointKind::Door)?
            };

            print_assignments(&records);
            if let Some(out) = out {
                export_assignments_to_csv(&records, &out)?;
                println!("\nAssignments written to {}", out.display());
            }
        }
    }

    Ok(())
}

fn schedule_book(path: Option<&Path>) -> Result<ScheduleBook> {
    match path {
        Some(path) => {
            let book = load_schedule_book(path)?;
            info!(path = %path.display(), count = book.len(), "loaded schedules");
            Ok(book)
        }
        None => ScheduleBook::from_schedules(demo_schedules()).context("demo schedules are invalid"),
    }
}

fn assign<P: TransferItem + Clone>(
    point_items: Vec<P>,
    user_items: Vec<User>,
    point_ids: &[String],
    user_ids: &[String],
    kind: PointKind,
) -> Result<Vec<AssignmentRecord>> {
    let mut points = DualList::new(point_items);
    let mut users = DualList::new(user_items);
    for id in point_ids {
        points.toggle_available_selection(id, true)?;
    }
    for id in user_ids {
        users.toggle_available_selection(id, true)?;
    }
    points.assign_selected();
    users.assign_selected();

    let records = commit_pair(&mut points, &mut users, kind, chrono::Local::now().date_naive())?;
    Ok(records)
}
