use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::Reader;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{info, warn};

use crate::schedule::{Schedule, ScheduleBook, ScheduleError};
use crate::transfer::TransferItem;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to open {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

/// Loads catalog items (doors, users, ...) from a CSV file with a header row.
///
/// Column names follow the JSON field names (`id`, `name`, `controllerId`, ...).
/// Rows without an id or a name are skipped.
pub fn load_items<T, P>(csv_path: P) -> Result<Vec<T>, ImportError>
where
    T: DeserializeOwned + TransferItem,
    P: AsRef<Path>,
{
    let path = csv_path.as_ref();
    let file = File::open(path).map_err(|source| ImportError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let items = read_items(file)?;
    info!(path = %path.display(), count = items.len(), "loaded catalog items");
    Ok(items)
}

/// Same as [`load_items`] over any reader
pub fn read_items<T, R>(input: R) -> Result<Vec<T>, ImportError>
where
    T: DeserializeOwned + TransferItem,
    R: Read,
{
    let mut reader = Reader::from_reader(input);
    let mut items = Vec::new();

    for (row, result) in reader.deserialize::<T>().enumerate() {
        let item = result?;

        // Skip if essential fields are missing
        if item.id().trim().is_empty() || item.name().trim().is_empty() {
            warn!(row = row + 1, "skipping catalog row without id or name");
            continue;
        }
        items.push(item);
    }

    Ok(items)
}

/// Loads a JSON array of schedules
pub fn load_schedules<P: AsRef<Path>>(json_path: P) -> Result<Vec<Schedule>, ImportError> {
    let path = json_path.as_ref();
    let file = File::open(path).map_err(|source| ImportError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let schedules: Vec<Schedule> = serde_json::from_reader(BufReader::new(file))?;
    info!(path = %path.display(), count = schedules.len(), "loaded schedules");
    Ok(schedules)
}

/// Loads schedules and validates them into a book
pub fn load_schedule_book<P: AsRef<Path>>(json_path: P) -> Result<ScheduleBook, ImportError> {
    let schedules = load_schedules(json_path)?;
    Ok(ScheduleBook::from_schedules(schedules)?)
}

/// Parses a comma-separated id list, dropping blanks and repeats while keeping order
pub fn parse_id_list(ids: &str) -> Vec<String> {
    let mut result: Vec<String> = Vec::new();
    for part in ids.split(',') {
        let trimmed = part.trim();
        if !trimmed.is_empty() && !result.iter().any(|id| id == trimmed) {
            result.push(trimmed.to_string());
        }
    }
    result
}
