use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use csv::WriterBuilder;
use tracing::info;

use crate::assignment::AssignmentRecord;
use crate::parser::ImportError;
use crate::schedule::Schedule;

/// Writes assignment records as CSV with a header row
pub fn export_assignments_to_csv<P: AsRef<Path>>(
    records: &[AssignmentRecord],
    csv_path: P,
) -> Result<(), ImportError> {
    let path = csv_path.as_ref();
    let file = File::create(path).map_err(|source| ImportError::Io {
        path: path.display().to_string(),
        source,
    })?;
    write_assignments(records, file)?;
    info!(path = %path.display(), count = records.len(), "exported assignments");
    Ok(())
}

/// Same as [`export_assignments_to_csv`] into any writer
pub fn write_assignments<W: Write>(records: &[AssignmentRecord], output: W) -> Result<(), ImportError> {
    let mut wtr = WriterBuilder::new().has_headers(true).from_writer(output);
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Saves schedules as a pretty-printed JSON array, readable by `load_schedules`
pub fn save_schedules<P: AsRef<Path>>(schedules: &[Schedule], json_path: P) -> Result<(), ImportError> {
    let path = json_path.as_ref();
    let file = File::create(path).map_err(|source| ImportError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::to_writer_pretty(BufWriter::new(file), schedules)?;
    info!(path = %path.display(), count = schedules.len(), "saved schedules");
    Ok(())
}
