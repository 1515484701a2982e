//! CSV to table load.

use std::path::Path;
use std::time::{Duration, Instant};

use nobel_search_db::{WinnerTable, read_winners};
use tracing::{debug, info};

use crate::error::ProvisionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    pub rows_read: usize,
    pub rows_inserted: u64,
    pub timings: LoadTimings,
}

/// Wall time of each load phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadTimings {
    pub read: Duration,
    pub recreate: Duration,
    pub insert: Duration,
}

impl LoadTimings {
    pub fn total(&self) -> Duration {
        self.read + self.recreate + self.insert
    }
}

/// Replace the contents of `table` with the rows of `csv_path`.
///
/// The file is parsed before the table is touched, so a malformed CSV leaves
/// the existing table in place.
pub async fn load_table<T: WinnerTable>(
    table: &mut T,
    csv_path: &Path,
) -> Result<LoadReport, ProvisionError> {
    let table_name = table.table_name().to_string();
    debug!(table = %table_name, path = %csv_path.display(), "Starting load.");

    let phase = Instant::now();
    let rows = read_winners(csv_path)?;
    let read = phase.elapsed();
    info!(
        path = %csv_path.display(),
        rows = rows.len(),
        elapsed_ms = read.as_millis(),
        "Read winners from CSV."
    );

    let phase = Instant::now();
    table.recreate().await?;
    let recreate = phase.elapsed();
    info!(table = %table_name, elapsed_ms = recreate.as_millis(), "Recreated table.");

    let phase = Instant::now();
    let rows_inserted = table.insert_all(&rows).await?;
    let insert = phase.elapsed();
    info!(
        table = %table_name,
        rows_inserted,
        elapsed_ms = insert.as_millis(),
        "Inserted winners."
    );

    Ok(LoadReport {
        rows_read: rows.len(),
        rows_inserted,
        timings: LoadTimings {
            read,
            recreate,
            insert,
        },
    })
}
