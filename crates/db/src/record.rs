//! Nobel Prize winners as read from the CSV export.
//!
//! Expected header: `year,discipline,winner,desc`. Further columns are
//! ignored and values are trimmed.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use tracing::debug;

use crate::error::DbError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NobelPrizeWinner {
    pub year: i32,
    pub discipline: String,
    pub winner: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    year: String,
    discipline: String,
    winner: String,
    #[serde(default)]
    desc: Option<String>,
}

pub fn read_winners(path: &Path) -> Result<Vec<NobelPrizeWinner>, DbError> {
    let file = File::open(path).map_err(|source| DbError::OpenCsv {
        path: path.to_path_buf(),
        source,
    })?;
    let winners = read_winners_from(file)?;
    debug!(
        path = %path.display(),
        rows = winners.len(),
        "Read Nobel Prize winners from CSV."
    );
    Ok(winners)
}

pub fn read_winners_from<R: Read>(input: R) -> Result<Vec<NobelPrizeWinner>, DbError> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(input);
    let headers = reader.headers()?.clone();

    let mut winners = Vec::new();
    for result in reader.records() {
        let record = result?;
        let line = record.position().map_or(0, csv::Position::line);
        let row: CsvRow = record
            .deserialize(Some(&headers))
            .map_err(|source| DbError::CsvRow { line, source })?;

        let year = row
            .year
            .parse::<i32>()
            .map_err(|_| DbError::InvalidYear {
                line,
                value: row.year.clone(),
            })?;

        winners.push(NobelPrizeWinner {
            year,
            discipline: row.discipline,
            winner: row.winner,
            description: row.desc.unwrap_or_default(),
        });
    }

    Ok(winners)
}
