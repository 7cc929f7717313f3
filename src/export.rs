//! Tabular export of the monthly history.

use std::fs::{self, File};
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::population::MonthlyStatistics;

const HEADER: [&str; 3] = ["Month", "Population Size", "Average Health"];

/// One exported month.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryRow {
    #[serde(rename = "Month")]
    pub month: u32,
    #[serde(rename = "Population Size")]
    pub population_size: usize,
    #[serde(rename = "Average Health")]
    pub average_health: f64,
}

impl From<&MonthlyStatistics> for HistoryRow {
    fn from(stats: &MonthlyStatistics) -> Self {
        Self {
            month: stats.month,
            population_size: stats.population_size,
            average_health: stats.average_health,
        }
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("export io error: {0}")]
    Io(#[from] io::Error),
    #[error("export csv error: {0}")]
    Csv(#[from] csv::Error),
}

pub fn write_history<W: io::Write>(writer: W, rows: &[HistoryRow]) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_writer(writer);
    // The serializer only emits a header alongside the first row.
    if rows.is_empty() {
        writer.write_record(HEADER)?;
    }
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn read_history<R: io::Read>(reader: R) -> Result<Vec<HistoryRow>, ExportError> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();
    for row in reader.deserialize::<HistoryRow>() {
        rows.push(row?);
    }
    Ok(rows)
}

/// Writes `rows` to `path`, creating parent directories as needed.
pub fn export_csv(path: impl AsRef<Path>, rows: &[HistoryRow]) -> Result<(), ExportError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    write_history(File::create(path)?, rows)
}

pub fn import_csv(path: impl AsRef<Path>) -> Result<Vec<HistoryRow>, ExportError> {
    read_history(File::open(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<HistoryRow> {
        vec![
            HistoryRow {
                month: 1,
                population_size: 100,
                average_health: 105.0,
            },
            HistoryRow {
                month: 2,
                population_size: 100,
                average_health: 108.73456789012345,
            },
            HistoryRow {
                month: 3,
                population_size: 100,
                average_health: 0.0,
            },
        ]
    }

    #[test]
    fn header_and_rows() {
        let mut buffer = Vec::new();
        write_history(&mut buffer, &rows()[..1]).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text, "Month,Population Size,Average Health\n1,100,105.0\n");
    }

    #[test]
    fn empty_history_still_has_a_header() {
        let mut buffer = Vec::new();
        write_history(&mut buffer, &[]).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "Month,Population Size,Average Health\n"
        );
        assert!(read_history("Month,Population Size,Average Health\n".as_bytes())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn file_round_trip_preserves_order_and_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("history.csv");
        export_csv(&path, &rows()).unwrap();
        assert_eq!(import_csv(&path).unwrap(), rows());
    }

    #[test]
    fn garbage_rows_are_reported() {
        let text = "Month,Population Size,Average Health\none,100,1.0\n";
        assert!(matches!(
            read_history(text.as_bytes()),
            Err(ExportError::Csv(_))
        ));
    }
}
