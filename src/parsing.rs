use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, warn};

use crate::types::{ProblemRecord, ProblemStatus};

// Column positions in the problem export.
const TIME_COLUMN: usize = 1;
const STATUS_COLUMN: usize = 3;
const HOST_COLUMN: usize = 4;
const DESCRIPTION_COLUMN: usize = 5;
const DURATION_COLUMN: usize = 6;
pub const MIN_COLUMNS: usize = 7;

impl ProblemRecord {
    /// Extract the positional fields from one CSV row. Rows shorter than
    /// `MIN_COLUMNS` yield `None`; extra columns are ignored.
    pub fn from_record(record: &StringRecord) -> Option<Self> {
        if record.len() < MIN_COLUMNS {
            return None;
        }
        let field = |i: usize| record.get(i).unwrap_or_default().to_string();
        Some(ProblemRecord {
            time: field(TIME_COLUMN),
            status: ProblemStatus::from_csv_value(record.get(STATUS_COLUMN).unwrap_or_default()),
            host: field(HOST_COLUMN),
            description: field(DESCRIPTION_COLUMN),
            duration: field(DURATION_COLUMN),
        })
    }
}

/// Parse every row of the export in source order. The header row is kept as a
/// record with no status; short rows are skipped and the scan stops at the
/// first CSV syntax error.
pub fn parse_problem_records(csv_content: &str) -> Vec<ProblemRecord> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(csv_content.as_bytes());

    let mut records = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                warn!("stopping CSV scan at row {}: {}", index, e);
                break;
            }
        };
        match ProblemRecord::from_record(&row) {
            Some(record) => records.push(record),
            None => debug!("skipping row {} with {} fields", index, row.len()),
        }
    }
    records
}
