//! CSV ingestion adapter.
//!
//! Grounded on `original_source/backend/main.py`'s `pd.read_csv` plus its
//! `required_columns.issubset(df.columns)` header check, reading through
//! the `csv` crate (`dudukav-eth_analyzer` establishes the crate as part of
//! this pack's idiom for tabular transaction data, via its writer side).
//! The detection core never depends on this module — `analyze` takes
//! `Vec<RawRecord>` directly, so a caller wiring up its own byte-stream
//! adapter (e.g. an HTTP upload handler) can skip this entirely.

use crate::error::AnalyzerError;
use crate::record::{normalize, RawRecord, RawRecordRow};
use std::io::Read;
use std::path::Path;

const REQUIRED_COLUMNS: [&str; 5] = [
    "transaction_id",
    "sender_id",
    "receiver_id",
    "amount",
    "timestamp",
];

/// Load and normalize records from a CSV file on disk.
pub fn load_records(path: &Path) -> Result<Vec<RawRecord>, AnalyzerError> {
    let file = std::fs::File::open(path)
        .map_err(|e| AnalyzerError::InputShape(format!("cannot open {}: {e}", path.display())))?;
    parse_records(file)
}

/// Parse and normalize records from any byte stream in CSV form.
pub fn parse_records(reader: impl Read) -> Result<Vec<RawRecord>, AnalyzerError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    {
        let headers = rdr
            .headers()
            .map_err(|e| AnalyzerError::InputShape(format!("could not read header row: {e}")))?;
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(AnalyzerError::MissingColumn(column.to_string()));
            }
        }
    }

    let mut rows = Vec::new();
    for (idx, result) in rdr.deserialize::<RawRecordRow>().enumerate() {
        let row = result.map_err(|e| AnalyzerError::InputValue {
            row: idx,
            message: e.to_string(),
        })?;
        rows.push(row);
    }

    normalize(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_csv() {
        let csv = "transaction_id,sender_id,receiver_id,amount,timestamp\n\
                   T1,A,B,100.0,2024-01-01T00:00:00Z\n\
                   T2,B,C,200.0,2024-01-01T01:00:00Z\n";
        let records = parse_records(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].transaction_id, "T1");
    }

    #[test]
    fn rejects_missing_column() {
        let csv = "transaction_id,sender_id,amount,timestamp\n\
                   T1,A,100.0,2024-01-01T00:00:00Z\n";
        let err = parse_records(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, AnalyzerError::MissingColumn(ref c) if c == "receiver_id"));
    }

    #[test]
    fn names_offending_row_on_bad_cell() {
        let csv = "transaction_id,sender_id,receiver_id,amount,timestamp\n\
                   T1,A,B,not-a-number,2024-01-01T00:00:00Z\n";
        let err = parse_records(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, AnalyzerError::InputValue { row: 0, .. }));
    }

    #[test]
    fn loads_records_from_a_real_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "transaction_id,sender_id,receiver_id,amount,timestamp").unwrap();
        writeln!(file, "T1,A,B,100.0,2024-01-01T00:00:00Z").unwrap();
        file.flush().unwrap();

        let records = load_records(file.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].sender_id, "A");
    }

    #[test]
    fn reports_missing_file() {
        let err = load_records(Path::new("/no/such/file.csv")).unwrap_err();
        assert!(matches!(err, AnalyzerError::InputShape(_)));
    }
}
