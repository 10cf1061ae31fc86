//! Record normalization: schema validation, timestamp coercion, stable sort.

use crate::error::AnalyzerError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An immutable, validated transaction record.
///
/// `sender_id == receiver_id` is not rejected here — self-loops are retained
/// (they simply cannot participate in cycles of length >= 3 and are ignored
/// by the smurfing detector).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub transaction_id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub amount: f64,
    pub timestamp: DateTime<Utc>,
}

/// Row shape as read off a CSV/column source, before coercion.
///
/// All fields arrive as strings; `normalize` is responsible for parsing
/// `amount` and `timestamp` and naming the offending row on failure.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecordRow {
    pub transaction_id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub amount: String,
    pub timestamp: String,
}

/// Validate, coerce, and time-sort a batch of raw rows.
///
/// Sorting is stable: records sharing a timestamp keep their input relative
/// order, so callers that only reorder same-timestamp records see identical
/// (as multisets) detector output, per the row-order invariance law.
pub fn normalize(rows: Vec<RawRecordRow>) -> Result<Vec<RawRecord>, AnalyzerError> {
    let mut records = Vec::with_capacity(rows.len());

    for (idx, row) in rows.into_iter().enumerate() {
        let amount: f64 = row.amount.trim().parse().map_err(|_| AnalyzerError::InputValue {
            row: idx,
            message: format!("unparsable amount: {:?}", row.amount),
        })?;
        if amount < 0.0 {
            return Err(AnalyzerError::InputValue {
                row: idx,
                message: format!("negative amount: {}", amount),
            });
        }

        let timestamp = parse_timestamp(&row.timestamp).map_err(|_| AnalyzerError::InputValue {
            row: idx,
            message: format!("unparsable timestamp: {:?}", row.timestamp),
        })?;

        if row.transaction_id.trim().is_empty() {
            return Err(AnalyzerError::InputValue {
                row: idx,
                message: "empty transaction_id".to_string(),
            });
        }
        if row.sender_id.trim().is_empty() || row.receiver_id.trim().is_empty() {
            return Err(AnalyzerError::InputValue {
                row: idx,
                message: "empty sender_id or receiver_id".to_string(),
            });
        }

        records.push(RawRecord {
            transaction_id: row.transaction_id,
            sender_id: row.sender_id,
            receiver_id: row.receiver_id,
            amount,
            timestamp,
        });
    }

    records.sort_by_key(|r| r.timestamp);
    Ok(records)
}

/// Parse an ISO-8601 timestamp, accepting both an explicit offset and a
/// bare `YYYY-MM-DDTHH:MM:SS` naive form (assumed UTC).
fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    raw.parse::<DateTime<Utc>>()
}
