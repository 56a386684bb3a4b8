use std::path::Path;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TallyError};
use crate::models::Transaction;

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

/// On-disk transaction record, camelCase to match the upstream feed.
/// `userId` arrives as a string or a bare number depending on the
/// exporter; both normalize to a string key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecord {
    #[serde(deserialize_with = "de_user_id")]
    pub user_id: String,
    pub name: String,
    pub amount: f64,
    pub date: String,
}

fn de_user_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
    }
    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
    })
}

// ---------------------------------------------------------------------------
// File formats, enum dispatch
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FileFormat {
    Json,
    Csv,
}

impl FileFormat {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }

    pub fn from_key(key: &str) -> Result<Self> {
        match key {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(TallyError::UnknownFormat(other.to_string())),
        }
    }

    /// Pick a format from the file extension.
    pub fn detect(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        Self::from_key(&ext).map_err(|_| {
            TallyError::UnknownFormat(format!(
                "{} (use --format json|csv)",
                path.display()
            ))
        })
    }

    fn read(&self, path: &Path) -> Result<Vec<RawRecord>> {
        match self {
            Self::Json => {
                let content = std::fs::read_to_string(path)?;
                Ok(serde_json::from_str(&content)?)
            }
            Self::Csv => {
                let mut reader = csv::Reader::from_path(path)?;
                let mut records = Vec::new();
                for row in reader.deserialize() {
                    records.push(row?);
                }
                Ok(records)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Loading & validation
// ---------------------------------------------------------------------------

/// Accepts plain dates (2025-01-15) and full RFC 3339 timestamps.
fn parse_txn_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive())
}

/// Load and validate a transaction file. One bad record rejects the
/// whole batch; nothing is skipped or coerced.
pub fn load(path: &Path, format: Option<&str>) -> Result<Vec<Transaction>> {
    let format = match format {
        Some(key) => FileFormat::from_key(key)?,
        None => FileFormat::detect(path)?,
    };
    let raw = format.read(path)?;

    let mut transactions = Vec::with_capacity(raw.len());
    for (i, record) in raw.into_iter().enumerate() {
        let record_no = i + 1;
        let date = parse_txn_date(&record.date).ok_or_else(|| TallyError::InvalidDate {
            record: record_no,
            value: record.date.clone(),
        })?;
        if record.amount < 0.0 {
            return Err(TallyError::NegativeAmount {
                record: record_no,
                value: record.amount,
            });
        }
        transactions.push(Transaction {
            user_id: record.user_id,
            name: record.name,
            amount: record.amount,
            date,
        });
    }
    Ok(transactions)
}

/// Write records as pretty-printed JSON, the same shape `load` reads.
pub fn save_json(path: &Path, records: &[RawRecord]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(records)?;
    std::fs::write(path, format!("{json}\n"))?;
    Ok(())
}
