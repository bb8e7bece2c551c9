//! Recent conversions log

use super::convert::convert;
use super::error::{FxError, Result};
use crate::store::KeyValueStorage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;
use tracing::{debug, error, warn};

pub const HISTORY_KEY: &str = "recent-conversions";
pub const HISTORY_LIMIT: usize = 10;

/// One completed conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionRecord {
    amount: f64,
    from_currency: String,
    to_currency: String,
    #[serde(deserialize_with = "number_or_string")]
    result: f64,
    rate: f64,
    timestamp: DateTime<Utc>,
}

impl ConversionRecord {
    pub fn new(amount: f64, from: &str, to: &str, rate: f64) -> Result<Self> {
        Self::at(amount, from, to, rate, Utc::now())
    }

    pub fn at(
        amount: f64,
        from: &str,
        to: &str,
        rate: f64,
        timestamp: DateTime<Utc>,
    ) -> Result<Self> {
        Ok(Self {
            amount,
            from_currency: from.to_string(),
            to_currency: to.to_string(),
            result: convert(amount, rate)?,
            rate,
            timestamp,
        })
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn from_currency(&self) -> &str {
        &self.from_currency
    }

    pub fn to_currency(&self) -> &str {
        &self.to_currency
    }

    pub fn result(&self) -> f64 {
        self.result
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

// Older entries stored the result as a fixed-point string
fn number_or_string<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        Text(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// Most-recent-first log of conversions, capped at [`HISTORY_LIMIT`].
pub struct HistoryLog {
    storage: Arc<dyn KeyValueStorage>,
    records: Vec<ConversionRecord>,
}

impl HistoryLog {
    /// Reads the persisted log; missing or unparseable data yields an empty log.
    pub fn load(storage: Arc<dyn KeyValueStorage>) -> Self {
        let mut records = match read_records(storage.as_ref()) {
            Ok(Some(records)) => records,
            Ok(None) => {
                debug!("No stored conversions");
                Vec::new()
            }
            Err(e) => {
                warn!(error = %e, "Discarding stored conversions");
                Vec::new()
            }
        };
        records.truncate(HISTORY_LIMIT);
        Self { storage, records }
    }

    /// Prepends `record` and drops anything beyond the limit.
    pub fn append(&mut self, record: ConversionRecord) -> &[ConversionRecord] {
        self.records.insert(0, record);
        self.records.truncate(HISTORY_LIMIT);
        self.persist();
        &self.records
    }

    pub fn records(&self) -> &[ConversionRecord] {
        &self.records
    }

    pub fn recent(&self, n: usize) -> &[ConversionRecord] {
        &self.records[..n.min(self.records.len())]
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn persist(&self) {
        let res = serde_json::to_string(&self.records)
            .map_err(anyhow::Error::from)
            .and_then(|json| self.storage.set(HISTORY_KEY, &json));
        if let Err(e) = res {
            error!(error = %e, "Failed to persist recent conversions");
        }
    }
}

fn read_records(storage: &dyn KeyValueStorage) -> Result<Option<Vec<ConversionRecord>>> {
    let parse_error = |message: String| FxError::Parse {
        key: HISTORY_KEY.to_string(),
        message,
    };

    let Some(json) = storage
        .get(HISTORY_KEY)
        .map_err(|e| parse_error(e.to_string()))?
    else {
        return Ok(None);
    };
    let entries: Vec<serde_json::Value> =
        serde_json::from_str(&json).map_err(|e| parse_error(e.to_string()))?;

    // A single bad entry only costs that entry
    let records: Vec<ConversionRecord> = entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value(entry) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(error = %e, "Skipping malformed stored conversion");
                None
            }
        })
        .collect();
    Ok(Some(records))
}
