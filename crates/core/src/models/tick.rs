use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::errors::CoreError;

/// Accepted layouts for timestamps coming from ledgers and callers.
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
];

/// Parse a timestamp in any of the supported layouts.
///
/// A bare date (`2024-01-02`) is read as midnight of that day.
pub fn parse_timestamp(input: &str) -> Result<NaiveDateTime, CoreError> {
    let trimmed = input.trim();
    for fmt in TIMESTAMP_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Ok(ts);
        }
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| CoreError::InvalidArgument(format!("Unrecognized timestamp '{input}'")))
}

/// A single account snapshot from the ledger.
///
/// Every field besides the timestamp is numeric (balance, margin,
/// available, ...). Which one gets tracked is chosen per NAV call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    /// Exchange-local time of the snapshot
    #[serde(with = "timestamp_serde")]
    pub datetime: NaiveDateTime,

    /// Trading day, when the data source already resolved it
    #[serde(rename = "tradeDay", default, skip_serializing_if = "Option::is_none")]
    pub trade_day: Option<NaiveDate>,

    /// Numeric account fields keyed by name
    #[serde(flatten)]
    pub fields: BTreeMap<String, f64>,
}

impl Tick {
    pub fn new(datetime: NaiveDateTime) -> Self {
        Self {
            datetime,
            trade_day: None,
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style field setter.
    pub fn with_field(mut self, name: impl Into<String>, value: f64) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    /// Attach a pre-resolved trading day.
    pub fn with_trade_day(mut self, trade_day: NaiveDate) -> Self {
        self.trade_day = Some(trade_day);
        self
    }

    /// Read a tracked field, failing if this tick does not carry it.
    pub fn value(&self, field: &str) -> Result<f64, CoreError> {
        self.fields
            .get(field)
            .copied()
            .ok_or_else(|| CoreError::MissingField {
                field: field.to_string(),
                timestamp: self.datetime.to_string(),
            })
    }
}

mod timestamp_serde {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const OUT_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

    pub fn serialize<S>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&ts.format(OUT_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_timestamp(&raw).map_err(serde::de::Error::custom)
    }
}
