use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::CoreError;

use super::table::{format_date, format_number, format_timestamp, Table};

/// Round half away from zero to `places` decimals.
pub(crate) fn round_dp(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Which part of the trading day an intraday curve covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Session {
    /// Day session only, from 08:59:30 on the trading day (`'d'`)
    #[serde(rename = "d")]
    Day,
    /// Full session, from the previous evening's 21:00 open (`'a'`)
    #[default]
    #[serde(rename = "a")]
    AllDay,
}

impl FromStr for Session {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "d" => Ok(Session::Day),
            "a" => Ok(Session::AllDay),
            other => Err(CoreError::InvalidArgument(format!(
                "Unknown session selector '{other}', expected 'd' or 'a'"
            ))),
        }
    }
}

impl std::fmt::Display for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Session::Day => write!(f, "d"),
            Session::AllDay => write!(f, "a"),
        }
    }
}

/// One row of a daily NAV curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyNavPoint {
    /// Trading day this row represents
    pub trade_day: NaiveDate,

    /// Rebased absolute value of the tracked field, 2 decimals
    pub value: f64,

    /// value / origin, 3 decimals
    pub nav: f64,
}

/// Daily NAV curve, ascending by trading day.
///
/// The first row is always the synthetic baseline one calendar day before
/// the first real trading day, holding `origin` and a NAV of exactly 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyNavSeries {
    /// Name of the tracked ledger field (e.g. "balance")
    pub field: String,

    /// Capital the curve is normalized against
    pub origin: f64,

    pub points: Vec<DailyNavPoint>,
}

impl DailyNavSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The synthetic day-zero row.
    pub fn baseline(&self) -> Option<&DailyNavPoint> {
        self.points.first()
    }

    pub fn get(&self, trade_day: NaiveDate) -> Option<&DailyNavPoint> {
        self.points
            .binary_search_by_key(&trade_day, |p| p.trade_day)
            .ok()
            .map(|idx| &self.points[idx])
    }

    /// Four-column report table: trading day, value, NAV, percent change
    /// of NAV against the previous row (0 on the baseline).
    pub fn to_table(&self) -> Table {
        let mut table = Table::new(vec![
            "tradeDay".to_string(),
            self.field.clone(),
            "nav".to_string(),
            "change".to_string(),
        ]);

        let mut prev_nav: Option<f64> = None;
        for point in &self.points {
            let change = match prev_nav {
                Some(prev) if prev != 0.0 => round_dp((point.nav / prev - 1.0) * 100.0, 2),
                _ => 0.0,
            };
            prev_nav = Some(point.nav);

            table.push_row(vec![
                format_date(point.trade_day),
                format_number(point.value),
                format_number(point.nav),
                format_number(change),
            ]);
        }

        table
    }
}

/// One bucket of an intraday NAV curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntradayNavPoint {
    /// Right edge (and label) of the bucket
    pub timestamp: NaiveDateTime,

    /// Bucket value divided by the first bucket's value, 3 decimals
    pub nav: f64,
}

/// Intraday NAV curve for exactly one trading day, ascending by timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntradayNavSeries {
    pub field: String,
    pub trade_day: NaiveDate,
    pub bucket_minutes: u32,
    pub session: Session,
    pub points: Vec<IntradayNavPoint>,
}

impl IntradayNavSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn to_table(&self) -> Table {
        let mut table = Table::new(vec!["datetime".to_string(), "nav".to_string()]);
        for point in &self.points {
            table.push_row(vec![format_timestamp(point.timestamp), format_number(point.nav)]);
        }
        table
    }
}
