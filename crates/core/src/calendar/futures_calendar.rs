use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use std::collections::BTreeSet;

use crate::errors::CoreError;

use super::traits::TradingCalendar;

/// Upper bound on how far we walk looking for the next/previous trading day.
const MAX_SEARCH_DAYS: u32 = 366;

/// Default clock time after which ticks belong to the next trading day.
const DEFAULT_NIGHT_CUTOFF_HOUR: i64 = 18;

/// Commodity-futures calendar with a night session.
///
/// Trading days are weekdays outside the holiday set. A tick at or after
/// the night cutoff belongs to the next trading day, and so does a tick
/// falling on a non-trading day (Saturday 01:00 from Friday's night
/// session counts toward Monday).
#[derive(Debug, Clone)]
pub struct FuturesTradeCalendar {
    holidays: BTreeSet<NaiveDate>,
    night_cutoff: NaiveTime,
}

impl FuturesTradeCalendar {
    /// Calendar with weekends closed and no extra holidays.
    pub fn new() -> Self {
        Self {
            holidays: BTreeSet::new(),
            night_cutoff: NaiveTime::MIN + Duration::hours(DEFAULT_NIGHT_CUTOFF_HOUR),
        }
    }

    /// Calendar with the given exchange holidays.
    pub fn with_holidays(holidays: impl IntoIterator<Item = NaiveDate>) -> Self {
        let mut calendar = Self::new();
        calendar.holidays.extend(holidays);
        calendar
    }

    /// Override the clock time at which the night session rolls over.
    pub fn with_night_cutoff(mut self, cutoff: NaiveTime) -> Self {
        self.night_cutoff = cutoff;
        self
    }

    /// Clock time at which ticks start counting toward the next trading day.
    pub fn night_cutoff(&self) -> NaiveTime {
        self.night_cutoff
    }

    pub fn add_holiday(&mut self, date: NaiveDate) {
        self.holidays.insert(date);
    }

    pub fn is_trading_day(&self, date: NaiveDate) -> bool {
        !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) && !self.holidays.contains(&date)
    }

    /// First trading day strictly after `date`.
    pub fn next_trading_day(&self, date: NaiveDate) -> Result<NaiveDate, CoreError> {
        self.walk(date, |d| d.succ_opt())
    }

    /// Last trading day strictly before `date`.
    pub fn previous_trading_day(&self, date: NaiveDate) -> Result<NaiveDate, CoreError> {
        self.walk(date, |d| d.pred_opt())
    }

    fn walk(
        &self,
        from: NaiveDate,
        step: impl Fn(NaiveDate) -> Option<NaiveDate>,
    ) -> Result<NaiveDate, CoreError> {
        let mut current = from;
        for _ in 0..MAX_SEARCH_DAYS {
            current = step(current)
                .ok_or_else(|| CoreError::Calendar(format!("date out of range near {from}")))?;
            if self.is_trading_day(current) {
                return Ok(current);
            }
        }
        Err(CoreError::Calendar(format!(
            "no trading day within {MAX_SEARCH_DAYS} days of {from}"
        )))
    }
}

impl Default for FuturesTradeCalendar {
    fn default() -> Self {
        Self::new()
    }
}

impl TradingCalendar for FuturesTradeCalendar {
    fn name(&self) -> &str {
        "FuturesTradeCalendar"
    }

    fn trade_day_of(&self, ts: NaiveDateTime) -> Result<NaiveDate, CoreError> {
        let date = ts.date();
        if !self.is_trading_day(date) || ts.time() >= self.night_cutoff {
            return self.next_trading_day(date);
        }
        Ok(date)
    }

    fn session_open_date(&self, trade_day: NaiveDate) -> Result<NaiveDate, CoreError> {
        self.previous_trading_day(trade_day)
    }
}
