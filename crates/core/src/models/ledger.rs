use chrono::{NaiveDate, NaiveDateTime};
use std::sync::OnceLock;

use crate::calendar::traits::TradingCalendar;
use crate::errors::CoreError;

use super::tick::Tick;

/// The raw account history of one futures account, sorted by time.
///
/// Ticks are immutable once the ledger is built. The trading-day column is
/// derived from the calendar on first use and cached for the ledger's
/// lifetime; recomputing it would give the same answer, so concurrent first
/// access just lets one writer win.
#[derive(Debug, Default)]
pub struct Ledger {
    ticks: Vec<Tick>,
    trade_days: OnceLock<Vec<NaiveDate>>,
}

impl Clone for Ledger {
    fn clone(&self) -> Self {
        let trade_days = OnceLock::new();
        if let Some(days) = self.trade_days.get() {
            let _ = trade_days.set(days.clone());
        }
        Self {
            ticks: self.ticks.clone(),
            trade_days,
        }
    }
}

impl Ledger {
    /// Build a ledger, sorting ticks by timestamp.
    /// The sort is stable: ticks sharing a timestamp keep their input order.
    pub fn new(mut ticks: Vec<Tick>) -> Self {
        ticks.sort_by_key(|t| t.datetime);
        Self {
            ticks,
            trade_days: OnceLock::new(),
        }
    }

    /// Parse a JSON array of tick records.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let ticks: Vec<Tick> = serde_json::from_str(json)?;
        Ok(Self::new(ticks))
    }

    /// Load a JSON ledger from disk (native only, not WASM).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(path: &str) -> Result<Self, CoreError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn ticks(&self) -> &[Tick] {
        &self.ticks
    }

    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    /// Timestamp of the first tick, if any.
    pub fn earliest(&self) -> Option<NaiveDateTime> {
        self.ticks.first().map(|t| t.datetime)
    }

    /// Timestamp of the last tick, if any.
    pub fn latest(&self) -> Option<NaiveDateTime> {
        self.ticks.last().map(|t| t.datetime)
    }

    /// Index of the first tick at or after `ts` (binary search, O(log n)).
    pub fn position_at_or_after(&self, ts: NaiveDateTime) -> usize {
        self.ticks.partition_point(|t| t.datetime < ts)
    }

    /// Trading day of every tick, parallel to `ticks()`.
    ///
    /// A tick's own `trade_day` is used when present; only ticks without
    /// one are resolved through `calendar`.
    /// The result is cached after the first successful call.
    pub fn trade_days(&self, calendar: &dyn TradingCalendar) -> Result<&[NaiveDate], CoreError> {
        if let Some(days) = self.trade_days.get() {
            return Ok(days.as_slice());
        }

        let missing = self.ticks.iter().filter(|t| t.trade_day.is_none()).count();
        if missing > 0 {
            log::debug!(
                "Resolving trading days for {} of {} ticks via {}",
                missing,
                self.ticks.len(),
                calendar.name()
            );
        }

        let days = self
            .ticks
            .iter()
            .map(|t| match t.trade_day {
                Some(day) => Ok(day),
                None => calendar.trade_day_of(t.datetime),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(self.trade_days.get_or_init(|| days).as_slice())
    }

    /// Trading day of `ts`, taken from the ledger when a tick sits exactly
    /// at `ts` and from `calendar` otherwise.
    pub fn trade_day_at(
        &self,
        ts: NaiveDateTime,
        calendar: &dyn TradingCalendar,
    ) -> Result<NaiveDate, CoreError> {
        let idx = self.position_at_or_after(ts);
        match self.ticks.get(idx) {
            Some(tick) if tick.datetime == ts => Ok(self.trade_days(calendar)?[idx]),
            _ => calendar.trade_day_of(ts),
        }
    }

    /// Latest trading day present in the ledger.
    pub fn latest_trade_day(
        &self,
        calendar: &dyn TradingCalendar,
    ) -> Result<Option<NaiveDate>, CoreError> {
        Ok(self.trade_days(calendar)?.iter().max().copied())
    }
}
