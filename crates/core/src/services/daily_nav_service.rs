use chrono::{Days, NaiveDate, NaiveDateTime};
use std::collections::BTreeMap;

use crate::calendar::traits::TradingCalendar;
use crate::errors::CoreError;
use crate::models::ledger::Ledger;
use crate::models::nav::{round_dp, DailyNavPoint, DailyNavSeries};
use crate::models::tick::Tick;

/// Reduces a multi-tick ledger to one NAV row per trading day.
///
/// Pure business logic, no I/O. The only side effect is the ledger
/// caching its trading-day column on first use.
pub struct DailyNavService;

impl DailyNavService {
    pub fn new() -> Self {
        Self
    }

    /// Daily NAV curve of `field`, starting at the trading day of `start`.
    ///
    /// 1. Select every tick whose trading day is on/after `start`'s trading day
    /// 2. Take the first selected tick's value as the pre-rebase start value
    /// 3. Keep the last tick (max timestamp) of each trading day
    /// 4. Shift all values so the start value maps to `origin`
    /// 5. NAV = value / origin, plus a baseline row the day before
    ///
    /// `start` defaults to the ledger's earliest tick. When a tick sits
    /// exactly at `start`, its trading day is read from the ledger column.
    pub fn compute(
        &self,
        ledger: &Ledger,
        calendar: &dyn TradingCalendar,
        field: &str,
        start: Option<NaiveDateTime>,
        origin: f64,
    ) -> Result<DailyNavSeries, CoreError> {
        if !origin.is_finite() {
            return Err(CoreError::InvalidArgument(format!(
                "origin must be finite, got {origin}"
            )));
        }
        if origin == 0.0 {
            return Err(CoreError::DivisionByZero(
                "origin is 0, daily NAV cannot be normalized".into(),
            ));
        }

        let trade_days = ledger.trade_days(calendar)?;
        let start_day = match start {
            Some(ts) => ledger.trade_day_at(ts, calendar)?,
            None => match trade_days.first() {
                Some(day) => *day,
                None => return Err(CoreError::EmptySelection("ledger has no ticks".into())),
            },
        };

        let selected: Vec<(&Tick, NaiveDate)> = ledger
            .ticks()
            .iter()
            .zip(trade_days.iter().copied())
            .filter(|(_, day)| *day >= start_day)
            .collect();

        let first = match selected.first() {
            Some((tick, _)) => tick.value(field)?,
            None => {
                return Err(CoreError::EmptySelection(format!(
                    "no ticks on or after trading day {start_day}"
                )))
            }
        };

        // Last observation per trading day; on equal timestamps the later row wins
        let mut last_of_day: BTreeMap<NaiveDate, &Tick> = BTreeMap::new();
        for &(tick, day) in &selected {
            let keep = last_of_day
                .get(&day)
                .map_or(true, |current| tick.datetime >= current.datetime);
            if keep {
                last_of_day.insert(day, tick);
            }
        }

        log::debug!(
            "Daily NAV for '{}': {} ticks over {} trading days from {}",
            field,
            selected.len(),
            last_of_day.len(),
            start_day
        );

        let delta = first - origin;
        let mut points = Vec::with_capacity(last_of_day.len() + 1);

        // last_of_day is non-empty whenever selected is
        if let Some(first_day) = last_of_day.keys().next() {
            let baseline_day = first_day
                .checked_sub_days(Days::new(1))
                .ok_or_else(|| CoreError::Calendar(format!("no day before {first_day}")))?;
            points.push(DailyNavPoint {
                trade_day: baseline_day,
                value: origin,
                nav: 1.0,
            });
        }

        for (day, tick) in last_of_day {
            let rebased = tick.value(field)? - delta;
            points.push(DailyNavPoint {
                trade_day: day,
                value: round_dp(rebased, 2),
                nav: round_dp(rebased / origin, 3),
            });
        }

        Ok(DailyNavSeries {
            field: field.to_string(),
            origin,
            points,
        })
    }
}

impl Default for DailyNavService {
    fn default() -> Self {
        Self::new()
    }
}
