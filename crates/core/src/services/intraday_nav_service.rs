use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use std::collections::BTreeMap;

use crate::calendar::traits::TradingCalendar;
use crate::errors::CoreError;
use crate::models::ledger::Ledger;
use crate::models::nav::{round_dp, IntradayNavPoint, IntradayNavSeries, Session};
use crate::models::settings::validate_bucket_minutes;

/// Day-session ticks are kept from this clock time onwards.
const DAY_SESSION_OPEN: (u32, u32, u32) = (8, 59, 30);

/// Parameters of a single intraday NAV request.
#[derive(Debug, Clone, PartialEq)]
pub struct IntradayRequest<'a> {
    pub field: &'a str,
    pub start: Option<NaiveDateTime>,
    pub trade_day: Option<NaiveDate>,
    pub origin: f64,
    pub bucket_minutes: u32,
    pub session: Session,
}

/// Resamples one trading day of ticks into fixed-width NAV buckets.
///
/// Unlike the daily curve, buckets are normalized by the first bucket,
/// not by `origin`: the curve always opens at exactly 1.0.
pub struct IntradayNavService;

impl IntradayNavService {
    pub fn new() -> Self {
        Self
    }

    /// Intraday NAV curve for one trading day.
    ///
    /// 1. Reject bucket widths that do not tile a day (before reading data)
    /// 2. Start value = first tick at/after `start`, giving the rebase offset
    /// 3. Keep ticks of the target day (default: latest in the ledger)
    /// 4. Drop ticks before the session opens
    /// 5. Last value per right-closed, right-labelled bucket; empty buckets dropped
    /// 6. Divide by the first bucket
    pub fn compute(
        &self,
        ledger: &Ledger,
        calendar: &dyn TradingCalendar,
        request: &IntradayRequest<'_>,
    ) -> Result<IntradayNavSeries, CoreError> {
        validate_bucket_minutes(request.bucket_minutes)?;
        if !request.origin.is_finite() {
            return Err(CoreError::InvalidArgument(format!(
                "origin must be finite, got {}",
                request.origin
            )));
        }

        let start = match request.start.or_else(|| ledger.earliest()) {
            Some(ts) => ts,
            None => return Err(CoreError::EmptySelection("ledger has no ticks".into())),
        };
        let from_idx = ledger.position_at_or_after(start);
        let ticks = &ledger.ticks()[from_idx..];
        let first = match ticks.first() {
            Some(tick) => tick.value(request.field)?,
            None => {
                return Err(CoreError::EmptySelection(format!(
                    "no ticks at or after {start}"
                )))
            }
        };
        let delta = first - request.origin;

        let trade_days = &ledger.trade_days(calendar)?[from_idx..];
        let target_day = match request.trade_day {
            Some(day) => day,
            None => ledger
                .latest_trade_day(calendar)?
                .ok_or_else(|| CoreError::EmptySelection("ledger has no trading days".into()))?,
        };

        let session_start = self.session_start(calendar, target_day, request.session)?;

        let mut buckets: BTreeMap<NaiveDateTime, f64> = BTreeMap::new();
        let mut in_day = 0usize;
        for (tick, day) in ticks.iter().zip(trade_days.iter()) {
            if *day != target_day {
                continue;
            }
            in_day += 1;
            if tick.datetime < session_start {
                continue;
            }
            let label = bucket_label(tick.datetime, request.bucket_minutes)?;
            buckets.insert(label, tick.value(request.field)? - delta);
        }

        log::debug!(
            "Intraday NAV for '{}' on {}: {} ticks, {} buckets of {}m from {}",
            request.field,
            target_day,
            in_day,
            buckets.len(),
            request.bucket_minutes,
            session_start
        );

        let base = match buckets.values().next() {
            Some(v) => *v,
            None => {
                if in_day > 0 {
                    log::warn!(
                        "All {} ticks of {} precede the session open at {}",
                        in_day,
                        target_day,
                        session_start
                    );
                }
                return Err(CoreError::EmptySelection(format!(
                    "no ticks for trading day {target_day} after {session_start}"
                )));
            }
        };
        if base == 0.0 {
            return Err(CoreError::DivisionByZero(format!(
                "first bucket of {target_day} has a rebased value of 0"
            )));
        }

        let points = buckets
            .into_iter()
            .map(|(timestamp, value)| IntradayNavPoint {
                timestamp,
                nav: round_dp(value / base, 3),
            })
            .collect();

        Ok(IntradayNavSeries {
            field: request.field.to_string(),
            trade_day: target_day,
            bucket_minutes: request.bucket_minutes,
            session: request.session,
            points,
        })
    }

    /// Earliest timestamp kept for `trade_day` under `session`.
    pub fn session_start(
        &self,
        calendar: &dyn TradingCalendar,
        trade_day: NaiveDate,
        session: Session,
    ) -> Result<NaiveDateTime, CoreError> {
        match session {
            Session::Day => {
                let (h, m, s) = DAY_SESSION_OPEN;
                let open = NaiveTime::from_hms_opt(h, m, s)
                    .ok_or_else(|| CoreError::Calendar("invalid day session open".into()))?;
                Ok(trade_day.and_time(open))
            }
            Session::AllDay => calendar.session_open_of(trade_day),
        }
    }
}

impl Default for IntradayNavService {
    fn default() -> Self {
        Self::new()
    }
}

/// Right edge of the `(k*T, (k+1)*T]` bucket containing `ts`, with buckets
/// anchored at midnight. A tick exactly on an edge labels its own bucket.
pub fn bucket_label(ts: NaiveDateTime, bucket_minutes: u32) -> Result<NaiveDateTime, CoreError> {
    validate_bucket_minutes(bucket_minutes)?;
    let midnight = ts.date().and_time(NaiveTime::MIN);
    let offset = ts
        .signed_duration_since(midnight)
        .num_nanoseconds()
        .ok_or_else(|| CoreError::InvalidArgument(format!("timestamp {ts} out of range")))?;
    let width = i64::from(bucket_minutes) * 60 * 1_000_000_000;
    let label = (offset + width - 1) / width * width;
    Ok(midnight + Duration::nanoseconds(label))
}
