use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::errors::CoreError;

/// Hour at which the night session opens on the open date.
pub const NIGHT_SESSION_OPEN_HOUR: u32 = 21;

/// Exchange trading calendar used to bucket ledger ticks.
///
/// The NAV services only depend on this trait, so any exchange calendar
/// (or a fixed table in tests) can be plugged in.
pub trait TradingCalendar: Send + Sync {
    /// Human-readable name of this calendar (for logs/errors).
    fn name(&self) -> &str;

    /// Trading day a timestamp belongs to. Night-session ticks map to the
    /// next trading day.
    fn trade_day_of(&self, ts: NaiveDateTime) -> Result<NaiveDate, CoreError>;

    /// Calendar date on which `trade_day`'s session opens (the previous
    /// trading day's evening for exchanges with a night session).
    fn session_open_date(&self, trade_day: NaiveDate) -> Result<NaiveDate, CoreError>;

    /// Timestamp at which `trade_day`'s full session opens.
    fn session_open_of(&self, trade_day: NaiveDate) -> Result<NaiveDateTime, CoreError> {
        let open = NaiveTime::from_hms_opt(NIGHT_SESSION_OPEN_HOUR, 0, 0)
            .ok_or_else(|| CoreError::Calendar("invalid night session open hour".into()))?;
        Ok(self.session_open_date(trade_day)?.and_time(open))
    }
}
