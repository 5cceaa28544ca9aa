pub mod calendar;
pub mod errors;
pub mod models;
pub mod render;
pub mod services;

use chrono::{NaiveDate, NaiveDateTime};
use calendar::traits::TradingCalendar;
use models::{
    ledger::Ledger,
    nav::{DailyNavSeries, IntradayNavSeries, Session},
    settings::NavSettings,
    tick::Tick,
};
use services::{
    daily_nav_service::DailyNavService,
    intraday_nav_service::{IntradayNavService, IntradayRequest},
};

use errors::CoreError;

pub use models::tick::parse_timestamp;
pub use render::{render_table, TableFormat};

/// Main entry point for the futures-nav-core library.
/// Holds one sorted account ledger, the exchange calendar, and the NAV services.
#[must_use]
pub struct FuturesNav<C: TradingCalendar> {
    ledger: Ledger,
    calendar: C,
    daily_service: DailyNavService,
    intraday_service: IntradayNavService,
}

impl<C: TradingCalendar> std::fmt::Debug for FuturesNav<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FuturesNav")
            .field("ticks", &self.ledger.len())
            .field("calendar", &self.calendar.name())
            .field("earliest", &self.ledger.earliest())
            .field("latest", &self.ledger.latest())
            .finish()
    }
}

impl<C: TradingCalendar> FuturesNav<C> {
    /// Wrap an already-built ledger.
    pub fn new(ledger: Ledger, calendar: C) -> Self {
        Self {
            ledger,
            calendar,
            daily_service: DailyNavService::new(),
            intraday_service: IntradayNavService::new(),
        }
    }

    /// Build from raw ticks in any order; they are sorted by timestamp.
    pub fn from_ticks(ticks: Vec<Tick>, calendar: C) -> Self {
        Self::new(Ledger::new(ticks), calendar)
    }

    /// Build from a JSON array of tick records.
    pub fn from_json(json: &str, calendar: C) -> Result<Self, CoreError> {
        Ok(Self::new(Ledger::from_json(json)?, calendar))
    }

    // ── NAV ─────────────────────────────────────────────────────────

    /// Daily NAV curve of `field`, rebased so the start value equals `origin`.
    ///
    /// One row per trading day (the day's last tick) plus a baseline row
    /// the calendar day before the first trading day with NAV 1.0.
    pub fn compute_daily(
        &self,
        field: &str,
        start: Option<NaiveDateTime>,
        origin: f64,
    ) -> Result<DailyNavSeries, CoreError> {
        self.daily_service
            .compute(&self.ledger, &self.calendar, field, start, origin)
    }

    /// Intraday NAV curve of one trading day in `bucket_minutes`-wide buckets.
    ///
    /// `trade_day` defaults to the latest trading day in the ledger.
    /// The curve is normalized by its first bucket, not by `origin`.
    pub fn compute_intraday(
        &self,
        field: &str,
        start: Option<NaiveDateTime>,
        trade_day: Option<NaiveDate>,
        origin: f64,
        bucket_minutes: u32,
        session: Session,
    ) -> Result<IntradayNavSeries, CoreError> {
        let request = IntradayRequest {
            field,
            start,
            trade_day,
            origin,
            bucket_minutes,
            session,
        };
        self.intraday_service
            .compute(&self.ledger, &self.calendar, &request)
    }

    // ── Reports ─────────────────────────────────────────────────────

    /// Daily NAV rendered as a table in the configured format.
    pub fn daily_report(
        &self,
        settings: &NavSettings,
        start: Option<NaiveDateTime>,
    ) -> Result<String, CoreError> {
        settings.validate()?;
        let series = self.compute_daily(&settings.field, start, settings.origin)?;
        render_table(&series.to_table(), &settings.table_format)
    }

    /// Intraday NAV of `trade_day` rendered as a markdown table.
    ///
    /// Intraday tables have two columns, so only the generic format applies.
    /// A zero `origin` is accepted: the curve is normalized by its first bucket.
    pub fn intraday_report(
        &self,
        settings: &NavSettings,
        start: Option<NaiveDateTime>,
        trade_day: Option<NaiveDate>,
    ) -> Result<String, CoreError> {
        settings.validate_for_intraday()?;
        let series = self.compute_intraday(
            &settings.field,
            start,
            trade_day,
            settings.origin,
            settings.bucket_minutes,
            settings.session,
        )?;
        TableFormat::Markdown.renderer().render(&series.to_table())
    }

    // ── Ledger Inspection ───────────────────────────────────────────

    #[must_use]
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    #[must_use]
    pub fn calendar(&self) -> &C {
        &self.calendar
    }

    #[must_use]
    pub fn tick_count(&self) -> usize {
        self.ledger.len()
    }

    #[must_use]
    pub fn earliest_timestamp(&self) -> Option<NaiveDateTime> {
        self.ledger.earliest()
    }

    /// Trading day of every tick, resolved once and cached.
    pub fn trade_days(&self) -> Result<&[NaiveDate], CoreError> {
        self.ledger.trade_days(&self.calendar)
    }

    pub fn latest_trade_day(&self) -> Result<Option<NaiveDate>, CoreError> {
        self.ledger.latest_trade_day(&self.calendar)
    }
}
