pub mod futures_calendar;
pub mod traits;
