pub mod daily_nav_service;
pub mod intraday_nav_service;
