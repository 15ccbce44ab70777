//! Diary Tools - 個人用日記ロガーとClockifyタイムトラッカー

pub mod cli;
pub mod clockify;
pub mod config;
pub mod database;
pub mod error;
pub mod formatter;
pub mod log_cache;
pub mod logging;
pub mod time_report;
pub mod tracker_cli;
