//! SwingScan Screener — scan orchestration on top of `swingscan-core`.
//!
//! This crate provides:
//! - Serializable scan configuration with TOML loading
//! - The (timeframe, symbol) scan loop with soft-skip policy and pacing
//! - An optional parallel fetch mode over a bounded worker pool
//! - Grouped report rendering plus CSV/JSON export

pub mod config;
pub mod report;
pub mod screener;

pub use config::{ConfigError, ScanConfig};
pub use report::{export_csv, export_json, group_rows, render_report, CATEGORY_ORDER};
pub use screener::{
    run_scan, ScanError, ScanOutcome, ScanProgress, ScanRow, ScanSkip, SilentProgress,
    SkipReason, StdoutProgress,
};
