//! Scan orchestration — iterate (timeframe, symbol) pairs and classify each.
//!
//! Pairs run timeframe-major, symbol-minor. Every per-pair problem is a
//! soft skip: provider errors and short history produce no row and never
//! abort the scan (the one exception is a tripped circuit breaker, which
//! writes off the remaining pairs instead of hammering a provider that has
//! already blocked us).

use crate::config::{ConfigError, ScanConfig};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use swingscan_core::data::{InstrumentCatalog, MarketDataError, MarketDataSource};
use swingscan_core::domain::{Timeframe, TrendVerdict};
use swingscan_core::structure::classify_bars;
use thiserror::Error;

/// One classified (symbol, timeframe) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanRow {
    pub symbol: String,
    pub timeframe: Timeframe,
    pub verdict: TrendVerdict,
}

/// Why a pair produced no row.
#[derive(Debug)]
pub enum SkipReason {
    /// The data source failed for this pair.
    Provider(MarketDataError),
    /// The pair returned fewer bars than the configured minimum.
    ShortHistory { got: usize, need: usize },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::Provider(e) => write!(f, "{e}"),
            SkipReason::ShortHistory { got, need } => {
                write!(f, "only {got} bars (minimum {need})")
            }
        }
    }
}

/// A skipped pair and the reason.
#[derive(Debug)]
pub struct ScanSkip {
    pub symbol: String,
    pub timeframe: Timeframe,
    pub reason: SkipReason,
}

/// Aggregate result of one scan run.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub rows: Vec<ScanRow>,
    pub skips: Vec<ScanSkip>,
    pub total_pairs: usize,
}

impl ScanOutcome {
    pub fn scanned(&self) -> usize {
        self.rows.len()
    }

    pub fn skipped(&self) -> usize {
        self.skips.len()
    }
}

/// Scan-level failures. Per-pair problems never surface here.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to list instruments: {0}")]
    Catalog(MarketDataError),
}

/// Progress callbacks for a scan run.
pub trait ScanProgress: Send + Sync {
    /// Called before fetching a pair.
    fn on_start(&self, symbol: &str, timeframe: Timeframe, index: usize, total: usize);

    /// Called when a pair classifies into a row.
    fn on_row(&self, row: &ScanRow);

    /// Called when a pair is skipped.
    fn on_skip(&self, skip: &ScanSkip);

    /// Called once the whole scan is done.
    fn on_complete(&self, outcome: &ScanOutcome);
}

/// Progress reporter that prints to stdout.
pub struct StdoutProgress;

impl ScanProgress for StdoutProgress {
    fn on_start(&self, symbol: &str, timeframe: Timeframe, index: usize, total: usize) {
        println!("[{}/{}] Scanning {symbol} on {timeframe}...", index + 1, total);
    }

    fn on_row(&self, row: &ScanRow) {
        println!("  {} {} -> {}", row.symbol, row.timeframe, row.verdict);
    }

    fn on_skip(&self, skip: &ScanSkip) {
        println!("  SKIP {} {}: {}", skip.symbol, skip.timeframe, skip.reason);
    }

    fn on_complete(&self, outcome: &ScanOutcome) {
        println!(
            "\nScan complete: {}/{} pairs classified, {} skipped",
            outcome.scanned(),
            outcome.total_pairs,
            outcome.skipped()
        );
    }
}

/// Progress sink that reports nothing.
pub struct SilentProgress;

impl ScanProgress for SilentProgress {
    fn on_start(&self, _: &str, _: Timeframe, _: usize, _: usize) {}
    fn on_row(&self, _: &ScanRow) {}
    fn on_skip(&self, _: &ScanSkip) {}
    fn on_complete(&self, _: &ScanOutcome) {}
}

/// Classify one pair: fetch, apply the skip policy, run the pipeline.
fn scan_pair(
    source: &dyn MarketDataSource,
    config: &ScanConfig,
    symbol: &str,
    timeframe: Timeframe,
) -> Result<ScanRow, ScanSkip> {
    let bars = match source.fetch_bars(symbol, timeframe, config.bar_limit) {
        Ok(bars) => bars,
        Err(e) => {
            return Err(ScanSkip {
                symbol: symbol.to_string(),
                timeframe,
                reason: SkipReason::Provider(e),
            })
        }
    };

    if bars.len() < config.min_bars {
        return Err(ScanSkip {
            symbol: symbol.to_string(),
            timeframe,
            reason: SkipReason::ShortHistory {
                got: bars.len(),
                need: config.min_bars,
            },
        });
    }

    Ok(ScanRow {
        symbol: symbol.to_string(),
        timeframe,
        verdict: classify_bars(&bars, config.swing, config.mode),
    })
}

/// Run a full scan over the configured universe.
///
/// Sequential by default, with a pacing delay between data-source calls.
/// With `config.parallel` the fetches fan out over the rayon pool instead —
/// the classification itself is pure either way, so each pair stays
/// single-threaded and side-effect-free.
pub fn run_scan(
    source: &dyn MarketDataSource,
    catalog: &dyn InstrumentCatalog,
    config: &ScanConfig,
    progress: &dyn ScanProgress,
) -> Result<ScanOutcome, ScanError> {
    config.validate()?;

    let symbols = match &config.symbols {
        Some(list) => list.clone(),
        None => catalog.list_symbols().map_err(ScanError::Catalog)?,
    };

    let pairs: Vec<(Timeframe, String)> = config
        .timeframes
        .iter()
        .flat_map(|&tf| symbols.iter().map(move |s| (tf, s.clone())))
        .collect();

    let outcome = if config.parallel {
        run_parallel(source, config, &pairs, progress)
    } else {
        run_sequential(source, config, &pairs, progress)
    };

    progress.on_complete(&outcome);
    Ok(outcome)
}

fn run_sequential(
    source: &dyn MarketDataSource,
    config: &ScanConfig,
    pairs: &[(Timeframe, String)],
    progress: &dyn ScanProgress,
) -> ScanOutcome {
    let total = pairs.len();
    let mut outcome = ScanOutcome {
        total_pairs: total,
        ..ScanOutcome::default()
    };

    for (i, (timeframe, symbol)) in pairs.iter().enumerate() {
        progress.on_start(symbol, *timeframe, i, total);

        match scan_pair(source, config, symbol, *timeframe) {
            Ok(row) => {
                progress.on_row(&row);
                outcome.rows.push(row);
            }
            Err(skip) => {
                progress.on_skip(&skip);
                outcome.skips.push(skip);
            }
        }

        // Write off the rest once the provider has blocked us
        if !source.is_available() {
            for (tf, sym) in &pairs[(i + 1)..] {
                outcome.skips.push(ScanSkip {
                    symbol: sym.clone(),
                    timeframe: *tf,
                    reason: SkipReason::Provider(MarketDataError::CircuitBreakerTripped),
                });
            }
            break;
        }

        if config.pace_ms > 0 && i + 1 < total {
            std::thread::sleep(std::time::Duration::from_millis(config.pace_ms));
        }
    }

    outcome
}

fn run_parallel(
    source: &dyn MarketDataSource,
    config: &ScanConfig,
    pairs: &[(Timeframe, String)],
    progress: &dyn ScanProgress,
) -> ScanOutcome {
    let total = pairs.len();

    let results: Vec<Result<ScanRow, ScanSkip>> = pairs
        .par_iter()
        .enumerate()
        .map(|(i, (timeframe, symbol))| {
            progress.on_start(symbol, *timeframe, i, total);
            let result = scan_pair(source, config, symbol, *timeframe);
            match &result {
                Ok(row) => progress.on_row(row),
                Err(skip) => progress.on_skip(skip),
            }
            result
        })
        .collect();

    let mut outcome = ScanOutcome {
        total_pairs: total,
        ..ScanOutcome::default()
    };
    for result in results {
        match result {
            Ok(row) => outcome.rows.push(row),
            Err(skip) => outcome.skips.push(skip),
        }
    }
    outcome
}
