//! SwingScan CLI — price-action trend screener for Bitget USDT perpetuals.
//!
//! Commands:
//! - `scan` — classify every (symbol, timeframe) pair and print a grouped report
//! - `symbols` — list the tradable instrument catalog
//! - `classify` — classify a single pair and show its labeled pivot tail

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use swingscan_core::data::{
    BitgetPerp, CircuitBreaker, InstrumentCatalog, MarketDataSource, SyntheticSource,
};
use swingscan_core::domain::Timeframe;
use swingscan_core::structure::{analyze, ClassifyMode, SwingConfig};
use swingscan_screener::{
    export_csv, export_json, render_report, run_scan, ScanConfig, SilentProgress, StdoutProgress,
};

#[derive(Parser)]
#[command(
    name = "swingscan",
    about = "SwingScan CLI — price-action swing structure screener"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan the instrument universe and print a grouped trend report.
    Scan {
        /// Comma-separated timeframes (e.g. 1h,4h,1d). Defaults to 1h,4h,1d.
        #[arg(long)]
        timeframes: Option<String>,

        /// Comma-separated symbol whitelist. Defaults to the full catalog.
        #[arg(long)]
        symbols: Option<String>,

        /// Path to a TOML scan config. CLI flags override file values.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Bars requested per pair.
        #[arg(long)]
        limit: Option<usize>,

        /// Minimum bars required to classify a pair.
        #[arg(long)]
        min_bars: Option<usize>,

        /// Left swing offset.
        #[arg(long)]
        left: Option<usize>,

        /// Right swing offset.
        #[arg(long)]
        right: Option<usize>,

        /// Disable BoS/CHoCH qualification (plain triple classifier).
        #[arg(long, default_value_t = false)]
        plain: bool,

        /// Delay between data-source calls in milliseconds.
        #[arg(long)]
        pace_ms: Option<u64>,

        /// Fetch pairs over a worker pool instead of pacing sequentially.
        #[arg(long, default_value_t = false)]
        parallel: bool,

        /// Use the deterministic synthetic source instead of Bitget.
        #[arg(long, default_value_t = false)]
        synthetic: bool,

        /// Seed for the synthetic source.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Write all rows to a CSV file.
        #[arg(long)]
        csv_out: Option<PathBuf>,

        /// Print rows as JSON instead of the text report.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// List the tradable instrument catalog.
    Symbols {
        /// Use the deterministic synthetic source instead of Bitget.
        #[arg(long, default_value_t = false)]
        synthetic: bool,

        /// Seed for the synthetic source.
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
    /// Classify a single symbol/timeframe and show the pivot tail.
    Classify {
        /// Symbol to classify (e.g. BTCUSDT).
        symbol: String,

        /// Timeframe (e.g. 4h).
        #[arg(long, default_value = "1h")]
        timeframe: String,

        /// Bars to fetch.
        #[arg(long, default_value_t = 100)]
        limit: usize,

        /// Left swing offset.
        #[arg(long, default_value_t = 2)]
        left: usize,

        /// Right swing offset.
        #[arg(long, default_value_t = 2)]
        right: usize,

        /// Disable BoS/CHoCH qualification (plain triple classifier).
        #[arg(long, default_value_t = false)]
        plain: bool,

        /// Use the deterministic synthetic source instead of Bitget.
        #[arg(long, default_value_t = false)]
        synthetic: bool,

        /// Seed for the synthetic source.
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan {
            timeframes,
            symbols,
            config,
            limit,
            min_bars,
            left,
            right,
            plain,
            pace_ms,
            parallel,
            synthetic,
            seed,
            csv_out,
            json,
        } => {
            let config = build_scan_config(
                config, timeframes, symbols, limit, min_bars, left, right, plain, pace_ms,
                parallel,
            )?;
            with_source(synthetic, seed, |source, catalog| {
                run_scan_cmd(source, catalog, &config, csv_out, json)
            })
        }
        Commands::Symbols { synthetic, seed } => {
            with_source(synthetic, seed, |_, catalog| run_symbols(catalog))
        }
        Commands::Classify {
            symbol,
            timeframe,
            limit,
            left,
            right,
            plain,
            synthetic,
            seed,
        } => {
            let timeframe: Timeframe = timeframe
                .parse()
                .map_err(|e: String| anyhow::anyhow!(e))?;
            let swing = SwingConfig {
                left_offset: left,
                right_offset: right,
            };
            let mode = if plain {
                ClassifyMode::Plain
            } else {
                ClassifyMode::Extended
            };
            with_source(synthetic, seed, |source, _| {
                run_classify(source, &symbol, timeframe, limit, swing, mode)
            })
        }
    }
}

/// Build either the Bitget or the synthetic source and hand both trait views
/// to the command body.
fn with_source<T>(
    synthetic: bool,
    seed: u64,
    f: impl FnOnce(&dyn MarketDataSource, &dyn InstrumentCatalog) -> Result<T>,
) -> Result<T> {
    if synthetic {
        let source = SyntheticSource::new(seed);
        f(&source, &source)
    } else {
        let provider = BitgetPerp::new(Arc::new(CircuitBreaker::for_provider()));
        f(&provider, &provider)
    }
}

#[allow(clippy::too_many_arguments)]
fn build_scan_config(
    config_path: Option<PathBuf>,
    timeframes: Option<String>,
    symbols: Option<String>,
    limit: Option<usize>,
    min_bars: Option<usize>,
    left: Option<usize>,
    right: Option<usize>,
    plain: bool,
    pace_ms: Option<u64>,
    parallel: bool,
) -> Result<ScanConfig> {
    let mut config = match config_path {
        Some(path) => ScanConfig::from_file(&path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ScanConfig::default(),
    };

    if let Some(list) = timeframes {
        config.timeframes = parse_timeframes(&list)?;
    }
    if let Some(list) = symbols {
        config.symbols = Some(
            list.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        );
    }
    if let Some(limit) = limit {
        config.bar_limit = limit;
    }
    if let Some(min_bars) = min_bars {
        config.min_bars = min_bars;
    }
    if let Some(left) = left {
        config.swing.left_offset = left;
    }
    if let Some(right) = right {
        config.swing.right_offset = right;
    }
    if plain {
        config.mode = ClassifyMode::Plain;
    }
    if let Some(pace_ms) = pace_ms {
        config.pace_ms = pace_ms;
    }
    if parallel {
        config.parallel = true;
    }

    config.validate()?;
    Ok(config)
}

fn parse_timeframes(list: &str) -> Result<Vec<Timeframe>> {
    list.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<Timeframe>().map_err(|e| anyhow::anyhow!(e)))
        .collect()
}

fn run_scan_cmd(
    source: &dyn MarketDataSource,
    catalog: &dyn InstrumentCatalog,
    config: &ScanConfig,
    csv_out: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let outcome = if json {
        run_scan(source, catalog, config, &SilentProgress)?
    } else {
        run_scan(source, catalog, config, &StdoutProgress)?
    };

    if let Some(path) = csv_out {
        let csv = export_csv(&outcome.rows)?;
        std::fs::write(&path, csv)
            .with_context(|| format!("writing CSV to {}", path.display()))?;
        if !json {
            println!("Wrote {} rows to {}", outcome.rows.len(), path.display());
        }
    }

    if json {
        println!("{}", export_json(&outcome.rows)?);
    } else {
        println!();
        print!("{}", render_report(&outcome));
    }

    if outcome.total_pairs > 0 && outcome.scanned() == 0 {
        bail!(
            "no pairs classified ({} skipped) — see skip reasons above",
            outcome.skipped()
        );
    }
    Ok(())
}

fn run_symbols(catalog: &dyn InstrumentCatalog) -> Result<()> {
    let symbols = catalog.list_symbols()?;
    for symbol in &symbols {
        println!("{symbol}");
    }
    eprintln!("{} instruments", symbols.len());
    Ok(())
}

fn run_classify(
    source: &dyn MarketDataSource,
    symbol: &str,
    timeframe: Timeframe,
    limit: usize,
    swing: SwingConfig,
    mode: ClassifyMode,
) -> Result<()> {
    let bars = source
        .fetch_bars(symbol, timeframe, limit)
        .with_context(|| format!("fetching {symbol} on {timeframe}"))?;
    println!("{} bars for {symbol} on {timeframe}", bars.len());

    let analysis = analyze(&bars, swing, mode);

    // Show the recent structure the verdict was read from
    let tail_start = analysis.pivots.len().saturating_sub(6);
    for lp in &analysis.pivots[tail_start..] {
        println!(
            "  {}  {}  {:.6} ({:?})",
            lp.pivot.timestamp, lp.label, lp.pivot.price, lp.pivot.kind
        );
    }

    if analysis.flags.break_of_structure {
        println!("break of structure seen during run");
    }
    if analysis.flags.change_of_character {
        println!("change of character seen during run");
    }
    println!("Verdict: {}", analysis.verdict);
    Ok(())
}
