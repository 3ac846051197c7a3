//! Synthetic data source — deterministic random-walk bars for offline runs.
//!
//! Sub-seeds are derived per (symbol, timeframe) by BLAKE3 hashing, so the
//! same master seed produces the same bars for a pair regardless of scan
//! order or thread count. Useful for demos and for exercising the screener
//! without touching an exchange.

use super::provider::{InstrumentCatalog, MarketDataError, MarketDataSource};
use crate::domain::{Bar, Timeframe};
use chrono::{TimeZone, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Fixed universe served by the synthetic catalog.
const SYMBOLS: [&str; 8] = [
    "ADAUSDT", "BTCUSDT", "DOGEUSDT", "ETHUSDT", "LINKUSDT", "SOLUSDT", "XRPUSDT", "ZECUSDT",
];

/// Deterministic seeded random-walk source.
#[derive(Debug, Clone)]
pub struct SyntheticSource {
    master_seed: u64,
}

impl SyntheticSource {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    /// Derive a sub-seed for a (symbol, timeframe) pair.
    ///
    /// Hash-based, so derivation order doesn't matter: fetching BTCUSDT/1h
    /// then ETHUSDT/4h gives the same bars as the reverse order.
    fn sub_seed(&self, symbol: &str, timeframe: Timeframe) -> u64 {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&self.master_seed.to_le_bytes());
        hasher.update(symbol.as_bytes());
        hasher.update(timeframe.code().as_bytes());
        let hash = hasher.finalize();
        u64::from_le_bytes(hash.as_bytes()[..8].try_into().unwrap())
    }
}

impl MarketDataSource for SyntheticSource {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn fetch_bars(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<Vec<Bar>, MarketDataError> {
        let mut rng = StdRng::seed_from_u64(self.sub_seed(symbol, timeframe));
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let step = timeframe.duration();

        let mut close = rng.gen_range(5.0..500.0_f64);
        let mut bars = Vec::with_capacity(limit);

        for i in 0..limit {
            let open = close;
            // Random walk with mild drift and per-bar noise
            let ret = rng.gen_range(-0.03..0.032_f64);
            close = (open * (1.0 + ret)).max(0.01);

            let body_high = open.max(close);
            let body_low = open.min(close);
            let high = body_high * (1.0 + rng.gen_range(0.0..0.01));
            let low = (body_low * (1.0 - rng.gen_range(0.0..0.01))).max(0.005);

            bars.push(Bar {
                timestamp: base + step * i as i32,
                open,
                high,
                low,
                close,
                volume: rng.gen_range(100.0..100_000.0),
            });
        }

        Ok(bars)
    }
}

impl InstrumentCatalog for SyntheticSource {
    fn list_symbols(&self) -> Result<Vec<String>, MarketDataError> {
        Ok(SYMBOLS.iter().map(|s| s.to_string()).collect())
    }
}
