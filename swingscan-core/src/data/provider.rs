//! Market data abstractions and structured error types.
//!
//! The `MarketDataSource` and `InstrumentCatalog` traits abstract over
//! exchanges so the screener can swap implementations and run against fixed
//! fixtures in tests. The orchestrator treats every error here as a soft
//! skip for the affected pair — nothing propagates to the presentation
//! layer as fatal.

use crate::domain::{Bar, Timeframe, ValidationError};
use thiserror::Error;

/// Structured error types for data operations.
#[derive(Debug, Error)]
pub enum MarketDataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("timeframe {timeframe} is not served by this provider")]
    UnsupportedTimeframe { timeframe: Timeframe },

    #[error("hard stop: data provider has blocked requests (circuit breaker tripped)")]
    CircuitBreakerTripped,

    #[error("malformed bar sequence: {0}")]
    Validation(#[from] ValidationError),

    #[error("data error: {0}")]
    Other(String),
}

/// A source of historical OHLCV bars.
///
/// Implementations validate the bar sequence before returning it — the
/// classification pipeline downstream assumes well-formed input.
pub trait MarketDataSource: Send + Sync {
    /// Human-readable name of this source.
    fn name(&self) -> &str;

    /// Fetch up to `limit` most recent bars for a symbol on a timeframe,
    /// oldest first.
    fn fetch_bars(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<Vec<Bar>, MarketDataError>;

    /// Check if the source is currently usable (not rate-limited, not blocked).
    fn is_available(&self) -> bool {
        true
    }
}

/// Enumerates the tradable instruments that form the scan universe.
pub trait InstrumentCatalog: Send + Sync {
    fn list_symbols(&self) -> Result<Vec<String>, MarketDataError>;
}
