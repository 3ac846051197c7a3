//! Bar — the fundamental market data unit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// OHLCV bar for a single symbol on a single timeframe interval.
///
/// Bars arrive from a provider already ordered by timestamp. The core never
/// mutates a bar; derived per-index flags are carried alongside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    /// Returns true if any price field is NaN or infinite.
    pub fn is_void(&self) -> bool {
        !(self.open.is_finite()
            && self.high.is_finite()
            && self.low.is_finite()
            && self.close.is_finite()
            && self.volume.is_finite())
    }

    /// Basic OHLCV sanity check: high >= low, high >= open, high >= close, etc.
    pub fn is_sane(&self) -> bool {
        if self.is_void() {
            return false;
        }
        self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
            && self.open > 0.0
            && self.close > 0.0
    }
}

/// Rejection reasons for a malformed bar sequence.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("bar {index} has non-finite or inconsistent OHLCV")]
    InsaneBar { index: usize },

    #[error("timestamps not strictly increasing at bar {index}")]
    NonMonotonicTimestamp { index: usize },
}

/// Validate a bar sequence at the data boundary.
///
/// The classification pipeline assumes well-formed input; feeding it garbage
/// would silently misclassify rather than fail. Providers call this before
/// handing bars to the core. Empty sequences are valid (they classify as
/// No Trend downstream).
pub fn validate_bars(bars: &[Bar]) -> Result<(), ValidationError> {
    for (index, bar) in bars.iter().enumerate() {
        if !bar.is_sane() {
            return Err(ValidationError::InsaneBar { index });
        }
        if index > 0 && bars[index - 1].timestamp >= bar.timestamp {
            return Err(ValidationError::NonMonotonicTimestamp { index });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_bar() -> Bar {
        Bar {
            timestamp: Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(),
            open: 100.0,
            high: 105.0,
            low: 98.0,
            close: 103.0,
            volume: 50_000.0,
        }
    }

    #[test]
    fn bar_is_sane() {
        assert!(sample_bar().is_sane());
    }

    #[test]
    fn bar_detects_void() {
        let mut bar = sample_bar();
        bar.open = f64::NAN;
        assert!(bar.is_void());
        assert!(!bar.is_sane());
    }

    #[test]
    fn bar_detects_insane_high_low() {
        let mut bar = sample_bar();
        bar.high = 97.0; // below low
        assert!(!bar.is_sane());
    }

    #[test]
    fn bar_serialization_roundtrip() {
        let bar = sample_bar();
        let json = serde_json::to_string(&bar).unwrap();
        let deser: Bar = serde_json::from_str(&json).unwrap();
        assert_eq!(bar, deser);
    }

    #[test]
    fn validate_accepts_ordered_bars() {
        let mut second = sample_bar();
        second.timestamp = second.timestamp + chrono::Duration::hours(1);
        assert!(validate_bars(&[sample_bar(), second]).is_ok());
    }

    #[test]
    fn validate_accepts_empty() {
        assert!(validate_bars(&[]).is_ok());
    }

    #[test]
    fn validate_rejects_duplicate_timestamp() {
        let err = validate_bars(&[sample_bar(), sample_bar()]).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::NonMonotonicTimestamp { index: 1 }
        ));
    }

    #[test]
    fn validate_rejects_nan_price() {
        let mut bad = sample_bar();
        bad.low = f64::NAN;
        let err = validate_bars(&[bad]).unwrap_err();
        assert!(matches!(err, ValidationError::InsaneBar { index: 0 }));
    }
}
