//! Trend verdict — the classifier's output surface.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unqualified verdict, also used as the report grouping key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrendBase {
    Uptrend,
    Downtrend,
    TrendBroken,
    NoTrend,
    ChangeOfCharacter,
}

impl TrendBase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendBase::Uptrend => "Uptrend",
            TrendBase::Downtrend => "Downtrend",
            TrendBase::TrendBroken => "Trend Broken",
            TrendBase::NoTrend => "No Trend",
            TrendBase::ChangeOfCharacter => "Change of Character",
        }
    }
}

impl fmt::Display for TrendBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final verdict for one (symbol, timeframe) classification run.
///
/// `bos_qualified` marks a break-of-structure run without a change of
/// character; Display renders it as a `" (BoS)"` suffix on the base string,
/// matching the surfaced screener values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendVerdict {
    pub base: TrendBase,
    pub bos_qualified: bool,
}

impl TrendVerdict {
    pub fn plain(base: TrendBase) -> Self {
        Self {
            base,
            bos_qualified: false,
        }
    }

    pub fn with_bos(base: TrendBase) -> Self {
        Self {
            base,
            bos_qualified: true,
        }
    }

    /// Grouping key: the unqualified base verdict.
    pub fn category(&self) -> TrendBase {
        self.base
    }
}

impl fmt::Display for TrendVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.bos_qualified {
            write!(f, "{} (BoS)", self.base)
        } else {
            self.base.fmt(f)
        }
    }
}
