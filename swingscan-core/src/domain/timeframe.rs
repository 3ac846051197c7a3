//! Timeframe — scan granularities and their exchange wire codes.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Candle granularity for a scan.
///
/// The full menu matches what the screener exposes for selection. Not every
/// entry is servable by every provider — Bitget's candle endpoint covers a
/// subset (see [`Timeframe::bitget_granularity`]); requesting an unsupported
/// one yields a provider error, which the screener treats as a soft skip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Timeframe {
    M1,
    M3,
    M5,
    M10,
    M15,
    M20,
    M30,
    H1,
    H2,
    H4,
    H6,
    H8,
    H10,
    H12,
    H16,
    D1,
    W1,
}

impl Timeframe {
    /// Every selectable timeframe, shortest first.
    pub const ALL: [Timeframe; 17] = [
        Timeframe::M1,
        Timeframe::M3,
        Timeframe::M5,
        Timeframe::M10,
        Timeframe::M15,
        Timeframe::M20,
        Timeframe::M30,
        Timeframe::H1,
        Timeframe::H2,
        Timeframe::H4,
        Timeframe::H6,
        Timeframe::H8,
        Timeframe::H10,
        Timeframe::H12,
        Timeframe::H16,
        Timeframe::D1,
        Timeframe::W1,
    ];

    /// Default scan set: 1h, 4h, 1d.
    pub fn default_scan_set() -> Vec<Timeframe> {
        vec![Timeframe::H1, Timeframe::H4, Timeframe::D1]
    }

    /// Canonical short code ("1m", "4h", "1d", ...).
    pub fn code(&self) -> &'static str {
        match self {
            Timeframe::M1 => "1m",
            Timeframe::M3 => "3m",
            Timeframe::M5 => "5m",
            Timeframe::M10 => "10m",
            Timeframe::M15 => "15m",
            Timeframe::M20 => "20m",
            Timeframe::M30 => "30m",
            Timeframe::H1 => "1h",
            Timeframe::H2 => "2h",
            Timeframe::H4 => "4h",
            Timeframe::H6 => "6h",
            Timeframe::H8 => "8h",
            Timeframe::H10 => "10h",
            Timeframe::H12 => "12h",
            Timeframe::H16 => "16h",
            Timeframe::D1 => "1d",
            Timeframe::W1 => "1w",
        }
    }

    /// Bitget candle-endpoint granularity, if the exchange serves this size.
    pub fn bitget_granularity(&self) -> Option<&'static str> {
        match self {
            Timeframe::M1 => Some("1m"),
            Timeframe::M3 => Some("3m"),
            Timeframe::M5 => Some("5m"),
            Timeframe::M15 => Some("15m"),
            Timeframe::M30 => Some("30m"),
            Timeframe::H1 => Some("1H"),
            Timeframe::H2 => Some("2H"),
            Timeframe::H4 => Some("4H"),
            Timeframe::H6 => Some("6H"),
            Timeframe::H12 => Some("12H"),
            Timeframe::D1 => Some("1D"),
            Timeframe::W1 => Some("1W"),
            Timeframe::M10
            | Timeframe::M20
            | Timeframe::H8
            | Timeframe::H10
            | Timeframe::H16 => None,
        }
    }

    /// Interval width.
    pub fn duration(&self) -> Duration {
        match self {
            Timeframe::M1 => Duration::minutes(1),
            Timeframe::M3 => Duration::minutes(3),
            Timeframe::M5 => Duration::minutes(5),
            Timeframe::M10 => Duration::minutes(10),
            Timeframe::M15 => Duration::minutes(15),
            Timeframe::M20 => Duration::minutes(20),
            Timeframe::M30 => Duration::minutes(30),
            Timeframe::H1 => Duration::hours(1),
            Timeframe::H2 => Duration::hours(2),
            Timeframe::H4 => Duration::hours(4),
            Timeframe::H6 => Duration::hours(6),
            Timeframe::H8 => Duration::hours(8),
            Timeframe::H10 => Duration::hours(10),
            Timeframe::H12 => Duration::hours(12),
            Timeframe::H16 => Duration::hours(16),
            Timeframe::D1 => Duration::days(1),
            Timeframe::W1 => Duration::weeks(1),
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Timeframe::ALL
            .iter()
            .find(|tf| tf.code() == s)
            .copied()
            .ok_or_else(|| format!("unknown timeframe: {s}"))
    }
}

impl TryFrom<String> for Timeframe {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Timeframe> for String {
    fn from(tf: Timeframe) -> Self {
        tf.code().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_roundtrip() {
        for tf in Timeframe::ALL {
            assert_eq!(tf.code().parse::<Timeframe>().unwrap(), tf);
        }
    }

    #[test]
    fn unknown_code_rejected() {
        assert!("7m".parse::<Timeframe>().is_err());
    }

    #[test]
    fn serde_uses_codes() {
        let json = serde_json::to_string(&Timeframe::H4).unwrap();
        assert_eq!(json, "\"4h\"");
        let tf: Timeframe = serde_json::from_str("\"1w\"").unwrap();
        assert_eq!(tf, Timeframe::W1);
    }

    #[test]
    fn odd_sizes_have_no_bitget_granularity() {
        assert_eq!(Timeframe::M10.bitget_granularity(), None);
        assert_eq!(Timeframe::H16.bitget_granularity(), None);
        assert_eq!(Timeframe::H4.bitget_granularity(), Some("4H"));
    }

    #[test]
    fn durations_ascend() {
        for pair in Timeframe::ALL.windows(2) {
            assert!(pair[0].duration() < pair[1].duration());
        }
    }
}
