//! Swing-point detection — fixed-offset two-point comparison.

use crate::domain::{Bar, SwingFlags};
use serde::{Deserialize, Serialize};

/// Offsets for the swing comparison rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwingConfig {
    pub left_offset: usize,
    pub right_offset: usize,
}

impl Default for SwingConfig {
    fn default() -> Self {
        Self {
            left_offset: 2,
            right_offset: 2,
        }
    }
}

/// Mark each bar as a swing high and/or swing low candidate.
///
/// Bar `i` is a swing high iff its high strictly exceeds the high of the
/// single bar exactly `left_offset` before it AND the single bar exactly
/// `right_offset` after it. Bars strictly between are not examined — this is
/// a two-point comparison, not a windowed extremum, and the distinction
/// changes which bars qualify. Swing low is the mirror rule on lows.
///
/// Bars without a full offset on either side get both flags false. Output
/// length always equals input length.
pub fn detect_swing_points(bars: &[Bar], config: SwingConfig) -> Vec<SwingFlags> {
    let n = bars.len();
    let mut flags = vec![SwingFlags::default(); n];

    for i in 0..n {
        if i < config.left_offset || i + config.right_offset >= n {
            continue;
        }
        let left = &bars[i - config.left_offset];
        let right = &bars[i + config.right_offset];

        flags[i] = SwingFlags {
            swing_high: left.high < bars[i].high && right.high < bars[i].high,
            swing_low: left.low > bars[i].low && right.low > bars[i].low,
        };
    }

    flags
}
