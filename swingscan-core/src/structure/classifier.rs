//! Trend classification — reduce the labeled pivot tail to a verdict.

use crate::domain::{StructureFlags, StructureLabel, TrendBase, TrendVerdict};
use serde::{Deserialize, Serialize};

/// Which classifier variant to run.
///
/// Plain stops at the triple-pattern verdict; Extended applies the sticky
/// break/change post-processing on top. Extended is the superset and the
/// default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassifyMode {
    Plain,
    #[default]
    Extended,
}

/// Classify a label sequence, reading only its tail.
///
/// Fewer than three labels is No Trend unconditionally — the accumulators
/// are not consulted on that path. Otherwise the last three labels decide
/// the base verdict:
///
/// - `[HH, HL, HH]` / `[HL, HH, HL]` → Uptrend
/// - `[LL, LH, LL]` / `[LH, LL, LH]` → Downtrend
/// - anything else → Trend Broken
///
/// In extended mode, a change of character without a break of structure
/// replaces the base verdict outright; a break of structure without a change
/// of character qualifies it with BoS. Both set, or neither, passes the base
/// verdict through.
pub fn classify(
    labels: &[StructureLabel],
    flags: StructureFlags,
    mode: ClassifyMode,
) -> TrendVerdict {
    if labels.len() < 3 {
        return TrendVerdict::plain(TrendBase::NoTrend);
    }

    use crate::domain::StructureLabel::{HH, HL, LH, LL};
    let base = match &labels[labels.len() - 3..] {
        [HH, HL, HH] | [HL, HH, HL] => TrendBase::Uptrend,
        [LL, LH, LL] | [LH, LL, LH] => TrendBase::Downtrend,
        _ => TrendBase::TrendBroken,
    };

    if mode == ClassifyMode::Plain {
        return TrendVerdict::plain(base);
    }

    match (flags.break_of_structure, flags.change_of_character) {
        (false, true) => TrendVerdict::plain(TrendBase::ChangeOfCharacter),
        (true, false) => TrendVerdict::with_bos(base),
        _ => TrendVerdict::plain(base),
    }
}
