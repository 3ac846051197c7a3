//! Pivot extraction and structural labeling.

use crate::domain::{
    Bar, LabeledPivot, Pivot, PivotKind, StructureFlags, StructureLabel, SwingFlags,
};

/// Extract pivots from an annotated bar sequence, preserving order.
///
/// A bar flagged as both swing high and swing low is taken as a High pivot
/// only — the High branch has precedence.
pub fn extract_pivots(bars: &[Bar], flags: &[SwingFlags]) -> Vec<Pivot> {
    debug_assert_eq!(bars.len(), flags.len());
    bars.iter()
        .zip(flags)
        .filter_map(|(bar, flag)| {
            if flag.swing_high {
                Some(Pivot {
                    timestamp: bar.timestamp,
                    price: bar.high,
                    kind: PivotKind::High,
                })
            } else if flag.swing_low {
                Some(Pivot {
                    timestamp: bar.timestamp,
                    price: bar.low,
                    kind: PivotKind::Low,
                })
            } else {
                None
            }
        })
        .collect()
}

/// Assign HH/LH/HL/LL labels by walking pivots in chronological order.
///
/// Each label compares against the most recent pivot of the SAME kind, not
/// the immediately previous pivot. The first pivot of a kind has no
/// reference and takes HH (high) or HL (low). A higher low is bullish
/// continuation, so Low pivots label HL on `price > last_low`.
pub fn label_pivots(pivots: &[Pivot]) -> Vec<LabeledPivot> {
    let mut last_high: Option<f64> = None;
    let mut last_low: Option<f64> = None;

    pivots
        .iter()
        .map(|&pivot| {
            let label = match pivot.kind {
                PivotKind::High => {
                    let label = match last_high {
                        Some(prev) if pivot.price <= prev => StructureLabel::LH,
                        _ => StructureLabel::HH,
                    };
                    last_high = Some(pivot.price);
                    label
                }
                PivotKind::Low => {
                    let label = match last_low {
                        Some(prev) if pivot.price <= prev => StructureLabel::LL,
                        _ => StructureLabel::HL,
                    };
                    last_low = Some(pivot.price);
                    label
                }
            };
            LabeledPivot { pivot, label }
        })
        .collect()
}

/// Fold the labeled sequence into sticky break/change flags.
///
/// A label only counts once a prior pivot of its kind exists (the first HH
/// or HL of a kind is a default, not a signal). Expressed as a monotonic-OR
/// fold over per-pivot contributions: flags can only accumulate, which makes
/// the never-resets invariant hold for every prefix of the sequence.
pub fn structure_flags(labeled: &[LabeledPivot]) -> StructureFlags {
    let mut seen_high = false;
    let mut seen_low = false;

    labeled.iter().fold(StructureFlags::default(), |acc, lp| {
        let had_prior = match lp.pivot.kind {
            PivotKind::High => std::mem::replace(&mut seen_high, true),
            PivotKind::Low => std::mem::replace(&mut seen_low, true),
        };
        let step = StructureFlags {
            break_of_structure: had_prior
                && matches!(lp.label, StructureLabel::HH | StructureLabel::LL),
            change_of_character: had_prior
                && matches!(lp.label, StructureLabel::LH | StructureLabel::HL),
        };
        acc.union(step)
    })
}
