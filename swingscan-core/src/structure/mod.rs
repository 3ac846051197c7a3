//! Price-structure pipeline: swing detection → labeling → classification.
//!
//! All stages are pure functions over an immutable bar slice with a per-call
//! accumulator — no shared state, safe to run concurrently for different
//! (symbol, timeframe) pairs.

pub mod classifier;
pub mod labeler;
pub mod swing;

pub use classifier::{classify, ClassifyMode};
pub use labeler::{extract_pivots, label_pivots, structure_flags};
pub use swing::{detect_swing_points, SwingConfig};

use crate::domain::{Bar, LabeledPivot, StructureFlags, StructureLabel, TrendVerdict};

/// Full output of one classification run, for callers that want the pivot
/// tail and flags alongside the verdict (the CLI `classify` view).
#[derive(Debug, Clone)]
pub struct StructureAnalysis {
    pub pivots: Vec<LabeledPivot>,
    pub flags: StructureFlags,
    pub verdict: TrendVerdict,
}

/// Run the whole pipeline over a bar sequence.
pub fn analyze(bars: &[Bar], swing: SwingConfig, mode: ClassifyMode) -> StructureAnalysis {
    let flags = detect_swing_points(bars, swing);
    let pivots = extract_pivots(bars, &flags);
    let labeled = label_pivots(&pivots);
    let sticky = structure_flags(&labeled);
    let labels: Vec<StructureLabel> = labeled.iter().map(|lp| lp.label).collect();
    let verdict = classify(&labels, sticky, mode);

    StructureAnalysis {
        pivots: labeled,
        flags: sticky,
        verdict,
    }
}

/// Pipeline shorthand when only the verdict is needed.
pub fn classify_bars(bars: &[Bar], swing: SwingConfig, mode: ClassifyMode) -> TrendVerdict {
    analyze(bars, swing, mode).verdict
}

/// Build bars from (high, low) pairs, one hour apart.
#[cfg(test)]
pub(crate) fn make_bars(data: &[(f64, f64)]) -> Vec<Bar> {
    use chrono::{TimeZone, Utc};
    let base = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
    data.iter()
        .enumerate()
        .map(|(i, &(high, low))| Bar {
            timestamp: base + chrono::Duration::hours(i as i64),
            open: (high + low) / 2.0,
            high,
            low,
            close: (high + low) / 2.0,
            volume: 1_000.0,
        })
        .collect()
}
