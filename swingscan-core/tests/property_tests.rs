//! Property tests for pipeline invariants.
//!
//! Uses proptest to verify:
//! 1. Detector output length and boundary exclusion
//! 2. Insufficient context ⇒ no swings at all
//! 3. First pivot of a kind always labels HH/HL
//! 4. Sticky flags are monotonic over every prefix
//! 5. Fewer than 3 labels ⇒ No Trend regardless of accumulator state
//! 6. The pipeline is a pure function of its input

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use swingscan_core::domain::{
    Bar, PivotKind, StructureFlags, StructureLabel, TrendBase, TrendVerdict,
};
use swingscan_core::structure::{
    classify, classify_bars, detect_swing_points, extract_pivots, label_pivots, structure_flags,
    ClassifyMode, SwingConfig,
};

// ── Strategies ───────────────────────────────────────────────────────

/// (high, low) pairs with high strictly above low.
fn arb_price_pairs(max_len: usize) -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec(
        (10.0..1000.0_f64, 0.1..5.0_f64).prop_map(|(high, spread)| (high, high - spread)),
        0..max_len,
    )
}

fn arb_offsets() -> impl Strategy<Value = SwingConfig> {
    (1usize..5, 1usize..5).prop_map(|(left_offset, right_offset)| SwingConfig {
        left_offset,
        right_offset,
    })
}

fn arb_label() -> impl Strategy<Value = StructureLabel> {
    prop_oneof![
        Just(StructureLabel::HH),
        Just(StructureLabel::LH),
        Just(StructureLabel::HL),
        Just(StructureLabel::LL),
    ]
}

fn make_bars(data: &[(f64, f64)]) -> Vec<Bar> {
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

// ── 1 & 2: Detector shape and boundaries ─────────────────────────────

proptest! {
    /// Output length always equals input length, and bars without a full
    /// offset on either side never carry a flag.
    #[test]
    fn detector_length_and_boundaries(
        pairs in arb_price_pairs(60),
        config in arb_offsets(),
    ) {
        let bars = make_bars(&pairs);
        let flags = detect_swing_points(&bars, config);
        prop_assert_eq!(flags.len(), bars.len());

        for (i, flag) in flags.iter().enumerate() {
            if i < config.left_offset || i + config.right_offset >= bars.len() {
                prop_assert!(!flag.is_pivot(), "boundary bar {} flagged", i);
            }
        }
    }

    /// A sequence shorter than left + right + 1 has no evaluable bar at all.
    #[test]
    fn short_sequences_have_no_swings(
        pairs in arb_price_pairs(9),
        config in arb_offsets(),
    ) {
        prop_assume!(pairs.len() < config.left_offset + config.right_offset + 1);
        let flags = detect_swing_points(&make_bars(&pairs), config);
        prop_assert!(flags.iter().all(|f| !f.is_pivot()));
    }
}

// ── 3: First-of-kind labels ──────────────────────────────────────────

proptest! {
    #[test]
    fn first_pivot_of_each_kind_labels_bullish(pairs in arb_price_pairs(60)) {
        let bars = make_bars(&pairs);
        let flags = detect_swing_points(&bars, SwingConfig::default());
        let labeled = label_pivots(&extract_pivots(&bars, &flags));

        if let Some(first_high) = labeled.iter().find(|lp| lp.pivot.kind == PivotKind::High) {
            prop_assert_eq!(first_high.label, StructureLabel::HH);
        }
        if let Some(first_low) = labeled.iter().find(|lp| lp.pivot.kind == PivotKind::Low) {
            prop_assert_eq!(first_low.label, StructureLabel::HL);
        }
    }
}

// ── 4: Flag monotonicity ─────────────────────────────────────────────

proptest! {
    /// Flags over a longer prefix always contain the flags of a shorter one.
    #[test]
    fn sticky_flags_never_reset(pairs in arb_price_pairs(60)) {
        let bars = make_bars(&pairs);
        let flags = detect_swing_points(&bars, SwingConfig::default());
        let labeled = label_pivots(&extract_pivots(&bars, &flags));

        let mut prev = StructureFlags::default();
        for end in 0..=labeled.len() {
            let current = structure_flags(&labeled[..end]);
            prop_assert!(current.contains(&prev), "flags reset at prefix {}", end);
            prev = current;
        }
    }
}

// ── 5: Short label sequences ─────────────────────────────────────────

proptest! {
    /// Below three labels the verdict is No Trend no matter what the
    /// accumulators say.
    #[test]
    fn under_three_labels_is_always_no_trend(
        labels in prop::collection::vec(arb_label(), 0..3),
        break_of_structure in any::<bool>(),
        change_of_character in any::<bool>(),
    ) {
        let flags = StructureFlags { break_of_structure, change_of_character };
        for mode in [ClassifyMode::Plain, ClassifyMode::Extended] {
            let verdict = classify(&labels, flags, mode);
            prop_assert_eq!(verdict, TrendVerdict::plain(TrendBase::NoTrend));
        }
    }
}

// ── 6: Purity ────────────────────────────────────────────────────────

proptest! {
    /// Re-running the full pipeline on identical bars yields an identical
    /// verdict — no hidden state between calls.
    #[test]
    fn pipeline_is_pure(pairs in arb_price_pairs(80)) {
        let bars = make_bars(&pairs);
        let first = classify_bars(&bars, SwingConfig::default(), ClassifyMode::Extended);
        let second = classify_bars(&bars, SwingConfig::default(), ClassifyMode::Extended);
        prop_assert_eq!(first, second);
    }
}
