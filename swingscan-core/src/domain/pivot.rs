//! Swing pivots and structural labels.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-bar swing annotation produced by the detector.
///
/// A bar may be neither, either, or (rarely, with degenerate data) both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwingFlags {
    pub swing_high: bool,
    pub swing_low: bool,
}

impl SwingFlags {
    pub fn is_pivot(&self) -> bool {
        self.swing_high || self.swing_low
    }
}

/// Which extreme a pivot marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PivotKind {
    High,
    Low,
}

/// A pivot bar: the bar's high for a swing high, its low for a swing low.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pivot {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
    pub kind: PivotKind,
}

/// Structural label relative to the prior pivot of the same kind.
///
/// HH/LH apply to High pivots, HL/LL to Low pivots. The first pivot of a
/// kind has no reference and takes the bullish label (HH or HL).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StructureLabel {
    /// Higher high.
    HH,
    /// Lower high.
    LH,
    /// Higher low.
    HL,
    /// Lower low.
    LL,
}

impl fmt::Display for StructureLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StructureLabel::HH => "HH",
            StructureLabel::LH => "LH",
            StructureLabel::HL => "HL",
            StructureLabel::LL => "LL",
        };
        f.write_str(s)
    }
}

/// A pivot with its assigned structural label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabeledPivot {
    pub pivot: Pivot,
    pub label: StructureLabel,
}

/// Sticky break/change accumulators for one classification run.
///
/// Both flags only ever transition false → true within a run; combining with
/// [`StructureFlags::union`] keeps that monotonicity structural instead of
/// relying on loop discipline. A fresh value is used per run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureFlags {
    /// A new extreme confirmed the prevailing direction (HH after a prior
    /// high, or LL after a prior low).
    pub break_of_structure: bool,
    /// A pivot broke the prevailing direction's pattern (LH after a prior
    /// high, or HL after a prior low).
    pub change_of_character: bool,
}

impl StructureFlags {
    /// Monotonic-OR combine: the result is at least as set as either input.
    pub fn union(self, other: StructureFlags) -> StructureFlags {
        StructureFlags {
            break_of_structure: self.break_of_structure || other.break_of_structure,
            change_of_character: self.change_of_character || other.change_of_character,
        }
    }

    /// True if `self` has every flag that `earlier` has.
    pub fn contains(&self, earlier: &StructureFlags) -> bool {
        (!earlier.break_of_structure || self.break_of_structure)
            && (!earlier.change_of_character || self.change_of_character)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_never_clears() {
        let set = StructureFlags {
            break_of_structure: true,
            change_of_character: false,
        };
        let combined = set.union(StructureFlags::default());
        assert!(combined.break_of_structure);
        assert!(combined.contains(&set));
    }

    #[test]
    fn union_merges_both_sides() {
        let bos = StructureFlags {
            break_of_structure: true,
            change_of_character: false,
        };
        let choch = StructureFlags {
            break_of_structure: false,
            change_of_character: true,
        };
        let both = bos.union(choch);
        assert!(both.break_of_structure && both.change_of_character);
    }

    #[test]
    fn label_display() {
        assert_eq!(StructureLabel::HH.to_string(), "HH");
        assert_eq!(StructureLabel::LL.to_string(), "LL");
    }
}
