//! Domain types: bars, timeframes, pivots, labels, verdicts.

pub mod bar;
pub mod pivot;
pub mod timeframe;
pub mod verdict;

pub use bar::{validate_bars, Bar, ValidationError};
pub use pivot::{LabeledPivot, Pivot, PivotKind, StructureFlags, StructureLabel, SwingFlags};
pub use timeframe::Timeframe;
pub use verdict::{TrendBase, TrendVerdict};
