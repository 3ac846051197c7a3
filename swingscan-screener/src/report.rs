//! Report generation — grouped text tables, CSV and JSON export.
//!
//! Rows are grouped by verdict category in the screener's fixed display
//! order; a BoS-qualified verdict groups with its base (an "Uptrend (BoS)"
//! row lands in the Uptrend section).

use crate::screener::{ScanOutcome, ScanRow};
use anyhow::{Context, Result};
use swingscan_core::domain::TrendBase;

/// Display order for report sections.
pub const CATEGORY_ORDER: [TrendBase; 5] = [
    TrendBase::Uptrend,
    TrendBase::Downtrend,
    TrendBase::ChangeOfCharacter,
    TrendBase::TrendBroken,
    TrendBase::NoTrend,
];

/// Group rows by verdict category, omitting empty groups.
pub fn group_rows(rows: &[ScanRow]) -> Vec<(TrendBase, Vec<&ScanRow>)> {
    CATEGORY_ORDER
        .iter()
        .filter_map(|&category| {
            let members: Vec<&ScanRow> = rows
                .iter()
                .filter(|r| r.verdict.category() == category)
                .collect();
            if members.is_empty() {
                None
            } else {
                Some((category, members))
            }
        })
        .collect()
}

/// Render the grouped plain-text report.
pub fn render_report(outcome: &ScanOutcome) -> String {
    let mut out = String::new();

    for (category, members) in group_rows(&outcome.rows) {
        out.push_str(&format!("=== {category} ({}) ===\n", members.len()));
        out.push_str(&format!(
            "{:<14} {:<10} {}\n",
            "SYMBOL", "TIMEFRAME", "TREND"
        ));
        for row in members {
            out.push_str(&format!(
                "{:<14} {:<10} {}\n",
                row.symbol,
                row.timeframe.to_string(),
                row.verdict
            ));
        }
        out.push('\n');
    }

    out.push_str(&format!(
        "{}/{} pairs classified, {} skipped\n",
        outcome.scanned(),
        outcome.total_pairs,
        outcome.skipped()
    ));
    out
}

// ─── CSV export ─────────────────────────────────────────────────────

/// Export all rows as CSV with symbol, timeframe, trend columns.
pub fn export_csv(rows: &[ScanRow]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["symbol", "timeframe", "trend"])?;
    for row in rows {
        wtr.write_record([
            row.symbol.as_str(),
            row.timeframe.code(),
            &row.verdict.to_string(),
        ])?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

// ─── JSON export ────────────────────────────────────────────────────

/// Export all rows as pretty JSON, surfacing the verdict as its display
/// string.
pub fn export_json(rows: &[ScanRow]) -> Result<String> {
    let values: Vec<serde_json::Value> = rows
        .iter()
        .map(|row| {
            serde_json::json!({
                "symbol": row.symbol,
                "timeframe": row.timeframe.code(),
                "trend": row.verdict.to_string(),
            })
        })
        .collect();
    serde_json::to_string_pretty(&values).context("failed to serialize scan rows to JSON")
}
