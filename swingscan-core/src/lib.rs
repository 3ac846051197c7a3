//! SwingScan Core — price-structure trend classification over OHLCV bars.
//!
//! This crate contains:
//! - Domain types (bars, timeframes, pivots, structural labels, verdicts)
//! - The swing-detection → labeling → classification pipeline
//! - Data-source abstractions, the Bitget USDT-perp client, and a
//!   deterministic synthetic source
//!
//! The pipeline is pure: bar slice in, verdict out, one local accumulator
//! per call. Orchestration (scan loops, pacing, reporting) lives in
//! `swingscan-screener`.

pub mod data;
pub mod domain;
pub mod structure;
