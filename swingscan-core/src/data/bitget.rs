//! Bitget USDT-perpetual data provider.
//!
//! Fetches OHLCV candles and the tradable contract list from Bitget's public
//! v2 mix-market API. Handles rate limiting, retries with exponential
//! backoff, response parsing, and the circuit breaker. No authentication is
//! required for either endpoint.

use super::circuit_breaker::CircuitBreaker;
use super::provider::{InstrumentCatalog, MarketDataError, MarketDataSource};
use crate::domain::{validate_bars, Bar, Timeframe};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

const BASE_URL: &str = "https://api.bitget.com";
const PRODUCT_TYPE: &str = "usdt-futures";

/// Bitget v2 response envelope. `code` is `"00000"` on success.
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    code: String,
    msg: String,
    data: Option<T>,
}

/// One candle row: [ts_ms, open, high, low, close, base_vol, quote_vol],
/// all encoded as strings, oldest first.
type CandleRow = Vec<String>;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContractInfo {
    symbol: String,
    #[serde(default)]
    symbol_status: String,
}

/// Bitget USDT-perpetual provider.
pub struct BitgetPerp {
    client: reqwest::blocking::Client,
    circuit_breaker: Arc<CircuitBreaker>,
    max_retries: u32,
    base_delay: Duration,
}

impl BitgetPerp {
    pub fn new(circuit_breaker: Arc<CircuitBreaker>) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("swingscan/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            circuit_breaker,
            max_retries: 3,
            base_delay: Duration::from_millis(500),
        }
    }

    fn candles_url(symbol: &str, granularity: &str, limit: usize) -> String {
        format!(
            "{BASE_URL}/api/v2/mix/market/candles\
             ?symbol={symbol}&productType={PRODUCT_TYPE}\
             &granularity={granularity}&limit={limit}"
        )
    }

    fn contracts_url() -> String {
        format!("{BASE_URL}/api/v2/mix/market/contracts?productType={PRODUCT_TYPE}")
    }

    fn parse_candles(symbol: &str, rows: Vec<CandleRow>) -> Result<Vec<Bar>, MarketDataError> {
        let mut bars = Vec::with_capacity(rows.len());

        for row in rows {
            if row.len() < 6 {
                return Err(MarketDataError::ResponseFormatChanged(format!(
                    "candle row for {symbol} has {} fields, expected at least 6",
                    row.len()
                )));
            }

            let ts_ms: i64 = row[0].parse().map_err(|_| {
                MarketDataError::ResponseFormatChanged(format!(
                    "invalid candle timestamp: {}",
                    row[0]
                ))
            })?;
            let timestamp: DateTime<Utc> =
                DateTime::from_timestamp_millis(ts_ms).ok_or_else(|| {
                    MarketDataError::ResponseFormatChanged(format!(
                        "candle timestamp out of range: {ts_ms}"
                    ))
                })?;

            let price = |field: &str, name: &str| -> Result<f64, MarketDataError> {
                field.parse().map_err(|_| {
                    MarketDataError::ResponseFormatChanged(format!(
                        "invalid {name} for {symbol}: {field}"
                    ))
                })
            };

            bars.push(Bar {
                timestamp,
                open: price(&row[1], "open")?,
                high: price(&row[2], "high")?,
                low: price(&row[3], "low")?,
                close: price(&row[4], "close")?,
                volume: price(&row[5], "volume")?,
            });
        }

        // Boundary contract: the pipeline never sees malformed sequences.
        validate_bars(&bars)?;
        Ok(bars)
    }

    fn unwrap_envelope<T>(
        symbol: &str,
        resp: ApiResponse<T>,
    ) -> Result<T, MarketDataError> {
        if resp.code != "00000" {
            if resp.msg.contains("not exist") || resp.msg.contains("not found") {
                return Err(MarketDataError::SymbolNotFound {
                    symbol: symbol.to_string(),
                });
            }
            return Err(MarketDataError::ResponseFormatChanged(format!(
                "{}: {}",
                resp.code, resp.msg
            )));
        }
        resp.data.ok_or_else(|| {
            MarketDataError::ResponseFormatChanged("success response with no data".into())
        })
    }

    /// Execute one GET with retry and circuit-breaker accounting.
    fn get_with_retry<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        symbol: &str,
    ) -> Result<ApiResponse<T>, MarketDataError> {
        if !self.circuit_breaker.is_allowed() {
            return Err(MarketDataError::CircuitBreakerTripped);
        }

        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = self.base_delay * 2u32.pow(attempt - 1);
                std::thread::sleep(delay);
            }

            if !self.circuit_breaker.is_allowed() {
                return Err(MarketDataError::CircuitBreakerTripped);
            }

            match self.client.get(url).send() {
                Ok(resp) => {
                    let status = resp.status();

                    if status == reqwest::StatusCode::FORBIDDEN {
                        // IP ban — refuse everything for the cooldown
                        self.circuit_breaker.trip();
                        return Err(MarketDataError::CircuitBreakerTripped);
                    }

                    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        self.circuit_breaker.record_failure();
                        let retry_after = resp
                            .headers()
                            .get("retry-after")
                            .and_then(|v| v.to_str().ok())
                            .and_then(|v| v.parse::<u64>().ok())
                            .unwrap_or(60);
                        last_error = Some(MarketDataError::RateLimited {
                            retry_after_secs: retry_after,
                        });
                        continue;
                    }

                    if !status.is_success() {
                        self.circuit_breaker.record_failure();
                        last_error = Some(MarketDataError::Other(format!(
                            "HTTP {status} for {symbol}"
                        )));
                        continue;
                    }

                    let envelope: ApiResponse<T> = resp.json().map_err(|e| {
                        MarketDataError::ResponseFormatChanged(format!(
                            "failed to parse response for {symbol}: {e}"
                        ))
                    })?;
                    self.circuit_breaker.record_success();
                    return Ok(envelope);
                }
                Err(e) => {
                    if e.is_connect() || e.is_timeout() {
                        last_error = Some(MarketDataError::NetworkUnreachable(e.to_string()));
                        continue;
                    }
                    return Err(MarketDataError::NetworkUnreachable(e.to_string()));
                }
            }
        }

        Err(last_error.unwrap_or_else(|| MarketDataError::Other("max retries exceeded".into())))
    }
}

impl MarketDataSource for BitgetPerp {
    fn name(&self) -> &str {
        "bitget_usdt_perp"
    }

    fn fetch_bars(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<Vec<Bar>, MarketDataError> {
        let granularity = timeframe
            .bitget_granularity()
            .ok_or(MarketDataError::UnsupportedTimeframe { timeframe })?;

        let url = Self::candles_url(symbol, granularity, limit);
        let envelope: ApiResponse<Vec<CandleRow>> = self.get_with_retry(&url, symbol)?;
        let rows = Self::unwrap_envelope(symbol, envelope)?;
        Self::parse_candles(symbol, rows)
    }

    fn is_available(&self) -> bool {
        self.circuit_breaker.is_allowed()
    }
}

impl InstrumentCatalog for BitgetPerp {
    /// All normally-trading USDT-margined perpetual contracts.
    fn list_symbols(&self) -> Result<Vec<String>, MarketDataError> {
        let url = Self::contracts_url();
        let envelope: ApiResponse<Vec<ContractInfo>> = self.get_with_retry(&url, "contracts")?;
        let contracts = Self::unwrap_envelope("contracts", envelope)?;

        let mut symbols: Vec<String> = contracts
            .into_iter()
            .filter(|c| c.symbol_status.is_empty() || c.symbol_status == "normal")
            .filter(|c| c.symbol.ends_with("USDT"))
            .map(|c| c.symbol)
            .collect();
        symbols.sort();
        Ok(symbols)
    }
}
