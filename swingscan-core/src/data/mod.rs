//! Data sources: provider traits, Bitget client, synthetic fallback.

pub mod bitget;
pub mod circuit_breaker;
pub mod provider;
pub mod synthetic;

pub use bitget::BitgetPerp;
pub use circuit_breaker::CircuitBreaker;
pub use provider::{InstrumentCatalog, MarketDataError, MarketDataSource};
pub use synthetic::SyntheticSource;
