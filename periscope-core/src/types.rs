pub mod greeks;
pub mod options_chain;
pub mod snapshot_request;

// Re-export common types
pub use greeks::Greeks;
pub use options_chain::{ContractDetails, LastQuote, LastTrade, OptionContract, SnapshotResponse};
pub use snapshot_request::{ContractType, FilterValue, ParseContractTypeError, SnapshotRequest};

/// Underlying equity symbol (e.g., "AAPL", "SPY")
pub type UnderlyingTicker = String;
