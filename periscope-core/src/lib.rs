pub mod types;

// Re-export common types
pub use types::{
    ContractDetails, ContractType, FilterValue, Greeks, LastQuote, LastTrade, OptionContract,
    ParseContractTypeError, SnapshotRequest, SnapshotResponse,
};
