pub mod chain_formatter;
pub mod client;
pub mod config;
pub mod transport;

// Re-export commonly used items
pub use chain_formatter::{
    format_contract, print_options_chain, ChainFormatter, NOT_AVAILABLE, SEPARATOR_WIDTH,
};
pub use client::{redact_api_key, MassiveClient};
pub use config::{
    load_config, load_config_from, Config, API_KEY_VAR, BASE_URL_VAR, DEFAULT_BASE_URL,
};
pub use transport::{HttpReply, HttpTransport, SnapshotTransport, Url};
