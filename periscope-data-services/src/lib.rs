pub mod error;
pub mod snapshot;

// Re-export commonly used items
pub use error::{PeriscopeError, Result};
pub use snapshot::{
    load_config, load_config_from, print_options_chain, ChainFormatter, Config, HttpReply,
    HttpTransport, MassiveClient, SnapshotTransport, Url,
};
