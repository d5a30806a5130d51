use thiserror::Error;

#[derive(Error, Debug)]
pub enum PeriscopeError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// Upstream answered with a status >= 400
    #[error("{status} {reason} for url: {url}")]
    Http {
        status: u16,
        reason: String,
        url: String,
        body: String,
    },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl PeriscopeError {
    /// Build the HTTP failure for a status code, worded the way the
    /// upstream's own clients report it ("404 Client Error: Not Found ...")
    pub fn http(status: u16, canonical_reason: Option<&str>, url: String, body: String) -> Self {
        let class = if status >= 500 { "Server Error" } else { "Client Error" };
        let reason = format!("{}: {}", class, canonical_reason.unwrap_or("Unknown"));
        PeriscopeError::Http {
            status,
            reason,
            url,
            body,
        }
    }

    /// Raw response body of an HTTP failure
    pub fn response_body(&self) -> Option<&str> {
        match self {
            PeriscopeError::Http { body, .. } => Some(body),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, PeriscopeError>;
