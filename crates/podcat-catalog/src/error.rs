use thiserror::Error;

/// Errors returned by the catalog API client.
///
/// Every fetch is attempted exactly once; callers decide whether a
/// failure is fatal, recorded, or tolerated. No variant is retriable
/// from inside this crate.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The request URL could not be built. Should not occur with valid
    /// numeric ids; kept as an explicit variant rather than a panic.
    #[error("invalid request URL for {context}: {reason}")]
    BadUrl { context: String, reason: String },

    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response whose body decoded as the API's structured
    /// error envelope. The envelope's message and code are surfaced in
    /// preference to a generic status error.
    #[error("API error {code} (HTTP {status}): {message}")]
    Api {
        status: u16,
        code: i64,
        message: String,
    },

    /// Non-2xx response without a decodable error envelope.
    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// A 2xx body that does not match the expected schema.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
