use thiserror::Error;

/// Errors returned by the Storefront API client.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Network, TLS or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The response body did not match the GraphQL envelope for the query.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The API answered with top-level `errors` and no `data`.
    #[error("GraphQL error: {0}")]
    GraphQl(String),

    #[error("invalid storefront endpoint \"{endpoint}\": {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
}
