/// Errors raised while fetching and decoding a JSON resource.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server error (HTTP {status}): {body}")]
    Status { status: u16, body: String },

    #[error("JSON decoding error: {source}. Response: {body}")]
    Decode {
        #[source]
        source: serde_json::Error,
        body: String,
    },
}
