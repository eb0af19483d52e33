//! Error types for cross-origin requests.
//!
//! # Design
//! The `Display` text of each variant is the exact line written to the log
//! sink when the callback API hits that failure. `Transport` deliberately
//! carries no detail: the cause of a network failure is not surfaced.

/// Why a request did not produce a JSON value.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// No transport capable of cross-origin requests is available.
    #[error("cross-origin requests unsupported in this environment")]
    Unsupported,

    /// The exchange failed below HTTP (connection refused, reset, DNS, ...).
    #[error("there was an error making the request")]
    Transport,

    /// The response body was not valid JSON.
    #[error("could not decode response body as JSON: {0}")]
    Decode(#[from] serde_json::Error),

    /// The transport was dropped before reaching a terminal state.
    #[error("request was abandoned before completing")]
    Abandoned,
}
