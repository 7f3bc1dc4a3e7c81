//! Error type shared by the client and the response models.

use thiserror::Error;

/// Errors returned by ZeroBounce operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The HTTP request failed (connection error, timeout, body read).
    #[error("{operation} request failed: {source}")]
    Request {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The configured base URL could not be parsed.
    #[error("{operation}: invalid base URL: {source}")]
    InvalidUrl {
        operation: &'static str,
        #[source]
        source: url::ParseError,
    },

    /// The service answered with a zero-length body.
    #[error("empty body response received from service")]
    EmptyResponse,

    /// The body was not a JSON object.
    #[error("could not decode response body {body:?}: {source}")]
    ResponseParse {
        body: String,
        #[source]
        source: serde_json::Error,
    },

    /// The service reported `-1` credits.
    #[error("cannot retrieve credit budget at this moment (-1)")]
    CreditsUnavailable,

    /// Text of the `error` field of a decoded response.
    #[error("{0}")]
    Service(String),

    /// The underlying HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),

    /// No API key was found in the environment.
    #[error("missing API key: set {var}", var = crate::client::API_KEY_ENV)]
    MissingApiKey,
}
