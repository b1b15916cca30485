use thiserror::Error;

/// Failure taxonomy for the API client.
///
/// The client is the only layer that classifies raw transport/HTTP outcomes;
/// controllers turn a kind into a human-readable message via `Display` and
/// never inspect status codes themselves. No kind is fatal; every failure is
/// recoverable by retrying the operation.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The configured base URL did not parse; raised at construction time,
    /// never after a request went out.
    #[error("invalid server URL: {0}")]
    InvalidUrl(String),

    /// A success response arrived with an empty body where one was expected.
    #[error("empty response from server")]
    NoData,

    /// A success response carried a body that failed to decode.
    #[error("failed to decode server response: {0}")]
    Decoding(#[source] serde_json::Error),

    /// No token is stored, or the server rejected the one we sent. The only
    /// kind with a side effect: a 401 clears the stored token.
    #[error("authentication required or session expired; run `peerctl login`")]
    Unauthorized,

    /// The server reported a failure; `Display` is exactly the server's
    /// message so controllers can surface it verbatim.
    #[error("{0}")]
    Server(String),

    /// DNS, timeout, connection reset, and other transport failures.
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// A response that fits no expected shape, e.g. an unconsumed redirect.
    #[error("unexpected response from server")]
    InvalidResponse,
}

impl ApiError {
    /// Maps a reqwest transport error onto the taxonomy.
    pub(crate) fn transport(err: reqwest::Error) -> Self {
        if err.is_builder() {
            return ApiError::InvalidUrl(err.to_string());
        }
        ApiError::Network(err)
    }
}
