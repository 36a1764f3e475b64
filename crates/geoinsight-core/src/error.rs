// crates/geoinsight-core/src/error.rs
use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, GeoInsightError>;

/// Top-level error for everything the core can report.
#[derive(Debug, Error)]
pub enum GeoInsightError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Rejection of a search term before anything leaves the controller.
///
/// The `Display` text is the message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Nothing but whitespace. The controller treats this as a silent no-op.
    #[error("Please enter a country name")]
    Empty,

    #[error("Please enter at least 2 characters")]
    TooShort,

    #[error("Please enter a valid country name (letters only)")]
    InvalidCharacters,
}

/// Failures talking to the GeoInsight backend.
///
/// Every variant renders as a message that can be shown verbatim.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request timeout - please try again")]
    Timeout,

    #[error("Country not found - please check the spelling")]
    NotFound,

    #[error("Server error - please try again later")]
    Server,

    #[error("Service temporarily unavailable")]
    Unavailable,

    #[error("Error {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Network error - please check your connection")]
    Network,

    #[error("Invalid response from server: {0}")]
    Decode(String),

    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    #[error("Unexpected error occurred")]
    Unexpected,
}

impl ApiError {
    /// Maps a non-success HTTP status to the error shown to the user.
    ///
    /// `message` is the server-supplied explanation (or the reason phrase) and
    /// only surfaces for statuses without a dedicated message.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        match status {
            404 => ApiError::NotFound,
            500 => ApiError::Server,
            503 => ApiError::Unavailable,
            _ => ApiError::Status {
                status,
                message: message.into(),
            },
        }
    }
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if let Some(status) = err.status() {
            ApiError::from_status(
                status.as_u16(),
                status.canonical_reason().unwrap_or_default(),
            )
        } else if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else if err.is_connect() || err.is_request() {
            ApiError::Network
        } else {
            ApiError::Unexpected
        }
    }
}
