use thiserror::Error;

/// Structural problems found while decoding an encoded polyline.
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum DecodeError {
    #[error("Polyline ends mid-value at byte {0}")]
    Truncated(usize),
    #[error("Polyline byte {byte:#04x} at offset {offset} is outside the encoding alphabet")]
    InvalidCharacter { offset: usize, byte: u8 },
    #[error("Polyline value starting at byte {0} does not fit in 32 bits")]
    Overflow(usize),
    #[error("Polyline point {0} lies outside valid latitude/longitude ranges")]
    OutOfRange(usize),
}

/// Failure to get any HTTP response at all.
#[derive(Error, Debug)]
#[error("{message}{}", timeout_note(.timed_out))]
pub struct TransportError {
    pub message: String,
    pub timed_out: bool,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timed_out: false,
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timed_out: true,
        }
    }
}

fn timeout_note(timed_out: &bool) -> &'static str {
    if *timed_out { " (timed out)" } else { "" }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        Self {
            timed_out: err.is_timeout(),
            message: err.to_string(),
        }
    }
}

/// Errors raised by the place-search and routing clients.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("No Google Maps API key is configured")]
    Configuration,
    #[error("Location query must not be empty")]
    Validation,
    #[error("No place matched {0:?}")]
    NotFound(String),
    #[error("Service returned HTTP {status}: {body}")]
    Service { status: u16, body: String },
    #[error("Request failed: {0}")]
    Network(#[from] TransportError),
    #[error("Unexpected response body: {0}")]
    MalformedResponse(String),
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::MalformedResponse(err.to_string())
    }
}

/// Loading a candidate list produced no drawable route.
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
#[error("None of the {candidates} route candidates could be decoded")]
pub struct EmptyResultError {
    pub candidates: usize,
}

/// A route index outside the loaded set.
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
#[error("Route index {index} is out of range for {len} routes")]
pub struct IndexError {
    pub index: usize,
    pub len: usize,
}
