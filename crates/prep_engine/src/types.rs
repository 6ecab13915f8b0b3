use std::fmt;

use prep_core::{ActivationId, HealthStatus, InterviewRecord, LoadError, LoadErrorKind};

use crate::DecodeError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    FetchCompleted {
        activation: ActivationId,
        result: Result<InterviewRecord, FetchError>,
    },
    HealthChecked(Result<HealthStatus, FetchError>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Collapses the transport taxonomy into what the page state machine shows.
    pub fn to_load_error(&self) -> LoadError {
        let kind = match &self.kind {
            FailureKind::HttpStatus(code) => LoadErrorKind::HttpStatus(*code),
            FailureKind::Decode(_) | FailureKind::TooLarge { .. } => LoadErrorKind::Decode,
            FailureKind::Timeout => LoadErrorKind::Timeout,
            FailureKind::InvalidUrl | FailureKind::Network => LoadErrorKind::Network,
        };
        LoadError::new(kind, self.message.clone())
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for FetchError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    Network,
    Timeout,
    HttpStatus(u16),
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Decode(DecodeError),
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Decode(err) => write!(f, "decode error ({err})"),
        }
    }
}
