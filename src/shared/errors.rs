use thiserror::Error;

/// Fallback message when a failed response carries neither `error` nor `message`
pub const GENERIC_API_ERROR: &str = "API error";

/// Failure of a remote call, as surfaced to the component that issued it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// HTTP 401: missing, invalid or expired credentials
    #[error("{0}")]
    Unauthorized(String),

    /// Any other non-success status, with the server-provided message
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_session_expired(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized(_) => Some(401),
            ApiError::Rejected { status, .. } => Some(*status),
            ApiError::Transport(_) | ApiError::Decode(_) => None,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

/// Failure of the local key-value store
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("No signed-in user")]
    NoSession,
}

/// Why a teammate removal was refused before reaching the server
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemovalDenied {
    #[error("The project leader cannot be removed.")]
    TargetIsLeader,

    #[error("Only the project leader can remove teammates.")]
    NotPermitted,

    #[error("This project has no leader on record.")]
    NoLeader,
}

pub type Result<T> = std::result::Result<T, ApiError>;
