use thiserror::Error;

/// Result type for workflow operations.
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

/// Result type for record-store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Failures surfaced by the record store collaborator.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("short code already exists: {0}")]
    Conflict(String),
    #[error("no record for short code: {0}")]
    Missing(String),
    #[error("store backend unavailable: {0}")]
    Unavailable(String),
    #[error("store operation timed out: {0}")]
    Timeout(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
    #[error("store operation failed: {0}")]
    Operation(String),
}

/// Failures surfaced by the URL workflow.
///
/// Every failure is carried as tagged data; boundary layers map
/// [`ServiceError::outcome`] to a transport status and must never
/// inspect the display message.
#[derive(Debug, Clone, Error)]
pub enum ServiceError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("invalid short code: {0}")]
    InvalidShortcode(String),
    #[error("short code already exists: {0}")]
    ShortcodeExists(String),
    #[error("validity must be a positive number of minutes, got {0}")]
    InvalidValidity(i64),
    #[error("no short url for code: {0}")]
    NotFound(String),
    #[error("short url has expired: {0}")]
    Expired(String),
    #[error("unable to allocate a free short code after {attempts} attempts")]
    Unavailable { attempts: u32 },
    #[error("store error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Conflict(code) => Self::ShortcodeExists(code),
            other => Self::Store(other),
        }
    }
}

/// Stable outcome classes for the boundary layer.
///
/// Each error kind maps to exactly one outcome; the table below is the
/// single place where that mapping lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    InvalidInput,
    NotFound,
    Expired,
    Conflict,
    Unavailable,
    Internal,
}

impl ServiceError {
    /// Classifies this error into its boundary outcome.
    pub fn outcome(&self) -> Outcome {
        match self {
            Self::InvalidUrl(_) | Self::InvalidShortcode(_) | Self::InvalidValidity(_) => {
                Outcome::InvalidInput
            }
            Self::NotFound(_) => Outcome::NotFound,
            Self::Expired(_) => Outcome::Expired,
            Self::ShortcodeExists(_) => Outcome::Conflict,
            Self::Unavailable { .. } => Outcome::Unavailable,
            Self::Store(StoreError::Unavailable(_) | StoreError::Timeout(_)) => {
                Outcome::Unavailable
            }
            Self::Store(_) => Outcome::Internal,
        }
    }

    /// Whether a caller may meaningfully retry the same request.
    ///
    /// Only store unavailability/timeouts qualify; everything else is
    /// terminal without changing the input.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Store(StoreError::Unavailable(_) | StoreError::Timeout(_))
        )
    }
}
