use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// A single field-level message from a 400/422 response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Fieldless discriminant of [`FavroError`], handy for matching in callers and tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Unauthenticated,
    NoOrganizationSelected,
    OrganizationMismatch,
    NotFound,
    Forbidden,
    ValidationFailed,
    RateLimited,
    ServerError,
    TransportError,
    ConfigCorrupt,
}

/// Error type for every core operation (closed set)
#[derive(Debug)]
pub enum FavroError {
    /// No usable token, or the remote rejected it (401)
    Unauthenticated {
        status: Option<u16>,
        message: String,
    },
    /// An organization-scoped operation was requested without an organization
    NoOrganizationSelected,
    /// The board does not belong to the organization it was selected under
    OrganizationMismatch {
        board_id: String,
        expected: String,
        actual: String,
    },
    /// Remote returned 404, or a lookup over a listing found no match (no status)
    NotFound {
        status: Option<u16>,
        message: String,
    },
    /// Remote returned 403
    Forbidden { status: u16, message: String },
    /// Remote returned 400/422, a response could not be parsed, or an input was rejected locally
    ValidationFailed {
        status: Option<u16>,
        message: String,
        fields: Vec<FieldError>,
    },
    /// Remote kept returning 429 until the retry budget ran out
    RateLimited {
        status: u16,
        message: String,
        retry_after: Option<Duration>,
    },
    /// Remote returned 5xx (or an unexpected non-2xx) until the retry budget ran out
    ServerError { status: u16, message: String },
    /// Network failure: timeout, connection reset, DNS, TLS
    TransportError {
        message: String,
        source: Option<reqwest::Error>,
    },
    /// Local config file unreadable, unparsable or unwritable
    ConfigCorrupt { path: PathBuf, message: String },
}

impl FavroError {
    /// Build a transport error without an underlying reqwest error
    pub fn transport(message: impl Into<String>) -> Self {
        FavroError::TransportError {
            message: message.into(),
            source: None,
        }
    }

    /// Build a local validation error (no remote status)
    pub fn invalid(message: impl Into<String>) -> Self {
        FavroError::ValidationFailed {
            status: None,
            message: message.into(),
            fields: Vec::new(),
        }
    }

    /// Build a not-found error for a lookup that matched nothing locally
    pub fn not_found(message: impl Into<String>) -> Self {
        FavroError::NotFound {
            status: None,
            message: message.into(),
        }
    }

    /// Build a config error for the given path
    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        FavroError::ConfigCorrupt {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            FavroError::Unauthenticated { .. } => ErrorKind::Unauthenticated,
            FavroError::NoOrganizationSelected => ErrorKind::NoOrganizationSelected,
            FavroError::OrganizationMismatch { .. } => ErrorKind::OrganizationMismatch,
            FavroError::NotFound { .. } => ErrorKind::NotFound,
            FavroError::Forbidden { .. } => ErrorKind::Forbidden,
            FavroError::ValidationFailed { .. } => ErrorKind::ValidationFailed,
            FavroError::RateLimited { .. } => ErrorKind::RateLimited,
            FavroError::ServerError { .. } => ErrorKind::ServerError,
            FavroError::TransportError { .. } => ErrorKind::TransportError,
            FavroError::ConfigCorrupt { .. } => ErrorKind::ConfigCorrupt,
        }
    }

    /// Remote HTTP status that produced this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            FavroError::Unauthenticated { status, .. }
            | FavroError::NotFound { status, .. }
            | FavroError::ValidationFailed { status, .. } => *status,
            FavroError::Forbidden { status, .. }
            | FavroError::RateLimited { status, .. }
            | FavroError::ServerError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Process exit code: 2 for authentication failures, 1 otherwise
    pub fn exit_code(&self) -> i32 {
        match self {
            FavroError::Unauthenticated { .. } => 2,
            _ => 1,
        }
    }
}

impl fmt::Display for FavroError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FavroError::Unauthenticated {
                status: Some(status),
                message,
            } => write!(f, "Not authenticated (status {}): {}", status, message),
            FavroError::Unauthenticated {
                status: None,
                message,
            } => write!(f, "Not authenticated: {}", message),
            FavroError::NoOrganizationSelected => write!(
                f,
                "No organization selected. Run 'favroctl org select <id>' or pass --org."
            ),
            FavroError::OrganizationMismatch {
                board_id,
                expected,
                actual,
            } => write!(
                f,
                "Board '{}' belongs to organization '{}', not '{}'",
                board_id, actual, expected
            ),
            FavroError::NotFound {
                status: Some(status),
                message,
            } => write!(f, "Not found (status {}): {}", status, message),
            FavroError::NotFound {
                status: None,
                message,
            } => write!(f, "Not found: {}", message),
            FavroError::Forbidden { status, message } => {
                write!(f, "Forbidden (status {}): {}", status, message)
            }
            FavroError::ValidationFailed {
                status,
                message,
                fields,
            } => {
                match status {
                    Some(status) => write!(f, "Validation failed (status {}): {}", status, message)?,
                    None => write!(f, "Validation failed: {}", message)?,
                }
                for field in fields {
                    write!(f, "\n  {}: {}", field.field, field.message)?;
                }
                Ok(())
            }
            FavroError::RateLimited {
                status,
                message,
                retry_after,
            } => {
                write!(f, "Rate limited (status {}): {}", status, message)?;
                if let Some(after) = retry_after {
                    write!(f, " (retry after {}s)", after.as_secs())?;
                }
                Ok(())
            }
            FavroError::ServerError { status, message } => {
                write!(f, "Server error (status {}): {}", status, message)
            }
            FavroError::TransportError { message, .. } => {
                write!(f, "HTTP request failed: {}", message)
            }
            FavroError::ConfigCorrupt { path, message } => {
                write!(f, "Configuration error in {}: {}", path.display(), message)
            }
        }
    }
}

impl std::error::Error for FavroError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FavroError::TransportError {
                source: Some(e), ..
            } => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for FavroError {
    fn from(err: reqwest::Error) -> Self {
        FavroError::TransportError {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl From<serde_json::Error> for FavroError {
    fn from(err: serde_json::Error) -> Self {
        FavroError::invalid(format!("Malformed response: {}", err))
    }
}

/// Result type alias for Favro operations
pub type Result<T> = std::result::Result<T, FavroError>;
