//! Error types for sleepiq.
//!
//! Uses `thiserror` for a single structured error type shared by every
//! operation on the client.
//!
//! ## Error Taxonomy
//!
//! - **Precondition**: the session an operation needs is not logged in
//! - **Validation**: a caller-supplied parameter is outside its allowed values
//! - **Transport**: building, sending or reading an HTTP request failed
//! - **Decode**: the response body is not JSON or does not match its shape
//! - **Service**: the vendor reported an error in the embedded `Error` object
//! - **Configuration**: client configuration could not be loaded or is invalid
//!
//! Precondition and validation errors are always raised before any network
//! traffic. Each error has a stable code (e.g. `SIQ-S001`) for programmatic
//! handling.

use std::fmt;

use thiserror::Error;

// =============================================================================
// Error Categories
// =============================================================================

/// High-level error categories for classification and routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Required session not authenticated.
    Precondition,
    /// Caller-supplied parameter out of range.
    Validation,
    /// Connection, timeout or read failure.
    Transport,
    /// Response body could not be decoded.
    Decode,
    /// Vendor returned a non-zero error code.
    Service,
    /// Configuration file or values are invalid.
    Configuration,
}

impl ErrorCategory {
    /// Returns a human-readable description of the category.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Precondition => "Precondition error",
            Self::Validation => "Validation error",
            Self::Transport => "Transport error",
            Self::Decode => "Decode error",
            Self::Service => "Service error",
            Self::Configuration => "Configuration error",
        }
    }

    /// Returns a short code prefix for this category.
    #[must_use]
    pub const fn code_prefix(&self) -> &'static str {
        match self {
            Self::Precondition => "A",
            Self::Validation => "V",
            Self::Transport => "N",
            Self::Decode => "D",
            Self::Service => "S",
            Self::Configuration => "C",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Which of the two independent sessions an operation needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionKind {
    /// Session-key + cookie session against the bed API.
    Primary,
    /// Bearer-token session against the Insights API.
    Insights,
}

impl SessionKind {
    /// Name of the login operation that opens this session.
    #[must_use]
    pub const fn login_operation(self) -> &'static str {
        match self {
            Self::Primary => "login",
            Self::Insights => "insights_login",
        }
    }
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => write!(f, "SleepIQ"),
            Self::Insights => write!(f, "Insights"),
        }
    }
}

// =============================================================================
// Error Type
// =============================================================================

/// Main error type for sleepiq operations.
#[derive(Error, Debug)]
pub enum SleepIqError {
    // ==========================================================================
    // Precondition errors
    // ==========================================================================
    /// The session required by the operation has not been logged in.
    #[error("user is not logged in to {session}; call {} and try again", .session.login_operation())]
    NotLoggedIn { session: SessionKind },

    // ==========================================================================
    // Validation errors
    // ==========================================================================
    /// A caller-supplied parameter is outside its allowed values.
    #[error("parameter '{name}' {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    // ==========================================================================
    // Transport errors
    // ==========================================================================
    /// The HTTP request could not be built, sent or read.
    #[error("unable to {operation}: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },

    // ==========================================================================
    // Decode errors
    // ==========================================================================
    /// The response body was not the expected JSON shape.
    #[error("could not read {operation} response: {source}")]
    Decode {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },

    // ==========================================================================
    // Service errors
    // ==========================================================================
    /// The vendor reported an application-level error.
    #[error("{operation} failed - error #{code}: {message}")]
    Service {
        operation: &'static str,
        code: i64,
        message: String,
    },

    // ==========================================================================
    // Configuration errors
    // ==========================================================================
    /// Invalid configuration value or client setup.
    #[error("configuration error: {0}")]
    Config(String),

    /// Error parsing the configuration file.
    #[error("config parse error at {path}: {message}")]
    ConfigParse { path: String, message: String },

    /// I/O operation failed while reading configuration.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SleepIqError {
    /// Build a validation error.
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Returns the error category for classification and routing.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::NotLoggedIn { .. } => ErrorCategory::Precondition,
            Self::InvalidParameter { .. } => ErrorCategory::Validation,
            Self::Transport { .. } => ErrorCategory::Transport,
            Self::Decode { .. } => ErrorCategory::Decode,
            Self::Service { .. } => ErrorCategory::Service,
            Self::Config(_) | Self::ConfigParse { .. } | Self::Io(_) => {
                ErrorCategory::Configuration
            }
        }
    }

    /// Returns a stable error code for programmatic handling.
    ///
    /// Format: `SIQ-{category}{number}`.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotLoggedIn { .. } => "SIQ-A001",
            Self::InvalidParameter { .. } => "SIQ-V001",
            Self::Transport { .. } => "SIQ-N001",
            Self::Decode { .. } => "SIQ-D001",
            Self::Service { .. } => "SIQ-S001",
            Self::Config(_) => "SIQ-C001",
            Self::ConfigParse { .. } => "SIQ-C002",
            Self::Io(_) => "SIQ-C003",
        }
    }

    /// Returns true if the error was raised before any network call.
    #[must_use]
    pub const fn is_local(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Precondition | ErrorCategory::Validation | ErrorCategory::Configuration
        )
    }

    /// The vendor error code, for service errors.
    #[must_use]
    pub const fn service_code(&self) -> Option<i64> {
        match self {
            Self::Service { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// Result type alias for sleepiq operations.
pub type Result<T> = std::result::Result<T, SleepIqError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_logged_in_names_the_login_call() {
        let err = SleepIqError::NotLoggedIn {
            session: SessionKind::Insights,
        };
        let msg = err.to_string();
        assert!(msg.contains("Insights"), "got: {msg}");
        assert!(msg.contains("insights_login"), "got: {msg}");
        assert_eq!(err.category(), ErrorCategory::Precondition);
        assert!(err.is_local());
    }

    #[test]
    fn service_error_carries_code_and_message() {
        let err = SleepIqError::Service {
            operation: "login",
            code: 401,
            message: "Invalid credentials".to_string(),
        };
        assert_eq!(err.to_string(), "login failed - error #401: Invalid credentials");
        assert_eq!(err.service_code(), Some(401));
        assert_eq!(err.error_code(), "SIQ-S001");
        assert!(!err.is_local());
    }

    #[test]
    fn invalid_parameter_message() {
        let err = SleepIqError::invalid("side", "must be 'left' or 'right'");
        assert_eq!(err.to_string(), "parameter 'side' must be 'left' or 'right'");
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn decode_error_category() {
        let source = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = SleepIqError::Decode {
            operation: "beds",
            source,
        };
        assert_eq!(err.category(), ErrorCategory::Decode);
        assert!(err.to_string().starts_with("could not read beds response"));
    }

    #[test]
    fn error_codes_use_category_prefix() {
        let errors = [
            SleepIqError::NotLoggedIn {
                session: SessionKind::Primary,
            },
            SleepIqError::invalid("duration", "out of range"),
            SleepIqError::Config("bad".to_string()),
        ];
        for err in errors {
            let prefix = format!("SIQ-{}", err.category().code_prefix());
            assert!(err.error_code().starts_with(&prefix), "{}", err.error_code());
        }
    }
}
