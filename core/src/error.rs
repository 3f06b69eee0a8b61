//! Structured error types for aitutor
//!
//! Provides type-safe error handling with user-friendly messages
//! for everything the binary can surface to the terminal.

use std::time::Duration;
use thiserror::Error;

/// Primary error type for aitutor operations
#[derive(Error, Debug)]
pub enum TutorError {
    // =========================================================================
    // Expression Evaluation Errors
    // =========================================================================
    /// Input contained characters outside the arithmetic allow-set
    #[error("invalid characters in expression")]
    InvalidExpression,

    /// Division by zero during evaluation
    #[error("division by zero")]
    DivisionByZero,

    /// Expression passed the character gate but could not be evaluated
    #[error("evaluation failed: {message}")]
    EvaluationFailed { message: String },

    // =========================================================================
    // Provider / API Errors
    // =========================================================================
    /// Authentication/authorization errors
    #[error("unauthorized: {message}")]
    Unauthorized { message: String },

    /// Rate limit exceeded (429)
    #[error("rate limit exceeded")]
    RateLimitExceeded { retry_after: Option<Duration> },

    /// Provider returned an error
    #[error("provider error: {status} - {message}")]
    ProviderError { status: u16, message: String },

    // =========================================================================
    // Tool Execution Errors
    // =========================================================================
    /// Tool not found
    #[error("tool not found: {tool_name}")]
    ToolNotFound { tool_name: String },

    /// Tool execution failed
    #[error("tool execution failed: {tool_name} - {error}")]
    ToolExecutionFailed { tool_name: String, error: String },

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid configuration
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Missing required config (API key, model, ...)
    #[error("missing required configuration: {key}")]
    MissingConfig { key: String },

    // =========================================================================
    // User Input Errors
    // =========================================================================
    /// Unknown guide page or other bad user input
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    // =========================================================================
    // Network / System Errors
    // =========================================================================
    /// Network/connection error
    #[error("connection failed: {message}")]
    ConnectionFailed { message: String },

    /// Timeout
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: Duration },

    /// Agent loop safety limit reached
    #[error("agent stopped: {reason}")]
    AgentStopped { reason: String },

    // =========================================================================
    // External Error Wrappers
    // =========================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("HTTP error: {0}")]
    Http(String),
}

impl TutorError {
    /// Check if error is retryable (transient)
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::ConnectionFailed { .. } => true,
            Self::Timeout { .. } => true,
            Self::RateLimitExceeded { .. } => true,

            // Provider errors - depends on status
            Self::ProviderError { status, .. } => matches!(status, 429 | 500 | 502 | 503 | 504),

            Self::Io(io_err) => matches!(
                io_err.kind(),
                std::io::ErrorKind::Interrupted
                    | std::io::ErrorKind::WouldBlock
                    | std::io::ErrorKind::TimedOut
            ),

            // Never retry these
            Self::InvalidExpression
            | Self::DivisionByZero
            | Self::EvaluationFailed { .. }
            | Self::Unauthorized { .. }
            | Self::ToolNotFound { .. }
            | Self::ToolExecutionFailed { .. }
            | Self::InvalidConfig { .. }
            | Self::MissingConfig { .. }
            | Self::InvalidInput { .. }
            | Self::AgentStopped { .. }
            | Self::Json { .. }
            | Self::Http { .. } => false,
        }
    }

    /// Get suggested retry delay for retryable errors
    pub fn retry_delay(&self) -> Option<Duration> {
        match self {
            Self::RateLimitExceeded { retry_after } => {
                Some(retry_after.unwrap_or(Duration::from_secs(5)))
            }
            Self::Timeout { .. } => Some(Duration::from_secs(1)),
            Self::ConnectionFailed { .. } => Some(Duration::from_secs(2)),
            _ => None,
        }
    }

    /// Check if error requires user action before anything can proceed
    pub fn requires_user_action(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized { .. } | Self::InvalidConfig { .. } | Self::MissingConfig { .. }
        )
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidExpression => {
                "The expression contains characters outside 0-9 + - * / ( ) . and space."
                    .to_string()
            }
            Self::DivisionByZero => "Cannot divide by zero.".to_string(),
            Self::Unauthorized { .. } => {
                "Authentication failed. Please check your API key.".to_string()
            }
            Self::MissingConfig { key } => {
                format!("Missing configuration '{}'. Run with a configured environment.", key)
            }
            Self::ToolExecutionFailed { tool_name, .. } => {
                format!("Failed to execute tool '{}'.", tool_name)
            }
            _ => self.to_string(),
        }
    }
}

/// Convert from anyhow::Error to TutorError
impl From<anyhow::Error> for TutorError {
    fn from(err: anyhow::Error) -> Self {
        if let Some(io_err) = err.downcast_ref::<std::io::Error>() {
            return Self::Io(std::io::Error::new(io_err.kind(), io_err.to_string()));
        }

        Self::Http(err.to_string())
    }
}

/// Convert from serde_json::Error to TutorError
impl From<serde_json::Error> for TutorError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<reqwest::Error> for TutorError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return Self::Timeout {
                duration: Duration::from_secs(0),
            };
        }
        if err.is_connect() {
            return Self::ConnectionFailed {
                message: err.to_string(),
            };
        }
        Self::Http(err.to_string())
    }
}

/// Result type alias using TutorError
pub type Result<T> = std::result::Result<T, TutorError>;

/// Extension trait for converting Option to Result with TutorError
pub trait OptionExt<T> {
    fn ok_or_missing(self, key: impl Into<String>) -> Result<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_missing(self, key: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| TutorError::MissingConfig { key: key.into() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(TutorError::Timeout {
            duration: Duration::from_secs(30)
        }
        .is_retryable());

        assert!(TutorError::ConnectionFailed {
            message: "timeout".to_string()
        }
        .is_retryable());

        assert!(TutorError::ProviderError {
            status: 503,
            message: "maintenance".to_string()
        }
        .is_retryable());

        assert!(!TutorError::DivisionByZero.is_retryable());
        assert!(!TutorError::InvalidExpression.is_retryable());
        assert!(!TutorError::Unauthorized {
            message: "bad token".to_string()
        }
        .is_retryable());
    }

    #[test]
    fn test_retry_delay() {
        let err = TutorError::RateLimitExceeded {
            retry_after: Some(Duration::from_secs(12)),
        };
        assert_eq!(err.retry_delay(), Some(Duration::from_secs(12)));

        let err = TutorError::RateLimitExceeded { retry_after: None };
        assert_eq!(err.retry_delay(), Some(Duration::from_secs(5)));

        assert_eq!(TutorError::DivisionByZero.retry_delay(), None);
    }

    #[test]
    fn test_user_messages() {
        let err = TutorError::MissingConfig {
            key: "OPENAI_API_KEY".to_string(),
        };
        assert!(err.user_message().contains("OPENAI_API_KEY"));
        assert!(err.requires_user_action());

        assert!(TutorError::DivisionByZero.user_message().contains("zero"));
    }

    #[test]
    fn test_option_ext() {
        let opt: Option<i32> = None;
        let result = opt.ok_or_missing("api_key");
        assert!(matches!(result, Err(TutorError::MissingConfig { .. })));
    }
}
