//! Error types for the MRPC icon manager.
//!
//! Every fallible operation inside the crate returns [`MrpcError`]. Nothing is
//! propagated past the interface boundary: the gallery loader and the upload
//! flow turn errors into notifications at the point of detection.

use thiserror::Error;

/// Main error type for the icon manager.
#[derive(Debug, Error)]
pub enum MrpcError {
    /// The HTTP request could not be completed (DNS, connect, TLS, reset).
    #[error("HTTP error: {message}")]
    Http {
        /// Human-readable error message.
        message: String,
        /// Optional underlying error source.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The remote service answered with an unexpected status code.
    #[error("Unexpected status {status}: {message}")]
    Status {
        /// HTTP status code returned by the service.
        status: u16,
        /// Human-readable error message.
        message: String,
    },

    /// A response body could not be interpreted.
    #[error("Decode error: {message}")]
    Decode {
        /// Human-readable error message.
        message: String,
        /// Optional underlying error source.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A local file could not be read.
    #[error("File error: {message}")]
    File {
        /// Human-readable error message.
        message: String,
        /// Actionable hint for the user.
        hint: Option<String>,
        /// Optional underlying error source.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration is missing or invalid.
    #[error("Config error: {message}")]
    Config {
        /// Human-readable error message.
        message: String,
        /// Actionable hint for the user.
        hint: Option<String>,
    },

    /// Unexpected internal error.
    #[error("Internal error: {message}")]
    Internal {
        /// Human-readable error message.
        message: String,
    },
}

impl MrpcError {
    // ========== Constructors ==========

    /// Create a new HTTP error.
    pub fn http(message: impl Into<String>) -> Self {
        Self::Http { message: message.into(), source: None }
    }

    /// Create a new HTTP error with source.
    pub fn http_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Http { message: message.into(), source: Some(Box::new(source)) }
    }

    /// Create a new status error.
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status { status, message: message.into() }
    }

    /// Create a new config error with a hint.
    pub fn config_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::Config { message: message.into(), hint: Some(hint.into()) }
    }

    /// Create a new internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal { message: message.into() }
    }

    // ========== Methods ==========

    /// Status code carried by this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Get the error category name.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Http { .. } => "Network",
            Self::Status { .. } => "Server",
            Self::Decode { .. } => "Response",
            Self::File { .. } => "File",
            Self::Config { .. } => "Config",
            Self::Internal { .. } => "Internal",
        }
    }

    /// Get actionable hint for the user.
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::Http { .. } => Some("Check your network connection"),
            Self::Status { .. } => Some("The remote service may be unavailable, try again later"),
            Self::Decode { .. } => Some("The remote service returned an unexpected payload"),
            Self::File { hint, .. } => hint.as_deref(),
            Self::Config { hint, .. } => hint.as_deref(),
            Self::Internal { .. } => Some("Please report this issue"),
        }
    }

    /// Convert to user-displayable error info.
    pub fn to_error_info(&self) -> ErrorInfo {
        let error_type = format!("{} Error", self.category());
        let message = self.to_string();
        let hint = self.hint().map(String::from);

        let technical_detail = match self {
            Self::Status { status, .. } => Some(format!("HTTP status: {status}")),
            Self::Http { source: Some(source), .. }
            | Self::Decode { source: Some(source), .. }
            | Self::File { source: Some(source), .. } => Some(source.to_string()),
            _ => None,
        };

        ErrorInfo { error_type, message, hint, technical_detail }
    }
}

/// User-displayable error information.
#[derive(Debug, Clone)]
pub struct ErrorInfo {
    /// Category name (e.g., "Network Error").
    pub error_type: String,
    /// User-friendly message.
    pub message: String,
    /// Actionable suggestion.
    pub hint: Option<String>,
    /// Technical detail for verbose output.
    pub technical_detail: Option<String>,
}

// ========== Error Conversions ==========

/// Convert from reqwest::Error to MrpcError.
impl From<reqwest::Error> for MrpcError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return MrpcError::Status { status: status.as_u16(), message: err.to_string() };
        }

        if err.is_decode() {
            return MrpcError::Decode { message: err.to_string(), source: Some(Box::new(err)) };
        }

        MrpcError::Http { message: err.to_string(), source: Some(Box::new(err)) }
    }
}

/// Convert from std::io::Error to MrpcError.
impl From<std::io::Error> for MrpcError {
    fn from(err: std::io::Error) -> Self {
        let hint = match err.kind() {
            std::io::ErrorKind::NotFound => Some("Check that the file exists".to_string()),
            std::io::ErrorKind::PermissionDenied => Some("Check file permissions".to_string()),
            _ => None,
        };
        MrpcError::File { message: err.to_string(), hint, source: Some(Box::new(err)) }
    }
}

/// Convert from serde_json::Error to MrpcError.
impl From<serde_json::Error> for MrpcError {
    fn from(err: serde_json::Error) -> Self {
        MrpcError::Decode { message: format!("JSON error: {err}"), source: Some(Box::new(err)) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_not_found_has_hint() {
        let err: MrpcError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file").into();
        assert_eq!(err.category(), "File");
        assert_eq!(err.hint(), Some("Check that the file exists"));
    }

    #[test]
    fn test_status_error_info() {
        let info = MrpcError::status(503, "listing unavailable").to_error_info();
        assert_eq!(info.error_type, "Server Error");
        assert_eq!(info.message, "Unexpected status 503: listing unavailable");
        assert_eq!(info.technical_detail.as_deref(), Some("HTTP status: 503"));
        assert!(info.hint.is_some());
    }

    #[test]
    fn test_json_error_is_decode() {
        let err: MrpcError = serde_json::from_str::<Vec<String>>("{").unwrap_err().into();
        assert_eq!(err.category(), "Response");
        assert!(err.to_string().starts_with("Decode error: JSON error"));
    }

    #[test]
    fn test_config_hint() {
        let err = MrpcError::config_with_hint("missing client id", "Set MRPC_CLIENT_ID");
        assert_eq!(err.hint(), Some("Set MRPC_CLIENT_ID"));
        assert_eq!(err.status_code(), None);
    }
}
