//! Error types for the client.
//!
//! Every operation returns `Result<T, ApiError>`. The variants keep service
//! failures (a well-formed `{success:false}` body) apart from transport
//! failures, so callers can tell infrastructure problems from rejected
//! requests.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building a [`ClientConfig`](crate::ClientConfig) or
/// before a request is sent.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Neither an API key nor a login/account-key pair was supplied.
    #[error("no credentials supplied: set either an API key or a login/account-key pair")]
    MissingCredentials,

    /// Both credential forms were supplied.
    #[error("conflicting credentials: an API key and a login/account-key pair were both supplied")]
    ConflictingCredentials,

    /// The project identifier is missing or empty.
    #[error("project identifier is required")]
    MissingProject,

    /// The base URL does not parse as an absolute URL.
    #[error("invalid base URL: {url}")]
    InvalidBaseUrl {
        /// The rejected value.
        url: String,
    },

    /// A timeout value of zero was configured.
    #[error("invalid value for `{field}`: timeouts must be greater than zero")]
    InvalidTimeout {
        /// The offending field name.
        field: &'static str,
    },

    /// An account-level operation was called with a project API key.
    #[error("operation `{operation}` requires login/account-key credentials")]
    AccountCredentialsRequired {
        /// The operation that was refused.
        operation: &'static str,
    },
}

/// Failure object embedded in a `{ "success": false, "error": {..} }` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceError {
    /// Service error code, kept as text whether it arrived as a number or a string.
    pub code: String,
    /// Human-readable message from the service.
    pub message: String,
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "service error {}: {}", self.code, self.message)
    }
}

impl std::error::Error for ServiceError {}

/// Errors that can occur during an API call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Client configuration is missing or contradictory.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The service answered with an explicit failure object.
    #[error(transparent)]
    Service(ServiceError),

    /// Network failure, or a non-2xx status without a service error body.
    #[error("transport error calling {endpoint}: {source}")]
    Transport {
        /// Endpoint path (never the full URL, which carries credentials).
        endpoint: String,
        /// The underlying HTTP client error, with its URL removed.
        #[source]
        source: reqwest::Error,
    },

    /// A streamed download ended with an error status and an unrecognized body.
    #[error("streaming error, status {status} from {endpoint}")]
    Streaming {
        /// Endpoint path.
        endpoint: String,
        /// The HTTP status code.
        status: u16,
    },

    /// Local file system error (temp file, upload source).
    #[error("IO error on {path}: {source}")]
    Io {
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A success response whose body is not JSON.
    #[error("invalid JSON response from {endpoint}: {source}")]
    Decode {
        /// Endpoint path.
        endpoint: String,
        /// The parse failure.
        #[source]
        source: serde_json::Error,
    },

    /// A required identifier was empty.
    #[error("missing required parameter `{0}`")]
    MissingParameter(&'static str),

    /// A multipart field name (usually a logical file path) that cannot be
    /// written into a part header.
    #[error("invalid form field name {0:?}: quotes and line breaks are not allowed")]
    InvalidFieldName(String),

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

impl ApiError {
    /// Creates a service error from its code and message.
    pub fn service(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Service(ServiceError {
            code: code.into(),
            message: message.into(),
        })
    }

    /// Creates a transport error, stripping the credential-bearing URL.
    pub fn transport(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Transport {
            endpoint: endpoint.into(),
            source: source.without_url(),
        }
    }

    /// Creates a streaming error for an unrecognized error body.
    pub fn streaming(endpoint: impl Into<String>, status: u16) -> Self {
        Self::Streaming {
            endpoint: endpoint.into(),
            status,
        }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a decode error.
    pub fn decode(endpoint: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            endpoint: endpoint.into(),
            source,
        }
    }

    /// Returns the embedded service failure, if this is one.
    #[must_use]
    pub fn as_service(&self) -> Option<&ServiceError> {
        match self {
            Self::Service(err) => Some(err),
            _ => None,
        }
    }

    /// Returns the HTTP status when one is known.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { source, .. } => source.status().map(|s| s.as_u16()),
            Self::Streaming { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// No `From<reqwest::Error>` or `From<std::io::Error>`: both variants need
// context (endpoint, path) the source errors don't carry.

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_display_embeds_code_and_message() {
        let error = ApiError::service("8", "File was not found");
        let msg = error.to_string();
        assert!(msg.contains('8'), "Expected code in: {msg}");
        assert!(msg.contains("File was not found"), "Expected message in: {msg}");
        assert_eq!(error.as_service().unwrap().code, "8");
    }

    #[test]
    fn test_streaming_error_display_contains_status() {
        let error = ApiError::streaming("project/demo/download/all.zip", 404);
        let msg = error.to_string();
        assert!(msg.contains("streaming error"), "Expected prefix in: {msg}");
        assert!(msg.contains("404"), "Expected '404' in: {msg}");
        assert_eq!(error.status(), Some(404));
    }

    #[test]
    fn test_io_error_display() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let error = ApiError::io(PathBuf::from("/tmp/strings.xml"), io_error);
        assert!(error.to_string().contains("/tmp/strings.xml"));
        assert!(error.as_service().is_none());
    }

    #[test]
    fn test_config_error_wraps_with_prefix() {
        let error = ApiError::from(ConfigError::ConflictingCredentials);
        let msg = error.to_string();
        assert!(msg.starts_with("configuration error"), "got: {msg}");
        assert!(msg.contains("conflicting"), "got: {msg}");
    }

    #[test]
    fn test_missing_parameter_names_field() {
        let error = ApiError::MissingParameter("language");
        assert_eq!(error.to_string(), "missing required parameter `language`");
    }

    #[test]
    fn test_account_required_names_operation() {
        let error = ConfigError::AccountCredentialsRequired {
            operation: "list_projects",
        };
        assert!(error.to_string().contains("list_projects"));
    }
}
