//! Constants for the client (endpoints, timeouts, wire names).

/// Default service base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.example-service.com";

/// Path prefix every operation lives under.
pub const API_PREFIX: &str = "api";

/// Default HTTP connect timeout (30 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default HTTP read timeout (5 minutes for large archive exports).
pub const READ_TIMEOUT_SECS: u64 = 300;

/// Prefix for download staging files.
pub const TEMP_FILE_PREFIX: &str = "tms-download-";

/// Query flag asking the service for JSON instead of XML responses.
pub(crate) const JSON_FLAG: (&str, &str) = ("json", "true");

/// Query keys owned by the client. Caller parameters never override them.
pub(crate) const RESERVED_QUERY_KEYS: &[&str] = &["json", "key", "login", "account-key"];
