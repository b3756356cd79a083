//! Client configuration and credential validation.
//!
//! [`ClientConfigBuilder`] mirrors the shape of an on-disk settings file: every
//! field is optional and `Deserialize`, so callers can load it from JSON (or
//! anything serde reads) and then call [`ClientConfigBuilder::build`] to get a
//! validated, immutable [`ClientConfig`].

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use url::Url;

use crate::constants::{CONNECT_TIMEOUT_SECS, DEFAULT_BASE_URL, READ_TIMEOUT_SECS};
use crate::error::ConfigError;

/// Credential material attached to every request.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Project API key, sent as `key=<api_key>`.
    ApiKey(String),
    /// Account-level credentials, sent as `login=<login>&account-key=<account_key>`.
    Account {
        /// Account login name.
        login: String,
        /// Account API key.
        account_key: String,
    },
}

impl Credentials {
    /// Query pairs to append to a request URL.
    pub(crate) fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        match self {
            Self::ApiKey(key) => vec![("key", key.as_str())],
            Self::Account { login, account_key } => {
                vec![("login", login.as_str()), ("account-key", account_key.as_str())]
            }
        }
    }

    /// True for login/account-key credentials.
    #[must_use]
    pub fn is_account(&self) -> bool {
        matches!(self, Self::Account { .. })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ApiKey(_) => f.debug_tuple("ApiKey").field(&"<redacted>").finish(),
            Self::Account { login, .. } => f
                .debug_struct("Account")
                .field("login", login)
                .field("account_key", &"<redacted>")
                .finish(),
        }
    }
}

/// Validated client configuration. Immutable once built.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_url: Url,
    credentials: Credentials,
    project_id: String,
    connect_timeout_secs: u64,
    read_timeout_secs: u64,
    download_dir: Option<PathBuf>,
}

impl ClientConfig {
    /// Starts a builder with default base URL and timeouts.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Service base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Credentials attached to every request.
    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Target project identifier.
    #[must_use]
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// HTTP connect timeout in seconds.
    #[must_use]
    pub fn connect_timeout_secs(&self) -> u64 {
        self.connect_timeout_secs
    }

    /// HTTP read timeout in seconds.
    #[must_use]
    pub fn read_timeout_secs(&self) -> u64 {
        self.read_timeout_secs
    }

    /// Directory for download staging files, or `None` for the OS temp dir.
    #[must_use]
    pub fn download_dir(&self) -> Option<&Path> {
        self.download_dir.as_deref()
    }
}

/// Unvalidated client settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfigBuilder {
    base_url: Option<String>,
    api_key: Option<String>,
    login: Option<String>,
    account_key: Option<String>,
    project_id: Option<String>,
    connect_timeout_secs: Option<u64>,
    read_timeout_secs: Option<u64>,
    download_dir: Option<PathBuf>,
}

impl ClientConfigBuilder {
    /// Overrides the service base URL.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Uses a project API key.
    #[must_use]
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Uses account-level login/account-key credentials.
    #[must_use]
    pub fn account(mut self, login: impl Into<String>, account_key: impl Into<String>) -> Self {
        self.login = Some(login.into());
        self.account_key = Some(account_key.into());
        self
    }

    /// Sets the target project identifier.
    #[must_use]
    pub fn project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    /// Sets the HTTP connect timeout.
    #[must_use]
    pub fn connect_timeout_secs(mut self, secs: u64) -> Self {
        self.connect_timeout_secs = Some(secs);
        self
    }

    /// Sets the HTTP read timeout.
    #[must_use]
    pub fn read_timeout_secs(mut self, secs: u64) -> Self {
        self.read_timeout_secs = Some(secs);
        self
    }

    /// Stages downloads in `dir` instead of the OS temp directory.
    #[must_use]
    pub fn download_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.download_dir = Some(dir.into());
        self
    }

    /// Validates the settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if no credential form or both forms are set,
    /// the project identifier is empty, the base URL is invalid, or a timeout
    /// is zero. A login without an account key (or the reverse) counts as a
    /// missing credential, even when an API key is also set.
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let api_key = non_empty(self.api_key);
        let account = match (non_empty(self.login), non_empty(self.account_key)) {
            (Some(login), Some(account_key)) => Some(Credentials::Account { login, account_key }),
            (None, None) => None,
            _ => return Err(ConfigError::MissingCredentials),
        };
        let credentials = match (api_key, account) {
            (Some(_), Some(_)) => return Err(ConfigError::ConflictingCredentials),
            (Some(key), None) => Credentials::ApiKey(key),
            (None, Some(account)) => account,
            (None, None) => return Err(ConfigError::MissingCredentials),
        };

        let project_id = non_empty(self.project_id).ok_or(ConfigError::MissingProject)?;

        let raw_base = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = Url::parse(raw_base.trim_end_matches('/'))
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| ConfigError::InvalidBaseUrl {
                url: raw_base.clone(),
            })?;

        let connect_timeout_secs = self.connect_timeout_secs.unwrap_or(CONNECT_TIMEOUT_SECS);
        if connect_timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout {
                field: "connect_timeout_secs",
            });
        }
        let read_timeout_secs = self.read_timeout_secs.unwrap_or(READ_TIMEOUT_SECS);
        if read_timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout {
                field: "read_timeout_secs",
            });
        }

        Ok(ClientConfig {
            base_url,
            credentials,
            project_id,
            connect_timeout_secs,
            read_timeout_secs,
            download_dir: self.download_dir,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
