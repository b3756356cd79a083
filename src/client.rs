//! Authenticated HTTP client for the service API.
//!
//! [`TmsClient`] owns one pooled `reqwest::Client` and an immutable
//! [`ClientConfig`]. Operation methods live in [`crate::operations`]; this
//! module supplies the three request shapes they share: JSON over GET, JSON
//! over multipart POST, and streamed download over GET.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use reqwest::multipart::Form;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::config::{ClientConfig, ClientConfigBuilder};
use crate::download::download_to_temp;
use crate::error::{ApiError, ConfigError};
use crate::files::{FormFile, check_field_name};
use crate::request::{Params, build_url, encode_segment};
use crate::response::normalize_response;
use crate::user_agent;

/// Client for the translation-management service.
///
/// Cheap to clone; clones share the connection pool and configuration.
///
/// # Example
///
/// ```no_run
/// use tms_client::{ClientConfig, TmsClient};
///
/// # async fn example() -> Result<(), tms_client::ApiError> {
/// let config = ClientConfig::builder()
///     .api_key("project-api-key")
///     .project_id("my-project")
///     .build()?;
/// let client = TmsClient::new(config)?;
/// let info = client.project_info().await?;
/// println!("{info}");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct TmsClient {
    http: Client,
    config: Arc<ClientConfig>,
}

impl TmsClient {
    /// Creates a client with timeouts from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ClientBuild`] if the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs()))
            .timeout(Duration::from_secs(config.read_timeout_secs()))
            .gzip(true)
            .user_agent(user_agent::default_user_agent())
            .build()
            .map_err(ApiError::ClientBuild)?;
        Ok(Self::with_http_client(config, http))
    }

    /// Validates `builder` and creates a client from it.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] for invalid settings and
    /// [`ApiError::ClientBuild`] if the HTTP client cannot be built.
    pub fn from_builder(builder: ClientConfigBuilder) -> Result<Self, ApiError> {
        Self::new(builder.build()?)
    }

    /// Creates a client around a caller-configured `reqwest::Client`.
    ///
    /// The caller's timeouts, proxies and TLS settings apply unchanged.
    #[must_use]
    pub fn with_http_client(config: ClientConfig, http: Client) -> Self {
        Self {
            http,
            config: Arc::new(config),
        }
    }

    /// Read-only view of the configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns a reference to the underlying reqwest client.
    #[must_use]
    pub fn inner(&self) -> &Client {
        &self.http
    }

    /// `project/<encoded id>/<operation>`.
    pub(crate) fn project_path(&self, operation: &str) -> String {
        format!(
            "project/{}/{operation}",
            encode_segment(self.config.project_id())
        )
    }

    /// Full request URL with credentials and the JSON flag.
    pub(crate) fn endpoint_url(&self, path: &str, query: &Params) -> Url {
        build_url(
            self.config.base_url(),
            path,
            self.config.credentials(),
            query,
        )
    }

    /// Refuses account-level operations for project-key clients.
    pub(crate) fn require_account(&self, operation: &'static str) -> Result<(), ApiError> {
        if self.config.credentials().is_account() {
            Ok(())
        } else {
            Err(ConfigError::AccountCredentialsRequired { operation }.into())
        }
    }

    /// GET returning a normalized JSON body. Parameters go in the query string.
    pub(crate) async fn get_json(&self, path: &str, params: &Params) -> Result<Value, ApiError> {
        let url = self.endpoint_url(path, params);
        debug!(endpoint = path, method = "GET", "sending request");
        let outcome = self.http.get(url).send().await;
        normalize_response(path, outcome).await
    }

    /// Multipart POST returning a normalized JSON body.
    ///
    /// Parameters become text parts, files become file parts; credentials
    /// stay in the query string. Parameter names holding a quote or line
    /// break are refused with [`ApiError::InvalidFieldName`].
    pub(crate) async fn post_form(
        &self,
        path: &str,
        params: &Params,
        files: Vec<FormFile>,
    ) -> Result<Value, ApiError> {
        let url = self.endpoint_url(path, &Params::new());

        // Field names carry `/` (`files[dir/a.po]`) and must go out verbatim.
        let mut form = Form::new().percent_encode_noop();
        for (key, value) in params.to_pairs() {
            check_field_name(&key)?;
            form = form.text(key.into_owned(), value.to_string());
        }
        let file_count = files.len();
        for file in files {
            let (name, part) = file.into_part().await?;
            form = form.part(name, part);
        }

        debug!(endpoint = path, method = "POST", files = file_count, "sending request");
        let outcome = self.http.post(url).multipart(form).send().await;
        normalize_response(path, outcome).await
    }

    /// Streamed GET into a staging file.
    pub(crate) async fn download(&self, path: &str, params: &Params) -> Result<PathBuf, ApiError> {
        let url = self.endpoint_url(path, params);
        download_to_temp(&self.http, path, url, self.config.download_dir()).await
    }
}

impl fmt::Debug for TmsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TmsClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
