//! Translation progress.

use serde_json::Value;
use tracing::instrument;

use crate::client::TmsClient;
use crate::error::ApiError;
use crate::request::Params;

use super::require;

impl TmsClient {
    /// Translation and approval progress per target language.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on service, transport or decode failure.
    #[instrument(skip_all)]
    pub async fn translations_status(&self) -> Result<Value, ApiError> {
        self.post_form(&self.project_path("status"), &Params::new(), Vec::new())
            .await
    }

    /// Per-file progress for one language.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingParameter`] for an empty `language`,
    /// otherwise the usual request errors.
    #[instrument(skip_all, fields(language = %language))]
    pub async fn language_status(&self, language: &str) -> Result<Value, ApiError> {
        require("language", language)?;
        self.post_form(
            &self.project_path("language-status"),
            &Params::new().with("language", language),
            Vec::new(),
        )
        .await
    }
}
