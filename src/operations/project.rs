//! Project-level operations: info, settings, lifecycle, account listing.

use serde_json::Value;
use tracing::instrument;

use crate::client::TmsClient;
use crate::error::ApiError;
use crate::request::Params;

use super::require;

/// Settings accepted by `edit-project`. Unset fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct EditProjectOptions {
    /// Project display name.
    pub name: Option<String>,
    /// Project description.
    pub description: Option<String>,
    /// Target language codes (replaces the current list).
    pub languages: Option<Vec<String>>,
    /// `open` or `private`.
    pub join_policy: Option<String>,
    /// `open` or `moderate`.
    pub language_access_policy: Option<String>,
    /// Hide duplicate strings from translators.
    pub hide_duplicates: Option<bool>,
    /// Include only translated strings in exports.
    pub export_translated_only: Option<bool>,
    /// Include only approved strings in exports.
    pub export_approved_only: Option<bool>,
    /// Auto-fill dialects from the base language.
    pub auto_translate_dialects: Option<bool>,
    /// Allow anyone to download translations.
    pub public_downloads: Option<bool>,
    /// Use the account-wide translation memory.
    pub use_global_tm: Option<bool>,
    /// Enable in-context localization.
    pub in_context: Option<bool>,
    /// Webhook fired when a file is fully translated.
    pub webhook_file_translated: Option<String>,
    /// Webhook fired when a file is fully proofread.
    pub webhook_file_proofread: Option<String>,
    /// Webhook fired when the project is fully translated.
    pub webhook_project_translated: Option<String>,
    /// Webhook fired when the project is fully proofread.
    pub webhook_project_proofread: Option<String>,
    /// Additional service parameters.
    pub extra: Params,
}

impl EditProjectOptions {
    pub(crate) fn to_params(&self) -> Params {
        let mut params = Params::new();
        params
            .insert_opt("name", self.name.as_deref())
            .insert_opt("description", self.description.as_deref())
            .insert_opt("languages", self.languages.clone())
            .insert_opt("join_policy", self.join_policy.as_deref())
            .insert_opt("language_access_policy", self.language_access_policy.as_deref())
            .insert_opt("hide_duplicates", self.hide_duplicates)
            .insert_opt("export_translated_only", self.export_translated_only)
            .insert_opt("export_approved_only", self.export_approved_only)
            .insert_opt("auto_translate_dialects", self.auto_translate_dialects)
            .insert_opt("public_downloads", self.public_downloads)
            .insert_opt("use_global_tm", self.use_global_tm)
            .insert_opt("in_context", self.in_context)
            .insert_opt("webhook_file_translated", self.webhook_file_translated.as_deref())
            .insert_opt("webhook_file_proofread", self.webhook_file_proofread.as_deref())
            .insert_opt(
                "webhook_project_translated",
                self.webhook_project_translated.as_deref(),
            )
            .insert_opt(
                "webhook_project_proofread",
                self.webhook_project_proofread.as_deref(),
            )
            .extend(&self.extra);
        params
    }
}

/// Settings for `create-project`.
#[derive(Debug, Clone, Default)]
pub struct CreateProjectOptions {
    /// Project display name (required).
    pub name: String,
    /// Project identifier used in URLs (required).
    pub identifier: String,
    /// Source language code (required).
    pub source_language: String,
    /// Target language codes (at least one).
    pub languages: Vec<String>,
    /// `open` or `private` (required).
    pub join_policy: String,
    /// Project description.
    pub description: Option<String>,
    /// Allow anyone to download translations.
    pub public_downloads: Option<bool>,
    /// Additional service parameters.
    pub extra: Params,
}

impl CreateProjectOptions {
    fn validate(&self) -> Result<(), ApiError> {
        require("name", &self.name)?;
        require("identifier", &self.identifier)?;
        require("source_language", &self.source_language)?;
        require("join_policy", &self.join_policy)?;
        if self.languages.iter().all(|l| l.trim().is_empty()) {
            return Err(ApiError::MissingParameter("languages"));
        }
        Ok(())
    }

    pub(crate) fn to_params(&self) -> Params {
        let mut params = Params::new();
        params
            .insert("name", self.name.as_str())
            .insert("identifier", self.identifier.as_str())
            .insert("source_language", self.source_language.as_str())
            .insert("languages", self.languages.clone())
            .insert("join_policy", self.join_policy.as_str())
            .insert_opt("description", self.description.as_deref())
            .insert_opt("public_downloads", self.public_downloads)
            .extend(&self.extra);
        params
    }
}

impl TmsClient {
    /// Fetches project details: languages, files and directories.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on service, transport or decode failure.
    #[instrument(skip_all, fields(project = %self.config().project_id()))]
    pub async fn project_info(&self) -> Result<Value, ApiError> {
        self.post_form(&self.project_path("info"), &Params::new(), Vec::new())
            .await
    }

    /// Updates project settings.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on service, transport or decode failure.
    #[instrument(skip_all, fields(project = %self.config().project_id()))]
    pub async fn edit_project(&self, options: EditProjectOptions) -> Result<Value, ApiError> {
        self.post_form(
            &self.project_path("edit-project"),
            &options.to_params(),
            Vec::new(),
        )
        .await
    }

    /// Deletes the project.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on service, transport or decode failure.
    #[instrument(skip_all, fields(project = %self.config().project_id()))]
    pub async fn delete_project(&self) -> Result<Value, ApiError> {
        self.post_form(&self.project_path("delete-project"), &Params::new(), Vec::new())
            .await
    }

    /// Lists the projects owned by the account.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] unless the client uses login/account-key
    /// credentials, otherwise the usual request errors.
    #[instrument(skip_all)]
    pub async fn list_projects(&self) -> Result<Value, ApiError> {
        self.require_account("list_projects")?;
        self.post_form("account/get-projects", &Params::new(), Vec::new())
            .await
    }

    /// Creates a new project under the account.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] unless the client uses login/account-key
    /// credentials, [`ApiError::MissingParameter`] for an empty required
    /// field, otherwise the usual request errors.
    #[instrument(skip_all, fields(identifier = %options.identifier))]
    pub async fn create_project(&self, options: CreateProjectOptions) -> Result<Value, ApiError> {
        self.require_account("create_project")?;
        options.validate()?;
        self.post_form("account/create-project", &options.to_params(), Vec::new())
            .await
    }
}
