//! Directory and version-branch management.

use serde_json::Value;
use tracing::instrument;

use crate::client::TmsClient;
use crate::error::ApiError;
use crate::request::Params;

use super::{BranchOptions, require};

/// Options for `add-directory`.
#[derive(Debug, Clone, Default)]
pub struct AddDirectoryOptions {
    /// Create a version branch instead of a plain directory.
    pub is_branch: Option<bool>,
    /// Parent branch for the new directory.
    pub branch: Option<String>,
    /// Additional service parameters.
    pub extra: Params,
}

/// Options for `change-directory`.
#[derive(Debug, Clone, Default)]
pub struct ChangeDirectoryOptions {
    /// New directory name.
    pub new_name: Option<String>,
    /// Display title.
    pub title: Option<String>,
    /// Export path pattern applied to files inside.
    pub export_pattern: Option<String>,
    /// Branch the directory belongs to.
    pub branch: Option<String>,
    /// Additional service parameters.
    pub extra: Params,
}

impl TmsClient {
    /// Creates a directory (or a version branch).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingParameter`] for an empty `name`, otherwise
    /// the usual request errors.
    #[instrument(skip_all, fields(name = %name))]
    pub async fn add_directory(
        &self,
        name: &str,
        options: AddDirectoryOptions,
    ) -> Result<Value, ApiError> {
        require("name", name)?;
        let mut params = Params::new().with("name", name);
        params
            .insert_opt("is_branch", options.is_branch)
            .insert_opt("branch", options.branch.as_deref())
            .extend(&options.extra);
        self.post_form(&self.project_path("add-directory"), &params, Vec::new())
            .await
    }

    /// Renames or retitles a directory.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingParameter`] for an empty `name`, otherwise
    /// the usual request errors.
    #[instrument(skip_all, fields(name = %name))]
    pub async fn change_directory(
        &self,
        name: &str,
        options: ChangeDirectoryOptions,
    ) -> Result<Value, ApiError> {
        require("name", name)?;
        let mut params = Params::new().with("name", name);
        params
            .insert_opt("new_name", options.new_name.as_deref())
            .insert_opt("title", options.title.as_deref())
            .insert_opt("export_pattern", options.export_pattern.as_deref())
            .insert_opt("branch", options.branch.as_deref())
            .extend(&options.extra);
        self.post_form(&self.project_path("change-directory"), &params, Vec::new())
            .await
    }

    /// Deletes a directory and everything in it.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingParameter`] for an empty `name`, otherwise
    /// the usual request errors.
    #[instrument(skip_all, fields(name = %name))]
    pub async fn delete_directory(
        &self,
        name: &str,
        options: BranchOptions,
    ) -> Result<Value, ApiError> {
        require("name", name)?;
        let mut params = Params::new().with("name", name);
        params.extend(&options.to_params());
        self.post_form(&self.project_path("delete-directory"), &params, Vec::new())
            .await
    }
}
