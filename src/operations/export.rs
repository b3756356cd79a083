//! Building and downloading translation exports.
//!
//! The service rebuilds an export at most once per 30 minutes; that limit is
//! enforced server side and surfaces as a normal response here.

use std::path::PathBuf;

use serde_json::Value;
use tracing::instrument;

use crate::client::TmsClient;
use crate::error::ApiError;
use crate::request::{Params, encode_segment};

use super::{BranchOptions, require};

/// Package name that selects every target language.
const ALL_PACKAGE: &str = "all";

/// Options for `export`.
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Branch to export.
    pub branch: Option<String>,
    /// Return immediately and build in the background (sent as `async`).
    pub async_build: Option<bool>,
    /// Additional service parameters.
    pub extra: Params,
}

/// Options for `export-file`.
#[derive(Debug, Clone, Default)]
pub struct ExportFileOptions {
    /// Branch the file belongs to.
    pub branch: Option<String>,
    /// Alternative output format, e.g. `xliff`.
    pub format: Option<String>,
    /// Include only translated strings.
    pub export_translated_only: Option<bool>,
    /// Include only approved strings.
    pub export_approved_only: Option<bool>,
    /// Additional service parameters.
    pub extra: Params,
}

/// Options for `pseudo-export`.
#[derive(Debug, Clone, Default)]
pub struct PseudoExportOptions {
    /// Text prepended to every string.
    pub prefix: Option<String>,
    /// Text appended to every string.
    pub suffix: Option<String>,
    /// Length change in percent (-50 to 100).
    pub length_transformation: Option<i64>,
    /// `asian`, `european`, `arabic` or `cyrillic`.
    pub char_transformation: Option<String>,
    /// Additional service parameters.
    pub extra: Params,
}

impl TmsClient {
    /// Triggers a build of the translation archive.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on service, transport or decode failure.
    #[instrument(skip_all)]
    pub async fn export_translations(&self, options: ExportOptions) -> Result<Value, ApiError> {
        let mut params = Params::new();
        params
            .insert_opt("branch", options.branch.as_deref())
            .insert_opt("async", options.async_build)
            .extend(&options.extra);
        self.get_json(&self.project_path("export"), &params).await
    }

    /// Progress of a background export build.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on service, transport or decode failure.
    #[instrument(skip_all)]
    pub async fn export_status(&self, options: BranchOptions) -> Result<Value, ApiError> {
        self.get_json(&self.project_path("export-status"), &options.to_params())
            .await
    }

    /// Downloads the ZIP archive for one language package into a staging file.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingParameter`] for an empty `package`,
    /// otherwise the download errors of [`crate::download_to_temp`].
    #[instrument(skip_all, fields(package = %package))]
    pub async fn download_translations(
        &self,
        package: &str,
        options: BranchOptions,
    ) -> Result<PathBuf, ApiError> {
        require("package", package)?;
        let path = self.project_path(&format!("download/{}.zip", encode_segment(package)));
        self.download(&path, &options.to_params()).await
    }

    /// Downloads the ZIP archive with every language.
    ///
    /// # Errors
    ///
    /// Same as [`download_translations`](Self::download_translations).
    pub async fn download_all_translations(
        &self,
        options: BranchOptions,
    ) -> Result<PathBuf, ApiError> {
        self.download_translations(ALL_PACKAGE, options).await
    }

    /// Downloads one translated file into a staging file.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingParameter`] for an empty `file` or
    /// `language`, otherwise the download errors.
    #[instrument(skip_all, fields(file = %file, language = %language))]
    pub async fn export_file(
        &self,
        file: &str,
        language: &str,
        options: ExportFileOptions,
    ) -> Result<PathBuf, ApiError> {
        require("file", file)?;
        require("language", language)?;
        let mut params = Params::new().with("file", file).with("language", language);
        params
            .insert_opt("branch", options.branch.as_deref())
            .insert_opt("format", options.format.as_deref())
            .insert_opt("export_translated_only", options.export_translated_only)
            .insert_opt("export_approved_only", options.export_approved_only)
            .extend(&options.extra);
        self.download(&self.project_path("export-file"), &params).await
    }

    /// Builds a pseudo-localized export for layout testing.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on service, transport or decode failure.
    #[instrument(skip_all)]
    pub async fn pseudo_export(&self, options: PseudoExportOptions) -> Result<Value, ApiError> {
        let mut params = Params::new();
        params
            .insert_opt("prefix", options.prefix.as_deref())
            .insert_opt("suffix", options.suffix.as_deref())
            .insert_opt("length_transformation", options.length_transformation)
            .insert_opt("char_transformation", options.char_transformation.as_deref())
            .extend(&options.extra);
        self.get_json(&self.project_path("pseudo-export"), &params)
            .await
    }

    /// Downloads the last pseudo-localized build.
    ///
    /// # Errors
    ///
    /// Returns the download errors.
    #[instrument(skip_all)]
    pub async fn pseudo_download(&self) -> Result<PathBuf, ApiError> {
        self.download(&self.project_path("pseudo-download"), &Params::new())
            .await
    }
}
