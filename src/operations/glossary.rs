//! Glossary (TBX) transfer.

use std::path::PathBuf;

use serde_json::Value;
use tracing::instrument;

use crate::client::TmsClient;
use crate::error::ApiError;
use crate::files::{FileSource, FormFile};
use crate::request::Params;

/// Options for `download-glossary`.
#[derive(Debug, Clone, Default)]
pub struct DownloadGlossaryOptions {
    /// Include terms from glossaries assigned to the project.
    pub include_assigned: Option<bool>,
    /// Additional service parameters.
    pub extra: Params,
}

/// Options for `upload-glossary`.
#[derive(Debug, Clone, Default)]
pub struct UploadGlossaryOptions {
    /// First CSV line is a header row.
    pub first_line_contains_header: Option<bool>,
    /// Additional service parameters, e.g. `scheme[term_en]=0` for CSV columns.
    pub extra: Params,
}

impl TmsClient {
    /// Downloads the project glossary as TBX into a staging file.
    ///
    /// # Errors
    ///
    /// Returns the download errors.
    #[instrument(skip_all)]
    pub async fn download_glossary(
        &self,
        options: DownloadGlossaryOptions,
    ) -> Result<PathBuf, ApiError> {
        let mut params = Params::new();
        params
            .insert_opt("include_assigned", options.include_assigned)
            .extend(&options.extra);
        self.download(&self.project_path("download-glossary"), &params)
            .await
    }

    /// Uploads a TBX or CSV glossary.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Io`] if a local file cannot be opened, otherwise
    /// the usual request errors.
    #[instrument(skip_all)]
    pub async fn upload_glossary(
        &self,
        source: impl Into<FileSource>,
        options: UploadGlossaryOptions,
    ) -> Result<Value, ApiError> {
        let mut params = Params::new();
        params
            .insert_opt("first_line_contains_header", options.first_line_contains_header)
            .extend(&options.extra);
        self.post_form(
            &self.project_path("upload-glossary"),
            &params,
            vec![FormFile::new("file", source)],
        )
        .await
    }
}
