//! Translation memory (TMX) transfer.

use std::path::PathBuf;

use serde_json::Value;
use tracing::instrument;

use crate::client::TmsClient;
use crate::error::ApiError;
use crate::files::{FileSource, FormFile};
use crate::request::Params;

/// Options for `download-tm`.
#[derive(Debug, Clone, Default)]
pub struct DownloadTmOptions {
    /// Include memories assigned to the project.
    pub include_assigned: Option<bool>,
    /// Additional service parameters.
    pub extra: Params,
}

/// Options for `upload-tm`.
#[derive(Debug, Clone, Default)]
pub struct UploadTmOptions {
    /// Name for the imported memory.
    pub name: Option<String>,
    /// Additional service parameters.
    pub extra: Params,
}

impl TmsClient {
    /// Downloads the project translation memory as TMX into a staging file.
    ///
    /// # Errors
    ///
    /// Returns the download errors.
    #[instrument(skip_all)]
    pub async fn download_tm(&self, options: DownloadTmOptions) -> Result<PathBuf, ApiError> {
        let mut params = Params::new();
        params
            .insert_opt("include_assigned", options.include_assigned)
            .extend(&options.extra);
        self.download(&self.project_path("download-tm"), &params).await
    }

    /// Uploads a TMX translation memory.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Io`] if a local file cannot be opened, otherwise
    /// the usual request errors.
    #[instrument(skip_all)]
    pub async fn upload_tm(
        &self,
        source: impl Into<FileSource>,
        options: UploadTmOptions,
    ) -> Result<Value, ApiError> {
        let mut params = Params::new();
        params
            .insert_opt("name", options.name.as_deref())
            .extend(&options.extra);
        self.post_form(
            &self.project_path("upload-tm"),
            &params,
            vec![FormFile::new("file", source)],
        )
        .await
    }
}
