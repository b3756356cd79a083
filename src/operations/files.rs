//! Source file and translation uploads.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::instrument;

use crate::client::TmsClient;
use crate::error::ApiError;
use crate::files::{FileSet, pack_files};
use crate::request::Params;

use super::{BranchOptions, insert_keyed, require};

/// Options for `add-file`.
#[derive(Debug, Clone, Default)]
pub struct AddFileOptions {
    /// Display titles keyed by logical path.
    pub titles: BTreeMap<String, String>,
    /// Export name patterns keyed by logical path.
    pub export_patterns: BTreeMap<String, String>,
    /// File format override (sent as `type`).
    pub file_type: Option<String>,
    /// First CSV line is a header row.
    pub first_line_contains_header: Option<bool>,
    /// CSV column scheme, e.g. `identifier,source_phrase,translation`.
    pub scheme: Option<String>,
    /// Import existing translations from the uploaded files.
    pub import_translations: Option<bool>,
    /// Target branch.
    pub branch: Option<String>,
    /// Additional service parameters.
    pub extra: Params,
}

impl AddFileOptions {
    pub(crate) fn to_params(&self) -> Params {
        let mut params = Params::new();
        insert_keyed(&mut params, "titles", &self.titles);
        insert_keyed(&mut params, "export_patterns", &self.export_patterns);
        params
            .insert_opt("type", self.file_type.as_deref())
            .insert_opt("first_line_contains_header", self.first_line_contains_header)
            .insert_opt("scheme", self.scheme.as_deref())
            .insert_opt("import_translations", self.import_translations)
            .insert_opt("branch", self.branch.as_deref())
            .extend(&self.extra);
        params
    }
}

/// Options for `update-file`.
#[derive(Debug, Clone, Default)]
pub struct UpdateFileOptions {
    /// Display titles keyed by logical path.
    pub titles: BTreeMap<String, String>,
    /// Export name patterns keyed by logical path.
    pub export_patterns: BTreeMap<String, String>,
    /// Renames keyed by current logical path.
    pub new_names: BTreeMap<String, String>,
    /// First CSV line is a header row.
    pub first_line_contains_header: Option<bool>,
    /// CSV column scheme.
    pub scheme: Option<String>,
    /// `clear_translations`, `update_as_unapproved` or `update_without_changes`.
    pub update_option: Option<String>,
    /// Target branch.
    pub branch: Option<String>,
    /// Additional service parameters.
    pub extra: Params,
}

impl UpdateFileOptions {
    pub(crate) fn to_params(&self) -> Params {
        let mut params = Params::new();
        insert_keyed(&mut params, "titles", &self.titles);
        insert_keyed(&mut params, "export_patterns", &self.export_patterns);
        insert_keyed(&mut params, "new_names", &self.new_names);
        params
            .insert_opt("first_line_contains_header", self.first_line_contains_header)
            .insert_opt("scheme", self.scheme.as_deref())
            .insert_opt("update_option", self.update_option.as_deref())
            .insert_opt("branch", self.branch.as_deref())
            .extend(&self.extra);
        params
    }
}

/// Options for `upload-translation`.
#[derive(Debug, Clone, Default)]
pub struct UploadTranslationOptions {
    /// Keep translations identical to existing ones as duplicates.
    pub import_duplicates: Option<bool>,
    /// Import translations equal to the source text.
    pub import_eq_suggestions: Option<bool>,
    /// Mark imported translations as approved.
    pub auto_approve_imported: Option<bool>,
    /// Target branch.
    pub branch: Option<String>,
    /// Additional service parameters.
    pub extra: Params,
}

impl UploadTranslationOptions {
    pub(crate) fn to_params(&self) -> Params {
        let mut params = Params::new();
        params
            .insert_opt("import_duplicates", self.import_duplicates)
            .insert_opt("import_eq_suggestions", self.import_eq_suggestions)
            .insert_opt("auto_approve_imported", self.auto_approve_imported)
            .insert_opt("branch", self.branch.as_deref())
            .extend(&self.extra);
        params
    }
}

impl TmsClient {
    /// Uploads new source files.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingParameter`] for an empty file set,
    /// [`ApiError::InvalidFieldName`] for a path holding a quote or line break,
    /// [`ApiError::Io`] if a local file cannot be opened, otherwise the usual
    /// request errors.
    #[instrument(skip_all, fields(files = files.len()))]
    pub async fn add_file(&self, files: FileSet, options: AddFileOptions) -> Result<Value, ApiError> {
        if files.is_empty() {
            return Err(ApiError::MissingParameter("files"));
        }
        self.post_form(
            &self.project_path("add-file"),
            &options.to_params(),
            pack_files(files)?,
        )
        .await
    }

    /// Replaces existing source files.
    ///
    /// # Errors
    ///
    /// Same as [`add_file`](Self::add_file).
    #[instrument(skip_all, fields(files = files.len()))]
    pub async fn update_file(
        &self,
        files: FileSet,
        options: UpdateFileOptions,
    ) -> Result<Value, ApiError> {
        if files.is_empty() {
            return Err(ApiError::MissingParameter("files"));
        }
        self.post_form(
            &self.project_path("update-file"),
            &options.to_params(),
            pack_files(files)?,
        )
        .await
    }

    /// Removes a source file from the project.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingParameter`] for an empty `file`, otherwise
    /// the usual request errors.
    #[instrument(skip_all, fields(file = %file))]
    pub async fn delete_file(&self, file: &str, options: BranchOptions) -> Result<Value, ApiError> {
        require("file", file)?;
        let mut params = Params::new().with("file", file);
        params.extend(&options.to_params());
        self.post_form(&self.project_path("delete-file"), &params, Vec::new())
            .await
    }

    /// Uploads existing translations for `language`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingParameter`] for an empty file set or
    /// language, [`ApiError::Io`] if a local file cannot be opened, otherwise
    /// the usual request errors.
    #[instrument(skip_all, fields(files = files.len(), language = %language))]
    pub async fn upload_translation(
        &self,
        files: FileSet,
        language: &str,
        options: UploadTranslationOptions,
    ) -> Result<Value, ApiError> {
        require("language", language)?;
        if files.is_empty() {
            return Err(ApiError::MissingParameter("files"));
        }
        let mut params = Params::new().with("language", language);
        params.extend(&options.to_params());
        self.post_form(
            &self.project_path("upload-translation"),
            &params,
            pack_files(files)?,
        )
        .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::request::ParamValue;

    #[test]
    fn test_add_file_options_key_titles_by_path() {
        let options = AddFileOptions {
            titles: BTreeMap::from([("ui/strings.xml".to_string(), "UI".to_string())]),
            export_patterns: BTreeMap::from([(
                "ui/strings.xml".to_string(),
                "/%locale%/strings.xml".to_string(),
            )]),
            file_type: Some("android".to_string()),
            ..AddFileOptions::default()
        };
        let params = options.to_params();
        assert_eq!(
            params.get("titles[ui/strings.xml]"),
            Some(&ParamValue::Text("UI".to_string()))
        );
        assert_eq!(
            params.get("export_patterns[ui/strings.xml]"),
            Some(&ParamValue::Text("/%locale%/strings.xml".to_string()))
        );
        assert_eq!(
            params.get("type"),
            Some(&ParamValue::Text("android".to_string()))
        );
    }

    #[test]
    fn test_update_file_options_include_new_names() {
        let options = UpdateFileOptions {
            new_names: BTreeMap::from([("old.po".to_string(), "new.po".to_string())]),
            update_option: Some("update_as_unapproved".to_string()),
            ..UpdateFileOptions::default()
        };
        let params = options.to_params();
        assert!(params.get("new_names[old.po]").is_some());
        assert!(params.get("update_option").is_some());
    }
}
