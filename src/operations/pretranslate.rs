//! Machine and memory pre-translation.

use serde_json::Value;
use tracing::instrument;

use crate::client::TmsClient;
use crate::error::ApiError;
use crate::request::Params;

/// Pre-translation source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreTranslateMethod {
    /// Translation memory.
    Tm,
    /// Machine translation.
    Mt,
}

impl PreTranslateMethod {
    fn as_str(self) -> &'static str {
        match self {
            Self::Tm => "tm",
            Self::Mt => "mt",
        }
    }
}

/// Options for `pre-translate`.
#[derive(Debug, Clone, Default)]
pub struct PreTranslateOptions {
    /// Target language codes (at least one).
    pub languages: Vec<String>,
    /// Logical file paths to pre-translate (at least one).
    pub files: Vec<String>,
    /// Translation source; the service defaults to TM.
    pub method: Option<PreTranslateMethod>,
    /// MT engine, e.g. `google` or `microsoft`.
    pub engine: Option<String>,
    /// Approve the applied translations.
    pub approve_translated: Option<bool>,
    /// `all`, `except_auto_substituted` or `perfect_match_only`.
    pub auto_approve_option: Option<String>,
    /// Also fill duplicates.
    pub import_duplicates: Option<bool>,
    /// Skip strings that already have translations.
    pub apply_untranslated_strings_only: Option<bool>,
    /// Apply only perfect TM matches.
    pub perfect_match: Option<bool>,
    /// Additional service parameters.
    pub extra: Params,
}

impl PreTranslateOptions {
    fn validate(&self) -> Result<(), ApiError> {
        if self.languages.iter().all(|l| l.trim().is_empty()) {
            return Err(ApiError::MissingParameter("languages"));
        }
        if self.files.iter().all(|f| f.trim().is_empty()) {
            return Err(ApiError::MissingParameter("files"));
        }
        Ok(())
    }

    pub(crate) fn to_params(&self) -> Params {
        let mut params = Params::new();
        params
            .insert("languages", self.languages.clone())
            .insert("files", self.files.clone())
            .insert_opt("method", self.method.map(PreTranslateMethod::as_str))
            .insert_opt("engine", self.engine.as_deref())
            .insert_opt("approve_translated", self.approve_translated)
            .insert_opt("auto_approve_option", self.auto_approve_option.as_deref())
            .insert_opt("import_duplicates", self.import_duplicates)
            .insert_opt(
                "apply_untranslated_strings_only",
                self.apply_untranslated_strings_only,
            )
            .insert_opt("perfect_match", self.perfect_match)
            .extend(&self.extra);
        params
    }
}

impl TmsClient {
    /// Fills translations from TM or MT for the given files and languages.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingParameter`] when no language or no file is
    /// listed, otherwise the usual request errors.
    #[instrument(skip_all, fields(languages = options.languages.len(), files = options.files.len()))]
    pub async fn pre_translate(&self, options: PreTranslateOptions) -> Result<Value, ApiError> {
        options.validate()?;
        self.post_form(
            &self.project_path("pre-translate"),
            &options.to_params(),
            Vec::new(),
        )
        .await
    }
}
