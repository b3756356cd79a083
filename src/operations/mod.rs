//! Per-endpoint operations on [`TmsClient`](crate::TmsClient).
//!
//! Each operation checks its required identifiers, builds its endpoint path
//! from the project identifier, merges its option struct into [`Params`] and
//! issues exactly one request. No operation retries, paginates or caches.
//!
//! Every option struct has an `extra` map for service parameters without a
//! dedicated field. `extra` is merged last, so it can override documented
//! fields but never the credentials or the JSON flag.

mod directories;
mod export;
mod files;
mod glossary;
mod languages;
mod pretranslate;
mod project;
mod reports;
mod status;
mod tm;

pub use directories::{AddDirectoryOptions, ChangeDirectoryOptions};
pub use export::{ExportFileOptions, ExportOptions, PseudoExportOptions};
pub use files::{AddFileOptions, UpdateFileOptions, UploadTranslationOptions};
pub use glossary::{DownloadGlossaryOptions, UploadGlossaryOptions};
pub use pretranslate::{PreTranslateMethod, PreTranslateOptions};
pub use project::{CreateProjectOptions, EditProjectOptions};
pub use reports::{ReportFormat, ReportKind, ReportOptions};
pub use tm::{DownloadTmOptions, UploadTmOptions};

use std::collections::BTreeMap;

use crate::error::ApiError;
use crate::request::Params;

/// Options for operations that only take a branch.
#[derive(Debug, Clone, Default)]
pub struct BranchOptions {
    /// Branch name, for projects using version branches.
    pub branch: Option<String>,
    /// Additional service parameters.
    pub extra: Params,
}

impl BranchOptions {
    /// Targets `branch`.
    #[must_use]
    pub fn branch(branch: impl Into<String>) -> Self {
        Self {
            branch: Some(branch.into()),
            extra: Params::new(),
        }
    }

    pub(crate) fn to_params(&self) -> Params {
        let mut params = Params::new();
        params.insert_opt("branch", self.branch.as_deref());
        params.extend(&self.extra);
        params
    }
}

/// Fails with [`ApiError::MissingParameter`] when `value` is blank.
pub(crate) fn require(name: &'static str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        Err(ApiError::MissingParameter(name))
    } else {
        Ok(())
    }
}

/// Inserts per-file values as `<field>[<logical-path>]=<value>`.
pub(crate) fn insert_keyed(params: &mut Params, field: &str, values: &BTreeMap<String, String>) {
    for (path, value) in values {
        params.insert(format!("{field}[{path}]"), value.as_str());
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::request::ParamValue;

    #[test]
    fn test_require_rejects_blank() {
        assert!(matches!(
            require("file", "  "),
            Err(ApiError::MissingParameter("file"))
        ));
        assert!(require("file", "strings.xml").is_ok());
    }

    #[test]
    fn test_branch_options_extra_merged_last() {
        let mut options = BranchOptions::branch("main");
        options.extra.insert("branch", "override");
        options.extra.insert("custom", "1");
        let params = options.to_params();
        assert_eq!(
            params.get("branch"),
            Some(&ParamValue::Text("override".to_string()))
        );
        assert!(params.get("custom").is_some());
    }

    #[test]
    fn test_insert_keyed_uses_bracketed_paths() {
        let mut params = Params::new();
        let titles = BTreeMap::from([("a/b.txt".to_string(), "Title".to_string())]);
        insert_keyed(&mut params, "titles", &titles);
        assert_eq!(
            params.get("titles[a/b.txt]"),
            Some(&ParamValue::Text("Title".to_string()))
        );
    }
}
