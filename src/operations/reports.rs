//! Report generation and download.
//!
//! Reports are two-step: `export_report` builds one and returns a `hash`,
//! `download_report` fetches the built file by that hash.

use std::fmt;
use std::path::PathBuf;

use serde_json::Value;
use tracing::instrument;

use crate::client::TmsClient;
use crate::error::ApiError;
use crate::request::Params;

use super::require;

/// Report type, used as a path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    /// Most active contributors.
    TopMembers,
    /// Projected translation cost.
    CostsEstimation,
    /// Cost per translator.
    TranslatorCosts,
}

impl ReportKind {
    /// Path segment for this report.
    #[must_use]
    pub fn as_path(self) -> &'static str {
        match self {
            Self::TopMembers => "top-members",
            Self::CostsEstimation => "costs-estimation",
            Self::TranslatorCosts => "translator-costs",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_path())
    }
}

/// Report file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Excel workbook.
    Xlsx,
    /// Comma-separated values.
    Csv,
}

impl ReportFormat {
    fn as_str(self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Csv => "csv",
        }
    }
}

/// Options shared by all report exports.
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    /// Output format.
    pub format: Option<ReportFormat>,
    /// Language code the report covers.
    pub language: Option<String>,
    /// Counting unit: `strings`, `words` or `chars`.
    pub unit: Option<String>,
    /// Currency code for cost reports.
    pub currency: Option<String>,
    /// `simple` or `fuzzy` cost calculation.
    pub mode: Option<String>,
    /// Count matches against the project's own TM as fuzzy.
    pub calculate_internal_fuzzy_matches: Option<bool>,
    /// Start of the reporting period (`YYYY-MM-DD`).
    pub date_from: Option<String>,
    /// End of the reporting period (`YYYY-MM-DD`).
    pub date_to: Option<String>,
    /// Additional service parameters, e.g. rate tables.
    pub extra: Params,
}

impl ReportOptions {
    pub(crate) fn to_params(&self) -> Params {
        let mut params = Params::new();
        params
            .insert_opt("format", self.format.map(ReportFormat::as_str))
            .insert_opt("language", self.language.as_deref())
            .insert_opt("unit", self.unit.as_deref())
            .insert_opt("currency", self.currency.as_deref())
            .insert_opt("mode", self.mode.as_deref())
            .insert_opt(
                "calculate_internal_fuzzy_matches",
                self.calculate_internal_fuzzy_matches,
            )
            .insert_opt("date_from", self.date_from.as_deref())
            .insert_opt("date_to", self.date_to.as_deref())
            .extend(&self.extra);
        params
    }
}

impl TmsClient {
    /// Builds a report and returns the service response with its `hash`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on service, transport or decode failure.
    #[instrument(skip_all, fields(report = %kind))]
    pub async fn export_report(
        &self,
        kind: ReportKind,
        options: ReportOptions,
    ) -> Result<Value, ApiError> {
        let path = self.project_path(&format!("reports/{}/export", kind.as_path()));
        self.post_form(&path, &options.to_params(), Vec::new()).await
    }

    /// Downloads a built report into a staging file.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingParameter`] for an empty `hash`, otherwise
    /// the download errors.
    #[instrument(skip_all, fields(report = %kind))]
    pub async fn download_report(&self, kind: ReportKind, hash: &str) -> Result<PathBuf, ApiError> {
        require("hash", hash)?;
        let path = self.project_path(&format!("reports/{}/download", kind.as_path()));
        self.download(&path, &Params::new().with("hash", hash)).await
    }
}
