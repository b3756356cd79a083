//! Translation-Management Service Client Library
//!
//! Async client for the service's project REST API: upload source files and
//! translations, check progress, build and download exports, move glossaries
//! and translation memories, and generate reports.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`config`] - Credentials and validated client configuration
//! - [`request`] - Endpoint URLs and parameter encoding (credentials + `json=true` always attached)
//! - [`files`] - Upload packing into `files[<path>]` multipart fields
//! - [`response`] - JSON normalization and service error detection
//! - [`download`] - Streamed downloads into per-call staging files
//! - [`operations`] - One method per API endpoint on [`TmsClient`]
//!
//! # Example
//!
//! ```no_run
//! use tms_client::{BranchOptions, ClientConfig, FileSet, TmsClient};
//!
//! # async fn example() -> Result<(), tms_client::ApiError> {
//! let client = TmsClient::new(
//!     ClientConfig::builder()
//!         .api_key("project-api-key")
//!         .project_id("my-project")
//!         .build()?,
//! )?;
//!
//! let files = FileSet::new().with("app/strings.xml", "./res/values/strings.xml");
//! client.update_file(files, Default::default()).await?;
//!
//! let archive = client.download_all_translations(BranchOptions::default()).await?;
//! println!("translations saved to {}", archive.display());
//! # Ok(())
//! # }
//! ```

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod client;
pub mod config;
pub mod constants;
pub mod download;
mod error;
pub mod files;
pub mod operations;
pub mod request;
pub mod response;
pub(crate) mod user_agent;

// Re-export commonly used types
pub use client::TmsClient;
pub use config::{ClientConfig, ClientConfigBuilder, Credentials};
pub use constants::DEFAULT_BASE_URL;
pub use download::download_to_temp;
pub use error::{ApiError, ConfigError, ServiceError};
pub use files::{FileSet, FileSource, FormFile, pack_files};
pub use operations::{
    AddDirectoryOptions, AddFileOptions, BranchOptions, ChangeDirectoryOptions,
    CreateProjectOptions, DownloadGlossaryOptions, DownloadTmOptions, EditProjectOptions,
    ExportFileOptions, ExportOptions, PreTranslateMethod, PreTranslateOptions,
    PseudoExportOptions, ReportFormat, ReportKind, ReportOptions, UpdateFileOptions,
    UploadGlossaryOptions, UploadTmOptions, UploadTranslationOptions,
};
pub use request::{ParamValue, Params, build_url};
pub use response::{normalize_body, normalize_response, parse_service_error};

// Note: no module-local Result aliases; use `Result<T, ApiError>` explicitly.
