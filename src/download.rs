//! Streaming downloads into per-call staging files.
//!
//! Each call acquires its own uniquely named temp file, streams the body into
//! it regardless of status, and only then decides the outcome. Below 400 the
//! path is returned. At 400 and above the file is read back to recover a
//! service error, falling back to a generic streaming error, and is then
//! removed.

use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use reqwest::Client;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::constants::TEMP_FILE_PREFIX;
use crate::error::ApiError;
use crate::response::parse_service_error;

/// Downloads `url` into a fresh staging file and returns its path.
///
/// On success the file is kept and the caller owns it. On any failure after
/// the file was created it is removed, since no path is returned.
///
/// # Errors
///
/// - [`ApiError::Io`] if the staging file cannot be created or written
/// - [`ApiError::Transport`] on network failure
/// - [`ApiError::Service`] if an error status carries a service failure body
/// - [`ApiError::Streaming`] for any other error status
#[instrument(skip_all, fields(endpoint = %endpoint))]
pub async fn download_to_temp(
    client: &Client,
    endpoint: &str,
    url: Url,
    temp_dir: Option<&Path>,
) -> Result<PathBuf, ApiError> {
    let (file, path) = acquire_temp_file(temp_dir)?;
    debug!(path = %path.display(), "acquired staging file");

    let (status, bytes_written) = match fetch_into(client, endpoint, url, file, &path).await {
        Ok(outcome) => outcome,
        Err(e) => {
            discard_staging_file(&path).await;
            return Err(e);
        }
    };

    if status < 400 {
        info!(path = %path.display(), bytes = bytes_written, status, "download complete");
        return Ok(path);
    }

    let error = recover_error(endpoint, status, &path).await;
    discard_staging_file(&path).await;
    Err(error)
}

/// Sends the GET and streams the body, returning status and bytes written.
async fn fetch_into(
    client: &Client,
    endpoint: &str,
    url: Url,
    file: File,
    path: &Path,
) -> Result<(u16, u64), ApiError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| ApiError::transport(endpoint, e))?;
    let status = response.status().as_u16();
    let bytes_written = stream_to_file(file, response, endpoint, path).await?;
    Ok((status, bytes_written))
}

async fn discard_staging_file(path: &Path) {
    debug!(path = %path.display(), "removing staging file after failed download");
    if let Err(e) = tokio::fs::remove_file(path).await {
        warn!(path = %path.display(), error = %e, "failed to remove staging file");
    }
}

fn acquire_temp_file(temp_dir: Option<&Path>) -> Result<(File, PathBuf), ApiError> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(TEMP_FILE_PREFIX);
    let named = match temp_dir {
        Some(dir) => builder.tempfile_in(dir),
        None => builder.tempfile(),
    }
    .map_err(|e| ApiError::io(temp_dir.map_or_else(std::env::temp_dir, Path::to_path_buf), e))?;

    let (std_file, path) = named
        .keep()
        .map_err(|e| ApiError::io(e.file.path().to_path_buf(), e.error))?;
    Ok((File::from_std(std_file), path))
}

/// Streams response body to file, returning bytes written.
async fn stream_to_file(
    file: File,
    response: reqwest::Response,
    endpoint: &str,
    path: &Path,
) -> Result<u64, ApiError> {
    let mut writer = BufWriter::new(file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| ApiError::transport(endpoint, e))?;
        writer
            .write_all(&chunk)
            .await
            .map_err(|e| ApiError::io(path, e))?;
        bytes_written += chunk.len() as u64;
    }

    writer.flush().await.map_err(|e| ApiError::io(path, e))?;

    Ok(bytes_written)
}

/// Rebuilds the failure from a downloaded error body.
///
/// Read-back problems are logged and folded into the streaming error so the
/// caller sees exactly one failure.
async fn recover_error(endpoint: &str, status: u16, path: &Path) -> ApiError {
    match tokio::fs::read_to_string(path).await {
        Ok(body) => match parse_service_error(&body) {
            Some(service) => {
                warn!(code = %service.code, status, "download rejected by service");
                ApiError::Service(service)
            }
            None => {
                debug!(status, "error body is not a service failure");
                ApiError::streaming(endpoint, status)
            }
        },
        Err(e) => {
            warn!(path = %path.display(), error = %e, status, "failed to read back error body");
            ApiError::streaming(endpoint, status)
        }
    }
}
