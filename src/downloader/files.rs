//! Fetching and writing the files of a solution.

use super::params::DownloadParams;
use super::paths::resolve_location;
use super::payload::DownloadPayload;
use super::sanitize::LegacyPathSanitizer;
use crate::client::ApiClient;
use crate::error::{Error, Result, ValidationError};
use reqwest::StatusCode;
use reqwest::header::CONTENT_LENGTH;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

/// Outcome of writing a solution's files
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilesReport {
    /// Absolute paths of the files written, in list order
    pub written: Vec<PathBuf>,
    /// Listed file names that were not written (non-200 or empty responses)
    pub skipped: Vec<String>,
}

/// What to do with one file response
enum FileResponse {
    Write(reqwest::Response),
    Skip,
}

/// Fetch every file of the solution and write it into the exercise directory
///
/// Files are fetched one at a time in list order. A file whose response is not
/// 200, or whose `Content-Length` is `0`, is skipped without an error. Any
/// transport or filesystem failure stops the batch; files already written are
/// left in place.
///
/// Refuses to run for parameters that came from an existing local exercise,
/// whose files must never be overwritten, and for payloads whose team, handle,
/// track or exercise would place the exercise directory outside the workspace.
pub async fn write_solution_files(
    client: &ApiClient,
    params: &DownloadParams,
    payload: &DownloadPayload,
) -> Result<FilesReport> {
    if params.from_local_exercise {
        return Err(ValidationError::LocalExerciseOverwrite.into());
    }
    payload.ensure_safe_paths()?;

    let solution = &payload.solution;
    let exercise_dir = resolve_location(&params.workspace, payload).dir();
    let sanitizer = LegacyPathSanitizer::new(&solution.exercise.id)?;
    let mut report = FilesReport::default();

    for file in &solution.files {
        let url = client.request_url(&format!("{}{}", solution.file_download_base_url, file))?;

        let response = match classify(client.get(url).await?) {
            FileResponse::Write(response) => response,
            FileResponse::Skip => {
                report.skipped.push(file.clone());
                continue;
            }
        };

        let relative = sanitizer.sanitize(file);
        if relative.as_os_str().is_empty() {
            report.skipped.push(file.clone());
            continue;
        }

        let destination = exercise_dir.join(&relative);
        write_response(response, &destination).await?;
        tracing::debug!(file = %file, path = %destination.display(), "wrote solution file");
        report.written.push(destination);
    }

    Ok(report)
}

fn classify(response: reqwest::Response) -> FileResponse {
    if response.status() != StatusCode::OK {
        return FileResponse::Skip;
    }

    let empty = response
        .headers()
        .get(CONTENT_LENGTH)
        .is_some_and(|length| length.as_bytes() == b"0");
    if empty {
        return FileResponse::Skip;
    }

    FileResponse::Write(response)
}

/// Stream the response body into `destination`, creating parent directories
async fn write_response(mut response: reqwest::Response, destination: &Path) -> Result<()> {
    if let Some(parent) = destination.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| Error::filesystem(parent, e))?;
    }

    let mut file = tokio::fs::File::create(destination)
        .await
        .map_err(|e| Error::filesystem(destination, e))?;

    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk)
            .await
            .map_err(|e| Error::filesystem(destination, e))?;
    }

    file.flush()
        .await
        .map_err(|e| Error::filesystem(destination, e))?;
    Ok(())
}
