//! Solution download pipeline split into focused submodules.
//!
//! A download runs in a fixed order:
//! - [`params`] - Validated request parameters
//! - [`payload`] - Solution lookup against the API
//! - [`paths`] - Ownership-based destination directory
//! - [`metadata`] - Local metadata record
//! - [`files`] - Solution files, normalized by [`sanitize`]
//!
//! Everything runs sequentially on the caller's task: one request for the
//! payload, then one request per file.

mod files;
mod metadata;
mod params;
mod paths;
mod payload;
mod sanitize;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;

pub use files::{FilesReport, write_solution_files};
pub use metadata::write_metadata;
pub use params::{DownloadParams, SolutionSelector};
pub use paths::resolve_location;
pub use payload::{
    DownloadPayload, Exercise, Iteration, LATEST_SOLUTION, PayloadError, Solution, Team, Track,
    User, fetch_payload, solution_url,
};
pub use sanitize::LegacyPathSanitizer;

use crate::client::ApiClient;
use crate::error::{Result, ValidationError};
use crate::workspace::{ExerciseLocation, ExerciseMetadata};
use std::io::Write;
use std::path::PathBuf;

/// A resolved solution: the parameters that asked for it and the payload the
/// API returned
///
/// Both halves are kept separate; every writer takes them as explicit inputs.
#[derive(Clone, Debug)]
pub struct Download {
    params: DownloadParams,
    payload: DownloadPayload,
}

impl Download {
    /// Look up the solution described by `params`
    pub async fn fetch(client: &ApiClient, params: DownloadParams) -> Result<Self> {
        let payload = fetch_payload(client, &params).await?;
        Ok(Self { params, payload })
    }

    /// Parameters the download was requested with
    pub fn params(&self) -> &DownloadParams {
        &self.params
    }

    /// Payload returned by the API
    pub fn payload(&self) -> &DownloadPayload {
        &self.payload
    }

    /// Where the exercise belongs in the workspace
    pub fn location(&self) -> ExerciseLocation {
        resolve_location(&self.params.workspace, &self.payload)
    }

    /// Local metadata record for the solution
    pub fn metadata(&self) -> ExerciseMetadata {
        self.payload.metadata()
    }

    /// Write the metadata record, returning its path
    pub async fn write_metadata(&self) -> Result<PathBuf> {
        write_metadata(&self.params, &self.payload).await
    }

    /// Fetch and write the solution files
    pub async fn write_solution_files(&self, client: &ApiClient) -> Result<FilesReport> {
        write_solution_files(client, &self.params, &self.payload).await
    }
}

/// Result of a completed download
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloadOutcome {
    /// Where the exercise was written
    pub location: ExerciseLocation,
    /// Path of the metadata record
    pub metadata_path: PathBuf,
    /// Files written and skipped
    pub files: FilesReport,
}

impl DownloadOutcome {
    /// Exercise directory the solution was downloaded to
    pub fn dir(&self) -> PathBuf {
        self.location.dir()
    }

    /// Report where the exercise went
    ///
    /// The heading goes to `err` and the bare directory path to `out`, so the
    /// path alone can be captured by a script.
    pub fn write_summary<O: Write, E: Write>(
        &self,
        out: &mut O,
        err: &mut E,
    ) -> std::io::Result<()> {
        writeln!(err, "\nDownloaded to")?;
        writeln!(out, "{}", self.dir().display())?;
        Ok(())
    }
}

/// Download a solution: look it up, then write its metadata and files
///
/// Parameters built from a local exercise are rejected before any request is
/// made, since their files must not be overwritten; use [`refresh_metadata`]
/// for those.
pub async fn download(params: DownloadParams) -> Result<DownloadOutcome> {
    if params.from_local_exercise {
        return Err(ValidationError::LocalExerciseOverwrite.into());
    }

    let client = ApiClient::new(params.token.clone())?;
    let download = Download::fetch(&client, params).await?;

    let metadata_path = download.write_metadata().await?;
    let files = download.write_solution_files(&client).await?;
    let location = download.location();

    tracing::info!(
        exercise = %location,
        written = files.written.len(),
        "download complete"
    );

    Ok(DownloadOutcome {
        location,
        metadata_path,
        files,
    })
}

/// Look up the solution for `params` and rewrite only its metadata record
///
/// Solution files are never touched, so this is safe for parameters built with
/// [`DownloadParams::from_exercise`].
pub async fn refresh_metadata(params: DownloadParams) -> Result<ExerciseMetadata> {
    let client = ApiClient::new(params.token.clone())?;
    let download = Download::fetch(&client, params).await?;

    download.write_metadata().await?;
    let mut metadata = download.metadata();
    metadata.dir = download.location().metadata_dir();
    Ok(metadata)
}
