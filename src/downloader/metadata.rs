//! Persisting the local metadata record for a downloaded solution.

use super::params::DownloadParams;
use super::paths::resolve_location;
use super::payload::DownloadPayload;
use crate::error::{Error, Result};
use std::path::PathBuf;

/// Write the metadata record for `payload` into its exercise directory
///
/// The exercise directory is created if it does not exist yet; an existing
/// directory (and any existing record) is reused. Returns the record's path.
///
/// Fails without writing anything when the payload names a directory outside
/// the workspace.
pub async fn write_metadata(
    params: &DownloadParams,
    payload: &DownloadPayload,
) -> Result<PathBuf> {
    payload.ensure_safe_paths()?;
    let metadata = payload.metadata();
    let dir = resolve_location(&params.workspace, payload).metadata_dir();

    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|e| Error::filesystem(&dir, e))?;

    let path = metadata.write(&dir).await?;
    tracing::debug!(
        path = %path.display(),
        solution_id = %metadata.id,
        "wrote exercise metadata"
    );
    Ok(path)
}
