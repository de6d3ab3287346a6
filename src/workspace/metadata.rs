//! Exercise metadata records
//!
//! The metadata record ties an exercise directory to the remote solution it was
//! downloaded from. It is stored as JSON in `.exercism/metadata.json` inside the
//! exercise directory. Older clients wrote the same record to `.solution.json`
//! at the top of the exercise directory; that location is still read.

use super::{ExerciseLocation, solution_root};
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Hidden directory holding the metadata record
pub const METADATA_DIR: &str = ".exercism";

/// File name of the metadata record inside [`METADATA_DIR`]
pub const METADATA_FILE: &str = "metadata.json";

/// Metadata file name used by older clients, relative to the exercise directory
pub const LEGACY_METADATA_FILE: &str = ".solution.json";

/// Local record of a downloaded solution
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExerciseMetadata {
    /// Track identifier
    pub track: String,

    /// Exercise slug
    pub exercise: String,

    /// Remote solution id
    pub id: String,

    /// Team slug, empty for personal solutions
    #[serde(skip_serializing_if = "String::is_empty")]
    pub team: String,

    /// Web URL of the solution
    pub url: String,

    /// Handle of the solution's owner
    pub handle: String,

    /// Whether the solution belongs to the user who downloaded it
    pub is_requester: bool,

    /// When the latest iteration was submitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,

    /// Whether the exercise is approved automatically
    pub auto_approve: bool,

    /// Exercise directory this record was read from (not persisted)
    #[serde(skip)]
    pub dir: PathBuf,
}

impl ExerciseMetadata {
    /// Location of the exercise this record describes, under `workspace`
    pub fn location(&self, workspace: &Path) -> ExerciseLocation {
        let root = solution_root(workspace, &self.team, &self.handle, self.is_requester);
        ExerciseLocation::new(root, self.track.clone(), self.exercise.clone())
    }

    /// Write the record into exercise directory `dir`
    ///
    /// Creates the hidden metadata directory if needed and overwrites any
    /// existing record. Returns the path written.
    pub async fn write(&self, dir: &Path) -> Result<PathBuf> {
        let metadata_dir = dir.join(METADATA_DIR);
        tokio::fs::create_dir_all(&metadata_dir)
            .await
            .map_err(|e| Error::filesystem(&metadata_dir, e))?;

        let path = metadata_dir.join(METADATA_FILE);
        let json = serde_json::to_vec_pretty(self)?;
        tokio::fs::write(&path, json)
            .await
            .map_err(|e| Error::filesystem(&path, e))?;

        Ok(path)
    }

    /// Read the record stored in exercise directory `dir`
    ///
    /// Falls back to the legacy record location when no current record exists.
    pub async fn read(dir: &Path) -> Result<Self> {
        let current = dir.join(METADATA_DIR).join(METADATA_FILE);
        let content = match tokio::fs::read(&current).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let legacy = dir.join(LEGACY_METADATA_FILE);
                tracing::debug!(
                    path = %legacy.display(),
                    "no metadata record, trying legacy location"
                );
                tokio::fs::read(&legacy).await?
            }
            Err(e) => return Err(Error::Io(e)),
        };

        let mut metadata: Self = serde_json::from_slice(&content)?;
        metadata.dir = dir.to_path_buf();
        Ok(metadata)
    }

    /// Whether exercise directory `dir` has a metadata record (current or legacy)
    pub async fn exists(dir: &Path) -> bool {
        let current = dir.join(METADATA_DIR).join(METADATA_FILE);
        let legacy = dir.join(LEGACY_METADATA_FILE);
        tokio::fs::try_exists(&current).await.unwrap_or(false)
            || tokio::fs::try_exists(&legacy).await.unwrap_or(false)
    }
}
