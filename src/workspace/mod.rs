//! Workspace layout conventions
//!
//! Exercises live under the workspace at `{root}/{track}/{slug}`, where `root`
//! is the workspace itself or a team/user subdirectory of it (see
//! [`solution_root`]). Each exercise directory carries a metadata record
//! describing the remote solution it came from.

mod metadata;

pub use metadata::{ExerciseMetadata, LEGACY_METADATA_FILE, METADATA_DIR, METADATA_FILE};

use std::path::{Component, Path, PathBuf};

/// Where the files for one exercise live
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExerciseLocation {
    /// Directory containing track directories (workspace or a team/user subdirectory)
    pub root: PathBuf,
    /// Track identifier (e.g. "rust")
    pub track: String,
    /// Exercise slug (e.g. "hello-world")
    pub slug: String,
}

impl ExerciseLocation {
    /// Create a location from its parts
    pub fn new(
        root: impl Into<PathBuf>,
        track: impl Into<String>,
        slug: impl Into<String>,
    ) -> Self {
        Self {
            root: root.into(),
            track: track.into(),
            slug: slug.into(),
        }
    }

    /// Infer the location of an existing exercise directory
    ///
    /// The directory name is the slug, its parent is the track, and everything
    /// above that is the root. Returns `None` when `dir` is too shallow.
    pub fn from_dir(dir: &Path) -> Option<Self> {
        let slug = normal_name(dir)?;
        let track_dir = dir.parent()?;
        let track = normal_name(track_dir)?;
        let root = track_dir.parent()?;

        Some(Self::new(root, track, slug))
    }

    /// The exercise directory, `{root}/{track}/{slug}`
    pub fn dir(&self) -> PathBuf {
        self.root.join(&self.track).join(&self.slug)
    }

    /// Directory that receives the metadata record
    ///
    /// Metadata is written relative to the exercise directory itself.
    pub fn metadata_dir(&self) -> PathBuf {
        self.dir()
    }

    /// Full path of the metadata record
    pub fn metadata_path(&self) -> PathBuf {
        self.metadata_dir().join(METADATA_DIR).join(METADATA_FILE)
    }
}

impl std::fmt::Display for ExerciseLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.track, self.slug)
    }
}

/// Root directory for a solution given its ownership
///
/// Team solutions go under `teams/{team}`; solutions that belong to someone
/// other than the requesting user go under `users/{handle}`.
///
/// Callers must pass plain names (see [`is_plain_name`]); an absolute or `..`
/// component would move the result outside `workspace`.
pub fn solution_root(workspace: &Path, team: &str, handle: &str, is_requester: bool) -> PathBuf {
    let mut root = workspace.to_path_buf();
    if !team.is_empty() {
        root.push("teams");
        root.push(team);
    }
    if !is_requester {
        root.push("users");
        root.push(handle);
    }
    root
}

/// Whether `name` can be joined onto a directory as exactly one child entry
///
/// Rejects empty names, `.` and `..`, anything containing `/` or `\`, and
/// drive designators such as `C:`.
pub fn is_plain_name(name: &str) -> bool {
    if name.contains(['/', '\\']) || is_drive_prefix(name) {
        return false;
    }

    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// A Windows drive designator such as `C:`
pub(crate) fn is_drive_prefix(segment: &str) -> bool {
    let bytes = segment.as_bytes();
    bytes.len() == 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

fn normal_name(path: &Path) -> Option<String> {
    match path.components().next_back()? {
        Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
        _ => None,
    }
}
