//! Workspace assertions

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// All regular files under `root`, relative to it and sorted
pub fn files_under(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.path().strip_prefix(root).ok().map(Path::to_path_buf))
        .collect();
    files.sort();
    files
}

/// Assert the tree under `root` holds exactly `expected` (relative, `/`-separated)
pub fn assert_tree(root: &Path, expected: &[&str]) {
    let mut expected: Vec<PathBuf> = expected
        .iter()
        .map(|name| name.split('/').collect::<PathBuf>())
        .collect();
    expected.sort();

    assert_eq!(
        files_under(root),
        expected,
        "unexpected files under {}",
        root.display()
    );
}
