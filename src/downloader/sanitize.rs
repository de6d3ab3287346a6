//! Normalization of solution file names written by older clients.
//!
//! Two historical bugs leak into the file lists returned by the API:
//!
//! - Exercise directories were once allowed a numeric suffix (`bob-2`) so several
//!   copies of an exercise could coexist. Files submitted from such a directory
//!   carry the directory as a leading path segment.
//! - A Windows client submitted paths with `\` separators embedded in what
//!   should be a portable relative name.

use crate::error::{ApiError, Result};
use crate::workspace::is_drive_prefix;
use regex::{Regex, RegexBuilder};
use std::path::PathBuf;

/// Compiled size limit for the suffix matcher
const MATCHER_SIZE_LIMIT: usize = 1024 * 1024;

/// Rewrites listed file names into paths relative to the exercise directory
#[derive(Clone, Debug)]
pub struct LegacyPathSanitizer {
    numeric_suffix: Regex,
}

impl LegacyPathSanitizer {
    /// Create a sanitizer for files of the exercise `slug`
    pub fn new(slug: &str) -> Result<Self> {
        let pattern = format!(r"\A(?:.*[/\\])?{}-\d*/", regex::escape(slug));
        let numeric_suffix = RegexBuilder::new(&pattern)
            .size_limit(MATCHER_SIZE_LIMIT)
            .build()
            .map_err(|source| ApiError::InvalidExerciseId {
                slug: slug.to_string(),
                source,
            })?;
        Ok(Self { numeric_suffix })
    }

    /// Apply both string rewrites, keeping `/` as the separator
    ///
    /// The numeric-suffix directory is stripped first, on the name as listed;
    /// backslashes are then turned into forward slashes.
    ///
    /// # Examples
    ///
    /// ```
    /// use solution_dl::downloader::LegacyPathSanitizer;
    ///
    /// let sanitizer = LegacyPathSanitizer::new("exercise").unwrap();
    /// assert_eq!(sanitizer.normalize("exercise-2/foo/bar.rb"), "foo/bar.rb");
    /// assert_eq!(sanitizer.normalize("foo\\bar.py"), "foo/bar.py");
    /// ```
    pub fn normalize(&self, file: &str) -> String {
        let file = self.numeric_suffix.replace(file, "");
        file.replace('\\', "/")
    }

    /// Sanitize `file` into a relative path using the host's separators
    ///
    /// Only normal segments survive: empty, `.` and `..` segments are dropped,
    /// as is any leading root or drive, so the result always stays below the
    /// exercise directory it is joined onto.
    pub fn sanitize(&self, file: &str) -> PathBuf {
        to_relative_path(&self.normalize(file))
    }
}

/// Turn a `/`-separated name into a relative native path
fn to_relative_path(file: &str) -> PathBuf {
    let mut segments = file
        .split('/')
        .filter(|segment| !matches!(*segment, "" | "." | ".."))
        .peekable();

    segments.next_if(|segment| is_drive_prefix(segment));
    segments.collect()
}
