//! # solution-dl
//!
//! Download exercise solutions from a remote solutions API into a local
//! workspace.
//!
//! ## Design Philosophy
//!
//! solution-dl is designed to be:
//! - **Validated up front** - Parameters are checked before any request is made
//! - **Ownership-aware** - Team and mentee solutions land in their own subtrees
//! - **Library-first** - No CLI; callers own flag parsing and output
//! - **Sequential** - One request at a time, in a predictable order
//!
//! ## Quick Start
//!
//! ```no_run
//! use solution_dl::{DownloadParams, SolutionSelector, UserConfig, download};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = UserConfig::load(&UserConfig::default_path()?).await?;
//!
//!     let params = DownloadParams::from_selector(
//!         SolutionSelector::by_slug("hello-world").with_track("rust"),
//!         &config,
//!     )?;
//!
//!     let outcome = download(params).await?;
//!     outcome.write_summary(&mut std::io::stdout(), &mut std::io::stderr())?;
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Authenticated HTTP transport
pub mod client;
/// User configuration
pub mod config;
/// Solution download pipeline
pub mod downloader;
/// Error types
pub mod error;
/// Workspace layout and metadata records
pub mod workspace;

// Re-export commonly used types
pub use client::ApiClient;
pub use config::UserConfig;
pub use downloader::{
    Download, DownloadOutcome, DownloadParams, DownloadPayload, FilesReport, LegacyPathSanitizer,
    SolutionSelector, download, refresh_metadata,
};
pub use error::{ApiError, Error, ErrorCategory, Result, ValidationError};
pub use workspace::{ExerciseLocation, ExerciseMetadata};
