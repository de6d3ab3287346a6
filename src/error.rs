//! Error types for solution-dl
//!
//! This module provides the error handling for the library, including:
//! - Domain-specific error types (validation, remote API)
//! - A coarse [`ErrorCategory`] for callers deciding how to report a failure
//! - Machine-readable error codes
//! - Context information (configuration key, file path, HTTP status)

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for solution-dl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for solution-dl
///
/// This is the primary error type used throughout the library. Each variant includes
/// contextual information to help diagnose issues.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is missing or invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "workspace")
        key: Option<String>,
    },

    /// Download parameters failed validation
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The remote API rejected the request or returned an unusable response
    #[error("{0}")]
    Api(#[from] ApiError),

    /// Network error from the HTTP transport
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A request URL could not be constructed
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Creating a directory or writing a file failed
    #[error("failed to write {}: {source}", .path.display())]
    Filesystem {
        /// The path being created or written
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Parameter validation errors, raised before any network access
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Neither or both of slug and uuid were given
    #[error("{}", need_identifier_message(.from_local_exercise))]
    NeedSlugXorUuid {
        /// Whether the parameters came from an existing local exercise
        from_local_exercise: bool,
    },

    /// Track or team scoping was given without an exercise slug
    #[error("--track or --team requires --exercise (not --uuid)")]
    TrackOrTeamWithoutSlug,

    /// Solution files must never be written over an existing local exercise
    #[error("existing exercise files should not be overwritten")]
    LocalExerciseOverwrite,
}

fn need_identifier_message(from_local_exercise: &bool) -> &'static str {
    if *from_local_exercise {
        "need a 'slug' or a 'uuid'"
    } else {
        "need an --exercise name or a solution --uuid"
    }
}

/// Errors reported by (or decoding) the remote solutions API
#[derive(Debug, Error)]
pub enum ApiError {
    /// The response body was not a valid solution payload
    #[error("unable to parse API response - {0}")]
    Decode(#[source] serde_json::Error),

    /// The API token was rejected
    #[error(
        "unauthorized request. Please run the configure command. \
         You can find your API token at {settings_url}"
    )]
    Unauthorized {
        /// Where the user can look up their token
        settings_url: String,
    },

    /// The exercise exists on several tracks and no track was given
    #[error("{message}: {}", .possible_track_ids.join(", "))]
    TrackAmbiguous {
        /// Message returned by the API
        message: String,
        /// Tracks the exercise could belong to
        possible_track_ids: Vec<String>,
    },

    /// Any other error message returned by the API
    #[error("{message}")]
    Remote {
        /// HTTP status of the response
        status: u16,
        /// Message returned by the API
        message: String,
    },

    /// A successful response that does not identify a solution
    #[error("API response did not include a solution")]
    MissingSolution,

    /// A payload value used as a workspace directory name is not a single
    /// plain path segment
    #[error("API response has an unusable {field} {value:?}")]
    UnsafePathSegment {
        /// Payload field holding the value (e.g. "team")
        field: &'static str,
        /// Value as returned by the API
        value: String,
    },

    /// The exercise id cannot be turned into a legacy file name matcher
    #[error("unable to match files for exercise {slug:?} - {source}")]
    InvalidExerciseId {
        /// Exercise id as returned by the API
        slug: String,
        /// Regex compilation failure
        #[source]
        source: regex::Error,
    },
}

/// Coarse classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// User configuration is incomplete
    Configuration,
    /// Download parameters are inconsistent
    Validation,
    /// The remote API or the transport failed
    Api,
    /// Local directories or files could not be written
    Filesystem,
}

impl Error {
    /// Build a configuration error for a missing key
    pub fn missing_config(key: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.into()),
        }
    }

    /// Build a filesystem error for `path`
    pub fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Filesystem {
            path: path.into(),
            source,
        }
    }

    /// Get the category this error belongs to
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Config { .. } => ErrorCategory::Configuration,
            Error::Validation(_) => ErrorCategory::Validation,
            Error::Api(_) | Error::Network(_) | Error::InvalidUrl(_) => ErrorCategory::Api,
            Error::Filesystem { .. } | Error::Io(_) | Error::Serialization(_) => {
                ErrorCategory::Filesystem
            }
        }
    }

    /// Get the machine-readable error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Config { .. } => "config_error",
            Error::Validation(e) => match e {
                ValidationError::NeedSlugXorUuid { .. } => "need_slug_or_uuid",
                ValidationError::TrackOrTeamWithoutSlug => "track_or_team_without_slug",
                ValidationError::LocalExerciseOverwrite => "local_exercise_overwrite",
            },
            Error::Api(e) => match e {
                ApiError::Decode(_) => "invalid_response",
                ApiError::Unauthorized { .. } => "unauthorized",
                ApiError::TrackAmbiguous { .. } => "track_ambiguous",
                ApiError::Remote { .. } => "api_error",
                ApiError::MissingSolution => "missing_solution",
                ApiError::UnsafePathSegment { .. } => "unsafe_path_segment",
                ApiError::InvalidExerciseId { .. } => "invalid_exercise_id",
            },
            Error::Network(_) => "network_error",
            Error::InvalidUrl(_) => "invalid_url",
            Error::Filesystem { .. } => "filesystem_error",
            Error::Io(_) => "io_error",
            Error::Serialization(_) => "serialization_error",
        }
    }
}
