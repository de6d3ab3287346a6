//! Solution lookup: request construction, response decoding and status handling.

use super::params::DownloadParams;
use crate::client::ApiClient;
use crate::config::settings_url;
use crate::error::{ApiError, Result};
use crate::workspace::{ExerciseMetadata, is_plain_name};
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::{Deserialize, Deserializer};
use url::Url;

/// Path segment asking the API for the most recent solution
pub const LATEST_SOLUTION: &str = "latest";

/// Error type the API uses when an exercise slug matches several tracks
const TRACK_AMBIGUOUS: &str = "track_ambiguous";

/// Decode `null` the same way as a missing member
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of a solution lookup response
///
/// The same shape is returned for successes and failures; on failure `solution`
/// is typically empty and `error` is filled in.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct DownloadPayload {
    /// The requested solution
    #[serde(default, deserialize_with = "null_as_default")]
    pub solution: Solution,
    /// Error details, empty on success
    #[serde(default, deserialize_with = "null_as_default")]
    pub error: PayloadError,
}

/// Solution description returned by the API
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Solution {
    /// Remote solution id
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    /// Web URL of the solution
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    /// Owning team, empty for personal solutions
    #[serde(default, deserialize_with = "null_as_default")]
    pub team: Team,
    /// Owner of the solution
    #[serde(default, deserialize_with = "null_as_default")]
    pub user: User,
    /// Exercise the solution is for
    #[serde(default, deserialize_with = "null_as_default")]
    pub exercise: Exercise,
    /// Prefix that each entry of `files` is appended to
    #[serde(default, deserialize_with = "null_as_default")]
    pub file_download_base_url: String,
    /// Relative file names of the solution
    #[serde(default, deserialize_with = "null_as_default")]
    pub files: Vec<String>,
    /// Latest iteration
    #[serde(default, deserialize_with = "null_as_default")]
    pub iteration: Iteration,
}

/// Team a solution belongs to
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Team {
    /// Display name
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Team slug, used in workspace paths
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,
}

/// Owner of a solution
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct User {
    /// User handle
    #[serde(default, deserialize_with = "null_as_default")]
    pub handle: String,
    /// Whether the solution belongs to the user making the request
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_requester: bool,
}

/// Exercise a solution is for
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Exercise {
    /// Exercise slug
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    /// Where the exercise instructions can be read
    #[serde(default, deserialize_with = "null_as_default")]
    pub instructions_url: String,
    /// Whether the exercise is approved automatically
    #[serde(default, deserialize_with = "null_as_default")]
    pub auto_approve: bool,
    /// Track the exercise belongs to
    #[serde(default, deserialize_with = "null_as_default")]
    pub track: Track,
}

/// Track an exercise belongs to
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Track {
    /// Track identifier, used in workspace paths
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    /// Display name of the language
    #[serde(default, deserialize_with = "null_as_default")]
    pub language: String,
}

/// Latest iteration of a solution
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Iteration {
    /// RFC 3339 timestamp, absent when nothing has been submitted
    #[serde(default)]
    pub submitted_at: Option<String>,
}

/// Error member of a lookup response
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct PayloadError {
    /// Machine-readable error type (e.g. "track_ambiguous")
    #[serde(default, rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    /// Human-readable message
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    /// Candidate tracks for an ambiguous exercise slug
    #[serde(default, deserialize_with = "null_as_default")]
    pub possible_track_ids: Vec<String>,
}

impl DownloadPayload {
    /// Project the solution into the local metadata record
    pub fn metadata(&self) -> ExerciseMetadata {
        let solution = &self.solution;
        ExerciseMetadata {
            auto_approve: solution.exercise.auto_approve,
            track: solution.exercise.track.id.clone(),
            team: solution.team.slug.clone(),
            exercise: solution.exercise.id.clone(),
            id: solution.id.clone(),
            url: solution.url.clone(),
            handle: solution.user.handle.clone(),
            is_requester: solution.user.is_requester,
            submitted_at: solution
                .iteration
                .submitted_at
                .as_deref()
                .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
                .map(|t| t.with_timezone(&Utc)),
            dir: Default::default(),
        }
    }

    /// Check the success invariant of a 200 response
    fn ensure_solution(&self) -> Result<()> {
        if !self.error.message.is_empty() {
            return Err(ApiError::Remote {
                status: StatusCode::OK.as_u16(),
                message: self.error.message.clone(),
            }
            .into());
        }
        if self.solution.id.is_empty() {
            return Err(ApiError::MissingSolution.into());
        }
        Ok(())
    }

    /// Check that every value used as a workspace directory name is a plain
    /// name, so the exercise directory stays under the workspace
    ///
    /// The team slug is checked when present and the handle when the solution
    /// belongs to someone else; the track and exercise ids are always checked.
    pub(crate) fn ensure_safe_paths(&self) -> Result<()> {
        let solution = &self.solution;
        let mut segments = vec![
            ("track", &solution.exercise.track.id),
            ("exercise", &solution.exercise.id),
        ];
        if !solution.team.slug.is_empty() {
            segments.push(("team", &solution.team.slug));
        }
        if !solution.user.is_requester {
            segments.push(("handle", &solution.user.handle));
        }

        match segments.into_iter().find(|(_, value)| !is_plain_name(value)) {
            Some((field, value)) => Err(ApiError::UnsafePathSegment {
                field,
                value: value.clone(),
            }
            .into()),
            None => Ok(()),
        }
    }
}

/// Build the lookup URL for `params`
///
/// `{apibaseurl}/solutions/{uuid}` when resolving by uuid. Otherwise
/// `{apibaseurl}/solutions/latest` with `exercise_id` and, when set,
/// `track_id` and `team_id` query parameters.
pub fn solution_url(params: &DownloadParams) -> Result<Url> {
    let id = if params.uuid.is_empty() {
        LATEST_SOLUTION
    } else {
        params.uuid.as_str()
    };

    let mut url = Url::parse(&format!("{}/solutions/{}", params.api_base_url, id))?;

    if params.uuid.is_empty() {
        let mut query = url.query_pairs_mut();
        query.append_pair("exercise_id", &params.slug);
        if !params.track.is_empty() {
            query.append_pair("track_id", &params.track);
        }
        if !params.team.is_empty() {
            query.append_pair("team_id", &params.team);
        }
    }

    Ok(url)
}

/// Look up the solution described by `params`
///
/// The body is decoded before the status is inspected because error responses
/// carry their explanation in the payload's `error` member.
pub async fn fetch_payload(client: &ApiClient, params: &DownloadParams) -> Result<DownloadPayload> {
    let url = solution_url(params)?;
    tracing::debug!(url = %url, "requesting solution");

    let response = client.get(url).await?;
    let status = response.status();
    let body = response.bytes().await?;

    let payload: DownloadPayload = serde_json::from_slice(&body).map_err(ApiError::Decode)?;

    if status == StatusCode::UNAUTHORIZED {
        return Err(ApiError::Unauthorized {
            settings_url: settings_url(&params.api_base_url),
        }
        .into());
    }

    if status != StatusCode::OK {
        let PayloadError {
            kind,
            message,
            possible_track_ids,
        } = payload.error;
        let error = if kind == TRACK_AMBIGUOUS {
            ApiError::TrackAmbiguous {
                message,
                possible_track_ids,
            }
        } else {
            ApiError::Remote {
                status: status.as_u16(),
                message,
            }
        };
        return Err(error.into());
    }

    payload.ensure_solution()?;
    payload.ensure_safe_paths()?;

    tracing::info!(
        solution_id = %payload.solution.id,
        track = %payload.solution.exercise.track.id,
        exercise = %payload.solution.exercise.id,
        "resolved solution"
    );
    Ok(payload)
}
