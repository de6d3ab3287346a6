//! Download request parameters and their validation.

use crate::config::{UserConfig, welcome_please_configure};
use crate::error::{Error, Result, ValidationError};
use crate::workspace::ExerciseLocation;
use std::path::PathBuf;

/// Identifiers supplied explicitly by the caller (e.g. from command-line flags)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SolutionSelector {
    /// Solution uuid
    pub uuid: String,
    /// Exercise slug
    pub slug: String,
    /// Track scoping (requires `slug`)
    pub track: String,
    /// Team scoping (requires `slug`)
    pub team: String,
}

impl SolutionSelector {
    /// Select a solution by its uuid
    pub fn by_uuid(uuid: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            ..Default::default()
        }
    }

    /// Select the latest solution for an exercise slug
    pub fn by_slug(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            ..Default::default()
        }
    }

    /// Scope the lookup to a track
    pub fn with_track(mut self, track: impl Into<String>) -> Self {
        self.track = track.into();
        self
    }

    /// Scope the lookup to a team
    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.team = team.into();
        self
    }
}

/// Validated description of one download request
///
/// Construct with [`DownloadParams::from_selector`] or
/// [`DownloadParams::from_exercise`]; both validate before returning, so a
/// value of this type always satisfies the identifier and configuration rules.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloadParams {
    pub(crate) slug: String,
    pub(crate) uuid: String,
    pub(crate) track: String,
    pub(crate) team: String,
    pub(crate) token: String,
    pub(crate) api_base_url: String,
    pub(crate) workspace: PathBuf,
    pub(crate) from_local_exercise: bool,
}

impl DownloadParams {
    /// Build parameters from explicit identifiers and the user configuration
    pub fn from_selector(selector: SolutionSelector, config: &UserConfig) -> Result<Self> {
        let params = Self {
            slug: selector.slug,
            uuid: selector.uuid,
            track: selector.track,
            team: selector.team,
            token: config.token.clone(),
            api_base_url: config.apibaseurl.clone(),
            workspace: config.workspace.clone(),
            from_local_exercise: false,
        };
        params.validate()?;
        Ok(params)
    }

    /// Build parameters that refer to an exercise already in the workspace
    ///
    /// Such parameters can refresh metadata but never overwrite solution files.
    pub fn from_exercise(exercise: &ExerciseLocation, config: &UserConfig) -> Result<Self> {
        let params = Self {
            slug: exercise.slug.clone(),
            uuid: String::new(),
            track: exercise.track.clone(),
            team: String::new(),
            token: config.token.clone(),
            api_base_url: config.apibaseurl.clone(),
            workspace: config.workspace.clone(),
            from_local_exercise: true,
        };
        params.validate()?;
        Ok(params)
    }

    /// Exercise slug, empty when resolving by uuid
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Solution uuid, empty when resolving by slug
    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    /// Track scoping, possibly empty
    pub fn track(&self) -> &str {
        &self.track
    }

    /// Team scoping, possibly empty
    pub fn team(&self) -> &str {
        &self.team
    }

    /// API token
    pub fn token(&self) -> &str {
        &self.token
    }

    /// API base URL
    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    /// Workspace root
    pub fn workspace(&self) -> &std::path::Path {
        &self.workspace
    }

    /// Whether these parameters came from an existing local exercise
    pub fn from_local_exercise(&self) -> bool {
        self.from_local_exercise
    }

    /// Check the parameter invariants; the first violation wins
    fn validate(&self) -> Result<()> {
        self.needs_slug_xor_uuid()?;
        self.needs_user_config_values()?;
        self.needs_slug_when_given_track_or_team()
    }

    fn needs_slug_xor_uuid(&self) -> Result<()> {
        if self.slug.is_empty() == self.uuid.is_empty() {
            return Err(ValidationError::NeedSlugXorUuid {
                from_local_exercise: self.from_local_exercise,
            }
            .into());
        }
        Ok(())
    }

    fn needs_user_config_values(&self) -> Result<()> {
        if self.token.is_empty() {
            return Err(Error::missing_config(
                "token",
                welcome_please_configure(&self.api_base_url),
            ));
        }
        if self.api_base_url.is_empty() {
            return Err(Error::missing_config("apibaseurl", "missing 'apibaseurl'"));
        }
        if self.workspace.as_os_str().is_empty() {
            return Err(Error::missing_config("workspace", "missing 'workspace'"));
        }
        Ok(())
    }

    fn needs_slug_when_given_track_or_team(&self) -> Result<()> {
        if (!self.track.is_empty() || !self.team.is_empty()) && self.slug.is_empty() {
            return Err(ValidationError::TrackOrTeamWithoutSlug.into());
        }
        Ok(())
    }
}
