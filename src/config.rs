//! User configuration for solution-dl
//!
//! The user configuration holds the three values every download needs: the API
//! token, the API base URL, and the workspace directory. It is persisted as a
//! small JSON document (`user.json`) in the platform config directory.

use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// API base URL used when none is configured
pub const DEFAULT_API_BASE_URL: &str = "https://api.exercism.io/v1";

/// Environment variable that overrides the config directory
pub const CONFIG_HOME_ENV: &str = "SOLUTION_DL_CONFIG_HOME";

/// File name of the user configuration inside the config directory
const USER_CONFIG_FILE: &str = "user.json";

/// Directory name created under the platform config directory
const CONFIG_DIR_NAME: &str = "solution-dl";

/// Legacy API host whose site lives on a different domain
const LEGACY_API_BASE_URL: &str = DEFAULT_API_BASE_URL;
const LEGACY_SITE_URL: &str = "https://exercism.io";

/// Persisted user configuration
///
/// Every field defaults to empty; an empty value means "not configured" and is
/// reported when download parameters are validated.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserConfig {
    /// API token
    #[serde(default)]
    pub token: String,

    /// Base URL of the solutions API (e.g. "https://api.exercism.io/v1")
    #[serde(default)]
    pub apibaseurl: String,

    /// Root directory for downloaded exercises
    #[serde(default)]
    pub workspace: PathBuf,
}

impl UserConfig {
    /// Default location of the user configuration file
    ///
    /// `$SOLUTION_DL_CONFIG_HOME/user.json` when the variable is set, otherwise
    /// `user.json` inside a `solution-dl` directory under the platform config dir.
    pub fn default_path() -> Result<PathBuf> {
        if let Some(home) = std::env::var_os(CONFIG_HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(PathBuf::from(home).join(USER_CONFIG_FILE));
        }

        let base = dirs::config_dir().ok_or_else(|| Error::Config {
            message: "could not determine the user config directory".to_string(),
            key: None,
        })?;
        Ok(base.join(CONFIG_DIR_NAME).join(USER_CONFIG_FILE))
    }

    /// Load the configuration from `path`
    ///
    /// A missing file yields the default (empty) configuration.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = match tokio::fs::read(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no user config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(Error::Io(e)),
        };

        let config = serde_json::from_slice(&content).map_err(|e| Error::Config {
            message: format!("failed to parse {}: {}", path.display(), e),
            key: None,
        })?;
        Ok(config)
    }

    /// Save the configuration to `path`, creating parent directories as needed
    pub async fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| Error::filesystem(parent, e))?;
        }

        let json = serde_json::to_vec_pretty(self)?;
        tokio::fs::write(path, json)
            .await
            .map_err(|e| Error::filesystem(path, e))?;
        tracing::debug!(path = %path.display(), "saved user config");
        Ok(())
    }
}

/// Infer the human-facing site URL from an API base URL
///
/// An empty value falls back to [`DEFAULT_API_BASE_URL`]. The legacy API host
/// maps to its own site domain; anything else keeps only the scheme and host.
///
/// # Examples
///
/// ```
/// use solution_dl::config::infer_site_url;
///
/// assert_eq!(infer_site_url("https://api.example.com/v2"), "https://api.example.com");
/// assert_eq!(infer_site_url("http://localhost:3000/api/v1"), "http://localhost:3000");
/// ```
pub fn infer_site_url(api_base_url: &str) -> String {
    let api_base_url = if api_base_url.is_empty() {
        DEFAULT_API_BASE_URL
    } else {
        api_base_url
    };

    if api_base_url == LEGACY_API_BASE_URL {
        return LEGACY_SITE_URL.to_string();
    }

    match Regex::new(r"^(https?://[^/]*).*") {
        Ok(re) => re.replace(api_base_url, "$1").into_owned(),
        Err(_) => api_base_url.to_string(),
    }
}

/// Settings page URL for the site behind `api_base_url`
pub fn settings_url(api_base_url: &str) -> String {
    format!("{}/my/settings", infer_site_url(api_base_url))
}

/// Message shown when no API token has been configured
pub(crate) fn welcome_please_configure(api_base_url: &str) -> String {
    format!(
        "missing 'token'\n\n    \
         Welcome! To get started, you need to configure the tool with your API token.\n    \
         Find your token at\n\n        {}\n\n    \
         Then run the configure command with --token=YOUR_TOKEN\n",
        settings_url(api_base_url)
    )
}
