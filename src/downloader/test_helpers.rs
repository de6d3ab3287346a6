//! Shared test helpers for exercising the download pipeline against a mock API.

use crate::config::UserConfig;
use crate::downloader::{DownloadParams, SolutionSelector};
use serde_json::{Value, json};
use std::path::Path;
use tempfile::{TempDir, tempdir};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub(crate) const TOKEN: &str = "test-token";

/// Path prefix of the mock API
pub(crate) const API_PREFIX: &str = "/v1";

/// Path prefix the mock API serves solution files from
pub(crate) const FILES_PREFIX: &str = "/files/";

/// Start a mock API and a temporary workspace.
/// Returns the server, the config pointing at both, and the tempdir (which must be kept alive).
pub(crate) async fn create_test_env() -> (MockServer, UserConfig, TempDir) {
    let mock_server = MockServer::start().await;
    let temp_dir = tempdir().unwrap();
    let config = user_config(&mock_server, temp_dir.path());
    (mock_server, config, temp_dir)
}

pub(crate) fn user_config(mock_server: &MockServer, workspace: &Path) -> UserConfig {
    UserConfig {
        token: TOKEN.to_string(),
        apibaseurl: format!("{}{}", mock_server.uri(), API_PREFIX),
        workspace: workspace.join("workspace"),
    }
}

pub(crate) fn params_for_slug(config: &UserConfig, slug: &str) -> DownloadParams {
    DownloadParams::from_selector(SolutionSelector::by_slug(slug), config).unwrap()
}

/// Options for a canned solution payload
pub(crate) struct SolutionFixture<'a> {
    pub(crate) id: &'a str,
    pub(crate) track: &'a str,
    pub(crate) exercise: &'a str,
    pub(crate) team: Option<&'a str>,
    pub(crate) handle: &'a str,
    pub(crate) is_requester: bool,
    pub(crate) files: &'a [&'a str],
}

impl Default for SolutionFixture<'_> {
    fn default() -> Self {
        Self {
            id: "bogus-id",
            track: "ruby",
            exercise: "bob",
            team: None,
            handle: "alice",
            is_requester: true,
            files: &[],
        }
    }
}

impl SolutionFixture<'_> {
    pub(crate) fn to_json(&self, mock_server: &MockServer) -> Value {
        let team = self
            .team
            .map(|slug| json!({"name": format!("Team {slug}"), "slug": slug}));

        json!({
            "solution": {
                "id": self.id,
                "url": format!("https://example.com/solutions/{}", self.id),
                "team": team,
                "user": {"handle": self.handle, "is_requester": self.is_requester},
                "exercise": {
                    "id": self.exercise,
                    "instructions_url": format!("https://example.com/{}", self.exercise),
                    "auto_approve": false,
                    "track": {"id": self.track, "language": self.track},
                },
                "file_download_base_url": format!("{}{}", mock_server.uri(), FILES_PREFIX),
                "files": self.files,
                "iteration": {"submitted_at": "2017-08-21T10:11:12Z"},
            }
        })
    }
}

/// Serve `body` for GET `{API_PREFIX}/solutions/{id}` with the given status
pub(crate) async fn mount_solution(mock_server: &MockServer, id: &str, status: u16, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("{API_PREFIX}/solutions/{id}")))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(mock_server)
        .await;
}

/// Serve `body` for GET `{FILES_PREFIX}{name}`
pub(crate) async fn mount_file(mock_server: &MockServer, name: &str, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path(format!("{FILES_PREFIX}{name}")))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(mock_server)
        .await;
}
