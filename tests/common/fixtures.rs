//! Mock API fixtures

use serde_json::{Value, json};
use solution_dl::UserConfig;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN: &str = "integration-token";

/// A mock API, a config pointing at it, and a workspace to download into
///
/// Keep the returned `TempDir` alive for the duration of the test.
pub async fn mock_environment() -> (MockServer, UserConfig, TempDir) {
    let mock_server = MockServer::start().await;
    let temp_dir = tempfile::tempdir().unwrap();

    let config = UserConfig {
        token: TOKEN.to_string(),
        apibaseurl: format!("{}/api/v1", mock_server.uri()),
        workspace: temp_dir.path().join("exercism"),
    };

    (mock_server, config, temp_dir)
}

/// Owner of a served solution, when it is not the requester
pub struct Owner<'a> {
    pub handle: &'a str,
    pub team: Option<&'a str>,
}

/// Solution payload served by the mock API
pub fn solution_json(
    mock_server: &MockServer,
    track: &str,
    exercise: &str,
    owner: Option<Owner<'_>>,
    files: &[&str],
) -> Value {
    let (handle, is_requester, team) = match owner {
        Some(owner) => (owner.handle, false, owner.team),
        None => ("requester", true, None),
    };

    json!({
        "solution": {
            "id": format!("{track}-{exercise}-id"),
            "url": format!("https://example.com/tracks/{track}/exercises/{exercise}"),
            "team": team.map(|slug| json!({"name": slug, "slug": slug})),
            "user": {"handle": handle, "is_requester": is_requester},
            "exercise": {
                "id": exercise,
                "instructions_url": "https://example.com/instructions",
                "auto_approve": true,
                "track": {"id": track, "language": track},
            },
            "file_download_base_url": format!("{}/files/", mock_server.uri()),
            "files": files,
            "iteration": {"submitted_at": "2020-02-02T12:00:00Z"},
        }
    })
}

/// Serve the solution lookup for `id` (`latest` for slug lookups), once
pub async fn serve_solution(mock_server: &MockServer, id: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/api/v1/solutions/{id}")))
        .and(header("Authorization", format!("Bearer {TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(mock_server)
        .await;
}

/// Serve a solution file under the download base URL
pub async fn serve_file(mock_server: &MockServer, name: &str, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/files/{name}")))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(mock_server)
        .await;
}
