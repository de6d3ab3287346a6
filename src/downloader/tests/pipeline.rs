use super::*;
use wiremock::matchers::{method, path_regex};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_download_writes_metadata_and_files() {
    let (mock_server, config, _temp_dir) = create_test_env().await;
    mount_solution(
        &mock_server,
        "latest",
        200,
        SolutionFixture {
            files: &["bob.rb", "README.md", "missing.rb"],
            ..Default::default()
        }
        .to_json(&mock_server),
    )
    .await;
    mount_file(&mock_server, "bob.rb", 200, "class Bob; end\n").await;
    mount_file(&mock_server, "README.md", 200, "# Bob\n").await;
    mount_file(&mock_server, "missing.rb", 404, "").await;

    let outcome = download(params_for_slug(&config, "bob")).await.unwrap();

    let dir = config.workspace.join("ruby").join("bob");
    assert_eq!(outcome.dir(), dir);
    assert_eq!(outcome.location.to_string(), "ruby/bob");
    assert_eq!(
        outcome.metadata_path,
        dir.join(".exercism").join("metadata.json")
    );
    assert_eq!(
        outcome.files.written,
        vec![dir.join("bob.rb"), dir.join("README.md")]
    );
    assert_eq!(outcome.files.skipped, vec!["missing.rb".to_string()]);

    let metadata = ExerciseMetadata::read(&dir).await.unwrap();
    assert_eq!(metadata.id, "bogus-id");
    assert_eq!(metadata.exercise, "bob");
    assert_eq!(metadata.track, "ruby");
}

#[tokio::test]
async fn test_download_by_uuid() {
    let (mock_server, config, _temp_dir) = create_test_env().await;
    mount_solution(
        &mock_server,
        "abc-123",
        200,
        SolutionFixture {
            id: "abc-123",
            track: "go",
            exercise: "leap",
            files: &["leap.go"],
            ..Default::default()
        }
        .to_json(&mock_server),
    )
    .await;
    mount_file(&mock_server, "leap.go", 200, "package leap\n").await;

    let params =
        DownloadParams::from_selector(SolutionSelector::by_uuid("abc-123"), &config).unwrap();
    let outcome = download(params).await.unwrap();

    let leap = config.workspace.join("go").join("leap").join("leap.go");
    assert_eq!(outcome.files.written, vec![leap.clone()]);
    assert_eq!(std::fs::read_to_string(leap).unwrap(), "package leap\n");
}

#[tokio::test]
async fn test_download_rejects_local_exercise_without_requests() {
    let (mock_server, config, _temp_dir) = create_test_env().await;

    Mock::given(method("GET"))
        .and(path_regex(".*"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&mock_server)
        .await;

    let exercise = ExerciseLocation::new(config.workspace.clone(), "ruby", "bob");
    let params = DownloadParams::from_exercise(&exercise, &config).unwrap();

    let err = download(params).await.unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::LocalExerciseOverwrite)
    ));
    assert!(!exercise.dir().exists());
}

#[tokio::test]
async fn test_download_api_error_writes_nothing() {
    let (mock_server, config, _temp_dir) = create_test_env().await;
    mount_solution(
        &mock_server,
        "latest",
        404,
        serde_json::json!({
            "error": {"type": "resource_not_found", "message": "Solution not found"}
        }),
    )
    .await;

    let err = download(params_for_slug(&config, "bob")).await.unwrap_err();

    assert!(matches!(err, Error::Api(ApiError::Remote { status: 404, .. })));
    assert!(!config.workspace.exists());
}

#[tokio::test]
async fn test_refresh_metadata_leaves_files_alone() {
    let (mock_server, config, _temp_dir) = create_test_env().await;
    mount_solution(
        &mock_server,
        "latest",
        200,
        SolutionFixture {
            files: &["bob.rb"],
            ..Default::default()
        }
        .to_json(&mock_server),
    )
    .await;

    Mock::given(method("GET"))
        .and(path_regex(format!("^{FILES_PREFIX}")))
        .respond_with(ResponseTemplate::new(200).set_body_string("remote"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let exercise = ExerciseLocation::new(config.workspace.clone(), "ruby", "bob");
    std::fs::create_dir_all(exercise.dir()).unwrap();
    std::fs::write(exercise.dir().join("bob.rb"), "local work").unwrap();

    let params = DownloadParams::from_exercise(&exercise, &config).unwrap();
    let metadata = refresh_metadata(params).await.unwrap();

    assert_eq!(metadata.dir, exercise.dir());
    assert_eq!(
        std::fs::read_to_string(exercise.dir().join("bob.rb")).unwrap(),
        "local work"
    );
    assert!(exercise.metadata_path().exists());
}

#[test]
fn test_write_summary_splits_streams() {
    let outcome = DownloadOutcome {
        location: ExerciseLocation::new("/ws", "ruby", "bob"),
        metadata_path: PathBuf::from("/ws/ruby/bob/.exercism/metadata.json"),
        files: FilesReport::default(),
    };

    let mut out = Vec::new();
    let mut err = Vec::new();
    outcome.write_summary(&mut out, &mut err).unwrap();

    assert_eq!(String::from_utf8(err).unwrap(), "\nDownloaded to\n");
    assert_eq!(
        String::from_utf8(out).unwrap(),
        format!("{}\n", Path::new("/ws/ruby/bob").display())
    );
}
