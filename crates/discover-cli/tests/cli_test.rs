#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use assert_cmd::cargo_bin_cmd;
use predicates::prelude::predicate;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test]
fn test_help_lists_subcommands() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("discover");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("menu"))
        .stdout(predicate::str::contains("genres"))
        .stdout(predicate::str::contains("filter"));
}

#[test]
fn test_menu_help_lists_categories() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("discover");
    cmd.args(["menu", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--category"))
        .stdout(predicate::str::contains("top-rated"));
}

#[test]
fn test_menu_rejects_unknown_category() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("discover");
    cmd.args(["menu", "--category", "favourites"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--category"));
}

#[test]
fn test_genres_requires_api_key() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("discover");
    cmd.env_remove("TMDB_API_KEY")
        .arg("--dir")
        .arg(dir.path())
        .args(["genres", "--media-type", "movie"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("TMDB_API_KEY"));
}

#[test]
fn test_genres_rejects_unknown_media_type() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("discover");
    cmd.args(["genres", "--media-type", "anime"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown media type: anime"));
}

#[test]
fn test_filter_show_defaults_without_config() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("discover");
    cmd.arg("--dir")
        .arg(dir.path())
        .args(["filter", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Discover"))
        .stdout(predicate::str::contains("Movie"))
        .stdout(predicate::str::contains("All (All)"))
        .stdout(predicate::str::contains("any"));
    assert!(!dir.path().join("config.toml").exists());
}

#[test]
fn test_filter_show_reads_saved_filter() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[filter]\ncategory = \"popular\"\nmedia_type = \"tv\"\nfrom_year = \"1990\"\nto_year = \"1999\"\nrating = 8\n\n[filter.genre]\nlabel = \"Drama\"\nvalue = 18\n",
    )
    .unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("discover");
    cmd.arg("--dir")
        .arg(dir.path())
        .args(["filter", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Popular"))
        .stdout(predicate::str::contains("TV"))
        .stdout(predicate::str::contains("Drama (18)"))
        .stdout(predicate::str::contains("1990 - 1999"))
        .stdout(predicate::str::contains("8/10"));
}

#[test]
fn test_filter_reset_keeps_tmdb_settings() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        "[tmdb]\nlanguage = \"ja-JP\"\n\n[filter]\ncategory = \"trending\"\nmedia_type = \"tv\"\nrating = 4\n",
    )
    .unwrap();

    // Act
    let mut cmd = cargo_bin_cmd!("discover");
    cmd.arg("--dir")
        .arg(dir.path())
        .args(["filter", "reset"])
        .assert()
        .success();

    // Assert
    let saved = std::fs::read_to_string(&config_path).unwrap();
    assert!(saved.contains("language = \"ja-JP\""));
    assert!(saved.contains("category = \"discover\""));
    assert!(saved.contains("media_type = \"movie\""));
    assert!(!saved.contains("rating"));
}

#[test]
fn test_filter_rejects_invalid_config() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.toml"), "[filter\n").unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("discover");
    cmd.arg("--dir")
        .arg(dir.path())
        .args(["filter", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load config"));
}

#[tokio::test]
async fn test_genres_lists_tv_genres_from_configured_server() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/genre/tv/list"))
        .and(query_param("api_key", "test-key"))
        .and(query_param("language", "en-US"))
        .respond_with(ResponseTemplate::new(200).set_body_string(include_str!(
            "../../../fixtures/tmdb/genre_tv_list.json"
        )))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        format!("[tmdb]\nbase_url = \"{}/3/\"\n", server.uri()),
    )
    .unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("discover");
    cmd.env("TMDB_API_KEY", "test-key")
        .arg("--dir")
        .arg(dir.path())
        .args(["genres", "--media-type", "tv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("10759"))
        .stdout(predicate::str::contains("Action & Adventure"));
}

#[tokio::test]
async fn test_genres_reports_http_error() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/genre/movie/list"))
        .respond_with(ResponseTemplate::new(401).set_body_string(
            r#"{"status_code":7,"status_message":"Invalid API key: You must be granted a valid key.","success":false}"#,
        ))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        format!("[tmdb]\nbase_url = \"{}/3/\"\n", server.uri()),
    )
    .unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("discover");
    cmd.env("TMDB_API_KEY", "bad-key")
        .arg("--dir")
        .arg(dir.path())
        .args(["genres"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("HTTP 401"));
}
