//! Integration tests for CLI functionality

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Binary with HOME pointed at `home` and no Favro variables inherited
fn favroctl(home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("favroctl"));
    cmd.env("HOME", home)
        .env_remove("FAVRO_TOKEN")
        .env_remove("FAVRO_EMAIL")
        .env_remove("FAVRO_ORGANIZATION_ID")
        .env_remove("FAVRO_BOARD_ID")
        .env_remove("FAVRO_API_URL");
    cmd
}

fn config_path(home: &Path) -> std::path::PathBuf {
    home.join(".favroctl").join("config.json")
}

fn write_config(home: &Path, value: serde_json::Value) {
    let path = config_path(home);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, serde_json::to_string(&value).unwrap()).unwrap();
}

#[test]
fn test_help_flag() {
    let home = TempDir::new().unwrap();
    favroctl(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Favro"))
        .stdout(predicate::str::contains("login"));
}

#[test]
fn test_version_flag() {
    let home = TempDir::new().unwrap();
    favroctl(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("favroctl"));
}

#[test]
fn test_unknown_subcommand() {
    let home = TempDir::new().unwrap();
    favroctl(home.path())
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("frobnicate"));
}

#[test]
fn test_context_without_config() {
    let home = TempDir::new().unwrap();
    favroctl(home.path())
        .arg("context")
        .assert()
        .success()
        .stdout(predicate::str::contains("Organization: <not set>"))
        .stdout(predicate::str::contains("Token:        <not set>"));
}

#[test]
fn test_context_masks_stored_token() {
    let home = TempDir::new().unwrap();
    write_config(
        home.path(),
        json!({"token": "very-secret-token-9876", "organization_id": "org-1", "board_id": "b-1"}),
    );

    favroctl(home.path())
        .args(["context", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("****9876"))
        .stdout(predicate::str::contains("very-secret").not())
        .stdout(predicate::str::contains("\"board_id\": \"b-1\""));
}

#[test]
fn test_corrupt_config_is_reported() {
    let home = TempDir::new().unwrap();
    let path = config_path(home.path());
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "{not json").unwrap();

    favroctl(home.path())
        .arg("context")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("config.json"));
}

#[test]
fn test_not_logged_in_exits_with_2() {
    let home = TempDir::new().unwrap();
    favroctl(home.path())
        .args(["org", "list"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Not logged in"));
}

#[test]
fn test_no_organization_exits_with_1() {
    let home = TempDir::new().unwrap();
    favroctl(home.path())
        .args(["card", "list", "--token", "tok"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No organization selected"));
}

#[test]
fn test_empty_token_flag_rejected() {
    let home = TempDir::new().unwrap();
    favroctl(home.path())
        .args(["org", "list", "--token", ""])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--token must not be empty"));
}

#[test]
fn test_logout_removes_config() {
    let home = TempDir::new().unwrap();
    write_config(home.path(), json!({"token": "tok", "organization_id": "org-1"}));

    favroctl(home.path())
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out"));
    assert!(!config_path(home.path()).exists());

    // Idempotent
    favroctl(home.path()).arg("logout").assert().success();
}

#[test]
fn test_quiet_login_without_token_fails() {
    let home = TempDir::new().unwrap();
    favroctl(home.path())
        .args(["login", "--quiet"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("API token is required"));
    assert!(!config_path(home.path()).exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_and_select_organization_against_mock() {
    let server = MockServer::start().await;
    let home = TempDir::new().unwrap();
    let home_path = home.path().to_path_buf();

    Mock::given(method("GET"))
        .and(path("/organizations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "limit": 100, "page": 0, "pages": 1, "requestId": "r-1",
            "entities": [{"organizationId": "org-1", "name": "Acme"}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/organizations/org-1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"organizationId": "org-1", "name": "Acme"})),
        )
        .mount(&server)
        .await;

    let uri = server.uri();
    tokio::task::spawn_blocking(move || {
        favroctl(&home_path)
            .args(["login", "--quiet", "--token", "good-token", "--api-url", &uri])
            .assert()
            .success();

        favroctl(&home_path)
            .args(["org", "select", "org-1", "--api-url", &uri])
            .assert()
            .success()
            .stdout(predicate::str::contains("Selected organization 'Acme'"));

        favroctl(&home_path)
            .args(["context", "--json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"organization_id\": \"org-1\""));
    })
    .await
    .unwrap();
}
