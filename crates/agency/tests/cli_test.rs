//! Integration tests for the `agency` CLI binary.
//!
//! Argument parsing, help output and completions run without a backend;
//! list and mutation commands run against a wiremock server.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a command for the `agency` binary with env isolation.
///
/// Clears all `AGENCY_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn agency_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("agency");
    cmd.env("HOME", "/tmp/agency-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/agency-cli-test-nonexistent")
        .env("NO_COLOR", "1")
        .env_remove("AGENCY_PROFILE")
        .env_remove("AGENCY_BACKEND")
        .env_remove("AGENCY_TOKEN")
        .env_remove("AGENCY_OUTPUT")
        .env_remove("AGENCY_INSECURE")
        .env_remove("AGENCY_TIMEOUT")
        .env_remove("RUST_LOG");
    cmd
}

fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn blog_posts() -> Value {
    let posts: Vec<_> = (1..=8)
        .map(|i| {
            let category = if i % 3 == 0 { "Web Development" } else { "Branding" };
            json!({ "_id": format!("b{i}"), "title": format!("Post {i}"), "category": category })
        })
        .collect();
    json!(posts)
}

async fn mock_get(server: &MockServer, route: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = agency_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("Usage"));
}

#[test]
fn test_help_flag() {
    agency_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("blog")
            .and(predicate::str::contains("portfolio"))
            .and(predicate::str::contains("contacts"))
            .and(predicate::str::contains("apply")),
    );
}

#[test]
fn test_version_flag() {
    agency_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("agency"));
}

#[test]
fn test_completions_zsh() {
    agency_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Configuration errors ────────────────────────────────────────────

#[test]
fn test_list_without_backend_explains_setup() {
    agency_cmd()
        .args(["blog", "list"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("agency config init"));
}

#[test]
fn test_unknown_profile() {
    agency_cmd()
        .args(["--profile", "staging", "blog", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("staging"));
}

#[test]
fn test_unreachable_backend_exit_code() {
    agency_cmd()
        .args(["--backend", "http://127.0.0.1:9", "--timeout", "2", "services", "list"])
        .assert()
        .code(7);
}

/// `agency` with its config directories inside `home`.
fn agency_cmd_in(home: &std::path::Path) -> assert_cmd::Command {
    let mut cmd = agency_cmd();
    cmd.env("HOME", home).env("XDG_CONFIG_HOME", home.join(".config"));
    cmd
}

#[tokio::test(flavor = "multi_thread")]
async fn test_config_set_is_used_by_later_commands() {
    let home = tempfile::tempdir().unwrap();
    let server = MockServer::start().await;
    mock_get(&server, "/api/blogs", blog_posts()).await;

    agency_cmd_in(home.path())
        .args(["config", "set", "backend", &server.uri()])
        .assert()
        .success();
    agency_cmd_in(home.path())
        .args(["config", "set", "blog_page_size", "4"])
        .assert()
        .success();

    agency_cmd_in(home.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(home.path().to_string_lossy().into_owned()));

    agency_cmd_in(home.path())
        .args(["config", "profiles"])
        .assert()
        .success()
        .stdout("default *\n");

    // No --backend: the saved profile supplies it, with four posts a page.
    agency_cmd_in(home.path())
        .args(["-o", "plain", "blog", "list", "--page", "2"])
        .assert()
        .success()
        .stdout("b5\nb6\nb7\nb8\n");
}

// ── Blog ────────────────────────────────────────────────────────────

#[test]
fn test_blog_url_is_offline() {
    agency_cmd()
        .args([
            "--backend",
            "https://studio.example",
            "blog",
            "url",
            "--category",
            "UX/UI Design",
            "--page",
            "2",
        ])
        .assert()
        .success()
        .stdout("https://studio.example/blog?category=UX%2FUI+Design&page=2\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_blog_list_pages_and_filters() {
    let server = MockServer::start().await;
    mock_get(&server, "/api/blogs", blog_posts()).await;

    agency_cmd()
        .args(["--backend", &server.uri(), "-o", "plain", "blog", "list", "--page", "2"])
        .assert()
        .success()
        .stdout("b7\nb8\n");

    agency_cmd()
        .args([
            "--backend",
            &server.uri(),
            "-o",
            "plain",
            "blog",
            "list",
            "--category",
            "Web Development",
        ])
        .assert()
        .success()
        .stdout("b3\nb6\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_blog_open_address() {
    let server = MockServer::start().await;
    mock_get(&server, "/api/blogs", blog_posts()).await;

    agency_cmd()
        .args([
            "--backend",
            &server.uri(),
            "-o",
            "plain",
            "blog",
            "open",
            "/blog?category=Web+Development",
        ])
        .assert()
        .success()
        .stdout("b3\nb6\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_blog_page_out_of_range_stays_on_first_page() {
    let server = MockServer::start().await;
    mock_get(&server, "/api/blogs", blog_posts()).await;

    agency_cmd()
        .args(["--backend", &server.uri(), "-o", "plain", "blog", "list", "--page", "9"])
        .assert()
        .success()
        .stdout("b1\nb2\nb3\nb4\nb5\nb6\n")
        .stderr(predicate::str::contains("out of range"));

    agency_cmd()
        .args(["--backend", &server.uri(), "blog", "open", "/blog?page=9"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Page 1 of 2"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_blog_filters_by_fallback_category() {
    let server = MockServer::start().await;
    let posts = json!([
        { "_id": "b1", "title": "Tagged", "category": "Branding" },
        { "_id": "b2", "title": "Loose" },
    ]);
    mock_get(&server, "/api/blogs", posts).await;

    agency_cmd()
        .args([
            "--backend",
            &server.uri(),
            "-o",
            "plain",
            "blog",
            "list",
            "--category",
            "Uncategorized",
        ])
        .assert()
        .success()
        .stdout("b2\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_blog_unknown_category() {
    let server = MockServer::start().await;
    mock_get(&server, "/api/blogs", blog_posts()).await;

    agency_cmd()
        .args(["--backend", &server.uri(), "blog", "list", "--category", "Cooking"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("All Posts"));
}

// ── Portfolio ───────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_portfolio_load_more() {
    let server = MockServer::start().await;
    let items: Vec<_> = (0..10)
        .map(|i| json!({ "_id": format!("p{i}"), "title": format!("Work {i}"), "category": "Web" }))
        .collect();
    mock_get(&server, "/api/portfolio", json!(items)).await;

    let output = agency_cmd()
        .args(["--backend", &server.uri(), "-o", "json", "portfolio", "list"])
        .output()
        .unwrap();
    let shown: Vec<Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(shown.len(), 6);

    let output = agency_cmd()
        .args(["--backend", &server.uri(), "-o", "json", "portfolio", "list", "--more", "1"])
        .output()
        .unwrap();
    let shown: Vec<Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(shown.len(), 10);
}

// ── Admin mutations ─────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_contact_delete_with_yes() {
    let server = MockServer::start().await;
    mock_get(&server, "/api/contacts", json!([{ "_id": "m1", "name": "Ada" }])).await;
    Mock::given(method("DELETE"))
        .and(path("/api/contacts/m1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "Removed" })))
        .expect(1)
        .mount(&server)
        .await;

    agency_cmd()
        .args(["--backend", &server.uri(), "--token", "t0k", "-y", "contacts", "delete", "m1"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Removed"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_contact_delete_unknown_id() {
    let server = MockServer::start().await;
    mock_get(&server, "/api/contacts", json!([{ "_id": "m1", "name": "Ada" }])).await;

    agency_cmd()
        .args(["--backend", &server.uri(), "-y", "contacts", "delete", "nope"])
        .assert()
        .code(4);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_application_status_unauthorized() {
    let server = MockServer::start().await;
    mock_get(&server, "/api/applications", json!([{ "_id": "a1", "name": "Grace" }])).await;
    Mock::given(method("PATCH"))
        .and(path("/api/applications/a1/status"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "Token expired" })))
        .mount(&server)
        .await;

    agency_cmd()
        .args(["--backend", &server.uri(), "applications", "status", "a1", "hired"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Token expired"));
}

// ── Public forms ────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_contact_form_rejects_bad_email_before_sending() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/contacts"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    agency_cmd()
        .args([
            "--backend",
            &server.uri(),
            "contact",
            "--name",
            "Ada",
            "--email",
            "ada-at-example",
            "--message",
            "Hello",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not a valid email"));
}
