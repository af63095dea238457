use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const DEAD_API: &str = "http://127.0.0.1:9/api";
const TEMPLATE_ID: &str = "3f2b8c1e-9d4a-4e6b-8a7c-1b2d3e4f5a6b";

fn renderdesk_cmd(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("renderdesk").unwrap();
    cmd.env("HOME", home.path());
    cmd.env("RENDERDESK_HOME", home.path().join(".renderdesk"));
    cmd.env("RENDERDESK_API_URL", DEAD_API);
    cmd.env("RENDERDESK_NON_INTERACTIVE", "1");
    cmd.env_remove("RENDERDESK_PASSWORD");
    cmd.env_remove("RENDERDESK_LOG");
    cmd
}

fn seed_session(home: &TempDir) {
    let dir = home.path().join(".renderdesk");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("session.json"),
        r#"{"access_token":"T1","refresh_token":"R1"}"#,
    )
    .unwrap();
}

#[test]
fn test_exit_code_not_logged_in() {
    let home = TempDir::new().unwrap();
    let output = renderdesk_cmd(&home).args(["whoami"]).output().unwrap();
    assert_eq!(output.status.code(), Some(6)); // NotLoggedIn
}

#[test]
fn test_exit_code_password_mismatch() {
    let home = TempDir::new().unwrap();
    renderdesk_cmd(&home)
        .args([
            "register",
            "--email",
            "a@b.com",
            "--password",
            "one",
            "--confirm-password",
            "two",
        ])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Passwords do not match"))
        .stderr(predicate::str::contains("Connection error").not());
}

#[test]
fn test_exit_code_invalid_render_data() {
    let home = TempDir::new().unwrap();
    seed_session(&home);
    let out = TempDir::new().unwrap();

    renderdesk_cmd(&home)
        .args(["render", TEMPLATE_ID, "--data", "not json", "--output"])
        .arg(out.path())
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Invalid JSON"));

    assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 0);
}

#[test]
fn test_render_data_must_be_an_object() {
    let home = TempDir::new().unwrap();
    seed_session(&home);
    let out = TempDir::new().unwrap();

    renderdesk_cmd(&home)
        .args(["render", TEMPLATE_ID, "--data", "[1, 2]", "--output"])
        .arg(out.path())
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_exit_code_connection_refused() {
    let home = TempDir::new().unwrap();
    renderdesk_cmd(&home)
        .args(["login", "--email", "a@b.com", "--password", "pw"])
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("Connection error"));
}

#[test]
fn test_exit_code_missing_template_content() {
    let home = TempDir::new().unwrap();
    seed_session(&home);

    // Rejected by argument parsing.
    renderdesk_cmd(&home)
        .args(["templates", "create", "--name", "Invoice"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_exit_code_unreadable_template_file() {
    let home = TempDir::new().unwrap();
    seed_session(&home);

    renderdesk_cmd(&home)
        .args([
            "templates",
            "create",
            "--name",
            "Invoice",
            "--file",
            "/nonexistent/invoice.html",
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Cannot read"));
}

#[test]
fn test_exit_code_empty_update() {
    let home = TempDir::new().unwrap();
    seed_session(&home);

    renderdesk_cmd(&home)
        .args(["templates", "update", TEMPLATE_ID])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Nothing to update"));
}
