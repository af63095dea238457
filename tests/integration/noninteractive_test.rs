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
fn test_login_without_tty_needs_email() {
    let home = TempDir::new().unwrap();
    renderdesk_cmd(&home)
        .args(["login"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Email is required"));
}

#[test]
fn test_login_without_tty_needs_password() {
    let home = TempDir::new().unwrap();
    renderdesk_cmd(&home)
        .args(["login", "--email", "a@b.com"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Password is required"));
}

#[test]
fn test_login_password_from_env() {
    let home = TempDir::new().unwrap();
    // Gets past the prompt and fails on the dead backend instead.
    renderdesk_cmd(&home)
        .env("RENDERDESK_PASSWORD", "pw")
        .args(["login", "--email", "a@b.com"])
        .assert()
        .failure()
        .code(4);
}

#[test]
fn test_delete_template_without_yes_is_cancelled() {
    let home = TempDir::new().unwrap();
    seed_session(&home);

    // Declined before any request, so the dead backend is never reached.
    renderdesk_cmd(&home)
        .args(["templates", "delete", TEMPLATE_ID])
        .assert()
        .failure()
        .code(5)
        .stderr(predicate::str::contains("--yes"))
        .stderr(predicate::str::contains("Connection error").not());
}

#[test]
fn test_revoke_key_without_yes_is_cancelled() {
    let home = TempDir::new().unwrap();
    seed_session(&home);

    renderdesk_cmd(&home)
        .args(["keys", "delete", "7"])
        .assert()
        .failure()
        .code(5);
}

#[test]
fn test_delete_with_yes_reaches_backend() {
    let home = TempDir::new().unwrap();
    seed_session(&home);

    renderdesk_cmd(&home)
        .args(["--yes", "templates", "delete", TEMPLATE_ID])
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("Connection error"));
}

#[test]
fn test_delete_rejects_non_uuid_template_id() {
    let home = TempDir::new().unwrap();
    seed_session(&home);

    renderdesk_cmd(&home)
        .args(["--yes", "templates", "delete", "../apikeys/5"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Invalid template id"))
        .stderr(predicate::str::contains("Connection error").not());
}
