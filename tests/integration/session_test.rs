use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const DEAD_API: &str = "http://127.0.0.1:9/api";

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

fn session_file(home: &TempDir) -> std::path::PathBuf {
    home.path().join(".renderdesk").join("session.json")
}

/// Write a session as a successful login would have.
fn seed_session(home: &TempDir) {
    let path = session_file(home);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, r#"{"access_token":"T1","refresh_token":"R1"}"#).unwrap();
}

#[test]
fn test_protected_commands_require_session() {
    let home = TempDir::new().unwrap();

    for args in [
        vec!["whoami"],
        vec!["templates", "list"],
        vec!["keys", "list"],
        vec!["render", "abc"],
    ] {
        renderdesk_cmd(&home)
            .args(&args)
            .assert()
            .failure()
            .code(6)
            .stderr(predicate::str::contains("renderdesk login"));
    }
}

#[test]
fn test_public_commands_run_without_session() {
    let home = TempDir::new().unwrap();
    renderdesk_cmd(&home).args(["status"]).assert().success();
    renderdesk_cmd(&home).args(["config", "show"]).assert().success();
}

#[test]
fn test_logout_removes_session_file() {
    let home = TempDir::new().unwrap();
    seed_session(&home);
    assert!(session_file(&home).exists());

    renderdesk_cmd(&home)
        .args(["logout"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Logged out."));

    assert!(!session_file(&home).exists());
}

#[test]
fn test_logout_is_idempotent() {
    let home = TempDir::new().unwrap();
    renderdesk_cmd(&home).args(["logout"]).assert().success();
    renderdesk_cmd(&home).args(["logout"]).assert().success();
    assert!(!session_file(&home).exists());
}

#[test]
fn test_status_sees_stored_session() {
    let home = TempDir::new().unwrap();
    seed_session(&home);

    renderdesk_cmd(&home)
        .args(["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("logged in"))
        .stdout(predicate::str::contains("not logged in").not());
}

#[test]
fn test_connection_failure_keeps_session() {
    let home = TempDir::new().unwrap();
    seed_session(&home);

    renderdesk_cmd(&home)
        .args(["whoami"])
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("Connection error"));

    assert!(session_file(&home).exists());
}

#[cfg(unix)]
#[test]
fn test_session_file_written_by_store_is_private() {
    use renderdesk::credentials::CredentialStore;
    use secrecy::SecretString;
    use std::os::unix::fs::PermissionsExt;

    let home = TempDir::new().unwrap();
    let path = session_file(&home);
    let store = CredentialStore::file(&path);
    store
        .save(
            &SecretString::new("T1".to_string()),
            &SecretString::new("R1".to_string()),
        )
        .unwrap();

    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}
