use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

// Nothing listens on the discard port; every request is refused.
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

#[test]
fn test_help() {
    let home = TempDir::new().unwrap();
    renderdesk_cmd(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("PDF template rendering API"));
}

#[test]
fn test_version() {
    let home = TempDir::new().unwrap();
    renderdesk_cmd(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("renderdesk"));
}

#[test]
fn test_subcommand_help_lists_operations() {
    let home = TempDir::new().unwrap();
    renderdesk_cmd(&home)
        .args(["templates", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("delete"));
}

#[test]
fn test_config_show_applies_env_override() {
    let home = TempDir::new().unwrap();
    renderdesk_cmd(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("base_url = \"http://127.0.0.1:9/api\""));
}

#[test]
fn test_config_file_is_read() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join(".renderdesk");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("renderdesk.toml"),
        "[api]\nbase_url = \"https://render.example.com/api/\"\n\n[output]\ndir = \"out\"\n",
    )
    .unwrap();

    renderdesk_cmd(&home)
        .env_remove("RENDERDESK_API_URL")
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://render.example.com/api\""))
        .stdout(predicate::str::contains("dir = \"out\""));
}

#[test]
fn test_invalid_base_url_is_a_config_error() {
    let home = TempDir::new().unwrap();
    renderdesk_cmd(&home)
        .env("RENDERDESK_API_URL", "ftp://nowhere")
        .args(["status"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("http://"));
}

#[test]
fn test_status_reports_unreachable_backend() {
    let home = TempDir::new().unwrap();
    renderdesk_cmd(&home)
        .args(["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("unreachable"))
        .stdout(predicate::str::contains("not logged in"))
        .stderr(predicate::str::contains("Connection error").not());
}
