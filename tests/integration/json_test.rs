use assert_cmd::Command;
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

#[test]
fn test_json_status() {
    let home = TempDir::new().unwrap();
    let output = renderdesk_cmd(&home)
        .args(["--json", "status"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["api"], DEAD_API);
    assert_eq!(parsed["logged_in"], false);
    assert!(parsed.get("health").is_none());
}

#[test]
fn test_json_error_envelope() {
    let home = TempDir::new().unwrap();
    let output = renderdesk_cmd(&home)
        .args(["--json", "templates", "list"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(6));
    assert!(output.stdout.is_empty());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(parsed["error"]["code"], "not_logged_in");
    assert_eq!(parsed["error"]["exit_code"], 6);
}

#[test]
fn test_json_validation_error_is_not_printed_twice() {
    let home = TempDir::new().unwrap();
    let output = renderdesk_cmd(&home)
        .args([
            "--json",
            "register",
            "--email",
            "a@b.com",
            "--password",
            "one",
            "--confirm-password",
            "two",
        ])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));

    // stderr carries exactly one JSON document.
    let parsed: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(parsed["error"]["code"], "validation_error");
    assert_eq!(parsed["error"]["message"], "Passwords do not match");
}

/// Serve one HTTP exchange that rejects the session, on a free local port.
fn rejecting_backend() -> (String, std::thread::JoinHandle<()>) {
    use std::io::{Read, Write};

    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/api", listener.local_addr().unwrap());
    let handle = std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        let body = r#"{"detail":"Could not validate credentials"}"#;
        write!(
            stream,
            "HTTP/1.1 401 Unauthorized\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        )
        .unwrap();
    });
    (url, handle)
}

#[test]
fn test_json_rejected_listing_keeps_stdout_empty() {
    for listing in ["templates", "keys"] {
        let home = TempDir::new().unwrap();
        let session = home.path().join(".renderdesk").join("session.json");
        std::fs::create_dir_all(session.parent().unwrap()).unwrap();
        std::fs::write(&session, r#"{"access_token":"T1","refresh_token":"R1"}"#).unwrap();

        let (url, backend) = rejecting_backend();
        let output = renderdesk_cmd(&home)
            .env("RENDERDESK_API_URL", &url)
            .args(["--json", listing, "list"])
            .output()
            .unwrap();
        backend.join().unwrap();

        assert_eq!(output.status.code(), Some(6), "{listing}");
        assert!(output.stdout.is_empty(), "{listing}");
        let stderr = String::from_utf8_lossy(&output.stderr);
        let envelope = stderr.lines().last().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(envelope).unwrap();
        assert_eq!(parsed["error"]["code"], "session_expired");
        assert!(!session.exists());
    }
}
