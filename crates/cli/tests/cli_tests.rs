//! CLI integration tests
use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

use predicates::prelude::*;

fn cmd() -> assert_cmd::Command {
    assert_cmd::cargo::cargo_bin_cmd!("iconic")
}

fn get_site_fixture_path(site: &str, name: &str) -> String {
    format!("../../tests/fixtures/sites/{}/{}", site, name)
}

/// Serves `body` at `/` and 404 everywhere else. Returns the base URL.
fn serve(body: String) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    thread::spawn(move || {
        for mut stream in listener.incoming().flatten() {
            let mut buf = [0u8; 4096];
            let n = stream.read(&mut buf).unwrap_or(0);
            let request = String::from_utf8_lossy(&buf[..n]);
            let path = request.split_whitespace().nth(1).unwrap_or("/");
            let response = if path == "/" {
                format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    body.len(),
                    body
                )
            } else {
                "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n".to_string()
            };
            let _ = stream.write_all(response.as_bytes());
        }
    });
    format!("http://127.0.0.1:{}/", port)
}

fn stdout_json(output: &std::process::Output) -> Vec<String> {
    serde_json::from_slice(&output.stdout).expect("stdout should be a JSON array of strings")
}

#[test]
fn test_cli_requires_url() {
    cmd().assert().failure();
}

#[test]
fn test_cli_invalid_url() {
    cmd()
        .arg("not-a-url")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Invalid URL"));
}

#[test]
fn test_cli_prints_json_array() {
    let html = std::fs::read_to_string(get_site_fixture_path("news", "article.html")).unwrap();
    let base = serve(html);

    let output = cmd().arg(&base).output().unwrap();
    assert!(output.status.success());

    let icons = stdout_json(&output);
    assert_eq!(icons.len(), 10);
    assert_eq!(icons[0], "https://images.dailyharbor.example/2024/05/bike-lanes-16x9.jpg");
    assert_eq!(icons[1], format!("{}assets/logo-600x60.png", base));
    assert_eq!(icons[9], format!("{}favicon.ico", base));
}

#[test]
fn test_cli_status_error() {
    let base = serve(String::new());

    cmd()
        .arg(format!("{}missing", base))
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("404 Not Found"));
}

#[test]
fn test_cli_fallback_never() {
    let base = serve(r#"<link rel="icon" href="/icon.png">"#.to_string());

    let output = cmd().args(["--fallback", "never", &base]).output().unwrap();
    assert!(output.status.success());
    assert_eq!(stdout_json(&output), vec![format!("{}icon.png", base)]);
}

#[test]
fn test_cli_fallback_probe_absent() {
    let base = serve("<html></html>".to_string());

    cmd()
        .args(["--fallback", "probe", &base])
        .assert()
        .success()
        .stdout("[]\n");
}

#[test]
fn test_cli_invalid_fallback_mode() {
    cmd()
        .args(["--fallback", "sometimes", "https://example.com/"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid fallback mode"));
}

#[test]
fn test_cli_verbose() {
    let base = serve("<html></html>".to_string());

    cmd()
        .args(["-v", &base])
        .assert()
        .success()
        .stderr(predicate::str::contains("Iconic"))
        .stdout(predicate::str::contains("favicon.ico"));
}
