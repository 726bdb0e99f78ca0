use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::{self, JoinHandle};

use cf_hundred::TrackerError;
use cf_hundred::codeforces::Client;
use cf_hundred::webhook::Webhook;

/// Accept one connection, answer with `status` and `body`, and hand back the raw request.
fn serve_once(status: &str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let status = status.to_string();

    let server = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let request = read_request(&mut stream);
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).unwrap();
        request
    });

    (format!("http://{addr}"), server)
}

fn read_request(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = stream.read(&mut chunk).unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else { continue };
        let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
        if head.contains("transfer-encoding: chunked") {
            if buf.ends_with(b"0\r\n\r\n") {
                break;
            }
            continue;
        }
        let len = head
            .lines()
            .find_map(|l| l.strip_prefix("content-length:"))
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(0);
        if buf.len() >= end + 4 + len {
            break;
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

#[test]
fn test_webhook_sends_bearer_token_and_content() {
    let (url, server) = serve_once("200 OK", "ok");
    Webhook::new(&url, Some("tok")).post("hi").unwrap();

    let request = server.join().unwrap();
    assert!(request.starts_with("POST / "), "got {request}");
    assert!(request.to_lowercase().contains("authorization: bearer tok"));
    assert!(request.contains(r#"{"content":"hi"}"#));
}

#[test]
fn test_webhook_without_token_sends_no_authorization() {
    let (url, server) = serve_once("200 OK", "ok");
    Webhook::new(&url, None).post("hi").unwrap();

    let request = server.join().unwrap();
    assert!(!request.to_lowercase().contains("authorization:"));
}

#[test]
fn test_webhook_error_status_maps_to_webhook_error() {
    let (url, server) = serve_once("500 Internal Server Error", "boom");
    let err = Webhook::new(&url, Some("tok")).post("hi").unwrap_err();
    server.join().unwrap();

    match err {
        TrackerError::Webhook { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_user_status_sends_query_parameters() {
    let (url, server) = serve_once("200 OK", r#"{"status":"OK","result":[]}"#);
    let subs = Client::new(&url, 7).user_status("tourist").unwrap();
    assert!(subs.is_empty());

    let request = server.join().unwrap();
    let line = request.lines().next().unwrap();
    assert!(line.starts_with("GET /user.status?"), "got {line}");
    assert!(line.contains("handle=tourist"));
    assert!(line.contains("from=1"));
    assert!(line.contains("count=7"));
}

#[test]
fn test_user_status_failed_envelope_on_400_is_api_error() {
    let (url, server) = serve_once(
        "400 Bad Request",
        r#"{"status":"FAILED","comment":"handle: User with handle ghost not found"}"#,
    );
    let err = Client::new(&url, 50).user_status("ghost").unwrap_err();
    server.join().unwrap();

    match err {
        TrackerError::Api { handle, comment } => {
            assert_eq!(handle, "ghost");
            assert!(comment.contains("not found"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_user_status_non_json_error_is_status_error() {
    let (url, server) = serve_once("502 Bad Gateway", "<html>bad gateway</html>");
    let err = Client::new(&url, 50).user_status("tourist").unwrap_err();
    server.join().unwrap();

    assert!(matches!(err, TrackerError::Status { status: 502, .. }), "got {err}");
}
