#![cfg(feature = "relay")]

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread;

use chrono::NaiveDate;
use payoff_core::query::{interpret, MortgageSnapshot};
use payoff_core::relay::{RelayAnswer, RelayClient, RelayConfig, RelayError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
}

fn snapshot() -> MortgageSnapshot {
    MortgageSnapshot {
        principal: dec!(300000),
        rate: dec!(6.5),
        term: 30,
        additional_payment: Decimal::ZERO,
        start_date: today(),
    }
}

/// Serve one canned HTTP response and hand back the request body.
fn serve_once(status_line: &'static str, body: &'static str) -> (String, thread::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());

        let mut content_length = 0usize;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            if line == "\r\n" || line.is_empty() {
                break;
            }
            let lower = line.to_ascii_lowercase();
            if let Some(v) = lower.strip_prefix("content-length:") {
                content_length = v.trim().parse().unwrap();
            }
        }
        let mut request_body = vec![0u8; content_length];
        reader.read_exact(&mut request_body).unwrap();

        let mut stream = stream;
        let response = format!(
            "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();
        String::from_utf8(request_body).unwrap()
    });
    (format!("http://{addr}"), handle)
}

fn client(base_url: String) -> RelayClient {
    RelayClient::new(RelayConfig {
        base_url,
        timeout_secs: 5,
    })
    .unwrap()
}

#[test]
fn test_remote_success() {
    let (url, server) = serve_once(
        "HTTP/1.1 200 OK",
        r#"{"response":"Sure thing.","tokens":42,"model":"gpt-3.5-turbo"}"#,
    );
    let answer = client(url).ask("How much sooner with $300?", Some(&snapshot()), today());

    match &answer {
        RelayAnswer::Remote(reply) => {
            assert_eq!(reply.response, "Sure thing.");
            assert_eq!(reply.tokens, 42);
            assert_eq!(reply.model, "gpt-3.5-turbo");
        }
        other => panic!("Expected remote answer, got {other:?}"),
    }

    let sent: serde_json::Value = serde_json::from_str(&server.join().unwrap()).unwrap();
    assert_eq!(sent["userQuery"], "How much sooner with $300?");
    assert_eq!(sent["mortgageData"]["term"], 30);
    assert_eq!(sent["mortgageData"]["startDate"], "2026-10-18T00:00:00.000Z");
}

#[test]
fn test_server_error_falls_back_to_local() {
    let (url, server) = serve_once(
        "HTTP/1.1 500 Internal Server Error",
        r#"{"error":"OpenAI API key not configured","message":"OpenAI is not available. Please try again later."}"#,
    );
    let query = "How much sooner if I add $300 per month?";
    let answer = client(url).ask(query, Some(&snapshot()), today());
    server.join().unwrap();

    assert!(!answer.is_remote());
    assert_eq!(answer.text(), interpret(query, Some(&snapshot()), today()));
    if let RelayAnswer::Local { reason, .. } = answer {
        assert!(reason.contains("500"), "{reason}");
        assert!(reason.contains("OpenAI is not available"), "{reason}");
    }
}

#[test]
fn test_status_error_carries_message() {
    let (url, server) = serve_once(
        "HTTP/1.1 400 Bad Request",
        r#"{"error":"Missing user query","message":"Please provide a question."}"#,
    );
    let err = client(url)
        .chat(&payoff_core::relay::ChatRequest {
            user_query: String::new(),
            mortgage_data: None,
        })
        .unwrap_err();
    server.join().unwrap();

    match err {
        RelayError::Status { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Please provide a question.");
        }
        other => panic!("Expected status error, got {other:?}"),
    }
}

#[test]
fn test_malformed_body_falls_back() {
    let (url, server) = serve_once("HTTP/1.1 200 OK", r#"{"unexpected":true}"#);
    let answer = client(url).ask("hello", None, today());
    server.join().unwrap();
    assert_eq!(answer.text(), interpret("hello", None, today()));
}

#[test]
fn test_unreachable_relay_falls_back() {
    // Bind then drop to get a port nothing is listening on.
    let port = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
    let answer = client(format!("http://127.0.0.1:{port}")).ask(
        "finish in 15 years",
        Some(&snapshot()),
        today(),
    );
    assert!(!answer.is_remote());
    assert_eq!(
        answer.text(),
        interpret("finish in 15 years", Some(&snapshot()), today())
    );
}

#[test]
fn test_health() {
    let (url, server) = serve_once(
        "HTTP/1.1 200 OK",
        r#"{"status":"ok","timestamp":"2026-10-18T12:00:00.000Z","openaiConfigured":true}"#,
    );
    let health = client(url).health().unwrap();
    server.join().unwrap();
    assert_eq!(health.status, "ok");
    assert!(health.openai_configured);
}
