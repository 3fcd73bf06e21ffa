//! Stdio JSON-RPC harness shared by the language server integration tests.

#![allow(dead_code)]

use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdout, Command, Stdio};
use std::time::{Duration, Instant};

use serde_json::Value;

pub const SERVER_TIMEOUT: Duration = Duration::from_secs(5);
pub const SHUTDOWN_GRACE_PERIOD: Duration = Duration::from_millis(200);

pub type ServerReader = BufReader<ChildStdout>;

pub fn spawn_server() -> Child {
    let bin_path = std::env::var("CARGO_BIN_EXE_section-header-ls")
        .unwrap_or_else(|_| "target/debug/section-header-ls".to_string());

    Command::new(bin_path)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .env("SECTION_HEADER_LS_TEST_EXIT", "1")
        .spawn()
        .expect("Failed to spawn language server")
}

/// Take the server's stdout for reading
pub fn take_reader(server: &mut Child) -> ServerReader {
    let stdout = server
        .stdout
        .take()
        .expect("Child stdout should be available");
    BufReader::new(stdout)
}

pub fn create_initialize_request() -> Value {
    create_initialize_request_with(serde_json::json!({
        "workspace": {
            "applyEdit": true,
            "executeCommand": { "dynamicRegistration": false }
        }
    }))
}

pub fn create_initialize_request_with(capabilities: Value) -> Value {
    serde_json::json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "initialize",
        "params": {
            "processId": null,
            "rootUri": null,
            "capabilities": capabilities,
            "clientInfo": { "name": "test-client", "version": "1.0" }
        }
    })
}

pub fn send_lsp_message(child: &mut Child, message: &Value) {
    let body = message.to_string();
    let request = format!("Content-Length: {}\r\n\r\n{}", body.len(), body);

    let stdin = child
        .stdin
        .as_mut()
        .expect("Child stdin should be available");
    stdin
        .write_all(request.as_bytes())
        .expect("Failed to write request");
    stdin.flush().expect("Failed to flush stdin");
}

pub fn read_message(reader: &mut ServerReader) -> Value {
    let content_length = read_content_length_header(reader);
    let body = read_message_body(reader, content_length);
    serde_json::from_str(&body)
        .unwrap_or_else(|e| panic!("Invalid JSON message: {}\nBody: {}", e, body))
}

pub fn read_content_length_header(reader: &mut ServerReader) -> usize {
    let start_time = Instant::now();
    let mut content_length = None;

    loop {
        if start_time.elapsed() > SERVER_TIMEOUT {
            panic!("Timeout waiting for response headers");
        }

        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) => panic!("Unexpected EOF while reading headers"),
            Ok(_) => {
                if line.trim().is_empty() {
                    break;
                }

                if let Some(length_str) = line.strip_prefix("Content-Length:") {
                    content_length = Some(
                        length_str
                            .trim()
                            .parse::<usize>()
                            .expect("Invalid Content-Length header"),
                    );
                }
            }
            Err(e) => panic!("Error reading headers: {}", e),
        }
    }

    content_length.expect("Missing Content-Length header")
}

pub fn read_message_body(reader: &mut ServerReader, content_length: usize) -> String {
    let mut body_bytes = vec![0u8; content_length];
    std::io::Read::read_exact(reader, &mut body_bytes).expect("Failed to read response body");

    String::from_utf8(body_bytes).expect("Response body should be valid UTF-8")
}

/// Skip notifications until the server sends a `workspace/applyEdit` request
pub fn read_next_apply_edit(reader: &mut ServerReader) -> Value {
    loop {
        let message = read_message(reader);
        match message.get("method").and_then(|m| m.as_str()) {
            Some("workspace/applyEdit") => return message,
            Some(_) => continue,
            None => panic!("Expected applyEdit request, got response: {}", message),
        }
    }
}

/// Read until the response to request `expected_id`, failing on any edit request
pub fn read_next_response_with_id(reader: &mut ServerReader, expected_id: u64) -> Value {
    read_until_response_with_id(reader, expected_id).1
}

/// Like [`read_next_response_with_id`], also returning the notifications
/// seen on the way
pub fn read_until_response_with_id(
    reader: &mut ServerReader,
    expected_id: u64,
) -> (Vec<Value>, Value) {
    let mut notifications = Vec::new();
    loop {
        let message = read_message(reader);
        match message.get("method").and_then(|m| m.as_str()) {
            Some("workspace/applyEdit") => panic!("Unexpected applyEdit request: {}", message),
            Some(_) => notifications.push(message),
            None => {
                if message.get("id").and_then(|id| id.as_u64()) == Some(expected_id) {
                    return (notifications, message);
                }
            }
        }
    }
}

pub fn shutdown_server(mut child: Child) {
    // Close stdin to signal we're done
    drop(child.stdin.take());

    std::thread::sleep(SHUTDOWN_GRACE_PERIOD);

    match child.try_wait() {
        Ok(Some(status)) => {
            if !status.success() {
                eprintln!("Server exited with non-zero status: {:?}", status);
            }
        }
        Ok(None) => {
            eprintln!("Server didn't exit gracefully, forcing termination");
            let _ = child.kill();
            let _ = child.wait();
        }
        Err(e) => panic!("Error checking server status: {}", e),
    }
}
