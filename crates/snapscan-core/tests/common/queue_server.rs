//! Minimal HTTP/1.1 server that plays the Taskcluster queue in integration tests.
//!
//! Serves canned JSON per request target (path plus query). A route may hold
//! several responses; they are served in order and the last one repeats.
//! Unknown targets get a queue-style 404.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    pub fn ok(body: &str) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
        }
    }

    pub fn status(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }
}

#[derive(Default)]
struct State {
    routes: HashMap<String, Vec<Response>>,
    hits: HashMap<String, usize>,
    log: Vec<String>,
}

/// Handle to a running server. The server runs until the process exits.
#[derive(Clone)]
pub struct QueueServer {
    pub root: String,
    state: Arc<Mutex<State>>,
}

impl QueueServer {
    /// Starts a server in a background thread. `root` is e.g. "http://127.0.0.1:12345/v1".
    pub fn start(routes: Vec<(&str, Vec<Response>)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().unwrap().port();
        let state = Arc::new(Mutex::new(State {
            routes: routes
                .into_iter()
                .map(|(target, responses)| (format!("/v1/{target}"), responses))
                .collect(),
            ..State::default()
        }));
        let server_state = Arc::clone(&state);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let state = Arc::clone(&server_state);
                thread::spawn(move || handle(stream, &state));
            }
        });
        Self {
            root: format!("http://127.0.0.1:{}/v1", port),
            state,
        }
    }

    /// Request targets seen so far, in arrival order, without the `/v1/` prefix.
    pub fn requests(&self) -> Vec<String> {
        self.state.lock().unwrap().log.clone()
    }
}

fn handle(mut stream: std::net::TcpStream, state: &Mutex<State>) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let target = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("")
        .to_string();

    let response = {
        let mut state = state.lock().unwrap();
        state
            .log
            .push(target.trim_start_matches("/v1/").to_string());
        let index = {
            let hits = state.hits.entry(target.clone()).or_insert(0);
            *hits += 1;
            *hits - 1
        };
        match state.routes.get(&target) {
            Some(responses) if !responses.is_empty() => {
                responses[index.min(responses.len() - 1)].clone()
            }
            _ => Response::status(
                404,
                r#"{"code":"ResourceNotFound","message":"Resource not found\nmore detail"}"#,
            ),
        }
    };

    let reason = match response.status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        _ => "Status",
    };
    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        response.status,
        reason,
        response.body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(response.body.as_bytes());
}
