//! Minimal HTTP/1.1 server that answers with a fixed set of response headers.
//!
//! Routes:
//! - `/missing` answers 404.
//! - `/redirect` answers 301 to `/final`.
//! - `/slow` answers 200 after a short delay.
//! - anything else answers 200 with the configured headers.
//!
//! Every request head is recorded so tests can check the method and request
//! headers that were sent, along with the peak number of requests handled at
//! once.

#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

pub struct HeaderServer {
    /// Base URL, e.g. "http://127.0.0.1:12345/".
    pub base: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    load: Arc<Load>,
}

#[derive(Default)]
struct Load {
    active: AtomicUsize,
    peak: AtomicUsize,
}

impl Load {
    fn enter(&self) {
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
    }

    fn leave(&self) {
        self.active.fetch_sub(1, Ordering::SeqCst);
    }
}

impl HeaderServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path.trim_start_matches('/'))
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Most requests that were being answered at the same time.
    pub fn peak_in_flight(&self) -> usize {
        self.load.peak.load(Ordering::SeqCst)
    }
}

/// Starts a server in a background thread. Headers are sent as given, in
/// order, on every 200 and 301 response. The server runs until the process
/// exits.
pub fn start(headers: &[(&str, &str)]) -> HeaderServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let headers: Arc<Vec<(String, String)>> = Arc::new(
        headers
            .iter()
            .map(|(n, v)| (n.to_string(), v.to_string()))
            .collect(),
    );
    let requests = Arc::new(Mutex::new(Vec::new()));
    let load = Arc::new(Load::default());
    let recorded = Arc::clone(&requests);
    let server_load = Arc::clone(&load);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let headers = Arc::clone(&headers);
            let recorded = Arc::clone(&recorded);
            let load = Arc::clone(&server_load);
            thread::spawn(move || handle(stream, &headers, &recorded, &load));
        }
    });
    HeaderServer {
        base: format!("http://127.0.0.1:{}/", port),
        requests,
        load,
    }
}

fn handle(
    mut stream: TcpStream,
    headers: &[(String, String)],
    recorded: &Mutex<Vec<RecordedRequest>>,
    load: &Load,
) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => parse_request(s),
        Err(_) => return,
    };
    recorded.lock().unwrap().push(request.clone());
    // Leaves before the response is written.
    load.enter();
    if request.path == "/slow" {
        thread::sleep(Duration::from_millis(200));
    }
    load.leave();

    let (status, extra) = match request.path.as_str() {
        "/missing" => ("404 Not Found", Vec::new()),
        "/redirect" => (
            "301 Moved Permanently",
            vec![("Location".to_string(), "/final".to_string())],
        ),
        _ => ("200 OK", Vec::new()),
    };
    let body: &[u8] = if request.method == "GET" { b"ok" } else { b"" };

    let mut response = format!("HTTP/1.1 {}\r\n", status);
    if !status.starts_with("404") {
        for (name, value) in headers.iter().chain(extra.iter()) {
            response.push_str(&format!("{}: {}\r\n", name, value));
        }
    }
    response.push_str(&format!(
        "Content-Length: {}\r\nConnection: close\r\n\r\n",
        if request.method == "HEAD" { 2 } else { body.len() }
    ));
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.write_all(body);
}

fn parse_request(request: &str) -> RecordedRequest {
    let mut lines = request.lines();
    let mut first = lines.next().unwrap_or("").split_whitespace();
    let method = first.next().unwrap_or("").to_string();
    let path = first.next().unwrap_or("/").to_string();
    let mut headers = Vec::new();
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.push((name.trim().to_string(), value.trim().to_string()));
        }
    }
    RecordedRequest {
        method,
        path,
        headers,
    }
}
