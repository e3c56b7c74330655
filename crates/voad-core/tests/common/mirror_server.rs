//! Minimal HTTP/1.1 mirror for integration tests.
//!
//! Serves configured paths with a status and body (optionally dribbled out in
//! slow chunks, truncated, or delayed); every other path is 404. Counts every
//! request so tests can assert how much network traffic a fetch caused.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Route {
    pub status: u16,
    pub body: Vec<u8>,
    /// Send the body in pieces of this size with `chunk_delay` between them.
    pub chunk: usize,
    pub chunk_delay: Duration,
    /// Wait this long before sending anything.
    pub initial_delay: Duration,
    /// Advertise the full length but close after half the body.
    pub truncate: bool,
}

impl Route {
    pub fn ok(body: Vec<u8>) -> Self {
        Self {
            status: 200,
            body,
            chunk: usize::MAX,
            chunk_delay: Duration::ZERO,
            initial_delay: Duration::ZERO,
            truncate: false,
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: format!("status {}", status).into_bytes(),
            ..Self::ok(Vec::new())
        }
    }

    pub fn slow(body: Vec<u8>, chunk: usize, chunk_delay: Duration) -> Self {
        Self {
            chunk,
            chunk_delay,
            ..Self::ok(body)
        }
    }

    pub fn truncated(body: Vec<u8>) -> Self {
        Self {
            truncate: true,
            ..Self::ok(body)
        }
    }

    pub fn stalled(delay: Duration) -> Self {
        Self {
            initial_delay: delay,
            ..Self::ok(b"late".to_vec())
        }
    }
}

#[derive(Clone)]
pub struct MirrorServer {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
    log: Arc<Mutex<Vec<String>>>,
}

impl MirrorServer {
    /// Total requests received so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// Requested paths in arrival order.
    pub fn requested(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }
}

/// Starts a server in a background thread. It runs until the process exits.
pub fn start(routes: HashMap<String, Route>) -> MirrorServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let routes = Arc::new(routes);
    let hits = Arc::new(AtomicUsize::new(0));
    let log = Arc::new(Mutex::new(Vec::new()));
    let server = MirrorServer {
        base_url: format!("http://127.0.0.1:{}", port),
        hits: Arc::clone(&hits),
        log: Arc::clone(&log),
    };
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            let hits = Arc::clone(&hits);
            let log = Arc::clone(&log);
            thread::spawn(move || handle(stream, &routes, &hits, &log));
        }
    });
    server
}

fn handle(
    mut stream: TcpStream,
    routes: &HashMap<String, Route>,
    hits: &AtomicUsize,
    log: &Mutex<Vec<String>>,
) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut chunk) {
            Ok(0) | Err(_) => return,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }
    let request = String::from_utf8_lossy(&buf);
    let path = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();
    hits.fetch_add(1, Ordering::SeqCst);
    log.lock().unwrap().push(path.clone());

    let route = routes.get(&path).cloned().unwrap_or_else(|| Route::status(404));
    if !route.initial_delay.is_zero() {
        thread::sleep(route.initial_delay);
    }
    let header = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nContent-Type: audio/mpeg\r\nConnection: close\r\n\r\n",
        route.status,
        reason(route.status),
        route.body.len()
    );
    if stream.write_all(header.as_bytes()).is_err() {
        return;
    }
    let body: &[u8] = if route.truncate {
        &route.body[..route.body.len() / 2]
    } else {
        &route.body
    };
    for piece in body.chunks(route.chunk.max(1)) {
        if stream.write_all(piece).is_err() {
            return;
        }
        let _ = stream.flush();
        if !route.chunk_delay.is_zero() {
            thread::sleep(route.chunk_delay);
        }
    }
    let _ = stream.shutdown(std::net::Shutdown::Both);
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        403 => "Forbidden",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}
