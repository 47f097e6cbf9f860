//! Minimal HTTP/1.1 server for URL-source integration tests.
//!
//! Serves one static body with a configurable status line to every GET.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct HarServerOptions {
    /// Status line sent for GET, e.g. "200 OK" or "404 Not Found".
    pub status: &'static str,
    /// If set, the first request is answered with a 302 to `/moved`.
    pub redirect_first: bool,
}

impl Default for HarServerOptions {
    fn default() -> Self {
        Self {
            status: "200 OK",
            redirect_first: false,
        }
    }
}

/// Starts a server in a background thread serving `body`. Returns a URL
/// ending in `/capture.har`. The server runs until the process exits.
pub fn start(body: Vec<u8>) -> String {
    start_with_options(body, HarServerOptions::default())
}

pub fn start_with_options(body: Vec<u8>, opts: HarServerOptions) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let body = Arc::new(body);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let body = Arc::clone(&body);
            thread::spawn(move || handle(stream, &body, opts));
        }
    });
    format!("http://127.0.0.1:{}/capture.har", port)
}

/// Starts a server that accepts connections and never answers them.
/// Each connection is held open for `hold` before being dropped.
pub fn start_silent(hold: Duration) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            thread::spawn(move || {
                let _held = stream;
                thread::sleep(hold);
            });
        }
    });
    format!("http://127.0.0.1:{}/capture.har", port)
}

fn handle(mut stream: TcpStream, body: &[u8], opts: HarServerOptions) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let request = String::from_utf8_lossy(&buf[..n]);
    let mut parts = request.lines().next().unwrap_or("").split_whitespace();
    let method = parts.next().unwrap_or("");
    let path = parts.next().unwrap_or("/");

    if !method.eq_ignore_ascii_case("GET") {
        let _ = stream.write_all(b"HTTP/1.1 405 Method Not Allowed\r\nContent-Length: 0\r\n\r\n");
        return;
    }
    if opts.redirect_first && path != "/moved" {
        let _ = stream.write_all(
            b"HTTP/1.1 302 Found\r\nLocation: /moved\r\nContent-Length: 0\r\n\r\n",
        );
        return;
    }
    let header = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        opts.status,
        body.len()
    );
    let _ = stream.write_all(header.as_bytes());
    let _ = stream.write_all(body);
}
