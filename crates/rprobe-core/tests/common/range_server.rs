//! Minimal HTTP/1.1 server that answers HEAD and GET, with or without Range.
//!
//! Serves a single static body at every path except `/old`, which redirects
//! to `/`, and `/loop`, which redirects to itself. Ranged requests get 206 (clamped to the body), 416 when the start
//! lies past the end, or 200 when range support is switched off.

#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct RangeServerOptions {
    /// If false, HEAD returns 405 (simulates servers that block HEAD).
    pub head_allowed: bool,
    /// If false, Range is ignored and the full body is returned with 200.
    pub support_ranges: bool,
    /// Send `Accept-Ranges: bytes`, independent of whether ranges work.
    pub advertise_ranges: bool,
    /// Send `Content-Length` on 200 responses.
    pub send_length: bool,
}

impl Default for RangeServerOptions {
    fn default() -> Self {
        Self {
            head_allowed: true,
            support_ranges: true,
            advertise_ranges: true,
            send_length: true,
        }
    }
}

/// Starts a server in a background thread serving `body`. Returns the base URL
/// (e.g. "http://127.0.0.1:12345/"). The server runs until the process exits.
pub fn start(body: Vec<u8>) -> String {
    start_with_options(body, RangeServerOptions::default())
}

/// Like `start` but allows customizing server behavior.
pub fn start_with_options(body: Vec<u8>, opts: RangeServerOptions) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let body = Arc::new(body);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let body = Arc::clone(&body);
            thread::spawn(move || handle(stream, &body, opts));
        }
    });
    format!("http://127.0.0.1:{}/", port)
}

/// A URL on which nothing listens.
pub fn dead_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/", port)
}

struct Parsed<'a> {
    method: &'a str,
    path: &'a str,
    /// (start, end_inclusive); open-ended ranges use u64::MAX.
    range: Option<(u64, u64)>,
}

fn handle(mut stream: TcpStream, body: &[u8], opts: RangeServerOptions) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let req = parse_request(request);
    let is_head = req.method.eq_ignore_ascii_case("HEAD");

    if !is_head && !req.method.eq_ignore_ascii_case("GET") {
        let _ = stream.write_all(b"HTTP/1.1 405 Method Not Allowed\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
        return;
    }
    if is_head && !opts.head_allowed {
        let _ = stream.write_all(b"HTTP/1.1 405 Method Not Allowed\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
        return;
    }
    if req.path == "/loop" {
        let _ = stream.write_all(b"HTTP/1.1 302 Found\r\nLocation: /loop\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
        return;
    }
    if req.path == "/old" {
        let _ = stream.write_all(b"HTTP/1.1 302 Found\r\nLocation: /\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
        return;
    }

    let total = body.len() as u64;
    let accept_ranges = if opts.advertise_ranges {
        "Accept-Ranges: bytes\r\n"
    } else {
        ""
    };

    let (status, extra, slice): (&str, String, &[u8]) = match req.range {
        Some((start, end_incl)) if opts.support_ranges => {
            if start >= total || start > end_incl {
                (
                    "416 Range Not Satisfiable",
                    format!("Content-Range: bytes */{}\r\nContent-Length: 0\r\n", total),
                    &body[0..0],
                )
            } else {
                let end_incl = end_incl.min(total - 1);
                let slice = &body[start as usize..=end_incl as usize];
                (
                    "206 Partial Content",
                    format!(
                        "Content-Range: bytes {}-{}/{}\r\nContent-Length: {}\r\n",
                        start,
                        end_incl,
                        total,
                        slice.len()
                    ),
                    slice,
                )
            }
        }
        _ => {
            let length = if opts.send_length {
                format!("Content-Length: {}\r\n", total)
            } else {
                String::new()
            };
            ("200 OK", length, body)
        }
    };

    let response = format!(
        "HTTP/1.1 {}\r\n{}{}Connection: close\r\n\r\n",
        status, extra, accept_ranges
    );
    let _ = stream.write_all(response.as_bytes());
    if !is_head {
        let _ = stream.write_all(slice);
    }
}

fn parse_request(request: &str) -> Parsed<'_> {
    let mut parsed = Parsed {
        method: "",
        path: "/",
        range: None,
    };
    for (i, line) in request.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            break;
        }
        if i == 0 {
            let mut parts = line.split_whitespace();
            parsed.method = parts.next().unwrap_or("");
            parsed.path = parts.next().unwrap_or("/");
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("range") {
                parsed.range = parse_range(value.trim());
            }
        }
    }
    parsed
}

fn parse_range(value: &str) -> Option<(u64, u64)> {
    let part = value.strip_prefix("bytes=")?.trim();
    let (a, b) = part.split_once('-')?;
    let start = a.trim().parse::<u64>().ok()?;
    let b = b.trim();
    let end_incl = if b.is_empty() {
        u64::MAX
    } else {
        b.parse::<u64>().ok()?
    };
    Some((start, end_incl))
}
