//! libcurl-backed transport.
//!
//! Each request runs on its own worker thread with a `curl::easy::Easy`
//! handle. The header callback publishes the final response head over a
//! channel as soon as its header block is complete; body bytes follow over a
//! bounded channel and are read through [`CurlBody`]. Dropping the body makes
//! the next write callback fail, which aborts the transfer and frees the
//! connection.

use super::headers::{parse_status_line, ResponseHeaders};
use super::{Method, RawResponse, Request, Transport};
use crate::config::ProbeConfig;
use crate::error::TransportError;
use std::cell::RefCell;
use std::io::{self, Read};
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::thread;
use std::time::Duration;
use url::Url;

/// Body chunks buffered between the transfer thread and the reader.
const CHUNK_QUEUE: usize = 16;

type Head = (u32, ResponseHeaders);
type HeadSender = SyncSender<Result<Head, TransportError>>;
type Chunk = Result<Vec<u8>, curl::Error>;

/// Transport settings taken from [`ProbeConfig`].
#[derive(Debug, Clone)]
struct Settings {
    connect_timeout: Duration,
    timeout: Duration,
    low_speed_limit: u32,
    low_speed_time: Duration,
    follow_redirects: bool,
    max_redirections: u32,
    user_agent: Option<String>,
    headers: Vec<(String, String)>,
}

/// Production [`Transport`] using libcurl.
#[derive(Debug, Clone)]
pub struct CurlTransport {
    settings: Settings,
}

impl CurlTransport {
    pub fn new(config: &ProbeConfig) -> Self {
        let mut headers: Vec<(String, String)> = config
            .headers
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        headers.sort();
        Self {
            settings: Settings {
                connect_timeout: Duration::from_secs(config.connect_timeout_secs),
                timeout: Duration::from_secs(config.timeout_secs),
                low_speed_limit: config.low_speed_limit_bytes,
                low_speed_time: Duration::from_secs(config.low_speed_time_secs),
                follow_redirects: config.follow_redirects,
                max_redirections: config.max_redirections,
                user_agent: config.user_agent.clone(),
                headers,
            },
        }
    }
}

impl Default for CurlTransport {
    fn default() -> Self {
        Self::new(&ProbeConfig::default())
    }
}

impl Transport for CurlTransport {
    type Body = CurlBody;

    fn send(&self, request: &Request) -> Result<RawResponse<CurlBody>, TransportError> {
        let url = validate_url(&request.uri)?;
        let job = Job {
            url: url.to_string(),
            method: request.method,
            headers: self
                .settings
                .headers
                .iter()
                .chain(request.headers.iter())
                .cloned()
                .collect(),
            settings: self.settings.clone(),
        };

        let (head_tx, head_rx) = mpsc::sync_channel(1);
        let (chunk_tx, chunk_rx) = mpsc::sync_channel(CHUNK_QUEUE);
        thread::Builder::new()
            .name("rprobe-transfer".into())
            .spawn(move || run_transfer(job, head_tx, chunk_tx))
            .map_err(TransportError::Spawn)?;

        let (status, headers) = head_rx.recv().map_err(|_| TransportError::Disconnected)??;
        Ok(RawResponse {
            status,
            headers,
            body: CurlBody {
                chunks: chunk_rx,
                current: Vec::new(),
                pos: 0,
                finished: false,
            },
        })
    }
}

fn validate_url(uri: &str) -> Result<Url, TransportError> {
    let url = Url::parse(uri)?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(TransportError::UnsupportedScheme(other.to_string())),
    }
}

/// Owned copy of everything the worker thread needs.
struct Job {
    url: String,
    method: Method,
    headers: Vec<(String, String)>,
    settings: Settings,
}

fn configure(job: &Job) -> Result<curl::easy::Easy, curl::Error> {
    let s = &job.settings;
    let mut easy = curl::easy::Easy::new();
    easy.url(&job.url)?;
    match job.method {
        Method::Head => {
            easy.nobody(true)?;
            easy.timeout(s.timeout)?;
        }
        Method::Get => {
            // Body may be large; only stalls are fatal.
            easy.get(true)?;
            easy.low_speed_limit(s.low_speed_limit)?;
            easy.low_speed_time(s.low_speed_time)?;
        }
    }
    // Proxy tunnel replies must not reach the header callback as a response.
    easy.suppress_connect_headers(true)?;
    easy.follow_location(s.follow_redirects)?;
    easy.max_redirections(s.max_redirections)?;
    easy.connect_timeout(s.connect_timeout)?;
    if let Some(ua) = &s.user_agent {
        easy.useragent(ua)?;
    }

    if !job.headers.is_empty() {
        let mut list = curl::easy::List::new();
        for (k, v) in &job.headers {
            list.append(&format!("{}: {}", k.trim(), v.trim()))?;
        }
        easy.http_headers(list)?;
    }
    Ok(easy)
}

fn run_transfer(job: Job, head_tx: HeadSender, chunk_tx: SyncSender<Chunk>) {
    let mut easy = match configure(&job) {
        Ok(easy) => easy,
        Err(e) => {
            let _ = head_tx.send(Err(e.into()));
            return;
        }
    };

    let head_tx = RefCell::new(Some(head_tx));
    let mut tracker = HeadTracker::new(job.settings.follow_redirects);
    let result = perform(&mut easy, &mut tracker, &head_tx, &chunk_tx);

    match (result, head_tx.into_inner()) {
        (Ok(()), Some(tx)) => {
            let _ = tx.send(tracker.finish().ok_or(TransportError::Disconnected));
        }
        (Err(e), Some(tx)) if e.is_too_many_redirects() => {
            // The last redirect is a real answer; report it as the status.
            let _ = tx.send(tracker.finish().ok_or_else(|| e.into()));
        }
        (Err(e), Some(tx)) => {
            let _ = tx.send(Err(e.into()));
        }
        (Err(e), None) => {
            // A write error means the reader dropped the body on purpose.
            if !e.is_write_error() {
                tracing::debug!("transfer of {} failed after headers: {}", job.url, e);
                let _ = chunk_tx.send(Err(e));
            }
        }
        (Ok(()), None) => {}
    }
}

fn perform(
    easy: &mut curl::easy::Easy,
    tracker: &mut HeadTracker,
    head_tx: &RefCell<Option<HeadSender>>,
    chunk_tx: &SyncSender<Chunk>,
) -> Result<(), curl::Error> {
    let mut transfer = easy.transfer();
    transfer.header_function(|data| {
        if let Some(head) = tracker.feed(data) {
            if let Some(tx) = head_tx.borrow_mut().take() {
                return tx.send(Ok(head)).is_ok();
            }
        }
        true
    })?;
    transfer.write_function(|data| match chunk_tx.send(Ok(data.to_vec())) {
        Ok(()) => Ok(data.len()),
        Err(_) => Ok(0),
    })?;
    transfer.perform()
}

/// Follows header blocks until the final response (not 1xx, not a proxy
/// tunnel reply, not a redirect curl is about to follow) is complete.
struct HeadTracker {
    follow_redirects: bool,
    status: Option<u32>,
    headers: ResponseHeaders,
    /// Inside the header block of a proxy `CONNECT` reply.
    in_tunnel_reply: bool,
}

impl HeadTracker {
    fn new(follow_redirects: bool) -> Self {
        Self {
            follow_redirects,
            status: None,
            headers: ResponseHeaders::new(),
            in_tunnel_reply: false,
        }
    }

    fn feed(&mut self, data: &[u8]) -> Option<Head> {
        let line = String::from_utf8_lossy(data);
        let line = line.trim_end();
        if let Some(code) = parse_status_line(line) {
            self.in_tunnel_reply = is_tunnel_reply(code, line);
            self.status = if self.in_tunnel_reply { None } else { Some(code) };
            self.headers = ResponseHeaders::new();
            return None;
        }
        if self.in_tunnel_reply {
            if line.is_empty() {
                self.in_tunnel_reply = false;
            }
            return None;
        }
        if !line.is_empty() {
            self.headers.push_line(line);
            return None;
        }
        let status = self.status?;
        if self.is_interim(status) {
            return None;
        }
        self.status = None;
        Some((status, std::mem::take(&mut self.headers)))
    }

    fn is_interim(&self, status: u32) -> bool {
        (100..200).contains(&status)
            || (self.follow_redirects
                && (300..400).contains(&status)
                && self.headers.get("location").is_some())
    }

    fn finish(self) -> Option<Head> {
        self.status.map(|s| (s, self.headers))
    }
}

/// `HTTP/1.1 200 Connection established` and friends, sent by a proxy before
/// the tunnelled response when connect headers are not suppressed.
fn is_tunnel_reply(code: u32, status_line: &str) -> bool {
    (200..300).contains(&code)
        && status_line
            .to_ascii_lowercase()
            .contains("connection established")
}

/// Response body streamed from the transfer thread.
///
/// Read it to the end or drop it; either releases the connection.
#[derive(Debug)]
pub struct CurlBody {
    chunks: Receiver<Chunk>,
    current: Vec<u8>,
    pos: usize,
    finished: bool,
}

impl Read for CurlBody {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        while self.pos >= self.current.len() {
            if self.finished {
                return Ok(0);
            }
            match self.chunks.recv() {
                Ok(Ok(chunk)) => {
                    self.current = chunk;
                    self.pos = 0;
                }
                Ok(Err(e)) => {
                    self.finished = true;
                    return Err(io::Error::new(io::ErrorKind::Other, e));
                }
                Err(_) => {
                    self.finished = true;
                    return Ok(0);
                }
            }
        }
        let n = buf.len().min(self.current.len() - self.pos);
        buf[..n].copy_from_slice(&self.current[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}
