//! HTTP transport collaborator.
//!
//! The prober only needs "send a request, get status + headers + body". That
//! seam is the [`Transport`] trait; [`CurlTransport`] is the libcurl-backed
//! implementation used outside of tests.

mod easy;
mod headers;

pub use easy::{CurlBody, CurlTransport};
pub use headers::ResponseHeaders;

use crate::error::{ProbeError, TransportError};
use std::fmt;
use std::io::Read;
use std::str::FromStr;

/// Request methods usable for probing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Head,
    Get,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Head => "HEAD",
            Method::Get => "GET",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = ProbeError;

    /// Exact, upper-case method names only.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HEAD" => Ok(Method::Head),
            "GET" => Ok(Method::Get),
            other => Err(ProbeError::InvalidMethod(other.to_string())),
        }
    }
}

/// One outgoing request.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub uri: String,
    /// Extra request headers as (name, value).
    pub headers: Vec<(String, String)>,
}

impl Request {
    pub fn new(method: Method, uri: &str) -> Self {
        Self {
            method,
            uri: uri.to_string(),
            headers: Vec::new(),
        }
    }

    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_string(), value.into()));
        self
    }
}

/// Status, headers and the still-open body of a response.
///
/// The body is owned: dropping it releases the underlying connection.
#[derive(Debug)]
pub struct RawResponse<B> {
    pub status: u32,
    pub headers: ResponseHeaders,
    pub body: B,
}

/// Issues a request and hands back the response head plus an owned body stream.
pub trait Transport {
    type Body: Read;

    fn send(&self, request: &Request) -> Result<RawResponse<Self::Body>, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    type Body = T::Body;

    fn send(&self, request: &Request) -> Result<RawResponse<Self::Body>, TransportError> {
        (**self).send(request)
    }
}
