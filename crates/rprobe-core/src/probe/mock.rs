//! Scripted in-memory transport for unit tests.

use crate::error::TransportError;
use crate::transport::{RawResponse, Request, ResponseHeaders, Transport};
use std::cell::RefCell;
use std::io::Cursor;

struct Canned {
    status: u32,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

/// Answers the n-th request with the n-th scripted response; the last one
/// repeats once the script is exhausted.
pub(crate) struct MockTransport {
    script: Vec<Canned>,
    fail: bool,
    requests: RefCell<Vec<Request>>,
}

impl MockTransport {
    pub(crate) fn new(status: u32) -> Self {
        Self {
            script: vec![Canned {
                status,
                headers: Vec::new(),
                body: Vec::new(),
            }],
            fail: false,
            requests: RefCell::new(Vec::new()),
        }
    }

    /// Every request fails at the transport level.
    pub(crate) fn failing() -> Self {
        let mut t = Self::new(0);
        t.fail = true;
        t
    }

    /// Queue a further response for the next request.
    pub(crate) fn then(mut self, status: u32) -> Self {
        self.script.push(Canned {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        });
        self
    }

    /// Add a header to the most recently scripted response.
    pub(crate) fn header(mut self, name: &str, value: &str) -> Self {
        if let Some(c) = self.script.last_mut() {
            c.headers.push((name.to_string(), value.to_string()));
        }
        self
    }

    pub(crate) fn body(mut self, body: &[u8]) -> Self {
        if let Some(c) = self.script.last_mut() {
            c.body = body.to_vec();
        }
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.requests.borrow().len()
    }

    pub(crate) fn requests(&self) -> Vec<Request> {
        self.requests.borrow().clone()
    }

    pub(crate) fn last_request(&self) -> Option<Request> {
        self.requests.borrow().last().cloned()
    }

    /// `Range` header value of the last request, if any.
    pub(crate) fn last_range(&self) -> Option<String> {
        self.last_request()?
            .headers
            .into_iter()
            .find(|(k, _)| k == "Range")
            .map(|(_, v)| v)
    }
}

impl Transport for MockTransport {
    type Body = Cursor<Vec<u8>>;

    fn send(&self, request: &Request) -> Result<RawResponse<Self::Body>, TransportError> {
        let n = {
            let mut requests = self.requests.borrow_mut();
            requests.push(request.clone());
            requests.len()
        };
        if self.fail {
            return Err(TransportError::Disconnected);
        }
        let canned = &self.script[(n - 1).min(self.script.len() - 1)];
        let mut headers = ResponseHeaders::new();
        for (k, v) in &canned.headers {
            headers.insert(k.as_str(), v.as_str());
        }
        Ok(RawResponse {
            status: canned.status,
            headers,
            body: Cursor::new(canned.body.clone()),
        })
    }
}
