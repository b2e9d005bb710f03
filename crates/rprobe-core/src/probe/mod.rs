//! Range-capability probing.
//!
//! [`Prober::probe`] sends one HEAD or GET (optionally with a `Range` header)
//! and classifies the response. The capability and range queries are thin
//! layers on top of it. Nothing is cached or retried: every call is one
//! independent round trip and one terminal outcome.

mod capability;
mod negotiate;
mod outcome;
mod range_query;

#[cfg(test)]
pub(crate) mod mock;

pub use capability::Capability;
pub use negotiate::{Negotiation, RangeSupport};
pub use outcome::{classify, ProbeOutcome, StatusClass};

use crate::config::ProbeConfig;
use crate::error::ProbeError;
use crate::range::RangeSpec;
use crate::transport::{CurlTransport, Method, Request, Transport};

/// A classified response that still owns its body.
///
/// The body is a scoped resource: dropping the `Probe` (or the body taken out
/// of it) releases the connection. This holds on every path, including when
/// [`Probe::check`] turns the outcome into an error.
#[derive(Debug)]
pub struct Probe<B> {
    pub outcome: ProbeOutcome,
    body: B,
}

impl<B> Probe<B> {
    pub fn body_mut(&mut self) -> &mut B {
        &mut self.body
    }

    pub fn into_body(self) -> B {
        self.body
    }

    pub fn into_parts(self) -> (ProbeOutcome, B) {
        (self.outcome, self.body)
    }

    /// Keep the probe if its class is a success, else drop it and return the
    /// matching error.
    pub fn check(self) -> Result<Self, ProbeError> {
        self.outcome.check()?;
        Ok(self)
    }
}

/// Issues probes through a [`Transport`]. Holds no per-request state, so one
/// instance can be shared freely between threads when the transport allows it.
#[derive(Debug, Clone, Default)]
pub struct Prober<T = CurlTransport> {
    transport: T,
}

impl Prober<CurlTransport> {
    /// Prober over libcurl configured from `config`.
    pub fn from_config(config: &ProbeConfig) -> Self {
        Self::new(CurlTransport::new(config))
    }
}

impl<T: Transport> Prober<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send one request and classify the response.
    ///
    /// Transport failures are returned as [`ProbeError::Transport`]; every
    /// received status, including unexpected ones, yields `Ok` with the
    /// classification in [`Probe::outcome`].
    pub fn probe(
        &self,
        uri: &str,
        method: Method,
        range: Option<RangeSpec>,
    ) -> Result<Probe<T::Body>, ProbeError> {
        let mut request = Request::new(method, uri);
        if let Some(spec) = &range {
            request = request.header("Range", spec.header_value());
        }
        tracing::debug!(
            "probe {} {} range={}",
            method,
            uri,
            range.map(|r| r.header_value()).unwrap_or_else(|| "-".into())
        );

        let response = self.transport.send(&request)?;
        let outcome = ProbeOutcome::from_response(range.is_some(), response.status, &response.headers);
        tracing::debug!(
            "probe {} {} -> {} {:?} size={:?} accept_ranges={}",
            method,
            uri,
            outcome.status,
            outcome.class,
            outcome.size,
            outcome.range_supported
        );
        Ok(Probe {
            outcome,
            body: response.body,
        })
    }

    /// Like [`Prober::probe`] with the method given by name. Anything but
    /// `HEAD` or `GET` fails with [`ProbeError::InvalidMethod`] before the
    /// transport is touched.
    pub fn probe_str(
        &self,
        uri: &str,
        method: &str,
        range: Option<RangeSpec>,
    ) -> Result<Probe<T::Body>, ProbeError> {
        let method: Method = method.parse()?;
        self.probe(uri, method, range)
    }
}
