//! Error types for probing.
//!
//! `TransportError` covers everything that happens before a status line is
//! available; `ProbeError` adds the classification failures a caller must be
//! able to tell apart (range ignored vs. range outside the resource, etc.).

use thiserror::Error;

/// Failure of the transport collaborator: no response head was received.
#[derive(Debug, Error)]
pub enum TransportError {
    /// libcurl reported an error (DNS, connect, TLS, timeout, ...).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// The URI could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// Only http and https are probed.
    #[error("unsupported URL scheme: {0}")]
    UnsupportedScheme(String),
    /// The transfer worker thread could not be started.
    #[error("failed to start transfer: {0}")]
    Spawn(std::io::Error),
    /// The transfer worker went away before a response head was produced.
    #[error("transfer ended without a response")]
    Disconnected,
}

/// Error returned by the prober and the queries built on it.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Only HEAD and GET can be used to probe.
    #[error("request method {0:?} is not HEAD or GET")]
    InvalidMethod(String),
    /// Network, DNS or TLS failure, passed through unchanged.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The server answered with a status that has no meaning for this probe.
    #[error("unexpected HTTP status {got}")]
    UnexpectedStatus { got: u32 },
    /// A range was requested but the server returned the whole resource (200).
    #[error("range request ignored by the server")]
    RangeNotSupported,
    /// The requested range lies outside the resource (416).
    #[error("requested range not satisfiable")]
    InvalidRange,
    /// The capability probe did not return 200.
    #[error("resource not retrievable (HTTP {status})")]
    NotRetrievable { status: u32 },
    /// A 206 response that cannot be used for range planning.
    #[error("malformed partial response: {reason}")]
    MalformedResponse { reason: String },
}

impl ProbeError {
    /// True for the two outcomes where the resource exists but ranged access
    /// is not usable; a caller would typically fall back to a plain GET.
    pub fn is_range_failure(&self) -> bool {
        matches!(self, ProbeError::RangeNotSupported | ProbeError::InvalidRange)
    }
}
