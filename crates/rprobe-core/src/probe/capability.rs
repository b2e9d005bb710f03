//! Whole-resource queries: total size and advertised range support.

use super::{Probe, Prober, StatusClass};
use crate::error::ProbeError;
use crate::transport::{Method, Transport};
use serde::Serialize;

/// Total size and declared range support of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Capability {
    /// Total size in bytes; `None` when the server sent no usable `Content-Length`.
    pub size: Option<u64>,
    /// Server sent `Accept-Ranges: bytes`.
    pub range_supported: bool,
}

impl<T: Transport> Prober<T> {
    /// HEAD the resource and report its size and whether it advertises byte ranges.
    ///
    /// Any status but 200 is [`ProbeError::NotRetrievable`].
    pub fn capability(&self, uri: &str) -> Result<Capability, ProbeError> {
        let probe = self.probe(uri, Method::Head, None)?;
        let outcome = probe.outcome;
        drop(probe);

        if outcome.class != StatusClass::Full {
            return Err(ProbeError::NotRetrievable {
                status: outcome.status,
            });
        }
        Ok(Capability {
            size: outcome.size,
            range_supported: outcome.range_supported,
        })
    }

    /// HEAD the resource and report only whether it advertises `Accept-Ranges: bytes`.
    ///
    /// Looser than [`Prober::capability`]: a 206 is accepted as well as a 200.
    pub fn advertises_ranges(&self, uri: &str) -> Result<bool, ProbeError> {
        let outcome = self.probe(uri, Method::Head, None)?.outcome;
        match outcome.status {
            200 | 206 => Ok(outcome.range_supported),
            status => Err(ProbeError::NotRetrievable { status }),
        }
    }

    /// GET the whole resource. On 200 the open body is handed to the caller,
    /// who must read or drop it; `outcome.size` and `outcome.range_supported`
    /// carry the same information as [`Prober::capability`].
    pub fn fetch(&self, uri: &str) -> Result<Probe<T::Body>, ProbeError> {
        let probe = self.probe(uri, Method::Get, None)?;
        if probe.outcome.class != StatusClass::Full {
            return Err(ProbeError::NotRetrievable {
                status: probe.outcome.status,
            });
        }
        Ok(probe)
    }
}
