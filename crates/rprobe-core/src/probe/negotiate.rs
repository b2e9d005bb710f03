//! Declared vs. actual range support.
//!
//! `Accept-Ranges: bytes` is only a declaration. Some servers advertise it and
//! still answer a ranged request with 200, others honour ranges without
//! advertising them. A downloader planning segments wants both facts.

use super::{Capability, Prober, StatusClass};
use crate::error::ProbeError;
use crate::range::RangeSpec;
use crate::transport::{Method, Transport};
use serde::Serialize;

/// How the server answered a one-byte ranged probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeSupport {
    /// 206: ranges work.
    Honored,
    /// 200: the range was ignored and the whole resource would be sent.
    Ignored,
    /// 416 for `bytes=0-0`: the resource is empty, nothing to split.
    Unverifiable,
}

/// Result of [`Prober::negotiate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Negotiation {
    /// Total size from the un-ranged probe.
    pub size: Option<u64>,
    /// Server sent `Accept-Ranges: bytes`.
    pub declared: bool,
    pub actual: RangeSupport,
}

impl Negotiation {
    /// Ranged (segmented or resumed) retrieval can be planned.
    pub fn ranges_usable(&self) -> bool {
        self.actual == RangeSupport::Honored
    }

    /// Server advertises ranges but does not honour them.
    pub fn declared_but_ignored(&self) -> bool {
        self.declared && self.actual == RangeSupport::Ignored
    }
}

impl<T: Transport> Prober<T> {
    /// Capability query followed by a HEAD for `bytes=0-0`, reporting
    /// declared and actual range support separately.
    pub fn negotiate(&self, uri: &str) -> Result<Negotiation, ProbeError> {
        let Capability {
            size,
            range_supported,
        } = self.capability(uri)?;

        let outcome = self
            .probe(uri, Method::Head, Some(RangeSpec::closed(0, 0)))?
            .outcome;
        let actual = match outcome.class {
            StatusClass::Partial => RangeSupport::Honored,
            StatusClass::RangeIgnoredByServer => RangeSupport::Ignored,
            StatusClass::Unsatisfiable => RangeSupport::Unverifiable,
            StatusClass::Full | StatusClass::Unexpected => {
                return Err(ProbeError::UnexpectedStatus {
                    got: outcome.status,
                })
            }
        };
        if range_supported && actual == RangeSupport::Ignored {
            tracing::warn!("{} advertises Accept-Ranges but ignored a range request", uri);
        }

        Ok(Negotiation {
            size,
            declared: range_supported,
            actual,
        })
    }
}
