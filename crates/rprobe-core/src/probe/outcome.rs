//! Status classification for a single probe.

use crate::error::ProbeError;
use crate::transport::ResponseHeaders;
use serde::Serialize;

/// What a response status means for the kind of probe that was sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusClass {
    /// 200 to an un-ranged probe.
    Full,
    /// 206 to a ranged probe.
    Partial,
    /// 416 to a ranged probe: range outside the resource.
    Unsatisfiable,
    /// 200 to a ranged probe: the server sent the whole resource.
    RangeIgnoredByServer,
    /// Any other status.
    Unexpected,
}

/// Classify `status` for a ranged or un-ranged request.
pub fn classify(ranged: bool, status: u32) -> StatusClass {
    match (ranged, status) {
        (false, 200) => StatusClass::Full,
        (false, _) => StatusClass::Unexpected,
        (true, 206) => StatusClass::Partial,
        (true, 200) => StatusClass::RangeIgnoredByServer,
        (true, 416) => StatusClass::Unsatisfiable,
        (true, _) => StatusClass::Unexpected,
    }
}

/// Classified view of one response's metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProbeOutcome {
    /// Raw status code as received.
    pub status: u32,
    pub class: StatusClass,
    /// `Content-Length` of this response; for a 206 that is the byte count of
    /// the range. `None` when missing or not a base-10 integer.
    pub size: Option<u64>,
    /// Server sent `Accept-Ranges: bytes`.
    pub range_supported: bool,
}

impl ProbeOutcome {
    pub fn from_response(ranged: bool, status: u32, headers: &ResponseHeaders) -> Self {
        Self {
            status,
            class: classify(ranged, status),
            size: headers.content_length(),
            range_supported: headers.accepts_byte_ranges(),
        }
    }

    /// `Full` and `Partial` are success; every other class maps to its error kind.
    pub fn check(&self) -> Result<(), ProbeError> {
        match self.class {
            StatusClass::Full | StatusClass::Partial => Ok(()),
            StatusClass::RangeIgnoredByServer => Err(ProbeError::RangeNotSupported),
            StatusClass::Unsatisfiable => Err(ProbeError::InvalidRange),
            StatusClass::Unexpected => Err(ProbeError::UnexpectedStatus { got: self.status }),
        }
    }
}
