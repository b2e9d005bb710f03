//! Ranged queries: exact byte count the server commits to for a range.

use super::{Probe, Prober, StatusClass};
use crate::error::ProbeError;
use crate::range::RangeSpec;
use crate::transport::{Method, Transport};

impl<T: Transport> Prober<T> {
    /// HEAD with `Range` and return the byte count of the 206 response.
    ///
    /// The size is the server's `Content-Length`, not `end - start + 1`:
    /// servers clamp open-ended and overlong ranges to what they actually have.
    pub fn range_size(&self, uri: &str, range: RangeSpec) -> Result<u64, ProbeError> {
        let (size, probe) = self.ranged(uri, Method::Head, range)?;
        drop(probe);
        Ok(size)
    }

    /// [`Prober::range_size`] for the open-ended range `bytes=start-`.
    pub fn range_size_from(&self, uri: &str, start: u64) -> Result<u64, ProbeError> {
        self.range_size(uri, RangeSpec::starting_at(start))
    }

    /// GET with `Range`. On 206 the open body is handed to the caller and
    /// `outcome.size` is guaranteed to be `Some(range length)`.
    pub fn fetch_range(&self, uri: &str, range: RangeSpec) -> Result<Probe<T::Body>, ProbeError> {
        self.ranged(uri, Method::Get, range).map(|(_, probe)| probe)
    }

    /// [`Prober::fetch_range`] for the open-ended range `bytes=start-`: the
    /// rest of the resource from `start`.
    pub fn fetch_range_from(&self, uri: &str, start: u64) -> Result<Probe<T::Body>, ProbeError> {
        self.fetch_range(uri, RangeSpec::starting_at(start))
    }

    fn ranged(
        &self,
        uri: &str,
        method: Method,
        range: RangeSpec,
    ) -> Result<(u64, Probe<T::Body>), ProbeError> {
        let probe = self.probe(uri, method, Some(range))?.check()?;
        debug_assert_eq!(probe.outcome.class, StatusClass::Partial);
        match probe.outcome.size {
            Some(size) => Ok((size, probe)),
            None => {
                tracing::warn!("{} {}: 206 without usable Content-Length", method, uri);
                Err(ProbeError::MalformedResponse {
                    reason: "206 without a usable Content-Length".into(),
                })
            }
        }
    }
}
