//! HTTP byte-range capability and size probing.
//!
//! Answers the questions a resumable or segmented downloader has to settle
//! before splitting work: how big is the resource, does the server honour
//! `Range`, and exactly how many bytes will a given range deliver.

pub mod config;
pub mod error;
pub mod logging;
pub mod probe;
pub mod range;
pub mod transport;

pub use error::{ProbeError, TransportError};
pub use probe::{
    Capability, Negotiation, Probe, ProbeOutcome, Prober, RangeSupport, StatusClass,
};
pub use range::RangeSpec;
pub use transport::{CurlTransport, Method, Transport};
