//! `rprobe range <url> <START-END|START->`

use super::Output;
use anyhow::Result;
use rprobe_core::{Prober, RangeSpec};
use serde::Serialize;

#[derive(Serialize)]
struct RangeReport {
    range: String,
    size: u64,
}

pub fn run_range(prober: &Prober, url: &str, range: RangeSpec, out: Output) -> Result<()> {
    let size = prober.range_size(url, range)?;
    let report = RangeReport {
        range: range.header_value(),
        size,
    };
    out.emit(&report, || format!("{}: {} bytes", report.range, size))
}
