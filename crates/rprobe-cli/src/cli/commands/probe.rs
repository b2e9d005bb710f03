//! `rprobe probe <url> [--method M] [--range R]`
//!
//! Prints the raw classification; a non-success class is reported, not failed.

use super::{fmt_size, Output};
use anyhow::Result;
use rprobe_core::{Prober, RangeSpec};

pub fn run_probe(
    prober: &Prober,
    url: &str,
    method: &str,
    range: Option<RangeSpec>,
    out: Output,
) -> Result<()> {
    let outcome = prober.probe_str(url, method, range)?.outcome;
    out.emit(&outcome, || {
        format!(
            "status: {} ({:?})\nsize: {}\naccept-ranges: {}",
            outcome.status,
            outcome.class,
            fmt_size(outcome.size),
            outcome.range_supported
        )
    })
}
