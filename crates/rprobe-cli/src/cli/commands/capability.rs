//! `rprobe capability <url>`

use super::{fmt_size, Output};
use anyhow::Result;
use rprobe_core::Prober;

pub fn run_capability(prober: &Prober, url: &str, out: Output) -> Result<()> {
    let cap = prober.capability(url)?;
    out.emit(&cap, || {
        format!(
            "size: {}\nranges: {}",
            fmt_size(cap.size),
            if cap.range_supported {
                "bytes"
            } else {
                "not advertised"
            }
        )
    })
}
