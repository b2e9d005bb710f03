//! `rprobe negotiate <url>`

use super::{fmt_size, Output};
use anyhow::Result;
use rprobe_core::{Prober, RangeSupport};

pub fn run_negotiate(prober: &Prober, url: &str, out: Output) -> Result<()> {
    let n = prober.negotiate(url)?;
    out.emit(&n, || {
        let actual = match n.actual {
            RangeSupport::Honored => "honored",
            RangeSupport::Ignored => "ignored",
            RangeSupport::Unverifiable => "unverifiable (empty resource)",
        };
        format!(
            "size: {}\ndeclared: {}\nactual: {}",
            fmt_size(n.size),
            if n.declared { "bytes" } else { "none" },
            actual
        )
    })
}
