//! Subcommand implementations.

mod capability;
mod negotiate;
mod probe;
mod range;

pub use capability::run_capability;
pub use negotiate::run_negotiate;
pub use probe::run_probe;
pub use range::run_range;

use anyhow::Result;
use serde::Serialize;

/// How results are printed.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    pub json: bool,
}

impl Output {
    /// Print `value` as JSON, or the human-readable `text` otherwise.
    pub fn emit<T: Serialize>(&self, value: &T, text: impl FnOnce() -> String) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string(value)?);
        } else {
            println!("{}", text());
        }
        Ok(())
    }
}

/// "12345 bytes" or "unknown".
pub(crate) fn fmt_size(size: Option<u64>) -> String {
    match size {
        Some(n) => format!("{} bytes", n),
        None => "unknown".to_string(),
    }
}
