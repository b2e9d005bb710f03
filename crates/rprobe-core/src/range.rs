//! Byte-range specification and `Range` header construction.

use std::fmt;
use std::str::FromStr;

/// A requested byte range: closed `start-end` (inclusive) or open-ended `start-`.
///
/// `start <= end` is not enforced; the server decides whether the range is
/// satisfiable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeSpec {
    /// First byte offset (inclusive).
    pub start: u64,
    /// Last byte offset (inclusive). Ignored when `end_omitted` is set.
    pub end: u64,
    /// Use the open form `bytes=start-`.
    pub end_omitted: bool,
}

impl RangeSpec {
    /// Closed range `bytes=start-end`.
    pub fn closed(start: u64, end: u64) -> Self {
        Self {
            start,
            end,
            end_omitted: false,
        }
    }

    /// Open-ended range `bytes=start-`.
    pub fn starting_at(start: u64) -> Self {
        Self {
            start,
            end: 0,
            end_omitted: true,
        }
    }

    /// HTTP Range header value (RFC 7233 byte-range syntax).
    pub fn header_value(&self) -> String {
        if self.end_omitted {
            format!("bytes={}-", self.start)
        } else {
            format!("bytes={}-{}", self.start, self.end)
        }
    }
}

impl fmt::Display for RangeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.end_omitted {
            write!(f, "{}-", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// Error parsing a textual range such as `100-199` or `100-`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid byte range {0:?} (expected START-END or START-)")]
pub struct ParseRangeError(String);

impl FromStr for RangeSpec {
    type Err = ParseRangeError;

    /// Accepts `a-b` and `a-`, optionally prefixed with `bytes=`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseRangeError(s.to_string());
        let trimmed = s.trim();
        let body = trimmed.strip_prefix("bytes=").unwrap_or(trimmed);
        let (a, b) = body.split_once('-').ok_or_else(err)?;
        let start = a.trim().parse::<u64>().map_err(|_| err())?;
        let b = b.trim();
        if b.is_empty() {
            return Ok(RangeSpec::starting_at(start));
        }
        let end = b.parse::<u64>().map_err(|_| err())?;
        Ok(RangeSpec::closed(start, end))
    }
}
