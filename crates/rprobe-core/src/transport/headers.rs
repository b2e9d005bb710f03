//! Response header block: raw lines in, case-insensitive lookups out.

/// Headers of a single response (the final one when redirects were followed).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHeaders {
    entries: Vec<(String, String)>,
}

impl ResponseHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one header. The name keeps its original spelling.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// First value for `name` (case-insensitive name match).
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// `Content-Length` as base-10 u64. Missing or unparsable gives `None`.
    pub fn content_length(&self) -> Option<u64> {
        self.get("content-length")?.parse::<u64>().ok()
    }

    /// True only for `Accept-Ranges: bytes`; the value comparison is case-sensitive.
    pub fn accepts_byte_ranges(&self) -> bool {
        self.get("accept-ranges") == Some("bytes")
    }

    /// Feed one raw header line (`Name: value`). Status lines, blank lines and
    /// lines without a colon are ignored.
    pub(crate) fn push_line(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() || line.starts_with("HTTP/") {
            return;
        }
        if let Some((name, value)) = line.split_once(':') {
            self.insert(name.trim(), value.trim());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Parse the code out of a status line such as `HTTP/1.1 206 Partial Content`
/// or `HTTP/2 200`.
pub(crate) fn parse_status_line(line: &str) -> Option<u32> {
    let mut parts = line.trim().split_whitespace();
    let proto = parts.next()?;
    if !proto.starts_with("HTTP/") {
        return None;
    }
    parts.next()?.parse::<u32>().ok()
}
