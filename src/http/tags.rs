//! Template tag substitution
//!
//! Served files may contain two literal markers which are replaced on every
//! line before the body goes out:
//!
//! - `<cs371date>`: the current time, formatted like the `Date` header
//! - `<cs371server>`: the configured server display name
//!
//! Replacement is plain text. Values are not escaped.

use std::sync::Arc;
use std::time::SystemTime;

pub const DATE_MARKER: &str = "<cs371date>";
pub const SERVER_MARKER: &str = "<cs371server>";

/// Formats a timestamp as an IMF-fixdate in GMT, e.g.
/// `Sun, 06 Nov 1994 08:49:37 GMT`.
pub fn format_date(time: SystemTime) -> String {
    httpdate::fmt_http_date(time)
}

type Clock = Arc<dyn Fn() -> SystemTime + Send + Sync>;

/// The marker set, in the order markers are replaced.
#[derive(Clone)]
pub struct Tags {
    server_name: String,
    clock: Clock,
}

impl std::fmt::Debug for Tags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tags")
            .field("server_name", &self.server_name)
            .finish_non_exhaustive()
    }
}

impl Tags {
    /// Markers backed by the system clock.
    pub fn new(server_name: impl Into<String>) -> Self {
        Self::with_clock(server_name, SystemTime::now)
    }

    pub fn with_clock<F>(server_name: impl Into<String>, clock: F) -> Self
    where
        F: Fn() -> SystemTime + Send + Sync + 'static,
    {
        Self {
            server_name: server_name.into(),
            clock: Arc::new(clock),
        }
    }

    pub fn server_name(&self) -> &str {
        &self.server_name
    }

    /// Current time from this set's clock, already formatted.
    pub fn now(&self) -> String {
        format_date((self.clock)())
    }

    /// (marker, replacement) pairs for one line. Each provider runs once.
    fn pairs(&self) -> [(&'static str, String); 2] {
        [
            (DATE_MARKER, self.now()),
            (SERVER_MARKER, self.server_name.clone()),
        ]
    }

    /// Replaces every marker occurrence in `line`.
    pub fn substitute(&self, line: &str) -> String {
        let mut out = line.to_string();
        for (marker, value) in self.pairs() {
            if out.contains(marker) {
                out = out.replace(marker, &value);
            }
        }
        out
    }

    /// Byte-level [`Tags::substitute`]. Content that isn't valid UTF-8
    /// passes through untouched apart from the markers themselves.
    pub fn substitute_bytes(&self, line: &[u8]) -> Vec<u8> {
        let mut out = line.to_vec();
        for (marker, value) in self.pairs() {
            out = replace_bytes(&out, marker.as_bytes(), value.as_bytes());
        }
        out
    }
}

fn replace_bytes(haystack: &[u8], needle: &[u8], value: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(haystack.len());
    let mut rest = haystack;

    while let Some(pos) = rest.windows(needle.len()).position(|w| w == needle) {
        out.extend_from_slice(&rest[..pos]);
        out.extend_from_slice(value);
        rest = &rest[pos + needle.len()..];
    }
    out.extend_from_slice(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_bytes_handles_adjacent_markers() {
        let out = replace_bytes(b"<x><x>!", b"<x>", b"y");
        assert_eq!(out, b"yy!");
    }

    #[test]
    fn replace_bytes_without_match_is_identity() {
        let input = [0xff, 0xfe, b'<', b'a'];
        assert_eq!(replace_bytes(&input, b"<cs371date>", b"now"), input.to_vec());
    }
}
