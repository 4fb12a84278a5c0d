use crate::http::request::Request;

/// Longest request line accepted, terminator excluded.
pub const MAX_LINE_LEN: usize = 8 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// No line terminator yet
    Incomplete,
    /// More than `MAX_LINE_LEN` bytes without a terminator
    LineTooLong,
    InvalidEncoding,
    EmptyLine,
    /// Fewer than two whitespace-separated tokens
    MissingPath,
}

/// Parses the request line at the start of `buf`.
///
/// Returns the request and the number of bytes consumed, terminator
/// included. Anything after the first line is left alone.
pub fn parse_request_line(buf: &[u8]) -> Result<(Request, usize), ParseError> {
    let Some(line_end) = buf.iter().position(|&b| b == b'\n') else {
        // A trailing '\r' may still be followed by its '\n'
        let pending = buf.strip_suffix(b"\r").unwrap_or(buf);
        if pending.len() > MAX_LINE_LEN {
            return Err(ParseError::LineTooLong);
        }
        return Err(ParseError::Incomplete);
    };

    let line_bytes = &buf[..line_end];
    let line_bytes = line_bytes.strip_suffix(b"\r").unwrap_or(line_bytes);
    if line_bytes.len() > MAX_LINE_LEN {
        return Err(ParseError::LineTooLong);
    }

    let line = std::str::from_utf8(line_bytes).map_err(|_| ParseError::InvalidEncoding)?;
    if line.trim().is_empty() {
        return Err(ParseError::EmptyLine);
    }

    let mut parts = line.split_whitespace();
    let method = parts.next().ok_or(ParseError::EmptyLine)?;
    let path = parts.next().ok_or(ParseError::MissingPath)?;
    let version = parts.next();

    let request = Request {
        line: line.to_string(),
        method: method.to_string(),
        path: path.to_string(),
        version: version.map(str::to_string),
    };

    Ok((request, line_end + 1))
}
