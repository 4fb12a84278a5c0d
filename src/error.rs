//! Error types for a single connection
//!
//! None of these are fatal to the process. The listener logs them and moves on.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::http::parser::ParseError;

/// Result type alias for connection handling
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Request line was malformed; no response is written
    #[error("malformed request line: {0:?}")]
    RequestRead(ParseError),

    /// Peer closed the connection before sending a full request line
    #[error("connection closed before request line was received")]
    ConnectionClosed,

    /// Peer did not send a request line in time
    #[error("no request line received within {0:?}")]
    Timeout(Duration),

    /// File passed the existence check but could not be read
    #[error("failed to read {}: {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Client went away mid-response
    #[error("write failed: {0}")]
    Write(std::io::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Error::RequestRead(e)
    }
}
