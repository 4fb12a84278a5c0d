//! Request interpretation
//!
//! Turns a request line into a [`Classification`]: nothing requested, an
//! existing file, or a missing one. The classification is the only thing
//! handed on to the response producer.

use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use bytes::{Buf, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::time::timeout;
use tracing::debug;

use crate::error::{Error, Result};
use crate::http::parser::{ParseError, parse_request_line};
use crate::http::request::Request;

/// Outcome of interpreting one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Path was empty or "/"
    NoPathRequested,
    /// Path resolved to a regular file under the document root
    FileFound(PathBuf),
    /// Path resolved to nothing servable, or tried to leave the root
    FileMissing(PathBuf),
}

/// Directory that every served file must live under.
#[derive(Debug, Clone)]
pub struct DocumentRoot {
    root: PathBuf,
}

impl DocumentRoot {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Maps a client path onto the document root.
    ///
    /// The path is normalized lexically: `.` segments are dropped and `..`
    /// pops the previous segment. Returns `None` if a `..` would climb
    /// above the root. No percent-decoding is done.
    pub fn resolve(&self, request_path: &str) -> Option<PathBuf> {
        let mut segments: Vec<&std::ffi::OsStr> = Vec::new();

        for component in Path::new(request_path).components() {
            match component {
                Component::Normal(segment) => segments.push(segment),
                Component::ParentDir => {
                    segments.pop()?;
                }
                Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
            }
        }

        let mut resolved = self.root.clone();
        resolved.extend(segments);
        Some(resolved)
    }

    /// Whether `path` really lives under the root once symlinks are
    /// followed. Anything that can't be canonicalized does not.
    pub async fn contains(&self, path: &Path) -> bool {
        let (Ok(root), Ok(target)) = (
            tokio::fs::canonicalize(&self.root).await,
            tokio::fs::canonicalize(path).await,
        ) else {
            return false;
        };
        target.starts_with(root)
    }

    /// Where a rejected path would have landed by plain concatenation.
    ///
    /// Only used to label the 404 in logs; never touched on disk.
    fn unresolved(&self, request_path: &str) -> PathBuf {
        self.root.join(request_path.trim_start_matches('/'))
    }
}

/// Classifies an already-parsed request against the document root.
pub async fn classify(request: &Request, root: &DocumentRoot) -> Classification {
    if !request.names_resource() {
        return Classification::NoPathRequested;
    }

    let Some(path) = root.resolve(&request.path) else {
        debug!(path = %request.path, "Rejected path outside document root");
        return Classification::FileMissing(root.unresolved(&request.path));
    };

    // Directories and unreadable metadata both count as missing
    match tokio::fs::metadata(&path).await {
        Ok(meta) if meta.is_file() => {}
        _ => return Classification::FileMissing(path),
    }

    if !root.contains(&path).await {
        debug!(path = %path.display(), "Rejected link out of document root");
        return Classification::FileMissing(path);
    }

    Classification::FileFound(path)
}

/// Reads one request line from `stream` into `buffer`.
///
/// Bounded by `limit`. Bytes after the line stay in `buffer`.
pub async fn read_request<S>(
    stream: &mut S,
    buffer: &mut BytesMut,
    limit: Duration,
) -> Result<Request>
where
    S: AsyncRead + Unpin,
{
    timeout(limit, read_line(stream, buffer))
        .await
        .map_err(|_| Error::Timeout(limit))?
}

async fn read_line<S>(stream: &mut S, buffer: &mut BytesMut) -> Result<Request>
where
    S: AsyncRead + Unpin,
{
    loop {
        // Try parsing whatever we already have
        match parse_request_line(&buffer[..]) {
            Ok((request, consumed)) => {
                buffer.advance(consumed);
                return Ok(request);
            }
            Err(ParseError::Incomplete) => {}
            Err(e) => return Err(e.into()),
        }

        let n = stream.read_buf(&mut *buffer).await?;
        if n == 0 {
            return Err(Error::ConnectionClosed);
        }
    }
}

/// Reads a request line from `stream` and classifies it.
pub async fn interpret<S>(
    stream: &mut S,
    root: &DocumentRoot,
    limit: Duration,
) -> Result<Classification>
where
    S: AsyncRead + Unpin,
{
    let mut buffer = BytesMut::with_capacity(1024);
    let request = read_request(stream, &mut buffer, limit).await?;
    Ok(classify(&request, root).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_keeps_nested_paths_under_root() {
        let root = DocumentRoot::new("/srv/www");
        assert_eq!(
            root.resolve("/docs/a/../b.html"),
            Some(PathBuf::from("/srv/www/docs/b.html"))
        );
    }

    #[test]
    fn resolve_rejects_escape() {
        let root = DocumentRoot::new("/srv/www");
        assert_eq!(root.resolve("/../etc/passwd"), None);
        assert_eq!(root.resolve("/a/../../etc/passwd"), None);
    }
}
