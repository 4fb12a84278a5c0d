//! Response production
//!
//! Maps a [`Classification`] onto a complete [`Response`]. Nothing here
//! touches the client connection.

use std::path::{Path, PathBuf};

use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::http::classify::{Classification, DocumentRoot};
use crate::http::response::{Response, ResponseBuilder};
use crate::http::tags::Tags;

/// Value of the `Server` header.
pub const SERVER_HEADER: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub const CONTENT_TYPE: &str = "text/html";

/// Read-only state shared by every connection.
#[derive(Debug, Clone)]
pub struct Site {
    pub root: DocumentRoot,
    pub tags: Tags,
}

impl Site {
    pub fn new(root: impl Into<PathBuf>, server_name: impl Into<String>) -> Self {
        Self {
            root: DocumentRoot::new(root),
            tags: Tags::new(server_name),
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(cfg.document_root.clone(), cfg.server_name.clone())
    }

    pub fn with_tags(root: impl Into<PathBuf>, tags: Tags) -> Self {
        Self {
            root: DocumentRoot::new(root),
            tags,
        }
    }

    pub fn server_name(&self) -> &str {
        self.tags.server_name()
    }
}

/// Builds the response for one classified request.
pub async fn produce(classification: &Classification, site: &Site) -> Response {
    let response = match classification {
        Classification::NoPathRequested => Response::welcome(site.server_name()),
        Classification::FileMissing(path) => {
            warn!(path = %path.display(), "Requested file not found");
            Response::not_found()
        }
        Classification::FileFound(path) => match read_with_tags(path, &site.tags).await {
            Ok(body) => Response::ok(body),
            Err(e) => {
                error!("Read error: {}", e);
                Response::internal_error()
            }
        },
    };

    with_standard_headers(response, site)
}

/// Reads `path` line by line, substituting tags on each line.
///
/// Line terminators are kept, so content without markers is returned
/// byte-for-byte. Any read failure fails the whole body.
pub async fn read_with_tags(path: &Path, tags: &Tags) -> Result<Vec<u8>> {
    let file_error = |source: std::io::Error| Error::FileAccess {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).await.map_err(file_error)?;
    let mut reader = BufReader::new(file);
    let mut body = Vec::new();
    let mut line = Vec::new();

    loop {
        line.clear();
        let n = reader.read_until(b'\n', &mut line).await.map_err(file_error)?;
        if n == 0 {
            break;
        }
        body.extend_from_slice(&tags.substitute_bytes(&line));
    }

    Ok(body)
}

fn with_standard_headers(response: Response, site: &Site) -> Response {
    ResponseBuilder::new(response.status)
        .header("Date", site.tags.now())
        .header("Server", SERVER_HEADER)
        .header("Connection", "close")
        .header("Content-Type", CONTENT_TYPE)
        .body(response.body)
        .build()
}
