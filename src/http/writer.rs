use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::error::{Error, Result};
use crate::http::response::Response;

const HTTP_VERSION: &str = "HTTP/1.1";

/// Serializes the status line and header block, blank line included.
pub fn serialize_head(resp: &Response) -> Vec<u8> {
    let mut buf = Vec::new();

    // Status line
    let status_line = format!(
        "{} {} {}\r\n",
        HTTP_VERSION,
        resp.status.as_u16(),
        resp.status.reason_phrase()
    );
    buf.extend_from_slice(status_line.as_bytes());

    // Headers
    for (k, v) in &resp.headers {
        buf.extend_from_slice(k.as_bytes());
        buf.extend_from_slice(b": ");
        buf.extend_from_slice(v.as_bytes());
        buf.extend_from_slice(b"\r\n");
    }

    // Header/body separator
    buf.extend_from_slice(b"\r\n");

    buf
}

/// Head and body as one buffer, in wire order.
pub fn serialize_response(resp: &Response) -> Vec<u8> {
    let mut buf = serialize_head(resp);
    buf.extend_from_slice(&resp.body);
    buf
}

/// Writes a response in two phases: header block, then body.
pub struct ResponseWriter {
    head: Vec<u8>,
    body: Vec<u8>,
}

impl ResponseWriter {
    pub fn new(response: Response) -> Self {
        Self {
            head: serialize_head(&response),
            body: response.body,
        }
    }

    pub async fn write_to_stream<W>(&self, stream: &mut W) -> Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        write_fully(stream, &self.head).await?;
        write_fully(stream, &self.body).await?;
        stream.flush().await.map_err(Error::Write)
    }
}

async fn write_fully<W>(stream: &mut W, mut buf: &[u8]) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    while !buf.is_empty() {
        let n = stream.write(buf).await.map_err(Error::Write)?;

        if n == 0 {
            return Err(Error::Write(std::io::ErrorKind::WriteZero.into()));
        }

        buf = &buf[n..];
    }

    Ok(())
}
