use std::sync::Arc;
use std::time::Duration;

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

use crate::error::Result;
use crate::http::classify::{Classification, classify, read_request};
use crate::http::producer::{Site, produce};
use crate::http::writer::ResponseWriter;

/// One accepted client connection, handled for exactly one request.
pub struct Connection<S> {
    stream: S,
    buffer: BytesMut,
    site: Arc<Site>,
    read_timeout: Duration,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Producing(Classification),
    Writing(ResponseWriter),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, site: Arc<Site>, read_timeout: Duration) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(1024),
            site,
            read_timeout,
            state: ConnectionState::Reading,
        }
    }

    /// Handles the request and closes the connection.
    ///
    /// A request line that can't be read yields no response at all; the
    /// error is returned after the stream has been shut down.
    pub async fn run(mut self) -> Result<()> {
        debug!("Handling connection...");
        let outcome = self.drive().await;

        // Best effort; the peer may already be gone
        let _ = self.stream.shutdown().await;
        debug!("Done handling connection.");

        outcome
    }

    async fn drive(&mut self) -> Result<()> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => {
                    let request =
                        read_request(&mut self.stream, &mut self.buffer, self.read_timeout)
                            .await?;
                    info!(line = %request.line, "Request line");

                    let classification = classify(&request, &self.site.root).await;
                    self.state = ConnectionState::Producing(classification);
                }

                ConnectionState::Producing(classification) => {
                    let response = produce(&classification, &self.site).await;
                    debug!(status = response.status.as_u16(), "Response ready");
                    self.state = ConnectionState::Writing(ResponseWriter::new(response));
                }

                ConnectionState::Writing(writer) => {
                    writer.write_to_stream(&mut self.stream).await?;
                    // No keep-alive: one request per connection
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }
}
