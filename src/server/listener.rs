use std::io;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::http::connection::Connection;
use crate::http::producer::Site;

/// Pause before accepting again when the process is out of resources.
pub const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.listen_addr).await?;
    info!("Listening on {}", cfg.listen_addr);

    serve(listener, Arc::new(Site::from_config(cfg)), cfg).await
}

/// Accepts connections forever, one task per connection.
///
/// Accept failures are logged and never end the loop.
pub async fn serve(listener: TcpListener, site: Arc<Site>, cfg: &Config) -> anyhow::Result<()> {
    let read_timeout = cfg.read_timeout();

    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                match accept_backoff(&e) {
                    None => warn!("Accept failed: {}", e),
                    Some(delay) => {
                        // Typically out of file descriptors; give tasks time to close some
                        error!("Accept failed, retrying in {:?}: {}", delay, e);
                        tokio::time::sleep(delay).await;
                    }
                }
                continue;
            }
        };
        info!("Accepted connection from {}", peer);

        let site = site.clone();
        tokio::spawn(async move {
            let conn = Connection::new(socket, site, read_timeout);
            if let Err(e) = conn.run().await {
                tracing::error!("Connection error from {}: {}", peer, e);
            }
        });
    }
}

/// How long to wait after a failed accept.
///
/// `None` for failures that only concern the connection being accepted;
/// anything else (EMFILE, ENFILE, ENOBUFS...) backs off.
pub fn accept_backoff(err: &io::Error) -> Option<Duration> {
    match err.kind() {
        io::ErrorKind::ConnectionAborted
        | io::ErrorKind::ConnectionReset
        | io::ErrorKind::ConnectionRefused
        | io::ErrorKind::Interrupted
        | io::ErrorKind::WouldBlock => None,
        _ => Some(ACCEPT_BACKOFF),
    }
}
