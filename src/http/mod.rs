//! HTTP protocol handling for a single request per connection.
//!
//! # Architecture
//!
//! - **`connection`**: Per-connection state machine, from request line to close
//! - **`parser`**: Frames and splits the request line
//! - **`request`**: The parsed request line
//! - **`classify`**: Resolves the requested path against the document root
//! - **`producer`**: Builds the response for a classification
//! - **`tags`**: Marker substitution and date formatting
//! - **`response`**: Status codes, response value and builder
//! - **`writer`**: Serializes and writes responses to the client
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Read and classify the request line
//!        └──────┬──────┘
//!               │ Classification
//!               ▼
//!        ┌──────────────────┐
//!        │   Producing      │ ← Build status, headers and body
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Header block, then body
//!        └──────┬───────────┘
//!               │ Response sent
//!               ▼
//!        ┌──────────────────┐
//!        │     Closed       │ ← Always; there is no keep-alive
//!        └──────────────────┘
//! ```
//!
//! A request line that can't be read moves straight from `Reading` to
//! `Closed` without writing anything.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//! use tagserve::http::connection::Connection;
//! use tagserve::http::producer::Site;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:8080").await?;
//!     let site = Arc::new(Site::new("./public", "My Server"));
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let site = site.clone();
//!         tokio::spawn(async move {
//!             let conn = Connection::new(socket, site, Duration::from_secs(5));
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod classify;
pub mod connection;
pub mod parser;
pub mod producer;
pub mod request;
pub mod response;
pub mod tags;
pub mod writer;
