//! Tagserve - single-request HTTP responder
//!
//! Core library for request interpretation and response production.

pub mod config;
pub mod error;
pub mod http;
pub mod server;
