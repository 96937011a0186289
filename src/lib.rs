//! lbprobe - load balancer timeout probe
//!
//! A deliberately small HTTP/1.1 endpoint for observing how intermediaries
//! handle idle timeouts and keep-alive connections.

pub mod config;
pub mod http;
pub mod server;
