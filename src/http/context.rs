//! Correlation identifiers for log output.
//!
//! Each accepted connection and each request cycle on it gets a random
//! identifier. They are handed down explicitly as a [`RequestContext`] value
//! and recorded on `tracing` spans, so log lines from concurrent connections
//! can be told apart.

use std::fmt;
use uuid::Uuid;

/// Identifies one accepted TCP connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies one request/response cycle within a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifiers for the request cycle currently being handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestContext {
    pub connection_id: ConnectionId,
    pub request_id: RequestId,
}

impl RequestContext {
    /// Starts a new request cycle on the given connection.
    pub fn new(connection_id: ConnectionId) -> Self {
        Self {
            connection_id,
            request_id: RequestId::new(),
        }
    }

    /// Span covering a single request cycle.
    pub fn span(&self) -> tracing::Span {
        tracing::info_span!(
            "request",
            conn_id = %self.connection_id,
            req_id = %self.request_id
        )
    }
}
