use std::collections::HashMap;
use std::fmt;

use bytes::Bytes;

use crate::http::error::ProtocolError;

/// The only protocol token accepted on a request line.
pub const HTTP_VERSION: &str = "HTTP/1.1";

/// Method and target taken from the first line of a request.
///
/// Neither is validated: any method token is accepted and the target is kept
/// exactly as sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    /// The request method (e.g. "GET")
    pub method: String,
    /// The request target (e.g. "/test0")
    pub target: String,
}

/// Request headers keyed by lower-cased name.
///
/// A name may repeat on the wire; every value is kept, in arrival order, with
/// its CRLF stripped and nothing else removed (leading whitespace after the
/// colon is part of the value).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    entries: HashMap<String, Vec<String>>,
}

/// Whether the connection stays open after the response has been written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionOutcome {
    KeepAlive,
    Close,
}

/// A fully read request.
///
/// Built once per request cycle and dropped once the cycle ends.
#[derive(Debug, Clone)]
pub struct Request {
    pub line: RequestLine,
    pub headers: HeaderMap,
    /// Exactly `Content-Length` bytes
    pub body: Bytes,
}

impl HeaderMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a value under `name`, lower-casing the name.
    pub fn append(&mut self, name: &str, value: impl Into<String>) {
        self.entries
            .entry(name.to_lowercase())
            .or_default()
            .push(value.into());
    }

    /// All values stored for `name` (case-insensitive), in arrival order.
    pub fn get_all(&self, name: &str) -> &[String] {
        self.entries
            .get(&name.to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The first value stored for `name`, if any.
    pub fn first(&self, name: &str) -> Option<&str> {
        self.get_all(name).first().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        !self.get_all(name).is_empty()
    }

    /// Number of distinct header names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    /// Declared body length.
    ///
    /// Missing header means 0. Only the first value is consulted; later
    /// values, even conflicting ones, are ignored.
    ///
    /// # Errors
    ///
    /// [`ProtocolError::InvalidContentLength`] if the first value, with
    /// surrounding whitespace trimmed, is not a non-negative integer.
    pub fn content_length(&self) -> Result<usize, ProtocolError> {
        match self.first("content-length") {
            None => Ok(0),
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|_| ProtocolError::InvalidContentLength(raw.to_string())),
        }
    }

    /// Decides persistence from the `connection` header.
    ///
    /// `Close` only when the header appears exactly once and its value is
    /// `close` (case-sensitive, optional whitespace around it ignored).
    /// Anything else keeps the connection alive.
    pub fn connection_outcome(&self) -> ConnectionOutcome {
        match self.get_all("connection") {
            [only] if only.trim() == "close" => ConnectionOutcome::Close,
            _ => ConnectionOutcome::KeepAlive,
        }
    }
}

impl Request {
    pub fn connection_outcome(&self) -> ConnectionOutcome {
        self.headers.connection_outcome()
    }
}

/// Renders the request for the diagnostic log: request line, one
/// `name:value` line per stored value, a blank line, then the body as lossy
/// UTF-8.
impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {} {}", self.line.method, self.line.target, HTTP_VERSION)?;
        for (name, values) in self.headers.iter() {
            for value in values {
                writeln!(f, "{}:{}", name, value)?;
            }
        }
        writeln!(f)?;
        write!(f, "{}", String::from_utf8_lossy(&self.body))
    }
}
