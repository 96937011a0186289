use thiserror::Error;

/// Fatal framing violations.
///
/// Any of these aborts the connection it occurred on. A peer closing the
/// stream between requests is not represented here; the line reader reports
/// it as `Ok(None)` instead.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The stream ended after part of a line had been read.
    #[error("stream ended before CRLF (read {read} bytes of the line)")]
    UnexpectedEof { read: usize },

    /// The stream ended before the header block was terminated.
    #[error("stream ended inside the header block")]
    EofInHeaders,

    #[error("request line does not have exactly 3 tokens: {0:?}")]
    InvalidRequestLine(String),

    #[error("unsupported protocol version: {0:?}")]
    UnsupportedVersion(String),

    #[error("header line has no ':' separator: {0:?}")]
    InvalidHeader(String),

    #[error("invalid Content-Length value: {0:?}")]
    InvalidContentLength(String),

    #[error("body shorter than Content-Length (expected {expected}, received {received})")]
    ShortBody { expected: usize, received: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
