//! HTTP/1.1 protocol engine.
//!
//! Reads requests straight off a byte stream, optionally stalls, and answers
//! every well-formed request with the same `200 OK`. Only `Content-Length`
//! framing is understood; there is no chunked encoding and no pipelining.
//!
//! - **`parser`**: line reader, request line, header block and body readers
//! - **`request`**: parsed request types and the keep-alive decision
//! - **`response`** / **`writer`**: the reply and its wire encoding
//! - **`connection`**: per-connection request cycle state machine
//! - **`context`**: connection and request identifiers for logging
//! - **`error`**: fatal framing violations
//!
//! # Request cycle
//!
//! ```text
//!        ┌─────────────┐  EOF before any byte
//!        │   Reading   │ ─────────────────────→ AlreadyClosed
//!        └──────┬──────┘
//!               │ request line, headers, body
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← log request, wait configured delay
//!        └──────┬───────────┘
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← send "Hello, world!"
//!        └──────┬───────────┘
//!               ├─ KeepAlive → Reading (same connection)
//!               └─ Close → Closed
//! ```
//!
//! Any [`ProtocolError`](error::ProtocolError) aborts the connection; nothing
//! is written back for a request that failed to parse.

pub mod connection;
pub mod context;
pub mod error;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
