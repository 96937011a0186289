use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::request::HTTP_VERSION;
use crate::http::response::Response;

/// Encodes `resp` exactly as it goes on the wire.
///
/// Header names are written without a space after the colon. Status line and
/// headers are expected to be ASCII; the body is UTF-8.
pub fn serialize_response(resp: &Response) -> Vec<u8> {
    let body = resp.body.as_bytes();
    let mut buf = Vec::with_capacity(64 + body.len());

    // Status line
    let status_line = format!("{} {} {}\r\n", HTTP_VERSION, resp.status, resp.reason);
    buf.extend_from_slice(status_line.as_bytes());

    buf.extend_from_slice(b"Content-Type:");
    buf.extend_from_slice(resp.content_type.as_bytes());
    buf.extend_from_slice(b"\r\n");

    if !body.is_empty() {
        buf.extend_from_slice(format!("Content-Length:{}\r\n", body.len()).as_bytes());
    }

    // Header/body separator
    buf.extend_from_slice(b"\r\n");

    buf.extend_from_slice(body);

    buf
}

pub struct ResponseWriter {
    buffer: Vec<u8>,
    written: usize,
}

impl ResponseWriter {
    pub fn new(response: &Response) -> Self {
        Self {
            buffer: serialize_response(response),
            written: 0,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub async fn write_to_stream<W>(&mut self, stream: &mut W) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        while self.written < self.buffer.len() {
            let n = stream.write(&self.buffer[self.written..]).await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        stream.flush().await?;

        Ok(())
    }
}
