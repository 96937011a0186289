use bytes::{BufMut, Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::http::error::ProtocolError;
use crate::http::request::{HeaderMap, HTTP_VERSION, Request, RequestLine};

const CRLF: &[u8] = b"\r\n";

/// Reads one CRLF-terminated line, one byte at a time.
///
/// The returned buffer includes the terminator. `Ok(None)` means the stream
/// was already at EOF before a single byte arrived, which is how a
/// keep-alive connection normally ends. EOF after at least one byte is a
/// framing error.
///
/// No length limit is applied; a peer that never sends CRLF keeps this
/// pending forever.
pub async fn read_line<R>(reader: &mut R) -> Result<Option<Bytes>, ProtocolError>
where
    R: AsyncRead + Unpin,
{
    let mut line = BytesMut::with_capacity(128);
    let mut byte = [0u8; 1];

    loop {
        let n = reader.read(&mut byte).await?;

        if n == 0 {
            if line.is_empty() {
                return Ok(None);
            }
            return Err(ProtocolError::UnexpectedEof { read: line.len() });
        }

        line.put_u8(byte[0]);

        if line.ends_with(CRLF) {
            return Ok(Some(line.freeze()));
        }
    }
}

/// Splits `METHOD SP TARGET SP HTTP/1.1` into its parts.
///
/// `raw` may still carry its CRLF.
pub fn parse_request_line(raw: &[u8]) -> Result<RequestLine, ProtocolError> {
    let text = String::from_utf8_lossy(strip_crlf(raw));
    let tokens: Vec<&str> = text.split(' ').collect();

    let [method, target, version] = tokens.as_slice() else {
        return Err(ProtocolError::InvalidRequestLine(text.to_string()));
    };

    if *version != HTTP_VERSION {
        return Err(ProtocolError::UnsupportedVersion(version.to_string()));
    }

    Ok(RequestLine {
        method: method.to_string(),
        target: target.to_string(),
    })
}

/// Splits a header line at the first ':'.
///
/// The name is returned as sent (lower-casing happens in [`HeaderMap`]); the
/// value is everything after the colon minus the CRLF.
pub fn parse_header_line(raw: &[u8]) -> Result<(String, String), ProtocolError> {
    let text = String::from_utf8_lossy(strip_crlf(raw));

    let (name, value) = text
        .split_once(':')
        .ok_or_else(|| ProtocolError::InvalidHeader(text.to_string()))?;

    Ok((name.to_string(), value.to_string()))
}

/// Reads the request line.
///
/// `Ok(None)` when the peer closed the connection before sending anything.
pub async fn read_request_line<R>(reader: &mut R) -> Result<Option<RequestLine>, ProtocolError>
where
    R: AsyncRead + Unpin,
{
    let Some(raw) = read_line(reader).await? else {
        return Ok(None);
    };

    tracing::info!(line = %String::from_utf8_lossy(strip_crlf(&raw)), "request line read");

    parse_request_line(&raw).map(Some)
}

/// Reads header lines up to and including the empty line.
///
/// EOF anywhere in here is fatal.
pub async fn read_headers<R>(reader: &mut R) -> Result<HeaderMap, ProtocolError>
where
    R: AsyncRead + Unpin,
{
    let mut headers = HeaderMap::new();

    loop {
        let line = read_line(reader)
            .await?
            .ok_or(ProtocolError::EofInHeaders)?;

        if line.len() == CRLF.len() {
            return Ok(headers);
        }

        tracing::info!(line = %String::from_utf8_lossy(strip_crlf(&line)), "header line read");

        let (name, value) = parse_header_line(&line)?;
        headers.append(&name, value);
    }
}

/// Reads exactly `content_length` bytes. A short read is never padded.
pub async fn read_body<R>(reader: &mut R, content_length: usize) -> Result<Bytes, ProtocolError>
where
    R: AsyncRead + Unpin,
{
    if content_length == 0 {
        return Ok(Bytes::new());
    }

    // Grows with what actually arrives rather than trusting the declared size.
    let mut body = Vec::new();
    (&mut *reader)
        .take(content_length as u64)
        .read_to_end(&mut body)
        .await?;

    if body.len() < content_length {
        return Err(ProtocolError::ShortBody {
            expected: content_length,
            received: body.len(),
        });
    }

    Ok(Bytes::from(body))
}

/// Reads one complete request: request line, headers, body.
///
/// `Ok(None)` only when the stream ended before the request line started.
pub async fn read_request<R>(reader: &mut R) -> Result<Option<Request>, ProtocolError>
where
    R: AsyncRead + Unpin,
{
    let Some(line) = read_request_line(reader).await? else {
        return Ok(None);
    };

    let headers = read_headers(reader).await?;
    let content_length = headers.content_length()?;
    let body = read_body(reader, content_length).await?;

    Ok(Some(Request { line, headers, body }))
}

fn strip_crlf(raw: &[u8]) -> &[u8] {
    raw.strip_suffix(CRLF).unwrap_or(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn read_line_keeps_terminator() {
        let mut input: &[u8] = b"GET / HTTP/1.1\r\nHost:x\r\n";

        let line = read_line(&mut input).await.unwrap().unwrap();

        assert_eq!(&line[..], b"GET / HTTP/1.1\r\n");
        assert_eq!(input, b"Host:x\r\n");
    }

    #[tokio::test]
    async fn read_line_bare_cr_is_not_a_terminator() {
        let mut input: &[u8] = b"a\rb\r\n";

        let line = read_line(&mut input).await.unwrap().unwrap();

        assert_eq!(&line[..], b"a\rb\r\n");
    }

    #[tokio::test]
    async fn read_line_distinguishes_the_two_eofs() {
        let mut empty: &[u8] = b"";
        assert!(read_line(&mut empty).await.unwrap().is_none());

        let mut partial: &[u8] = b"GET / HT";
        let err = read_line(&mut partial).await.unwrap_err();
        assert!(matches!(err, ProtocolError::UnexpectedEof { read: 8 }));
    }

    #[test]
    fn header_value_keeps_leading_space() {
        let (name, value) = parse_header_line(b"Host: example.com\r\n").unwrap();

        assert_eq!(name, "Host");
        assert_eq!(value, " example.com");
    }

    #[test]
    fn header_value_splits_at_first_colon() {
        let (name, value) = parse_header_line(b"Host:localhost:8080\r\n").unwrap();

        assert_eq!(name, "Host");
        assert_eq!(value, "localhost:8080");
    }
}
