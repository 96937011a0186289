use bytes::Bytes;
use lbprobe::http::error::ProtocolError;
use lbprobe::http::request::{ConnectionOutcome, HeaderMap, Request, RequestLine};

fn headers(pairs: &[(&str, &str)]) -> HeaderMap {
    let mut map = HeaderMap::new();
    for (name, value) in pairs {
        map.append(name, *value);
    }
    map
}

#[test]
fn test_header_names_are_case_insensitive() {
    let map = headers(&[("Content-Type", "text/plain")]);

    assert_eq!(map.first("content-type"), Some("text/plain"));
    assert_eq!(map.first("CONTENT-TYPE"), Some("text/plain"));
    assert_eq!(map.first("missing"), None);
    assert!(map.get_all("missing").is_empty());
}

#[test]
fn test_content_length_missing_is_zero() {
    assert_eq!(HeaderMap::new().content_length().unwrap(), 0);
}

#[test]
fn test_content_length_trims_whitespace() {
    let map = headers(&[("Content-Length", " 42 ")]);

    assert_eq!(map.content_length().unwrap(), 42);
}

#[test]
fn test_content_length_invalid() {
    let map = headers(&[("Content-Length", "not-a-number")]);

    assert!(matches!(
        map.content_length(),
        Err(ProtocolError::InvalidContentLength(_))
    ));
}

#[test]
fn test_content_length_negative_is_invalid() {
    let map = headers(&[("Content-Length", "-1")]);

    assert!(map.content_length().is_err());
}

#[test]
fn test_content_length_first_value_wins() {
    let map = headers(&[("Content-Length", "3"), ("content-length", "10")]);

    assert_eq!(map.content_length().unwrap(), 3);
}

#[test]
fn test_keep_alive_without_connection_header() {
    assert_eq!(HeaderMap::new().connection_outcome(), ConnectionOutcome::KeepAlive);
}

#[test]
fn test_connection_close() {
    let map = headers(&[("connection", "close")]);
    assert_eq!(map.connection_outcome(), ConnectionOutcome::Close);

    let map = headers(&[("Connection", " close")]);
    assert_eq!(map.connection_outcome(), ConnectionOutcome::Close);
}

#[test]
fn test_connection_close_is_case_sensitive() {
    let map = headers(&[("connection", "Close")]);

    assert_eq!(map.connection_outcome(), ConnectionOutcome::KeepAlive);
}

#[test]
fn test_connection_close_repeated_keeps_alive() {
    let map = headers(&[("connection", "close"), ("connection", "close")]);

    assert_eq!(map.connection_outcome(), ConnectionOutcome::KeepAlive);
}

#[test]
fn test_connection_other_value_keeps_alive() {
    let map = headers(&[("connection", "keep-alive")]);

    assert_eq!(map.connection_outcome(), ConnectionOutcome::KeepAlive);
}

#[test]
fn test_request_dump() {
    let req = Request {
        line: RequestLine {
            method: "POST".to_string(),
            target: "/api".to_string(),
        },
        headers: headers(&[("Host", "localhost")]),
        body: Bytes::from_static(b"ping"),
    };

    assert_eq!(req.to_string(), "POST /api HTTP/1.1\nhost:localhost\n\nping");
    assert_eq!(req.connection_outcome(), ConnectionOutcome::KeepAlive);
}
