use lbprobe::http::response::Response;
use lbprobe::http::writer::{ResponseWriter, serialize_response};
use tokio::io::AsyncReadExt;

#[test]
fn test_response_hello_fields() {
    let response = Response::hello();

    assert_eq!(response.status, 200);
    assert_eq!(response.reason, "OK");
    assert_eq!(response.content_type, "text/plain");
    assert_eq!(response.body, "Hello, world!");
}

#[test]
fn test_serialize_hello_is_bit_exact() {
    let bytes = serialize_response(&Response::hello());

    assert_eq!(
        bytes,
        b"HTTP/1.1 200 OK\r\nContent-Type:text/plain\r\nContent-Length:13\r\n\r\nHello, world!"
    );
}

#[test]
fn test_serialize_empty_body_omits_content_length() {
    let bytes = serialize_response(&Response::new(204, "No Content", "text/plain", ""));

    assert_eq!(bytes, b"HTTP/1.1 204 No Content\r\nContent-Type:text/plain\r\n\r\n");
}

#[test]
fn test_serialize_content_length_counts_utf8_bytes() {
    let bytes = serialize_response(&Response::ok("héllo"));
    let text = String::from_utf8(bytes).unwrap();

    assert!(text.contains("Content-Length:6\r\n"));
    assert!(text.ends_with("\r\n\r\nhéllo"));
}

#[test]
fn test_serialize_status_line_first() {
    let bytes = serialize_response(&Response::new(503, "Service Unavailable", "text/html", "x"));

    assert!(bytes.starts_with(b"HTTP/1.1 503 Service Unavailable\r\nContent-Type:text/html\r\n"));
}

#[tokio::test]
async fn test_writer_writes_whole_response() {
    let (mut client, mut server) = tokio::io::duplex(16);
    let mut writer = ResponseWriter::new(&Response::hello());
    let expected = writer.as_bytes().to_vec();

    let write = tokio::spawn(async move {
        writer.write_to_stream(&mut server).await.unwrap();
    });

    let mut received = vec![0u8; expected.len()];
    client.read_exact(&mut received).await.unwrap();
    write.await.unwrap();

    assert_eq!(received, expected);
}
