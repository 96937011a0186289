/// A response as this server writes it: a status line, `Content-Type`,
/// `Content-Length` when there is a body, and the body itself.
///
/// Reason phrase and content type go on the wire unchecked; callers only pass
/// fixed values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Numeric status code (e.g. 200)
    pub status: u16,
    /// Reason phrase (e.g. "OK")
    pub reason: String,
    /// Value of the `Content-Type` header
    pub content_type: String,
    /// Response body, sent as UTF-8
    pub body: String,
}

impl Response {
    pub fn new(
        status: u16,
        reason: impl Into<String>,
        content_type: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            status,
            reason: reason.into(),
            content_type: content_type.into(),
            body: body.into(),
        }
    }

    /// Creates a `200 OK` plain text response with the given body.
    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, "OK", "text/plain", body)
    }

    /// The answer to every well-formed request.
    pub fn hello() -> Self {
        Self::ok("Hello, world!")
    }
}
