//! HTTP status code handling for the Etherpad request layer.

/// HTTP status code attached to transport errors.
///
/// Etherpad answers every API call with `200 OK` and reports failures inside
/// the JSON envelope, so anything else means the request never reached the
/// API (wrong base URL, reverse proxy error, server down).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpStatusCode(pub u16);

impl HttpStatusCode {
    pub const OK: HttpStatusCode = HttpStatusCode(200);

    /// The only status the API layer accepts.
    pub fn is_ok(&self) -> bool {
        self.0 == Self::OK.0
    }
}

impl From<u16> for HttpStatusCode {
    fn from(code: u16) -> Self {
        HttpStatusCode(code)
    }
}

impl std::fmt::Display for HttpStatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
