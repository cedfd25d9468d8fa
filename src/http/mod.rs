//! HTTP message types seen by the responder
//!
//! Framing is hyper's job: bodies may arrive with `Content-Length` or
//! chunked, `Expect: 100-continue` is acknowledged, malformed heads get a
//! 400. The responder only ever sees a complete [`Request`] and returns a
//! complete [`Response`].

pub mod codec;

use bytes::Bytes;

/// Content type of every SOAP response, faults included
pub const XML_CONTENT_TYPE: &str = "text/xml; charset=utf-8";

/// Content type of plain status pages
pub const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// A request with its body fully received
#[derive(Debug, Clone, Default)]
pub struct Request {
    pub method: String,
    pub target: String,
    pub headers: Vec<(String, String)>,
    pub body: Bytes,
}

impl Request {
    /// Look up a header by name, ignoring case
    ///
    /// When a header is repeated the last value wins.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .rev()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// An HTTP response ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl Response {
    /// XML response with the SOAP content type
    pub fn xml(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            content_type: XML_CONTENT_TYPE,
            body: body.into(),
        }
    }

    /// Plain text response
    pub fn text(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            content_type: TEXT_CONTENT_TYPE,
            body: body.into(),
        }
    }

    /// Body as text, lossy for non UTF-8 fixtures
    #[cfg(test)]
    pub fn body_text(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}
