//! Conversion between hyper messages and the responder's types
//!
//! hyper parses the wire format (`Content-Length` or chunked bodies,
//! `Expect: 100-continue`); this module collects the body under a size limit
//! and builds the response headers every reply carries:
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/xml; charset=utf-8\r\n
//! Content-Length: <byte-length>\r\n
//! Connection: close\r\n
//! \r\n
//! <XML body>
//! ```

use bytes::Bytes;
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::Body;
use hyper::header::{HeaderValue, CONNECTION, CONTENT_LENGTH, CONTENT_TYPE, SERVER};
use hyper::StatusCode;

use super::{Request, Response};
use crate::common::{Error, Result};

/// Maximum request body size (100 MiB)
const MAX_BODY_SIZE: usize = 100 * 1024 * 1024;

/// Value of the `Server` header
const SERVER_NAME: &str = concat!("fake-soap-server/", env!("CARGO_PKG_VERSION"));

/// Receive the whole request body
pub async fn read_request<B>(request: hyper::Request<B>) -> Result<Request>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    collect_request(request, MAX_BODY_SIZE).await
}

async fn collect_request<B>(request: hyper::Request<B>, limit: usize) -> Result<Request>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let (parts, body) = request.into_parts();

    let body = Limited::new(body, limit)
        .collect()
        .await
        .map_err(|e| {
            if e.downcast_ref::<LengthLimitError>().is_some() {
                Error::PayloadTooLarge { limit }
            } else {
                Error::MalformedRequest(e.to_string())
            }
        })?
        .to_bytes();

    let headers = parts
        .headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();

    Ok(Request {
        method: parts.method.as_str().to_string(),
        target: parts.uri.to_string(),
        headers,
        body,
    })
}

/// Build the hyper response
///
/// `Content-Length` is always the byte length of the body and the
/// connection is announced as closing.
pub fn into_hyper(response: Response) -> hyper::Response<Full<Bytes>> {
    let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let length = response.body.len();

    let mut reply = hyper::Response::new(Full::new(Bytes::from(response.body)));
    *reply.status_mut() = status;

    let headers = reply.headers_mut();
    headers.insert(SERVER, HeaderValue::from_static(SERVER_NAME));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(response.content_type));
    headers.insert(CONTENT_LENGTH, HeaderValue::from(length));
    headers.insert(CONNECTION, HeaderValue::from_static("close"));

    reply
}
