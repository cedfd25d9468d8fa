//! Request dispatch: turns a SOAP request into the recorded response
//!
//! Every POST is answered from the fixture `<sequence>_<action>` in the
//! input directory. The sequence comes from the counter file and moves
//! forward only when a fixture was served, just before the response is
//! handed back to the connection.

pub mod fault;
pub mod fixture;
pub mod sequence;

use crate::common::config::ResponderConfig;
use crate::common::{Error, Result};
use crate::http::{Request, Response};

pub use sequence::SequenceCounter;

/// Dispatch a request by method
pub async fn handle_request(config: &ResponderConfig, request: &Request) -> Response {
    if !request.method.eq_ignore_ascii_case("POST") {
        tracing::debug!(method = %request.method, path = %request.target, "Rejecting non-POST request");
        return handle_get(&request.target);
    }

    match handle_post(config, request).await {
        Ok(body) => Response::xml(200, body),
        Err(e) => {
            tracing::warn!("Answering with SOAP fault: {}", e);
            internal_error(&e.to_string())
        }
    }
}

/// Answer a GET (or any other non-POST) request
pub fn handle_get(path: &str) -> Response {
    Response::text(404, format!("File Not Found: {}", path))
}

/// Build the 500 response carrying a SOAP fault
pub fn internal_error(fault_string: &str) -> Response {
    Response::xml(500, fault::fault_envelope(fault_string))
}

/// Resolve the fixture for a POST and advance the counter past it
///
/// Any error leaves the counter untouched.
pub async fn handle_post(config: &ResponderConfig, request: &Request) -> Result<Vec<u8>> {
    let action = soap_action(request)?;

    let counter = SequenceCounter::new(&config.order_file);
    let sequence = counter.current().await?;

    let path = fixture::fixture_path(&config.input_dir, sequence, action);
    tracing::debug!(sequence, action, fixture = %path.display(), "Dispatching SOAP request");

    let mut body = fixture::load_envelope(&path).await?;
    if action == fixture::LOGON_ACTION {
        body = fixture::apply_logon_script(body, &request.body);
    }

    counter.advance(sequence).await?;
    Ok(body)
}

/// Normalized SOAP action of a request
///
/// Clients send the action quoted and often with a leading slash, e.g.
/// `"/logOn"`; both are stripped.
pub fn soap_action(request: &Request) -> Result<&str> {
    let value = request.header("SOAPAction").ok_or(Error::MissingSoapAction)?;
    Ok(value
        .trim()
        .trim_start_matches(['"', '/'])
        .trim_end_matches('"'))
}
