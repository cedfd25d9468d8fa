//! Fixture file handling: envelope extraction and the scripted login
//!
//! Fixtures are replayed byte for byte, whatever their encoding.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::bytes::Regex;

use crate::common::{Error, Result};

/// Opening tag of a SOAP envelope with any namespace prefix, e.g. `<SOAP-ENV:Envelope`
static ENVELOPE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<[\w-]*:Envelope").expect("valid envelope pattern"));

/// Action whose response is rewritten for a rejected login
pub const LOGON_ACTION: &str = "logOn";

/// Marker in the login request body that triggers the rejection
const LOGON_REJECT_MARKER: &[u8] = b"incorrect";

const LOGON_ACCEPTED: &[u8] = b"logOnResult>true";
const LOGON_REJECTED: &[u8] = b"logOnResult>false";

/// Path of the fixture answering `action` at `sequence`
pub fn fixture_path(input_dir: &Path, sequence: u64, action: &str) -> PathBuf {
    input_dir.join(format!("{}_{}", sequence, action))
}

/// Read a fixture and return its last SOAP envelope
pub async fn load_envelope(path: &Path) -> Result<Vec<u8>> {
    let content = tokio::fs::read(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::fixture_not_found(path)
        } else {
            Error::file_read(path, &e)
        }
    })?;

    extract_envelope(&content)
        .map(<[u8]>::to_vec)
        .ok_or_else(|| Error::envelope_not_found(path))
}

/// Everything from the last envelope opening tag to the end of the content
///
/// Recorded fixtures often carry the request envelope first, so only the
/// last one is the response.
pub fn extract_envelope(content: &[u8]) -> Option<&[u8]> {
    ENVELOPE_TAG
        .find_iter(content)
        .last()
        .map(|m| &content[m.start()..])
}

/// Rewrite a successful login into a rejected one when the request asks for it
pub fn apply_logon_script(mut body: Vec<u8>, request_body: &[u8]) -> Vec<u8> {
    if find(request_body, LOGON_REJECT_MARKER).is_none() {
        return body;
    }

    tracing::debug!("Login request marked incorrect, rejecting");
    if let Some(at) = find(&body, LOGON_ACCEPTED) {
        body.splice(at..at + LOGON_ACCEPTED.len(), LOGON_REJECTED.iter().copied());
    }
    body
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
