//! Error types for the fake SOAP server
//!
//! Request-level errors end up in the HTTP response (a SOAP fault or a plain
//! text status), startup errors end the process before the listener exists.

use std::io;
use std::path::Path;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the fake SOAP server
#[derive(Error, Debug)]
pub enum Error {
    // === Dispatch Errors ===
    #[error("SOAPAction not found in header")]
    MissingSoapAction,

    #[error("input file {path} not found")]
    FixtureNotFound { path: String },

    #[error("no SOAP envelope found in input file {path}")]
    EnvelopeNotFound { path: String },

    #[error("order file {path} does not contain an integer")]
    MalformedCounter { path: String },

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    #[error("Failed to write file '{path}': {error}")]
    FileWrite { path: String, error: String },

    // === HTTP Errors ===
    #[error("Malformed HTTP request: {0}")]
    MalformedRequest(String),

    #[error("Request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("HTTP connection error: {0}")]
    Http(#[from] hyper::Error),

    #[error("Timed out after {0} seconds serving the connection")]
    Timeout(u64),

    // === Configuration Errors ===
    #[error("{0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    #[error("TLS setup failed: {0}")]
    Tls(String),

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Create a fixture not found error for the computed fixture path
    pub fn fixture_not_found(path: &Path) -> Self {
        Self::FixtureNotFound {
            path: path.display().to_string(),
        }
    }

    /// Create a missing envelope error for a fixture
    pub fn envelope_not_found(path: &Path) -> Self {
        Self::EnvelopeNotFound {
            path: path.display().to_string(),
        }
    }

    /// Create a malformed counter error
    pub fn malformed_counter(path: &Path) -> Self {
        Self::MalformedCounter {
            path: path.display().to_string(),
        }
    }

    /// Create a file read error
    pub fn file_read(path: &Path, error: &io::Error) -> Self {
        Self::FileRead {
            path: path.display().to_string(),
            error: error.to_string(),
        }
    }

    /// Create a file write error
    pub fn file_write(path: &Path, error: &io::Error) -> Self {
        Self::FileWrite {
            path: path.display().to_string(),
            error: error.to_string(),
        }
    }

    /// HTTP status of the response reporting this error
    ///
    /// Framing problems are the client's fault; everything else is answered
    /// with a SOAP fault.
    pub fn status(&self) -> u16 {
        match self {
            Error::MalformedRequest(_) => 400,
            Error::PayloadTooLarge { .. } => 413,
            _ => 500,
        }
    }

    /// Process exit status for errors raised before the server starts
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Config(_)
            | Error::ConfigParse(_)
            | Error::Tls(_)
            | Error::MalformedCounter { .. } => 2,
            _ => 1,
        }
    }
}
