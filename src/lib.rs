//! Fake SOAP server - replays recorded SOAP responses for client test suites
//!
//! Each POST is answered from a fixture file chosen by an on-disk sequence
//! counter and the request's `SOAPAction` header, so a client under test
//! sees a deterministic conversation without a live service.

pub mod cli;
pub mod common;
pub mod http;
pub mod responder;
pub mod server;

// Re-export commonly used types for tests
pub use common::config::{Config, ResponderConfig, ServerConfig, TlsConfig};
pub use common::{Error, Result};
pub use server::Server;
