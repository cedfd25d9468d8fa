//! Common utilities shared by the CLI, server and responder

pub mod config;
pub mod error;
pub mod logging;

pub use error::{Error, Result};
