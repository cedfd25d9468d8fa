//! Configuration file handling
//!
//! Settings come from an optional TOML file and are overridden by command
//! line flags. The resolved [`Config`] is built once at startup and handed
//! to the server and responder by reference.

use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::{Error, Result};

/// Settings as read from the optional configuration file
#[derive(Debug, Deserialize, Default)]
pub struct Settings {
    /// Listener settings
    #[serde(default)]
    pub server: ServerSettings,

    /// Transport security settings
    #[serde(default)]
    pub tls: TlsSettings,
}

/// Listener settings
#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Address to bind, all interfaces by default
    #[serde(default = "default_bind")]
    pub bind: IpAddr,

    /// How long a client may take to send its request
    #[serde(default = "default_read_timeout")]
    pub read_timeout_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: default_port(),
            bind: default_bind(),
            read_timeout_secs: default_read_timeout(),
        }
    }
}

fn default_port() -> u16 {
    8080
}
fn default_bind() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}
fn default_read_timeout() -> u64 {
    30
}

/// Transport security settings
#[derive(Debug, Deserialize, Default)]
pub struct TlsSettings {
    /// Wrap the listener in TLS
    #[serde(default)]
    pub enabled: bool,

    /// PEM file holding the certificate chain
    pub cert: Option<PathBuf>,

    /// PEM file holding the private key, the certificate file when unset
    pub key: Option<PathBuf>,
}

impl Settings {
    /// Load settings from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::file_read(path, &e))?;
        Self::parse(&content)
    }

    /// Parse settings from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::ConfigParse(e.to_string()))
    }
}

/// Fully resolved configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub responder: ResponderConfig,
    pub server: ServerConfig,
}

/// Where fixtures and the sequence counter live
#[derive(Debug, Clone)]
pub struct ResponderConfig {
    /// Directory holding `<sequence>_<action>` fixture files
    pub input_dir: PathBuf,
    /// File holding the sequence counter
    pub order_file: PathBuf,
}

/// Listener configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub read_timeout: Duration,
    pub tls: Option<TlsConfig>,
}

/// Server certificate and key for TLS
#[derive(Debug, Clone)]
pub struct TlsConfig {
    pub cert: PathBuf,
    pub key: PathBuf,
}

impl ServerConfig {
    /// Plain HTTP on the given address with the default read timeout
    pub fn plain(addr: SocketAddr) -> Self {
        Self {
            addr,
            read_timeout: Duration::from_secs(default_read_timeout()),
            tls: None,
        }
    }
}
