//! Command line handling
//!
//! Parses the flags, merges them over the optional configuration file and
//! validates every path before the server is started.

use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use crate::common::config::{Config, ResponderConfig, ServerConfig, Settings, TlsConfig};
use crate::common::{Error, Result};
use crate::responder::sequence::parse_sequence;

#[derive(Parser, Debug)]
#[command(
    name = "fake-soap-server",
    about = "Replay recorded SOAP responses in a fixed order"
)]
#[command(version, long_about = None)]
pub struct Args {
    /// Path to folder containing soap responses
    #[arg(short, long, value_name = "DIR")]
    pub input: PathBuf,

    /// Path to file controlling the order
    #[arg(short, long, value_name = "FILE")]
    pub order: PathBuf,

    /// Port to listen on [default: 8080]
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Address to bind [default: 0.0.0.0]
    #[arg(long)]
    pub bind: Option<IpAddr>,

    /// Use ssl
    #[arg(short, long)]
    pub ssl: bool,

    /// Path to certificate
    #[arg(short, long, value_name = "FILE")]
    pub cert: Option<PathBuf>,

    /// Path to private key, when not bundled with the certificate
    #[arg(long, value_name = "FILE")]
    pub key: Option<PathBuf>,

    /// Path to TOML configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Merge flags over the configuration file and validate the result
    pub fn resolve(self) -> Result<Config> {
        let settings = match &self.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };

        if !self.input.exists() {
            return Err(Error::Config(format!(
                "input '{}' does not exist",
                self.input.display()
            )));
        }
        if !self.input.is_dir() {
            return Err(Error::Config(format!(
                "input '{}' is not a directory",
                self.input.display()
            )));
        }
        if !self.order.exists() {
            return Err(Error::Config(format!(
                "orderfile '{}' does not exist",
                self.order.display()
            )));
        }
        let content =
            std::fs::read_to_string(&self.order).map_err(|e| Error::file_read(&self.order, &e))?;
        parse_sequence(&content, &self.order)?;

        let secure = self.ssl || settings.tls.enabled;
        let tls = if secure {
            let cert = self.cert.or(settings.tls.cert).ok_or_else(|| {
                Error::Config("specify a certificate to use with ssl".to_string())
            })?;
            if !cert.exists() {
                return Err(Error::Config(format!(
                    "certificate '{}' does not exist",
                    cert.display()
                )));
            }
            let key = self.key.or(settings.tls.key).unwrap_or_else(|| cert.clone());
            if !key.exists() {
                return Err(Error::Config(format!(
                    "private key '{}' does not exist",
                    key.display()
                )));
            }
            Some(TlsConfig { cert, key })
        } else {
            None
        };

        let port = self.port.unwrap_or(settings.server.port);
        let bind = self.bind.unwrap_or(settings.server.bind);

        Ok(Config {
            responder: ResponderConfig {
                input_dir: self.input,
                order_file: self.order,
            },
            server: ServerConfig {
                addr: SocketAddr::new(bind, port),
                read_timeout: Duration::from_secs(settings.server.read_timeout_secs),
                tls,
            },
        })
    }
}
