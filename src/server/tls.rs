//! TLS acceptor built from PEM files

use std::path::Path;
use std::sync::Arc;

use rustls::pki_types::pem::PemObject;
use rustls::pki_types::{CertificateDer, PrivateKeyDer};
use tokio_rustls::TlsAcceptor;

use crate::common::config::TlsConfig;
use crate::common::{Error, Result};

/// Build a server-side TLS acceptor without client authentication
///
/// The certificate file may also hold the private key, in which case
/// `key` points at the same file.
pub fn acceptor(config: &TlsConfig) -> Result<TlsAcceptor> {
    let certs = load_certs(&config.cert)?;
    let key = PrivateKeyDer::from_pem_file(&config.key).map_err(|e| {
        Error::Tls(format!(
            "no usable private key in '{}': {}",
            config.key.display(),
            e
        ))
    })?;

    let provider = Arc::new(rustls::crypto::ring::default_provider());
    let tls_conf = rustls::ServerConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()
        .map_err(|e| Error::Tls(e.to_string()))?
        .with_no_client_auth()
        .with_single_cert(certs, key)
        .map_err(|e| Error::Tls(e.to_string()))?;

    Ok(TlsAcceptor::from(Arc::new(tls_conf)))
}

fn load_certs(path: &Path) -> Result<Vec<CertificateDer<'static>>> {
    let read_error = |e: rustls::pki_types::pem::Error| {
        Error::Tls(format!("cannot read certificates from '{}': {}", path.display(), e))
    };

    let certs = CertificateDer::pem_file_iter(path)
        .map_err(read_error)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(read_error)?;

    if certs.is_empty() {
        return Err(Error::Tls(format!(
            "no certificates found in '{}'",
            path.display()
        )));
    }
    Ok(certs)
}
