//! Server - TCP listener and sequential accept loop
//!
//! Connections are served strictly one after another: each one carries a
//! single request, answered through hyper's HTTP/1 connection driver, and
//! the next connection is accepted only once it is closed. The counter file
//! relies on this.

mod tls;

use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;

use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::{TcpListener, TcpStream};
use tokio_rustls::TlsAcceptor;

use crate::common::config::{Config, ResponderConfig};
use crate::common::{Error, Result};
use crate::http::{codec, Response};
use crate::responder;

/// Fake SOAP server
pub struct Server {
    /// Configuration
    config: Config,
    /// Listening socket
    listener: TcpListener,
    /// Present when the listener is wrapped in TLS
    tls: Option<TlsAcceptor>,
}

impl Server {
    /// Bind the listener, loading the TLS identity first when configured
    pub async fn bind(config: Config) -> Result<Self> {
        let tls = config.server.tls.as_ref().map(tls::acceptor).transpose()?;
        let listener = TcpListener::bind(config.server.addr).await?;

        Ok(Self {
            config,
            listener,
            tls,
        })
    }

    /// Address the listener is bound to
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve until SIGINT or SIGTERM
    pub async fn run(self) -> Result<()> {
        self.run_until(shutdown_signal()).await
    }

    /// Serve until `shutdown` completes
    pub async fn run_until<F: Future<Output = ()>>(self, shutdown: F) -> Result<()> {
        tracing::info!(
            addr = %self.local_addr()?,
            tls = self.tls.is_some(),
            input = %self.config.responder.input_dir.display(),
            order = %self.config.responder.order_file.display(),
            "Fake SOAP server listening"
        );

        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    break;
                }
                accept_result = self.listener.accept() => {
                    match accept_result {
                        Ok((stream, peer)) => {
                            if let Err(e) = self.handle_client(stream, peer).await {
                                tracing::error!(%peer, "Error handling client: {}", e);
                            }
                        }
                        Err(e) => {
                            tracing::error!("Accept error: {}", e);
                        }
                    }
                }
            }
        }

        tracing::info!("Server shutdown complete");
        Ok(())
    }

    /// Handle a single client connection
    async fn handle_client(&self, stream: TcpStream, peer: SocketAddr) -> Result<()> {
        tracing::debug!(%peer, "Client connected");

        match &self.tls {
            Some(acceptor) => {
                let read_timeout = self.config.server.read_timeout;
                let stream = tokio::time::timeout(read_timeout, acceptor.accept(stream))
                    .await
                    .map_err(|_| Error::Timeout(read_timeout.as_secs()))??;
                self.serve(stream).await
            }
            None => self.serve(stream).await,
        }
    }

    /// Drive one HTTP/1 connection to completion
    ///
    /// Keep-alive is off, so hyper closes the connection after the first
    /// response. The read timeout bounds the whole exchange.
    async fn serve<S>(&self, stream: S) -> Result<()>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let config = &self.config.responder;
        let service = service_fn(|request| respond(config, request));

        let conn = http1::Builder::new()
            .keep_alive(false)
            .title_case_headers(true)
            .serve_connection(TokioIo::new(stream), service);

        let read_timeout = self.config.server.read_timeout;
        match tokio::time::timeout(read_timeout, conn).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) if e.is_parse() || e.is_incomplete_message() => {
                tracing::debug!("Dropped malformed or truncated request: {}", e);
                Ok(())
            }
            Ok(Err(e)) => Err(e.into()),
            Err(_) => Err(Error::Timeout(read_timeout.as_secs())),
        }
    }
}

/// Answer one request
///
/// Framing errors in the body become plain text 400/413 responses; the
/// responder handles everything else.
async fn respond(
    config: &ResponderConfig,
    request: hyper::Request<Incoming>,
) -> std::result::Result<hyper::Response<Full<Bytes>>, Infallible> {
    let response = match codec::read_request(request).await {
        Ok(request) => responder::handle_request(config, &request).await,
        Err(e) => {
            tracing::debug!("Rejecting malformed request: {}", e);
            Response::text(e.status(), e.to_string())
        }
    };

    Ok(codec::into_hyper(response))
}

/// Resolve on SIGINT or SIGTERM
#[cfg(unix)]
async fn shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let (mut sigterm, mut sigint) = match (
        signal(SignalKind::terminate()),
        signal(SignalKind::interrupt()),
    ) {
        (Ok(sigterm), Ok(sigint)) => (sigterm, sigint),
        (Err(e), _) | (_, Err(e)) => {
            tracing::warn!("Failed to install signal handlers, falling back to Ctrl+C: {}", e);
            let _ = tokio::signal::ctrl_c().await;
            return;
        }
    };

    tokio::select! {
        _ = sigterm.recv() => {
            tracing::info!("Received SIGTERM, shutting down gracefully");
        }
        _ = sigint.recv() => {
            tracing::info!("Received SIGINT (Ctrl+C), shutting down gracefully");
        }
    }
}

/// Resolve on Ctrl+C
#[cfg(not(unix))]
async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("Received Ctrl+C, shutting down gracefully");
    }
}
