//! The HTTP server.
//!
//! A tokio accept loop serving HTTP/1.1 connections through hyper. Each
//! connection gets its own task; each request on it is dispatched through
//! the route table, so requests run concurrently and share nothing but
//! the repository behind the handlers. Shutdown stops accepting, then
//! waits (bounded by the configured drain window) for live connections to
//! finish.
//!
//! The request body is handed to the pipeline as the live connection
//! stream; nothing is buffered before the negotiation gates pass.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use http_body_util::BodyExt;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use thiserror::Error;
use tokio::net::TcpListener;

use oolong_middleware::types::BodyError;
use oolong_middleware::Response;

use crate::config::ServerConfig;
use crate::health::HealthCheck;
use crate::router::Router;
use crate::shutdown::{ConnectionTracker, ShutdownSignal};

/// Errors that stop the server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The configured bind address could not be parsed.
    #[error("invalid bind address {addr:?}")]
    InvalidAddr {
        /// The configured address string.
        addr: String,
        /// The parse failure.
        #[source]
        source: std::net::AddrParseError,
    },

    /// The listener could not be bound.
    #[error("failed to bind {addr}")]
    Bind {
        /// The resolved socket address.
        addr: SocketAddr,
        /// The I/O failure.
        #[source]
        source: std::io::Error,
    },
}

/// The oolong HTTP server.
pub struct Server {
    config: ServerConfig,
    router: Router,
    health: HealthCheck,
}

impl Server {
    /// Creates a server over a sealed route table.
    #[must_use]
    pub fn new(config: ServerConfig, router: Router) -> Self {
        Self {
            config,
            router,
            health: HealthCheck::new("oolong", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Runs until SIGTERM or SIGINT.
    pub async fn run(self) -> Result<(), ServerError> {
        let shutdown = ShutdownSignal::with_os_signals();
        self.run_with_shutdown(shutdown).await
    }

    /// Runs until the given signal triggers. Useful for tests and
    /// programmatic shutdown.
    pub async fn run_with_shutdown(self, shutdown: ShutdownSignal) -> Result<(), ServerError> {
        let addr = self
            .config
            .socket_addr()
            .map_err(|source| ServerError::InvalidAddr {
                addr: self.config.http_addr().to_string(),
                source,
            })?;

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;

        tracing::info!(%addr, "server listening");

        let server = Arc::new(self);
        let tracker = ConnectionTracker::new();

        loop {
            tokio::select! {
                accepted = listener.accept() => {
                    match accepted {
                        Ok((stream, remote_addr)) => {
                            let server = Arc::clone(&server);
                            let token = tracker.acquire();
                            let shutdown = shutdown.clone();

                            tokio::spawn(async move {
                                if let Err(err) =
                                    server.handle_connection(stream, shutdown).await
                                {
                                    tracing::debug!(%remote_addr, error = %err, "connection error");
                                }
                                drop(token);
                            });
                        }
                        Err(err) => {
                            tracing::error!(error = %err, "failed to accept connection");
                        }
                    }
                }

                _ = shutdown.recv() => {
                    tracing::info!("shutdown signal received");
                    break;
                }
            }
        }

        let drain = server.config.shutdown_timeout();
        tracing::info!(
            active = tracker.active(),
            drain_secs = drain.as_secs(),
            "draining connections"
        );

        tokio::select! {
            _ = tracker.drained() => {
                tracing::info!("all connections closed");
            }
            _ = tokio::time::sleep(drain) => {
                tracing::warn!(active = tracker.active(), "drain window elapsed");
            }
        }

        tracing::info!("server stopped");
        Ok(())
    }

    /// Serves one connection until it closes or shutdown triggers.
    async fn handle_connection(
        self: &Arc<Self>,
        stream: tokio::net::TcpStream,
        shutdown: ShutdownSignal,
    ) -> Result<(), hyper::Error> {
        let io = TokioIo::new(stream);
        let server = Arc::clone(self);

        let service = service_fn(move |req: http::Request<Incoming>| {
            let server = Arc::clone(&server);
            async move { server.handle_request(req).await }
        });

        let conn = http1::Builder::new().serve_connection(io, service);

        tokio::select! {
            result = conn => result,
            _ = shutdown.recv() => Ok(()),
        }
    }

    /// Answers one request: health probes directly, everything else via
    /// the route table.
    async fn handle_request(
        self: &Arc<Self>,
        req: http::Request<Incoming>,
    ) -> Result<Response, Infallible> {
        if req.method() == http::Method::GET && req.uri().path() == "/healthz" {
            return Ok(self.health.response());
        }

        let req =
            req.map(|body| body.map_err(|err| Box::new(err) as BodyError).boxed_unsync());

        Ok(self.router.dispatch(req).await)
    }
}
