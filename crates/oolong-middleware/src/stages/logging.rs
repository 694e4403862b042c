//! Per-request logging.
//!
//! Sits directly inside recovery, so one structured event is emitted for
//! every request that reaches dispatch, including the ones the
//! negotiation gates reject. Faults passing through on their way to the
//! recovery stage are logged as the 500 they will become.

use std::time::Instant;

use crate::context::RequestContext;
use crate::middleware::{BoxFuture, Middleware, Next};
use crate::types::{ApiResult, Request};

/// Middleware emitting one `tracing` event per request.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingMiddleware;

impl LoggingMiddleware {
    /// Creates the logging stage.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Middleware for LoggingMiddleware {
    fn name(&self) -> &'static str {
        "logging"
    }

    fn process<'a>(
        &'a self,
        ctx: &'a mut RequestContext,
        request: Request,
        next: Next<'a>,
    ) -> BoxFuture<'a, ApiResult> {
        Box::pin(async move {
            let method = request.method().clone();
            let path = request.uri().path().to_string();
            let started = Instant::now();

            let result = next.run(ctx, request).await;

            let status = match &result {
                Ok(response) => response.status().as_u16(),
                // An escaping fault is converted to a 500 by the recovery
                // stage above us.
                Err(_) => 500,
            };

            tracing::info!(
                request_id = %ctx.request_id(),
                method = %method,
                path = %path,
                status,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "request"
            );

            result
        })
    }
}
