//! Fault recovery.
//!
//! The outermost stage and the chain's single uniform catch point. Two
//! things can escape the inner stages:
//!
//! - an `Err(Fault)`: a repository failure or any other error no stage
//!   recognized as its own;
//! - a panic from buggy handler or stage code.
//!
//! Both are confined to the current request: the cause is logged at error
//! level with the request id for operators, and the client receives the
//! constant `internal_server_error` envelope with no trace of the
//! underlying cause. This stage never returns `Err`.

use std::panic::AssertUnwindSafe;

use futures_util::FutureExt;

use crate::context::RequestContext;
use crate::middleware::{BoxFuture, Middleware, Next};
use crate::types::{ApiResult, Request};
use oolong_core::error;

/// Middleware converting faults and panics into the generic 500 envelope.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecoverMiddleware;

impl RecoverMiddleware {
    /// Creates the recovery stage.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Middleware for RecoverMiddleware {
    fn name(&self) -> &'static str {
        "recover"
    }

    fn process<'a>(
        &'a self,
        ctx: &'a mut RequestContext,
        request: Request,
        next: Next<'a>,
    ) -> BoxFuture<'a, ApiResult> {
        Box::pin(async move {
            let outcome = AssertUnwindSafe(next.run(ctx, request)).catch_unwind().await;

            match outcome {
                Ok(Ok(response)) => Ok(response),
                Ok(Err(fault)) => {
                    tracing::error!(
                        request_id = %ctx.request_id(),
                        error = %format!("{fault:#}"),
                        "request fault"
                    );
                    Ok(error::INTERNAL_SERVER_ERROR.into_response())
                }
                Err(panic) => {
                    tracing::error!(
                        request_id = %ctx.request_id(),
                        panic = panic_message(panic.as_ref()),
                        "request panicked"
                    );
                    Ok(error::INTERNAL_SERVER_ERROR.into_response())
                }
            }
        })
    }
}

/// Best-effort extraction of a panic payload's message.
fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "non-string panic payload"
    }
}
