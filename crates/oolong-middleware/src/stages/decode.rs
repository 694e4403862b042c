//! Generic JSON body decoding.
//!
//! Parameterized over the expected payload shape at compile time; the
//! same stage serves the tea resource and any future record type without
//! modification. The body stream is not rewindable, so decoding happens
//! exactly once here: the stage drains the stream, parses it, parks the
//! value in the request context under its concrete type, and forwards the
//! request with an empty body. Any read or parse failure (malformed
//! JSON or a type mismatch) is reported as `bad_request` and the chain
//! stops.

use std::marker::PhantomData;

use http_body_util::BodyExt;
use serde::de::DeserializeOwned;

use crate::context::RequestContext;
use crate::middleware::{BoxFuture, Middleware, Next};
use crate::types::{empty_body, ApiResult, Request};
use oolong_core::error;

/// Middleware decoding the request body as JSON into `T`.
///
/// The terminal handler retrieves the decoded value with
/// [`RequestContext::remove_extension`].
pub struct DecodeJsonMiddleware<T> {
    _payload: PhantomData<fn() -> T>,
}

impl<T> DecodeJsonMiddleware<T> {
    /// Creates a decode stage for payload type `T`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            _payload: PhantomData,
        }
    }
}

impl<T> Default for DecodeJsonMiddleware<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Middleware for DecodeJsonMiddleware<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    fn name(&self) -> &'static str {
        "decode_json"
    }

    fn process<'a>(
        &'a self,
        ctx: &'a mut RequestContext,
        request: Request,
        next: Next<'a>,
    ) -> BoxFuture<'a, ApiResult> {
        Box::pin(async move {
            let (parts, body) = request.into_parts();

            let bytes = match body.collect().await {
                Ok(collected) => collected.to_bytes(),
                Err(err) => {
                    tracing::debug!(
                        request_id = %ctx.request_id(),
                        error = %err,
                        "failed to read request body"
                    );
                    return Ok(error::BAD_REQUEST.into_response());
                }
            };

            let decoded: T = match serde_json::from_slice(&bytes) {
                Ok(value) => value,
                Err(err) => {
                    tracing::debug!(
                        request_id = %ctx.request_id(),
                        error = %err,
                        "failed to decode request body"
                    );
                    return Ok(error::BAD_REQUEST.into_response());
                }
            };

            ctx.set_extension(decoded);

            // The body is spent; downstream stages and the handler work
            // from the context.
            let request = Request::from_parts(parts, empty_body());
            next.run(ctx, request).await
        })
    }
}
