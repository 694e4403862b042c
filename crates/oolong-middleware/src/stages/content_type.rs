//! The `Content-Type` media-type gate.
//!
//! Applied only to routes that carry a body (create, update). Requests
//! whose `Content-Type` is not exactly the API media type are rejected
//! with `unsupported_media_type` while the body is still unread; the
//! decode stage behind this gate never sees them.

use http::header;

use crate::context::RequestContext;
use crate::middleware::{BoxFuture, Middleware, Next};
use crate::types::{ApiResult, Request};
use oolong_core::{error, MEDIA_TYPE};

/// Middleware enforcing `Content-Type: application/vnd.api+json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentTypeMiddleware;

impl ContentTypeMiddleware {
    /// Creates the Content-Type gate.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Middleware for ContentTypeMiddleware {
    fn name(&self) -> &'static str {
        "content_type"
    }

    fn process<'a>(
        &'a self,
        ctx: &'a mut RequestContext,
        request: Request,
        next: Next<'a>,
    ) -> BoxFuture<'a, ApiResult> {
        Box::pin(async move {
            let supported = request
                .headers()
                .get(header::CONTENT_TYPE)
                .is_some_and(|value| value.as_bytes() == MEDIA_TYPE.as_bytes());

            if supported {
                next.run(ctx, request).await
            } else {
                Ok(error::UNSUPPORTED_MEDIA_TYPE.into_response())
            }
        })
    }
}
