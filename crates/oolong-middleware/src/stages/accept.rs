//! The `Accept` media-type gate.
//!
//! Applied to every route. Requests whose `Accept` header is not exactly
//! the API media type are rejected with `not_acceptable` before any
//! further work; no body byte has been read at that point.

use http::header;

use crate::context::RequestContext;
use crate::middleware::{BoxFuture, Middleware, Next};
use crate::types::{ApiResult, Request};
use oolong_core::{error, MEDIA_TYPE};

/// Middleware enforcing `Accept: application/vnd.api+json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptMiddleware;

impl AcceptMiddleware {
    /// Creates the Accept gate.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Middleware for AcceptMiddleware {
    fn name(&self) -> &'static str {
        "accept"
    }

    fn process<'a>(
        &'a self,
        ctx: &'a mut RequestContext,
        request: Request,
        next: Next<'a>,
    ) -> BoxFuture<'a, ApiResult> {
        Box::pin(async move {
            let acceptable = request
                .headers()
                .get(header::ACCEPT)
                .is_some_and(|value| value.as_bytes() == MEDIA_TYPE.as_bytes());

            if acceptable {
                next.run(ctx, request).await
            } else {
                Ok(error::NOT_ACCEPTABLE.into_response())
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::Handler;
    use crate::types::empty_body;
    use bytes::Bytes;
    use http::StatusCode;
    use http_body_util::{BodyExt, Full};

    fn ok_handler() -> impl Handler {
        |_ctx: &mut RequestContext, _req: Request| {
            let fut: BoxFuture<'static, ApiResult> = Box::pin(async {
                Ok(http::Response::builder()
                    .status(StatusCode::OK)
                    .body(Full::new(Bytes::from_static(b"OK")))
                    .unwrap())
            });
            fut
        }
    }

    fn request(accept: Option<&str>) -> Request {
        let mut builder = http::Request::builder().uri("/teas");
        if let Some(value) = accept {
            builder = builder.header(header::ACCEPT, value);
        }
        builder.body(empty_body()).unwrap()
    }

    async fn run(accept: Option<&str>) -> crate::types::Response {
        let handler = ok_handler();
        let mut ctx = RequestContext::new();
        AcceptMiddleware::new()
            .process(&mut ctx, request(accept), Next::terminal(&handler))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_exact_media_type_passes() {
        let response = run(Some(MEDIA_TYPE)).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_header_is_rejected() {
        let response = run(None).await;
        assert_eq!(response.status(), StatusCode::NOT_ACCEPTABLE);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["errors"][0]["id"], "not_acceptable");
    }

    #[tokio::test]
    async fn test_wrong_media_type_is_rejected() {
        let response = run(Some("application/json")).await;
        assert_eq!(response.status(), StatusCode::NOT_ACCEPTABLE);
    }

    #[tokio::test]
    async fn test_wildcard_is_rejected() {
        // The gate is an exact equality check, not content negotiation.
        let response = run(Some("*/*")).await;
        assert_eq!(response.status(), StatusCode::NOT_ACCEPTABLE);
    }
}
