//! Request, response, and chain-value types used throughout the pipeline.

use bytes::Bytes;
use http::{header, StatusCode};
use http_body_util::combinators::UnsyncBoxBody;
use http_body_util::{BodyExt, Empty, Full};
use serde::Serialize;

use oolong_core::MEDIA_TYPE;

/// Type-erased body error.
pub type BodyError = Box<dyn std::error::Error + Send + Sync>;

/// The request body flowing through the pipeline.
///
/// Entering the chain this is the live connection stream, so the
/// negotiation gates run before any body byte is buffered. The decode
/// stage drains it exactly once and forwards an empty body.
pub type RequestBody = UnsyncBoxBody<Bytes, BodyError>;

/// The HTTP request type used in the pipeline.
pub type Request = http::Request<RequestBody>;

/// The HTTP response type used in the pipeline.
pub type Response = http::Response<Full<Bytes>>;

/// An unrecovered fault: any error no stage recognizes.
///
/// Faults travel up the chain as `Err` values and are converted to the
/// generic 500 envelope by the recovery stage, which also logs the cause.
pub type Fault = anyhow::Error;

/// The value type of the middleware chain.
pub type ApiResult = Result<Response, Fault>;

/// Boxes an already-buffered payload as a pipeline request body.
#[must_use]
pub fn buffered_body(bytes: impl Into<Bytes>) -> RequestBody {
    Full::new(bytes.into())
        .map_err(|never| match never {})
        .boxed_unsync()
}

/// An empty pipeline request body.
#[must_use]
pub fn empty_body() -> RequestBody {
    Empty::new().map_err(|never| match never {}).boxed_unsync()
}

/// Extension trait for building API responses.
pub trait ResponseExt {
    /// Builds a JSON response with the API media type.
    ///
    /// Serialization failure is a fault; it propagates to the recovery
    /// stage like any other.
    fn api_json<T: Serialize>(status: StatusCode, value: &T) -> ApiResult;

    /// Builds the 204 reply used by update and delete: no envelope, a
    /// single newline body.
    fn no_content() -> Response;
}

impl ResponseExt for Response {
    fn api_json<T: Serialize>(status: StatusCode, value: &T) -> ApiResult {
        let body = serde_json::to_vec(value)?;
        let response = http::Response::builder()
            .status(status)
            .header(header::CONTENT_TYPE, MEDIA_TYPE)
            .body(Full::new(Bytes::from(body)))
            .expect("static response parts are valid");
        Ok(response)
    }

    fn no_content() -> Response {
        http::Response::builder()
            .status(StatusCode::NO_CONTENT)
            .body(Full::new(Bytes::from_static(b"\n")))
            .expect("static response parts are valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_buffered_body_round_trips() {
        let bytes = buffered_body("hello")
            .collect()
            .await
            .unwrap()
            .to_bytes();
        assert_eq!(&*bytes, b"hello");
    }

    #[tokio::test]
    async fn test_empty_body_is_empty() {
        let bytes = empty_body().collect().await.unwrap().to_bytes();
        assert!(bytes.is_empty());
    }

    #[test]
    fn test_api_json_sets_media_type() {
        let response =
            Response::api_json(StatusCode::OK, &serde_json::json!({"data": []})).unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            MEDIA_TYPE
        );
    }

    #[tokio::test]
    async fn test_no_content_is_newline() {
        let response = Response::no_content();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&*body, b"\n");
    }
}
