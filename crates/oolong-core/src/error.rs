//! The closed API error vocabulary and its wire envelope.
//!
//! Every failure a client can observe is one of the constants below. They
//! are process-wide immutable values, not built per request; the only
//! per-request error information is what goes to the operator log. Clients
//! always receive the same five shapes:
//!
//! | id                      | status | raised by                         |
//! |-------------------------|--------|-----------------------------------|
//! | `bad_request`           | 400    | body decode stage                 |
//! | `not_found`             | 404    | handlers (missing / malformed id) |
//! | `not_acceptable`        | 406    | Accept gate                       |
//! | `unsupported_media_type`| 415    | Content-Type gate                 |
//! | `internal_server_error` | 500    | recovery stage (any fault)        |
//!
//! The wire shape follows the JSON:API error convention:
//!
//! ```json
//! {"errors": [{"id": "...", "status": 400, "title": "...", "detail": "..."}]}
//! ```

use bytes::Bytes;
use http::{header, Response, StatusCode};
use http_body_util::Full;
use serde::Serialize;

/// The only media type this API speaks, for requests and responses alike.
pub const MEDIA_TYPE: &str = "application/vnd.api+json";

/// A single API error: stable symbolic id, HTTP status, and two levels of
/// human-readable text.
///
/// Instances are `'static` constants; see the module table. Serializes to
/// the JSON:API error-object shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ApiError {
    /// Stable symbolic identifier, e.g. `"not_acceptable"`.
    pub id: &'static str,
    /// The HTTP status this error is always served with.
    pub status: u16,
    /// Short human-readable summary.
    pub title: &'static str,
    /// Longer human-readable explanation.
    pub detail: &'static str,
}

/// The top-level error envelope: an ordered sequence of errors under a
/// single `errors` key.
#[derive(Debug, Clone, Serialize)]
pub struct Errors {
    /// The errors being reported. In practice always exactly one.
    pub errors: Vec<ApiError>,
}

/// Request body was present but not parseable as the expected JSON shape.
pub const BAD_REQUEST: ApiError = ApiError {
    id: "bad_request",
    status: 400,
    title: "Bad request",
    detail: "Request body is not well-formed. It must be JSON.",
};

/// The identified resource does not exist (or the identifier is malformed
/// and therefore can never name one).
pub const NOT_FOUND: ApiError = ApiError {
    id: "not_found",
    status: 404,
    title: "Not Found",
    detail: "The requested resource does not exist.",
};

/// The request's `Accept` header is not the API media type.
pub const NOT_ACCEPTABLE: ApiError = ApiError {
    id: "not_acceptable",
    status: 406,
    title: "Not Acceptable",
    detail: "Accept header must be set to 'application/vnd.api+json'.",
};

/// The request's `Content-Type` header is not the API media type.
pub const UNSUPPORTED_MEDIA_TYPE: ApiError = ApiError {
    id: "unsupported_media_type",
    status: 415,
    title: "Unsupported Media Type",
    detail: "Content-Type header must be set to: 'application/vnd.api+json'.",
};

/// Catch-all for any unrecovered fault. The underlying cause is logged for
/// operators and never shown to the client.
pub const INTERNAL_SERVER_ERROR: ApiError = ApiError {
    id: "internal_server_error",
    status: 500,
    title: "Internal Server Error",
    detail: "Something went wrong.",
};

impl ApiError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Builds the terminal HTTP response for this error.
    ///
    /// Sets the API media type, the error's status, and serializes the
    /// `{"errors": [..]}` envelope as the body. The response fully
    /// determines the reply; callers must not write anything further.
    #[must_use]
    pub fn into_response(self) -> Response<Full<Bytes>> {
        let body = serde_json::to_vec(&Errors { errors: vec![self] })
            .expect("error envelope serialization is infallible");

        Response::builder()
            .status(self.status_code())
            .header(header::CONTENT_TYPE, MEDIA_TYPE)
            .body(Full::new(Bytes::from(body)))
            .expect("static error response parts are valid")
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): {}", self.id, self.status, self.detail)
    }
}
