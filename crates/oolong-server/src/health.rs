//! Liveness reporting.
//!
//! `GET /healthz` is answered by the server before dispatch, outside the
//! pipeline: health probes speak plain JSON and do not negotiate the API
//! media type.

use bytes::Bytes;
use http::{header, Response, StatusCode};
use http_body_util::Full;
use serde::Serialize;

/// Liveness check for this process.
#[derive(Debug, Clone)]
pub struct HealthCheck {
    service: String,
    version: String,
}

/// The `/healthz` response body.
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    /// Always `"ok"` while the process is serving.
    pub status: &'static str,
    /// Service name.
    pub service: String,
    /// Service version.
    pub version: String,
}

impl HealthCheck {
    /// Creates a health check reporting the given service identity.
    #[must_use]
    pub fn new(service: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            version: version.into(),
        }
    }

    /// Returns the current status.
    #[must_use]
    pub fn status(&self) -> HealthStatus {
        HealthStatus {
            status: "ok",
            service: self.service.clone(),
            version: self.version.clone(),
        }
    }

    /// Builds the `/healthz` response.
    #[must_use]
    pub fn response(&self) -> Response<Full<Bytes>> {
        let body = serde_json::to_vec(&self.status())
            .unwrap_or_else(|_| br#"{"status":"ok"}"#.to_vec());

        Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Full::new(Bytes::from(body)))
            .expect("static response parts are valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_shape() {
        let health = HealthCheck::new("oolong", "0.1.0");
        let json = serde_json::to_value(health.status()).unwrap();

        assert_eq!(json["status"], "ok");
        assert_eq!(json["service"], "oolong");
        assert_eq!(json["version"], "0.1.0");
    }

    #[test]
    fn test_response_is_plain_json() {
        let response = HealthCheck::new("oolong", "0.1.0").response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }
}
