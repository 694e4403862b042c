//! Route table for the tea API.

pub mod teas;

use std::sync::Arc;

use http::Method;

use oolong_core::{Resource, Tea, TeaRepository};
use oolong_middleware::Pipeline;
use oolong_server::{Router, RouterError};

/// Builds the service's route table over the given repository.
///
/// Every route shares the standard pipeline prefix; the mutating routes
/// add the body segment for `Resource<Tea>` payloads.
pub fn router(repo: Arc<dyn TeaRepository>) -> Result<Router, RouterError> {
    Router::builder()
        .route(
            Method::GET,
            "/teas",
            Pipeline::standard().build(),
            teas::list(Arc::clone(&repo)),
        )
        .route(
            Method::POST,
            "/teas",
            Pipeline::standard().json_body::<Resource<Tea>>().build(),
            teas::create(Arc::clone(&repo)),
        )
        .route(
            Method::GET,
            "/teas/{id}",
            Pipeline::standard().build(),
            teas::get(Arc::clone(&repo)),
        )
        .route(
            Method::PUT,
            "/teas/{id}",
            Pipeline::standard().json_body::<Resource<Tea>>().build(),
            teas::update(Arc::clone(&repo)),
        )
        .route(
            Method::DELETE,
            "/teas/{id}",
            Pipeline::standard().build(),
            teas::delete(repo),
        )
        .build()
}
