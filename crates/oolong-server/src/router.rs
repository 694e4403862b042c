//! Route table and dispatch.
//!
//! Each registered route pairs a method + path pattern with the pipeline
//! built for it and its terminal handler. Path matching is delegated to
//! one [`matchit`] radix tree per HTTP method; path parameters use the
//! `{name}` syntax and are copied into the request context before the
//! chain runs.
//!
//! Dispatch misses (an unknown path, or a known path with an
//! unregistered method) are answered with the `not_found` envelope. The
//! error vocabulary is a closed set and a verb that was never wired up is
//! indistinguishable, to a client, from a resource that does not exist.

use std::collections::HashMap;
use std::sync::Arc;

use http::Method;
use thiserror::Error;

use oolong_core::error;
use oolong_middleware::{BoxedHandler, Handler, Pipeline, Request, RequestContext, Response};

/// One registered route: its pipeline and terminal handler.
struct Route {
    pipeline: Pipeline,
    handler: BoxedHandler,
}

/// Errors raised while building the route table.
#[derive(Debug, Error)]
pub enum RouterError {
    /// A path pattern was rejected by the matcher, or registered twice
    /// for the same method.
    #[error("invalid route {method} {path}: {source}")]
    InvalidRoute {
        /// The offending method.
        method: Method,
        /// The offending path pattern.
        path: String,
        /// The matcher's complaint.
        #[source]
        source: matchit::InsertError,
    },
}

/// Builder collecting routes before sealing them into a [`Router`].
#[derive(Default)]
pub struct RouterBuilder {
    routes: Vec<(Method, String, Route)>,
}

impl RouterBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a route. `path` uses `{name}` for parameters, e.g.
    /// `/teas/{id}`.
    #[must_use]
    pub fn route(
        mut self,
        method: Method,
        path: impl Into<String>,
        pipeline: Pipeline,
        handler: impl Handler,
    ) -> Self {
        self.routes.push((
            method,
            path.into(),
            Route {
                pipeline,
                handler: Arc::new(handler),
            },
        ));
        self
    }

    /// Seals the table.
    pub fn build(self) -> Result<Router, RouterError> {
        let mut trees: HashMap<Method, matchit::Router<Route>> = HashMap::new();

        for (method, path, route) in self.routes {
            let tree = trees.entry(method.clone()).or_default();
            tree.insert(&path, route)
                .map_err(|source| RouterError::InvalidRoute {
                    method,
                    path,
                    source,
                })?;
        }

        Ok(Router { trees })
    }
}

/// The sealed route table.
pub struct Router {
    trees: HashMap<Method, matchit::Router<Route>>,
}

impl Router {
    /// Creates a builder.
    #[must_use]
    pub fn builder() -> RouterBuilder {
        RouterBuilder::new()
    }

    /// Dispatches one request through its route's pipeline.
    ///
    /// Allocates the per-request context here, so every chain invocation
    /// owns its own decoded-body slot and parameters; nothing is shared
    /// between concurrent requests.
    pub async fn dispatch(&self, request: Request) -> Response {
        let path = request.uri().path().to_string();

        let Some(tree) = self.trees.get(request.method()) else {
            return error::NOT_FOUND.into_response();
        };
        let Ok(matched) = tree.at(&path) else {
            return error::NOT_FOUND.into_response();
        };

        let params: Vec<(String, String)> = matched
            .params
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        let route = matched.value;

        let mut ctx = RequestContext::new();
        ctx.set_params(params);

        match route
            .pipeline
            .run(&mut ctx, request, route.handler.as_ref())
            .await
        {
            Ok(response) => response,
            // Unreachable with the standard pipeline prefix; kept so a
            // route wired without recovery still degrades to the generic
            // envelope instead of tearing down the connection.
            Err(fault) => {
                tracing::error!(
                    request_id = %ctx.request_id(),
                    error = %format!("{fault:#}"),
                    "fault escaped pipeline"
                );
                error::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
