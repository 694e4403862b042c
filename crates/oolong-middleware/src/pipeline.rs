//! Per-route pipeline composition.
//!
//! Each route owns one [`Pipeline`]: an ordered stage list assembled once
//! at startup and shared by every request on that route. The order is
//! fixed by construction:
//!
//! 1. **Recover**: outermost, so it catches faults and panics from every
//!    inner stage, logging included.
//! 2. **Logging**: wraps negotiation, so timing covers rejected requests.
//! 3. **Accept**: media-type gate for all routes.
//! 4. **ContentType** + **DecodeJson**: only on routes that carry a body
//!    (create, update), added with [`PipelineBuilder::json_body`].
//!
//! [`Pipeline::standard`] yields a builder preloaded with the mandatory
//! prefix; [`Pipeline::builder`] starts empty for composing stages in
//! isolation under test.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::context::RequestContext;
use crate::middleware::{Handler, Middleware, Next};
use crate::stages::{
    AcceptMiddleware, ContentTypeMiddleware, DecodeJsonMiddleware, LoggingMiddleware,
    RecoverMiddleware,
};
use crate::types::{ApiResult, Request};

/// A type-erased stage stored in a pipeline.
pub type BoxedMiddleware = Arc<dyn Middleware>;

/// An ordered, immutable middleware chain for one route.
pub struct Pipeline {
    stages: Vec<BoxedMiddleware>,
}

impl Pipeline {
    /// A builder with no stages. Mostly useful in tests; routes want
    /// [`Pipeline::standard`].
    #[must_use]
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder { stages: Vec::new() }
    }

    /// A builder preloaded with the mandatory shared prefix:
    /// recover → logging → accept.
    #[must_use]
    pub fn standard() -> PipelineBuilder {
        Self::builder()
            .stage(RecoverMiddleware::new())
            .stage(LoggingMiddleware::new())
            .stage(AcceptMiddleware::new())
    }

    /// Runs a request through the chain and into `handler`.
    ///
    /// With the standard prefix in place the result is always `Ok`; the
    /// `Err` arm exists so a bare pipeline under test still surfaces
    /// faults.
    pub async fn run<'a>(
        &'a self,
        ctx: &mut RequestContext,
        request: Request,
        handler: &'a dyn Handler,
    ) -> ApiResult {
        let mut next = Next::terminal(handler);
        for middleware in self.stages.iter().rev() {
            next = Next::stage(middleware.as_ref(), next);
        }
        next.run(ctx, request).await
    }

    /// Returns the stage names, outermost first.
    #[must_use]
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|mw| mw.name()).collect()
    }
}

/// Builder assembling a [`Pipeline`] stage by stage.
pub struct PipelineBuilder {
    stages: Vec<BoxedMiddleware>,
}

impl PipelineBuilder {
    /// Appends a stage. Stages run in append order, each wrapping the
    /// ones appended after it.
    #[must_use]
    pub fn stage<M: Middleware>(mut self, middleware: M) -> Self {
        self.stages.push(Arc::new(middleware));
        self
    }

    /// Appends the body segment for routes that accept a payload: the
    /// Content-Type gate followed by JSON decoding into `T`.
    ///
    /// The decoded value lands in the request context under type
    /// `T`; the terminal handler takes it back out with
    /// [`RequestContext::remove_extension`].
    #[must_use]
    pub fn json_body<T>(self) -> Self
    where
        T: DeserializeOwned + Send + Sync + 'static,
    {
        self.stage(ContentTypeMiddleware::new())
            .stage(DecodeJsonMiddleware::<T>::new())
    }

    /// Seals the stage list into an immutable pipeline.
    #[must_use]
    pub fn build(self) -> Pipeline {
        Pipeline {
            stages: self.stages,
        }
    }
}
