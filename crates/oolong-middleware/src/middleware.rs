//! The middleware and handler contracts.
//!
//! A stage receives the mutable [`RequestContext`], the request, and a
//! [`Next`] cursor over the remainder of the chain. It either delegates
//! (`next.run(..)`) or short-circuits by returning a response without
//! calling `next`; that is how the negotiation and decode gates reject
//! requests. Unrecognized errors travel as `Err(Fault)` to the recovery
//! stage.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::context::RequestContext;
use crate::types::{ApiResult, Request};

/// A boxed future, as returned by stages and handlers.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// One stage of the request-processing chain.
///
/// # Invariants
///
/// - A stage calls `next.run()` at most once.
/// - A stage that short-circuits must fully determine the response.
/// - Stages must not assume anything about chain position beyond what
///   [`Pipeline`](crate::pipeline::Pipeline) guarantees.
pub trait Middleware: Send + Sync + 'static {
    /// Unique stage name, used in logs and tests.
    fn name(&self) -> &'static str;

    /// Processes the request, delegating to `next` for the rest of the
    /// chain.
    fn process<'a>(
        &'a self,
        ctx: &'a mut RequestContext,
        request: Request,
        next: Next<'a>,
    ) -> BoxFuture<'a, ApiResult>;
}

/// A terminal route handler.
///
/// Handlers read what they need from the context synchronously (path
/// parameters, the decoded body) and return a `'static` future, so the
/// future owns everything it touches. Implemented automatically for
/// closures of the matching shape.
pub trait Handler: Send + Sync + 'static {
    /// Invokes the handler.
    fn call(&self, ctx: &mut RequestContext, request: Request) -> BoxFuture<'static, ApiResult>;
}

/// A type-erased handler shared across concurrent requests.
pub type BoxedHandler = Arc<dyn Handler>;

impl<F> Handler for F
where
    F: Fn(&mut RequestContext, Request) -> BoxFuture<'static, ApiResult>
        + Send
        + Sync
        + 'static,
{
    fn call(&self, ctx: &mut RequestContext, request: Request) -> BoxFuture<'static, ApiResult> {
        self(ctx, request)
    }
}

/// Cursor over the remainder of the chain.
///
/// Consumed by `run`, so a stage can only continue the chain once.
pub struct Next<'a> {
    inner: NextInner<'a>,
}

enum NextInner<'a> {
    /// More stages before the handler.
    Stage {
        middleware: &'a dyn Middleware,
        next: Box<Next<'a>>,
    },
    /// End of chain: the terminal handler.
    Handler(&'a dyn Handler),
}

impl<'a> Next<'a> {
    /// A cursor that runs `middleware`, then `next`.
    pub(crate) fn stage(middleware: &'a dyn Middleware, next: Next<'a>) -> Self {
        Self {
            inner: NextInner::Stage {
                middleware,
                next: Box::new(next),
            },
        }
    }

    /// A terminal cursor that invokes the handler.
    pub(crate) fn terminal(handler: &'a dyn Handler) -> Self {
        Self {
            inner: NextInner::Handler(handler),
        }
    }

    /// Runs the remainder of the chain.
    pub async fn run(self, ctx: &mut RequestContext, request: Request) -> ApiResult {
        match self.inner {
            NextInner::Stage { middleware, next } => middleware.process(ctx, request, *next).await,
            NextInner::Handler(handler) => handler.call(ctx, request).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{empty_body, Response};
    use bytes::Bytes;
    use http::StatusCode;
    use http_body_util::Full;

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

    fn request() -> Request {
        http::Request::builder()
            .uri("/teas")
            .body(empty_body())
            .unwrap()
    }

    struct Tagging {
        name: &'static str,
    }

    #[derive(Debug, Default)]
    struct Visited(Vec<&'static str>);

    impl Middleware for Tagging {
        fn name(&self) -> &'static str {
            self.name
        }

        fn process<'a>(
            &'a self,
            ctx: &'a mut RequestContext,
            request: Request,
            next: Next<'a>,
        ) -> BoxFuture<'a, ApiResult> {
            Box::pin(async move {
                let mut visited = ctx.remove_extension::<Visited>().unwrap_or_default();
                visited.0.push(self.name);
                ctx.set_extension(visited);
                next.run(ctx, request).await
            })
        }
    }

    #[tokio::test]
    async fn test_terminal_invokes_handler() {
        let handler = ok_handler();
        let mut ctx = RequestContext::new();

        let response: Response = Next::terminal(&handler)
            .run(&mut ctx, request())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_stages_run_in_registration_order() {
        let first = Tagging { name: "first" };
        let second = Tagging { name: "second" };
        let handler = ok_handler();

        let chain = Next::stage(&first, Next::stage(&second, Next::terminal(&handler)));

        let mut ctx = RequestContext::new();
        chain.run(&mut ctx, request()).await.unwrap();

        let visited = ctx.get_extension::<Visited>().unwrap();
        assert_eq!(visited.0, vec!["first", "second"]);
    }

    #[test]
    fn test_middleware_name() {
        let mw = Tagging { name: "tagging" };
        assert_eq!(mw.name(), "tagging");
    }
}
