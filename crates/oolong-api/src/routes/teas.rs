//! Terminal handlers for the tea resource.
//!
//! Each handler is a thin adapter from the pipeline to one repository
//! call: it reads its inputs from the request context (path parameters,
//! the decoded body), performs the call, and encodes the reply. Missing
//! records and malformed identifiers resolve to the `not_found` envelope;
//! every other repository failure is a fault for the recovery stage.

use std::sync::Arc;

use http::StatusCode;

use oolong_core::{error, Collection, Resource, Tea, TeaRepository};
use oolong_middleware::{
    ApiResult, BoxFuture, Handler, Request, RequestContext, Response, ResponseExt,
};

/// `GET /teas`: list every tea.
pub fn list(repo: Arc<dyn TeaRepository>) -> impl Handler {
    move |_ctx: &mut RequestContext, _req: Request| {
        let repo = Arc::clone(&repo);
        let fut: BoxFuture<'static, ApiResult> = Box::pin(async move {
            let teas = repo.list_all().await?;
            Response::api_json(StatusCode::OK, &Collection::from(teas))
        });
        fut
    }
}

/// `GET /teas/{id}`: fetch one tea.
pub fn get(repo: Arc<dyn TeaRepository>) -> impl Handler {
    move |ctx: &mut RequestContext, _req: Request| {
        let repo = Arc::clone(&repo);
        let id = path_id(ctx);
        let fut: BoxFuture<'static, ApiResult> = Box::pin(async move {
            match repo.find_by_id(&id?).await {
                Ok(tea) => Response::api_json(StatusCode::OK, &Resource::new(tea)),
                Err(err) if err.is_not_found() => Ok(error::NOT_FOUND.into_response()),
                Err(err) => Err(err.into()),
            }
        });
        fut
    }
}

/// `POST /teas`: create a tea; the repository assigns the identifier.
pub fn create(repo: Arc<dyn TeaRepository>) -> impl Handler {
    move |ctx: &mut RequestContext, _req: Request| {
        let repo = Arc::clone(&repo);
        let body = decoded_body(ctx);
        let fut: BoxFuture<'static, ApiResult> = Box::pin(async move {
            let created = repo.create(body?.data).await?;
            Response::api_json(StatusCode::CREATED, &Resource::new(created))
        });
        fut
    }
}

/// `PUT /teas/{id}`: overwrite a tea. The path identifier is
/// authoritative; any identifier in the body is discarded.
pub fn update(repo: Arc<dyn TeaRepository>) -> impl Handler {
    move |ctx: &mut RequestContext, _req: Request| {
        let repo = Arc::clone(&repo);
        let id = path_id(ctx);
        let body = decoded_body(ctx);
        let fut: BoxFuture<'static, ApiResult> = Box::pin(async move {
            let mut tea = body?.data;
            tea.id = id?;

            match repo.update_by_id(tea).await {
                Ok(()) => Ok(Response::no_content()),
                Err(err) if err.is_not_found() => Ok(error::NOT_FOUND.into_response()),
                Err(err) => Err(err.into()),
            }
        });
        fut
    }
}

/// `DELETE /teas/{id}`: remove a tea.
pub fn delete(repo: Arc<dyn TeaRepository>) -> impl Handler {
    move |ctx: &mut RequestContext, _req: Request| {
        let repo = Arc::clone(&repo);
        let id = path_id(ctx);
        let fut: BoxFuture<'static, ApiResult> = Box::pin(async move {
            match repo.delete_by_id(&id?).await {
                Ok(()) => Ok(Response::no_content()),
                Err(err) if err.is_not_found() => Ok(error::NOT_FOUND.into_response()),
                Err(err) => Err(err.into()),
            }
        });
        fut
    }
}

/// Reads the `{id}` path parameter. Its absence means the route table and
/// handler disagree: a wiring bug, so a fault.
fn path_id(ctx: &RequestContext) -> Result<String, anyhow::Error> {
    ctx.param("id")
        .map(ToString::to_string)
        .ok_or_else(|| anyhow::anyhow!("route is missing its {{id}} parameter"))
}

/// Takes the decoded body out of the context. Its absence means the route
/// was wired without the decode stage: a wiring bug, so a fault.
fn decoded_body(ctx: &mut RequestContext) -> Result<Resource<Tea>, anyhow::Error> {
    ctx.remove_extension::<Resource<Tea>>()
        .ok_or_else(|| anyhow::anyhow!("decoded body missing from request context"))
}
