//! # Oolong Middleware
//!
//! The request-processing pipeline: an ordered chain of middleware stages
//! composed around a terminal handler. Every route shares a mandatory
//! prefix and optionally adds body stages:
//!
//! ```text
//! Request → Recover → Logging → Accept ─[→ ContentType → DecodeJson]─→ Handler
//! ```
//!
//! - **Recover** is outermost so it converts faults (and panics) from
//!   every inner stage into the constant 500 envelope.
//! - **Logging** wraps negotiation so its timing covers rejected requests
//!   too.
//! - **Accept** and **ContentType** are fail-fast media-type gates; no
//!   body byte is read before they pass.
//! - **DecodeJson** consumes the body exactly once, parses it into the
//!   route's payload type, and parks the value in the per-request
//!   [`RequestContext`] for the handler.
//!
//! The chain's value type is `Result<Response, Fault>`: stages report the
//! errors they recognize as ordinary responses and let everything else
//! flow to the single recovery boundary.

#![doc(html_root_url = "https://docs.rs/oolong-middleware/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod context;
pub mod middleware;
pub mod pipeline;
pub mod stages;
pub mod types;

pub use context::RequestContext;
pub use middleware::{BoxFuture, BoxedHandler, Handler, Middleware, Next};
pub use pipeline::{Pipeline, PipelineBuilder};
pub use types::{ApiResult, Fault, Request, RequestBody, Response, ResponseExt};
