//! # Oolong Core
//!
//! Shared vocabulary for the oolong tea API. This crate carries everything
//! the pipeline, the server, and the service itself agree on:
//!
//! - the closed error vocabulary and its wire envelope ([`error`])
//! - the JSON:API resource envelopes ([`envelope`])
//! - the persisted record and its identifier rules ([`record`])
//! - the repository boundary the HTTP layer is written against
//!   ([`repository`])
//!
//! Nothing in here performs I/O. The storage adapter and the HTTP stack
//! both depend on this crate; it depends on neither.

#![doc(html_root_url = "https://docs.rs/oolong-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod envelope;
pub mod error;
pub mod id;
pub mod record;
pub mod repository;

pub use envelope::{Collection, Resource};
pub use error::{ApiError, Errors, MEDIA_TYPE};
pub use id::RequestId;
pub use record::Tea;
pub use repository::{RepoError, TeaRepository};
