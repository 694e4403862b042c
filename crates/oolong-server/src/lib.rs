//! # Oolong Server
//!
//! The HTTP substrate under the pipeline: a hyper/tokio accept loop with
//! graceful shutdown, and the route table that pairs each method + path
//! with its pipeline and terminal handler.
//!
//! Path matching itself is delegated to the [`matchit`] radix tree; the
//! server owns only what happens on either side of the match: turning a
//! connection into pipeline requests, and turning a match into a chain
//! invocation.

#![doc(html_root_url = "https://docs.rs/oolong-server/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod health;
pub mod router;
pub mod server;
pub mod shutdown;

pub use config::{ServerConfig, ServerConfigBuilder};
pub use health::HealthCheck;
pub use router::{Router, RouterBuilder, RouterError};
pub use server::{Server, ServerError};
pub use shutdown::{ConnectionTracker, ShutdownSignal};
