//! # Oolong API
//!
//! The tea service itself: the in-memory repository adapter, the five
//! terminal handlers, their route table, and logging setup. The binary in
//! `main.rs` wires these together; integration tests drive the route
//! table directly, no socket required.

#![doc(html_root_url = "https://docs.rs/oolong-api/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod routes;
pub mod store;
pub mod telemetry;
