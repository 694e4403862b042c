//! Per-request context.
//!
//! One [`RequestContext`] is allocated per chain invocation and passed by
//! mutable reference through every stage down to the handler. It is the
//! only request-scoped state in the system; there are no globals and no
//! thread-local lookup tables. The decode stage parks the parsed body
//! here, dispatch parks the matched path parameters, and the handler
//! retrieves both.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::time::Instant;

use oolong_core::RequestId;

/// Request-scoped value bag carried through the middleware chain.
#[derive(Debug)]
pub struct RequestContext {
    /// Correlation id for operator logs.
    request_id: RequestId,

    /// When the request entered dispatch.
    started_at: Instant,

    /// Path parameters extracted by the route match, as (name, value).
    params: Vec<(String, String)>,

    /// Type-keyed extension slots. The decode stage stores the parsed
    /// payload here under its concrete type.
    extensions: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl RequestContext {
    /// Creates a context with a fresh request id.
    #[must_use]
    pub fn new() -> Self {
        Self {
            request_id: RequestId::new(),
            started_at: Instant::now(),
            params: Vec::new(),
            extensions: HashMap::new(),
        }
    }

    /// Returns the request id.
    #[must_use]
    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    /// Returns when the request entered dispatch.
    #[must_use]
    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    /// Returns the elapsed time since dispatch started.
    #[must_use]
    pub fn elapsed(&self) -> std::time::Duration {
        self.started_at.elapsed()
    }

    /// Replaces the path parameters. Called once by dispatch after the
    /// route match.
    pub fn set_params(&mut self, params: Vec<(String, String)>) {
        self.params = params;
    }

    /// Returns a path parameter by name.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Stores a typed extension value, replacing any previous value of the
    /// same type.
    pub fn set_extension<T: Send + Sync + 'static>(&mut self, value: T) {
        self.extensions.insert(TypeId::of::<T>(), Box::new(value));
    }

    /// Returns a reference to a typed extension value, if present.
    #[must_use]
    pub fn get_extension<T: Send + Sync + 'static>(&self) -> Option<&T> {
        self.extensions
            .get(&TypeId::of::<T>())
            .and_then(|v| v.downcast_ref())
    }

    /// Removes and returns a typed extension value, if present.
    pub fn remove_extension<T: Send + Sync + 'static>(&mut self) -> Option<T> {
        self.extensions
            .remove(&TypeId::of::<T>())
            .and_then(|v| v.downcast().ok())
            .map(|b| *b)
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}
