//! Request correlation identifiers.

use uuid::Uuid;

/// Unique identifier for one in-flight request.
///
/// UUIDv7, so ids sort by arrival time. Attached to every request by the
/// pipeline context and included in operator-facing log events; never part
/// of the client-visible API surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Generates a fresh request id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Wraps an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_ids_are_unique() {
        assert_ne!(RequestId::new(), RequestId::new());
    }

    #[test]
    fn test_display_round_trips_through_uuid() {
        let id = RequestId::new();
        let parsed = Uuid::parse_str(&id.to_string()).unwrap();
        assert_eq!(RequestId::from_uuid(parsed), id);
    }
}
