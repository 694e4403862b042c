//! JSON:API resource envelopes.
//!
//! Every request and response body wraps its payload under a single
//! top-level `data` key: a single object for one record, an array for a
//! collection. The wrappers are generic so the decoding stage can be
//! reused for any future record type.

use serde::{Deserialize, Serialize};

/// A single record wrapped in the JSON:API `data` key.
///
/// Used for create/update request bodies and single-record responses.
///
/// ```
/// use oolong_core::{Resource, Tea};
///
/// let body: Resource<Tea> =
///     serde_json::from_str(r#"{"data": {"name": "Green", "category": "Unoxidized"}}"#).unwrap();
/// assert_eq!(body.data.name, "Green");
/// assert!(body.data.id.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource<T> {
    /// The wrapped record.
    pub data: T,
}

impl<T> Resource<T> {
    /// Wraps a record.
    #[must_use]
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// An ordered sequence of records wrapped in the JSON:API `data` key.
///
/// A collection always serializes with the wrapping structure, even when
/// empty: `{"data": []}`, never `{"data": null}` or a missing key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection<T> {
    /// The wrapped records, in repository order.
    pub data: Vec<T>,
}

impl<T> Collection<T> {
    /// Wraps an ordered sequence of records.
    #[must_use]
    pub fn new(data: Vec<T>) -> Self {
        Self { data }
    }
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { data: Vec::new() }
    }
}

impl<T> From<Vec<T>> for Collection<T> {
    fn from(data: Vec<T>) -> Self {
        Self { data }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Tea;

    #[test]
    fn test_empty_collection_keeps_data_key() {
        let json = serde_json::to_value(Collection::<Tea>::default()).unwrap();
        assert_eq!(json, serde_json::json!({ "data": [] }));
    }

    #[test]
    fn test_resource_round_trip() {
        let resource = Resource::new(Tea {
            id: "5f8f8c44b54764421b7156c1".to_string(),
            name: "Sencha".to_string(),
            category: "Green".to_string(),
        });

        let json = serde_json::to_string(&resource).unwrap();
        let back: Resource<Tea> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, resource);
    }

    #[test]
    fn test_resource_rejects_missing_data_key() {
        let result: Result<Resource<Tea>, _> =
            serde_json::from_str(r#"{"name": "Green", "category": "Unoxidized"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_collection_preserves_order() {
        let collection = Collection::from(vec![
            Tea {
                id: String::new(),
                name: "first".to_string(),
                category: "a".to_string(),
            },
            Tea {
                id: String::new(),
                name: "second".to_string(),
                category: "b".to_string(),
            },
        ]);

        let json = serde_json::to_value(&collection).unwrap();
        assert_eq!(json["data"][0]["name"], "first");
        assert_eq!(json["data"][1]["name"], "second");
    }
}
