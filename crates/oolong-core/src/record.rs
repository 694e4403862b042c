//! The persisted tea record and its identifier rules.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length in characters of a record identifier (12 bytes, hex-encoded).
pub const RECORD_ID_LEN: usize = 24;

/// A tea: the one record kind this API persists.
///
/// The identifier is an opaque 24-hex-char string assigned by the
/// repository on create and immutable afterwards. Create request bodies
/// carry no id; serde defaults it to the empty string, and the repository
/// replaces whatever is there when it assigns one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tea {
    /// Repository-assigned identifier. Empty until the record is created.
    #[serde(default)]
    pub id: String,
    /// Display name, e.g. "Green".
    pub name: String,
    /// Category, e.g. "Unoxidized".
    pub category: String,
}

/// Generates a fresh record identifier.
///
/// Identifiers are the leading 24 hex chars of a UUIDv7, so they keep the
/// document-store object-id shape (12 bytes hex) and sort by creation
/// time.
#[must_use]
pub fn generate_record_id() -> String {
    let mut id = Uuid::now_v7().simple().to_string();
    id.truncate(RECORD_ID_LEN);
    id
}

/// Returns `true` if `id` has the record-identifier shape: exactly 24 hex
/// characters.
#[must_use]
pub fn is_well_formed_record_id(id: &str) -> bool {
    id.len() == RECORD_ID_LEN && id.bytes().all(|b| b.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_well_formed() {
        for _ in 0..32 {
            let id = generate_record_id();
            assert_eq!(id.len(), RECORD_ID_LEN);
            assert!(is_well_formed_record_id(&id), "bad id: {id}");
        }
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = generate_record_id();
        let b = generate_record_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_well_formed_rejects_wrong_length() {
        assert!(!is_well_formed_record_id(""));
        assert!(!is_well_formed_record_id("abc123"));
        assert!(!is_well_formed_record_id(&"a".repeat(25)));
    }

    #[test]
    fn test_well_formed_rejects_non_hex() {
        assert!(!is_well_formed_record_id(&"g".repeat(24)));
        assert!(!is_well_formed_record_id("5f8f8c44b54764421b7156zz"));
    }

    #[test]
    fn test_well_formed_accepts_mixed_case_hex() {
        assert!(is_well_formed_record_id("5F8F8C44B54764421B7156C1"));
        assert!(is_well_formed_record_id("5f8f8c44b54764421b7156c1"));
    }

    #[test]
    fn test_tea_decodes_without_id() {
        let tea: Tea =
            serde_json::from_str(r#"{"name": "Green", "category": "Unoxidized"}"#).unwrap();
        assert!(tea.id.is_empty());
        assert_eq!(tea.name, "Green");
        assert_eq!(tea.category, "Unoxidized");
    }
}
