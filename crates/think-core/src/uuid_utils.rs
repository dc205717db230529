//! UUID v4 utilities for record identifiers.
//!
//! Record ids are generated on the client before the first save, so the
//! front end can address a note (`/n/{id}`) before the server knows it.
//! Every read and delete validates the id locally first.
//!
//! Only the canonical hyphenated form is accepted:
//!
//! ```text
//! xxxxxxxx-xxxx-4xxx-Vxxx-xxxxxxxxxxxx    V ∈ {8, 9, a, b}
//! ```

use uuid::{Uuid, Variant, Version};

/// Length of the canonical hyphenated representation.
const HYPHENATED_LEN: usize = 36;

/// Generate a new random UUID v4 for a record.
///
/// # Example
///
/// ```
/// use think_core::uuid_utils::{generate_uuid, is_uuid};
///
/// let id = generate_uuid();
/// assert!(is_uuid(&id.to_string()));
/// ```
#[inline]
pub fn generate_uuid() -> Uuid {
    Uuid::new_v4()
}

/// Parse a string that is syntactically a version-4 UUID.
///
/// Simple (unhyphenated), braced and URN forms are rejected even though the
/// `uuid` crate would parse them: ids travel in URL paths and must match
/// what the server routes on.
pub fn parse_v4(value: &str) -> Option<Uuid> {
    if value.len() != HYPHENATED_LEN {
        return None;
    }
    let id = Uuid::try_parse(value).ok()?;
    if id.get_version() != Some(Version::Random) || id.get_variant() != Variant::RFC4122 {
        return None;
    }
    Some(id)
}

/// Whether a string is syntactically a version-4 UUID.
#[inline]
pub fn is_uuid(value: &str) -> bool {
    parse_v4(value).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_valid() {
        for _ in 0..100 {
            let id = generate_uuid();
            assert!(is_uuid(&id.to_string()), "{} should be a v4 uuid", id);
        }
    }

    #[test]
    fn test_accepts_lowercase_v4() {
        assert!(is_uuid("686d15bd-9f78-4e9a-ad3e-a517384302e9"));
    }

    #[test]
    fn test_accepts_uppercase_v4() {
        assert!(is_uuid("686D15BD-9F78-4E9A-AD3E-A517384302E9"));
    }

    #[test]
    fn test_rejects_other_versions() {
        // v1
        assert!(!is_uuid("c232ab00-9414-11ec-b3c8-9f6bdeced846"));
        // v7
        assert!(!is_uuid("018f3c5e-7b7a-7cc0-9a3e-2b1f5d6c7e80"));
    }

    #[test]
    fn test_rejects_nil() {
        assert!(!is_uuid(&Uuid::nil().to_string()));
    }

    #[test]
    fn test_rejects_wrong_variant() {
        // Variant nibble 'c' is Microsoft, not RFC 4122
        assert!(!is_uuid("686d15bd-9f78-4e9a-cd3e-a517384302e9"));
    }

    #[test]
    fn test_rejects_non_canonical_forms() {
        assert!(!is_uuid("686d15bd9f784e9aad3ea517384302e9"));
        assert!(!is_uuid("{686d15bd-9f78-4e9a-ad3e-a517384302e9}"));
        assert!(!is_uuid("urn:uuid:686d15bd-9f78-4e9a-ad3e-a517384302e9"));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(!is_uuid(""));
        assert!(!is_uuid("new"));
        assert!(!is_uuid("not-a-uuid"));
        assert!(!is_uuid("686d15bd-9f78-4e9a-ad3e-a517384302eZ"));
        assert!(!is_uuid(" 686d15bd-9f78-4e9a-ad3e-a517384302e"));
    }

    #[test]
    fn test_parse_v4_returns_same_id() {
        let id = generate_uuid();
        assert_eq!(parse_v4(&id.to_string()), Some(id));
    }
}
