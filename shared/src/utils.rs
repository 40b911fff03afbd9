//! # Shared Utility Functions
//!
//! Serde helpers for fields the service does not type consistently.

use serde::de::{self, Deserializer, Visitor};
use std::fmt;

/// Deserialize a field that may arrive as a JSON string or a JSON integer
/// into a `String`.
///
/// # Examples
///
/// ```rust
/// use serde::Deserialize;
/// use shared::utils::string_or_number;
///
/// #[derive(Deserialize)]
/// struct User {
///     #[serde(deserialize_with = "string_or_number")]
///     id: String,
/// }
///
/// let a: User = serde_json::from_str(r#"{"id": 12}"#).unwrap();
/// let b: User = serde_json::from_str(r#"{"id": "12"}"#).unwrap();
/// assert_eq!(a.id, b.id);
/// ```
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct StringOrNumber;

    impl<'de> Visitor<'de> for StringOrNumber {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a string or an integer")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }
    }

    deserializer.deserialize_any(StringOrNumber)
}
