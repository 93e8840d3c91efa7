// File: src/location/query.rs
// Purpose: JSON payloads stored in the `?key=value` suffix of the hash fragment

//! The hash fragment may carry its own query, distinct from the traditional URL query that
//! precedes `#`:
//!
//! ```text
//! https://app.test/index.html?ignored=1#/users/7?users=%7B%22tab%22%3A%22posts%22%7D
//!                             ^^^^^^^^^  ^^^^^^^^ ^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^
//!                             never read hash path       hash query (form-urlencoded)
//! ```
//!
//! Each value is a JSON document. Decoding never fails: anything absent or malformed reads as
//! an empty object.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use url::form_urlencoded;

use super::{hash_path, split_fragment, split_hash_query, ROOT_PATH};

/// Reads the JSON payload stored under `key` in the hash query of `location`
///
/// Returns an empty JSON object when the fragment has no query, the key is absent, or its value
/// is not valid JSON.
///
/// # Examples
///
/// ```
/// use hash_router::location::hash_query_data;
/// use serde_json::json;
///
/// let location = "https://x/#/main?main=%7B%22a%22%3A1%7D";
/// assert_eq!(hash_query_data(location, "main"), json!({"a": 1}));
/// assert_eq!(hash_query_data(location, "other"), json!({}));
/// assert_eq!(hash_query_data("https://x/#/main?main=not-json", "main"), json!({}));
/// ```
pub fn hash_query_data(location: &str, key: &str) -> Value {
    hash_query_value(location, key).unwrap_or_else(|| Value::Object(Map::new()))
}

/// Typed variant of [`hash_query_data`]
///
/// Returns `None` instead of an empty object when the value is absent or does not deserialize
/// into `T`.
///
/// ```
/// use hash_router::location::hash_query_value;
///
/// let page: Option<u32> = hash_query_value("https://x/#/list?page=3", "page");
/// assert_eq!(page, Some(3));
/// ```
pub fn hash_query_value<T: DeserializeOwned>(location: &str, key: &str) -> Option<T> {
    let path = hash_path(location);
    let query = split_hash_query(&path).1?;

    let raw = form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == key)
        .map(|(_, v)| v)?;

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::trace!("Ignoring malformed hash query value for {}: {}", key, e);
            None
        }
    }
}

/// Stores `value` as JSON under `key` in the hash query of `location`
///
/// Other keys keep their position and their exact encoding. If `key` appears more than once,
/// the first occurrence takes the new value and the rest are dropped. A fragment without a
/// query gains one; a location without a fragment gains `#/?key=...`.
///
/// Fails only when `value` cannot be serialized to JSON.
///
/// # Examples
///
/// ```
/// use hash_router::location::{hash_query_data, replace_hash_query_data};
/// use serde_json::json;
///
/// let location = replace_hash_query_data("https://x/#/main?other=1", "main", &json!({"a": 1})).unwrap();
/// assert!(location.starts_with("https://x/#/main?other=1&main="));
/// assert_eq!(hash_query_data(&location, "main"), json!({"a": 1}));
/// ```
pub fn replace_hash_query_data<T>(
    location: &str,
    key: &str,
    value: &T,
) -> Result<String, serde_json::Error>
where
    T: Serialize + ?Sized,
{
    let encoded = serde_json::to_string(value)?;
    let entry = form_urlencoded::Serializer::new(String::new())
        .append_pair(key, &encoded)
        .finish();

    let (head, fragment) = split_fragment(location);
    let (path, query) = match fragment {
        Some(fragment) => split_hash_query(fragment),
        None => (ROOT_PATH, None),
    };

    let mut replaced = false;
    let mut pairs: Vec<&str> = Vec::new();
    for raw in query.unwrap_or("").split('&').filter(|s| !s.is_empty()) {
        if pair_key(raw).as_deref() == Some(key) {
            if !replaced {
                pairs.push(&entry);
                replaced = true;
            }
        } else {
            pairs.push(raw);
        }
    }
    if !replaced {
        pairs.push(&entry);
    }

    Ok(format!("{}#{}?{}", head, path, pairs.join("&")))
}

/// Decoded key of a single raw `key=value` pair
fn pair_key(raw: &str) -> Option<String> {
    form_urlencoded::parse(raw.as_bytes())
        .next()
        .map(|(k, _)| k.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_decode_missing_query() {
        assert_eq!(hash_query_data("https://x/#/main", "main"), json!({}));
        assert_eq!(hash_query_data("https://x/", "main"), json!({}));
    }

    #[test]
    fn test_decode_ignores_traditional_query() {
        let location = "https://x/?main=%7B%22a%22%3A1%7D#/main";
        assert_eq!(hash_query_data(location, "main"), json!({}));
    }

    #[test]
    fn test_decode_first_occurrence_wins() {
        let location = "https://x/#/main?k=1&k=2";
        assert_eq!(hash_query_data(location, "k"), json!(1));
    }

    #[test]
    fn test_decode_malformed_json_is_empty_object() {
        assert_eq!(hash_query_data("https://x/#/m?k=%7Bbroken", "k"), json!({}));
        assert_eq!(hash_query_data("https://x/#/m?k=", "k"), json!({}));
    }

    #[test]
    fn test_encode_creates_query() {
        let location = replace_hash_query_data("https://x/#/main", "k", &json!(true)).unwrap();
        assert_eq!(location, "https://x/#/main?k=true");
    }

    #[test]
    fn test_encode_creates_fragment() {
        let location = replace_hash_query_data("https://x/app", "k", &json!(1)).unwrap();
        assert_eq!(location, "https://x/app#/?k=1");
        assert_eq!(hash_query_data(&location, "k"), json!(1));
    }

    #[test]
    fn test_encode_preserves_other_pairs_verbatim() {
        let location =
            replace_hash_query_data("https://x/#/main?a=%20x&k=1&b=y+z&k=2", "k", &json!([1, 2]))
                .unwrap();
        assert_eq!(location, "https://x/#/main?a=%20x&k=%5B1%2C2%5D&b=y+z");
    }

    #[test]
    fn test_encode_keeps_traditional_query() {
        let location =
            replace_hash_query_data("https://x/page?tab=1#/main", "k", &json!("v")).unwrap();
        assert_eq!(location, "https://x/page?tab=1#/main?k=%22v%22");
    }

    #[test]
    fn test_typed_value() {
        #[derive(Debug, PartialEq, serde::Deserialize)]
        struct Filter {
            page: u32,
        }

        let location = "https://x/#/list?list=%7B%22page%22%3A4%7D";
        assert_eq!(
            hash_query_value::<Filter>(location, "list"),
            Some(Filter { page: 4 })
        );
        assert_eq!(hash_query_value::<Filter>(location, "missing"), None);
    }
}
