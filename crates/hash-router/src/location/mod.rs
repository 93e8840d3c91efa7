//! Location utilities for fragment extraction and URL resolution
//!
//! All functions are **pure**: given same input, always produce same output with no side effects.
//!
//! A location is a full URL-like string such as `https://app.test/index.html?x=1#/users/7?user=%7B%7D`.
//! Only the part after `#` (the *hash path*) takes part in routing; scheme, host, path and the
//! traditional `?query` before the fragment are ignored.

use std::borrow::Cow;

use url::Url;

pub mod query;
pub use query::{hash_query_data, hash_query_value, replace_hash_query_data};

/// Hash path used when a location has no fragment (or an empty one)
pub const ROOT_PATH: &str = "/";

/// Extracts the hash path from a location
///
/// The fragment is normalized the same way a browser normalizes `location.hash` (a space reads
/// as `%20`). Strings that are not absolute URLs (`/#/about`, `#/about`) have the text after
/// their first `#` normalized against a placeholder base, so both forms match alike.
///
/// # Examples
///
/// ```
/// use hash_router::location::hash_path;
///
/// assert_eq!(hash_path("https://app.test/#/users/7"), "/users/7");
/// assert_eq!(hash_path("https://app.test/#"), "/");
/// assert_eq!(hash_path("https://app.test/"), "/");
/// assert_eq!(hash_path("/#/about"), "/about");
/// assert_eq!(hash_path("/#/a b"), hash_path("https://app.test/#/a b"));
/// ```
pub fn hash_path(location: &str) -> Cow<'_, str> {
    let fragment = match Url::parse(location) {
        Ok(url) => url.fragment().map(|f| Cow::Owned(f.to_string())),
        Err(_) => split_fragment(location).1.map(normalize_fragment),
    };

    match fragment {
        Some(f) if !f.is_empty() => f,
        _ => Cow::Borrowed(ROOT_PATH),
    }
}

/// Base that relative fragments are joined onto for normalization
const PLACEHOLDER_BASE: &str = "http://localhost/";

/// Normalizes a raw fragment as `Url` would inside an absolute URL; kept as given on failure
fn normalize_fragment(raw: &str) -> Cow<'_, str> {
    Url::parse(PLACEHOLDER_BASE)
        .and_then(|base| base.join(&format!("#{}", raw)))
        .ok()
        .and_then(|url| url.fragment().map(str::to_string))
        .map_or(Cow::Borrowed(raw), Cow::Owned)
}

/// Splits a raw location at its first `#`
///
/// Returns the part before the marker and the fragment (without `#`), if any.
/// Unlike [`hash_path`] this performs no normalization, which keeps string rebuilding lossless.
pub fn split_fragment(location: &str) -> (&str, Option<&str>) {
    match location.split_once('#') {
        Some((head, fragment)) => (head, Some(fragment)),
        None => (location, None),
    }
}

/// Splits a hash path at its first `?` into the path and the hash query
///
/// # Examples
///
/// ```
/// use hash_router::location::split_hash_query;
///
/// assert_eq!(split_hash_query("/users?page=2"), ("/users", Some("page=2")));
/// assert_eq!(split_hash_query("/users"), ("/users", None));
/// ```
pub fn split_hash_query(hash_path: &str) -> (&str, Option<&str>) {
    match hash_path.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (hash_path, None),
    }
}

/// Resolves a navigation target against the current location
///
/// Absolute targets are returned unchanged; relative ones (`/#/main/1`, `#/x`) are joined onto
/// the current location the way a browser resolves `location.href = target`. When the current
/// location is not an absolute URL the target is returned as given.
pub fn resolve_url(current: &str, target: &str) -> String {
    Url::parse(current)
        .and_then(|base| base.join(target))
        .map(String::from)
        .unwrap_or_else(|_| target.to_string())
}
