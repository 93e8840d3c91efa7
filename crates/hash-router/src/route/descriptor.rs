//! Route descriptors: the registered configuration for one route
//!
//! A descriptor is plain data. It derives `Serialize`/`Deserialize` so route tables can live in
//! TOML files, and it carries builder methods for declaring routes in code. Patterns are compiled
//! when the descriptor is registered (see [`CompiledRoute`](super::CompiledRoute)).

use serde::{Deserialize, Serialize};

/// Registered configuration for a single route
///
/// # Examples
///
/// ```
/// use hash_router::RouteDescriptor;
///
/// let route = RouteDescriptor::new(r"^/(\d+)[/]?$")
///     .with_base("/users")
///     .with_push_url("/#/users/1")
///     .with_group("users")
///     .with_sub_group("users.detail");
///
/// assert_eq!(route.base, "/users");
/// assert_eq!(route.group.as_deref(), Some("users"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDescriptor {
    /// Regex tested against the hash path with `base` stripped; capture groups become args
    #[serde(rename = "match")]
    pub match_pattern: String,
    /// Regex that, when it matches the remainder, skips the route entirely
    #[serde(rename = "exclude", default, skip_serializing_if = "Option::is_none")]
    pub exclude_pattern: Option<String>,
    /// Target used by navigation-by-name (absolute or relative URL)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub push_url: Option<String>,
    /// Synthetic aggregate route activated alongside this one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Label that at least one route in scope must satisfy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_group: Option<String>,
    /// Literal prefix required on the hash path and stripped before matching
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub base: String,
    /// Route whose push url replaces the location when this route matches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reroute: Option<String>,
    /// Flag for pre-route validators; the engine does not read it
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub requires_auth: bool,
}

impl RouteDescriptor {
    /// Creates a descriptor with the given match pattern and no other options
    pub fn new(match_pattern: impl Into<String>) -> Self {
        Self {
            match_pattern: match_pattern.into(),
            ..Self::default()
        }
    }

    // ========================================================================
    // Builder Methods
    // ========================================================================

    /// Sets the exclude pattern
    pub fn with_exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_pattern = Some(pattern.into());
        self
    }

    /// Sets the push url used by [`Router::push_route`](crate::Router::push_route)
    pub fn with_push_url(mut self, url: impl Into<String>) -> Self {
        self.push_url = Some(url.into());
        self
    }

    /// Sets the aggregate group name
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Sets the sub-group label
    pub fn with_sub_group(mut self, label: impl Into<String>) -> Self {
        self.sub_group = Some(label.into());
        self
    }

    /// Sets the base prefix
    ///
    /// The base is literal text, not a regex: `with_base("/a.b")` only matches paths that start
    /// with exactly `/a.b`.
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = base.into();
        self
    }

    /// Redirects matches of this route to the push url of `target`
    pub fn with_reroute(mut self, target: impl Into<String>) -> Self {
        self.reroute = Some(target.into());
        self
    }

    /// Marks the route for validators that check authentication
    pub fn with_requires_auth(mut self, requires_auth: bool) -> Self {
        self.requires_auth = requires_auth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builder_sets_fields() {
        let route = RouteDescriptor::new("^/a$")
            .with_exclude("^/a/b")
            .with_push_url("/#/a")
            .with_group("g")
            .with_sub_group("s")
            .with_base("/x")
            .with_reroute("other")
            .with_requires_auth(true);

        assert_eq!(
            route,
            RouteDescriptor {
                match_pattern: "^/a$".to_string(),
                exclude_pattern: Some("^/a/b".to_string()),
                push_url: Some("/#/a".to_string()),
                group: Some("g".to_string()),
                sub_group: Some("s".to_string()),
                base: "/x".to_string(),
                reroute: Some("other".to_string()),
                requires_auth: true,
            }
        );
    }

    #[test]
    fn test_deserialize_minimal() {
        let route: RouteDescriptor = toml::from_str(r#"match = "^/main[/]?$""#).unwrap();
        assert_eq!(route, RouteDescriptor::new("^/main[/]?$"));
    }

    #[test]
    fn test_deserialize_requires_match() {
        let result: Result<RouteDescriptor, _> = toml::from_str(r#"push_url = "/#/a""#);
        assert!(result.is_err());
    }
}
