//! Route module: descriptors and their compiled matchers
//!
//! - `descriptor` holds the plain, serializable route configuration
//! - `CompiledRoute` pairs a descriptor with its compiled regexes and implements the per-route
//!   steps of a resolution pass (base check, exclusion, capture)

use regex::Regex;

use crate::active::NOT_FOUND;
use crate::error::RouterError;

pub mod descriptor;

pub use descriptor::RouteDescriptor;

/// A registered route: its name, descriptor, and compiled patterns
#[derive(Debug, Clone)]
pub struct CompiledRoute {
    name: String,
    descriptor: RouteDescriptor,
    matcher: Regex,
    exclude: Option<Regex>,
}

impl CompiledRoute {
    /// Compiles the descriptor's patterns
    ///
    /// # Errors
    ///
    /// [`RouterError::InvalidPattern`] when the match or exclude pattern is not a valid regex,
    /// [`RouterError::ReservedGroup`] when the group is the reserved `404` name.
    pub fn compile(name: impl Into<String>, descriptor: RouteDescriptor) -> Result<Self, RouterError> {
        let name = name.into();
        if descriptor.group.as_deref() == Some(NOT_FOUND) {
            return Err(RouterError::ReservedGroup(name));
        }
        let matcher = compile_pattern(&name, &descriptor.match_pattern)?;
        let exclude = descriptor
            .exclude_pattern
            .as_deref()
            .map(|pattern| compile_pattern(&name, pattern))
            .transpose()?;

        Ok(Self {
            name,
            descriptor,
            matcher,
            exclude,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn descriptor(&self) -> &RouteDescriptor {
        &self.descriptor
    }

    /// Returns the part of `hash_path` this route matches against
    ///
    /// `None` when the path lies outside the route's base, or when the exclude pattern matches
    /// what is left. Callers skip the route entirely (sub-group bookkeeping included) on `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use hash_router::{CompiledRoute, RouteDescriptor};
    ///
    /// let route = CompiledRoute::compile(
    ///     "detail",
    ///     RouteDescriptor::new(r"^/(\d+)$").with_base("/users").with_exclude("^/0$"),
    /// ).unwrap();
    ///
    /// assert_eq!(route.remainder("/users/7"), Some("/7"));
    /// assert_eq!(route.remainder("/users/0"), None);
    /// assert_eq!(route.remainder("/teams/7"), None);
    /// ```
    pub fn remainder<'a>(&self, hash_path: &'a str) -> Option<&'a str> {
        let remainder = hash_path.strip_prefix(self.descriptor.base.as_str())?;

        match &self.exclude {
            Some(exclude) if exclude.is_match(remainder) => None,
            _ => Some(remainder),
        }
    }

    /// Runs the match pattern against a remainder and returns the positional args
    ///
    /// Args are the capture groups in order; a group that did not take part in the match yields
    /// an empty string so positions stay stable.
    ///
    /// ```
    /// use hash_router::{CompiledRoute, RouteDescriptor};
    ///
    /// let route = CompiledRoute::compile("post", RouteDescriptor::new(r"^/(\w+)(?:/(\d+))?$")).unwrap();
    ///
    /// assert_eq!(route.captures("/news/12"), Some(vec!["news".to_string(), "12".to_string()]));
    /// assert_eq!(route.captures("/news"), Some(vec!["news".to_string(), String::new()]));
    /// assert_eq!(route.captures("/"), None);
    /// ```
    pub fn captures(&self, remainder: &str) -> Option<Vec<String>> {
        let captures = self.matcher.captures(remainder)?;

        Some(
            captures
                .iter()
                .skip(1)
                .map(|group| group.map(|m| m.as_str().to_string()).unwrap_or_default())
                .collect(),
        )
    }
}

fn compile_pattern(name: &str, pattern: &str) -> Result<Regex, RouterError> {
    Regex::new(pattern).map_err(|source| RouterError::InvalidPattern {
        name: name.to_string(),
        pattern: pattern.to_string(),
        source,
    })
}
