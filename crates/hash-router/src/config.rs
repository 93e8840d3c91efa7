// File: src/config.rs
// Purpose: Route tables declared in TOML files

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::history::MemoryHistory;
use crate::route::RouteDescriptor;

/// A route file
///
/// ```toml
/// [router]
/// initial_location = "https://app.test/"
///
/// [[route]]
/// name = "main"
/// match = "^/main[/]?$"
/// push_url = "/#/main"
/// group = "layout"
///
/// [[route]]
/// name = "user"
/// base = "/users"
/// match = '^/(\d+)$'
/// ```
///
/// Routes keep their file order, which decides the first writer of each group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoutesFile {
    #[serde(default)]
    pub router: RouterSettings,
    #[serde(default, rename = "route")]
    pub routes: Vec<RouteEntry>,
}

/// `[router]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouterSettings {
    /// Location a headless router starts at
    #[serde(default = "default_initial_location")]
    pub initial_location: String,
}

/// One `[[route]]` entry: a name plus the descriptor fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteEntry {
    pub name: String,
    #[serde(flatten)]
    pub descriptor: RouteDescriptor,
}

fn default_initial_location() -> String {
    MemoryHistory::DEFAULT_LOCATION.into()
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self {
            initial_location: default_initial_location(),
        }
    }
}

impl RoutesFile {
    /// Loads and parses a route file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file: Self = contents.parse()?;

        tracing::debug!("Loaded {} routes from {}", file.routes.len(), path.display());
        Ok(file)
    }

    /// `(name, descriptor)` pairs in file order, ready for [`Router::register`](crate::Router::register)
    pub fn into_routes(self) -> impl Iterator<Item = (String, RouteDescriptor)> {
        self.routes
            .into_iter()
            .map(|entry| (entry.name, entry.descriptor))
    }
}

impl FromStr for RoutesFile {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"
[router]
initial_location = "https://app.test/"

[[route]]
name = "main"
match = "^/main[/]?$"
push_url = "/#/main"
group = "layout"

[[route]]
name = "user"
base = "/users"
match = '^/(\d+)$'
sub_group = "users"
requires_auth = true
"#;

    #[test]
    fn test_parse_sample() {
        let file: RoutesFile = SAMPLE.parse().unwrap();
        assert_eq!(file.router.initial_location, "https://app.test/");

        let routes: Vec<(String, RouteDescriptor)> = file.into_routes().collect();
        assert_eq!(
            routes,
            vec![
                (
                    "main".to_string(),
                    RouteDescriptor::new("^/main[/]?$")
                        .with_push_url("/#/main")
                        .with_group("layout")
                ),
                (
                    "user".to_string(),
                    RouteDescriptor::new(r"^/(\d+)$")
                        .with_base("/users")
                        .with_sub_group("users")
                        .with_requires_auth(true)
                ),
            ]
        );
    }

    #[test]
    fn test_defaults() {
        let file: RoutesFile = "".parse().unwrap();
        assert_eq!(file, RoutesFile::default());
        assert_eq!(file.router.initial_location, MemoryHistory::DEFAULT_LOCATION);
    }

    #[test]
    fn test_parse_error() {
        let result: Result<RoutesFile, _> = "[[route]]\nname = 1".parse();
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = RoutesFile::load_from("/definitely/not/here/routes.toml");
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
