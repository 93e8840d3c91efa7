// File: src/active.rs
// Purpose: Resolution results, the shared active-route map, and change detection

use std::cell::{Ref, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Reserved name of the synthetic not-found route
pub const NOT_FOUND: &str = "404";

/// One entry of the active-route map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveRoute {
    /// Route (or group) name
    pub name: String,
    /// Full location the pass was evaluated against
    pub location: String,
    /// Capture groups of the match pattern, in order
    pub args: Vec<String>,
    /// JSON payload read from the hash query under the route's name
    pub search: Value,
}

impl ActiveRoute {
    /// The synthetic `404` entry for `location`
    pub fn not_found(location: impl Into<String>) -> Self {
        Self {
            name: NOT_FOUND.to_string(),
            location: location.into(),
            args: Vec::new(),
            search: Value::Object(Map::new()),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.name == NOT_FOUND
    }
}

/// Shared handle to the active-route map
///
/// Every clone points at the same map. The router clears and refills it in place on each
/// resolution pass, so a handle taken once keeps observing the latest state without being
/// fetched again.
///
/// # Examples
///
/// ```
/// use hash_router::{Router, RouteDescriptor};
///
/// let mut router = Router::default();
/// let active = router.active();
///
/// router
///     .register([("main", RouteDescriptor::new("^/main$"))])
///     .unwrap();
/// router.update_location("https://x/#/main").unwrap();
///
/// assert!(active.contains("main"));
/// assert!(active.ptr_eq(&router.active()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ActiveRoutes {
    inner: Rc<RefCell<HashMap<String, ActiveRoute>>>,
}

impl ActiveRoutes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the entry for `name`
    pub fn get(&self, name: &str) -> Option<ActiveRoute> {
        self.inner.borrow().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inner.borrow().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    /// True when the map holds the synthetic `404` entry
    pub fn is_not_found(&self) -> bool {
        self.contains(NOT_FOUND)
    }

    /// Active names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.inner.borrow().keys().cloned().collect();
        names.sort();
        names
    }

    /// Borrows the underlying map
    ///
    /// The borrow must be released before the router runs another pass.
    pub fn borrow(&self) -> Ref<'_, HashMap<String, ActiveRoute>> {
        self.inner.borrow()
    }

    /// Copies the current map out of the handle
    pub fn snapshot(&self) -> HashMap<String, ActiveRoute> {
        self.inner.borrow().clone()
    }

    /// True when both handles share the same map
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn clear(&self) {
        self.inner.borrow_mut().clear();
    }

    /// Replaces the contents in place; the allocation (and every handle) is kept
    pub(crate) fn replace(&self, entries: HashMap<String, ActiveRoute>) {
        let mut map = self.inner.borrow_mut();
        map.clear();
        map.extend(entries);
    }
}

/// Decides whether a render layer should refresh for a route
///
/// Returns true when there is no previous result, when the args differ element-wise, or when the
/// search payloads differ by value (object key order is irrelevant). Location changes alone do
/// not count.
///
/// # Examples
///
/// ```
/// use hash_router::{has_changed, ActiveRoute};
/// use serde_json::json;
///
/// let route = ActiveRoute {
///     name: "user".to_string(),
///     location: "https://x/#/user/1".to_string(),
///     args: vec!["1".to_string()],
///     search: json!({}),
/// };
///
/// assert!(has_changed(None, &route));
/// assert!(!has_changed(Some(&route), &route));
///
/// let next = ActiveRoute { args: vec!["2".to_string()], ..route.clone() };
/// assert!(has_changed(Some(&route), &next));
/// ```
pub fn has_changed(previous: Option<&ActiveRoute>, current: &ActiveRoute) -> bool {
    match previous {
        None => true,
        Some(previous) => previous.args != current.args || previous.search != current.search,
    }
}
