//! # hash-router
//!
//! A fragment ("hash") routing engine. Locations go in, a map of active routes comes out:
//! - Regex routes (`^/users/(\d+)$`) with positional capture args
//! - Literal `base` prefixes stripped before matching
//! - Exclude patterns
//! - Groups: synthetic aggregate routes active alongside their members
//! - Sub-groups: labels that at least one route in scope must satisfy, or the pass is `404`
//! - Reroutes: matching a route restarts resolution at another route's push url
//! - JSON payloads in the hash query (`#/users/7?users=%7B...%7D`)
//!
//! Patterns see the whole fragment, hash query included, so a route that accepts a payload
//! must allow for it (`^/main/?(?:\?.*)?$` rather than `^/main/?$`).
//!
//! ## Resolution
//!
//! Matching is exhaustive and flat. Every registered route is evaluated on every pass, and any
//! number of them can be active at once. A pass either yields the matched routes (plus their
//! groups) or the single reserved [`NOT_FOUND`] entry, never a mix.
//!
//! ## Host integration
//!
//! The router drives a [`History`] adapter for navigations and exposes its state through an
//! [`ActiveRoutes`] handle that is refilled in place. Render layers compare old and new entries
//! with [`has_changed`]. Everything runs synchronously on the caller's thread.
//!
//! ## Example
//!
//! ```
//! use hash_router::{Router, RouteDescriptor};
//! use serde_json::json;
//!
//! let mut router = Router::default();
//! router
//!     .register([
//!         ("layout", RouteDescriptor::new("^/")),
//!         ("main", RouteDescriptor::new(r"^/main/?(?:\?.*)?$").with_push_url("/#/main")),
//!     ])
//!     .unwrap();
//!
//! router.update_location("https://x/#/main?main=%7B%22tab%22%3A2%7D").unwrap();
//!
//! let active = router.active();
//! assert_eq!(active.names(), vec!["layout", "main"]);
//! assert_eq!(active.get("main").unwrap().search, json!({"tab": 2}));
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

mod active;
pub mod config;
mod error;
mod history;
mod hooks;
pub mod location;
pub mod route;
mod router;

// Re-export public types
pub use active::{has_changed, ActiveRoute, ActiveRoutes, NOT_FOUND};
pub use config::{RouteEntry, RouterSettings, RoutesFile};
pub use error::{ConfigError, RouterError};
pub use history::{History, MemoryHistory};
pub use hooks::{
    FallbackHandler, Intercept, Navigation, NavigationKind, NavigationSink, RouteGuard,
    UpdateListener,
};
pub use location::{hash_path, hash_query_data, hash_query_value, replace_hash_query_data};
pub use route::{CompiledRoute, RouteDescriptor};
pub use router::Router;
