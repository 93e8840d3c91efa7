// File: src/router.rs
// Purpose: Route table, resolution passes, navigation and hook registration

use std::collections::{HashMap, HashSet};

use crate::active::{ActiveRoute, ActiveRoutes, NOT_FOUND};
use crate::error::RouterError;
use crate::history::{History, MemoryHistory};
use crate::hooks::{Hooks, Intercept, Navigation, NavigationKind};
use crate::location::{hash_path, hash_query_data, resolve_url};
use crate::route::{CompiledRoute, RouteDescriptor};

/// Resolves locations against a table of regex routes
///
/// Every location update runs a full pass over the table: all routes are evaluated, several may
/// be active at once (a layout route next to a content route, say), groups aggregate their
/// members, and unmet sub-group requirements turn the whole pass into `404`.
///
/// # Redirect loops
///
/// A route with `reroute` restarts resolution at its target's push url. Restarts run in a loop
/// on the calling thread and are never checked for cycles: two routes that reroute to each
/// other keep the caller spinning. Route tables must make every reroute chain settle.
///
/// # Examples
///
/// ```
/// use hash_router::{Router, RouteDescriptor};
///
/// let mut router = Router::default();
/// router
///     .register([
///         ("main", RouteDescriptor::new("^/main[/]?$").with_push_url("/#/main")),
///         ("user", RouteDescriptor::new(r"^/(\d+)$").with_base("/users")),
///     ])
///     .unwrap();
///
/// router.update_location("https://x/#/users/42").unwrap();
/// let user = router.active().get("user").unwrap();
/// assert_eq!(user.args, vec!["42"]);
///
/// router.push_route("main").unwrap();
/// assert!(router.active().contains("main"));
/// assert_eq!(router.location(), "https://x/#/main");
/// ```
#[derive(Debug)]
pub struct Router<H: History = MemoryHistory> {
    routes: Vec<CompiledRoute>,
    active: ActiveRoutes,
    location: String,
    history: H,
    hooks: Hooks,
}

impl Default for Router<MemoryHistory> {
    fn default() -> Self {
        Self::new(MemoryHistory::default())
    }
}

impl<H: History> Router<H> {
    /// Creates a router over a history adapter
    ///
    /// The adapter's current location becomes the last-known location. No pass runs until
    /// routes are registered or a location arrives.
    pub fn new(history: H) -> Self {
        let location = history.location();
        Self {
            routes: Vec::new(),
            active: ActiveRoutes::new(),
            location,
            history,
            hooks: Hooks::default(),
        }
    }

    // ========================================================================
    // Route Table
    // ========================================================================

    /// Adds or overwrites routes, then resolves the last-known location
    ///
    /// Every pattern is compiled before the table changes, so an invalid pattern leaves the table
    /// as it was. A re-registered name keeps its position in the table.
    ///
    /// # Errors
    ///
    /// [`RouterError::InvalidPattern`] for a bad regex; otherwise any error of the pass that
    /// follows (see [`update_location`](Self::update_location)).
    pub fn register<I, N>(&mut self, routes: I) -> Result<(), RouterError>
    where
        I: IntoIterator<Item = (N, RouteDescriptor)>,
        N: Into<String>,
    {
        let compiled = routes
            .into_iter()
            .map(|(name, descriptor)| CompiledRoute::compile(name, descriptor))
            .collect::<Result<Vec<_>, _>>()?;

        for route in compiled {
            match self.routes.iter_mut().find(|r| r.name() == route.name()) {
                Some(existing) => *existing = route,
                None => self.routes.push(route),
            }
        }
        tracing::debug!("Route table has {} entries", self.routes.len());

        self.refresh()
    }

    /// Removes routes by name; does not run a pass
    pub fn unregister<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            let name = name.as_ref();
            self.routes.retain(|r| r.name() != name);
        }
    }

    /// Descriptor registered under `name`
    pub fn route(&self, name: &str) -> Option<&RouteDescriptor> {
        self.find(name).map(CompiledRoute::descriptor)
    }

    /// Registered routes in table order
    pub fn routes(&self) -> impl Iterator<Item = (&str, &RouteDescriptor)> {
        self.routes.iter().map(|r| (r.name(), r.descriptor()))
    }

    /// Push url of a registered route
    ///
    /// # Errors
    ///
    /// [`RouterError::UnknownRoute`] or [`RouterError::MissingPushUrl`].
    pub fn push_url(&self, name: &str) -> Result<&str, RouterError> {
        let route = self
            .find(name)
            .ok_or_else(|| RouterError::UnknownRoute(name.to_string()))?;

        route
            .descriptor()
            .push_url
            .as_deref()
            .ok_or_else(|| RouterError::MissingPushUrl(name.to_string()))
    }

    fn find(&self, name: &str) -> Option<&CompiledRoute> {
        self.routes.iter().find(|r| r.name() == name)
    }

    // ========================================================================
    // State Accessors
    // ========================================================================

    /// Handle to the active-route map; stays valid across passes
    pub fn active(&self) -> ActiveRoutes {
        self.active.clone()
    }

    /// Location of the most recent pass
    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut H {
        &mut self.history
    }

    // ========================================================================
    // Hooks
    // ========================================================================
    //
    // Each hook is a single slot. Registering again replaces the previous
    // callback; there is no subscriber list.

    /// Receives push targets instead of the history adapter
    ///
    /// The host becomes responsible for feeding the resulting location back through
    /// [`update_location`](Self::update_location).
    pub fn on_redirect(&mut self, sink: impl FnMut(&str) + 'static) {
        self.hooks.redirect = Some(Box::new(sink));
    }

    /// Receives replace targets (including reroutes) instead of the history adapter
    pub fn on_replace(&mut self, sink: impl FnMut(&str) + 'static) {
        self.hooks.replace = Some(Box::new(sink));
    }

    /// Validates a pass before it is announced
    ///
    /// Runs after successful passes and after `404` passes the fallback left unhandled.
    /// A handled result suppresses the update notification; `Push`/`Replace` results are
    /// navigated to once the pass is over.
    pub fn before_route(&mut self, guard: impl FnMut(&ActiveRoutes) -> Intercept + 'static) {
        self.hooks.before_route = Some(Box::new(guard));
    }

    /// Called with the raw location whenever a pass ends in `404`
    ///
    /// A handled result announces the `404` map right away and skips the pre-route hook.
    pub fn on_not_found(&mut self, handler: impl FnMut(&str) -> Intercept + 'static) {
        self.hooks.not_found = Some(Box::new(handler));
    }

    /// Called after every pass that produced a map worth rendering
    pub fn on_update(&mut self, listener: impl FnMut(&ActiveRoutes) + 'static) {
        self.hooks.update = Some(Box::new(listener));
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Navigates to the push url of `name`, adding a history entry
    pub fn push_route(&mut self, name: &str) -> Result<(), RouterError> {
        let url = self.push_url(name)?.to_string();
        self.dispatch(Navigation::push(url))
    }

    /// Navigates to the push url of `name`, replacing the current entry
    pub fn replace_route(&mut self, name: &str) -> Result<(), RouterError> {
        let url = self.push_url(name)?.to_string();
        self.dispatch(Navigation::replace(url))
    }

    /// Navigates to a raw URL, adding a history entry
    pub fn push(&mut self, url: &str) -> Result<(), RouterError> {
        self.dispatch(Navigation::push(url))
    }

    /// Navigates to a raw URL, replacing the current entry
    pub fn replace(&mut self, url: &str) -> Result<(), RouterError> {
        self.dispatch(Navigation::replace(url))
    }

    // ========================================================================
    // Resolution
    // ========================================================================

    /// Resolves a new location
    ///
    /// This is the entry point for host location-change events. A location the history adapter
    /// is not already at is pushed onto it first. Reroutes and hook navigations that land on the
    /// adapter are resolved before this returns.
    ///
    /// # Errors
    ///
    /// A matched `reroute` that names an unknown route, or a route without a push url.
    ///
    /// # Panics
    ///
    /// If a [`Ref`](std::cell::Ref) from [`ActiveRoutes::borrow`] is still held, since the pass
    /// refills the map in place.
    pub fn update_location(&mut self, location: impl Into<String>) -> Result<(), RouterError> {
        let location = location.into();
        if self.history.location() != location {
            self.history.push(&location);
        }
        self.run(location)
    }

    /// Re-resolves the last-known location
    ///
    /// Useful when something a pre-route hook depends on (a session, a feature flag) changed
    /// while the location did not. Panics under the same condition as
    /// [`update_location`](Self::update_location).
    pub fn refresh(&mut self) -> Result<(), RouterError> {
        let location = self.location.clone();
        self.run(location)
    }

    fn dispatch(&mut self, navigation: Navigation) -> Result<(), RouterError> {
        match self.navigate(navigation) {
            Some(location) => self.run(location),
            None => Ok(()),
        }
    }

    /// Hands a navigation to its sink, or applies it to the history adapter
    ///
    /// Returns the location to resolve next when the adapter took it.
    fn navigate(&mut self, navigation: Navigation) -> Option<String> {
        if let Some(sink) = self.hooks.sink(navigation.kind) {
            tracing::debug!("{:?} {} handed to sink", navigation.kind, navigation.url);
            sink(&navigation.url);
            return None;
        }

        let url = resolve_url(&self.location, &navigation.url);
        match navigation.kind {
            NavigationKind::Push => self.history.push(&url),
            NavigationKind::Replace => self.history.replace(&url),
        }
        Some(self.history.location())
    }

    fn run(&mut self, mut location: String) -> Result<(), RouterError> {
        loop {
            let Some(navigation) = self.resolve(location)? else {
                return Ok(());
            };
            match self.navigate(navigation) {
                Some(next) => location = next,
                None => return Ok(()),
            }
        }
    }

    /// One resolution pass
    ///
    /// Returns the navigation to perform afterwards: a reroute target, or whatever a hook asked
    /// for. The active map only holds a pass's result once the loop over the table finished.
    fn resolve(&mut self, location: String) -> Result<Option<Navigation>, RouterError> {
        self.location = location.clone();
        let path = hash_path(&location);
        tracing::debug!("Resolving {} (hash path {})", location, path);

        self.active.clear();

        let mut required: HashSet<&str> = HashSet::new();
        let mut satisfied: HashSet<&str> = HashSet::new();
        let mut resolved: HashMap<String, ActiveRoute> = HashMap::new();

        for route in self.routes.iter().filter(|r| r.name() != NOT_FOUND) {
            let descriptor = route.descriptor();

            let Some(remainder) = route.remainder(&path) else {
                continue;
            };

            if let Some(label) = descriptor.sub_group.as_deref() {
                required.insert(label);
            }

            let Some(args) = route.captures(remainder) else {
                tracing::trace!("{} does not match {}", route.name(), remainder);
                continue;
            };

            if let Some(target) = descriptor.reroute.as_deref() {
                let url = self.push_url(target)?;
                tracing::debug!("{} reroutes to {} at {}", route.name(), target, url);
                return Ok(Some(Navigation::replace(url)));
            }

            let entry = ActiveRoute {
                name: route.name().to_string(),
                location: location.clone(),
                args,
                search: hash_query_data(&location, route.name()),
            };

            if let Some(group) = descriptor.group.as_deref() {
                resolved
                    .entry(group.to_string())
                    .or_insert_with(|| ActiveRoute {
                        name: group.to_string(),
                        ..entry.clone()
                    });
            }
            resolved.insert(entry.name.clone(), entry);

            if let Some(label) = descriptor.sub_group.as_deref() {
                satisfied.insert(label);
            }
        }

        let unsatisfied = required.iter().any(|label| !satisfied.contains(label));

        if resolved.is_empty() || unsatisfied {
            tracing::debug!("No route for {} (unsatisfied sub-group: {})", location, unsatisfied);
            self.active.replace(HashMap::from([(
                NOT_FOUND.to_string(),
                ActiveRoute::not_found(location.clone()),
            )]));

            if let Some(handler) = self.hooks.not_found.as_mut() {
                let intercept = handler(&location);
                if intercept.is_handled() {
                    self.hooks.notify_update(&self.active);
                    return Ok(intercept.into_navigation());
                }
            }
        } else {
            self.active.replace(resolved);
        }

        if let Some(guard) = self.hooks.before_route.as_mut() {
            let intercept = guard(&self.active);
            if intercept.is_handled() {
                tracing::debug!("Pre-route hook took over {}", location);
                return Ok(intercept.into_navigation());
            }
        }

        self.hooks.notify_update(&self.active);
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_register_keeps_table_position() {
        let mut router = Router::default();
        router
            .register([
                ("a", RouteDescriptor::new("^/a$")),
                ("b", RouteDescriptor::new("^/b$")),
            ])
            .unwrap();
        router
            .register([("a", RouteDescriptor::new("^/aa$"))])
            .unwrap();

        let names: Vec<&str> = router.routes().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(router.route("a").unwrap().match_pattern, "^/aa$");
    }

    #[test]
    fn test_register_is_all_or_nothing() {
        let mut router = Router::default();
        let result = router.register([
            ("good", RouteDescriptor::new("^/good$")),
            ("bad", RouteDescriptor::new("(")),
        ]);

        assert!(matches!(result, Err(RouterError::InvalidPattern { .. })));
        assert_eq!(router.routes().count(), 0);
    }

    #[test]
    fn test_unregister_does_not_resolve() {
        let mut router = Router::default();
        router
            .register([("root", RouteDescriptor::new("^/$"))])
            .unwrap();
        assert!(router.active().contains("root"));

        router.unregister(["root"]);
        assert!(router.route("root").is_none());
        assert!(router.active().contains("root"));

        router.refresh().unwrap();
        assert!(router.active().is_not_found());
    }

    #[test]
    fn test_push_url_errors() {
        let mut router = Router::default();
        router
            .register([("plain", RouteDescriptor::new("^/plain$"))])
            .unwrap();

        assert!(matches!(
            router.push_url("missing"),
            Err(RouterError::UnknownRoute(name)) if name == "missing"
        ));
        assert!(matches!(
            router.push_url("plain"),
            Err(RouterError::MissingPushUrl(name)) if name == "plain"
        ));
    }

    #[test]
    fn test_relative_push_resolves_against_location() {
        let mut router = Router::new(MemoryHistory::new("https://app.test/index.html#/"));
        router.push("#/next").unwrap();
        assert_eq!(router.location(), "https://app.test/index.html#/next");
        assert_eq!(router.history().entries().len(), 2);
    }
}
