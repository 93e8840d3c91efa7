// File: src/hooks.rs
// Purpose: Single-slot callback hooks and the values they hand back to the router

use crate::active::ActiveRoutes;

/// What a hook tells the router after it ran
///
/// Hooks cannot call back into the router that is invoking them. A hook that wants to navigate
/// returns [`Intercept::Push`] or [`Intercept::Replace`] and the router performs the navigation
/// once the current pass has finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intercept {
    /// Not handled; the pass continues normally
    Continue,
    /// Handled by the hook
    Handled,
    /// Handled; push `url` after the pass
    Push(String),
    /// Handled; replace with `url` after the pass
    Replace(String),
}

impl Intercept {
    pub fn is_handled(&self) -> bool {
        !matches!(self, Intercept::Continue)
    }

    pub(crate) fn into_navigation(self) -> Option<Navigation> {
        match self {
            Intercept::Continue | Intercept::Handled => None,
            Intercept::Push(url) => Some(Navigation::push(url)),
            Intercept::Replace(url) => Some(Navigation::replace(url)),
        }
    }
}

impl From<bool> for Intercept {
    fn from(handled: bool) -> Self {
        if handled {
            Intercept::Handled
        } else {
            Intercept::Continue
        }
    }
}

/// Kind of navigation: adds a history entry or replaces the current one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationKind {
    Push,
    Replace,
}

/// A navigation request waiting to be applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub kind: NavigationKind,
    pub url: String,
}

impl Navigation {
    pub fn push(url: impl Into<String>) -> Self {
        Self {
            kind: NavigationKind::Push,
            url: url.into(),
        }
    }

    pub fn replace(url: impl Into<String>) -> Self {
        Self {
            kind: NavigationKind::Replace,
            url: url.into(),
        }
    }
}

/// Receives push or replace targets instead of the router's history adapter
pub type NavigationSink = Box<dyn FnMut(&str)>;

/// Runs before a successful pass is announced; may veto or redirect it
pub type RouteGuard = Box<dyn FnMut(&ActiveRoutes) -> Intercept>;

/// Runs when a pass ends in `404`; receives the raw location
pub type FallbackHandler = Box<dyn FnMut(&str) -> Intercept>;

/// Notified after a pass produced a new active map
pub type UpdateListener = Box<dyn FnMut(&ActiveRoutes)>;

/// The router's hook slots
///
/// Every slot holds at most one callback; setting a slot drops whatever was there.
#[derive(Default)]
pub(crate) struct Hooks {
    pub(crate) redirect: Option<NavigationSink>,
    pub(crate) replace: Option<NavigationSink>,
    pub(crate) before_route: Option<RouteGuard>,
    pub(crate) not_found: Option<FallbackHandler>,
    pub(crate) update: Option<UpdateListener>,
}

impl Hooks {
    pub(crate) fn sink(&mut self, kind: NavigationKind) -> Option<&mut NavigationSink> {
        match kind {
            NavigationKind::Push => self.redirect.as_mut(),
            NavigationKind::Replace => self.replace.as_mut(),
        }
    }

    pub(crate) fn notify_update(&mut self, active: &ActiveRoutes) {
        if let Some(listener) = self.update.as_mut() {
            listener(active);
        }
    }
}

impl std::fmt::Debug for Hooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hooks")
            .field("redirect", &self.redirect.is_some())
            .field("replace", &self.replace.is_some())
            .field("before_route", &self.before_route.is_some())
            .field("not_found", &self.not_found.is_some())
            .field("update", &self.update.is_some())
            .finish()
    }
}
