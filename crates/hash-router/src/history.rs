//! Host adapters: where navigations land
//!
//! The router is handed a [`History`] at construction. Navigations that are not captured by a
//! sink hook are applied to it, and the router then resolves the adapter's new location.
//!
//! Location changes that originate in the host (back button, edited address bar) are the host's
//! to observe: it forwards them with [`Router::update_location`](crate::Router::update_location).

/// Capability the router needs from a host environment
pub trait History {
    /// Current full location
    fn location(&self) -> String;

    /// Navigates to `url`, adding a history entry
    fn push(&mut self, url: &str);

    /// Navigates to `url`, replacing the current history entry
    fn replace(&mut self, url: &str);
}

/// In-memory history stack
///
/// Used for headless hosts and tests: it records every entry and supports moving back and
/// forward. The router passes absolute URLs when it can resolve them; anything else is stored
/// as given.
///
/// # Examples
///
/// ```
/// use hash_router::{History, MemoryHistory};
///
/// let mut history = MemoryHistory::new("https://x/#/a");
/// history.push("https://x/#/b");
/// history.replace("https://x/#/c");
///
/// assert_eq!(history.entries(), ["https://x/#/a", "https://x/#/c"]);
/// assert_eq!(history.back().as_deref(), Some("https://x/#/a"));
/// assert_eq!(history.forward().as_deref(), Some("https://x/#/c"));
/// ```
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<String>,
    index: usize,
}

impl MemoryHistory {
    /// Location used by [`MemoryHistory::default`]
    pub const DEFAULT_LOCATION: &'static str = "http://localhost/";

    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            entries: vec![initial.into()],
            index: 0,
        }
    }

    /// All recorded entries, oldest first
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Position of the current entry in [`entries`](Self::entries)
    pub fn index(&self) -> usize {
        self.index
    }

    /// Moves one entry back and returns the new location
    ///
    /// Returns `None` at the oldest entry. Feed the result to
    /// [`Router::update_location`](crate::Router::update_location).
    pub fn back(&mut self) -> Option<String> {
        self.index = self.index.checked_sub(1)?;
        Some(self.location())
    }

    /// Moves one entry forward and returns the new location
    pub fn forward(&mut self) -> Option<String> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        Some(self.location())
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LOCATION)
    }
}

impl History for MemoryHistory {
    fn location(&self) -> String {
        self.entries[self.index].clone()
    }

    fn push(&mut self, url: &str) {
        self.entries.truncate(self.index + 1);
        self.entries.push(url.to_string());
        self.index = self.entries.len() - 1;
    }

    fn replace(&mut self, url: &str) {
        self.entries[self.index] = url.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_drops_forward_entries() {
        let mut history = MemoryHistory::new("a");
        history.push("b");
        history.push("c");
        assert_eq!(history.back().as_deref(), Some("b"));

        history.push("d");
        assert_eq!(history.entries(), ["a", "b", "d"]);
        assert_eq!(history.forward(), None);
    }

    #[test]
    fn test_back_at_start() {
        let mut history = MemoryHistory::default();
        assert_eq!(history.back(), None);
        assert_eq!(history.index(), 0);
        assert_eq!(history.location(), MemoryHistory::DEFAULT_LOCATION);
    }
}
