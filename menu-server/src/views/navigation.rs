//! Navigation and confirmation seams
//!
//! Views never touch a router directly: they ask a [`Navigator`] to move
//! and a [`Confirm`] to approve destructive actions.

use parking_lot::Mutex;
use shared::Route;

/// Receives navigation requests from views
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Navigator that records requests for the HTTP layer to act on
#[derive(Debug, Default)]
pub struct RouteSlot {
    history: Mutex<Vec<Route>>,
}

impl RouteSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent navigation, if any
    pub fn last(&self) -> Option<Route> {
        self.history.lock().last().cloned()
    }

    /// Number of navigations requested so far
    pub fn count(&self) -> usize {
        self.history.lock().len()
    }

    pub fn history(&self) -> Vec<Route> {
        self.history.lock().clone()
    }

    /// Whether any navigation to `route` was requested
    pub fn requested(&self, route: &Route) -> bool {
        self.history.lock().iter().any(|r| r == route)
    }
}

impl Navigator for RouteSlot {
    fn navigate(&self, route: Route) {
        tracing::debug!(path = %route.path(), "Navigation requested");
        self.history.lock().push(route);
    }
}

/// Approves or declines a destructive action
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

/// A pre-made answer, e.g. the `confirm` query flag
impl Confirm for bool {
    fn confirm(&self, _prompt: &str) -> bool {
        *self
    }
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_slot_records_in_order() {
        let slot = RouteSlot::new();
        assert_eq!(slot.last(), None);

        slot.navigate(Route::Dashboard);
        slot.navigate(Route::Login);

        assert_eq!(slot.count(), 2);
        assert_eq!(slot.last(), Some(Route::Login));
        assert!(slot.requested(&Route::Dashboard));
    }

    #[test]
    fn closures_see_the_prompt() {
        let seen = Mutex::new(String::new());
        let answer = |prompt: &str| {
            *seen.lock() = prompt.to_string();
            false
        };
        assert!(!answer.confirm("Sure?"));
        assert_eq!(*seen.lock(), "Sure?");
        assert!(true.confirm("ignored"));
    }
}
