//! # Navigation Stack
//!
//! Screen history as a stack of routes. The last element is the current screen.
//!
//! ```text
//! [Home]                 push(Viewer)  → [Home, Viewer]      direction = Push
//! [Home, Viewer]         pop()         → [Home]              direction = Pop
//! [Home]                 pop()         → [Home]              (root is never popped)
//! [Home]                 push(Home)    → [Home]              (top is never duplicated)
//! ```
//!
//! The direction flag only exists so the front-end can pick a transition
//! animation. The stack lives for the process lifetime and is never persisted.

use std::fmt;
use std::str::FromStr;

use log::debug;

/// A screen the shell can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Recents,
    Viewer,
    Settings,
}

impl Route {
    pub const ALL: [Route; 4] = [Route::Home, Route::Recents, Route::Viewer, Route::Settings];

    pub fn name(self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Recents => "Recents",
            Route::Viewer => "Viewer",
            Route::Settings => "Settings",
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Recents => "/recents",
            Route::Viewer => "/viewer",
            Route::Settings => "/settings",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRoute(pub String);

impl fmt::Display for UnknownRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown route: {}", self.0)
    }
}

impl std::error::Error for UnknownRoute {}

/// Parses a route name (`"Viewer"`) or path (`"/viewer"`).
impl FromStr for Route {
    type Err = UnknownRoute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Route::ALL
            .into_iter()
            .find(|r| r.name() == s || r.path() == s)
            .ok_or_else(|| UnknownRoute(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TransitionDirection {
    #[default]
    Push,
    Pop,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationStack {
    routes: Vec<Route>,
    direction: TransitionDirection,
}

impl Default for NavigationStack {
    fn default() -> Self {
        Self::new(Route::Home)
    }
}

impl NavigationStack {
    pub fn new(root: Route) -> Self {
        Self {
            routes: vec![root],
            direction: TransitionDirection::Push,
        }
    }

    pub fn current(&self) -> Route {
        // Never empty: constructed with a root and pop stops at one element.
        self.routes[self.routes.len() - 1]
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_at_root(&self) -> bool {
        self.routes.len() == 1
    }

    pub fn direction(&self) -> TransitionDirection {
        self.direction
    }

    pub fn push(&mut self, route: Route) {
        debug!("pushRoute {} on {:?}", route, self.routes);
        if self.current() == route {
            debug!("{} already at top of stack, not pushing", route);
            return;
        }
        self.routes.push(route);
        self.direction = TransitionDirection::Push;
    }

    pub fn pop(&mut self) {
        debug!("popRoute on {:?}", self.routes);
        if self.routes.len() > 1 {
            self.routes.pop();
            self.direction = TransitionDirection::Pop;
        }
    }

    /// Pop and report where to go. `None` at the root means the host should
    /// handle back itself (typically by exiting).
    pub fn handle_back_button(&mut self) -> Option<Route> {
        if self.is_at_root() {
            debug!("Back at root {:?}, deferring to host", self.routes);
            return None;
        }
        self.pop();
        let target = self.current();
        debug!("Back to {} (stack {:?})", target, self.routes);
        Some(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_home() {
        let stack = NavigationStack::default();
        assert_eq!(stack.routes(), &[Route::Home]);
        assert_eq!(stack.direction(), TransitionDirection::Push);
    }

    #[test]
    fn test_push_current_top_is_noop() {
        let mut stack = NavigationStack::default();
        stack.push(Route::Home);
        assert_eq!(stack.routes(), &[Route::Home]);
    }

    #[test]
    fn test_push_then_pop_restores_home() {
        let mut stack = NavigationStack::default();
        stack.push(Route::Viewer);
        assert_eq!(stack.current(), Route::Viewer);
        assert_eq!(stack.direction(), TransitionDirection::Push);

        stack.pop();
        assert_eq!(stack.routes(), &[Route::Home]);
        assert_eq!(stack.direction(), TransitionDirection::Pop);
    }

    #[test]
    fn test_pop_at_root_keeps_direction() {
        let mut stack = NavigationStack::default();
        stack.pop();
        assert_eq!(stack.routes(), &[Route::Home]);
        assert_eq!(stack.direction(), TransitionDirection::Push);
    }

    #[test]
    fn test_non_top_duplicates_are_allowed() {
        let mut stack = NavigationStack::default();
        stack.push(Route::Viewer);
        stack.push(Route::Home);
        stack.push(Route::Viewer);
        assert_eq!(stack.len(), 4);
    }

    #[test]
    fn test_back_button_at_root_returns_none() {
        let mut stack = NavigationStack::default();
        assert_eq!(stack.handle_back_button(), None);
        assert_eq!(stack.routes(), &[Route::Home]);
    }

    #[test]
    fn test_back_button_returns_new_top() {
        let mut stack = NavigationStack::default();
        stack.push(Route::Recents);
        stack.push(Route::Viewer);
        assert_eq!(stack.handle_back_button(), Some(Route::Recents));
        assert_eq!(stack.handle_back_button(), Some(Route::Home));
        assert_eq!(stack.handle_back_button(), None);
        assert_eq!(stack.direction(), TransitionDirection::Pop);
    }

    #[test]
    fn test_route_parses_names_and_paths() {
        assert_eq!("Viewer".parse::<Route>(), Ok(Route::Viewer));
        assert_eq!("/".parse::<Route>(), Ok(Route::Home));
        assert_eq!("/settings".parse::<Route>(), Ok(Route::Settings));
        assert!("viewer".parse::<Route>().is_err());
    }
}
