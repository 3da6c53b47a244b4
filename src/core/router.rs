//! # Router
//!
//! Performs the actual screen switch for route names produced by the
//! navigation stack. The stack decides *where*; the router tracks *what is
//! on screen* and remembers the screen it came from.

use log::{debug, warn};

use crate::core::navigation::Route;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Router {
    current: Route,
    previous: Option<Route>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new(Route::Home)
    }
}

impl Router {
    pub fn new(initial: Route) -> Self {
        Self {
            current: initial,
            previous: None,
        }
    }

    pub fn current(&self) -> Route {
        self.current
    }

    /// Route shown before the last `navigate`, if any navigation happened.
    pub fn previous(&self) -> Option<Route> {
        self.previous
    }

    pub fn navigate(&mut self, to: Route) {
        let from = self.current;
        debug!("Router: {} ({}) -> {} ({})", from, from.path(), to, to.path());
        self.previous = Some(from);
        self.current = to;
    }

    /// Resolve a route name or path. Unknown names are logged and rejected.
    pub fn resolve(&self, name_or_path: &str) -> Option<Route> {
        match name_or_path.parse() {
            Ok(route) => Some(route),
            Err(e) => {
                warn!("Router: {}", e);
                None
            }
        }
    }
}
