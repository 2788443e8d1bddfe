//! In-memory route stack implementing the screens' navigation contract

use std::sync::Mutex;

use tracing::{info, warn};

use healthtrack_domain::navigation::{Navigator, Route};

/// One screen on the route stack
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    pub route: Route,
    pub message: Option<String>,
}

/// Route stack; the last entry is the visible screen
#[derive(Debug)]
pub struct Router {
    stack: Mutex<Vec<RouteEntry>>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new(Route::Home)
    }
}

impl Router {
    pub fn new(root: Route) -> Self {
        Self {
            stack: Mutex::new(vec![RouteEntry {
                route: root,
                message: None,
            }]),
        }
    }

    /// Route of the visible screen
    pub fn current_route(&self) -> Route {
        let stack = self.stack.lock().unwrap_or_else(|e| e.into_inner());
        stack.last().map(|entry| entry.route).unwrap_or(Route::Home)
    }

    /// Take the message passed to the visible screen, if any
    pub fn take_message(&self) -> Option<String> {
        let mut stack = self.stack.lock().unwrap_or_else(|e| e.into_inner());
        stack.last_mut().and_then(|entry| entry.message.take())
    }

    pub fn depth(&self) -> usize {
        self.stack.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Routes from root to the visible screen
    pub fn history(&self) -> Vec<Route> {
        let stack = self.stack.lock().unwrap_or_else(|e| e.into_inner());
        stack.iter().map(|entry| entry.route).collect()
    }
}

impl Navigator for Router {
    fn go_back(&self) {
        let mut stack = self.stack.lock().unwrap_or_else(|e| e.into_inner());
        if stack.len() > 1 {
            if let Some(left) = stack.pop() {
                info!(from = %left.route, "Navigated back");
            }
        } else {
            warn!("Back requested on the root screen");
        }
    }

    /// Navigating to a route already on the stack returns to it
    fn navigate(&self, route: Route, message: Option<String>) {
        let mut stack = self.stack.lock().unwrap_or_else(|e| e.into_inner());
        match stack.iter().position(|entry| entry.route == route) {
            Some(index) => {
                stack.truncate(index + 1);
                stack[index].message = message;
            }
            None => stack.push(RouteEntry { route, message }),
        }
        info!(to = %route, depth = stack.len(), "Navigated");
    }
}
