//! # Router
//!
//! Tracks the current and previous route. Names are not validated; an
//! unknown name is stored as-is and renders nothing.

use crate::app::events::RouteName;
use crate::app::models::{Route, RouteParams};

/// The pair of route names a push moved between
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteChange {
    pub previous: RouteName,
    pub current: RouteName,
}

#[derive(Debug, Clone)]
pub struct Router {
    current: Route,
    previous: Route,
}

impl Router {
    /// Both routes start at home
    pub fn new() -> Self {
        Self {
            current: Route::home(),
            previous: Route::home(),
        }
    }

    pub fn current(&self) -> &Route {
        &self.current
    }

    pub fn previous(&self) -> &Route {
        &self.previous
    }

    /// Record the current route as previous and make `name` current
    pub fn push(&mut self, name: impl Into<RouteName>, params: RouteParams) -> RouteChange {
        let next = Route::new(name, params);
        let previous = std::mem::replace(&mut self.current, next);
        self.previous = previous;
        tracing::info!(
            "route: {} -> {}",
            self.previous.name.as_str(),
            self.current.name.as_str()
        );
        RouteChange {
            previous: self.previous.name.clone(),
            current: self.current.name.clone(),
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
