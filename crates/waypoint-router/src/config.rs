use std::rc::Rc;

use crate::matcher::{PatternMatcher, RouteMatcher};
use crate::pattern::Route;

/// Routes and matching strategy for one router.
#[derive(Clone)]
pub struct RouterConfig {
    pub routes: Vec<Route>,
    pub matcher: Rc<dyn RouteMatcher>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            routes: Vec::new(),
            matcher: Rc::new(PatternMatcher),
        }
    }
}

impl RouterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_route(mut self, route: Route) -> Self {
        self.routes.push(route);
        self
    }

    pub fn with_routes(mut self, routes: impl IntoIterator<Item = Route>) -> Self {
        self.routes.extend(routes);
        self
    }

    pub fn with_matcher(mut self, matcher: impl RouteMatcher) -> Self {
        self.matcher = Rc::new(matcher);
        self
    }
}
