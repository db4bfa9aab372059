use std::ops::Deref;
use std::rc::Rc;

use serde::Serialize;

use crate::location::{Location, PathParams, QueryMap};
use crate::matcher::RouteMatcher;
use crate::pattern::Route;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RouteMatch {
    pub route: Route,
    pub params: PathParams,
}

/// Everything the store knows. Replaced wholesale on each location change.
///
/// `query` and `route_match` are shared with the previous state when their
/// contents did not change, so selectors can compare them by pointer.
#[derive(Clone, Debug)]
pub struct EntireRouterState {
    pub location: Location,
    pub query: Rc<QueryMap>,
    pub route_match: Option<Rc<RouteMatch>>,
    pub routes: Rc<[Route]>,
}

impl EntireRouterState {
    pub fn initial(location: Location, routes: Rc<[Route]>, matcher: &dyn RouteMatcher) -> Self {
        let query = Rc::new(location.query());
        let route_match = matcher
            .match_routes(&routes, &location.pathname)
            .map(Rc::new);
        Self {
            location,
            query,
            route_match,
            routes,
        }
    }

    /// Derive the state for `location`, reusing unchanged parts of `self`.
    pub fn next(&self, location: Location, matcher: &dyn RouteMatcher) -> Self {
        let query = if location.search == self.location.search {
            self.query.clone()
        } else {
            let parsed = location.query();
            if parsed == *self.query {
                self.query.clone()
            } else {
                Rc::new(parsed)
            }
        };
        let route_match = if location.pathname == self.location.pathname {
            self.route_match.clone()
        } else {
            match (
                matcher.match_routes(&self.routes, &location.pathname),
                &self.route_match,
            ) {
                (Some(m), Some(prev)) if m == **prev => Some(prev.clone()),
                (m, _) => m.map(Rc::new),
            }
        };
        Self {
            location,
            query,
            route_match,
            routes: self.routes.clone(),
        }
    }

    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query.get(key)
    }

    pub fn path_param(&self, key: &str) -> Option<&str> {
        self.route_match
            .as_ref()
            .and_then(|m| m.params.get(key))
            .map(String::as_str)
    }

    pub fn route(&self) -> Option<&Route> {
        self.route_match.as_ref().map(|m| &m.route)
    }
}

/// Read-only view handed to consumers.
///
/// Two `RouterState`s are equal only when they are the same snapshot.
#[derive(Clone, Debug)]
pub struct RouterState(pub(crate) Rc<EntireRouterState>);

impl RouterState {
    pub fn to_json(&self) -> String {
        let snapshot = Snapshot {
            location: &self.0.location,
            query: &*self.0.query,
            route: self.0.route().map(|r| r.name.as_str()),
            params: self.0.route_match.as_ref().map(|m| &m.params),
        };
        serde_json::to_string(&snapshot).unwrap_or_else(|_| "{}".into())
    }
}

impl PartialEq for RouterState {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for RouterState {
    type Target = EntireRouterState;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[derive(Serialize)]
struct Snapshot<'a> {
    location: &'a Location,
    query: &'a QueryMap,
    route: Option<&'a str>,
    params: Option<&'a PathParams>,
}
