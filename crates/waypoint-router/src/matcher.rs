use crate::pattern::Route;
use crate::state::RouteMatch;

/// Turns a pathname into the matched route and its bound params.
pub trait RouteMatcher: 'static {
    fn match_routes(&self, routes: &[Route], pathname: &str) -> Option<RouteMatch>;
}

/// First route (in configuration order) whose pattern fits wins.
#[derive(Clone, Copy, Debug, Default)]
pub struct PatternMatcher;

impl RouteMatcher for PatternMatcher {
    fn match_routes(&self, routes: &[Route], pathname: &str) -> Option<RouteMatch> {
        routes.iter().find_map(|route| {
            route.pattern().matches(pathname).map(|params| RouteMatch {
                route: route.clone(),
                params,
            })
        })
    }
}

impl<F> RouteMatcher for F
where
    F: Fn(&[Route], &str) -> Option<RouteMatch> + 'static,
{
    fn match_routes(&self, routes: &[Route], pathname: &str) -> Option<RouteMatch> {
        self(routes, pathname)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_match_wins() {
        let routes = vec![
            Route::new("board", "/projects/:projectId/board/:boardId").unwrap(),
            Route::new("any-board", "/projects/:p/board/:b").unwrap(),
            Route::new("blah", "/blah").unwrap(),
        ];
        let m = PatternMatcher
            .match_routes(&routes, "/projects/1/board/2")
            .unwrap();
        assert_eq!(m.route.name, "board");
        assert_eq!(m.params.get("projectId").map(String::as_str), Some("1"));

        assert_eq!(PatternMatcher.match_routes(&routes, "/blah").unwrap().route.name, "blah");
        assert!(PatternMatcher.match_routes(&routes, "/nope").is_none());
    }

    #[test]
    fn test_closure_matcher() {
        let routes = vec![Route::new("home", "/").unwrap()];
        let always_home = |routes: &[Route], _: &str| {
            routes.first().map(|r| RouteMatch {
                route: r.clone(),
                params: Default::default(),
            })
        };
        assert!(always_home.match_routes(&routes, "/anything").is_some());
    }
}
