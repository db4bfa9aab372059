//! The router store and its action handle.
//!
//! Actions never touch the state directly. They compute the next URL, hand it
//! to [`History`], and return. The state is replaced only when the backend
//! reports the committed location through [`RouterStore::on_location_change`].

use std::rc::Rc;

use waypoint_core::{Dispose, Signal, SubId, signal};

use crate::error::{Result, RouterError};
use crate::history::History;
use crate::location::{Location, PathParams, QueryMap, QueryUpdate, merge_path_param};
use crate::matcher::RouteMatcher;
use crate::pattern::Route;
use crate::selector::Store;
use crate::state::{EntireRouterState, RouterState};

pub struct RouterStore {
    state: Signal<Rc<EntireRouterState>>,
    history: Rc<dyn History>,
    matcher: Rc<dyn RouteMatcher>,
}

impl RouterStore {
    pub fn new(
        history: Rc<dyn History>,
        routes: Vec<Route>,
        matcher: Rc<dyn RouteMatcher>,
    ) -> Self {
        let initial = EntireRouterState::initial(history.location(), routes.into(), &*matcher);
        Self {
            state: signal(Rc::new(initial)),
            history,
            matcher,
        }
    }

    pub fn state(&self) -> RouterState {
        RouterState(self.state.get())
    }

    /// Replace the whole state for a committed location and notify subscribers.
    pub fn on_location_change(&self, location: Location) {
        let next = self.state.with(|s| s.next(location, &*self.matcher));
        log::debug!(
            "router: location -> {} (route: {})",
            next.location,
            next.route().map(|r| r.name.as_str()).unwrap_or("<none>")
        );
        self.state.set(Rc::new(next));
    }

    /// Start following the history backend. Running the guard stops it.
    pub fn connect(self: &Rc<Self>) -> Dispose {
        let weak = Rc::downgrade(self);
        self.history.listen(Box::new(move |location| {
            if let Some(store) = weak.upgrade() {
                store.on_location_change(location.clone());
            }
        }))
    }

    /// Live subscriber count, for leak checks.
    pub fn subscriber_count(&self) -> usize {
        self.state.subscriber_count()
    }

    pub fn actions(self: &Rc<Self>) -> RouterActions {
        RouterActions {
            store: self.clone(),
        }
    }

    fn navigate(&self, location: &Location, replace: bool) {
        let url = location.to_url();
        if replace {
            log::debug!("router: replace {url}");
            self.history.replace(&url);
        } else {
            log::debug!("router: push {url}");
            self.history.push(&url);
        }
    }

    fn query_target<K, U>(&self, partial: impl IntoIterator<Item = (K, U)>) -> Location
    where
        K: AsRef<str>,
        U: Into<QueryUpdate>,
    {
        self.state.with(|s| {
            let mut query: QueryMap = (*s.query).clone();
            for (key, update) in partial {
                query.apply(key.as_ref(), update.into());
            }
            s.location.with_query(&query)
        })
    }

    fn path_target<K, V>(&self, partial: impl IntoIterator<Item = (K, V)>) -> Result<Location>
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        self.state.with(|s| {
            let Some(m) = s.route_match.as_ref() else {
                return Err(RouterError::NoActiveRoute {
                    pathname: s.location.pathname.clone(),
                });
            };
            let mut params = m.params.clone();
            for (key, value) in partial {
                params = merge_path_param(&params, key.as_ref(), value);
            }
            let mut pathname = m.route.pattern().expand(&params)?;
            if s.location.pathname.len() > 1
                && s.location.pathname.ends_with('/')
                && !pathname.ends_with('/')
            {
                pathname.push('/');
            }
            Ok(s.location.with_pathname(pathname))
        })
    }
}

impl Store for RouterStore {
    type State = EntireRouterState;
    type Actions = RouterActions;

    fn snapshot(&self) -> Rc<EntireRouterState> {
        self.state.get()
    }

    fn subscribe(&self, f: Box<dyn Fn(&Rc<EntireRouterState>)>) -> SubId {
        self.state.subscribe(f)
    }

    fn unsubscribe(&self, id: SubId) -> bool {
        self.state.unsubscribe(id)
    }

    fn action_handle(this: &Rc<Self>) -> RouterActions {
        this.actions()
    }
}

/// Cloneable handle to the store's actions. Holds no state of its own.
#[derive(Clone)]
pub struct RouterActions {
    store: Rc<RouterStore>,
}

impl PartialEq for RouterActions {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.store, &other.store)
    }
}

impl RouterActions {
    /// Current state, without subscribing to it.
    pub fn state(&self) -> RouterState {
        self.store.state()
    }

    pub fn push(&self, url: &str) {
        log::debug!("router: push {url}");
        self.store.history.push(url);
    }

    pub fn replace(&self, url: &str) {
        log::debug!("router: replace {url}");
        self.store.history.replace(url);
    }

    /// Merge query updates into the current query and push the result.
    ///
    /// Unrelated keys keep their positions; new keys are appended.
    pub fn push_query_param<K, U>(&self, partial: impl IntoIterator<Item = (K, U)>)
    where
        K: AsRef<str>,
        U: Into<QueryUpdate>,
    {
        let target = self.store.query_target(partial);
        self.store.navigate(&target, false);
    }

    pub fn replace_query_param<K, U>(&self, partial: impl IntoIterator<Item = (K, U)>)
    where
        K: AsRef<str>,
        U: Into<QueryUpdate>,
    {
        let target = self.store.query_target(partial);
        self.store.navigate(&target, true);
    }

    /// Rewrite path params through the matched route's pattern and push.
    ///
    /// Fails with [`RouterError::NoActiveRoute`] when nothing is matched and
    /// with [`RouterError::InvalidPathParam`] for an empty value; nothing is
    /// pushed in either case. A trailing slash on the current pathname is kept.
    pub fn push_path_param<K, V>(&self, partial: impl IntoIterator<Item = (K, V)>) -> Result<()>
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let target = self.store.path_target(partial)?;
        self.store.navigate(&target, false);
        Ok(())
    }

    pub fn replace_path_param<K, V>(
        &self,
        partial: impl IntoIterator<Item = (K, V)>,
    ) -> Result<()>
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let target = self.store.path_target(partial)?;
        self.store.navigate(&target, true);
        Ok(())
    }

    /// Push the route called `name`, expanded with `params`, carrying `query`.
    pub fn push_to(&self, name: &str, params: &PathParams, query: &QueryMap) -> Result<()> {
        let pathname = self.store.state.with(|s| {
            let route = s
                .routes
                .iter()
                .find(|r| r.name == name)
                .ok_or_else(|| RouterError::UnknownRoute(name.to_string()))?;
            route.pattern().expand(params)
        })?;
        self.store
            .navigate(&Location::new(pathname, query, ""), false);
        Ok(())
    }
}
