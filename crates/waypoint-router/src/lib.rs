//! # Router store and parameter hooks
//!
//! `waypoint-router` keeps a reactive router state in step with a history
//! backend and lets components subscribe to single URL parameters.
//!
//! Reading flows from the backend inwards: a committed location replaces the
//! [`EntireRouterState`], every selector re-runs, and only components whose
//! selected value changed are queued for re-render. Writing goes the other
//! way: a setter merges its change into the current location, pushes the URL,
//! and waits for the backend to commit it.
//!
//! ```rust
//! use std::rc::Rc;
//! use waypoint_core::{Component, Context, Scheduler};
//! use waypoint_router::*;
//!
//! let scheduler = Scheduler::new();
//! let history = MemoryHistory::new(&scheduler, "/projects/123?tab=files");
//! let router = Router::mount(
//!     &Context::new(scheduler.clone()),
//!     Rc::new(history.clone()),
//!     RouterConfig::new().with_route(Route::new("project", "/projects/:projectId").unwrap()),
//! );
//!
//! let tab = Component::mount(router.context(), |cx| use_query_param(cx, "tab"));
//! let (value, set_tab) = tab.output().unwrap().unwrap();
//! assert_eq!(value.as_deref(), Some("files"));
//!
//! set_tab.set("issues");
//! scheduler.tick();
//! assert_eq!(history.pushed(), vec!["/projects/123?tab=issues"]);
//! assert_eq!(tab.output().unwrap().unwrap().0.as_deref(), Some("issues"));
//! ```

pub mod config;
pub mod error;
pub mod history;
pub mod hooks;
pub mod location;
pub mod matcher;
pub mod pattern;
pub mod router;
pub mod selector;
pub mod state;
pub mod store;

pub use config::RouterConfig;
pub use error::{Result, RouterError};
pub use history::{History, HistoryCall, MemoryHistory};
pub use hooks::*;
pub use location::{
    Location, PathParams, QueryMap, QueryUpdate, merge_path_param, merge_query_param, parse,
    parse_query, serialize, stringify_query,
};
pub use matcher::{PatternMatcher, RouteMatcher};
pub use pattern::{PathPattern, Route};
pub use router::Router;
pub use selector::{Store, StoreHook, create_hook};
pub use state::{EntireRouterState, RouteMatch, RouterState};
pub use store::{RouterActions, RouterStore};
