//! Public hooks.
//!
//! Every hook takes the component's [`RenderCx`] and must be called on every
//! render, in the same order. Components have to be mounted on a
//! [`Router::context`](crate::Router::context) (or a descendant of it);
//! anywhere else the hooks fail with [`RouterError::NoRouterStore`].

use std::rc::Rc;

use waypoint_core::RenderCx;

use crate::error::{Result, RouterError};
use crate::location::QueryUpdate;
use crate::selector::create_hook;
use crate::state::{EntireRouterState, RouterState};
use crate::store::{RouterActions, RouterStore};

fn select_state(state: &Rc<EntireRouterState>, _: &()) -> RouterState {
    RouterState(state.clone())
}

fn select_query_param(state: &Rc<EntireRouterState>, key: &String) -> Option<String> {
    state.query_param(key).map(str::to_owned)
}

fn select_path_param(state: &Rc<EntireRouterState>, key: &String) -> Option<String> {
    state.path_param(key).map(str::to_owned)
}

/// The whole router state; re-renders on every location change.
pub fn use_router(cx: &mut RenderCx<'_>) -> Result<(RouterState, RouterActions)> {
    create_hook::<RouterStore, _, _, _>(select_state).use_hook(cx, ())
}

/// Actions only. Never causes a re-render.
pub fn use_router_actions(cx: &RenderCx<'_>) -> Result<RouterActions> {
    cx.context()
        .get::<RouterStore>()
        .map(|store| store.actions())
        .ok_or(RouterError::NoRouterStore)
}

/// Setter handed out by [`use_query_param`].
#[derive(Clone, PartialEq)]
pub struct QueryParamSetter {
    key: String,
    actions: RouterActions,
}

impl QueryParamSetter {
    /// `"v"` / `Some("v")` sets, `None` or [`QueryUpdate::Remove`] deletes the
    /// key, [`QueryUpdate::Keep`] leaves it alone. Always pushes.
    pub fn set(&self, value: impl Into<QueryUpdate>) {
        let update: QueryUpdate = value.into();
        self.actions.push_query_param([(self.key.as_str(), update)]);
    }

    pub fn remove(&self) {
        self.set(QueryUpdate::Remove);
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

/// One query param and its setter.
///
/// The value is `None` while the key is absent. A component using this hook
/// re-renders only when this key's value changes.
pub fn use_query_param(
    cx: &mut RenderCx<'_>,
    key: &str,
) -> Result<(Option<String>, QueryParamSetter)> {
    let (value, actions) =
        create_hook::<RouterStore, _, _, _>(select_query_param).use_hook(cx, key.to_string())?;
    Ok((
        value,
        QueryParamSetter {
            key: key.to_string(),
            actions,
        },
    ))
}

/// Setter handed out by [`use_path_param`].
#[derive(Clone, PartialEq)]
pub struct PathParamSetter {
    key: String,
    actions: RouterActions,
}

impl PathParamSetter {
    /// Path params cannot be removed, only replaced.
    pub fn set(&self, value: impl Into<String>) -> Result<()> {
        let value: String = value.into();
        self.actions.push_path_param([(self.key.as_str(), value)])
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

/// One path param of the matched route and its setter.
pub fn use_path_param(
    cx: &mut RenderCx<'_>,
    key: &str,
) -> Result<(Option<String>, PathParamSetter)> {
    let (value, actions) =
        create_hook::<RouterStore, _, _, _>(select_path_param).use_hook(cx, key.to_string())?;
    Ok((
        value,
        PathParamSetter {
            key: key.to_string(),
            actions,
        },
    ))
}
