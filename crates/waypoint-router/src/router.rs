use std::rc::Rc;

use waypoint_core::Context;

use crate::config::RouterConfig;
use crate::history::History;
use crate::store::{RouterActions, RouterStore};

/// One mounted router tree.
///
/// Mounting creates a child [`Context`] that holds exactly one
/// [`RouterStore`]; components mounted on [`Router::context`] find it there.
/// Unmounting disposes that context's scope: history tracking stops, the
/// store is revoked, and every component mounted below it is unmounted.
/// Hooks run in that context afterwards report `NoRouterStore`.
pub struct Router {
    ctx: Context,
    store: Rc<RouterStore>,
}

impl Router {
    pub fn mount(parent: &Context, history: Rc<dyn History>, config: RouterConfig) -> Self {
        let RouterConfig { routes, matcher } = config;
        let store = Rc::new(RouterStore::new(history, routes, matcher));
        let ctx = parent.child();

        ctx.scope().own(store.connect());
        ctx.provide(store.clone());
        let weak = ctx.downgrade();
        ctx.scope().add_disposer(move || {
            if let Some(ctx) = weak.upgrade() {
                ctx.revoke::<RouterStore>();
            }
        });
        log::debug!("router: mounted at {}", store.state().location);

        Self { ctx, store }
    }

    /// The context router-aware components must be mounted on.
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    pub fn store(&self) -> &Rc<RouterStore> {
        &self.store
    }

    pub fn actions(&self) -> RouterActions {
        self.store.actions()
    }

    pub fn unmount(&self) {
        if self.is_mounted() {
            log::debug!("router: unmounted");
        }
        self.ctx.scope().dispose();
    }

    pub fn is_mounted(&self) -> bool {
        !self.ctx.scope().is_disposed()
    }
}
