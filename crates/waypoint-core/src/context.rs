//! Explicit ambient values.
//!
//! A `Context` is a frame of typed values plus a link to its parent frame.
//! Lookups walk from the innermost frame outwards, so a child frame can
//! shadow what an ancestor provides. Contexts are passed down by hand; there is
//! no process-wide registry.
//!
//! Each frame also owns a [`Scope`] that is a child of its parent's scope.
//! Components mounted on a frame hang their own scopes below it, so disposing
//! a frame's scope unmounts everything mounted on it or its descendants.

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use crate::{Scheduler, Scope};

#[derive(Clone)]
pub struct Context {
    inner: Rc<Frame>,
}

struct Frame {
    values: RefCell<HashMap<TypeId, Rc<dyn Any>>>,
    parent: Option<Context>,
    scheduler: Scheduler,
    scope: Scope,
}

/// Non-owning handle to a [`Context`], for cleanups registered on its own scope.
#[derive(Clone)]
pub struct WeakContext(Weak<Frame>);

impl WeakContext {
    pub fn upgrade(&self) -> Option<Context> {
        self.0.upgrade().map(|inner| Context { inner })
    }
}

impl Context {
    /// A root frame. Every descendant shares `scheduler`.
    pub fn new(scheduler: Scheduler) -> Self {
        Self {
            inner: Rc::new(Frame {
                values: RefCell::new(HashMap::new()),
                parent: None,
                scheduler,
                scope: Scope::new(),
            }),
        }
    }

    pub fn child(&self) -> Context {
        Self {
            inner: Rc::new(Frame {
                values: RefCell::new(HashMap::new()),
                parent: Some(self.clone()),
                scheduler: self.inner.scheduler.clone(),
                scope: self.inner.scope.child(),
            }),
        }
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.inner.scheduler
    }

    pub fn scope(&self) -> &Scope {
        &self.inner.scope
    }

    pub fn downgrade(&self) -> WeakContext {
        WeakContext(Rc::downgrade(&self.inner))
    }

    /// Set `value` on this frame, replacing what it held for `T`.
    pub fn provide<T: 'static>(&self, value: Rc<T>) {
        self.inner
            .values
            .borrow_mut()
            .insert(TypeId::of::<T>(), value);
    }

    /// Remove this frame's value for `T`. Ancestors are not touched.
    pub fn revoke<T: 'static>(&self) -> bool {
        self.inner
            .values
            .borrow_mut()
            .remove(&TypeId::of::<T>())
            .is_some()
    }

    pub fn get<T: 'static>(&self) -> Option<Rc<T>> {
        let mut frame = Some(self);
        while let Some(ctx) = frame {
            let hit = ctx.inner.values.borrow().get(&TypeId::of::<T>()).cloned();
            if let Some(v) = hit
                && let Ok(t) = v.downcast::<T>()
            {
                return Some(t);
            }
            frame = ctx.inner.parent.as_ref();
        }
        None
    }

    pub fn contains<T: 'static>(&self) -> bool {
        self.get::<T>().is_some()
    }
}
