use std::cell::{Cell, RefCell};
use std::rc::Rc;

use smallvec::SmallVec;

use crate::Dispose;

/// Ownership node for cleanups.
///
/// Every mounted component and every router owns one. Disposing a scope runs its
/// children's disposers first, then its own, in registration order. There is no
/// implicit "current" scope: callers hand scopes down explicitly.
pub struct Scope {
    inner: Rc<ScopeInner>,
}

struct ScopeInner {
    disposers: RefCell<SmallVec<[Box<dyn FnOnce()>; 4]>>,
    children: RefCell<Vec<Scope>>,
    disposed: Cell<bool>,
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}

impl Scope {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(ScopeInner {
                disposers: RefCell::new(SmallVec::new()),
                children: RefCell::new(Vec::new()),
                disposed: Cell::new(false),
            }),
        }
    }

    /// Register a cleanup. On an already disposed scope it runs immediately.
    pub fn add_disposer(&self, disposer: impl FnOnce() + 'static) {
        if self.is_disposed() {
            disposer();
            return;
        }
        self.inner.disposers.borrow_mut().push(Box::new(disposer));
    }

    /// Tie a [`Dispose`] guard to this scope.
    pub fn own(&self, d: Dispose) {
        self.add_disposer(move || d.run());
    }

    /// A scope disposed together with this one. Children of a disposed scope
    /// start out disposed.
    pub fn child(&self) -> Scope {
        let child = Scope::new();
        if self.is_disposed() {
            child.inner.disposed.set(true);
        } else {
            let mut children = self.inner.children.borrow_mut();
            children.retain(|c| !c.is_disposed());
            children.push(child.clone());
        }
        child
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.disposed.get()
    }

    /// Runs at most once; later calls are no-ops.
    pub fn dispose(&self) {
        if self.inner.disposed.replace(true) {
            return;
        }

        // Dispose children first
        let children = std::mem::take(&mut *self.inner.children.borrow_mut());
        for child in children {
            child.dispose();
        }

        let disposers = std::mem::take(&mut *self.inner.disposers.borrow_mut());
        for disposer in disposers {
            disposer();
        }
    }
}

impl Clone for Scope {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}
