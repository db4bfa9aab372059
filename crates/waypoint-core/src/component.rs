//! Slot-based components.
//!
//! A component is a render closure plus the state it remembers between runs.
//! Hooks keep their state in order-based slots: the Nth `remember` call in a
//! render always returns the Nth slot, so hooks must be called unconditionally
//! and in the same order every render.
//!
//! Re-renders are never synchronous. [`Invalidator::invalidate`] marks the
//! component dirty and queues one render on the context's [`Scheduler`];
//! further invalidations before that render runs are folded into it.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::{Context, Scope};

type RenderFn<R> = Box<dyn FnMut(&mut RenderCx<'_>) -> R>;

pub struct Component<R: 'static> {
    inner: Rc<ComponentInner<R>>,
}

struct ComponentInner<R> {
    ctx: Context,
    scope: Scope,
    slots: RefCell<Vec<Rc<dyn Any>>>,
    render: RefCell<RenderFn<R>>,
    output: RefCell<Option<R>>,
    renders: Cell<usize>,
    dirty: Cell<bool>,
}

/// What a render closure sees.
pub struct RenderCx<'a> {
    ctx: &'a Context,
    scope: &'a Scope,
    slots: &'a mut Vec<Rc<dyn Any>>,
    cursor: usize,
    invalidator: Invalidator,
}

/// Schedules a re-render of the component it came from.
#[derive(Clone)]
pub struct Invalidator {
    hook: Rc<dyn Fn()>,
}

impl Invalidator {
    pub fn invalidate(&self) {
        (self.hook)()
    }
}

impl<'a> RenderCx<'a> {
    pub fn context(&self) -> &Context {
        self.ctx
    }

    pub fn scope(&self) -> &Scope {
        self.scope
    }

    pub fn invalidator(&self) -> Invalidator {
        self.invalidator.clone()
    }

    /// Slot-based remember: `init` runs only on the first render.
    pub fn remember<T: 'static>(&mut self, init: impl FnOnce() -> T) -> Rc<T> {
        let cursor = self.cursor;
        self.cursor += 1;

        if cursor >= self.slots.len() {
            let rc: Rc<T> = Rc::new(init());
            self.slots.push(rc.clone());
            return rc;
        }

        match self.slots[cursor].clone().downcast::<T>() {
            Ok(rc) => rc,
            Err(_) => {
                // replace (else panics)
                log::warn!(
                    "remember: slot {} type changed; replacing. \
                     Hooks must run in the same order on every render.",
                    cursor
                );
                let rc: Rc<T> = Rc::new(init());
                self.slots[cursor] = rc.clone();
                rc
            }
        }
    }
}

impl<R: 'static> Component<R> {
    /// Create the component and run its first render immediately.
    ///
    /// The component's scope is a child of `ctx.scope()`, so disposing the
    /// context's scope unmounts it too.
    pub fn mount(ctx: &Context, render: impl FnMut(&mut RenderCx<'_>) -> R + 'static) -> Self {
        let inner = Rc::new(ComponentInner {
            ctx: ctx.clone(),
            scope: ctx.scope().child(),
            slots: RefCell::new(Vec::new()),
            render: RefCell::new(Box::new(render)),
            output: RefCell::new(None),
            renders: Cell::new(0),
            dirty: Cell::new(false),
        });
        ComponentInner::run(&inner);
        Self { inner }
    }

    /// Dispose the component's scope. Pending re-renders are dropped.
    pub fn unmount(&self) {
        self.inner.scope.dispose();
        self.inner.slots.borrow_mut().clear();
    }

    pub fn is_mounted(&self) -> bool {
        !self.inner.scope.is_disposed()
    }

    pub fn render_count(&self) -> usize {
        self.inner.renders.get()
    }

    /// True while a re-render is queued but has not run yet.
    pub fn is_dirty(&self) -> bool {
        self.inner.dirty.get()
    }

    pub fn with_output<T>(&self, f: impl FnOnce(&R) -> T) -> Option<T> {
        self.inner.output.borrow().as_ref().map(f)
    }

    pub fn output(&self) -> Option<R>
    where
        R: Clone,
    {
        self.inner.output.borrow().clone()
    }
}

impl<R: 'static> ComponentInner<R> {
    fn invalidator(this: &Rc<Self>) -> Invalidator {
        let weak: Weak<Self> = Rc::downgrade(this);
        let scheduler = this.ctx.scheduler().clone();
        Invalidator {
            hook: Rc::new(move || {
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                if inner.scope.is_disposed() || inner.dirty.replace(true) {
                    return;
                }
                let weak = Rc::downgrade(&inner);
                scheduler.schedule(move || {
                    if let Some(inner) = weak.upgrade() {
                        inner.dirty.set(false);
                        if !inner.scope.is_disposed() {
                            ComponentInner::run(&inner);
                        }
                    }
                });
            }),
        }
    }

    fn run(this: &Rc<Self>) {
        let invalidator = Self::invalidator(this);
        let out = {
            let mut render = this.render.borrow_mut();
            let mut slots = this.slots.borrow_mut();
            let mut cx = RenderCx {
                ctx: &this.ctx,
                scope: &this.scope,
                slots: &mut *slots,
                cursor: 0,
                invalidator,
            };
            (*render)(&mut cx)
        };
        *this.output.borrow_mut() = Some(out);
        this.renders.set(this.renders.get() + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Scheduler, signal};

    #[test]
    fn test_remember_persists_across_renders() {
        let ctx = Context::new(Scheduler::new());
        let inits = Rc::new(Cell::new(0));
        let i = inits.clone();
        let c = Component::mount(&ctx, move |cx| {
            let n = cx.remember(|| {
                i.set(i.get() + 1);
                Cell::new(0)
            });
            n.set(n.get() + 1);
            (n.get(), cx.invalidator())
        });
        assert_eq!(c.with_output(|(n, _)| *n), Some(1));

        let inv = c.with_output(|(_, inv)| inv.clone()).unwrap();
        inv.invalidate();
        assert_eq!(c.render_count(), 1);
        ctx.scheduler().tick();
        assert_eq!(c.render_count(), 2);
        assert_eq!(c.with_output(|(n, _)| *n), Some(2));
        assert_eq!(inits.get(), 1);
    }

    #[test]
    fn test_invalidations_coalesce() {
        let ctx = Context::new(Scheduler::new());
        let count = signal(0);
        let c = {
            let count = count.clone();
            Component::mount(&ctx, move |cx| {
                let installed = cx.remember(|| Cell::new(false));
                if !installed.replace(true) {
                    let inv = cx.invalidator();
                    count.subscribe(move |_| inv.invalidate());
                }
                count.get()
            })
        };
        count.set(1);
        count.set(2);
        count.set(3);
        assert!(c.is_dirty());
        assert_eq!(c.render_count(), 1);
        ctx.scheduler().tick();
        assert_eq!(c.render_count(), 2);
        assert_eq!(c.output(), Some(3));
    }

    #[test]
    fn test_context_scope_unmounts_components() {
        let root = Context::new(Scheduler::new());
        let ctx = root.child();
        let c = Component::mount(&ctx, |cx| cx.invalidator());
        let inv = c.output().unwrap();

        ctx.scope().dispose();
        assert!(!c.is_mounted());
        inv.invalidate();
        assert!(root.scheduler().is_idle());
        assert_eq!(c.render_count(), 1);
    }

    #[test]
    fn test_no_render_after_unmount() {
        let ctx = Context::new(Scheduler::new());
        let c = Component::mount(&ctx, |cx| cx.invalidator());
        let inv = c.output().unwrap();
        inv.invalidate();
        c.unmount();
        ctx.scheduler().tick();
        assert_eq!(c.render_count(), 1);
        assert!(!c.is_mounted());

        inv.invalidate();
        assert!(ctx.scheduler().is_idle());
    }
}
