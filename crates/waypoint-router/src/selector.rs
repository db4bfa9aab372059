//! Selector hooks: subscribe a component to one derived value of a store.
//!
//! A hook made by [`create_hook`] keeps, per component instance, the store
//! subscription, the props it was last rendered with, and the last selected
//! value. On every store transition the selector is re-run for each live
//! subscriber; only subscribers whose selected value changed are invalidated.
//! Subscribers that select disjoint slices never re-render each other.

use std::cell::RefCell;
use std::marker::PhantomData;
use std::rc::Rc;

use waypoint_core::{Invalidator, RenderCx, SubId};

use crate::error::{Result, RouterError};

/// A state container a selector hook can subscribe to.
pub trait Store: 'static {
    type State: 'static;
    type Actions: Clone + 'static;

    fn snapshot(&self) -> Rc<Self::State>;
    fn subscribe(&self, f: Box<dyn Fn(&Rc<Self::State>)>) -> SubId;
    fn unsubscribe(&self, id: SubId) -> bool;
    fn action_handle(this: &Rc<Self>) -> Self::Actions;
}

pub struct StoreHook<S, P, V, F> {
    selector: Rc<F>,
    _marker: PhantomData<fn(&S, &P) -> V>,
}

impl<S, P, V, F> Clone for StoreHook<S, P, V, F> {
    fn clone(&self) -> Self {
        Self {
            selector: self.selector.clone(),
            _marker: PhantomData,
        }
    }
}

/// Build a hook that selects `selector(state, props)` from store `S`.
pub fn create_hook<S, P, V, F>(selector: F) -> StoreHook<S, P, V, F>
where
    S: Store,
    P: PartialEq + Clone + 'static,
    V: PartialEq + Clone + 'static,
    F: Fn(&Rc<S::State>, &P) -> V + 'static,
{
    StoreHook {
        selector: Rc::new(selector),
        _marker: PhantomData,
    }
}

struct Binding<S: Store> {
    store: Rc<S>,
    id: SubId,
}

struct HookSlot<S: Store, P, V> {
    binding: RefCell<Option<Binding<S>>>,
    props: RefCell<Option<P>>,
    value: RefCell<Option<V>>,
}

impl<S: Store, P, V> HookSlot<S, P, V> {
    fn unbind(&self) {
        if let Some(b) = self.binding.borrow_mut().take() {
            b.store.unsubscribe(b.id);
        }
    }
}

impl<S, P, V, F> StoreHook<S, P, V, F>
where
    S: Store,
    P: PartialEq + Clone + 'static,
    V: PartialEq + Clone + 'static,
    F: Fn(&Rc<S::State>, &P) -> V + 'static,
{
    /// Call once per render, unconditionally.
    ///
    /// Returns the value for this render and the store's actions, or
    /// [`RouterError::NoRouterStore`] when the component's context has no `S`.
    pub fn use_hook(&self, cx: &mut RenderCx<'_>, props: P) -> Result<(V, S::Actions)> {
        let slot = cx.remember(|| HookSlot::<S, P, V> {
            binding: RefCell::new(None),
            props: RefCell::new(None),
            value: RefCell::new(None),
        });

        let Some(store) = cx.context().get::<S>() else {
            slot.unbind();
            return Err(RouterError::NoRouterStore);
        };

        let same_store = slot
            .binding
            .borrow()
            .as_ref()
            .is_some_and(|b| Rc::ptr_eq(&b.store, &store));
        if !same_store {
            slot.unbind();
            let id = store.subscribe(self.subscriber(&slot, cx.invalidator()));
            *slot.binding.borrow_mut() = Some(Binding {
                store: store.clone(),
                id,
            });
            let weak = Rc::downgrade(&slot);
            cx.scope().add_disposer(move || {
                if let Some(slot) = weak.upgrade() {
                    slot.unbind();
                }
            });
            *slot.props.borrow_mut() = None;
        }

        let cached = if slot.props.borrow().as_ref() == Some(&props) {
            slot.value.borrow().clone()
        } else {
            None
        };
        let value = match cached {
            Some(v) => v,
            None => {
                let v = (self.selector)(&store.snapshot(), &props);
                *slot.value.borrow_mut() = Some(v.clone());
                *slot.props.borrow_mut() = Some(props);
                v
            }
        };
        Ok((value, S::action_handle(&store)))
    }

    fn subscriber(
        &self,
        slot: &Rc<HookSlot<S, P, V>>,
        invalidator: Invalidator,
    ) -> Box<dyn Fn(&Rc<S::State>)> {
        let weak = Rc::downgrade(slot);
        let selector = self.selector.clone();
        Box::new(move |state| {
            let Some(slot) = weak.upgrade() else {
                return;
            };
            let next = {
                let props = slot.props.borrow();
                let Some(props) = props.as_ref() else {
                    return;
                };
                selector(state, props)
            };
            let changed = slot.value.borrow().as_ref() != Some(&next);
            if changed {
                log::trace!("selector: value changed; scheduling re-render");
                *slot.value.borrow_mut() = Some(next);
                invalidator.invalidate();
            } else {
                log::trace!("selector: value unchanged; skipping");
            }
        })
    }
}
