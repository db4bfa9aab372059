//! History backend contract and an in-memory backend.

use std::cell::RefCell;
use std::rc::Rc;

use waypoint_core::{Dispose, Scheduler, Signal, signal};

use crate::location::{Location, parse};

/// The navigation primitive the router drives.
///
/// `push`/`replace` return immediately; the new location reaches listeners
/// later, when the backend commits it.
pub trait History: 'static {
    fn location(&self) -> Location;
    fn push(&self, url: &str);
    fn replace(&self, url: &str);
    /// Register a change listener. Running the returned guard unregisters it.
    fn listen(&self, listener: Box<dyn Fn(&Location)>) -> Dispose;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HistoryCall {
    Push(String),
    Replace(String),
}

/// History kept in memory. Commits run on the next [`Scheduler::tick`].
#[derive(Clone)]
pub struct MemoryHistory {
    inner: Rc<MemoryInner>,
}

struct MemoryInner {
    scheduler: Scheduler,
    entries: RefCell<Vec<Location>>,
    calls: RefCell<Vec<HistoryCall>>,
    current: Signal<Location>,
}

impl MemoryHistory {
    pub fn new(scheduler: &Scheduler, initial_url: &str) -> Self {
        let initial = parse(initial_url);
        Self {
            inner: Rc::new(MemoryInner {
                scheduler: scheduler.clone(),
                entries: RefCell::new(vec![initial.clone()]),
                calls: RefCell::new(Vec::new()),
                current: signal(initial),
            }),
        }
    }

    /// Every push/replace received so far, in call order.
    pub fn calls(&self) -> Vec<HistoryCall> {
        self.inner.calls.borrow().clone()
    }

    /// URLs passed to `push`, in call order.
    pub fn pushed(&self) -> Vec<String> {
        self.inner
            .calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                HistoryCall::Push(url) => Some(url.clone()),
                HistoryCall::Replace(_) => None,
            })
            .collect()
    }

    /// Number of committed entries.
    pub fn len(&self) -> usize {
        self.inner.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn listener_count(&self) -> usize {
        self.inner.current.subscriber_count()
    }

    fn commit(&self, location: Location, replace: bool) {
        let weak = Rc::downgrade(&self.inner);
        self.inner.scheduler.schedule(move || {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            {
                let mut entries = inner.entries.borrow_mut();
                if replace {
                    entries.pop();
                }
                entries.push(location.clone());
            }
            log::debug!("history: committed {location}");
            inner.current.set(location);
        });
    }
}

impl History for MemoryHistory {
    fn location(&self) -> Location {
        self.inner.current.get()
    }

    fn push(&self, url: &str) {
        self.inner
            .calls
            .borrow_mut()
            .push(HistoryCall::Push(url.to_string()));
        self.commit(parse(url), false);
    }

    fn replace(&self, url: &str) {
        self.inner
            .calls
            .borrow_mut()
            .push(HistoryCall::Replace(url.to_string()));
        self.commit(parse(url), true);
    }

    fn listen(&self, listener: Box<dyn Fn(&Location)>) -> Dispose {
        let id = self.inner.current.subscribe(listener);
        let weak = Rc::downgrade(&self.inner);
        Dispose::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.current.unsubscribe(id);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_push_commits_on_tick() {
        let scheduler = Scheduler::new();
        let history = MemoryHistory::new(&scheduler, "/a?x=1");
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = seen.clone();
        let _guard = history.listen(Box::new(move |loc| s.borrow_mut().push(loc.to_url())));

        history.push("/b#top");
        assert_eq!(history.location().to_url(), "/a?x=1");
        assert!(seen.borrow().is_empty());

        scheduler.tick();
        assert_eq!(history.location().to_url(), "/b#top");
        assert_eq!(*seen.borrow(), vec!["/b#top".to_string()]);
        assert_eq!(history.pushed(), vec!["/b#top".to_string()]);
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_replace_keeps_length() {
        let scheduler = Scheduler::new();
        let history = MemoryHistory::new(&scheduler, "/a");
        history.replace("/b");
        scheduler.tick();
        assert_eq!(history.len(), 1);
        assert_eq!(history.calls(), vec![HistoryCall::Replace("/b".into())]);
        assert!(history.pushed().is_empty());
    }

    #[test]
    fn test_unlisten() {
        let scheduler = Scheduler::new();
        let history = MemoryHistory::new(&scheduler, "/");
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let guard = history.listen(Box::new(move |_| h.set(h.get() + 1)));
        assert_eq!(history.listener_count(), 1);

        guard.run();
        assert_eq!(history.listener_count(), 0);
        history.push("/x");
        scheduler.tick();
        assert_eq!(hits.get(), 0);
    }
}
