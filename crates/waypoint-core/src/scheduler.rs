//! Deferred task queue.
//!
//! All deferred work (history commits, component re-renders) goes through one
//! `Scheduler`. Nothing runs until the owner calls [`Scheduler::tick`], which
//! drains the queue in FIFO order, including tasks enqueued by tasks that ran
//! earlier in the same tick. Tests drive this explicitly: "wait one tick" is a
//! call to `tick()`.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

pub const DEFAULT_MAX_TASKS_PER_TICK: usize = 10_000;

type Task = Box<dyn FnOnce()>;

#[derive(Clone)]
pub struct Scheduler {
    inner: Rc<SchedulerInner>,
}

struct SchedulerInner {
    queue: RefCell<VecDeque<Task>>,
    max_per_tick: Cell<usize>,
    running: Cell<bool>,
    ticks: Cell<u64>,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(SchedulerInner {
                queue: RefCell::new(VecDeque::new()),
                max_per_tick: Cell::new(DEFAULT_MAX_TASKS_PER_TICK),
                running: Cell::new(false),
                ticks: Cell::new(0),
            }),
        }
    }

    /// Ceiling on tasks run by a single `tick`. Anything beyond it stays queued.
    pub fn with_max_tasks_per_tick(self, max: usize) -> Self {
        self.inner.max_per_tick.set(max.max(1));
        self
    }

    pub fn schedule(&self, task: impl FnOnce() + 'static) {
        self.inner.queue.borrow_mut().push_back(Box::new(task));
    }

    pub fn pending(&self) -> usize {
        self.inner.queue.borrow().len()
    }

    pub fn is_idle(&self) -> bool {
        self.pending() == 0
    }

    /// Number of completed top-level ticks.
    pub fn ticks(&self) -> u64 {
        self.inner.ticks.get()
    }

    /// Run queued tasks until the queue is empty or the ceiling is reached.
    ///
    /// Returns the number of tasks run. A `tick` from inside a running task
    /// returns 0; the outer tick picks up whatever was queued.
    pub fn tick(&self) -> usize {
        if self.inner.running.replace(true) {
            return 0;
        }
        let max = self.inner.max_per_tick.get();
        let mut ran = 0;
        loop {
            if ran >= max {
                log::warn!(
                    "scheduler: {} tasks in one tick; deferring {} to the next",
                    ran,
                    self.pending()
                );
                break;
            }
            let next = self.inner.queue.borrow_mut().pop_front();
            match next {
                Some(task) => {
                    task();
                    ran += 1;
                }
                None => break,
            }
        }
        self.inner.running.set(false);
        self.inner.ticks.set(self.inner.ticks.get() + 1);
        log::trace!("scheduler: tick {} ran {ran} task(s)", self.ticks());
        ran
    }
}
