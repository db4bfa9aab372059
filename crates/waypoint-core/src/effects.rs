use std::cell::RefCell;
use std::rc::Rc;

/// A cleanup that runs at most once, however many clones call [`Dispose::run`].
#[derive(Clone)]
pub struct Dispose(Rc<RefCell<Option<Box<dyn FnOnce()>>>>);

impl Dispose {
    pub fn new(f: impl FnOnce() + 'static) -> Self {
        Self(Rc::new(RefCell::new(Some(Box::new(f)))))
    }

    pub fn run(&self) {
        let f = self.0.borrow_mut().take();
        if let Some(f) = f {
            f()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_clones_share_one_cleanup() {
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        let guard = Dispose::new(move || c.set(c.get() + 1));
        let shared = guard.clone();
        guard.run();
        shared.run();
        guard.run();
        assert_eq!(count.get(), 1);
    }
}
