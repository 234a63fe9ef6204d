use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::Dispose;

thread_local! {
    static CURRENT_SCOPE: RefCell<Option<Weak<ScopeInner>>> = const { RefCell::new(None) };
}

/// Cleanups owned by one mounted composition, run in registration order on
/// [`Scope::dispose`].
#[derive(Clone)]
pub struct Scope {
    inner: Rc<ScopeInner>,
}

struct ScopeInner {
    disposers: RefCell<Vec<Box<dyn FnOnce()>>>,
}

impl Scope {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(ScopeInner {
                disposers: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Makes this the current scope while `f` runs.
    pub fn run<R>(&self, f: impl FnOnce() -> R) -> R {
        // Restores the outer scope on unwind too.
        struct Restore(Option<Weak<ScopeInner>>);
        impl Drop for Restore {
            fn drop(&mut self) {
                let prev = self.0.take();
                CURRENT_SCOPE.with(|current| *current.borrow_mut() = prev);
            }
        }

        let prev = CURRENT_SCOPE.with(|current| {
            current
                .borrow_mut()
                .replace(Rc::downgrade(&self.inner))
        });
        let _restore = Restore(prev);
        f()
    }

    pub fn add_disposer(&self, disposer: impl FnOnce() + 'static) {
        self.inner.disposers.borrow_mut().push(Box::new(disposer));
    }

    /// Drains and runs every disposer; a second call has nothing left to run.
    pub fn dispose(&self) {
        let disposers = std::mem::take(&mut *self.inner.disposers.borrow_mut());
        for disposer in disposers {
            disposer();
        }
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}

pub fn current_scope() -> Option<Scope> {
    CURRENT_SCOPE.with(|current| {
        current
            .borrow()
            .as_ref()
            .and_then(Weak::upgrade)
            .map(|inner| Scope { inner })
    })
}

/// Runs `f` now and ties the returned cleanup to the current scope.
pub fn scoped_effect<F>(f: F)
where
    F: FnOnce() -> Dispose + 'static,
{
    let cleanup = f();
    match current_scope() {
        Some(scope) => scope.add_disposer(move || cleanup.run()),
        None => {
            log::warn!("scoped_effect called outside of a scope; its cleanup will never run")
        }
    }
}
