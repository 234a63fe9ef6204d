use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Cleanup handle shared between an effect and whoever tears it down.
#[derive(Clone)]
pub struct Dispose(Rc<RefCell<Option<Box<dyn FnOnce()>>>>);

impl Dispose {
    pub fn new(f: impl FnOnce() + 'static) -> Self {
        Self(Rc::new(RefCell::new(Some(Box::new(f)))))
    }

    /// A handle with nothing to clean up.
    pub fn noop() -> Self {
        Self(Rc::new(RefCell::new(None)))
    }

    /// Runs at most once (safe to call multiple times, from any clone).
    pub fn run(&self) {
        // Release the borrow before calling so the cleanup may touch this handle.
        let f = self.0.borrow_mut().take();
        if let Some(f) = f {
            f()
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.0.borrow().is_none()
    }
}

impl fmt::Debug for Dispose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispose")
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

/// Helper to register cleanup inside effect.
pub fn on_unmount(f: impl FnOnce() + 'static) -> Dispose {
    Dispose::new(f)
}
