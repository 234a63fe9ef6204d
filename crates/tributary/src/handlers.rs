use std::fmt;
use std::rc::Rc;

pub type StartedFn = Rc<dyn Fn()>;
pub type DataFn<T> = Rc<dyn Fn(T)>;
pub type ErrorFn<E> = Rc<dyn Fn(E)>;

/// The caller's observer for one stream: `on_data` is required, the rest are optional.
///
/// Cloning is cheap (three `Rc` bumps), so a fresh bundle may be built on
/// every composition pass.
pub struct SubscriptionHandlers<T, E> {
    on_started: Option<StartedFn>,
    on_data: DataFn<T>,
    on_error: Option<ErrorFn<E>>,
}

impl<T: 'static, E: 'static> SubscriptionHandlers<T, E> {
    pub fn new(on_data: impl Fn(T) + 'static) -> Self {
        Self {
            on_started: None,
            on_data: Rc::new(on_data),
            on_error: None,
        }
    }

    pub fn on_started(mut self, f: impl Fn() + 'static) -> Self {
        self.on_started = Some(Rc::new(f));
        self
    }

    pub fn on_error(mut self, f: impl Fn(E) + 'static) -> Self {
        self.on_error = Some(Rc::new(f));
        self
    }

    pub fn emit_started(&self) {
        if let Some(f) = &self.on_started {
            f()
        }
    }

    pub fn emit_data(&self, data: T) {
        (self.on_data)(data)
    }

    pub fn emit_error(&self, err: E) {
        if let Some(f) = &self.on_error {
            f(err)
        }
    }
}

impl<T, E> Clone for SubscriptionHandlers<T, E> {
    fn clone(&self) -> Self {
        Self {
            on_started: self.on_started.clone(),
            on_data: self.on_data.clone(),
            on_error: self.on_error.clone(),
        }
    }
}

impl<T, E> fmt::Debug for SubscriptionHandlers<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriptionHandlers")
            .field("on_started", &self.on_started.is_some())
            .field("on_error", &self.on_error.is_some())
            .finish_non_exhaustive()
    }
}
