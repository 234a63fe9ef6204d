use std::rc::Rc;

use serde_json::Value;
use tributary_core::Dispose;

use crate::error::Result;
use crate::handlers::SubscriptionHandlers;

/// Handle to a live stream.
///
/// `unsubscribe` asks the transport to stop and must be idempotent. Delivery
/// may still happen for a short while after the request; the binding filters
/// that out itself.
pub trait Unsubscribable {
    fn unsubscribe(&self);
}

impl Unsubscribable for Dispose {
    fn unsubscribe(&self) {
        self.run()
    }
}

impl<U: Unsubscribable + ?Sized> Unsubscribable for Box<U> {
    fn unsubscribe(&self) {
        (**self).unsubscribe()
    }
}

/// The client side that actually opens streams.
///
/// `path` is the dotted procedure identifier and `input` is `None` when the
/// procedure takes no input. Implementations must accept many concurrent
/// streams and stop calling `handlers` in finite time after `unsubscribe`.
pub trait Transport<T, E> {
    fn subscription(
        &self,
        path: &str,
        input: Option<&Value>,
        handlers: SubscriptionHandlers<T, E>,
    ) -> Result<Box<dyn Unsubscribable>>;
}

impl<T, E, X: Transport<T, E> + ?Sized> Transport<T, E> for Rc<X> {
    fn subscription(
        &self,
        path: &str,
        input: Option<&Value>,
        handlers: SubscriptionHandlers<T, E>,
    ) -> Result<Box<dyn Unsubscribable>> {
        (**self).subscription(path, input, handlers)
    }
}
