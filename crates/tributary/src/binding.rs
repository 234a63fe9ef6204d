//! The lifecycle binding.
//!
//! [`use_subscription`] is called on every composition pass. It keeps one
//! stream open per `(key hash, enabled)` pair and routes each event to the
//! handler bundle of the most recent pass, so new closures from a re-render
//! never reopen the stream.
//!
//! Each epoch (one run of the keyed effect) owns a `stopped` flag. Teardown
//! sets the flag before asking the transport to unsubscribe, and every proxy
//! checks it first, so callbacks already in flight when the epoch ends are
//! dropped at the delivery boundary.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tributary_core::{Dispose, on_unmount, remember, try_disposable_effect};

use crate::error::Result;
use crate::handlers::SubscriptionHandlers;
use crate::options::SubscriptionDescriptor;

type LatestHandlers<T, E> = Rc<RefCell<SubscriptionHandlers<T, E>>>;

/// Binds `descriptor` to the current composition.
///
/// Must be called unconditionally on every pass (slot-based). Returns the
/// setup error if opening the stream fails; nothing is left registered in
/// that case and the next pass tries again.
///
/// No key is recorded for a failed setup, so every later pass with the same
/// key and `enabled` flag calls the transport again and will usually fail the
/// same way. A caller that gets an error should stop re-rendering with that
/// input (or disable the subscription) until the cause is fixed.
pub fn use_subscription<T: 'static, E: 'static>(
    descriptor: &SubscriptionDescriptor<T, E>,
) -> Result<()> {
    let latest: LatestHandlers<T, E> = remember(|| RefCell::new(descriptor.handlers().clone()));
    *latest.borrow_mut() = descriptor.handlers().clone();

    let deps = (descriptor.key_hash().clone(), descriptor.enabled());
    try_disposable_effect(deps, || start_epoch(descriptor, latest))
}

fn start_epoch<T: 'static, E: 'static>(
    descriptor: &SubscriptionDescriptor<T, E>,
    latest: LatestHandlers<T, E>,
) -> Result<Dispose> {
    let path = descriptor.meta().path.clone();
    if !descriptor.enabled() {
        log::debug!("subscription `{path}` disabled; idle");
        return Ok(Dispose::noop());
    }

    let stopped = Rc::new(Cell::new(false));
    let live = live_handlers(&latest, &stopped, &path);
    let subscription = match descriptor.subscribe(live) {
        Ok(subscription) => subscription,
        Err(err) => {
            // The transport may have kept the proxies; silence them.
            stopped.set(true);
            return Err(err);
        }
    };
    log::debug!(
        "subscription `{path}` opened for {}",
        descriptor.key_hash()
    );

    Ok(on_unmount(move || {
        stopped.set(true);
        log::debug!("subscription `{path}` closing");
        subscription.unsubscribe();
    }))
}

/// Proxies handed to the transport. They read `latest` at call time, never
/// the bundle that existed when the stream was opened.
fn live_handlers<T: 'static, E: 'static>(
    latest: &LatestHandlers<T, E>,
    stopped: &Rc<Cell<bool>>,
    path: &str,
) -> SubscriptionHandlers<T, E> {
    // Clone the bundle out so a handler may re-enter the binding.
    let current = {
        let latest = latest.clone();
        move || latest.borrow().clone()
    };
    let gate = {
        let stopped = stopped.clone();
        let path = path.to_owned();
        move |event: &str| {
            if stopped.get() {
                log::trace!("subscription `{path}`: dropped late {event}");
                return false;
            }
            true
        }
    };

    let on_started = {
        let (current, gate) = (current.clone(), gate.clone());
        move || {
            if gate("start") {
                current().emit_started();
            }
        }
    };
    let on_error = {
        let (current, gate) = (current.clone(), gate.clone());
        move |err: E| {
            if gate("error") {
                current().emit_error(err);
            }
        }
    };
    let on_data = move |data: T| {
        if gate("data") {
            current().emit_data(data);
        }
    };

    SubscriptionHandlers::new(on_data)
        .on_started(on_started)
        .on_error(on_error)
}
