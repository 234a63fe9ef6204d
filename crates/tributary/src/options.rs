//! Building subscription descriptors.
//!
//! A [`SubscriptionDescriptor`] is everything [`use_subscription`](crate::use_subscription)
//! needs: the cache key, whether the stream should run, the caller's handlers,
//! and a `subscribe` capability bound to the procedure path and input.
//! Building one is pure; nothing is opened until `subscribe` is called.

use std::fmt;
use std::rc::Rc;

use crate::error::{Result, SubscribeError};
use crate::handlers::SubscriptionHandlers;
use crate::key::{Input, KeyHash, QueryKey};
use crate::transport::{Transport, Unsubscribable};

/// Caller-facing options: the handler bundle plus an optional `enabled` override.
pub struct SubscriptionOptions<T, E> {
    enabled: Option<bool>,
    handlers: SubscriptionHandlers<T, E>,
}

impl<T: 'static, E: 'static> SubscriptionOptions<T, E> {
    pub fn new(on_data: impl Fn(T) + 'static) -> Self {
        Self::from_handlers(SubscriptionHandlers::new(on_data))
    }

    pub fn from_handlers(handlers: SubscriptionHandlers<T, E>) -> Self {
        Self {
            enabled: None,
            handlers,
        }
    }

    /// Overrides the default of "enabled unless the input is skipped".
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    pub fn on_started(mut self, f: impl Fn() + 'static) -> Self {
        self.handlers = self.handlers.on_started(f);
        self
    }

    pub fn on_error(mut self, f: impl Fn(E) + 'static) -> Self {
        self.handlers = self.handlers.on_error(f);
        self
    }
}

/// Metadata carried alongside a descriptor for tooling and logs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcedureMeta {
    /// Dotted procedure identifier, e.g. `post.onAdd`.
    pub path: String,
}

type SubscribeFn<T, E> = Rc<dyn Fn(SubscriptionHandlers<T, E>) -> Result<Box<dyn Unsubscribable>>>;

pub struct SubscriptionDescriptor<T, E> {
    query_key: QueryKey,
    key_hash: KeyHash,
    enabled: bool,
    handlers: SubscriptionHandlers<T, E>,
    subscribe: SubscribeFn<T, E>,
    meta: ProcedureMeta,
}

impl<T: 'static, E: 'static> SubscriptionDescriptor<T, E> {
    pub fn new(
        transport: impl Transport<T, E> + 'static,
        query_key: QueryKey,
        opts: SubscriptionOptions<T, E>,
    ) -> Self {
        let skipped = query_key.input().is_skip();
        let enabled = opts.enabled.unwrap_or(!skipped);
        let path = query_key.dotted_path();

        if enabled && skipped {
            log::warn!(
                "subscription `{path}` was force-enabled while its input is skipped; \
                 subscribing will fail until an input is provided"
            );
        }

        let subscribe: SubscribeFn<T, E> = {
            let path = path.clone();
            let input = query_key.input().clone();
            Rc::new(move |live: SubscriptionHandlers<T, E>| {
                if input.is_skip() {
                    return Err(SubscribeError::MissingInput { path: path.clone() });
                }
                transport.subscription(&path, input.effective(), live)
            })
        };

        Self {
            key_hash: query_key.key_hash(),
            query_key,
            enabled,
            handlers: opts.handlers,
            subscribe,
            meta: ProcedureMeta { path },
        }
    }

    /// Opens an independent stream delivering to `live`.
    pub fn subscribe(&self, live: SubscriptionHandlers<T, E>) -> Result<Box<dyn Unsubscribable>> {
        (self.subscribe)(live)
    }
}

impl<T, E> SubscriptionDescriptor<T, E> {
    pub fn query_key(&self) -> &QueryKey {
        &self.query_key
    }

    pub fn key_hash(&self) -> &KeyHash {
        &self.key_hash
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn handlers(&self) -> &SubscriptionHandlers<T, E> {
        &self.handlers
    }

    pub fn meta(&self) -> &ProcedureMeta {
        &self.meta
    }
}

impl<T, E> Clone for SubscriptionDescriptor<T, E> {
    fn clone(&self) -> Self {
        Self {
            query_key: self.query_key.clone(),
            key_hash: self.key_hash.clone(),
            enabled: self.enabled,
            handlers: self.handlers.clone(),
            subscribe: self.subscribe.clone(),
            meta: self.meta.clone(),
        }
    }
}

impl<T, E> fmt::Debug for SubscriptionDescriptor<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriptionDescriptor")
            .field("query_key", &self.query_key)
            .field("enabled", &self.enabled)
            .field("meta", &self.meta)
            .finish_non_exhaustive()
    }
}

/// Builds the descriptor for the procedure at `path` with `input`.
pub fn subscription_options<T, E, I, S>(
    transport: impl Transport<T, E> + 'static,
    path: I,
    input: impl Into<Input>,
    opts: SubscriptionOptions<T, E>,
) -> SubscriptionDescriptor<T, E>
where
    T: 'static,
    E: 'static,
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    SubscriptionDescriptor::new(transport, QueryKey::new(path, input.into()), opts)
}
