//! # Subscriptions
//!
//! Tributary bridges server-pushed streams (procedures that yield many values
//! over time) into a composition, with automatic start and teardown.
//!
//! Two pieces, used in this order:
//!
//! - [`subscription_options`] builds an immutable [`SubscriptionDescriptor`]
//!   from a transport, a procedure path, an input, and the caller's handlers.
//!   It is cheap and side-effect free, so build a new one on every pass.
//! - [`use_subscription`] binds a descriptor to the current
//!   [`Composition`](tributary_core::Composition). It opens exactly one stream
//!   per `(key, enabled)` pair, tears it down when either changes or the
//!   composition is disposed, and always delivers to the latest handlers.
//!
//! ```rust
//! use std::rc::Rc;
//! use serde_json::{Value, json};
//! use tributary::*;
//! use tributary_core::{Composition, Dispose};
//!
//! struct Quiet;
//!
//! impl Transport<String, String> for Quiet {
//!     fn subscription(
//!         &self,
//!         path: &str,
//!         _input: Option<&Value>,
//!         handlers: SubscriptionHandlers<String, String>,
//!     ) -> tributary::Result<Box<dyn Unsubscribable>> {
//!         handlers.emit_started();
//!         let path = path.to_owned();
//!         Ok(Box::new(Dispose::new(move || log::info!("{path} closed"))))
//!     }
//! }
//!
//! let transport = Rc::new(Quiet);
//! let composition = Composition::new();
//! composition
//!     .compose(|| {
//!         let descriptor = subscription_options(
//!             transport.clone(),
//!             ["chat", "onMessage"],
//!             json!({ "room": 1 }),
//!             SubscriptionOptions::new(|msg: String| println!("{msg}"))
//!                 .on_started(|| println!("listening")),
//!         );
//!         use_subscription(&descriptor)
//!     })
//!     .unwrap();
//! composition.dispose();
//! ```
//!
//! Pass [`SKIP`] as the input while it is not known yet; the descriptor is
//! then disabled and no stream is opened.

pub mod binding;
pub mod error;
pub mod handlers;
pub mod key;
pub mod options;
pub mod transport;


pub use binding::use_subscription;
pub use error::{Result, SubscribeError};
pub use handlers::SubscriptionHandlers;
pub use key::{Input, KeyHash, QueryKey, SKIP, hash_key};
pub use options::{ProcedureMeta, SubscriptionDescriptor, SubscriptionOptions, subscription_options};
pub use transport::{Transport, Unsubscribable};
