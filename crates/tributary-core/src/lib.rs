//! # Compositions, Slots, and Effects
//!
//! `tributary-core` is the small single-threaded runtime that hosts
//! tributary's bindings. There are three main pieces:
//!
//! - `Composition`: a mounted instance that is re-run ("composed") whenever
//!   the surrounding app decides its inputs changed.
//! - `remember`: storage bound to a composition's slots.
//! - `disposable_effect` / `scoped_effect`: side-effects with cleanup.
//!
//! ## Remembered state
//!
//! ```rust
//! use std::cell::Cell;
//! use tributary_core::*;
//!
//! let composition = Composition::new();
//! for _ in 0..3 {
//!     composition.compose(|| {
//!         let renders = remember(|| Cell::new(0));
//!         renders.set(renders.get() + 1);
//!     });
//! }
//! let total = composition.compose(|| remember(|| Cell::new(0)).get());
//! assert_eq!(total, 3);
//! ```
//!
//! `remember` is order-based: the Nth call in a composition pass always
//! refers to the Nth stored value, so remembered calls must not sit behind
//! conditionals.
//!
//! ## Effects and cleanup
//!
//! `disposable_effect(key, effect)` runs `effect` on the first pass and again
//! whenever `key` changes, running the previous cleanup first. The last
//! cleanup runs when the composition is disposed:
//!
//! ```rust
//! use tributary_core::*;
//!
//! let composition = Composition::new();
//! composition.compose(|| {
//!     disposable_effect("feed", || {
//!         log::info!("feed opened");
//!         on_unmount(|| log::info!("feed closed"))
//!     });
//! });
//! composition.dispose();
//! ```

pub mod effects;
pub mod effects_ext;
pub mod prelude;
pub mod runtime;
pub mod scope;
pub mod tests;

pub use effects::*;
pub use effects_ext::*;
pub use prelude::*;
pub use runtime::*;
pub use scope::*;
