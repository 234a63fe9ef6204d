pub use crate::effects::{Dispose, on_unmount};
pub use crate::effects_ext::{disposable_effect, try_disposable_effect};
pub use crate::runtime::{Composition, remember};
pub use crate::scope::{Scope, current_scope, scoped_effect};
