use crate::{Dispose, on_unmount, remember, scoped_effect};
use std::cell::RefCell;
use std::convert::Infallible;

/// cleanup on key change or unmount
pub fn disposable_effect<K: PartialEq + Clone + 'static>(
    key: K,
    effect: impl FnOnce() -> Dispose + 'static,
) {
    let applied: Result<(), Infallible> = try_disposable_effect(key, move || Ok(effect()));
    match applied {
        Ok(()) => {}
        Err(never) => match never {},
    }
}

/// Like [`disposable_effect`], but the effect may fail to start.
///
/// The key is recorded before `effect` runs, so a pass nested inside the
/// effect (a handler that re-renders synchronously) sees it as current and
/// starts nothing. A failed start clears the key again and records no
/// cleanup: the previous epoch stays torn down, the next composition with the
/// same key tries again, and the error is returned to the caller as-is.
/// If a nested pass switched to a different key meanwhile, the epoch that
/// just started is cleaned up at once and the nested one is kept.
pub fn try_disposable_effect<K, E>(
    key: K,
    effect: impl FnOnce() -> Result<Dispose, E>,
) -> Result<(), E>
where
    K: PartialEq + Clone + 'static,
{
    // Slot-based (like Compose). Callers must invoke this unconditionally per pass.
    let last_key = remember(|| RefCell::new(None::<K>));
    let cleanup_slot = remember(|| RefCell::new(None::<Dispose>));
    let installed = remember(|| RefCell::new(false));

    // Install a single unmount disposer for this callsite.
    if !installed.replace(true) {
        let cleanup_slot = cleanup_slot.clone();
        scoped_effect(move || {
            on_unmount(move || {
                let previous = cleanup_slot.borrow_mut().take();
                if let Some(d) = previous {
                    d.run();
                }
            })
        });
    }

    if last_key.borrow().as_ref() == Some(&key) {
        return Ok(());
    }

    // Key change: cleanup previous + run new effect
    let starting = key.clone();
    *last_key.borrow_mut() = Some(key);
    let previous = cleanup_slot.borrow_mut().take();
    if let Some(d) = previous {
        d.run();
    }

    match effect() {
        Ok(d) => {
            // A nested pass moved to another key while we were starting.
            let superseded =
                last_key.borrow().as_ref() != Some(&starting) || cleanup_slot.borrow().is_some();
            if superseded {
                d.run();
            } else {
                *cleanup_slot.borrow_mut() = Some(d);
            }
            Ok(())
        }
        Err(err) => {
            if last_key.borrow().as_ref() == Some(&starting) {
                *last_key.borrow_mut() = None;
            }
            Err(err)
        }
    }
}
