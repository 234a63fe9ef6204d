use std::any::Any;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::scope::Scope;

thread_local! {
    static COMPOSER: RefCell<Option<Rc<RefCell<SlotTable>>>> = const { RefCell::new(None) };
}

#[derive(Default)]
struct SlotTable {
    slots: Vec<Box<dyn Any>>,
    cursor: usize,
}

/// One mounted instance of composable code.
///
/// Each call to [`Composition::compose`] is a re-render: the positional slot
/// cursor restarts at zero, so the Nth `remember` call sees the value stored
/// by the Nth call of the previous pass. Cleanups registered through
/// `scoped_effect` / `disposable_effect` live in the composition's scope and
/// run on [`Composition::dispose`] (or drop).
///
/// A pass may start another pass of the same composition (a handler that
/// re-renders synchronously). The nested pass runs to completion and the
/// outer one resumes at its own slot position.
pub struct Composition {
    slots: Rc<RefCell<SlotTable>>,
    scope: Scope,
    passes: Cell<u64>,
    depth: Cell<u32>,
}

impl Composition {
    pub fn new() -> Self {
        Self {
            slots: Rc::new(RefCell::new(SlotTable::default())),
            scope: Scope::new(),
            passes: Cell::new(0),
            depth: Cell::new(0),
        }
    }

    pub fn compose<R>(&self, f: impl FnOnce() -> R) -> R {
        // Non-panicking guard (restores the outer pass on unwind)
        struct Restore<'a> {
            composition: &'a Composition,
            prev: Option<Rc<RefCell<SlotTable>>>,
            outer_cursor: usize,
        }
        impl Drop for Restore<'_> {
            fn drop(&mut self) {
                let prev = self.prev.take();
                COMPOSER.with(|c| *c.borrow_mut() = prev);

                let depth = self.composition.depth.get() - 1;
                self.composition.depth.set(depth);
                if depth > 0 {
                    self.composition.slots.borrow_mut().cursor = self.outer_cursor;
                }
            }
        }

        let outer_cursor = std::mem::take(&mut self.slots.borrow_mut().cursor);
        self.passes.set(self.passes.get() + 1);
        self.depth.set(self.depth.get() + 1);

        let prev = COMPOSER.with(|c| c.borrow_mut().replace(self.slots.clone()));
        let _restore = Restore {
            composition: self,
            prev,
            outer_cursor,
        };
        self.scope.run(f)
    }

    /// Number of `compose` passes run so far, nested ones included.
    pub fn passes(&self) -> u64 {
        self.passes.get()
    }

    /// Final unmount: runs every registered cleanup, then forgets all slots.
    /// Composing again afterwards mounts from scratch.
    pub fn dispose(&self) {
        self.scope.dispose();
        let table = std::mem::take(&mut *self.slots.borrow_mut());
        drop(table);
    }
}

impl Default for Composition {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Composition {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn current_table() -> Rc<RefCell<SlotTable>> {
    match COMPOSER.with(|c| c.borrow().clone()) {
        Some(table) => table,
        None => panic!("remember called outside of Composition::compose"),
    }
}

/// Slot-based remember (sequential composition only)
pub fn remember<T: 'static>(init: impl FnOnce() -> T) -> Rc<T> {
    let table = current_table();
    let (cursor, existing) = {
        let mut t = table.borrow_mut();
        let cursor = t.cursor;
        t.cursor += 1;
        let existing = t
            .slots
            .get(cursor)
            .map(|slot| slot.downcast_ref::<Rc<T>>().cloned());
        (cursor, existing)
    };

    match existing {
        Some(Some(rc)) => rc,
        Some(None) => {
            log::warn!(
                "remember: slot {} type changed; replacing. \
                 Remembered calls must run in the same order on every pass.",
                cursor
            );
            let rc: Rc<T> = Rc::new(init());
            table.borrow_mut().slots[cursor] = Box::new(rc.clone());
            rc
        }
        None => {
            let rc: Rc<T> = Rc::new(init());
            table.borrow_mut().slots.push(Box::new(rc.clone()));
            rc
        }
    }
}
