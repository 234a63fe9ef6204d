#[cfg(test)]
mod tests {
    use crate::effects::*;
    use crate::effects_ext::*;
    use crate::runtime::*;
    use crate::scope::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[test]
    fn test_dispose_runs_once() {
        let runs = Rc::new(Cell::new(0));
        let d = {
            let runs = runs.clone();
            Dispose::new(move || runs.set(runs.get() + 1))
        };
        let d2 = d.clone();

        assert!(!d.is_disposed());
        d.run();
        d2.run();
        d.run();
        assert_eq!(runs.get(), 1);
        assert!(d2.is_disposed());
    }

    #[test]
    fn test_noop_dispose() {
        let d = Dispose::noop();
        assert!(d.is_disposed());
        d.run();
    }

    #[test]
    fn test_scope_explicit_dispose() {
        let cleaned_up = Rc::new(RefCell::new(false));

        let scope = Scope::new();
        let cleaned_up_clone = cleaned_up.clone();
        scope.add_disposer(move || {
            *cleaned_up_clone.borrow_mut() = true;
        });

        assert!(!*cleaned_up.borrow());
        scope.dispose();
        assert!(*cleaned_up.borrow());
    }

    #[test]
    fn test_scope_dispose_twice_runs_once() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let scope = Scope::new();
        for n in 1..=2 {
            let order = order.clone();
            scope.add_disposer(move || order.borrow_mut().push(n));
        }

        scope.dispose();
        scope.dispose();
        assert_eq!(*order.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_scoped_effect_registers_in_current_scope() {
        let closed = Rc::new(Cell::new(false));
        let scope = Scope::new();
        scope.run(|| {
            let closed = closed.clone();
            scoped_effect(move || on_unmount(move || closed.set(true)));
        });

        assert!(!closed.get());
        assert!(current_scope().is_none());
        scope.dispose();
        assert!(closed.get());
    }

    #[test]
    fn test_positional_remember_survives_recompose() {
        let composition = Composition::new();
        for _ in 0..3 {
            composition.compose(|| {
                let a = remember(|| Cell::new(0));
                let b = remember(|| RefCell::new(String::from("x")));
                a.set(a.get() + 1);
                b.borrow_mut().push('y');
            });
        }
        let (a, b) = composition.compose(|| {
            let a = remember(|| Cell::new(0));
            let b = remember(|| RefCell::new(String::new()));
            let out = (a.get(), b.borrow().clone());
            out
        });
        assert_eq!(a, 3);
        assert_eq!(b, "xyyy");
        assert_eq!(composition.passes(), 4);
    }

    #[test]
    fn test_nested_pass_resumes_outer_slots() {
        let composition = Rc::new(Composition::new());
        let outer = composition.clone();
        let (first, second) = outer.compose(|| {
            let first = remember(|| "first");
            composition.compose(|| {
                remember(|| "first");
                remember(|| "second");
            });
            let second = remember(|| "other");
            (*first, *second)
        });

        assert_eq!(first, "first");
        assert_eq!(second, "second");
        assert_eq!(composition.passes(), 2);
    }

    #[test]
    fn test_remember_slot_type_change_replaces() {
        let composition = Composition::new();
        composition.compose(|| {
            remember(|| 1u32);
        });
        let s = composition.compose(|| remember(|| "fresh"));
        assert_eq!(*s, "fresh");
    }

    #[test]
    #[should_panic(expected = "outside of Composition::compose")]
    fn test_remember_outside_composition_panics() {
        let _ = remember(|| 0);
    }

    fn counting_effect(key: u32, log: &Rc<RefCell<Vec<String>>>) {
        let log = log.clone();
        disposable_effect(key, move || {
            log.borrow_mut().push(format!("start {key}"));
            on_unmount(move || log.borrow_mut().push(format!("stop {key}")))
        });
    }

    #[test]
    fn test_disposable_effect_runs_on_key_change_only() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let composition = Composition::new();

        composition.compose(|| counting_effect(1, &log));
        composition.compose(|| counting_effect(1, &log));
        composition.compose(|| counting_effect(2, &log));
        composition.compose(|| counting_effect(2, &log));

        assert_eq!(*log.borrow(), vec!["start 1", "stop 1", "start 2"]);

        composition.dispose();
        composition.dispose();
        assert_eq!(
            *log.borrow(),
            vec!["start 1", "stop 1", "start 2", "stop 2"]
        );
    }

    #[test]
    fn test_drop_composition_runs_cleanup() {
        let log = Rc::new(RefCell::new(Vec::new()));
        {
            let composition = Composition::new();
            composition.compose(|| counting_effect(7, &log));
        }
        assert_eq!(*log.borrow(), vec!["start 7", "stop 7"]);
    }

    #[test]
    fn test_try_disposable_effect_failure_leaves_nothing_registered() {
        let attempts = Rc::new(Cell::new(0));
        let stops = Rc::new(Cell::new(0));
        let composition = Composition::new();

        let pass = |fail: bool| {
            let attempts = attempts.clone();
            let stops = stops.clone();
            composition.compose(move || {
                try_disposable_effect("k", move || {
                    attempts.set(attempts.get() + 1);
                    if fail {
                        return Err("boom");
                    }
                    Ok(on_unmount(move || stops.set(stops.get() + 1)))
                })
            })
        };

        assert_eq!(pass(true), Err("boom"));
        // Same key again: the failed start was not recorded, so it retries.
        assert_eq!(pass(false), Ok(()));
        assert_eq!(pass(false), Ok(()));
        assert_eq!(attempts.get(), 2);

        composition.dispose();
        assert_eq!(stops.get(), 1);
    }

    fn reentrant_effect(
        composition: &Rc<Composition>,
        key: u32,
        nested_key: Option<u32>,
        log: &Rc<RefCell<Vec<String>>>,
    ) {
        let (c, log2) = (composition.clone(), log.clone());
        composition.compose(|| {
            disposable_effect(key, move || {
                log2.borrow_mut().push(format!("start {key}"));
                if let Some(next) = nested_key {
                    reentrant_effect(&c, next, None, &log2);
                }
                on_unmount(move || log2.borrow_mut().push(format!("stop {key}")))
            });
        });
    }

    #[test]
    fn test_nested_pass_with_same_key_starts_nothing() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let composition = Rc::new(Composition::new());

        reentrant_effect(&composition, 1, Some(1), &log);
        composition.dispose();

        assert_eq!(*log.borrow(), vec!["start 1", "stop 1"]);
    }

    #[test]
    fn test_nested_pass_with_new_key_supersedes_outer() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let composition = Rc::new(Composition::new());

        reentrant_effect(&composition, 1, Some(2), &log);
        assert_eq!(*log.borrow(), vec!["start 1", "start 2", "stop 1"]);

        composition.dispose();
        assert_eq!(
            *log.borrow(),
            vec!["start 1", "start 2", "stop 1", "stop 2"]
        );
    }
}
