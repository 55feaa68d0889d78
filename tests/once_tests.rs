#![cfg(feature = "decorator")]
//! Integration tests for `once`.
//!
//! Tests cover:
//! - Single execution and result replay
//! - Argument forwarding on the first call only
//! - Panics in the single execution
//! - Independence of separate wrappers

use rstest::rstest;
use std::cell::{Cell, RefCell};
use std::panic::{AssertUnwindSafe, catch_unwind};
use underbar::Error;
use underbar::decorator::once;

// =============================================================================
// Single Execution
// =============================================================================

#[rstest]
fn once_executes_a_single_time() {
    let runs = Cell::new(0);
    let increment = once(|()| {
        runs.set(runs.get() + 1);
        runs.get()
    });

    assert_eq!(increment.call(()), 1);
    assert_eq!(increment.call(()), 1);
    assert_eq!(increment.call(()), 1);
    assert_eq!(runs.get(), 1);
}

#[rstest]
fn once_forwards_first_arguments_only() {
    let seen = RefCell::new(Vec::new());
    let record = once(|(name, count): (&str, u32)| {
        seen.borrow_mut().push((name, count));
        format!("{name}x{count}")
    });

    assert_eq!(record.call(("moe", 2)), "moex2");
    assert_eq!(record.call(("larry", 9)), "moex2");
    assert_eq!(*seen.borrow(), vec![("moe", 2)]);
}

#[rstest]
fn once_replays_unit_result() {
    let runs = Cell::new(0);
    let side_effect = once(|()| runs.set(runs.get() + 1));
    side_effect.call(());
    side_effect.call(());
    assert_eq!(runs.get(), 1);
    assert!(side_effect.is_called());
}

#[rstest]
fn once_replays_falsy_result() {
    let runs = Cell::new(0);
    let nothing = once(|()| {
        runs.set(runs.get() + 1);
        None::<i32>
    });
    assert_eq!(nothing.call(()), None);
    assert_eq!(nothing.call(()), None);
    assert_eq!(runs.get(), 1);
}

// =============================================================================
// Panics
// =============================================================================

#[rstest]
fn once_panic_reaches_first_caller() {
    let explode = once(|()| -> u8 { panic!("first call failed") });
    let outcome = catch_unwind(AssertUnwindSafe(|| explode.call(())));
    let payload = outcome.expect_err("first call should panic");
    assert_eq!(payload.downcast_ref::<&str>(), Some(&"first call failed"));
}

#[rstest]
fn once_never_retries_after_panic() {
    let attempts = Cell::new(0);
    let flaky = once(|()| -> u8 {
        attempts.set(attempts.get() + 1);
        panic!("flaky")
    });

    let _ = catch_unwind(AssertUnwindSafe(|| flaky.call(())));
    assert!(matches!(flaky.try_call(()), Err(Error::Poisoned { decorator: "once" })));
    assert!(matches!(flaky.try_call(()), Err(Error::Poisoned { .. })));
    assert_eq!(attempts.get(), 1);
    assert!(flaky.get().is_none());
}

#[rstest]
fn once_call_panics_with_error_message_when_poisoned() {
    let explode = once(|()| -> u8 { panic!("boom") });
    let _ = catch_unwind(AssertUnwindSafe(|| explode.call(())));

    let outcome = catch_unwind(AssertUnwindSafe(|| explode.call(())));
    let payload = outcome.expect_err("poisoned call should panic");
    let message = payload.downcast_ref::<String>().cloned().unwrap_or_default();
    assert!(message.contains("panicked during its only execution"));
}

// =============================================================================
// Re-entrancy
// =============================================================================

#[rstest]
fn once_reentrant_call_is_an_error() {
    use std::rc::Rc;

    type Slot = Rc<RefCell<Option<Rc<dyn Fn() -> String>>>>;

    let slot: Slot = Rc::new(RefCell::new(None));
    let inner_slot = Rc::clone(&slot);
    let wrapper = Rc::new(once(move |()| {
        let nested = inner_slot.borrow().clone();
        nested.map_or_else(|| String::from("unlinked"), |call_again| call_again())
    }));

    let weak = Rc::downgrade(&wrapper);
    let call_again: Rc<dyn Fn() -> String> = Rc::new(move || {
        weak.upgrade().map_or_else(String::new, |outer| match outer.try_call(()) {
            Ok(value) => value,
            Err(error) => error.to_string(),
        })
    });
    *slot.borrow_mut() = Some(call_again);

    assert_eq!(
        wrapper.call(()),
        "once: called re-entrantly from inside the wrapped function"
    );
    assert!(!wrapper.is_poisoned());
    slot.borrow_mut().take();
}

// =============================================================================
// Independence
// =============================================================================

#[rstest]
fn once_wrappers_do_not_share_state() {
    let runs = Cell::new(0);
    let body = |()| {
        runs.set(runs.get() + 1);
        runs.get()
    };
    let first = once(body);
    let second = once(body);

    assert_eq!(first.call(()), 1);
    assert_eq!(second.call(()), 2);
    assert_eq!(first.call(()), 1);
    assert_eq!(runs.get(), 2);
}
