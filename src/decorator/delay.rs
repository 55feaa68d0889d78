//! Deferred one-shot execution.

use std::time::Duration;

use super::scheduler::Scheduler;

/// Schedules `function(arguments)` to run once after `wait` on `scheduler`.
///
/// Returns immediately. The call cannot be cancelled, and its result is
/// discarded. A `wait` of zero still defers the call to the scheduler.
///
/// # Examples
///
/// ```rust
/// use underbar::decorator::{ManualScheduler, delay_on};
/// use std::sync::{Arc, Mutex};
/// use std::time::Duration;
///
/// let scheduler = ManualScheduler::new();
/// let log = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&log);
/// delay_on(
///     &scheduler,
///     move |(left, right): (i32, i32)| sink.lock().unwrap().push(left + right),
///     Duration::from_millis(100),
///     (1, 2),
/// );
///
/// assert!(log.lock().unwrap().is_empty());
/// scheduler.advance(Duration::from_millis(100));
/// assert_eq!(*log.lock().unwrap(), vec![3]);
/// ```
pub fn delay_on<S, A, R, F>(scheduler: &S, function: F, wait: Duration, arguments: A)
where
    S: Scheduler + ?Sized,
    A: Send + 'static,
    F: FnOnce(A) -> R + Send + 'static,
{
    tracing::debug!(decorator = "delay", wait_ms = wait.as_millis(), "scheduling deferred call");
    scheduler.schedule(
        wait,
        Box::new(move || {
            let _ = function(arguments);
        }),
    );
}

/// Schedules `function(arguments)` to run once after `wait` on a tokio timer.
///
/// See [`delay_on`] and [`TokioScheduler`](super::TokioScheduler).
#[cfg(feature = "async")]
#[inline]
pub fn delay<A, R, F>(function: F, wait: Duration, arguments: A)
where
    A: Send + 'static,
    F: FnOnce(A) -> R + Send + 'static,
{
    delay_on(&super::runtime::TokioScheduler, function, wait, arguments);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decorator::ManualScheduler;
    use parking_lot::Mutex;
    use rstest::rstest;
    use std::sync::Arc;

    #[rstest]
    #[case(Duration::ZERO)]
    #[case(Duration::from_millis(1))]
    #[case(Duration::from_secs(3))]
    fn test_delay_fires_exactly_at_wait(#[case] wait: Duration) {
        let scheduler = ManualScheduler::new();
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&calls);
        delay_on(&scheduler, move |value: u8| sink.lock().push(value), wait, 9);

        if let Some(before) = wait.checked_sub(Duration::from_nanos(1)) {
            scheduler.advance(before);
            assert!(calls.lock().is_empty());
        }
        scheduler.advance(wait.saturating_sub(scheduler.now()));
        assert_eq!(*calls.lock(), vec![9]);
    }

    #[rstest]
    fn test_each_delay_fires_independently() {
        let scheduler = ManualScheduler::new();
        let calls = Arc::new(Mutex::new(Vec::new()));
        for (wait, label) in [(20, "b"), (10, "a")] {
            let sink = Arc::clone(&calls);
            delay_on(
                &scheduler,
                move |()| sink.lock().push(label),
                Duration::from_millis(wait),
                (),
            );
        }
        assert_eq!(scheduler.advance(Duration::from_millis(20)), 2);
        assert_eq!(*calls.lock(), vec!["a", "b"]);
    }
}
