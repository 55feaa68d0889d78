//! Tokio-backed [`Scheduler`].
//!
//! Timers are spawned on the tokio runtime the caller is running in. When a
//! decorator is used from plain synchronous code, a lazily created
//! process-wide runtime hosts the timers instead, so `delay` and `throttle`
//! work the same with or without `#[tokio::main]`.
//!
//! Inside a runtime whose clock is paused (`tokio::time::pause`, or
//! `#[tokio::test(start_paused = true)]`), timers follow the paused clock.

use std::cell::RefCell;
use std::sync::LazyLock;
use std::time::Duration;

use tokio::runtime::{Builder, Handle, Runtime};

use super::scheduler::{Scheduler, Task};

// =============================================================================
// Global Runtime
// =============================================================================

/// Process-wide runtime for timers scheduled outside any tokio runtime.
///
/// Created on first use and never dropped.
static GLOBAL_RUNTIME: LazyLock<Runtime> = LazyLock::new(|| {
    Builder::new_multi_thread()
        .worker_threads(num_cpus::get())
        .thread_name("underbar-timer")
        .enable_all()
        .build()
        .expect("Failed to create global tokio runtime")
});

thread_local! {
    static CACHED_HANDLE: RefCell<Option<Handle>> = const { RefCell::new(None) };
}

/// Returns the current runtime's handle, or the global runtime's outside one.
fn handle() -> Handle {
    if let Ok(current_handle) = Handle::try_current() {
        return current_handle;
    }

    CACHED_HANDLE.with(|cached| {
        cached
            .borrow_mut()
            .get_or_insert_with(|| GLOBAL_RUNTIME.handle().clone())
            .clone()
    })
}

// =============================================================================
// TokioScheduler
// =============================================================================

/// A [`Scheduler`] that runs each task on a tokio timer.
///
/// Every scheduled task becomes one spawned tokio task that sleeps for the
/// wait and then runs. A panicking task aborts only its own tokio task.
///
/// # Examples
///
/// ```rust
/// use underbar::decorator::{Scheduler, TokioScheduler};
/// use std::sync::mpsc;
/// use std::time::Duration;
///
/// let (sender, receiver) = mpsc::channel();
/// TokioScheduler.schedule(
///     Duration::from_millis(10),
///     Box::new(move || sender.send("fired").unwrap()),
/// );
/// assert_eq!(receiver.recv().unwrap(), "fired");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokioScheduler;

impl Scheduler for TokioScheduler {
    fn schedule(&self, wait: Duration, task: Task) {
        tracing::trace!(wait_ms = wait.as_millis(), "spawning tokio timer");
        handle().spawn(async move {
            tokio::time::sleep(wait).await;
            task();
        });
    }
}
