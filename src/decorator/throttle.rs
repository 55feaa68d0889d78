//! Rate-limited execution.
//!
//! A [`Throttle`] runs its function at most once per cooldown window:
//!
//! - an idle wrapper runs the function immediately (the leading call) and
//!   opens a window of `wait`
//! - calls inside an open window are suppressed, and the wrapper remembers
//!   the arguments of the latest one
//! - when the window closes after suppressing at least one call, the
//!   function runs once more with those arguments (the trailing call) and a
//!   new window opens; otherwise the wrapper goes idle
//!
//! Windows are timed by a [`Scheduler`]. Timer callbacks only hold a weak
//! reference to the wrapper, so dropping it discards any pending trailing
//! call.

use std::fmt;
use std::marker::PhantomData;
use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;

use super::scheduler::Scheduler;

const DECORATOR: &str = "throttle";

struct Window<A> {
    active: bool,
    pending_calls: usize,
    pending_arguments: Option<A>,
}

struct Shared<A, F, S> {
    window: Mutex<Window<A>>,
    function: Mutex<F>,
    wait: Duration,
    scheduler: S,
}

/// A function wrapper that invokes the function at most once per window.
///
/// # Type Parameters
///
/// * `A` - The argument list (a tuple for several arguments)
/// * `R` - The result type of the wrapped function
/// * `F` - The wrapped function
/// * `S` - The [`Scheduler`] timing the windows
///
/// # Thread Safety
///
/// `Throttle` is `Send + Sync` when `A` and `F` are `Send`. The window
/// state is never locked while the wrapped function runs.
///
/// # Examples
///
/// ```rust
/// use underbar::decorator::{ManualScheduler, throttle_on};
/// use std::sync::{Arc, Mutex};
/// use std::time::Duration;
///
/// let scheduler = ManualScheduler::new();
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&seen);
/// let save = throttle_on(
///     move |draft: &'static str| sink.lock().unwrap().push(draft),
///     Duration::from_millis(100),
///     scheduler.clone(),
/// );
///
/// assert!(save.call("a").is_some());
/// assert!(save.call("ab").is_none());
/// assert!(save.call("abc").is_none());
///
/// scheduler.advance(Duration::from_millis(100));
/// assert_eq!(*seen.lock().unwrap(), vec!["a", "abc"]);
/// ```
pub struct Throttle<A, R, F, S> {
    shared: Arc<Shared<A, F, S>>,
    _result: PhantomData<fn() -> R>,
}

impl<A, R, F, S> Throttle<A, R, F, S>
where
    A: Send + 'static,
    F: FnMut(A) -> R + Send + 'static,
    S: Scheduler + 'static,
{
    /// Wraps `function` with windows of `wait` timed by `scheduler`.
    pub fn new(function: F, wait: Duration, scheduler: S) -> Self {
        Self {
            shared: Arc::new(Shared {
                window: Mutex::new(Window {
                    active: false,
                    pending_calls: 0,
                    pending_arguments: None,
                }),
                function: Mutex::new(function),
                wait,
                scheduler,
            }),
            _result: PhantomData,
        }
    }

    /// Calls the wrapper.
    ///
    /// Returns `Some` with the function's result for a leading call, or
    /// `None` when the call was suppressed.
    pub fn call(&self, arguments: A) -> Option<R> {
        {
            let mut window = self.shared.window.lock();
            if window.active {
                window.pending_calls += 1;
                window.pending_arguments = Some(arguments);
                tracing::trace!(
                    decorator = DECORATOR,
                    pending_calls = window.pending_calls,
                    "call suppressed"
                );
                return None;
            }
            window.active = true;
            window.pending_calls = 0;
        }

        arm_window::<A, R, F, S>(&self.shared);
        tracing::debug!(decorator = DECORATOR, "leading call");
        let mut function = self.shared.function.lock();
        Some((*function)(arguments))
    }
}

impl<A, R, F, S> Throttle<A, R, F, S> {
    /// Returns `true` while a window is open.
    pub fn is_active(&self) -> bool {
        self.shared.window.lock().active
    }

    /// Returns the number of calls suppressed in the current window.
    pub fn pending_calls(&self) -> usize {
        self.shared.window.lock().pending_calls
    }

    /// Returns the window length.
    #[inline]
    pub fn wait(&self) -> Duration {
        self.shared.wait
    }
}

impl<A, R, F, S> fmt::Debug for Throttle<A, R, F, S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let window = self.shared.window.lock();
        formatter
            .debug_struct("Throttle")
            .field("wait", &self.shared.wait)
            .field("active", &window.active)
            .field("pending_calls", &window.pending_calls)
            .finish_non_exhaustive()
    }
}

fn arm_window<A, R, F, S>(shared: &Arc<Shared<A, F, S>>)
where
    A: Send + 'static,
    F: FnMut(A) -> R + Send + 'static,
    S: Scheduler + 'static,
{
    let weak: Weak<Shared<A, F, S>> = Arc::downgrade(shared);
    shared.scheduler.schedule(
        shared.wait,
        Box::new(move || {
            if let Some(shared) = weak.upgrade() {
                on_window_expired::<A, R, F, S>(&shared);
            }
        }),
    );
}

fn on_window_expired<A, R, F, S>(shared: &Arc<Shared<A, F, S>>)
where
    A: Send + 'static,
    F: FnMut(A) -> R + Send + 'static,
    S: Scheduler + 'static,
{
    let arguments = {
        let mut window = shared.window.lock();
        let Some(arguments) = window.pending_arguments.take() else {
            window.active = false;
            window.pending_calls = 0;
            tracing::trace!(decorator = DECORATOR, "window closed idle");
            return;
        };
        let suppressed = std::mem::take(&mut window.pending_calls);
        tracing::debug!(decorator = DECORATOR, suppressed, "trailing call");
        arguments
    };

    arm_window::<A, R, F, S>(shared);
    let mut function = shared.function.lock();
    let _ = (*function)(arguments);
}

/// Wraps `function` so that it runs at most once per `wait`, timed by
/// `scheduler`.
///
/// See [`Throttle`].
#[inline]
pub fn throttle_on<A, R, F, S>(function: F, wait: Duration, scheduler: S) -> Throttle<A, R, F, S>
where
    A: Send + 'static,
    F: FnMut(A) -> R + Send + 'static,
    S: Scheduler + 'static,
{
    Throttle::new(function, wait, scheduler)
}

/// Wraps `function` so that it runs at most once per `wait`, timed by tokio.
///
/// See [`Throttle`] and [`TokioScheduler`](super::TokioScheduler).
#[cfg(feature = "async")]
#[inline]
pub fn throttle<A, R, F>(function: F, wait: Duration) -> Throttle<A, R, F, super::runtime::TokioScheduler>
where
    A: Send + 'static,
    F: FnMut(A) -> R + Send + 'static,
{
    Throttle::new(function, wait, super::runtime::TokioScheduler)
}
