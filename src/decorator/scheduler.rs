//! The timer facility used by `delay` and `Throttle`.
//!
//! A [`Scheduler`] runs a [`Task`] once, after a wait. Two implementations
//! ship with the crate:
//!
//! - `TokioScheduler` (feature `async`): real tokio timers
//! - [`ManualScheduler`]: a virtual timeline that only moves when told to
//!
//! # Ordering
//!
//! A task never runs before its full wait has elapsed. Tasks due at the same
//! instant run in the order they were scheduled.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

/// A deferred unit of work handed to a [`Scheduler`].
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Runs tasks once after a wait, without blocking the caller.
///
/// Scheduled tasks cannot be cancelled.
pub trait Scheduler: Send + Sync {
    /// Arranges for `task` to run once `wait` has elapsed.
    fn schedule(&self, wait: Duration, task: Task);
}

impl<S: Scheduler + ?Sized> Scheduler for Arc<S> {
    fn schedule(&self, wait: Duration, task: Task) {
        (**self).schedule(wait, task);
    }
}

impl<S: Scheduler + ?Sized> Scheduler for &S {
    fn schedule(&self, wait: Duration, task: Task) {
        (**self).schedule(wait, task);
    }
}

/// A task waiting on the virtual timeline.
struct Scheduled {
    due: Duration,
    sequence: u64,
    task: Task,
}

impl PartialEq for Scheduled {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.sequence == other.sequence
    }
}

impl Eq for Scheduled {}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scheduled {
    // Reversed so that `BinaryHeap` pops the earliest task first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

#[derive(Default)]
struct Timeline {
    now: Duration,
    next_sequence: u64,
    queue: BinaryHeap<Scheduled>,
}

/// A scheduler driven by a virtual clock.
///
/// Time starts at zero and only moves forward through
/// [`advance`](Self::advance), which runs every task that falls due on the
/// way, on the calling thread. Clones share one timeline.
///
/// # Examples
///
/// ```rust
/// use underbar::decorator::{ManualScheduler, Scheduler};
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use std::time::Duration;
///
/// let scheduler = ManualScheduler::new();
/// let fired = Arc::new(AtomicBool::new(false));
/// let flag = Arc::clone(&fired);
/// scheduler.schedule(
///     Duration::from_millis(100),
///     Box::new(move || flag.store(true, Ordering::SeqCst)),
/// );
///
/// scheduler.advance(Duration::from_millis(99));
/// assert!(!fired.load(Ordering::SeqCst));
///
/// scheduler.advance(Duration::from_millis(1));
/// assert!(fired.load(Ordering::SeqCst));
/// ```
#[derive(Clone, Default)]
pub struct ManualScheduler {
    timeline: Arc<Mutex<Timeline>>,
}

impl ManualScheduler {
    /// Creates a scheduler whose clock reads zero.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the time elapsed on the virtual clock.
    pub fn now(&self) -> Duration {
        self.timeline.lock().now
    }

    /// Returns the number of tasks that have not run yet.
    pub fn pending(&self) -> usize {
        self.timeline.lock().queue.len()
    }

    /// Moves the clock forward by `step`, running every task due on the way.
    ///
    /// Tasks run in due-time order, ties broken by scheduling order. A task
    /// scheduled by another task runs in the same call if it falls due
    /// within `step`. The clock reads each task's due time while that task
    /// runs, and ends at exactly `now + step`.
    ///
    /// Returns the number of tasks that ran.
    ///
    /// # Panics
    ///
    /// A panicking task propagates out of this call; tasks that had not run
    /// yet stay queued.
    pub fn advance(&self, step: Duration) -> usize {
        let target = self.now().saturating_add(step);
        let mut fired = 0;
        loop {
            let task = {
                let mut timeline = self.timeline.lock();
                if timeline.queue.peek().is_some_and(|next| next.due <= target) {
                    timeline.queue.pop().map(|next| {
                        timeline.now = next.due;
                        next.task
                    })
                } else {
                    timeline.now = target;
                    None
                }
            };
            let Some(task) = task else {
                break;
            };
            task();
            fired += 1;
        }
        tracing::trace!(fired, now_ms = target.as_millis(), "virtual clock advanced");
        fired
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, wait: Duration, task: Task) {
        let mut timeline = self.timeline.lock();
        let due = timeline.now.saturating_add(wait);
        let sequence = timeline.next_sequence;
        timeline.next_sequence += 1;
        timeline.queue.push(Scheduled {
            due,
            sequence,
            task,
        });
    }
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let timeline = self.timeline.lock();
        formatter
            .debug_struct("ManualScheduler")
            .field("now", &timeline.now)
            .field("pending", &timeline.queue.len())
            .finish()
    }
}
