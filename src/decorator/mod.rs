//! Function decorators.
//!
//! A decorator takes a function and returns a value that calls it with
//! different invocation semantics:
//!
//! - [`Once`]: runs the function at most once and replays its result
//! - [`Memoize`]: caches one result per distinct argument list
//! - [`delay`]: runs the function once, later
//! - [`Throttle`]: runs the function at most once per cooldown window
//!
//! Rust has no variadic functions, so every wrapped function receives its
//! whole argument list as a single value: a tuple for several arguments,
//! `()` for none. The decorators forward that value unchanged.
//!
//! Every decorator owns its own state. Two wrappers around the same function
//! share nothing.
//!
//! # Timers
//!
//! `delay` and `Throttle` defer work through the [`Scheduler`] trait.
//! [`TokioScheduler`] (feature `async`) runs on tokio timers;
//! [`ManualScheduler`] is a virtual timeline driven by
//! [`advance`](ManualScheduler::advance).
//!
//! # Examples
//!
//! ```rust
//! use underbar::decorator::{ManualScheduler, once, throttle_on};
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::time::Duration;
//!
//! let initialize = once(|()| "ready");
//! assert_eq!(initialize.call(()), "ready");
//! assert_eq!(initialize.call(()), "ready");
//!
//! let scheduler = ManualScheduler::new();
//! let calls = Arc::new(AtomicUsize::new(0));
//! let counter = Arc::clone(&calls);
//! let throttled = throttle_on(
//!     move |()| counter.fetch_add(1, Ordering::SeqCst),
//!     Duration::from_millis(100),
//!     scheduler.clone(),
//! );
//!
//! for _ in 0..5 {
//!     throttled.call(());
//! }
//! scheduler.advance(Duration::from_millis(100));
//! assert_eq!(calls.load(Ordering::SeqCst), 2);
//! ```

mod delay;
mod key;
mod memoize;
mod once;
mod scheduler;
mod throttle;

#[cfg(feature = "async")]
mod runtime;

pub use delay::delay_on;
pub use key::{ArgsKey, KeyEncoder, KeyFn};
pub use memoize::{Memoize, memoize_with};
pub use once::{Once, once};
pub use scheduler::{ManualScheduler, Scheduler, Task};
pub use throttle::{Throttle, throttle_on};

#[cfg(feature = "serde")]
pub use key::JsonKey;
#[cfg(feature = "serde")]
pub use memoize::memoize;

#[cfg(feature = "async")]
pub use delay::delay;
#[cfg(feature = "async")]
pub use runtime::TokioScheduler;
#[cfg(feature = "async")]
pub use throttle::throttle;
