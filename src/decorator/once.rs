//! Single-shot execution.
//!
//! [`Once`] wraps a function so that it runs at most once. The first call
//! runs it and stores the result; every call, the first included, returns
//! that stored result.
//!
//! # Examples
//!
//! ```rust
//! use underbar::decorator::once;
//! use std::cell::Cell;
//!
//! let runs = Cell::new(0);
//! let initialize = once(|seed: u32| {
//!     runs.set(runs.get() + 1);
//!     seed * 2
//! });
//!
//! assert_eq!(initialize.call(21), 42);
//! // Later arguments are ignored; the first result is replayed.
//! assert_eq!(initialize.call(100), 42);
//! assert_eq!(runs.get(), 1);
//! ```

use std::cell::{Ref, RefCell};
use std::fmt;
use std::marker::PhantomData;

use crate::error::{Error, Result};

const DECORATOR: &str = "once";

/// Where a [`Once`] wrapper is in its lifecycle.
enum OnceState<F, R> {
    /// Not called yet; holds the function.
    Pending(F),
    /// The function is executing right now.
    Running,
    /// The function returned; holds its result.
    Done(R),
    /// The function panicked during its only execution.
    Poisoned,
}

/// A function wrapper that executes the wrapped function at most once.
///
/// The wrapped function is `FnOnce`, so the single execution is enforced by
/// the type system as well as by the state machine.
///
/// # Type Parameters
///
/// * `A` - The argument list (a tuple for several arguments)
/// * `R` - The result type, cloned out to every caller
/// * `F` - The wrapped function
///
/// # Thread Safety
///
/// This type is NOT thread-safe. It is meant for a single logical timeline
/// of calls.
///
/// # Panics
///
/// If the wrapped function panics, the panic reaches the caller of that
/// first call and the wrapper is poisoned for good. There is no retry, and
/// every later [`call`](Self::call) panics as well; use
/// [`try_call`](Self::try_call) to observe poisoning as an error.
pub struct Once<A, R, F = fn(A) -> R> {
    state: RefCell<OnceState<F, R>>,
    _arguments: PhantomData<fn(A)>,
}

/// Marks the wrapper poisoned if the wrapped function unwinds.
struct PoisonOnUnwind<'a, F, R> {
    state: &'a RefCell<OnceState<F, R>>,
}

impl<F, R> Drop for PoisonOnUnwind<'_, F, R> {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.try_borrow_mut()
            && matches!(*state, OnceState::Running)
        {
            *state = OnceState::Poisoned;
        }
    }
}

impl<A, R, F> Once<A, R, F>
where
    R: Clone,
    F: FnOnce(A) -> R,
{
    /// Wraps `function`. Nothing runs until the first call.
    #[inline]
    pub fn new(function: F) -> Self {
        Self {
            state: RefCell::new(OnceState::Pending(function)),
            _arguments: PhantomData,
        }
    }

    /// Calls the wrapper, running the function if this is the first call.
    ///
    /// # Errors
    ///
    /// - [`Error::Poisoned`] if the single execution panicked earlier
    /// - [`Error::Reentrant`] if called from inside the wrapped function
    ///
    /// # Examples
    ///
    /// ```rust
    /// use underbar::decorator::once;
    ///
    /// let greet = once(|name: &str| format!("hello, {name}"));
    /// assert_eq!(greet.try_call("ada").unwrap(), "hello, ada");
    /// assert_eq!(greet.try_call("grace").unwrap(), "hello, ada");
    /// ```
    pub fn try_call(&self, arguments: A) -> Result<R> {
        let function = {
            let mut state = self.state.borrow_mut();
            match &*state {
                OnceState::Done(result) => return Ok(result.clone()),
                OnceState::Running => return Err(Error::Reentrant { decorator: DECORATOR }),
                OnceState::Poisoned => return Err(Error::Poisoned { decorator: DECORATOR }),
                OnceState::Pending(_) => {}
            }
            let OnceState::Pending(function) = std::mem::replace(&mut *state, OnceState::Running)
            else {
                unreachable!()
            };
            function
        };

        tracing::debug!(decorator = DECORATOR, "executing wrapped function");
        let guard = PoisonOnUnwind { state: &self.state };
        let result = function(arguments);
        *self.state.borrow_mut() = OnceState::Done(result.clone());
        drop(guard);
        Ok(result)
    }

    /// Calls the wrapper, running the function if this is the first call.
    ///
    /// # Panics
    ///
    /// Panics if called re-entrantly, or if the wrapper is poisoned. Poisoning
    /// is permanent: after the single execution panics, every later `call`
    /// panics too and the function never runs again. Use
    /// [`try_call`](Self::try_call) to get [`Error::Poisoned`] instead, or
    /// [`is_poisoned`](Self::is_poisoned) to check first.
    pub fn call(&self, arguments: A) -> R {
        match self.try_call(arguments) {
            Ok(result) => result,
            Err(error) => panic!("{error}"),
        }
    }
}

impl<A, R, F> Once<A, R, F> {
    /// Returns the stored result if the function has run successfully.
    ///
    /// Unlike [`call`](Self::call), this never runs the function.
    pub fn get(&self) -> Option<Ref<'_, R>> {
        Ref::filter_map(self.state.borrow(), |state| match state {
            OnceState::Done(result) => Some(result),
            _ => None,
        })
        .ok()
    }

    /// Returns `true` once the function has started executing, whether or
    /// not it finished.
    #[inline]
    pub fn is_called(&self) -> bool {
        !matches!(&*self.state.borrow(), OnceState::Pending(_))
    }

    /// Returns `true` if the single execution panicked.
    #[inline]
    pub fn is_poisoned(&self) -> bool {
        matches!(&*self.state.borrow(), OnceState::Poisoned)
    }
}

impl<A, R: fmt::Debug, F> fmt::Debug for Once<A, R, F> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        match &*state {
            OnceState::Done(result) => formatter.debug_tuple("Once").field(result).finish(),
            OnceState::Pending(_) => formatter.debug_tuple("Once").field(&"<pending>").finish(),
            OnceState::Running => formatter.debug_tuple("Once").field(&"<running>").finish(),
            OnceState::Poisoned => formatter.debug_tuple("Once").field(&"<poisoned>").finish(),
        }
    }
}

/// Wraps `function` so that it runs at most once.
///
/// See [`Once`].
#[inline]
pub fn once<A, R, F>(function: F) -> Once<A, R, F>
where
    R: Clone,
    F: FnOnce(A) -> R,
{
    Once::new(function)
}
