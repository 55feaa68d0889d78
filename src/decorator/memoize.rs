//! Result caching per distinct argument list.
//!
//! [`Memoize`] is [`Once`](super::Once) generalized to many argument lists:
//! the wrapped function runs at most once per cache key, and every later
//! call with an equal key replays the stored result.
//!
//! The cache is unbounded and entries live as long as the wrapper. A hit is
//! decided by key presence, never by the stored value, so results such as
//! `0`, `false`, `""` or `None` are cached like any other.
//!
//! The wrapped function may call its own wrapper, so memoized recursion
//! works. The cache is never borrowed while the function runs.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

use crate::error::Result;

use super::key::{ArgsKey, KeyEncoder};

const DECORATOR: &str = "memoize";

/// A function wrapper that caches one result per distinct argument list.
///
/// # Type Parameters
///
/// * `A` - The argument list (a tuple for several arguments)
/// * `R` - The result type, cloned out of the cache on every hit
/// * `F` - The wrapped function
/// * `E` - The [`KeyEncoder`] deriving cache keys from `A`
///
/// # Thread Safety
///
/// This type is NOT thread-safe. It is meant for a single logical timeline
/// of calls.
///
/// # Examples
///
/// ```rust
/// use underbar::decorator::{ArgsKey, memoize_with};
/// use std::cell::Cell;
///
/// let runs = Cell::new(0);
/// let add = memoize_with(
///     |(left, right): (i32, i32)| {
///         runs.set(runs.get() + 1);
///         left + right
///     },
///     ArgsKey,
/// );
///
/// assert_eq!(add.call((2, 3)).unwrap(), 5);
/// assert_eq!(add.call((2, 3)).unwrap(), 5);
/// assert_eq!(add.call((3, 4)).unwrap(), 7);
/// assert_eq!(runs.get(), 2);
/// ```
pub struct Memoize<A, R, F, E>
where
    E: KeyEncoder<A>,
{
    function: F,
    cache: RefCell<HashMap<E::Key, R>>,
    encoder: E,
    _arguments: PhantomData<fn(A)>,
}

impl<A, R, F, E> Memoize<A, R, F, E>
where
    R: Clone,
    F: Fn(A) -> R,
    E: KeyEncoder<A>,
{
    /// Wraps `function`, deriving cache keys with `encoder`.
    pub fn new(function: F, encoder: E) -> Self {
        Self {
            function,
            cache: RefCell::new(HashMap::new()),
            encoder,
            _arguments: PhantomData,
        }
    }

    /// Returns the cached result for `arguments`, computing and storing it
    /// on a miss.
    ///
    /// A nested call from inside the wrapped function is an ordinary call.
    /// If it computes the same key as an enclosing call, the enclosing
    /// result overwrites it when that call returns.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyEncoding`](crate::Error) if `arguments` cannot be
    /// encoded.
    ///
    /// A panic in the wrapped function propagates and caches nothing.
    pub fn call(&self, arguments: A) -> Result<R> {
        let key = self.encoder.encode(&arguments)?;
        if let Some(cached) = self.cache.borrow().get(&key) {
            tracing::trace!(decorator = DECORATOR, "cache hit");
            return Ok(cached.clone());
        }

        let result = (self.function)(arguments);

        let mut cache = self.cache.borrow_mut();
        cache.insert(key, result.clone());
        tracing::debug!(decorator = DECORATOR, cache_size = cache.len(), "cache miss");
        Ok(result)
    }

    /// Returns `true` if a result for `arguments` is cached.
    ///
    /// # Errors
    ///
    /// Returns an error if `arguments` cannot be encoded.
    pub fn contains(&self, arguments: &A) -> Result<bool> {
        let key = self.encoder.encode(arguments)?;
        Ok(self.cache.borrow().contains_key(&key))
    }
}

impl<A, R, F, E> Memoize<A, R, F, E>
where
    E: KeyEncoder<A>,
{
    /// Returns the number of cached results.
    #[inline]
    pub fn len(&self) -> usize {
        self.cache.borrow().len()
    }

    /// Returns `true` if nothing has been cached yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cache.borrow().is_empty()
    }

    /// Returns the key encoder.
    #[inline]
    pub const fn encoder(&self) -> &E {
        &self.encoder
    }
}

impl<A, R, F, E> fmt::Debug for Memoize<A, R, F, E>
where
    E: KeyEncoder<A> + fmt::Debug,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Memoize")
            .field("cached", &self.len())
            .field("encoder", &self.encoder)
            .finish_non_exhaustive()
    }
}

/// Wraps `function` with a cache keyed by the JSON text of its arguments.
///
/// See [`Memoize`] and [`JsonKey`](super::JsonKey).
///
/// # Examples
///
/// ```rust
/// use underbar::decorator::memoize;
///
/// let always_zero = memoize(|()| 0);
/// assert_eq!(always_zero.call(()).unwrap(), 0);
/// assert_eq!(always_zero.call(()).unwrap(), 0);
/// assert_eq!(always_zero.len(), 1);
/// ```
#[cfg(feature = "serde")]
pub fn memoize<A, R, F>(function: F) -> Memoize<A, R, F, super::key::JsonKey>
where
    A: serde::Serialize,
    R: Clone,
    F: Fn(A) -> R,
{
    Memoize::new(function, super::key::JsonKey)
}

/// Wraps `function` with a cache whose keys come from `encoder`.
#[inline]
pub fn memoize_with<A, R, F, E>(function: F, encoder: E) -> Memoize<A, R, F, E>
where
    R: Clone,
    F: Fn(A) -> R,
    E: KeyEncoder<A>,
{
    Memoize::new(function, encoder)
}

impl<A, R, F> Memoize<A, R, F, ArgsKey>
where
    A: Clone + Eq + std::hash::Hash,
    R: Clone,
    F: Fn(A) -> R,
{
    /// Wraps `function`, using the argument list itself as the cache key.
    #[inline]
    pub fn by_args(function: F) -> Self {
        Self::new(function, ArgsKey)
    }
}
