//! Cache-key derivation for [`Memoize`](super::Memoize).
//!
//! Key derivation is a separate trait so that the cache logic never depends
//! on how an argument list is turned into a key.

use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use crate::error::Result;

/// Turns an argument list into a cache key.
///
/// Two argument lists share a cache entry exactly when their keys are equal.
pub trait KeyEncoder<A> {
    /// The key type stored in the cache.
    type Key: Eq + Hash;

    /// Encodes `arguments` into a key.
    ///
    /// # Errors
    ///
    /// Returns an error if the arguments cannot be encoded.
    fn encode(&self, arguments: &A) -> Result<Self::Key>;
}

/// Encodes the argument list as its JSON text.
///
/// Arguments that serialize identically share a key even when they are
/// distinct values, so equality is structural rather than by identity.
/// `HashMap` arguments serialize in iteration order, which is not
/// canonical; prefer `BTreeMap` for map-valued arguments.
///
/// # Examples
///
/// ```rust
/// use underbar::decorator::{JsonKey, KeyEncoder};
///
/// let key = JsonKey.encode(&(2, "three")).unwrap();
/// assert_eq!(key, r#"[2,"three"]"#);
/// ```
#[cfg(feature = "serde")]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonKey;

#[cfg(feature = "serde")]
impl<A: serde::Serialize> KeyEncoder<A> for JsonKey {
    type Key = String;

    fn encode(&self, arguments: &A) -> Result<String> {
        Ok(serde_json::to_string(arguments)?)
    }
}

/// Uses a clone of the argument list itself as the key.
///
/// Never fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArgsKey;

impl<A: Clone + Eq + Hash> KeyEncoder<A> for ArgsKey {
    type Key = A;

    fn encode(&self, arguments: &A) -> Result<A> {
        Ok(arguments.clone())
    }
}

/// Derives the key with a caller-supplied function.
///
/// # Examples
///
/// ```rust
/// use underbar::decorator::{KeyEncoder, KeyFn};
///
/// let case_insensitive = KeyFn::new(|name: &String| name.to_lowercase());
/// assert_eq!(
///     case_insensitive.encode(&"Ada".to_string()).unwrap(),
///     case_insensitive.encode(&"ADA".to_string()).unwrap()
/// );
/// ```
pub struct KeyFn<G, K> {
    function: G,
    _key: PhantomData<fn() -> K>,
}

impl<G, K> KeyFn<G, K> {
    /// Wraps `function` as a key encoder.
    #[inline]
    pub const fn new(function: G) -> Self {
        Self {
            function,
            _key: PhantomData,
        }
    }
}

impl<A, K, G> KeyEncoder<A> for KeyFn<G, K>
where
    K: Eq + Hash,
    G: Fn(&A) -> K,
{
    type Key = K;

    fn encode(&self, arguments: &A) -> Result<K> {
        Ok((self.function)(arguments))
    }
}

impl<G: Clone, K> Clone for KeyFn<G, K> {
    fn clone(&self) -> Self {
        Self::new(self.function.clone())
    }
}

impl<G, K> fmt::Debug for KeyFn<G, K> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_tuple("KeyFn").field(&"<function>").finish()
    }
}
