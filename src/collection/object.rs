//! Merging helpers for key-value mappings.
//!
//! [`extend`] and [`defaults`] are the only helpers that mutate their
//! input: both write into `target` in place and hand it back.

use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

use super::each::Collection;

/// A mutable key-value mapping.
pub trait Mapping: Collection {
    /// Returns `true` if `key` is present.
    fn has_key(&self, key: &Self::Key) -> bool;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: Self::Key, value: Self::Value);
}

impl<K: Eq + Hash, V, S: BuildHasher> Mapping for HashMap<K, V, S> {
    fn has_key(&self, key: &K) -> bool {
        self.contains_key(key)
    }

    fn set(&mut self, key: K, value: V) {
        self.insert(key, value);
    }
}

impl<K: Ord, V> Mapping for BTreeMap<K, V> {
    fn has_key(&self, key: &K) -> bool {
        self.contains_key(key)
    }

    fn set(&mut self, key: K, value: V) {
        self.insert(key, value);
    }
}

/// Copies every entry of every source into `target`, overwriting existing
/// keys. Later sources win.
///
/// # Examples
///
/// ```rust
/// use underbar::collection::extend;
/// use std::collections::HashMap;
///
/// let mut settings = HashMap::from([("theme", "dark")]);
/// extend(
///     &mut settings,
///     &[
///         HashMap::from([("font", "mono"), ("theme", "light")]),
///         HashMap::from([("size", "12")]),
///     ],
/// );
/// assert_eq!(settings["theme"], "light");
/// assert_eq!(settings.len(), 3);
/// ```
pub fn extend<'target, 'source, M, I>(target: &'target mut M, sources: I) -> &'target mut M
where
    M: Mapping + 'source,
    M::Key: Clone,
    M::Value: Clone,
    I: IntoIterator<Item = &'source M>,
{
    for source in sources {
        source.each(|value, key, _| target.set(key.clone(), value.clone()));
    }
    target
}

/// Like [`extend`], but never overwrites a key already present in `target`.
///
/// Keys filled in by an earlier source are not overwritten by a later one.
///
/// # Examples
///
/// ```rust
/// use underbar::collection::defaults;
/// use std::collections::BTreeMap;
///
/// let mut order = BTreeMap::from([("flavor", "chocolate")]);
/// defaults(&mut order, &[BTreeMap::from([("flavor", "vanilla"), ("sprinkles", "lots")])]);
/// assert_eq!(order["flavor"], "chocolate");
/// assert_eq!(order["sprinkles"], "lots");
/// ```
pub fn defaults<'target, 'source, M, I>(target: &'target mut M, sources: I) -> &'target mut M
where
    M: Mapping + 'source,
    M::Key: Clone,
    M::Value: Clone,
    I: IntoIterator<Item = &'source M>,
{
    for source in sources {
        source.each(|value, key, _| {
            if !target.has_key(key) {
                target.set(key.clone(), value.clone());
            }
        });
    }
    target
}
