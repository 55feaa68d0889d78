//! The traversal primitive shared by every collection helper.
//!
//! [`Collection::each`] visits every element of a collection and hands the
//! visitor `(value, key, collection)`. How keys are produced depends on the
//! shape of the collection:
//!
//! | shape | key | value | order |
//! |---|---|---|---|
//! | sequence | index | element | ascending index |
//! | [`Count`] | index | `()` | ascending index |
//! | mapping | map key | map value | map iteration order |

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::hash::BuildHasher;

/// A collection that can be traversed element by element.
///
/// Every helper in [`crate::collection`] is a fold over [`each`](Self::each),
/// so implementing this trait is enough to use them all on a new type.
///
/// # Laws
///
/// - `each` calls the visitor exactly once per element.
/// - For sequences and counts, keys are `0..len` in ascending order.
///
/// # Examples
///
/// ```rust
/// use underbar::collection::Collection;
///
/// let letters = vec!['a', 'b', 'c'];
/// let mut seen = Vec::new();
/// letters.each(|letter, index, _| seen.push((*index, *letter)));
/// assert_eq!(seen, vec![(0, 'a'), (1, 'b'), (2, 'c')]);
/// ```
pub trait Collection {
    /// The key (or index) handed to the visitor.
    type Key;
    /// The element type handed to the visitor.
    type Value;

    /// Calls `visitor(value, key, collection)` once per element.
    fn each<F>(&self, visitor: F)
    where
        F: FnMut(&Self::Value, &Self::Key, &Self);
}

/// A plain count treated as the virtual index range `[0, n)`.
///
/// There is nothing stored at those indices, so the visitor always receives
/// `()` as the value. `Count` is mostly useful as a loop driver for helpers
/// such as [`zip`](crate::collection::zip).
///
/// # Examples
///
/// ```rust
/// use underbar::collection::{Count, map};
///
/// let squares = map(&Count(4), |_, index, _| index * index);
/// assert_eq!(squares, vec![0, 1, 4, 9]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Count(pub usize);

impl From<usize> for Count {
    fn from(count: usize) -> Self {
        Self(count)
    }
}

impl Collection for Count {
    type Key = usize;
    type Value = ();

    fn each<F>(&self, mut visitor: F)
    where
        F: FnMut(&(), &usize, &Self),
    {
        for index in 0..self.0 {
            visitor(&(), &index, self);
        }
    }
}

impl<T> Collection for [T] {
    type Key = usize;
    type Value = T;

    fn each<F>(&self, mut visitor: F)
    where
        F: FnMut(&T, &usize, &Self),
    {
        for (index, value) in self.iter().enumerate() {
            visitor(value, &index, self);
        }
    }
}

impl<T, const N: usize> Collection for [T; N] {
    type Key = usize;
    type Value = T;

    fn each<F>(&self, mut visitor: F)
    where
        F: FnMut(&T, &usize, &Self),
    {
        for (index, value) in self.iter().enumerate() {
            visitor(value, &index, self);
        }
    }
}

impl<T> Collection for Vec<T> {
    type Key = usize;
    type Value = T;

    fn each<F>(&self, mut visitor: F)
    where
        F: FnMut(&T, &usize, &Self),
    {
        for (index, value) in self.iter().enumerate() {
            visitor(value, &index, self);
        }
    }
}

impl<T> Collection for VecDeque<T> {
    type Key = usize;
    type Value = T;

    fn each<F>(&self, mut visitor: F)
    where
        F: FnMut(&T, &usize, &Self),
    {
        for (index, value) in self.iter().enumerate() {
            visitor(value, &index, self);
        }
    }
}

impl<K, V, S: BuildHasher> Collection for HashMap<K, V, S> {
    type Key = K;
    type Value = V;

    fn each<F>(&self, mut visitor: F)
    where
        F: FnMut(&V, &K, &Self),
    {
        for (key, value) in self {
            visitor(value, key, self);
        }
    }
}

impl<K, V> Collection for BTreeMap<K, V> {
    type Key = K;
    type Value = V;

    fn each<F>(&self, mut visitor: F)
    where
        F: FnMut(&V, &K, &Self),
    {
        for (key, value) in self {
            visitor(value, key, self);
        }
    }
}

/// Calls `visitor(value, key, collection)` for every element of `collection`.
///
/// Free-function form of [`Collection::each`]. Nothing is returned; the
/// traversal exists for its effect.
///
/// # Examples
///
/// ```rust
/// use underbar::collection::each;
/// use std::collections::HashMap;
///
/// let stock = HashMap::from([("apples", 3), ("pears", 5)]);
/// let mut total = 0;
/// each(&stock, |count, _, _| total += count);
/// assert_eq!(total, 8);
/// ```
#[inline]
pub fn each<C, F>(collection: &C, visitor: F)
where
    C: Collection + ?Sized,
    F: FnMut(&C::Value, &C::Key, &C),
{
    collection.each(visitor);
}
