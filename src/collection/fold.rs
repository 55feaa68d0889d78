//! Value transforms expressed as folds over [`Collection::each`].

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

use super::each::Collection;

/// Returns the results of applying `function` to every element.
///
/// Results are collected in traversal order.
///
/// # Examples
///
/// ```rust
/// use underbar::collection::map;
///
/// let labels = map(&["a", "b"], |value, index, _| format!("{index}:{value}"));
/// assert_eq!(labels, vec!["0:a", "1:b"]);
/// ```
pub fn map<C, U, F>(collection: &C, mut function: F) -> Vec<U>
where
    C: Collection + ?Sized,
    F: FnMut(&C::Value, &C::Key, &C) -> U,
{
    let mut results = Vec::new();
    collection.each(|value, key, source| results.push(function(value, key, source)));
    results
}

/// Returns the elements that pass `predicate`.
///
/// # Examples
///
/// ```rust
/// use underbar::collection::filter;
///
/// let evens = filter(&vec![1, 2, 3, 4], |value, _| value % 2 == 0);
/// assert_eq!(evens, vec![2, 4]);
/// ```
pub fn filter<C, F>(collection: &C, mut predicate: F) -> Vec<C::Value>
where
    C: Collection + ?Sized,
    C::Value: Clone,
    F: FnMut(&C::Value, &C::Key) -> bool,
{
    let mut filtered = Vec::new();
    collection.each(|value, key, _| {
        if predicate(value, key) {
            filtered.push(value.clone());
        }
    });
    filtered
}

/// Returns the elements that fail `predicate`.
///
/// # Examples
///
/// ```rust
/// use underbar::collection::reject;
///
/// let odds = reject(&vec![1, 2, 3, 4], |value| value % 2 == 0);
/// assert_eq!(odds, vec![1, 3]);
/// ```
pub fn reject<C, F>(collection: &C, mut predicate: F) -> Vec<C::Value>
where
    C: Collection + ?Sized,
    C::Value: Clone,
    F: FnMut(&C::Value) -> bool,
{
    filter(collection, |value, _| !predicate(value))
}

/// Folds every element into `accumulator` with `function`.
///
/// # Examples
///
/// ```rust
/// use underbar::collection::reduce;
///
/// let product = reduce(&vec![2, 3, 4], |total, value| total * value, 1);
/// assert_eq!(product, 24);
///
/// // An empty collection returns the accumulator untouched.
/// let empty: Vec<i32> = Vec::new();
/// assert_eq!(reduce(&empty, |total, value| total + value, 7), 7);
/// ```
pub fn reduce<C, B, F>(collection: &C, mut function: F, accumulator: B) -> B
where
    C: Collection + ?Sized,
    F: FnMut(B, &C::Value) -> B,
{
    let mut accumulator = Some(accumulator);
    collection.each(|value, _, _| {
        accumulator = accumulator.take().map(|current| function(current, value));
    });
    accumulator.unwrap_or_else(|| unreachable!("accumulator is restored after every visit"))
}

/// Folds the collection using its first visited element as the seed.
///
/// The seed is never passed to `function` as its second argument, so a
/// single-element collection returns that element without calling
/// `function` at all. Returns `None` for an empty collection.
///
/// For mappings the seed is whichever entry the map visits first.
///
/// # Examples
///
/// ```rust
/// use underbar::collection::reduce_first;
///
/// let sum = reduce_first(&vec![1, 2, 3], |total, value| total + value);
/// assert_eq!(sum, Some(6));
///
/// // The function is not invoked for a single element.
/// let only = reduce_first(&vec![5], |total, value| total + value * value);
/// assert_eq!(only, Some(5));
/// ```
pub fn reduce_first<C, F>(collection: &C, mut function: F) -> Option<C::Value>
where
    C: Collection + ?Sized,
    C::Value: Clone,
    F: FnMut(C::Value, &C::Value) -> C::Value,
{
    let mut accumulator: Option<C::Value> = None;
    collection.each(|value, _, _| {
        accumulator = Some(match accumulator.take() {
            None => value.clone(),
            Some(current) => function(current, value),
        });
    });
    accumulator
}

/// Returns `true` if any element equals `target`.
///
/// # Examples
///
/// ```rust
/// use underbar::collection::contains;
/// use std::collections::HashMap;
///
/// assert!(contains(&vec![1, 2, 3], &2));
/// assert!(!contains(&HashMap::from([("a", 1)]), &2));
/// ```
pub fn contains<C>(collection: &C, target: &C::Value) -> bool
where
    C: Collection + ?Sized,
    C::Value: PartialEq,
{
    reduce(collection, |was_found, item| was_found || item == target, false)
}

/// Returns `true` if every element passes `predicate`.
///
/// Empty collections pass. Once an element fails, `predicate` is not called
/// for the remaining elements.
///
/// # Examples
///
/// ```rust
/// use underbar::collection::every;
///
/// assert!(every(&vec![2, 4, 6], |value| value % 2 == 0));
/// assert!(!every(&vec![2, 3, 6], |value| value % 2 == 0));
/// assert!(every(&Vec::<i32>::new(), |_| false));
/// ```
pub fn every<C, F>(collection: &C, mut predicate: F) -> bool
where
    C: Collection + ?Sized,
    F: FnMut(&C::Value) -> bool,
{
    reduce(collection, |all_passed, item| all_passed && predicate(item), true)
}

/// Returns `true` if at least one element passes `predicate`.
///
/// # Examples
///
/// ```rust
/// use underbar::collection::some;
///
/// assert!(some(&vec![1, 2, 3], |value| *value > 2));
/// assert!(!some(&Vec::<i32>::new(), |_| true));
/// ```
pub fn some<C, F>(collection: &C, mut predicate: F) -> bool
where
    C: Collection + ?Sized,
    F: FnMut(&C::Value) -> bool,
{
    !every(collection, |item| !predicate(item))
}

/// Returns the key of the first element equal to `target`.
///
/// `None` means the value is not present.
///
/// # Examples
///
/// ```rust
/// use underbar::collection::index_of;
///
/// assert_eq!(index_of(&vec![10, 20, 10], &10), Some(0));
/// assert_eq!(index_of(&vec![10, 20], &30), None);
/// ```
pub fn index_of<C>(collection: &C, target: &C::Value) -> Option<C::Key>
where
    C: Collection + ?Sized,
    C::Value: PartialEq,
    C::Key: Clone,
{
    let mut result = None;
    collection.each(|item, key, _| {
        if result.is_none() && item == target {
            result = Some(key.clone());
        }
    });
    result
}

/// Calls `function` on every element, with the element as its receiver.
///
/// # Examples
///
/// ```rust
/// use underbar::collection::invoke;
///
/// let upper = invoke(&vec!["dog", "cat"], |word| word.to_uppercase());
/// assert_eq!(upper, vec!["DOG", "CAT"]);
/// ```
pub fn invoke<C, U, F>(collection: &C, mut function: F) -> Vec<U>
where
    C: Collection + ?Sized,
    F: FnMut(&C::Value) -> U,
{
    map(collection, |item, _, _| function(item))
}

/// Keyed lookup into a record, used by [`pluck`].
pub trait Lookup<K: ?Sized> {
    /// The value stored under a key.
    type Output;

    /// Returns the value stored under `key`, if any.
    fn lookup(&self, key: &K) -> Option<&Self::Output>;
}

impl<K, Q, V, S> Lookup<Q> for HashMap<K, V, S>
where
    K: Borrow<Q> + Eq + Hash,
    Q: Eq + Hash + ?Sized,
    S: BuildHasher,
{
    type Output = V;

    fn lookup(&self, key: &Q) -> Option<&V> {
        self.get(key)
    }
}

impl<K, Q, V> Lookup<Q> for BTreeMap<K, V>
where
    K: Borrow<Q> + Ord,
    Q: Ord + ?Sized,
{
    type Output = V;

    fn lookup(&self, key: &Q) -> Option<&V> {
        self.get(key)
    }
}

impl<T> Lookup<usize> for Vec<T> {
    type Output = T;

    fn lookup(&self, key: &usize) -> Option<&T> {
        self.get(*key)
    }
}

impl<T> Lookup<usize> for [T] {
    type Output = T;

    fn lookup(&self, key: &usize) -> Option<&T> {
        self.get(*key)
    }
}

/// Returns the value stored under `key` in every element.
///
/// Elements without that key yield `None`.
///
/// # Examples
///
/// ```rust
/// use underbar::collection::pluck;
/// use std::collections::HashMap;
///
/// let people = vec![
///     HashMap::from([("name", "moe"), ("age", "30")]),
///     HashMap::from([("name", "curly")]),
/// ];
/// assert_eq!(pluck(&people, "age"), vec![Some("30"), None]);
/// ```
pub fn pluck<C, K>(collection: &C, key: &K) -> Vec<Option<<C::Value as Lookup<K>>::Output>>
where
    C: Collection + ?Sized,
    C::Value: Lookup<K>,
    <C::Value as Lookup<K>>::Output: Clone,
    K: ?Sized,
{
    map(collection, |item, _, _| item.lookup(key).cloned())
}
