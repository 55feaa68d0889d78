//! Array helpers: slicing, de-duplication, ordering and set algebra.

use std::cmp::Ordering;

use rand::Rng;
use rand::seq::SliceRandom;

use super::each::{Collection, Count};
use super::fold::{Lookup, contains, filter, map, reduce};

/// Returns the value unchanged.
///
/// Handy as a default transform, for example as the key function of
/// [`uniq_by`] or [`sort_by`].
///
/// # Examples
///
/// ```rust
/// use underbar::collection::identity;
///
/// assert_eq!(identity(42), 42);
/// assert_eq!(identity("hello"), "hello");
/// ```
#[inline]
pub fn identity<T>(value: T) -> T {
    value
}

/// Returns the first element.
#[inline]
pub fn first<T>(items: &[T]) -> Option<&T> {
    items.first()
}

/// Returns the first `count` elements, or all of them if there are fewer.
///
/// # Examples
///
/// ```rust
/// use underbar::collection::first_n;
///
/// assert_eq!(first_n(&[1, 2, 3], 2), &[1, 2]);
/// assert_eq!(first_n(&[1, 2, 3], 5), &[1, 2, 3]);
/// ```
#[inline]
pub fn first_n<T>(items: &[T], count: usize) -> &[T] {
    &items[..count.min(items.len())]
}

/// Returns the last element.
#[inline]
pub fn last<T>(items: &[T]) -> Option<&T> {
    items.last()
}

/// Returns the last `count` elements, or all of them if there are fewer.
///
/// # Examples
///
/// ```rust
/// use underbar::collection::last_n;
///
/// assert_eq!(last_n(&[1, 2, 3], 2), &[2, 3]);
/// assert!(last_n(&[1, 2, 3], 0).is_empty());
/// ```
#[inline]
pub fn last_n<T>(items: &[T], count: usize) -> &[T] {
    &items[items.len() - count.min(items.len())..]
}

/// Returns the elements in order, dropping repeats of a value already seen.
///
/// # Examples
///
/// ```rust
/// use underbar::collection::uniq;
///
/// assert_eq!(uniq(&[1, 2, 1, 3, 2]), vec![1, 2, 3]);
/// ```
pub fn uniq<T>(items: &[T]) -> Vec<T>
where
    T: PartialEq + Clone,
{
    uniq_by(items, |value| value.clone())
}

/// Like [`uniq`], but two elements are duplicates when `function` maps them
/// to equal values. The first element of each group is kept.
///
/// # Examples
///
/// ```rust
/// use underbar::collection::uniq_by;
///
/// let words = ["apple", "avocado", "banana", "blueberry", "cherry"];
/// let by_initial = uniq_by(&words, |word| word.chars().next());
/// assert_eq!(by_initial, vec!["apple", "banana", "cherry"]);
/// ```
pub fn uniq_by<T, U, F>(items: &[T], mut function: F) -> Vec<T>
where
    T: Clone,
    U: PartialEq,
    F: FnMut(&T) -> U,
{
    let mut seen: Vec<U> = Vec::new();
    let mut results = Vec::new();
    items.each(|value, _, _| {
        let derived = function(value);
        if !seen.contains(&derived) {
            seen.push(derived);
            results.push(value.clone());
        }
    });
    results
}

/// Returns a copy of `items` sorted by the key `function` computes for
/// each element.
///
/// The sort is stable and the input is left untouched. Keys that cannot be
/// compared (such as `NaN`) are treated as equal.
///
/// # Examples
///
/// ```rust
/// use underbar::collection::sort_by;
///
/// let people = [("moe", 40), ("larry", 50), ("curly", 60), ("shemp", 40)];
/// let by_age = sort_by(&people, |person| person.1);
/// assert_eq!(
///     by_age,
///     vec![("moe", 40), ("shemp", 40), ("larry", 50), ("curly", 60)]
/// );
/// ```
pub fn sort_by<T, K, F>(items: &[T], mut function: F) -> Vec<T>
where
    T: Clone,
    K: PartialOrd,
    F: FnMut(&T) -> K,
{
    let mut keyed = map(items, |value, _, _| (function(value), value.clone()));
    keyed.sort_by(|(left, _), (right, _)| left.partial_cmp(right).unwrap_or(Ordering::Equal));
    keyed.into_iter().map(|(_, value)| value).collect()
}

/// Returns a copy of `items` sorted by the value each element stores under
/// `key`.
///
/// This is [`sort_by`] with a property name in place of a function. Elements
/// without `key` sort before all others. Ties keep their input order.
///
/// # Examples
///
/// ```rust
/// use underbar::collection::sort_by_key;
/// use std::collections::BTreeMap;
///
/// let people = vec![
///     BTreeMap::from([("name", 2), ("age", 60)]),
///     BTreeMap::from([("name", 1), ("age", 40)]),
///     BTreeMap::from([("name", 3)]),
/// ];
/// let by_age = sort_by_key(&people, "age");
/// assert_eq!(by_age[0], people[2]);
/// assert_eq!(by_age[1], people[1]);
/// assert_eq!(by_age[2], people[0]);
/// ```
pub fn sort_by_key<T, K>(items: &[T], key: &K) -> Vec<T>
where
    T: Clone + Lookup<K>,
    T::Output: PartialOrd,
    K: ?Sized,
{
    let mut sorted = items.to_vec();
    sorted.sort_by(|left, right| {
        left.lookup(key)
            .partial_cmp(&right.lookup(key))
            .unwrap_or(Ordering::Equal)
    });
    sorted
}

/// Groups the elements at each index of every list.
///
/// Row `i` holds element `i` of each list, in list order. Shorter lists are
/// padded with `None` up to the length of the longest.
///
/// # Examples
///
/// ```rust
/// use underbar::collection::zip;
///
/// let zipped = zip(&[vec!['a', 'b', 'c'], vec!['x']]);
/// assert_eq!(
///     zipped,
///     vec![
///         vec![Some('a'), Some('x')],
///         vec![Some('b'), None],
///         vec![Some('c'), None],
///     ]
/// );
/// ```
pub fn zip<T, L>(lists: &[L]) -> Vec<Vec<Option<T>>>
where
    T: Clone,
    L: AsRef<[T]>,
{
    let length = reduce(lists, |longest: usize, list| longest.max(list.as_ref().len()), 0);
    map(&Count(length), |_, index, _| {
        map(lists, |list, _, _| list.as_ref().get(*index).cloned())
    })
}

/// An arbitrarily nested list.
///
/// # Examples
///
/// ```rust
/// use underbar::collection::Nested;
///
/// let nested = Nested::List(vec![Nested::Item(1), Nested::List(vec![Nested::Item(2)])]);
/// assert!(matches!(nested, Nested::List(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Nested<T> {
    /// A single value.
    Item(T),
    /// A list of further nested values.
    List(Vec<Nested<T>>),
}

impl<T> From<T> for Nested<T> {
    fn from(value: T) -> Self {
        Self::Item(value)
    }
}

/// Flattens a nested list into a single list, depth first.
///
/// # Examples
///
/// ```rust
/// use underbar::collection::{Nested, flatten};
///
/// let nested = [
///     Nested::Item(1),
///     Nested::List(vec![Nested::Item(2), Nested::List(vec![Nested::Item(3)])]),
///     Nested::List(vec![]),
/// ];
/// assert_eq!(flatten(&nested), vec![1, 2, 3]);
/// ```
pub fn flatten<T: Clone>(nested: &[Nested<T>]) -> Vec<T> {
    let mut results = Vec::new();
    flatten_into(nested, &mut results);
    results
}

fn flatten_into<T: Clone>(nested: &[Nested<T>], results: &mut Vec<T>) {
    nested.each(|element, _, _| match element {
        Nested::Item(value) => results.push(value.clone()),
        Nested::List(children) => flatten_into(children, results),
    });
}

/// Returns the distinct values of the first list that appear in every
/// other list, in first-list order.
///
/// # Examples
///
/// ```rust
/// use underbar::collection::intersection;
///
/// let shared = intersection(&[vec![1, 2, 3, 2], vec![2, 3, 4], vec![3, 2]]);
/// assert_eq!(shared, vec![2, 3]);
/// ```
pub fn intersection<T, L>(lists: &[L]) -> Vec<T>
where
    T: PartialEq + Clone,
    L: AsRef<[T]>,
{
    let Some((head, rest)) = lists.split_first() else {
        return Vec::new();
    };
    let candidates = uniq(head.as_ref());
    filter(&candidates, |value, _| {
        rest.iter().all(|list| contains(list.as_ref(), value))
    })
}

/// Returns the values of `items` that are absent from all of `others`.
///
/// # Examples
///
/// ```rust
/// use underbar::collection::difference;
///
/// let remaining = difference(&[1, 2, 3, 4, 5], &[vec![5, 2, 10], vec![1]]);
/// assert_eq!(remaining, vec![3, 4]);
/// ```
pub fn difference<T, L>(items: &[T], others: &[L]) -> Vec<T>
where
    T: PartialEq + Clone,
    L: AsRef<[T]>,
{
    filter(items, |value, _| {
        !others.iter().any(|list| contains(list.as_ref(), value))
    })
}

/// Returns a randomly reordered copy of `items`.
///
/// Uses the thread-local random number generator. The input is untouched.
pub fn shuffle<T: Clone>(items: &[T]) -> Vec<T> {
    shuffle_with(items, &mut rand::rng())
}

/// Returns a copy of `items` reordered with a Fisher-Yates shuffle driven
/// by `rng`.
///
/// # Examples
///
/// ```rust
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use underbar::collection::shuffle_with;
///
/// let original = [1, 2, 3, 4, 5];
/// let mut shuffled = shuffle_with(&original, &mut StdRng::seed_from_u64(7));
/// shuffled.sort_unstable();
/// assert_eq!(shuffled, original);
/// ```
pub fn shuffle_with<T, R>(items: &[T], rng: &mut R) -> Vec<T>
where
    T: Clone,
    R: Rng + ?Sized,
{
    let mut copy = items.to_vec();
    copy.shuffle(rng);
    copy
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rstest::rstest;

    #[rstest]
    #[case(&[], None)]
    #[case(&[7], Some(&7))]
    #[case(&[1, 2, 3], Some(&1))]
    fn test_first(#[case] items: &[i32], #[case] expected: Option<&i32>) {
        assert_eq!(first(items), expected);
    }

    #[rstest]
    #[case(&[], None)]
    #[case(&[1, 2, 3], Some(&3))]
    fn test_last(#[case] items: &[i32], #[case] expected: Option<&i32>) {
        assert_eq!(last(items), expected);
    }

    #[rstest]
    fn test_last_n_larger_than_length() {
        assert_eq!(last_n(&[1, 2, 3], 10), &[1, 2, 3]);
    }

    #[rstest]
    fn test_first_n_zero() {
        assert!(first_n(&[1, 2, 3], 0).is_empty());
    }

    #[rstest]
    fn test_sort_by_leaves_input_untouched() {
        let items = vec![3, 1, 2];
        let sorted = sort_by(&items, |value| *value);
        assert_eq!(sorted, vec![1, 2, 3]);
        assert_eq!(items, vec![3, 1, 2]);
    }

    #[rstest]
    fn test_sort_by_float_keys_with_nan() {
        let items = [2.0, f64::NAN, 1.0];
        let sorted = sort_by(&items, |value| *value);
        assert_eq!(sorted.len(), 3);
    }

    #[rstest]
    fn test_sort_by_key_on_row_index() {
        let rows = vec![vec![3, 1], vec![9], vec![2, 0], vec![5, 1]];
        let sorted = sort_by_key(&rows, &1);
        assert_eq!(sorted, vec![vec![9], vec![2, 0], vec![3, 1], vec![5, 1]]);
        assert_eq!(rows[0], vec![3, 1]);
    }

    #[rstest]
    fn test_zip_empty() {
        let lists: Vec<Vec<i32>> = Vec::new();
        assert!(zip(&lists).is_empty());
    }

    #[rstest]
    fn test_flatten_deeply_nested() {
        let mut nested = Nested::Item(0);
        for _ in 0..10 {
            nested = Nested::List(vec![nested]);
        }
        assert_eq!(flatten(&[nested, Nested::from(1)]), vec![0, 1]);
    }

    #[rstest]
    fn test_intersection_of_nothing() {
        let lists: Vec<Vec<i32>> = Vec::new();
        assert!(intersection(&lists).is_empty());
    }

    #[rstest]
    fn test_intersection_single_list_is_uniq() {
        assert_eq!(intersection(&[vec![1, 1, 2]]), vec![1, 2]);
    }

    #[rstest]
    fn test_difference_without_others() {
        let others: [Vec<i32>; 0] = [];
        assert_eq!(difference(&[1, 2], &others), vec![1, 2]);
    }

    #[rstest]
    fn test_shuffle_is_deterministic_for_seed() {
        let items: Vec<i32> = (0..20).collect();
        let first_run = shuffle_with(&items, &mut StdRng::seed_from_u64(42));
        let second_run = shuffle_with(&items, &mut StdRng::seed_from_u64(42));
        assert_eq!(first_run, second_run);
    }

    #[rstest]
    fn test_shuffle_keeps_elements() {
        let items = vec!['a', 'b', 'c', 'd'];
        let mut shuffled = shuffle(&items);
        shuffled.sort_unstable();
        assert_eq!(shuffled, items);
    }
}
