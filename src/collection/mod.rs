//! Collection helpers built on a single traversal primitive.
//!
//! This module provides the [`Collection`] trait and a set of helpers that
//! are all written as folds over [`Collection::each`]. A collection is one
//! of three shapes:
//!
//! - **Sequence** (`[T]`, `Vec<T>`, `[T; N]`, `VecDeque<T>`): keys are
//!   zero-based indices, visited in ascending order
//! - **Count** ([`Count`]): a virtual index range `[0, n)` whose values are
//!   all `()`
//! - **Mapping** (`HashMap`, `BTreeMap`): every key visited once, in the
//!   map's own iteration order
//!
//! # Overview
//!
//! - Traversal: [`each`]
//! - Folds: [`map`], [`filter`], [`reject`], [`reduce`], [`reduce_first`],
//!   [`contains`], [`every`], [`some`], [`index_of`], [`invoke`], [`pluck`]
//! - Objects: [`extend`], [`defaults`]
//! - Arrays: [`identity`], [`first`], [`last`], [`uniq`], [`sort_by`],
//!   [`sort_by_key`], [`zip`], [`flatten`], [`intersection`], [`difference`],
//!   [`shuffle`]
//!
//! # Examples
//!
//! ```rust
//! use underbar::collection::{Count, each, map, reduce};
//! use std::collections::BTreeMap;
//!
//! let sum = reduce(&vec![1, 2, 3], |total, value| total + value, 0);
//! assert_eq!(sum, 6);
//!
//! let mut visited = Vec::new();
//! each(&Count(3), |_, index, _| visited.push(*index));
//! assert_eq!(visited, vec![0, 1, 2]);
//!
//! let ages = BTreeMap::from([("alice", 30), ("bob", 25)]);
//! let names = map(&ages, |_, name, _| name.to_string());
//! assert_eq!(names, vec!["alice", "bob"]);
//! ```

mod array;
mod each;
mod fold;
mod object;

pub use array::{
    Nested, difference, first, first_n, flatten, identity, intersection, last, last_n, shuffle,
    shuffle_with, sort_by, sort_by_key, uniq, uniq_by, zip,
};
pub use each::{Collection, Count, each};
pub use fold::{
    Lookup, contains, every, filter, index_of, invoke, map, pluck, reduce, reduce_first, reject,
    some,
};
pub use object::{Mapping, defaults, extend};
