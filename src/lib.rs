//! # underbar
//!
//! Collection helpers and function decorators for Rust.
//!
//! ## Overview
//!
//! - **Collections**: a single traversal primitive, [`each`](collection::each),
//!   over sequences, plain counts and key-value mappings, plus the usual
//!   helpers (`map`, `filter`, `reduce`, `pluck`, `zip`, ...) written as folds
//!   over it.
//! - **Decorators**: wrappers that change how a function is invoked:
//!   [`Once`](decorator::Once), [`Memoize`](decorator::Memoize),
//!   [`delay`](decorator::delay) and [`Throttle`](decorator::Throttle).
//!
//! ## Feature Flags
//!
//! - `collection`: iteration substrate and transform helpers
//! - `decorator`: function decorators and the [`Scheduler`](decorator::Scheduler) seam
//! - `async`: tokio-backed scheduler used by `delay` and `throttle`
//! - `serde`: JSON-based cache keys for `memoize`
//! - `full`: enable all features
//!
//! ## Example
//!
//! ```rust
//! # #[cfg(all(feature = "collection", feature = "decorator", feature = "serde"))]
//! # {
//! use underbar::prelude::*;
//!
//! let add = memoize(|(left, right): (i32, i32)| left + right);
//! assert_eq!(add.call((2, 3)).unwrap(), 5);
//! assert_eq!(add.call((2, 3)).unwrap(), 5);
//! assert_eq!(add.len(), 1);
//!
//! let doubled = map(&vec![1, 2, 3], |value, _, _| value * 2);
//! assert_eq!(doubled, vec![2, 4, 6]);
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports the flat function namespace and the decorator types.
///
/// # Usage
///
/// ```rust
/// use underbar::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};

    #[cfg(feature = "collection")]
    pub use crate::collection::*;

    #[cfg(feature = "decorator")]
    pub use crate::decorator::*;
}

pub mod error;

pub use error::{Error, Result};

#[cfg(feature = "collection")]
pub mod collection;

#[cfg(feature = "decorator")]
pub mod decorator;
