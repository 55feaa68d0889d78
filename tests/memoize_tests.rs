#![cfg(all(feature = "decorator", feature = "serde"))]
//! Integration tests for `memoize`.
//!
//! Tests cover:
//! - One execution per distinct argument list
//! - Caching of falsy results
//! - Structural (JSON) cache keys
//! - Custom key encoders
//! - Key encoding failures
//! - Recursion through the wrapper

use rstest::rstest;
use serde::Serialize;
use std::cell::Cell;
use std::collections::{BTreeMap, HashMap};
use std::rc::{Rc, Weak};
use underbar::Error;
use underbar::decorator::{ArgsKey, KeyFn, Memoize, memoize, memoize_with};

// =============================================================================
// Distinct Argument Lists
// =============================================================================

#[rstest]
fn memoize_runs_once_per_argument_list() {
    let runs = Cell::new(0);
    let add = memoize(|(left, right): (i32, i32)| {
        runs.set(runs.get() + 1);
        left + right
    });

    assert_eq!(add.call((2, 3)).unwrap(), 5);
    assert_eq!(add.call((2, 3)).unwrap(), 5);
    assert_eq!(add.call((3, 4)).unwrap(), 7);
    assert_eq!(runs.get(), 2);
    assert_eq!(add.len(), 2);
}

#[rstest]
fn memoize_without_arguments_runs_once() {
    let runs = Cell::new(0);
    let zero = memoize(|()| {
        runs.set(runs.get() + 1);
        0
    });

    assert_eq!(zero.call(()).unwrap(), 0);
    assert_eq!(zero.call(()).unwrap(), 0);
    assert_eq!(runs.get(), 1);
}

#[rstest]
#[case::zero(0_i64)]
#[case::negative(-1_i64)]
fn memoize_caches_falsy_numbers(#[case] stored: i64) {
    let runs = Cell::new(0);
    let constant = memoize(|()| {
        runs.set(runs.get() + 1);
        stored
    });
    constant.call(()).unwrap();
    constant.call(()).unwrap();
    assert_eq!(runs.get(), 1);
}

#[rstest]
fn memoize_caches_empty_string_and_false() {
    let runs = Cell::new(0);
    let blank = memoize(|flag: bool| {
        runs.set(runs.get() + 1);
        if flag { String::new() } else { String::from("x") }
    });
    assert_eq!(blank.call(true).unwrap(), "");
    assert_eq!(blank.call(true).unwrap(), "");
    assert_eq!(runs.get(), 1);

    let runs = Cell::new(0);
    let negate = memoize(|flag: bool| {
        runs.set(runs.get() + 1);
        !flag
    });
    assert!(!negate.call(true).unwrap());
    assert!(!negate.call(true).unwrap());
    assert_eq!(runs.get(), 1);
}

// =============================================================================
// Structural Keys
// =============================================================================

#[derive(Serialize)]
struct Query {
    table: &'static str,
    limit: u32,
}

#[rstest]
fn memoize_equal_structures_share_entry() {
    let runs = Cell::new(0);
    let fetch = memoize(|query: Query| {
        runs.set(runs.get() + 1);
        format!("{}:{}", query.table, query.limit)
    });

    let first = fetch.call(Query { table: "users", limit: 10 }).unwrap();
    let second = fetch.call(Query { table: "users", limit: 10 }).unwrap();
    assert_eq!(first, second);
    assert_eq!(runs.get(), 1);

    fetch.call(Query { table: "users", limit: 11 }).unwrap();
    assert_eq!(runs.get(), 2);
}

#[rstest]
fn memoize_btree_map_argument_is_canonical() {
    let runs = Cell::new(0);
    let size = memoize(|options: BTreeMap<String, u8>| {
        runs.set(runs.get() + 1);
        options.len()
    });

    let mut forward = BTreeMap::new();
    forward.insert(String::from("a"), 1);
    forward.insert(String::from("b"), 2);
    let mut backward = BTreeMap::new();
    backward.insert(String::from("b"), 2);
    backward.insert(String::from("a"), 1);

    size.call(forward).unwrap();
    size.call(backward).unwrap();
    assert_eq!(runs.get(), 1);
}

#[rstest]
fn memoize_unencodable_arguments_are_an_error() {
    let runs = Cell::new(0);
    let count = memoize(|table: HashMap<(u8, u8), u8>| {
        runs.set(runs.get() + 1);
        table.len()
    });

    let outcome = count.call(HashMap::from([((1, 2), 3)]));
    assert!(matches!(outcome, Err(Error::KeyEncoding(_))));
    assert_eq!(runs.get(), 0);
    assert!(count.is_empty());
}

// =============================================================================
// Custom Key Encoders
// =============================================================================

#[rstest]
fn memoize_with_args_key() {
    let runs = Cell::new(0);
    let square = memoize_with(
        |value: u64| {
            runs.set(runs.get() + 1);
            value * value
        },
        ArgsKey,
    );
    assert_eq!(square.call(12).unwrap(), 144);
    assert_eq!(square.call(12).unwrap(), 144);
    assert_eq!(runs.get(), 1);
}

#[rstest]
fn memoize_with_key_fn_groups_arguments() {
    let runs = Cell::new(0);
    let greet = memoize_with(
        |name: String| {
            runs.set(runs.get() + 1);
            format!("hello, {name}")
        },
        KeyFn::new(|name: &String| name.to_lowercase()),
    );

    assert_eq!(greet.call(String::from("Ada")).unwrap(), "hello, Ada");
    assert_eq!(greet.call(String::from("ADA")).unwrap(), "hello, Ada");
    assert_eq!(runs.get(), 1);
    assert!(greet.contains(&String::from("ada")).unwrap());
}

#[rstest]
fn memoize_wrappers_do_not_share_cache() {
    let runs = Cell::new(0);
    let body = |value: i32| {
        runs.set(runs.get() + 1);
        value
    };
    let first = Memoize::by_args(body);
    let second = Memoize::by_args(body);

    first.call(1).unwrap();
    second.call(1).unwrap();
    assert_eq!(runs.get(), 2);
}

// =============================================================================
// Recursion
// =============================================================================

type Fibonacci = Memoize<u64, u64, Box<dyn Fn(u64) -> u64>, ArgsKey>;

fn memoized_fibonacci(runs: Rc<Cell<usize>>) -> Rc<Fibonacci> {
    Rc::new_cyclic(|this: &Weak<Fibonacci>| {
        let this = this.clone();
        let function: Box<dyn Fn(u64) -> u64> = Box::new(move |n| {
            runs.set(runs.get() + 1);
            if n < 2 {
                return n;
            }
            let Some(fibonacci) = this.upgrade() else {
                return 0;
            };
            fibonacci.call(n - 1).unwrap_or_default() + fibonacci.call(n - 2).unwrap_or_default()
        });
        Memoize::by_args(function)
    })
}

#[rstest]
fn memoize_fibonacci_calls_itself_through_wrapper() {
    let runs = Rc::new(Cell::new(0));
    let fibonacci = memoized_fibonacci(Rc::clone(&runs));

    assert_eq!(fibonacci.call(10).unwrap(), 55);
    assert_eq!(runs.get(), 11);
    for n in 0..=10 {
        assert!(fibonacci.contains(&n).unwrap());
    }

    assert_eq!(fibonacci.call(12).unwrap(), 144);
    assert_eq!(runs.get(), 13);
}
