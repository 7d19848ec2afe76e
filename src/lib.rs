//! A [disjoint-sets/union-find] container that partitions hashable elements in subsets.
//!
//! The main struct of this crate is [`DisjointSet<T>`].
//! Elements are added with the `insert` method which at the same time joins the subset of the
//! new element with the subsets of elements that are already present.
//! You can check if elements share a subset with the `same_subset` method and iterate over
//! the elements of a subset with the `subset_containing` and `all_subsets` methods.
//! Inserting has an amortized complexity of `O(α(n))` per joined element where 'α' is the
//! inverse Ackermann function.
//! The `α(n)` has value below 5 for any `n` that can be written in the observable universe.
//!
//! A [`DisjointSet<T>`] behaves like a value: a clone is cheap because it shares its nodes
//! with the original until one of the two is mutated.
//! Only then are the nodes copied, so the clones never affect each other.
//!
//! This can be used for example to keep track of the connected components of an undirected
//! graph whose vertices are discovered one at a time:
//!
//! ```
//! use disjoint_subsets::DisjointSet;
//!
//! let mut disjoint_set = DisjointSet::new();
//! for &number in &[100, 4, 200, 1, 3, 2] {
//!     disjoint_set.insert(number, &[number - 1, number + 1]);
//! }
//!
//! let longest_run = disjoint_set.all_subsets().map(Iterator::count).max();
//! assert!(longest_run == Some(4));
//! ```
//!
//! [disjoint-sets/union-find]: https://en.wikipedia.org/wiki/Disjoint-set_data_structure
//! [`DisjointSet<T>`]: disjoint_sets/disjoint_set/struct.DisjointSet.html

/// We count the amount of expresions given to this macro.
#[doc(hidden)]
#[macro_export]
macro_rules! disjoint_subsets_count_expr {
    () => { 0usize };
    ($_single: expr) => { 1usize };
    // Even amount of expresions.
    ($($first: expr, $_second: expr),*) => {
        ($crate::disjoint_subsets_count_expr![$($first),*] << 1usize)
    };
    // Odd amount of expresions.
    ($_single: expr, $($first: expr, $_second: expr),*) => {
        ($crate::disjoint_subsets_count_expr![$($first),*] << 1usize) | 1
    };
}

/// A convenient macro to create a `BitVec` similar to `vec!`.
macro_rules! bit_vec {
    ($element: expr; $len: expr) => {
        bit_vec::BitVec::from_elem($len, $element)
    };
}

pub mod disjoint_sets;

pub use crate::disjoint_sets::disjoint_set::{AllSubsets, DisjointSet, Subset};
