//! A [disjoint-sets/union-find] container of hashable elements with value semantics.
//!
//! See [`DisjointSet<T>`] for more information.
//!
//! [disjoint-sets/union-find]: https://en.wikipedia.org/wiki/Disjoint-set_data_structure
//! [`DisjointSet<T>`]: struct.DisjointSet.html

use {
    std::{
        borrow::Borrow,
        collections::{hash_map::RandomState, HashMap},
        fmt,
        hash::{BuildHasher, Hash},
        iter::{self, FromIterator, FusedIterator},
        ops,
        sync::Arc,
    },
    log::trace,
    crate::disjoint_sets::node_store::NodeStore,
};
#[cfg(feature = "rayon")]
use rayon::prelude::*;
#[cfg(feature = "proptest")]
use proptest::prelude::*;

/// A [disjoint-sets/union-find] container that partitions its elements in subsets.
///
/// Elements are added with the `insert` method which at the same time joins the subset of
/// the new element with the subsets of any number of elements already present.
/// Elements are never removed and subsets are never split.
///
/// A `DisjointSet` behaves like a value.
/// Cloning it is `O(1)` because the clone shares the nodes with the original, the first
/// mutation of a handle that shares its nodes copies them first.
/// After that the two handles don't affect each other.
///
/// # Examples
///
/// ```
/// use disjoint_subsets::DisjointSet;
///
/// let mut disjoint_set = DisjointSet::new();
/// disjoint_set.insert(1, &[]);
/// disjoint_set.insert(3, &[]);
///
/// let copy = disjoint_set.clone();
/// disjoint_set.insert(2, &[1, 3]);
///
/// assert!(disjoint_set.same_subset(&1, &3));
/// assert!(!copy.same_subset(&1, &3));
/// assert!(!copy.contains(&2));
/// ```
///
/// [disjoint-sets/union-find]: https://en.wikipedia.org/wiki/Disjoint-set_data_structure
pub struct DisjointSet<T, S = RandomState> {
    /// The nodes, shared by all clones until one of them mutates.
    store: Arc<NodeStore<T, S>>,
}

/// Creates a [`DisjointSet`] containing the arguments.
///
/// There are two forms of the `disjoint_set!` macro:
///
/// - Create a [`DisjointSet`] containing a given list of elements all in distinct subsets:
///
/// ```
/// # #[macro_use]
/// # extern crate disjoint_subsets;
/// #
/// # fn main() {
/// let disjoint_set = disjoint_set!['a', 'b', 'c'];
///
/// assert!(disjoint_set.len() == 3);
/// assert!(disjoint_set.amount_of_subsets() == 3);
/// # }
/// ```
///
/// - Create a [`DisjointSet`] containing a given list of elements in the subsets specified:
///
/// ```
/// # #[macro_use]
/// # extern crate disjoint_subsets;
/// #
/// # fn main() {
/// let disjoint_set = disjoint_set![
///     'a' => 0,
///     'b' => 1,
///     'c' => 2,
///     'd' => 1,
///     'e' => 0,
/// ];
///
/// assert!(disjoint_set.same_subset(&'a', &'e'));
/// assert!(disjoint_set.same_subset(&'b', &'d'));
/// assert!(disjoint_set.amount_of_subsets() == 3);
/// # }
/// ```
///
/// You can use any identifiers that implement `Hash` and `Eq`.
/// Elements with the same subset identifiers will be placed in the same subset.
/// These identifiers will only be used when constructing a [`DisjointSet`]
/// and will not be stored further.
/// The elements need to implement `Clone` for this form.
///
/// [`DisjointSet`]: disjoint_set/struct.DisjointSet.html
#[macro_export]
macro_rules! disjoint_set {
    ($($elem: expr),*) => {
        {
            let len = $crate::disjoint_subsets_count_expr![$($elem),*];
            let mut disjoint_set = $crate::DisjointSet::with_capacity(len);

            $(
                disjoint_set.insert($elem, ::std::iter::empty());
            )*

            disjoint_set
        }
    };
    ($($elem: expr,)*) => {
        $crate::disjoint_set![$($elem),*]
    };
    ($($elem: expr => $set: expr),*) => {
        {
            let len = $crate::disjoint_subsets_count_expr![$($elem),*];
            let mut disjoint_set = $crate::DisjointSet::with_capacity(len);
            let mut map = ::std::collections::HashMap::new();

            $(
                let elem = $elem;
                let first = map.entry($set).or_insert_with(|| ::std::clone::Clone::clone(&elem));
                disjoint_set.insert(elem, ::std::iter::once(&*first));
            )*

            disjoint_set
        }
    };
    ($($elem: expr => $set: expr,)*) => {
        $crate::disjoint_set![$($elem => $set),*]
    }
}

impl<T> DisjointSet<T, RandomState> {
    /// Constructs a new, empty `DisjointSet<T>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use disjoint_subsets::DisjointSet;
    ///
    /// let disjoint_set: DisjointSet<u32> = DisjointSet::new();
    ///
    /// assert!(disjoint_set.is_empty());
    /// assert!(disjoint_set.len() == 0);
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self::with_hasher(RandomState::new())
    }

    /// Constructs a new, empty `DisjointSet<T>` that can hold `capacity` elements
    /// without reallocating.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, RandomState::new())
    }
}

impl<T, S> DisjointSet<T, S> {
    /// Constructs a new, empty `DisjointSet<T, S>` which will use `hash_builder` to hash
    /// its elements.
    #[inline]
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_capacity_and_hasher(0, hash_builder)
    }

    #[inline]
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self {
            store: Arc::new(NodeStore::with_capacity_and_hasher(capacity, hash_builder)),
        }
    }

    /// Returns `true` if no element was ever inserted.
    ///
    /// This will be done in `O(1)` time.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Returns the amount of elements in the `DisjointSet`.
    ///
    /// This counts elements and not subsets, see `amount_of_subsets` for the latter.
    /// This will be done in `O(1)` time.
    ///
    /// # Examples
    ///
    /// ```
    /// use disjoint_subsets::DisjointSet;
    ///
    /// let mut disjoint_set = DisjointSet::new();
    /// disjoint_set.insert(1, &[]);
    /// disjoint_set.insert(2, &[1]);
    ///
    /// assert!(disjoint_set.len() == 2);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns the number of elements the `DisjointSet` can hold without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    #[inline]
    pub fn hasher(&self) -> &S {
        self.store.hasher()
    }

    /// Returns an iterator over all elements in the order they were first inserted.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &T> + ExactSizeIterator + FusedIterator {
        self.store.elements()
    }

    /// Returns an iterator over all subsets.
    ///
    /// Each subset is an iterator over its elements.
    /// The order of the subsets and of the elements in a subset is not specified.
    /// This will be done in `O(n)` time.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::HashSet;
    /// use disjoint_subsets::DisjointSet;
    ///
    /// let mut disjoint_set = DisjointSet::new();
    /// disjoint_set.insert(1, &[]);
    /// disjoint_set.insert(3, &[]);
    /// disjoint_set.insert(2, &[1]);
    ///
    /// let mut subsets: Vec<HashSet<i32>> = disjoint_set
    ///     .all_subsets()
    ///     .map(|subset| subset.cloned().collect())
    ///     .collect();
    /// subsets.sort_by_key(|subset| subset.len());
    ///
    /// assert!(subsets.len() == 2);
    /// assert!(subsets[0] == [3].iter().cloned().collect::<HashSet<_>>());
    /// assert!(subsets[1] == [1, 2].iter().cloned().collect::<HashSet<_>>());
    /// ```
    #[inline]
    pub fn all_subsets(&self) -> AllSubsets<T, S> {
        let len = self.len();

        AllSubsets {
            store: &self.store,
            done: bit_vec![false; len],
            range: 0 .. len,
        }
    }

    /// Returns the amount of distinct subsets.
    ///
    /// This method will be executed in `O(n)` time.
    ///
    /// # Examples
    ///
    /// ```
    /// # #[macro_use]
    /// # extern crate disjoint_subsets;
    /// #
    /// # fn main() {
    /// let disjoint_set = disjoint_set![
    ///     8 => 0,
    ///     3 => 1,
    ///     4 => 0,
    ///     5 => 1,
    ///     7 => 2,
    /// ];
    ///
    /// assert!(disjoint_set.amount_of_subsets() == 3);
    /// # }
    /// ```
    pub fn amount_of_subsets(&self) -> usize {
        let mut done = bit_vec![false; self.len()];
        let mut count = 0;

        for i in 0 .. self.len() {
            let root = self.store.find_root(i);
            if !done[root] {
                done.set(root, true);
                count += 1;
            }
        }

        count
    }

    /// Returns a `NodeStore` that is not shared with any other handle.
    ///
    /// If the store is shared it is copied first, the copy becomes the store of
    /// this handle only.
    fn store_mut(&mut self) -> &mut NodeStore<T, S> where
        T: Clone,
        S: Clone,
    {
        if Arc::get_mut(&mut self.store).is_none() {
            trace!("copying a shared store of {} elements before mutating it", self.store.len());
        }

        Arc::make_mut(&mut self.store)
    }
}

impl<T, S> DisjointSet<T, S> where
    T: Eq + Hash,
    S: BuildHasher,
{
    /// Inserts `new_member` and joins its subset with the subsets of `existing_members`.
    ///
    /// If `new_member` was already inserted its current subset is used.
    /// Elements of `existing_members` that were never inserted are ignored, they won't
    /// be inserted by this method.
    /// Afterwards the subset of `new_member` is the union of its own subset and the
    /// subsets of all elements in `existing_members`.
    ///
    /// This method has an amortized complexity of `O(α(n))` for each element of
    /// `existing_members` where `α` is the inverse Ackermann function.
    /// If this `DisjointSet` shares its elements with a clone they are copied first which
    /// takes `O(n)` time.
    ///
    /// # Examples
    ///
    /// ```
    /// use disjoint_subsets::DisjointSet;
    ///
    /// let mut disjoint_set = DisjointSet::new();
    /// disjoint_set.insert(1, &[]);
    /// disjoint_set.insert(3, &[]);
    ///
    /// assert!(!disjoint_set.same_subset(&1, &3));
    ///
    /// // 0 was never inserted so it is ignored.
    /// disjoint_set.insert(2, &[0, 1, 3]);
    ///
    /// assert!(disjoint_set.same_subset(&1, &3));
    /// assert!(!disjoint_set.contains(&0));
    /// ```
    pub fn insert<'a, I>(&mut self, new_member: T, existing_members: I) where
        I: IntoIterator<Item = &'a T>,
        T: Clone + 'a,
        S: Clone,
    {
        self.store_mut().insert(new_member, existing_members);
    }

    /// Returns `true` if `member` was inserted before.
    ///
    /// This will be done in `O(1)` time.
    #[inline]
    pub fn contains<Q>(&self, member: &Q) -> bool where
        T: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.store.lookup(member).is_some()
    }

    /// Returns `true` if `first_member` and `second_member` were inserted and share a subset.
    ///
    /// # Examples
    ///
    /// ```
    /// # #[macro_use]
    /// # extern crate disjoint_subsets;
    /// #
    /// # fn main() {
    /// let disjoint_set = disjoint_set![
    ///     "a" => 0,
    ///     "b" => 1,
    ///     "c" => 0,
    /// ];
    ///
    /// assert!(disjoint_set.same_subset("a", "c"));
    /// assert!(!disjoint_set.same_subset("a", "b"));
    /// assert!(!disjoint_set.same_subset("a", "d"));
    /// # }
    /// ```
    pub fn same_subset<Q1, Q2>(&self, first_member: &Q1, second_member: &Q2) -> bool where
        T: Borrow<Q1> + Borrow<Q2>,
        Q1: Eq + Hash + ?Sized,
        Q2: Eq + Hash + ?Sized,
    {
        match (self.store.lookup(first_member), self.store.lookup(second_member)) {
            (Some(first), Some(second)) => {
                self.store.find_root(first) == self.store.find_root(second)
            },
            _ => false,
        }
    }

    /// Counts the subsets of `members` the way a run length encoding would.
    ///
    /// The members are walked in order and a subset is counted each time the subset of a
    /// member differs from the subset of the member before it.
    /// Members that were never inserted are skipped and don't end a run.
    /// A subset that comes back after another subset is therefore counted again.
    ///
    /// # Examples
    ///
    /// ```
    /// # #[macro_use]
    /// # extern crate disjoint_subsets;
    /// #
    /// # fn main() {
    /// let disjoint_set = disjoint_set![
    ///     1 => 'a',
    ///     2 => 'a',
    ///     3 => 'b',
    /// ];
    ///
    /// assert!(disjoint_set.count_of_subsets_containing(&[1, 2, 3]) == 2);
    /// assert!(disjoint_set.count_of_subsets_containing(&[1, 9, 2]) == 1);
    /// assert!(disjoint_set.count_of_subsets_containing(&[1, 3, 2]) == 3);
    /// # }
    /// ```
    pub fn count_of_subsets_containing<'a, I>(&self, members: I) -> usize where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        let mut count = 0;
        let mut last_root = None;

        for member in members {
            if let Some(index) = self.store.lookup(member) {
                let root = self.store.find_root(index);

                if last_root != Some(root) {
                    count += 1;
                }

                last_root = Some(root);
            }
        }

        count
    }

    /// Returns an iterator over the subset `member` belongs to, or `None` if `member` was
    /// never inserted.
    ///
    /// The next element of the iterator is found in `O(1)` time.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::HashSet;
    /// use disjoint_subsets::DisjointSet;
    ///
    /// let mut disjoint_set = DisjointSet::new();
    /// disjoint_set.insert(1, &[]);
    /// disjoint_set.insert(2, &[1]);
    /// disjoint_set.insert(3, &[]);
    ///
    /// let subset: HashSet<i32> = disjoint_set.subset_containing(&2).unwrap().cloned().collect();
    ///
    /// assert!(subset == [1, 2].iter().cloned().collect::<HashSet<_>>());
    /// assert!(disjoint_set.subset_containing(&0).is_none());
    /// ```
    #[inline]
    pub fn subset_containing<Q>(&self, member: &Q) -> Option<Subset<T, S>> where
        T: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let index = self.store.lookup(member)?;

        Some(Subset {
            store: &self.store,
            current: Some(index),
            start: index,
        })
    }

    /// Reserves capacity for at least `additional` more elements.
    ///
    /// This is a mutation so a store shared with a clone is copied first.
    #[inline]
    pub fn reserve(&mut self, additional: usize) where
        T: Clone,
        S: Clone,
    {
        self.store_mut().reserve(additional);
    }
}

impl<T, S> Clone for DisjointSet<T, S> {
    /// Returns a handle sharing the nodes of `self`.
    ///
    /// This is `O(1)`, the nodes are copied when one of the handles mutates.
    #[inline]
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<T, S> Default for DisjointSet<T, S> where
    S: Default,
{
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<T, S> fmt::Debug for DisjointSet<T, S> where
    T: fmt::Debug,
{
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        // We map the roots to `usize` names.
        let mut map = HashMap::with_capacity(self.len());
        let mut builder = formatter.debug_list();

        for (i, element) in self.store.elements().enumerate() {
            let root = self.store.find_root(i);

            let names = map.len();
            let name = *map.entry(root).or_insert(names);

            builder.entry(&format_args!("{:?} => {}", element, name));
        }

        builder.finish()
    }
}

/// Two `DisjointSet`s are equal if they contain the same elements divided in the same subsets.
impl<T, S> PartialEq for DisjointSet<T, S> where
    T: Eq + Hash,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        if Arc::ptr_eq(&self.store, &other.store) {
            return true
        }
        if self.len() != other.len() {
            return false
        }

        // We map the roots of self to the roots of other and back.
        let mut forward = HashMap::with_capacity(self.len());
        let mut backward = HashMap::with_capacity(self.len());

        for (i, element) in self.store.elements().enumerate() {
            let other_index = match other.store.lookup(element) {
                Some(index) => index,
                None => return false,
            };

            let self_root = self.store.find_root(i);
            let other_root = other.store.find_root(other_index);

            if *forward.entry(self_root).or_insert(other_root) != other_root {
                return false
            }
            if *backward.entry(other_root).or_insert(self_root) != self_root {
                return false
            }
        }

        true
    }
}

impl<T, S> Eq for DisjointSet<T, S> where
    T: Eq + Hash,
    S: BuildHasher,
{}

/// Inserts each element in its own subset.
impl<T, S> FromIterator<T> for DisjointSet<T, S> where
    T: Eq + Hash + Clone,
    S: BuildHasher + Clone + Default,
{
    fn from_iter<I>(iter: I) -> Self where I: IntoIterator<Item = T> {
        let mut disjoint_set = Self::default();
        disjoint_set.extend(iter);

        disjoint_set
    }
}

/// Inserts each element in its own subset.
///
/// Elements that are already present keep their subset.
impl<T, S> Extend<T> for DisjointSet<T, S> where
    T: Eq + Hash + Clone,
    S: BuildHasher + Clone,
{
    fn extend<I>(&mut self, iter: I) where I: IntoIterator<Item = T> {
        let iter = iter.into_iter();
        let store = self.store_mut();
        store.reserve(iter.size_hint().0);

        for element in iter {
            store.insert(element, iter::empty());
        }
    }
}

#[cfg(feature = "rayon")]
impl<T, S> FromParallelIterator<T> for DisjointSet<T, S> where
    T: Eq + Hash + Clone + Send,
    S: BuildHasher + Clone + Default,
{
    fn from_par_iter<I>(par_iter: I) -> Self where I: IntoParallelIterator<Item = T> {
        let mut disjoint_set = Self::default();
        disjoint_set.par_extend(par_iter);

        disjoint_set
    }
}

/// The elements are gathered in parallel and inserted in order afterwards.
#[cfg(feature = "rayon")]
impl<T, S> ParallelExtend<T> for DisjointSet<T, S> where
    T: Eq + Hash + Clone + Send,
    S: BuildHasher + Clone,
{
    fn par_extend<I>(&mut self, par_iter: I) where I: IntoParallelIterator<Item = T> {
        let elements: Vec<T> = par_iter.into_par_iter().collect();

        self.extend(elements);
    }
}

#[cfg(feature = "proptest")]
impl<T> Arbitrary for DisjointSet<T, RandomState> where
    T: Arbitrary + Eq + Hash + Clone + 'static,
    T::Strategy: 'static,
{
    type Parameters = (proptest::collection::SizeRange, T::Parameters);
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(params: Self::Parameters) -> Self::Strategy {
        let (size_range, params) = params;
        let params = (size_range, (params, ()));

        (Vec::<(T, usize)>::arbitrary_with(params)).prop_map(|vec| {
            let mut disjoint_set = Self::with_capacity(vec.len());

            // We map a `set_number` to the first element of that subset.
            let mut map = HashMap::with_capacity(vec.len());

            for (element, set_number) in vec {
                // This gives few large subsets and many small ones.
                let set_number = set_number.trailing_zeros();

                let first = map.entry(set_number).or_insert_with(|| element.clone());
                disjoint_set.insert(element, iter::once(&*first));
            }

            disjoint_set
        }).boxed()
    }
}

/// An iterator over the elements of a subset.
///
/// This struct is created by [`subset_containing`] and [`all_subsets`].
///
/// [`subset_containing`]: struct.DisjointSet.html#method.subset_containing
/// [`all_subsets`]: struct.DisjointSet.html#method.all_subsets
pub struct Subset<'a, T: 'a, S: 'a = RandomState> {
    store: &'a NodeStore<T, S>,
    current: Option<usize>,
    start: usize,
}

impl<'a, T, S> Clone for Subset<'a, T, S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store,
            current: self.current,
            start: self.start,
        }
    }
}

impl<'a, T, S> fmt::Debug for Subset<'a, T, S> where
    T: fmt::Debug,
{
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, T, S> Iterator for Subset<'a, T, S> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let current = self.current?;

        let next = self.store[current].link();

        // We are back where we started.
        self.current = if next == self.start {
            None
        } else {
            Some(next)
        };

        self.store.element(current)
    }
}

impl<'a, T, S> FusedIterator for Subset<'a, T, S> {}

/// An iterator over all subsets of a `DisjointSet`.
///
/// This struct is created by [`all_subsets`].
///
/// [`all_subsets`]: struct.DisjointSet.html#method.all_subsets
pub struct AllSubsets<'a, T: 'a, S: 'a = RandomState> {
    store: &'a NodeStore<T, S>,
    done: bit_vec::BitVec,
    range: ops::Range<usize>,
}

impl<'a, T, S> Iterator for AllSubsets<'a, T, S> {
    type Item = Subset<'a, T, S>;

    fn next(&mut self) -> Option<Subset<'a, T, S>> {
        // We keep going until we find a subset we have not returned yet.
        loop {
            let index = self.range.next()?;
            let root = self.store.find_root(index);

            // If we have not returned this subset yet.
            if !self.done[root] {
                self.done.set(root, true);

                return Some(Subset {
                    store: self.store,
                    current: Some(root),
                    start: root,
                })
            }
        }
    }
}

impl<'a, T, S> FusedIterator for AllSubsets<'a, T, S> {}
