//! The union-find algorithm over a `NodeStore`.
//!
//! Roots are found by following parents, mutating finds compress the path they walked
//! and subsets are joined by weight so the trees stay shallow.

use {
    std::hash::{BuildHasher, Hash},
    log::trace,
    smallvec::SmallVec,
    crate::disjoint_sets::node_store::{DuplicateElement, NodeStore},
};

impl<T, S> NodeStore<T, S> {
    /// Gives the root of the tree that `index` belongs to.
    ///
    /// This won't update any parents so it can be used on a shared store.
    ///
    /// # Panics
    ///
    /// If `index` is out of bounds.
    #[inline]
    pub(crate) fn find_root(&self, mut index: usize) -> usize {
        while let Some(parent) = self[index].parent() {
            index = parent;
        }

        index
    }

    /// Gives the root of the tree that `index` belongs to and points every node on
    /// the way directly to that root.
    ///
    /// Nodes that stop being a root do not need a weight so it is reset to 1.
    /// The path is walked twice instead of recursing so deep trees can't overflow
    /// the stack.
    ///
    /// # Panics
    ///
    /// If `index` is out of bounds.
    pub(crate) fn find_and_compress_root(&mut self, index: usize) -> usize {
        let root = self.find_root(index);

        let mut current = index;
        while let Some(parent) = self[current].parent() {
            self[current].set_parent(root);
            self[current].set_weight(1);

            current = parent;
        }

        root
    }

    /// Joins the subsets of all `roots` and returns the root of the result.
    ///
    /// The first root is the running root. Every next root is joined to it, the
    /// one with the strictly smaller weight is placed below the other so a tie
    /// keeps the running root on top. The root on top becomes the new running root
    /// and its weight grows by the weight of the other.
    ///
    /// Returns `None` if `roots` is empty.
    pub(crate) fn union_roots(&mut self, roots: &[usize]) -> Option<usize> {
        let (&first, rest) = roots.split_first()?;
        let mut merged = first;
        debug_assert!(self[merged].is_root());

        for &root in rest {
            // A root given twice may already have been placed below `merged`.
            let root = self.find_root(root);
            if root == merged {
                continue
            }

            let (parent, child) = if self[merged].weight() < self[root].weight() {
                (root, merged)
            } else {
                (merged, root)
            };

            // We swap the links to join the circular lists.
            let parent_link = self[parent].link();
            let child_link = self[child].link();
            self[parent].set_link(child_link);
            self[child].set_link(parent_link);

            self[child].set_parent(parent);
            let weight = self[parent].weight() + self[child].weight();
            self[parent].set_weight(weight);

            trace!("joined subset {} into subset {}, weight is now {}", child, parent, weight);

            merged = parent;
        }

        Some(merged)
    }
}

impl<T, S> NodeStore<T, S> where
    T: Eq + Hash,
    S: BuildHasher,
{
    /// Inserts `new_member` and joins its subset with the subsets of `existing_members`.
    ///
    /// Members of `existing_members` that were never inserted are skipped, they are not
    /// inserted themselves.
    pub(crate) fn insert<'a, I>(&mut self, new_member: T, existing_members: I) where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        let mut roots = SmallVec::<[usize; 4]>::new();

        let first = match self.insert_new_node(new_member) {
            // A new node is its own root.
            Ok(index) => index,
            Err(DuplicateElement { index }) => self.find_and_compress_root(index),
        };
        roots.push(first);

        for member in existing_members {
            if let Some(index) = self.lookup(member) {
                roots.push(self.find_and_compress_root(index));
            }
        }

        self.union_roots(&roots);
    }
}

#[cfg(test)]
mod tests {
    use {
        std::collections::hash_map::RandomState,
        super::*,
    };

    /// A store with the elements `0 .. len` each in their own subset.
    fn store(len: u32) -> NodeStore<u32, RandomState> {
        let mut store = NodeStore::with_capacity_and_hasher(len as usize, RandomState::new());
        for element in 0 .. len {
            store.insert_new_node(element).unwrap();
        }

        store
    }

    /// Collects the indices on the circular list starting at `index`.
    fn cycle(store: &NodeStore<u32, RandomState>, index: usize) -> Vec<usize> {
        let mut indices = vec![index];
        let mut current = store[index].link();
        while current != index {
            indices.push(current);
            current = store[current].link();
        }
        indices.sort();

        indices
    }

    #[test]
    fn compression_points_the_path_at_the_root() {
        let mut store = store(4);
        // A chain 3 -> 2 -> 1 -> 0.
        for index in 1 .. 4 {
            store[index].set_parent(index - 1);
            store[index].set_weight(5);
        }

        assert_eq!(store.find_root(3), 0);
        // The non-mutating find leaves the chain alone.
        assert_eq!(store[3].parent(), Some(2));

        assert_eq!(store.find_and_compress_root(3), 0);
        for index in 1 .. 4 {
            assert_eq!(store[index].parent(), Some(0));
            assert_eq!(store[index].weight(), 1);
        }
        assert!(store[0].is_root());
    }

    #[test]
    fn compression_handles_deep_chains() {
        let len = 200_000;
        let mut store = store(len);
        for index in 1 .. len as usize {
            store[index].set_parent(index - 1);
        }

        assert_eq!(store.find_and_compress_root(len as usize - 1), 0);
        assert_eq!(store[len as usize - 1].parent(), Some(0));
    }

    #[test]
    fn union_tie_keeps_the_first_root() {
        let mut store = store(2);

        assert_eq!(store.union_roots(&[0, 1]), Some(0));
        assert_eq!(store[1].parent(), Some(0));
        assert_eq!(store[0].weight(), 2);
        assert_eq!(cycle(&store, 0), vec![0, 1]);
    }

    #[test]
    fn union_places_the_lighter_root_below() {
        let mut store = store(4);
        store.union_roots(&[1, 2]);
        store.union_roots(&[1, 3]);

        // 0 weighs 1 and 1 weighs 3 so 0 moves below 1.
        assert_eq!(store.union_roots(&[0, 1]), Some(1));
        assert_eq!(store[0].parent(), Some(1));
        assert_eq!(store[1].weight(), 4);
        assert_eq!(cycle(&store, 2), vec![0, 1, 2, 3]);
    }

    #[test]
    fn union_skips_repeated_roots() {
        let mut store = store(3);
        store.union_roots(&[1, 2]);

        // Once 0 is placed below 1 the second 0 resolves to 1 and is skipped.
        assert_eq!(store.union_roots(&[0, 1, 0, 1]), Some(1));
        assert_eq!(store[1].weight(), 3);
        assert_eq!(cycle(&store, 0), vec![0, 1, 2]);
    }

    #[test]
    fn union_of_nothing() {
        let mut store = store(1);

        assert_eq!(store.union_roots(&[]), None);
        assert_eq!(store.union_roots(&[0]), Some(0));
        assert_eq!(store[0].weight(), 1);
    }

    #[test]
    fn insert_skips_unknown_members() {
        let mut store = store(2);
        store.insert(5, &[1, 7, 0]);

        assert_eq!(store.len(), 3);
        assert_eq!(store.lookup(&7), None);

        let root = store.find_root(2);
        assert_eq!(store.find_root(0), root);
        assert_eq!(store.find_root(1), root);
        assert_eq!(store[root].weight(), 3);
    }

    #[test]
    fn insert_existing_member_unions_its_subset() {
        let mut store = store(4);
        store.insert(0, &[1]);
        store.insert(2, &[3]);
        store.insert(1, &[3, 1]);

        let root = store.find_root(0);
        assert!((1 .. 4).all(|index| store.find_root(index) == root));
        assert_eq!(store[root].weight(), 4);
        assert_eq!(cycle(&store, 3), vec![0, 1, 2, 3]);
    }
}
