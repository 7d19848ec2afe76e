//! The arena owning every `SubsetNode` of one disjoint-set instance.

use {
    std::{
        borrow::Borrow,
        hash::{BuildHasher, Hash},
        ops,
    },
    indexmap::{map::Entry, IndexMap},
    thiserror::Error,
    crate::disjoint_sets::node::SubsetNode,
};

/// Returned when an element that already has a node is registered again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("element already has a subset node at index {index}")]
pub(crate) struct DuplicateElement {
    /// The index of the node that is already present.
    pub(crate) index: usize,
}

/// Maps each element to its `SubsetNode`.
///
/// The position of an element in the map is the identity of its node,
/// parents and links refer to nodes by this index.
/// Elements are never removed so these indices stay valid.
pub(crate) struct NodeStore<T, S> {
    nodes: IndexMap<T, SubsetNode, S>,
}

impl<T, S> NodeStore<T, S> {
    pub(crate) fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self {
            nodes: IndexMap::with_capacity_and_hasher(capacity, hash_builder),
        }
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    #[inline]
    pub(crate) fn hasher(&self) -> &S {
        self.nodes.hasher()
    }

    /// Returns the element stored at `index`.
    #[inline]
    pub(crate) fn element(&self, index: usize) -> Option<&T> {
        self.nodes.get_index(index).map(|(element, _)| element)
    }

    /// All elements in the order they were inserted.
    #[inline]
    pub(crate) fn elements(&self) -> indexmap::map::Keys<T, SubsetNode> {
        self.nodes.keys()
    }
}

impl<T, S> NodeStore<T, S> where
    T: Eq + Hash,
    S: BuildHasher,
{
    /// Returns the index of the node of `element` if it was inserted before.
    #[inline]
    pub(crate) fn lookup<Q>(&self, element: &Q) -> Option<usize> where
        T: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.nodes.get_index_of(element)
    }

    /// Creates a new root node for `element` and returns its index.
    ///
    /// If `element` already has a node nothing changes and the index of that node is
    /// returned in the error.
    pub(crate) fn insert_new_node(&mut self, element: T) -> Result<usize, DuplicateElement> {
        match self.nodes.entry(element) {
            Entry::Occupied(occupied) => Err(DuplicateElement { index: occupied.index() }),
            Entry::Vacant(vacant) => {
                let index = vacant.index();
                vacant.insert(SubsetNode::new(index));

                Ok(index)
            },
        }
    }

    #[inline]
    pub(crate) fn reserve(&mut self, additional: usize) {
        self.nodes.reserve(additional);
    }
}

/// Copies the forest node for node.
///
/// Every node keeps its index so parents and links of the copy point at the same
/// positions, the copied forest has exactly the shape of the original.
impl<T, S> Clone for NodeStore<T, S> where
    T: Clone,
    S: Clone,
{
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
        }
    }
}

impl<T, S> ops::Index<usize> for NodeStore<T, S> {
    type Output = SubsetNode;

    #[inline]
    fn index(&self, index: usize) -> &SubsetNode {
        &self.nodes[index]
    }
}

impl<T, S> ops::IndexMut<usize> for NodeStore<T, S> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut SubsetNode {
        &mut self.nodes[index]
    }
}

#[cfg(test)]
mod tests {
    use {
        std::collections::hash_map::RandomState,
        super::*,
    };

    fn store() -> NodeStore<char, RandomState> {
        NodeStore::with_capacity_and_hasher(0, RandomState::new())
    }

    #[test]
    fn new_nodes_are_singleton_roots() {
        let mut store = store();

        assert!(store.is_empty());
        assert_eq!(store.insert_new_node('a'), Ok(0));
        assert_eq!(store.insert_new_node('b'), Ok(1));

        assert_eq!(store.len(), 2);
        for index in 0 .. 2 {
            assert!(store[index].is_root());
            assert_eq!(store[index].link(), index);
            assert_eq!(store[index].weight(), 1);
        }
        assert_eq!(store.lookup(&'b'), Some(1));
        assert_eq!(store.lookup(&'c'), None);
        assert_eq!(store.element(0), Some(&'a'));
    }

    #[test]
    fn duplicate_element_is_rejected() {
        let mut store = store();
        store.insert_new_node('a').unwrap();
        store.insert_new_node('b').unwrap();

        assert_eq!(store.insert_new_node('b'), Err(DuplicateElement { index: 1 }));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn clone_keeps_the_forest_shape() {
        let mut store = store();
        for element in "abcd".chars() {
            store.insert_new_node(element).unwrap();
        }
        store[1].set_parent(0);
        store[3].set_parent(0);
        store[0].set_weight(3);

        let mut copy = store.clone();

        for index in 0 .. store.len() {
            assert_eq!(copy[index], store[index]);
            assert_eq!(copy.element(index), store.element(index));
        }

        // The copy does not alias the original.
        copy[2].set_parent(0);
        assert!(store[2].is_root());
    }
}
