/// The bookkeeping for a single element of a `NodeStore`.
///
/// Nodes are addressed by the index of their element in the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct SubsetNode {
    /// The parent of the node in its subset tree, `None` for the root.
    parent: Option<usize>,
    /// A link to another index.
    /// These form a circular linked list in its subset.
    link: usize,
    /// An upper bound on the size of the subset, only meaningful for a root.
    weight: usize,
}

impl SubsetNode {
    /// Create a new root `SubsetNode` for an element with the given index.
    pub(crate) fn new(index: usize) -> Self {
        Self {
            parent: None,
            link: index,
            weight: 1,
        }
    }

    /// Return the `parent` variable.
    #[inline]
    pub(crate) fn parent(&self) -> Option<usize> {
        self.parent
    }

    /// Set the `parent` variable.
    #[inline]
    pub(crate) fn set_parent(&mut self, value: usize) {
        self.parent = Some(value);
    }

    /// Return the `link` variable.
    #[inline]
    pub(crate) fn link(&self) -> usize {
        self.link
    }

    /// Set the `link` variable.
    #[inline]
    pub(crate) fn set_link(&mut self, value: usize) {
        self.link = value;
    }

    /// Return the `weight` variable.
    #[inline]
    pub(crate) fn weight(&self) -> usize {
        self.weight
    }

    /// Set the `weight` variable.
    #[inline]
    pub(crate) fn set_weight(&mut self, value: usize) {
        self.weight = value;
    }

    #[inline]
    pub(crate) fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}
