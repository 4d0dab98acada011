//! Linked hierarchy of the forest store.
//!
//! Each node knows its parent, its first child, its next sibling, and a
//! "cyclic previous sibling" link: the previous sibling, or the last sibling
//! for the first child. The last child of a node is therefore reachable in
//! `O(1)` without storing it.
//!
//! See
//! <http://www.aosabook.org/en/posa/parsing-xml-at-the-speed-of-light.html#data-structures-for-the-document-object-model>.

use core::iter;
use std::collections::TryReserveError;

use crate::NodeHandle;

/// Parent-child and sibling links of all nodes.
#[derive(Debug, Default, Clone)]
pub(super) struct Hierarchy {
    /// Neighbors storage.
    neighbors: Vec<Neighbors>,
}

impl Hierarchy {
    /// Creates a new node without any neighbors.
    ///
    /// # Panics
    ///
    /// Panics if the node handle overflows.
    pub(super) fn create_root(&mut self) -> NodeHandle {
        let new_id = NodeHandle::from_index(self.neighbors.len()).expect(
            "[precondition] node handle overflowed presumably due to too many node creations",
        );
        self.neighbors.push(Neighbors::new_root(new_id));

        new_id
    }

    /// Returns the neighbors of the node.
    #[inline]
    #[must_use]
    pub(super) fn neighbors(&self, id: NodeHandle) -> Option<&Neighbors> {
        self.neighbors.get(id.index())
    }

    /// Reserves capacity for at least `additional` more nodes.
    pub(super) fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        self.neighbors.try_reserve(additional)
    }

    /// Returns the last child of the node.
    #[must_use]
    pub(super) fn last_child(&self, parent: NodeHandle) -> Option<NodeHandle> {
        let first = self.neighbors(parent)?.first_child?;
        Some(self.nbs(first).prev_sibling_cyclic)
    }

    /// Returns the neighbors of a node known to exist.
    fn nbs(&self, id: NodeHandle) -> &Neighbors {
        self.neighbors(id)
            .expect("[consistency] linked nodes must exist")
    }

    /// Returns the mutable neighbors of a node known to exist.
    fn nbs_mut(&mut self, id: NodeHandle) -> &mut Neighbors {
        self.neighbors
            .get_mut(id.index())
            .expect("[consistency] linked nodes must exist")
    }

    /// Returns true if `ancestor` is `node` itself or one of its ancestors.
    #[must_use]
    pub(super) fn is_ancestor_or_self(&self, ancestor: NodeHandle, node: NodeHandle) -> bool {
        iter::successors(Some(node), |&id| self.nbs(id).parent).any(|id| id == ancestor)
    }

    /// Returns an iterator over the children of the node.
    #[must_use]
    pub(super) fn children(&self, parent: NodeHandle) -> Children<'_> {
        Children {
            hier: self,
            next: self.neighbors(parent).and_then(|nbs| nbs.first_child),
        }
    }

    /// Returns an iterator over the node and its next siblings.
    #[must_use]
    pub(super) fn siblings_from(&self, node: NodeHandle) -> Children<'_> {
        Children {
            hier: self,
            next: Some(node),
        }
    }

    /// Detaches the node (and its descendants) from its parent.
    ///
    /// Does nothing if the node has no parent.
    pub(super) fn detach(&mut self, node: NodeHandle) {
        let nbs = *self.nbs(node);
        let parent = match nbs.parent {
            Some(v) => v,
            None => return,
        };
        let first = self
            .nbs(parent)
            .first_child
            .expect("[consistency] the parent must have a child including `node`");
        let last = self.nbs(first).prev_sibling_cyclic;
        let prev = if node == first {
            None
        } else {
            Some(nbs.prev_sibling_cyclic)
        };

        match (prev, nbs.next_sibling) {
            (None, None) => self.nbs_mut(parent).first_child = None,
            (None, Some(next)) => {
                self.nbs_mut(parent).first_child = Some(next);
                self.nbs_mut(next).prev_sibling_cyclic = last;
            }
            (Some(prev), None) => {
                self.nbs_mut(prev).next_sibling = None;
                self.nbs_mut(first).prev_sibling_cyclic = prev;
            }
            (Some(prev), Some(next)) => {
                self.nbs_mut(prev).next_sibling = Some(next);
                self.nbs_mut(next).prev_sibling_cyclic = prev;
            }
        }

        *self.nbs_mut(node) = Neighbors {
            first_child: nbs.first_child,
            ..Neighbors::new_root(node)
        };
    }

    /// Appends a detached node as the last child of `parent`.
    pub(super) fn append_child(&mut self, child: NodeHandle, parent: NodeHandle) {
        debug_assert!(
            self.nbs(child).parent.is_none(),
            "[precondition] the new child must be detached"
        );
        match self.nbs(parent).first_child {
            None => {
                self.nbs_mut(parent).first_child = Some(child);
                self.nbs_mut(child).prev_sibling_cyclic = child;
            }
            Some(first) => {
                let last = self.nbs(first).prev_sibling_cyclic;
                self.nbs_mut(last).next_sibling = Some(child);
                self.nbs_mut(child).prev_sibling_cyclic = last;
                self.nbs_mut(first).prev_sibling_cyclic = child;
            }
        }
        self.nbs_mut(child).parent = Some(parent);
    }

    /// Inserts a detached node as the previous sibling of `next`.
    pub(super) fn insert_before(&mut self, node: NodeHandle, next: NodeHandle) {
        debug_assert!(
            self.nbs(node).parent.is_none(),
            "[precondition] the inserted node must be detached"
        );
        let parent = self
            .nbs(next)
            .parent
            .expect("[precondition] the next sibling must have a parent");
        let first = self
            .nbs(parent)
            .first_child
            .expect("[consistency] the parent must have a child including `next`");

        if next == first {
            let last = self.nbs(first).prev_sibling_cyclic;
            self.nbs_mut(parent).first_child = Some(node);
            self.nbs_mut(node).prev_sibling_cyclic = last;
        } else {
            let prev = self.nbs(next).prev_sibling_cyclic;
            self.nbs_mut(prev).next_sibling = Some(node);
            self.nbs_mut(node).prev_sibling_cyclic = prev;
        }
        self.nbs_mut(node).next_sibling = Some(next);
        self.nbs_mut(next).prev_sibling_cyclic = node;
        self.nbs_mut(node).parent = Some(parent);
    }
}

/// Neighbors of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Neighbors {
    /// Parent.
    pub(super) parent: Option<NodeHandle>,
    /// Previous sibling, or the last sibling if the node is the first one.
    ///
    /// A node without a parent points to itself.
    prev_sibling_cyclic: NodeHandle,
    /// Next sibling.
    pub(super) next_sibling: Option<NodeHandle>,
    /// First child.
    pub(super) first_child: Option<NodeHandle>,
}

impl Neighbors {
    /// Creates a new `Neighbors` that is not connected to anyone.
    #[inline]
    #[must_use]
    fn new_root(id: NodeHandle) -> Self {
        Self {
            parent: None,
            prev_sibling_cyclic: id,
            next_sibling: None,
            first_child: None,
        }
    }
}

/// Iterator over the children of a node.
#[derive(Debug, Clone)]
pub(super) struct Children<'a> {
    /// Hierarchy.
    hier: &'a Hierarchy,
    /// Next child to emit.
    next: Option<NodeHandle>,
}

impl Iterator for Children<'_> {
    type Item = NodeHandle;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.next?;
        self.next = self.hier.nbs(next).next_sibling;
        Some(next)
    }
}

impl iter::FusedIterator for Children<'_> {}
