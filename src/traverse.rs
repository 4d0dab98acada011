//! Tree traversal.
//!
//! Traversal is written against [`NodeIface`] only, so it works for every
//! store. Children are visited in ordinal order, and null children are
//! skipped.

use core::iter;
use std::collections::VecDeque;
use std::vec;

use crate::{Context, NodeHandle, NodeIface, NodeKind};

/// Traversal order.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TreeOrder {
    /// Depth-first, a node before its children.
    #[default]
    PreOrder,
    /// Depth-first, a node after its children.
    PostOrder,
    /// Breadth-first, level by level.
    LevelOrder,
    /// By the start offset of the nodes (see [`NodeIface::start_offset`]).
    ///
    /// Nodes with equal offsets keep their pre-order relation, and nodes
    /// without a position come after all positioned nodes.
    PositionOrder,
}

impl TreeOrder {
    /// Returns the stable numeric code of the order.
    #[must_use]
    pub const fn code(self) -> u32 {
        match self {
            Self::PreOrder => 0,
            Self::PostOrder => 1,
            Self::LevelOrder => 2,
            Self::PositionOrder => 3,
        }
    }

    /// Creates an order from the numeric code.
    ///
    /// Unknown codes fall back to [`TreeOrder::PreOrder`].
    #[must_use]
    pub const fn from_code(code: u32) -> Self {
        match code {
            1 => Self::PostOrder,
            2 => Self::LevelOrder,
            3 => Self::PositionOrder,
            _ => Self::PreOrder,
        }
    }
}

/// Returns the non-null child at the ordinal position.
fn child<S: NodeIface>(ctx: &Context<S>, node: NodeHandle, index: usize) -> Option<NodeHandle> {
    ctx.value_at(node, index)
        .filter(|&child| ctx.kind(child) != NodeKind::Null)
}

/// Returns the number of child slots of the node.
fn child_slots<S: NodeIface>(ctx: &Context<S>, node: NodeHandle) -> usize {
    if ctx.kind(node).is_container() {
        ctx.size(node)
    } else {
        0
    }
}

/// Pre-order traverser.
#[derive(Debug, Clone)]
struct PreOrderTraverser {
    /// Nodes to visit, the next one on top.
    stack: Vec<NodeHandle>,
}

impl PreOrderTraverser {
    /// Traverses the tree and returns the next node.
    fn next<S: NodeIface>(&mut self, ctx: &Context<S>) -> Option<NodeHandle> {
        let next = self.stack.pop()?;
        let slots = child_slots(ctx, next);
        self.stack
            .extend((0..slots).rev().filter_map(|i| child(ctx, next, i)));
        Some(next)
    }
}

/// Post-order traverser.
#[derive(Debug, Clone)]
struct PostOrderTraverser {
    /// Open nodes and the ordinal of the next child to look at.
    stack: Vec<(NodeHandle, usize)>,
}

impl PostOrderTraverser {
    /// Traverses the tree and returns the next node.
    fn next<S: NodeIface>(&mut self, ctx: &Context<S>) -> Option<NodeHandle> {
        loop {
            let top = self.stack.len().checked_sub(1)?;
            let (node, mut next_child) = self.stack[top];
            let slots = child_slots(ctx, node);

            let mut found = None;
            while next_child < slots {
                let i = next_child;
                next_child += 1;
                if let Some(c) = child(ctx, node, i) {
                    found = Some(c);
                    break;
                }
            }
            self.stack[top].1 = next_child;

            match found {
                // Dive into the child.
                Some(c) => self.stack.push((c, 0)),
                // All children are visited; leave the node.
                None => {
                    self.stack.pop();
                    return Some(node);
                }
            }
        }
    }
}

/// Level-order traverser.
#[derive(Debug, Clone)]
struct LevelOrderTraverser {
    /// Nodes to visit.
    queue: VecDeque<NodeHandle>,
}

impl LevelOrderTraverser {
    /// Traverses the tree and returns the next node.
    fn next<S: NodeIface>(&mut self, ctx: &Context<S>) -> Option<NodeHandle> {
        let next = self.queue.pop_front()?;
        let slots = child_slots(ctx, next);
        self.queue
            .extend((0..slots).filter_map(|i| child(ctx, next, i)));
        Some(next)
    }
}

/// Traverser state.
#[derive(Debug, Clone)]
enum Traverser {
    /// Pre-order.
    Pre(PreOrderTraverser),
    /// Post-order.
    Post(PostOrderTraverser),
    /// Level-order.
    Level(LevelOrderTraverser),
    /// Position order, computed up front.
    Position(vec::IntoIter<NodeHandle>),
}

/// Single-pass iterator over a subtree.
///
/// Created by [`Context::traverse`]. Once it returns `None`, it keeps
/// returning `None`; create a new iterator to walk the tree again. Dropping
/// it does not affect the context.
///
/// # Examples
///
/// ```
/// use treeface::{ArenaTree, CallerHandle, Context, TreeOrder};
///
/// let mut ctx = Context::new(ArenaTree::new(), CallerHandle::NONE);
/// let root = ctx.new_array(2);
/// let a = ctx.new_int(1);
/// let b = ctx.new_int(2);
/// ctx.set_value(root, 0, Some(a)).expect("root is an array");
/// ctx.set_value(root, 1, Some(b)).expect("root is an array");
///
/// let pre = ctx.traverse(Some(root), TreeOrder::PreOrder).collect::<Vec<_>>();
/// assert_eq!(pre, [root, a, b]);
///
/// let post = ctx.traverse(Some(root), TreeOrder::PostOrder).collect::<Vec<_>>();
/// assert_eq!(post, [a, b, root]);
/// ```
#[derive(Debug, Clone)]
pub struct Traverse<'a, S> {
    /// Context.
    ctx: &'a Context<S>,
    /// Order.
    order: TreeOrder,
    /// Traverser.
    traverser: Traverser,
}

impl<'a, S: NodeIface> Traverse<'a, S> {
    /// Creates a new iterator.
    #[must_use]
    pub(crate) fn new(ctx: &'a Context<S>, start: Option<NodeHandle>, order: TreeOrder) -> Self {
        let start = start.filter(|&node| ctx.kind(node) != NodeKind::Null);
        let traverser = match order {
            TreeOrder::PreOrder => Traverser::Pre(PreOrderTraverser {
                stack: start.into_iter().collect(),
            }),
            TreeOrder::PostOrder => Traverser::Post(PostOrderTraverser {
                stack: start.map(|node| (node, 0)).into_iter().collect(),
            }),
            TreeOrder::LevelOrder => Traverser::Level(LevelOrderTraverser {
                queue: start.into_iter().collect(),
            }),
            TreeOrder::PositionOrder => Traverser::Position(position_order(ctx, start)),
        };

        Self {
            ctx,
            order,
            traverser,
        }
    }

    /// Returns the traversal order.
    #[inline]
    #[must_use]
    pub fn order(&self) -> TreeOrder {
        self.order
    }
}

/// Lists the nodes of the subtree sorted by their start offsets.
fn position_order<S: NodeIface>(
    ctx: &Context<S>,
    start: Option<NodeHandle>,
) -> vec::IntoIter<NodeHandle> {
    let mut pre = PreOrderTraverser {
        stack: start.into_iter().collect(),
    };
    let mut nodes = iter::from_fn(|| pre.next(ctx))
        .map(|node| (ctx.start_offset(node), node))
        .collect::<Vec<_>>();
    // Stable sort: positioned nodes first, ties keep the pre-order.
    nodes.sort_by_key(|&(offset, _)| (offset.is_none(), offset));

    nodes
        .into_iter()
        .map(|(_, node)| node)
        .collect::<Vec<_>>()
        .into_iter()
}

impl<S: NodeIface> Iterator for Traverse<'_, S> {
    type Item = NodeHandle;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.traverser {
            Traverser::Pre(t) => t.next(self.ctx),
            Traverser::Post(t) => t.next(self.ctx),
            Traverser::Level(t) => t.next(self.ctx),
            Traverser::Position(t) => t.next(),
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.traverser {
            Traverser::Pre(t) => (t.stack.len(), None),
            Traverser::Post(t) => (t.stack.len(), None),
            Traverser::Level(t) => (t.queue.len(), None),
            Traverser::Position(t) => t.size_hint(),
        }
    }
}

impl<S: NodeIface> iter::FusedIterator for Traverse<'_, S> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_codes() {
        for order in [
            TreeOrder::PreOrder,
            TreeOrder::PostOrder,
            TreeOrder::LevelOrder,
            TreeOrder::PositionOrder,
        ] {
            assert_eq!(TreeOrder::from_code(order.code()), order);
        }
        assert_eq!(TreeOrder::from_code(99), TreeOrder::PreOrder);
    }
}
