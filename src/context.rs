//! Context.

use crate::debug_print::DebugPrint;
use crate::iface::AttachError;
use crate::load::{load, LoadError};
use crate::traverse::{Traverse, TreeOrder};
use crate::{CallerHandle, Error, NodeHandle, NodeIface, NodeKind};

/// Bookkeeping owned by the context itself, never seen by the store.
#[derive(Debug, Clone, Default)]
struct ContextState {
    /// The first error reported to the context.
    last_error: Option<Error>,
}

/// A tree backed by one node interface implementation.
///
/// A context binds a store, an opaque [`CallerHandle`] passed to every call
/// of the store, and an optional root node. Every node handle the store
/// produces belongs to this context; once the context is dropped (or
/// [`release`][`Self::release`]d) those handles mean nothing.
///
/// The forwarding methods (`kind`, `new_object`, ...) call the store with
/// the caller handle of this context.
///
/// # Examples
///
/// ```
/// use treeface::{ArenaTree, CallerHandle, Context, NodeKind};
///
/// let mut ctx = Context::new(ArenaTree::new(), CallerHandle(7));
/// assert!(ctx.root().is_none(), "a new context has no root");
///
/// let root = ctx.new_array(2);
/// let one = ctx.new_uint(1);
/// ctx.set_value(root, 0, Some(one)).expect("root is an array");
/// ctx.set_root(Some(root));
///
/// assert_eq!(ctx.root(), Some(root));
/// assert_eq!(ctx.kind(root), NodeKind::Array);
/// assert_eq!(ctx.size(root), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Context<S> {
    /// Node interface implementation.
    store: S,
    /// Caller handle.
    caller: CallerHandle,
    /// Context-private state.
    state: ContextState,
    /// Default root node.
    root: Option<NodeHandle>,
}

impl<S: NodeIface> Context<S> {
    /// Creates a new context without a root.
    #[must_use]
    pub fn new(store: S, caller: CallerHandle) -> Self {
        tracing::debug!(?caller, "context created");
        Self {
            store,
            caller,
            state: ContextState::default(),
            root: None,
        }
    }

    /// Releases the context and returns the store.
    ///
    /// Node handles of the context must not be used with the returned store
    /// through any other context.
    pub fn release(self) -> S {
        tracing::debug!(caller = ?self.caller, "context released");
        self.store
    }

    /// Returns a reference to the store.
    #[inline]
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns a mutable reference to the store.
    #[inline]
    #[must_use]
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Returns the caller handle.
    #[inline]
    #[must_use]
    pub fn caller(&self) -> CallerHandle {
        self.caller
    }

    /// Returns the default root node.
    #[inline]
    #[must_use]
    pub fn root(&self) -> Option<NodeHandle> {
        self.root
    }

    /// Sets the default root node.
    #[inline]
    pub fn set_root(&mut self, root: Option<NodeHandle>) {
        self.root = root;
    }

    /// Records an error for this context.
    ///
    /// Only the first error is kept; later errors are dropped until the
    /// recorded one is [taken][`Self::take_error`].
    pub fn set_error(&mut self, err: impl Into<Error>) {
        let err = err.into();
        if self.state.last_error.is_none() {
            tracing::debug!(caller = ?self.caller, error = %err, "context error recorded");
            self.state.last_error = Some(err);
        } else {
            tracing::trace!(caller = ?self.caller, error = %err, "context error dropped");
        }
    }

    /// Returns the recorded error, if any.
    #[inline]
    #[must_use]
    pub fn last_error(&self) -> Option<&Error> {
        self.state.last_error.as_ref()
    }

    /// Removes and returns the recorded error, if any.
    #[inline]
    pub fn take_error(&mut self) -> Option<Error> {
        self.state.last_error.take()
    }

    /// Copies the subtree rooted at `node` in `src` into this context.
    ///
    /// This is [`load`] with the failure also recorded in the error slot of
    /// `self`.
    ///
    /// # Errors
    ///
    /// Returns the error of [`load`].
    pub fn load_from<T: NodeIface>(
        &mut self,
        src: &Context<T>,
        node: Option<NodeHandle>,
    ) -> Result<Option<NodeHandle>, LoadError> {
        load(src, node, self).map_err(|e| {
            self.set_error(e);
            e
        })
    }

    /// Returns an iterator over the subtree rooted at `start` in the given
    /// order.
    ///
    /// `None` as the start node gives an empty iterator.
    #[inline]
    #[must_use]
    pub fn traverse(&self, start: Option<NodeHandle>, order: TreeOrder) -> Traverse<'_, S> {
        Traverse::new(self, start, order)
    }

    /// Returns a printable tree diagram of the subtree rooted at `node`.
    #[inline]
    #[must_use]
    pub fn debug_print(&self, node: Option<NodeHandle>) -> DebugPrint<'_, S> {
        DebugPrint::new(self, node)
    }

    /// Returns the kind of the node.
    #[inline]
    #[must_use]
    pub fn kind(&self, node: NodeHandle) -> NodeKind {
        self.store.kind(self.caller, node)
    }

    /// Returns the kind of a nullable node.
    #[inline]
    #[must_use]
    pub fn kind_of(&self, node: Option<NodeHandle>) -> NodeKind {
        node.map_or(NodeKind::Null, |node| self.kind(node))
    }

    /// Returns the string value of a string node.
    #[inline]
    #[must_use]
    pub fn as_str(&self, node: NodeHandle) -> &str {
        self.store.as_str(self.caller, node)
    }

    /// Returns the value of a signed integer node.
    #[inline]
    #[must_use]
    pub fn as_int(&self, node: NodeHandle) -> i64 {
        self.store.as_int(self.caller, node)
    }

    /// Returns the value of an unsigned integer node.
    #[inline]
    #[must_use]
    pub fn as_uint(&self, node: NodeHandle) -> u64 {
        self.store.as_uint(self.caller, node)
    }

    /// Returns the value of a floating point node.
    #[inline]
    #[must_use]
    pub fn as_float(&self, node: NodeHandle) -> f64 {
        self.store.as_float(self.caller, node)
    }

    /// Returns the value of a boolean node.
    #[inline]
    #[must_use]
    pub fn as_bool(&self, node: NodeHandle) -> bool {
        self.store.as_bool(self.caller, node)
    }

    /// Returns the number of children of an object or an array.
    #[inline]
    #[must_use]
    pub fn size(&self, node: NodeHandle) -> usize {
        self.store.size(self.caller, node)
    }

    /// Returns the key of the object member at the given ordinal position.
    #[inline]
    #[must_use]
    pub fn key_at(&self, node: NodeHandle, index: usize) -> Option<&str> {
        self.store.key_at(self.caller, node, index)
    }

    /// Returns the child at the given ordinal position.
    #[inline]
    #[must_use]
    pub fn value_at(&self, node: NodeHandle, index: usize) -> Option<NodeHandle> {
        self.store.value_at(self.caller, node, index)
    }

    /// Returns the source start offset of the node, if available.
    #[inline]
    #[must_use]
    pub fn start_offset(&self, node: NodeHandle) -> Option<u64> {
        self.store.start_offset(self.caller, node)
    }

    /// Creates an empty object.
    #[inline]
    pub fn new_object(&mut self, size_hint: usize) -> NodeHandle {
        self.store.new_object(self.caller, size_hint)
    }

    /// Creates an empty array.
    #[inline]
    pub fn new_array(&mut self, size_hint: usize) -> NodeHandle {
        self.store.new_array(self.caller, size_hint)
    }

    /// Creates a string node.
    #[inline]
    pub fn new_string(&mut self, value: &str) -> NodeHandle {
        self.store.new_string(self.caller, value)
    }

    /// Creates a signed integer node.
    #[inline]
    pub fn new_int(&mut self, value: i64) -> NodeHandle {
        self.store.new_int(self.caller, value)
    }

    /// Creates an unsigned integer node.
    #[inline]
    pub fn new_uint(&mut self, value: u64) -> NodeHandle {
        self.store.new_uint(self.caller, value)
    }

    /// Creates a floating point node.
    #[inline]
    pub fn new_float(&mut self, value: f64) -> NodeHandle {
        self.store.new_float(self.caller, value)
    }

    /// Creates a boolean node.
    #[inline]
    pub fn new_bool(&mut self, value: bool) -> NodeHandle {
        self.store.new_bool(self.caller, value)
    }

    /// Sets the array element at the given ordinal position.
    ///
    /// # Errors
    ///
    /// Returns the error of [`NodeIface::set_value`].
    #[inline]
    pub fn set_value(
        &mut self,
        node: NodeHandle,
        index: usize,
        child: Option<NodeHandle>,
    ) -> Result<(), AttachError> {
        self.store.set_value(self.caller, node, index, child)
    }

    /// Sets the object member with the given key.
    ///
    /// # Errors
    ///
    /// Returns the error of [`NodeIface::set_key_value`].
    #[inline]
    pub fn set_key_value(
        &mut self,
        node: NodeHandle,
        key: &str,
        child: Option<NodeHandle>,
    ) -> Result<(), AttachError> {
        self.store.set_key_value(self.caller, node, key, child)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::ArenaTree;

    #[test]
    fn first_error_wins() {
        let mut ctx = Context::new(ArenaTree::new(), CallerHandle::NONE);
        assert!(ctx.last_error().is_none());

        ctx.set_error(Error::custom("first"));
        ctx.set_error(LoadError::MalformedKey { ordinal: 3 });
        assert_eq!(ctx.last_error(), Some(&Error::custom("first")));

        assert_eq!(ctx.take_error(), Some(Error::custom("first")));
        assert!(ctx.last_error().is_none());

        ctx.set_error(LoadError::MalformedKey { ordinal: 3 });
        assert_eq!(
            ctx.last_error(),
            Some(&Error::Load(LoadError::MalformedKey { ordinal: 3 }))
        );
    }

    #[test]
    fn release_returns_store_with_nodes() {
        let mut ctx = Context::new(ArenaTree::new(), CallerHandle(1));
        let node = ctx.new_bool(true);
        ctx.set_root(Some(node));

        let store = ctx.release();
        assert_eq!(store.len(), 1);
    }
}
