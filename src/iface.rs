//! Node interface.
//!
//! [`NodeIface`] is the closed set of operations every tree representation
//! implements once, so that generic algorithms (such as [`load`][`crate::load`]
//! and [`Context::traverse`][`crate::Context::traverse`]) never need
//! representation-specific code.

use crate::{CallerHandle, NodeHandle, NodeKind};

/// Key of the positions member of a node.
pub const KEY_POS: &str = "@pos";
/// Key of the start position inside a positions object.
pub const KEY_START: &str = "start";
/// Key of the byte offset inside a position object.
pub const KEY_OFFSET: &str = "offset";

/// Error returned when a child cannot be attached to a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AttachError {
    /// `set_value` was called for a node that is not an array.
    #[error("{0:?} is not an array node")]
    NotAnArray(NodeHandle),
    /// `set_key_value` was called for a node that is not an object.
    #[error("{0:?} is not an object node")]
    NotAnObject(NodeHandle),
    /// The store does not know the node.
    #[error("{0:?} is not a node of this store")]
    UnknownNode(NodeHandle),
    /// Attaching the node would make it an ancestor of itself.
    #[error("attaching {0:?} would make it the ancestor of itself")]
    AncestorLoop(NodeHandle),
    /// The array cannot grow up to the element index.
    #[error("index {1} is out of range for the array {0:?}")]
    IndexOutOfRange(NodeHandle, usize),
}

/// Node interface.
///
/// Every method receives the caller handle of the context it is called
/// through. Handles passed in must have been produced by the same store.
///
/// Scalar accessors (`as_*`) are only meaningful for nodes of the matching
/// kind. What they return for other nodes is up to the implementation; the
/// stores in this crate return the zero value of the type (`""`, `0`, `0.0`,
/// `false`). Callers should check [`kind`][`NodeIface::kind`] first.
pub trait NodeIface {
    /// Returns the kind of the node.
    fn kind(&self, cx: CallerHandle, node: NodeHandle) -> NodeKind;

    /// Returns the string value of a string node.
    fn as_str(&self, cx: CallerHandle, node: NodeHandle) -> &str;
    /// Returns the value of a signed integer node.
    fn as_int(&self, cx: CallerHandle, node: NodeHandle) -> i64;
    /// Returns the value of an unsigned integer node.
    fn as_uint(&self, cx: CallerHandle, node: NodeHandle) -> u64;
    /// Returns the value of a floating point node.
    fn as_float(&self, cx: CallerHandle, node: NodeHandle) -> f64;
    /// Returns the value of a boolean node.
    fn as_bool(&self, cx: CallerHandle, node: NodeHandle) -> bool;

    /// Returns the number of children of an object or an array.
    ///
    /// Returns 0 for other kinds.
    fn size(&self, cx: CallerHandle, node: NodeHandle) -> usize;

    /// Returns the key of the object member at the given ordinal position.
    ///
    /// Returns `None` if the node is not an object or the index is out of
    /// range.
    fn key_at(&self, cx: CallerHandle, node: NodeHandle, index: usize) -> Option<&str>;

    /// Returns the child at the given ordinal position.
    ///
    /// For objects, this is the value paired with [`key_at`][`Self::key_at`]
    /// at the same position. Returns `None` for a null child, or if the node
    /// is not a container or the index is out of range.
    fn value_at(&self, cx: CallerHandle, node: NodeHandle, index: usize) -> Option<NodeHandle>;

    /// Creates an empty object.
    ///
    /// `size_hint` is the expected number of members, not a capacity.
    fn new_object(&mut self, cx: CallerHandle, size_hint: usize) -> NodeHandle;
    /// Creates an empty array.
    ///
    /// `size_hint` is the expected number of elements, not a capacity.
    fn new_array(&mut self, cx: CallerHandle, size_hint: usize) -> NodeHandle;
    /// Creates a string node.
    fn new_string(&mut self, cx: CallerHandle, value: &str) -> NodeHandle;
    /// Creates a signed integer node.
    fn new_int(&mut self, cx: CallerHandle, value: i64) -> NodeHandle;
    /// Creates an unsigned integer node.
    fn new_uint(&mut self, cx: CallerHandle, value: u64) -> NodeHandle;
    /// Creates a floating point node.
    fn new_float(&mut self, cx: CallerHandle, value: f64) -> NodeHandle;
    /// Creates a boolean node.
    fn new_bool(&mut self, cx: CallerHandle, value: bool) -> NodeHandle;

    /// Sets the array element at the given ordinal position.
    ///
    /// `None` stores a null element. Setting an index past the end fills the
    /// gap with null elements.
    ///
    /// # Errors
    ///
    /// Returns [`AttachError`] if `node` is not an array created by this store,
    /// or if the array cannot grow up to `index`.
    fn set_value(
        &mut self,
        cx: CallerHandle,
        node: NodeHandle,
        index: usize,
        child: Option<NodeHandle>,
    ) -> Result<(), AttachError>;

    /// Sets the object member with the given key.
    ///
    /// `None` stores a null member. What happens when the key already exists
    /// is up to the implementation.
    ///
    /// # Errors
    ///
    /// Returns [`AttachError`] if `node` is not an object created by this store.
    fn set_key_value(
        &mut self,
        cx: CallerHandle,
        node: NodeHandle,
        key: &str,
        child: Option<NodeHandle>,
    ) -> Result<(), AttachError>;

    /// Returns the source start offset of the node, if the node carries one.
    ///
    /// The default implementation reads `node["@pos"]["start"]["offset"]`
    /// through the other methods of this trait. A negative signed offset is
    /// treated as absent.
    fn start_offset(&self, cx: CallerHandle, node: NodeHandle) -> Option<u64> {
        let pos = member(self, cx, node, KEY_POS)?;
        let start = member(self, cx, pos, KEY_START)?;
        let offset = member(self, cx, start, KEY_OFFSET)?;
        match self.kind(cx, offset) {
            NodeKind::Uint => Some(self.as_uint(cx, offset)),
            NodeKind::Int => u64::try_from(self.as_int(cx, offset)).ok(),
            _ => None,
        }
    }
}

/// Returns the first member of the object with the given key.
///
/// Returns `None` if the node is not an object, the key is missing, or the
/// member is null.
pub fn member<S: NodeIface + ?Sized>(
    store: &S,
    cx: CallerHandle,
    node: NodeHandle,
    key: &str,
) -> Option<NodeHandle> {
    if store.kind(cx, node) != NodeKind::Object {
        return None;
    }
    (0..store.size(cx, node))
        .find(|&i| store.key_at(cx, node, i) == Some(key))
        .and_then(|i| store.value_at(cx, node, i))
}

impl<S: NodeIface + ?Sized> NodeIface for Box<S> {
    #[inline]
    fn kind(&self, cx: CallerHandle, node: NodeHandle) -> NodeKind {
        (**self).kind(cx, node)
    }

    #[inline]
    fn as_str(&self, cx: CallerHandle, node: NodeHandle) -> &str {
        (**self).as_str(cx, node)
    }

    #[inline]
    fn as_int(&self, cx: CallerHandle, node: NodeHandle) -> i64 {
        (**self).as_int(cx, node)
    }

    #[inline]
    fn as_uint(&self, cx: CallerHandle, node: NodeHandle) -> u64 {
        (**self).as_uint(cx, node)
    }

    #[inline]
    fn as_float(&self, cx: CallerHandle, node: NodeHandle) -> f64 {
        (**self).as_float(cx, node)
    }

    #[inline]
    fn as_bool(&self, cx: CallerHandle, node: NodeHandle) -> bool {
        (**self).as_bool(cx, node)
    }

    #[inline]
    fn size(&self, cx: CallerHandle, node: NodeHandle) -> usize {
        (**self).size(cx, node)
    }

    #[inline]
    fn key_at(&self, cx: CallerHandle, node: NodeHandle, index: usize) -> Option<&str> {
        (**self).key_at(cx, node, index)
    }

    #[inline]
    fn value_at(&self, cx: CallerHandle, node: NodeHandle, index: usize) -> Option<NodeHandle> {
        (**self).value_at(cx, node, index)
    }

    #[inline]
    fn new_object(&mut self, cx: CallerHandle, size_hint: usize) -> NodeHandle {
        (**self).new_object(cx, size_hint)
    }

    #[inline]
    fn new_array(&mut self, cx: CallerHandle, size_hint: usize) -> NodeHandle {
        (**self).new_array(cx, size_hint)
    }

    #[inline]
    fn new_string(&mut self, cx: CallerHandle, value: &str) -> NodeHandle {
        (**self).new_string(cx, value)
    }

    #[inline]
    fn new_int(&mut self, cx: CallerHandle, value: i64) -> NodeHandle {
        (**self).new_int(cx, value)
    }

    #[inline]
    fn new_uint(&mut self, cx: CallerHandle, value: u64) -> NodeHandle {
        (**self).new_uint(cx, value)
    }

    #[inline]
    fn new_float(&mut self, cx: CallerHandle, value: f64) -> NodeHandle {
        (**self).new_float(cx, value)
    }

    #[inline]
    fn new_bool(&mut self, cx: CallerHandle, value: bool) -> NodeHandle {
        (**self).new_bool(cx, value)
    }

    #[inline]
    fn set_value(
        &mut self,
        cx: CallerHandle,
        node: NodeHandle,
        index: usize,
        child: Option<NodeHandle>,
    ) -> Result<(), AttachError> {
        (**self).set_value(cx, node, index, child)
    }

    #[inline]
    fn set_key_value(
        &mut self,
        cx: CallerHandle,
        node: NodeHandle,
        key: &str,
        child: Option<NodeHandle>,
    ) -> Result<(), AttachError> {
        (**self).set_key_value(cx, node, key, child)
    }

    #[inline]
    fn start_offset(&self, cx: CallerHandle, node: NodeHandle) -> Option<u64> {
        (**self).start_offset(cx, node)
    }
}
