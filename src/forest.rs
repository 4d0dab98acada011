//! Linked forest store.
//!
//! [`ForestTree`] keeps nodes in a first-child / next-sibling hierarchy. Object
//! members are child nodes carrying their key, and null members or elements
//! are stored as explicit null nodes. Ordinal access walks the sibling list,
//! starting from the last position looked up, so reading the children in
//! order costs `O(1)` per child.

mod hierarchy;

use core::cell::Cell;

use self::hierarchy::Hierarchy;
use crate::iface::AttachError;
use crate::{CallerHandle, NodeHandle, NodeIface, NodeKind};

/// Data of a node.
#[derive(Debug, Clone, PartialEq)]
enum Payload {
    /// Null.
    Null,
    /// Object; members are the children.
    Object,
    /// Array; elements are the children.
    Array,
    /// String.
    String(String),
    /// Signed integer.
    Int(i64),
    /// Unsigned integer.
    Uint(u64),
    /// Floating point number.
    Float(f64),
    /// Boolean.
    Bool(bool),
}

/// Node data.
#[derive(Debug, Clone, PartialEq)]
struct Entry {
    /// Member key, if the node is a member of an object.
    key: Option<String>,
    /// Number of children.
    len: usize,
    /// Value.
    payload: Payload,
}

/// Store keeping nodes in a linked forest.
///
/// Duplicate keys are always kept: setting a member twice appends a second
/// member with the same key.
///
/// A node has at most one parent. Attaching a node which is already a child
/// somewhere moves it: the node is detached first, which shifts the later
/// siblings of its old place, and is then placed at the requested position.
/// For example, setting element 0 of `[a, b]` again at index 1 gives
/// `[b, a]`.
///
/// # Examples
///
/// ```
/// use treeface::{CallerHandle, ForestTree, NodeIface, NodeKind};
///
/// let cx = CallerHandle::NONE;
/// let mut store = ForestTree::new();
///
/// let arr = store.new_array(cx, 2);
/// let s = store.new_string(cx, "b");
/// store.set_value(cx, arr, 1, Some(s)).expect("arr is an array");
///
/// assert_eq!(store.size(cx, arr), 2);
/// assert_eq!(store.value_at(cx, arr, 0), None, "the gap is a null element");
/// assert_eq!(store.kind(cx, s), NodeKind::String);
/// ```
#[derive(Debug, Default, Clone)]
pub struct ForestTree {
    /// Hierarchy.
    hierarchy: Hierarchy,
    /// Node data, indexed by handles.
    entries: Vec<Entry>,
    /// Last ordinal lookup, as `(parent, index, child)`.
    ///
    /// Cleared on every change of the hierarchy.
    cursor: Cell<Option<(NodeHandle, usize, NodeHandle)>>,
}

impl ForestTree {
    /// Creates a new empty store.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of nodes ever created in the store.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no nodes have been created.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the parent of the node, if attached.
    #[inline]
    #[must_use]
    pub fn parent(&self, node: NodeHandle) -> Option<NodeHandle> {
        self.hierarchy.neighbors(node)?.parent
    }

    /// Creates a node.
    fn create(&mut self, payload: Payload) -> NodeHandle {
        let new_id = self.hierarchy.create_root();
        assert_eq!(
            self.entries.len(),
            new_id.index(),
            "[consistency] node handle must be able to be used as an index for the vec"
        );
        self.entries.push(Entry {
            key: None,
            len: 0,
            payload,
        });

        new_id
    }

    /// Returns the entry of the node.
    #[inline]
    #[must_use]
    fn entry(&self, node: NodeHandle) -> Option<&Entry> {
        self.entries.get(node.index())
    }

    /// Returns the mutable entry of a node known to exist.
    fn entry_mut(&mut self, node: NodeHandle) -> &mut Entry {
        self.entries
            .get_mut(node.index())
            .expect("[consistency] linked nodes must exist")
    }

    /// Returns the child at the ordinal position of a container.
    fn nth_child(&self, node: NodeHandle, index: usize) -> Option<NodeHandle> {
        let len = self.entry(node)?.len;
        if index >= len {
            return None;
        }
        let child = if index + 1 == len {
            self.hierarchy.last_child(node)
        } else {
            match self.cursor.get() {
                Some((parent, i, c)) if parent == node && i <= index => {
                    self.hierarchy.siblings_from(c).nth(index - i)
                }
                _ => self.hierarchy.children(node).nth(index),
            }
        };
        if let Some(c) = child {
            self.cursor.set(Some((node, index, c)));
        }
        child
    }

    /// Checks that `node` is a container of the expected kind, and returns
    /// its number of children.
    fn check_container(
        &self,
        node: NodeHandle,
        expected: &Payload,
    ) -> Result<usize, AttachError> {
        match self.entry(node) {
            Some(entry) if entry.payload == *expected => Ok(entry.len),
            Some(_) if *expected == Payload::Object => Err(AttachError::NotAnObject(node)),
            Some(_) => Err(AttachError::NotAnArray(node)),
            None => Err(AttachError::UnknownNode(node)),
        }
    }

    /// Returns the given child, or a new null node for `None`.
    fn child_or_null(&mut self, child: Option<NodeHandle>) -> NodeHandle {
        match child {
            Some(child) => child,
            None => self.create(Payload::Null),
        }
    }

    /// Checks that `child` can become a child of the container `node`.
    ///
    /// `child` is detached from its current parent on success.
    fn prepare_attach(&mut self, node: NodeHandle, child: NodeHandle) -> Result<(), AttachError> {
        if self.entry(child).is_none() {
            return Err(AttachError::UnknownNode(child));
        }
        if self.hierarchy.is_ancestor_or_self(child, node) {
            return Err(AttachError::AncestorLoop(child));
        }
        self.detach(child);
        Ok(())
    }

    /// Detaches the node from its parent, keeping the parent's length right.
    fn detach(&mut self, node: NodeHandle) {
        if let Some(parent) = self.parent(node) {
            self.cursor.set(None);
            self.hierarchy.detach(node);
            self.entry_mut(parent).len -= 1;
        }
    }

    /// Appends a detached node to the container.
    fn append(&mut self, parent: NodeHandle, child: NodeHandle) {
        self.cursor.set(None);
        self.hierarchy.append_child(child, parent);
        self.entry_mut(parent).len += 1;
    }
}

impl NodeIface for ForestTree {
    fn kind(&self, _cx: CallerHandle, node: NodeHandle) -> NodeKind {
        match self.entry(node).map(|entry| &entry.payload) {
            None | Some(Payload::Null) => NodeKind::Null,
            Some(Payload::Object) => NodeKind::Object,
            Some(Payload::Array) => NodeKind::Array,
            Some(Payload::String(_)) => NodeKind::String,
            Some(Payload::Int(_)) => NodeKind::Int,
            Some(Payload::Uint(_)) => NodeKind::Uint,
            Some(Payload::Float(_)) => NodeKind::Float,
            Some(Payload::Bool(_)) => NodeKind::Bool,
        }
    }

    fn as_str(&self, _cx: CallerHandle, node: NodeHandle) -> &str {
        match self.entry(node).map(|entry| &entry.payload) {
            Some(Payload::String(v)) => v,
            _ => "",
        }
    }

    fn as_int(&self, _cx: CallerHandle, node: NodeHandle) -> i64 {
        match self.entry(node).map(|entry| &entry.payload) {
            Some(Payload::Int(v)) => *v,
            _ => 0,
        }
    }

    fn as_uint(&self, _cx: CallerHandle, node: NodeHandle) -> u64 {
        match self.entry(node).map(|entry| &entry.payload) {
            Some(Payload::Uint(v)) => *v,
            _ => 0,
        }
    }

    fn as_float(&self, _cx: CallerHandle, node: NodeHandle) -> f64 {
        match self.entry(node).map(|entry| &entry.payload) {
            Some(Payload::Float(v)) => *v,
            _ => 0.0,
        }
    }

    fn as_bool(&self, _cx: CallerHandle, node: NodeHandle) -> bool {
        matches!(
            self.entry(node).map(|entry| &entry.payload),
            Some(Payload::Bool(true))
        )
    }

    fn size(&self, _cx: CallerHandle, node: NodeHandle) -> usize {
        self.entry(node).map_or(0, |entry| entry.len)
    }

    fn key_at(&self, _cx: CallerHandle, node: NodeHandle, index: usize) -> Option<&str> {
        if self.entry(node)?.payload != Payload::Object {
            return None;
        }
        let child = self.nth_child(node, index)?;
        self.entry(child)?.key.as_deref()
    }

    fn value_at(&self, _cx: CallerHandle, node: NodeHandle, index: usize) -> Option<NodeHandle> {
        match self.entry(node)?.payload {
            Payload::Object | Payload::Array => {}
            _ => return None,
        }
        self.nth_child(node, index)
            .filter(|&child| self.entry(child).map(|e| &e.payload) != Some(&Payload::Null))
    }

    fn new_object(&mut self, _cx: CallerHandle, _size_hint: usize) -> NodeHandle {
        self.create(Payload::Object)
    }

    fn new_array(&mut self, _cx: CallerHandle, _size_hint: usize) -> NodeHandle {
        self.create(Payload::Array)
    }

    fn new_string(&mut self, _cx: CallerHandle, value: &str) -> NodeHandle {
        self.create(Payload::String(value.to_owned()))
    }

    fn new_int(&mut self, _cx: CallerHandle, value: i64) -> NodeHandle {
        self.create(Payload::Int(value))
    }

    fn new_uint(&mut self, _cx: CallerHandle, value: u64) -> NodeHandle {
        self.create(Payload::Uint(value))
    }

    fn new_float(&mut self, _cx: CallerHandle, value: f64) -> NodeHandle {
        self.create(Payload::Float(value))
    }

    fn new_bool(&mut self, _cx: CallerHandle, value: bool) -> NodeHandle {
        self.create(Payload::Bool(value))
    }

    fn set_value(
        &mut self,
        _cx: CallerHandle,
        node: NodeHandle,
        index: usize,
        child: Option<NodeHandle>,
    ) -> Result<(), AttachError> {
        self.check_container(node, &Payload::Array)?;
        if child.is_some() && self.nth_child(node, index) == child {
            return Ok(());
        }
        if let Some(child) = child {
            self.prepare_attach(node, child)?;
        }

        let len = self.check_container(node, &Payload::Array)?;
        if index < len {
            let old = self
                .nth_child(node, index)
                .expect("[consistency] an index below the length must have a child");
            let child = self.child_or_null(child);
            self.entry_mut(child).key = None;
            self.cursor.set(None);
            self.hierarchy.insert_before(child, old);
            self.entry_mut(node).len += 1;
            self.detach(old);
        } else {
            let gap = index - len;
            self.entries
                .try_reserve(gap.saturating_add(1))
                .and_then(|()| self.hierarchy.try_reserve(gap.saturating_add(1)))
                .map_err(|_| AttachError::IndexOutOfRange(node, index))?;
            for _ in 0..gap {
                let null = self.create(Payload::Null);
                self.append(node, null);
            }
            let child = self.child_or_null(child);
            self.entry_mut(child).key = None;
            self.append(node, child);
        }
        Ok(())
    }

    fn set_key_value(
        &mut self,
        _cx: CallerHandle,
        node: NodeHandle,
        key: &str,
        child: Option<NodeHandle>,
    ) -> Result<(), AttachError> {
        self.check_container(node, &Payload::Object)?;
        if let Some(child) = child {
            self.prepare_attach(node, child)?;
        }
        let child = self.child_or_null(child);
        self.entry_mut(child).key = Some(key.to_owned());
        self.append(node, child);
        Ok(())
    }
}
