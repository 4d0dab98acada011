//! Flat arena store.
//!
//! [`ArenaTree`] keeps every node in one `Vec`. Containers own their children
//! as vectors of handles, so ordinal access is `O(1)`.

use serde::{Deserialize, Serialize};

use crate::iface::AttachError;
use crate::{CallerHandle, NodeHandle, NodeIface, NodeKind};

/// Policy for `set_key_value` with a key the object already has.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateKeys {
    /// Replace the value of the existing member, keeping its position.
    #[default]
    Overwrite,
    /// Append another member with the same key.
    Append,
}

/// Options for [`ArenaTree`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaOptions {
    /// What to do when an object member is set twice.
    pub duplicate_keys: DuplicateKeys,
}

/// Node record.
#[derive(Debug, Clone, PartialEq)]
enum Record {
    /// Explicit null node.
    Null,
    /// Object members in insertion order.
    Object(Vec<(String, Option<NodeHandle>)>),
    /// Array elements.
    Array(Vec<Option<NodeHandle>>),
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

/// Store keeping nodes in a flat arena.
///
/// # Examples
///
/// ```
/// use treeface::{ArenaOptions, ArenaTree, CallerHandle, DuplicateKeys, NodeIface};
///
/// let cx = CallerHandle::NONE;
/// let mut store = ArenaTree::with_options(ArenaOptions {
///     duplicate_keys: DuplicateKeys::Append,
/// });
///
/// let obj = store.new_object(cx, 2);
/// let a = store.new_int(cx, 1);
/// let b = store.new_int(cx, 2);
/// store.set_key_value(cx, obj, "k", Some(a)).expect("obj is an object");
/// store.set_key_value(cx, obj, "k", Some(b)).expect("obj is an object");
///
/// assert_eq!(store.size(cx, obj), 2, "duplicate keys are kept");
/// ```
#[derive(Debug, Default, Clone)]
pub struct ArenaTree {
    /// Node records indexed by handles.
    records: Vec<Record>,
    /// Options.
    options: ArenaOptions,
}

impl ArenaTree {
    /// Creates a new empty store with the default options.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new empty store with the given options.
    #[inline]
    #[must_use]
    pub fn with_options(options: ArenaOptions) -> Self {
        Self {
            records: Vec::new(),
            options,
        }
    }

    /// Returns the options.
    #[inline]
    #[must_use]
    pub fn options(&self) -> &ArenaOptions {
        &self.options
    }

    /// Returns the number of nodes ever created in the store.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no nodes have been created.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Creates an explicit null node.
    ///
    /// Such a node reports [`NodeKind::Null`], and is copied as absent.
    pub fn new_null(&mut self) -> NodeHandle {
        self.push(Record::Null)
    }

    /// Adds a record and returns its handle.
    ///
    /// # Panics
    ///
    /// Panics if the node handle overflows.
    fn push(&mut self, record: Record) -> NodeHandle {
        let handle = NodeHandle::from_index(self.records.len()).expect(
            "[precondition] node handle overflowed presumably due to too many node creations",
        );
        self.records.push(record);
        handle
    }

    /// Returns the record for the handle.
    #[inline]
    #[must_use]
    fn record(&self, node: NodeHandle) -> Option<&Record> {
        self.records.get(node.index())
    }
}

impl NodeIface for ArenaTree {
    fn kind(&self, _cx: CallerHandle, node: NodeHandle) -> NodeKind {
        match self.record(node) {
            None | Some(Record::Null) => NodeKind::Null,
            Some(Record::Object(_)) => NodeKind::Object,
            Some(Record::Array(_)) => NodeKind::Array,
            Some(Record::String(_)) => NodeKind::String,
            Some(Record::Int(_)) => NodeKind::Int,
            Some(Record::Uint(_)) => NodeKind::Uint,
            Some(Record::Float(_)) => NodeKind::Float,
            Some(Record::Bool(_)) => NodeKind::Bool,
        }
    }

    fn as_str(&self, _cx: CallerHandle, node: NodeHandle) -> &str {
        match self.record(node) {
            Some(Record::String(v)) => v,
            _ => "",
        }
    }

    fn as_int(&self, _cx: CallerHandle, node: NodeHandle) -> i64 {
        match self.record(node) {
            Some(Record::Int(v)) => *v,
            _ => 0,
        }
    }

    fn as_uint(&self, _cx: CallerHandle, node: NodeHandle) -> u64 {
        match self.record(node) {
            Some(Record::Uint(v)) => *v,
            _ => 0,
        }
    }

    fn as_float(&self, _cx: CallerHandle, node: NodeHandle) -> f64 {
        match self.record(node) {
            Some(Record::Float(v)) => *v,
            _ => 0.0,
        }
    }

    fn as_bool(&self, _cx: CallerHandle, node: NodeHandle) -> bool {
        matches!(self.record(node), Some(Record::Bool(true)))
    }

    fn size(&self, _cx: CallerHandle, node: NodeHandle) -> usize {
        match self.record(node) {
            Some(Record::Object(members)) => members.len(),
            Some(Record::Array(elements)) => elements.len(),
            _ => 0,
        }
    }

    fn key_at(&self, _cx: CallerHandle, node: NodeHandle, index: usize) -> Option<&str> {
        match self.record(node) {
            Some(Record::Object(members)) => members.get(index).map(|(key, _)| key.as_str()),
            _ => None,
        }
    }

    fn value_at(&self, _cx: CallerHandle, node: NodeHandle, index: usize) -> Option<NodeHandle> {
        match self.record(node) {
            Some(Record::Object(members)) => members.get(index).and_then(|(_, value)| *value),
            Some(Record::Array(elements)) => elements.get(index).copied().flatten(),
            _ => None,
        }
    }

    fn new_object(&mut self, _cx: CallerHandle, size_hint: usize) -> NodeHandle {
        self.push(Record::Object(Vec::with_capacity(size_hint)))
    }

    fn new_array(&mut self, _cx: CallerHandle, size_hint: usize) -> NodeHandle {
        self.push(Record::Array(Vec::with_capacity(size_hint)))
    }

    fn new_string(&mut self, _cx: CallerHandle, value: &str) -> NodeHandle {
        self.push(Record::String(value.to_owned()))
    }

    fn new_int(&mut self, _cx: CallerHandle, value: i64) -> NodeHandle {
        self.push(Record::Int(value))
    }

    fn new_uint(&mut self, _cx: CallerHandle, value: u64) -> NodeHandle {
        self.push(Record::Uint(value))
    }

    fn new_float(&mut self, _cx: CallerHandle, value: f64) -> NodeHandle {
        self.push(Record::Float(value))
    }

    fn new_bool(&mut self, _cx: CallerHandle, value: bool) -> NodeHandle {
        self.push(Record::Bool(value))
    }

    fn set_value(
        &mut self,
        _cx: CallerHandle,
        node: NodeHandle,
        index: usize,
        child: Option<NodeHandle>,
    ) -> Result<(), AttachError> {
        let elements = match self.records.get_mut(node.index()) {
            Some(Record::Array(elements)) => elements,
            Some(_) => return Err(AttachError::NotAnArray(node)),
            None => return Err(AttachError::UnknownNode(node)),
        };
        match elements.get_mut(index) {
            Some(slot) => *slot = child,
            None => {
                let additional = (index - elements.len())
                    .checked_add(1)
                    .ok_or(AttachError::IndexOutOfRange(node, index))?;
                elements
                    .try_reserve(additional)
                    .map_err(|_| AttachError::IndexOutOfRange(node, index))?;
                elements.resize(index, None);
                elements.push(child);
            }
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
        let policy = self.options.duplicate_keys;
        let members = match self.records.get_mut(node.index()) {
            Some(Record::Object(members)) => members,
            Some(_) => return Err(AttachError::NotAnObject(node)),
            None => return Err(AttachError::UnknownNode(node)),
        };
        if policy == DuplicateKeys::Overwrite {
            if let Some((_, value)) = members.iter_mut().find(|(k, _)| k == key) {
                *value = child;
                return Ok(());
            }
        }
        members.push((key.to_owned(), child));
        Ok(())
    }
}
