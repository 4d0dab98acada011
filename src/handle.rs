//! Node and caller handles.

use core::fmt;
use core::num::NonZeroUsize;

/// Node handle.
///
/// A handle is an index into the arena of the store which created it, and is
/// meaningless for any other store. Passing a handle to a different store is
/// not detected.
///
/// The zero/empty handle of the node interface is represented as
/// `Option::<NodeHandle>::None`. `Option<NodeHandle>` has the same size as
/// `NodeHandle` itself.
///
/// The ordering (`PartialOrd` and `Ord`) is only provided for use with
/// ordered containers such as `BTreeSet`, and it is **not** guaranteed to have
/// any relation to the order the nodes are created.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeHandle(NonZeroUsize);

impl NodeHandle {
    /// Creates a node handle from the arena index.
    ///
    /// Returns `None` if the index is `usize::MAX`.
    #[inline]
    #[must_use]
    pub(crate) fn from_index(index: usize) -> Option<Self> {
        index.checked_add(1).and_then(NonZeroUsize::new).map(Self)
    }

    /// Returns the arena index.
    #[inline]
    #[must_use]
    pub(crate) const fn index(self) -> usize {
        self.0.get() - 1
    }

    /// Returns the raw non-zero value, suitable for passing across FFI-like
    /// boundaries where `0` stands for the empty handle.
    #[inline]
    #[must_use]
    pub const fn to_raw(self) -> usize {
        self.0.get()
    }

    /// Creates a handle from the raw value returned by [`NodeHandle::to_raw`].
    ///
    /// `0` is the empty handle and becomes `None`.
    #[inline]
    #[must_use]
    pub const fn from_raw(raw: usize) -> Option<Self> {
        // Cannot use `Option<_>::map` here since it is not `const` function.
        match NonZeroUsize::new(raw) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }
}

// Prevent `{:#?}` from printing the value in redundant 3 lines.
impl fmt::Debug for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeHandle({})", self.index())
    }
}

/// Opaque caller handle.
///
/// The value is chosen by whoever creates a [`Context`][`crate::Context`] and
/// is passed unmodified to every call of the node interface made through that
/// context. A store may use it to tell apart several logical trees it serves;
/// the reference stores ignore it.
#[derive(Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CallerHandle(pub u64);

impl CallerHandle {
    /// The default caller handle, for callers without any use for it.
    pub const NONE: Self = Self(0);
}

impl fmt::Debug for CallerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CallerHandle({})", self.0)
    }
}
