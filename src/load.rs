//! Copying trees between contexts.
//!
//! [`load`] rebuilds a subtree of one context inside another context, using
//! nothing but the [`NodeIface`] of both sides. The two stores may have
//! completely different memory layouts.

use crate::iface::AttachError;
use crate::{Context, NodeHandle, NodeIface, NodeKind};

/// Error returned when a tree cannot be copied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    /// The key of an object member could not be read.
    #[error("key of the object member at ordinal {ordinal} is unavailable")]
    MalformedKey {
        /// Ordinal position of the member in the source object.
        ordinal: usize,
    },
    /// The destination refused to attach a copied child.
    #[error(transparent)]
    Attach(#[from] AttachError),
}

/// Copies the subtree rooted at `node` in `src` into `dst`.
///
/// Returns the handle of the new node in `dst`, or `None` if the source node
/// is null or of an unknown kind.
///
/// Object members and array elements keep their ordinal order. Scalars are
/// copied by value. The source is only read.
///
/// The copy is not transactional. On error, the subtree being built is
/// abandoned, but nodes created before the failure stay in `dst`, and
/// children already attached to their parents stay attached. Callers who
/// need all-or-nothing semantics should discard `dst` on error.
///
/// # Errors
///
/// * [`LoadError::MalformedKey`] if a source object cannot report the key of
///   one of its members. The whole load fails, not only that member.
/// * [`LoadError::Attach`] if the destination store rejects an attachment.
///
/// # Examples
///
/// ```
/// use treeface::{load, ArenaTree, CallerHandle, Context, ForestTree, NodeKind};
///
/// let mut src = Context::new(ArenaTree::new(), CallerHandle::NONE);
/// let name = src.new_string("x");
/// let root = src.new_object(1);
/// src.set_key_value(root, "name", Some(name)).expect("root is an object");
///
/// let mut dst = Context::new(ForestTree::new(), CallerHandle::NONE);
/// let copied = load(&src, Some(root), &mut dst)
///     .expect("the source is well-formed")
///     .expect("the source is not null");
///
/// assert_eq!(dst.kind(copied), NodeKind::Object);
/// assert_eq!(dst.key_at(copied, 0), Some("name"));
/// let value = dst.value_at(copied, 0).expect("the member is not null");
/// assert_eq!(dst.as_str(value), "x");
/// ```
pub fn load<S, D>(
    src: &Context<S>,
    node: Option<NodeHandle>,
    dst: &mut Context<D>,
) -> Result<Option<NodeHandle>, LoadError>
where
    S: NodeIface,
    D: NodeIface,
{
    tracing::debug!(
        src = ?src.caller(),
        dst = ?dst.caller(),
        ?node,
        "loading subtree"
    );
    let result = load_node(src, node, dst);
    match &result {
        Ok(copied) => tracing::debug!(?copied, "subtree loaded"),
        Err(e) => tracing::debug!(error = %e, "failed to load subtree"),
    }
    result
}

/// Copies a node recursively.
fn load_node<S, D>(
    src: &Context<S>,
    node: Option<NodeHandle>,
    dst: &mut Context<D>,
) -> Result<Option<NodeHandle>, LoadError>
where
    S: NodeIface,
    D: NodeIface,
{
    let node = match node {
        Some(node) => node,
        None => return Ok(None),
    };

    let copied = match src.kind(node) {
        NodeKind::Null => return Ok(None),
        NodeKind::Object => {
            let size = src.size(node);
            let obj = dst.new_object(size);
            for ordinal in 0..size {
                let key = src
                    .key_at(node, ordinal)
                    .ok_or(LoadError::MalformedKey { ordinal })?;
                let value = load_node(src, src.value_at(node, ordinal), dst)?;
                dst.set_key_value(obj, key, value)?;
            }
            obj
        }
        NodeKind::Array => {
            let size = src.size(node);
            let arr = dst.new_array(size);
            for index in 0..size {
                let value = load_node(src, src.value_at(node, index), dst)?;
                dst.set_value(arr, index, value)?;
            }
            arr
        }
        NodeKind::String => dst.new_string(src.as_str(node)),
        NodeKind::Int => dst.new_int(src.as_int(node)),
        NodeKind::Uint => dst.new_uint(src.as_uint(node)),
        NodeKind::Float => dst.new_float(src.as_float(node)),
        NodeKind::Bool => dst.new_bool(src.as_bool(node)),
        NodeKind::Unknown(code) => {
            tracing::trace!(?node, code, "skipping node of unknown kind");
            return Ok(None);
        }
    };

    Ok(Some(copied))
}
