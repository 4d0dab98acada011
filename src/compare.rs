//! Structural comparison across contexts.

use crate::{Context, NodeHandle, NodeIface, NodeKind};

/// Performs a deep equality check between two subtrees.
///
/// The subtrees may live in contexts backed by different stores. Nodes are
/// equal when they have the same kind and:
///
/// - scalars hold the same value (floats are compared bitwise, so `NaN`
///   equals the same `NaN` and `0.0` differs from `-0.0`),
/// - arrays have equal elements in the same order,
/// - objects have equal members with equal keys in the same order.
///
/// A missing node and an explicit null node are both null, and are equal.
/// Signed and unsigned integers are never equal to each other, even for the
/// same numeric value.
///
/// # Examples
///
/// ```
/// use treeface::{deep_equal, ArenaTree, CallerHandle, Context, ForestTree};
///
/// let mut a = Context::new(ArenaTree::new(), CallerHandle::NONE);
/// let mut b = Context::new(ForestTree::new(), CallerHandle::NONE);
/// let na = a.new_uint(3);
/// let nb = b.new_uint(3);
/// let nc = b.new_int(3);
///
/// assert!(deep_equal(&a, Some(na), &b, Some(nb)));
/// assert!(!deep_equal(&a, Some(na), &b, Some(nc)));
/// ```
#[must_use]
pub fn deep_equal<A: NodeIface, B: NodeIface>(
    a: &Context<A>,
    na: Option<NodeHandle>,
    b: &Context<B>,
    nb: Option<NodeHandle>,
) -> bool {
    let kind = a.kind_of(na);
    if kind != b.kind_of(nb) {
        return false;
    }
    let (na, nb) = match (na, nb) {
        (Some(na), Some(nb)) => (na, nb),
        // Both are null.
        _ => return true,
    };

    match kind {
        NodeKind::Null => true,
        NodeKind::String => a.as_str(na) == b.as_str(nb),
        NodeKind::Int => a.as_int(na) == b.as_int(nb),
        NodeKind::Uint => a.as_uint(na) == b.as_uint(nb),
        NodeKind::Float => a.as_float(na).to_bits() == b.as_float(nb).to_bits(),
        NodeKind::Bool => a.as_bool(na) == b.as_bool(nb),
        NodeKind::Array => {
            let len = a.size(na);
            if len != b.size(nb) {
                return false;
            }
            (0..len).all(|i| deep_equal(a, a.value_at(na, i), b, b.value_at(nb, i)))
        }
        NodeKind::Object => {
            let len = a.size(na);
            if len != b.size(nb) {
                return false;
            }
            (0..len).all(|i| {
                a.key_at(na, i) == b.key_at(nb, i)
                    && deep_equal(a, a.value_at(na, i), b, b.value_at(nb, i))
            })
        }
        // Nothing is known about the content.
        NodeKind::Unknown(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{ArenaTree, CallerHandle, ForestTree};

    #[test]
    fn explicit_null_equals_missing() {
        let mut a = Context::new(ArenaTree::new(), CallerHandle::NONE);
        let b = Context::new(ForestTree::new(), CallerHandle::NONE);
        let null = a.store_mut().new_null();
        assert!(deep_equal(&a, Some(null), &b, None));
        assert!(deep_equal(&b, None, &a, Some(null)));
    }

    #[test]
    fn member_order_matters() {
        let mut a = Context::new(ArenaTree::new(), CallerHandle::NONE);
        let x = a.new_object(2);
        let y = a.new_object(2);
        let t = a.new_bool(true);
        let f = a.new_bool(false);
        a.set_key_value(x, "t", Some(t)).unwrap();
        a.set_key_value(x, "f", Some(f)).unwrap();
        a.set_key_value(y, "f", Some(f)).unwrap();
        a.set_key_value(y, "t", Some(t)).unwrap();

        assert!(deep_equal(&a, Some(x), &a, Some(x)));
        assert!(!deep_equal(&a, Some(x), &a, Some(y)));
    }

    #[test]
    fn floats_are_compared_bitwise() {
        let mut a = Context::new(ArenaTree::new(), CallerHandle::NONE);
        let nan1 = a.new_float(f64::NAN);
        let nan2 = a.new_float(f64::NAN);
        let zero = a.new_float(0.0);
        let neg_zero = a.new_float(-0.0);

        assert!(deep_equal(&a, Some(nan1), &a, Some(nan2)));
        assert!(!deep_equal(&a, Some(zero), &a, Some(neg_zero)));
    }
}
