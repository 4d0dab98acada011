//! Conversion between trees and [`serde_json::Value`].
//!
//! This is an in-memory bridge, useful to build fixtures and to inspect
//! trees. JSON cannot express every tree exactly:
//!
//! - numbers become [`NodeKind::Int`] when they fit in `i64`, then
//!   [`NodeKind::Uint`], then [`NodeKind::Float`], so an unsigned node with a
//!   small value comes back as a signed one,
//! - non-finite floats become `null`,
//! - of duplicate object keys, the last value wins at the position of the
//!   first one.

use serde_json::{Map, Number, Value};

use crate::{AttachError, Context, NodeHandle, NodeIface, NodeKind};

/// Builds a subtree from the JSON value, and returns its root.
///
/// `null` gives `Ok(None)` and creates nothing.
///
/// # Errors
///
/// Returns [`AttachError`] if the store rejects a child it has just created.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use treeface::{json, ArenaTree, CallerHandle, Context, NodeKind};
///
/// let mut ctx = Context::new(ArenaTree::new(), CallerHandle::NONE);
/// let root = json::from_value(&mut ctx, &json!({"args": [1, 2, 3]}))
///     .expect("arena accepts its own nodes")
///     .expect("an object is not null");
///
/// assert_eq!(ctx.kind(root), NodeKind::Object);
/// assert_eq!(json::to_value(&ctx, Some(root)), json!({"args": [1, 2, 3]}));
/// ```
pub fn from_value<S: NodeIface>(
    ctx: &mut Context<S>,
    value: &Value,
) -> Result<Option<NodeHandle>, AttachError> {
    let node = match value {
        Value::Null => return Ok(None),
        Value::Bool(v) => ctx.new_bool(*v),
        Value::Number(v) => {
            if let Some(v) = v.as_i64() {
                ctx.new_int(v)
            } else if let Some(v) = v.as_u64() {
                ctx.new_uint(v)
            } else {
                // Always present without the `arbitrary_precision` feature.
                ctx.new_float(v.as_f64().unwrap_or(f64::NAN))
            }
        }
        Value::String(v) => ctx.new_string(v),
        Value::Array(elems) => {
            let node = ctx.new_array(elems.len());
            for (index, elem) in elems.iter().enumerate() {
                let child = from_value(ctx, elem)?;
                ctx.set_value(node, index, child)?;
            }
            node
        }
        Value::Object(members) => {
            let node = ctx.new_object(members.len());
            for (key, member) in members {
                let child = from_value(ctx, member)?;
                ctx.set_key_value(node, key, child)?;
            }
            node
        }
    };

    Ok(Some(node))
}

/// Returns the JSON representation of the subtree.
///
/// Nodes of unknown kinds become `null`.
#[must_use]
pub fn to_value<S: NodeIface>(ctx: &Context<S>, node: Option<NodeHandle>) -> Value {
    let node = match node {
        Some(v) => v,
        None => return Value::Null,
    };
    match ctx.kind(node) {
        NodeKind::Null => Value::Null,
        NodeKind::Object => {
            let mut map = Map::with_capacity(ctx.size(node));
            for index in 0..ctx.size(node) {
                let key = match ctx.key_at(node, index) {
                    Some(v) => v,
                    None => {
                        tracing::trace!(?node, index, "object member without a key skipped");
                        continue;
                    }
                };
                map.insert(key.to_owned(), to_value(ctx, ctx.value_at(node, index)));
            }
            Value::Object(map)
        }
        NodeKind::Array => Value::Array(
            (0..ctx.size(node))
                .map(|index| to_value(ctx, ctx.value_at(node, index)))
                .collect(),
        ),
        NodeKind::String => Value::String(ctx.as_str(node).to_owned()),
        NodeKind::Int => Value::from(ctx.as_int(node)),
        NodeKind::Uint => Value::from(ctx.as_uint(node)),
        NodeKind::Float => Number::from_f64(ctx.as_float(node)).map_or(Value::Null, Value::Number),
        NodeKind::Bool => Value::Bool(ctx.as_bool(node)),
        NodeKind::Unknown(code) => {
            tracing::trace!(?node, code, "node of unknown kind converted to null");
            Value::Null
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use crate::{ArenaTree, CallerHandle, ForestTree};

    #[test]
    fn number_kinds() {
        let mut ctx = Context::new(ForestTree::new(), CallerHandle::NONE);
        let value = json!([-1, 1, u64::MAX, 1.5]);
        let root = from_value(&mut ctx, &value).unwrap().unwrap();

        let kinds = (0..ctx.size(root))
            .map(|i| ctx.kind_of(ctx.value_at(root, i)))
            .collect::<Vec<_>>();
        assert_eq!(
            kinds,
            [NodeKind::Int, NodeKind::Int, NodeKind::Uint, NodeKind::Float]
        );
        assert_eq!(to_value(&ctx, Some(root)), value);
    }

    #[test]
    fn nulls_and_key_order() {
        let mut ctx = Context::new(ArenaTree::new(), CallerHandle::NONE);
        let value = json!({"z": null, "a": [null, true], "m": ""});
        let root = from_value(&mut ctx, &value).unwrap();

        assert_eq!(ctx.key_at(root.unwrap(), 0), Some("z"));
        assert_eq!(to_value(&ctx, root), value);
        assert_eq!(from_value(&mut ctx, &Value::Null), Ok(None));
    }

    #[test]
    fn non_finite_float_becomes_null() {
        let mut ctx = Context::new(ArenaTree::new(), CallerHandle::NONE);
        let inf = ctx.new_float(f64::INFINITY);
        assert_eq!(to_value(&ctx, Some(inf)), Value::Null);
    }
}
