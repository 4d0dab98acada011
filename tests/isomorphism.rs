//! Property tests: copying a tree to another store and back preserves it.

use std::collections::HashSet;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
#[cfg(feature = "json")]
use treeface::json;
use treeface::{
    deep_equal, load, ArenaTree, CallerHandle, Context, ForestTree, NodeHandle, NodeIface,
};

/// Tree description used to generate inputs.
#[derive(Debug, Clone)]
enum Tree {
    Null,
    Str(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    Array(Vec<Tree>),
    Object(Vec<(String, Tree)>),
}

/// Generates trees with unique keys in every object.
fn arb_tree() -> impl Strategy<Value = Tree> {
    let leaf = prop_oneof![
        Just(Tree::Null),
        ".{0,8}".prop_map(Tree::Str),
        any::<i64>().prop_map(Tree::Int),
        any::<u64>().prop_map(Tree::Uint),
        any::<f64>().prop_map(Tree::Float),
        any::<bool>().prop_map(Tree::Bool),
    ];
    leaf.prop_recursive(4, 64, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..8).prop_map(Tree::Array),
            prop::collection::vec(("[a-z@]{0,4}", inner), 0..8).prop_map(|mut members| {
                let mut seen = HashSet::new();
                members.retain(|(key, _)| seen.insert(key.clone()));
                Tree::Object(members)
            }),
        ]
    })
}

/// Builds the tree in the context.
fn build<S: NodeIface>(ctx: &mut Context<S>, tree: &Tree) -> Option<NodeHandle> {
    let node = match tree {
        Tree::Null => return None,
        Tree::Str(v) => ctx.new_string(v),
        Tree::Int(v) => ctx.new_int(*v),
        Tree::Uint(v) => ctx.new_uint(*v),
        Tree::Float(v) => ctx.new_float(*v),
        Tree::Bool(v) => ctx.new_bool(*v),
        Tree::Array(elems) => {
            let node = ctx.new_array(elems.len());
            for (index, elem) in elems.iter().enumerate() {
                let child = build(ctx, elem);
                ctx.set_value(node, index, child)
                    .expect("the node is an array");
            }
            node
        }
        Tree::Object(members) => {
            let node = ctx.new_object(members.len());
            for (key, member) in members {
                let child = build(ctx, member);
                ctx.set_key_value(node, key, child)
                    .expect("the node is an object");
            }
            node
        }
    };
    Some(node)
}

/// Copies the tree from an `X` store to a `Y` store and back to another `X`
/// store, checking that every copy equals the original.
fn round_trip<X: NodeIface, Y: NodeIface>(x: X, y: Y, x_again: X, tree: &Tree) {
    let mut src = Context::new(x, CallerHandle(1));
    let root = build(&mut src, tree);

    let mut mid = Context::new(y, CallerHandle(2));
    let mid_root = load(&src, root, &mut mid).expect("the source is well-formed");
    assert!(deep_equal(&src, root, &mid, mid_root));

    let mut back = Context::new(x_again, CallerHandle(3));
    let back_root = load(&mid, mid_root, &mut back).expect("the copy is well-formed");
    assert!(deep_equal(&src, root, &back, back_root));
    #[cfg(feature = "json")]
    assert_eq!(
        json::to_value(&src, root),
        json::to_value(&back, back_root)
    );
}

proptest! {
    #[test]
    fn arena_forest_arena(tree in arb_tree()) {
        round_trip(ArenaTree::new(), ForestTree::new(), ArenaTree::new(), &tree);
    }

    #[test]
    fn forest_arena_forest(tree in arb_tree()) {
        round_trip(ForestTree::new(), ArenaTree::new(), ForestTree::new(), &tree);
    }

    #[test]
    fn arena_arena_arena(tree in arb_tree()) {
        round_trip(ArenaTree::new(), ArenaTree::new(), ArenaTree::new(), &tree);
    }

    #[test]
    fn forest_forest_forest(tree in arb_tree()) {
        round_trip(ForestTree::new(), ForestTree::new(), ForestTree::new(), &tree);
    }

    /// Array elements and object members keep their ordinal order.
    #[test]
    fn order_is_preserved(keys in prop::collection::hash_set("[a-z]{1,6}", 0..16)) {
        let keys = keys.into_iter().collect::<Vec<_>>();
        let mut src = Context::new(ForestTree::new(), CallerHandle::NONE);
        let obj = src.new_object(keys.len());
        let arr = src.new_array(keys.len());
        for (index, key) in keys.iter().enumerate() {
            let value = src.new_string(key);
            src.set_key_value(obj, key, Some(value)).expect("obj is an object");
            let value = src.new_uint(index as u64);
            src.set_value(arr, index, Some(value)).expect("arr is an array");
        }

        let mut dst = Context::new(ArenaTree::new(), CallerHandle::NONE);
        let obj2 = load(&src, Some(obj), &mut dst).unwrap().unwrap();
        let arr2 = load(&src, Some(arr), &mut dst).unwrap().unwrap();

        let copied_keys = (0..dst.size(obj2))
            .map(|i| dst.key_at(obj2, i).unwrap().to_owned())
            .collect::<Vec<_>>();
        prop_assert_eq!(&copied_keys, &keys);
        let copied_elems = (0..dst.size(arr2))
            .map(|i| dst.as_uint(dst.value_at(arr2, i).unwrap()))
            .collect::<Vec<_>>();
        prop_assert_eq!(copied_elems, (0..keys.len() as u64).collect::<Vec<_>>());
    }
}
