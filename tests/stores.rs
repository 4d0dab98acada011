//! Behavior shared by every store of the crate.

use pretty_assertions::assert_eq;
use treeface::{ArenaTree, AttachError, CallerHandle, ForestTree, NodeIface, NodeKind};

const CX: CallerHandle = CallerHandle(0x5eed);

fn check_kinds<S: NodeIface>(mut store: S) {
    let nodes = [
        (store.new_object(CX, 0), NodeKind::Object),
        (store.new_array(CX, 0), NodeKind::Array),
        (store.new_string(CX, "s"), NodeKind::String),
        (store.new_int(CX, -3), NodeKind::Int),
        (store.new_uint(CX, 3), NodeKind::Uint),
        (store.new_float(CX, 3.5), NodeKind::Float),
        (store.new_bool(CX, true), NodeKind::Bool),
    ];
    for (node, kind) in nodes {
        assert_eq!(store.kind(CX, node), kind);
        if kind.is_scalar() {
            assert_eq!(store.size(CX, node), 0);
            assert_eq!(store.value_at(CX, node, 0), None);
        }
        assert_eq!(store.key_at(CX, node, 0), None);
    }
}

fn check_sentinels<S: NodeIface>(mut store: S) {
    let arr = store.new_array(CX, 0);
    assert_eq!(store.as_str(CX, arr), "");
    assert_eq!(store.as_int(CX, arr), 0);
    assert_eq!(store.as_uint(CX, arr), 0);
    assert_eq!(store.as_float(CX, arr).to_bits(), 0.0_f64.to_bits());
    assert!(!store.as_bool(CX, arr));

    let int = store.new_int(CX, -1);
    assert_eq!(store.as_uint(CX, int), 0, "signed nodes are not unsigned");
}

fn check_attach_errors<S: NodeIface>(mut store: S) {
    let obj = store.new_object(CX, 0);
    let arr = store.new_array(CX, 0);
    let s = store.new_string(CX, "leaf");

    assert_eq!(
        store.set_value(CX, obj, 0, Some(s)),
        Err(AttachError::NotAnArray(obj))
    );
    assert_eq!(
        store.set_key_value(CX, arr, "k", Some(s)),
        Err(AttachError::NotAnObject(arr))
    );
    assert_eq!(
        store.set_value(CX, s, 0, None),
        Err(AttachError::NotAnArray(s))
    );
    assert_eq!(store.size(CX, obj), 0);
    assert_eq!(store.size(CX, arr), 0);
}

fn check_members<S: NodeIface>(mut store: S) {
    let obj = store.new_object(CX, 3);
    let a = store.new_bool(CX, false);
    let c = store.new_float(CX, -2.0);
    store.set_key_value(CX, obj, "a", Some(a)).unwrap();
    store.set_key_value(CX, obj, "b", None).unwrap();
    store.set_key_value(CX, obj, "c", Some(c)).unwrap();

    let members = (0..store.size(CX, obj))
        .map(|i| {
            let key = store.key_at(CX, obj, i).map(str::to_owned);
            let kind = store.value_at(CX, obj, i).map(|v| store.kind(CX, v));
            (key, kind)
        })
        .collect::<Vec<_>>();
    assert_eq!(
        members,
        [
            (Some("a".to_owned()), Some(NodeKind::Bool)),
            (Some("b".to_owned()), None),
            (Some("c".to_owned()), Some(NodeKind::Float)),
        ]
    );
    assert_eq!(store.key_at(CX, obj, 3), None);
    assert_eq!(store.value_at(CX, obj, 3), None);
}

fn check_start_offset<S: NodeIface>(mut store: S) {
    let node = store.new_object(CX, 1);
    assert_eq!(store.start_offset(CX, node), None);

    let pos = store.new_object(CX, 1);
    let start = store.new_object(CX, 1);
    let offset = store.new_uint(CX, 42);
    store.set_key_value(CX, start, "offset", Some(offset)).unwrap();
    store.set_key_value(CX, pos, "start", Some(start)).unwrap();
    store.set_key_value(CX, node, "@pos", Some(pos)).unwrap();
    assert_eq!(store.start_offset(CX, node), Some(42));

    let negative = store.new_object(CX, 1);
    let pos = store.new_object(CX, 1);
    let start = store.new_object(CX, 1);
    let offset = store.new_int(CX, -1);
    store.set_key_value(CX, start, "offset", Some(offset)).unwrap();
    store.set_key_value(CX, pos, "start", Some(start)).unwrap();
    store.set_key_value(CX, negative, "@pos", Some(pos)).unwrap();
    assert_eq!(store.start_offset(CX, negative), None);
}

macro_rules! store_tests {
    ($name:ident, $new:expr) => {
        mod $name {
            use super::*;

            #[test]
            fn kinds() {
                check_kinds($new);
            }

            #[test]
            fn sentinels() {
                check_sentinels($new);
            }

            #[test]
            fn attach_errors() {
                check_attach_errors($new);
            }

            #[test]
            fn members() {
                check_members($new);
            }

            #[test]
            fn start_offset() {
                check_start_offset($new);
            }

            #[test]
            fn boxed() {
                let store: Box<dyn NodeIface> = Box::new($new);
                check_members(store);
            }
        }
    };
}

store_tests!(arena, ArenaTree::new());
store_tests!(forest, ForestTree::new());
