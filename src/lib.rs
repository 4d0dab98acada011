//! Generic tree node interface.
//!
//! `treeface` describes tree-shaped data (objects, arrays and scalars, the
//! JSON data model with signed and unsigned integers kept apart) through one
//! trait, [`NodeIface`]. Each representation of a tree implements the trait
//! once; everything else in this crate is written against the trait only:
//!
//! - [`load`] copies a subtree from one [`Context`] into another, even when
//!   the two are backed by different stores,
//! - [`Context::traverse`] walks a subtree in pre-order, post-order,
//!   level-order or source position order,
//! - [`deep_equal`] compares subtrees across contexts,
//! - [`Context::debug_print`] renders a subtree as a tree diagram.
//!
//! Two stores are provided: [`ArenaTree`] keeps every node as a flat record,
//! and [`ForestTree`] keeps nodes in a linked first-child / next-sibling
//! hierarchy.
//!
//! # Examples
//!
//! ```
//! use treeface::{deep_equal, load, ArenaTree, CallerHandle, Context, ForestTree, NodeKind};
//!
//! let mut src = Context::new(ArenaTree::new(), CallerHandle(1));
//! let root = src.new_object(2);
//! let name = src.new_string("x");
//! let args = src.new_array(3);
//! src.set_key_value(root, "name", Some(name))?;
//! src.set_key_value(root, "args", Some(args))?;
//! for (i, v) in [1, 2, 3].into_iter().enumerate() {
//!     let elem = src.new_int(v);
//!     src.set_value(args, i, Some(elem))?;
//! }
//!
//! let mut dst = Context::new(ForestTree::new(), CallerHandle(2));
//! let copied = load(&src, Some(root), &mut dst)?.expect("an object is not null");
//!
//! assert_eq!(dst.kind(copied), NodeKind::Object);
//! assert_eq!(dst.key_at(copied, 1), Some("args"));
//! assert!(deep_equal(&src, Some(root), &dst, Some(copied)));
//! # Ok::<_, treeface::Error>(())
//! ```
#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
// `clippy::missing_docs_in_private_items` implies `missing_docs`.
#![warn(clippy::missing_docs_in_private_items)]

pub mod arena;
mod compare;
mod context;
mod debug_print;
mod error;
pub mod forest;
mod handle;
mod iface;
#[cfg(feature = "json")]
pub mod json;
mod kind;
mod load;
mod traverse;

pub use self::arena::{ArenaOptions, ArenaTree, DuplicateKeys};
pub use self::compare::deep_equal;
pub use self::context::Context;
pub use self::debug_print::DebugPrint;
pub use self::error::Error;
pub use self::forest::ForestTree;
pub use self::handle::{CallerHandle, NodeHandle};
pub use self::iface::{member, AttachError, NodeIface, KEY_OFFSET, KEY_POS, KEY_START};
pub use self::kind::NodeKind;
pub use self::load::{load, LoadError};
pub use self::traverse::{Traverse, TreeOrder};
