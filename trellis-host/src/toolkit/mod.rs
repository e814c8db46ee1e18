mod field;
mod stub;

pub use field::{EnumTable, Field, FieldValue};
pub use stub::{NativeCall, StubNode, StubToolkit};

use crate::events::{EventType, Handler};
use crate::instance::ElementKind;
use crate::style::StyleValue;
use std::fmt;
use std::hash::Hash;
use thiserror::Error;

/// Error raised by a native toolkit call. The adapter never inspects it,
/// it is handed back to the reconciler as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("native {op} failed: {message}")]
pub struct NativeError {
    pub op: &'static str,
    pub message: String,
}

impl NativeError {
    pub fn new(op: &'static str, message: impl Into<String>) -> Self {
        Self {
            op,
            message: message.into(),
        }
    }
}

pub type NativeResult<T> = std::result::Result<T, NativeError>;

/// Platform-specific retained UI toolkit
///
/// Implementations own the native objects; the adapter only holds handles
/// and issues mutations through this trait, one call per native operation.
pub trait Toolkit: 'static {
    /// Opaque handle to a native node
    type Node: Clone + Eq + Hash + fmt::Debug;

    /// Construct a native node for an element kind
    fn create_node(&mut self, kind: ElementKind) -> NativeResult<Self::Node>;

    /// Add `child` as the last child of `parent`
    fn add_child(&mut self, parent: &Self::Node, child: &Self::Node) -> NativeResult<()>;

    /// Insert `child` at `index` in `parent`'s child list
    fn insert_child(
        &mut self,
        parent: &Self::Node,
        index: usize,
        child: &Self::Node,
    ) -> NativeResult<()>;

    fn remove_child(&mut self, parent: &Self::Node, child: &Self::Node) -> NativeResult<()>;

    fn remove_child_at(&mut self, parent: &Self::Node, index: usize) -> NativeResult<()>;

    /// Current position of `child` under `parent`, `None` when detached
    fn index_of(&self, parent: &Self::Node, child: &Self::Node) -> Option<usize>;

    /// Remove every child of `parent` in one call
    fn clear_children(&mut self, parent: &Self::Node) -> NativeResult<()>;

    fn set_style(&mut self, node: &Self::Node, key: &str, value: &StyleValue) -> NativeResult<()>;

    /// Write the "unset" sentinel so stylesheet-driven defaults apply again
    fn unset_style(&mut self, node: &Self::Node, key: &str) -> NativeResult<()>;

    fn add_class(&mut self, node: &Self::Node, class: &str) -> NativeResult<()>;

    fn remove_class(&mut self, node: &Self::Node, class: &str) -> NativeResult<()>;

    /// Resolve a named constant against one of the toolkit's enum tables
    fn resolve_enum(&self, table: EnumTable, name: &str) -> NativeResult<i32>;

    fn set_field(&mut self, node: &Self::Node, field: Field, value: FieldValue)
    -> NativeResult<()>;

    fn add_listener(
        &mut self,
        node: &Self::Node,
        event: EventType,
        handler: &Handler,
    ) -> NativeResult<()>;

    fn remove_listener(
        &mut self,
        node: &Self::Node,
        event: EventType,
        handler: &Handler,
    ) -> NativeResult<()>;

    fn remove_all_listeners(&mut self, node: &Self::Node) -> NativeResult<()>;
}
