mod arena;
mod kind;
mod props;

pub use arena::{InstanceArena, InstanceId};
pub use kind::{ElementKind, PropBinding};
pub use props::{PropValue, Props};

use crate::events::EventHandlers;
use crate::style::StyleKeySet;

/// Adapter-side record for one native node
///
/// `applied_style_keys` is exactly the longhand set the current style writes;
/// every `handlers` entry has one native listener behind it.
#[derive(Debug)]
pub struct Instance<N> {
    pub node: N,
    pub kind: ElementKind,
    pub applied_style_keys: StyleKeySet,
    pub handlers: EventHandlers,
    /// Last committed props, kept to diff the next update
    pub props: Props,
}

impl<N> Instance<N> {
    pub fn new(node: N, kind: ElementKind, props: Props) -> Self {
        Self {
            node,
            kind,
            applied_style_keys: StyleKeySet::new(),
            handlers: EventHandlers::new(),
            props,
        }
    }
}
