use super::{EnumTable, Field, FieldValue, NativeError, NativeResult, Toolkit};
use crate::events::{EventType, Handler, UiEvent};
use crate::instance::ElementKind;
use crate::priority;
use crate::style::StyleValue;
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};

/// Handle to a node owned by [`StubToolkit`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StubNode(pub u32);

/// One downstream call, as recorded by [`StubToolkit`]
#[derive(Debug, Clone, PartialEq)]
pub enum NativeCall {
    CreateNode {
        node: StubNode,
        kind: ElementKind,
    },
    AddChild {
        parent: StubNode,
        child: StubNode,
    },
    InsertChild {
        parent: StubNode,
        index: usize,
        child: StubNode,
    },
    RemoveChild {
        parent: StubNode,
        child: StubNode,
    },
    RemoveChildAt {
        parent: StubNode,
        index: usize,
    },
    ClearChildren {
        parent: StubNode,
    },
    SetStyle {
        node: StubNode,
        key: String,
        value: StyleValue,
    },
    UnsetStyle {
        node: StubNode,
        key: String,
    },
    AddClass {
        node: StubNode,
        class: String,
    },
    RemoveClass {
        node: StubNode,
        class: String,
    },
    SetField {
        node: StubNode,
        field: Field,
        value: FieldValue,
    },
    AddListener {
        node: StubNode,
        event: EventType,
        handler: Handler,
    },
    RemoveListener {
        node: StubNode,
        event: EventType,
        handler: Handler,
    },
    RemoveAllListeners {
        node: StubNode,
    },
}

struct NodeState {
    kind: ElementKind,
    parent: Option<StubNode>,
    children: Vec<StubNode>,
    styles: BTreeMap<String, StyleValue>,
    classes: BTreeSet<String>,
    fields: BTreeMap<Field, FieldValue>,
    listeners: Vec<(EventType, Handler)>,
}

/// In-memory toolkit for tests and headless runs
///
/// Keeps a real node graph (children, styles, classes, fields, listeners)
/// and records every mutation as a [`NativeCall`] so call sequences can be
/// asserted exactly.
pub struct StubToolkit {
    nodes: Vec<NodeState>,
    calls: RefCell<Vec<NativeCall>>,
    fail_on: Option<&'static str>,
}

impl StubToolkit {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            calls: RefCell::new(Vec::new()),
            fail_on: None,
        }
    }

    pub fn take_calls(&mut self) -> Vec<NativeCall> {
        self.calls.take()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    /// Make the next call of the named operation fail
    pub fn fail_on(&mut self, op: &'static str) {
        self.fail_on = Some(op);
    }

    pub fn kind(&self, node: StubNode) -> Option<ElementKind> {
        self.node(node).map(|state| state.kind)
    }

    pub fn parent(&self, node: StubNode) -> Option<StubNode> {
        self.node(node).and_then(|state| state.parent)
    }

    pub fn children(&self, node: StubNode) -> Vec<StubNode> {
        self.node(node)
            .map(|state| state.children.clone())
            .unwrap_or_default()
    }

    pub fn style(&self, node: StubNode, key: &str) -> Option<StyleValue> {
        self.node(node).and_then(|state| state.styles.get(key).cloned())
    }

    pub fn style_keys(&self, node: StubNode) -> Vec<String> {
        self.node(node)
            .map(|state| state.styles.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn classes(&self, node: StubNode) -> Vec<String> {
        self.node(node)
            .map(|state| state.classes.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn field(&self, node: StubNode, field: Field) -> Option<FieldValue> {
        self.node(node).and_then(|state| state.fields.get(&field).cloned())
    }

    pub fn listener_count(&self, node: StubNode) -> usize {
        self.node(node).map_or(0, |state| state.listeners.len())
    }

    /// Deliver a native event to every listener of its type on `node`,
    /// tagged with the event's update priority. Returns how many ran.
    pub fn dispatch(&self, node: StubNode, event: &UiEvent) -> usize {
        let event_type = event.event_type();
        let handlers: Vec<Handler> = self
            .node(node)
            .map(|state| {
                state
                    .listeners
                    .iter()
                    .filter(|(ty, _)| *ty == event_type)
                    .map(|(_, handler)| handler.clone())
                    .collect()
            })
            .unwrap_or_default();

        priority::with_event_priority(event_type, || {
            for handler in &handlers {
                handler.call(event);
            }
        });
        handlers.len()
    }

    fn node(&self, node: StubNode) -> Option<&NodeState> {
        self.nodes.get(node.0 as usize)
    }

    fn node_mut(&mut self, op: &'static str, node: StubNode) -> NativeResult<&mut NodeState> {
        self.nodes
            .get_mut(node.0 as usize)
            .ok_or_else(|| NativeError::new(op, format!("unknown node {}", node.0)))
    }

    fn check(&mut self, op: &'static str) -> NativeResult<()> {
        if self.fail_on == Some(op) {
            self.fail_on = None;
            return Err(NativeError::new(op, "rejected by stub"));
        }
        Ok(())
    }

    fn record(&self, call: NativeCall) {
        self.calls.borrow_mut().push(call);
    }

    /// Unlink `child` from its current parent, if any
    fn detach(&mut self, child: StubNode) {
        let Some(parent) = self.node(child).and_then(|state| state.parent) else {
            return;
        };
        if let Some(state) = self.nodes.get_mut(parent.0 as usize) {
            state.children.retain(|c| *c != child);
        }
        if let Some(state) = self.nodes.get_mut(child.0 as usize) {
            state.parent = None;
        }
    }

    fn attach(
        &mut self,
        op: &'static str,
        parent: StubNode,
        index: Option<usize>,
        child: StubNode,
    ) -> NativeResult<()> {
        self.node_mut(op, child)?;
        if parent == child {
            return Err(NativeError::new(op, "node cannot contain itself"));
        }
        self.detach(child);
        let state = self.node_mut(op, parent)?;
        match index {
            Some(index) if index > state.children.len() => {
                return Err(NativeError::new(
                    op,
                    format!("index {index} out of range for {} children", state.children.len()),
                ));
            }
            Some(index) => state.children.insert(index, child),
            None => state.children.push(child),
        }
        self.node_mut(op, child)?.parent = Some(parent);
        Ok(())
    }
}

impl Default for StubToolkit {
    fn default() -> Self {
        Self::new()
    }
}

impl Toolkit for StubToolkit {
    type Node = StubNode;

    fn create_node(&mut self, kind: ElementKind) -> NativeResult<StubNode> {
        self.check("create_node")?;
        let node = StubNode(self.nodes.len() as u32);
        self.nodes.push(NodeState {
            kind,
            parent: None,
            children: Vec::new(),
            styles: BTreeMap::new(),
            classes: BTreeSet::new(),
            fields: BTreeMap::new(),
            listeners: Vec::new(),
        });
        self.record(NativeCall::CreateNode { node, kind });
        Ok(node)
    }

    fn add_child(&mut self, parent: &StubNode, child: &StubNode) -> NativeResult<()> {
        self.check("add_child")?;
        self.attach("add_child", *parent, None, *child)?;
        self.record(NativeCall::AddChild {
            parent: *parent,
            child: *child,
        });
        Ok(())
    }

    fn insert_child(
        &mut self,
        parent: &StubNode,
        index: usize,
        child: &StubNode,
    ) -> NativeResult<()> {
        self.check("insert_child")?;
        self.attach("insert_child", *parent, Some(index), *child)?;
        self.record(NativeCall::InsertChild {
            parent: *parent,
            index,
            child: *child,
        });
        Ok(())
    }

    fn remove_child(&mut self, parent: &StubNode, child: &StubNode) -> NativeResult<()> {
        self.check("remove_child")?;
        if self.parent(*child) != Some(*parent) {
            return Err(NativeError::new("remove_child", "node is not a child of parent"));
        }
        self.detach(*child);
        self.record(NativeCall::RemoveChild {
            parent: *parent,
            child: *child,
        });
        Ok(())
    }

    fn remove_child_at(&mut self, parent: &StubNode, index: usize) -> NativeResult<()> {
        self.check("remove_child_at")?;
        let state = self.node_mut("remove_child_at", *parent)?;
        if index >= state.children.len() {
            return Err(NativeError::new("remove_child_at", format!("index {index} out of range")));
        }
        let child = state.children.remove(index);
        self.node_mut("remove_child_at", child)?.parent = None;
        self.record(NativeCall::RemoveChildAt {
            parent: *parent,
            index,
        });
        Ok(())
    }

    fn index_of(&self, parent: &StubNode, child: &StubNode) -> Option<usize> {
        self.node(*parent)?.children.iter().position(|c| c == child)
    }

    fn clear_children(&mut self, parent: &StubNode) -> NativeResult<()> {
        self.check("clear_children")?;
        let children = std::mem::take(&mut self.node_mut("clear_children", *parent)?.children);
        for child in children {
            if let Some(state) = self.nodes.get_mut(child.0 as usize) {
                state.parent = None;
            }
        }
        self.record(NativeCall::ClearChildren { parent: *parent });
        Ok(())
    }

    fn set_style(&mut self, node: &StubNode, key: &str, value: &StyleValue) -> NativeResult<()> {
        self.check("set_style")?;
        self.node_mut("set_style", *node)?
            .styles
            .insert(key.to_string(), value.clone());
        self.record(NativeCall::SetStyle {
            node: *node,
            key: key.to_string(),
            value: value.clone(),
        });
        Ok(())
    }

    fn unset_style(&mut self, node: &StubNode, key: &str) -> NativeResult<()> {
        self.check("unset_style")?;
        self.node_mut("unset_style", *node)?.styles.remove(key);
        self.record(NativeCall::UnsetStyle {
            node: *node,
            key: key.to_string(),
        });
        Ok(())
    }

    fn add_class(&mut self, node: &StubNode, class: &str) -> NativeResult<()> {
        self.check("add_class")?;
        self.node_mut("add_class", *node)?
            .classes
            .insert(class.to_string());
        self.record(NativeCall::AddClass {
            node: *node,
            class: class.to_string(),
        });
        Ok(())
    }

    fn remove_class(&mut self, node: &StubNode, class: &str) -> NativeResult<()> {
        self.check("remove_class")?;
        self.node_mut("remove_class", *node)?.classes.remove(class);
        self.record(NativeCall::RemoveClass {
            node: *node,
            class: class.to_string(),
        });
        Ok(())
    }

    fn resolve_enum(&self, table: EnumTable, name: &str) -> NativeResult<i32> {
        table
            .constants()
            .iter()
            .position(|constant| constant.eq_ignore_ascii_case(name))
            .map(|index| index as i32)
            .ok_or_else(|| {
                NativeError::new("resolve_enum", format!("{name:?} is not a {table:?} constant"))
            })
    }

    fn set_field(&mut self, node: &StubNode, field: Field, value: FieldValue) -> NativeResult<()> {
        self.check("set_field")?;
        self.node_mut("set_field", *node)?
            .fields
            .insert(field, value.clone());
        self.record(NativeCall::SetField {
            node: *node,
            field,
            value,
        });
        Ok(())
    }

    fn add_listener(
        &mut self,
        node: &StubNode,
        event: EventType,
        handler: &Handler,
    ) -> NativeResult<()> {
        self.check("add_listener")?;
        let state = self.node_mut("add_listener", *node)?;
        if !state
            .listeners
            .iter()
            .any(|(ty, h)| *ty == event && h.same(handler))
        {
            state.listeners.push((event, handler.clone()));
        }
        self.record(NativeCall::AddListener {
            node: *node,
            event,
            handler: handler.clone(),
        });
        Ok(())
    }

    fn remove_listener(
        &mut self,
        node: &StubNode,
        event: EventType,
        handler: &Handler,
    ) -> NativeResult<()> {
        self.check("remove_listener")?;
        self.node_mut("remove_listener", *node)?
            .listeners
            .retain(|(ty, h)| !(*ty == event && h.same(handler)));
        self.record(NativeCall::RemoveListener {
            node: *node,
            event,
            handler: handler.clone(),
        });
        Ok(())
    }

    fn remove_all_listeners(&mut self, node: &StubNode) -> NativeResult<()> {
        self.check("remove_all_listeners")?;
        self.node_mut("remove_all_listeners", *node)?.listeners.clear();
        self.record(NativeCall::RemoveAllListeners { node: *node });
        Ok(())
    }
}
