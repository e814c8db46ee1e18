//! Executes reconciler mutations against a native toolkit.
//!
//! Every entry point runs synchronously and issues its native calls in the
//! order requested. Native errors propagate unmodified.

mod commit;
mod container;

pub use container::ContainerId;

use crate::config::AdapterConfig;
use crate::error::{AdapterError, Result};
use crate::instance::{ElementKind, Instance, InstanceArena, InstanceId, PropValue, Props};
use crate::priority::{self, UpdatePriority};
use crate::scheduler::{HostScheduler, LocalScheduler, Task, TimeoutId};
use crate::style::{StyleValue, parse_style_value};
use crate::toolkit::{Field, FieldValue, Toolkit};
use commit::commit_props;
use container::ContainerRegistry;
use std::time::Duration;
use tracing::{debug, warn};

const DISPLAY: &str = "display";

/// Retained-tree mutation adapter over a native toolkit
pub struct Adapter<T: Toolkit, S: HostScheduler = LocalScheduler> {
    toolkit: T,
    scheduler: S,
    instances: InstanceArena<T::Node>,
    containers: ContainerRegistry<T::Node>,
    config: AdapterConfig,
}

impl<T: Toolkit> Adapter<T> {
    pub fn new(toolkit: T) -> Self {
        Self::with_config(toolkit, AdapterConfig::default())
    }

    pub fn with_config(toolkit: T, config: AdapterConfig) -> Self {
        Self::with_scheduler(toolkit, LocalScheduler::new(), config)
    }
}

impl<T: Toolkit, S: HostScheduler> Adapter<T, S> {
    pub fn with_scheduler(toolkit: T, scheduler: S, config: AdapterConfig) -> Self {
        Self {
            toolkit,
            scheduler,
            instances: InstanceArena::new(),
            containers: ContainerRegistry::new(),
            config,
        }
    }

    pub fn toolkit(&self) -> &T {
        &self.toolkit
    }

    pub fn toolkit_mut(&mut self) -> &mut T {
        &mut self.toolkit
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    pub fn instance(&self, id: InstanceId) -> Option<&Instance<T::Node>> {
        self.instances.get(id)
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    /// Native node behind an instance
    pub fn node(&self, id: InstanceId) -> Result<&T::Node> {
        self.instances
            .get(id)
            .map(|instance| &instance.node)
            .ok_or(AdapterError::UnknownInstance(id))
    }

    /// Instance wrapping `node`, for resolving native event targets
    pub fn instance_for_node(&self, node: &T::Node) -> Option<InstanceId> {
        self.instances.find_by_node(node)
    }

    // ---- containers ----

    /// Register `node` as a container root. The same node always maps to
    /// the same container, so re-rendering reuses the root.
    pub fn container(&mut self, node: T::Node) -> ContainerId {
        let (id, created) = self.containers.register(node);
        if created {
            debug!(container = %id, "container root created");
        }
        id
    }

    /// Forget a container after its tree has been unmounted
    pub fn release_container(&mut self, id: ContainerId) -> Result<T::Node> {
        let node = self
            .containers
            .release(id)
            .ok_or(AdapterError::UnknownContainer(id))?;
        debug!(container = %id, "container root released");
        Ok(node)
    }

    pub fn container_node(&self, id: ContainerId) -> Result<&T::Node> {
        self.containers
            .get(id)
            .ok_or(AdapterError::UnknownContainer(id))
    }

    // ---- creation ----

    /// Build the native node for `tag` and apply `props` to it.
    ///
    /// Unknown tags fail before anything native is created.
    pub fn create_instance(&mut self, tag: &str, props: Props) -> Result<InstanceId> {
        let kind = ElementKind::from_tag(tag)
            .ok_or_else(|| AdapterError::UnknownElementType(tag.to_string()))?;
        let node = self.toolkit.create_node(kind)?;

        let mut instance = Instance::new(node, kind, Props::new());
        commit_props(&mut self.toolkit, &self.config, &mut instance, props)?;

        let id = self.instances.insert(instance);
        debug!(instance = %id, tag, "instance created");
        Ok(id)
    }

    pub fn create_text_instance(&mut self, text: &str) -> Result<InstanceId> {
        let node = self.toolkit.create_node(ElementKind::RawText)?;
        self.toolkit
            .set_field(&node, Field::Text, FieldValue::Text(text.into()))?;

        let props = Props::new().attr("text", text);
        let id = self
            .instances
            .insert(Instance::new(node, ElementKind::RawText, props));
        debug!(instance = %id, "text instance created");
        Ok(id)
    }

    // ---- structural mutations ----

    pub fn append_initial_child(&mut self, parent: InstanceId, child: InstanceId) -> Result<()> {
        self.append_child(parent, child)
    }

    pub fn append_child(&mut self, parent: InstanceId, child: InstanceId) -> Result<()> {
        let parent_node = self.node(parent)?.clone();
        let child_node = self.node(child)?.clone();
        self.toolkit.add_child(&parent_node, &child_node)?;
        debug!(parent = %parent, child = %child, "child appended");
        Ok(())
    }

    pub fn append_child_to_container(
        &mut self,
        container: ContainerId,
        child: InstanceId,
    ) -> Result<()> {
        let container_node = self.container_node(container)?.clone();
        let child_node = self.node(child)?.clone();
        self.toolkit.add_child(&container_node, &child_node)?;
        debug!(container = %container, child = %child, "child appended to container");
        Ok(())
    }

    pub fn insert_before(
        &mut self,
        parent: InstanceId,
        child: InstanceId,
        before: InstanceId,
    ) -> Result<()> {
        let parent_node = self.node(parent)?.clone();
        self.insert_node_before(&parent_node, child, before)?;
        debug!(parent = %parent, child = %child, before = %before, "child inserted");
        Ok(())
    }

    pub fn insert_in_container_before(
        &mut self,
        container: ContainerId,
        child: InstanceId,
        before: InstanceId,
    ) -> Result<()> {
        let container_node = self.container_node(container)?.clone();
        self.insert_node_before(&container_node, child, before)?;
        debug!(
            container = %container,
            child = %child,
            before = %before,
            "child inserted in container"
        );
        Ok(())
    }

    fn insert_node_before(
        &mut self,
        parent: &T::Node,
        child: InstanceId,
        before: InstanceId,
    ) -> Result<()> {
        let child_node = self.node(child)?.clone();
        let before_node = self.node(before)?.clone();

        // a move within the same parent: detach first so indices line up
        if let Some(current) = self.toolkit.index_of(parent, &child_node) {
            self.toolkit.remove_child_at(parent, current)?;
        }

        match self.toolkit.index_of(parent, &before_node) {
            Some(index) => self.toolkit.insert_child(parent, index, &child_node)?,
            None => {
                warn!(child = %child, before = %before, "sibling not attached, appending instead");
                self.toolkit.add_child(parent, &child_node)?;
            }
        }
        Ok(())
    }

    pub fn remove_child(&mut self, parent: InstanceId, child: InstanceId) -> Result<()> {
        let parent_node = self.node(parent)?.clone();
        self.remove_node_from(&parent_node, child)?;
        debug!(parent = %parent, child = %child, "child removed");
        Ok(())
    }

    pub fn remove_child_from_container(
        &mut self,
        container: ContainerId,
        child: InstanceId,
    ) -> Result<()> {
        let container_node = self.container_node(container)?.clone();
        self.remove_node_from(&container_node, child)?;
        debug!(container = %container, child = %child, "child removed from container");
        Ok(())
    }

    /// Listener cleanup always precedes the native detach
    fn remove_node_from(&mut self, parent: &T::Node, child: InstanceId) -> Result<()> {
        let instance = self
            .instances
            .get_mut(child)
            .ok_or(AdapterError::UnknownInstance(child))?;
        instance.handlers.clear(&mut self.toolkit, &instance.node)?;
        self.toolkit.remove_child(parent, &instance.node)?;
        Ok(())
    }

    /// Remove every child of a container in one native call. Listeners are
    /// left to the toolkit once the nodes are detached.
    pub fn clear_container(&mut self, container: ContainerId) -> Result<()> {
        let container_node = self.container_node(container)?.clone();
        self.toolkit.clear_children(&container_node)?;
        debug!(container = %container, "container cleared");
        Ok(())
    }

    /// Drop adapter bookkeeping for an instance the reconciler deleted
    pub fn detach_deleted_instance(&mut self, id: InstanceId) -> Result<()> {
        self.instances
            .remove(id)
            .ok_or(AdapterError::UnknownInstance(id))?;
        debug!(instance = %id, "instance detached");
        Ok(())
    }

    // ---- visibility ----

    pub fn hide_instance(&mut self, id: InstanceId) -> Result<()> {
        let node = self.node(id)?.clone();
        let hidden = StyleValue::Text(self.config.hidden_display.clone());
        self.toolkit.set_style(&node, DISPLAY, &hidden)?;
        debug!(instance = %id, "instance hidden");
        Ok(())
    }

    /// Restore the instance's own `display`, or unset it when its style has none
    pub fn unhide_instance(&mut self, id: InstanceId) -> Result<()> {
        let instance = self
            .instances
            .get(id)
            .ok_or(AdapterError::UnknownInstance(id))?;
        let node = instance.node.clone();
        let own_display = instance
            .props
            .style
            .as_ref()
            .and_then(|style| style.get(DISPLAY))
            .and_then(|input| parse_style_value(DISPLAY, input));

        match own_display {
            Some(value) => self.toolkit.set_style(&node, DISPLAY, &value)?,
            None => self.toolkit.unset_style(&node, DISPLAY)?,
        }
        debug!(instance = %id, "instance unhidden");
        Ok(())
    }

    pub fn hide_text_instance(&mut self, id: InstanceId) -> Result<()> {
        self.hide_instance(id)
    }

    pub fn unhide_text_instance(&mut self, id: InstanceId) -> Result<()> {
        let node = self.node(id)?.clone();
        self.toolkit.unset_style(&node, DISPLAY)?;
        debug!(instance = %id, "text instance unhidden");
        Ok(())
    }

    // ---- updates ----

    /// Apply `next` against the instance's last committed props
    pub fn commit_update(&mut self, id: InstanceId, next: Props) -> Result<()> {
        let instance = self
            .instances
            .get_mut(id)
            .ok_or(AdapterError::UnknownInstance(id))?;
        commit_props(&mut self.toolkit, &self.config, instance, next)?;
        debug!(instance = %id, "update committed");
        Ok(())
    }

    pub fn commit_text_update(&mut self, id: InstanceId, text: &str) -> Result<()> {
        let instance = self
            .instances
            .get_mut(id)
            .ok_or(AdapterError::UnknownInstance(id))?;
        self.toolkit
            .set_field(&instance.node, Field::Text, FieldValue::Text(text.into()))?;
        instance
            .props
            .attrs
            .insert("text".into(), PropValue::Text(text.into()));
        debug!(instance = %id, "text committed");
        Ok(())
    }

    // ---- scheduling ----

    pub fn schedule_timeout(&mut self, task: Task, delay: Duration) -> TimeoutId {
        self.scheduler.set_timeout(task, delay)
    }

    pub fn cancel_timeout(&mut self, id: TimeoutId) {
        self.scheduler.clear_timeout(id);
    }

    pub fn schedule_microtask(&mut self, task: Task) {
        self.scheduler.queue_microtask(task);
    }

    pub fn current_update_priority(&self) -> UpdatePriority {
        priority::current_update_priority()
    }

    pub fn set_current_update_priority(&self, priority: UpdatePriority) {
        priority::set_current_update_priority(priority);
    }

    pub fn resolve_update_priority(&self) -> UpdatePriority {
        priority::resolve_update_priority()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{EventType, Handler};
    use crate::style::{Length, Style};
    use crate::toolkit::{NativeCall, StubNode, StubToolkit};
    use std::rc::Rc;

    fn adapter() -> Adapter<StubToolkit> {
        Adapter::new(StubToolkit::new())
    }

    fn root(adapter: &mut Adapter<StubToolkit>) -> (ContainerId, StubNode) {
        let node = adapter.toolkit_mut().create_node(ElementKind::View).unwrap();
        (adapter.container(node), node)
    }

    fn view(adapter: &mut Adapter<StubToolkit>) -> InstanceId {
        adapter.create_instance("view", Props::new()).unwrap()
    }

    fn node_of(adapter: &Adapter<StubToolkit>, id: InstanceId) -> StubNode {
        *adapter.node(id).unwrap()
    }

    #[test]
    fn test_unknown_tag_creates_nothing() {
        let mut adapter = adapter();
        let err = adapter.create_instance("canvas", Props::new()).unwrap_err();

        assert!(matches!(err, AdapterError::UnknownElementType(tag) if tag == "canvas"));
        assert_eq!(adapter.toolkit().call_count(), 0);
        assert_eq!(adapter.instance_count(), 0);
    }

    #[test]
    fn test_create_text_instance() {
        let mut adapter = adapter();
        let id = adapter.create_text_instance("hello").unwrap();
        let node = node_of(&adapter, id);

        assert_eq!(adapter.toolkit().kind(node), Some(ElementKind::RawText));
        assert_eq!(
            adapter.toolkit().field(node, Field::Text),
            Some(FieldValue::Text("hello".into()))
        );

        adapter.commit_text_update(id, "bye").unwrap();
        assert_eq!(
            adapter.toolkit().field(node, Field::Text),
            Some(FieldValue::Text("bye".into()))
        );
    }

    #[test]
    fn test_append_and_insert_order() {
        let mut adapter = adapter();
        let parent = view(&mut adapter);
        let a = view(&mut adapter);
        let b = view(&mut adapter);
        let c = view(&mut adapter);

        adapter.append_initial_child(parent, a).unwrap();
        adapter.append_child(parent, c).unwrap();
        adapter.insert_before(parent, b, c).unwrap();

        let parent_node = node_of(&adapter, parent);
        assert_eq!(
            adapter.toolkit().children(parent_node),
            vec![
                node_of(&adapter, a),
                node_of(&adapter, b),
                node_of(&adapter, c)
            ]
        );
    }

    #[test]
    fn test_insert_before_moves_within_parent() {
        let mut adapter = adapter();
        let parent = view(&mut adapter);
        let a = view(&mut adapter);
        let b = view(&mut adapter);
        let c = view(&mut adapter);
        for child in [a, b, c] {
            adapter.append_child(parent, child).unwrap();
        }

        adapter.insert_before(parent, c, a).unwrap();

        let parent_node = node_of(&adapter, parent);
        assert_eq!(
            adapter.toolkit().children(parent_node),
            vec![
                node_of(&adapter, c),
                node_of(&adapter, a),
                node_of(&adapter, b)
            ]
        );
    }

    #[test]
    fn test_insert_before_detached_sibling_appends() {
        let mut adapter = adapter();
        let parent = view(&mut adapter);
        let attached = view(&mut adapter);
        let detached = view(&mut adapter);
        let child = view(&mut adapter);
        adapter.append_child(parent, attached).unwrap();
        adapter.toolkit_mut().take_calls();

        adapter.insert_before(parent, child, detached).unwrap();

        let parent_node = node_of(&adapter, parent);
        let child_node = node_of(&adapter, child);
        assert_eq!(
            adapter.toolkit_mut().take_calls(),
            vec![NativeCall::AddChild {
                parent: parent_node,
                child: child_node,
            }]
        );
        assert_eq!(
            adapter.toolkit().children(parent_node).last(),
            Some(&child_node)
        );
    }

    #[test]
    fn test_removal_deregisters_before_detach() {
        let mut adapter = adapter();
        let parent = view(&mut adapter);
        let props = Props::new()
            .on(EventType::Click, Handler::new(|_| {}))
            .on(EventType::PointerDown, Handler::new(|_| {}));
        let child = adapter.create_instance("button", props).unwrap();
        adapter.append_child(parent, child).unwrap();

        let child_node = node_of(&adapter, child);
        assert_eq!(adapter.toolkit().listener_count(child_node), 2);
        adapter.toolkit_mut().take_calls();

        adapter.remove_child(parent, child).unwrap();

        assert_eq!(
            adapter.toolkit_mut().take_calls(),
            vec![
                NativeCall::RemoveAllListeners { node: child_node },
                NativeCall::RemoveChild {
                    parent: node_of(&adapter, parent),
                    child: child_node,
                },
            ]
        );
        assert_eq!(adapter.toolkit().listener_count(child_node), 0);
        assert!(adapter.instance(child).unwrap().handlers.is_empty());
    }

    #[test]
    fn test_reinserted_instance_gets_listeners_back() {
        let mut adapter = adapter();
        let (container, _) = root(&mut adapter);
        let click = Handler::new(|_| {});
        let props = Props::new().on(EventType::Click, click.clone());
        let child = adapter.create_instance("button", props.clone()).unwrap();

        adapter.append_child_to_container(container, child).unwrap();
        adapter.remove_child_from_container(container, child).unwrap();
        adapter.append_child_to_container(container, child).unwrap();
        adapter.commit_update(child, props).unwrap();

        assert_eq!(adapter.toolkit().listener_count(node_of(&adapter, child)), 1);
    }

    #[test]
    fn test_clear_container_is_one_call() {
        let mut adapter = adapter();
        let (container, root_node) = root(&mut adapter);
        let a = view(&mut adapter);
        let b = adapter.create_text_instance("b").unwrap();
        adapter.append_child_to_container(container, a).unwrap();
        adapter.append_child_to_container(container, b).unwrap();
        adapter.toolkit_mut().take_calls();

        adapter.clear_container(container).unwrap();

        assert_eq!(
            adapter.toolkit_mut().take_calls(),
            vec![NativeCall::ClearChildren { parent: root_node }]
        );
        assert!(adapter.toolkit().children(root_node).is_empty());
    }

    #[test]
    fn test_container_reuse_and_release() {
        let mut adapter = adapter();
        let (first, node) = root(&mut adapter);
        assert_eq!(adapter.container(node), first);

        assert_eq!(adapter.release_container(first).unwrap(), node);
        assert!(matches!(
            adapter.clear_container(first),
            Err(AdapterError::UnknownContainer(id)) if id == first
        ));
    }

    #[test]
    fn test_hide_and_unhide_only_touch_display() {
        let mut adapter = adapter();
        let style = Rc::new(Style::new().set("width", 10));
        let id = adapter
            .create_instance("view", Props::new().with_style(style))
            .unwrap();
        let node = node_of(&adapter, id);
        let applied = adapter.instance(id).unwrap().applied_style_keys.clone();
        adapter.toolkit_mut().take_calls();

        adapter.hide_instance(id).unwrap();
        assert_eq!(
            adapter.toolkit().style(node, "display"),
            Some(StyleValue::Text("none".into()))
        );

        adapter.unhide_instance(id).unwrap();
        assert_eq!(adapter.toolkit().style(node, "display"), None);
        assert_eq!(
            adapter.toolkit().style(node, "width"),
            Some(StyleValue::Length(Length::Px(10.0)))
        );
        assert_eq!(adapter.instance(id).unwrap().applied_style_keys, applied);
        assert_eq!(adapter.toolkit_mut().take_calls().len(), 2);
    }

    #[test]
    fn test_unhide_restores_own_display() {
        let mut adapter = Adapter::with_config(
            StubToolkit::new(),
            AdapterConfig::new().with_hidden_display("hidden"),
        );
        let style = Rc::new(Style::new().set("display", "flex"));
        let id = adapter
            .create_instance("view", Props::new().with_style(style))
            .unwrap();
        let node = node_of(&adapter, id);

        adapter.hide_instance(id).unwrap();
        assert_eq!(
            adapter.toolkit().style(node, "display"),
            Some(StyleValue::Text("hidden".into()))
        );

        adapter.unhide_instance(id).unwrap();
        assert_eq!(
            adapter.toolkit().style(node, "display"),
            Some(StyleValue::Text("flex".into()))
        );
    }

    #[test]
    fn test_detach_frees_bookkeeping() {
        let mut adapter = adapter();
        let id = view(&mut adapter);
        let node = node_of(&adapter, id);
        assert_eq!(adapter.instance_for_node(&node), Some(id));

        adapter.detach_deleted_instance(id).unwrap();
        assert_eq!(adapter.instance_for_node(&node), None);
        assert!(matches!(
            adapter.append_child(id, id),
            Err(AdapterError::UnknownInstance(_))
        ));
    }

    #[test]
    fn test_native_errors_propagate_unmodified() {
        let mut adapter = adapter();
        let parent = view(&mut adapter);
        let child = view(&mut adapter);

        adapter.toolkit_mut().fail_on("add_child");
        let err = adapter.append_child(parent, child).unwrap_err();
        match err {
            AdapterError::Native(native) => {
                assert_eq!(native.op, "add_child");
                assert_eq!(native.message, "rejected by stub");
            }
            other => panic!("expected a native error, got {other:?}"),
        }
    }

    #[test]
    fn test_scheduling_passes_through() {
        let mut adapter = adapter();
        let ran = Rc::new(std::cell::Cell::new(false));
        let flag = Rc::clone(&ran);

        adapter.schedule_microtask(Box::new(move || flag.set(true)));
        assert_eq!(adapter.scheduler().pending_microtasks(), 1);
        assert_eq!(adapter.scheduler().run_microtasks(), 1);
        assert!(ran.get());

        let id = adapter.schedule_timeout(Box::new(|| {}), Duration::from_millis(5));
        adapter.cancel_timeout(id);
        assert_eq!(adapter.scheduler().pending_timeouts(), 0);
    }
}
