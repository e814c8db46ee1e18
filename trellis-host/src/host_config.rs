//! The callback surface a reconciler drives.
//!
//! Mutation callbacks are required. Capabilities the adapter does not
//! support (hydration, persistence, suspended commits, singletons,
//! resources) have default bodies returning neutral values.

use crate::adapter::{Adapter, ContainerId};
use crate::error::Result;
use crate::instance::{InstanceId, Props};
use crate::priority::UpdatePriority;
use crate::scheduler::{HostScheduler, Task, TimeoutId};
use crate::toolkit::Toolkit;
use std::time::Duration;

/// Subscriber handed back when a commit has to wait for resources
pub type CommitReadySubscriber = Box<dyn FnOnce(Task)>;

/// Child parameters take `Self::Instance`; text instances convert into it,
/// so they can be attached, moved and removed like any other child.
pub trait HostConfig {
    type Instance: Copy;
    type TextInstance: Copy + Into<Self::Instance>;
    type Container: Copy;
    type PublicInstance;
    type HostContext: Default;
    type TimeoutHandle: Copy;

    fn create_instance(
        &mut self,
        tag: &str,
        props: Props,
        context: &Self::HostContext,
    ) -> Result<Self::Instance>;

    fn create_text_instance(
        &mut self,
        text: &str,
        context: &Self::HostContext,
    ) -> Result<Self::TextInstance>;

    fn append_initial_child(&mut self, parent: Self::Instance, child: Self::Instance)
    -> Result<()>;

    fn append_child(&mut self, parent: Self::Instance, child: Self::Instance) -> Result<()>;

    fn append_child_to_container(
        &mut self,
        container: Self::Container,
        child: Self::Instance,
    ) -> Result<()>;

    fn insert_before(
        &mut self,
        parent: Self::Instance,
        child: Self::Instance,
        before: Self::Instance,
    ) -> Result<()>;

    fn insert_in_container_before(
        &mut self,
        container: Self::Container,
        child: Self::Instance,
        before: Self::Instance,
    ) -> Result<()>;

    fn remove_child(&mut self, parent: Self::Instance, child: Self::Instance) -> Result<()>;

    fn remove_child_from_container(
        &mut self,
        container: Self::Container,
        child: Self::Instance,
    ) -> Result<()>;

    fn clear_container(&mut self, container: Self::Container) -> Result<()>;

    fn commit_update(&mut self, instance: Self::Instance, props: Props) -> Result<()>;

    fn commit_text_update(&mut self, instance: Self::TextInstance, text: &str) -> Result<()>;

    fn hide_instance(&mut self, instance: Self::Instance) -> Result<()>;

    fn unhide_instance(&mut self, instance: Self::Instance) -> Result<()>;

    fn hide_text_instance(&mut self, instance: Self::TextInstance) -> Result<()>;

    fn unhide_text_instance(&mut self, instance: Self::TextInstance) -> Result<()>;

    fn detach_deleted_instance(&mut self, instance: Self::Instance) -> Result<()>;

    fn get_public_instance(&self, instance: Self::Instance) -> Result<Self::PublicInstance>;

    fn get_instance_from_node(&self, node: &Self::PublicInstance) -> Option<Self::Instance>;

    fn get_current_update_priority(&self) -> UpdatePriority;

    fn set_current_update_priority(&mut self, priority: UpdatePriority);

    fn resolve_update_priority(&self) -> UpdatePriority;

    fn schedule_timeout(&mut self, task: Task, delay: Duration) -> Self::TimeoutHandle;

    fn cancel_timeout(&mut self, handle: Self::TimeoutHandle);

    fn schedule_microtask(&mut self, task: Task);

    // ---- capabilities ----

    fn supports_mutation(&self) -> bool {
        true
    }

    fn supports_persistence(&self) -> bool {
        false
    }

    fn supports_hydration(&self) -> bool {
        false
    }

    fn supports_microtasks(&self) -> bool {
        true
    }

    fn supports_singletons(&self) -> bool {
        false
    }

    fn supports_resources(&self) -> bool {
        false
    }

    fn is_primary_renderer(&self) -> bool {
        true
    }

    // ---- context ----

    fn get_root_host_context(&self, _container: Self::Container) -> Self::HostContext {
        Self::HostContext::default()
    }

    fn get_child_host_context(
        &self,
        _parent: &Self::HostContext,
        _tag: &str,
    ) -> Self::HostContext {
        Self::HostContext::default()
    }

    // ---- commit lifecycle ----

    fn should_set_text_content(&self, _tag: &str, _props: &Props) -> bool {
        false
    }

    fn finalize_initial_children(
        &mut self,
        _instance: Self::Instance,
        _tag: &str,
        _props: &Props,
    ) -> bool {
        false
    }

    /// Instance to restore focus to after the commit, if any
    fn prepare_for_commit(&mut self, _container: Self::Container) -> Option<Self::Instance> {
        None
    }

    fn reset_after_commit(&mut self, _container: Self::Container) {}

    fn commit_mount(&mut self, _instance: Self::Instance, _tag: &str, _props: &Props) {}

    fn reset_text_content(&mut self, _instance: Self::Instance) {}

    fn prepare_portal_mount(&mut self, _container: Self::Container) {}

    fn before_active_instance_blur(&mut self) {}

    fn after_active_instance_blur(&mut self) {}

    fn should_attempt_eager_transition(&self) -> bool {
        false
    }

    // ---- suspended commits ----

    fn may_suspend_commit(&self, _tag: &str, _props: &Props) -> bool {
        false
    }

    /// Whether the instance's resources are already loaded
    fn preload_instance(&self, _tag: &str, _props: &Props) -> bool {
        true
    }

    fn start_suspending_commit(&mut self) {}

    fn suspend_instance(&mut self, _tag: &str, _props: &Props) {}

    /// `None` when the commit can proceed immediately
    fn wait_for_commit_to_be_ready(&mut self) -> Option<CommitReadySubscriber> {
        None
    }
}

impl<T: Toolkit, S: HostScheduler> HostConfig for Adapter<T, S> {
    type Instance = InstanceId;
    type TextInstance = InstanceId;
    type Container = ContainerId;
    type PublicInstance = T::Node;
    type HostContext = ();
    type TimeoutHandle = TimeoutId;

    fn create_instance(&mut self, tag: &str, props: Props, _context: &()) -> Result<InstanceId> {
        Adapter::create_instance(self, tag, props)
    }

    fn create_text_instance(&mut self, text: &str, _context: &()) -> Result<InstanceId> {
        Adapter::create_text_instance(self, text)
    }

    fn append_initial_child(&mut self, parent: InstanceId, child: InstanceId) -> Result<()> {
        Adapter::append_initial_child(self, parent, child)
    }

    fn append_child(&mut self, parent: InstanceId, child: InstanceId) -> Result<()> {
        Adapter::append_child(self, parent, child)
    }

    fn append_child_to_container(
        &mut self,
        container: ContainerId,
        child: InstanceId,
    ) -> Result<()> {
        Adapter::append_child_to_container(self, container, child)
    }

    fn insert_before(
        &mut self,
        parent: InstanceId,
        child: InstanceId,
        before: InstanceId,
    ) -> Result<()> {
        Adapter::insert_before(self, parent, child, before)
    }

    fn insert_in_container_before(
        &mut self,
        container: ContainerId,
        child: InstanceId,
        before: InstanceId,
    ) -> Result<()> {
        Adapter::insert_in_container_before(self, container, child, before)
    }

    fn remove_child(&mut self, parent: InstanceId, child: InstanceId) -> Result<()> {
        Adapter::remove_child(self, parent, child)
    }

    fn remove_child_from_container(
        &mut self,
        container: ContainerId,
        child: InstanceId,
    ) -> Result<()> {
        Adapter::remove_child_from_container(self, container, child)
    }

    fn clear_container(&mut self, container: ContainerId) -> Result<()> {
        Adapter::clear_container(self, container)
    }

    fn commit_update(&mut self, instance: InstanceId, props: Props) -> Result<()> {
        Adapter::commit_update(self, instance, props)
    }

    fn commit_text_update(&mut self, instance: InstanceId, text: &str) -> Result<()> {
        Adapter::commit_text_update(self, instance, text)
    }

    fn hide_instance(&mut self, instance: InstanceId) -> Result<()> {
        Adapter::hide_instance(self, instance)
    }

    fn unhide_instance(&mut self, instance: InstanceId) -> Result<()> {
        Adapter::unhide_instance(self, instance)
    }

    fn hide_text_instance(&mut self, instance: InstanceId) -> Result<()> {
        Adapter::hide_text_instance(self, instance)
    }

    fn unhide_text_instance(&mut self, instance: InstanceId) -> Result<()> {
        Adapter::unhide_text_instance(self, instance)
    }

    fn detach_deleted_instance(&mut self, instance: InstanceId) -> Result<()> {
        Adapter::detach_deleted_instance(self, instance)
    }

    fn get_public_instance(&self, instance: InstanceId) -> Result<T::Node> {
        self.node(instance).cloned()
    }

    fn get_instance_from_node(&self, node: &T::Node) -> Option<InstanceId> {
        self.instance_for_node(node)
    }

    fn get_current_update_priority(&self) -> UpdatePriority {
        Adapter::current_update_priority(self)
    }

    fn set_current_update_priority(&mut self, priority: UpdatePriority) {
        Adapter::set_current_update_priority(self, priority)
    }

    fn resolve_update_priority(&self) -> UpdatePriority {
        Adapter::resolve_update_priority(self)
    }

    fn schedule_timeout(&mut self, task: Task, delay: Duration) -> TimeoutId {
        Adapter::schedule_timeout(self, task, delay)
    }

    fn cancel_timeout(&mut self, handle: TimeoutId) {
        Adapter::cancel_timeout(self, handle)
    }

    fn schedule_microtask(&mut self, task: Task) {
        Adapter::schedule_microtask(self, task)
    }
}
