use super::Instance;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// Handle to an [`Instance`] owned by an [`InstanceArena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(pub(crate) u32);

impl InstanceId {
    pub fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Slot storage for instances, with slot reuse and a native-node index
pub struct InstanceArena<N> {
    slots: Vec<Option<Instance<N>>>,
    free_list: Vec<u32>,
    by_node: HashMap<N, InstanceId>,
}

impl<N: Clone + Eq + Hash> InstanceArena<N> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            by_node: HashMap::new(),
        }
    }

    pub fn insert(&mut self, instance: Instance<N>) -> InstanceId {
        let index = match self.free_list.pop() {
            Some(index) => index as usize,
            None => self.slots.len(),
        };
        let id = InstanceId(index as u32);
        self.by_node.insert(instance.node.clone(), id);

        if index >= self.slots.len() {
            self.slots.push(Some(instance));
        } else {
            self.slots[index] = Some(instance);
        }
        id
    }

    pub fn get(&self, id: InstanceId) -> Option<&Instance<N>> {
        self.slots.get(id.0 as usize)?.as_ref()
    }

    pub fn get_mut(&mut self, id: InstanceId) -> Option<&mut Instance<N>> {
        self.slots.get_mut(id.0 as usize)?.as_mut()
    }

    /// Free the slot; the id may be handed out again
    pub fn remove(&mut self, id: InstanceId) -> Option<Instance<N>> {
        let instance = self.slots.get_mut(id.0 as usize)?.take()?;
        self.by_node.remove(&instance.node);
        self.free_list.push(id.0);
        Some(instance)
    }

    pub fn find_by_node(&self, node: &N) -> Option<InstanceId> {
        self.by_node.get(node).copied()
    }

    pub fn len(&self) -> usize {
        self.by_node.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_node.is_empty()
    }
}

impl<N: Clone + Eq + Hash> Default for InstanceArena<N> {
    fn default() -> Self {
        Self::new()
    }
}
