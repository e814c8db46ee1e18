use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// Handle to a registered container root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerId(pub(crate) u32);

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "container#{}", self.0)
    }
}

/// Native attachment points, at most one active root per native node
pub(crate) struct ContainerRegistry<N> {
    roots: Vec<Option<N>>,
    free_list: Vec<u32>,
    by_node: HashMap<N, ContainerId>,
}

impl<N: Clone + Eq + Hash> ContainerRegistry<N> {
    pub fn new() -> Self {
        Self {
            roots: Vec::new(),
            free_list: Vec::new(),
            by_node: HashMap::new(),
        }
    }

    /// Register `node`, or return the id it already has.
    /// The flag is true when a new root was created.
    pub fn register(&mut self, node: N) -> (ContainerId, bool) {
        if let Some(id) = self.by_node.get(&node) {
            return (*id, false);
        }

        let index = match self.free_list.pop() {
            Some(index) => index as usize,
            None => self.roots.len(),
        };
        let id = ContainerId(index as u32);
        self.by_node.insert(node.clone(), id);
        if index >= self.roots.len() {
            self.roots.push(Some(node));
        } else {
            self.roots[index] = Some(node);
        }
        (id, true)
    }

    pub fn get(&self, id: ContainerId) -> Option<&N> {
        self.roots.get(id.0 as usize)?.as_ref()
    }

    pub fn release(&mut self, id: ContainerId) -> Option<N> {
        let node = self.roots.get_mut(id.0 as usize)?.take()?;
        self.by_node.remove(&node);
        self.free_list.push(id.0);
        Some(node)
    }
}
