//! In-memory [`LayoutHost`] for tests.
//!
//! `FakeHost` holds child lists, geometry and keys in plain maps and records
//! every style write so tests can assert exactly what the engines wrote.
//! Geometry reads and style writes are also logged in call order.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::animation::types::{ElementKey, GeometryRecord, NodeId};
use crate::host::{LayoutHost, StyleWrite};

/// One layout access, in the order the engine made it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostAccess {
    Read(NodeId),
    Write(NodeId),
}

#[derive(Debug, Default)]
pub struct FakeHost {
    children: HashMap<NodeId, Vec<NodeId>>,
    geometry: HashMap<NodeId, GeometryRecord>,
    keys: HashMap<NodeId, ElementKey>,
    writes: Vec<(NodeId, StyleWrite)>,
    // `geometry` takes `&self`.
    accesses: RefCell<Vec<HostAccess>>,
    next_node: u64,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate(&mut self) -> NodeId {
        self.next_node += 1;
        NodeId(self.next_node)
    }

    /// Mount an empty container laid out at `geometry`.
    pub fn add_container(&mut self, geometry: GeometryRecord) -> NodeId {
        let node = self.allocate();
        self.children.insert(node, Vec::new());
        self.geometry.insert(node, geometry);
        node
    }

    /// Append a child to `container`. `key` of `None` mounts an unkeyed node.
    pub fn add_child(
        &mut self,
        container: NodeId,
        key: Option<&str>,
        geometry: GeometryRecord,
    ) -> NodeId {
        let node = self.allocate();
        self.geometry.insert(node, geometry);
        if let Some(key) = key {
            self.keys.insert(node, ElementKey::from(key));
        }
        self.children.entry(container).or_default().push(node);
        node
    }

    pub fn set_geometry(&mut self, node: NodeId, geometry: GeometryRecord) {
        self.geometry.insert(node, geometry);
    }

    /// Replace the child order of `container`.
    pub fn set_children(&mut self, container: NodeId, children: Vec<NodeId>) {
        self.children.insert(container, children);
    }

    /// Remove `node` from every child list and forget its geometry.
    pub fn unmount(&mut self, node: NodeId) {
        self.children.remove(&node);
        self.geometry.remove(&node);
        for list in self.children.values_mut() {
            list.retain(|child| *child != node);
        }
    }

    pub fn writes(&self) -> &[(NodeId, StyleWrite)] {
        &self.writes
    }

    pub fn writes_for(&self, node: NodeId) -> Vec<&StyleWrite> {
        self.writes
            .iter()
            .filter(|(target, _)| *target == node)
            .map(|(_, write)| write)
            .collect()
    }

    pub fn last_write(&self, node: NodeId) -> Option<&StyleWrite> {
        self.writes
            .iter()
            .rev()
            .find(|(target, _)| *target == node)
            .map(|(_, write)| write)
    }

    /// Geometry reads and style writes since the last `clear_writes`.
    pub fn accesses(&self) -> Vec<HostAccess> {
        self.accesses.borrow().clone()
    }

    /// Forget recorded writes and the access log.
    pub fn clear_writes(&mut self) {
        self.writes.clear();
        self.accesses.get_mut().clear();
    }
}

impl LayoutHost for FakeHost {
    fn children(&self, container: NodeId) -> Option<Vec<NodeId>> {
        self.children.get(&container).cloned()
    }

    fn geometry(&self, node: NodeId) -> Option<GeometryRecord> {
        self.accesses.borrow_mut().push(HostAccess::Read(node));
        self.geometry.get(&node).copied()
    }

    fn element_key(&self, node: NodeId) -> Option<ElementKey> {
        self.keys.get(&node).cloned()
    }

    fn apply_style(&mut self, node: NodeId, style: &StyleWrite) {
        self.accesses.get_mut().push(HostAccess::Write(node));
        self.writes.push((node, style.clone()));
    }
}
