use std::collections::HashMap;

use wlmaker_common::{NodeId, ToolkitError};

use super::{SceneGraph, SceneHit};
use crate::texture::Texture;

#[derive(Debug)]
enum NodeKind {
    Tree,
    Buffer {
        texture: Option<Texture>,
        dest_size: Option<(u32, u32)>,
    },
}

#[derive(Debug)]
struct Node {
    parent: Option<NodeId>,
    /// Bottom to top.
    children: Vec<NodeId>,
    x: i32,
    y: i32,
    enabled: bool,
    kind: NodeKind,
}

impl Node {
    fn new(parent: Option<NodeId>, kind: NodeKind) -> Self {
        Self {
            parent,
            children: Vec::new(),
            x: 0,
            y: 0,
            enabled: true,
            kind,
        }
    }

    fn buffer_size(&self) -> Option<(u32, u32)> {
        match &self.kind {
            NodeKind::Tree => None,
            NodeKind::Buffer {
                dest_size: Some(size),
                ..
            } => Some(*size),
            NodeKind::Buffer {
                texture: Some(t), ..
            } => Some((t.width(), t.height())),
            NodeKind::Buffer { .. } => None,
        }
    }
}

/// Scene graph held entirely in memory.
#[derive(Debug)]
pub struct MemoryScene {
    nodes: HashMap<NodeId, Node>,
    root: NodeId,
    next_id: u32,
    node_limit: Option<usize>,
}

impl MemoryScene {
    pub fn new() -> Self {
        let root = NodeId(1);
        let mut nodes = HashMap::new();
        nodes.insert(root, Node::new(None, NodeKind::Tree));
        Self {
            nodes,
            root,
            next_id: 2,
            node_limit: None,
        }
    }

    /// A scene that refuses to grow beyond `limit` nodes, root included.
    /// Creation beyond that fails, which exercises unwinding paths.
    pub fn with_node_limit(limit: usize) -> Self {
        let mut scene = Self::new();
        scene.node_limit = Some(limit);
        scene
    }

    pub fn set_node_limit(&mut self, limit: Option<usize>) {
        self.node_limit = limit;
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Texture currently shown by a buffer node.
    pub fn texture(&self, node: NodeId) -> Option<&Texture> {
        match &self.nodes.get(&node)?.kind {
            NodeKind::Buffer { texture, .. } => texture.as_ref(),
            NodeKind::Tree => None,
        }
    }

    /// Children of `node`, bottom to top.
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(&node)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// True when `node` and all its ancestors are enabled.
    pub fn is_visible(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            match self.nodes.get(&id) {
                Some(n) if n.enabled => current = n.parent,
                _ => return false,
            }
        }
        true
    }

    fn insert(&mut self, parent: NodeId, kind: NodeKind, what: &'static str) -> Result<NodeId, ToolkitError> {
        if !self.nodes.contains_key(&parent) {
            return Err(ToolkitError::Creation {
                what,
                reason: format!("parent {parent} does not exist"),
            });
        }
        if let Some(limit) = self.node_limit {
            if self.nodes.len() >= limit {
                return Err(ToolkitError::Creation {
                    what,
                    reason: format!("scene node limit {limit} reached"),
                });
            }
        }
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, Node::new(Some(parent), kind));
        if let Some(p) = self.nodes.get_mut(&parent) {
            p.children.push(id);
        }
        Ok(id)
    }

    fn detach_from_parent(&mut self, node: NodeId) {
        let parent = self.nodes.get(&node).and_then(|n| n.parent);
        if let Some(p) = parent.and_then(|p| self.nodes.get_mut(&p)) {
            p.children.retain(|c| *c != node);
        }
    }

    fn hit(&self, node: NodeId, x: f64, y: f64) -> Option<SceneHit> {
        let n = self.nodes.get(&node)?;
        if !n.enabled {
            return None;
        }
        let lx = x - f64::from(n.x);
        let ly = y - f64::from(n.y);

        for child in n.children.iter().rev() {
            if let Some(hit) = self.hit(*child, lx, ly) {
                return Some(hit);
            }
        }

        let (w, h) = n.buffer_size()?;
        if lx >= 0.0 && ly >= 0.0 && lx < f64::from(w) && ly < f64::from(h) {
            Some(SceneHit {
                node,
                local_x: lx,
                local_y: ly,
            })
        } else {
            None
        }
    }
}

impl Default for MemoryScene {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph for MemoryScene {
    fn root(&self) -> NodeId {
        self.root
    }

    fn create_tree(&mut self, parent: NodeId) -> Result<NodeId, ToolkitError> {
        self.insert(parent, NodeKind::Tree, "scene tree")
    }

    fn create_buffer(
        &mut self,
        parent: NodeId,
        texture: Option<&Texture>,
    ) -> Result<NodeId, ToolkitError> {
        self.insert(
            parent,
            NodeKind::Buffer {
                texture: texture.cloned(),
                dest_size: None,
            },
            "scene buffer",
        )
    }

    fn destroy(&mut self, node: NodeId) {
        if node == self.root {
            tracing::warn!("refusing to destroy the scene root");
            return;
        }
        self.detach_from_parent(node);
        let mut pending = vec![node];
        while let Some(id) = pending.pop() {
            if let Some(n) = self.nodes.remove(&id) {
                pending.extend(n.children);
            }
        }
    }

    fn exists(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    fn set_position(&mut self, node: NodeId, x: i32, y: i32) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.x = x;
            n.y = y;
        }
    }

    fn position(&self, node: NodeId) -> Option<(i32, i32)> {
        self.nodes.get(&node).map(|n| (n.x, n.y))
    }

    fn absolute_position(&self, node: NodeId) -> Option<(i32, i32)> {
        let mut n = self.nodes.get(&node)?;
        let (mut x, mut y) = (n.x, n.y);
        while let Some(parent) = n.parent {
            n = self.nodes.get(&parent)?;
            x += n.x;
            y += n.y;
        }
        Some((x, y))
    }

    fn set_enabled(&mut self, node: NodeId, enabled: bool) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.enabled = enabled;
        }
    }

    fn is_enabled(&self, node: NodeId) -> bool {
        self.nodes.get(&node).is_some_and(|n| n.enabled)
    }

    fn set_buffer(&mut self, node: NodeId, texture: Option<&Texture>) {
        match self.nodes.get_mut(&node).map(|n| &mut n.kind) {
            Some(NodeKind::Buffer { texture: held, .. }) => *held = texture.cloned(),
            Some(NodeKind::Tree) => tracing::warn!(%node, "set_buffer on a tree node"),
            None => {}
        }
    }

    fn set_dest_size(&mut self, node: NodeId, width: u32, height: u32) {
        if let Some(NodeKind::Buffer { dest_size, .. }) = self.nodes.get_mut(&node).map(|n| &mut n.kind) {
            *dest_size = Some((width, height));
        }
    }

    fn reparent(&mut self, node: NodeId, new_parent: NodeId) {
        if node == self.root || !self.nodes.contains_key(&new_parent) {
            return;
        }
        // Refuse to create a cycle.
        let mut ancestor = Some(new_parent);
        while let Some(a) = ancestor {
            if a == node {
                tracing::warn!(%node, %new_parent, "reparent would create a cycle");
                return;
            }
            ancestor = self.nodes.get(&a).and_then(|n| n.parent);
        }
        self.detach_from_parent(node);
        if let Some(n) = self.nodes.get_mut(&node) {
            n.parent = Some(new_parent);
        }
        if let Some(p) = self.nodes.get_mut(&new_parent) {
            p.children.push(node);
        }
    }

    fn raise_to_top(&mut self, node: NodeId) {
        let parent = self.nodes.get(&node).and_then(|n| n.parent);
        if let Some(p) = parent.and_then(|p| self.nodes.get_mut(&p)) {
            p.children.retain(|c| *c != node);
            p.children.push(node);
        }
    }

    fn lower_to_bottom(&mut self, node: NodeId) {
        let parent = self.nodes.get(&node).and_then(|n| n.parent);
        if let Some(p) = parent.and_then(|p| self.nodes.get_mut(&p)) {
            p.children.retain(|c| *c != node);
            p.children.insert(0, node);
        }
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(&node).and_then(|n| n.parent)
    }

    fn node_at(&self, x: f64, y: f64) -> Option<SceneHit> {
        self.hit(self.root, x, y)
    }
}
