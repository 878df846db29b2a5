//! Workspaces: named, layered containers of views.

mod layer;

pub use layer::Layer;

use wlmaker_common::{NodeId, ToolkitError, ViewId, WorkspaceId};

use crate::scene::SceneGraph;

/// One workspace. Holds the stacking order of its views per layer and
/// which view is activated. The views themselves live in the server.
#[derive(Debug)]
pub struct Workspace {
    id: WorkspaceId,
    name: String,
    index: usize,
    root: NodeId,
    layer_nodes: [NodeId; Layer::COUNT],
    /// Per layer, bottom to top.
    stacks: [Vec<ViewId>; Layer::COUNT],
    activated: Option<ViewId>,
    iconified: Vec<ViewId>,
    enabled: bool,
}

impl Workspace {
    /// Create the workspace subtree under `parent`, disabled. Nothing is
    /// left behind on error.
    pub fn new(
        scene: &mut dyn SceneGraph,
        parent: NodeId,
        id: WorkspaceId,
        name: &str,
        index: usize,
    ) -> Result<Self, ToolkitError> {
        let root = scene.create_tree(parent)?;
        scene.set_enabled(root, false);

        let mut layer_nodes = [root; Layer::COUNT];
        for slot in layer_nodes.iter_mut() {
            match scene.create_tree(root) {
                Ok(node) => *slot = node,
                Err(e) => {
                    scene.destroy(root);
                    return Err(e);
                }
            }
        }

        Ok(Self {
            id,
            name: name.to_owned(),
            index,
            root,
            layer_nodes,
            stacks: Default::default(),
            activated: None,
            iconified: Vec::new(),
            enabled: false,
        })
    }

    pub fn id(&self) -> WorkspaceId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn layer_node(&self, layer: Layer) -> NodeId {
        self.layer_nodes[layer.index()]
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, scene: &mut dyn SceneGraph, enabled: bool) {
        self.enabled = enabled;
        scene.set_enabled(self.root, enabled);
        tracing::debug!(workspace = %self.id, enabled, "workspace enabled changed");
    }

    /// Views of `layer`, bottom to top.
    pub fn views(&self, layer: Layer) -> &[ViewId] {
        &self.stacks[layer.index()]
    }

    /// All stacked views, topmost first across layers.
    pub fn views_top_down(&self) -> impl Iterator<Item = ViewId> + '_ {
        Layer::ALL
            .iter()
            .rev()
            .flat_map(move |layer| self.stacks[layer.index()].iter().rev().copied())
    }

    pub fn contains(&self, view: ViewId) -> bool {
        self.layer_of(view).is_some() || self.iconified.contains(&view)
    }

    pub fn layer_of(&self, view: ViewId) -> Option<Layer> {
        Layer::ALL
            .into_iter()
            .find(|layer| self.stacks[layer.index()].contains(&view))
    }

    /// Put `view` on top of `layer`.
    pub fn attach(&mut self, layer: Layer, view: ViewId) {
        debug_assert!(!self.contains(view), "{view} attached twice to {}", self.id);
        self.stacks[layer.index()].push(view);
    }

    /// Forget `view` entirely. Returns the layer it was on.
    pub fn detach(&mut self, view: ViewId) -> Option<Layer> {
        if self.activated == Some(view) {
            self.activated = None;
        }
        self.iconified.retain(|v| *v != view);
        let layer = self.layer_of(view)?;
        self.stacks[layer.index()].retain(|v| *v != view);
        Some(layer)
    }

    /// Move `view` between layers, placing it on top of `to`.
    pub fn move_to_layer(&mut self, view: ViewId, to: Layer) {
        if let Some(from) = self.layer_of(view) {
            self.stacks[from.index()].retain(|v| *v != view);
            self.stacks[to.index()].push(view);
        }
    }

    pub fn raise(&mut self, scene: &mut dyn SceneGraph, view: ViewId, view_root: NodeId) {
        if let Some(layer) = self.layer_of(view) {
            let stack = &mut self.stacks[layer.index()];
            stack.retain(|v| *v != view);
            stack.push(view);
            scene.raise_to_top(view_root);
        }
    }

    pub fn lower(&mut self, scene: &mut dyn SceneGraph, view: ViewId, view_root: NodeId) {
        if let Some(layer) = self.layer_of(view) {
            let stack = &mut self.stacks[layer.index()];
            stack.retain(|v| *v != view);
            stack.insert(0, view);
            scene.lower_to_bottom(view_root);
        }
    }

    pub fn activated(&self) -> Option<ViewId> {
        self.activated
    }

    pub fn set_activated(&mut self, view: Option<ViewId>) {
        self.activated = view;
    }

    /// Take `view` off its layer and remember it as iconified.
    pub fn iconify(&mut self, view: ViewId) -> bool {
        let Some(layer) = self.layer_of(view) else {
            return false;
        };
        self.stacks[layer.index()].retain(|v| *v != view);
        if self.activated == Some(view) {
            self.activated = None;
        }
        self.iconified.push(view);
        true
    }

    /// Put an iconified view back on top of `layer`.
    pub fn restore(&mut self, view: ViewId, layer: Layer) -> bool {
        let before = self.iconified.len();
        self.iconified.retain(|v| *v != view);
        if self.iconified.len() == before {
            return false;
        }
        self.stacks[layer.index()].push(view);
        true
    }

    pub fn iconified(&self) -> &[ViewId] {
        &self.iconified
    }

    /// Topmost view of the shell and fullscreen layers, skipping `except`.
    pub fn topmost_window(&self, except: Option<ViewId>) -> Option<ViewId> {
        [Layer::Fullscreen, Layer::Shell]
            .iter()
            .flat_map(|layer| self.stacks[layer.index()].iter().rev().copied())
            .find(|v| Some(*v) != except)
    }

    pub fn destroy(self, scene: &mut dyn SceneGraph) {
        scene.destroy(self.root);
    }
}
