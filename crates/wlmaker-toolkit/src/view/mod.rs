//! Views: the common model for everything placed in a workspace.
//!
//! A [`View`] wraps one [`ViewImpl`] (an XDG toplevel, a layer surface, or
//! a synthetic element such as the dock) and owns its scene subtree:
//!
//! ```text
//! root (tree, at the view position)
//! ├── content (tree)
//! │   ├── surface (buffer, client views only)
//! │   └── interactives of synthetic views
//! ├── titlebar (tree, decorated views)
//! └── resizebar (tree, decorated views)
//! ```
//!
//! Interactives are indexed by the identity of their scene node.

mod decoration;
mod layer;
mod state;
mod toplevel;

#[cfg(test)]
mod tests;

pub use decoration::{Decoration, DecorationHit, RESIZEBAR_HEIGHT};
pub use layer::{
    arrange_layer, exclusive_area, HeadlessLayer, LayerHandle, LayerSurfaceState, LayerView,
    Margins,
};
pub use state::ViewAreas;
pub use toplevel::{HeadlessToplevel, ToplevelHandle, ToplevelRequest, ToplevelView};

use std::any::Any;
use std::collections::BTreeMap;

use wlmaker_common::{
    ClientCredentials, Edges, NodeId, OutputId, Rect, SurfaceId, ToolkitError, ViewId,
    WorkspaceId,
};
use wlmaker_config::schema::DecorationConfig;

use crate::input::{AxisEvent, ButtonEvent};
use crate::interactive::{Interactive, InteractiveKind, Outcome};
use crate::scene::SceneGraph;
use crate::seat::Seat;
use crate::workspace::Layer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Toplevel,
    Layer,
    Dock,
    Clip,
    Menu,
}

impl ViewKind {
    /// Chrome views never take workspace activation; their interactives
    /// stay focused.
    pub fn is_chrome(&self) -> bool {
        matches!(self, ViewKind::Dock | ViewKind::Clip | ViewKind::Menu)
    }
}

/// Behaviour a concrete view kind plugs into [`View`]. Only `size` is
/// mandatory.
pub trait ViewImpl: Any {
    fn kind(&self) -> ViewKind;

    fn size(&self) -> (u32, u32);

    fn set_size(&mut self, _width: u32, _height: u32) {}

    fn set_activated(&mut self, _activated: bool) {}

    fn set_maximized(&mut self, _maximized: bool) {}

    fn set_fullscreen(&mut self, _fullscreen: bool) {}

    /// True when the event was consumed.
    fn handle_axis(&mut self, _event: &AxisEvent) -> bool {
        false
    }

    fn close(&mut self) {}

    /// Client surface backing the view, if any.
    fn surface(&self) -> Option<SurfaceId> {
        None
    }

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

pub struct View {
    id: ViewId,
    imp: Box<dyn ViewImpl>,
    root: NodeId,
    content: NodeId,
    surface_node: Option<NodeId>,
    workspace: Option<WorkspaceId>,
    layer: Layer,
    interactives: BTreeMap<NodeId, Interactive>,
    pointer_focus: Option<NodeId>,
    anchor: Edges,
    x: i32,
    y: i32,
    active: bool,
    maximized: bool,
    fullscreen: bool,
    shaded: bool,
    iconified: bool,
    organic: Rect,
    output: Option<OutputId>,
    title: Option<String>,
    app_id: Option<String>,
    credentials: Option<ClientCredentials>,
    decoration: Option<Decoration>,
}

impl View {
    /// Create the view's scene subtree under `parent`, disabled until
    /// mapped. Nothing is left behind on error.
    pub fn new(
        scene: &mut dyn SceneGraph,
        parent: NodeId,
        id: ViewId,
        imp: Box<dyn ViewImpl>,
        decoration: Option<&DecorationConfig>,
        credentials: Option<ClientCredentials>,
    ) -> Result<Self, ToolkitError> {
        let root = scene.create_tree(parent)?;
        scene.set_enabled(root, false);

        let mut interactives = BTreeMap::new();
        let built = Self::build_nodes(scene, root, imp.as_ref(), decoration, &mut interactives);
        let (content, surface_node, decoration) = match built {
            Ok(nodes) => nodes,
            Err(e) => {
                tracing::warn!(%id, error = %e, "view creation failed, unwinding");
                drop(interactives);
                scene.destroy(root);
                return Err(e);
            }
        };

        let (width, height) = imp.size();
        let mut view = Self {
            id,
            imp,
            root,
            content,
            surface_node,
            workspace: None,
            layer: Layer::Shell,
            interactives,
            pointer_focus: None,
            anchor: Edges::empty(),
            x: 0,
            y: 0,
            active: false,
            maximized: false,
            fullscreen: false,
            shaded: false,
            iconified: false,
            organic: Rect::new(0, 0, width as i32, height as i32),
            output: None,
            title: None,
            app_id: None,
            credentials,
            decoration,
        };
        view.update_layout(scene);
        Ok(view)
    }

    fn build_nodes(
        scene: &mut dyn SceneGraph,
        root: NodeId,
        imp: &dyn ViewImpl,
        decoration: Option<&DecorationConfig>,
        interactives: &mut BTreeMap<NodeId, Interactive>,
    ) -> Result<(NodeId, Option<NodeId>, Option<Decoration>), ToolkitError> {
        let content = scene.create_tree(root)?;
        let surface_node = match imp.surface() {
            Some(_) => Some(scene.create_buffer(content, None)?),
            None => None,
        };
        let decoration = match decoration {
            Some(config) => Some(Decoration::new(scene, root, interactives, config)?),
            None => None,
        };
        Ok((content, surface_node, decoration))
    }

    // -- Accessors --

    pub fn id(&self) -> ViewId {
        self.id
    }

    pub fn kind(&self) -> ViewKind {
        self.imp.kind()
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn content(&self) -> NodeId {
        self.content
    }

    pub fn surface_node(&self) -> Option<NodeId> {
        self.surface_node
    }

    pub fn surface(&self) -> Option<SurfaceId> {
        self.imp.surface()
    }

    pub fn workspace(&self) -> Option<WorkspaceId> {
        self.workspace
    }

    pub fn is_mapped(&self) -> bool {
        self.workspace.is_some()
    }

    pub fn layer(&self) -> Layer {
        self.layer
    }

    pub fn anchor(&self) -> Edges {
        self.anchor
    }

    pub fn set_anchor(&mut self, anchor: Edges) {
        self.anchor = anchor;
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn size(&self) -> (u32, u32) {
        self.imp.size()
    }

    /// Content box in layout coordinates.
    pub fn geometry(&self) -> Rect {
        let (w, h) = self.imp.size();
        Rect::new(self.x, self.y, w as i32, h as i32)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_maximized(&self) -> bool {
        self.maximized
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn is_shaded(&self) -> bool {
        self.shaded
    }

    pub fn is_iconified(&self) -> bool {
        self.iconified
    }

    pub fn organic(&self) -> Rect {
        self.organic
    }

    pub fn output(&self) -> Option<OutputId> {
        self.output
    }

    pub fn set_output(&mut self, output: Option<OutputId>) {
        self.output = output;
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = Some(title.to_owned());
    }

    pub fn app_id(&self) -> Option<&str> {
        self.app_id.as_deref()
    }

    pub fn set_app_id(&mut self, app_id: &str) {
        self.app_id = Some(app_id.to_owned());
    }

    pub fn credentials(&self) -> Option<ClientCredentials> {
        self.credentials
    }

    pub fn decoration(&self) -> Option<&Decoration> {
        self.decoration.as_ref()
    }

    pub fn decoration_mut(&mut self) -> Option<&mut Decoration> {
        self.decoration.as_mut()
    }

    pub fn imp(&self) -> &dyn ViewImpl {
        self.imp.as_ref()
    }

    pub fn imp_mut(&mut self) -> &mut dyn ViewImpl {
        self.imp.as_mut()
    }

    /// Downcast the implementation.
    pub fn imp_as<T: ViewImpl>(&self) -> Option<&T> {
        self.imp.as_any().downcast_ref::<T>()
    }

    pub fn imp_as_mut<T: ViewImpl>(&mut self) -> Option<&mut T> {
        self.imp.as_any_mut().downcast_mut::<T>()
    }

    // -- Mapping --

    /// Place the view into `layer_node` of `workspace`.
    ///
    /// # Panics
    ///
    /// When the view is already mapped.
    pub fn map(
        &mut self,
        scene: &mut dyn SceneGraph,
        workspace: WorkspaceId,
        layer: Layer,
        layer_node: NodeId,
    ) {
        assert!(
            self.workspace.is_none(),
            "{} is already mapped to {:?}",
            self.id,
            self.workspace
        );
        scene.reparent(self.root, layer_node);
        scene.set_enabled(self.root, true);
        self.workspace = Some(workspace);
        self.layer = layer;
        tracing::debug!(view = %self.id, %workspace, ?layer, "view mapped");
    }

    /// Take the view out of its workspace and park it under `detached`.
    pub fn unmap(&mut self, scene: &mut dyn SceneGraph, detached: NodeId) {
        let Some(workspace) = self.workspace.take() else {
            tracing::debug!(view = %self.id, "unmap of an unmapped view ignored");
            return;
        };
        self.clear_pointer_focus(scene);
        scene.set_enabled(self.root, false);
        scene.reparent(self.root, detached);
        tracing::debug!(view = %self.id, %workspace, "view unmapped");
    }

    /// Move the mapped view to another layer node without a full unmap.
    pub fn move_to_layer(&mut self, scene: &mut dyn SceneGraph, layer: Layer, layer_node: NodeId) {
        scene.reparent(self.root, layer_node);
        self.layer = layer;
    }

    /// Move the mapped view to another workspace.
    pub fn move_to_workspace(
        &mut self,
        scene: &mut dyn SceneGraph,
        workspace: WorkspaceId,
        layer_node: NodeId,
    ) {
        debug_assert!(self.is_mapped(), "{} moved while unmapped", self.id);
        scene.reparent(self.root, layer_node);
        self.workspace = Some(workspace);
    }

    // -- Geometry --

    pub fn set_position(&mut self, scene: &mut dyn SceneGraph, x: i32, y: i32) {
        self.x = x;
        self.y = y;
        scene.set_position(self.root, x, y);
    }

    /// Ask the implementation for a new size and re-lay the decoration.
    pub fn set_size(&mut self, scene: &mut dyn SceneGraph, width: u32, height: u32) {
        self.imp.set_size(width.max(1), height.max(1));
        self.update_layout(scene);
    }

    pub fn set_geometry(&mut self, scene: &mut dyn SceneGraph, geometry: Rect) {
        self.set_position(scene, geometry.x, geometry.y);
        self.set_size(scene, geometry.width.max(1) as u32, geometry.height.max(1) as u32);
    }

    /// Sync scene nodes with the implementation's current size. Called
    /// after the size changed, including client commits.
    pub fn update_layout(&mut self, scene: &mut dyn SceneGraph) {
        let (width, height) = self.imp.size();
        if let Some(surface) = self.surface_node {
            scene.set_dest_size(surface, width, height);
        }
        if let Some(decoration) = &self.decoration {
            decoration.layout(scene, &mut self.interactives, width, height);
        }
    }

    // -- Activation --

    /// Activate or deactivate. Cascades focus to every interactive and
    /// hands the keyboard to or away from the view's surface.
    pub fn set_active(&mut self, scene: &mut dyn SceneGraph, seat: &mut dyn Seat, active: bool) {
        if self.active == active {
            return;
        }
        self.active = active;
        self.imp.set_activated(active);
        for interactive in self.interactives.values_mut() {
            interactive.focus(scene, active);
        }

        let Some(surface) = self.imp.surface() else {
            return;
        };
        if active {
            let state = seat.keyboard_state();
            seat.keyboard_enter(surface, &state);
        } else {
            match seat.keyboard_focus() {
                Some(focused) if focused == surface => seat.keyboard_clear_focus(),
                Some(focused) => tracing::warn!(
                    view = %self.id,
                    %surface,
                    %focused,
                    "deactivated view did not hold keyboard focus"
                ),
                None => {}
            }
        }
    }

    // -- Interactives --

    pub fn interactive(&self, node: NodeId) -> Option<&Interactive> {
        self.interactives.get(&node)
    }

    pub fn interactive_mut(&mut self, node: NodeId) -> Option<&mut Interactive> {
        self.interactives.get_mut(&node)
    }

    pub fn interactives(&self) -> impl Iterator<Item = &Interactive> {
        self.interactives.values()
    }

    pub fn interactive_count(&self) -> usize {
        self.interactives.len()
    }

    /// Create an interactive in the content tree. Chrome views keep their
    /// interactives focused; others follow activation.
    pub fn add_interactive(
        &mut self,
        scene: &mut dyn SceneGraph,
        kind: InteractiveKind,
    ) -> Result<NodeId, ToolkitError> {
        let mut interactive = Interactive::new(scene, self.content, kind)?;
        interactive.focus(scene, self.active || self.kind().is_chrome());
        let node = interactive.node();
        self.interactives.insert(node, interactive);
        Ok(node)
    }

    /// Destroy the interactive and drop it from the index.
    pub fn remove_interactive(&mut self, scene: &mut dyn SceneGraph, node: NodeId) -> bool {
        let Some(interactive) = self.interactives.remove(&node) else {
            return false;
        };
        if self.pointer_focus == Some(node) {
            self.pointer_focus = None;
        }
        interactive.destroy(scene);
        true
    }

    pub fn pointer_focus(&self) -> Option<NodeId> {
        self.pointer_focus
    }

    /// Move pointer focus to the interactive at `hit`, if `hit` is one.
    /// On change, the old interactive gets `leave` before the new one gets
    /// `enter`.
    pub fn update_pointer_focus(&mut self, scene: &mut dyn SceneGraph, hit: Option<NodeId>) {
        let next = hit.filter(|node| self.interactives.contains_key(node));
        if next == self.pointer_focus {
            return;
        }
        if let Some(old) = self.pointer_focus.and_then(|n| self.interactives.get_mut(&n)) {
            old.leave(scene);
        }
        self.pointer_focus = next;
        if let Some(new) = next.and_then(|n| self.interactives.get_mut(&n)) {
            new.enter(scene);
        }
    }

    pub fn clear_pointer_focus(&mut self, scene: &mut dyn SceneGraph) {
        self.update_pointer_focus(scene, None);
    }

    /// Forward motion to the focused interactive, in its local coordinates.
    pub fn pointer_motion(&mut self, scene: &mut dyn SceneGraph, x: f64, y: f64) {
        let Some(node) = self.pointer_focus else {
            return;
        };
        let Some((nx, ny)) = scene.absolute_position(node) else {
            return;
        };
        if let Some(interactive) = self.interactives.get_mut(&node) {
            interactive.motion(scene, x - f64::from(nx), y - f64::from(ny));
        }
    }

    /// Deliver a button event to the interactive at `node`.
    pub fn interactive_button(
        &mut self,
        scene: &mut dyn SceneGraph,
        node: NodeId,
        x: f64,
        y: f64,
        event: &ButtonEvent,
    ) -> Outcome {
        let Some((nx, ny)) = scene.absolute_position(node) else {
            return Outcome::default();
        };
        match self.interactives.get_mut(&node) {
            Some(interactive) => {
                interactive.button(scene, x - f64::from(nx), y - f64::from(ny), event)
            }
            None => Outcome::default(),
        }
    }

    pub fn handle_axis(&mut self, event: &AxisEvent) -> bool {
        self.imp.handle_axis(event)
    }

    pub fn close(&mut self) {
        self.imp.close();
    }

    /// Tear down the scene subtree. Interactives release their textures.
    pub fn destroy(mut self, scene: &mut dyn SceneGraph) {
        debug_assert!(!self.is_mapped(), "{} destroyed while mapped", self.id);
        for (_, interactive) in std::mem::take(&mut self.interactives) {
            interactive.destroy(scene);
        }
        scene.destroy(self.root);
    }
}

impl std::fmt::Debug for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("View")
            .field("id", &self.id)
            .field("kind", &self.imp.kind())
            .field("workspace", &self.workspace)
            .field("geometry", &self.geometry())
            .field("active", &self.active)
            .field("maximized", &self.maximized)
            .field("fullscreen", &self.fullscreen)
            .finish()
    }
}
