use wlmaker_common::{Action, NodeId, Rect, ToolkitError, ViewId};
use wlmaker_config::schema::{DockConfig, DockEdge};

use super::{dock_origin, ChromeView};
use crate::interactive::{Button, ButtonTextures, InteractiveKind};
use crate::scene::SceneGraph;
use crate::texture::Texture;
use crate::view::{View, ViewKind};

/// Workspace switcher: the current workspace's name above a previous and
/// a next button. One tile in size, sitting on top of the dock.
#[derive(Debug)]
pub struct Clip {
    view: ViewId,
    edge: DockEdge,
    label: NodeId,
    previous: NodeId,
    next: NodeId,
    size: u32,
    workspace_name: String,
    redraws: u32,
}

impl Clip {
    pub fn create(
        scene: &mut dyn SceneGraph,
        parent: NodeId,
        id: ViewId,
        config: &DockConfig,
        workspace_name: &str,
    ) -> Result<(View, Self), ToolkitError> {
        let size = config.tile_size;
        let half = (size / 2).max(1);
        let imp = ChromeView::new(ViewKind::Clip, size, size);
        let mut view = View::new(scene, parent, id, Box::new(imp), None, None)?;

        let built = Self::build(scene, &mut view, size, half);
        let (label, previous, next) = match built {
            Ok(nodes) => nodes,
            Err(e) => {
                view.destroy(scene);
                return Err(e);
            }
        };
        view.set_title("Clip");

        let mut clip = Self {
            view: id,
            edge: config.edge,
            label,
            previous,
            next,
            size,
            workspace_name: String::new(),
            redraws: 0,
        };
        clip.redraw(scene, workspace_name);
        Ok((view, clip))
    }

    fn build(
        scene: &mut dyn SceneGraph,
        view: &mut View,
        size: u32,
        half: u32,
    ) -> Result<(NodeId, NodeId, NodeId), ToolkitError> {
        let label = scene.create_buffer(view.content(), None)?;
        let previous = view.add_interactive(
            scene,
            InteractiveKind::Button(Button::new(
                ButtonTextures::new(half, half),
                Action::WorkspacePrevious,
            )),
        )?;
        let next = view.add_interactive(
            scene,
            InteractiveKind::Button(Button::new(
                ButtonTextures::new(half, half),
                Action::WorkspaceNext,
            )),
        )?;
        scene.set_position(previous, 0, half as i32);
        scene.set_position(next, (size - half) as i32, half as i32);
        Ok((label, previous, next))
    }

    pub fn view(&self) -> ViewId {
        self.view
    }

    pub fn previous_button(&self) -> NodeId {
        self.previous
    }

    pub fn next_button(&self) -> NodeId {
        self.next
    }

    pub fn label(&self) -> NodeId {
        self.label
    }

    pub fn workspace_name(&self) -> &str {
        &self.workspace_name
    }

    /// How often the label was redrawn.
    pub fn redraws(&self) -> u32 {
        self.redraws
    }

    /// Show `workspace_name` in the label.
    pub fn redraw(&mut self, scene: &mut dyn SceneGraph, workspace_name: &str) {
        self.workspace_name = workspace_name.to_owned();
        let texture = Texture::new(self.size, (self.size / 2).max(1));
        scene.set_buffer(self.label, Some(&texture));
        self.redraws += 1;
        tracing::debug!(view = %self.view, workspace = workspace_name, "clip redrawn");
    }

    pub fn place(&self, scene: &mut dyn SceneGraph, view: &mut View, output: Rect) {
        let (x, y) = dock_origin(output, self.edge, view.size().0, 0);
        view.set_position(scene, x, y);
    }
}
