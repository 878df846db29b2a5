use wlmaker_common::{Action, Edges, NodeId, Rect, ToolkitError, ViewId};
use wlmaker_config::schema::{DockConfig, DockEdge};

use super::ChromeView;
use crate::interactive::{InteractiveKind, Tile};
use crate::scene::SceneGraph;
use crate::texture::Texture;
use crate::view::{View, ViewKind};

/// Where a chrome column of `width` sits on `output` for `edge`, `y`
/// pixels below the output's top.
pub fn dock_origin(output: Rect, edge: DockEdge, width: u32, y: i32) -> (i32, i32) {
    let x = match edge {
        DockEdge::Left => output.x,
        DockEdge::Right => output.right() - width as i32,
    };
    (x, output.y + y)
}

/// A column of launcher tiles pinned to one screen edge.
#[derive(Debug)]
pub struct Dock {
    view: ViewId,
    edge: DockEdge,
    tile_size: u32,
    tiles: Vec<NodeId>,
}

impl Dock {
    /// Build the dock view with one tile per launcher. The view is
    /// returned unmapped; nothing is left behind on error.
    pub fn create(
        scene: &mut dyn SceneGraph,
        parent: NodeId,
        id: ViewId,
        config: &DockConfig,
    ) -> Result<(View, Self), ToolkitError> {
        let ts = config.tile_size;
        let count = config.launchers.len().max(1) as u32;
        let imp = ChromeView::new(ViewKind::Dock, ts, ts * count);
        let mut view = View::new(scene, parent, id, Box::new(imp), None, None)?;

        let mut tiles = Vec::with_capacity(config.launchers.len());
        for (i, launcher) in config.launchers.iter().enumerate() {
            let tile = Tile::new(
                Texture::new(ts, ts),
                Action::Launch(launcher.command.clone()),
            );
            match view.add_interactive(scene, InteractiveKind::Tile(tile)) {
                Ok(node) => {
                    scene.set_position(node, 0, (i as u32 * ts) as i32);
                    tiles.push(node);
                }
                Err(e) => {
                    view.destroy(scene);
                    return Err(e);
                }
            }
        }

        view.set_anchor(match config.edge {
            DockEdge::Left => Edges::LEFT | Edges::TOP,
            DockEdge::Right => Edges::RIGHT | Edges::TOP,
        });
        view.set_title("Dock");
        tracing::debug!(%id, tiles = tiles.len(), edge = ?config.edge, "dock created");
        Ok((
            view,
            Self {
                view: id,
                edge: config.edge,
                tile_size: ts,
                tiles,
            },
        ))
    }

    pub fn view(&self) -> ViewId {
        self.view
    }

    pub fn edge(&self) -> DockEdge {
        self.edge
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Tile nodes, top to bottom.
    pub fn tiles(&self) -> &[NodeId] {
        &self.tiles
    }

    /// Pin the dock to its edge of `output`, `y` pixels from the top.
    pub fn place(&self, scene: &mut dyn SceneGraph, view: &mut View, output: Rect, y: i32) {
        let (x, y) = dock_origin(output, self.edge, view.size().0, y);
        view.set_position(scene, x, y);
    }
}
