use wlmaker_common::{NodeId, Rect, ToolkitError, ViewId};
use wlmaker_config::schema::MenuConfig;

use super::ChromeView;
use crate::interactive::{InteractiveKind, Menu, MenuItem};
use crate::scene::SceneGraph;
use crate::view::{View, ViewKind};

/// The root menu, opened by a right press on the background.
#[derive(Debug)]
pub struct RootMenu {
    view: ViewId,
    node: NodeId,
}

impl RootMenu {
    pub fn create(
        scene: &mut dyn SceneGraph,
        parent: NodeId,
        id: ViewId,
        config: &MenuConfig,
    ) -> Result<(View, Self), ToolkitError> {
        let items: Vec<MenuItem> = config
            .items
            .iter()
            .map(|item| MenuItem::new(item.label.clone(), item.action.clone()))
            .collect();
        let height = config.item_height * items.len().max(1) as u32;
        let imp = ChromeView::new(ViewKind::Menu, config.width, height);
        let mut view = View::new(scene, parent, id, Box::new(imp), None, None)?;

        let menu = Menu::new(items, config.width, config.item_height);
        let node = match view.add_interactive(scene, InteractiveKind::Menu(menu)) {
            Ok(node) => node,
            Err(e) => {
                view.destroy(scene);
                return Err(e);
            }
        };
        view.set_title("Root Menu");
        Ok((view, Self { view: id, node }))
    }

    pub fn view(&self) -> ViewId {
        self.view
    }

    /// The menu interactive.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Open at the pointer, shifted left and up as needed to stay on
    /// `output`.
    pub fn place(&self, scene: &mut dyn SceneGraph, view: &mut View, x: i32, y: i32, output: Option<Rect>) {
        let (w, h) = view.size();
        let (mut x, mut y) = (x, y);
        if let Some(out) = output {
            x = x.min(out.right() - w as i32).max(out.x);
            y = y.min(out.bottom() - h as i32).max(out.y);
        }
        view.set_position(scene, x, y);
    }
}
