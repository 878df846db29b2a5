//! Server-side decoration: a title bar with iconify and close buttons
//! above the content, and a three-part resize bar below it.

use std::collections::BTreeMap;

use wlmaker_common::{Action, Edges, NodeId, Rect, ToolkitError};
use wlmaker_config::schema::DecorationConfig;

use crate::interactive::{Button, ButtonTextures, Interactive, InteractiveKind};
use crate::scene::SceneGraph;
use crate::texture::Texture;

pub const RESIZEBAR_HEIGHT: u32 = 7;

/// Two left presses on the title bar within this window toggle maximize.
const DOUBLE_CLICK_MSEC: u32 = 400;

/// What a press on a decoration node asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecorationHit {
    Move,
    Resize(Edges),
}

#[derive(Debug)]
pub struct Decoration {
    titlebar: NodeId,
    bar: NodeId,
    iconify: NodeId,
    close: NodeId,
    resizebar: NodeId,
    resize_parts: [(NodeId, Edges); 3],
    titlebar_height: u32,
    button_size: u32,
    border: u32,
    last_bar_press: Option<u32>,
}

impl Decoration {
    /// Build the decoration nodes under `root`. Button interactives are
    /// added to `interactives`. On error the caller tears down `root`.
    pub(super) fn new(
        scene: &mut dyn SceneGraph,
        root: NodeId,
        interactives: &mut BTreeMap<NodeId, Interactive>,
        config: &DecorationConfig,
    ) -> Result<Self, ToolkitError> {
        let titlebar_height = config.titlebar_height;
        let button_size = config.button_size;

        let titlebar = scene.create_tree(root)?;
        let bar = scene.create_buffer(titlebar, None)?;

        let iconify = Interactive::new(
            scene,
            titlebar,
            InteractiveKind::Button(Button::new(
                ButtonTextures::new(button_size, button_size),
                Action::WindowIconify,
            )),
        )?;
        let close = Interactive::new(
            scene,
            titlebar,
            InteractiveKind::Button(Button::new(
                ButtonTextures::new(button_size, button_size),
                Action::WindowClose,
            )),
        )?;
        let (iconify_node, close_node) = (iconify.node(), close.node());
        interactives.insert(iconify_node, iconify);
        interactives.insert(close_node, close);

        let resizebar = scene.create_tree(root)?;
        let left = scene.create_buffer(resizebar, None)?;
        let middle = scene.create_buffer(resizebar, None)?;
        let right = scene.create_buffer(resizebar, None)?;

        Ok(Self {
            titlebar,
            bar,
            iconify: iconify_node,
            close: close_node,
            resizebar,
            resize_parts: [
                (left, Edges::BOTTOM | Edges::LEFT),
                (middle, Edges::BOTTOM),
                (right, Edges::BOTTOM | Edges::RIGHT),
            ],
            titlebar_height,
            button_size,
            border: config.border_width,
            last_bar_press: None,
        })
    }

    pub fn titlebar_height(&self) -> u32 {
        self.titlebar_height
    }

    pub fn iconify_button(&self) -> NodeId {
        self.iconify
    }

    pub fn close_button(&self) -> NodeId {
        self.close
    }

    pub fn bar(&self) -> NodeId {
        self.bar
    }

    /// Space the decoration takes above and below the content.
    pub fn extents(&self) -> (u32, u32) {
        (
            self.titlebar_height + self.border,
            RESIZEBAR_HEIGHT + self.border,
        )
    }

    /// Content box for a view whose decorated outline should fill `area`.
    pub fn content_area(&self, area: Rect) -> Rect {
        let (top, bottom) = self.extents();
        Rect::new(
            area.x,
            area.y + top as i32,
            area.width,
            (area.height - (top + bottom) as i32).max(1),
        )
    }

    pub fn hit(&self, node: NodeId) -> Option<DecorationHit> {
        if node == self.bar {
            return Some(DecorationHit::Move);
        }
        self.resize_parts
            .iter()
            .find(|(n, _)| *n == node)
            .map(|(_, edges)| DecorationHit::Resize(*edges))
    }

    /// Record a left press on the bar. True when it completes a double
    /// click.
    pub fn bar_pressed(&mut self, time_msec: u32) -> bool {
        let double = self
            .last_bar_press
            .is_some_and(|last| time_msec.wrapping_sub(last) <= DOUBLE_CLICK_MSEC);
        self.last_bar_press = if double { None } else { Some(time_msec) };
        double
    }

    /// Re-lay the decoration around content of `width` x `height`.
    pub fn layout(
        &self,
        scene: &mut dyn SceneGraph,
        interactives: &mut BTreeMap<NodeId, Interactive>,
        width: u32,
        height: u32,
    ) {
        let th = self.titlebar_height;
        scene.set_position(self.titlebar, 0, -((th + self.border) as i32));
        scene.set_buffer(self.bar, Some(&Texture::new(width, th)));

        let button_y = ((th - self.button_size.min(th)) / 2) as i32;
        if let Some(iconify) = interactives.get(&self.iconify) {
            iconify.set_position(scene, 0, button_y);
        }
        if let Some(close) = interactives.get(&self.close) {
            let x = width.saturating_sub(self.button_size) as i32;
            close.set_position(scene, x, button_y);
        }

        scene.set_position(self.resizebar, 0, (height + self.border) as i32);
        let corner = th.min(width / 3);
        let widths = [corner, width.saturating_sub(2 * corner), corner];
        let mut x = 0;
        for ((node, _), w) in self.resize_parts.iter().zip(widths) {
            scene.set_position(*node, x, 0);
            scene.set_buffer(*node, Some(&Texture::new(w, RESIZEBAR_HEIGHT)));
            x += w as i32;
        }
    }

    /// Fullscreen views show no decoration.
    pub fn set_visible(&self, scene: &mut dyn SceneGraph, visible: bool) {
        scene.set_enabled(self.titlebar, visible);
        scene.set_enabled(self.resizebar, visible);
    }

    /// Shaded views keep only the title bar.
    pub fn set_resizebar_visible(&self, scene: &mut dyn SceneGraph, visible: bool) {
        scene.set_enabled(self.resizebar, visible);
    }
}
