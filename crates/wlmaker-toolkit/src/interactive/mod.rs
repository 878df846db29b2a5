//! Interactive elements: buttons, dock tiles and menus.
//!
//! An [`Interactive`] owns one scene buffer node and reacts to pointer
//! enter/leave/motion/button and to focus changes of its owning view. The
//! node's identity is the key under which the owning view indexes it.

mod button;
mod menu;
mod tile;

pub use button::{Button, ButtonTextures};
pub use menu::{Menu, MenuItem};
pub use tile::Tile;

use wlmaker_common::{Action, NodeId, ToolkitError};

use crate::input::ButtonEvent;
use crate::scene::SceneGraph;
use crate::texture::Texture;

#[derive(Debug)]
pub enum InteractiveKind {
    Button(Button),
    Tile(Tile),
    Menu(Menu),
}

/// Result of a button event on an interactive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outcome {
    pub action: Option<Action>,
    /// The owner should close (menus).
    pub dismiss: bool,
}

impl Outcome {
    fn fired(action: Option<Action>) -> Self {
        Self {
            action,
            dismiss: false,
        }
    }
}

#[derive(Debug)]
pub struct Interactive {
    node: NodeId,
    width: u32,
    height: u32,
    focused: bool,
    kind: InteractiveKind,
}

impl Interactive {
    /// Create the buffer node under `parent` showing the variant's initial
    /// texture. Starts blurred.
    pub fn new(
        scene: &mut dyn SceneGraph,
        parent: NodeId,
        kind: InteractiveKind,
    ) -> Result<Self, ToolkitError> {
        let mut interactive = Self {
            node: NodeId(0),
            width: 0,
            height: 0,
            focused: false,
            kind,
        };
        let texture = interactive.current_texture().clone();
        interactive.node = scene.create_buffer(parent, Some(&texture))?;
        interactive.width = texture.width();
        interactive.height = texture.height();
        Ok(interactive)
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn kind(&self) -> &InteractiveKind {
        &self.kind
    }

    /// `0 <= x < width` and `0 <= y < height`, in local coordinates.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= 0.0 && y >= 0.0 && x < f64::from(self.width) && y < f64::from(self.height)
    }

    /// Show `texture` and adopt its size.
    pub fn set_texture(&mut self, scene: &mut dyn SceneGraph, texture: &Texture) {
        self.width = texture.width();
        self.height = texture.height();
        scene.set_buffer(self.node, Some(texture));
    }

    pub fn set_position(&self, scene: &mut dyn SceneGraph, x: i32, y: i32) {
        scene.set_position(self.node, x, y);
    }

    pub fn enter(&mut self, scene: &mut dyn SceneGraph) {
        if !self.focused {
            return;
        }
        if let InteractiveKind::Button(button) = &mut self.kind {
            button.enter();
            self.refresh(scene);
        }
    }

    pub fn leave(&mut self, scene: &mut dyn SceneGraph) {
        match &mut self.kind {
            InteractiveKind::Button(button) => {
                button.leave();
                self.refresh(scene);
            }
            InteractiveKind::Menu(menu) => menu.leave(),
            InteractiveKind::Tile(_) => {}
        }
    }

    pub fn motion(&mut self, scene: &mut dyn SceneGraph, x: f64, y: f64) {
        if !self.focused {
            return;
        }
        let inside = self.contains(x, y);
        match &mut self.kind {
            InteractiveKind::Button(button) => {
                button.motion(inside);
                self.refresh(scene);
            }
            InteractiveKind::Menu(menu) => menu.motion(inside, y),
            InteractiveKind::Tile(_) => {}
        }
    }

    pub fn button(
        &mut self,
        scene: &mut dyn SceneGraph,
        x: f64,
        y: f64,
        event: &ButtonEvent,
    ) -> Outcome {
        let inside = self.contains(x, y);
        let outcome = match &mut self.kind {
            InteractiveKind::Button(button) => Outcome::fired(button.button(inside, event)),
            InteractiveKind::Tile(tile) => Outcome::fired(tile.button(inside, event)),
            InteractiveKind::Menu(menu) => match menu.button(event) {
                Some(action) => Outcome {
                    action,
                    dismiss: true,
                },
                None => Outcome::default(),
            },
        };
        self.refresh(scene);
        outcome
    }

    /// Follow the owning view's activation.
    pub fn focus(&mut self, scene: &mut dyn SceneGraph, focused: bool) {
        if self.focused == focused {
            return;
        }
        self.focused = focused;
        self.refresh(scene);
    }

    /// Remove the node from the scene. Dropping `self` releases every
    /// texture the variant holds.
    pub fn destroy(self, scene: &mut dyn SceneGraph) {
        scene.destroy(self.node);
    }

    pub fn as_button(&self) -> Option<&Button> {
        let button = match &self.kind {
            InteractiveKind::Button(b) => Some(b),
            _ => None,
        };
        debug_assert!(button.is_some(), "{} is not a button", self.node);
        button
    }

    pub fn as_button_mut(&mut self) -> Option<&mut Button> {
        let node = self.node;
        let button = match &mut self.kind {
            InteractiveKind::Button(b) => Some(b),
            _ => None,
        };
        debug_assert!(button.is_some(), "{node} is not a button");
        button
    }

    pub fn as_tile(&self) -> Option<&Tile> {
        let tile = match &self.kind {
            InteractiveKind::Tile(t) => Some(t),
            _ => None,
        };
        debug_assert!(tile.is_some(), "{} is not a tile", self.node);
        tile
    }

    pub fn as_menu(&self) -> Option<&Menu> {
        let menu = match &self.kind {
            InteractiveKind::Menu(m) => Some(m),
            _ => None,
        };
        debug_assert!(menu.is_some(), "{} is not a menu", self.node);
        menu
    }

    /// Swap the tile's texture. Releases the old one.
    pub fn replace_tile_texture(&mut self, scene: &mut dyn SceneGraph, texture: Texture) {
        let node = self.node;
        match &mut self.kind {
            InteractiveKind::Tile(tile) => {
                tile.replace_texture(texture);
                self.refresh(scene);
            }
            _ => debug_assert!(false, "{node} is not a tile"),
        }
    }

    fn current_texture(&self) -> &Texture {
        match &self.kind {
            InteractiveKind::Button(b) => b.texture(self.focused),
            InteractiveKind::Tile(t) => t.texture(),
            InteractiveKind::Menu(m) => m.texture(),
        }
    }

    fn refresh(&mut self, scene: &mut dyn SceneGraph) {
        let texture = self.current_texture().clone();
        self.set_texture(scene, &texture);
    }
}
