use wlmaker_common::Action;

use crate::input::{ButtonEvent, ButtonState, BTN_LEFT};
use crate::texture::Texture;

/// Dock tile: one texture, fires its action on a click inside.
#[derive(Debug)]
pub struct Tile {
    texture: Texture,
    armed: bool,
    action: Action,
}

impl Tile {
    pub fn new(texture: Texture, action: Action) -> Self {
        Self {
            texture,
            armed: false,
            action,
        }
    }

    pub fn action(&self) -> &Action {
        &self.action
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub(super) fn texture(&self) -> &Texture {
        &self.texture
    }

    pub(super) fn replace_texture(&mut self, texture: Texture) {
        self.texture = texture;
    }

    pub(super) fn button(&mut self, inside: bool, event: &ButtonEvent) -> Option<Action> {
        if event.button != BTN_LEFT {
            return None;
        }
        match event.state {
            ButtonState::Pressed => {
                self.armed = inside;
                None
            }
            ButtonState::Released => {
                let fire = self.armed && inside;
                self.armed = false;
                fire.then(|| self.action.clone())
            }
        }
    }
}
