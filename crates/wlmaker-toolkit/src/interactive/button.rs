use wlmaker_common::Action;

use crate::input::{ButtonEvent, ButtonState, BTN_LEFT};
use crate::texture::Texture;

/// Textures for the three visual states of a button.
#[derive(Debug, Clone)]
pub struct ButtonTextures {
    pub released: Texture,
    pub pressed: Texture,
    pub blurred: Texture,
}

impl ButtonTextures {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            released: Texture::new(width, height),
            pressed: Texture::new(width, height),
            blurred: Texture::new(width, height),
        }
    }
}

/// Push button. Idle, activated-not-pressed (held but pointer outside) and
/// activated-pressed (held with pointer inside).
#[derive(Debug)]
pub struct Button {
    textures: ButtonTextures,
    activated: bool,
    pressed: bool,
    action: Action,
}

impl Button {
    pub fn new(textures: ButtonTextures, action: Action) -> Self {
        Self {
            textures,
            activated: false,
            pressed: false,
            action,
        }
    }

    pub fn is_activated(&self) -> bool {
        self.activated
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn is_idle(&self) -> bool {
        !self.activated && !self.pressed
    }

    pub fn action(&self) -> &Action {
        &self.action
    }

    pub fn set_action(&mut self, action: Action) {
        self.action = action;
    }

    pub fn textures(&self) -> &ButtonTextures {
        &self.textures
    }

    pub(super) fn texture(&self, focused: bool) -> &Texture {
        if !focused {
            &self.textures.blurred
        } else if self.pressed {
            &self.textures.pressed
        } else {
            &self.textures.released
        }
    }

    pub(super) fn enter(&mut self) {
        if self.activated {
            self.pressed = true;
        }
    }

    pub(super) fn leave(&mut self) {
        if self.activated {
            self.pressed = false;
        }
    }

    pub(super) fn motion(&mut self, inside: bool) {
        if self.activated {
            self.pressed = inside;
        }
    }

    pub(super) fn button(&mut self, inside: bool, event: &ButtonEvent) -> Option<Action> {
        if event.button != BTN_LEFT {
            return None;
        }
        match event.state {
            ButtonState::Pressed => {
                if inside {
                    self.activated = true;
                    self.pressed = true;
                }
                None
            }
            ButtonState::Released => {
                let fire = self.activated && inside;
                self.activated = false;
                self.pressed = false;
                fire.then(|| self.action.clone())
            }
        }
    }
}
