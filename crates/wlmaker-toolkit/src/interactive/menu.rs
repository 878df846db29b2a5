use wlmaker_common::Action;

use crate::input::{ButtonEvent, ButtonState, BTN_RIGHT};
use crate::texture::Texture;

#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem {
    pub label: String,
    pub action: Action,
}

impl MenuItem {
    pub fn new(label: impl Into<String>, action: Action) -> Self {
        Self {
            label: label.into(),
            action,
        }
    }
}

/// Vertical list of items. Pointer motion focuses the item below it; a
/// right-button release selects the focused item and dismisses the menu.
#[derive(Debug)]
pub struct Menu {
    items: Vec<MenuItem>,
    background: Texture,
    item_height: u32,
    focused: Option<usize>,
}

impl Menu {
    pub fn new(items: Vec<MenuItem>, width: u32, item_height: u32) -> Self {
        let item_height = item_height.max(1);
        let height = item_height * items.len().max(1) as u32;
        Self {
            items,
            background: Texture::new(width, height),
            item_height,
            focused: None,
        }
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn focused_index(&self) -> Option<usize> {
        self.focused
    }

    pub fn focused_item(&self) -> Option<&MenuItem> {
        self.focused.and_then(|i| self.items.get(i))
    }

    pub(super) fn texture(&self) -> &Texture {
        &self.background
    }

    fn item_at(&self, y: f64) -> Option<usize> {
        if y < 0.0 {
            return None;
        }
        let index = (y / f64::from(self.item_height)) as usize;
        (index < self.items.len()).then_some(index)
    }

    pub(super) fn leave(&mut self) {
        self.focused = None;
    }

    pub(super) fn motion(&mut self, inside: bool, y: f64) {
        self.focused = if inside { self.item_at(y) } else { None };
    }

    /// `Some(selection)` when the menu is done; the selection may be
    /// empty when no item was focused.
    pub(super) fn button(&mut self, event: &ButtonEvent) -> Option<Option<Action>> {
        if event.button != BTN_RIGHT || event.state != ButtonState::Released {
            return None;
        }
        Some(self.focused_item().map(|item| item.action.clone()))
    }
}
