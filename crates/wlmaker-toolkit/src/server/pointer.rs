//! Pointer routing: hot corner, grabs, interactives, client surfaces and
//! the root menu.

use wlmaker_common::{SurfaceId, ViewId, WlmakerError};

use super::Server;
use crate::chrome::RootMenu;
use crate::cursor::CursorMotion;
use crate::input::{AxisEvent, ButtonEvent, BTN_LEFT, BTN_MIDDLE, BTN_RIGHT};
use crate::interactive::Outcome;
use crate::scene::SceneHit;
use crate::seat::CursorImage;
use crate::view::{DecorationHit, ViewKind};
use crate::workspace::Layer;

impl Server {
    /// The pointer moved to layout position `(x, y)`.
    pub fn pointer_motion(&mut self, time_msec: u32, x: f64, y: f64) {
        let actions = self.hot_corner.update_position(&mut self.timers, x, y);
        self.execute_actions(actions);

        match self.cursor.motion_to(x, y) {
            CursorMotion::Move { view, x, y } => {
                if let Some(v) = self.views.get_mut(&view) {
                    v.set_position(self.scene.as_mut(), x, y);
                }
            }
            CursorMotion::Resize { view, geometry } => {
                if let Some(v) = self.views.get_mut(&view) {
                    v.set_geometry(self.scene.as_mut(), geometry);
                }
            }
            CursorMotion::Passthrough if self.lock_engaged => {
                self.lock_pointer_motion(time_msec, x, y)
            }
            CursorMotion::Passthrough => self.passthrough_motion(time_msec, x, y),
        }
    }

    fn lock_surface_at(&self, x: f64, y: f64) -> Option<(SurfaceId, SceneHit)> {
        let lock = self.session_lock.as_ref()?;
        let hit = self.scene.node_at(x, y)?;
        lock.surface_for_node(hit.node).map(|surface| (surface, hit))
    }

    /// While locked only lock surfaces see the pointer.
    fn lock_pointer_motion(&mut self, time_msec: u32, x: f64, y: f64) {
        match self.lock_surface_at(x, y) {
            Some((surface, hit)) if self.seat.pointer_focus() == Some(surface) => {
                self.seat.pointer_motion(time_msec, hit.local_x, hit.local_y)
            }
            Some((surface, hit)) => self.seat.pointer_enter(surface, hit.local_x, hit.local_y),
            None => self.seat.pointer_clear_focus(),
        }
    }

    fn passthrough_motion(&mut self, time_msec: u32, x: f64, y: f64) {
        let hit = self.view_at(x, y);
        let under = hit.map(|(view, _)| view);
        let previous = self.cursor.under_pointer();
        if previous != under {
            if let Some(prev) = previous.and_then(|v| self.views.get_mut(&v)) {
                prev.clear_pointer_focus(self.scene.as_mut());
            }
            self.cursor.set_under_pointer(under);
        }

        let Some((id, hit)) = hit else {
            self.seat.pointer_clear_focus();
            self.seat.set_cursor_image(CursorImage::Default);
            return;
        };
        let Some(view) = self.views.get_mut(&id) else {
            return;
        };
        view.update_pointer_focus(self.scene.as_mut(), Some(hit.node));
        view.pointer_motion(self.scene.as_mut(), x, y);

        match (view.surface_node(), view.surface()) {
            (Some(node), Some(surface)) if node == hit.node => {
                if self.seat.pointer_focus() == Some(surface) {
                    self.seat.pointer_motion(time_msec, hit.local_x, hit.local_y);
                } else {
                    self.seat.pointer_enter(surface, hit.local_x, hit.local_y);
                }
            }
            _ => {
                self.seat.pointer_clear_focus();
                self.seat.set_cursor_image(CursorImage::Default);
            }
        }
    }

    /// A pointer button changed state at the current cursor position.
    pub fn pointer_button(&mut self, event: &ButtonEvent) {
        if self.lock_engaged {
            self.seat.pointer_button(event);
            return;
        }
        let position = self.cursor.position();
        if event.is_pressed() {
            self.pointer_press(event, position.x, position.y);
        } else {
            self.pointer_release(event, position.x, position.y);
        }
    }

    fn pointer_release(&mut self, event: &ButtonEvent, x: f64, y: f64) {
        if self.cursor.release().is_some() {
            self.seat.set_cursor_image(CursorImage::Default);
            return;
        }
        if let Some((id, node)) = self.button_grab.take() {
            let outcome = match self.views.get_mut(&id) {
                Some(view) => view.interactive_button(self.scene.as_mut(), node, x, y, event),
                None => Outcome::default(),
            };
            self.handle_outcome(id, outcome);
            return;
        }
        self.seat.pointer_button(event);
    }

    fn pointer_press(&mut self, event: &ButtonEvent, x: f64, y: f64) {
        let hit = self.view_at(x, y);
        let menu = self.menu.as_ref().map(RootMenu::view);
        if menu.is_some() && hit.map(|(view, _)| view) != menu {
            self.close_menu();
        }

        let Some((id, hit)) = hit else {
            if event.button == BTN_RIGHT {
                let (px, py) = self.cursor.position().floor();
                if let Err(e) = self.open_menu(px, py) {
                    tracing::warn!(error = %e, "failed to open root menu");
                }
            }
            return;
        };

        if self.views.get(&id).is_some_and(|v| v.kind() == ViewKind::Toplevel) {
            self.activate_view(Some(id));
            if let Err(e) = self.raise_view(id) {
                tracing::warn!(view = %id, error = %e, "raise on click failed");
            }
        }

        let Some(view) = self.views.get_mut(&id) else {
            return;
        };
        if let Some(decoration_hit) = view.decoration().and_then(|d| d.hit(hit.node)) {
            self.decoration_press(id, decoration_hit, event);
            return;
        }
        if view.interactive(hit.node).is_some() {
            let outcome = view.interactive_button(self.scene.as_mut(), hit.node, x, y, event);
            self.button_grab = Some((id, hit.node));
            self.handle_outcome(id, outcome);
            return;
        }
        if view.surface_node() == Some(hit.node) {
            self.seat.pointer_button(event);
        }
    }

    fn decoration_press(&mut self, id: ViewId, hit: DecorationHit, event: &ButtonEvent) {
        let activated = self.activated_view() == Some(id);
        let Some(view) = self.views.get_mut(&id) else {
            return;
        };
        match (hit, event.button) {
            (DecorationHit::Move, BTN_LEFT) => {
                let double = view
                    .decoration_mut()
                    .is_some_and(|d| d.bar_pressed(event.time_msec));
                if double {
                    let maximized = view.is_maximized();
                    if let Err(e) = self.set_view_maximized(id, !maximized) {
                        tracing::warn!(view = %id, error = %e, "maximize on double click failed");
                    }
                } else if self.cursor.begin_move(id, view.position(), activated) {
                    self.seat.set_cursor_image(CursorImage::Grabbing);
                }
            }
            (DecorationHit::Move, BTN_MIDDLE) => {
                let shaded = view.is_shaded();
                if let Err(e) = self.set_view_shaded(id, !shaded) {
                    tracing::warn!(view = %id, error = %e, "shade toggle failed");
                }
            }
            (DecorationHit::Resize(edges), BTN_LEFT) => {
                if self.cursor.begin_resize(id, view.geometry(), edges, activated) {
                    self.seat.set_cursor_image(CursorImage::Resize(edges));
                }
            }
            _ => {}
        }
    }

    /// Act on what an interactive reported. Menu selections are global
    /// actions; buttons and tiles act on the view that owns them.
    fn handle_outcome(&mut self, view: ViewId, outcome: Outcome) {
        let from_menu = self.menu.as_ref().is_some_and(|m| m.view() == view);
        if from_menu && outcome.dismiss {
            self.close_menu();
        }
        match outcome.action {
            Some(action) if from_menu => self.execute_action(&action),
            Some(action) => self.execute_view_action(view, &action),
            None => {}
        }
    }

    pub fn pointer_axis(&mut self, event: &AxisEvent) {
        if !self.lock_engaged {
            let consumed = self
                .cursor
                .under_pointer()
                .and_then(|id| self.views.get_mut(&id))
                .is_some_and(|view| view.handle_axis(event));
            if consumed {
                return;
            }
        }
        self.seat.pointer_axis(event);
    }

    /// End any move or resize and forget the pressed interactive.
    pub(super) fn release_pointer_grabs(&mut self) {
        if self.cursor.release().is_some() {
            self.seat.set_cursor_image(CursorImage::Default);
        }
        self.button_grab = None;
    }

    /// Open the root menu at `(x, y)`. The right button that opened it is
    /// routed to the menu, so releasing it selects.
    fn open_menu(&mut self, x: i32, y: i32) -> Result<(), WlmakerError> {
        self.close_menu();
        let id = self.allocate_view_id();
        let (mut view, menu) =
            RootMenu::create(self.scene.as_mut(), self.detached, id, &self.config.menu)?;
        let output = self
            .outputs
            .output_at_or_primary(f64::from(x), f64::from(y))
            .and_then(|o| self.outputs.output_box(o));
        menu.place(self.scene.as_mut(), &mut view, x, y, output);
        let node = menu.node();
        self.register_view(view);
        self.menu = Some(menu);
        self.map_view_at(id, Layer::Overlay)?;
        self.button_grab = Some((id, node));
        tracing::debug!(view = %id, x, y, "root menu opened");
        Ok(())
    }

    pub(super) fn close_menu(&mut self) {
        let Some(id) = self.menu.as_ref().map(RootMenu::view) else {
            return;
        };
        if self.button_grab.is_some_and(|(view, _)| view == id) {
            self.button_grab = None;
        }
        if let Err(e) = self.destroy_view(id) {
            tracing::warn!(view = %id, error = %e, "failed to close root menu");
        }
    }
}
