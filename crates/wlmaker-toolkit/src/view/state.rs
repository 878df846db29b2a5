//! Maximized, fullscreen, shaded and iconified states.

use wlmaker_common::Rect;

use super::View;
use crate::scene::SceneGraph;

/// Target boxes for the output a view is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewAreas {
    /// Output box minus exclusive zones.
    pub maximize: Rect,
    /// Whole output box.
    pub fullscreen: Rect,
}

impl View {
    fn is_normal(&self) -> bool {
        !self.maximized && !self.fullscreen
    }

    fn maximize_box(&self, areas: &ViewAreas) -> Rect {
        match &self.decoration {
            Some(decoration) => decoration.content_area(areas.maximize),
            None => areas.maximize,
        }
    }

    /// Toggle maximized. Setting the current state again does nothing.
    pub fn set_maximized(&mut self, scene: &mut dyn SceneGraph, maximized: bool, areas: &ViewAreas) {
        if self.maximized == maximized {
            return;
        }
        if maximized && self.is_normal() {
            self.organic = self.geometry();
        }
        self.maximized = maximized;
        self.imp.set_maximized(maximized);

        // A fullscreen view keeps its geometry; the flag applies on leaving.
        if self.fullscreen {
            return;
        }
        let target = if maximized {
            self.maximize_box(areas)
        } else {
            self.organic
        };
        tracing::debug!(view = %self.id, maximized, ?target, "maximize changed");
        self.set_geometry(scene, target);
    }

    /// Toggle fullscreen. The caller moves the view between the shell and
    /// fullscreen layers.
    pub fn set_fullscreen(&mut self, scene: &mut dyn SceneGraph, fullscreen: bool, areas: &ViewAreas) {
        if self.fullscreen == fullscreen {
            return;
        }
        if fullscreen && self.is_normal() {
            self.organic = self.geometry();
        }
        self.fullscreen = fullscreen;
        self.imp.set_fullscreen(fullscreen);

        if let Some(decoration) = &self.decoration {
            decoration.set_visible(scene, !fullscreen);
            if !fullscreen && self.shaded {
                decoration.set_resizebar_visible(scene, false);
            }
        }
        if fullscreen && self.shaded {
            scene.set_enabled(self.content, true);
        }

        let target = if fullscreen {
            areas.fullscreen
        } else if self.maximized {
            self.maximize_box(areas)
        } else {
            self.organic
        };
        tracing::debug!(view = %self.id, fullscreen, ?target, "fullscreen changed");
        self.set_geometry(scene, target);
        if !fullscreen && self.shaded {
            scene.set_enabled(self.content, false);
        }
    }

    /// Toggle shading. Only decorated views can be shaded: the content and
    /// resize bar are hidden, the title bar stays. Returns whether the
    /// state is now as requested.
    pub fn set_shaded(&mut self, scene: &mut dyn SceneGraph, shaded: bool) -> bool {
        let Some(decoration) = &self.decoration else {
            tracing::debug!(view = %self.id, "shading needs a decoration");
            return !shaded;
        };
        if self.shaded == shaded {
            return true;
        }
        self.shaded = shaded;
        if !self.fullscreen {
            scene.set_enabled(self.content, !shaded);
            decoration.set_resizebar_visible(scene, !shaded);
        }
        tracing::debug!(view = %self.id, shaded, "shade changed");
        true
    }

    /// Record the iconified flag. Workspace membership is handled by the
    /// caller.
    pub fn set_iconified(&mut self, scene: &mut dyn SceneGraph, iconified: bool) {
        if self.iconified == iconified {
            return;
        }
        self.iconified = iconified;
        if iconified {
            self.clear_pointer_focus(scene);
        }
        scene.set_enabled(self.root, !iconified && self.is_mapped());
    }
}
