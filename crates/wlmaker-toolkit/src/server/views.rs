//! View lifecycle, stacking, activation and window states.

use wlmaker_common::{ClientCredentials, OutputId, ToolkitError, ViewId, WlmakerError};

use super::{Server, ServerEvent};
use crate::scene::SceneHit;
use crate::view::{
    arrange_layer, exclusive_area, LayerHandle, LayerSurfaceState, LayerView, ToplevelHandle,
    ToplevelView, View, ViewAreas, ViewImpl, ViewKind,
};
use crate::workspace::Layer;

/// Offset between successively placed windows.
const CASCADE_STEP: i32 = 32;

impl Server {
    /// Wrap `imp` in a new, unmapped view.
    pub fn create_view(
        &mut self,
        imp: Box<dyn ViewImpl>,
        decorated: bool,
        credentials: Option<ClientCredentials>,
    ) -> Result<ViewId, WlmakerError> {
        let id = self.allocate_view_id();
        let decoration = decorated.then_some(&self.config.decoration);
        let view = View::new(self.scene.as_mut(), self.detached, id, imp, decoration, credentials)?;
        tracing::debug!(%id, kind = ?view.kind(), decorated, "view created");
        self.register_view(view);
        Ok(id)
    }

    /// A new XDG toplevel, decorated by the server.
    pub fn add_toplevel(
        &mut self,
        handle: Box<dyn ToplevelHandle>,
        size: (u32, u32),
        credentials: Option<ClientCredentials>,
    ) -> Result<ViewId, WlmakerError> {
        self.create_view(Box::new(ToplevelView::new(handle, size)), true, credentials)
    }

    /// A new layer-shell surface on `state.output`. Only the layer-shell
    /// layers are accepted.
    pub fn add_layer_surface(
        &mut self,
        handle: Box<dyn LayerHandle>,
        state: LayerSurfaceState,
        credentials: Option<ClientCredentials>,
    ) -> Result<ViewId, WlmakerError> {
        if !state.layer.is_layer_shell() {
            return Err(ToolkitError::Creation {
                what: "layer surface",
                reason: format!("{:?} is not a layer-shell layer", state.layer),
            }
            .into());
        }
        let id = self.create_view(Box::new(LayerView::new(handle, state)), false, credentials)?;
        if let Some(view) = self.views.get_mut(&id) {
            view.set_output(Some(state.output));
            view.set_anchor(state.anchor);
        }
        Ok(id)
    }

    fn view_ref(&self, id: ViewId) -> Result<&View, ToolkitError> {
        self.views.get(&id).ok_or(ToolkitError::UnknownView(id))
    }

    /// Index of the workspace `id` is mapped to.
    pub fn workspace_of(&self, id: ViewId) -> Option<usize> {
        self.views.get(&id)?.workspace().map(|ws| ws.0 as usize)
    }

    /// Map into the current workspace, on the layer the view kind
    /// belongs to. Windows are placed and activated.
    ///
    /// # Panics
    ///
    /// When the view is already mapped.
    pub fn map_view(&mut self, id: ViewId) -> Result<(), WlmakerError> {
        let view = self.view_ref(id)?;
        let kind = view.kind();
        let layer = match kind {
            ViewKind::Toplevel => Layer::Shell,
            ViewKind::Layer => view
                .imp_as::<LayerView>()
                .map_or(Layer::Top, |l| l.state().layer),
            ViewKind::Dock | ViewKind::Clip => Layer::Top,
            ViewKind::Menu => Layer::Overlay,
        };
        self.map_view_at(id, layer)?;

        match kind {
            ViewKind::Toplevel => {
                self.place_window(id);
                self.activate_view(Some(id));
            }
            ViewKind::Layer => {
                if let Some(output) = self.views.get(&id).and_then(View::output) {
                    self.arrange_output(output);
                }
            }
            _ => {}
        }
        Ok(())
    }

    pub(super) fn map_view_at(&mut self, id: ViewId, layer: Layer) -> Result<(), WlmakerError> {
        let ws = &mut self.workspaces[self.current];
        let view = self.views.get_mut(&id).ok_or(ToolkitError::UnknownView(id))?;
        view.map(self.scene.as_mut(), ws.id(), layer, ws.layer_node(layer));
        ws.attach(layer, id);
        self.events.emit(&ServerEvent::ViewMapped(id));
        Ok(())
    }

    /// Cascade new windows from the top-left of the usable area of the
    /// output under the pointer.
    fn place_window(&mut self, id: ViewId) {
        let pointer = self.cursor.position();
        let output = self.outputs.output_at_or_primary(pointer.x, pointer.y);
        let area = output
            .and_then(|o| self.usable.get(&o).copied().or_else(|| self.outputs.output_box(o)))
            .unwrap_or_default();
        let n = (self.workspaces[self.current]
            .views(Layer::Shell)
            .len()
            .saturating_sub(1)
            % 8) as i32;

        let Some(view) = self.views.get_mut(&id) else {
            return;
        };
        let top = view.decoration().map_or(0, |d| d.extents().0 as i32);
        let offset = CASCADE_STEP * (n + 1);
        view.set_output(output);
        view.set_position(self.scene.as_mut(), area.x + offset, area.y + top + offset);
    }

    /// Take the view out of its workspace. Unmapping an unmapped view is
    /// ignored.
    pub fn unmap_view(&mut self, id: ViewId) -> Result<(), WlmakerError> {
        let view = self.views.get_mut(&id).ok_or(ToolkitError::UnknownView(id))?;
        let Some(workspace) = view.workspace() else {
            tracing::debug!(%id, "unmap of an unmapped view ignored");
            return Ok(());
        };
        let kind = view.kind();
        let output = view.output();
        if view.is_active() {
            view.set_active(self.scene.as_mut(), self.seat.as_mut(), false);
        }
        view.unmap(self.scene.as_mut(), self.detached);

        let index = workspace.0 as usize;
        let ws = &mut self.workspaces[index];
        let was_activated = ws.activated() == Some(id);
        ws.detach(id);
        self.cursor.view_unmapped(id);
        if self.button_grab.is_some_and(|(view, _)| view == id) {
            self.button_grab = None;
        }
        self.events.emit(&ServerEvent::ViewUnmapped(id));

        if was_activated && index == self.current {
            let next = self.workspaces[index].topmost_window(None);
            self.activate_view(next);
        }
        if kind == ViewKind::Layer {
            if let Some(output) = output {
                self.arrange_output(output);
            }
        }
        Ok(())
    }

    /// Unmap if needed and release the view with everything it holds.
    pub fn destroy_view(&mut self, id: ViewId) -> Result<(), WlmakerError> {
        self.unmap_view(id)?;
        let view = self.views.remove(&id).ok_or(ToolkitError::UnknownView(id))?;
        self.owners.remove(&view.root());
        if self.dock.as_ref().is_some_and(|d| d.view() == id) {
            self.dock = None;
        }
        if self.clip.as_ref().is_some_and(|c| c.view() == id) {
            self.clip = None;
        }
        if self.menu.as_ref().is_some_and(|m| m.view() == id) {
            self.menu = None;
        }
        view.destroy(self.scene.as_mut());
        tracing::debug!(%id, "view destroyed");
        Ok(())
    }

    /// Make `id` the activated view of the current workspace, deactivating
    /// the previous one. While the session is locked only the workspace's
    /// record changes; activation is applied on unlock.
    pub fn activate_view(&mut self, id: Option<ViewId>) {
        if let Some(id) = id {
            let eligible = self.views.get(&id).is_some_and(|v| {
                v.kind() == ViewKind::Toplevel
                    && !v.is_iconified()
                    && v.workspace().map(|ws| ws.0 as usize) == Some(self.current)
            });
            if !eligible {
                tracing::debug!(%id, "view cannot be activated");
                return;
            }
        }

        let ws = &mut self.workspaces[self.current];
        let previous = ws.activated();
        if previous == id {
            return;
        }
        ws.set_activated(id);
        if !self.lock_engaged {
            if let Some(prev) = previous.and_then(|p| self.views.get_mut(&p)) {
                prev.set_active(self.scene.as_mut(), self.seat.as_mut(), false);
            }
            if let Some(view) = id.and_then(|v| self.views.get_mut(&v)) {
                view.set_active(self.scene.as_mut(), self.seat.as_mut(), true);
            }
        }
        tracing::debug!(?previous, activated = ?id, "activation changed");
        self.events.emit(&ServerEvent::ViewActivated(id));
    }

    /// Bring view flags and keyboard focus in line with the current
    /// workspace's activated view.
    pub(super) fn sync_activation(&mut self) {
        let activated = self.workspaces[self.current].activated();
        for (id, view) in self.views.iter_mut() {
            if view.is_active() && Some(*id) != activated {
                view.set_active(self.scene.as_mut(), self.seat.as_mut(), false);
            }
        }
        match activated.and_then(|id| self.views.get_mut(&id)) {
            Some(view) if !view.is_active() => {
                view.set_active(self.scene.as_mut(), self.seat.as_mut(), true);
            }
            Some(view) => match view.surface() {
                Some(surface) => {
                    let state = self.seat.keyboard_state();
                    self.seat.keyboard_enter(surface, &state);
                }
                None => self.seat.keyboard_clear_focus(),
            },
            None => self.seat.keyboard_clear_focus(),
        }
    }

    /// Put the view on top of its layer.
    pub fn raise_view(&mut self, id: ViewId) -> Result<(), WlmakerError> {
        let view = self.view_ref(id)?;
        let root = view.root();
        if let Some(index) = view.workspace().map(|ws| ws.0 as usize) {
            self.workspaces[index].raise(self.scene.as_mut(), id, root);
        }
        Ok(())
    }

    /// Put the view at the bottom of its layer.
    pub fn lower_view(&mut self, id: ViewId) -> Result<(), WlmakerError> {
        let view = self.view_ref(id)?;
        let root = view.root();
        if let Some(index) = view.workspace().map(|ws| ws.0 as usize) {
            self.workspaces[index].lower(self.scene.as_mut(), id, root);
        }
        Ok(())
    }

    /// Output the view is on: its recorded output while that exists, else
    /// the output under its center, else the first output.
    pub(super) fn output_of(&self, view: &View) -> Option<OutputId> {
        if let Some(output) = view.output().filter(|o| self.outputs.get(*o).is_some()) {
            return Some(output);
        }
        let g = view.geometry();
        let cx = f64::from(g.x) + f64::from(g.width) / 2.0;
        let cy = f64::from(g.y) + f64::from(g.height) / 2.0;
        self.outputs.output_at_or_primary(cx, cy)
    }

    /// Maximize and fullscreen targets for the view. Without outputs the
    /// view's own geometry is both.
    pub fn view_areas(&self, id: ViewId) -> Result<ViewAreas, ToolkitError> {
        let view = self.view_ref(id)?;
        let areas = match self.output_of(view).and_then(|o| self.outputs.output_box(o).map(|b| (o, b))) {
            Some((output, full)) => ViewAreas {
                maximize: self.usable.get(&output).copied().unwrap_or(full),
                fullscreen: full,
            },
            None => ViewAreas {
                maximize: view.geometry(),
                fullscreen: view.geometry(),
            },
        };
        Ok(areas)
    }

    /// Maximize into the usable area of the view's output, or restore
    /// the organic box.
    pub fn set_view_maximized(&mut self, id: ViewId, maximized: bool) -> Result<(), WlmakerError> {
        let areas = self.view_areas(id)?;
        let view = self.views.get_mut(&id).ok_or(ToolkitError::UnknownView(id))?;
        view.set_maximized(self.scene.as_mut(), maximized, &areas);
        Ok(())
    }

    /// Toggle fullscreen and move the view between the shell and
    /// fullscreen layers.
    pub fn set_view_fullscreen(&mut self, id: ViewId, fullscreen: bool) -> Result<(), WlmakerError> {
        let areas = self.view_areas(id)?;
        let view = self.views.get_mut(&id).ok_or(ToolkitError::UnknownView(id))?;
        if view.is_fullscreen() == fullscreen {
            return Ok(());
        }
        view.set_fullscreen(self.scene.as_mut(), fullscreen, &areas);

        let layer = if fullscreen { Layer::Fullscreen } else { Layer::Shell };
        if let Some(index) = view.workspace().map(|ws| ws.0 as usize) {
            let ws = &mut self.workspaces[index];
            if ws.layer_of(id).is_some() {
                view.move_to_layer(self.scene.as_mut(), layer, ws.layer_node(layer));
                ws.move_to_layer(id, layer);
            }
        }
        Ok(())
    }

    /// Returns whether the view is now in the requested state.
    pub fn set_view_shaded(&mut self, id: ViewId, shaded: bool) -> Result<bool, WlmakerError> {
        let view = self.views.get_mut(&id).ok_or(ToolkitError::UnknownView(id))?;
        Ok(view.set_shaded(self.scene.as_mut(), shaded))
    }

    /// Take the view off its layer, remembering it in the workspace.
    pub fn iconify_view(&mut self, id: ViewId) -> Result<(), WlmakerError> {
        let view = self.views.get_mut(&id).ok_or(ToolkitError::UnknownView(id))?;
        let Some(index) = view.workspace().map(|ws| ws.0 as usize) else {
            tracing::debug!(%id, "iconify of an unmapped view ignored");
            return Ok(());
        };
        let ws = &mut self.workspaces[index];
        let was_activated = ws.activated() == Some(id);
        if !ws.iconify(id) {
            return Ok(());
        }
        if view.is_active() {
            view.set_active(self.scene.as_mut(), self.seat.as_mut(), false);
        }
        view.set_iconified(self.scene.as_mut(), true);
        self.cursor.view_unmapped(id);
        tracing::debug!(%id, "view iconified");

        if was_activated && index == self.current {
            let next = self.workspaces[index].topmost_window(None);
            self.activate_view(next);
        }
        Ok(())
    }

    /// Put an iconified view back on top of its layer and activate it.
    pub fn restore_view(&mut self, id: ViewId) -> Result<(), WlmakerError> {
        let view = self.views.get_mut(&id).ok_or(ToolkitError::UnknownView(id))?;
        let Some(index) = view.workspace().map(|ws| ws.0 as usize) else {
            return Ok(());
        };
        let layer = if view.is_fullscreen() { Layer::Fullscreen } else { Layer::Shell };
        if !self.workspaces[index].restore(id, layer) {
            return Ok(());
        }
        view.set_iconified(self.scene.as_mut(), false);
        self.scene.raise_to_top(view.root());
        tracing::debug!(%id, "view restored");
        if index == self.current {
            self.activate_view(Some(id));
        }
        Ok(())
    }

    /// Ask the client to close.
    pub fn close_view(&mut self, id: ViewId) -> Result<(), WlmakerError> {
        self.views
            .get_mut(&id)
            .ok_or(ToolkitError::UnknownView(id))?
            .close();
        Ok(())
    }

    /// The toplevel client committed a new size.
    pub fn toplevel_commit(&mut self, id: ViewId, width: u32, height: u32) -> Result<(), WlmakerError> {
        let view = self.views.get_mut(&id).ok_or(ToolkitError::UnknownView(id))?;
        let Some(toplevel) = view.imp_as_mut::<ToplevelView>() else {
            return Err(ToolkitError::UnknownView(id).into());
        };
        toplevel.commit(width, height);
        view.update_layout(self.scene.as_mut());
        Ok(())
    }

    /// The layer client committed new state.
    pub fn layer_commit(&mut self, id: ViewId, state: LayerSurfaceState) -> Result<(), WlmakerError> {
        let view = self.views.get_mut(&id).ok_or(ToolkitError::UnknownView(id))?;
        let Some(layer_view) = view.imp_as_mut::<LayerView>() else {
            return Err(ToolkitError::UnknownView(id).into());
        };
        let previous = *layer_view.state();
        layer_view.commit(state);
        view.set_anchor(state.anchor);
        view.set_output(Some(state.output));

        if let Some(index) = view.workspace().map(|ws| ws.0 as usize) {
            if previous.layer != state.layer && state.layer.is_layer_shell() {
                let ws = &mut self.workspaces[index];
                view.move_to_layer(self.scene.as_mut(), state.layer, ws.layer_node(state.layer));
                ws.move_to_layer(id, state.layer);
            }
            if previous.output != state.output {
                self.arrange_output(previous.output);
            }
            self.arrange_output(state.output);
        }
        Ok(())
    }

    /// Place the mapped layer surfaces of `output` and recompute its
    /// usable area. Surfaces with an exclusive zone go first, each in
    /// what the previous ones left over.
    pub(super) fn arrange_output(&mut self, output: OutputId) {
        let Some(full) = self.outputs.output_box(output) else {
            self.usable.remove(&output);
            return;
        };
        let mut surfaces: Vec<(ViewId, LayerSurfaceState)> = self
            .views
            .iter()
            .filter(|(_, v)| v.is_mapped() && v.output() == Some(output))
            .filter_map(|(id, v)| v.imp_as::<LayerView>().map(|l| (*id, *l.state())))
            .collect();
        surfaces.sort_by_key(|(id, state)| (state.exclusive_zone <= 0, *id));

        let mut usable = full;
        for (id, state) in surfaces {
            let bounds = if state.exclusive_zone < 0 { full } else { usable };
            let rect = arrange_layer(bounds, &state);
            if let Some(view) = self.views.get_mut(&id) {
                view.set_geometry(self.scene.as_mut(), rect);
            }
            usable = exclusive_area(usable, &state);
        }
        tracing::debug!(%output, ?usable, "layer surfaces arranged");
        self.usable.insert(output, usable);
    }

    /// Topmost view under the point: the deepest scene node there, walked
    /// up to the first node owned by a view.
    pub fn view_at(&self, x: f64, y: f64) -> Option<(ViewId, SceneHit)> {
        let hit = self.scene.node_at(x, y)?;
        let mut node = Some(hit.node);
        while let Some(n) = node {
            if let Some(view) = self.owners.get(&n) {
                return Some((*view, hit));
            }
            node = self.scene.parent(n);
        }
        None
    }
}
