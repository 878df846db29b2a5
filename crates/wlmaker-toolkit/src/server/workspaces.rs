//! Workspace switching.

use wlmaker_common::{ToolkitError, ViewId, WorkspaceId};

use super::{Server, ServerEvent};
use crate::view::ViewKind;
use crate::workspace::Layer;

impl Server {
    /// Make workspace `index` current. Layer surfaces, the dock and the
    /// clip follow; windows stay behind. Refused while the session is
    /// locked.
    pub fn switch_workspace(&mut self, index: usize) -> bool {
        if self.lock_engaged {
            tracing::debug!(index, "workspace switch refused while locked");
            return false;
        }
        if index >= self.workspaces.len() {
            let error = ToolkitError::UnknownWorkspace(WorkspaceId(index as u32));
            tracing::warn!(%error, "workspace switch refused");
            return false;
        }
        let old = self.current;
        if index == old {
            return true;
        }

        self.release_pointer_grabs();
        self.close_menu();
        if let Some(prev) = self.workspaces[old]
            .activated()
            .and_then(|id| self.views.get_mut(&id))
        {
            prev.set_active(self.scene.as_mut(), self.seat.as_mut(), false);
        }
        for view in self.views.values_mut() {
            view.clear_pointer_focus(self.scene.as_mut());
        }
        self.cursor.set_under_pointer(None);
        self.seat.pointer_clear_focus();
        self.workspaces[old].set_enabled(self.scene.as_mut(), false);

        let mut sticky: Vec<(ViewId, Layer)> = Vec::new();
        for layer in Layer::ALL {
            for id in self.workspaces[old].views(layer) {
                if self.views.get(id).is_some_and(|v| v.kind() != ViewKind::Toplevel) {
                    sticky.push((*id, layer));
                }
            }
        }
        for (id, layer) in sticky {
            self.workspaces[old].detach(id);
            let ws = &mut self.workspaces[index];
            ws.attach(layer, id);
            if let Some(view) = self.views.get_mut(&id) {
                view.move_to_workspace(self.scene.as_mut(), ws.id(), ws.layer_node(layer));
            }
        }

        self.current = index;
        self.workspaces[index].set_enabled(self.scene.as_mut(), true);
        self.sync_activation();

        let name = self.workspaces[index].name().to_owned();
        if let Some(clip) = self.clip.as_mut() {
            clip.redraw(self.scene.as_mut(), &name);
        }
        tracing::info!(index, %name, "workspace switched");
        self.events.emit(&ServerEvent::WorkspaceChanged { index, name });
        true
    }

    /// Switch to the workspace after the current one. The workspaces do
    /// not wrap around.
    pub fn next_workspace(&mut self) -> bool {
        self.current + 1 < self.workspaces.len() && self.switch_workspace(self.current + 1)
    }

    /// Switch to the workspace before the current one, if any.
    pub fn previous_workspace(&mut self) -> bool {
        self.current > 0 && self.switch_workspace(self.current - 1)
    }
}
