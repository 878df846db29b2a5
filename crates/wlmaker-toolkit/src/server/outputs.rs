//! Output hotplug and reconfiguration.

use wlmaker_common::{OutputId, Rect, WlmakerError};

use super::Server;
use crate::output::{Output, OutputEvent};

impl Server {
    /// Add `output` to the layout. Fails for a duplicate id.
    pub fn add_output(&mut self, output: Output) -> Result<(), WlmakerError> {
        self.outputs.add(output)?;
        self.handle_output_events();
        Ok(())
    }

    /// Returns false for an unknown output.
    pub fn remove_output(&mut self, id: OutputId) -> bool {
        let removed = self.outputs.remove(id).is_some();
        self.handle_output_events();
        removed
    }

    /// Apply a position, mode or scale change to output `id`.
    pub fn update_output(
        &mut self,
        id: OutputId,
        f: impl FnOnce(&mut Output),
    ) -> Result<(), WlmakerError> {
        self.outputs.update(id, f)?;
        self.handle_output_events();
        Ok(())
    }

    /// Apply what the layout reported through its change signal: the
    /// session lock follows each output, then everything that depends on
    /// the layout is re-derived once.
    fn handle_output_events(&mut self) {
        let events = std::mem::take(&mut *self.output_events.borrow_mut());
        if events.is_empty() {
            return;
        }
        for event in events {
            match event {
                OutputEvent::Added(id) => {
                    if let (Some(lock), Some(output)) =
                        (self.session_lock.as_mut(), self.outputs.get(id))
                    {
                        lock.output_added(output);
                    }
                }
                OutputEvent::Removed(id) => {
                    self.usable.remove(&id);
                    let confirmed = match self.session_lock.as_mut() {
                        Some(lock) => lock.output_removed(self.scene.as_mut(), self.seat.as_mut(), id),
                        None => false,
                    };
                    if confirmed {
                        self.engage_lock();
                    }
                }
                OutputEvent::Changed(id) => {
                    if let (Some(lock), Some(output)) =
                        (self.session_lock.as_mut(), self.outputs.get(id))
                    {
                        lock.output_changed(self.scene.as_mut(), &mut self.serials, output);
                    }
                }
            }
        }
        self.layout_changed();
    }

    /// Re-derive everything that depends on the output layout.
    fn layout_changed(&mut self) {
        let extents = self.outputs.extents();
        let actions = self.hot_corner.update_extents(&mut self.timers, extents);
        self.execute_actions(actions);

        let ids: Vec<OutputId> = self.outputs.iter().map(|o| o.id).collect();
        for id in ids {
            self.arrange_output(id);
        }
        self.place_chrome();
    }

    /// Clip at the top of the first output, dock right below it.
    fn place_chrome(&mut self) {
        let Some(area) = self.outputs.iter().next().map(Output::layout_box) else {
            return;
        };
        if let Some(clip) = &self.clip {
            if let Some(view) = self.views.get_mut(&clip.view()) {
                clip.place(self.scene.as_mut(), view, area);
            }
        }
        let y = self
            .clip
            .as_ref()
            .map_or(0, |_| self.config.dock.tile_size as i32);
        if let Some(dock) = &self.dock {
            if let Some(view) = self.views.get_mut(&dock.view()) {
                dock.place(self.scene.as_mut(), view, area, y);
            }
        }
    }

    /// Usable area of `id`: the output minus exclusive zones.
    pub fn usable_area(&self, id: OutputId) -> Option<Rect> {
        self.usable.get(&id).copied()
    }
}
