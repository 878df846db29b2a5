use wlmaker_common::{OutputId, Rect, Signal, ToolkitError};

use super::Output;

#[derive(Debug, Clone, PartialEq)]
pub enum OutputEvent {
    Added(OutputId),
    Removed(OutputId),
    Changed(OutputId),
}

/// Outputs in insertion order, plus change notification.
#[derive(Debug, Default)]
pub struct OutputLayout {
    outputs: Vec<Output>,
    events: Signal<OutputEvent>,
}

impl OutputLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &Signal<OutputEvent> {
        &self.events
    }

    pub fn add(&mut self, output: Output) -> Result<(), ToolkitError> {
        if self.get(output.id).is_some() {
            return Err(ToolkitError::Creation {
                what: "output",
                reason: format!("{} is already in the layout", output.id),
            });
        }
        let id = output.id;
        tracing::debug!(%id, name = %output.name, layout_box = ?output.layout_box(), "output added");
        self.outputs.push(output);
        self.events.emit(&OutputEvent::Added(id));
        Ok(())
    }

    pub fn remove(&mut self, id: OutputId) -> Option<Output> {
        let idx = self.outputs.iter().position(|o| o.id == id)?;
        let removed = self.outputs.remove(idx);
        tracing::debug!(%id, "output removed");
        self.events.emit(&OutputEvent::Removed(id));
        Some(removed)
    }

    /// Apply `f` to the output and notify. Position, mode and scale changes
    /// all go through here.
    pub fn update(
        &mut self,
        id: OutputId,
        f: impl FnOnce(&mut Output),
    ) -> Result<(), ToolkitError> {
        let output = self
            .outputs
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or(ToolkitError::UnknownOutput(id))?;
        f(output);
        self.events.emit(&OutputEvent::Changed(id));
        Ok(())
    }

    pub fn get(&self, id: OutputId) -> Option<&Output> {
        self.outputs.iter().find(|o| o.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Output> {
        self.outputs.iter()
    }

    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }

    /// Bounding box of all outputs. Empty when there are none.
    pub fn extents(&self) -> Rect {
        self.outputs
            .iter()
            .fold(Rect::default(), |acc, o| acc.union(&o.layout_box()))
    }

    pub fn output_box(&self, id: OutputId) -> Option<Rect> {
        self.get(id).map(Output::layout_box)
    }

    pub fn output_at(&self, x: f64, y: f64) -> Option<OutputId> {
        let (px, py) = (x.floor() as i32, y.floor() as i32);
        self.outputs
            .iter()
            .find(|o| o.layout_box().contains(px, py))
            .map(|o| o.id)
    }

    /// Output at the point, or the first output when the point is off all
    /// outputs.
    pub fn output_at_or_primary(&self, x: f64, y: f64) -> Option<OutputId> {
        self.output_at(x, y)
            .or_else(|| self.outputs.first().map(|o| o.id))
    }

    /// Next free position to the right of the existing outputs.
    pub fn next_position(&self) -> (i32, i32) {
        let ext = self.extents();
        if ext.is_empty() {
            (0, 0)
        } else {
            (ext.right(), ext.y)
        }
    }
}
