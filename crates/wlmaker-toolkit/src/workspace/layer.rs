use serde::{Deserialize, Serialize};

/// Workspace layers, in draw order (bottom first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    Background,
    Bottom,
    Shell,
    Top,
    Fullscreen,
    Overlay,
}

impl Layer {
    pub const COUNT: usize = 6;

    pub const ALL: [Layer; Layer::COUNT] = [
        Layer::Background,
        Layer::Bottom,
        Layer::Shell,
        Layer::Top,
        Layer::Fullscreen,
        Layer::Overlay,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Layers a layer-shell surface may ask for.
    pub fn is_layer_shell(self) -> bool {
        matches!(
            self,
            Layer::Background | Layer::Bottom | Layer::Top | Layer::Overlay
        )
    }
}
