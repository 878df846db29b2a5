//! Scripted input for the headless runner.
//!
//! A script is a JSON-lines file. Each line carries a `kind` and an
//! optional `at_ms` offset from startup:
//!
//! ```text
//! {"at_ms": 0,   "kind": "window", "surface": 1, "width": 640, "height": 480}
//! {"at_ms": 100, "kind": "motion", "x": 300, "y": 60}
//! {"at_ms": 120, "kind": "button", "button": 272, "state": "pressed"}
//! {"at_ms": 900, "kind": "action", "action": "quit"}
//! ```
//!
//! Blank lines and lines starting with `#` are skipped.

use std::path::Path;

use serde::Deserialize;
use wlmaker_common::{Action, WlmakerError};
use wlmaker_toolkit::input::{AxisOrientation, ButtonState};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReplayStep {
    #[serde(default)]
    pub at_ms: u64,
    #[serde(flatten)]
    pub input: ReplayInput,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReplayInput {
    Motion {
        x: f64,
        y: f64,
    },
    Button {
        button: u32,
        state: ButtonState,
    },
    Axis {
        orientation: AxisOrientation,
        delta: f64,
    },
    /// A client maps a toplevel of the given size.
    Window {
        surface: u32,
        width: u32,
        height: u32,
    },
    /// The client of `surface` destroys its toplevel.
    CloseWindow {
        surface: u32,
    },
    Action {
        action: Action,
    },
    Workspace {
        index: usize,
    },
}

/// Parse a script. Steps must not go back in time.
pub fn parse_script(text: &str) -> Result<Vec<ReplayStep>, WlmakerError> {
    let mut steps: Vec<ReplayStep> = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let number = index + 1;
        let step: ReplayStep = serde_json::from_str(line)
            .map_err(|e| WlmakerError::Other(format!("replay line {number}: {e}")))?;
        if let Some(last) = steps.last() {
            if step.at_ms < last.at_ms {
                return Err(WlmakerError::Other(format!(
                    "replay line {number}: at_ms {} is before {}",
                    step.at_ms, last.at_ms
                )));
            }
        }
        steps.push(step);
    }
    Ok(steps)
}

pub fn load_script(path: &Path) -> Result<Vec<ReplayStep>, WlmakerError> {
    let text = std::fs::read_to_string(path)?;
    let steps = parse_script(&text)?;
    tracing::info!(path = %path.display(), steps = steps.len(), "replay script loaded");
    Ok(steps)
}
