//! Drawing modes and the provider tool each one arms.

use serde::{Deserialize, Serialize};

/// The single active drawing mode.
///
/// Changes only through an explicit user toggle. Data arriving from the
/// map provider or the network never moves the mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawingMode {
    #[default]
    Idle,
    DrawingLine,
    DrawingRectangle,
}

/// A drawing tool exposed by the map provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawingTool {
    Polyline,
    Rectangle,
}

impl DrawingMode {
    /// The provider tool this mode arms, or `None` for `Idle`.
    pub fn tool(self) -> Option<DrawingTool> {
        match self {
            DrawingMode::Idle => None,
            DrawingMode::DrawingLine => Some(DrawingTool::Polyline),
            DrawingMode::DrawingRectangle => Some(DrawingTool::Rectangle),
        }
    }
}
