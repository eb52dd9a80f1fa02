use crate::util::unit::Color3;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Configuration for how a scene is drawn. None of these options affect the
/// grid itself or where anything ends up on screen, only how it looks.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct RenderConfig {
    /// Controls how vertical lines on tile walls are drawn. When false (the
    /// default), each wall corner gets a line all the way down to the lowest
    /// neighbouring height, so every tile reads as its own column. When true,
    /// the line stops at the next tile down, so neighbouring walls at the
    /// same height merge into one surface.
    pub join_side_faces: bool,

    /// How much a tile lightens while the cursor is on it, from 0 (not at
    /// all) to 1 (fully white). It darkens by the same amount when the
    /// cursor leaves.
    #[validate(range(min = 0.0, max = 1.0))]
    pub hover_brightness: f64,

    /// Fills the whole viewport at the start of every frame
    pub background: Color3,

    /// Fill colour of tile tops and walls, for tiles without an occupant
    pub land_color: Color3,

    /// Colour of tile borders and wall lines
    pub border_color: Color3,

    /// Colour of the cursor outline
    pub cursor_color: Color3,

    /// Empty part of a progress bar
    pub bar_background: Color3,

    /// Outline of a progress bar
    pub bar_border: Color3,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            join_side_faces: false,
            hover_brightness: 0.2,
            background: Color3::new_int(8, 8, 8),
            land_color: Color3::BLACK,
            border_color: Color3::WHITE,
            cursor_color: Color3::new_int(0, 255, 0),
            bar_background: Color3::new_int(30, 30, 30),
            bar_border: Color3::new_int(8, 8, 8),
        }
    }
}
