mod seed;

pub use self::seed::Seed;
use crate::render::RenderConfig;
use serde::{Deserialize, Serialize};
use std::{f64::consts::FRAC_PI_4, time::Duration};
use validator::{Validate, ValidationError};

/// Largest height change per row or column, in either direction. Keeps tile
/// heights well inside `i32` on the biggest grid.
pub const MAX_GRADIENT: i32 = 1000;

/// Everything needed to set up a scene: the grid to generate, the starting
/// camera, the viewport, and how things are drawn. Every field has a
/// default, so a config file only needs the values it wants to change.
#[derive(Clone, Debug, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct SceneConfig {
    /// Seed for grid generation. See [Seed] for accepted formats.
    pub seed: Seed,

    #[validate]
    pub grid: GridConfig,

    #[validate]
    pub camera: CameraConfig,

    #[validate]
    pub viewport: Viewport,

    #[validate]
    pub cursor: CursorConfig,

    #[validate]
    pub render: RenderConfig,
}

/// Controls the shape of the generated grid. A tile's height is
/// `base_height - row * row_gradient - col * col_gradient`, plus one if it
/// rolls a bump, and never below zero.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct GridConfig {
    /// Number of rows (north to south)
    #[validate(range(min = 1, max = 512))]
    pub rows: u16,

    /// Number of columns (west to east)
    #[validate(range(min = 1, max = 512))]
    pub cols: u16,

    /// Height of the northwest tile, before bumps
    #[validate(range(min = 0, max = 10000))]
    pub base_height: i32,

    /// Height lost per row moving south. Can be negative to climb instead.
    #[validate(custom = "validate_gradient")]
    pub row_gradient: i32,

    /// Height lost per column moving east. Can be negative to climb instead.
    #[validate(custom = "validate_gradient")]
    pub col_gradient: i32,

    /// Chance that a tile gets one extra step of height
    #[validate(range(min = 0.0, max = 1.0))]
    pub bump_chance: f64,

    /// Chance that a tile rolls a random slope type. Flat is one of the
    /// options, so the real chance of a slope is a bit lower.
    #[validate(range(min = 0.0, max = 1.0))]
    pub slope_chance: f64,
}

/// Initial camera state and how the camera moves.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct CameraConfig {
    /// Starting rotation, in radians. π/4 looks at the map from the south
    /// east, with the northwest corner at the top of the screen.
    #[validate(custom = "validate_finite")]
    pub initial_angle: f64,

    /// Screen pixels per tile
    #[validate(range(min = 0.01), custom = "validate_finite")]
    pub zoom: f64,

    /// Time a 90° rotation takes, in milliseconds. Shorter or longer turns
    /// are scaled to match.
    pub rotation_speed_ms: u64,

    /// Slide the camera to pan targets instead of jumping
    pub ease_camera: bool,

    /// Length of an eased pan, in milliseconds
    pub pan_speed_ms: u64,

    /// Zoom multiplier for one scroll step. Scrolling the other way divides
    /// by it instead.
    #[validate(range(min = 0.01, max = 0.99))]
    pub zoom_scroll_factor: f64,

    /// Pan to keep the cursor on screen whenever it moves
    pub follow_cursor: bool,

    /// Space to keep between the cursor and the left/right edges of the
    /// viewport, in tiles (scaled by zoom)
    #[validate(range(min = 0.0))]
    pub follow_margin_x: f64,

    /// Space to keep between the cursor and the top/bottom edges of the
    /// viewport, in tiles (scaled by zoom)
    #[validate(range(min = 0.0))]
    pub follow_margin_y: f64,
}

impl CameraConfig {
    pub fn rotation_speed(&self) -> Duration {
        Duration::from_millis(self.rotation_speed_ms)
    }

    /// Duration of a pan, which is zero if panning isn't eased
    pub fn pan_duration(&self) -> Duration {
        if self.ease_camera {
            Duration::from_millis(self.pan_speed_ms)
        } else {
            Duration::ZERO
        }
    }
}

/// Size of the drawing surface, in pixels
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Viewport {
    #[validate(range(min = 1, max = 16384))]
    pub width: u32,
    #[validate(range(min = 1, max = 16384))]
    pub height: u32,
}

/// How the grid cursor behaves
#[derive(Copy, Clone, Debug, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct CursorConfig {
    /// Slide the cursor between tiles instead of jumping
    pub ease_cursor: bool,

    /// Length of a cursor move, and of the hover brightness change, in
    /// milliseconds
    pub speed_ms: u64,

    /// How far the cursor outline sits inside the tile's edges, as a
    /// fraction of the distance to the opposite corner
    #[validate(range(min = 0.0, max = 0.5))]
    pub inset: f64,
}

impl CursorConfig {
    /// Duration of a cursor move, which is zero if the cursor isn't eased
    pub fn move_duration(&self) -> Duration {
        if self.ease_cursor {
            Duration::from_millis(self.speed_ms)
        } else {
            Duration::ZERO
        }
    }
}

fn validate_gradient(gradient: i32) -> Result<(), ValidationError> {
    if (-MAX_GRADIENT..=MAX_GRADIENT).contains(&gradient) {
        Ok(())
    } else {
        Err(ValidationError::new("gradient"))
    }
}

fn validate_finite(value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::new("finite"))
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: 8,
            cols: 8,
            base_height: 21,
            row_gradient: 1,
            col_gradient: 2,
            bump_chance: 0.75,
            slope_chance: 0.5,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            initial_angle: FRAC_PI_4,
            zoom: 70.0,
            rotation_speed_ms: 500,
            ease_camera: true,
            pan_speed_ms: 250,
            zoom_scroll_factor: 0.85,
            follow_cursor: true,
            follow_margin_x: 2.0,
            follow_margin_y: 1.5,
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            ease_cursor: true,
            speed_ms: 200,
            inset: 0.1,
        }
    }
}
