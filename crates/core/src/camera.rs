//! The camera turns grid coordinates into screen coordinates. It's an
//! orthographic isometric projection with a continuous yaw angle, plus zoom
//! and pan.
//!
//! Anything derived from the angle (axis flips, corner shift, per-tile
//! offset vectors) is only recomputed in [Camera::refresh], and only when the
//! angle has changed since the last refresh. Call `refresh` once at the start
//! of every frame, before any projection.

use crate::{
    config::{CameraConfig, Viewport},
    timing::{Scalar, TimingFunction},
    util::unit::{Point2, Vector2},
};
use anyhow::Context;
use log::{debug, trace, warn};
use nalgebra::{Matrix2x3, Vector3};
use std::{
    f64::consts::FRAC_PI_2,
    time::{Duration, Instant},
};
use validator::Validate;

/// Screen y offset per unit of tile height, in tiles (scaled by zoom)
pub const DEPTH_Y_OFFSET: f64 = 0.5;
/// Screen y offset per unit of mesh height, in tiles (scaled by zoom)
pub const HEIGHT_Y_OFFSET: f64 = -0.75;

/// How the grid is flipped for the current angle. Painting and projection
/// both work in a mirrored/swapped copy of the grid, so that the tile nearest
/// the viewer is always drawn last.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Orientation {
    /// Rows are mirrored (`sin(angle) < 0`)
    pub reverse_rows: bool,
    /// Columns are mirrored (`cos(angle) < 0`)
    pub reverse_cols: bool,
    /// Rows and columns trade places (`tan(angle) < 0`)
    pub swap_axes: bool,
    /// Rotation of corner labels. See [Corners::back](crate::Corners::back).
    pub corner_shift: usize,
}

impl Orientation {
    pub fn from_angle(angle: f64) -> Self {
        let reverse_rows = angle.sin() < 0.0;
        let reverse_cols = angle.cos() < 0.0;
        let swap_axes = angle.tan() < 0.0;
        let corner_shift = match (reverse_rows, reverse_cols) {
            (true, true) => 2,
            (true, false) => 1,
            (false, true) => 3,
            (false, false) => 0,
        };
        Self {
            reverse_rows,
            reverse_cols,
            swap_axes,
            corner_shift,
        }
    }
}

/// Screen offset of one step along each projected grid axis, before zoom.
/// "Row" and "col" here are the axes after the [Orientation] is applied.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Basis {
    pub row_x: f64,
    pub row_y: f64,
    pub col_x: f64,
    pub col_y: f64,
}

impl Basis {
    pub fn from_angle(angle: f64) -> Self {
        // The orientation takes care of whole quarter turns, so only the
        // angle within the current quarter matters here
        let draw_angle = angle.rem_euclid(FRAC_PI_2);
        Self {
            row_x: draw_angle.cos(),
            row_y: 0.5 * draw_angle.sin(),
            col_x: -draw_angle.sin(),
            col_y: 0.5 * draw_angle.cos(),
        }
    }

    pub fn row_offset(self) -> Vector2 {
        Vector2::new(self.row_x, self.row_y)
    }

    pub fn col_offset(self) -> Vector2 {
        Vector2::new(self.col_x, self.col_y)
    }

    /// Maps `(row, col, elevation)` to a screen offset. Elevation is already
    /// in screen rows, so it passes straight through to y.
    pub fn matrix(self) -> Matrix2x3<f64> {
        Matrix2x3::new(
            self.row_x, self.col_x, 0.0, //
            self.row_y, self.col_y, 1.0,
        )
    }
}

/// The world point a rotation turns around, plus where it was on screen when
/// the rotation started
#[derive(Copy, Clone, Debug)]
struct Pivot {
    row: f64,
    col: f64,
    depth: f64,
    screen_offset: Point2,
}

/// A rotatable, pannable, zoomable view over a grid of the given size. There
/// should be one of these per viewport.
#[derive(Clone, Debug)]
pub struct Camera {
    config: CameraConfig,
    viewport: Viewport,
    rows: usize,
    cols: usize,

    angle: Scalar,
    target_angle: f64,
    zoom: f64,
    pan_x: Scalar,
    pan_y: Scalar,
    pivot: Option<Pivot>,

    // Derived values, cached by refresh()
    orientation: Orientation,
    basis: Basis,
    pan: Vector2,
    /// The angle moved since the last refresh, so derived values are stale
    dirty: bool,
}

impl Camera {
    /// Create a camera looking at a `rows` x `cols` grid. Fails if either
    /// config is invalid.
    pub fn new(
        config: CameraConfig,
        viewport: Viewport,
        rows: usize,
        cols: usize,
    ) -> anyhow::Result<Self> {
        config.validate().context("invalid camera config")?;
        viewport.validate().context("invalid viewport")?;

        let angle = config.initial_angle;
        Ok(Self {
            config,
            viewport,
            rows,
            cols,
            angle: Scalar::Fixed(angle),
            target_angle: angle,
            zoom: config.zoom,
            pan_x: Scalar::default(),
            pan_y: Scalar::default(),
            pivot: None,
            orientation: Orientation::from_angle(angle),
            basis: Basis::from_angle(angle),
            pan: Vector2::ZERO,
            dirty: false,
        })
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Orientation as of the last refresh
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Projection basis as of the last refresh
    pub fn basis(&self) -> Basis {
        self.basis
    }

    /// Pan offset as of the last refresh
    pub fn pan(&self) -> Vector2 {
        self.pan
    }

    pub fn angle_at(&self, now: Instant) -> f64 {
        self.angle.value_at(now)
    }

    /// The angle the camera is turning toward, or its current angle if it
    /// isn't turning
    pub fn target_angle(&self) -> f64 {
        self.target_angle
    }

    /// Is anything about the view still in motion?
    pub fn is_animating_at(&self, now: Instant) -> bool {
        self.angle.is_animating_at(now)
            || self.pan_x.is_animating_at(now)
            || self.pan_y.is_animating_at(now)
    }

    /// Bring derived values up to date for a frame drawn at `now`. The
    /// angle-dependent values are only recomputed while the angle is moving.
    /// During a rotation the pan is adjusted so the pivot stays where it was
    /// on screen.
    pub fn refresh(&mut self, now: Instant) {
        if self.dirty {
            let angle = self.angle.value_at(now);
            self.orientation = Orientation::from_angle(angle);
            self.basis = Basis::from_angle(angle);
            trace!("Camera angle {:.4} -> {:?}", angle, self.orientation);
        }

        self.pan =
            Vector2::new(self.pan_x.value_at(now), self.pan_y.value_at(now));

        if self.dirty {
            if let Some(pivot) = self.pivot {
                let pos =
                    self.point_screen_pos(pivot.row, pivot.col, pivot.depth);
                let dx = pos.x - pivot.screen_offset.x;
                let dy = pos.y - pivot.screen_offset.y;
                self.pan_x.offset(dx);
                self.pan_y.offset(dy);
                self.pan += Vector2::new(dx, dy);
            }
            self.dirty = self.angle.is_animating_at(now);
        }
    }

    /// Screen position of a tile-space coordinate. Integer `row`/`col` give
    /// the back corner of that tile. `depth` is in tile heights and `height`
    /// in mesh units; both move the point up the screen.
    pub fn screen_pos(
        &self,
        row: f64,
        col: f64,
        depth: f64,
        height: f64,
    ) -> Point2 {
        let row = if self.orientation.reverse_rows {
            self.rows as f64 - row - 1.0
        } else {
            row
        };
        let col = if self.orientation.reverse_cols {
            self.cols as f64 - col - 1.0
        } else {
            col
        };
        self.project(row, col, depth, height)
    }

    /// Screen position of a continuous world point, e.g. the middle of a tile
    /// at `(row + 0.5, col + 0.5)`. Unlike [Self::screen_pos], this doesn't
    /// snap mirrored coordinates to a tile's back corner.
    pub fn point_screen_pos(&self, row: f64, col: f64, depth: f64) -> Point2 {
        let row = if self.orientation.reverse_rows {
            self.rows as f64 - row
        } else {
            row
        };
        let col = if self.orientation.reverse_cols {
            self.cols as f64 - col
        } else {
            col
        };
        self.project(row, col, depth, 0.0)
    }

    /// Project already-mirrored coordinates
    fn project(&self, row: f64, col: f64, depth: f64, height: f64) -> Point2 {
        let (row, col) = if self.orientation.swap_axes {
            (col, row)
        } else {
            (row, col)
        };
        let elevation = height * HEIGHT_Y_OFFSET - depth * DEPTH_Y_OFFSET;
        let offset: Point2 = (self.basis.matrix()
            * Vector3::new(row, col, elevation)
            * self.zoom)
            .into();
        Point2::new(
            offset.x + self.viewport.width as f64 / 2.0 - self.pan.x,
            offset.y + self.viewport.height as f64 / 2.0 - self.pan.y,
        )
    }

    /// Start turning toward `target` (radians) around a world point. The
    /// turn takes longer the further it has to go. The pivot's current
    /// screen position is recorded, and every refresh during the turn pans
    /// to keep it there. A turn to or from a non-finite angle is ignored.
    pub fn rotate_to_angle(
        &mut self,
        now: Instant,
        pivot_row: f64,
        pivot_col: f64,
        pivot_depth: f64,
        target: f64,
    ) {
        let current = self.angle.value_at(now);
        let distance = (target - current).abs() / FRAC_PI_2;
        if !distance.is_finite() {
            warn!("Ignoring rotation from {} to {}", current, target);
            return;
        }
        let screen_offset =
            self.point_screen_pos(pivot_row, pivot_col, pivot_depth);
        self.pivot = Some(Pivot {
            row: pivot_row,
            col: pivot_col,
            depth: pivot_depth,
            screen_offset,
        });

        let duration = self.config.rotation_speed().mul_f64(distance);
        debug!(
            "Rotating camera {:.3} -> {:.3} over {:?} around ({}, {})",
            current, target, duration, pivot_row, pivot_col
        );
        self.target_angle = target;
        self.angle.ease_to(now, target, duration, TimingFunction::Ease);
        self.dirty = true;
    }

    /// Turn by `delta` radians from the current target angle, so repeated
    /// rotations stack up even while one is still playing
    pub fn rotate(
        &mut self,
        now: Instant,
        pivot_row: f64,
        pivot_col: f64,
        pivot_depth: f64,
        delta: f64,
    ) {
        self.rotate_to_angle(
            now,
            pivot_row,
            pivot_col,
            pivot_depth,
            self.target_angle + delta,
        );
    }

    /// Quarter turn counter-clockwise around a point
    pub fn rotate_left(
        &mut self,
        now: Instant,
        row: f64,
        col: f64,
        depth: f64,
    ) {
        self.rotate(now, row, col, depth, -FRAC_PI_2);
    }

    /// Quarter turn clockwise around a point
    pub fn rotate_right(
        &mut self,
        now: Instant,
        row: f64,
        col: f64,
        depth: f64,
    ) {
        self.rotate(now, row, col, depth, FRAC_PI_2);
    }

    /// Move the pan offset to the given value, eased if the config says so
    pub fn pan_to(&mut self, now: Instant, x: f64, y: f64) {
        let duration = self.config.pan_duration();
        self.pan_x.ease_to(now, x, duration, TimingFunction::Ease);
        self.pan_y.ease_to(now, y, duration, TimingFunction::Ease);
        if duration.is_zero() {
            self.pan = Vector2::new(x, y);
        }
    }

    /// Shift the view by a screen distance right away, e.g. from a mouse
    /// drag. Dragging right moves the scene right.
    pub fn drag_pan(&mut self, now: Instant, dx: f64, dy: f64) {
        let x = self.pan_x.value_at(now) - dx;
        let y = self.pan_y.value_at(now) - dy;
        self.pan_x.set(x);
        self.pan_y.set(y);
        self.pan = Vector2::new(x, y);
        self.reanchor_pivot();
    }

    /// Zoom by `zoom_scroll_factor` per step, keeping the screen point
    /// `anchor` over the same spot in the world. Positive steps zoom out.
    pub fn zoom_at(&mut self, steps: i32, anchor: Point2) {
        let scale = self.config.zoom_scroll_factor.powi(steps);
        let half_width = self.viewport.width as f64 / 2.0;
        let half_height = self.viewport.height as f64 / 2.0;

        self.zoom *= scale;
        let x = (self.pan.x + anchor.x - half_width) * scale - anchor.x
            + half_width;
        let y = (self.pan.y + anchor.y - half_height) * scale - anchor.y
            + half_height;
        self.pan_x.set(x);
        self.pan_y.set(y);
        self.pan = Vector2::new(x, y);
        self.reanchor_pivot();
        debug!("Zoom is now {:.2}", self.zoom);
    }

    /// Pan the minimum distance that puts `point` (in screen space) inside
    /// the follow margins. `reserved_right` is a strip on the right edge of
    /// the viewport that's covered by something else. Returns whether the
    /// camera moved.
    pub fn follow(
        &mut self,
        now: Instant,
        point: Point2,
        reserved_right: f64,
    ) -> bool {
        let margin_x = self.zoom * self.config.follow_margin_x;
        let margin_y = self.zoom * self.config.follow_margin_y;
        let right = self.viewport.width as f64 - margin_x - reserved_right;
        let bottom = self.viewport.height as f64 - margin_y;

        let dx = if point.x < margin_x {
            point.x - margin_x
        } else if point.x > right {
            point.x - right
        } else {
            0.0
        };
        let dy = if point.y < margin_y {
            point.y - margin_y
        } else if point.y > bottom {
            point.y - bottom
        } else {
            0.0
        };

        if dx == 0.0 && dy == 0.0 {
            false
        } else {
            let x = self.pan_x.value_at(now) + dx;
            let y = self.pan_y.value_at(now) + dy;
            self.pan_to(now, x, y);
            true
        }
    }

    /// The view jumped outside of a rotation, so the pivot's recorded screen
    /// position needs to move with it
    fn reanchor_pivot(&mut self) {
        if let Some(pivot) = self.pivot {
            let screen_offset =
                self.point_screen_pos(pivot.row, pivot.col, pivot.depth);
            self.pivot = Some(Pivot {
                screen_offset,
                ..pivot
            });
        }
    }
}
