//! The frame pipeline. A [Scene] owns a grid and everything needed to look at
//! it (camera, cursor, per-tile shading), and draws a complete frame onto any
//! [Canvas].
//!
//! Anything that lives on the grid but isn't terrain, like who owns a tile or
//! what's standing on it, comes from the caller through [Occupants]. The
//! scene only asks about it while drawing and never stores it.

use crate::{
    camera::Camera,
    config::SceneConfig,
    cursor::Cursor,
    geometry::{TileQuad, UnitKind},
    render::{Canvas, Palette, SceneRenderer, TileOutline},
    timed,
    timing::{Scalar, TimingFunction},
    util::unit::{Color3, Point2},
    world::Grid,
};
use anyhow::{ensure, Context};
use log::{debug, info};
use std::time::{Duration, Instant};
use validator::Validate;

/// What's on the grid, as far as drawing is concerned. Every method has a
/// default that reports nothing, so implementors only fill in what they
/// have. `()` is an empty grid.
pub trait Occupants {
    /// Colours of whoever owns the tile. Unowned tiles use the land and
    /// border colours from the render config.
    fn owner(&self, _row: usize, _col: usize) -> Option<Palette> {
        None
    }

    /// The unit standing on the tile, drawn right after the tile itself
    fn unit(&self, _row: usize, _col: usize) -> Option<UnitKind> {
        None
    }

    /// A unit being dragged around the screen. Drawn after every tile, so
    /// it's never covered.
    fn preview(&self) -> Option<Preview> {
        None
    }

    /// Draw anything that should sit on top of the whole map, such as a
    /// progress bar. Called once per tile in draw order, after everything
    /// else in the frame.
    fn draw_overlay(
        &self,
        _row: usize,
        _col: usize,
        _overlay: &mut TileOverlay<'_>,
    ) {
    }
}

impl Occupants for () {}

/// A unit drawn at a screen position instead of on a tile
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Preview {
    pub kind: UnitKind,
    /// Where the pointer is. The unit is drawn standing just above it.
    pub anchor: Point2,
    pub palette: Option<Palette>,
}

/// Drawing access for a single tile's overlay
pub struct TileOverlay<'a> {
    canvas: &'a mut dyn Canvas,
    renderer: &'a SceneRenderer,
    outline: &'a TileOutline,
    zoom: f64,
}

impl<'a> TileOverlay<'a> {
    pub fn canvas(&mut self) -> &mut dyn Canvas {
        &mut *self.canvas
    }

    /// Where the tile was drawn this frame
    pub fn outline(&self) -> &TileOutline {
        self.outline
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Draw a progress bar across the middle of the tile
    pub fn bar(&mut self, fraction: f64, fill: Color3) {
        self.renderer.draw_bar(
            self.canvas,
            self.outline.center(),
            self.zoom,
            fraction,
            fill,
        );
    }
}

/// A grid plus the camera, cursor, and shading state used to draw it
#[derive(Clone, Debug)]
pub struct Scene {
    config: SceneConfig,
    grid: Grid,
    camera: Camera,
    renderer: SceneRenderer,
    cursor: Cursor,
    /// Per tile, row-major. Zero is the tile's normal colour.
    brightness: Vec<Scalar>,
    /// Where each tile landed in the last frame, row-major. `None` until the
    /// first frame is drawn.
    outlines: Vec<Option<TileOutline>>,
    /// Width of a strip along the right edge of the viewport that the cursor
    /// shouldn't be followed into
    reserved_right: f64,
}

impl Scene {
    /// Generate a grid from the config and set up a scene around it. Fails
    /// if any part of the config is invalid.
    pub fn new(config: SceneConfig) -> anyhow::Result<Self> {
        config.validate().context("invalid scene config")?;
        let grid = Grid::generate(&config.grid, &config.seed)?;
        Self::with_grid(config, grid)
    }

    /// Set up a scene around an existing grid. The grid section of the
    /// config is ignored. Fails if the grid has no tiles, which can only
    /// happen if it was deserialized.
    pub fn with_grid(config: SceneConfig, grid: Grid) -> anyhow::Result<Self> {
        config.validate().context("invalid scene config")?;
        ensure!(
            !grid.tiles().is_empty(),
            "grid must have at least one tile, got {}x{}",
            grid.rows(),
            grid.cols()
        );
        let camera = Camera::new(
            config.camera,
            config.viewport,
            grid.rows(),
            grid.cols(),
        )?;
        let renderer = SceneRenderer::new(config.render)?;
        let cursor = Cursor::new(&grid, 0, 0);

        let tile_count = grid.tiles().len();
        let mut brightness = vec![Scalar::default(); tile_count];
        // The cursor starts out hovering the first tile
        brightness[grid.index(0, 0)] =
            Scalar::Fixed(config.render.hover_brightness);

        info!("Created scene for {}x{} grid", grid.rows(), grid.cols());
        Ok(Self {
            config,
            grid,
            camera,
            renderer,
            cursor,
            brightness,
            outlines: vec![None; tile_count],
            reserved_right: 0.0,
        })
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn renderer(&self) -> &SceneRenderer {
        &self.renderer
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// Where a tile was drawn in the last frame. Panics if the tile is off
    /// the grid.
    pub fn outline(&self, row: usize, col: usize) -> Option<&TileOutline> {
        self.outlines[self.grid.index(row, col)].as_ref()
    }

    /// Displayed brightness of a tile. Panics if the tile is off the grid.
    pub fn brightness_at(&self, now: Instant, row: usize, col: usize) -> f64 {
        self.brightness[self.grid.index(row, col)].value_at(now)
    }

    /// Keep the cursor out of a strip along the right edge of the viewport,
    /// e.g. one covered by a side panel
    pub fn set_reserved_right(&mut self, width: f64) {
        self.reserved_right = width.max(0.0);
    }

    /// Draw one complete frame, as it looks at `now`
    pub fn render_frame(
        &mut self,
        now: Instant,
        canvas: &mut dyn Canvas,
        occupants: &dyn Occupants,
    ) {
        timed!("Frame render", {
            self.camera.refresh(now);
            self.renderer.clear(canvas, self.camera.viewport());

            let orientation = self.camera.orientation();
            let zoom = self.camera.zoom();
            let cursor_tile =
                self.cursor.anchor_tile(now, &self.grid, orientation);

            for (row, col) in self.grid.draw_order(orientation) {
                let index = self.grid.index(row, col);
                let tile = self.grid.tile(row, col);
                let colors = self.renderer.tile_colors(
                    occupants.owner(row, col),
                    self.brightness[index].value_at(now),
                );
                let outline =
                    self.renderer.draw_tile(canvas, &self.camera, tile, colors);

                if (row, col) == cursor_tile {
                    let (show_row, show_col) =
                        self.cursor.display_position(now);
                    self.renderer.draw_cursor(
                        canvas,
                        &self.camera,
                        show_row,
                        show_col,
                        self.cursor.corners_at(now),
                        self.config.cursor.inset,
                    );
                }

                if let Some(kind) = occupants.unit(row, col) {
                    self.renderer.draw_unit(
                        canvas,
                        kind,
                        outline.top(),
                        colors,
                        zoom,
                    );
                }

                self.outlines[index] = Some(outline);
            }

            if let Some(preview) = occupants.preview() {
                let quad = TileQuad::flat_at(
                    preview.anchor.x,
                    preview.anchor.y - zoom / 2.0,
                    zoom,
                    &self.camera,
                );
                let colors = self.renderer.tile_colors(preview.palette, 0.0);
                self.renderer
                    .draw_unit(canvas, preview.kind, &quad, colors, zoom);
            }

            for (row, col) in self.grid.draw_order(orientation) {
                if let Some(outline) = &self.outlines[self.grid.index(row, col)]
                {
                    let mut overlay = TileOverlay {
                        canvas: &mut *canvas,
                        renderer: &self.renderer,
                        outline,
                        zoom,
                    };
                    occupants.draw_overlay(row, col, &mut overlay);
                }
            }
        })
    }

    /// The tile drawn at a screen point in the last frame, if any. Tiles in
    /// front win over the ones behind them.
    pub fn tile_at(&self, x: f64, y: f64) -> Option<(usize, usize)> {
        let point = Point2::new(x, y);
        self.grid
            .reverse_draw_order(self.camera.orientation())
            .find(|&(row, col)| {
                self.outline(row, col)
                    .map_or(false, |outline| outline.contains_point(point))
            })
    }

    /// Move the cursor to a tile, shifting the hover highlight with it.
    /// Positions off the grid are ignored. Returns whether the cursor moved.
    pub fn set_cursor(&mut self, now: Instant, row: isize, col: isize) -> bool {
        let old = self.cursor.position();
        let duration = self.config.cursor.move_duration();
        if !self.cursor.set(now, &self.grid, row, col, duration) {
            return false;
        }
        self.hover(now, old, self.cursor.position());
        self.follow_cursor(now);
        true
    }

    /// Move the cursor one step relative to the screen. See [Cursor::step].
    pub fn step_cursor(
        &mut self,
        now: Instant,
        d_row: isize,
        d_col: isize,
    ) -> bool {
        let old = self.cursor.position();
        let moved = self.cursor.step(
            now,
            &self.grid,
            self.camera.orientation(),
            d_row,
            d_col,
            self.config.cursor.move_duration(),
        );
        if moved {
            self.hover(now, old, self.cursor.position());
            self.follow_cursor(now);
        }
        moved
    }

    /// Quarter turn counter-clockwise around the cursor
    pub fn rotate_left(&mut self, now: Instant) {
        let (row, col, depth) = self.cursor_pivot();
        self.camera.rotate_left(now, row, col, depth);
    }

    /// Quarter turn clockwise around the cursor
    pub fn rotate_right(&mut self, now: Instant) {
        let (row, col, depth) = self.cursor_pivot();
        self.camera.rotate_right(now, row, col, depth);
    }

    pub fn pan_to(&mut self, now: Instant, x: f64, y: f64) {
        self.camera.pan_to(now, x, y);
    }

    pub fn drag_pan(&mut self, now: Instant, dx: f64, dy: f64) {
        self.camera.drag_pan(now, dx, dy);
    }

    pub fn zoom_at(&mut self, steps: i32, anchor: Point2) {
        self.camera.zoom_at(steps, anchor);
    }

    /// Middle of the cursor's tile, at the tile's height
    fn cursor_pivot(&self) -> (f64, f64, f64) {
        let (row, col) = self.cursor.position();
        let height = self.grid.tile(row, col).height() as f64;
        (row as f64 + 0.5, col as f64 + 0.5, height)
    }

    fn hover(
        &mut self,
        now: Instant,
        old: (usize, usize),
        new: (usize, usize),
    ) {
        let amount = self.config.render.hover_brightness;
        self.shift_brightness(now, old, -amount);
        self.shift_brightness(now, new, amount);
    }

    /// Ease a tile's brightness by `amount`, relative to where it's headed
    /// rather than where it is now
    fn shift_brightness(
        &mut self,
        now: Instant,
        (row, col): (usize, usize),
        amount: f64,
    ) {
        let duration = Duration::from_millis(self.config.cursor.speed_ms);
        let brightness = &mut self.brightness[self.grid.index(row, col)];
        let target = brightness.target() + amount;
        brightness.ease_to(now, target, duration, TimingFunction::Ease);
    }

    fn follow_cursor(&mut self, now: Instant) {
        if !self.config.camera.follow_cursor {
            return;
        }
        let (row, col, depth) = self.cursor_pivot();
        let point = self.camera.point_screen_pos(row, col, depth);
        if self.camera.follow(now, point, self.reserved_right) {
            debug!("Panning to keep cursor in view");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        render::{DrawList, DrawOp},
        world::corners::Corners,
    };
    use assert_approx_eq::assert_approx_eq;

    const MS: Duration = Duration::from_millis(1);

    fn scene(rows: usize, cols: usize) -> Scene {
        let mut config = SceneConfig::default();
        config.camera.follow_cursor = false;
        let base = vec![Corners::level(2); rows * cols];
        let grid = Grid::from_base_corners(rows, cols, base).unwrap();
        Scene::with_grid(config, grid).unwrap()
    }

    struct Castles;

    impl Occupants for Castles {
        fn unit(&self, row: usize, col: usize) -> Option<UnitKind> {
            if (row, col) == (1, 1) {
                Some(UnitKind::Castle)
            } else {
                None
            }
        }

        fn draw_overlay(
            &self,
            row: usize,
            col: usize,
            overlay: &mut TileOverlay<'_>,
        ) {
            if (row, col) == (0, 0) {
                overlay.bar(0.5, Color3::WHITE);
            }
        }
    }

    #[test]
    fn test_initial_hover() {
        let scene = scene(2, 2);
        let now = Instant::now();
        assert_eq!(scene.cursor().position(), (0, 0));
        assert_approx_eq!(scene.brightness_at(now, 0, 0), 0.2);
        assert_approx_eq!(scene.brightness_at(now, 1, 1), 0.0);
    }

    #[test]
    fn test_empty_grid() {
        let grid: Grid =
            serde_json::from_str(r#"{"rows": 0, "cols": 4, "tiles": []}"#)
                .unwrap();
        let error =
            Scene::with_grid(SceneConfig::default(), grid).unwrap_err();
        assert_eq!(
            error.to_string(),
            "grid must have at least one tile, got 0x4"
        );
    }

    #[test]
    #[should_panic(expected = "tile (0, 3) is outside the 2x3 grid")]
    fn test_outline_off_grid() {
        let mut scene = scene(2, 3);
        scene.render_frame(Instant::now(), &mut DrawList::new(), &());
        // Would be tile (1, 0) if the column wrapped around
        scene.outline(0, 3);
    }

    #[test]
    #[should_panic(expected = "tile (2, 0) is outside the 2x3 grid")]
    fn test_brightness_off_grid() {
        scene(2, 3).brightness_at(Instant::now(), 2, 0);
    }

    #[test]
    fn test_render_frame() {
        let mut scene = scene(2, 2);
        let now = Instant::now();
        let mut plain = DrawList::new();
        scene.render_frame(now, &mut plain, &());
        assert!(matches!(plain.ops()[0], DrawOp::FillRect { .. }));
        assert!((0..2).all(|row| {
            (0..2).all(|col| scene.outline(row, col).is_some())
        }));

        let mut occupied = DrawList::new();
        scene.render_frame(now, &mut occupied, &Castles);
        assert!(occupied.len() > plain.len());
        // The overlay bar comes after everything else
        assert!(matches!(
            occupied.ops().last(),
            Some(DrawOp::StrokeRect { .. })
        ));
    }

    #[test]
    fn test_tile_at() {
        let mut scene = scene(3, 3);
        let now = Instant::now();
        assert_eq!(scene.tile_at(0.0, 0.0), None);

        scene.render_frame(now, &mut DrawList::new(), &());
        for &(row, col) in &[(0, 0), (1, 2), (2, 1)] {
            let center = scene.outline(row, col).unwrap().center();
            assert_eq!(scene.tile_at(center.x, center.y), Some((row, col)));
        }
        assert_eq!(scene.tile_at(-1000.0, -1000.0), None);
    }

    #[test]
    fn test_set_cursor_moves_hover() {
        let mut scene = scene(3, 3);
        let now = Instant::now();
        assert!(!scene.set_cursor(now, 3, 0));
        assert!(scene.set_cursor(now, 1, 1));

        let done = now + 500 * MS;
        assert_approx_eq!(scene.brightness_at(done, 0, 0), 0.0);
        assert_approx_eq!(scene.brightness_at(done, 1, 1), 0.2);
    }

    #[test]
    fn test_step_cursor() {
        let mut scene = scene(3, 3);
        let now = Instant::now();
        assert!(!scene.step_cursor(now, -1, 0));
        assert!(scene.step_cursor(now, 0, 1));
        assert_ne!(scene.cursor().position(), (0, 0));
    }

    #[test]
    fn test_rotate_keeps_cursor_in_place() {
        let mut scene = scene(4, 4);
        let now = Instant::now();
        scene.set_cursor(now, 2, 1);
        scene.render_frame(now, &mut DrawList::new(), &());
        let (row, col, depth) = scene.cursor_pivot();
        let before = scene.camera().point_screen_pos(row, col, depth);

        scene.rotate_right(now);
        let later = now + 250 * MS;
        scene.render_frame(later, &mut DrawList::new(), &());
        let during = scene.camera().point_screen_pos(row, col, depth);
        assert_approx_eq!(before.x, during.x, 1e-6);
        assert_approx_eq!(before.y, during.y, 1e-6);
    }
}
