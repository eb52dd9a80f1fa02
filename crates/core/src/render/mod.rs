mod canvas;
mod config;
mod overlay;
#[cfg(feature = "svg")]
mod svg;
mod tile;

#[cfg(feature = "svg")]
pub use self::svg::SvgCanvas;
pub use self::{
    canvas::{Canvas, DrawList, DrawOp},
    config::RenderConfig,
    tile::{TileColors, TileOutline},
};

use crate::{
    camera::Camera,
    config::Viewport,
    geometry::{MeshLibrary, TileQuad, UnitKind},
    util::unit::{Color3, Point2},
    world::{corners::CornerValues, tile::Tile},
};
use anyhow::Context;
use validator::Validate;

/// How strongly brightness shifts each kind of colour. Borders and lines
/// change the most, unit faces barely at all.
const LINE_BRIGHTNESS_SCALE: f64 = 1.0;
const LAND_BRIGHTNESS_SCALE: f64 = 0.25;
const FACE_BRIGHTNESS_SCALE: f64 = 0.125;

/// The colours that mark a tile as belonging to someone. Tiles without a
/// palette use the land and border colours from the [RenderConfig].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Palette {
    /// Tile borders and unit outlines
    pub line: Color3,
    /// Unit faces
    pub face: Color3,
    /// Tile tops and walls
    pub land: Color3,
}

/// A scene renderer turns tiles, cursors and units into draw calls on a
/// [Canvas]. A renderer is created with a particular [RenderConfig], and can
/// then draw any number of frames.
///
/// The renderer holds no per-frame state. The scene decides what to draw and
/// where; the renderer decides what it looks like.
#[derive(Clone, Debug)]
pub struct SceneRenderer {
    config: RenderConfig,
    meshes: MeshLibrary,
}

impl SceneRenderer {
    /// Create a renderer with the given options. Returns an error if the
    /// render config is invalid.
    pub fn new(config: RenderConfig) -> anyhow::Result<Self> {
        config.validate().context("invalid render config")?;
        Ok(Self {
            config,
            meshes: MeshLibrary::new(),
        })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn meshes(&self) -> &MeshLibrary {
        &self.meshes
    }

    /// Colours for a tile with the given owner (if any) and brightness.
    /// Positive brightness blends toward white, negative toward black.
    pub fn tile_colors(
        &self,
        palette: Option<Palette>,
        brightness: f64,
    ) -> TileColors {
        match palette {
            Some(palette) => TileColors {
                land: palette.land.brighten(brightness, LAND_BRIGHTNESS_SCALE),
                line: palette.line.brighten(brightness, LINE_BRIGHTNESS_SCALE),
                face: palette.face.brighten(brightness, FACE_BRIGHTNESS_SCALE),
            },
            // Unowned borders keep their colour regardless of brightness
            None => TileColors {
                land: self
                    .config
                    .land_color
                    .brighten(brightness, LAND_BRIGHTNESS_SCALE),
                line: self.config.border_color,
                face: self
                    .config
                    .land_color
                    .brighten(brightness, FACE_BRIGHTNESS_SCALE),
            },
        }
    }

    /// Paint the whole viewport with the background colour
    pub fn clear(&self, canvas: &mut dyn Canvas, viewport: Viewport) {
        canvas.fill_rect(
            Point2::new(0.0, 0.0),
            viewport.width as f64,
            viewport.height as f64,
            self.config.background,
        );
    }

    /// Draw a tile's top and walls. The returned outline is what hit tests
    /// and overlays use until the tile is drawn again.
    pub fn draw_tile(
        &self,
        canvas: &mut dyn Canvas,
        camera: &Camera,
        tile: &Tile,
        colors: TileColors,
    ) -> TileOutline {
        tile::draw_tile(
            canvas,
            camera,
            tile,
            colors,
            self.config.join_side_faces,
        )
    }

    /// Draw the cursor outline at a (possibly fractional) grid position
    pub fn draw_cursor(
        &self,
        canvas: &mut dyn Canvas,
        camera: &Camera,
        row: f64,
        col: f64,
        corners: CornerValues,
        inset: f64,
    ) {
        tile::draw_inset_tile(
            canvas,
            camera,
            row,
            col,
            corners,
            inset,
            self.config.cursor_color,
        );
    }

    /// Draw a unit's mesh on top of a quad
    pub fn draw_unit(
        &self,
        canvas: &mut dyn Canvas,
        kind: UnitKind,
        quad: &TileQuad,
        colors: TileColors,
        zoom: f64,
    ) {
        self.meshes
            .get(kind)
            .draw(canvas, quad, colors.line, colors.face, zoom);
    }

    /// Draw a progress bar centred on a point, one tile wide. `fraction` is
    /// clamped to `[0, 1]`.
    pub fn draw_bar(
        &self,
        canvas: &mut dyn Canvas,
        center: Point2,
        zoom: f64,
        fraction: f64,
        fill: Color3,
    ) {
        overlay::draw_bar(canvas, &self.config, center, zoom, fraction, fill);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::ValidationErrors;

    #[test]
    fn test_invalid_config() {
        let result = SceneRenderer::new(RenderConfig {
            hover_brightness: 1.5,
            ..Default::default()
        });
        let error = result.unwrap_err();
        let errors = error.downcast_ref::<ValidationErrors>().unwrap();
        assert!(errors.errors().contains_key("hover_brightness"));
    }

    #[test]
    fn test_tile_colors() {
        let renderer = SceneRenderer::new(RenderConfig::default()).unwrap();

        let plain = renderer.tile_colors(None, 0.0);
        assert_eq!(plain.land, Color3::BLACK);
        assert_eq!(plain.line, Color3::WHITE);

        // Land lightens by a quarter of the brightness
        let lit = renderer.tile_colors(None, 0.4);
        assert_eq!(lit.land.to_ints(), (26, 26, 26));
        assert_eq!(lit.line, Color3::WHITE);

        let palette = Palette {
            line: Color3::new_int(200, 0, 0),
            face: Color3::new_int(100, 0, 0),
            land: Color3::new_int(40, 0, 0),
        };
        let dark = renderer.tile_colors(Some(palette), -1.0);
        assert_eq!(dark.line, Color3::BLACK);
        assert_eq!(dark.land.to_ints(), (30, 0, 0));
    }
}
