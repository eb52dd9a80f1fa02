//! Isokit is a rendering kernel for isometric tile maps. It takes a grid of
//! tiles with integer heights, works out how neighbouring tiles meet at their
//! corners, and projects the result (plus any unit meshes standing on it)
//! through a camera that can rotate, pan and zoom smoothly. Where the pixels
//! end up is up to you: everything is drawn through the [Canvas] trait.
//!
//! ```
//! use isokit::{DrawList, Scene, SceneConfig};
//! use std::time::Instant;
//!
//! let mut scene = Scene::new(SceneConfig::default()).unwrap();
//! let mut frame = DrawList::new();
//! scene.render_frame(Instant::now(), &mut frame, &());
//! println!("{} draw calls", frame.len());
//! ```
//!
//! See [SceneConfig] for everything that can be customized. Game rules, such
//! as who owns which tile, stay outside the kernel and are passed in through
//! [Occupants] each frame.

pub mod camera;
mod config;
pub mod cursor;
pub mod geometry;
pub mod render;
pub mod scene;
pub mod timing;
mod util;
pub mod world;

pub use crate::{
    camera::{Camera, Orientation},
    config::{
        CameraConfig, CursorConfig, GridConfig, SceneConfig, Seed, Viewport,
        MAX_GRADIENT,
    },
    cursor::Cursor,
    geometry::{Mesh, MeshLibrary, Shape, TileQuad, UnitKind, Vertex},
    render::{
        Canvas, DrawList, DrawOp, Palette, RenderConfig, SceneRenderer,
        TileColors, TileOutline,
    },
    scene::{Occupants, Preview, Scene, TileOverlay},
    timing::{AnimatedValue, Animation, Scalar, TimingFunction},
    util::unit::{Color3, Point2, Vector2},
    world::{
        corners::{CornerDirection, CornerValues, Corners, EasedCorners},
        tile::{Slope, Tile},
        Grid,
    },
};

#[cfg(feature = "svg")]
pub use crate::render::SvgCanvas;
