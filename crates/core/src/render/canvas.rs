use crate::util::unit::{Color3, Point2};
use serde::{Deserialize, Serialize};

/// A 2D surface the scene can draw on. Coordinates are screen pixels, with
/// the origin at the top-left of the viewport.
///
/// This is everything the kernel needs from a graphics backend, so hooking up
/// a new one (a window, an image buffer, a file format) only means
/// implementing these four calls.
pub trait Canvas {
    /// Fill a closed polygon. Polygons with fewer than three points can be
    /// ignored.
    fn fill_polygon(&mut self, points: &[Point2], color: Color3);

    /// Draw a one pixel line between two points
    fn draw_line(&mut self, start: Point2, end: Point2, color: Color3);

    /// Fill an axis-aligned rectangle with its top-left corner at `origin`
    fn fill_rect(
        &mut self,
        origin: Point2,
        width: f64,
        height: f64,
        color: Color3,
    );

    /// Outline an axis-aligned rectangle with its top-left corner at `origin`
    fn stroke_rect(
        &mut self,
        origin: Point2,
        width: f64,
        height: f64,
        color: Color3,
    );
}

/// One recorded draw call
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    FillPolygon {
        points: Vec<Point2>,
        color: Color3,
    },
    Line {
        start: Point2,
        end: Point2,
        color: Color3,
    },
    FillRect {
        origin: Point2,
        width: f64,
        height: f64,
        color: Color3,
    },
    StrokeRect {
        origin: Point2,
        width: f64,
        height: f64,
        color: Color3,
    },
}

/// A canvas that doesn't draw anything, just remembers what it was asked to
/// draw, in order. Handy for tests, and for handing a frame to something
/// outside of Rust as JSON.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DrawList {
    ops: Vec<DrawOp>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<DrawOp> {
        self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Forget everything drawn so far, so the list can be reused for the
    /// next frame
    pub fn clear(&mut self) {
        self.ops.clear();
    }
}

impl Canvas for DrawList {
    fn fill_polygon(&mut self, points: &[Point2], color: Color3) {
        self.ops.push(DrawOp::FillPolygon {
            points: points.to_vec(),
            color,
        });
    }

    fn draw_line(&mut self, start: Point2, end: Point2, color: Color3) {
        self.ops.push(DrawOp::Line { start, end, color });
    }

    fn fill_rect(
        &mut self,
        origin: Point2,
        width: f64,
        height: f64,
        color: Color3,
    ) {
        self.ops.push(DrawOp::FillRect {
            origin,
            width,
            height,
            color,
        });
    }

    fn stroke_rect(
        &mut self,
        origin: Point2,
        width: f64,
        height: f64,
        color: Color3,
    ) {
        self.ops.push(DrawOp::StrokeRect {
            origin,
            width,
            height,
            color,
        });
    }
}
