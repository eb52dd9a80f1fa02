//! 3D decorations that sit on top of tiles. Shapes are described in
//! tile-local coordinates, and get projected onto whatever screen
//! quadrilateral the tile currently occupies. That means a mesh follows its
//! tile through rotation, zoom and pan without knowing about the camera.
//!
//! Tile-local coordinates: `x` runs along the row axis and `y` along the col
//! axis, both in `[-0.5, 0.5]` with the tile's centre at zero. `z` is height
//! above the tile, in tile widths.

mod catalog;
mod prism;

pub use self::{
    catalog::{MeshLibrary, UnitKind},
    prism::{rectangular_prism, triangular_prism},
};

use crate::{
    camera::{Camera, HEIGHT_Y_OFFSET},
    render::Canvas,
    util::unit::{Color3, Point2},
};
use serde::{Deserialize, Serialize};

/// A point in tile-local space. See the module docs for the axes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vertex {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// A single drawable piece of a [Shape]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// A filled polygon, no outline
    Face(Vec<Vertex>),
    /// A line between two vertices. Culled segments are drawn in the face
    /// colour instead of the segment colour, to paint over lines that a face
    /// should be hiding.
    Segment {
        start: Vertex,
        end: Vertex,
        culled: bool,
    },
}

/// The screen position of a tile's top surface, as four points in the order
/// back, left, front, right. With no camera rotation that's NW, SW, SE, NE.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TileQuad(pub [Point2; 4]);

impl TileQuad {
    /// A flat tile-shaped quad with its back corner at `(x, y)`, sized for
    /// the given zoom and oriented to match the camera. Used to draw a mesh
    /// somewhere other than on a tile.
    pub fn flat_at(x: f64, y: f64, zoom: f64, camera: &Camera) -> Self {
        let basis = camera.basis();
        Self([
            Point2::new(x, y),
            Point2::new(x + zoom * basis.row_x, y + zoom * basis.row_y),
            Point2::new(
                x + zoom * (basis.row_x + basis.col_x),
                y + zoom * (basis.row_y + basis.col_y),
            ),
            Point2::new(x + zoom * basis.col_x, y + zoom * basis.col_y),
        ])
    }

    /// Screen position of a tile-local vertex. The base point is found by
    /// bilinear interpolation across the quad, then lifted straight up by the
    /// vertex height. Height doesn't follow the quad's slope, so vertical
    /// edges stay vertical.
    pub fn project(&self, vertex: Vertex, zoom: f64) -> Point2 {
        let [nw, sw, se, ne] = self.0;
        let west = nw.lerp(sw, vertex.x + 0.5);
        let east = ne.lerp(se, vertex.x + 0.5);
        let mut point = west.lerp(east, vertex.y + 0.5);
        point.y += zoom * vertex.z * HEIGHT_Y_OFFSET;
        point
    }
}

/// A group of faces and segments, plus child shapes drawn on top of it.
/// Shapes are built once and shared, drawing one never changes it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    commands: Vec<DrawCommand>,
    children: Vec<Shape>,
}

impl Shape {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_face(&mut self, vertices: &[Vertex]) {
        self.commands.push(DrawCommand::Face(vertices.to_vec()));
    }

    pub fn add_segment(&mut self, start: Vertex, end: Vertex) {
        self.commands.push(DrawCommand::Segment {
            start,
            end,
            culled: false,
        });
    }

    pub fn add_culled_segment(&mut self, start: Vertex, end: Vertex) {
        self.commands.push(DrawCommand::Segment {
            start,
            end,
            culled: true,
        });
    }

    pub fn add_child(&mut self, child: Shape) {
        self.children.push(child);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn children(&self) -> &[Shape] {
        &self.children
    }

    /// Draw the shape on a tile. Whatever order things were added in, a shape
    /// always draws its faces first, then segments, then culled segments,
    /// then each child the same way.
    ///
    /// The tile's corner heights aren't passed separately. They're already
    /// baked into `quad`, since each quad point is a corner projected at its
    /// own height, so a shape on a sloped tile leans with the slope.
    pub fn draw(
        &self,
        canvas: &mut dyn Canvas,
        quad: &TileQuad,
        segment_color: Color3,
        face_color: Color3,
        zoom: f64,
    ) {
        for command in &self.commands {
            if let DrawCommand::Face(vertices) = command {
                let points: Vec<Point2> =
                    vertices.iter().map(|v| quad.project(*v, zoom)).collect();
                canvas.fill_polygon(&points, face_color);
            }
        }

        self.draw_segments(canvas, quad, false, segment_color, zoom);
        self.draw_segments(canvas, quad, true, face_color, zoom);

        for child in &self.children {
            child.draw(canvas, quad, segment_color, face_color, zoom);
        }
    }

    fn draw_segments(
        &self,
        canvas: &mut dyn Canvas,
        quad: &TileQuad,
        culled: bool,
        color: Color3,
        zoom: f64,
    ) {
        for command in &self.commands {
            match command {
                DrawCommand::Segment {
                    start,
                    end,
                    culled: c,
                } if *c == culled => {
                    canvas.draw_line(
                        quad.project(*start, zoom),
                        quad.project(*end, zoom),
                        color,
                    );
                }
                _ => {}
            }
        }
    }
}

/// An ordered list of shapes. Shapes are painted in list order with no
/// sorting, so list them back to front.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    shapes: Vec<Shape>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn draw(
        &self,
        canvas: &mut dyn Canvas,
        quad: &TileQuad,
        segment_color: Color3,
        face_color: Color3,
        zoom: f64,
    ) {
        for shape in &self.shapes {
            shape.draw(canvas, quad, segment_color, face_color, zoom);
        }
    }
}

impl From<Vec<Shape>> for Mesh {
    fn from(shapes: Vec<Shape>) -> Self {
        Self { shapes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::{CameraConfig, Viewport},
        render::{DrawList, DrawOp},
    };
    use assert_approx_eq::assert_approx_eq;

    /// A square tile, slightly tilted
    fn quad() -> TileQuad {
        TileQuad([
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 50.0),
            Point2::new(100.0, 100.0),
            Point2::new(100.0, 50.0),
        ])
    }

    const RED: Color3 = Color3::new_int(255, 0, 0);
    const BLUE: Color3 = Color3::new_int(0, 0, 255);

    #[test]
    fn test_project_center() {
        let p = quad().project(Vertex::new(0.0, 0.0, 0.0), 1.0);
        assert_approx_eq!(p.x, 50.0);
        assert_approx_eq!(p.y, 50.0);
    }

    #[test]
    fn test_project_corners() {
        let q = quad();
        assert_eq!(q.project(Vertex::new(-0.5, -0.5, 0.0), 1.0), q.0[0]);
        assert_eq!(q.project(Vertex::new(0.5, -0.5, 0.0), 1.0), q.0[1]);
        assert_eq!(q.project(Vertex::new(0.5, 0.5, 0.0), 1.0), q.0[2]);
        assert_eq!(q.project(Vertex::new(-0.5, 0.5, 0.0), 1.0), q.0[3]);
    }

    #[test]
    fn test_project_height() {
        let zoom = 40.0;
        let low = quad().project(Vertex::new(0.2, -0.1, 0.0), zoom);
        let high = quad().project(Vertex::new(0.2, -0.1, 1.0), zoom);
        assert_approx_eq!(high.x, low.x);
        assert_approx_eq!(high.y - low.y, zoom * HEIGHT_Y_OFFSET);
    }

    #[test]
    fn test_draw_order() {
        let a = Vertex::new(0.0, 0.0, 0.0);
        let b = Vertex::new(0.5, 0.0, 0.0);
        let c = Vertex::new(0.0, 0.5, 0.0);

        let mut child = Shape::new();
        child.add_segment(a, c);

        // Added out of order on purpose
        let mut shape = Shape::new();
        shape.add_culled_segment(a, b);
        shape.add_segment(b, c);
        shape.add_face(&[a, b, c]);
        shape.add_child(child);

        let mut list = DrawList::new();
        shape.draw(&mut list, &quad(), RED, BLUE, 10.0);
        let ops = list.into_ops();
        assert_eq!(ops.len(), 4);
        assert!(matches!(
            &ops[0], DrawOp::FillPolygon { points, color }
                if points.len() == 3 && *color == BLUE
        ));
        assert!(matches!(ops[1], DrawOp::Line { color, .. } if color == RED));
        assert!(matches!(ops[2], DrawOp::Line { color, .. } if color == BLUE));
        assert!(matches!(ops[3], DrawOp::Line { color, .. } if color == RED));
    }

    #[test]
    fn test_draw_follows_quad_corners() {
        let mut shape = Shape::new();
        shape.add_segment(Vertex::new(-0.5, -0.5, 0.0), Vertex::default());

        let line = |quad: &TileQuad| {
            let mut list = DrawList::new();
            shape.draw(&mut list, quad, RED, BLUE, 10.0);
            match list.into_ops().as_slice() {
                [DrawOp::Line { start, end, .. }] => (*start, *end),
                ops => panic!("expected one line, got {:?}", ops),
            }
        };

        // Raise the back corner, as if that corner of the tile were higher
        let flat = quad();
        let mut raised = flat;
        raised.0[0].y -= 20.0;
        let (flat_start, flat_end) = line(&flat);
        let (raised_start, raised_end) = line(&raised);
        assert_approx_eq!(flat_start.y - raised_start.y, 20.0);
        // The centre sits a quarter of the way into each corner
        assert_approx_eq!(flat_end.y - raised_end.y, 5.0);
        assert_approx_eq!(flat_end.x, raised_end.x);
    }

    #[test]
    fn test_mesh_draws_in_list_order() {
        let first =
            rectangular_prism(0.0, 0.0, 0.0, 0.5, 0.5, 0.5, false, false);
        let second = triangular_prism(0.0, 0.0, 0.0, 0.5, 0.5, 0.5);
        let mesh = Mesh::from(vec![first.clone(), second.clone()]);

        let mut expected = DrawList::new();
        first.draw(&mut expected, &quad(), RED, BLUE, 10.0);
        second.draw(&mut expected, &quad(), RED, BLUE, 10.0);

        let mut actual = DrawList::new();
        mesh.draw(&mut actual, &quad(), RED, BLUE, 10.0);
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_flat_at() {
        let camera = Camera::new(
            CameraConfig::default(),
            Viewport::default(),
            4,
            4,
        )
        .unwrap();
        let basis = camera.basis();
        let quad = TileQuad::flat_at(10.0, 20.0, 30.0, &camera);
        assert_eq!(quad.0[0], Point2::new(10.0, 20.0));
        assert_approx_eq!(quad.0[1].x, 10.0 + 30.0 * basis.row_x);
        assert_approx_eq!(quad.0[3].y, 20.0 + 30.0 * basis.col_y);
        // The front corner is both offsets added together
        assert_approx_eq!(
            quad.0[2].x - quad.0[0].x,
            (quad.0[1].x - quad.0[0].x) + (quad.0[3].x - quad.0[0].x)
        );
    }
}
