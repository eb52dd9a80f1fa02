//! Builders for the basic solids that unit meshes are made of. All positions
//! are the centre of the solid's bottom face, in tile-local coordinates.

use crate::geometry::{Shape, Vertex};

/// A box with sides aligned to the tile. Only the three sides that can face
/// the viewer get faces. `cull_bottom` and `cull_top` repaint the bottom and
/// top edges in the face colour, to hide lines from shapes underneath.
#[allow(clippy::too_many_arguments)]
pub fn rectangular_prism(
    x: f64,
    y: f64,
    z: f64,
    width: f64,
    length: f64,
    height: f64,
    cull_bottom: bool,
    cull_top: bool,
) -> Shape {
    let w = width / 2.0;
    let l = length / 2.0;

    // Compass corner, then l(ow) or h(igh)
    let nel = Vertex::new(x + w, y - l, z);
    let swl = Vertex::new(x - w, y + l, z);
    let sel = Vertex::new(x + w, y + l, z);
    let nwh = Vertex::new(x - w, y - l, z + height);
    let neh = Vertex::new(x + w, y - l, z + height);
    let swh = Vertex::new(x - w, y + l, z + height);
    let seh = Vertex::new(x + w, y + l, z + height);

    let mut shape = Shape::new();
    shape.add_face(&[swl, sel, seh, swh]);
    shape.add_face(&[nel, sel, seh, neh]);
    shape.add_face(&[nwh, neh, seh, swh]);

    if cull_bottom {
        shape.add_culled_segment(swl, sel);
        shape.add_culled_segment(sel, nel);
    }
    if cull_top {
        shape.add_culled_segment(nwh, swh);
        shape.add_culled_segment(neh, nwh);
        shape.add_culled_segment(swh, seh);
        shape.add_culled_segment(seh, neh);
    }

    // Bottom
    shape.add_segment(swl, sel);
    shape.add_segment(sel, nel);
    // Vertical edges
    shape.add_segment(swl, swh);
    shape.add_segment(sel, seh);
    shape.add_segment(nel, neh);
    // Top
    shape.add_segment(nwh, swh);
    shape.add_segment(neh, nwh);
    shape.add_segment(swh, seh);
    shape.add_segment(seh, neh);

    shape
}

/// A wedge that rises from the bottom edges to a single peak over the back
/// corner
pub fn triangular_prism(
    x: f64,
    y: f64,
    z: f64,
    width: f64,
    length: f64,
    height: f64,
) -> Shape {
    let w = width / 2.0;
    let l = length / 2.0;

    let nel = Vertex::new(x + w, y - l, z);
    let swl = Vertex::new(x - w, y + l, z);
    let sel = Vertex::new(x + w, y + l, z);
    let top = Vertex::new(x - w, y - l, z + height);

    let mut shape = Shape::new();
    shape.add_face(&[swl, sel, top]);
    shape.add_face(&[nel, sel, top]);

    shape.add_segment(swl, sel);
    shape.add_segment(sel, nel);
    shape.add_segment(swl, top);
    shape.add_segment(sel, top);
    shape.add_segment(nel, top);

    shape
}
