//! Drawing a tile's top surface and the walls beneath it.
//!
//! Everything here works in camera-relative corners: back, left, front and
//! right. The back corner sits at the tile's screen position, the left corner
//! one step along the row axis, the right corner one step along the col
//! axis, and the front corner both. The camera's corner shift decides which
//! compass corner ends up in which slot.

use crate::{
    camera::{Camera, DEPTH_Y_OFFSET},
    geometry::TileQuad,
    render::Canvas,
    util::{
        polygon_contains,
        unit::{Color3, Point2},
    },
    world::{
        corners::{CornerDirection, CornerValues, Corners},
        tile::Tile,
    },
};
use strum::IntoEnumIterator;

/// Colours for one tile, with its brightness already applied
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TileColors {
    /// Top surface and wall fill
    pub land: Color3,
    /// Borders, wall lines, and the segments of anything standing on the
    /// tile
    pub line: Color3,
    /// Faces of anything standing on the tile
    pub face: Color3,
}

/// Where a tile landed on screen in the last frame it was drawn in. This is
/// rebuilt from scratch every frame, never edited in place.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TileOutline {
    top: TileQuad,
    left_wall: [Point2; 4],
    right_wall: [Point2; 4],
    center: Point2,
}

impl TileOutline {
    /// The top surface, in back/left/front/right order
    pub fn top(&self) -> &TileQuad {
        &self.top
    }

    pub fn left_wall(&self) -> &[Point2; 4] {
        &self.left_wall
    }

    pub fn right_wall(&self) -> &[Point2; 4] {
        &self.right_wall
    }

    /// Middle of the top surface, where overlays are anchored
    pub fn center(&self) -> Point2 {
        self.center
    }

    /// Does the tile cover the given screen point? This includes the two
    /// visible walls, not just the top.
    pub fn contains_point(&self, point: Point2) -> bool {
        polygon_contains(&self.top.0, point)
            || polygon_contains(&self.left_wall, point)
            || polygon_contains(&self.right_wall, point)
    }
}

/// Screen x of the four camera-relative corner columns, plus the y of each
/// column at zero height. Heights are then just an offset from those.
#[derive(Copy, Clone, Debug)]
struct Columns {
    back: Point2,
    left: Point2,
    front: Point2,
    right: Point2,
    zoom: f64,
}

impl Columns {
    fn new(camera: &Camera, row: f64, col: f64) -> Self {
        let origin = camera.screen_pos(row, col, 0.0, 0.0);
        let zoom = camera.zoom();
        let basis = camera.basis();
        let row_offset = basis.row_offset() * zoom;
        let col_offset = basis.col_offset() * zoom;
        Self {
            back: origin,
            left: origin + row_offset,
            front: origin + row_offset + col_offset,
            right: origin + col_offset,
            zoom,
        }
    }

    /// Raise a column's ground point to the given height
    fn at(&self, column: Point2, height: f64) -> Point2 {
        Point2::new(column.x, column.y - self.zoom * DEPTH_Y_OFFSET * height)
    }

    /// The four corners at the given heights, as a quad
    fn quad(&self, heights: CornerValues, shift: usize) -> TileQuad {
        TileQuad([
            self.at(self.back, heights.back(shift)),
            self.at(self.left, heights.left(shift)),
            self.at(self.front, heights.front(shift)),
            self.at(self.right, heights.right(shift)),
        ])
    }
}

/// Replace the corners along the map edge with the sentinel, so walls there
/// run all the way down past ground level
fn floor_open_corners(corners: Corners, open: [bool; 4]) -> Corners {
    let mut floored = corners;
    for corner in CornerDirection::iter() {
        if open[corner.index()] {
            floored.set(corner, Corners::SENTINEL);
        }
    }
    floored
}

/// Draw a tile's top surface, its walls, and all the lines that go with
/// them. Returns where it all ended up on screen.
pub fn draw_tile(
    canvas: &mut dyn Canvas,
    camera: &Camera,
    tile: &Tile,
    colors: TileColors,
    join_side_faces: bool,
) -> TileOutline {
    let shift = camera.orientation().corner_shift;
    let columns = Columns::new(camera, tile.row() as f64, tile.col() as f64);

    let base = tile.base();
    let around = floor_open_corners(tile.around(), tile.open_corners());
    let lowest = floor_open_corners(tile.lowest(), tile.open_corners());

    let top = columns.quad(base.into(), shift);
    let [b, l, f, r] = top.0;
    let [_, l_around, f_around, r_around] =
        columns.quad(around.into(), shift).0;
    let [_, l_low, f_low, r_low] = columns.quad(lowest.into(), shift).0;

    let outline = TileOutline {
        top,
        left_wall: [l, l_low, f_low, f],
        right_wall: [r, r_low, f_low, f],
        center: Point2::new(b.x, crate::util::lerp(b.y, f.y, 0.5)),
    };

    canvas.fill_polygon(&outline.top.0, colors.land);
    // A front corner above its lowest neighbour means both walls show
    if base.front(shift) > lowest.front(shift) {
        canvas.fill_polygon(&outline.left_wall, colors.land);
        canvas.fill_polygon(&outline.right_wall, colors.land);
    }

    // Back edges always get a border. The front edges only get one where
    // there's a drop on that side.
    canvas.draw_line(b, l, colors.line);
    canvas.draw_line(b, r, colors.line);
    let front_drops = base.front(shift) > lowest.front(shift);
    if base.right(shift) > lowest.right(shift) || front_drops {
        canvas.draw_line(r, f, colors.line);
    }
    if base.left(shift) > lowest.left(shift) || front_drops {
        canvas.draw_line(l, f, colors.line);
    }

    // Vertical lines down the wall corners
    let side_line = |own: i32, next: i32| {
        (own > next && !(join_side_faces && next == Corners::SENTINEL))
            || (own == next && !join_side_faces)
    };
    if side_line(base.left(shift), around.left(shift)) {
        let end = if join_side_faces { l_around } else { l_low };
        canvas.draw_line(l, end, colors.line);
    }
    let front = base.front(shift);
    let front_around = around.front(shift);
    if front > front_around
        && !(join_side_faces && front_around == Corners::SENTINEL)
    {
        canvas.draw_line(f, f_around, colors.line);
    }
    if side_line(base.right(shift), around.right(shift)) {
        let end = if join_side_faces { r_around } else { r_low };
        canvas.draw_line(r, end, colors.line);
    }

    // Along the map edge, trace the bottom of the walls
    if lowest.right(shift) == Corners::SENTINEL
        && lowest.front(shift) == Corners::SENTINEL
    {
        canvas.draw_line(r_low, f_low, colors.line);
    }
    if lowest.left(shift) == Corners::SENTINEL
        && lowest.front(shift) == Corners::SENTINEL
    {
        canvas.draw_line(l_low, f_low, colors.line);
    }

    outline
}

/// Outline a tile-sized quad at a fractional grid position, shrunk toward
/// its middle by `inset` (a fraction of the distance to the opposite
/// corner). This is the cursor.
pub fn draw_inset_tile(
    canvas: &mut dyn Canvas,
    camera: &Camera,
    row: f64,
    col: f64,
    corners: CornerValues,
    inset: f64,
    color: Color3,
) {
    let shift = camera.orientation().corner_shift;
    let [b, l, f, r] = Columns::new(camera, row, col).quad(corners, shift).0;

    let b_in = b.lerp(f, inset);
    let l_in = l.lerp(r, inset);
    let f_in = f.lerp(b, inset);
    let r_in = r.lerp(l, inset);

    canvas.draw_line(b_in, l_in, color);
    canvas.draw_line(b_in, r_in, color);
    canvas.draw_line(r_in, f_in, color);
    canvas.draw_line(l_in, f_in, color);
}
