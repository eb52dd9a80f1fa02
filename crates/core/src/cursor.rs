use crate::{
    camera::Orientation,
    timing::{Scalar, TimingFunction},
    world::{
        corners::{CornerValues, EasedCorners},
        Grid,
    },
};
use log::trace;
use std::time::{Duration, Instant};

/// The selected tile. The cursor jumps between tiles logically, but its
/// outline can glide from the old tile to the new one, following the shape
/// of the ground as it goes.
#[derive(Clone, Debug)]
pub struct Cursor {
    row: usize,
    col: usize,
    /// Where the current move started. Only meaningful while animating.
    from: (usize, usize),
    show_row: Scalar,
    show_col: Scalar,
    corners: EasedCorners,
}

impl Cursor {
    /// Place a cursor on a tile. Panics if the tile is off the grid.
    pub fn new(grid: &Grid, row: usize, col: usize) -> Self {
        let tile = grid.tile(row, col);
        Self {
            row,
            col,
            from: (row, col),
            show_row: Scalar::Fixed(row as f64),
            show_col: Scalar::Fixed(col as f64),
            corners: EasedCorners::new(tile.base()),
        }
    }

    pub fn position(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    /// The tile the cursor is moving away from, if it's still moving
    pub fn from_position(&self, now: Instant) -> Option<(usize, usize)> {
        if self.is_animating_at(now) {
            Some(self.from)
        } else {
            None
        }
    }

    pub fn is_animating_at(&self, now: Instant) -> bool {
        self.show_row.is_animating_at(now)
            || self.show_col.is_animating_at(now)
            || self.corners.is_animating_at(now)
    }

    /// Displayed grid position, which may be between tiles
    pub fn display_position(&self, now: Instant) -> (f64, f64) {
        (self.show_row.value_at(now), self.show_col.value_at(now))
    }

    /// Displayed corner heights
    pub fn corners_at(&self, now: Instant) -> CornerValues {
        self.corners.values_at(now)
    }

    /// Move to a tile. Positions off the grid are ignored. Returns whether
    /// the cursor moved.
    pub fn set(
        &mut self,
        now: Instant,
        grid: &Grid,
        row: isize,
        col: isize,
        duration: Duration,
    ) -> bool {
        let tile = match grid.get(row, col) {
            Some(tile) => tile,
            None => return false,
        };

        // A move that interrupts another keeps the first move's starting tile
        if !self.is_animating_at(now) {
            self.from = (self.row, self.col);
        }
        self.row = tile.row();
        self.col = tile.col();
        trace!("Cursor -> ({}, {})", self.row, self.col);

        self.show_row.ease_to(
            now,
            self.row as f64,
            duration,
            TimingFunction::Ease,
        );
        self.show_col.ease_to(
            now,
            self.col as f64,
            duration,
            TimingFunction::Ease,
        );
        self.corners.ease_to(now, tile.base(), duration);
        true
    }

    /// Move by a step relative to the screen rather than the grid. The step
    /// is mapped through the camera orientation, so "up" always moves away
    /// from the viewer no matter how the scene is turned.
    pub fn step(
        &mut self,
        now: Instant,
        grid: &Grid,
        orientation: Orientation,
        d_row: isize,
        d_col: isize,
        duration: Duration,
    ) -> bool {
        let (mut d_row, mut d_col) = if orientation.swap_axes {
            (d_col, d_row)
        } else {
            (d_row, d_col)
        };
        if orientation.reverse_rows {
            d_row = -d_row;
        }
        if orientation.reverse_cols {
            d_col = -d_col;
        }
        self.set(
            now,
            grid,
            self.row as isize + d_row,
            self.col as isize + d_col,
            duration,
        )
    }

    /// The tile whose turn in the draw order the cursor outline is drawn on.
    /// While moving, the outline spans two tiles, so it goes on whichever of
    /// them is drawn later.
    pub fn anchor_tile(
        &self,
        now: Instant,
        grid: &Grid,
        orientation: Orientation,
    ) -> (usize, usize) {
        let current = self.position();
        match self.from_position(now) {
            Some(from)
                if grid.draw_index(orientation, from.0, from.1)
                    > grid.draw_index(orientation, current.0, current.1) =>
            {
                from
            }
            _ => current,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::corners::Corners;
    use assert_approx_eq::assert_approx_eq;

    const MS: Duration = Duration::from_millis(1);

    fn grid() -> Grid {
        let base = (0..9).map(Corners::level).collect();
        Grid::from_base_corners(3, 3, base).unwrap()
    }

    fn orientation(rows: bool, cols: bool, swap: bool) -> Orientation {
        Orientation {
            reverse_rows: rows,
            reverse_cols: cols,
            swap_axes: swap,
            corner_shift: 0,
        }
    }

    #[test]
    fn test_set() {
        let now = Instant::now();
        let grid = grid();
        let mut cursor = Cursor::new(&grid, 0, 0);

        assert!(!cursor.set(now, &grid, -1, 0, 100 * MS));
        assert!(!cursor.set(now, &grid, 0, 3, 100 * MS));
        assert_eq!(cursor.position(), (0, 0));

        assert!(cursor.set(now, &grid, 1, 2, 100 * MS));
        assert_eq!(cursor.position(), (1, 2));
        assert_eq!(cursor.from_position(now), Some((0, 0)));

        let (row, col) = cursor.display_position(now + 50 * MS);
        assert_approx_eq!(row, 0.5);
        assert_approx_eq!(col, 1.0);
        assert_approx_eq!(cursor.corners_at(now + 50 * MS).0[0], 2.5);

        let done = now + 100 * MS;
        assert_eq!(cursor.from_position(done), None);
        assert_eq!(cursor.display_position(done), (1.0, 2.0));
        assert_eq!(cursor.corners_at(done), Corners::level(5).into());
    }

    #[test]
    fn test_interrupted_move_keeps_origin() {
        let now = Instant::now();
        let grid = grid();
        let mut cursor = Cursor::new(&grid, 0, 0);
        cursor.set(now, &grid, 0, 1, 100 * MS);
        cursor.set(now + 10 * MS, &grid, 0, 2, 100 * MS);
        assert_eq!(cursor.from_position(now + 10 * MS), Some((0, 0)));
    }

    #[test]
    fn test_instant_move() {
        let now = Instant::now();
        let grid = grid();
        let mut cursor = Cursor::new(&grid, 0, 0);
        cursor.set(now, &grid, 2, 2, Duration::ZERO);
        assert!(!cursor.is_animating_at(now));
        assert_eq!(cursor.display_position(now), (2.0, 2.0));
        assert_eq!(cursor.corners_at(now), Corners::level(8).into());
    }

    #[test]
    fn test_step() {
        let now = Instant::now();
        let grid = grid();
        let mut cursor = Cursor::new(&grid, 1, 1);

        cursor.step(now, &grid, orientation(false, false, false), 1, 0, MS * 0);
        assert_eq!(cursor.position(), (2, 1));

        // Swapped and mirrored: a row step becomes a backwards col step
        cursor.step(now, &grid, orientation(false, true, true), 1, 0, MS * 0);
        assert_eq!(cursor.position(), (2, 0));

        // Off the edge
        let o = orientation(true, false, false);
        assert!(!cursor.step(now, &grid, o, -1, 0, MS * 0));
        assert_eq!(cursor.position(), (2, 0));
    }

    #[test]
    fn test_anchor_tile() {
        let now = Instant::now();
        let grid = grid();
        let forward = orientation(false, false, false);
        let backward = orientation(true, true, false);

        let mut cursor = Cursor::new(&grid, 1, 1);
        assert_eq!(cursor.anchor_tile(now, &grid, forward), (1, 1));

        cursor.set(now, &grid, 0, 1, 100 * MS);
        // (1, 1) is in front of (0, 1) when nothing is mirrored
        assert_eq!(cursor.anchor_tile(now, &grid, forward), (1, 1));
        assert_eq!(cursor.anchor_tile(now, &grid, backward), (0, 1));
        // Once the move is over, only the current tile counts
        let done = now + 100 * MS;
        assert_eq!(cursor.anchor_tile(done, &grid, forward), (0, 1));
    }
}
