pub mod corners;
mod generate;
mod propagate;
pub mod tile;

pub use self::{
    generate::GridBuilder,
    propagate::{propagate_corners, PropagatedCorners},
};

use crate::{
    camera::Orientation,
    config::{GridConfig, Seed},
    timed, unwrap,
    world::{corners::Corners, tile::Tile},
};
use anyhow::Context;
use log::info;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A rectangular grid of tiles. Rows run north to south and columns run west
/// to east, so `(0, 0)` is the northwest corner of the map. Tile heights are
/// fixed once the grid is built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    rows: usize,
    cols: usize,
    /// Row-major
    tiles: Vec<Tile>,
}

impl Grid {
    /// Generate a new grid from the given config. Returns an error if the
    /// config is invalid.
    pub fn generate(config: &GridConfig, seed: &Seed) -> anyhow::Result<Self> {
        info!("Generating {}x{} grid", config.rows, config.cols);
        config.validate().context("invalid grid config")?;

        timed!("Grid generation", log::Level::Info, {
            let mut builder = GridBuilder::new_tiles(config, seed);
            builder.compute_propagated_corners();
            builder.build()
        })
    }

    /// Build a grid from explicit base corners, in row-major order. Mostly
    /// useful for tests and hand-made maps.
    pub fn from_base_corners(
        rows: usize,
        cols: usize,
        base: Vec<Corners>,
    ) -> anyhow::Result<Self> {
        let mut builder = GridBuilder::from_base_corners(rows, cols, base)?;
        builder.compute_propagated_corners();
        builder.build()
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// All tiles, in row-major order
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Is the given position on the grid?
    pub fn contains(&self, row: isize, col: isize) -> bool {
        row >= 0
            && col >= 0
            && (row as usize) < self.rows
            && (col as usize) < self.cols
    }

    /// Get the tile at a position, or `None` if it's off the grid
    pub fn get(&self, row: isize, col: isize) -> Option<&Tile> {
        if self.contains(row, col) {
            self.tiles.get(self.index(row as usize, col as usize))
        } else {
            None
        }
    }

    /// Get the tile at a position. Asking for a tile off the grid is a bug in
    /// the caller, so this panics rather than clamping.
    pub fn tile(&self, row: usize, col: usize) -> &Tile {
        unwrap!(
            self.get(row as isize, col as isize),
            "tile ({}, {}) is outside the {}x{} grid",
            row,
            col,
            self.rows,
            self.cols
        )
    }

    /// Index into the row-major tile list. Panics if the position is off
    /// the grid, since a column past the end would alias the next row.
    pub fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.rows && col < self.cols,
            "tile ({}, {}) is outside the {}x{} grid",
            row,
            col,
            self.rows,
            self.cols
        );
        row * self.cols + col
    }

    /// Tile positions in back-to-front paint order for the given camera
    /// orientation. Order is row-major over the screen-space (mirrored and
    /// possibly swapped) axes, so a tile never covers one painted after it.
    pub fn draw_order(
        &self,
        orientation: Orientation,
    ) -> impl DoubleEndedIterator<Item = (usize, usize)> + '_ {
        let (outer, inner) = if orientation.swap_axes {
            (self.cols, self.rows)
        } else {
            (self.rows, self.cols)
        };
        let rows = self.rows;
        let cols = self.cols;

        (0..outer * inner).map(move |i| {
            let (a, b) = (i / inner, i % inner);
            let (screen_row, screen_col) =
                if orientation.swap_axes { (b, a) } else { (a, b) };
            let row = if orientation.reverse_rows {
                rows - screen_row - 1
            } else {
                screen_row
            };
            let col = if orientation.reverse_cols {
                cols - screen_col - 1
            } else {
                screen_col
            };
            (row, col)
        })
    }

    /// [Self::draw_order] backwards, front to back. Hit testing walks this so
    /// a tile in front wins over the one it covers.
    pub fn reverse_draw_order(
        &self,
        orientation: Orientation,
    ) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.draw_order(orientation).rev()
    }

    /// Position of a tile within [Self::draw_order]
    pub fn draw_index(
        &self,
        orientation: Orientation,
        row: usize,
        col: usize,
    ) -> usize {
        let screen_row = if orientation.reverse_rows {
            self.rows - row - 1
        } else {
            row
        };
        let screen_col = if orientation.reverse_cols {
            self.cols - col - 1
        } else {
            col
        };
        if orientation.swap_axes {
            screen_col * self.rows + screen_row
        } else {
            screen_row * self.cols + screen_col
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: usize, cols: usize) -> Grid {
        Grid::from_base_corners(rows, cols, vec![Corners::FLAT; rows * cols])
            .unwrap()
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
    fn test_get() {
        let grid = grid(2, 3);
        assert_eq!(grid.get(1, 2).map(Tile::position), Some((1, 2)));
        assert!(grid.get(2, 0).is_none());
        assert!(grid.get(0, 3).is_none());
        assert!(grid.get(-1, 0).is_none());
    }

    #[test]
    #[should_panic(expected = "tile (2, 0) is outside the 2x3 grid")]
    fn test_tile_out_of_bounds() {
        grid(2, 3).tile(2, 0);
    }

    #[test]
    fn test_index() {
        let grid = grid(2, 3);
        assert_eq!(grid.index(0, 2), 2);
        assert_eq!(grid.index(1, 0), 3);
    }

    #[test]
    #[should_panic(expected = "tile (0, 3) is outside the 2x3 grid")]
    fn test_index_past_last_col() {
        grid(2, 3).index(0, 3);
    }

    #[test]
    #[should_panic(expected = "tile (2, 0) is outside the 2x3 grid")]
    fn test_index_past_last_row() {
        grid(2, 3).index(2, 0);
    }

    #[test]
    fn test_draw_order() {
        let grid = grid(2, 3);

        let order: Vec<_> =
            grid.draw_order(orientation(false, false, false)).collect();
        assert_eq!(order, vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]);

        let order: Vec<_> =
            grid.draw_order(orientation(true, false, false)).collect();
        assert_eq!(order, vec![(1, 0), (1, 1), (1, 2), (0, 0), (0, 1), (0, 2)]);

        // Swapped: columns become the outer loop
        let order: Vec<_> =
            grid.draw_order(orientation(false, true, true)).collect();
        assert_eq!(order, vec![(0, 2), (1, 2), (0, 1), (1, 1), (0, 0), (1, 0)]);
    }

    #[test]
    fn test_reverse_draw_order() {
        let grid = grid(2, 2);
        let o = orientation(true, true, false);
        let mut forward: Vec<_> = grid.draw_order(o).collect();
        forward.reverse();
        assert_eq!(grid.reverse_draw_order(o).collect::<Vec<_>>(), forward);
        assert_eq!(forward[0], (0, 0));
    }

    #[test]
    fn test_draw_index() {
        let grid = grid(3, 4);
        for &(rows, cols, swap) in &[
            (false, false, false),
            (true, false, true),
            (true, true, false),
            (false, true, true),
        ] {
            let o = orientation(rows, cols, swap);
            for (i, (row, col)) in grid.draw_order(o).enumerate() {
                assert_eq!(grid.draw_index(o, row, col), i);
            }
        }
    }
}
