//! Derive the neighbour-dependent corner sets of each tile. These can only be
//! computed once every tile in the grid has its base corners, so this runs as
//! the second phase of grid construction.

use crate::world::corners::{CornerDirection, Corners};
use strum::IntoEnumIterator;

/// The corners derived for one tile. See [Tile](crate::Tile) for what each
/// field means.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PropagatedCorners {
    pub around: Corners,
    pub lowest: Corners,
    pub open: [bool; 4],
}

/// For each corner (in array order), the three neighbouring tiles that share
/// its grid vertex: `(row offset, col offset, the neighbour's corner)`.
/// Each corner touches two orthogonal neighbours and one diagonal one.
const TOUCHING: [[(isize, isize, CornerDirection); 3]; 4] = {
    use CornerDirection::*;
    [
        // NW
        [(-1, 0, Southwest), (-1, -1, Southeast), (0, -1, Northeast)],
        // SW
        [(0, -1, Southeast), (1, -1, Northeast), (1, 0, Northwest)],
        // SE
        [(1, 0, Northeast), (1, 1, Northwest), (0, 1, Southwest)],
        // NE
        [(0, 1, Northwest), (-1, 1, Southwest), (-1, 0, Southeast)],
    ]
};

/// Compute the derived corners for the tile at `(row, col)` with the given
/// base corners. `neighbor` looks up the base corners of another tile by
/// position, and must return [Corners::EMPTY] for positions off the grid.
///
/// Sentinel values from missing neighbours never take part in either
/// reduction: a corner with no real neighbours just reports its own height
/// for both `around` and `lowest`.
pub fn propagate_corners(
    row: usize,
    col: usize,
    base: Corners,
    neighbor: impl Fn(isize, isize) -> Corners,
) -> PropagatedCorners {
    let mut around = base;
    let mut lowest = base;
    let mut open = [false; 4];

    for corner in CornerDirection::iter() {
        let own = base[corner];
        let touching = TOUCHING[corner.index()]
            .iter()
            .map(|&(dr, dc, their_corner)| {
                neighbor(row as isize + dr, col as isize + dc)[their_corner]
            })
            .filter(|&value| value != Corners::SENTINEL);

        let mut real_neighbors = 0;
        let mut next_lowest: Option<i32> = None;
        let mut min = own;
        for value in touching {
            real_neighbors += 1;
            if value <= own {
                next_lowest = Some(next_lowest.map_or(value, |v| v.max(value)));
            }
            min = min.min(value);
        }

        // No neighbour at or below this corner means there's nothing to join
        // to, so the wall stops at the tile itself
        around.set(corner, next_lowest.unwrap_or(own));
        lowest.set(corner, min);
        open[corner.index()] = real_neighbors < 3;
    }

    PropagatedCorners {
        around,
        lowest,
        open,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Run propagation for one tile of a small grid given in row-major order
    fn propagate_in(
        rows: usize,
        cols: usize,
        grid: &[Corners],
        row: usize,
        col: usize,
    ) -> PropagatedCorners {
        let lookup = |r: isize, c: isize| {
            if r < 0 || c < 0 || r as usize >= rows || c as usize >= cols {
                Corners::EMPTY
            } else {
                grid[r as usize * cols + c as usize]
            }
        };
        propagate_corners(row, col, grid[row * cols + col], lookup)
    }

    #[test]
    fn test_interior_equal_heights() {
        let grid = vec![Corners::level(4); 9];
        let result = propagate_in(3, 3, &grid, 1, 1);
        assert_eq!(result.around, Corners::level(4));
        assert_eq!(result.lowest, Corners::level(4));
        assert_eq!(result.open, [false; 4]);
    }

    #[test]
    fn test_two_by_two() {
        // (0,0)=3 (0,1)=2
        // (1,0)=4 (1,1)=1
        let grid = vec![
            Corners::level(3),
            Corners::level(2),
            Corners::level(4),
            Corners::level(1),
        ];

        let top_left = propagate_in(2, 2, &grid, 0, 0);
        // NW touches nothing, so it only sees itself
        assert_eq!(top_left.lowest.nw(), 3);
        assert_eq!(top_left.around.nw(), 3);
        // SW touches only (1,0) at 4, which is above us
        assert_eq!(top_left.lowest.sw(), 3);
        assert_eq!(top_left.around.sw(), 3);
        // SE touches (1,0)=4, (1,1)=1, (0,1)=2
        assert_eq!(top_left.lowest.se(), 1);
        assert_eq!(top_left.around.se(), 2);
        // NE touches only (0,1)=2
        assert_eq!(top_left.lowest.ne(), 2);
        assert_eq!(top_left.around.ne(), 2);
        // Only the SE corner has all three neighbours
        assert_eq!(top_left.open, [true, true, false, true]);

        let bottom_left = propagate_in(2, 2, &grid, 1, 0);
        // NE touches (0,1)=2, (0,0)=3, (1,1)=1; all lower than 4
        assert_eq!(bottom_left.around.ne(), 3);
        assert_eq!(bottom_left.lowest.ne(), 1);
        // NW touches only (0,0)=3
        assert_eq!(bottom_left.around.nw(), 3);
        assert_eq!(bottom_left.lowest.nw(), 3);

        let bottom_right = propagate_in(2, 2, &grid, 1, 1);
        // Everything touching NW is higher, so there's no next-lowest
        assert_eq!(bottom_right.around.nw(), 1);
        assert_eq!(bottom_right.lowest.nw(), 1);
        // SE is the far corner of the map
        assert_eq!(bottom_right.lowest.se(), 1);
    }

    #[test]
    fn test_sloped_neighbors() {
        // A south-sloped tile north of a flat tile: the shared edge lines up
        let grid = vec![Corners::new(2, 3, 3, 2), Corners::level(3)];
        let north = propagate_in(2, 1, &grid, 0, 0);
        assert_eq!(north.around.sw(), 3);
        assert_eq!(north.lowest.sw(), 3);
        assert_eq!(north.around.se(), 3);

        let south = propagate_in(2, 1, &grid, 1, 0);
        assert_eq!(south.around.nw(), 3);
        assert_eq!(south.lowest.ne(), 3);
        // Nothing south of it
        assert_eq!(south.lowest.sw(), 3);
        assert!(south.open[CornerDirection::Southwest.index()]);
    }

    #[test]
    fn test_single_tile() {
        let grid = vec![Corners::new(1, 2, 3, 4)];
        let result = propagate_in(1, 1, &grid, 0, 0);
        assert_eq!(result.around, grid[0]);
        assert_eq!(result.lowest, grid[0]);
        assert_eq!(result.open, [true; 4]);
    }
}
