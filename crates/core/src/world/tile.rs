use crate::world::corners::{CornerDirection, Corners};
use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

/// The shape of a tile's top surface. A sloped tile has one edge raised a
/// single step above the rest of the tile.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Slope {
    Flat,
    /// North edge raised
    North,
    /// West edge raised
    West,
    /// South edge raised
    South,
    /// East edge raised
    East,
}

impl Slope {
    /// How much each corner sits above the tile's height, NW/SW/SE/NE
    pub fn offsets(self) -> [i32; 4] {
        match self {
            Self::Flat => [0, 0, 0, 0],
            Self::North => [1, 0, 0, 1],
            Self::West => [1, 1, 0, 0],
            Self::South => [0, 1, 1, 0],
            Self::East => [0, 0, 1, 1],
        }
    }
}

/// A single tile in a [Grid](crate::Grid). Tiles are built once during grid
/// construction and never change afterward. All the per-frame state (screen
/// outline, brightness) lives in the scene instead.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub(super) row: usize,
    pub(super) col: usize,
    /// Height of the lowest point of the tile
    pub(super) height: i32,
    /// The tile's own corner heights
    pub(super) base: Corners,
    /// For each corner, the highest neighbouring corner that doesn't go
    /// above this tile's own corner
    pub(super) around: Corners,
    /// For each corner, the lowest of this tile's corner and every
    /// neighbouring corner touching it
    pub(super) lowest: Corners,
    /// Corners on the outside of the map, which touch fewer than three real
    /// neighbours. Walls at these corners run all the way to the ground.
    pub(super) open: [bool; 4],
}

impl Tile {
    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn position(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn base(&self) -> Corners {
        self.base
    }

    pub fn around(&self) -> Corners {
        self.around
    }

    pub fn lowest(&self) -> Corners {
        self.lowest
    }

    pub fn is_open(&self, corner: CornerDirection) -> bool {
        self.open[corner.index()]
    }

    pub fn open_corners(&self) -> [bool; 4] {
        self.open
    }

    /// The slope type that produces this tile's corners, if there is one.
    /// Tiles built from arbitrary corner heights may not match any.
    pub fn slope(&self) -> Option<Slope> {
        Slope::iter().find(|slope| {
            Corners::level(self.height).raised(slope.offsets()) == self.base
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slope_offsets() {
        // Every non-flat slope raises exactly one edge, i.e. two corners
        for slope in Slope::iter().filter(|s| *s != Slope::Flat) {
            assert_eq!(slope.offsets().iter().sum::<i32>(), 2);
        }
        assert_eq!(Slope::Flat.offsets(), [0; 4]);
    }

    #[test]
    fn test_detect_slope() {
        let tile = |base| Tile {
            row: 0,
            col: 0,
            height: 3,
            base,
            around: base,
            lowest: base,
            open: [false; 4],
        };
        assert_eq!(tile(Corners::level(3)).slope(), Some(Slope::Flat));
        assert_eq!(tile(Corners::new(3, 4, 4, 3)).slope(), Some(Slope::South));
        assert_eq!(tile(Corners::new(3, 5, 3, 3)).slope(), None);
    }
}
