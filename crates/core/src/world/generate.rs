use crate::{
    config::{GridConfig, Seed},
    timed,
    world::{
        corners::Corners,
        propagate::propagate_corners,
        tile::{Slope, Tile},
        Grid,
    },
};
use anyhow::{anyhow, ensure};
use log::{debug, info};
use rand::Rng;

/// Builds a [Grid] in two phases. [GridBuilder::new_tiles] (or
/// [GridBuilder::from_base_corners]) lays out every tile with its own height
/// and base corners. Then [GridBuilder::compute_propagated_corners] fills in
/// the corners that depend on neighbours, which can only happen once all the
/// tiles exist. Building before the second phase is an error.
#[derive(Clone, Debug)]
pub struct GridBuilder {
    rows: usize,
    cols: usize,
    /// Row-major
    tiles: Vec<TileBuilder>,
}

impl GridBuilder {
    /// Phase one: generate a height and slope for every tile. Heights fall
    /// off linearly with row and column, with some random bumps.
    pub fn new_tiles(config: &GridConfig, seed: &Seed) -> Self {
        let mut rng = seed.rng();
        let rows = config.rows as usize;
        let cols = config.cols as usize;

        let mut tiles = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                let slope = if rng.gen_bool(config.slope_chance) {
                    random_slope(&mut rng)
                } else {
                    Slope::Flat
                };
                let bump = if rng.gen_bool(config.bump_chance) { 1 } else { 0 };
                // Saturating, since the config may not have been validated
                let row_drop = config.row_gradient.saturating_mul(row as i32);
                let col_drop = config.col_gradient.saturating_mul(col as i32);
                let height = config
                    .base_height
                    .saturating_sub(row_drop)
                    .saturating_sub(col_drop)
                    .saturating_add(bump)
                    .max(0);
                tiles.push(TileBuilder::new(
                    row,
                    col,
                    height,
                    Corners::level(height).raised(slope.offsets()),
                ));
            }
        }

        info!("Initialized grid with {} tiles", tiles.len());
        Self { rows, cols, tiles }
    }

    /// Phase one, with the base corners given directly (row-major). Each
    /// tile's height is its lowest corner. Fails if the number of corner sets
    /// doesn't match the grid size, or if any corner is negative.
    pub fn from_base_corners(
        rows: usize,
        cols: usize,
        base: Vec<Corners>,
    ) -> anyhow::Result<Self> {
        ensure!(
            rows > 0 && cols > 0,
            "grid must have at least one tile, got {}x{}",
            rows,
            cols
        );
        ensure!(
            base.len() == rows * cols,
            "expected {} corner sets for a {}x{} grid, got {}",
            rows * cols,
            rows,
            cols,
            base.len()
        );
        if let Some(i) = base.iter().position(|c| c.min() < 0) {
            return Err(anyhow!(
                "tile ({}, {}) has a negative corner: {:?}",
                i / cols,
                i % cols,
                base[i]
            ));
        }

        let tiles = base
            .into_iter()
            .enumerate()
            .map(|(i, corners)| {
                TileBuilder::new(i / cols, i % cols, corners.min(), corners)
            })
            .collect();
        Ok(Self { rows, cols, tiles })
    }

    /// Base corners of the tile at the given position, or the sentinel
    /// corners if it's off the grid
    fn base_at(&self, row: isize, col: isize) -> Corners {
        if row < 0
            || col < 0
            || row as usize >= self.rows
            || col as usize >= self.cols
        {
            Corners::EMPTY
        } else {
            self.tiles[row as usize * self.cols + col as usize].base
        }
    }

    /// Phase two: derive the neighbour-dependent corners for every tile.
    pub fn compute_propagated_corners(&mut self) {
        // Compute everything against the untouched base corners, then write
        // back in a second pass, so we never hold a mutable borrow of one
        // tile while reading its neighbours
        let propagated: Vec<_> = timed!(
            "Corner propagation",
            self.tiles
                .iter()
                .map(|tile| {
                    propagate_corners(tile.row, tile.col, tile.base, |r, c| {
                        self.base_at(r, c)
                    })
                })
                .collect()
        );

        for (tile, corners) in self.tiles.iter_mut().zip(propagated) {
            tile.around = Some(corners.around);
            tile.lowest = Some(corners.lowest);
            tile.open = Some(corners.open);
        }
        debug!("Propagated corners for {} tiles", self.tiles.len());
    }

    /// Finalize the grid. Fails if the propagation phase hasn't run.
    pub fn build(self) -> anyhow::Result<Grid> {
        let tiles = self
            .tiles
            .into_iter()
            .map(TileBuilder::build)
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(Grid {
            rows: self.rows,
            cols: self.cols,
            tiles,
        })
    }
}

fn random_slope(rng: &mut impl Rng) -> Slope {
    // Flat is included, so a "sloped" tile can still come out flat
    match rng.gen_range(0..5) {
        0 => Slope::Flat,
        1 => Slope::North,
        2 => Slope::West,
        3 => Slope::South,
        _ => Slope::East,
    }
}

/// A partially built [Tile]. The derived corners are only available after
/// the propagation phase.
#[derive(Clone, Debug)]
struct TileBuilder {
    row: usize,
    col: usize,
    height: i32,
    base: Corners,
    around: Option<Corners>,
    lowest: Option<Corners>,
    open: Option<[bool; 4]>,
}

impl TileBuilder {
    fn new(row: usize, col: usize, height: i32, base: Corners) -> Self {
        Self {
            row,
            col,
            height,
            base,
            around: None,
            lowest: None,
            open: None,
        }
    }

    fn build(self) -> anyhow::Result<Tile> {
        let missing = || {
            anyhow!(
                "corners not propagated for tile ({}, {})",
                self.row,
                self.col
            )
        };
        Ok(Tile {
            row: self.row,
            col: self.col,
            height: self.height,
            base: self.base,
            around: self.around.ok_or_else(missing)?,
            lowest: self.lowest.ok_or_else(missing)?,
            open: self.open.ok_or_else(missing)?,
        })
    }
}
