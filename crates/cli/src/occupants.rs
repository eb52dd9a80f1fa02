use isokit::{Color3, Occupants, Palette, TileOverlay, UnitKind};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A unit placed on the map by the config file
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Placement {
    pub row: usize,
    pub col: usize,
    pub kind: UnitKind,
    /// Owner colour. The unit's tile is drawn in this colour too.
    #[serde(default)]
    pub color: Option<Color3>,
    /// If given, a bar over the tile shows this much progress (0 to 1)
    #[serde(default)]
    pub progress: Option<f64>,
}

/// Placements looked up by tile
#[derive(Debug, Default)]
pub struct PlacedUnits {
    by_tile: HashMap<(usize, usize), Placement>,
}

impl PlacedUnits {
    pub fn new(placements: &[Placement]) -> Self {
        Self {
            by_tile: placements
                .iter()
                .map(|placement| {
                    ((placement.row, placement.col), placement.clone())
                })
                .collect(),
        }
    }
}

/// Derive the three palette shades from a single owner colour
fn palette(color: Color3) -> Palette {
    Palette {
        line: color,
        face: color * 0.5,
        land: color * 0.25,
    }
}

impl Occupants for PlacedUnits {
    fn owner(&self, row: usize, col: usize) -> Option<Palette> {
        self.by_tile
            .get(&(row, col))
            .and_then(|placement| placement.color)
            .map(palette)
    }

    fn unit(&self, row: usize, col: usize) -> Option<UnitKind> {
        self.by_tile.get(&(row, col)).map(|placement| placement.kind)
    }

    fn draw_overlay(
        &self,
        row: usize,
        col: usize,
        overlay: &mut TileOverlay<'_>,
    ) {
        if let Some(placement) = self.by_tile.get(&(row, col)) {
            if let Some(progress) = placement.progress {
                overlay.bar(progress, placement.color.unwrap_or(Color3::WHITE));
            }
        }
    }
}
