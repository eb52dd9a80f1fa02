use crate::geometry::{rectangular_prism, triangular_prism, Mesh};
use fnv::FnvBuildHasher;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Every kind of unit that has a mesh
#[derive(
    Copy,
    Clone,
    Debug,
    Display,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum UnitKind {
    Castle,
    Soldier,
    Farmer,
}

impl UnitKind {
    /// Build this unit's mesh from scratch. Prefer [MeshLibrary::get], which
    /// builds each mesh once and shares it.
    pub fn build_mesh(self) -> Mesh {
        match self {
            Self::Castle => castle(),
            Self::Soldier => Mesh::from(vec![rectangular_prism(
                0.0, 0.0, 0.0, 0.4, 0.4, 0.4, false, false,
            )]),
            Self::Farmer => Mesh::from(vec![triangular_prism(
                0.0, 0.0, 0.0, 0.4, 0.4, 0.4,
            )]),
        }
    }
}

/// A walled base with a pointed tower in the middle and a ring of small
/// blocks around it
fn castle() -> Mesh {
    const SIZE: f64 = 0.7;
    const HEIGHT: f64 = 0.3;
    const TOWER_SIZE: f64 = 0.15;
    const TOWER_SPACING: f64 = (SIZE - TOWER_SIZE) / 2.0;
    const TOWER_HEIGHT: f64 = 0.1;
    const KEEP_SIZE: f64 = 0.2;
    const KEEP_HEIGHT: f64 = 0.2;
    const ROOF_HEIGHT: f64 = 0.25;

    let mut mesh = Mesh::new();
    mesh.add(rectangular_prism(
        0.0, 0.0, 0.0, SIZE, SIZE, HEIGHT, false, false,
    ));

    // Back to front, so nearer towers cover the ones behind them
    for x in -1..=1 {
        for y in -1..=1 {
            if x == 0 && y == 0 {
                mesh.add(rectangular_prism(
                    0.0,
                    0.0,
                    HEIGHT,
                    KEEP_SIZE,
                    KEEP_SIZE,
                    KEEP_HEIGHT,
                    false,
                    false,
                ));
                mesh.add(triangular_prism(
                    0.0,
                    0.0,
                    HEIGHT + KEEP_HEIGHT,
                    KEEP_SIZE,
                    KEEP_SIZE,
                    ROOF_HEIGHT,
                ));
            } else {
                mesh.add(rectangular_prism(
                    TOWER_SPACING * x as f64,
                    TOWER_SPACING * y as f64,
                    HEIGHT,
                    TOWER_SIZE,
                    TOWER_SIZE,
                    TOWER_HEIGHT,
                    true,
                    false,
                ));
            }
        }
    }

    mesh
}

/// One shared, read-only mesh per [UnitKind]. Build it once up front and
/// hand out references for every draw.
#[derive(Clone, Debug)]
pub struct MeshLibrary {
    meshes: HashMap<UnitKind, Mesh, FnvBuildHasher>,
}

impl MeshLibrary {
    pub fn new() -> Self {
        Self {
            meshes: UnitKind::iter()
                .map(|kind| (kind, kind.build_mesh()))
                .collect(),
        }
    }

    pub fn get(&self, kind: UnitKind) -> &Mesh {
        crate::unwrap!(self.meshes.get(&kind), "no mesh for {}", kind)
    }
}

impl Default for MeshLibrary {
    fn default() -> Self {
        Self::new()
    }
}
