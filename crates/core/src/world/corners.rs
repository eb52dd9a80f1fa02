use crate::timing::{Scalar, TimingFunction};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::{
    ops::Index,
    time::{Duration, Instant},
};
use strum::{EnumIter, IntoEnumIterator};

/// One of the four corners of a tile. The discriminant is the corner's index
/// in a [Corners] array.
#[derive(
    Copy,
    Clone,
    Debug,
    Display,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CornerDirection {
    #[display(fmt = "NW")]
    Northwest = 0,
    #[display(fmt = "SW")]
    Southwest = 1,
    #[display(fmt = "SE")]
    Southeast = 2,
    #[display(fmt = "NE")]
    Northeast = 3,
}

impl CornerDirection {
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Heights of the four corners of a tile, in the order NW, SW, SE, NE. A
/// value is either a non-negative height or [Corners::SENTINEL], which means
/// there is no tile there at all.
///
/// The camera-relative accessors ([Corners::back] and friends) take the
/// camera's current corner shift, so the same data can be read as "nearest to
/// the viewer" no matter how the scene is rotated.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub struct Corners([i32; 4]);

impl Corners {
    /// Height value that stands in for a tile that doesn't exist
    pub const SENTINEL: i32 = -1;
    /// Corners of a tile that doesn't exist
    pub const EMPTY: Self = Self([Self::SENTINEL; 4]);
    /// A flat tile at ground level
    pub const FLAT: Self = Self([0; 4]);

    pub const fn new(nw: i32, sw: i32, se: i32, ne: i32) -> Self {
        Self([nw, sw, se, ne])
    }

    /// All four corners at the same height
    pub const fn level(height: i32) -> Self {
        Self([height; 4])
    }

    /// Raise each corner by the matching offset
    pub fn raised(self, offsets: [i32; 4]) -> Self {
        let mut values = self.0;
        for (value, offset) in values.iter_mut().zip(offsets.iter()) {
            *value += offset;
        }
        Self(values)
    }

    pub fn as_array(self) -> [i32; 4] {
        self.0
    }

    pub fn get(self, corner: CornerDirection) -> i32 {
        self.0[corner.index()]
    }

    pub fn set(&mut self, corner: CornerDirection, value: i32) {
        self.0[corner.index()] = value;
    }

    /// Iterate over each corner along with its value, in array order
    pub fn iter(self) -> impl Iterator<Item = (CornerDirection, i32)> {
        CornerDirection::iter().map(move |corner| (corner, self.get(corner)))
    }

    /// Is this the corner set of a missing tile?
    pub fn is_empty(self) -> bool {
        self == Self::EMPTY
    }

    pub fn min(self) -> i32 {
        self.0.iter().copied().min().unwrap_or(Self::SENTINEL)
    }

    pub fn nw(self) -> i32 {
        self.0[0]
    }

    pub fn sw(self) -> i32 {
        self.0[1]
    }

    pub fn se(self) -> i32 {
        self.0[2]
    }

    pub fn ne(self) -> i32 {
        self.0[3]
    }

    /// Corner farthest from the viewer (NW with no rotation)
    pub fn back(self, shift: usize) -> i32 {
        self.relative(0, shift)
    }

    /// Corner on the left of the screen (SW with no rotation)
    pub fn left(self, shift: usize) -> i32 {
        self.relative(1, shift)
    }

    /// Corner nearest the viewer (SE with no rotation)
    pub fn front(self, shift: usize) -> i32 {
        self.relative(2, shift)
    }

    /// Corner on the right of the screen (NE with no rotation)
    pub fn right(self, shift: usize) -> i32 {
        self.relative(3, shift)
    }

    fn relative(self, index: usize, shift: usize) -> i32 {
        self.0[(index + shift) % 4]
    }
}

impl Index<CornerDirection> for Corners {
    type Output = i32;

    fn index(&self, corner: CornerDirection) -> &i32 {
        &self.0[corner.index()]
    }
}

/// Fractional corner heights, used for anything drawn between integer heights
/// (e.g. an animated cursor). Same ordering and accessors as [Corners].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct CornerValues(pub [f64; 4]);

impl CornerValues {
    pub fn back(self, shift: usize) -> f64 {
        self.0[shift % 4]
    }

    pub fn left(self, shift: usize) -> f64 {
        self.0[(1 + shift) % 4]
    }

    pub fn front(self, shift: usize) -> f64 {
        self.0[(2 + shift) % 4]
    }

    pub fn right(self, shift: usize) -> f64 {
        self.0[(3 + shift) % 4]
    }
}

impl From<Corners> for CornerValues {
    fn from(corners: Corners) -> Self {
        let [nw, sw, se, ne] = corners.as_array();
        Self([nw as f64, sw as f64, se as f64, ne as f64])
    }
}

/// Four corner heights that can each ease toward a new set of [Corners].
#[derive(Clone, Debug, Default)]
pub struct EasedCorners([Scalar; 4]);

impl EasedCorners {
    pub fn new(corners: Corners) -> Self {
        let mut eased = Self::default();
        eased.set(corners);
        eased
    }

    /// Jump straight to the given heights
    pub fn set(&mut self, corners: Corners) {
        for (scalar, value) in self.0.iter_mut().zip(corners.as_array()) {
            scalar.set(value as f64);
        }
    }

    /// Start each corner moving toward the given heights from wherever it is
    /// at `now`
    pub fn ease_to(
        &mut self,
        now: Instant,
        corners: Corners,
        duration: Duration,
    ) {
        for (scalar, value) in self.0.iter_mut().zip(corners.as_array()) {
            scalar.ease_to(
                now,
                value as f64,
                duration,
                TimingFunction::Ease,
            );
        }
    }

    pub fn values_at(&self, now: Instant) -> CornerValues {
        CornerValues([
            self.0[0].value_at(now),
            self.0[1].value_at(now),
            self.0[2].value_at(now),
            self.0[3].value_at(now),
        ])
    }

    pub fn is_animating_at(&self, now: Instant) -> bool {
        self.0.iter().any(|scalar| scalar.is_animating_at(now))
    }
}
