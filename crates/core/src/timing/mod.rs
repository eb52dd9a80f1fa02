//! Time-based interpolation. Every value in the kernel that changes smoothly
//! (camera angle, pan, tile brightness, cursor position) is driven by the
//! types in this module.
//!
//! The building blocks, from the bottom up:
//! - [TimingFunction] maps normalized time `[0, 1]` to progress
//! - [Animation] binds a timing function to a wall-clock start and duration
//! - [AnimatedValue] maps an animation's progress onto a `start..end` range
//! - [Scalar] is either a fixed number or an [AnimatedValue], and is what
//!   most fields actually store
//!
//! Animations are never mutated once created. To change where a value is
//! headed, replace it with a new animation that starts at the current value.
//! See [Scalar::ease_to].

mod animation;
mod scalar;

pub use self::{
    animation::{AnimatedValue, Animation},
    scalar::Scalar,
};
use serde::{Deserialize, Serialize};

/// A curve that maps normalized time to animation progress. Input time is in
/// `[0, 1]`. Output typically starts at `0` and ends at either `1` or `0`,
/// see [TimingFunction::ends_at_one].
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum TimingFunction {
    /// Constant speed: `v = t`
    Linear,
    /// Slow start, fast finish: `v = 3(1-t)t² + t³`. This is a cubic Bezier
    /// with control values 0 and 1, written out to skip the zero terms.
    Ease,
    /// Cubic Bezier curve from 0 to 1 with the two given control values
    Cubic { c1: f64, c2: f64 },
    /// Quadratic Bezier curve with the given control value. This counts as a
    /// decay curve: once the animation is over, the value snaps back to its
    /// start. Useful for a flash or bump that should leave nothing behind.
    Quadratic { c: f64 },
}

impl TimingFunction {
    /// Get the progress value at the given normalized time.
    pub fn value_at_time(self, t: f64) -> f64 {
        match self {
            Self::Linear => t,
            Self::Ease => 3.0 * (1.0 - t) * t * t + t * t * t,
            Self::Cubic { c1, c2 } => {
                3.0 * (1.0 - t) * (1.0 - t) * t * c1
                    + 3.0 * (1.0 - t) * t * t * c2
                    + t * t * t
            }
            Self::Quadratic { c } => 2.0 * (1.0 - t) * t * c + t * t,
        }
    }

    /// Does this function finish at `1` (progress) or `0` (decay)? A finished
    /// animation reports this terminal value directly instead of evaluating
    /// the curve near `t = 1`, where float error could leave it just short.
    pub fn ends_at_one(self) -> bool {
        match self {
            Self::Linear | Self::Ease | Self::Cubic { .. } => true,
            Self::Quadratic { .. } => false,
        }
    }

    /// The value this function settles on once time runs out.
    pub fn terminal_value(self) -> f64 {
        if self.ends_at_one() {
            1.0
        } else {
            0.0
        }
    }
}

impl Default for TimingFunction {
    fn default() -> Self {
        Self::Ease
    }
}
