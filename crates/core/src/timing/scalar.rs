use crate::timing::{AnimatedValue, Animation, TimingFunction};
use std::time::{Duration, Instant};

/// A number that is either constant or easing toward a target. Fields that
/// sometimes animate (camera pan, tile brightness, cursor position) store one
/// of these so readers don't have to care which it is right now.
#[derive(Clone, Debug)]
pub enum Scalar {
    Fixed(f64),
    Eased(AnimatedValue),
}

impl Scalar {
    /// Current value at the given time
    pub fn value_at(&self, now: Instant) -> f64 {
        match self {
            Self::Fixed(value) => *value,
            Self::Eased(animated) => animated.value_at(now),
        }
    }

    /// Current value, reading the clock
    pub fn value_now(&self) -> f64 {
        self.value_at(Instant::now())
    }

    /// The value this will eventually settle on
    pub fn target(&self) -> f64 {
        match self {
            Self::Fixed(value) => *value,
            Self::Eased(animated) => {
                if animated.animation().function().ends_at_one() {
                    animated.end()
                } else {
                    animated.start()
                }
            }
        }
    }

    pub fn is_animating_at(&self, now: Instant) -> bool {
        match self {
            Self::Fixed(_) => false,
            Self::Eased(animated) => animated.is_animating_at(now),
        }
    }

    /// Jump straight to a value, cancelling any animation in progress
    pub fn set(&mut self, value: f64) {
        *self = Self::Fixed(value);
    }

    /// Start moving toward `target`, from wherever the value is at `now`. A
    /// zero duration is the same as [Self::set].
    pub fn ease_to(
        &mut self,
        now: Instant,
        target: f64,
        duration: Duration,
        function: TimingFunction,
    ) {
        if duration.is_zero() {
            self.set(target);
        } else {
            let current = self.value_at(now);
            *self = Self::Eased(AnimatedValue::new(
                Animation::starting_at(now, function, duration),
                current,
                target,
            ));
        }
    }

    /// Shift both ends of the value by a constant. An animation in progress
    /// keeps running, offset by `delta`.
    pub fn offset(&mut self, delta: f64) {
        match self {
            Self::Fixed(value) => *value += delta,
            Self::Eased(animated) => {
                *animated = AnimatedValue::new(
                    animated.animation().clone(),
                    animated.start() + delta,
                    animated.end() + delta,
                );
            }
        }
    }
}

impl Default for Scalar {
    fn default() -> Self {
        Self::Fixed(0.0)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Self::Fixed(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_ease_to() {
        let now = Instant::now();
        let mut scalar = Scalar::from(4.0);
        assert!(!scalar.is_animating_at(now));

        scalar.ease_to(now, 8.0, 100 * MS, TimingFunction::Linear);
        assert!(scalar.is_animating_at(now + 50 * MS));
        assert_approx_eq!(scalar.value_at(now + 50 * MS), 6.0);
        assert_approx_eq!(scalar.target(), 8.0);
        assert_approx_eq!(scalar.value_at(now + 200 * MS), 8.0);
    }

    #[test]
    fn test_retarget_mid_flight() {
        let now = Instant::now();
        let mut scalar = Scalar::from(0.0);
        scalar.ease_to(now, 10.0, 100 * MS, TimingFunction::Linear);
        let later = now + 40 * MS;
        let before = scalar.value_at(later);
        scalar.ease_to(later, -10.0, 100 * MS, TimingFunction::Linear);
        assert_approx_eq!(scalar.value_at(later), before);
        assert_approx_eq!(scalar.target(), -10.0);
    }

    #[test]
    fn test_zero_duration_sets() {
        let now = Instant::now();
        let mut scalar = Scalar::from(1.0);
        scalar.ease_to(now, 3.0, Duration::ZERO, TimingFunction::Ease);
        assert!(matches!(scalar, Scalar::Fixed(v) if v == 3.0));
    }

    #[test]
    fn test_offset() {
        let now = Instant::now();
        let mut scalar = Scalar::from(0.0);
        scalar.ease_to(now, 10.0, 100 * MS, TimingFunction::Linear);
        scalar.offset(5.0);
        assert_approx_eq!(scalar.value_at(now + 50 * MS), 10.0);
        assert_approx_eq!(scalar.target(), 15.0);
    }
}
