use crate::timing::TimingFunction;
use std::{
    sync::atomic::{AtomicBool, Ordering},
    time::{Duration, Instant},
};

/// A timing function bound to a start time and a duration. The start time is
/// captured when the animation is created, so build one right when the
/// transition should begin.
///
/// Once an animation has been observed past its end, it latches as finished
/// and never reads the clock again, so its value can't drift or regress even
/// if a caller later samples it with an earlier timestamp.
#[derive(Debug)]
pub struct Animation {
    function: TimingFunction,
    duration: Duration,
    start: Instant,
    finished: AtomicBool,
}

impl Animation {
    /// Start a new animation now
    pub fn new(function: TimingFunction, duration: Duration) -> Self {
        Self::starting_at(Instant::now(), function, duration)
    }

    /// Create an animation that started (or will start) at the given time
    pub fn starting_at(
        start: Instant,
        function: TimingFunction,
        duration: Duration,
    ) -> Self {
        Self {
            function,
            duration,
            start,
            finished: AtomicBool::new(false),
        }
    }

    /// The timing curve this animation follows
    pub fn function(&self) -> TimingFunction {
        self.function
    }

    /// Total run time of the animation
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Get the progress of the animation at the given time, as output by its
    /// timing function. Before the start this is the value at `t = 0`, after
    /// the end it's the function's terminal value.
    pub fn value_at(&self, now: Instant) -> f64 {
        if self.finished_at(now) {
            return self.function.terminal_value();
        }
        let elapsed = now.saturating_duration_since(self.start);
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        self.function.value_at_time(t)
    }

    /// [Self::value_at] for the current time
    pub fn value(&self) -> f64 {
        self.value_at(Instant::now())
    }

    /// Has this animation been observed past its end? This does not read
    /// the clock, see [Self::finished_at] for that.
    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Relaxed)
    }

    /// Check if the animation is over at the given time, latching the
    /// finished flag if so. Zero-length animations are over immediately.
    pub fn finished_at(&self, now: Instant) -> bool {
        if self.is_finished() {
            return true;
        }
        let elapsed = now.saturating_duration_since(self.start);
        if elapsed >= self.duration {
            self.finished.store(true, Ordering::Relaxed);
            true
        } else {
            false
        }
    }
}

// The finished flag is an atomic so the animation is Sync, which means it
// can't be derived
impl Clone for Animation {
    fn clone(&self) -> Self {
        Self {
            function: self.function,
            duration: self.duration,
            start: self.start,
            finished: AtomicBool::new(self.is_finished()),
        }
    }
}

/// A number that moves from `start` to `end` over the course of an
/// [Animation].
#[derive(Clone, Debug)]
pub struct AnimatedValue {
    animation: Animation,
    start: f64,
    end: f64,
}

impl AnimatedValue {
    pub fn new(animation: Animation, start: f64, end: f64) -> Self {
        Self {
            animation,
            start,
            end,
        }
    }

    /// Ease from `start` to `end`, beginning now
    pub fn eased(duration: Duration, start: f64, end: f64) -> Self {
        Self::new(Animation::new(TimingFunction::Ease, duration), start, end)
    }

    /// A value that is already resting at `value`
    pub fn fixed(value: f64) -> Self {
        Self::new(
            Animation::new(TimingFunction::Linear, Duration::ZERO),
            value,
            value,
        )
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    /// The value this will settle on once the animation is done
    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn animation(&self) -> &Animation {
        &self.animation
    }

    /// Get the value at the given time
    pub fn value_at(&self, now: Instant) -> f64 {
        if self.animation.finished_at(now) {
            // Skip the interpolation so we land exactly on the bound
            if self.animation.function().ends_at_one() {
                self.end
            } else {
                self.start
            }
        } else {
            self.start + self.animation.value_at(now) * (self.end - self.start)
        }
    }

    /// Get the value right now
    pub fn double_value(&self) -> f64 {
        self.value_at(Instant::now())
    }

    /// Is the value still moving at the given time? Once this returns false
    /// the value is constant, and anything derived from it can be cached.
    pub fn is_animating_at(&self, now: Instant) -> bool {
        !self.animation.duration().is_zero()
            && !self.animation.finished_at(now)
    }

    /// [Self::is_animating_at] for the current time
    pub fn is_animating(&self) -> bool {
        self.is_animating_at(Instant::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_zero_duration() {
        let value = AnimatedValue::new(
            Animation::new(TimingFunction::Ease, Duration::ZERO),
            3.0,
            7.0,
        );
        assert!(!value.is_animating());
        assert_approx_eq!(value.double_value(), 7.0);

        let fixed = AnimatedValue::fixed(2.5);
        assert!(!fixed.is_animating());
        assert_approx_eq!(fixed.double_value(), 2.5);
    }

    #[test]
    fn test_progress() {
        let start = Instant::now();
        let value = AnimatedValue::new(
            Animation::starting_at(start, TimingFunction::Linear, 100 * MS),
            10.0,
            20.0,
        );
        assert_approx_eq!(value.value_at(start), 10.0);
        assert_approx_eq!(value.value_at(start + 25 * MS), 12.5);
        assert!(value.is_animating_at(start + 50 * MS));
        assert_approx_eq!(value.value_at(start + 50 * MS), 15.0);
        assert_approx_eq!(value.value_at(start + 100 * MS), 20.0);
        assert!(!value.is_animating_at(start + 100 * MS));
    }

    #[test]
    fn test_finished_latches() {
        let start = Instant::now();
        let animation =
            Animation::starting_at(start, TimingFunction::Linear, 10 * MS);
        assert!(!animation.is_finished());
        assert_approx_eq!(animation.value_at(start + 20 * MS), 1.0);
        assert!(animation.is_finished());
        // Sampling an earlier time after finishing doesn't rewind anything
        assert_approx_eq!(animation.value_at(start + 5 * MS), 1.0);
        assert!(animation.finished_at(start));
    }

    #[test]
    fn test_before_start() {
        let start = Instant::now() + 50 * MS;
        let value = AnimatedValue::new(
            Animation::starting_at(start, TimingFunction::Ease, 10 * MS),
            1.0,
            2.0,
        );
        assert_approx_eq!(value.value_at(start - 20 * MS), 1.0);
    }

    #[test]
    fn test_retarget_continuity() {
        let start = Instant::now();
        let old = AnimatedValue::new(
            Animation::starting_at(start, TimingFunction::Ease, 200 * MS),
            0.0,
            100.0,
        );
        let retarget_at = start + 70 * MS;
        let sampled = old.value_at(retarget_at);
        let new = AnimatedValue::new(
            Animation::starting_at(retarget_at, TimingFunction::Ease, 200 * MS),
            sampled,
            -50.0,
        );
        let jump = old.value_at(retarget_at) - new.value_at(retarget_at);
        assert!(jump.abs() < 1e-9);
    }
}
