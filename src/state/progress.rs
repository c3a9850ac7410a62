//! Progress bar easing between steps

use std::time::{Duration, Instant};

/// Eases the progress bar from its previous ratio to the current one
#[derive(Debug, Clone)]
pub struct ProgressAnimation {
    from: f64,
    to: f64,
    started: Instant,
}

impl ProgressAnimation {
    /// Duration of the transition
    const DURATION: Duration = Duration::from_millis(250);

    pub fn new(ratio: f64) -> Self {
        Self {
            from: ratio,
            to: ratio,
            started: Instant::now(),
        }
    }

    /// Start easing toward `ratio` from wherever the bar is now
    pub fn retarget(&mut self, ratio: f64, now: Instant) {
        if (ratio - self.to).abs() < f64::EPSILON {
            return;
        }
        self.from = self.value_at(now);
        self.to = ratio;
        self.started = now;
    }

    #[cfg(test)]
    pub fn target(&self) -> f64 {
        self.to
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        now.duration_since(self.started) < Self::DURATION && (self.to - self.from).abs() > 0.0
    }

    /// Ratio to draw at `now`, clamped to `0.0..=1.0`
    pub fn value_at(&self, now: Instant) -> f64 {
        let elapsed = now.duration_since(self.started);
        if elapsed >= Self::DURATION {
            return self.to.clamp(0.0, 1.0);
        }
        let progress = elapsed.as_secs_f32() / Self::DURATION.as_secs_f32();
        // Cubic ease-out for smooth deceleration
        let eased = f64::from(simple_easing::cubic_out(progress));
        (self.from + (self.to - self.from) * eased).clamp(0.0, 1.0)
    }
}
