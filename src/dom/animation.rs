use std::time::{Duration, Instant};

/// Easing function for scroll animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    /// Constant speed interpolation.
    Linear,
    /// Cosine ease: `0.5 - cos(pi * t) / 2`. Gentle start and end.
    Swing,
}

/// A single active animation interpolating an f32 value over time.
#[derive(Debug, Clone, Copy)]
struct Animation {
    from: f32,
    to: f32,
    start: Instant,
    duration: Duration,
    easing: Easing,
}

impl Animation {
    fn value_at(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.start);
        if self.duration.is_zero() || elapsed >= self.duration {
            return self.to;
        }
        let t = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        self.from + (self.to - self.from) * ease(t, self.easing)
    }

    fn is_done(&self, now: Instant) -> bool {
        self.duration.is_zero() || now.saturating_duration_since(self.start) >= self.duration
    }
}

/// Single-slot, time-driven scroll interpolation.
///
/// At most one animation is owned at a time: `start` replaces whatever is
/// in flight, so two overlapping scrolls never fight over the position.
/// Animations tick on wall-clock `Instant`s supplied by the caller.
#[derive(Debug, Default)]
pub struct ScrollAnimator {
    slot: Option<Animation>,
}

impl ScrollAnimator {
    pub fn new() -> Self {
        Self { slot: None }
    }

    /// Start a new animation, superseding any in-flight one.
    /// Returns true if an unfinished animation was replaced.
    pub fn start(
        &mut self,
        from: f32,
        to: f32,
        duration: Duration,
        easing: Easing,
        now: Instant,
    ) -> bool {
        let superseded = self.is_active(now);
        self.slot = Some(Animation {
            from,
            to,
            start: now,
            duration,
            easing,
        });
        superseded
    }

    /// Current interpolated value. `None` when idle. Returns the target
    /// once complete (until `gc` clears the slot).
    pub fn get(&self, now: Instant) -> Option<f32> {
        self.slot.map(|a| a.value_at(now))
    }

    /// Returns true if an animation exists and has not yet completed.
    pub fn is_active(&self, now: Instant) -> bool {
        self.slot.is_some_and(|a| !a.is_done(now))
    }

    /// Clear a completed animation. Call once per frame after reading it.
    pub fn gc(&mut self, now: Instant) {
        if self.slot.is_some_and(|a| a.is_done(now)) {
            self.slot = None;
        }
    }
}

/// Apply an easing function to a linear progress value `t` in [0, 1].
fn ease(t: f32, easing: Easing) -> f32 {
    match easing {
        Easing::Linear => t,
        Easing::Swing => 0.5 - (std::f32::consts::PI * t).cos() / 2.0,
    }
}
