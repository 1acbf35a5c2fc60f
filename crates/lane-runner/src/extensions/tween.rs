// extensions/tween.rs
//
// A single timed interpolation between two points.
//
// Usage:
//   let mut tween = Tween::new(from, to, 0.12, Easing::Linear);
//   let pos = tween.advance(dt);   // every frame until tween.is_complete()

use glam::Vec3;
use super::easing::{Easing, ease_vec3};

/// Timed movement from `from` to `to`.
/// The final sample is exactly `to`, never an interpolated approximation.
#[derive(Debug, Clone)]
pub struct Tween {
    pub from: Vec3,
    pub to: Vec3,
    /// Duration in seconds.
    pub duration: f32,
    /// Elapsed time.
    pub elapsed: f32,
    pub easing: Easing,
}

impl Tween {
    pub fn new(from: Vec3, to: Vec3, duration: f32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: 0.0,
            easing,
        }
    }

    /// Normalized progress [0, 1].
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Current sample without advancing.
    pub fn value(&self) -> Vec3 {
        if self.is_complete() {
            self.to
        } else {
            ease_vec3(self.from, self.to, self.progress(), self.easing)
        }
    }

    /// Advance by `dt` seconds and return the new sample.
    pub fn advance(&mut self, dt: f32) -> Vec3 {
        self.elapsed += dt.max(0.0);
        self.value()
    }
}
