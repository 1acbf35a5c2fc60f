// extensions/easing.rs
//
// Easing and arc profiles for timed movement.
// No dependencies on Entity/Scene, just math.

use std::f32::consts::PI;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Easing applied to a lane transition's normalized time.
/// Lane shifts are linear unless a config asks otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Constant velocity (no easing).
    #[default]
    Linear,
    QuadIn,
    QuadOut,
    QuadInOut,
    CubicOut,
    SineIn,
    SineOut,
    SineInOut,
    /// Hermite smoothstep, zero velocity at both ends.
    SmoothStep,
}

impl Easing {
    /// Map normalized time `t` (clamped to [0, 1]) to eased progress.
    /// Every variant maps 0 to 0 and 1 to 1 exactly.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadIn => t * t,
            Easing::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::CubicOut => 1.0 - (1.0 - t).powi(3),
            Easing::SineIn => 1.0 - (t * PI / 2.0).cos(),
            Easing::SineOut => (t * PI / 2.0).sin(),
            Easing::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
            Easing::SmoothStep => t * t * (3.0 - 2.0 * t),
        }
    }
}

/// Rise-and-fall arc `sin(pi * t)^power` over normalized time.
/// Zero at both ends, one at the midpoint; larger powers give a sharper peak.
#[inline]
pub fn sine_arc(t: f32, power: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    (PI * t).sin().max(0.0).powf(power)
}

// ── Interpolation helpers ────────────────────────────────────────────────

/// Interpolate Vec3 with easing.
#[inline]
pub fn ease_vec3(a: Vec3, b: Vec3, t: f32, easing: Easing) -> Vec3 {
    a.lerp(b, easing.apply(t))
}
