// extensions/curve.rs
//
// Keyframed curve evaluated with cubic Hermite segments.

use serde::{Deserialize, Serialize};
use crate::api::error::ConfigError;

/// One key of an [`AnimationCurve`]. Tangents are slopes (value per unit time)
/// and default to flat.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub time: f32,
    pub value: f32,
    #[serde(default)]
    pub in_tangent: f32,
    #[serde(default)]
    pub out_tangent: f32,
}

impl Keyframe {
    /// Key with flat tangents.
    pub fn new(time: f32, value: f32) -> Self {
        Self {
            time,
            value,
            in_tangent: 0.0,
            out_tangent: 0.0,
        }
    }
}

/// A piecewise cubic curve through sorted keys.
/// Times outside the key range clamp to the first/last value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationCurve {
    pub keys: Vec<Keyframe>,
}

impl AnimationCurve {
    pub fn new(keys: Vec<Keyframe>) -> Result<Self, ConfigError> {
        let curve = Self { keys };
        curve.validate()?;
        Ok(curve)
    }

    /// The standard jump arc: ground, peak at half time, ground.
    pub fn jump_arc() -> Self {
        Self {
            keys: vec![
                Keyframe::new(0.0, 0.0),
                Keyframe::new(0.5, 1.0),
                Keyframe::new(1.0, 0.0),
            ],
        }
    }

    /// Keys must exist and have strictly increasing, finite times.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.keys.is_empty() {
            return Err(ConfigError::EmptyCurve);
        }
        for (index, pair) in self.keys.windows(2).enumerate() {
            if !(pair[1].time > pair[0].time) {
                return Err(ConfigError::UnsortedCurve { index: index + 1 });
            }
        }
        Ok(())
    }

    pub fn evaluate(&self, t: f32) -> f32 {
        let (first, last) = match (self.keys.first(), self.keys.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return 0.0,
        };
        if t <= first.time {
            return first.value;
        }
        if t >= last.time {
            return last.value;
        }

        // First key strictly after t; t > first.time guarantees idx >= 1.
        let idx = self.keys.partition_point(|k| k.time <= t);
        let k0 = &self.keys[idx - 1];
        let k1 = &self.keys[idx];
        hermite(k0, k1, t)
    }
}

impl Default for AnimationCurve {
    fn default() -> Self {
        Self::jump_arc()
    }
}

#[inline]
fn hermite(k0: &Keyframe, k1: &Keyframe, t: f32) -> f32 {
    let span = k1.time - k0.time;
    let s = (t - k0.time) / span;
    let s2 = s * s;
    let s3 = s2 * s;

    let h00 = 2.0 * s3 - 3.0 * s2 + 1.0;
    let h10 = s3 - 2.0 * s2 + s;
    let h01 = -2.0 * s3 + 3.0 * s2;
    let h11 = s3 - s2;

    h00 * k0.value + h10 * span * k0.out_tangent + h01 * k1.value + h11 * span * k1.in_tangent
}
