//! Jump timing: a single in-flight jump followed by a landing cooldown.
//!
//! `Grounded -> Airborne -> Cooldown -> Grounded`. Kinematic profiles end
//! the airborne phase when `duration` has elapsed; the impulse profile
//! leaves height to the physics body and ends on ground contact via
//! [`JumpTimer::land`].

use log::debug;
use serde::{Deserialize, Serialize};

use crate::api::error::{require_positive, ConfigError};
use crate::extensions::{sine_arc, AnimationCurve};

/// Vertical displacement over normalized jump time, scaled by `height`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JumpProfile {
    /// Keyframed curve sampled at normalized time.
    Curve(AnimationCurve),
    /// `sin(pi * t)^power`.
    SineArc { power: f32 },
    /// Upward impulse handed to the physics body; landing is detected from
    /// ground contact instead of elapsed time.
    #[cfg(feature = "physics")]
    Impulse { impulse: f32 },
}

impl JumpProfile {
    /// Normalized height at normalized time `t`, or `None` when physics
    /// owns the height.
    pub fn sample(&self, t: f32) -> Option<f32> {
        match self {
            JumpProfile::Curve(curve) => Some(curve.evaluate(t)),
            JumpProfile::SineArc { power } => Some(sine_arc(t, *power)),
            #[cfg(feature = "physics")]
            JumpProfile::Impulse { .. } => None,
        }
    }

    pub fn is_kinematic(&self) -> bool {
        match self {
            #[cfg(feature = "physics")]
            JumpProfile::Impulse { .. } => false,
            _ => true,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match self {
            JumpProfile::Curve(curve) => curve.validate(),
            JumpProfile::SineArc { power } => require_positive("sine arc power", *power),
            #[cfg(feature = "physics")]
            JumpProfile::Impulse { impulse } => require_positive("jump impulse", *impulse),
        }
    }
}

impl Default for JumpProfile {
    fn default() -> Self {
        JumpProfile::Curve(AnimationCurve::jump_arc())
    }
}

/// Author-time jump tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JumpSettings {
    /// Airborne time in seconds (kinematic profiles).
    pub duration: f32,
    /// Peak height in world units.
    pub height: f32,
    /// Delay after landing before the next jump is accepted.
    pub cooldown: f32,
    pub profile: JumpProfile,
}

impl Default for JumpSettings {
    fn default() -> Self {
        Self {
            duration: 0.9,
            height: 1.8,
            cooldown: 0.2,
            profile: JumpProfile::default(),
        }
    }
}

impl JumpSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("jump duration", self.duration)?;
        require_positive("jump height", self.height)?;
        if !(self.cooldown.is_finite() && self.cooldown >= 0.0) {
            return Err(ConfigError::NonPositive {
                field: "jump cooldown",
                value: self.cooldown,
            });
        }
        self.profile.validate()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JumpPhase {
    Grounded,
    Airborne { elapsed: f32 },
    Cooldown { elapsed: f32 },
}

/// What a jump update produced.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct JumpStep {
    /// Vertical position to apply this frame (kinematic profiles only).
    pub height: Option<f32>,
    /// Airtime, when the player landed this frame.
    pub landed: Option<f32>,
    /// The cooldown finished this frame.
    pub ready: bool,
}

#[derive(Debug, Clone)]
pub struct JumpTimer {
    settings: JumpSettings,
    ground_y: f32,
    phase: JumpPhase,
}

impl JumpTimer {
    pub fn new(settings: JumpSettings, ground_y: f32) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self {
            settings,
            ground_y,
            phase: JumpPhase::Grounded,
        })
    }

    pub fn phase(&self) -> JumpPhase {
        self.phase
    }

    pub fn settings(&self) -> &JumpSettings {
        &self.settings
    }

    /// Height the player returns to on landing.
    pub fn ground_y(&self) -> f32 {
        self.ground_y
    }

    pub fn is_jumping(&self) -> bool {
        matches!(self.phase, JumpPhase::Airborne { .. })
    }

    /// False for the whole jump and the cooldown after it.
    pub fn can_jump(&self) -> bool {
        matches!(self.phase, JumpPhase::Grounded)
    }

    /// Start a jump. Returns `false` (and changes nothing) unless grounded
    /// with the cooldown elapsed.
    pub fn request_jump(&mut self) -> bool {
        if !self.can_jump() || self.is_jumping() {
            debug!("jump dropped in {:?}", self.phase);
            return false;
        }
        self.phase = JumpPhase::Airborne { elapsed: 0.0 };
        true
    }

    /// Advance timers by `dt`.
    pub fn update(&mut self, dt: f32) -> JumpStep {
        let dt = dt.max(0.0);
        match self.phase {
            JumpPhase::Grounded => JumpStep::default(),
            JumpPhase::Airborne { elapsed } => {
                let elapsed = elapsed + dt;
                self.phase = JumpPhase::Airborne { elapsed };
                if !self.settings.profile.is_kinematic() {
                    return JumpStep::default();
                }
                if elapsed >= self.settings.duration {
                    let mut step = self.finish_airborne(elapsed);
                    step.height = Some(self.ground_y);
                    return step;
                }
                let t = elapsed / self.settings.duration;
                JumpStep {
                    height: self
                        .settings
                        .profile
                        .sample(t)
                        .map(|p| self.ground_y + p * self.settings.height),
                    ..JumpStep::default()
                }
            }
            JumpPhase::Cooldown { elapsed } => {
                let elapsed = elapsed + dt;
                if elapsed >= self.settings.cooldown {
                    self.phase = JumpPhase::Grounded;
                    JumpStep {
                        ready: true,
                        ..JumpStep::default()
                    }
                } else {
                    self.phase = JumpPhase::Cooldown { elapsed };
                    JumpStep::default()
                }
            }
        }
    }

    /// End the airborne phase on ground contact. Returns the airtime, or
    /// `None` when not airborne.
    pub fn land(&mut self) -> Option<f32> {
        match self.phase {
            JumpPhase::Airborne { elapsed } => self.finish_airborne(elapsed).landed,
            _ => None,
        }
    }

    fn finish_airborne(&mut self, airtime: f32) -> JumpStep {
        self.phase = JumpPhase::Cooldown { elapsed: 0.0 };
        JumpStep {
            landed: Some(airtime),
            ..JumpStep::default()
        }
    }
}
