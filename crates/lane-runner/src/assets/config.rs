use serde::{Deserialize, Serialize};

use crate::api::error::{require_positive, ConfigError};
use crate::extensions::Easing;
use crate::player::jump::JumpSettings;
use crate::player::lanes::{LaneLayout, LaneSet};

/// Everything a run is tuned with, loaded from a JSON file at startup.
/// Every field has an inline default, so `{}` is a valid config.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    pub player: PlayerSettings,
    pub speed: SpeedSettings,
    pub track: TrackSettings,
    #[cfg(feature = "physics")]
    pub physics: PhysicsSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    pub lanes: LaneLayout,
    /// Lane index the player spawns in.
    pub start_lane: usize,
    /// Seconds a lane shift takes.
    pub transition_duration: f32,
    pub transition_easing: Easing,
    /// Whether lane shifts are accepted mid-jump.
    pub allow_shift_while_jumping: bool,
    pub jump: JumpSettings,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            lanes: LaneLayout::default(),
            start_lane: 1,
            transition_duration: 0.12,
            transition_easing: Easing::Linear,
            allow_shift_while_jumping: true,
            jump: JumpSettings::default(),
        }
    }
}

/// Speed ramp: starts at `start`, gains `amount` every `interval` seconds,
/// never exceeds `max`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedSettings {
    pub start: f32,
    pub max: f32,
    pub interval: f32,
    pub amount: f32,
}

impl Default for SpeedSettings {
    fn default() -> Self {
        Self {
            start: 5.0,
            max: 10.0,
            interval: 2.0,
            amount: 1.0,
        }
    }
}

impl SpeedSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("speed ramp interval", self.interval)?;
        if !(self.start.is_finite() && self.max.is_finite() && self.max >= self.start) {
            return Err(ConfigError::SpeedRange {
                start: self.start,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Recycling track made of equal sections laid end to end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackSettings {
    /// Length of one section along z.
    pub section_length: f32,
    /// Sections alive at once; a passed section jumps this many lengths ahead.
    pub section_count: usize,
}

impl Default for TrackSettings {
    fn default() -> Self {
        Self {
            section_length: 10.0,
            section_count: 6,
        }
    }
}

impl TrackSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("section length", self.section_length)?;
        if self.section_count == 0 {
            return Err(ConfigError::NoSections);
        }
        Ok(())
    }
}

/// Physics world and player body used by the impulse jump.
#[cfg(feature = "physics")]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    /// Vertical gravity; negative pulls down.
    pub gravity: f32,
    /// Capsule half height (cylinder part) of the player body.
    pub body_half_height: f32,
    pub body_radius: f32,
    pub body_density: f32,
    /// Vertical speed at or below which a grounded body counts as landed.
    pub landing_speed: f32,
}

#[cfg(feature = "physics")]
impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            gravity: -30.0,
            body_half_height: 0.5,
            body_radius: 0.4,
            body_density: 1.0,
            landing_speed: 0.01,
        }
    }
}

#[cfg(feature = "physics")]
impl PhysicsSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("body half height", self.body_half_height)?;
        require_positive("body radius", self.body_radius)?;
        require_positive("body density", self.body_density)?;
        Ok(())
    }
}

impl RunnerConfig {
    /// Parse and validate a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let lanes = LaneSet::from_layout(&self.player.lanes)?;
        if self.player.start_lane >= lanes.len() {
            return Err(ConfigError::StartLaneOutOfRange {
                start: self.player.start_lane,
                count: lanes.len(),
            });
        }
        require_positive("transition duration", self.player.transition_duration)?;
        self.player.jump.validate()?;
        self.speed.validate()?;
        self.track.validate()?;
        #[cfg(feature = "physics")]
        self.physics.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::jump::JumpProfile;

    #[test]
    fn empty_object_is_the_default_run() {
        let config = RunnerConfig::from_json("{}").unwrap();
        assert_eq!(config, RunnerConfig::default());
        assert_eq!(config.player.start_lane, 1);
        assert_eq!(config.player.transition_duration, 0.12);
        assert_eq!(config.track.section_count, 6);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let json = r#"{
            "player": {
                "lanes": { "kind": "corridors", "count": 5, "width": 2.0 },
                "start_lane": 2,
                "allow_shift_while_jumping": false,
                "jump": { "cooldown": 0.4, "profile": { "kind": "sine_arc", "power": 2.0 } }
            },
            "speed": { "max": 25.0 }
        }"#;
        let config = RunnerConfig::from_json(json).unwrap();
        assert_eq!(config.player.start_lane, 2);
        assert!(!config.player.allow_shift_while_jumping);
        assert_eq!(config.player.jump.cooldown, 0.4);
        assert_eq!(config.player.jump.duration, 0.9);
        assert_eq!(config.player.jump.profile, JumpProfile::SineArc { power: 2.0 });
        assert_eq!(config.speed.start, 5.0);
        assert_eq!(config.speed.max, 25.0);
    }

    #[test]
    fn curve_keys_load_from_json() {
        let json = r#"{ "player": { "jump": { "profile": {
            "kind": "curve",
            "keys": [
                { "time": 0.0, "value": 0.0, "out_tangent": 4.0 },
                { "time": 0.4, "value": 1.0 },
                { "time": 1.0, "value": 0.0 }
            ]
        } } } }"#;
        let config = RunnerConfig::from_json(json).unwrap();
        match &config.player.jump.profile {
            JumpProfile::Curve(curve) => {
                assert_eq!(curve.keys.len(), 3);
                assert_eq!(curve.keys[0].out_tangent, 4.0);
            }
            other => panic!("expected curve profile, got {:?}", other),
        }
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            RunnerConfig::from_json("{ \"speed\": "),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn invalid_values_fail_fast() {
        let cases = [
            r#"{ "player": { "lanes": { "kind": "positions", "positions": [] } } }"#,
            r#"{ "player": { "start_lane": 3 } }"#,
            r#"{ "player": { "transition_duration": 0.0 } }"#,
            r#"{ "player": { "jump": { "height": -1.0 } } }"#,
            r#"{ "player": { "jump": { "profile": { "kind": "curve", "keys": [] } } } }"#,
            r#"{ "speed": { "start": 12.0, "max": 10.0 } }"#,
            r#"{ "speed": { "interval": 0.0 } }"#,
            r#"{ "track": { "section_count": 0 } }"#,
        ];
        for json in cases {
            assert!(RunnerConfig::from_json(json).is_err(), "accepted {}", json);
        }
    }
}
