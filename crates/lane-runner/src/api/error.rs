use thiserror::Error;

/// Configuration problems detected while loading or building a session.
/// Gameplay requests never fail; only setup does.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("lane set is empty")]
    NoLanes,

    #[error("start lane {start} is out of range for {count} lanes")]
    StartLaneOutOfRange { start: usize, count: usize },

    #[error("{field} must be positive and finite, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error("max speed {max} is below start speed {start}")]
    SpeedRange { start: f32, max: f32 },

    #[error("jump curve has no keys")]
    EmptyCurve,

    #[error("jump curve key {index} is not after the previous key")]
    UnsortedCurve { index: usize },

    #[error("track needs at least one section")]
    NoSections,
}

/// Reject zero, negative, NaN and infinite values for a named field.
pub(crate) fn require_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}
