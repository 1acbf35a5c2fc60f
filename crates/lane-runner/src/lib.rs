pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod input;
pub mod assets;
pub mod extensions;
pub mod player;
pub mod reactive;
pub mod game;

// Re-export key types at crate root for convenience
pub use api::error::ConfigError;
pub use api::game::{Game, GameConfig, EngineContext};
pub use api::types::{EntityId, GameEvent};
pub use components::entity::Entity;
pub use core::scene::Scene;
pub use core::time::IntervalTimer;
pub use input::queue::{InputEvent, InputQueue};
pub use assets::config::{RunnerConfig, PlayerSettings, SpeedSettings, TrackSettings};
pub use player::{
    PlayerController, JumpPhase, JumpProfile, JumpSettings, JumpTimer,
    LaneLayout, LaneSelector, LaneSet, ShiftDirection,
};
pub use reactive::{EventChannel, Reference, SubscriptionId, Variable};
pub use systems::{SpeedRamp, Track};
pub use game::RunnerGame;

#[cfg(feature = "physics")]
pub use assets::config::PhysicsSettings;
#[cfg(feature = "physics")]
pub use core::physics::{
    PhysicsWorld, PhysicsBody, BodyDesc, BodyType,
    ColliderDesc, ColliderMaterial,
};

// Extensions: interpolation helpers used by the player
pub use extensions::{
    AnimationCurve, Keyframe, Easing, Tween,
    ease_vec3, sine_arc,
};
