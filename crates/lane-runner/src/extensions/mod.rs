// extensions/mod.rs
//
// Motion helpers shared by the player systems.
// Decoupled from Entity/Scene: callers write the results where they belong.

pub mod curve;
pub mod easing;
pub mod tween;

pub use curve::{AnimationCurve, Keyframe};
pub use easing::{Easing, ease_vec3, sine_arc};
pub use tween::Tween;
