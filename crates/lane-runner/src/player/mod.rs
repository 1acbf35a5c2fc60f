pub mod controller;
pub mod jump;
pub mod lanes;

pub use controller::PlayerController;
pub use jump::{JumpPhase, JumpProfile, JumpSettings, JumpTimer};
pub use lanes::{LaneLayout, LaneSelector, LaneSet, ShiftDirection};
