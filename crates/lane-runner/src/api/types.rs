use serde::{Deserialize, Serialize};

/// Unique identifier for an entity in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Gameplay event emitted during a tick, collected by the host after the frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameEvent {
    /// A lane transition finished and the player now occupies `lane`.
    LaneChanged { lane: usize },
    /// A jump was accepted and the player left the ground.
    Jumped,
    /// The player is back on the ground; `airtime` is the time spent airborne.
    Landed { airtime: f32 },
    /// The post-landing cooldown ran out; jumps are accepted again.
    JumpReady,
    /// The shared run speed changed.
    SpeedChanged { speed: f32 },
    /// A track section the player left was moved back ahead of the player.
    SectionRecycled { section: EntityId },
}
