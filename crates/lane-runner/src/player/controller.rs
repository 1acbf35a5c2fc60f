//! The player: lane selector and jump timer applied to a scene entity.

use log::{debug, info};

use crate::api::error::ConfigError;
use crate::api::game::EngineContext;
use crate::api::types::{EntityId, GameEvent};
use crate::assets::config::PlayerSettings;
use crate::components::entity::Entity;
use super::jump::{JumpPhase, JumpTimer};
use super::lanes::{LaneSelector, LaneSet, ShiftDirection};
#[cfg(feature = "physics")]
use super::jump::JumpProfile;
#[cfg(feature = "physics")]
use crate::assets::config::PhysicsSettings;
#[cfg(feature = "physics")]
use crate::core::physics::{BodyDesc, ColliderDesc, ColliderMaterial, PhysicsBody};
#[cfg(feature = "physics")]
use glam::Vec2;

pub const PLAYER_TAG: &str = "player";
#[cfg(feature = "physics")]
pub const GROUND_TAG: &str = "ground";

/// Impulse-jump bookkeeping: the ground the player lands on.
#[cfg(feature = "physics")]
#[derive(Debug, Clone, Copy)]
struct ImpulseDriver {
    impulse: f32,
    ground: PhysicsBody,
    landing_speed: f32,
}

pub struct PlayerController {
    entity: EntityId,
    lanes: LaneSelector,
    jump: JumpTimer,
    allow_shift_while_jumping: bool,
    #[cfg(feature = "physics")]
    impulse: Option<ImpulseDriver>,
}

impl PlayerController {
    /// Build a controller for an entity that already exists.
    /// Ground height is taken from the start lane's anchor.
    pub fn new(entity: EntityId, settings: &PlayerSettings) -> Result<Self, ConfigError> {
        let lanes = LaneSelector::new(
            LaneSet::from_layout(&settings.lanes)?,
            settings.start_lane,
            settings.transition_duration,
            settings.transition_easing,
        )?;
        let ground_y = lanes.current_position().y;
        let jump = JumpTimer::new(settings.jump.clone(), ground_y)?;

        Ok(Self {
            entity,
            lanes,
            jump,
            allow_shift_while_jumping: settings.allow_shift_while_jumping,
            #[cfg(feature = "physics")]
            impulse: None,
        })
    }

    /// Build the controller and spawn its entity at the start lane.
    #[cfg(not(feature = "physics"))]
    pub fn spawn(ctx: &mut EngineContext, settings: &PlayerSettings) -> Result<Self, ConfigError> {
        let id = ctx.next_id();
        let controller = Self::new(id, settings)?;
        let start = controller.lanes.current_position();
        ctx.spawn(Entity::new(id).with_tag(PLAYER_TAG).with_pos(start));
        info!("player spawned in lane {} at {}", controller.current_lane(), start);
        Ok(controller)
    }

    /// Build the controller and spawn its entity at the start lane. With the
    /// impulse profile the entity also gets a body, plus a ground to land on.
    #[cfg(feature = "physics")]
    pub fn spawn(
        ctx: &mut EngineContext,
        settings: &PlayerSettings,
        physics: &PhysicsSettings,
    ) -> Result<Self, ConfigError> {
        let id = ctx.next_id();
        let mut controller = Self::new(id, settings)?;
        let start = controller.lanes.current_position();
        let player = Entity::new(id).with_tag(PLAYER_TAG).with_pos(start);

        if let JumpProfile::Impulse { impulse } = settings.jump.profile {
            let shape = ColliderDesc::CapsuleY {
                half_height: physics.body_half_height,
                radius: physics.body_radius,
            };
            let material = ColliderMaterial {
                density: physics.body_density,
                ..ColliderMaterial::default()
            };
            ctx.spawn_with_body(
                player,
                BodyDesc::dynamic(shape).with_fixed_rotation(true),
                material,
            );

            // Ground top sits at the foot of a body resting at start.y, so the
            // body's origin rests at the same height a kinematic jump uses.
            const GROUND_HALF: f32 = 0.5;
            let ground_id = ctx.next_id();
            let ground_pos = glam::Vec3::new(0.0, start.y - shape.half_extent_y() - GROUND_HALF, start.z);
            let ground_desc = BodyDesc::fixed(ColliderDesc::Cuboid {
                half_width: 1000.0,
                half_height: GROUND_HALF,
            });
            ctx.spawn_with_body(
                Entity::new(ground_id).with_tag(GROUND_TAG).with_pos(ground_pos),
                ground_desc,
                ColliderMaterial::default(),
            );

            controller.impulse = ctx.body(ground_id).map(|ground| ImpulseDriver {
                impulse,
                ground,
                landing_speed: physics.landing_speed,
            });
        } else {
            ctx.spawn(player);
        }

        info!("player spawned in lane {} at {}", controller.current_lane(), start);
        Ok(controller)
    }

    pub fn entity(&self) -> EntityId {
        self.entity
    }

    pub fn current_lane(&self) -> usize {
        self.lanes.current_lane()
    }

    pub fn lanes(&self) -> &LaneSelector {
        &self.lanes
    }

    pub fn jump_phase(&self) -> JumpPhase {
        self.jump.phase()
    }

    pub fn is_jumping(&self) -> bool {
        self.jump.is_jumping()
    }

    pub fn can_jump(&self) -> bool {
        self.jump.can_jump()
    }

    pub fn is_transitioning(&self) -> bool {
        self.lanes.is_transitioning()
    }

    /// A shift is possible when no transition runs and, unless configured
    /// otherwise, the player is on the ground.
    pub fn can_shift(&self) -> bool {
        (self.allow_shift_while_jumping || !self.jump.is_jumping()) && !self.lanes.is_transitioning()
    }

    /// Request a lane shift. Busy, airborne (when disallowed) or boundary
    /// requests are dropped.
    pub fn shift(&mut self, direction: ShiftDirection) -> bool {
        if !self.can_shift() {
            debug!("lane shift {:?} dropped: player busy", direction);
            return false;
        }
        self.lanes.request_shift(direction).is_some()
    }

    /// Request a jump. Returns whether it started.
    pub fn jump(&mut self, ctx: &mut EngineContext) -> bool {
        if !self.jump.request_jump() {
            return false;
        }
        self.launch(ctx);
        ctx.emit(GameEvent::Jumped);
        true
    }

    #[cfg(feature = "physics")]
    fn launch(&self, ctx: &mut EngineContext) {
        if let Some(driver) = &self.impulse {
            ctx.apply_impulse(self.entity, Vec2::new(0.0, driver.impulse));
        }
    }

    #[cfg(not(feature = "physics"))]
    fn launch(&self, _ctx: &mut EngineContext) {}

    /// Advance the transition and the jump by `dt` and write the results to
    /// the player entity.
    pub fn update(&mut self, ctx: &mut EngineContext, dt: f32) {
        let lane_step = self.lanes.update(dt);
        if let Some(pos) = lane_step.position {
            ctx.set_position_x(self.entity, pos.x);
            if let Some(entity) = ctx.scene.get_mut(self.entity) {
                entity.pos.z = pos.z;
            }
        }
        if let Some(lane) = lane_step.arrived {
            debug!("arrived in lane {}", lane);
            ctx.emit(GameEvent::LaneChanged { lane });
        }

        let jump_step = self.jump.update(dt);
        if let Some(height) = jump_step.height {
            if let Some(entity) = ctx.scene.get_mut(self.entity) {
                entity.pos.y = height;
            }
        }
        let landed = jump_step.landed.or_else(|| self.detect_landing(ctx));
        if let Some(airtime) = landed {
            debug!("landed after {:.3}s", airtime);
            ctx.emit(GameEvent::Landed { airtime });
        }
        if jump_step.ready {
            ctx.emit(GameEvent::JumpReady);
        }
    }

    /// Impulse jumps end when the body touches the ground without rising.
    #[cfg(feature = "physics")]
    fn detect_landing(&mut self, ctx: &EngineContext) -> Option<f32> {
        let driver = self.impulse?;
        let JumpPhase::Airborne { elapsed } = self.jump.phase() else {
            return None;
        };
        if elapsed <= 0.0 {
            return None;
        }
        let body = ctx.body(self.entity)?;
        let rising = ctx.velocity(self.entity).y > driver.landing_speed;
        if !rising && ctx.physics.touching(&body, &driver.ground) {
            self.jump.land()
        } else {
            None
        }
    }

    #[cfg(not(feature = "physics"))]
    fn detect_landing(&mut self, _ctx: &EngineContext) -> Option<f32> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::jump::JumpSettings;
    use glam::Vec3;

    fn spawn(ctx: &mut EngineContext, settings: &PlayerSettings) -> PlayerController {
        #[cfg(feature = "physics")]
        let player = PlayerController::spawn(ctx, settings, &PhysicsSettings::default());
        #[cfg(not(feature = "physics"))]
        let player = PlayerController::spawn(ctx, settings);
        player.unwrap()
    }

    fn position(ctx: &EngineContext, player: &PlayerController) -> Vec3 {
        ctx.scene.get(player.entity()).unwrap().pos
    }

    fn settings(duration: f32) -> PlayerSettings {
        PlayerSettings {
            transition_duration: duration,
            ..PlayerSettings::default()
        }
    }

    #[test]
    fn spawns_at_start_lane() {
        let mut ctx = EngineContext::new();
        let player = spawn(&mut ctx, &PlayerSettings::default());
        assert_eq!(player.current_lane(), 1);
        assert_eq!(position(&ctx, &player), Vec3::ZERO);
        assert_eq!(ctx.scene.ids_with_tag(PLAYER_TAG), vec![player.entity()]);
    }

    #[test]
    fn rapid_shifts_honour_only_the_first() {
        let mut ctx = EngineContext::new();
        let mut player = spawn(&mut ctx, &settings(1.0));

        assert!(player.shift(ShiftDirection::Right));
        assert!(!player.shift(ShiftDirection::Right));
        assert!(!player.shift(ShiftDirection::Left));

        for expected in [0.625, 1.25, 1.875] {
            player.update(&mut ctx, 0.25);
            assert_eq!(position(&ctx, &player).x, expected);
            assert!(!player.shift(ShiftDirection::Left));
        }
        player.update(&mut ctx, 0.25);

        assert_eq!(position(&ctx, &player).x, 2.5);
        assert_eq!(player.current_lane(), 2);
        assert_eq!(ctx.events, vec![GameEvent::LaneChanged { lane: 2 }]);
    }

    fn one_second_jump() -> PlayerSettings {
        PlayerSettings {
            transition_duration: 0.5,
            jump: JumpSettings {
                duration: 1.0,
                ..JumpSettings::default()
            },
            ..PlayerSettings::default()
        }
    }

    #[test]
    fn jump_lifts_and_lands_with_events() {
        let mut ctx = EngineContext::new();
        let mut player = spawn(&mut ctx, &one_second_jump());
        assert!(player.jump(&mut ctx));
        assert!(!player.jump(&mut ctx));

        player.update(&mut ctx, 0.5);
        assert!((position(&ctx, &player).y - 1.8).abs() < 1e-5);

        player.update(&mut ctx, 0.5);
        assert_eq!(position(&ctx, &player).y, 0.0);
        assert!(!player.can_jump());

        player.update(&mut ctx, 0.2);
        assert!(player.can_jump());
        assert_eq!(
            ctx.events,
            vec![GameEvent::Jumped, GameEvent::Landed { airtime: 1.0 }, GameEvent::JumpReady]
        );
    }

    #[test]
    fn shift_while_jumping_follows_the_flag() {
        let mut ctx = EngineContext::new();
        let mut allowed = spawn(&mut ctx, &PlayerSettings::default());
        allowed.jump(&mut ctx);
        allowed.update(&mut ctx, 0.1);
        assert!(allowed.shift(ShiftDirection::Left));

        let mut ctx = EngineContext::new();
        let mut grounded_only = spawn(
            &mut ctx,
            &PlayerSettings {
                allow_shift_while_jumping: false,
                ..PlayerSettings::default()
            },
        );
        grounded_only.jump(&mut ctx);
        grounded_only.update(&mut ctx, 0.1);
        assert!(!grounded_only.shift(ShiftDirection::Left));
        assert!(!grounded_only.is_transitioning());
    }

    #[test]
    fn lateral_move_keeps_jump_height() {
        let mut ctx = EngineContext::new();
        let mut player = spawn(&mut ctx, &one_second_jump());
        player.jump(&mut ctx);
        player.shift(ShiftDirection::Left);
        player.update(&mut ctx, 0.5);
        let pos = position(&ctx, &player);
        assert_eq!(pos.x, -2.5);
        assert!((pos.y - 1.8).abs() < 1e-5);
    }
}

#[cfg(test)]
#[cfg(feature = "physics")]
mod impulse_tests {
    use super::*;
    use crate::api::game::GameConfig;
    use crate::player::jump::JumpSettings;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn impulse_jump_lands_on_ground_contact_then_cools_down() {
        let physics = PhysicsSettings::default();
        let config = GameConfig {
            gravity: Vec2::new(0.0, physics.gravity),
            ..GameConfig::default()
        };
        let mut ctx = EngineContext::from_config(&config);
        let settings = PlayerSettings {
            jump: JumpSettings {
                cooldown: 0.2,
                profile: JumpProfile::Impulse { impulse: 15.0 },
                ..JumpSettings::default()
            },
            ..PlayerSettings::default()
        };
        let mut player = PlayerController::spawn(&mut ctx, &settings, &physics).unwrap();
        assert_eq!(ctx.physics.body_count(), 2);

        // Settle onto the ground first.
        for _ in 0..30 {
            player.update(&mut ctx, DT);
            ctx.step_physics(DT);
        }

        assert!(player.jump(&mut ctx));
        let mut peak: f32 = 0.0;
        let mut landed_at = None;
        for frame in 0..600 {
            player.update(&mut ctx, DT);
            ctx.step_physics(DT);
            peak = peak.max(ctx.scene.get(player.entity()).unwrap().pos.y);
            if landed_at.is_none() && !player.is_jumping() {
                landed_at = Some(frame);
            }
            if player.can_jump() {
                break;
            }
        }

        assert!(peak > 0.5, "impulse should lift the body: peak={}", peak);
        assert!(landed_at.is_some(), "body never landed");
        assert!(player.can_jump(), "cooldown never finished");
        assert!(ctx.events.iter().any(|e| matches!(e, GameEvent::Landed { .. })));
    }
}
