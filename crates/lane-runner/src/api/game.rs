use crate::core::scene::Scene;
use crate::api::types::{EntityId, GameEvent};
use crate::components::entity::Entity;
use crate::input::queue::InputQueue;
#[cfg(feature = "physics")]
use crate::core::physics::{PhysicsWorld, PhysicsBody, BodyDesc, ColliderMaterial};
#[cfg(feature = "physics")]
use glam::Vec2;

/// Configuration for the host loop, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Longest frame delta forwarded to the game, in seconds. Longer frames
    /// (a stalled window, a debugger pause) are clamped to this.
    pub max_frame_dt: f32,
    /// Gravity for the physics world. y is up, so gravity is negative.
    #[cfg(feature = "physics")]
    pub gravity: Vec2,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_frame_dt: 0.25,
            #[cfg(feature = "physics")]
            gravity: Vec2::new(0.0, -9.81),
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return host configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state and spawn entities.
    fn init(&mut self, ctx: &mut EngineContext);

    /// Per-frame tick. `dt` is the (clamped) time since the previous frame;
    /// `input` holds the events pushed since then.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue, dt: f32);
}

/// Mutable access to host state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    /// Events emitted during the current frame.
    pub events: Vec<GameEvent>,
    next_id: u32,
    #[cfg(feature = "physics")]
    pub physics: PhysicsWorld,
}

impl EngineContext {
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            events: Vec::new(),
            next_id: 1,
            #[cfg(feature = "physics")]
            physics: PhysicsWorld::new(GameConfig::default().gravity),
        }
    }

    /// Create an EngineContext for the given host configuration.
    #[cfg(feature = "physics")]
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            physics: PhysicsWorld::new(config.gravity),
            ..Self::new()
        }
    }

    #[cfg(not(feature = "physics"))]
    pub fn from_config(_config: &GameConfig) -> Self {
        Self::new()
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }

    /// Add an entity without a body.
    pub fn spawn(&mut self, entity: Entity) -> EntityId {
        let id = entity.id;
        self.scene.spawn(entity);
        id
    }

    /// Remove an entity, cleaning up its physics body if present.
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        let entity = self.scene.despawn(id)?;
        self.release_body(&entity);
        Some(entity)
    }

    /// Move an entity along x, its body included.
    pub fn set_position_x(&mut self, id: EntityId, x: f32) {
        self.move_body_x(id, x);
        if let Some(entity) = self.scene.get_mut(id) {
            entity.pos.x = x;
        }
    }

    #[cfg(feature = "physics")]
    fn release_body(&mut self, entity: &Entity) {
        if let Some(body) = &entity.body {
            self.physics.remove_body(body);
        }
    }

    #[cfg(not(feature = "physics"))]
    fn release_body(&mut self, _entity: &Entity) {}

    #[cfg(feature = "physics")]
    fn move_body_x(&mut self, id: EntityId, x: f32) {
        if let Some(body) = self.body(id) {
            self.physics.set_position_x(&body, x);
        }
    }

    #[cfg(not(feature = "physics"))]
    fn move_body_x(&mut self, _id: EntityId, _x: f32) {}

    // -- Physics convenience methods --

    /// Spawn an entity with a physics body. Returns the EntityId.
    /// The body is placed at the entity's x/y.
    #[cfg(feature = "physics")]
    pub fn spawn_with_body(
        &mut self,
        entity: Entity,
        desc: BodyDesc,
        material: ColliderMaterial,
    ) -> EntityId {
        let id = entity.id;
        let desc = desc.with_position(Vec2::new(entity.pos.x, entity.pos.y));
        let body = self.physics.create_body(id, &desc, material);
        self.scene.spawn(entity.with_body(body));
        id
    }

    #[cfg(feature = "physics")]
    pub fn body(&self, id: EntityId) -> Option<PhysicsBody> {
        self.scene.get(id).and_then(|e| e.body)
    }

    /// Apply an instantaneous impulse to an entity's physics body.
    #[cfg(feature = "physics")]
    pub fn apply_impulse(&mut self, id: EntityId, impulse: Vec2) {
        if let Some(body) = self.body(id) {
            self.physics.apply_impulse(&body, impulse);
        }
    }

    /// Get the linear velocity of an entity's physics body.
    #[cfg(feature = "physics")]
    pub fn velocity(&self, id: EntityId) -> Vec2 {
        self.body(id)
            .map(|body| self.physics.velocity(&body))
            .unwrap_or(Vec2::ZERO)
    }

    /// Step the physics simulation by `dt` and sync x/y back to entities.
    /// Called by the host runner after `Game::update()`.
    #[cfg(feature = "physics")]
    pub fn step_physics(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        self.physics.set_dt(dt);
        self.physics.step();

        for entity in self.scene.iter_mut() {
            if let Some(body) = &entity.body {
                let pos = self.physics.body_position(body);
                entity.pos.x = pos.x;
                entity.pos.y = pos.y;
            }
        }
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}


#[cfg(test)]
#[cfg(feature = "physics")]
mod physics_tests {
    use super::*;
    use crate::core::physics::ColliderDesc;
    use glam::Vec3;

    #[test]
    fn spawn_with_body_creates_entity_and_physics() {
        let mut ctx = EngineContext::new();
        let id = ctx.next_id();
        let entity = Entity::new(id).with_pos(Vec3::new(1.0, 2.0, 0.0));
        let desc = BodyDesc::dynamic(ColliderDesc::CapsuleY { half_height: 0.5, radius: 0.4 });

        ctx.spawn_with_body(entity, desc, ColliderMaterial::default());

        assert_eq!(ctx.scene.len(), 1);
        assert_eq!(ctx.physics.body_count(), 1);
        assert!(ctx.body(id).is_some());
    }

    #[test]
    fn despawn_cleans_up_physics() {
        let mut ctx = EngineContext::new();
        let id = ctx.next_id();
        let desc = BodyDesc::dynamic(ColliderDesc::CapsuleY { half_height: 0.5, radius: 0.4 });
        ctx.spawn_with_body(Entity::new(id), desc, ColliderMaterial::default());

        assert!(ctx.despawn(id).is_some());
        assert_eq!(ctx.scene.len(), 0);
        assert_eq!(ctx.physics.body_count(), 0);
    }

    #[test]
    fn step_physics_syncs_x_and_y_only() {
        let mut ctx = EngineContext::from_config(&GameConfig::default());
        let id = ctx.next_id();
        let entity = Entity::new(id).with_pos(Vec3::new(0.0, 10.0, 7.0));
        let desc = BodyDesc::dynamic(ColliderDesc::CapsuleY { half_height: 0.5, radius: 0.4 });
        ctx.spawn_with_body(entity, desc, ColliderMaterial::default());

        for _ in 0..10 {
            ctx.step_physics(1.0 / 60.0);
        }

        let entity = ctx.scene.get(id).unwrap();
        assert!(entity.pos.y < 10.0, "should fall: y={}", entity.pos.y);
        assert_eq!(entity.pos.z, 7.0);
    }
}
