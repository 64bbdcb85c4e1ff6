use crate::core::scene::Scene;
use crate::api::types::{EntityId, GameEvent};
use crate::assets::registry::AssetStore;
use crate::input::queue::InputQueue;
use crate::staging::StagingConfig;
#[cfg(feature = "physics")]
use crate::core::physics::{
    PhysicsWorld, BodyDesc, ColliderMaterial, CollisionPair,
};
#[cfg(feature = "physics")]
use crate::components::entity::Entity;
#[cfg(feature = "physics")]
use glam::Vec2;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// World width in meters.
    pub world_width: f32,
    /// World height in meters.
    pub world_height: f32,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
    /// Expected entity count, used to size the instance buffer (default: 64).
    pub max_instances: usize,
    /// Delays used by the staging components.
    pub staging: StagingConfig,
    /// Gravity vector for physics simulation. Default: zero (top-down table).
    #[cfg(feature = "physics")]
    pub gravity: glam::Vec2,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            world_width: 2.84,
            world_height: 1.62,
            max_events: 32,
            max_instances: 64,
            staging: StagingConfig::default(),
            #[cfg(feature = "physics")]
            gravity: glam::Vec2::ZERO,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state, spawn entities, configure the scene.
    fn init(&mut self, ctx: &mut EngineContext);

    /// One fixed step of game logic. Runs before the physics step, so the
    /// collisions visible through `ctx.collisions()` are the previous step's.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// Numeric phase reported to the host (e.g. title / loading / play).
    fn phase(&self) -> u32 {
        0
    }
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub assets: AssetStore,
    pub events: Vec<GameEvent>,
    /// Fixed step length the context is being driven with.
    pub dt: f32,
    next_id: u32,
    #[cfg(feature = "physics")]
    pub physics: PhysicsWorld,
    #[cfg(feature = "physics")]
    collision_events: Vec<CollisionPair>,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::from_config(&GameConfig::default())
    }

    /// Create an EngineContext matching a game's configuration.
    pub fn from_config(config: &GameConfig) -> Self {
        #[cfg(feature = "physics")]
        let mut physics = PhysicsWorld::new(config.gravity);
        #[cfg(feature = "physics")]
        physics.set_dt(config.fixed_dt);

        Self {
            scene: Scene::new(),
            assets: AssetStore::new(),
            events: Vec::with_capacity(config.max_events),
            dt: config.fixed_dt,
            next_id: 1,
            #[cfg(feature = "physics")]
            physics,
            #[cfg(feature = "physics")]
            collision_events: Vec::new(),
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Emit a game event to be forwarded to the host.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data. Collisions are kept: they belong to
    /// the last physics step and are consumed by the next update.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }

    /// Remove an entity, cleaning up its physics body if present.
    pub fn despawn(&mut self, id: EntityId) {
        if let Some(_entity) = self.scene.despawn(id) {
            #[cfg(feature = "physics")]
            if let Some(body) = &_entity.body {
                self.physics.remove_body(body);
            }
        }
    }

    // -- Physics convenience methods --

    /// Spawn an entity with a physics body. Returns the EntityId.
    /// The entity's position and role are taken from the BodyDesc.
    #[cfg(feature = "physics")]
    pub fn spawn_with_body(
        &mut self,
        entity: Entity,
        desc: BodyDesc,
        material: ColliderMaterial,
    ) -> EntityId {
        let id = entity.id;
        let body = self.physics.create_body(id, &desc, material);
        let entity = entity
            .with_pos(desc.position)
            .with_rotation(desc.rotation)
            .with_body(body, desc.role);
        self.scene.spawn(entity);
        id
    }

    /// Set the linear velocity of an entity's physics body.
    #[cfg(feature = "physics")]
    pub fn set_velocity(&mut self, id: EntityId, vel: Vec2) {
        if let Some(body) = self.scene.get(id).and_then(|e| e.body) {
            self.physics.set_velocity(&body, vel);
        }
    }

    /// Get the linear velocity of an entity's physics body.
    #[cfg(feature = "physics")]
    pub fn velocity(&self, id: EntityId) -> Vec2 {
        self.scene
            .get(id)
            .and_then(|e| e.body.as_ref())
            .map(|body| self.physics.velocity(body))
            .unwrap_or(Vec2::ZERO)
    }

    /// Get collision events from the most recent physics step.
    #[cfg(feature = "physics")]
    pub fn collisions(&self) -> &[CollisionPair] {
        &self.collision_events
    }

    /// Step the physics simulation and sync positions back to entities.
    /// Called by the game runner after `Game::update()`.
    #[cfg(feature = "physics")]
    pub fn step_physics(&mut self) {
        self.collision_events.clear();
        self.physics.step_into(&mut self.collision_events);

        for entity in self.scene.iter_mut() {
            if let Some(body) = &entity.body {
                let (pos, rot) = self.physics.body_position(body);
                entity.pos = pos;
                entity.rotation = rot;
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
    use crate::core::physics::{BodyRole, ColliderDesc};

    #[test]
    fn spawn_with_body_creates_entity_and_physics() {
        let mut ctx = EngineContext::new();
        let id = ctx.next_id();
        let desc = BodyDesc::locked(ColliderDesc::Ball { radius: 0.028 })
            .with_role(BodyRole::RackMember)
            .with_position(Vec2::new(0.6, 0.0));

        ctx.spawn_with_body(Entity::new(id), desc, ColliderMaterial::default());

        let entity = ctx.scene.get(id).unwrap();
        assert_eq!(entity.pos, Vec2::new(0.6, 0.0));
        assert_eq!(entity.role, BodyRole::RackMember);
        assert!(entity.body.is_some());
        assert_eq!(ctx.physics.body_count(), 1);
    }

    #[test]
    fn despawn_cleans_up_physics() {
        let mut ctx = EngineContext::new();
        let id = ctx.next_id();
        let desc = BodyDesc::dynamic(ColliderDesc::Ball { radius: 0.028 });

        ctx.spawn_with_body(Entity::new(id), desc, ColliderMaterial::default());
        ctx.despawn(id);
        assert!(ctx.scene.is_empty());
        assert_eq!(ctx.physics.body_count(), 0);
    }

    #[test]
    fn step_physics_syncs_positions() {
        let mut ctx = EngineContext::new();
        let id = ctx.next_id();
        let desc = BodyDesc::dynamic(ColliderDesc::Ball { radius: 0.028 })
            .with_velocity(Vec2::new(1.0, 0.0));

        ctx.spawn_with_body(Entity::new(id), desc, ColliderMaterial::default());
        for _ in 0..10 {
            ctx.step_physics();
        }

        let entity = ctx.scene.get(id).unwrap();
        assert!(entity.pos.x > 0.0, "entity should follow its body: x={}", entity.pos.x);
    }

    #[test]
    fn frame_clear_keeps_collisions() {
        let mut ctx = EngineContext::new();
        ctx.emit_event(GameEvent::new(1.0, 0.0));
        ctx.clear_frame_data();
        assert!(ctx.events.is_empty());
        assert!(ctx.collisions().is_empty());
    }
}
