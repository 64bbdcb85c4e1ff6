use glam::Vec2;

use crate::api::game::EngineContext;
use crate::api::types::EntityId;
use crate::components::entity::Entity;
use crate::core::physics::{BodyDesc, BodyRole, ColliderDesc, ColliderMaterial};
use crate::core::time::Delay;

pub const TRIGGER_TAG: &str = "cue_ball";

/// Physical constants of the trigger body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerSpec {
    /// Seed position in table space.
    pub position: Vec2,
    pub radius: f32,
    /// kg
    pub mass: f32,
    pub restitution: f32,
    pub friction: f32,
    pub linear_damping: f32,
    pub angular_damping: f32,
}

impl Default for TriggerSpec {
    fn default() -> Self {
        Self {
            position: Vec2::new(-0.635, 0.0),
            radius: 0.028,
            mass: 0.17,
            restitution: 0.6,
            friction: 0.3,
            linear_damping: 0.2,
            angular_damping: 0.2,
        }
    }
}

impl TriggerSpec {
    pub fn at(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }
}

/// The cue ball: one dynamic body whose spawn is held back by a delay.
pub struct TriggerBody {
    spec: TriggerSpec,
    delay: Option<Delay>,
    id: Option<EntityId>,
    torn_down: bool,
}

impl TriggerBody {
    pub fn new(spec: TriggerSpec) -> Self {
        Self {
            spec,
            delay: None,
            id: None,
            torn_down: false,
        }
    }

    pub fn spec(&self) -> &TriggerSpec {
        &self.spec
    }

    /// Identity of the spawned body, for linking into a rack group.
    pub fn id(&self) -> Option<EntityId> {
        self.id
    }

    pub fn is_pending(&self) -> bool {
        self.delay.as_ref().is_some_and(Delay::is_pending)
    }

    /// Schedule the spawn `delay` seconds from now. The first call wins:
    /// calls while a spawn is pending, after the body exists, or after
    /// teardown are ignored. Returns whether this call scheduled it.
    pub fn spawn(&mut self, delay: f32) -> bool {
        if self.torn_down || self.delay.is_some() || self.id.is_some() {
            log::debug!("Cue ball spawn already scheduled, ignoring");
            return false;
        }
        self.delay = Some(Delay::new(delay));
        true
    }

    /// Advance the spawn delay. Returns the new body's id exactly once, on
    /// the tick it is created.
    pub fn tick(&mut self, dt: f32, ctx: &mut EngineContext) -> Option<EntityId> {
        if !self.delay.as_mut()?.tick(dt) {
            return None;
        }

        let spec = self.spec;
        let desc = BodyDesc::dynamic(ColliderDesc::Ball { radius: spec.radius })
            .with_role(BodyRole::CueBall)
            .with_position(spec.position)
            .with_linear_damping(spec.linear_damping)
            .with_angular_damping(spec.angular_damping)
            .with_ccd(true);
        let material = ColliderMaterial {
            restitution: spec.restitution,
            friction: spec.friction,
            ..ColliderMaterial::default()
        }
        .with_mass(spec.mass);

        let id = ctx.next_id();
        ctx.spawn_with_body(Entity::new(id).with_tag(TRIGGER_TAG), desc, material);
        self.id = Some(id);
        log::info!("Cue ball spawned at {:?}", spec.position);
        Some(id)
    }

    /// Cancel a pending spawn and remove the body if it exists.
    pub fn teardown(&mut self, ctx: &mut EngineContext) {
        if let Some(delay) = self.delay.as_mut() {
            delay.cancel();
        }
        if let Some(id) = self.id.take() {
            ctx.despawn(id);
        }
        self.torn_down = true;
    }
}
