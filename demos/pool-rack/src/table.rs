//! The table sub-scene: staged cushion collider, delayed cue ball, a locked
//! rack released by the first cue-ball contact, and the entrance animation.

use glam::Vec2;
use cue_engine::api::types::EntityId;
use cue_engine::components::entity::Entity;
use cue_engine::input::queue::{InputEvent, InputQueue};
use cue_engine::{
    ColliderMaterial, Delay, EngineContext, Easing, GameEvent, RackActivationGroup, Rng,
    StagedCollider, StagingConfig, TriggerBody, TriggerSpec, Tween, TweenState,
};

use crate::balls::{rack_positions, BALL_RADIUS};
use crate::game::{game_events, visuals};

/// Asset store key of the bundled table model.
pub const TABLE_MODEL: &str = "table";
const TABLE_JSON: &str = include_str!("../assets/table.json");

/// Sub-mesh whose outline becomes the cushion collider.
const CUSHION_MESH: &str = "cushions";

const RACK_APEX: Vec2 = Vec2::new(0.635, 0.0);

const ENTRANCE_SECS: f32 = 1.0;
const FRAME_FADE_SECS: f32 = 0.6;
const FRAME_FADED: u32 = 1;

// Ball physics
const BALL_RESTITUTION: f32 = 0.95;
const BALL_FRICTION: f32 = 0.2;
const BALL_MASS: f32 = 0.17;

// Shot: meters of drag → meters per second
const SHOT_SCALE: f32 = 8.0;
const MAX_SHOT_SPEED: f32 = 6.0;
const MIN_SHOT_SPEED: f32 = 0.05;

pub struct TableScene {
    table_id: EntityId,
    frame_id: Option<EntityId>,
    collider: StagedCollider,
    cue: TriggerBody,
    rack: RackActivationGroup,
    tweens: TweenState,
    frame_fade: Delay,
    trigger_delay: f32,
    aim: Option<(Vec2, Vec2)>,
    /// Whether mount loaded the bundled model (and teardown releases it).
    owns_model: bool,
}

impl TableScene {
    /// Mount the table: animate it in, subscribe the cushion collider to the
    /// table model and rack the balls. The cue ball comes later, once the
    /// cushions exist.
    pub fn mount(ctx: &mut EngineContext, config: &StagingConfig, rng: &mut Rng) -> Self {
        let mut owns_model = false;
        if !ctx.assets.is_loaded(TABLE_MODEL) {
            match ctx.assets.load_json(TABLE_MODEL, TABLE_JSON) {
                Ok(_) => owns_model = true,
                Err(e) => log::error!("Bundled table model is invalid: {}", e),
            }
        }

        let mut tweens = TweenState::new();

        let table_id = ctx.next_id();
        ctx.scene.spawn(
            Entity::new(table_id)
                .with_tag("table")
                .with_visual(visuals::TABLE)
                .with_scale(Vec2::ZERO),
        );
        tweens.add(table_id, Tween::scale(0.0, 1.0, ENTRANCE_SECS, Easing::BackOut));

        let frame_id = ctx.next_id();
        ctx.scene.spawn(
            Entity::new(frame_id)
                .with_tag("rack_frame")
                .with_visual(visuals::RACK_FRAME)
                .with_pos(RACK_APEX),
        );

        let mut collider = StagedCollider::new(CUSHION_MESH, Self::cushion_material());
        collider.await_asset(TABLE_MODEL, config.collider_max_wait, config.collider_settle);

        let rack = RackActivationGroup::spawn(
            ctx,
            &rack_positions(RACK_APEX, BALL_RADIUS),
            BALL_RADIUS,
            Self::ball_material(),
            rng,
        );
        // rack_positions index i holds ball i + 1
        for (i, member) in rack.members().iter().enumerate() {
            if let Some(entity) = ctx.scene.get_mut(member.id) {
                entity.visual = visuals::ball(i as u32 + 1);
            }
        }

        let cue = TriggerBody::new(TriggerSpec {
            radius: BALL_RADIUS,
            mass: BALL_MASS,
            ..TriggerSpec::default()
        });

        log::info!("Table mounted");
        Self {
            table_id,
            frame_id: Some(frame_id),
            collider,
            cue,
            rack,
            tweens,
            frame_fade: Delay::new(config.frame_fade_delay),
            trigger_delay: config.trigger_delay,
            aim: None,
            owns_model,
        }
    }

    fn cushion_material() -> ColliderMaterial {
        ColliderMaterial {
            restitution: 0.9,
            friction: 0.2,
            ..ColliderMaterial::default()
        }
    }

    fn ball_material() -> ColliderMaterial {
        ColliderMaterial {
            restitution: BALL_RESTITUTION,
            friction: BALL_FRICTION,
            ..ColliderMaterial::default()
        }
        .with_mass(BALL_MASS)
    }

    pub fn table_id(&self) -> EntityId {
        self.table_id
    }

    pub fn frame_id(&self) -> Option<EntityId> {
        self.frame_id
    }

    pub fn collider(&self) -> &StagedCollider {
        &self.collider
    }

    pub fn cue(&self) -> &TriggerBody {
        &self.cue
    }

    pub fn rack(&self) -> &RackActivationGroup {
        &self.rack
    }

    /// One fixed step. Runs before the physics step, so the collisions it
    /// reads are from the previous step.
    pub fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        let dt = ctx.dt;

        let pairs = ctx.collisions().to_vec();
        if self.rack.handle_collisions(&pairs, &mut ctx.physics) {
            ctx.emit_event(GameEvent::new(game_events::RACK_RELEASED, self.rack.members().len() as f32));
        }

        if let Some(id) = self.collider.tick(dt, ctx) {
            ctx.emit_event(GameEvent::new(game_events::COLLIDER_READY, id.0 as f32));
            self.cue.spawn(self.trigger_delay);
        }

        if let Some(id) = self.cue.tick(dt, ctx) {
            if let Some(entity) = ctx.scene.get_mut(id) {
                entity.visual = visuals::CUE_BALL;
            }
            self.rack.link_trigger(id);
            ctx.emit_event(GameEvent::new(game_events::CUE_SPAWNED, id.0 as f32));
        }

        if self.frame_fade.tick(dt) {
            if let Some(frame) = self.frame_id {
                self.tweens.add(frame, Tween::fade_out(FRAME_FADE_SECS, Easing::QuadOut).with_on_complete(FRAME_FADED));
                self.tweens.add(frame, Tween::scale(1.0, 0.6, FRAME_FADE_SECS, Easing::QuadOut));
            }
        }

        self.tweens.tick(dt, &mut ctx.scene);
        let frame_done = self.tweens.drain_completed().any(|event| event == FRAME_FADED);
        if frame_done {
            if let Some(frame) = self.frame_id.take() {
                self.tweens.remove_entity(frame);
                ctx.despawn(frame);
                log::debug!("Rack frame removed");
            }
        }

        self.handle_aim(ctx, input);
    }

    /// Drag away from the shot direction and release to shoot.
    fn handle_aim(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        let Some(cue_id) = self.cue.id() else {
            return;
        };

        for event in input.iter() {
            match *event {
                InputEvent::PointerDown { x, y } => {
                    let p = Vec2::new(x, y);
                    self.aim = Some((p, p));
                }
                InputEvent::PointerMove { x, y } => {
                    if let Some((_, current)) = self.aim.as_mut() {
                        *current = Vec2::new(x, y);
                    }
                }
                InputEvent::PointerUp { x, y } => {
                    if let Some((start, _)) = self.aim.take() {
                        let pull = start - Vec2::new(x, y);
                        let speed = (pull.length() * SHOT_SCALE).min(MAX_SHOT_SPEED);
                        if speed > MIN_SHOT_SPEED {
                            let velocity = pull.normalize_or_zero() * speed;
                            log::info!("Shot: {:?}", velocity);
                            ctx.set_velocity(cue_id, velocity);
                        }
                    }
                }
                InputEvent::Custom { .. } => {}
            }
        }
    }

    /// Cancel everything pending and remove every entity and body the
    /// scene created. A model the host supplied stays loaded.
    pub fn teardown(&mut self, ctx: &mut EngineContext) {
        self.collider.teardown(ctx);
        self.cue.teardown(ctx);
        self.rack.teardown(ctx);
        self.frame_fade.cancel();
        self.tweens.clear();
        if let Some(frame) = self.frame_id.take() {
            ctx.despawn(frame);
        }
        ctx.despawn(self.table_id);
        if self.owns_model {
            ctx.assets.release(TABLE_MODEL);
            self.owns_model = false;
        }
        self.aim = None;
        log::info!("Table unmounted");
    }
}
