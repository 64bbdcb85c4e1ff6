use glam::Vec2;

use crate::api::game::EngineContext;
use crate::api::types::EntityId;
use crate::components::entity::Entity;
use crate::core::physics::{
    BodyDesc, BodyKind, BodyRole, ColliderDesc, ColliderMaterial, CollisionPair, PhysicsBody,
    PhysicsWorld,
};
use crate::core::rng::Rng;

pub const RACK_TAG: &str = "rack_ball";

/// Per-axis spawn jitter (meters). Breaks the perfect symmetry of the
/// triangle so released balls don't sit in degenerate resting contacts.
pub const RACK_JITTER: f32 = 0.0004;

/// Simulation mode shared by every member of a rack group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RackState {
    Locked,
    Dynamic,
}

/// One ball of the rack.
#[derive(Debug, Clone, Copy)]
pub struct RackMember {
    pub id: EntityId,
    pub body: PhysicsBody,
    /// Spawn position including jitter.
    pub spawn: Vec2,
    /// Offset drawn for this member, each axis within ±[`RACK_JITTER`].
    pub jitter: Vec2,
}

/// A group of balls held immobile until the cue ball touches any of them,
/// then released together.
///
/// `state` is the single source of truth: every member body is Locked
/// while it is `Locked` and Dynamic once it is `Dynamic`. Release happens
/// inside `handle_collisions`, which the game calls between two physics
/// steps, so no step ever sees a partly released rack.
pub struct RackActivationGroup {
    members: Vec<RackMember>,
    state: RackState,
    trigger: Option<EntityId>,
}

impl RackActivationGroup {
    /// Spawn one Locked ball per position, each nudged by up to
    /// [`RACK_JITTER`] on both table axes.
    pub fn spawn(
        ctx: &mut EngineContext,
        positions: &[Vec2],
        radius: f32,
        material: ColliderMaterial,
        rng: &mut Rng,
    ) -> Self {
        let members = positions
            .iter()
            .map(|&pos| {
                let jitter = Vec2::new(rng.symmetric(RACK_JITTER), rng.symmetric(RACK_JITTER));
                let spawn = pos + jitter;
                let desc = BodyDesc::locked(ColliderDesc::Ball { radius })
                    .with_role(BodyRole::RackMember)
                    .with_position(spawn)
                    .with_linear_damping(0.2)
                    .with_angular_damping(0.2);
                let id = ctx.next_id();
                let body = ctx.physics.create_body(id, &desc, material);
                ctx.scene.spawn(
                    Entity::new(id)
                        .with_tag(RACK_TAG)
                        .with_pos(spawn)
                        .with_body(body, BodyRole::RackMember),
                );
                RackMember { id, body, spawn, jitter }
            })
            .collect::<Vec<_>>();

        log::info!("Rack spawned with {} locked balls", members.len());
        Self {
            members,
            state: RackState::Locked,
            trigger: None,
        }
    }

    /// Register the trigger body. Without a link the group never releases.
    pub fn link_trigger(&mut self, trigger: EntityId) {
        self.trigger = Some(trigger);
    }

    pub fn trigger(&self) -> Option<EntityId> {
        self.trigger
    }

    pub fn state(&self) -> RackState {
        self.state
    }

    pub fn is_activated(&self) -> bool {
        self.state == RackState::Dynamic
    }

    pub fn members(&self) -> &[RackMember] {
        &self.members
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.members.iter().any(|m| m.id == id)
    }

    /// Kind of every member body, in rack order.
    pub fn member_kinds(&self, physics: &PhysicsWorld) -> Vec<Option<BodyKind>> {
        self.members.iter().map(|m| physics.body_kind(&m.body)).collect()
    }

    /// Feed one physics step's collision events. The group releases on the
    /// first started contact between a member and the linked cue ball;
    /// everything else, including every event after release, is a no-op.
    /// Returns `true` only on the call that released the rack.
    pub fn handle_collisions(&mut self, pairs: &[CollisionPair], physics: &mut PhysicsWorld) -> bool {
        if self.is_activated() {
            return false;
        }
        let Some(trigger) = self.trigger else {
            return false;
        };
        let hit = pairs.iter().filter(|p| p.started).any(|pair| {
            self.members.iter().any(|m| {
                matches!(pair.other(m.id), Some((other, BodyRole::CueBall)) if other == trigger)
            })
        });
        if hit {
            self.release(physics);
        }
        hit
    }

    fn release(&mut self, physics: &mut PhysicsWorld) {
        let promoted = self.members.iter().filter(|m| physics.promote(&m.body)).count();
        self.state = RackState::Dynamic;
        log::info!("Rack released: {}/{} balls now dynamic", promoted, self.members.len());
    }

    /// Remove every member from the scene and the simulation.
    pub fn teardown(&mut self, ctx: &mut EngineContext) {
        for member in self.members.drain(..) {
            ctx.despawn(member.id);
        }
        self.trigger = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Vec<Vec2> {
        vec![Vec2::new(0.6, 0.0), Vec2::new(0.65, -0.03), Vec2::new(0.65, 0.03)]
    }

    fn rack(ctx: &mut EngineContext) -> RackActivationGroup {
        RackActivationGroup::spawn(ctx, &triangle(), 0.028, ColliderMaterial::default(), &mut Rng::new(3))
    }

    fn hit(member: EntityId, other: EntityId, role: BodyRole) -> CollisionPair {
        CollisionPair {
            entity_a: member,
            role_a: BodyRole::RackMember,
            entity_b: other,
            role_b: role,
            started: true,
        }
    }

    fn all(kinds: &[Option<BodyKind>], kind: BodyKind) -> bool {
        kinds.iter().all(|k| *k == Some(kind))
    }

    #[test]
    fn spawns_locked_with_small_jitter() {
        let mut ctx = EngineContext::new();
        let group = rack(&mut ctx);
        assert_eq!(group.state(), RackState::Locked);
        assert!(all(&group.member_kinds(&ctx.physics), BodyKind::Locked));

        for (member, home) in group.members().iter().zip(triangle()) {
            let jitter = member.jitter;
            assert!(jitter.x.abs() <= RACK_JITTER && jitter.y.abs() <= RACK_JITTER, "{:?}", jitter);
            // Recomputing the offset from positions only holds up to f32 rounding.
            assert!((member.spawn - home - jitter).abs().max_element() < 1e-6);
            assert_eq!(ctx.scene.get(member.id).unwrap().tag, RACK_TAG);
        }
        assert_ne!(group.members()[0].spawn, triangle()[0], "jitter should move the apex");
    }

    #[test]
    fn cue_ball_contact_releases_whole_group() {
        let mut ctx = EngineContext::new();
        let mut group = rack(&mut ctx);
        let cue = EntityId(100);
        group.link_trigger(cue);

        let m = group.members().to_vec();
        assert!(group.handle_collisions(&[hit(m[1].id, cue, BodyRole::CueBall)], &mut ctx.physics));
        assert_eq!(group.state(), RackState::Dynamic);
        assert!(all(&group.member_kinds(&ctx.physics), BodyKind::Dynamic));

        // Second identical event for another member: nothing changes.
        assert!(!group.handle_collisions(&[hit(m[2].id, cue, BodyRole::CueBall)], &mut ctx.physics));
        assert!(all(&group.member_kinds(&ctx.physics), BodyKind::Dynamic));
    }

    #[test]
    fn many_qualifying_events_release_once() {
        let mut ctx = EngineContext::new();
        let mut group = rack(&mut ctx);
        let cue = EntityId(100);
        group.link_trigger(cue);

        let m = group.members().to_vec();
        // Reverse order, duplicates, both orientations, in one step.
        let mut step = vec![
            hit(m[2].id, cue, BodyRole::CueBall),
            hit(m[0].id, cue, BodyRole::CueBall),
            hit(m[2].id, cue, BodyRole::CueBall),
        ];
        step.push(CollisionPair {
            entity_a: cue,
            role_a: BodyRole::CueBall,
            entity_b: m[1].id,
            role_b: BodyRole::RackMember,
            started: true,
        });

        let releases = (0..3)
            .filter(|_| group.handle_collisions(&step, &mut ctx.physics))
            .count();
        assert_eq!(releases, 1);
        // Every member went through exactly one promotion.
        for member in group.members() {
            assert!(!ctx.physics.promote(&member.body));
        }
        assert!(all(&group.member_kinds(&ctx.physics), BodyKind::Dynamic));
    }

    #[test]
    fn non_trigger_contacts_are_ignored() {
        let mut ctx = EngineContext::new();
        let mut group = rack(&mut ctx);
        let cue = EntityId(100);
        group.link_trigger(cue);
        let m = group.members().to_vec();

        let noise = [
            // Member against member.
            hit(m[0].id, m[1].id, BodyRole::RackMember),
            // Member against the table cushion.
            hit(m[0].id, EntityId(1), BodyRole::Table),
            // A cue-ball-tagged body that is not the linked one.
            hit(m[0].id, EntityId(101), BodyRole::CueBall),
            // The linked id but a stopped contact.
            CollisionPair { started: false, ..hit(m[0].id, cue, BodyRole::CueBall) },
            // The cue ball touching something outside the rack.
            hit(EntityId(55), cue, BodyRole::CueBall),
        ];
        assert!(!group.handle_collisions(&noise, &mut ctx.physics));
        assert_eq!(group.state(), RackState::Locked);
        assert!(all(&group.member_kinds(&ctx.physics), BodyKind::Locked));
    }

    #[test]
    fn unlinked_group_never_releases() {
        let mut ctx = EngineContext::new();
        let mut group = rack(&mut ctx);
        let m = group.members().to_vec();
        for _ in 0..10 {
            assert!(!group.handle_collisions(&[hit(m[0].id, EntityId(100), BodyRole::CueBall)], &mut ctx.physics));
        }
        assert_eq!(group.state(), RackState::Locked);
    }

    #[test]
    fn state_and_kinds_agree_between_steps() {
        let mut ctx = EngineContext::new();
        let mut group = rack(&mut ctx);
        let cue = EntityId(100);
        group.link_trigger(cue);
        let m = group.members().to_vec();

        for step in 0..6 {
            let pairs = if step == 3 { vec![hit(m[1].id, cue, BodyRole::CueBall)] } else { Vec::new() };
            group.handle_collisions(&pairs, &mut ctx.physics);

            let kinds = group.member_kinds(&ctx.physics);
            let expected = match group.state() {
                RackState::Locked => BodyKind::Locked,
                RackState::Dynamic => BodyKind::Dynamic,
            };
            assert!(all(&kinds, expected), "step {}: {:?} vs {:?}", step, kinds, group.state());
        }
    }

    #[test]
    fn real_contact_with_cue_ball_releases_rack() {
        let mut ctx = EngineContext::new();
        let mut group = rack(&mut ctx);

        let cue = ctx.next_id();
        ctx.spawn_with_body(
            Entity::new(cue),
            BodyDesc::dynamic(ColliderDesc::Ball { radius: 0.028 })
                .with_role(BodyRole::CueBall)
                .with_velocity(Vec2::new(2.0, 0.0)),
            ColliderMaterial::default(),
        );
        group.link_trigger(cue);

        // Update then step, as the runner does.
        let mut released_at = None;
        for step in 0..120 {
            let pairs = ctx.collisions().to_vec();
            if group.handle_collisions(&pairs, &mut ctx.physics) {
                released_at = Some(step);
            }
            ctx.step_physics();
        }
        assert!(released_at.is_some(), "cue ball never reached the rack");
        assert!(all(&group.member_kinds(&ctx.physics), BodyKind::Dynamic));
    }

    #[test]
    fn teardown_removes_members() {
        let mut ctx = EngineContext::new();
        let mut group = rack(&mut ctx);
        group.link_trigger(EntityId(100));
        group.teardown(&mut ctx);
        assert!(group.members().is_empty());
        assert_eq!(group.trigger(), None);
        assert_eq!(ctx.physics.body_count(), 0);
        assert!(ctx.scene.is_empty());
    }
}
