use glam::Vec2;
use rapier2d::prelude::*;
use std::sync::Mutex;

use crate::api::types::EntityId;

// ---------------------------------------------------------------------------
// Conversion helpers (private): glam ↔ nalgebra
// ---------------------------------------------------------------------------

fn vec2_to_na(v: Vec2) -> nalgebra::Vector2<f32> {
    nalgebra::Vector2::new(v.x, v.y)
}

fn na_to_vec2(v: &nalgebra::Vector2<f32>) -> Vec2 {
    Vec2::new(v.x, v.y)
}

fn na_iso_to_pos_rot(iso: &nalgebra::Isometry2<f32>) -> (Vec2, f32) {
    let pos = Vec2::new(iso.translation.x, iso.translation.y);
    let rot = iso.rotation.angle();
    (pos, rot)
}

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// How a body takes part in the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// Immovable, never simulated.
    Fixed,
    /// Present and collidable, but excluded from dynamic simulation.
    /// Backed by a position-based kinematic body that nobody moves.
    Locked,
    /// Fully simulated under physics forces.
    Dynamic,
}

impl BodyKind {
    fn to_rapier(self) -> RigidBodyType {
        match self {
            BodyKind::Fixed => RigidBodyType::Fixed,
            BodyKind::Locked => RigidBodyType::KinematicPositionBased,
            BodyKind::Dynamic => RigidBodyType::Dynamic,
        }
    }

    fn from_rapier(ty: RigidBodyType) -> Self {
        match ty {
            RigidBodyType::Fixed => BodyKind::Fixed,
            RigidBodyType::Dynamic => BodyKind::Dynamic,
            RigidBodyType::KinematicPositionBased | RigidBodyType::KinematicVelocityBased => {
                BodyKind::Locked
            }
        }
    }
}

/// Gameplay role a body is tagged with at creation time.
/// Collision handlers dispatch on the role instead of comparing handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BodyRole {
    Table,
    CueBall,
    RackMember,
    #[default]
    Prop,
}

impl BodyRole {
    /// Stable index reported to the host.
    pub fn index(self) -> u32 {
        match self {
            BodyRole::Table => 1,
            BodyRole::CueBall => 2,
            BodyRole::RackMember => 3,
            BodyRole::Prop => 0,
        }
    }

    fn to_bits(self) -> u128 {
        self.index() as u128
    }

    fn from_bits(bits: u128) -> Self {
        match bits {
            1 => BodyRole::Table,
            2 => BodyRole::CueBall,
            3 => BodyRole::RackMember,
            _ => BodyRole::Prop,
        }
    }
}

// user_data layout: low 32 bits = EntityId, next bits = BodyRole.
fn pack_user_data(id: EntityId, role: BodyRole) -> u128 {
    (role.to_bits() << 32) | id.0 as u128
}

fn unpack_user_data(data: u128) -> (EntityId, BodyRole) {
    (EntityId(data as u32), BodyRole::from_bits(data >> 32))
}

/// Shape description for a collider.
#[derive(Debug, Clone, PartialEq)]
pub enum ColliderDesc {
    Ball { radius: f32 },
    Cuboid { half_width: f32, half_height: f32 },
    /// A chain of segments through `vertices`. Closed chains also join the
    /// last vertex back to the first, giving a concave boundary.
    Polyline { vertices: Vec<Vec2>, closed: bool },
}

impl ColliderDesc {
    fn build_collider(&self) -> ColliderBuilder {
        match self {
            ColliderDesc::Ball { radius } => ColliderBuilder::ball(*radius),
            ColliderDesc::Cuboid { half_width, half_height } => {
                ColliderBuilder::cuboid(*half_width, *half_height)
            }
            ColliderDesc::Polyline { vertices, closed } => {
                let points: Vec<Point<f32>> = vertices
                    .iter()
                    .map(|v| nalgebra::Point2::new(v.x, v.y))
                    .collect();
                let n = points.len() as u32;
                let segments = if *closed { n } else { n.saturating_sub(1) };
                let indices: Vec<[u32; 2]> = (0..segments).map(|i| [i, (i + 1) % n]).collect();
                ColliderBuilder::polyline(points, Some(indices))
            }
        }
    }
}

/// Physical material properties for a collider.
#[derive(Debug, Clone, Copy)]
pub struct ColliderMaterial {
    pub restitution: f32,
    pub friction: f32,
    pub density: f32,
    /// Explicit mass in kg. Overrides `density` when set.
    pub mass: Option<f32>,
}

impl ColliderMaterial {
    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = Some(mass);
        self
    }
}

impl Default for ColliderMaterial {
    fn default() -> Self {
        Self {
            restitution: 0.3,
            friction: 0.5,
            density: 1.0,
            mass: None,
        }
    }
}

/// Builder for describing a rigid body before creation.
#[derive(Debug, Clone)]
pub struct BodyDesc {
    pub kind: BodyKind,
    pub role: BodyRole,
    pub position: Vec2,
    pub rotation: f32,
    pub velocity: Vec2,
    pub ccd: bool,
    pub collider: ColliderDesc,
    pub linear_damping: f32,
    pub angular_damping: f32,
}

impl BodyDesc {
    fn with_kind(kind: BodyKind, collider: ColliderDesc) -> Self {
        Self {
            kind,
            role: BodyRole::Prop,
            position: Vec2::ZERO,
            rotation: 0.0,
            velocity: Vec2::ZERO,
            ccd: false,
            collider,
            linear_damping: 0.0,
            angular_damping: 0.0,
        }
    }

    /// Create a dynamic body description with the given collider shape.
    pub fn dynamic(collider: ColliderDesc) -> Self {
        Self::with_kind(BodyKind::Dynamic, collider)
    }

    /// Create a fixed (static) body description with the given collider shape.
    pub fn fixed(collider: ColliderDesc) -> Self {
        Self::with_kind(BodyKind::Fixed, collider)
    }

    /// Create a locked body description. Locked bodies can later be
    /// promoted to dynamic with [`PhysicsWorld::promote`].
    pub fn locked(collider: ColliderDesc) -> Self {
        Self::with_kind(BodyKind::Locked, collider)
    }

    pub fn with_role(mut self, role: BodyRole) -> Self {
        self.role = role;
        self
    }

    pub fn with_position(mut self, pos: Vec2) -> Self {
        self.position = pos;
        self
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.velocity = vel;
        self
    }

    pub fn with_ccd(mut self, enabled: bool) -> Self {
        self.ccd = enabled;
        self
    }

    /// Set the linear damping (velocity decay). Higher values slow the body faster.
    /// Stands in for rolling resistance on the felt.
    pub fn with_linear_damping(mut self, damping: f32) -> Self {
        self.linear_damping = damping;
        self
    }

    pub fn with_angular_damping(mut self, damping: f32) -> Self {
        self.angular_damping = damping;
        self
    }
}

/// Handle pair stored on an Entity, referencing Rapier internals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhysicsBody {
    pub body_handle: RigidBodyHandle,
    pub collider_handle: ColliderHandle,
}

/// A collision event between two entities, with the roles both bodies
/// were created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionPair {
    pub entity_a: EntityId,
    pub role_a: BodyRole,
    pub entity_b: EntityId,
    pub role_b: BodyRole,
    /// `true` when the collision just started, `false` when it ended.
    pub started: bool,
}

impl CollisionPair {
    /// If `id` takes part in this collision, return the other side.
    pub fn other(&self, id: EntityId) -> Option<(EntityId, BodyRole)> {
        if self.entity_a == id {
            Some((self.entity_b, self.role_b))
        } else if self.entity_b == id {
            Some((self.entity_a, self.role_a))
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// WASM-safe event collector (no crossbeam)
// ---------------------------------------------------------------------------

struct DirectEventCollector {
    collisions: Mutex<Vec<CollisionEvent>>,
}

impl DirectEventCollector {
    fn new() -> Self {
        Self {
            collisions: Mutex::new(Vec::new()),
        }
    }

    fn push(&self, event: CollisionEvent) {
        // A poisoned lock only means a panic mid-push; the Vec is still usable.
        match self.collisions.lock() {
            Ok(mut guard) => guard.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }

    fn drain_collisions(&self) -> Vec<CollisionEvent> {
        match self.collisions.lock() {
            Ok(mut guard) => std::mem::take(&mut *guard),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl EventHandler for DirectEventCollector {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        self.push(event);
    }

    fn handle_contact_force_event(
        &self,
        _dt: f32,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: f32,
    ) {
    }
}

// ---------------------------------------------------------------------------
// PhysicsWorld
// ---------------------------------------------------------------------------

/// Wraps all Rapier2D boilerplate into a single struct.
pub struct PhysicsWorld {
    gravity: nalgebra::Vector2<f32>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    pub(crate) bodies: RigidBodySet,
    pub(crate) colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    event_collector: DirectEventCollector,
}

impl PhysicsWorld {
    /// Create a new physics world with the given gravity vector.
    /// The pool table is viewed top-down, so games normally pass `Vec2::ZERO`.
    pub fn new(gravity: Vec2) -> Self {
        Self {
            gravity: vec2_to_na(gravity),
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            event_collector: DirectEventCollector::new(),
        }
    }

    /// Set the integration timestep.
    pub fn set_dt(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
    }

    /// Create a rigid body + collider and return handles.
    /// The EntityId and role are packed into the body's `user_data` for
    /// collision lookups.
    pub fn create_body(
        &mut self,
        entity_id: EntityId,
        desc: &BodyDesc,
        material: ColliderMaterial,
    ) -> PhysicsBody {
        let rb = RigidBodyBuilder::new(desc.kind.to_rapier())
            .translation(nalgebra::Vector2::new(desc.position.x, desc.position.y))
            .rotation(desc.rotation)
            .linvel(vec2_to_na(desc.velocity))
            .ccd_enabled(desc.ccd)
            .linear_damping(desc.linear_damping)
            .angular_damping(desc.angular_damping)
            .user_data(pack_user_data(entity_id, desc.role))
            .build();

        let body_handle = self.bodies.insert(rb);

        let builder = desc
            .collider
            .build_collider()
            .restitution(material.restitution)
            .friction(material.friction)
            .active_events(ActiveEvents::COLLISION_EVENTS);
        let collider = match material.mass {
            Some(mass) => builder.mass(mass),
            None => builder.density(material.density),
        }
        .build();

        let collider_handle =
            self.colliders
                .insert_with_parent(collider, body_handle, &mut self.bodies);

        PhysicsBody {
            body_handle,
            collider_handle,
        }
    }

    /// Remove a body and all its colliders from the simulation.
    pub fn remove_body(&mut self, body: &PhysicsBody) {
        self.bodies.remove(
            body.body_handle,
            &mut self.island_manager,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
    }

    /// Step the simulation and collect collision events into the provided Vec.
    pub fn step_into(&mut self, collision_events: &mut Vec<CollisionPair>) {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &self.event_collector,
        );

        for event in self.event_collector.drain_collisions() {
            let (h1, h2, started) = match event {
                CollisionEvent::Started(h1, h2, _) => (h1, h2, true),
                CollisionEvent::Stopped(h1, h2, _) => (h1, h2, false),
            };

            // Collider handles → body handles → (entity, role)
            if let (Some((entity_a, role_a)), Some((entity_b, role_b))) =
                (self.collider_owner(h1), self.collider_owner(h2))
            {
                collision_events.push(CollisionPair {
                    entity_a,
                    role_a,
                    entity_b,
                    role_b,
                    started,
                });
            }
        }
    }

    /// Current kind of a body, or `None` if it no longer exists.
    pub fn body_kind(&self, body: &PhysicsBody) -> Option<BodyKind> {
        self.bodies
            .get(body.body_handle)
            .map(|rb| BodyKind::from_rapier(rb.body_type()))
    }

    /// Release a Locked body into dynamic simulation.
    /// Returns `false` (and changes nothing) unless the body exists and is
    /// currently Locked: kinds only ever move Locked → Dynamic.
    pub fn promote(&mut self, body: &PhysicsBody) -> bool {
        match self.bodies.get_mut(body.body_handle) {
            Some(rb) if BodyKind::from_rapier(rb.body_type()) == BodyKind::Locked => {
                rb.set_body_type(RigidBodyType::Dynamic, true);
                true
            }
            _ => false,
        }
    }

    /// Apply an instantaneous impulse to a body.
    pub fn apply_impulse(&mut self, body: &PhysicsBody, impulse: Vec2) {
        if let Some(rb) = self.bodies.get_mut(body.body_handle) {
            rb.apply_impulse(vec2_to_na(impulse), true);
        }
    }

    /// Set the linear velocity of a body directly.
    pub fn set_velocity(&mut self, body: &PhysicsBody, vel: Vec2) {
        if let Some(rb) = self.bodies.get_mut(body.body_handle) {
            rb.set_linvel(vec2_to_na(vel), true);
        }
    }

    /// Get the current linear velocity of a body.
    pub fn velocity(&self, body: &PhysicsBody) -> Vec2 {
        self.bodies
            .get(body.body_handle)
            .map(|rb| na_to_vec2(rb.linvel()))
            .unwrap_or(Vec2::ZERO)
    }

    /// Get the current position and rotation of a body.
    pub fn body_position(&self, body: &PhysicsBody) -> (Vec2, f32) {
        self.bodies
            .get(body.body_handle)
            .map(|rb| na_iso_to_pos_rot(rb.position()))
            .unwrap_or((Vec2::ZERO, 0.0))
    }

    /// Mass of a body in kg (0.0 if it no longer exists).
    pub fn mass(&self, body: &PhysicsBody) -> f32 {
        self.bodies
            .get(body.body_handle)
            .map(|rb| rb.mass())
            .unwrap_or(0.0)
    }

    /// Number of rigid bodies in the simulation.
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Query the collider shape of a physics body.
    /// Returns `None` if the collider no longer exists or has an unsupported shape.
    pub fn collider_shape(&self, body: &PhysicsBody) -> Option<ColliderDesc> {
        let collider = self.colliders.get(body.collider_handle)?;
        let shape = collider.shape();
        if let Some(ball) = shape.as_ball() {
            Some(ColliderDesc::Ball { radius: ball.radius })
        } else if let Some(cuboid) = shape.as_cuboid() {
            Some(ColliderDesc::Cuboid {
                half_width: cuboid.half_extents.x,
                half_height: cuboid.half_extents.y,
            })
        } else if let Some(polyline) = shape.as_polyline() {
            let vertices: Vec<Vec2> = polyline
                .vertices()
                .iter()
                .map(|p| Vec2::new(p.x, p.y))
                .collect();
            let closed = polyline.num_segments() == vertices.len() && vertices.len() > 2;
            Some(ColliderDesc::Polyline { vertices, closed })
        } else {
            None
        }
    }

    // -- private helpers --

    fn collider_owner(&self, collider_handle: ColliderHandle) -> Option<(EntityId, BodyRole)> {
        let collider = self.colliders.get(collider_handle)?;
        let body_handle = collider.parent()?;
        let body = self.bodies.get(body_handle)?;
        Some(unpack_user_data(body.user_data))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn ball(radius: f32) -> ColliderDesc {
        ColliderDesc::Ball { radius }
    }

    #[test]
    fn create_and_remove_body() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let body = world.create_body(
            EntityId(1),
            &BodyDesc::dynamic(ball(0.03)),
            ColliderMaterial::default(),
        );
        assert_eq!(world.body_count(), 1);
        world.remove_body(&body);
        assert_eq!(world.body_count(), 0);
        assert_eq!(world.body_kind(&body), None);
    }

    #[test]
    fn user_data_round_trips_id_and_role() {
        for role in [BodyRole::Table, BodyRole::CueBall, BodyRole::RackMember, BodyRole::Prop] {
            let (id, back) = unpack_user_data(pack_user_data(EntityId(u32::MAX), role));
            assert_eq!(id, EntityId(u32::MAX));
            assert_eq!(back, role);
        }
    }

    #[test]
    fn locked_body_ignores_gravity_until_promoted() {
        let mut world = PhysicsWorld::new(Vec2::new(0.0, -9.81));
        world.set_dt(1.0 / 60.0);
        let body = world.create_body(
            EntityId(1),
            &BodyDesc::locked(ball(0.03)).with_position(Vec2::new(0.0, 1.0)),
            ColliderMaterial::default(),
        );
        assert_eq!(world.body_kind(&body), Some(BodyKind::Locked));

        let mut events = Vec::new();
        for _ in 0..10 {
            world.step_into(&mut events);
        }
        let (pos, _) = world.body_position(&body);
        assert!((pos.y - 1.0).abs() < 1e-6, "locked body moved: y={}", pos.y);

        assert!(world.promote(&body));
        assert_eq!(world.body_kind(&body), Some(BodyKind::Dynamic));
        for _ in 0..10 {
            world.step_into(&mut events);
        }
        let (pos, _) = world.body_position(&body);
        assert!(pos.y < 1.0, "promoted body should fall: y={}", pos.y);
    }

    #[test]
    fn promote_only_moves_locked_to_dynamic() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let fixed = world.create_body(
            EntityId(1),
            &BodyDesc::fixed(ball(0.03)),
            ColliderMaterial::default(),
        );
        let locked = world.create_body(
            EntityId(2),
            &BodyDesc::locked(ball(0.03)).with_position(Vec2::new(1.0, 0.0)),
            ColliderMaterial::default(),
        );

        assert!(!world.promote(&fixed));
        assert_eq!(world.body_kind(&fixed), Some(BodyKind::Fixed));

        assert!(world.promote(&locked));
        assert!(!world.promote(&locked), "second promotion must be refused");
        assert_eq!(world.body_kind(&locked), Some(BodyKind::Dynamic));
    }

    #[test]
    fn explicit_mass_overrides_density() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let body = world.create_body(
            EntityId(1),
            &BodyDesc::dynamic(ball(0.028)),
            ColliderMaterial::default().with_mass(0.17),
        );
        // Mass properties are settled by the pipeline.
        world.step_into(&mut Vec::new());
        assert!((world.mass(&body) - 0.17).abs() < 1e-4, "mass={}", world.mass(&body));
    }

    #[test]
    fn collision_events_carry_roles() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        world.set_dt(1.0 / 60.0);

        world.create_body(
            EntityId(1),
            &BodyDesc::dynamic(ball(0.03))
                .with_role(BodyRole::CueBall)
                .with_velocity(Vec2::new(2.0, 0.0)),
            ColliderMaterial::default(),
        );
        world.create_body(
            EntityId(2),
            &BodyDesc::locked(ball(0.03))
                .with_role(BodyRole::RackMember)
                .with_position(Vec2::new(0.3, 0.0)),
            ColliderMaterial::default(),
        );

        let mut all_events = Vec::new();
        for _ in 0..60 {
            world.step_into(&mut all_events);
        }

        let hit = all_events
            .iter()
            .find(|e| e.started)
            .expect("cue ball should touch the locked ball");
        let (other, role) = hit.other(EntityId(2)).expect("locked ball is involved");
        assert_eq!(other, EntityId(1));
        assert_eq!(role, BodyRole::CueBall);
        assert_eq!(hit.other(EntityId(9)), None);
    }

    #[test]
    fn ball_stays_inside_closed_polyline() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        world.set_dt(1.0 / 60.0);

        let outline = vec![
            Vec2::new(-1.0, -0.5),
            Vec2::new(1.0, -0.5),
            Vec2::new(1.0, 0.5),
            Vec2::new(-1.0, 0.5),
        ];
        world.create_body(
            EntityId(1),
            &BodyDesc::fixed(ColliderDesc::Polyline { vertices: outline, closed: true })
                .with_role(BodyRole::Table),
            ColliderMaterial::default(),
        );
        let ball_body = world.create_body(
            EntityId(2),
            &BodyDesc::dynamic(ball(0.03))
                .with_velocity(Vec2::new(3.0, 0.0))
                .with_ccd(true),
            ColliderMaterial::default(),
        );

        let mut events = Vec::new();
        for _ in 0..120 {
            world.step_into(&mut events);
        }
        let (pos, _) = world.body_position(&ball_body);
        assert!(pos.x.abs() < 1.0, "ball escaped the cushion: x={}", pos.x);
        assert!(events.iter().any(|e| e.started && (e.role_a == BodyRole::Table || e.role_b == BodyRole::Table)));
    }

    #[test]
    fn polyline_shape_is_reported_closed() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let vertices = vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0)];
        let body = world.create_body(
            EntityId(1),
            &BodyDesc::fixed(ColliderDesc::Polyline { vertices: vertices.clone(), closed: true }),
            ColliderMaterial::default(),
        );
        match world.collider_shape(&body) {
            Some(ColliderDesc::Polyline { vertices: got, closed }) => {
                assert_eq!(got, vertices);
                assert!(closed);
            }
            other => panic!("expected polyline, got {:?}", other),
        }
    }

    #[test]
    fn builder_pattern() {
        let desc = BodyDesc::locked(ball(0.05))
            .with_role(BodyRole::RackMember)
            .with_position(Vec2::new(0.1, 0.2))
            .with_velocity(Vec2::new(1.0, 2.0))
            .with_linear_damping(0.2)
            .with_ccd(true);

        assert_eq!(desc.kind, BodyKind::Locked);
        assert_eq!(desc.role, BodyRole::RackMember);
        assert_eq!(desc.position, Vec2::new(0.1, 0.2));
        assert_eq!(desc.velocity, Vec2::new(1.0, 2.0));
        assert!((desc.linear_damping - 0.2).abs() < 0.001);
        assert!(desc.ccd);
    }

    #[test]
    fn set_velocity_directly() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let body = world.create_body(
            EntityId(1),
            &BodyDesc::dynamic(ball(0.03)),
            ColliderMaterial::default(),
        );

        world.set_velocity(&body, Vec2::new(1.5, -0.5));
        let vel = world.velocity(&body);
        assert!((vel.x - 1.5).abs() < 0.001);
        assert!((vel.y + 0.5).abs() < 0.001);
    }
}
