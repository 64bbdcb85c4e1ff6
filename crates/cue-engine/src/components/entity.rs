use glam::Vec2;
use crate::api::types::EntityId;
#[cfg(feature = "physics")]
use crate::core::physics::{BodyRole, PhysicsBody};

/// Fat Entity: a single struct with optional components.
/// Rendering is owned by the host page; the entity only carries what the
/// host needs to place it (pose, scale, opacity) and its physics handle.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,
    /// String tag for finding entities by name.
    pub tag: String,
    /// Position in table space (meters).
    pub pos: Vec2,
    /// Rotation in radians.
    pub rotation: f32,
    pub scale: Vec2,
    /// 0.0 = invisible, 1.0 = opaque.
    pub opacity: f32,
    /// Host-side visual id (what to draw). 0 = nothing.
    pub visual: u32,
    /// Physics body (requires the "physics" feature).
    #[cfg(feature = "physics")]
    pub body: Option<PhysicsBody>,
    #[cfg(feature = "physics")]
    pub role: BodyRole,
}

impl Entity {
    /// Create a new entity with the given ID at the origin.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            tag: String::new(),
            pos: Vec2::ZERO,
            rotation: 0.0,
            scale: Vec2::ONE,
            opacity: 1.0,
            visual: 0,
            #[cfg(feature = "physics")]
            body: None,
            #[cfg(feature = "physics")]
            role: BodyRole::Prop,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_pos(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_visual(mut self, visual: u32) -> Self {
        self.visual = visual;
        self
    }

    #[cfg(feature = "physics")]
    pub fn with_body(mut self, body: PhysicsBody, role: BodyRole) -> Self {
        self.body = Some(body);
        self.role = role;
        self
    }
}
