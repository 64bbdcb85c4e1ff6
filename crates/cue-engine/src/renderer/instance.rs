use bytemuck::{Pod, Zeroable};

/// Per-entity record read by the host page each frame.
/// 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct EntityInstance {
    pub id: f32,
    /// `BodyRole::index` (0 when the entity has no body).
    pub role: f32,
    /// Host-side visual id.
    pub visual: f32,
    /// X position in table space (meters).
    pub x: f32,
    pub y: f32,
    /// Rotation in radians.
    pub rotation: f32,
    /// Uniform scale (x component of the entity scale).
    pub scale: f32,
    /// 0.0 = invisible, 1.0 = opaque.
    pub opacity: f32,
}

impl EntityInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Instance buffer rebuilt once per frame from the scene.
pub struct InstanceBuffer {
    pub instances: Vec<EntityInstance>,
}

impl InstanceBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, instance: EntityInstance) {
        self.instances.push(instance);
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Raw pointer to instance data for host reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }

    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }
}

impl Default for InstanceBuffer {
    fn default() -> Self {
        Self::with_capacity(64)
    }
}
