use crate::components::entity::Entity;
use crate::renderer::instance::{EntityInstance, InstanceBuffer};

/// Build the instance buffer from a set of entities, ordered by id so the
/// host sees a stable layout between frames.
pub fn build_instance_buffer<'a>(entities: impl Iterator<Item = &'a Entity>, buffer: &mut InstanceBuffer) {
    buffer.clear();

    for entity in entities {
        #[cfg(feature = "physics")]
        let role = entity.role.index() as f32;
        #[cfg(not(feature = "physics"))]
        let role = 0.0;

        buffer.push(EntityInstance {
            id: entity.id.0 as f32,
            role,
            visual: entity.visual as f32,
            x: entity.pos.x,
            y: entity.pos.y,
            rotation: entity.rotation,
            scale: entity.scale.x,
            opacity: entity.opacity,
        });
    }

    buffer.instances.sort_by_key(|inst| inst.id as u32);
}
