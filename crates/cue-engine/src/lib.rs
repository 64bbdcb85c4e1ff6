pub mod api;
pub mod core;
pub mod components;
pub mod input;
pub mod assets;
pub mod renderer;
pub mod staging;
pub mod systems;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext};
pub use api::types::{EntityId, GameEvent};
pub use components::entity::Entity;
pub use core::scene::Scene;
pub use core::rng::Rng;
pub use core::time::{Delay, FixedTimestep};
pub use input::queue::{InputEvent, InputQueue};
pub use assets::manifest::ModelManifest;
pub use assets::registry::{AssetHandle, AssetStore, MeshData};
pub use renderer::instance::{EntityInstance, InstanceBuffer};
pub use staging::{MountedScene, Phase, SceneDirector, StagingConfig};

#[cfg(feature = "physics")]
pub use core::physics::{
    PhysicsWorld, PhysicsBody, BodyDesc, BodyKind, BodyRole,
    ColliderDesc, ColliderMaterial, CollisionPair,
};
#[cfg(feature = "physics")]
pub use staging::{
    ColliderStage, StagedCollider,
    RackActivationGroup, RackMember, RackState, RACK_JITTER,
    TriggerBody, TriggerSpec,
};

// Extensions: optional animation helpers
pub use extensions::{Easing, ease, TweenState, Tween, TweenId, TweenTarget};
