use std::rc::Rc;

use crate::api::game::EngineContext;
use crate::api::types::EntityId;
use crate::assets::registry::AssetHandle;
use crate::components::entity::Entity;
use crate::core::physics::{BodyDesc, BodyRole, ColliderDesc, ColliderMaterial};
use crate::core::time::Delay;

/// Tag given to the entity carrying a staged collider body.
pub const COLLIDER_TAG: &str = "table_collider";

/// Whether the collision volume exists yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColliderStage {
    Unready,
    Ready,
}

enum Progress {
    Idle,
    /// Subscribed to a model that has not been loaded yet.
    AwaitingAsset { model: String, wait: Delay, settle: f32 },
    /// Geometry confirmed; waiting for transforms to settle.
    Settling { asset: Rc<AssetHandle>, settle: Delay },
    /// Gave up: the geometry never showed up.
    Stalled,
    Ready(EntityId),
    TornDown,
}

/// A fixed collision body built from a named mesh once that mesh is known
/// to be present and has had time to settle.
///
/// The stage moves Unready → Ready at most once. If the mesh never shows
/// up the collider stays Unready forever; that stall is logged, not raised.
pub struct StagedCollider {
    mesh: String,
    material: ColliderMaterial,
    progress: Progress,
}

impl StagedCollider {
    pub fn new(mesh: impl Into<String>, material: ColliderMaterial) -> Self {
        Self {
            mesh: mesh.into(),
            material,
            progress: Progress::Idle,
        }
    }

    pub fn mesh_name(&self) -> &str {
        &self.mesh
    }

    pub fn stage(&self) -> ColliderStage {
        match self.progress {
            Progress::Ready(_) => ColliderStage::Ready,
            _ => ColliderStage::Unready,
        }
    }

    /// The collider's entity once Ready.
    pub fn body_id(&self) -> Option<EntityId> {
        match self.progress {
            Progress::Ready(id) => Some(id),
            _ => None,
        }
    }

    pub fn is_stalled(&self) -> bool {
        matches!(self.progress, Progress::Stalled)
    }

    /// Whether a settle or asset wait is currently running.
    pub fn is_pending(&self) -> bool {
        matches!(
            self.progress,
            Progress::AwaitingAsset { .. } | Progress::Settling { .. }
        )
    }

    /// Schedule the collider against a loaded asset.
    ///
    /// `ready` is evaluated now, against the asset. If it holds, a settle
    /// delay of `delay` seconds is armed and the body is built when it
    /// elapses. If it does not hold, the collider stalls. Calls after the
    /// collider has been scheduled are ignored. Returns whether a delay
    /// was armed.
    pub fn activate<F>(&mut self, asset: &Rc<AssetHandle>, ready: F, delay: f32) -> bool
    where
        F: FnOnce(&AssetHandle) -> bool,
    {
        if !matches!(self.progress, Progress::Idle | Progress::AwaitingAsset { .. }) {
            log::debug!("Collider '{}' already scheduled, ignoring activate", self.mesh);
            return false;
        }
        if !ready(asset.as_ref()) {
            log::warn!("Collider '{}': geometry not present, staying unready", self.mesh);
            self.progress = Progress::Stalled;
            return false;
        }
        self.progress = Progress::Settling {
            asset: Rc::clone(asset),
            settle: Delay::new(delay),
        };
        true
    }

    /// [`activate`](Self::activate) with the default predicate: the named
    /// mesh exists and has geometry.
    pub fn activate_when_present(&mut self, asset: &Rc<AssetHandle>, delay: f32) -> bool {
        let mesh = self.mesh.clone();
        self.activate(asset, |a| a.mesh(&mesh).is_some(), delay)
    }

    /// Subscribe to a model by name instead of receiving it directly.
    /// Every `tick` polls the asset store; once the model appears the
    /// collider activates with the default predicate and `settle` delay.
    /// If it has not appeared after `max_wait` seconds the collider stalls.
    pub fn await_asset(&mut self, model: impl Into<String>, max_wait: f32, settle: f32) {
        if !matches!(self.progress, Progress::Idle) {
            return;
        }
        self.progress = Progress::AwaitingAsset {
            model: model.into(),
            wait: Delay::new(max_wait),
            settle,
        };
    }

    /// Advance pending delays. Returns the collider's entity exactly once,
    /// on the tick it becomes Ready.
    pub fn tick(&mut self, dt: f32, ctx: &mut EngineContext) -> Option<EntityId> {
        if let Progress::AwaitingAsset { model, wait, settle } = &mut self.progress {
            if let Some(asset) = ctx.assets.get(model) {
                let settle = *settle;
                self.activate_when_present(&asset, settle);
                // The settle delay starts on the next tick.
                return None;
            }
            if wait.tick(dt) {
                log::warn!(
                    "Collider '{}': model '{}' not loaded after {:.1}s, giving up",
                    self.mesh,
                    model,
                    wait.duration()
                );
                self.progress = Progress::Stalled;
            }
            return None;
        }

        let Progress::Settling { asset, settle } = &mut self.progress else {
            return None;
        };
        if !settle.tick(dt) {
            return None;
        }

        let Some(mesh) = asset.mesh(&self.mesh) else {
            log::warn!("Collider '{}': mesh vanished before build, staying unready", self.mesh);
            self.progress = Progress::Stalled;
            return None;
        };
        let desc = BodyDesc::fixed(ColliderDesc::Polyline {
            vertices: mesh.vertices.clone(),
            closed: true,
        })
        .with_role(BodyRole::Table);

        let id = ctx.next_id();
        ctx.spawn_with_body(Entity::new(id).with_tag(COLLIDER_TAG), desc, self.material);
        self.progress = Progress::Ready(id);
        log::info!("Table collider '{}' initialized", self.mesh);
        Some(id)
    }

    /// Cancel anything pending and remove the body if it was built.
    /// Nothing happens on later ticks.
    pub fn teardown(&mut self, ctx: &mut EngineContext) {
        match &mut self.progress {
            Progress::AwaitingAsset { wait, .. } => wait.cancel(),
            Progress::Settling { settle, .. } => settle.cancel(),
            Progress::Ready(id) => ctx.despawn(*id),
            _ => {}
        }
        self.progress = Progress::TornDown;
    }
}
