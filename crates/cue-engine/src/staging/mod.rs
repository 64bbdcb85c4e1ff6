//! Staged scene activation: phase sequencing, deferred colliders, the
//! delayed trigger body and the rack group it releases.

pub mod director;
#[cfg(feature = "physics")]
pub mod collider;
#[cfg(feature = "physics")]
pub mod rack;
#[cfg(feature = "physics")]
pub mod trigger;

use serde::{Deserialize, Serialize};

pub use director::{MountedScene, Phase, SceneDirector};
#[cfg(feature = "physics")]
pub use collider::{ColliderStage, StagedCollider};
#[cfg(feature = "physics")]
pub use rack::{RackActivationGroup, RackMember, RackState, RACK_JITTER};
#[cfg(feature = "physics")]
pub use trigger::{TriggerBody, TriggerSpec};

/// Delays (seconds) used to stage a scene. All fields are optional in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StagingConfig {
    /// Title click → play.
    pub transition_delay: f32,
    /// Settle time between confirming table geometry and building its collider.
    pub collider_settle: f32,
    /// How long the collider waits for its model before giving up.
    pub collider_max_wait: f32,
    /// Collider ready → cue ball spawn.
    pub trigger_delay: f32,
    /// Table mount → rack frame starts fading.
    pub frame_fade_delay: f32,
}

impl Default for StagingConfig {
    fn default() -> Self {
        Self {
            transition_delay: 1.3,
            collider_settle: 0.9,
            collider_max_wait: 10.0,
            trigger_delay: 1.2,
            frame_fade_delay: 2.0,
        }
    }
}

impl StagingConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
