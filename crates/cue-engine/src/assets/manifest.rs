use std::collections::HashMap;
use serde::{Deserialize, Serialize};

/// Model manifest describing the named sub-meshes and materials of one
/// model. Exported from the modelling tool as JSON and loaded at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelManifest {
    /// Named sub-meshes: stable name → outline + material.
    pub meshes: HashMap<String, MeshDescriptor>,
    /// Named materials.
    #[serde(default)]
    pub materials: HashMap<String, MaterialDescriptor>,
}

/// A sub-mesh, flattened to its outline in table space (meters).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshDescriptor {
    pub vertices: Vec<[f32; 2]>,
    /// Name of the material in the manifest's material table.
    #[serde(default)]
    pub material: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialDescriptor {
    /// Linear RGB.
    pub color: [f32; 3],
    #[serde(default = "default_roughness")]
    pub roughness: f32,
    #[serde(default)]
    pub metalness: f32,
    #[serde(default = "default_opacity")]
    pub opacity: f32,
}

fn default_roughness() -> f32 {
    0.5
}

fn default_opacity() -> f32 {
    1.0
}

impl ModelManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
