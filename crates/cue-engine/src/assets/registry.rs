use std::collections::HashMap;
use std::rc::Rc;
use glam::Vec2;
use crate::assets::manifest::{MaterialDescriptor, ModelManifest};

/// Geometry of one named sub-mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<Vec2>,
    pub material: Option<String>,
}

/// A loaded model: named sub-meshes and materials.
/// Built once from a manifest and never mutated afterwards; consumers hold
/// it through an `Rc`.
#[derive(Debug, Clone, Default)]
pub struct AssetHandle {
    meshes: HashMap<String, MeshData>,
    materials: HashMap<String, MaterialDescriptor>,
}

impl AssetHandle {
    pub fn from_manifest(manifest: &ModelManifest) -> Self {
        let meshes = manifest
            .meshes
            .iter()
            .map(|(name, desc)| {
                let vertices = desc.vertices.iter().map(|&[x, y]| Vec2::new(x, y)).collect();
                (name.clone(), MeshData { vertices, material: desc.material.clone() })
            })
            .collect();
        Self {
            meshes,
            materials: manifest.materials.clone(),
        }
    }

    /// Look up a sub-mesh by name. Empty meshes count as absent.
    pub fn mesh(&self, name: &str) -> Option<&MeshData> {
        self.meshes.get(name).filter(|m| !m.vertices.is_empty())
    }

    pub fn material(&self, name: &str) -> Option<&MaterialDescriptor> {
        self.materials.get(name)
    }

    /// Material assigned to a sub-mesh, if both exist.
    pub fn mesh_material(&self, mesh: &str) -> Option<&MaterialDescriptor> {
        let name = self.mesh(mesh)?.material.as_deref()?;
        self.material(name)
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }
}

/// Loaded models by name. Components subscribe by polling [`AssetStore::get`]
/// rather than assuming a load finished after some fixed time.
#[derive(Debug, Default)]
pub struct AssetStore {
    models: HashMap<String, Rc<AssetHandle>>,
}

impl AssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and register a model. An existing model of the same name is
    /// replaced; holders of the old `Rc` keep their copy.
    pub fn load_json(&mut self, name: &str, json: &str) -> Result<Rc<AssetHandle>, serde_json::Error> {
        let manifest = ModelManifest::from_json(json)?;
        let handle = Rc::new(AssetHandle::from_manifest(&manifest));
        self.models.insert(name.to_string(), Rc::clone(&handle));
        log::info!("Model '{}' loaded ({} meshes)", name, handle.mesh_count());
        Ok(handle)
    }

    pub fn insert(&mut self, name: &str, handle: AssetHandle) -> Rc<AssetHandle> {
        let handle = Rc::new(handle);
        self.models.insert(name.to_string(), Rc::clone(&handle));
        handle
    }

    /// The model if it has finished loading.
    pub fn get(&self, name: &str) -> Option<Rc<AssetHandle>> {
        self.models.get(name).cloned()
    }

    pub fn is_loaded(&self, name: &str) -> bool {
        self.models.contains_key(name)
    }

    /// Drop the store's reference to a model.
    pub fn release(&mut self, name: &str) -> bool {
        self.models.remove(name).is_some()
    }
}
