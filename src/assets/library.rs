use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::catalog::{AssetCatalog, MaterialHandle, RenderableHandle, UnknownAssetError};

/// Asset names exported from the RC asset bundle, stored as JSON on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetManifest {
    #[serde(default)]
    pub objects: Vec<String>,
    #[serde(default)]
    pub materials: Vec<String>,
}

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("could not read asset manifest: {0}")]
    Io(#[from] std::io::Error),
    #[error("asset manifest is malformed: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The asset catalog used by the editor.
///
/// Without a manifest every name resolves, which is what the headless
/// tooling wants when the asset bundle is not available.
#[derive(Resource, Debug, Default)]
pub struct AssetLibrary {
    pub manifest_path: Option<PathBuf>,
    objects: Option<HashSet<String>>,
    materials: Option<HashSet<String>>,
    next_handle: u64,
    live: HashSet<RenderableHandle>,
}

impl AssetLibrary {
    pub fn from_manifest(manifest: AssetManifest) -> Self {
        let mut library = Self::default();
        library.apply_manifest(manifest);
        library
    }

    pub fn is_permissive(&self) -> bool {
        self.objects.is_none()
    }

    /// Number of renderables instantiated and not yet released
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn is_live(&self, handle: RenderableHandle) -> bool {
        self.live.contains(&handle)
    }

    fn apply_manifest(&mut self, manifest: AssetManifest) {
        self.objects = Some(manifest.objects.into_iter().collect());
        self.materials = Some(manifest.materials.into_iter().collect());
    }

    fn next_id(&mut self) -> u64 {
        self.next_handle += 1;
        self.next_handle
    }
}

/// Read a manifest file and install it into the library
pub fn open_asset_manifest(library: &mut AssetLibrary, path: &Path) -> Result<usize, ManifestError> {
    let json = std::fs::read_to_string(path)?;
    let manifest: AssetManifest = serde_json::from_str(&json)?;
    let count = manifest.objects.len();
    library.apply_manifest(manifest);
    library.manifest_path = Some(path.to_path_buf());
    Ok(count)
}

impl AssetCatalog for AssetLibrary {
    fn instantiate(&mut self, object_name: &str) -> Result<RenderableHandle, UnknownAssetError> {
        if let Some(objects) = &self.objects
            && !objects.contains(object_name)
        {
            return Err(UnknownAssetError::Object(object_name.to_string()));
        }

        let handle = RenderableHandle(self.next_id());
        self.live.insert(handle);
        Ok(handle)
    }

    fn load_material(&mut self, material_name: &str) -> Result<MaterialHandle, UnknownAssetError> {
        if let Some(materials) = &self.materials
            && !materials.contains(material_name)
        {
            return Err(UnknownAssetError::Material(material_name.to_string()));
        }

        Ok(MaterialHandle(self.next_id()))
    }

    fn release(&mut self, handle: RenderableHandle) {
        if !self.live.remove(&handle) {
            debug!("Released unknown renderable {:?}", handle);
        }
    }
}
