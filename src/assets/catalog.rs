//! Asset resolution interface consumed by the map document.
//!
//! The engine owns the actual meshes and materials; the editor core only
//! needs to know whether a name resolves and a handle it can release later.

use thiserror::Error;

use crate::map::ObjectCategory;

/// Opaque handle to an instantiated renderable object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RenderableHandle(pub u64);

/// Opaque handle to a loaded material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialHandle(pub u64);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnknownAssetError {
    #[error("the object '{0}' does not exist")]
    Object(String),
    #[error("the material '{0}' does not exist")]
    Material(String),
}

/// Resolves object and material names against the asset catalog.
pub trait AssetCatalog {
    /// Instantiate the object with the given name.
    fn instantiate(&mut self, object_name: &str) -> Result<RenderableHandle, UnknownAssetError>;

    /// Load the material with the given name.
    fn load_material(&mut self, material_name: &str) -> Result<MaterialHandle, UnknownAssetError>;

    /// Destroy a renderable previously returned by [`AssetCatalog::instantiate`].
    fn release(&mut self, handle: RenderableHandle);
}

/// Name of the asset to instantiate for an object.
///
/// Barriers and regions are invisible in game, so the editor swaps in
/// visible stand-ins. Regions carry arbitrary names and all share one.
pub fn editor_asset_name(category: ObjectCategory, object_name: &str) -> String {
    match (category, object_name) {
        (ObjectCategory::Region, _) => "regionEditor".to_string(),
        (_, "barrier") => "barrierEditor".to_string(),
        _ => object_name.to_string(),
    }
}
