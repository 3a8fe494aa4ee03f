use bevy::prelude::*;
use std::collections::{BTreeMap, HashSet};

use super::codec::{ParsedRecord, parse_record, serialize_record};
use super::error::LoadError;
use super::{MapObject, ObjectId};
use crate::assets::{AssetCatalog, RenderableHandle, UnknownAssetError, editor_asset_name};
use crate::constants::DEFAULT_TEXTURE;
use crate::editor::ObjectSelection;

/// An object owned by the document together with its instantiated renderable.
#[derive(Debug, Clone)]
pub struct PlacedObject {
    pub object: MapObject,
    pub renderable: RenderableHandle,
}

/// A record that was skipped during [`MapDocument::load`].
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRecord {
    /// Position of the record among the non-empty segments of the script
    pub index: usize,
    pub text: String,
    pub error: LoadError,
}

/// Outcome of loading a map script.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub loaded: Vec<ObjectId>,
    pub skipped: Vec<SkippedRecord>,
    pub disabled_bounds: bool,
}

impl LoadReport {
    pub fn skipped_indices(&self) -> Vec<usize> {
        self.skipped.iter().map(|skipped| skipped.index).collect()
    }

    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// All objects placed in the current map.
///
/// Objects are keyed by [`ObjectId`], which is allocated monotonically, so
/// iteration order is creation order.
#[derive(Resource, Debug, Default)]
pub struct MapDocument {
    objects: BTreeMap<ObjectId, PlacedObject>,
    bounds_disabled: bool,
    next_id: u64,
    revision: u64,
}

impl MapDocument {
    /// Parse a map script and append its objects to the document.
    ///
    /// Malformed records and unknown assets are skipped and reported; the
    /// load itself never fails.
    pub fn load(
        &mut self,
        script: &str,
        catalog: &mut dyn AssetCatalog,
        selection: &mut ObjectSelection,
    ) -> LoadReport {
        let script = script.replace(['\n', '\r'], "");
        let mut report = LoadReport::default();

        let segments = script.split(';').filter(|segment| !segment.trim().is_empty());
        for (index, segment) in segments.enumerate() {
            match self.load_record(segment, catalog) {
                Ok(Some(id)) => {
                    selection.add_selectable(id);
                    report.loaded.push(id);
                }
                Ok(None) => report.disabled_bounds = true,
                Err(error) => {
                    warn!("Skipping map record {} '{}': {}", index, segment.trim(), error);
                    report.skipped.push(SkippedRecord {
                        index,
                        text: segment.to_string(),
                        error,
                    });
                }
            }
        }

        info!(
            "Loaded {} objects ({} records skipped)",
            report.loaded.len(),
            report.skipped.len()
        );
        report
    }

    fn load_record(
        &mut self,
        record: &str,
        catalog: &mut dyn AssetCatalog,
    ) -> Result<Option<ObjectId>, LoadError> {
        match parse_record(record)? {
            ParsedRecord::DisableBounds => {
                self.set_bounds_disabled(true);
                Ok(None)
            }
            ParsedRecord::Object(object) => Ok(Some(self.insert(object, catalog)?)),
        }
    }

    /// Serialize the document as a map script.
    pub fn export(&self) -> String {
        let mut script = String::new();
        if self.bounds_disabled {
            script.push_str("map,disablebounds;\n");
        }
        for placed in self.objects.values() {
            script.push_str(&serialize_record(&placed.object));
            script.push_str(";\n");
        }
        script
    }

    /// Remove every object and clear the selection state.
    pub fn reset(&mut self, catalog: &mut dyn AssetCatalog, selection: &mut ObjectSelection) {
        for placed in std::mem::take(&mut self.objects).into_values() {
            catalog.release(placed.renderable);
        }
        self.bounds_disabled = false;
        self.revision += 1;
        selection.reset();
    }

    /// Instantiate an object under a fresh id without making it selectable.
    pub fn insert(
        &mut self,
        object: MapObject,
        catalog: &mut dyn AssetCatalog,
    ) -> Result<ObjectId, UnknownAssetError> {
        let id = self.reserve_id();
        self.restore(id, object, catalog)?;
        Ok(id)
    }

    /// Instantiate an object and register it as selectable.
    pub fn add_object(
        &mut self,
        object: MapObject,
        catalog: &mut dyn AssetCatalog,
        selection: &mut ObjectSelection,
    ) -> Result<ObjectId, UnknownAssetError> {
        let id = self.insert(object, catalog)?;
        selection.add_selectable(id);
        Ok(id)
    }

    /// Instantiate an object under a previously allocated id.
    ///
    /// Replaces any object already stored under that id.
    pub fn restore(
        &mut self,
        id: ObjectId,
        object: MapObject,
        catalog: &mut dyn AssetCatalog,
    ) -> Result<(), UnknownAssetError> {
        let renderable = instantiate(&object, catalog)?;
        if let Some(previous) = self.objects.insert(id, PlacedObject { object, renderable }) {
            catalog.release(previous.renderable);
        }
        self.next_id = self.next_id.max(id.0 + 1);
        self.revision += 1;
        Ok(())
    }

    /// Allocate an id that no object has used before.
    pub fn reserve_id(&mut self) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Remove an object, dropping it from the selection and releasing its renderable.
    pub fn remove_object(
        &mut self,
        id: ObjectId,
        catalog: &mut dyn AssetCatalog,
        selection: &mut ObjectSelection,
    ) -> Option<MapObject> {
        selection.remove_selectable(id);
        let placed = self.objects.remove(&id)?;
        catalog.release(placed.renderable);
        self.revision += 1;
        Some(placed.object)
    }

    /// Remove every selected object. Returns the removed objects in id order.
    pub fn delete_selected(
        &mut self,
        catalog: &mut dyn AssetCatalog,
        selection: &mut ObjectSelection,
    ) -> Vec<(ObjectId, MapObject)> {
        let removed: Vec<_> = selection
            .remove_selected()
            .into_iter()
            .filter_map(|id| {
                let placed = self.objects.remove(&id)?;
                catalog.release(placed.renderable);
                Some((id, placed.object))
            })
            .collect();
        if !removed.is_empty() {
            self.revision += 1;
        }
        removed
    }

    pub fn get(&self, id: ObjectId) -> Option<&MapObject> {
        self.objects.get(&id).map(|placed| &placed.object)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut MapObject> {
        self.revision += 1;
        self.objects.get_mut(&id).map(|placed| &mut placed.object)
    }

    pub fn position(&self, id: ObjectId) -> Option<Vec3> {
        self.get(id).map(MapObject::position)
    }

    pub fn renderable(&self, id: ObjectId) -> Option<RenderableHandle> {
        self.objects.get(&id).map(|placed| placed.renderable)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(&id)
    }

    /// Objects in creation order
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &MapObject)> {
        self.objects.iter().map(|(id, placed)| (*id, &placed.object))
    }

    pub fn ids(&self) -> Vec<ObjectId> {
        self.objects.keys().copied().collect()
    }

    /// Mutable transforms of the given objects. Unknown ids are skipped.
    pub fn transforms_mut(&mut self, ids: &[ObjectId]) -> Vec<&mut Transform> {
        let wanted: HashSet<ObjectId> = ids.iter().copied().collect();
        self.revision += 1;
        self.objects
            .iter_mut()
            .filter(|(id, _)| wanted.contains(id))
            .map(|(_, placed)| &mut placed.object.transform)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn bounds_disabled(&self) -> bool {
        self.bounds_disabled
    }

    pub fn set_bounds_disabled(&mut self, disabled: bool) {
        if self.bounds_disabled != disabled {
            self.bounds_disabled = disabled;
            self.revision += 1;
        }
    }

    /// Counter bumped by every mutation, used to detect unsaved changes.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

fn instantiate(
    object: &MapObject,
    catalog: &mut dyn AssetCatalog,
) -> Result<RenderableHandle, UnknownAssetError> {
    let handle = catalog.instantiate(&editor_asset_name(object.category(), object.name()))?;

    if let Some(texture) = object.texture()
        && texture != DEFAULT_TEXTURE
        && let Err(error) = catalog.load_material(texture)
    {
        catalog.release(handle);
        return Err(error);
    }

    Ok(handle)
}
