use bevy::prelude::*;
use std::collections::{BTreeSet, HashMap, HashSet};

use crate::map::{MapDocument, ObjectId};

/// Change notifications produced by [`ObjectSelection`], drained once per tick
/// to drive outlines and the tool handle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectionEvent {
    Outline { id: ObjectId, enabled: bool },
    /// New centroid of the selection, `None` once nothing is selected
    Centroid(Option<Vec3>),
}

/// The selectable and selected subsets of the document's objects.
///
/// The centroid is kept as a running sum of the positions cached at selection
/// time; callers that move selected objects report it through
/// [`ObjectSelection::reposition`] or [`ObjectSelection::sync_positions`].
#[derive(Resource, Debug, Default)]
pub struct ObjectSelection {
    selectable: HashSet<ObjectId>,
    selected: HashMap<ObjectId, Vec3>,
    position_sum: Vec3,
    events: Vec<SelectionEvent>,
}

impl ObjectSelection {
    pub fn add_selectable(&mut self, id: ObjectId) {
        self.selectable.insert(id);
    }

    /// Deselect the object if needed and stop tracking it.
    pub fn remove_selectable(&mut self, id: ObjectId) {
        self.deselect(id);
        self.selectable.remove(&id);
    }

    /// Select a selectable object. Returns `false` if nothing changed.
    pub fn select(&mut self, id: ObjectId, document: &MapDocument) -> bool {
        if !self.insert_selected(id, document) {
            return false;
        }
        self.push_centroid();
        true
    }

    /// Deselect an object. Returns `false` if it was not selected.
    pub fn deselect(&mut self, id: ObjectId) -> bool {
        if !self.remove_selected_entry(id) {
            return false;
        }
        self.push_centroid();
        true
    }

    pub fn select_all(&mut self, document: &MapDocument) {
        let mut ids: Vec<ObjectId> = self.selectable.iter().copied().collect();
        ids.sort();
        for id in ids {
            self.insert_selected(id, document);
        }
        self.recompute_sum();
        self.push_centroid();
    }

    pub fn deselect_all(&mut self) {
        if self.selected.is_empty() {
            return;
        }
        for id in self.selected_ids() {
            self.events.push(SelectionEvent::Outline { id, enabled: false });
        }
        self.selected.clear();
        self.position_sum = Vec3::ZERO;
        self.push_centroid();
    }

    /// Swap the selected state of every selectable object.
    pub fn invert(&mut self, document: &MapDocument) {
        let mut ids: Vec<ObjectId> = self.selectable.iter().copied().collect();
        ids.sort();
        for id in ids {
            if self.selected.contains_key(&id) {
                self.remove_selected_entry(id);
            } else {
                self.insert_selected(id, document);
            }
        }
        self.recompute_sum();
        self.push_centroid();
    }

    /// Make the selection exactly `ids` (restricted to selectable objects).
    pub fn replace(&mut self, ids: &[ObjectId], document: &MapDocument) {
        let wanted: HashSet<ObjectId> = ids.iter().copied().collect();
        for id in self.selected_ids() {
            if !wanted.contains(&id) {
                self.remove_selected_entry(id);
            }
        }
        for id in ids {
            self.insert_selected(*id, document);
        }
        self.recompute_sum();
        self.push_centroid();
    }

    /// Drop the selected objects from the selectable set and clear the
    /// selection. Returns the removed ids.
    pub fn remove_selected(&mut self) -> BTreeSet<ObjectId> {
        let removed: BTreeSet<ObjectId> = self.selected.drain().map(|(id, _)| id).collect();
        for id in &removed {
            self.selectable.remove(id);
            self.events.push(SelectionEvent::Outline {
                id: *id,
                enabled: false,
            });
        }
        self.position_sum = Vec3::ZERO;
        if !removed.is_empty() {
            self.push_centroid();
        }
        removed
    }

    /// Forget everything, e.g. when the document is cleared.
    pub fn reset(&mut self) {
        for id in self.selected_ids() {
            self.events.push(SelectionEvent::Outline { id, enabled: false });
        }
        self.selectable.clear();
        self.selected.clear();
        self.position_sum = Vec3::ZERO;
        self.push_centroid();
    }

    /// Update the cached position of a selected object that moved.
    ///
    /// Does not emit an event; see [`ObjectSelection::sync_positions`].
    pub fn reposition(&mut self, id: ObjectId, position: Vec3) -> bool {
        let Some(cached) = self.selected.get_mut(&id) else {
            return false;
        };
        self.position_sum += position - *cached;
        *cached = position;
        true
    }

    /// Re-read the positions of moved objects from the document and publish
    /// the new centroid.
    pub fn sync_positions(&mut self, ids: &[ObjectId], document: &MapDocument) {
        let mut moved = false;
        for id in ids {
            if let Some(position) = document.position(*id) {
                moved |= self.reposition(*id, position);
            }
        }
        if moved {
            self.push_centroid();
        }
    }

    /// Mean position of the selected objects
    pub fn centroid(&self) -> Option<Vec3> {
        if self.selected.is_empty() {
            None
        } else {
            Some(self.position_sum / self.selected.len() as f32)
        }
    }

    pub fn is_selected(&self, id: ObjectId) -> bool {
        self.selected.contains_key(&id)
    }

    pub fn is_selectable(&self, id: ObjectId) -> bool {
        self.selectable.contains(&id)
    }

    /// Selected ids in creation order
    pub fn selected_ids(&self) -> Vec<ObjectId> {
        let mut ids: Vec<ObjectId> = self.selected.keys().copied().collect();
        ids.sort();
        ids
    }

    pub fn selectable_ids(&self) -> Vec<ObjectId> {
        let mut ids: Vec<ObjectId> = self.selectable.iter().copied().collect();
        ids.sort();
        ids
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    pub fn selectable_count(&self) -> usize {
        self.selectable.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn pending_events(&self) -> &[SelectionEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<SelectionEvent> {
        std::mem::take(&mut self.events)
    }

    fn insert_selected(&mut self, id: ObjectId, document: &MapDocument) -> bool {
        if !self.selectable.contains(&id) || self.selected.contains_key(&id) {
            return false;
        }
        let Some(position) = document.position(id) else {
            return false;
        };
        self.selected.insert(id, position);
        self.position_sum += position;
        self.events.push(SelectionEvent::Outline { id, enabled: true });
        true
    }

    fn remove_selected_entry(&mut self, id: ObjectId) -> bool {
        let Some(position) = self.selected.remove(&id) else {
            return false;
        };
        self.position_sum -= position;
        if self.selected.is_empty() {
            self.position_sum = Vec3::ZERO;
        }
        self.events.push(SelectionEvent::Outline { id, enabled: false });
        true
    }

    /// Bulk operations resum from the cache to shed accumulated error
    fn recompute_sum(&mut self) {
        self.position_sum = self.selected.values().copied().sum();
    }

    fn push_centroid(&mut self) {
        self.events.push(SelectionEvent::Centroid(self.centroid()));
    }
}
