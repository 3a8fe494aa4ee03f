use bevy::prelude::*;
use std::fmt;

use super::ObjectCategory;

/// Stable identifier of an object in a [`MapDocument`](super::MapDocument).
///
/// Ids are never reused, so commands can keep referring to an object across
/// delete/undo cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u64);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A placed object as described by one map script record.
#[derive(Debug, Clone, PartialEq)]
pub struct MapObject {
    category: ObjectCategory,
    name: String,
    texture: Option<String>,
    region_label: Option<String>,
    params: Vec<f32>,
    pub transform: Transform,
}

impl MapObject {
    pub fn new(category: ObjectCategory, name: impl Into<String>) -> Self {
        Self {
            category,
            name: name.into(),
            texture: None,
            region_label: None,
            params: Vec::new(),
            transform: Transform::IDENTITY,
        }
    }

    pub fn with_texture(mut self, texture: impl Into<String>) -> Self {
        self.texture = Some(texture.into());
        self
    }

    pub fn with_region_label(mut self, label: impl Into<String>) -> Self {
        self.region_label = Some(label.into());
        self
    }

    pub fn with_params(mut self, params: Vec<f32>) -> Self {
        self.params = params;
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn category(&self) -> ObjectCategory {
        self.category
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn texture(&self) -> Option<&str> {
        self.texture.as_deref()
    }

    pub fn region_label(&self) -> Option<&str> {
        self.region_label.as_deref()
    }

    /// Category-specific numeric fields in record order
    pub fn params(&self) -> &[f32] {
        &self.params
    }

    pub fn position(&self) -> Vec3 {
        self.transform.translation
    }

    /// Field-by-field comparison with a tolerance on every float
    pub fn approx_eq(&self, other: &MapObject, epsilon: f32) -> bool {
        let close = |a: f32, b: f32| (a - b).abs() <= epsilon;

        self.category == other.category
            && self.name == other.name
            && self.texture == other.texture
            && self.region_label == other.region_label
            && self.params.len() == other.params.len()
            && self
                .params
                .iter()
                .zip(&other.params)
                .all(|(a, b)| close(*a, *b))
            && self
                .transform
                .translation
                .abs_diff_eq(other.transform.translation, epsilon)
            && self
                .transform
                .rotation
                .abs_diff_eq(other.transform.rotation, epsilon)
            && self.transform.scale.abs_diff_eq(other.transform.scale, epsilon)
    }
}
