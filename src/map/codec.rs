//! Reading and writing single map script records.
//!
//! A record is a comma-separated list: the category keyword, the object name,
//! then a category-dependent run of fields ending with position and rotation.

use bevy::prelude::*;

use super::error::MalformedRecordError;
use super::{MapObject, ObjectCategory};
use crate::constants::{DEFAULT_TEXTURE, MIN_RECORD_FIELDS};

/// Number of fields in a custom-style block between texture and position
const CUSTOM_PARAM_COUNT: usize = 6;

/// Number of leading fields on photon spawners (spawn delay, endless flag)
const SPAWNER_PARAM_COUNT: usize = 2;

/// Field count of a `base` record that carries the custom-style block
const EXTENDED_BASE_FIELDS: usize = 19;

/// Result of parsing one record.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedRecord {
    Object(MapObject),
    /// The `map,disablebounds` directive
    DisableBounds,
}

/// Which optional blocks appear in a record, in on-disk order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RecordLayout {
    texture: bool,
    label: bool,
    scale: bool,
    params: usize,
}

impl RecordLayout {
    const BARE: RecordLayout = RecordLayout {
        texture: false,
        label: false,
        scale: false,
        params: 0,
    };

    const CUSTOM: RecordLayout = RecordLayout {
        texture: true,
        label: false,
        scale: true,
        params: CUSTOM_PARAM_COUNT,
    };

    const SCALED: RecordLayout = RecordLayout {
        texture: false,
        label: false,
        scale: true,
        params: 0,
    };

    const REGION: RecordLayout = RecordLayout {
        texture: false,
        label: true,
        scale: true,
        params: 0,
    };

    const SPAWNER: RecordLayout = RecordLayout {
        texture: false,
        label: false,
        scale: false,
        params: SPAWNER_PARAM_COUNT,
    };

    fn for_record(category: ObjectCategory, name: &str, field_count: usize) -> Self {
        match category {
            ObjectCategory::Custom => Self::CUSTOM,
            ObjectCategory::Base if field_count >= EXTENDED_BASE_FIELDS => Self::CUSTOM,
            ObjectCategory::Base | ObjectCategory::SpawnPoint => Self::BARE,
            ObjectCategory::Racing | ObjectCategory::Misc => Self::SCALED,
            ObjectCategory::Region => Self::REGION,
            ObjectCategory::Photon if is_spawner(name) => Self::SPAWNER,
            ObjectCategory::Photon => Self::BARE,
        }
    }

    fn for_object(object: &MapObject) -> Self {
        match object.category() {
            ObjectCategory::Base if object.texture().is_some() => Self::CUSTOM,
            category => Self::for_record(category, object.name(), 0),
        }
    }

    /// Total number of fields including keyword and name
    fn field_count(&self) -> usize {
        2 + usize::from(self.texture)
            + usize::from(self.label)
            + if self.scale { 3 } else { 0 }
            + self.params
            + 7
    }
}

fn is_spawner(name: &str) -> bool {
    name.starts_with("spawn")
}

/// Sequential reader over the fields of one record.
struct FieldCursor<'a> {
    fields: &'a [&'a str],
    index: usize,
}

impl<'a> FieldCursor<'a> {
    fn new(fields: &'a [&'a str], start: usize) -> Self {
        Self {
            fields,
            index: start,
        }
    }

    fn next_str(&mut self) -> Result<&'a str, MalformedRecordError> {
        let field = self.fields.get(self.index).copied().ok_or(
            MalformedRecordError::TooFewFields {
                found: self.fields.len(),
                expected: self.index + 1,
            },
        )?;
        self.index += 1;
        Ok(field)
    }

    fn next_f32(&mut self) -> Result<f32, MalformedRecordError> {
        let index = self.index;
        let raw = self.next_str()?;
        match raw.parse::<f32>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(MalformedRecordError::InvalidNumber {
                index,
                value: raw.to_string(),
            }),
        }
    }

    fn next_vec3(&mut self) -> Result<Vec3, MalformedRecordError> {
        Ok(Vec3::new(self.next_f32()?, self.next_f32()?, self.next_f32()?))
    }

    /// Quaternion stored as `x, y, z, w`, kept verbatim
    fn next_quat(&mut self) -> Result<Quat, MalformedRecordError> {
        Ok(Quat::from_xyzw(
            self.next_f32()?,
            self.next_f32()?,
            self.next_f32()?,
            self.next_f32()?,
        ))
    }
}

/// Parse one record (without the trailing `;`).
pub fn parse_record(record: &str) -> Result<ParsedRecord, MalformedRecordError> {
    let fields: Vec<&str> = record.split(',').map(str::trim).collect();

    if fields.first() == Some(&"map") {
        return match fields.get(1).copied() {
            Some("disablebounds") => Ok(ParsedRecord::DisableBounds),
            other => Err(MalformedRecordError::UnknownDirective(
                other.unwrap_or_default().to_string(),
            )),
        };
    }

    if fields.len() < MIN_RECORD_FIELDS {
        return Err(MalformedRecordError::TooFewFields {
            found: fields.len(),
            expected: MIN_RECORD_FIELDS,
        });
    }

    let keyword = fields[0];
    let name = fields[1];
    let category = ObjectCategory::from_keyword(keyword, name)
        .ok_or_else(|| MalformedRecordError::UnknownCategory(keyword.to_string()))?;

    let layout = RecordLayout::for_record(category, name, fields.len());
    if fields.len() < layout.field_count() {
        return Err(MalformedRecordError::TooFewFields {
            found: fields.len(),
            expected: layout.field_count(),
        });
    }

    let mut cursor = FieldCursor::new(&fields, 2);
    let mut object = MapObject::new(category, name);

    if layout.texture {
        object = object.with_texture(cursor.next_str()?);
    }
    if layout.label {
        object = object.with_region_label(cursor.next_str()?);
    }
    let scale = if layout.scale {
        cursor.next_vec3()?
    } else {
        Vec3::ONE
    };
    let params = (0..layout.params)
        .map(|_| cursor.next_f32())
        .collect::<Result<Vec<_>, _>>()?;
    let translation = cursor.next_vec3()?;
    let mut rotation = cursor.next_quat()?;

    // Regions are axis-aligned volumes
    if category == ObjectCategory::Region {
        rotation = Quat::IDENTITY;
    }

    Ok(ParsedRecord::Object(object.with_params(params).with_transform(
        Transform {
            translation,
            rotation,
            scale,
        },
    )))
}

/// Serialize an object as one record (without the trailing `;`).
pub fn serialize_record(object: &MapObject) -> String {
    let layout = RecordLayout::for_object(object);
    let mut fields: Vec<String> = Vec::with_capacity(layout.field_count());

    fields.push(record_keyword(object).to_string());
    fields.push(object.name().to_string());

    if layout.texture {
        fields.push(sanitize_text(object.texture().unwrap_or(DEFAULT_TEXTURE)));
    }
    if layout.label {
        fields.push(sanitize_text(object.region_label().unwrap_or_default()));
    }
    if layout.scale {
        push_vec3(&mut fields, object.transform.scale);
    }
    for index in 0..layout.params {
        let value = object.params().get(index).copied().unwrap_or(0.0);
        fields.push(value.to_string());
    }
    push_vec3(&mut fields, object.transform.translation);

    let rotation = object.transform.rotation;
    fields.extend([rotation.x, rotation.y, rotation.z, rotation.w].map(|v| v.to_string()));

    fields.join(",")
}

/// Regions named anything other than `region` only come from the `region`
/// keyword and must keep it to parse back as regions.
fn record_keyword(object: &MapObject) -> &'static str {
    match object.category() {
        ObjectCategory::Region if object.name() != "region" => "region",
        category => category.keyword(),
    }
}

fn push_vec3(fields: &mut Vec<String>, value: Vec3) {
    fields.extend([value.x, value.y, value.z].map(|v| v.to_string()));
}

/// Text fields cannot contain the record or field separators.
fn sanitize_text(text: &str) -> String {
    text.replace([',', ';'], "_")
}
