//! Geometric operations applied to groups of object transforms.

use bevy::prelude::*;

/// Move every transform by `delta`.
pub fn translate<'a>(transforms: impl IntoIterator<Item = &'a mut Transform>, delta: Vec3) {
    for transform in transforms {
        transform.translation += delta;
    }
}

/// Rotate transforms about `pivot` around `axis` by `angle_degrees`.
///
/// Both the positions and the orientations are rotated. A zero axis leaves
/// the transforms untouched.
pub fn rotate<'a>(
    transforms: impl IntoIterator<Item = &'a mut Transform>,
    pivot: Vec3,
    axis: Vec3,
    angle_degrees: f32,
) {
    let Some(axis) = axis.try_normalize() else {
        return;
    };
    let rotation = Quat::from_axis_angle(axis, angle_degrees.to_radians());

    for transform in transforms {
        transform.translation = pivot + rotation * (transform.translation - pivot);
        transform.rotation = rotation * transform.rotation;
    }
}

/// Scale offsets from `pivot` component-wise by `factor`.
///
/// With `scale_objects` the local scale of each transform is multiplied too;
/// without it only the spacing between objects changes.
pub fn scale<'a>(
    transforms: impl IntoIterator<Item = &'a mut Transform>,
    pivot: Vec3,
    factor: Vec3,
    scale_objects: bool,
) {
    for transform in transforms {
        transform.translation = pivot + (transform.translation - pivot) * factor;
        if scale_objects {
            transform.scale *= factor;
        }
    }
}
