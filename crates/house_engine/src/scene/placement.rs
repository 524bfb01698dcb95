//! Object placement
//!
//! Every object is authored around its own bounding box. The placement
//! recenters it on the origin, scales it to a target size (or to unit size
//! along its longest axis), rotates it and moves it into the world:
//!
//! ```text
//! world = T(position) * R(axis, angle) * Rz * Ry * Rx * S * T(-center)
//! ```
//!
//! Each factor whose field is unset is identity. Normals are transformed by
//! the rotation factors only.

use serde::{Deserialize, Serialize};

use crate::foundation::math::{utils, Mat4, Mat4Ext, Vec3};
use crate::foundation::Aabb;

/// Rotation of `angle` radians around `axis`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisAngle {
    /// Rotation axis, normalized when the matrix is built
    pub axis: Vec3,
    /// Angle in radians
    pub angle: f32,
}

impl AxisAngle {
    /// Create an axis-angle rotation
    pub fn new(axis: Vec3, angle: f32) -> Self {
        Self { axis, angle }
    }

    /// Rotation matrix
    pub fn matrix(&self) -> Mat4 {
        Mat4::rotation_axis_angle(self.axis, self.angle)
    }
}

/// Optional placement fields of a scene object
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Target world size per axis
    pub size: Option<Vec3>,
    /// World position of the object's center
    pub position: Option<Vec3>,
    /// Euler angles in radians, applied X then Y then Z
    pub euler: Option<Vec3>,
    /// Extra rotation applied after the Euler angles
    pub rotation: Option<AxisAngle>,
}

impl Placement {
    /// Fit the object into the world box spanned by two corners.
    ///
    /// Sets both the target size and the position (the box center).
    pub fn set_world_bounding_box(&mut self, corner_a: Vec3, corner_b: Vec3) {
        let world = Aabb::from_corners(corner_a, corner_b);
        self.size = Some(world.extents());
        self.position = Some(world.center());
    }

    /// Place the object's center at `position`
    pub fn set_world_location(&mut self, position: Vec3) {
        self.position = Some(position);
    }

    /// Scale the object to `size` world units per axis
    pub fn set_scale(&mut self, size: Vec3) {
        self.size = Some(size);
    }

    /// Set Euler angles (radians)
    pub fn set_euler(&mut self, angles: Vec3) {
        self.euler = Some(angles);
    }

    /// Set the axis-angle rotation
    pub fn set_rotation(&mut self, angle: f32, axis: Vec3) {
        self.rotation = Some(AxisAngle::new(axis, angle));
    }

    /// Rotation part: axis-angle after Euler Z·Y·X
    pub fn rotation_matrix(&self) -> Mat4 {
        let axis_angle = self.rotation.map_or_else(Mat4::identity, |r| r.matrix());
        let euler = self.euler.map_or_else(Mat4::identity, |e| {
            Mat4::rotation_z(e.z) * Mat4::rotation_y(e.y) * Mat4::rotation_x(e.x)
        });
        axis_angle * euler
    }

    /// Transform for normals.
    ///
    /// Rotation only; with non-uniform scale this is an approximation of the
    /// inverse-transpose, which shading tolerates for the box-like furniture
    /// this viewer places.
    pub fn normal_matrix(&self) -> Mat4 {
        self.rotation_matrix()
    }

    /// Scale factors mapping `extents` to the target size.
    ///
    /// Without a target size the longest axis is normalized to 1. A flat
    /// axis (zero extent) keeps scale 1 rather than dividing by zero.
    pub fn scale_factors(&self, extents: &Vec3) -> Vec3 {
        match self.size {
            Some(size) => Vec3::from_fn(|axis, _| {
                if extents[axis] > 0.0 {
                    size[axis] / extents[axis]
                } else {
                    1.0
                }
            }),
            None => {
                let longest = utils::max_component(extents);
                Vec3::repeat(if longest > 0.0 { 1.0 / longest } else { 1.0 })
            }
        }
    }

    /// Object-to-world transform for an object with local bounds `local`
    pub fn world_matrix(&self, local: &Aabb) -> Mat4 {
        let translation = self.position.map_or_else(Mat4::identity, |p| Mat4::new_translation(&p));
        let scale = Mat4::new_nonuniform_scaling(&self.scale_factors(&local.extents()));
        let recenter = Mat4::new_translation(&-local.center());

        translation * self.rotation_matrix() * scale * recenter
    }
}
