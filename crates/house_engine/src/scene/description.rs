//! Declarative scene description
//!
//! A scene file lists the objects to load, each as a geometry file, a
//! material file and optional placement fields. RON example:
//!
//! ```ron
//! (
//!     objects: [
//!         (
//!             name: "bed",
//!             geometry: "bed.obj",
//!             material: "bed.mtl",
//!             placement: (
//!                 world_bounding_box: Some(((7800.0, 0.0, -8255.0), (9800.0, 900.0, -7255.0))),
//!                 rotation: Some((axis: (0.0, 1.0, 0.0), angle: 3.14159)),
//!             ),
//!         ),
//!     ],
//! )
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::placement::AxisAngle;
use super::SceneObject;
use crate::config::Config;
use crate::foundation::math::Vec3;

/// Placement fields as written in a scene file.
///
/// Applied in field order, so an explicit `location` or `scale` overrides
/// the part of `world_bounding_box` it names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementDescription {
    /// Two opposite world corners the object is fitted into
    pub world_bounding_box: Option<(Vec3, Vec3)>,
    /// World position of the object's center
    pub location: Option<Vec3>,
    /// World size per axis
    pub scale: Option<Vec3>,
    /// Euler angles in radians
    pub euler: Option<Vec3>,
    /// Axis-angle rotation
    pub rotation: Option<AxisAngle>,
}

impl PlacementDescription {
    /// Apply every present field to `object`
    pub fn apply_to(&self, object: &mut SceneObject) {
        let mut placement = *object.placement();
        if let Some((a, b)) = self.world_bounding_box {
            placement.set_world_bounding_box(a, b);
        }
        if let Some(location) = self.location {
            placement.set_world_location(location);
        }
        if let Some(scale) = self.scale {
            placement.set_scale(scale);
        }
        if let Some(euler) = self.euler {
            placement.set_euler(euler);
        }
        if let Some(rotation) = self.rotation {
            placement.set_rotation(rotation.angle, rotation.axis);
        }
        object.set_placement(placement);
    }
}

fn default_collidable() -> bool {
    true
}

/// One object entry of a scene file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectDescription {
    /// Name used in logs and errors
    pub name: String,
    /// Geometry file, relative to the assets directory
    pub geometry: PathBuf,
    /// Material file, relative to the assets directory
    pub material: PathBuf,
    /// Placement fields
    #[serde(default)]
    pub placement: PlacementDescription,
    /// Whether the object's box goes into the collision map
    #[serde(default = "default_collidable")]
    pub collidable: bool,
}

/// Ordered list of objects making up a scene
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    /// Objects in load order
    pub objects: Vec<ObjectDescription>,
}

impl Config for SceneDescription {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigFormat;

    #[test]
    fn test_parse_ron_scene() {
        let text = r#"(
            objects: [
                (
                    name: "house",
                    geometry: "house.obj",
                    material: "house.mtl",
                    placement: (
                        world_bounding_box: Some(((0.0, 0.0, -8385.0), (12442.0, 2500.0, 0.0))),
                    ),
                    collidable: false,
                ),
                (
                    name: "tv",
                    geometry: "tv.obj",
                    material: "tv.mtl",
                    placement: (
                        location: Some((9269.0, 1050.0, -4815.0)),
                        scale: Some((1000.0, 400.0, 700.0)),
                        rotation: Some((axis: (1.0, 0.0, 0.0), angle: -1.5708)),
                    ),
                ),
            ],
        )"#;
        let scene = SceneDescription::from_str_with_format(text, ConfigFormat::Ron).unwrap();
        assert_eq!(scene.objects.len(), 2);
        assert!(!scene.objects[0].collidable);
        assert!(scene.objects[1].collidable);
        assert_eq!(scene.objects[1].placement.scale, Some(Vec3::new(1000.0, 400.0, 700.0)));
        assert!(scene.objects[1].placement.euler.is_none());
    }

    #[test]
    fn test_apply_location_overrides_box_center() {
        let mut object = SceneObject::from_sources("cube", "v 0 0 0\nv 1 0 0\nv 0 1 1\nf 1 2 3\n", "").unwrap();
        let description = PlacementDescription {
            world_bounding_box: Some((Vec3::zeros(), Vec3::repeat(2.0))),
            location: Some(Vec3::new(5.0, 0.0, 0.0)),
            euler: Some(Vec3::new(0.0, 1.0, 0.0)),
            ..PlacementDescription::default()
        };
        description.apply_to(&mut object);

        let placement = object.placement();
        assert_eq!(placement.position, Some(Vec3::new(5.0, 0.0, 0.0)));
        assert_eq!(placement.size, Some(Vec3::repeat(2.0)));
        assert_eq!(placement.euler, Some(Vec3::new(0.0, 1.0, 0.0)));
        assert!(placement.rotation.is_none());
    }
}
