//! Scene content
//!
//! Scene objects, their placement, and the orchestration that turns a scene
//! description into a list of loaded objects.

pub mod description;
pub mod placement;
pub mod scene_object;

pub use description::{ObjectDescription, PlacementDescription, SceneDescription};
pub use placement::{AxisAngle, Placement};
pub use scene_object::SceneObject;

use std::path::Path;

use thiserror::Error;

use crate::assets::AssetError;
use crate::config::ConfigError;
use crate::core::LoadPolicy;

/// Scene setup errors
#[derive(Error, Debug)]
pub enum SceneError {
    /// The scene description could not be read
    #[error("Failed to read scene description: {0}")]
    Description(#[from] ConfigError),

    /// One object failed to load
    #[error("Failed to load object '{name}': {source}")]
    Object {
        /// Object name from the description
        name: String,
        /// Underlying asset error
        #[source]
        source: AssetError,
    },
}

/// Load and place every object of a description.
///
/// Objects come back in description order. Under [`LoadPolicy::SkipObject`]
/// a failing object is logged and left out; under [`LoadPolicy::Abort`] the
/// first failure ends the load.
pub fn load_objects(
    description: &SceneDescription,
    assets_dir: &Path,
    policy: LoadPolicy,
) -> Result<Vec<(SceneObject, bool)>, SceneError> {
    let mut objects = Vec::with_capacity(description.objects.len());

    for entry in &description.objects {
        match SceneObject::load(&entry.name, assets_dir, &entry.geometry, &entry.material) {
            Ok(mut object) => {
                entry.placement.apply_to(&mut object);
                objects.push((object, entry.collidable));
            }
            Err(source) if policy == LoadPolicy::SkipObject => {
                log::warn!("Skipping object '{}': {}", entry.name, source);
            }
            Err(source) => {
                return Err(SceneError::Object {
                    name: entry.name.clone(),
                    source,
                });
            }
        }
    }

    log::info!("Scene loaded: {} of {} objects", objects.len(), description.objects.len());
    Ok(objects)
}
