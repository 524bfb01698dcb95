//! Viewer context
//!
//! Owns everything the walkthrough needs between frames: configuration,
//! loaded scene objects, the collision map, the camera and the texture
//! cache. Built once at startup in a fixed order:
//!
//! 1. configuration (validated)
//! 2. scene objects, per the load policy
//! 3. collision map: collidable object boxes, then the static obstacle file
//! 4. camera controller at the configured start pose
//!
//! Each simulation step updates the camera before [`Viewer::render_view`]
//! reads any state for drawing.

use std::path::Path;
use std::time::Duration;

use thiserror::Error;

use crate::assets::{load_obstacle_file, AssetError, Material, TextureCache, TextureHandle};
use crate::camera::{CameraController, Directions, StepReport};
use crate::config::{Config, ConfigError};
use crate::core::ViewerConfig;
use crate::foundation::math::Mat4;
use crate::physics::CollisionMap;
use crate::scene::{self, SceneDescription, SceneError, SceneObject};

/// Upper bound on simulation steps run by one [`Viewer::advance`] call
pub const MAX_STEPS_PER_ADVANCE: usize = 8;

/// Viewer setup and runtime errors
#[derive(Error, Debug)]
pub enum ViewerError {
    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Scene description or object load failure
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    /// Obstacle file or texture failure
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    /// No loaded object has the requested name
    #[error("No object named '{0}'")]
    UnknownObject(String),
}

/// One object as the renderer needs it for a frame
#[derive(Debug, Clone, Copy)]
pub struct ObjectView<'a> {
    /// Batches and materials
    pub object: &'a SceneObject,
    /// Object-to-world transform
    pub world: Mat4,
    /// Normal transform
    pub normal: Mat4,
}

/// Read-only frame data
#[derive(Debug, Clone)]
pub struct RenderView<'a> {
    /// World-to-view matrix
    pub view: Mat4,
    /// Projection matrix for the requested aspect ratio
    pub projection: Mat4,
    /// Every loaded object in scene order
    pub objects: Vec<ObjectView<'a>>,
}

/// Walkthrough context
pub struct Viewer {
    config: ViewerConfig,
    objects: Vec<SceneObject>,
    collision_map: CollisionMap,
    camera: CameraController,
    textures: TextureCache,
    accumulator: f32,
}

impl Viewer {
    /// Build a viewer from a configuration, reading its scene description
    pub fn new(config: ViewerConfig) -> Result<Self, ViewerError> {
        config.validate()?;
        let scene_path = config.assets.scene_path();
        log::info!("Reading scene description {}", scene_path.display());
        let description = SceneDescription::load_from_file(&scene_path).map_err(SceneError::from)?;
        Self::from_description(config, &description)
    }

    /// Build a viewer from an already parsed scene description
    pub fn from_description(config: ViewerConfig, description: &SceneDescription) -> Result<Self, ViewerError> {
        config.validate()?;
        let objects = scene::load_objects(description, &config.assets.assets_dir, config.engine.load_policy)?;
        Self::from_objects(config, objects)
    }

    /// Build a viewer around loaded objects, each flagged collidable or not
    pub fn from_objects(config: ViewerConfig, objects: Vec<(SceneObject, bool)>) -> Result<Self, ViewerError> {
        config.validate()?;

        let mut collision_map = CollisionMap::new();
        collision_map.extend(
            objects
                .iter()
                .filter(|(_, collidable)| *collidable)
                .filter_map(|(object, _)| object.obstacle_box()),
        );
        if let Some(path) = config.assets.obstacle_path() {
            collision_map.extend(load_obstacle_file(path)?);
        }
        log::info!("Collision map ready with {} obstacles", collision_map.len());

        let camera = CameraController::new(config.camera.clone());
        let textures = TextureCache::new(config.assets.assets_dir.clone());

        Ok(Self {
            config,
            objects: objects.into_iter().map(|(object, _)| object).collect(),
            collision_map,
            camera,
            textures,
            accumulator: 0.0,
        })
    }

    /// Active configuration
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Loaded objects in scene order
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Object by name
    pub fn object(&self, name: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|object| object.name() == name)
    }

    /// Obstacles the camera walks against
    pub fn collision_map(&self) -> &CollisionMap {
        &self.collision_map
    }

    /// Camera controller
    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    /// Camera controller, for pointer input
    pub fn camera_mut(&mut self) -> &mut CameraController {
        &mut self.camera
    }

    /// Start holding movement directions
    pub fn press(&mut self, directions: Directions) {
        self.camera.press(directions);
    }

    /// Stop holding movement directions
    pub fn release(&mut self, directions: Directions) {
        self.camera.release(directions);
    }

    /// Run one simulation step
    pub fn step(&mut self) -> StepReport {
        self.camera.step(&self.collision_map)
    }

    /// Advance simulated time, running as many fixed-rate steps as fit.
    ///
    /// Leftover time carries into the next call. When more than
    /// [`MAX_STEPS_PER_ADVANCE`] steps are due (after a stall) the backlog
    /// is dropped. Returns the number of steps run.
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        let step_len = 1.0 / self.config.engine.step_rate_hz;
        self.accumulator += elapsed.as_secs_f32();

        let mut steps = 0;
        while self.accumulator >= step_len && steps < MAX_STEPS_PER_ADVANCE {
            self.step();
            self.accumulator -= step_len;
            steps += 1;
        }

        if self.accumulator >= step_len {
            log::debug!("Dropping {:.3}s of simulation backlog", self.accumulator);
            self.accumulator = 0.0;
        }
        steps
    }

    /// Replace one object's geometry and materials, keeping its placement.
    ///
    /// The collision map is left as built at startup. On failure the object
    /// keeps its previous content.
    pub fn reload_object(
        &mut self,
        name: &str,
        geometry: impl AsRef<Path>,
        material: impl AsRef<Path>,
    ) -> Result<(), ViewerError> {
        let assets_dir = &self.config.assets.assets_dir;
        let object = self
            .objects
            .iter_mut()
            .find(|object| object.name() == name)
            .ok_or_else(|| ViewerError::UnknownObject(name.to_string()))?;
        object.reload(assets_dir, geometry, material)?;
        Ok(())
    }

    /// Decode every diffuse map referenced by a loaded material.
    ///
    /// Already cached textures are not decoded again. Returns the number of
    /// textures in the cache afterwards.
    pub fn load_textures(&mut self) -> Result<usize, ViewerError> {
        for object in &self.objects {
            for map in object.materials().iter().filter_map(|m| m.diffuse_map.as_deref()) {
                self.textures.get_or_load(map)?;
            }
        }
        log::debug!("Texture cache holds {} images", self.textures.len());
        Ok(self.textures.len())
    }

    /// Cached diffuse texture of a material, if it has one and it was loaded
    pub fn diffuse_texture(&self, material: &Material) -> Option<TextureHandle> {
        material.diffuse_map.as_deref().and_then(|map| self.textures.handle(map))
    }

    /// Texture cache
    pub fn textures(&self) -> &TextureCache {
        &self.textures
    }

    /// Frame data for a viewport of the given aspect ratio
    pub fn render_view(&self, aspect: f32) -> RenderView<'_> {
        RenderView {
            view: self.camera.view_matrix(),
            projection: self.camera.projection_matrix(aspect),
            objects: self
                .objects
                .iter()
                .map(|object| ObjectView {
                    object,
                    world: object.world_transform(),
                    normal: object.normal_transform(),
                })
                .collect(),
        }
    }
}
