//! # Viewer Configuration
//!
//! All tunables of the viewer in one serializable tree: engine behavior,
//! camera movement and avatar size, and where assets live on disk.
//!
//! Every section implements `Default`, and missing fields in a config file
//! fall back to those defaults, so a file only needs to name what it changes.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use crate::config::{Config, ConfigError};
use crate::foundation::math::{constants, Mat4, Mat4Ext, Vec3};

/// What scene setup does when one object fails to load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LoadPolicy {
    /// Fail the whole scene on the first object error
    #[default]
    Abort,
    /// Log the error and leave the object out of the scene
    SkipObject,
}

/// # Engine Configuration
///
/// Logging and simulation stepping.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Default log filter, overridden by `RUST_LOG`
    pub log_level: String,
    /// Simulation steps per second
    pub step_rate_hz: f32,
    /// Object load failure policy
    pub load_policy: LoadPolicy,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            step_rate_hz: 60.0,
            load_policy: LoadPolicy::Abort,
        }
    }

    /// Set the object load failure policy
    pub fn with_load_policy(mut self, policy: LoadPolicy) -> Self {
        self.load_policy = policy;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Camera Configuration
///
/// Movement speeds, avatar collision volume, start pose and projection.
/// Distances are in scene units (millimeters for the bundled house).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Distance covered by one forward/backward step
    pub move_step: f32,
    /// Yaw applied by one held yaw-left/yaw-right step, in radians
    pub rotate_step: f32,
    /// Radians of look rotation per pointer pixel
    pub pointer_sensitivity: f32,
    /// Symmetric pitch clamp, in radians
    pub pitch_limit: f32,
    /// Horizontal extent of the avatar box (X and Z)
    pub avatar_width: f32,
    /// Vertical extent of the avatar box
    pub avatar_height: f32,
    /// Initial camera position
    pub start_position: Vec3,
    /// Initial view direction
    pub start_forward: Vec3,
    /// Vertical field of view, in radians
    pub fov_y: f32,
    /// Near clipping plane distance
    pub near: f32,
    /// Far clipping plane distance
    pub far: f32,
}

impl CameraConfig {
    /// Check ranges the controller relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.move_step <= 0.0 || self.rotate_step <= 0.0 {
            return Err(ConfigError::Invalid("camera steps must be positive".to_string()));
        }
        if self.avatar_width <= 0.0 || self.avatar_height <= 0.0 {
            return Err(ConfigError::Invalid("avatar extents must be positive".to_string()));
        }
        if self.pitch_limit < 0.0 {
            return Err(ConfigError::Invalid("pitch limit cannot be negative".to_string()));
        }
        if self.start_forward.norm_squared() == 0.0 {
            return Err(ConfigError::Invalid("start forward direction is zero".to_string()));
        }
        if self.near <= 0.0 || self.near >= self.far {
            return Err(ConfigError::Invalid(format!(
                "clip planes must satisfy 0 < near < far (near {}, far {})",
                self.near, self.far
            )));
        }
        Ok(())
    }

    /// Perspective projection for a viewport of the given aspect ratio
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective(self.fov_y, aspect, self.near, self.far)
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            move_step: 100.0,
            rotate_step: 0.02,
            pointer_sensitivity: 0.01,
            pitch_limit: 1.0,
            avatar_width: 200.0,
            avatar_height: 2000.0,
            start_position: Vec3::zeros(),
            start_forward: Vec3::new(0.0, 0.0, -1.0),
            fov_y: constants::THIRD_PI,
            near: 1.0,
            far: 20000.0,
        }
    }
}

/// # Asset Configuration
///
/// Locations of scene content. Geometry, material and texture paths named
/// inside files are resolved relative to `assets_dir`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Base directory for assets
    pub assets_dir: PathBuf,
    /// Scene description file, relative to `assets_dir`
    pub scene_file: PathBuf,
    /// Static obstacle file, relative to `assets_dir`
    pub obstacle_file: Option<PathBuf>,
}

impl AssetConfig {
    /// Create a new asset configuration
    pub fn new() -> Self {
        Self {
            assets_dir: PathBuf::from("assets"),
            scene_file: PathBuf::from("scene.ron"),
            obstacle_file: None,
        }
    }

    /// Set assets directory
    pub fn with_assets_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.assets_dir = dir.into();
        self
    }

    /// Set the scene description file
    pub fn with_scene_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.scene_file = file.into();
        self
    }

    /// Set the static obstacle file
    pub fn with_obstacle_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.obstacle_file = Some(file.into());
        self
    }

    /// Full path of the scene description
    pub fn scene_path(&self) -> PathBuf {
        self.assets_dir.join(&self.scene_file)
    }

    /// Full path of the obstacle file, if one is configured
    pub fn obstacle_path(&self) -> Option<PathBuf> {
        self.obstacle_file.as_ref().map(|file| self.assets_dir.join(file))
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Complete Viewer Configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Engine core configuration
    pub engine: EngineConfig,
    /// Camera controller configuration
    pub camera: CameraConfig,
    /// Asset locations
    pub assets: AssetConfig,
}

impl ViewerConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.engine.step_rate_hz <= 0.0 {
            return Err(ConfigError::Invalid("step rate must be positive".to_string()));
        }
        self.camera.validate()
    }
}

impl Config for ViewerConfig {}
