//! # House Engine
//!
//! Core of a first-person walkthrough of a furnished house.
//!
//! ## Features
//!
//! - **Asset Parsing**: `.obj` geometry and `.mtl` materials into per-material triangle batches
//! - **Object Placement**: fit independently modeled objects into world boxes
//! - **Collision**: axis-aligned obstacle map with face-touching allowed
//! - **Camera**: held-key walking and pointer look with collision rejection
//! - **Configuration**: TOML or RON viewer config and scene descriptions
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use house_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ViewerConfig::load_from_file("assets/viewer.toml")?;
//!     let mut viewer = Viewer::new(config)?;
//!
//!     viewer.press(Directions::FORWARD);
//!     viewer.advance(std::time::Duration::from_millis(500));
//!
//!     let frame = viewer.render_view(16.0 / 9.0);
//!     for object in &frame.objects {
//!         for (batch, material) in object.object.drawables() {
//!             println!("{}: {} triangles", material.name, batch.triangle_count());
//!         }
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod core;

pub mod foundation;
pub mod config;
pub mod assets;
pub mod scene;
pub mod physics;
pub mod camera;

mod viewer;

pub use viewer::{ObjectView, RenderView, Viewer, ViewerError, MAX_STEPS_PER_ADVANCE};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        Viewer, ViewerError, RenderView, ObjectView,
        foundation::{
            Aabb,
            math::{Vec2, Vec3, Mat4},
        },
        config::Config,
        core::config::{ViewerConfig, EngineConfig, CameraConfig, AssetConfig, LoadPolicy},
        assets::{AssetError, Material, MaterialTable, TriangleBatch, ObjLoader, MtlParser},
        scene::{SceneObject, SceneDescription, SceneError},
        physics::CollisionMap,
        camera::{CameraController, Directions, StepReport},
    };
}
