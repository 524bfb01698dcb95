//! Camera system
//!
//! Pose, held movement intents, and the walking controller that moves the
//! pose against the collision map.

pub mod controller;
pub mod state;

pub use controller::{CameraController, StepReport};
pub use state::{CameraState, Directions};
