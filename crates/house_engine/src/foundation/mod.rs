//! Foundation module - Core utilities and types
//!
//! - Math types and matrix builders
//! - Axis-aligned bounding boxes
//! - Logging setup

pub mod bounds;
pub mod logging;
pub mod math;

pub use bounds::Aabb;
