//! Physics module for collision detection
//!
//! The viewer only needs one query: may the avatar box occupy a candidate
//! position. Obstacles are a flat list of axis-aligned boxes.

pub mod collision_map;

pub use collision_map::CollisionMap;
