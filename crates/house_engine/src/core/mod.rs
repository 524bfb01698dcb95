//! # Core Module
//!
//! Shared configuration types used by scene setup, the camera and the app.

pub mod config;

pub use config::{
    AssetConfig,
    CameraConfig,
    Config,
    ConfigError,
    EngineConfig,
    LoadPolicy,
    ViewerConfig,
};
