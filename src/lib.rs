//! Plane Game - dodge and shoot falling obstacles.
//!
//! Core modules:
//! - `entities`: plain session data
//! - `compute`: pure per-frame simulation and input handling
//! - `effects`: sound/text commands the simulation emits
//! - `render`: drawing contract for hosts
//! - `config`: tuning and startup validation

pub mod compute;
pub mod config;
pub mod effects;
pub mod entities;
pub mod error;
pub mod render;

pub use config::GameConfig;
pub use error::ConfigError;
