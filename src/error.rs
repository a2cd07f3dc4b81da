use std::fmt;

/// Reasons a [`GameConfig`](crate::config::GameConfig) is rejected at startup.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    NonPositive { field: &'static str, value: f32 },
    EntityTooWide { entity: &'static str, width: f32, canvas: f32 },
    ZeroMaxBullets,
    ZeroInterval { field: &'static str },
    Io { path: String, message: String },
    Parse { path: String, message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositive { field, value } => {
                write!(f, "{field} must be positive (got {value})")
            }
            Self::EntityTooWide {
                entity,
                width,
                canvas,
            } => write!(
                f,
                "{entity} width {width} does not fit the canvas width {canvas}"
            ),
            Self::ZeroMaxBullets => write!(f, "maxBullets must be at least 1"),
            Self::ZeroInterval { field } => write!(f, "{field} must be at least 1"),
            Self::Io { path, message } => write!(f, "cannot read {path}: {message}"),
            Self::Parse { path, message } => write!(f, "invalid config {path}: {message}"),
        }
    }
}

impl std::error::Error for ConfigError {}
