//! Error types for scene loading and lookup

use thiserror::Error;

/// Errors that can occur while loading or querying a scene
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("failed to read scene file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse scene TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize scene TOML: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("unknown shape id '{0}'")]
    UnknownShape(String),

    #[error("unknown connector id '{0}'")]
    UnknownConnector(String),

    #[error("duplicate id '{0}' in scene")]
    DuplicateId(String),
}
