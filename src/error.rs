use thiserror::Error;

/// Errors raised while loading a scene description.
///
/// Nothing in the per-frame path can fail; these only come out of
/// configuration parsing and validation.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("reservoir '{0}' is defined more than once")]
    DuplicateReservoir(String),

    #[error("edge {index} references unknown reservoir '{name}'")]
    UnknownReservoir { index: usize, name: String },

    #[error("enclosure '{0}' has inverted bounds")]
    InvalidBounds(String),

    #[error("scenery '{0}' is a model but has no path")]
    MissingModelPath(String),

    #[error("arrow resolution must be at least 1")]
    InvalidResolution,
}

pub type Result<T> = std::result::Result<T, SceneError>;
