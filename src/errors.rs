//! Errors

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TracerError>;

#[derive(Debug, Error)]
pub enum TracerError {
    #[error("image width must be at least 1 pixel")]
    ZeroImageWidth,

    #[error("aspect ratio must be a positive finite number, got {0}")]
    InvalidAspectRatio(f64),

    #[error("samples per pixel must be at least 1")]
    ZeroSamples,

    #[error("vertical field of view must lie in (0, 180) degrees, got {0}")]
    InvalidFieldOfView(f64),

    #[error("focus distance must be a positive finite number, got {0}")]
    InvalidFocusDistance(f64),

    #[error("{0} has a non-finite component")]
    NonFiniteVector(&'static str),

    #[error("look-from and look-at coincide, the view direction is undefined")]
    DegenerateViewDirection,

    #[error("up vector is parallel to the view direction")]
    DegenerateUpVector,

    #[error("unknown material `{0}`")]
    UnknownMaterial(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse scene: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to encode image: {0}")]
    Image(#[from] image::ImageError),
}
