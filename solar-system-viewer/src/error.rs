use thiserror::Error;

/// Reasons a tour cannot be planned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TourError {
    #[error("no bodies are loaded in the scene, nothing to visit")]
    NothingLoaded,
}

/// Reasons the six skybox faces cannot be combined into a cube map.
#[derive(Debug, Error, PartialEq)]
pub enum SkyboxError {
    #[error("expected 6 skybox faces, got {0}")]
    FaceCount(usize),
    #[error("skybox face {index} is {width}x{height}, expected {expected_width}x{expected_height}")]
    SizeMismatch {
        index: usize,
        width: u32,
        height: u32,
        expected_width: u32,
        expected_height: u32,
    },
    #[error("skybox face {index} has format {found}, expected {expected}")]
    FormatMismatch {
        index: usize,
        found: String,
        expected: String,
    },
    #[error("skybox face {0} has no pixel data")]
    MissingData(usize),
}

/// Problems found while validating a scene manifest.
#[derive(Debug, Error, PartialEq)]
pub enum ManifestError {
    #[error("manifest lists no bodies")]
    Empty,
    #[error("body name '{0}' appears more than once")]
    DuplicateName(String),
    #[error("body '{name}' has an invalid orbit radius {radius}")]
    InvalidOrbitRadius { name: String, radius: f32 },
    #[error("body '{0}' has a blank name or asset path")]
    BlankField(String),
}
