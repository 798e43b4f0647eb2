//! Scene configuration assets.
//!
//! The scene manifest is a JSON asset listing every body, the narration
//! tracks and the skybox faces. A built-in catalog stands in when the
//! manifest cannot be loaded.

/// Per-body descriptors with orbit and narration parameters.
pub mod body_descriptor;

/// Scene manifest asset, validation and the built-in fallback.
pub mod system_manifest;
