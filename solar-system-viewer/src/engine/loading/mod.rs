//! Asset loading for the solar system scene.
//!
//! The manifest is read first; it then drives one model load per body, one
//! narration clip per body plus intro and outro, and the six skybox faces.
//! Every request is kept as an explicit pending handle and polled each frame.

/// Narration clip requests and the all-settled registration step.
pub mod audio_loader;

/// Manifest request, validation and fallback to the built-in catalog.
pub mod manifest_loader;

/// Per-body glTF requests, spawning each body as soon as it arrives.
pub mod model_loader;

/// Aggregate loading progress reported to the host page.
pub mod progress;
