//! Scene graph construction and per-frame scene motion.
//!
//! Every body hangs off a single scene group so immersive mode can move the
//! whole system around a stationary viewer.

/// Body components, spawning, self-rotation and orbit motion.
pub mod bodies;

/// Directional indicator that points at the current tour target in immersive mode.
pub mod indicator;

/// Ambient light and the point light at the Sun.
pub mod lighting;

/// Six-face skybox loading and cube-map assembly.
pub mod skybox;
