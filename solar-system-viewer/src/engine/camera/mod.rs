//! Viewer camera for flat-mode navigation.
//!
//! Pointer-lock style look and fly controls, active only while manual control
//! is enabled and no immersive session owns the viewer pose.

/// Viewer camera spawning, pointer lock and the fly controller.
pub mod fly_camera;
