//! Immersive presentation.
//!
//! The host page owns the headset session and forwards its start, end and
//! controller select notifications. While immersive, the viewer pose belongs
//! to the device, so the tour moves the scene group instead of the camera.

/// Presentation mode, session events and the deferred session change.
pub mod session;
