//! Runtime diagnostics and host page status updates.

/// FPS tracking and notification systems for performance monitoring.
///
/// Sends frame rate updates to the host page via RPC and updates the native overlay.
pub mod fps_tracking;

/// Tour state and loading progress notifications for the host page.
pub mod host_status;
