//! Solar system engine: scene, camera, audio, loading and immersive presentation.

/// Manifest and body descriptor asset types.
pub mod assets;

/// Exclusive narration playback.
pub mod audio;

/// Flat-mode fly camera with pointer lock.
pub mod camera;

/// App construction, state machine and window configuration.
pub mod core;

/// Manifest, model and narration loading with progress tracking.
pub mod loading;

/// Scene group, bodies, lighting, skybox and tour indicator.
pub mod scene;

/// FPS tracking and host page status notifications.
pub mod systems;

/// Presentation mode and headset session transitions.
pub mod xr;
