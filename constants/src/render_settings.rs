use bevy::color::Color;
use bevy::math::Vec3;

pub const BACKGROUND_COLOUR: Color = Color::srgb(0.004, 0.043, 0.133);

pub const CAMERA_START_POSITION: Vec3 = Vec3::new(28.20, 16.80, 9.61);
/// Euler XYZ, radians.
pub const CAMERA_START_ROTATION: Vec3 = Vec3::new(-1.08, 0.75, 0.90);
pub const CAMERA_FOV_DEGREES: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;

pub const AMBIENT_BRIGHTNESS: f32 = 400.0;
pub const SUN_LIGHT_COLOUR: Color = Color::srgb(1.0, 0.973, 0.882);
pub const SUN_LIGHT_INTENSITY: f32 = 8_000_000.0;
pub const SUN_LIGHT_RANGE: f32 = 5000.0;

/// Indicator cone hangs just below and in front of the viewer.
pub const INDICATOR_OFFSET: Vec3 = Vec3::new(0.0, -0.1, -0.5);
pub const INDICATOR_RADIUS: f32 = 0.05;
pub const INDICATOR_HEIGHT: f32 = 0.2;
pub const INDICATOR_COLOUR: Color = Color::srgb(1.0, 0.0, 0.0);

/// Scene group lift applied while an immersive session is active.
pub const IMMERSIVE_GROUP_OFFSET: Vec3 = Vec3::new(0.0, 5.0, 0.0);

/// Flat-mode fly speed in units per second.
pub const MOVE_SPEED: f32 = 6.0;
/// Radians of rotation per pixel of pointer motion.
pub const LOOK_SENSITIVITY: f32 = 0.002;

pub const NARRATION_VOLUME: f32 = 0.5;

pub const LOG_FILTER: &str = "info,wgpu=error,naga=warn,bevy_render=warn";
