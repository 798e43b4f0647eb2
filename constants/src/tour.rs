/// Duration of every repositioning step.
pub const MOVE_DURATION_SECS: f32 = 3.0;

/// Used for any wait step whose clip is unavailable.
pub const DEFAULT_CLIP_SECS: f32 = 2.0;

pub const INTRO_CLIP_KEY: &str = "intro";
pub const OUTRO_CLIP_KEY: &str = "outro";
