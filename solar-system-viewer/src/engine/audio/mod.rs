//! Narration playback. At most one narration clip plays at any time.

/// Clip registry and exclusive player.
pub mod narration;
