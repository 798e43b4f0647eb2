//! Shared compile-time configuration for the solar system viewer.

pub mod bodies;
pub mod paths;
pub mod render_settings;
pub mod tour;
