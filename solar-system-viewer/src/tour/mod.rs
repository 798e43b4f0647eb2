//! Guided tour sequencer.
//!
//! A tour is planned once from the bodies present in the scene, then played
//! back step by step by a generic runner. Steps are plain data, so the whole
//! itinerary can be inspected before anything moves.

/// Waypoint capture and the ordered step list.
pub mod plan;

/// Time-driven step runner with carry-over between steps.
pub mod runner;

/// Idle/Running tour state shared with the camera, indicator and host bridge.
pub mod state;

/// Bevy systems that start, advance and finish a tour.
pub mod systems;

/// Keyboard, touch, controller and host triggers.
pub mod trigger;
