use bevy::prelude::*;
use constants::bodies::BodyInfo;
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_4;

/// Circular orbit in the scene group's XZ plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitParams {
    pub radius: f32,
    /// Radians per second.
    pub rate: f32,
}

impl OrbitParams {
    /// Position on the orbit after `elapsed_secs` of app time.
    pub fn position_at(&self, elapsed_secs: f32) -> Vec3 {
        let angle = elapsed_secs * self.rate;
        Vec3::new(
            self.radius * angle.cos(),
            0.0,
            self.radius * angle.sin(),
        )
    }
}

/// Immutable description of one body as read from the manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyDescriptor {
    pub name: String,
    pub model_path: String,
    pub audio_path: String,
    /// Narration length in seconds. Wait steps fall back to the default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub narration_secs: Option<f32>,
    /// Self-rotation in radians per second.
    pub rotation_rate: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orbit: Option<OrbitParams>,
    #[serde(default)]
    pub approach_offset: f32,
    #[serde(default)]
    pub info: String,
}

impl BodyDescriptor {
    /// Bodies without an orbit (the Sun) are never suspended or restored by a tour.
    pub fn is_star(&self) -> bool {
        self.orbit.is_none()
    }

    /// Placement used when the body is first spawned, spread a quarter turn apart by load order.
    pub fn initial_position(&self, load_index: usize) -> Vec3 {
        match self.orbit {
            Some(orbit) => {
                let angle = (load_index as f32 - 1.0) * FRAC_PI_4;
                Vec3::new(orbit.radius * angle.cos(), 0.0, orbit.radius * angle.sin())
            }
            None => Vec3::ZERO,
        }
    }
}

impl From<&BodyInfo> for BodyDescriptor {
    fn from(info: &BodyInfo) -> Self {
        Self {
            name: info.name.to_string(),
            model_path: info.model_path.to_string(),
            audio_path: info.audio_path.to_string(),
            narration_secs: None,
            rotation_rate: info.rotation_rate,
            orbit: info.orbit.map(|o| OrbitParams {
                radius: o.radius,
                rate: o.rate,
            }),
            approach_offset: info.approach_offset,
            info: info.info.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn earth() -> BodyDescriptor {
        BodyDescriptor::from(constants::bodies::get_body_info("Earth").unwrap())
    }

    #[test]
    fn orbit_position_follows_angle_over_time() {
        let orbit = OrbitParams {
            radius: 10.0,
            rate: 2.0,
        };
        for t in [0.0_f32, 0.25, 1.0, 3.7] {
            let p = orbit.position_at(t);
            assert_relative_eq!(p.x, 10.0 * (t * 2.0).cos(), epsilon = 1e-5);
            assert_relative_eq!(p.y, 0.0);
            assert_relative_eq!(p.z, 10.0 * (t * 2.0).sin(), epsilon = 1e-5);
        }
    }

    #[test]
    fn star_spawns_at_origin() {
        let sun = BodyDescriptor::from(constants::bodies::get_body_info("Sun").unwrap());
        assert!(sun.is_star());
        assert_eq!(sun.initial_position(0), Vec3::ZERO);
    }

    #[test]
    fn planets_are_spread_by_load_index() {
        let body = earth();
        let first = body.initial_position(1);
        assert_relative_eq!(first.x, 10.0, epsilon = 1e-5);
        assert_relative_eq!(first.z, 0.0, epsilon = 1e-5);

        let third = body.initial_position(3);
        assert_relative_eq!(third.x, 0.0, epsilon = 1e-4);
        assert_relative_eq!(third.z, 10.0, epsilon = 1e-4);
    }

    #[test]
    fn descriptor_parses_without_optional_fields() {
        let json = r#"{
            "name": "Pluto",
            "model_path": "models/pluto.glb",
            "audio_path": "audio/pluto.mp3",
            "rotation_rate": 0.1
        }"#;
        let body: BodyDescriptor = serde_json::from_str(json).unwrap();
        assert!(body.is_star());
        assert_eq!(body.narration_secs, None);
        assert_eq!(body.approach_offset, 0.0);
    }
}
