use crate::engine::assets::body_descriptor::BodyDescriptor;
use crate::error::ManifestError;
use bevy::prelude::*;
use constants::bodies::BODY_CATALOG;
use constants::paths::{INTRO_AUDIO_PATH, OUTRO_AUDIO_PATH, SKYBOX_FACES};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// An audio track that is not tied to a body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrationTrack {
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub narration_secs: Option<f32>,
}

impl NarrationTrack {
    fn from_path(path: &str) -> Self {
        Self {
            path: path.to_string(),
            narration_secs: None,
        }
    }
}

fn default_skybox() -> Vec<String> {
    SKYBOX_FACES.iter().map(|face| face.to_string()).collect()
}

/// Complete scene configuration as a Bevy asset. Mirrors the JSON structure exactly.
/// Body order is load order and tour order.
#[derive(Asset, Debug, Clone, PartialEq, Serialize, Deserialize, TypePath, Resource)]
pub struct SystemManifest {
    pub bodies: Vec<BodyDescriptor>,
    pub intro: NarrationTrack,
    pub outro: NarrationTrack,
    #[serde(default = "default_skybox")]
    pub skybox: Vec<String>,
}

impl SystemManifest {
    /// Catalog compiled into the binary, used when the manifest is unavailable.
    pub fn builtin() -> Self {
        Self {
            bodies: BODY_CATALOG.iter().map(BodyDescriptor::from).collect(),
            intro: NarrationTrack::from_path(INTRO_AUDIO_PATH),
            outro: NarrationTrack::from_path(OUTRO_AUDIO_PATH),
            skybox: default_skybox(),
        }
    }

    pub fn validate(&self) -> Result<(), ManifestError> {
        if self.bodies.is_empty() {
            return Err(ManifestError::Empty);
        }

        let mut seen = HashSet::new();
        for body in &self.bodies {
            if body.name.trim().is_empty() || body.model_path.trim().is_empty() {
                return Err(ManifestError::BlankField(body.name.clone()));
            }
            if !seen.insert(body.name.as_str()) {
                return Err(ManifestError::DuplicateName(body.name.clone()));
            }
            if let Some(orbit) = body.orbit {
                if !(orbit.radius > 0.0) {
                    return Err(ManifestError::InvalidOrbitRadius {
                        name: body.name.clone(),
                        radius: orbit.radius,
                    });
                }
            }
        }
        Ok(())
    }

    #[cfg(test)]
    pub fn body(&self, name: &str) -> Option<&BodyDescriptor> {
        self.bodies.iter().find(|body| body.name == name)
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }
}
