use bevy::asset::LoadState;
use bevy::prelude::*;

/// Where a single asset request stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Pending,
    Loaded,
    Failed(String),
}

impl LoadOutcome {
    pub fn from_state(state: Option<LoadState>) -> Self {
        match state {
            Some(LoadState::Loaded) => Self::Loaded,
            Some(LoadState::Failed(err)) => Self::Failed(err.to_string()),
            _ => Self::Pending,
        }
    }

    pub fn is_settled(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

#[derive(Resource, Default, Debug, Clone, PartialEq)]
pub struct LoadingProgress {
    pub manifest_loaded: bool,
    pub models_requested: usize,
    pub models_settled: usize,
    pub models_failed: usize,
    pub clips_requested: usize,
    pub clips_settled: usize,
    pub clips_failed: usize,
    pub skybox_ready: bool,
    pub narration_ready: bool,
}

impl LoadingProgress {
    /// Share of model and clip requests that have settled, in 0..=1.
    pub fn fraction(&self) -> f32 {
        let requested = self.models_requested + self.clips_requested;
        if requested == 0 {
            return if self.manifest_loaded { 1.0 } else { 0.0 };
        }
        (self.models_settled + self.clips_settled) as f32 / requested as f32
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "manifest_loaded": self.manifest_loaded,
            "models": {
                "requested": self.models_requested,
                "settled": self.models_settled,
                "failed": self.models_failed,
            },
            "clips": {
                "requested": self.clips_requested,
                "settled": self.clips_settled,
                "failed": self.clips_failed,
            },
            "skybox_ready": self.skybox_ready,
            "narration_ready": self.narration_ready,
            "fraction": self.fraction(),
        })
    }
}
