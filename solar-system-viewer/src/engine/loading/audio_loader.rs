use crate::engine::assets::system_manifest::SystemManifest;
use crate::engine::audio::narration::{Narration, NarrationClip, clip_length_secs};
use crate::engine::loading::progress::{LoadOutcome, LoadingProgress};
use bevy::prelude::*;
use constants::tour::{INTRO_CLIP_KEY, OUTRO_CLIP_KEY};

#[derive(Debug, Clone)]
pub struct PendingClip {
    pub key: String,
    pub handle: Handle<AudioSource>,
    pub duration_secs: Option<f32>,
}

/// Narration requests, registered together once every one has settled.
#[derive(Resource, Default)]
pub struct PendingClips {
    entries: Vec<PendingClip>,
}

impl PendingClips {
    pub fn new(entries: Vec<PendingClip>) -> Self {
        Self { entries }
    }

    /// Request the intro, one clip per body, and the outro.
    pub fn request(asset_server: &AssetServer, manifest: &SystemManifest) -> Self {
        let mut entries = vec![PendingClip {
            key: INTRO_CLIP_KEY.to_string(),
            handle: asset_server.load(&manifest.intro.path),
            duration_secs: manifest.intro.narration_secs,
        }];
        entries.extend(manifest.bodies.iter().map(|body| PendingClip {
            key: body.name.clone(),
            handle: asset_server.load(&body.audio_path),
            duration_secs: body.narration_secs,
        }));
        entries.push(PendingClip {
            key: OUTRO_CLIP_KEY.to_string(),
            handle: asset_server.load(&manifest.outro.path),
            duration_secs: manifest.outro.narration_secs,
        });
        Self::new(entries)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Clips that loaded, once no request is still pending.
pub struct SettledClips {
    pub loaded: Vec<(String, NarrationClip)>,
    pub failed: Vec<(String, String)>,
}

/// Count settled requests and, when all have settled, split them into loaded and failed.
///
/// A loaded clip lasts as long as its manifest hint says, or else as long as `measure` reports.
pub fn settle_clips(
    pending: &PendingClips,
    outcome_of: impl Fn(&Handle<AudioSource>) -> LoadOutcome,
    measure: impl Fn(&Handle<AudioSource>) -> Option<f32>,
) -> (usize, Option<SettledClips>) {
    let outcomes: Vec<LoadOutcome> = pending
        .entries
        .iter()
        .map(|clip| outcome_of(&clip.handle))
        .collect();
    let settled = outcomes.iter().filter(|outcome| outcome.is_settled()).count();
    if settled < outcomes.len() {
        return (settled, None);
    }

    let mut clips = SettledClips {
        loaded: Vec::new(),
        failed: Vec::new(),
    };
    for (clip, outcome) in pending.entries.iter().zip(outcomes) {
        match outcome {
            LoadOutcome::Failed(err) => clips.failed.push((clip.key.clone(), err)),
            _ => clips.loaded.push((
                clip.key.clone(),
                NarrationClip {
                    handle: clip.handle.clone(),
                    duration_secs: clip.duration_secs.or_else(|| measure(&clip.handle)),
                },
            )),
        }
    }
    (settled, Some(clips))
}

pub fn register_loaded_clips(
    pending: Res<PendingClips>,
    mut loading_progress: ResMut<LoadingProgress>,
    mut narration: ResMut<Narration>,
    asset_server: Res<AssetServer>,
    sources: Res<Assets<AudioSource>>,
) {
    if loading_progress.narration_ready || !loading_progress.manifest_loaded {
        return;
    }

    let (settled, clips) = settle_clips(
        &pending,
        |handle| LoadOutcome::from_state(asset_server.get_load_state(handle)),
        |handle| sources.get(handle).and_then(clip_length_secs),
    );
    if loading_progress.clips_settled != settled {
        loading_progress.clips_settled = settled;
    }
    let Some(clips) = clips else {
        return;
    };

    for (key, err) in &clips.failed {
        error!("Error loading narration {}: {}", key, err);
    }
    loading_progress.clips_failed = clips.failed.len();
    for (key, clip) in clips.loaded {
        debug!("Narration {} lasts {:?}s", key, clip.duration_secs);
        narration.register(key, clip);
    }
    loading_progress.narration_ready = true;
    println!(
        "✓ Narration ready: {} clips, {} failed",
        narration.clip_count(),
        loading_progress.clips_failed
    );
}
