use bevy::audio::{Decodable, Source, Volume};
use bevy::prelude::*;
use constants::render_settings::NARRATION_VOLUME;
use constants::tour::DEFAULT_CLIP_SECS;
use std::collections::HashMap;

/// A playable clip and its length, hinted or measured.
#[derive(Debug, Clone)]
pub struct NarrationClip {
    pub handle: Handle<AudioSource>,
    pub duration_secs: Option<f32>,
}

/// Length of a decoded clip in seconds. Counts samples when the container does not say.
pub fn clip_length_secs(source: &AudioSource) -> Option<f32> {
    let decoder = source.decoder();
    if let Some(total) = decoder.total_duration() {
        return Some(total.as_secs_f32());
    }

    let samples_per_sec = decoder.sample_rate() as f32 * f32::from(decoder.channels());
    if samples_per_sec <= 0.0 {
        return None;
    }
    let samples = decoder.count();
    (samples > 0).then(|| samples as f32 / samples_per_sec)
}

/// Marks the entity carrying the narration currently being played.
#[derive(Component, Debug)]
pub struct NarrationVoice {
    pub key: String,
}

/// Registry of loaded narration clips plus the single active voice.
#[derive(Resource, Default)]
pub struct Narration {
    clips: HashMap<String, NarrationClip>,
    playing: Option<(String, Entity)>,
}

impl Narration {
    pub fn register(&mut self, key: impl Into<String>, clip: NarrationClip) {
        self.clips.insert(key.into(), clip);
    }

    pub fn clip_count(&self) -> usize {
        self.clips.len()
    }

    /// Length a wait step should last for `key`. Unavailable or unmeasured clips use the default.
    pub fn duration_secs(&self, key: &str) -> f32 {
        self.clips
            .get(key)
            .and_then(|clip| clip.duration_secs)
            .filter(|secs| *secs > 0.0)
            .unwrap_or(DEFAULT_CLIP_SECS)
    }

    /// Stop whatever is playing, then start `key` if it is available.
    /// Returns whether a clip was started.
    pub fn play(&mut self, commands: &mut Commands, key: &str) -> bool {
        self.stop(commands);

        let Some(clip) = self.clips.get(key) else {
            debug!("Narration '{}' unavailable, skipping playback", key);
            return false;
        };

        let entity = commands
            .spawn((
                AudioPlayer::<AudioSource>(clip.handle.clone()),
                PlaybackSettings::DESPAWN.with_volume(Volume::Linear(NARRATION_VOLUME)),
                NarrationVoice {
                    key: key.to_string(),
                },
            ))
            .id();
        self.playing = Some((key.to_string(), entity));
        true
    }

    pub fn stop(&mut self, commands: &mut Commands) {
        if let Some((_, entity)) = self.playing.take() {
            commands.entity(entity).try_despawn();
        }
    }

    #[cfg(test)]
    pub fn playing(&self) -> Option<&str> {
        self.playing.as_ref().map(|(key, _)| key.as_str())
    }
}

/// Clears the active voice once its entity despawns at the end of playback.
pub fn forget_finished_narration(mut narration: ResMut<Narration>, voices: Query<&NarrationVoice>) {
    let finished = narration
        .playing
        .as_ref()
        .is_some_and(|(_, entity)| voices.get(*entity).is_err());

    if finished {
        narration.playing = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::sync::Arc;

    /// 16-bit PCM WAV holding `frames` silent frames.
    fn silent_wav(sample_rate: u32, channels: u16, frames: u32) -> AudioSource {
        let data_len = frames * u32::from(channels) * 2;
        let mut bytes = Vec::with_capacity(44 + data_len as usize);
        bytes.extend_from_slice(b"RIFF");
        bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
        bytes.extend_from_slice(b"WAVEfmt ");
        bytes.extend_from_slice(&16u32.to_le_bytes());
        bytes.extend_from_slice(&1u16.to_le_bytes());
        bytes.extend_from_slice(&channels.to_le_bytes());
        bytes.extend_from_slice(&sample_rate.to_le_bytes());
        bytes.extend_from_slice(&(sample_rate * u32::from(channels) * 2).to_le_bytes());
        bytes.extend_from_slice(&(channels * 2).to_le_bytes());
        bytes.extend_from_slice(&16u16.to_le_bytes());
        bytes.extend_from_slice(b"data");
        bytes.extend_from_slice(&data_len.to_le_bytes());
        bytes.resize(44 + data_len as usize, 0);
        AudioSource {
            bytes: Arc::from(bytes),
        }
    }

    #[test]
    fn decoded_clip_length_matches_the_audio() {
        assert_relative_eq!(
            clip_length_secs(&silent_wav(8_000, 1, 20_000)).unwrap(),
            2.5,
            epsilon = 1e-3
        );
        assert_relative_eq!(
            clip_length_secs(&silent_wav(22_050, 2, 66_150)).unwrap(),
            3.0,
            epsilon = 1e-3
        );
    }

    #[test]
    fn measured_clip_outlasts_the_default_wait() {
        let source = silent_wav(8_000, 1, 96_000);
        let mut narration = Narration::default();
        narration.register(
            "Earth",
            NarrationClip {
                handle: Handle::default(),
                duration_secs: clip_length_secs(&source),
            },
        );

        let wait = narration.duration_secs("Earth");
        assert_relative_eq!(wait, 12.0, epsilon = 1e-3);
        assert!(wait > DEFAULT_CLIP_SECS);
    }

    fn clip(secs: Option<f32>) -> NarrationClip {
        NarrationClip {
            handle: Handle::default(),
            duration_secs: secs,
        }
    }

    fn voices(world: &mut World) -> Vec<String> {
        world
            .query::<&NarrationVoice>()
            .iter(world)
            .map(|voice| voice.key.clone())
            .collect()
    }

    #[test]
    fn missing_or_unmeasured_clips_use_default_duration() {
        let mut narration = Narration::default();
        narration.register("Earth", clip(Some(12.5)));
        narration.register("Mars", clip(None));

        assert_eq!(narration.duration_secs("Earth"), 12.5);
        assert_eq!(narration.duration_secs("Mars"), DEFAULT_CLIP_SECS);
        assert_eq!(narration.duration_secs("Pluto"), DEFAULT_CLIP_SECS);
    }

    #[test]
    fn starting_a_clip_stops_the_previous_one() {
        let mut world = World::new();
        let mut narration = Narration::default();
        narration.register("intro", clip(None));
        narration.register("Earth", clip(None));

        assert!(narration.play(&mut world.commands(), "intro"));
        world.flush();
        assert_eq!(voices(&mut world), vec!["intro".to_string()]);

        assert!(narration.play(&mut world.commands(), "Earth"));
        world.flush();
        assert_eq!(voices(&mut world), vec!["Earth".to_string()]);
        assert_eq!(narration.playing(), Some("Earth"));
    }

    #[test]
    fn playing_an_unavailable_clip_still_silences_the_current_one() {
        let mut world = World::new();
        let mut narration = Narration::default();
        narration.register("intro", clip(None));

        narration.play(&mut world.commands(), "intro");
        world.flush();
        assert!(!narration.play(&mut world.commands(), "Pluto"));
        world.flush();

        assert!(voices(&mut world).is_empty());
        assert_eq!(narration.playing(), None);
    }
}
