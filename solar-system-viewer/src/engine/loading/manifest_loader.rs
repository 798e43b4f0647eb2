use crate::engine::assets::system_manifest::SystemManifest;
use crate::engine::loading::audio_loader::PendingClips;
use crate::engine::loading::model_loader::PendingModels;
use crate::engine::loading::progress::{LoadOutcome, LoadingProgress};
use crate::engine::scene::skybox::SkyboxLoader;
use bevy::prelude::*;
use constants::paths::MANIFEST_PATH;

#[derive(Resource, Default)]
pub struct ManifestLoader {
    handle: Option<Handle<SystemManifest>>,
}

// Start the loading process
pub fn start_loading(mut manifest_loader: ResMut<ManifestLoader>, asset_server: Res<AssetServer>) {
    manifest_loader.handle = Some(asset_server.load(MANIFEST_PATH));
}

/// Pick the manifest to run with: the loaded one if it validates, otherwise the built-in catalog.
/// `None` while the asset is still loading.
pub fn resolve_manifest(
    loaded: Option<&SystemManifest>,
    outcome: &LoadOutcome,
) -> Option<SystemManifest> {
    if let Some(manifest) = loaded {
        return match manifest.validate() {
            Ok(()) => Some(manifest.clone()),
            Err(err) => {
                warn!("Manifest rejected ({}), using built-in catalog", err);
                Some(SystemManifest::builtin())
            }
        };
    }

    match outcome {
        LoadOutcome::Failed(err) => {
            warn!("Manifest unavailable ({}), using built-in catalog", err);
            Some(SystemManifest::builtin())
        }
        _ => None,
    }
}

// Read the manifest and request every scene asset it lists
pub fn load_manifest_system(
    mut loading_progress: ResMut<LoadingProgress>,
    manifest_loader: Res<ManifestLoader>,
    manifests: Res<Assets<SystemManifest>>,
    asset_server: Res<AssetServer>,
    mut commands: Commands,
) {
    if loading_progress.manifest_loaded {
        return;
    }
    let Some(handle) = &manifest_loader.handle else {
        return;
    };

    let outcome = LoadOutcome::from_state(asset_server.get_load_state(handle));
    let Some(manifest) = resolve_manifest(manifests.get(handle), &outcome) else {
        return;
    };

    println!("✓ Manifest loaded with {} bodies", manifest.body_count());

    let models = PendingModels::request(&asset_server, &manifest.bodies);
    let clips = PendingClips::request(&asset_server, &manifest);
    loading_progress.models_requested = models.len();
    loading_progress.clips_requested = clips.len();
    loading_progress.manifest_loaded = true;

    commands.insert_resource(models);
    commands.insert_resource(clips);
    commands.insert_resource(SkyboxLoader::request(&asset_server, &manifest.skybox));
    commands.insert_resource(manifest);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn still_loading_resolves_to_nothing() {
        assert_eq!(resolve_manifest(None, &LoadOutcome::Pending), None);
    }

    #[test]
    fn failed_load_falls_back_to_builtin() {
        let resolved = resolve_manifest(None, &LoadOutcome::Failed("404".into()));
        assert_eq!(resolved, Some(SystemManifest::builtin()));
    }

    #[test]
    fn invalid_manifest_falls_back_to_builtin() {
        let mut broken = SystemManifest::builtin();
        broken.bodies.clear();
        let resolved = resolve_manifest(Some(&broken), &LoadOutcome::Loaded);
        assert_eq!(resolved, Some(SystemManifest::builtin()));
    }

    #[test]
    fn valid_manifest_is_used_as_is() {
        let mut custom = SystemManifest::builtin();
        custom.bodies.truncate(3);
        let resolved = resolve_manifest(Some(&custom), &LoadOutcome::Loaded);
        assert_eq!(resolved.map(|m| m.body_count()), Some(3));
    }
}
