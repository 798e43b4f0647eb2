use crate::engine::assets::body_descriptor::BodyDescriptor;
use crate::engine::loading::progress::{LoadOutcome, LoadingProgress};
use crate::engine::scene::bodies::{SceneGroup, spawn_body};
use bevy::gltf::{Gltf, GltfAssetLabel};
use bevy::prelude::*;

struct PendingModel {
    descriptor: BodyDescriptor,
    load_index: usize,
    gltf: Handle<Gltf>,
    scene: Handle<Scene>,
}

/// glTF requests not yet loaded or failed. Order within is manifest order.
#[derive(Resource, Default)]
pub struct PendingModels {
    entries: Vec<PendingModel>,
}

impl PendingModels {
    pub fn request(asset_server: &AssetServer, bodies: &[BodyDescriptor]) -> Self {
        let entries = bodies
            .iter()
            .enumerate()
            .map(|(load_index, descriptor)| PendingModel {
                descriptor: descriptor.clone(),
                load_index,
                gltf: asset_server.load(&descriptor.model_path),
                scene: asset_server
                    .load(GltfAssetLabel::Scene(0).from_asset(descriptor.model_path.clone())),
            })
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Spawn each body the frame its model finishes. Failed models stay absent for the session.
pub fn spawn_loaded_models(
    mut pending: ResMut<PendingModels>,
    mut loading_progress: ResMut<LoadingProgress>,
    asset_server: Res<AssetServer>,
    mut commands: Commands,
    group: Query<Entity, With<SceneGroup>>,
) {
    if pending.is_empty() {
        return;
    }
    let Ok(group) = group.single() else {
        return;
    };

    pending.entries.retain(|model| {
        match LoadOutcome::from_state(asset_server.get_load_state(&model.gltf)) {
            LoadOutcome::Pending => return true,
            LoadOutcome::Loaded => {
                spawn_body(
                    &mut commands,
                    group,
                    &model.descriptor,
                    model.load_index,
                    model.scene.clone(),
                );
            }
            LoadOutcome::Failed(err) => {
                error!("Error loading model {}: {}", model.descriptor.name, err);
                loading_progress.models_failed += 1;
            }
        }
        loading_progress.models_settled += 1;
        false
    });

    if pending.is_empty() {
        println!(
            "✓ Models settled ({} failed)",
            loading_progress.models_failed
        );
    }
}
