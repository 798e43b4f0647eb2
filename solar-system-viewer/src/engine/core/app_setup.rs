// Standard library and external crates
use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;
use constants::render_settings::LOG_FILTER;

// Crate engine modules
use crate::engine::assets::system_manifest::SystemManifest;
use crate::engine::audio::narration::{Narration, forget_finished_narration};
use crate::engine::camera::fly_camera::{
    PointerLock, fly_camera_controller, log_camera_pose, pointer_lock_input, spawn_viewer_camera,
    sync_cursor_grab,
};
use crate::engine::core::app_state::{AppState, transition_to_assets_loading, transition_to_running};
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::audio_loader::{PendingClips, register_loaded_clips};
use crate::engine::loading::manifest_loader::{ManifestLoader, load_manifest_system, start_loading};
use crate::engine::loading::model_loader::{PendingModels, spawn_loaded_models};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::scene::bodies::{animate_bodies, spawn_scene_group};
use crate::engine::scene::indicator::{spawn_indicator, update_indicator};
use crate::engine::scene::lighting::spawn_lighting;
use crate::engine::scene::skybox::{SkyboxLoader, assemble_skybox_when_ready};
use crate::engine::systems::fps_tracking::fps_notification_system;
use crate::engine::systems::host_status::{
    loading_progress_notification_system, tour_state_notification_system,
};
use crate::engine::xr::session::{
    DeferredSession, Presentation, XrSelectEvent, XrSessionEvent, apply_deferred_session,
    handle_session_events,
};

// Tour and host bridge
use crate::rpc::web_rpc::WebRpcPlugin;
use crate::tour::state::TourState;
use crate::tour::systems::{advance_tour, start_tour_on_trigger};
use crate::tour::trigger::{TourTriggerEvent, route_trigger_input};

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::fps_tracking::{create_native_overlays, fps_text_update_system};
#[cfg(not(target_arch = "wasm32"))]
use crate::engine::xr::session::toggle_simulated_session;

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        // Registers SystemManifest as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<SystemManifest>::new(&["json"]))
        .add_plugins(WebRpcPlugin);

    // Initialise resources early
    app.init_resource::<LoadingProgress>()
        .init_resource::<ManifestLoader>()
        .init_resource::<PendingModels>()
        .init_resource::<PendingClips>()
        .init_resource::<SkyboxLoader>()
        .init_resource::<Narration>()
        .init_resource::<TourState>()
        .init_resource::<Presentation>()
        .init_resource::<DeferredSession>()
        .init_resource::<PointerLock>()
        .add_event::<TourTriggerEvent>()
        .add_event::<XrSessionEvent>()
        .add_event::<XrSelectEvent>();

    // State-based system scheduling
    app.add_systems(Startup, (setup, start_loading).chain())
        .add_systems(
            Update,
            (load_manifest_system, transition_to_assets_loading)
                .chain()
                .run_if(in_state(AppState::Loading)),
        )
        .add_systems(
            Update,
            (register_loaded_clips, transition_to_running)
                .chain()
                .run_if(in_state(AppState::AssetsLoading)),
        );

    // Scene systems run from the first frame; each waits on its own pending handles.
    app.add_systems(
        Update,
        (
            spawn_loaded_models,
            assemble_skybox_when_ready,
            animate_bodies,
            forget_finished_narration,
            loading_progress_notification_system,
            fps_notification_system,
            pointer_lock_input,
            sync_cursor_grab,
            log_camera_pose,
        ),
    );

    // The tour only starts once narration has settled.
    app.add_systems(
        Update,
        (
            (route_trigger_input, start_tour_on_trigger)
                .chain()
                .run_if(in_state(AppState::Running)),
            advance_tour,
            handle_session_events,
            apply_deferred_session,
            update_indicator,
            tour_state_notification_system,
        )
            .chain(),
    );

    app.add_systems(
        Update,
        fly_camera_controller
            .after(advance_tour)
            .run_if(in_state(AppState::Running)),
    );

    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(
            Update,
            (fps_text_update_system, toggle_simulated_session),
        );
    }

    app
}

// Startup system that only handles basic initialisation
fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let camera = spawn_viewer_camera(&mut commands);
    spawn_indicator(&mut commands, camera, &mut meshes, &mut materials);

    let group = spawn_scene_group(&mut commands);
    spawn_lighting(&mut commands, group);

    #[cfg(not(target_arch = "wasm32"))]
    {
        create_native_overlays(&mut commands);
    }
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    let log_config = LogPlugin {
        filter: LOG_FILTER.to_string(),
        ..default()
    };

    DefaultPlugins
        .set(window_config)
        .set(asset_config)
        .set(log_config)
}
