use crate::engine::loading::progress::LoadingProgress;
use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Loading,
    AssetsLoading,
    Running,
}

// Manifest resolved, scene assets requested
pub fn transition_to_assets_loading(
    loading_progress: Res<LoadingProgress>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if loading_progress.manifest_loaded {
        println!("→ Transitioning to AssetsLoading state");
        next_state.set(AppState::AssetsLoading);
    }
}

// Narration settled; models keep arriving in the background
pub fn transition_to_running(
    loading_progress: Res<LoadingProgress>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if loading_progress.narration_ready {
        println!("→ All narration settled, transitioning to Running state");
        next_state.set(AppState::Running);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;

    fn state_app() -> App {
        let mut app = App::new();
        app.add_plugins(StatesPlugin)
            .init_state::<AppState>()
            .init_resource::<LoadingProgress>()
            .add_systems(
                Update,
                transition_to_assets_loading.run_if(in_state(AppState::Loading)),
            )
            .add_systems(
                Update,
                transition_to_running.run_if(in_state(AppState::AssetsLoading)),
            );
        app
    }

    fn current(app: &App) -> AppState {
        *app.world().resource::<State<AppState>>().get()
    }

    #[test]
    fn waits_for_manifest_then_narration() {
        let mut app = state_app();
        app.update();
        assert_eq!(current(&app), AppState::Loading);

        app.world_mut().resource_mut::<LoadingProgress>().manifest_loaded = true;
        app.update();
        app.update();
        assert_eq!(current(&app), AppState::AssetsLoading);

        app.world_mut().resource_mut::<LoadingProgress>().narration_ready = true;
        app.update();
        app.update();
        assert_eq!(current(&app), AppState::Running);
    }
}
