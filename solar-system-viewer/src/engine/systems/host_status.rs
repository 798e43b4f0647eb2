use crate::engine::loading::progress::LoadingProgress;
use crate::rpc::web_rpc::{WebRpcInterface, tour_state_json};
use crate::tour::state::TourState;
use bevy::prelude::*;

/// What the host page last heard about the tour.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TourSnapshot {
    active: bool,
    target: Option<String>,
}

impl TourSnapshot {
    fn of(tour: &TourState) -> Self {
        Self {
            active: tour.is_active(),
            target: tour.current_target().map(str::to_string),
        }
    }
}

/// Notify the host when the tour starts, changes target or finishes.
pub fn tour_state_notification_system(
    tour: Res<TourState>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut last_sent: Local<TourSnapshot>,
) {
    if !tour.is_changed() {
        return;
    }
    let snapshot = TourSnapshot::of(&tour);
    if snapshot == *last_sent {
        return;
    }

    rpc_interface.send_notification("tour_state_changed", tour_state_json(&tour));
    *last_sent = snapshot;
}

pub fn loading_progress_notification_system(
    loading_progress: Res<LoadingProgress>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    if loading_progress.is_changed() {
        rpc_interface.send_notification("loading_progress", loading_progress.to_json());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tour::plan::TourPlan;
    use crate::tour::state::ActiveTour;

    fn methods(app: &App) -> Vec<String> {
        app.world()
            .resource::<WebRpcInterface>()
            .pending_notifications()
            .iter()
            .map(|n| n.method.clone())
            .collect()
    }

    #[test]
    fn tour_changes_are_sent_once() {
        let mut app = App::new();
        app.init_resource::<TourState>()
            .init_resource::<WebRpcInterface>()
            .add_systems(Update, tour_state_notification_system);

        // Idle matches the default snapshot, nothing to report.
        app.update();
        assert!(methods(&app).is_empty());

        let mut active = ActiveTour::new(TourPlan {
            waypoints: Vec::new(),
            steps: Vec::new(),
            skipped: Vec::new(),
        });
        active.current_target = Some("Sun".into());
        app.insert_resource(TourState::Running(active));
        app.update();
        app.update();

        assert_eq!(methods(&app), ["tour_state_changed"]);
    }

    #[test]
    fn progress_is_reported_when_it_moves() {
        let mut app = App::new();
        app.init_resource::<LoadingProgress>()
            .init_resource::<WebRpcInterface>()
            .add_systems(Update, loading_progress_notification_system);

        app.update();
        app.world_mut().resource_mut::<LoadingProgress>().manifest_loaded = true;
        app.update();
        app.update();

        assert_eq!(methods(&app), ["loading_progress", "loading_progress"]);
    }
}
