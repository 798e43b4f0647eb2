use crate::engine::camera::fly_camera::PointerLock;
use crate::engine::scene::bodies::SceneGroup;
use crate::tour::state::TourState;
use bevy::prelude::*;
use constants::render_settings::IMMERSIVE_GROUP_OFFSET;

/// How frames reach the user.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Presentation {
    #[default]
    Flat,
    Immersive,
}

/// Session notifications pushed in by the hosting page.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum XrSessionEvent {
    Started,
    Ended,
}

/// Controller "select" forwarded from the hosting page.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct XrSelectEvent;

/// A session change received mid-tour, applied once the tour finishes.
#[derive(Resource, Debug, Default)]
pub struct DeferredSession(pub Option<XrSessionEvent>);

/// Apply a session change to presentation mode and the scene group offset.
pub fn apply_session_change(
    event: XrSessionEvent,
    presentation: &mut Presentation,
    group: Option<&mut Transform>,
) {
    let offset = match event {
        XrSessionEvent::Started => {
            *presentation = Presentation::Immersive;
            info!("VR session started");
            IMMERSIVE_GROUP_OFFSET
        }
        XrSessionEvent::Ended => {
            *presentation = Presentation::Flat;
            info!("VR session ended");
            Vec3::ZERO
        }
    };

    if let Some(group) = group {
        group.translation = offset;
    }
}

pub fn handle_session_events(
    mut events: EventReader<XrSessionEvent>,
    tour: Res<TourState>,
    mut presentation: ResMut<Presentation>,
    mut deferred: ResMut<DeferredSession>,
    mut pointer_lock: ResMut<PointerLock>,
    mut group: Query<&mut Transform, With<SceneGroup>>,
) {
    for event in events.read() {
        if tour.is_active() {
            warn!("Session change {:?} during a tour, deferring until it ends", event);
            deferred.0 = Some(*event);
            continue;
        }

        if *event == XrSessionEvent::Started {
            pointer_lock.unlock();
        }
        apply_session_change(*event, &mut presentation, group.single_mut().ok().as_deref_mut());
    }
}

/// Replay a session change that arrived while the tour was running.
pub fn apply_deferred_session(
    tour: Res<TourState>,
    mut presentation: ResMut<Presentation>,
    mut deferred: ResMut<DeferredSession>,
    mut pointer_lock: ResMut<PointerLock>,
    mut group: Query<&mut Transform, With<SceneGroup>>,
) {
    if tour.is_active() {
        return;
    }
    let Some(event) = deferred.0.take() else {
        return;
    };

    if event == XrSessionEvent::Started {
        pointer_lock.unlock();
    }
    apply_session_change(event, &mut presentation, group.single_mut().ok().as_deref_mut());
}

/// F2 stands in for a headset session on native builds.
#[cfg(not(target_arch = "wasm32"))]
pub fn toggle_simulated_session(
    keyboard: Res<ButtonInput<KeyCode>>,
    presentation: Res<Presentation>,
    mut sessions: EventWriter<XrSessionEvent>,
    mut selects: EventWriter<XrSelectEvent>,
) {
    if keyboard.just_pressed(KeyCode::F2) {
        sessions.write(match *presentation {
            Presentation::Flat => XrSessionEvent::Started,
            Presentation::Immersive => XrSessionEvent::Ended,
        });
    }
    if keyboard.just_pressed(KeyCode::F3) && *presentation == Presentation::Immersive {
        selects.write(XrSelectEvent);
    }
}
