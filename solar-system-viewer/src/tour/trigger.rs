use crate::engine::xr::session::{Presentation, XrSelectEvent};
use crate::tour::state::TourState;
use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerSource {
    Keyboard,
    Touch,
    ControllerSelect,
    HostPage,
}

impl TriggerSource {
    /// Touch and controller select only start a tour inside a headset session.
    pub fn requires_immersive(self) -> bool {
        matches!(self, Self::Touch | Self::ControllerSelect)
    }
}

/// Request to start the guided tour.
#[derive(Event, Debug, Clone, Copy)]
pub struct TourTriggerEvent {
    pub source: TriggerSource,
}

pub fn trigger_allowed(source: TriggerSource, tour: &TourState, presentation: Presentation) -> bool {
    if !tour.manual_control_enabled() {
        return false;
    }
    !source.requires_immersive() || presentation == Presentation::Immersive
}

/// Turn raw input into tour triggers. Gating happens when the trigger is handled.
pub fn route_trigger_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    touches: Option<Res<Touches>>,
    mut selects: EventReader<XrSelectEvent>,
    mut triggers: EventWriter<TourTriggerEvent>,
) {
    if keyboard.just_pressed(KeyCode::KeyT) {
        triggers.write(TourTriggerEvent {
            source: TriggerSource::Keyboard,
        });
    }

    if touches.is_some_and(|touches| touches.any_just_pressed()) {
        triggers.write(TourTriggerEvent {
            source: TriggerSource::Touch,
        });
    }

    for _ in selects.read() {
        triggers.write(TourTriggerEvent {
            source: TriggerSource::ControllerSelect,
        });
    }
}
