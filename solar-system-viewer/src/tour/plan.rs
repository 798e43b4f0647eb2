use crate::engine::assets::body_descriptor::BodyDescriptor;
use crate::engine::xr::session::Presentation;
use crate::error::TourError;
use bevy::math::curve::easing::EaseFunction;
use bevy::prelude::*;
use constants::tour::{INTRO_CLIP_KEY, MOVE_DURATION_SECS};
use std::collections::HashMap;

/// A body captured at tour start.
#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint {
    pub name: String,
    pub position: Vec3,
    pub approach_offset: f32,
}

impl Waypoint {
    /// Where the flat-mode camera parks while the body is narrated.
    pub fn viewpoint(&self) -> Vec3 {
        self.position + Vec3::X * self.approach_offset
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepKind {
    /// Let time pass, typically while a clip plays.
    Delay,
    /// Move the viewer camera to `to`.
    MoveCamera { to: Vec3 },
    /// Move the scene group to `to`, leaving the viewer in place.
    MoveGroup { to: Vec3 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepAction {
    None,
    /// Turn the camera towards a world point.
    FaceTarget(Vec3),
    FinishTour,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TourStep {
    pub kind: StepKind,
    pub duration_secs: f32,
    pub easing: EaseFunction,
    /// Clip to start when the step starts.
    pub audio: Option<String>,
    /// Body that becomes the current target when the step starts.
    pub target: Option<String>,
    pub on_complete: StepAction,
}

impl TourStep {
    fn delay(duration_secs: f32) -> Self {
        Self {
            kind: StepKind::Delay,
            duration_secs,
            easing: EaseFunction::Linear,
            audio: None,
            target: None,
            on_complete: StepAction::None,
        }
    }
}

/// Where a step sits in the itinerary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourPhase {
    Intro,
    Visit(usize),
    Wait(usize),
}

impl TourPhase {
    pub fn of_step(index: usize) -> Self {
        match index {
            0 => Self::Intro,
            i if i % 2 == 1 => Self::Visit((i - 1) / 2),
            i => Self::Wait((i - 2) / 2),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TourPlan {
    pub waypoints: Vec<Waypoint>,
    pub steps: Vec<TourStep>,
    /// Bodies listed in the manifest but absent from the scene.
    pub skipped: Vec<String>,
}

impl TourPlan {
    pub fn visits(&self, name: &str) -> bool {
        self.waypoints.iter().any(|waypoint| waypoint.name == name)
    }
}

/// Waypoints for every body present in the scene, in manifest order.
pub fn capture_waypoints(
    bodies: &[BodyDescriptor],
    positions: &HashMap<String, Vec3>,
) -> (Vec<Waypoint>, Vec<String>) {
    let mut waypoints = Vec::new();
    let mut skipped = Vec::new();

    for body in bodies {
        match positions.get(&body.name) {
            Some(position) => waypoints.push(Waypoint {
                name: body.name.clone(),
                position: *position,
                approach_offset: body.approach_offset,
            }),
            None => skipped.push(body.name.clone()),
        }
    }
    (waypoints, skipped)
}

/// Build the intro, visit and wait steps for one tour.
///
/// `durations` maps a narration key to the length of its wait step.
pub fn plan_tour(
    bodies: &[BodyDescriptor],
    positions: &HashMap<String, Vec3>,
    presentation: Presentation,
    durations: impl Fn(&str) -> f32,
) -> Result<TourPlan, TourError> {
    let (waypoints, skipped) = capture_waypoints(bodies, positions);
    if waypoints.is_empty() {
        return Err(TourError::NothingLoaded);
    }

    let mut steps = Vec::with_capacity(1 + waypoints.len() * 2);
    steps.push(TourStep {
        audio: Some(INTRO_CLIP_KEY.to_string()),
        ..TourStep::delay(durations(INTRO_CLIP_KEY))
    });

    for waypoint in &waypoints {
        let (kind, on_complete) = match presentation {
            Presentation::Flat => (
                StepKind::MoveCamera {
                    to: waypoint.viewpoint(),
                },
                StepAction::FaceTarget(waypoint.position),
            ),
            Presentation::Immersive => (
                StepKind::MoveGroup {
                    to: -waypoint.position,
                },
                StepAction::None,
            ),
        };

        steps.push(TourStep {
            kind,
            duration_secs: MOVE_DURATION_SECS,
            easing: EaseFunction::QuadraticInOut,
            audio: Some(waypoint.name.clone()),
            target: Some(waypoint.name.clone()),
            on_complete,
        });
        steps.push(TourStep::delay(durations(&waypoint.name)));
    }

    if let Some(last) = steps.last_mut() {
        last.on_complete = StepAction::FinishTour;
    }

    Ok(TourPlan {
        waypoints,
        steps,
        skipped,
    })
}
