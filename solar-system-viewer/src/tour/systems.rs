use crate::engine::assets::body_descriptor::BodyDescriptor;
use crate::engine::assets::system_manifest::SystemManifest;
use crate::engine::audio::narration::Narration;
use crate::engine::camera::fly_camera::{PointerLock, ViewerCamera};
use crate::engine::scene::bodies::{Body, BodyMotion, SceneGroup};
use crate::engine::xr::session::Presentation;
use crate::tour::plan::{StepAction, StepKind, plan_tour};
use crate::tour::runner::StepSignal;
use crate::tour::state::{ActiveTour, TourState};
use crate::tour::trigger::{TourTriggerEvent, trigger_allowed};
use bevy::math::curve::Curve;
use bevy::prelude::*;
use constants::tour::OUTRO_CLIP_KEY;
use std::collections::HashMap;

type CameraTransform<'w, 's> =
    Query<'w, 's, &'static mut Transform, (With<ViewerCamera>, Without<SceneGroup>)>;
type GroupTransform<'w, 's> =
    Query<'w, 's, &'static mut Transform, (With<SceneGroup>, Without<ViewerCamera>)>;

/// Plan and start a tour for the first allowed trigger this frame.
pub fn start_tour_on_trigger(
    mut commands: Commands,
    mut triggers: EventReader<TourTriggerEvent>,
    mut tour: ResMut<TourState>,
    presentation: Res<Presentation>,
    manifest: Option<Res<SystemManifest>>,
    mut narration: ResMut<Narration>,
    mut pointer_lock: ResMut<PointerLock>,
    mut bodies: Query<(&Body, &Transform, &mut BodyMotion)>,
) {
    for trigger in triggers.read() {
        if !trigger_allowed(trigger.source, &tour, *presentation) {
            debug!("Ignoring tour trigger from {:?}", trigger.source);
            continue;
        }

        pointer_lock.unlock();
        narration.stop(&mut commands);

        let descriptors: Vec<BodyDescriptor> = match manifest.as_deref() {
            Some(manifest) => manifest.bodies.clone(),
            None => SystemManifest::builtin().bodies,
        };
        let positions: HashMap<String, Vec3> = bodies
            .iter()
            .map(|(body, transform, _)| (body.name.clone(), transform.translation))
            .collect();

        let plan = match plan_tour(&descriptors, &positions, *presentation, |key| {
            narration.duration_secs(key)
        }) {
            Ok(plan) => plan,
            Err(err) => {
                warn!("Tour not started: {}", err);
                continue;
            }
        };

        for name in &plan.skipped {
            warn!("Body {} is not in the scene, leaving it out of the tour", name);
        }
        for (body, _, mut motion) in &mut bodies {
            if plan.visits(&body.name) {
                motion.suspend();
            }
        }

        info!(
            "Starting camera sequence over {} bodies ({:?} mode)",
            plan.waypoints.len(),
            *presentation
        );
        let mut active = ActiveTour::new(plan);
        // Zero-length advance so the intro clip starts on the trigger frame.
        let signals = active.runner.advance(0.0);
        *tour = TourState::Running(active);
        let TourState::Running(active) = tour.as_mut() else {
            return;
        };
        for signal in signals {
            if let StepSignal::Started(index) = signal {
                start_step(&mut commands, active, index, &mut narration, None);
            }
        }
    }
}

/// Apply the side effects of a step starting.
fn start_step(
    commands: &mut Commands,
    active: &mut ActiveTour,
    index: usize,
    narration: &mut Narration,
    origin: Option<Vec3>,
) {
    let Some(step) = active.plan.steps.get(index) else {
        return;
    };
    if let Some(target) = &step.target {
        active.current_target = Some(target.clone());
    }
    if let Some(audio) = &step.audio {
        narration.play(commands, audio);
    }
    active.move_origin = origin;
}

/// Run the current step, handle completions and finish the tour when the last step drains.
pub fn advance_tour(
    mut commands: Commands,
    time: Res<Time>,
    mut tour: ResMut<TourState>,
    mut narration: ResMut<Narration>,
    mut camera: CameraTransform,
    mut group: GroupTransform,
    mut motions: Query<&mut BodyMotion>,
) {
    if !tour.is_active() {
        return;
    }
    let TourState::Running(active) = tour.as_mut() else {
        return;
    };

    let mut finished = false;
    for signal in active.runner.advance(time.delta_secs()) {
        match signal {
            StepSignal::Started(index) => {
                let origin = match active.plan.steps.get(index).map(|step| step.kind) {
                    Some(StepKind::MoveCamera { .. }) => camera.single().ok().map(|t| t.translation),
                    Some(StepKind::MoveGroup { .. }) => group.single().ok().map(|t| t.translation),
                    _ => None,
                };
                start_step(&mut commands, active, index, &mut narration, origin);
            }
            StepSignal::Completed(index) => {
                let Some(step) = active.plan.steps.get(index) else {
                    continue;
                };
                match step.kind {
                    StepKind::MoveCamera { to } => {
                        if let Ok(mut transform) = camera.single_mut() {
                            transform.translation = to;
                        }
                    }
                    StepKind::MoveGroup { to } => {
                        if let Ok(mut transform) = group.single_mut() {
                            transform.translation = to;
                        }
                    }
                    StepKind::Delay => {}
                }
                match step.on_complete {
                    StepAction::FaceTarget(point) => {
                        if let Ok(mut transform) = camera.single_mut() {
                            transform.look_at(point, Vec3::Y);
                        }
                    }
                    StepAction::FinishTour => finished = true,
                    StepAction::None => {}
                }
            }
            StepSignal::Finished => finished = true,
        }
    }

    if finished {
        finish_tour(&mut commands, &mut narration, &mut motions);
        *tour = TourState::Idle;
        return;
    }

    // Ease the moving entity along the current move step.
    let Some(step) = active.runner.current().and_then(|i| active.plan.steps.get(i)) else {
        return;
    };
    let Some(origin) = active.move_origin else {
        return;
    };
    let t = step.easing.sample_clamped(active.runner.progress());
    match step.kind {
        StepKind::MoveCamera { to } => {
            if let Ok(mut transform) = camera.single_mut() {
                transform.translation = origin.lerp(to, t);
            }
        }
        StepKind::MoveGroup { to } => {
            if let Ok(mut transform) = group.single_mut() {
                transform.translation = origin.lerp(to, t);
            }
        }
        StepKind::Delay => {}
    }
}

/// Play the outro and give every planet its motion back.
fn finish_tour(
    commands: &mut Commands,
    narration: &mut Narration,
    motions: &mut Query<&mut BodyMotion>,
) {
    narration.play(commands, OUTRO_CLIP_KEY);
    for mut motion in motions.iter_mut() {
        motion.resume();
    }
    info!("Camera sequence finished");
}
