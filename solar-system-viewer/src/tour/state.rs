use crate::tour::plan::{TourPhase, TourPlan};
use crate::tour::runner::StepRunner;
use bevy::prelude::*;

/// A tour in progress.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveTour {
    pub plan: TourPlan,
    pub runner: StepRunner,
    pub current_target: Option<String>,
    /// Where the moving entity was when the current move step started.
    pub move_origin: Option<Vec3>,
}

impl ActiveTour {
    pub fn new(plan: TourPlan) -> Self {
        let runner = StepRunner::new(plan.steps.iter().map(|step| step.duration_secs).collect());
        Self {
            plan,
            runner,
            current_target: None,
            move_origin: None,
        }
    }
}

/// Manual control is enabled exactly when no tour is running.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub enum TourState {
    #[default]
    Idle,
    Running(ActiveTour),
}

impl TourState {
    pub fn manual_control_enabled(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Running(_))
    }

    pub fn current_target(&self) -> Option<&str> {
        match self {
            Self::Running(active) => active.current_target.as_deref(),
            Self::Idle => None,
        }
    }

    pub fn phase(&self) -> Option<TourPhase> {
        match self {
            Self::Running(active) => active.runner.current().map(TourPhase::of_step),
            Self::Idle => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running(_) => "running",
        }
    }
}
