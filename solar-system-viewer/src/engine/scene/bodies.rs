use crate::engine::assets::body_descriptor::{BodyDescriptor, OrbitParams};
use bevy::prelude::*;

/// Root of everything that orbits. Translated as a whole in immersive mode.
#[derive(Component, Debug, Default)]
pub struct SceneGroup;

/// A spawned celestial body, named as in the manifest.
#[derive(Component, Debug, Clone)]
pub struct Body {
    pub name: String,
}

/// Run-time motion state of a body.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct BodyMotion {
    /// Radians per second about the local Y axis.
    pub rotation_rate: f32,
    pub orbit: Option<OrbitParams>,
    pub orbiting: bool,
    /// Rotation rate saved while a tour holds the body in place.
    pub archived_rotation: Option<f32>,
}

impl BodyMotion {
    pub fn from_descriptor(descriptor: &BodyDescriptor) -> Self {
        Self {
            rotation_rate: descriptor.rotation_rate,
            orbit: descriptor.orbit,
            orbiting: !descriptor.is_star(),
            archived_rotation: None,
        }
    }

    pub fn is_star(&self) -> bool {
        self.orbit.is_none()
    }

    /// Archive the rotation rate and stop following the orbit. Stars are left alone.
    pub fn suspend(&mut self) {
        if self.is_star() {
            return;
        }
        self.archived_rotation = Some(self.rotation_rate);
        self.orbiting = false;
    }

    /// Restore the archived rotation rate and resume orbiting. Stars are left alone.
    pub fn resume(&mut self) {
        if self.is_star() {
            return;
        }
        if let Some(rate) = self.archived_rotation.take() {
            self.rotation_rate = rate;
        }
        self.orbiting = true;
    }
}

pub fn spawn_scene_group(commands: &mut Commands) -> Entity {
    commands
        .spawn((
            Name::new("Scene group"),
            SceneGroup,
            Transform::default(),
            Visibility::default(),
        ))
        .id()
}

/// Spawn a body under the scene group at its initial placement.
pub fn spawn_body(
    commands: &mut Commands,
    group: Entity,
    descriptor: &BodyDescriptor,
    load_index: usize,
    scene: Handle<Scene>,
) -> Entity {
    let position = descriptor.initial_position(load_index);
    let entity = commands
        .spawn((
            Name::new(descriptor.name.clone()),
            SceneRoot(scene),
            Transform::from_translation(position),
            Body { name: descriptor.name.clone() },
            BodyMotion::from_descriptor(descriptor),
            ChildOf(group),
        ))
        .id();

    info!("Model {} loaded at position {:?}", descriptor.name, position);
    entity
}

/// Spin every body and move orbiting bodies along their circles.
pub fn animate_bodies(time: Res<Time>, mut bodies: Query<(&BodyMotion, &mut Transform), With<Body>>) {
    let delta = time.delta_secs();
    let elapsed = time.elapsed_secs();

    for (motion, mut transform) in &mut bodies {
        transform.rotate_y(motion.rotation_rate * delta);

        if motion.orbiting {
            if let Some(orbit) = motion.orbit {
                transform.translation = orbit.position_at(elapsed);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::system_manifest::SystemManifest;
    use approx::assert_relative_eq;
    use bevy::time::TimeUpdateStrategy;
    use std::time::Duration;

    fn planet_motion() -> BodyMotion {
        BodyMotion {
            rotation_rate: 0.5,
            orbit: Some(OrbitParams {
                radius: 10.0,
                rate: 2.0,
            }),
            orbiting: true,
            archived_rotation: None,
        }
    }

    #[test]
    fn suspend_then_resume_restores_rotation_and_orbit() {
        let mut motion = planet_motion();
        motion.suspend();
        assert!(!motion.orbiting);
        assert_eq!(motion.archived_rotation, Some(0.5));

        motion.rotation_rate = 0.0;
        motion.resume();
        assert!(motion.orbiting);
        assert_eq!(motion.rotation_rate, 0.5);
        assert_eq!(motion.archived_rotation, None);
    }

    #[test]
    fn only_bodies_with_an_orbit_start_orbiting() {
        let manifest = SystemManifest::builtin();
        let sun = BodyMotion::from_descriptor(&manifest.bodies[0]);
        let earth = BodyMotion::from_descriptor(&manifest.bodies[3]);
        assert!(!sun.orbiting);
        assert!(earth.orbiting);
        assert_eq!(earth.rotation_rate, manifest.bodies[3].rotation_rate);
    }

    #[test]
    fn stars_are_never_toggled() {
        let mut sun = BodyMotion {
            orbit: None,
            orbiting: false,
            ..planet_motion()
        };
        sun.suspend();
        assert_eq!(sun.archived_rotation, None);
        sun.resume();
        assert!(!sun.orbiting);
    }

    #[test]
    fn orbiting_bodies_follow_the_app_clock() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)))
            .add_systems(Update, animate_bodies);

        let planet = app
            .world_mut()
            .spawn((
                Body { name: "Earth".into() },
                planet_motion(),
                Transform::default(),
            ))
            .id();
        let frozen = app
            .world_mut()
            .spawn((
                Body { name: "Mars".into() },
                BodyMotion {
                    orbiting: false,
                    ..planet_motion()
                },
                Transform::from_xyz(1.0, 2.0, 3.0),
            ))
            .id();

        for _ in 0..5 {
            app.update();
        }

        let elapsed = app.world().resource::<Time>().elapsed_secs();
        let transform = app.world().get::<Transform>(planet).unwrap();
        assert_relative_eq!(transform.translation.x, 10.0 * (elapsed * 2.0).cos(), epsilon = 1e-4);
        assert_relative_eq!(transform.translation.y, 0.0);
        assert_relative_eq!(transform.translation.z, 10.0 * (elapsed * 2.0).sin(), epsilon = 1e-4);

        let frozen_transform = app.world().get::<Transform>(frozen).unwrap();
        assert_eq!(frozen_transform.translation, Vec3::new(1.0, 2.0, 3.0));
    }
}
