use crate::engine::camera::fly_camera::ViewerCamera;
use crate::engine::scene::bodies::Body;
use crate::engine::xr::session::Presentation;
use crate::tour::state::TourState;
use bevy::prelude::*;
use constants::render_settings::{
    INDICATOR_COLOUR, INDICATOR_HEIGHT, INDICATOR_OFFSET, INDICATOR_RADIUS,
};

#[derive(Component)]
pub struct TourIndicator;

/// Red cone parented to the viewer, hidden until a tour runs in immersive mode.
pub fn spawn_indicator(
    commands: &mut Commands,
    camera: Entity,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    commands.spawn((
        Name::new("Tour indicator"),
        TourIndicator,
        Mesh3d(meshes.add(Cone {
            radius: INDICATOR_RADIUS,
            height: INDICATOR_HEIGHT,
        })),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: INDICATOR_COLOUR,
            unlit: true,
            ..default()
        })),
        Transform::from_translation(INDICATOR_OFFSET),
        Visibility::Hidden,
        ChildOf(camera),
    ));
}

/// Local rotation that points the cone tip (+Y) from `from` towards `target`,
/// given the world rotation of the parent. `None` when the two points coincide.
pub fn indicator_rotation(parent_rotation: Quat, from: Vec3, target: Vec3) -> Option<Quat> {
    let world_direction = (target - from).try_normalize()?;
    let local_direction = parent_rotation.inverse() * world_direction;
    Some(Quat::from_rotation_arc(Vec3::Y, local_direction))
}

pub fn update_indicator(
    tour: Res<TourState>,
    presentation: Res<Presentation>,
    bodies: Query<(&Body, &GlobalTransform)>,
    camera: Query<&GlobalTransform, With<ViewerCamera>>,
    mut indicator: Query<(&mut Transform, &GlobalTransform, &mut Visibility), With<TourIndicator>>,
) {
    let Ok((mut transform, indicator_global, mut visibility)) = indicator.single_mut() else {
        return;
    };

    let target = match (tour.current_target(), *presentation) {
        (Some(name), Presentation::Immersive) => bodies
            .iter()
            .find(|(body, _)| body.name == name)
            .map(|(_, global)| global.translation()),
        _ => None,
    };

    let rotation = target.and_then(|target| {
        let parent_rotation = camera
            .single()
            .map(|global| global.rotation())
            .unwrap_or(Quat::IDENTITY);
        indicator_rotation(parent_rotation, indicator_global.translation(), target)
    });

    match rotation {
        Some(rotation) => {
            transform.rotation = rotation;
            *visibility = Visibility::Visible;
        }
        None => *visibility = Visibility::Hidden,
    }
}
