use bevy::prelude::*;
use constants::render_settings::{
    AMBIENT_BRIGHTNESS, SUN_LIGHT_COLOUR, SUN_LIGHT_INTENSITY, SUN_LIGHT_RANGE,
};

/// Bright white ambient fill plus a shadow-casting point light at the Sun.
pub fn spawn_lighting(commands: &mut Commands, group: Entity) {
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: AMBIENT_BRIGHTNESS,
        ..default()
    });

    commands.spawn((
        Name::new("Sun light"),
        PointLight {
            color: SUN_LIGHT_COLOUR,
            intensity: SUN_LIGHT_INTENSITY,
            range: SUN_LIGHT_RANGE,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_translation(Vec3::ZERO),
        ChildOf(group),
    ));
}
