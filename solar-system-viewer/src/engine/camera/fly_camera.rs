use crate::engine::xr::session::Presentation;
use crate::tour::state::TourState;
use bevy::input::mouse::MouseMotion;
use bevy::math::EulerRot;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, PrimaryWindow};
use constants::render_settings::{
    BACKGROUND_COLOUR, CAMERA_FAR, CAMERA_FOV_DEGREES, CAMERA_NEAR, CAMERA_START_POSITION,
    CAMERA_START_ROTATION, LOOK_SENSITIVITY, MOVE_SPEED,
};
use std::f32::consts::FRAC_PI_2;

const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.01;

#[derive(Component)]
pub struct ViewerCamera;

/// Whether the cursor is captured for mouse look.
#[derive(Resource, Default, Debug)]
pub struct PointerLock {
    locked: bool,
}

impl PointerLock {
    pub fn lock(&mut self) {
        if !self.locked {
            self.locked = true;
            info!("Controls locked");
        }
    }

    pub fn unlock(&mut self) {
        if self.locked {
            self.locked = false;
            info!("Controls unlocked");
        }
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }
}

/// Manual navigation is only allowed in flat mode with no tour running.
pub fn manual_navigation_enabled(tour: &TourState, presentation: Presentation) -> bool {
    tour.manual_control_enabled() && presentation == Presentation::Flat
}

pub fn spawn_viewer_camera(commands: &mut Commands) -> Entity {
    let rotation = Quat::from_euler(
        EulerRot::XYZ,
        CAMERA_START_ROTATION.x,
        CAMERA_START_ROTATION.y,
        CAMERA_START_ROTATION.z,
    );

    commands.insert_resource(ClearColor(BACKGROUND_COLOUR));
    commands
        .spawn((
            Name::new("Viewer camera"),
            ViewerCamera,
            Camera3d::default(),
            Projection::from(PerspectiveProjection {
                fov: CAMERA_FOV_DEGREES.to_radians(),
                near: CAMERA_NEAR,
                far: CAMERA_FAR,
                ..default()
            }),
            Transform::from_translation(CAMERA_START_POSITION).with_rotation(rotation),
        ))
        .id()
}

/// Horizontal-plane displacement for fly input. `input.z` is forward, `input.x`
/// right and `input.y` world up; each axis is expected in -1..=1.
pub fn movement_delta(rotation: Quat, input: Vec3, speed: f32, delta_secs: f32) -> Vec3 {
    let forward = Vec3::new((rotation * Vec3::NEG_Z).x, 0.0, (rotation * Vec3::NEG_Z).z)
        .normalize_or_zero();
    let right = Vec3::new((rotation * Vec3::X).x, 0.0, (rotation * Vec3::X).z).normalize_or_zero();

    (forward * input.z + right * input.x + Vec3::Y * input.y) * speed * delta_secs
}

/// WASD plus Space/Shift as a forward, right, up axis triple.
pub fn movement_input(keyboard: &ButtonInput<KeyCode>) -> Vec3 {
    let mut input = Vec3::ZERO;
    if keyboard.pressed(KeyCode::KeyW) {
        input.z += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyS) {
        input.z -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) {
        input.x += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyA) {
        input.x -= 1.0;
    }
    if keyboard.pressed(KeyCode::Space) {
        input.y += 1.0;
    }
    if keyboard.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]) {
        input.y -= 1.0;
    }
    input
}

/// Apply a pointer delta as yaw and pitch, dropping any roll.
pub fn apply_look(rotation: Quat, pointer_delta: Vec2, sensitivity: f32) -> Quat {
    let (yaw, pitch, _) = rotation.to_euler(EulerRot::YXZ);
    let yaw = yaw - pointer_delta.x * sensitivity;
    let pitch = (pitch - pointer_delta.y * sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    Quat::from_euler(EulerRot::YXZ, yaw, pitch, 0.0)
}

/// Click to capture the cursor, Escape to release it.
pub fn pointer_lock_input(
    mouse_button: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    tour: Res<TourState>,
    presentation: Res<Presentation>,
    mut pointer_lock: ResMut<PointerLock>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        pointer_lock.unlock();
        return;
    }

    if mouse_button.just_pressed(MouseButton::Left)
        && manual_navigation_enabled(&tour, *presentation)
    {
        pointer_lock.lock();
    }
}

/// Mirror the pointer lock onto the primary window's cursor.
pub fn sync_cursor_grab(
    pointer_lock: Res<PointerLock>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    if !pointer_lock.is_changed() {
        return;
    }
    let Ok(mut window) = windows.single_mut() else {
        return;
    };

    if pointer_lock.is_locked() {
        window.cursor_options.grab_mode = CursorGrabMode::Locked;
        window.cursor_options.visible = false;
    } else {
        window.cursor_options.grab_mode = CursorGrabMode::None;
        window.cursor_options.visible = true;
    }
}

pub fn fly_camera_controller(
    mut camera_query: Query<&mut Transform, With<ViewerCamera>>,
    mut mouse_motion: EventReader<MouseMotion>,
    keyboard: Res<ButtonInput<KeyCode>>,
    pointer_lock: Res<PointerLock>,
    tour: Res<TourState>,
    presentation: Res<Presentation>,
    time: Res<Time>,
) {
    let mouse_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();

    if !manual_navigation_enabled(&tour, *presentation) {
        return;
    }
    let Ok(mut transform) = camera_query.single_mut() else {
        return;
    };

    if pointer_lock.is_locked() && mouse_delta != Vec2::ZERO {
        transform.rotation = apply_look(transform.rotation, mouse_delta, LOOK_SENSITIVITY);
    }

    let move_input = movement_input(&keyboard);

    if move_input != Vec3::ZERO {
        let delta = movement_delta(transform.rotation, move_input, MOVE_SPEED, time.delta_secs());
        transform.translation += delta;
    }
}

/// Enter dumps the camera pose, handy for picking start positions.
pub fn log_camera_pose(
    keyboard: Res<ButtonInput<KeyCode>>,
    camera_query: Query<&Transform, With<ViewerCamera>>,
) {
    if !keyboard.just_pressed(KeyCode::Enter) {
        return;
    }
    if let Ok(transform) = camera_query.single() {
        let p = transform.translation;
        let (x, y, z) = transform.rotation.to_euler(EulerRot::XYZ);
        info!("Position: {:.2}, {:.2}, {:.2}", p.x, p.y, p.z);
        info!("Rotation: {:.2}, {:.2}, {:.2}", x, y, z);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_4;

    #[test]
    fn forward_movement_stays_horizontal_when_pitched() {
        let rotation = Quat::from_euler(EulerRot::YXZ, 0.0, -FRAC_PI_4, 0.0);
        let delta = movement_delta(rotation, Vec3::Z, 6.0, 0.5);
        assert_relative_eq!(delta.y, 0.0);
        assert_relative_eq!(delta.z, -3.0, epsilon = 1e-5);
    }

    #[test]
    fn strafe_and_vertical_combine() {
        let delta = movement_delta(Quat::IDENTITY, Vec3::new(1.0, -1.0, 0.0), 2.0, 1.0);
        assert!(delta.abs_diff_eq(Vec3::new(2.0, -2.0, 0.0), 1e-5));
    }

    #[test]
    fn keys_map_to_movement_axes() {
        let mut keyboard = ButtonInput::<KeyCode>::default();
        keyboard.press(KeyCode::KeyW);
        keyboard.press(KeyCode::KeyA);
        keyboard.press(KeyCode::ShiftRight);
        assert_eq!(movement_input(&keyboard), Vec3::new(-1.0, -1.0, 1.0));

        keyboard.press(KeyCode::KeyS);
        keyboard.press(KeyCode::KeyD);
        keyboard.press(KeyCode::Space);
        assert_eq!(movement_input(&keyboard), Vec3::ZERO);
    }

    #[test]
    fn look_clamps_pitch_and_drops_roll() {
        let rotation = apply_look(Quat::IDENTITY, Vec2::new(0.0, -10_000.0), 0.002);
        let (_, pitch, roll) = rotation.to_euler(EulerRot::YXZ);
        assert_relative_eq!(pitch, PITCH_LIMIT, epsilon = 1e-4);
        assert_relative_eq!(roll, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn pointer_lock_toggles() {
        let mut lock = PointerLock::default();
        lock.lock();
        assert!(lock.is_locked());
        lock.unlock();
        assert!(!lock.is_locked());
    }

    #[test]
    fn navigation_disabled_in_immersive_mode() {
        let idle = TourState::default();
        assert!(manual_navigation_enabled(&idle, Presentation::Flat));
        assert!(!manual_navigation_enabled(&idle, Presentation::Immersive));
    }
}
