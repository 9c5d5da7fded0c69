//! The systems that power the [`InputRemapPlugin`](crate::plugin::InputRemapPlugin).

use crate::input_manager::InputManager;
use crate::input_streams::InputStreams;
use crate::rebinding::CaptureOutcome;

use bevy::ecs::prelude::*;
use bevy::input::{
    gamepad::{GamepadAxis, GamepadButton, Gamepads},
    keyboard::KeyCode,
    mouse::{MouseButton, MouseMotion, MouseWheel},
    Axis, ButtonInput,
};
use bevy::log::debug;
use bevy::math::Vec2;

/// Fetches all the relevant [`ButtonInput`] resources and mouse events,
/// and advances the [`InputManager`] by one tick.
///
/// Missing resources will be ignored and treated as if none of the corresponding inputs were pressed.
#[allow(clippy::too_many_arguments)]
pub fn update_input_manager(
    manager: Option<ResMut<InputManager>>,
    gamepads: Option<Res<Gamepads>>,
    gamepad_buttons: Option<Res<ButtonInput<GamepadButton>>>,
    gamepad_button_axes: Option<Res<Axis<GamepadButton>>>,
    gamepad_axes: Option<Res<Axis<GamepadAxis>>>,
    keycodes: Option<Res<ButtonInput<KeyCode>>>,
    mouse_buttons: Option<Res<ButtonInput<MouseButton>>>,
    mut mouse_wheel: EventReader<MouseWheel>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut tick: Local<u64>,
) {
    let mouse_wheel: Vec2 = mouse_wheel
        .read()
        .map(|wheel| Vec2::new(wheel.x, wheel.y))
        .sum();
    let mouse_motion: Vec2 = mouse_motion.read().map(|motion| motion.delta).sum();

    let Some(mut manager) = manager else {
        return;
    };

    let input_streams = InputStreams {
        gamepad_buttons: gamepad_buttons.as_deref(),
        gamepad_button_axes: gamepad_button_axes.as_deref(),
        gamepad_axes: gamepad_axes.as_deref(),
        gamepads: gamepads.as_deref(),
        keycodes: keycodes.as_deref(),
        mouse_buttons: mouse_buttons.as_deref(),
        mouse_motion,
        mouse_wheel,
        tick: *tick,
    };

    let outcome = manager.update(&input_streams);
    if let CaptureOutcome::Assigned { candidate, evicted } = outcome {
        debug!(
            "Captured {:?} on tick {}, evicting it from {:?}",
            candidate, *tick, evicted
        );
    }

    *tick += 1;
}
