//! Reading Bevy's input resources through the [`InputPlatform`] trait

use crate::binding::MouseAxis;
use crate::platform::InputPlatform;
use bevy::input::{
    gamepad::{Gamepad, GamepadAxis, GamepadAxisType, GamepadButton, GamepadButtonType, Gamepads},
    keyboard::KeyCode,
    mouse::MouseButton,
    Axis, ButtonInput,
};
use bevy::math::Vec2;

/// Raw button numbering used for Bevy gamepads: button `n` is the `n`th entry,
/// and numbers past the end map to [`GamepadButtonType::Other`]
pub const GAMEPAD_BUTTONS: [GamepadButtonType; 19] = [
    GamepadButtonType::South,
    GamepadButtonType::East,
    GamepadButtonType::North,
    GamepadButtonType::West,
    GamepadButtonType::C,
    GamepadButtonType::Z,
    GamepadButtonType::LeftTrigger,
    GamepadButtonType::LeftTrigger2,
    GamepadButtonType::RightTrigger,
    GamepadButtonType::RightTrigger2,
    GamepadButtonType::Select,
    GamepadButtonType::Start,
    GamepadButtonType::Mode,
    GamepadButtonType::LeftThumb,
    GamepadButtonType::RightThumb,
    GamepadButtonType::DPadUp,
    GamepadButtonType::DPadDown,
    GamepadButtonType::DPadLeft,
    GamepadButtonType::DPadRight,
];

/// Raw axis numbering used for Bevy gamepads
///
/// Axes `6` and `7` read the analog value of the left and right triggers;
/// numbers from `8` on map to [`GamepadAxisType::Other`].
pub const GAMEPAD_AXES: [GamepadAxisType; 6] = [
    GamepadAxisType::LeftStickX,
    GamepadAxisType::LeftStickY,
    GamepadAxisType::LeftZ,
    GamepadAxisType::RightStickX,
    GamepadAxisType::RightStickY,
    GamepadAxisType::RightZ,
];

const LEFT_TRIGGER_AXIS: u8 = 6;
const RIGHT_TRIGGER_AXIS: u8 = 7;

/// A collection of [`ButtonInput`] structs and mouse motion, which can be used to poll every control
///
/// Missing resources read as released, and missing gamepads as disconnected.
/// Gamepads are assigned to platform slots in order of their id.
#[derive(Debug, Clone)]
pub struct InputStreams<'a> {
    /// A [`GamepadButton`] [`ButtonInput`] stream
    pub gamepad_buttons: Option<&'a ButtonInput<GamepadButton>>,
    /// A [`GamepadButton`] [`Axis`] stream, used for analog triggers
    pub gamepad_button_axes: Option<&'a Axis<GamepadButton>>,
    /// A [`GamepadAxis`] [`Axis`] stream
    pub gamepad_axes: Option<&'a Axis<GamepadAxis>>,
    /// A list of registered gamepads
    pub gamepads: Option<&'a Gamepads>,
    /// A [`KeyCode`] [`ButtonInput`] stream
    pub keycodes: Option<&'a ButtonInput<KeyCode>>,
    /// A [`MouseButton`] [`ButtonInput`] stream
    pub mouse_buttons: Option<&'a ButtonInput<MouseButton>>,
    /// The total mouse motion this frame, with positive `y` pointing down
    pub mouse_motion: Vec2,
    /// The total scroll this frame
    pub mouse_wheel: Vec2,
    /// The index of the current frame
    pub tick: u64,
}

impl<'a> InputStreams<'a> {
    fn gamepad(&self, slot: usize) -> Option<Gamepad> {
        let gamepads = self.gamepads?;
        let mut connected: Vec<Gamepad> = gamepads.iter().collect();
        connected.sort_by_key(|gamepad| gamepad.id);
        connected.get(slot).copied()
    }
}

impl<'a> InputPlatform for InputStreams<'a> {
    fn key_down(&self, key: KeyCode) -> bool {
        self.keycodes.map_or(false, |keycodes| keycodes.pressed(key))
    }

    fn key_pressed(&self, key: KeyCode) -> bool {
        self.keycodes
            .map_or(false, |keycodes| keycodes.just_pressed(key))
    }

    fn key_released(&self, key: KeyCode) -> bool {
        self.keycodes
            .map_or(false, |keycodes| keycodes.just_released(key))
    }

    fn mouse_button_down(&self, button: MouseButton) -> bool {
        self.mouse_buttons
            .map_or(false, |buttons| buttons.pressed(button))
    }

    fn mouse_button_pressed(&self, button: MouseButton) -> bool {
        self.mouse_buttons
            .map_or(false, |buttons| buttons.just_pressed(button))
    }

    fn mouse_button_released(&self, button: MouseButton) -> bool {
        self.mouse_buttons
            .map_or(false, |buttons| buttons.just_released(button))
    }

    fn mouse_axis(&self, axis: MouseAxis) -> f32 {
        match axis {
            MouseAxis::MoveHorizontal => self.mouse_motion.x,
            MouseAxis::MoveVertical => -self.mouse_motion.y,
            MouseAxis::ScrollWheel => self.mouse_wheel.y,
        }
    }

    fn joystick_button_down(&self, slot: usize, offset: u8) -> bool {
        let (Some(gamepad), Some(buttons)) = (self.gamepad(slot), self.gamepad_buttons) else {
            return false;
        };

        let button_type = GAMEPAD_BUTTONS
            .get(usize::from(offset))
            .copied()
            .unwrap_or_else(|| {
                GamepadButtonType::Other(offset.saturating_sub(GAMEPAD_BUTTONS.len() as u8))
            });
        buttons.pressed(GamepadButton::new(gamepad, button_type))
    }

    fn analog_sample(&self, slot: usize, axis: u8) -> f32 {
        let Some(gamepad) = self.gamepad(slot) else {
            return 0.0;
        };

        let trigger = match axis {
            LEFT_TRIGGER_AXIS => Some(GamepadButtonType::LeftTrigger2),
            RIGHT_TRIGGER_AXIS => Some(GamepadButtonType::RightTrigger2),
            _ => None,
        };
        if let Some(trigger) = trigger {
            return self
                .gamepad_button_axes
                .and_then(|axes| axes.get(GamepadButton::new(gamepad, trigger)))
                .unwrap_or_default();
        }

        let axis_type = GAMEPAD_AXES
            .get(usize::from(axis))
            .copied()
            .unwrap_or_else(|| GamepadAxisType::Other(axis.saturating_sub(RIGHT_TRIGGER_AXIS + 1)));
        self.gamepad_axes
            .and_then(|axes| axes.get(GamepadAxis::new(gamepad, axis_type)))
            .unwrap_or_default()
    }

    fn connected_device_names(&self) -> Vec<String> {
        let Some(gamepads) = self.gamepads else {
            return Vec::new();
        };

        let mut connected: Vec<Gamepad> = gamepads.iter().collect();
        connected.sort_by_key(|gamepad| gamepad.id);
        connected
            .into_iter()
            .map(|gamepad| gamepads.name(gamepad).unwrap_or_default().to_string())
            .collect()
    }

    fn current_tick(&self) -> u64 {
        self.tick
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn streams<'a>(
        keycodes: &'a ButtonInput<KeyCode>,
        mouse_buttons: &'a ButtonInput<MouseButton>,
    ) -> InputStreams<'a> {
        InputStreams {
            gamepad_buttons: None,
            gamepad_button_axes: None,
            gamepad_axes: None,
            gamepads: None,
            keycodes: Some(keycodes),
            mouse_buttons: Some(mouse_buttons),
            mouse_motion: Vec2::new(4.0, 2.0),
            mouse_wheel: Vec2::new(0.0, -1.0),
            tick: 7,
        }
    }

    #[test]
    fn reads_keyboard_and_mouse() {
        let mut keycodes = ButtonInput::<KeyCode>::default();
        keycodes.press(KeyCode::KeyA);
        let mut mouse_buttons = ButtonInput::<MouseButton>::default();
        mouse_buttons.press(MouseButton::Right);

        let streams = streams(&keycodes, &mouse_buttons);
        assert!(streams.key_down(KeyCode::KeyA));
        assert!(streams.key_pressed(KeyCode::KeyA));
        assert!(!streams.key_down(KeyCode::KeyB));
        assert!(streams.mouse_button_pressed(MouseButton::Right));
        assert_eq!(streams.first_mouse_button_pressed(), Some(MouseButton::Right));
        assert_eq!(streams.current_tick(), 7);
    }

    #[test]
    fn mouse_up_is_positive() {
        let keycodes = ButtonInput::<KeyCode>::default();
        let mouse_buttons = ButtonInput::<MouseButton>::default();

        let streams = streams(&keycodes, &mouse_buttons);
        assert_eq!(streams.mouse_axis(MouseAxis::MoveHorizontal), 4.0);
        assert_eq!(streams.mouse_axis(MouseAxis::MoveVertical), -2.0);
        assert_eq!(streams.mouse_axis(MouseAxis::ScrollWheel), -1.0);
    }

    #[test]
    fn missing_gamepads_are_disconnected() {
        let keycodes = ButtonInput::<KeyCode>::default();
        let mouse_buttons = ButtonInput::<MouseButton>::default();

        let streams = streams(&keycodes, &mouse_buttons);
        assert!(streams.connected_device_names().is_empty());
        assert!(!streams.joystick_button_down(0, 0));
        assert_eq!(streams.analog_sample(0, 6), 0.0);
    }
}
