//! The boundary between this crate and whatever is actually reading hardware
//!
//! Everything in this crate polls input through [`InputPlatform`].
//! Under Bevy, [`InputStreams`](crate::input_streams::InputStreams) implements it on top of the engine's input resources;
//! in tests, [`MockPlatform`](crate::MockPlatform) lets you script every reading directly.

use crate::binding::MouseAxis;
use crate::key_names::{KEYBOARD_KEYS, MOUSE_BUTTONS};
use bevy::input::{keyboard::KeyCode, mouse::MouseButton};

/// A source of raw input readings for a single tick
///
/// "Pressed" and "released" refer to edges: they are only true on the tick the change happened.
/// Joystick devices are addressed by their slot in [`connected_device_names`](InputPlatform::connected_device_names),
/// and their buttons and axes by the raw numbering of the platform.
pub trait InputPlatform {
    /// Is this key held?
    fn key_down(&self, key: KeyCode) -> bool;

    /// Did this key go down this tick?
    fn key_pressed(&self, key: KeyCode) -> bool;

    /// Did this key come up this tick?
    fn key_released(&self, key: KeyCode) -> bool;

    /// Is this mouse button held?
    fn mouse_button_down(&self, button: MouseButton) -> bool;

    /// Did this mouse button go down this tick?
    fn mouse_button_pressed(&self, button: MouseButton) -> bool;

    /// Did this mouse button come up this tick?
    fn mouse_button_released(&self, button: MouseButton) -> bool;

    /// How far the mouse moved (or scrolled) along this axis this tick
    fn mouse_axis(&self, axis: MouseAxis) -> f32;

    /// Is the raw button `offset` held on the device in `slot`?
    fn joystick_button_down(&self, slot: usize, offset: u8) -> bool;

    /// The current reading of raw axis `axis` on the device in `slot`
    ///
    /// Missing devices and axes read as `0.0`.
    fn analog_sample(&self, slot: usize, axis: u8) -> f32;

    /// The names of every connected joystick device, in stable slot order
    fn connected_device_names(&self) -> Vec<String>;

    /// A counter that increases by one every tick
    fn current_tick(&self) -> u64;

    /// The first bindable key, in [`KEYBOARD_KEYS`] order, that went down this tick
    fn first_key_pressed(&self) -> Option<KeyCode> {
        KEYBOARD_KEYS
            .iter()
            .map(|(key, _)| *key)
            .find(|key| self.key_pressed(*key))
    }

    /// The first of the left, right and middle mouse buttons that went down this tick
    fn first_mouse_button_pressed(&self) -> Option<MouseButton> {
        MOUSE_BUTTONS
            .iter()
            .take(3)
            .copied()
            .find(|button| self.mouse_button_pressed(*button))
    }
}
