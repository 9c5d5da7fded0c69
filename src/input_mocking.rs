//! Helpful utilities for testing input management by scripting raw input readings

use crate::binding::MouseAxis;
use crate::platform::InputPlatform;
use bevy::input::{keyboard::KeyCode, mouse::MouseButton};
use bevy::utils::{HashMap, HashSet};

/// A fake [`InputPlatform`] whose every reading is set by hand
///
/// Inputs are held until released.
/// Edges are computed against the state at the previous tick,
/// so pressing a key and then calling [`advance_tick`](MockPlatform::advance_tick) turns "just pressed" into "held".
/// Mouse motion only lasts for the tick it was set in.
///
/// # Examples
/// ```rust
/// use bevy::input::keyboard::KeyCode;
/// use input_remapper::platform::InputPlatform;
/// use input_remapper::MockPlatform;
///
/// let mut platform = MockPlatform::default();
/// platform.press_key(KeyCode::Space);
/// assert!(platform.key_pressed(KeyCode::Space));
///
/// platform.advance_tick();
/// assert!(platform.key_down(KeyCode::Space));
/// assert!(!platform.key_pressed(KeyCode::Space));
/// ```
#[derive(Debug, Default, Clone)]
pub struct MockPlatform {
    tick: u64,
    keys: HashSet<KeyCode>,
    previous_keys: HashSet<KeyCode>,
    mouse_buttons: HashSet<MouseButton>,
    previous_mouse_buttons: HashSet<MouseButton>,
    mouse_axes: HashMap<MouseAxis, f32>,
    devices: Vec<MockDevice>,
}

#[derive(Debug, Default, Clone)]
struct MockDevice {
    name: String,
    buttons: HashSet<u8>,
    axes: HashMap<u8, f32>,
}

impl MockPlatform {
    /// Moves on to the next tick, keeping every held input held
    pub fn advance_tick(&mut self) {
        self.tick += 1;
        self.previous_keys = self.keys.clone();
        self.previous_mouse_buttons = self.mouse_buttons.clone();
        self.mouse_axes.clear();
    }

    /// Holds a key down
    pub fn press_key(&mut self, key: KeyCode) {
        self.keys.insert(key);
    }

    /// Lets go of a key
    pub fn release_key(&mut self, key: KeyCode) {
        self.keys.remove(&key);
    }

    /// Holds a mouse button down
    pub fn press_mouse_button(&mut self, button: MouseButton) {
        self.mouse_buttons.insert(button);
    }

    /// Lets go of a mouse button
    pub fn release_mouse_button(&mut self, button: MouseButton) {
        self.mouse_buttons.remove(&button);
    }

    /// Sets the mouse motion along an axis for the current tick
    pub fn set_mouse_axis(&mut self, axis: MouseAxis, value: f32) {
        self.mouse_axes.insert(axis, value);
    }

    /// Plugs in a device, returning its slot
    pub fn connect(&mut self, name: impl Into<String>) -> usize {
        self.devices.push(MockDevice {
            name: name.into(),
            ..Default::default()
        });
        self.devices.len() - 1
    }

    /// Unplugs the device in `slot`: every later device moves down one slot
    pub fn disconnect(&mut self, slot: usize) {
        if slot < self.devices.len() {
            self.devices.remove(slot);
        }
    }

    /// Holds a raw button on the device in `slot`
    pub fn press_joystick_button(&mut self, slot: usize, offset: u8) {
        if let Some(device) = self.devices.get_mut(slot) {
            device.buttons.insert(offset);
        }
    }

    /// Lets go of a raw button on the device in `slot`
    pub fn release_joystick_button(&mut self, slot: usize, offset: u8) {
        if let Some(device) = self.devices.get_mut(slot) {
            device.buttons.remove(&offset);
        }
    }

    /// Sets a raw axis reading on the device in `slot`
    pub fn set_analog(&mut self, slot: usize, axis: u8, value: f32) {
        if let Some(device) = self.devices.get_mut(slot) {
            device.axes.insert(axis, value);
        }
    }

    /// Releases every key, mouse button, joystick button and axis
    pub fn release_all(&mut self) {
        self.keys.clear();
        self.mouse_buttons.clear();
        self.mouse_axes.clear();
        for device in &mut self.devices {
            device.buttons.clear();
            device.axes.clear();
        }
    }
}

impl InputPlatform for MockPlatform {
    fn key_down(&self, key: KeyCode) -> bool {
        self.keys.contains(&key)
    }

    fn key_pressed(&self, key: KeyCode) -> bool {
        self.keys.contains(&key) && !self.previous_keys.contains(&key)
    }

    fn key_released(&self, key: KeyCode) -> bool {
        !self.keys.contains(&key) && self.previous_keys.contains(&key)
    }

    fn mouse_button_down(&self, button: MouseButton) -> bool {
        self.mouse_buttons.contains(&button)
    }

    fn mouse_button_pressed(&self, button: MouseButton) -> bool {
        self.mouse_buttons.contains(&button) && !self.previous_mouse_buttons.contains(&button)
    }

    fn mouse_button_released(&self, button: MouseButton) -> bool {
        !self.mouse_buttons.contains(&button) && self.previous_mouse_buttons.contains(&button)
    }

    fn mouse_axis(&self, axis: MouseAxis) -> f32 {
        self.mouse_axes.get(&axis).copied().unwrap_or_default()
    }

    fn joystick_button_down(&self, slot: usize, offset: u8) -> bool {
        self.devices
            .get(slot)
            .map_or(false, |device| device.buttons.contains(&offset))
    }

    fn analog_sample(&self, slot: usize, axis: u8) -> f32 {
        self.devices
            .get(slot)
            .and_then(|device| device.axes.get(&axis).copied())
            .unwrap_or_default()
    }

    fn connected_device_names(&self) -> Vec<String> {
        self.devices.iter().map(|device| device.name.clone()).collect()
    }

    fn current_tick(&self) -> u64 {
        self.tick
    }
}
