//! A single connected gamepad, seen through its [`DeviceTemplate`]

use crate::buttonlike::ButtonState;
use crate::device_template::{DeviceTemplate, HardwareInput};
use crate::gamepad::{AnalogChannel, JoyButton, JoyCode};
use crate::platform::InputPlatform;

/// The signed reading past which stick, d-pad and trigger axes count as pressed buttons
pub const DEFAULT_PRESS_THRESHOLD: f32 = 0.9;

/// A connected device, translated into the canonical [`JoyCode`] and [`AnalogChannel`] space
///
/// The device caches which buttons were held at its two most recent refreshes,
/// so press and release edges are stable for the whole tick no matter how often they are queried.
#[derive(Debug, Clone)]
pub struct LogicalDevice {
    template: DeviceTemplate,
    slot: usize,
    player: u8,
    press_threshold: f32,
    pressed: [bool; JoyCode::COUNT],
    pressed_prev: [bool; JoyCode::COUNT],
    last_refresh: Option<u64>,
}

impl LogicalDevice {
    /// Creates a device in `slot`, owned by `player`, using its own copy of `template`
    #[must_use]
    pub fn new(template: DeviceTemplate, slot: usize, player: u8) -> Self {
        Self {
            template,
            slot,
            player,
            press_threshold: DEFAULT_PRESS_THRESHOLD,
            pressed: [false; JoyCode::COUNT],
            pressed_prev: [false; JoyCode::COUNT],
            last_refresh: None,
        }
    }

    /// Sets the signed reading past which analog inputs count as pressed buttons
    #[must_use]
    pub fn with_press_threshold(mut self, press_threshold: f32) -> Self {
        self.press_threshold = press_threshold;
        self
    }

    /// The template this device was built from
    #[must_use]
    pub fn template(&self) -> &DeviceTemplate {
        &self.template
    }

    /// Where a template entry lives on this device's hardware
    #[must_use]
    pub fn hardware(&self, slot: JoyButton) -> HardwareInput {
        self.template.hardware(slot)
    }

    /// The platform slot this device is read from
    #[must_use]
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Moves this device to another platform slot, keeping its cached state
    pub fn set_slot(&mut self, slot: usize) {
        self.slot = slot;
    }

    /// The player this device belongs to, starting from 1
    #[must_use]
    pub fn player(&self) -> u8 {
        self.player
    }

    /// The tick this device was last refreshed on
    #[must_use]
    pub fn last_refresh(&self) -> Option<u64> {
        self.last_refresh
    }

    /// Reads every canonical button from the hardware
    ///
    /// Does nothing if the device has already been refreshed this tick,
    /// so edges only ever compare two consecutive ticks.
    pub fn refresh(&mut self, platform: &dyn InputPlatform) {
        let tick = platform.current_tick();
        if self.last_refresh == Some(tick) {
            return;
        }

        self.last_refresh = Some(tick);
        self.pressed_prev = self.pressed;
        for code in JoyCode::ALL {
            self.pressed[code.index()] = self.read_digital(platform, code);
        }
    }

    /// Refreshes the device, then reports the state of a button
    pub fn digital_state(&mut self, platform: &dyn InputPlatform, code: JoyCode) -> ButtonState {
        self.refresh(platform);
        self.button_state(code)
    }

    /// The state of a button as of the most recent refresh
    #[must_use]
    pub fn button_state(&self, code: JoyCode) -> ButtonState {
        let index = code.index();
        ButtonState::from_snapshots(self.pressed_prev[index], self.pressed[index])
    }

    /// The first button, in [`JoyCode::ALL`] order, that went down at the most recent refresh
    #[must_use]
    pub fn first_just_pressed(&self) -> Option<JoyCode> {
        JoyCode::ALL
            .into_iter()
            .find(|code| self.button_state(*code).just_pressed())
    }

    /// The current reading of an analog channel
    ///
    /// Channels bound to a hardware axis are sampled live, with template inversion applied.
    /// Otherwise the reading is synthesized from the cached buttons:
    /// the d-pad reads right minus left and up minus down, triggers read `1.0` while held,
    /// and sticks read `0.0`.
    #[must_use]
    pub fn analog_value(&self, platform: &dyn InputPlatform, channel: AnalogChannel) -> f32 {
        if let Some(sample) = self.sample(platform, channel) {
            return sample;
        }

        let held = |code: JoyCode| f32::from(u8::from(self.pressed[code.index()]));
        match channel {
            AnalogChannel::DPadHorizontal => held(JoyCode::DPadRight) - held(JoyCode::DPadLeft),
            AnalogChannel::DPadVertical => held(JoyCode::DPadUp) - held(JoyCode::DPadDown),
            AnalogChannel::LeftTrigger => held(JoyCode::LeftTrigger),
            AnalogChannel::RightTrigger => held(JoyCode::RightTrigger),
            _ => 0.0,
        }
    }

    /// The canonical button that a raw hardware button is mapped to
    #[must_use]
    pub fn reverse_lookup(&self, offset: u8) -> Option<JoyCode> {
        JoyCode::ALL.into_iter().find(|code| {
            code.button_slot()
                .map_or(false, |slot| self.hardware(slot) == HardwareInput::Button(offset))
        })
    }

    fn sample(&self, platform: &dyn InputPlatform, channel: AnalogChannel) -> Option<f32> {
        match self.hardware(channel.template_slot()) {
            HardwareInput::Axis(axis) => Some(
                platform.analog_sample(self.slot, axis) * self.template.inversion().sign(channel),
            ),
            _ => None,
        }
    }

    fn read_digital(&self, platform: &dyn InputPlatform, code: JoyCode) -> bool {
        if let Some(slot) = code.button_slot() {
            if let HardwareInput::Button(offset) = self.hardware(slot) {
                return platform.joystick_button_down(self.slot, offset);
            }
        }

        code.virtual_source().map_or(false, |(channel, sign)| {
            self.sample(platform, channel)
                .map_or(false, |reading| reading * sign > self.press_threshold)
        })
    }
}
