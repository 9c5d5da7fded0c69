//! Tunable behavior of the input manager

use crate::axislike::TICK_LENGTH;
use crate::device_manager::DEFAULT_MAX_DEVICES;
use crate::logical_device::DEFAULT_PRESS_THRESHOLD;
use bevy::ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

/// Settings shared by every part of an [`InputManager`](crate::input_manager::InputManager)
///
/// The defaults reproduce the classic behavior: a fixed 60 Hz tick, four devices,
/// up to ten players and strict one-owner-per-input rebinding.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSettings {
    /// Player numbers authored on controls are clamped to `1..=max_players`
    pub max_players: u8,
    /// The number of joystick devices that can be attached at once
    pub max_devices: usize,
    /// The signed reading past which stick, d-pad and trigger axes count as pressed buttons
    pub press_threshold: f32,
    /// The fixed time step, in seconds, used to integrate digital axes
    pub tick_length: f64,
    /// When rebinding, may an input stay bound to other controls too?
    pub allow_duplicates: bool,
    /// The mouse motion per tick needed to capture a mouse movement axis
    pub mouse_move_capture_threshold: f32,
    /// The scroll per tick needed to capture the scroll wheel
    pub scroll_capture_threshold: f32,
    /// The reading an analog channel must exceed to be captured
    pub analog_capture_threshold: f32,
    /// Does pressing Escape close the editor when nothing is being rebound?
    pub escape_closes_editor: bool,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            max_players: 10,
            max_devices: DEFAULT_MAX_DEVICES,
            press_threshold: DEFAULT_PRESS_THRESHOLD,
            tick_length: TICK_LENGTH,
            allow_duplicates: false,
            mouse_move_capture_threshold: 3.0,
            scroll_capture_threshold: 0.2,
            analog_capture_threshold: 0.0,
            escape_closes_editor: true,
        }
    }
}
