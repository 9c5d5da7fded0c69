//! Tools for working with button-like inputs (keys, mouse clicks and gamepad buttons)

use bevy::reflect::Reflect;
use serde::{Deserialize, Serialize};

/// The state of a single button, as seen across the two most recent refreshes
///
/// By default, buttons are [`ButtonState::Released`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Reflect, Default)]
pub enum ButtonState {
    /// The button went down during the most recent tick
    JustPressed,
    /// This button is down, and was already down before the most recent tick
    Pressed,
    /// The button came up during the most recent tick
    JustReleased,
    /// This button is up, and was already up before the most recent tick
    #[default]
    Released,
}

impl ButtonState {
    /// Derives the state of a button from two consecutive snapshots of whether it was held
    #[inline]
    #[must_use]
    pub fn from_snapshots(previous: bool, current: bool) -> Self {
        match (previous, current) {
            (false, true) => ButtonState::JustPressed,
            (true, true) => ButtonState::Pressed,
            (true, false) => ButtonState::JustReleased,
            (false, false) => ButtonState::Released,
        }
    }

    /// Is the button currently down?
    #[inline]
    #[must_use]
    pub fn pressed(&self) -> bool {
        *self == ButtonState::Pressed || *self == ButtonState::JustPressed
    }

    /// Is the button currently up?
    #[inline]
    #[must_use]
    pub fn released(&self) -> bool {
        *self == ButtonState::Released || *self == ButtonState::JustReleased
    }

    /// Did the button go down between the last two refreshes?
    #[inline]
    #[must_use]
    pub fn just_pressed(&self) -> bool {
        *self == ButtonState::JustPressed
    }

    /// Did the button come up between the last two refreshes?
    #[inline]
    #[must_use]
    pub fn just_released(&self) -> bool {
        *self == ButtonState::JustReleased
    }
}

/// The digital state of a named control, merged across every input bound to it
///
/// A control is down if any of its inputs are down,
/// and just pressed (or released) if any of its inputs just were.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Reflect)]
pub struct ControlButtons {
    /// Is any bound input held?
    pub down: bool,
    /// Did any bound input go down this tick?
    pub just_pressed: bool,
    /// Did any bound input come up this tick?
    pub just_released: bool,
}

impl ControlButtons {
    /// Folds the state of one more bound input into this summary
    #[inline]
    pub fn merge(&mut self, state: ButtonState) {
        self.down |= state.pressed();
        self.just_pressed |= state.just_pressed();
        self.just_released |= state.just_released();
    }
}
