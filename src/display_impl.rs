//! Containment module for boring implementations of the [`Display`] trait
//!
//! These are the labels a rebinding screen shows next to each control.

use crate::binding::{AnalogBinding, Binding, JoystickBinding, MouseAxis};
use crate::device_template::HardwareInput;
use crate::gamepad::{AnalogChannel, JoyCode};
use crate::key_names::key_name;
use std::fmt::Display;

impl Display for JoyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Display for AnalogChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl Display for MouseAxis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MouseAxis::MoveVertical => write!(f, "Mouse Y"),
            MouseAxis::MoveHorizontal => write!(f, "Mouse X"),
            MouseAxis::ScrollWheel => write!(f, "Scroll Wheel"),
        }
    }
}

impl Display for JoystickBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The player number, then the button
        write!(f, "P{} {}", self.player, self.button)
    }
}

impl Display for AnalogBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{} {}", self.player, self.channel)
    }
}

impl Display for Binding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Binding::Keyboard(key) => match key_name(*key) {
                Some(name) => write!(f, "{}", name.to_uppercase()),
                None => write!(f, "{key:?}"),
            },
            Binding::Mouse(button) => write!(f, "Mouse {button:?}"),
            Binding::Joystick(joystick) => write!(f, "{joystick}"),
        }
    }
}

impl Display for HardwareInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HardwareInput::Unbound => write!(f, "Unbound"),
            HardwareInput::Button(offset) => write!(f, "Button {offset}"),
            HardwareInput::Axis(axis) => write!(f, "Axis {axis}"),
        }
    }
}
