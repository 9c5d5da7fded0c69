//! The canonical gamepad code space shared by every [`DeviceTemplate`](crate::device_template::DeviceTemplate)
//!
//! Physical controllers number their buttons and axes however their driver pleases.
//! Everything above the device layer speaks in terms of the types defined here instead:
//!
//! - [`JoyCode`]: the 24 digital buttons a player can press, including virtual ones synthesized from analog inputs
//! - [`AnalogChannel`]: the 8 continuous axes a player can move
//! - [`JoyButton`]: the 22 entries of a template table, which say where each canonical input lives on the hardware

use bevy::reflect::Reflect;
use serde::{Deserialize, Serialize};

/// A canonical digital gamepad button
///
/// Triggers, d-pad directions and stick directions are always available as buttons,
/// even when the hardware only exposes them as analog axes.
/// In that case, they count as pressed once the signed axis reading passes the device's press threshold.
///
/// When persisted, each code is stored as a negative integer (see [`JoyCode::code`]),
/// leaving the positive range for keyboard keys.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Reflect,
)]
pub enum JoyCode {
    /// The start or menu button
    Start,
    /// The select, back or view button
    Select,
    /// The bottom face button
    A,
    /// The right face button
    B,
    /// The left face button
    X,
    /// The top face button
    Y,
    /// The left shoulder button
    LeftBumper,
    /// The right shoulder button
    RightBumper,
    /// Pressing down on the left stick
    LeftStickClick,
    /// Pressing down on the right stick
    RightStickClick,
    /// D-pad up
    DPadUp,
    /// D-pad down
    DPadDown,
    /// D-pad left
    DPadLeft,
    /// D-pad right
    DPadRight,
    /// The left trigger, pulled past the press threshold
    LeftTrigger,
    /// The right trigger, pulled past the press threshold
    RightTrigger,
    /// The left stick, pushed up past the press threshold
    LeftStickUp,
    /// The left stick, pushed down past the press threshold
    LeftStickDown,
    /// The left stick, pushed left past the press threshold
    LeftStickLeft,
    /// The left stick, pushed right past the press threshold
    LeftStickRight,
    /// The right stick, pushed up past the press threshold
    RightStickUp,
    /// The right stick, pushed down past the press threshold
    RightStickDown,
    /// The right stick, pushed left past the press threshold
    RightStickLeft,
    /// The right stick, pushed right past the press threshold
    RightStickRight,
}

impl JoyCode {
    /// The number of canonical buttons
    pub const COUNT: usize = 24;

    /// Every canonical button, in declaration order
    pub const ALL: [JoyCode; JoyCode::COUNT] = [
        JoyCode::Start,
        JoyCode::Select,
        JoyCode::A,
        JoyCode::B,
        JoyCode::X,
        JoyCode::Y,
        JoyCode::LeftBumper,
        JoyCode::RightBumper,
        JoyCode::LeftStickClick,
        JoyCode::RightStickClick,
        JoyCode::DPadUp,
        JoyCode::DPadDown,
        JoyCode::DPadLeft,
        JoyCode::DPadRight,
        JoyCode::LeftTrigger,
        JoyCode::RightTrigger,
        JoyCode::LeftStickUp,
        JoyCode::LeftStickDown,
        JoyCode::LeftStickLeft,
        JoyCode::LeftStickRight,
        JoyCode::RightStickUp,
        JoyCode::RightStickDown,
        JoyCode::RightStickLeft,
        JoyCode::RightStickRight,
    ];

    /// The position of this button in [`JoyCode::ALL`]
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The persisted logical code of this button: `-1` for [`JoyCode::Start`] down to `-24`
    #[inline]
    #[must_use]
    pub fn code(self) -> i32 {
        -(self as i32) - 1
    }

    /// Converts a persisted logical code back into a button
    ///
    /// Returns `None` for zero, positive codes and codes below `-24`.
    #[must_use]
    pub fn from_code(code: i32) -> Option<Self> {
        if code >= 0 {
            return None;
        }

        let index = usize::try_from(code.checked_neg()? - 1).ok()?;
        JoyCode::ALL.get(index).copied()
    }

    /// Is this one of the two trigger buttons?
    #[inline]
    #[must_use]
    pub fn is_trigger(self) -> bool {
        matches!(self, JoyCode::LeftTrigger | JoyCode::RightTrigger)
    }

    /// The template entry that can map this button directly onto a hardware button
    ///
    /// Stick directions have none: they only ever exist virtually.
    #[must_use]
    pub fn button_slot(self) -> Option<JoyButton> {
        use JoyCode::*;

        Some(match self {
            Start => JoyButton::Start,
            Select => JoyButton::Select,
            A => JoyButton::A,
            B => JoyButton::B,
            X => JoyButton::X,
            Y => JoyButton::Y,
            LeftBumper => JoyButton::LeftBumper,
            RightBumper => JoyButton::RightBumper,
            LeftStickClick => JoyButton::LeftStickClick,
            RightStickClick => JoyButton::RightStickClick,
            DPadUp => JoyButton::DPadUp,
            DPadDown => JoyButton::DPadDown,
            DPadLeft => JoyButton::DPadLeft,
            DPadRight => JoyButton::DPadRight,
            LeftTrigger => JoyButton::LeftTrigger,
            RightTrigger => JoyButton::RightTrigger,
            _ => return None,
        })
    }

    /// The analog channel this button can be synthesized from, along with the sign the reading must have
    ///
    /// Face buttons, bumpers, stick clicks and the menu buttons are never virtual.
    #[must_use]
    pub fn virtual_source(self) -> Option<(AnalogChannel, f32)> {
        use AnalogChannel::*;

        Some(match self {
            JoyCode::DPadUp => (DPadVertical, 1.0),
            JoyCode::DPadDown => (DPadVertical, -1.0),
            JoyCode::DPadLeft => (DPadHorizontal, -1.0),
            JoyCode::DPadRight => (DPadHorizontal, 1.0),
            JoyCode::LeftTrigger => (LeftTrigger, 1.0),
            JoyCode::RightTrigger => (RightTrigger, 1.0),
            JoyCode::LeftStickUp => (LeftStickVertical, 1.0),
            JoyCode::LeftStickDown => (LeftStickVertical, -1.0),
            JoyCode::LeftStickLeft => (LeftStickHorizontal, -1.0),
            JoyCode::LeftStickRight => (LeftStickHorizontal, 1.0),
            JoyCode::RightStickUp => (RightStickVertical, 1.0),
            JoyCode::RightStickDown => (RightStickVertical, -1.0),
            JoyCode::RightStickLeft => (RightStickHorizontal, -1.0),
            JoyCode::RightStickRight => (RightStickHorizontal, 1.0),
            _ => return None,
        })
    }

    /// The analog channel of a trigger button
    #[must_use]
    pub fn trigger_channel(self) -> Option<AnalogChannel> {
        match self {
            JoyCode::LeftTrigger => Some(AnalogChannel::LeftTrigger),
            JoyCode::RightTrigger => Some(AnalogChannel::RightTrigger),
            _ => None,
        }
    }

    /// The identifier used for this button in authored control data
    ///
    /// Input names are matched case-insensitively with spaces removed,
    /// and joystick buttons are prefixed with `joystick` (so `"Joystick A"` names [`JoyCode::A`]).
    #[must_use]
    pub fn name(self) -> &'static str {
        use JoyCode::*;

        match self {
            Start => "Start",
            Select => "Select",
            A => "A",
            B => "B",
            X => "X",
            Y => "Y",
            LeftBumper => "LeftBumper",
            RightBumper => "RightBumper",
            LeftStickClick => "LeftStickClick",
            RightStickClick => "RightStickClick",
            DPadUp => "DPadUp",
            DPadDown => "DPadDown",
            DPadLeft => "DPadLeft",
            DPadRight => "DPadRight",
            LeftTrigger => "LeftTrigger",
            RightTrigger => "RightTrigger",
            LeftStickUp => "LeftStickUp",
            LeftStickDown => "LeftStickDown",
            LeftStickLeft => "LeftStickLeft",
            LeftStickRight => "LeftStickRight",
            RightStickUp => "RightStickUp",
            RightStickDown => "RightStickDown",
            RightStickLeft => "RightStickLeft",
            RightStickRight => "RightStickRight",
        }
    }
}

/// A canonical analog gamepad axis
///
/// Readings are signed so that up and right are positive once template inversion has been applied.
/// Triggers read from `0.0` (released) to `1.0` (fully pulled).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Reflect,
)]
pub enum AnalogChannel {
    /// D-pad left (negative) to right (positive)
    DPadHorizontal,
    /// D-pad down (negative) to up (positive)
    DPadVertical,
    /// The left trigger
    LeftTrigger,
    /// The right trigger
    RightTrigger,
    /// Left stick, left to right
    LeftStickHorizontal,
    /// Left stick, down to up
    LeftStickVertical,
    /// Right stick, left to right
    RightStickHorizontal,
    /// Right stick, down to up
    RightStickVertical,
}

impl AnalogChannel {
    /// Every analog channel, in declaration order
    pub const ALL: [AnalogChannel; 8] = [
        AnalogChannel::DPadHorizontal,
        AnalogChannel::DPadVertical,
        AnalogChannel::LeftTrigger,
        AnalogChannel::RightTrigger,
        AnalogChannel::LeftStickHorizontal,
        AnalogChannel::LeftStickVertical,
        AnalogChannel::RightStickHorizontal,
        AnalogChannel::RightStickVertical,
    ];

    /// The persisted identifier of this channel, from `15` to `22`
    ///
    /// `0` is reserved for "no channel".
    #[inline]
    #[must_use]
    pub fn id(self) -> i32 {
        self as i32 + 15
    }

    /// Converts a persisted identifier back into a channel
    #[must_use]
    pub fn from_id(id: i32) -> Option<Self> {
        let index = usize::try_from(id.checked_sub(15)?).ok()?;
        AnalogChannel::ALL.get(index).copied()
    }

    /// Is this one of the two trigger channels?
    #[inline]
    #[must_use]
    pub fn is_trigger(self) -> bool {
        matches!(self, AnalogChannel::LeftTrigger | AnalogChannel::RightTrigger)
    }

    /// The template entry that can map this channel onto a hardware axis
    #[must_use]
    pub fn template_slot(self) -> JoyButton {
        use AnalogChannel::*;

        match self {
            DPadHorizontal => JoyButton::DPadHorizontal,
            DPadVertical => JoyButton::DPadVertical,
            LeftTrigger => JoyButton::LeftTrigger,
            RightTrigger => JoyButton::RightTrigger,
            LeftStickHorizontal => JoyButton::LeftStickHorizontal,
            LeftStickVertical => JoyButton::LeftStickVertical,
            RightStickHorizontal => JoyButton::RightStickHorizontal,
            RightStickVertical => JoyButton::RightStickVertical,
        }
    }

    /// The horizontal and vertical channels of the stick or d-pad this channel belongs to
    ///
    /// Triggers do not come in pairs, and return `None`.
    #[must_use]
    pub fn family(self) -> Option<(AnalogChannel, AnalogChannel)> {
        use AnalogChannel::*;

        match self {
            DPadHorizontal | DPadVertical => Some((DPadHorizontal, DPadVertical)),
            LeftStickHorizontal | LeftStickVertical => {
                Some((LeftStickHorizontal, LeftStickVertical))
            }
            RightStickHorizontal | RightStickVertical => {
                Some((RightStickHorizontal, RightStickVertical))
            }
            LeftTrigger | RightTrigger => None,
        }
    }
}

/// An entry of a [`DeviceTemplate`](crate::device_template::DeviceTemplate) table
///
/// Each entry records where one canonical input lives on a particular piece of hardware.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Reflect,
)]
pub enum JoyButton {
    /// Where the start button lives
    Start,
    /// Where the select button lives
    Select,
    /// Where the bottom face button lives
    A,
    /// Where the right face button lives
    B,
    /// Where the left face button lives
    X,
    /// Where the top face button lives
    Y,
    /// Where the left shoulder button lives
    LeftBumper,
    /// Where the right shoulder button lives
    RightBumper,
    /// Where the left stick click lives
    LeftStickClick,
    /// Where the right stick click lives
    RightStickClick,
    /// D-pad up, when the hardware reports it as a button
    DPadUp,
    /// D-pad down, when the hardware reports it as a button
    DPadDown,
    /// D-pad left, when the hardware reports it as a button
    DPadLeft,
    /// D-pad right, when the hardware reports it as a button
    DPadRight,
    /// The d-pad's vertical axis, when the hardware reports it as an axis
    DPadVertical,
    /// The d-pad's horizontal axis, when the hardware reports it as an axis
    DPadHorizontal,
    /// The left trigger, as an axis or a button
    LeftTrigger,
    /// The right trigger, as an axis or a button
    RightTrigger,
    /// The left stick's horizontal axis
    LeftStickHorizontal,
    /// The left stick's vertical axis
    LeftStickVertical,
    /// The right stick's horizontal axis
    RightStickHorizontal,
    /// The right stick's vertical axis
    RightStickVertical,
}

impl JoyButton {
    /// The number of template entries
    pub const COUNT: usize = 22;

    /// Every template entry, in declaration order
    pub const ALL: [JoyButton; JoyButton::COUNT] = [
        JoyButton::Start,
        JoyButton::Select,
        JoyButton::A,
        JoyButton::B,
        JoyButton::X,
        JoyButton::Y,
        JoyButton::LeftBumper,
        JoyButton::RightBumper,
        JoyButton::LeftStickClick,
        JoyButton::RightStickClick,
        JoyButton::DPadUp,
        JoyButton::DPadDown,
        JoyButton::DPadLeft,
        JoyButton::DPadRight,
        JoyButton::DPadVertical,
        JoyButton::DPadHorizontal,
        JoyButton::LeftTrigger,
        JoyButton::RightTrigger,
        JoyButton::LeftStickHorizontal,
        JoyButton::LeftStickVertical,
        JoyButton::RightStickHorizontal,
        JoyButton::RightStickVertical,
    ];

    /// The position of this entry in [`JoyButton::ALL`]
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }
}
