//! Concrete physical inputs that a control can be bound to

use crate::gamepad::{AnalogChannel, JoyCode};
use bevy::input::{keyboard::KeyCode, mouse::MouseButton};
use bevy::reflect::Reflect;
use serde::{Deserialize, Serialize};

/// The two families of input a control can be bound in
///
/// Every control keeps separate keyboard/mouse and joystick bindings,
/// and rebinding one domain never touches the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Reflect)]
pub enum Domain {
    /// Keys, mouse buttons and mouse axes
    KeyboardMouse,
    /// Gamepad buttons and analog channels
    Joystick,
}

/// A continuous mouse input
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Reflect,
)]
pub enum MouseAxis {
    /// Vertical pointer motion this tick, positive upwards
    MoveVertical,
    /// Horizontal pointer motion this tick, positive to the right
    MoveHorizontal,
    /// Scroll wheel motion this tick
    ScrollWheel,
}

impl MouseAxis {
    /// Every mouse axis, in declaration order
    pub const ALL: [MouseAxis; 3] = [
        MouseAxis::MoveVertical,
        MouseAxis::MoveHorizontal,
        MouseAxis::ScrollWheel,
    ];

    /// The persisted identifier of this axis, from `1` to `3`
    ///
    /// `0` is reserved for "no axis".
    #[inline]
    #[must_use]
    pub fn id(self) -> i32 {
        self as i32 + 1
    }

    /// Converts a persisted identifier back into an axis
    #[must_use]
    pub fn from_id(id: i32) -> Option<Self> {
        let index = usize::try_from(id.checked_sub(1)?).ok()?;
        MouseAxis::ALL.get(index).copied()
    }
}

/// A gamepad button, as pressed by a specific player's device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Reflect)]
pub struct JoystickBinding {
    /// The canonical button
    pub button: JoyCode,
    /// The player whose device must press it, starting from 1
    pub player: u8,
}

/// A gamepad analog channel, as moved on a specific player's device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Reflect)]
pub struct AnalogBinding {
    /// The canonical channel
    pub channel: AnalogChannel,
    /// The player whose device must move it, starting from 1
    pub player: u8,
}

/// A single digital input that can occupy a control slot
///
/// Keyboard and joystick inputs never share a slot:
/// each [`SlotBindings`] field only accepts its own kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Binding {
    /// A keyboard key
    Keyboard(KeyCode),
    /// A mouse button
    Mouse(MouseButton),
    /// A gamepad button on a particular player's device
    Joystick(JoystickBinding),
}

impl Binding {
    /// The domain this input is bound in
    #[must_use]
    pub fn domain(&self) -> Domain {
        match self {
            Binding::Keyboard(_) | Binding::Mouse(_) => Domain::KeyboardMouse,
            Binding::Joystick(_) => Domain::Joystick,
        }
    }
}

/// The digital inputs bound to one direction of a control
///
/// Axis controls have a positive and a negative side; button controls only use the positive one.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotBindings {
    /// The bound keyboard key
    pub key: Option<KeyCode>,
    /// The bound mouse button
    pub mouse: Option<MouseButton>,
    /// The bound gamepad button
    pub joystick: Option<JoystickBinding>,
}

impl SlotBindings {
    /// Does this slot hold exactly this input?
    #[must_use]
    pub fn holds(&self, binding: &Binding) -> bool {
        match *binding {
            Binding::Keyboard(key) => self.key == Some(key),
            Binding::Mouse(button) => self.mouse == Some(button),
            Binding::Joystick(joystick) => self.joystick == Some(joystick),
        }
    }

    /// Removes this input from the slot, returning whether it was present
    pub fn remove(&mut self, binding: &Binding) -> bool {
        if !self.holds(binding) {
            return false;
        }

        match binding {
            Binding::Keyboard(_) => self.key = None,
            Binding::Mouse(_) => self.mouse = None,
            Binding::Joystick(_) => self.joystick = None,
        }
        true
    }

    /// Clears every input of the given domain
    pub fn clear(&mut self, domain: Domain) {
        match domain {
            Domain::KeyboardMouse => {
                self.key = None;
                self.mouse = None;
            }
            Domain::Joystick => self.joystick = None,
        }
    }

    /// Binds a single input, replacing anything of the same kind
    pub fn assign(&mut self, binding: Binding) {
        match binding {
            Binding::Keyboard(key) => self.key = Some(key),
            Binding::Mouse(button) => self.mouse = Some(button),
            Binding::Joystick(joystick) => self.joystick = Some(joystick),
        }
    }

    /// Is nothing of this domain bound?
    #[must_use]
    pub fn is_empty(&self, domain: Domain) -> bool {
        match domain {
            Domain::KeyboardMouse => self.key.is_none() && self.mouse.is_none(),
            Domain::Joystick => self.joystick.is_none(),
        }
    }

    /// Iterates over every bound input
    pub fn bindings(&self) -> impl Iterator<Item = Binding> {
        let key = self.key.map(Binding::Keyboard);
        let mouse = self.mouse.map(Binding::Mouse);
        let joystick = self.joystick.map(Binding::Joystick);
        key.into_iter().chain(mouse).chain(joystick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_keep_domains_apart() {
        let mut slot = SlotBindings {
            key: Some(KeyCode::Space),
            mouse: Some(MouseButton::Left),
            joystick: Some(JoystickBinding {
                button: JoyCode::A,
                player: 1,
            }),
        };

        slot.clear(Domain::KeyboardMouse);
        assert!(slot.is_empty(Domain::KeyboardMouse));
        assert!(!slot.is_empty(Domain::Joystick));
    }

    #[test]
    fn joystick_bindings_are_per_player() {
        let slot = SlotBindings {
            joystick: Some(JoystickBinding {
                button: JoyCode::A,
                player: 1,
            }),
            ..Default::default()
        };

        let other_player = Binding::Joystick(JoystickBinding {
            button: JoyCode::A,
            player: 2,
        });
        assert!(!slot.holds(&other_player));
    }

    #[test]
    fn assigning_replaces_same_kind_only() {
        let mut slot = SlotBindings::default();
        slot.assign(Binding::Keyboard(KeyCode::KeyA));
        slot.assign(Binding::Mouse(MouseButton::Right));
        slot.assign(Binding::Keyboard(KeyCode::KeyB));

        assert_eq!(slot.key, Some(KeyCode::KeyB));
        assert_eq!(slot.mouse, Some(MouseButton::Right));
        assert_eq!(slot.bindings().count(), 2);
    }

    #[test]
    fn mouse_axis_ids() {
        assert_eq!(MouseAxis::MoveVertical.id(), 1);
        assert_eq!(MouseAxis::from_id(3), Some(MouseAxis::ScrollWheel));
        assert_eq!(MouseAxis::from_id(0), None);
    }
}
