//! Textual names for keys, mouse buttons and gamepad buttons
//!
//! Authored control data refers to inputs by name.
//! Names are matched case-insensitively, with all whitespace removed,
//! so `"Left Shift"`, `"leftshift"` and `"LEFTSHIFT"` all name [`KeyCode::ShiftLeft`].
//!
//! Every key answers to its canonical name (the first column of [`KEYBOARD_KEYS`]),
//! to its [`KeyCode`] variant name (`"ShiftLeft"`), and to a handful of common aliases.
//! Gamepad buttons are named `joystick` followed by the [`JoyCode`] name, as in `"Joystick A"`.
//! Gamepad fields can leave the prefix out: see [`lookup_joystick`].

use crate::gamepad::JoyCode;
use bevy::input::{keyboard::KeyCode, mouse::MouseButton};
use bevy::utils::HashMap;
use once_cell::sync::Lazy;

/// A named digital input: either a keyboard key or a canonical gamepad button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedInput {
    /// A keyboard key
    Keyboard(KeyCode),
    /// A gamepad button
    Joystick(JoyCode),
}

/// Every keyboard key that can be bound, with its canonical name
///
/// The position of a key in this table determines its persisted logical code (see [`key_code`]),
/// so new keys must only ever be appended.
pub const KEYBOARD_KEYS: &[(KeyCode, &str)] = &[
    (KeyCode::KeyA, "a"),
    (KeyCode::KeyB, "b"),
    (KeyCode::KeyC, "c"),
    (KeyCode::KeyD, "d"),
    (KeyCode::KeyE, "e"),
    (KeyCode::KeyF, "f"),
    (KeyCode::KeyG, "g"),
    (KeyCode::KeyH, "h"),
    (KeyCode::KeyI, "i"),
    (KeyCode::KeyJ, "j"),
    (KeyCode::KeyK, "k"),
    (KeyCode::KeyL, "l"),
    (KeyCode::KeyM, "m"),
    (KeyCode::KeyN, "n"),
    (KeyCode::KeyO, "o"),
    (KeyCode::KeyP, "p"),
    (KeyCode::KeyQ, "q"),
    (KeyCode::KeyR, "r"),
    (KeyCode::KeyS, "s"),
    (KeyCode::KeyT, "t"),
    (KeyCode::KeyU, "u"),
    (KeyCode::KeyV, "v"),
    (KeyCode::KeyW, "w"),
    (KeyCode::KeyX, "x"),
    (KeyCode::KeyY, "y"),
    (KeyCode::KeyZ, "z"),
    (KeyCode::Digit0, "0"),
    (KeyCode::Digit1, "1"),
    (KeyCode::Digit2, "2"),
    (KeyCode::Digit3, "3"),
    (KeyCode::Digit4, "4"),
    (KeyCode::Digit5, "5"),
    (KeyCode::Digit6, "6"),
    (KeyCode::Digit7, "7"),
    (KeyCode::Digit8, "8"),
    (KeyCode::Digit9, "9"),
    (KeyCode::F1, "f1"),
    (KeyCode::F2, "f2"),
    (KeyCode::F3, "f3"),
    (KeyCode::F4, "f4"),
    (KeyCode::F5, "f5"),
    (KeyCode::F6, "f6"),
    (KeyCode::F7, "f7"),
    (KeyCode::F8, "f8"),
    (KeyCode::F9, "f9"),
    (KeyCode::F10, "f10"),
    (KeyCode::F11, "f11"),
    (KeyCode::F12, "f12"),
    (KeyCode::ArrowUp, "up"),
    (KeyCode::ArrowDown, "down"),
    (KeyCode::ArrowLeft, "left"),
    (KeyCode::ArrowRight, "right"),
    (KeyCode::ShiftLeft, "leftshift"),
    (KeyCode::ShiftRight, "rightshift"),
    (KeyCode::ControlLeft, "leftctrl"),
    (KeyCode::ControlRight, "rightctrl"),
    (KeyCode::AltLeft, "leftalt"),
    (KeyCode::AltRight, "rightalt"),
    (KeyCode::SuperLeft, "leftsuper"),
    (KeyCode::SuperRight, "rightsuper"),
    (KeyCode::Space, "space"),
    (KeyCode::Enter, "enter"),
    (KeyCode::Escape, "escape"),
    (KeyCode::Tab, "tab"),
    (KeyCode::Backspace, "backspace"),
    (KeyCode::Delete, "delete"),
    (KeyCode::Insert, "insert"),
    (KeyCode::Home, "home"),
    (KeyCode::End, "end"),
    (KeyCode::PageUp, "pageup"),
    (KeyCode::PageDown, "pagedown"),
    (KeyCode::CapsLock, "capslock"),
    (KeyCode::NumLock, "numlock"),
    (KeyCode::ScrollLock, "scrolllock"),
    (KeyCode::PrintScreen, "printscreen"),
    (KeyCode::Pause, "pause"),
    (KeyCode::ContextMenu, "menu"),
    (KeyCode::Numpad0, "keypad0"),
    (KeyCode::Numpad1, "keypad1"),
    (KeyCode::Numpad2, "keypad2"),
    (KeyCode::Numpad3, "keypad3"),
    (KeyCode::Numpad4, "keypad4"),
    (KeyCode::Numpad5, "keypad5"),
    (KeyCode::Numpad6, "keypad6"),
    (KeyCode::Numpad7, "keypad7"),
    (KeyCode::Numpad8, "keypad8"),
    (KeyCode::Numpad9, "keypad9"),
    (KeyCode::NumpadAdd, "keypadplus"),
    (KeyCode::NumpadSubtract, "keypadminus"),
    (KeyCode::NumpadMultiply, "keypadmultiply"),
    (KeyCode::NumpadDivide, "keypaddivide"),
    (KeyCode::NumpadDecimal, "keypadperiod"),
    (KeyCode::NumpadEnter, "keypadenter"),
    (KeyCode::Backquote, "backquote"),
    (KeyCode::Minus, "minus"),
    (KeyCode::Equal, "equals"),
    (KeyCode::BracketLeft, "leftbracket"),
    (KeyCode::BracketRight, "rightbracket"),
    (KeyCode::Backslash, "backslash"),
    (KeyCode::Semicolon, "semicolon"),
    (KeyCode::Quote, "quote"),
    (KeyCode::Comma, "comma"),
    (KeyCode::Period, "period"),
    (KeyCode::Slash, "slash"),
];

const KEY_ALIASES: &[(&str, KeyCode)] = &[
    ("uparrow", KeyCode::ArrowUp),
    ("downarrow", KeyCode::ArrowDown),
    ("leftarrow", KeyCode::ArrowLeft),
    ("rightarrow", KeyCode::ArrowRight),
    ("leftcontrol", KeyCode::ControlLeft),
    ("rightcontrol", KeyCode::ControlRight),
    ("return", KeyCode::Enter),
    ("esc", KeyCode::Escape),
    ("alpha0", KeyCode::Digit0),
    ("alpha1", KeyCode::Digit1),
    ("alpha2", KeyCode::Digit2),
    ("alpha3", KeyCode::Digit3),
    ("alpha4", KeyCode::Digit4),
    ("alpha5", KeyCode::Digit5),
    ("alpha6", KeyCode::Digit6),
    ("alpha7", KeyCode::Digit7),
    ("alpha8", KeyCode::Digit8),
    ("alpha9", KeyCode::Digit9),
];

const JOYSTICK_PREFIX: &str = "joystick";

static INPUT_NAMES: Lazy<HashMap<String, NamedInput>> = Lazy::new(|| {
    let mut names = HashMap::default();

    for &(key, name) in KEYBOARD_KEYS {
        names.insert(name.to_string(), NamedInput::Keyboard(key));
        names
            .entry(normalize(&format!("{key:?}")))
            .or_insert(NamedInput::Keyboard(key));
    }

    for &(alias, key) in KEY_ALIASES {
        names
            .entry(alias.to_string())
            .or_insert(NamedInput::Keyboard(key));
    }

    for code in JoyCode::ALL {
        names.insert(joystick_name(code), NamedInput::Joystick(code));
    }

    names
});

/// Lowercases a name and strips every whitespace character
#[must_use]
pub fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Does this name mean "nothing bound"?
#[must_use]
pub fn is_blank(name: &str) -> bool {
    name.chars().all(char::is_whitespace)
}

/// Looks up a key or gamepad button by name
///
/// Returns `None` both for blank names and names that match nothing:
/// use [`is_blank`] to tell them apart.
#[must_use]
pub fn lookup(name: &str) -> Option<NamedInput> {
    INPUT_NAMES.get(&normalize(name)).copied()
}

/// Looks up a gamepad button named in a gamepad field
///
/// The `joystick` prefix is implied, so `"A"`, `"Joystick A"` and `"joysticka"` all name [`JoyCode::A`].
/// Names that are not gamepad buttons return `None`, even if they name a key.
#[must_use]
pub fn lookup_joystick(name: &str) -> Option<JoyCode> {
    let name = normalize(name);
    let as_joystick = |name: &str| match INPUT_NAMES.get(name) {
        Some(NamedInput::Joystick(code)) => Some(*code),
        _ => None,
    };

    as_joystick(&format!("{JOYSTICK_PREFIX}{name}")).or_else(|| {
        name.starts_with(JOYSTICK_PREFIX)
            .then(|| as_joystick(&name))
            .flatten()
    })
}

/// The canonical name of a keyboard key
///
/// Keys outside of [`KEYBOARD_KEYS`] have no name and cannot be bound.
#[must_use]
pub fn key_name(key: KeyCode) -> Option<&'static str> {
    KEYBOARD_KEYS
        .iter()
        .find(|(candidate, _)| *candidate == key)
        .map(|(_, name)| *name)
}

/// The canonical name of a gamepad button, such as `"joysticka"`
#[must_use]
pub fn joystick_name(code: JoyCode) -> String {
    format!("{JOYSTICK_PREFIX}{}", code.name().to_lowercase())
}

/// The persisted logical code of a keyboard key: its 1-based position in [`KEYBOARD_KEYS`]
#[must_use]
pub fn key_code(key: KeyCode) -> Option<i32> {
    let index = KEYBOARD_KEYS
        .iter()
        .position(|(candidate, _)| *candidate == key)?;
    i32::try_from(index + 1).ok()
}

/// Converts a positive persisted logical code back into a keyboard key
#[must_use]
pub fn key_from_code(code: i32) -> Option<KeyCode> {
    let index = usize::try_from(code.checked_sub(1)?).ok()?;
    KEYBOARD_KEYS.get(index).map(|(key, _)| *key)
}

/// Every mouse button that can be bound, in persisted index order
pub const MOUSE_BUTTONS: [MouseButton; 5] = [
    MouseButton::Left,
    MouseButton::Right,
    MouseButton::Middle,
    MouseButton::Back,
    MouseButton::Forward,
];

const MOUSE_BUTTON_NAMES: [&str; 5] = ["left", "right", "middle", "back", "forward"];

/// Parses a mouse button field
///
/// Buttons may be named (`"left"`) or numbered (`"0"`).
/// Anything else, including a blank field, means no mouse button.
#[must_use]
pub fn parse_mouse_button(name: &str) -> Option<MouseButton> {
    let name = normalize(name);
    let index = MOUSE_BUTTON_NAMES
        .iter()
        .position(|candidate| *candidate == name)
        .or_else(|| name.parse::<usize>().ok())?;
    MOUSE_BUTTONS.get(index).copied()
}

/// The name of a mouse button, as accepted by [`parse_mouse_button`]
#[must_use]
pub fn mouse_button_name(button: MouseButton) -> Option<&'static str> {
    let index = mouse_index(button)?;
    MOUSE_BUTTON_NAMES.get(usize::try_from(index).ok()?).copied()
}

/// The persisted index of a mouse button, starting from `0` for the left button
#[must_use]
pub fn mouse_index(button: MouseButton) -> Option<i32> {
    let index = MOUSE_BUTTONS.iter().position(|b| *b == button)?;
    i32::try_from(index).ok()
}

/// Converts a persisted mouse button index back into a button
///
/// Negative indices mean no button.
#[must_use]
pub fn mouse_from_index(index: i32) -> Option<MouseButton> {
    MOUSE_BUTTONS.get(usize::try_from(index).ok()?).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_ignore_case_and_spaces() {
        assert_eq!(lookup("Left Shift"), Some(NamedInput::Keyboard(KeyCode::ShiftLeft)));
        assert_eq!(lookup("SPACE"), Some(NamedInput::Keyboard(KeyCode::Space)));
        assert_eq!(lookup("ShiftLeft"), Some(NamedInput::Keyboard(KeyCode::ShiftLeft)));
        assert_eq!(lookup("up arrow"), Some(NamedInput::Keyboard(KeyCode::ArrowUp)));
    }

    #[test]
    fn joystick_names_are_prefixed() {
        assert_eq!(lookup("Joystick A"), Some(NamedInput::Joystick(JoyCode::A)));
        assert_eq!(
            lookup("joystickLeftTrigger"),
            Some(NamedInput::Joystick(JoyCode::LeftTrigger))
        );
        assert_eq!(joystick_name(JoyCode::DPadUp), "joystickdpadup");
    }

    #[test]
    fn gamepad_fields_imply_the_prefix() {
        assert_eq!(lookup_joystick("A"), Some(JoyCode::A));
        assert_eq!(lookup_joystick("Left Trigger"), Some(JoyCode::LeftTrigger));
        assert_eq!(lookup_joystick("Joystick A"), Some(JoyCode::A));
        assert_eq!(lookup_joystick("joystickdpadup"), Some(JoyCode::DPadUp));
        assert_eq!(lookup_joystick("space"), None);
        assert_eq!(lookup_joystick("joystick"), None);
    }

    #[test]
    fn blank_and_unknown_names() {
        assert!(is_blank(""));
        assert!(is_blank("  "));
        assert_eq!(lookup(""), None);
        assert!(!is_blank("flux capacitor"));
        assert_eq!(lookup("flux capacitor"), None);
    }

    #[test]
    fn every_key_has_a_unique_code() {
        for (index, (key, name)) in KEYBOARD_KEYS.iter().enumerate() {
            let code = key_code(*key).unwrap();
            assert_eq!(code as usize, index + 1);
            assert_eq!(key_from_code(code), Some(*key));
            assert_eq!(lookup(name), Some(NamedInput::Keyboard(*key)));
        }

        assert_eq!(key_from_code(0), None);
        assert_eq!(key_from_code(-3), None);
    }

    #[test]
    fn mouse_buttons_by_name_or_number() {
        assert_eq!(parse_mouse_button("left"), Some(MouseButton::Left));
        assert_eq!(parse_mouse_button("1"), Some(MouseButton::Right));
        assert_eq!(parse_mouse_button("Middle"), Some(MouseButton::Middle));
        assert_eq!(parse_mouse_button(""), None);
        assert_eq!(parse_mouse_button("thumb"), None);
        assert_eq!(parse_mouse_button("9"), None);

        assert_eq!(mouse_index(MouseButton::Middle), Some(2));
        assert_eq!(mouse_from_index(-1), None);
        assert_eq!(mouse_button_name(MouseButton::Right), Some("right"));
    }
}
