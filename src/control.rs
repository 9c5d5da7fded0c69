//! Named controls: what designers author, and what the game reads back

use crate::binding::{AnalogBinding, Domain, MouseAxis, SlotBindings};
use crate::buttonlike::ControlButtons;
use crate::gamepad::AnalogChannel;
use crate::key_names::{joystick_name, key_name, mouse_button_name};
use bevy::reflect::Reflect;
use serde::{Deserialize, Serialize};

/// Which half of a bidirectional pair a control is
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Reflect)]
pub enum Direction {
    /// Left to right
    #[default]
    Horizontal,
    /// Down to up
    Vertical,
}

impl Direction {
    /// The persisted identifier of this direction
    #[must_use]
    pub fn id(self) -> i32 {
        match self {
            Direction::Horizontal => 0,
            Direction::Vertical => 1,
        }
    }

    /// Converts a persisted identifier back into a direction
    #[must_use]
    pub fn from_id(id: i32) -> Option<Self> {
        match id {
            0 => Some(Direction::Horizontal),
            1 => Some(Direction::Vertical),
            _ => None,
        }
    }
}

/// A control as authored by a designer
///
/// Inputs are referred to by name (see [`key_names`](crate::key_names)), and blank names mean "unbound".
/// Button controls only use the positive fields.
///
/// Two axis controls that are both bidirectional and share a link name form a pair:
/// one must be [`Direction::Horizontal`] and the other [`Direction::Vertical`].
/// Pairs are rebound together, so a single stick or set of four keys drives both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlDefinition {
    /// The unique name the game queries this control by
    pub name: String,
    /// A human-readable description, shown next to the control when rebinding
    pub description: String,
    /// The group this control is listed under when rebinding
    pub tab: String,
    /// The player whose joystick drives this control, starting from 1
    pub player: u8,
    /// Does this control produce a value in `[-1, 1]` rather than a single button?
    pub is_axis: bool,
    /// How fast, in units per second, a digital axis falls back to zero
    pub gravity: f32,
    /// How fast, in units per second, a digital axis moves while held
    pub sensitivity: f32,
    /// Is this axis half of a bidirectional pair?
    pub is_bidirectional: bool,
    /// The name shared by both halves of a bidirectional pair
    pub link_name: String,
    /// Which half of its pair this control is
    pub direction: Direction,
    /// The positive keyboard key
    pub key: String,
    /// The negative keyboard key
    pub negative_key: String,
    /// The positive mouse button
    pub mouse_button: String,
    /// The negative mouse button
    pub negative_mouse_button: String,
    /// The mouse axis added to this axis
    pub mouse_axis: Option<MouseAxis>,
    /// The positive gamepad button
    pub joystick_button: String,
    /// The negative gamepad button
    pub negative_joystick_button: String,
    /// The gamepad analog channel added to this axis
    pub joystick_axis: Option<AnalogChannel>,
}

impl Default for ControlDefinition {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            tab: String::new(),
            player: 1,
            is_axis: false,
            gravity: 3.0,
            sensitivity: 3.0,
            is_bidirectional: false,
            link_name: String::new(),
            direction: Direction::Horizontal,
            key: String::new(),
            negative_key: String::new(),
            mouse_button: String::new(),
            negative_mouse_button: String::new(),
            mouse_axis: None,
            joystick_button: String::new(),
            negative_joystick_button: String::new(),
            joystick_axis: None,
        }
    }
}

impl ControlDefinition {
    /// A button control with nothing bound
    #[must_use]
    pub fn button(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// An axis control with nothing bound
    #[must_use]
    pub fn axis(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_axis: true,
            ..Default::default()
        }
    }

    /// Makes this axis one half of a bidirectional pair
    #[must_use]
    pub fn linked(mut self, link_name: impl Into<String>, direction: Direction) -> Self {
        self.is_axis = true;
        self.is_bidirectional = true;
        self.link_name = link_name.into();
        self.direction = direction;
        self
    }

    /// Sets the description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the tab
    #[must_use]
    pub fn in_tab(mut self, tab: impl Into<String>) -> Self {
        self.tab = tab.into();
        self
    }

    /// Sets the player
    #[must_use]
    pub fn for_player(mut self, player: u8) -> Self {
        self.player = player;
        self
    }

    /// Sets gravity and sensitivity
    #[must_use]
    pub fn with_response(mut self, gravity: f32, sensitivity: f32) -> Self {
        self.gravity = gravity;
        self.sensitivity = sensitivity;
        self
    }

    /// Sets the positive keyboard key
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Sets the negative keyboard key
    #[must_use]
    pub fn with_negative_key(mut self, key: impl Into<String>) -> Self {
        self.negative_key = key.into();
        self
    }

    /// Sets the positive mouse button
    #[must_use]
    pub fn with_mouse_button(mut self, button: impl Into<String>) -> Self {
        self.mouse_button = button.into();
        self
    }

    /// Sets the negative mouse button
    #[must_use]
    pub fn with_negative_mouse_button(mut self, button: impl Into<String>) -> Self {
        self.negative_mouse_button = button.into();
        self
    }

    /// Sets the mouse axis
    #[must_use]
    pub fn with_mouse_axis(mut self, axis: MouseAxis) -> Self {
        self.mouse_axis = Some(axis);
        self
    }

    /// Sets the positive gamepad button
    #[must_use]
    pub fn with_joystick_button(mut self, button: impl Into<String>) -> Self {
        self.joystick_button = button.into();
        self
    }

    /// Sets the negative gamepad button
    #[must_use]
    pub fn with_negative_joystick_button(mut self, button: impl Into<String>) -> Self {
        self.negative_joystick_button = button.into();
        self
    }

    /// Sets the gamepad analog channel
    #[must_use]
    pub fn with_joystick_axis(mut self, channel: AnalogChannel) -> Self {
        self.joystick_axis = Some(channel);
        self
    }
}

/// Identifies a control within a [`ControlTable`](crate::control_table::ControlTable)
///
/// Ids stay valid when a table is cloned, and across tables resolved from the same definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect)]
pub struct ControlId(pub(crate) usize);

impl ControlId {
    /// The position of this control in authored order
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A control whose authored input names have been resolved into concrete bindings
#[derive(Debug, Clone)]
pub struct Control {
    definition: ControlDefinition,
    /// Inputs driving the control towards `1.0`, or pressing it
    pub positive: SlotBindings,
    /// Inputs driving the control towards `-1.0`
    pub negative: SlotBindings,
    /// Mouse motion added to the control's value
    pub mouse_axis: Option<MouseAxis>,
    /// Gamepad analog channel added to the control's value
    pub joystick_axis: Option<AnalogBinding>,
    pub(crate) partner: Option<ControlId>,
    pub(crate) accumulator: f64,
    pub(crate) buttons: ControlButtons,
    pub(crate) value: f32,
}

impl Control {
    pub(crate) fn new(
        definition: ControlDefinition,
        positive: SlotBindings,
        negative: SlotBindings,
    ) -> Self {
        let player = definition.player;
        Self {
            mouse_axis: definition.mouse_axis,
            joystick_axis: definition
                .joystick_axis
                .map(|channel| AnalogBinding { channel, player }),
            definition,
            positive,
            negative,
            partner: None,
            accumulator: 0.0,
            buttons: ControlButtons::default(),
            value: 0.0,
        }
    }

    /// The authored definition this control was resolved from
    ///
    /// Input names in it reflect the bindings at resolution time, not later rebinding:
    /// use [`to_definition`](Self::to_definition) for the current bindings.
    #[must_use]
    pub fn definition(&self) -> &ControlDefinition {
        &self.definition
    }

    /// The control's name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    /// The player whose joystick drives this control
    #[must_use]
    pub fn player(&self) -> u8 {
        self.definition.player
    }

    /// Is this an axis control?
    #[must_use]
    pub fn is_axis(&self) -> bool {
        self.definition.is_axis
    }

    /// Is this axis half of a bidirectional pair?
    #[must_use]
    pub fn is_bidirectional(&self) -> bool {
        self.definition.is_axis && self.definition.is_bidirectional
    }

    /// Which half of its pair this control is
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.definition.direction
    }

    /// The other half of this control's bidirectional pair
    #[must_use]
    pub fn partner(&self) -> Option<ControlId> {
        self.partner
    }

    /// Is any bound input held, as of the last update?
    #[must_use]
    pub fn pressed(&self) -> bool {
        self.buttons.down
    }

    /// Did any bound input go down at the last update?
    #[must_use]
    pub fn just_pressed(&self) -> bool {
        self.buttons.just_pressed
    }

    /// Did any bound input come up at the last update?
    #[must_use]
    pub fn just_released(&self) -> bool {
        self.buttons.just_released
    }

    /// The control's value as of the last update
    ///
    /// Button controls read `1.0` while pressed and `0.0` otherwise.
    #[must_use]
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Is nothing bound to one of this control's directions in the given domain?
    ///
    /// An axis bound to a continuous input (mouse or analog channel) is never missing anything in that domain.
    #[must_use]
    pub fn is_missing_input(&self, domain: Domain) -> bool {
        let continuous = match domain {
            Domain::KeyboardMouse => self.mouse_axis.is_some(),
            Domain::Joystick => self.joystick_axis.is_some(),
        };

        if self.is_axis() {
            !continuous && (self.positive.is_empty(domain) || self.negative.is_empty(domain))
        } else {
            self.positive.is_empty(domain)
        }
    }

    /// Drops any analog binding of the given domain
    pub fn clear_continuous(&mut self, domain: Domain) {
        match domain {
            Domain::KeyboardMouse => self.mouse_axis = None,
            Domain::Joystick => self.joystick_axis = None,
        }
    }

    /// An authored definition carrying this control's current bindings
    ///
    /// Gamepad bindings are attributed to the control's own player.
    #[must_use]
    pub fn to_definition(&self) -> ControlDefinition {
        let key = |slot: &SlotBindings| {
            slot.key
                .and_then(key_name)
                .map(str::to_string)
                .unwrap_or_default()
        };
        let mouse = |slot: &SlotBindings| {
            slot.mouse
                .and_then(mouse_button_name)
                .map(str::to_string)
                .unwrap_or_default()
        };
        let joystick = |slot: &SlotBindings| {
            slot.joystick
                .map(|binding| joystick_name(binding.button))
                .unwrap_or_default()
        };

        ControlDefinition {
            key: key(&self.positive),
            negative_key: key(&self.negative),
            mouse_button: mouse(&self.positive),
            negative_mouse_button: mouse(&self.negative),
            mouse_axis: self.mouse_axis,
            joystick_button: joystick(&self.positive),
            negative_joystick_button: joystick(&self.negative),
            joystick_axis: self.joystick_axis.map(|binding| binding.channel),
            ..self.definition.clone()
        }
    }
}
