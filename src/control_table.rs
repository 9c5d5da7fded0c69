//! The resolved set of named controls, and the per-tick update that reads their inputs

use crate::axislike::{blend, opposed_triggers, AxisIntegrator, HeldDirections};
use crate::binding::{AnalogBinding, Binding, Domain, JoystickBinding, MouseAxis, SlotBindings};
use crate::buttonlike::{ButtonState, ControlButtons};
use crate::control::{Control, ControlDefinition, ControlId};
use crate::device_manager::DeviceManager;
use crate::errors::{ConfigurationError, UnconfiguredControl};
use crate::key_names::{is_blank, lookup, lookup_joystick, parse_mouse_button, NamedInput};
use crate::platform::InputPlatform;
use crate::settings::InputSettings;
use bevy::input::keyboard::KeyCode;
use bevy::input::mouse::MouseButton;
use bevy::log::warn;
use bevy::utils::{HashMap, HashSet};
use itertools::Itertools;

/// One row of a rebinding screen: a control, or both halves of a bidirectional pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayRow {
    /// The first control of the row, in authored order
    pub control: ControlId,
    /// The other half of the pair, if this row is a bidirectional pair
    pub partner: Option<ControlId>,
}

/// Every named control, resolved from authored [`ControlDefinition`]s
///
/// Controls are stored in authored order and addressed by [`ControlId`].
/// Names are unique: when two definitions share a name, the first one wins.
#[derive(Debug, Clone, Default)]
pub struct ControlTable {
    controls: Vec<Control>,
    ids: HashMap<String, ControlId>,
    tabs: Vec<String>,
    bidirectional: HashSet<String>,
    total_players: u8,
}

impl ControlTable {
    /// Resolves authored definitions into a table
    ///
    /// Input names are looked up case-insensitively.
    /// Blank names leave a slot unbound; names that match nothing are an error.
    /// Gamepad button names in keyboard fields are ignored with a warning.
    /// Gamepad fields imply the `joystick` prefix, and must name a gamepad button.
    /// Player numbers are clamped to `1..=settings.max_players`.
    ///
    /// Bidirectional pairs are linked once every control has resolved.
    pub fn resolve(
        definitions: &[ControlDefinition],
        settings: &InputSettings,
    ) -> Result<Self, ConfigurationError> {
        let mut table = ControlTable::default();

        for definition in definitions {
            if table.ids.contains_key(&definition.name) {
                warn!(
                    "Control `{}` is defined more than once, keeping the first definition",
                    definition.name
                );
                continue;
            }

            let control = resolve_control(definition, settings.max_players)?;
            let id = ControlId(table.controls.len());

            if !table.tabs.contains(&definition.tab) {
                table.tabs.push(definition.tab.clone());
            }
            if control.is_bidirectional() {
                table.bidirectional.insert(definition.name.clone());
            }
            table.total_players = table.total_players.max(control.player());
            table.ids.insert(definition.name.clone(), id);
            table.controls.push(control);
        }

        table.relink()?;
        Ok(table)
    }

    /// Links every bidirectional axis to its partner
    ///
    /// Link names are compared with spaces removed.
    /// An axis whose link name matches no other axis stays unpaired.
    pub fn relink(&mut self) -> Result<(), ConfigurationError> {
        let links: Vec<Option<String>> = self
            .controls
            .iter()
            .map(|control| {
                control
                    .is_bidirectional()
                    .then(|| normalize_link(&control.definition().link_name))
            })
            .collect();

        let mut partners = Vec::with_capacity(self.controls.len());
        for (index, control) in self.controls.iter().enumerate() {
            let Some(link) = &links[index] else {
                partners.push(None);
                continue;
            };

            if link.is_empty() {
                return Err(ConfigurationError::MissingLinkName {
                    control: control.name().to_string(),
                });
            }

            let matches = links
                .iter()
                .enumerate()
                .filter(|&(other, other_link)| other != index && other_link.as_ref() == Some(link))
                .map(|(other, _)| other)
                .collect_vec();

            match matches.as_slice() {
                [] => {
                    warn!("Bidirectional control `{}` has no partner", control.name());
                    partners.push(None);
                }
                [partner] => {
                    if self.controls[*partner].direction() == control.direction() {
                        return Err(ConfigurationError::SameDirection {
                            control: control.name().to_string(),
                            link: link.clone(),
                        });
                    }
                    partners.push(Some(ControlId(*partner)));
                }
                _ => {
                    return Err(ConfigurationError::TooManyLinks {
                        control: control.name().to_string(),
                        link: link.clone(),
                    })
                }
            }
        }

        for (control, partner) in self.controls.iter_mut().zip(partners) {
            control.partner = partner;
        }
        Ok(())
    }

    /// Looks up a control by name
    pub fn id(&self, name: &str) -> Result<ControlId, UnconfiguredControl> {
        self.ids
            .get(name)
            .copied()
            .ok_or_else(|| UnconfiguredControl {
                name: name.to_string(),
            })
    }

    /// The control with this id
    ///
    /// # Panics
    ///
    /// Panics if the id came from a table resolved from different definitions.
    #[must_use]
    pub fn get(&self, id: ControlId) -> &Control {
        &self.controls[id.0]
    }

    /// Mutable access to the control with this id
    ///
    /// # Panics
    ///
    /// Panics if the id came from a table resolved from different definitions.
    pub fn get_mut(&mut self, id: ControlId) -> &mut Control {
        &mut self.controls[id.0]
    }

    /// Looks up a control by name
    pub fn control(&self, name: &str) -> Result<&Control, UnconfiguredControl> {
        self.id(name).map(|id| self.get(id))
    }

    /// Iterates over every control in authored order
    pub fn iter(&self) -> impl Iterator<Item = (ControlId, &Control)> {
        self.controls
            .iter()
            .enumerate()
            .map(|(index, control)| (ControlId(index), control))
    }

    /// The number of controls
    #[must_use]
    pub fn len(&self) -> usize {
        self.controls.len()
    }

    /// Are there no controls at all?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    /// Every tab, in order of first appearance
    #[must_use]
    pub fn tabs(&self) -> &[String] {
        &self.tabs
    }

    /// The highest player number used by any control
    #[must_use]
    pub fn total_players(&self) -> u8 {
        self.total_players
    }

    /// Is this control one half of a bidirectional pair?
    #[must_use]
    pub fn is_bidirectional(&self, name: &str) -> bool {
        self.bidirectional.contains(name)
    }

    /// The other half of a control's bidirectional pair
    #[must_use]
    pub fn partner(&self, id: ControlId) -> Option<ControlId> {
        self.get(id).partner()
    }

    /// The rows a rebinding screen should show, in authored order
    ///
    /// A bidirectional pair is shown once, on the row of whichever half was authored first.
    /// Pass a tab to only list that tab's controls.
    #[must_use]
    pub fn display_rows(&self, tab: Option<&str>) -> Vec<DisplayRow> {
        let mut shown = HashSet::default();
        let mut rows = Vec::new();

        for (id, control) in self.iter() {
            if tab.map_or(false, |tab| control.definition().tab != tab) {
                continue;
            }
            if !shown.insert(id) {
                continue;
            }

            let partner = control.partner();
            if let Some(partner) = partner {
                shown.insert(partner);
            }
            rows.push(DisplayRow {
                control: id,
                partner,
            });
        }

        rows
    }

    /// Does this control, or its partner, have a direction with nothing bound in this domain?
    #[must_use]
    pub fn missing_input(&self, id: ControlId, domain: Domain) -> bool {
        let control = self.get(id);
        control.is_missing_input(domain)
            || control
                .partner()
                .map_or(false, |partner| self.get(partner).is_missing_input(domain))
    }

    /// Authored definitions carrying every control's current bindings, in authored order
    #[must_use]
    pub fn definitions(&self) -> Vec<ControlDefinition> {
        self.controls.iter().map(Control::to_definition).collect()
    }

    /// Copies every binding from another table resolved from the same definitions
    ///
    /// Runtime state (axis accumulators and button edges) is kept.
    /// If the tables do not hold the same controls, this table is replaced wholesale.
    pub fn adopt_bindings(&mut self, other: &ControlTable) {
        let same_controls = self.controls.len() == other.controls.len()
            && self
                .controls
                .iter()
                .zip(&other.controls)
                .all(|(ours, theirs)| ours.name() == theirs.name());

        if !same_controls {
            *self = other.clone();
            return;
        }

        for (ours, theirs) in self.controls.iter_mut().zip(&other.controls) {
            ours.positive = theirs.positive;
            ours.negative = theirs.negative;
            ours.mouse_axis = theirs.mouse_axis;
            ours.joystick_axis = theirs.joystick_axis;
        }
    }

    /// Every control holding this digital input
    #[must_use]
    pub fn holders(&self, binding: &Binding) -> Vec<ControlId> {
        self.iter()
            .filter(|(_, control)| {
                control.positive.holds(binding) || control.negative.holds(binding)
            })
            .map(|(id, _)| id)
            .collect()
    }

    /// Unbinds a digital input from every control except `keep`, returning the controls that lost it
    pub fn evict(&mut self, binding: &Binding, keep: &[ControlId]) -> Vec<ControlId> {
        self.evict_where(keep, |control| {
            let positive = control.positive.remove(binding);
            let negative = control.negative.remove(binding);
            positive || negative
        })
    }

    /// Unbinds a mouse axis from every control except `keep`, returning the controls that lost it
    pub fn evict_mouse_axis(&mut self, axis: MouseAxis, keep: &[ControlId]) -> Vec<ControlId> {
        self.evict_where(keep, |control| {
            let held = control.mouse_axis == Some(axis);
            if held {
                control.mouse_axis = None;
            }
            held
        })
    }

    /// Unbinds an analog channel from every control except `keep`, returning the controls that lost it
    pub fn evict_analog(&mut self, analog: AnalogBinding, keep: &[ControlId]) -> Vec<ControlId> {
        self.evict_where(keep, |control| {
            let held = control.joystick_axis == Some(analog);
            if held {
                control.joystick_axis = None;
            }
            held
        })
    }

    fn evict_where(
        &mut self,
        keep: &[ControlId],
        mut evict: impl FnMut(&mut Control) -> bool,
    ) -> Vec<ControlId> {
        let mut evicted = Vec::new();
        for (index, control) in self.controls.iter_mut().enumerate() {
            let id = ControlId(index);
            if keep.contains(&id) {
                continue;
            }
            if evict(control) {
                evicted.push(id);
            }
        }
        evicted
    }

    /// Reads every control's inputs for this tick
    ///
    /// Devices must already have been refreshed for the tick.
    pub fn update(
        &mut self,
        platform: &dyn InputPlatform,
        devices: &DeviceManager,
        integrator: &AxisIntegrator,
    ) {
        for control in &mut self.controls {
            update_control(control, platform, devices, integrator);
        }
    }
}

fn normalize_link(link: &str) -> String {
    link.replace(' ', "")
}

fn resolve_control(
    definition: &ControlDefinition,
    max_players: u8,
) -> Result<Control, ConfigurationError> {
    let mut definition = definition.clone();
    definition.player = definition.player.clamp(1, max_players.max(1));
    let player = definition.player;

    let positive = SlotBindings {
        key: resolve_key(&definition, &definition.key)?,
        mouse: parse_mouse_button(&definition.mouse_button),
        joystick: resolve_joystick(&definition, &definition.joystick_button, player)?,
    };
    let negative = SlotBindings {
        key: resolve_key(&definition, &definition.negative_key)?,
        mouse: parse_mouse_button(&definition.negative_mouse_button),
        joystick: resolve_joystick(&definition, &definition.negative_joystick_button, player)?,
    };

    Ok(Control::new(definition, positive, negative))
}

fn resolve_named(
    definition: &ControlDefinition,
    name: &str,
) -> Result<Option<NamedInput>, ConfigurationError> {
    if is_blank(name) {
        return Ok(None);
    }

    lookup(name)
        .map(Some)
        .ok_or_else(|| ConfigurationError::UnknownKey {
            control: definition.name.clone(),
            key: name.to_string(),
        })
}

fn resolve_key(
    definition: &ControlDefinition,
    name: &str,
) -> Result<Option<KeyCode>, ConfigurationError> {
    Ok(match resolve_named(definition, name)? {
        Some(NamedInput::Keyboard(key)) => Some(key),
        Some(NamedInput::Joystick(_)) => {
            warn!(
                "Control `{}` has gamepad button `{}` in a keyboard field, ignoring it",
                definition.name, name
            );
            None
        }
        None => None,
    })
}

/// Gamepad fields name a [`JoyCode`](crate::gamepad::JoyCode), with or without the `joystick` prefix
fn resolve_joystick(
    definition: &ControlDefinition,
    name: &str,
    player: u8,
) -> Result<Option<JoystickBinding>, ConfigurationError> {
    if is_blank(name) {
        return Ok(None);
    }

    lookup_joystick(name)
        .map(|button| Some(JoystickBinding { button, player }))
        .ok_or_else(|| ConfigurationError::UnknownKey {
            control: definition.name.clone(),
            key: name.to_string(),
        })
}

fn key_state(platform: &dyn InputPlatform, key: KeyCode) -> ButtonState {
    if platform.key_pressed(key) {
        ButtonState::JustPressed
    } else if platform.key_down(key) {
        ButtonState::Pressed
    } else if platform.key_released(key) {
        ButtonState::JustReleased
    } else {
        ButtonState::Released
    }
}

fn mouse_state(platform: &dyn InputPlatform, button: MouseButton) -> ButtonState {
    if platform.mouse_button_pressed(button) {
        ButtonState::JustPressed
    } else if platform.mouse_button_down(button) {
        ButtonState::Pressed
    } else if platform.mouse_button_released(button) {
        ButtonState::JustReleased
    } else {
        ButtonState::Released
    }
}

fn slot_buttons(
    slot: &SlotBindings,
    platform: &dyn InputPlatform,
    devices: &DeviceManager,
    include_joystick: bool,
) -> ControlButtons {
    let mut buttons = ControlButtons::default();

    if let Some(key) = slot.key {
        buttons.merge(key_state(platform, key));
    }
    if let Some(button) = slot.mouse {
        buttons.merge(mouse_state(platform, button));
    }
    if let Some(joystick) = slot.joystick.filter(|_| include_joystick) {
        let state = devices
            .controller(joystick.player)
            .map_or(ButtonState::Released, |device| {
                device.button_state(joystick.button)
            });
        buttons.merge(state);
    }

    buttons
}

/// The analog reading of a trigger held in a joystick slot
fn trigger_reading(
    joystick: Option<JoystickBinding>,
    platform: &dyn InputPlatform,
    devices: &DeviceManager,
) -> f32 {
    joystick
        .and_then(|binding| {
            let channel = binding.button.trigger_channel()?;
            let device = devices.controller(binding.player)?;
            Some(device.analog_value(platform, channel))
        })
        .unwrap_or_default()
}

fn update_control(
    control: &mut Control,
    platform: &dyn InputPlatform,
    devices: &DeviceManager,
    integrator: &AxisIntegrator,
) {
    let mut buttons = slot_buttons(&control.positive, platform, devices, true);
    let negative = slot_buttons(&control.negative, platform, devices, true);
    buttons.down |= negative.down;
    buttons.just_pressed |= negative.just_pressed;
    buttons.just_released |= negative.just_released;
    control.buttons = buttons;

    if !control.is_axis() {
        control.value = f32::from(u8::from(buttons.down));
        return;
    }

    // Two triggers on one axis are read as a single analog axis, never as buttons
    let is_trigger = |slot: &SlotBindings| {
        slot.joystick
            .map_or(false, |binding| binding.button.is_trigger())
    };
    let opposed = is_trigger(&control.positive) && is_trigger(&control.negative);

    let held = HeldDirections {
        positive: slot_buttons(&control.positive, platform, devices, !opposed).down,
        negative: slot_buttons(&control.negative, platform, devices, !opposed).down,
    };
    let gravity = control.definition().gravity;
    let sensitivity = control.definition().sensitivity;
    control.accumulator = integrator.step(control.accumulator, held, gravity, sensitivity);

    let analog = if opposed {
        opposed_triggers(
            trigger_reading(control.positive.joystick, platform, devices),
            trigger_reading(control.negative.joystick, platform, devices),
        )
    } else {
        control
            .joystick_axis
            .and_then(|binding| {
                devices
                    .controller(binding.player)
                    .map(|device| device.analog_value(platform, binding.channel))
            })
            .unwrap_or_default()
    };
    let mouse = control
        .mouse_axis
        .map_or(0.0, |axis| platform.mouse_axis(axis));

    control.value = blend(control.accumulator, analog, mouse);
}
