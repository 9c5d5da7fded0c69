//! Saving and loading controls as flat delimited strings
//!
//! Two formats are supported, both made of records separated by [`RECORD_SEPARATOR`],
//! with fields separated by [`FIELD_SEPARATOR`]. Every record, including the last, is followed by a record separator.
//!
//! - **Bindings** (12 fields) store what players rebound: name, key, mouse button, joystick button,
//!   joystick player, negative key, negative mouse button, negative joystick button,
//!   negative joystick player, mouse axis, joystick axis and joystick axis player.
//!   Inputs are stored as logical codes: positive for keys, negative for gamepad buttons, `0` for nothing,
//!   and `-1` for no mouse button.
//! - **Definitions** (18 fields) store authored controls: name, player, tab, description, key,
//!   mouse button, joystick button, is-axis, negative key, negative mouse button,
//!   negative joystick button, mouse axis, joystick axis, gravity, sensitivity, is-bidirectional,
//!   link name and direction. Inputs are stored by name.
//!
//! Malformed records are skipped with a warning; the rest of the blob still loads.

use crate::binding::{AnalogBinding, JoystickBinding, MouseAxis, SlotBindings};
use crate::control::{ControlDefinition, Direction};
use crate::control_table::ControlTable;
use crate::errors::PersistenceError;
use crate::gamepad::{AnalogChannel, JoyCode};
use crate::key_names::{key_code, key_from_code, mouse_from_index, mouse_index};
use bevy::log::warn;
use bevy::utils::HashMap;
use itertools::Itertools;

/// Separates the fields of a record
pub const FIELD_SEPARATOR: char = '!';

/// Terminates every record
pub const RECORD_SEPARATOR: char = '|';

/// The preference key player bindings are saved under
pub const BINDINGS_KEY: &str = "input_remapper.bindings";

/// The preference key authored definitions are saved under
pub const DEFINITIONS_KEY: &str = "input_remapper.definitions";

const BINDING_FIELDS: usize = 12;
const DEFINITION_FIELDS: usize = 18;

/// A key-value store for persisted strings, such as a settings file or browser local storage
pub trait PreferenceStore {
    /// The value saved under `key`, if any
    fn get(&self, key: &str) -> Option<String>;

    /// Saves `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: String);

    /// Forgets the value saved under `key`
    fn remove(&mut self, key: &str);
}

/// A [`PreferenceStore`] that only lives in memory
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemoryPreferences {
    values: HashMap<String, String>,
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }
}

/// How much of a persisted blob was usable
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    /// Records that were applied
    pub applied: usize,
    /// Records that were malformed, or named an unknown control, and were skipped
    pub skipped: usize,
}

/// Encodes the current bindings of every control
pub fn encode_bindings(table: &ControlTable) -> Result<String, PersistenceError> {
    let mut blob = String::new();

    for (_, control) in table.iter() {
        check_reserved(control.name(), control.name())?;

        let player = control.player();
        let (joystick_axis, joystick_axis_player) = control
            .joystick_axis
            .map_or((0, player), |binding| (binding.channel.id(), binding.player));

        let mut fields = vec![control.name().to_string()];
        fields.extend(slot_fields(&control.positive, player));
        fields.extend(slot_fields(&control.negative, player));
        fields.push(control.mouse_axis.map_or(0, MouseAxis::id).to_string());
        fields.push(joystick_axis.to_string());
        fields.push(joystick_axis_player.to_string());

        push_record(&mut blob, &fields);
    }

    Ok(blob)
}

/// Applies persisted bindings to the controls of a table
///
/// Controls missing from the blob keep their current bindings.
pub fn apply_bindings(table: &mut ControlTable, blob: &str) -> LoadReport {
    let mut report = LoadReport::default();

    for (index, record) in records(blob).enumerate() {
        let fields = record.split(FIELD_SEPARATOR).collect_vec();
        let Some(parsed) = parse_binding_record(&fields) else {
            warn!(
                "Skipping malformed binding record {} with {} fields: `{}`",
                index,
                fields.len(),
                record
            );
            report.skipped += 1;
            continue;
        };

        let Ok(id) = table.id(fields[0]) else {
            warn!("Skipping bindings for unknown control `{}`", fields[0]);
            report.skipped += 1;
            continue;
        };

        let control = table.get_mut(id);
        control.positive = parsed.positive;
        control.negative = parsed.negative;
        control.mouse_axis = parsed.mouse_axis;
        control.joystick_axis = parsed.joystick_axis;
        report.applied += 1;
    }

    report
}

/// Encodes authored definitions
pub fn encode_definitions(definitions: &[ControlDefinition]) -> Result<String, PersistenceError> {
    let mut blob = String::new();

    for definition in definitions {
        let text_fields = [
            &definition.name,
            &definition.tab,
            &definition.description,
            &definition.key,
            &definition.mouse_button,
            &definition.joystick_button,
            &definition.negative_key,
            &definition.negative_mouse_button,
            &definition.negative_joystick_button,
            &definition.link_name,
        ];
        for field in text_fields {
            check_reserved(&definition.name, field)?;
        }

        let fields = [
            definition.name.clone(),
            definition.player.to_string(),
            definition.tab.clone(),
            definition.description.clone(),
            definition.key.clone(),
            definition.mouse_button.clone(),
            definition.joystick_button.clone(),
            definition.is_axis.to_string(),
            definition.negative_key.clone(),
            definition.negative_mouse_button.clone(),
            definition.negative_joystick_button.clone(),
            definition.mouse_axis.map_or(0, MouseAxis::id).to_string(),
            definition.joystick_axis.map_or(0, AnalogChannel::id).to_string(),
            definition.gravity.to_string(),
            definition.sensitivity.to_string(),
            definition.is_bidirectional.to_string(),
            definition.link_name.clone(),
            definition.direction.id().to_string(),
        ];
        push_record(&mut blob, &fields);
    }

    Ok(blob)
}

/// Decodes authored definitions, skipping malformed records
pub fn decode_definitions(blob: &str) -> (Vec<ControlDefinition>, LoadReport) {
    let mut definitions = Vec::new();
    let mut report = LoadReport::default();

    for (index, record) in records(blob).enumerate() {
        let fields = record.split(FIELD_SEPARATOR).collect_vec();
        match parse_definition_record(&fields) {
            Some(definition) => {
                definitions.push(definition);
                report.applied += 1;
            }
            None => {
                warn!(
                    "Skipping malformed definition record {} with {} fields: `{}`",
                    index,
                    fields.len(),
                    record
                );
                report.skipped += 1;
            }
        }
    }

    (definitions, report)
}

fn records(blob: &str) -> impl Iterator<Item = &str> {
    blob.split(RECORD_SEPARATOR)
        .filter(|record| !record.is_empty())
}

fn push_record(blob: &mut String, fields: &[String]) {
    blob.push_str(&fields.iter().join(&FIELD_SEPARATOR.to_string()));
    blob.push(RECORD_SEPARATOR);
}

fn check_reserved(control: &str, value: &str) -> Result<(), PersistenceError> {
    if value.contains([FIELD_SEPARATOR, RECORD_SEPARATOR]) {
        return Err(PersistenceError::ReservedCharacter {
            control: control.to_string(),
            value: value.to_string(),
        });
    }
    Ok(())
}

fn slot_fields(slot: &SlotBindings, player: u8) -> [String; 4] {
    let (joystick, joystick_player) = slot
        .joystick
        .map_or((0, player), |binding| (binding.button.code(), binding.player));

    [
        slot.key.and_then(key_code).unwrap_or(0).to_string(),
        slot.mouse.and_then(mouse_index).unwrap_or(-1).to_string(),
        joystick.to_string(),
        joystick_player.to_string(),
    ]
}

struct BindingRecord {
    positive: SlotBindings,
    negative: SlotBindings,
    mouse_axis: Option<MouseAxis>,
    joystick_axis: Option<AnalogBinding>,
}

fn parse_binding_record(fields: &[&str]) -> Option<BindingRecord> {
    if fields.len() != BINDING_FIELDS {
        return None;
    }

    let positive = parse_slot(&fields[1..5])?;
    let negative = parse_slot(&fields[5..9])?;
    let mouse_axis = optional(fields[9].parse().ok()?, MouseAxis::from_id)?;
    let channel = optional(fields[10].parse().ok()?, AnalogChannel::from_id)?;
    let player: u8 = fields[11].parse().ok()?;

    Some(BindingRecord {
        positive,
        negative,
        mouse_axis,
        joystick_axis: channel.map(|channel| AnalogBinding { channel, player }),
    })
}

/// Parses the key, mouse, joystick and joystick player fields of one slot
///
/// Codes with the wrong sign for their field make the record malformed.
fn parse_slot(fields: &[&str]) -> Option<SlotBindings> {
    let key: i32 = fields[0].parse().ok()?;
    let mouse: i32 = fields[1].parse().ok()?;
    let joystick: i32 = fields[2].parse().ok()?;
    let player: u8 = fields[3].parse().ok()?;

    let key = optional(key, key_from_code)?;
    let mouse = if mouse < 0 {
        None
    } else {
        Some(mouse_from_index(mouse)?)
    };
    let joystick = optional(joystick, JoyCode::from_code)?
        .map(|button| JoystickBinding { button, player });

    Some(SlotBindings {
        key,
        mouse,
        joystick,
    })
}

/// Converts a persisted code where `0` means nothing, failing on codes that convert to nothing else
fn optional<T>(code: i32, convert: impl Fn(i32) -> Option<T>) -> Option<Option<T>> {
    if code == 0 {
        Some(None)
    } else {
        convert(code).map(Some)
    }
}

fn parse_definition_record(fields: &[&str]) -> Option<ControlDefinition> {
    if fields.len() != DEFINITION_FIELDS {
        return None;
    }

    Some(ControlDefinition {
        name: fields[0].to_string(),
        player: fields[1].parse().ok()?,
        tab: fields[2].to_string(),
        description: fields[3].to_string(),
        key: fields[4].to_string(),
        mouse_button: fields[5].to_string(),
        joystick_button: fields[6].to_string(),
        is_axis: fields[7].parse().ok()?,
        negative_key: fields[8].to_string(),
        negative_mouse_button: fields[9].to_string(),
        negative_joystick_button: fields[10].to_string(),
        mouse_axis: optional(fields[11].parse().ok()?, MouseAxis::from_id)?,
        joystick_axis: optional(fields[12].parse().ok()?, AnalogChannel::from_id)?,
        gravity: fields[13].parse().ok()?,
        sensitivity: fields[14].parse().ok()?,
        is_bidirectional: fields[15].parse().ok()?,
        link_name: fields[16].to_string(),
        direction: Direction::from_id(fields[17].parse().ok()?)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blobs_end_with_a_record_separator() {
        let definitions = vec![ControlDefinition::button("Jump").with_key("space")];
        let blob = encode_definitions(&definitions).unwrap();
        assert!(blob.ends_with(RECORD_SEPARATOR));
        assert_eq!(blob.matches(FIELD_SEPARATOR).count(), DEFINITION_FIELDS - 1);
    }

    #[test]
    fn reserved_characters_are_rejected() {
        let definitions = vec![ControlDefinition::button("Jump").with_description("Up! Up!")];
        assert_eq!(
            encode_definitions(&definitions),
            Err(PersistenceError::ReservedCharacter {
                control: "Jump".to_string(),
                value: "Up! Up!".to_string(),
            })
        );
    }

    #[test]
    fn wrong_sign_is_malformed() {
        // A gamepad code in the key field
        assert!(parse_slot(&["-3", "-1", "0", "1"]).is_none());
        // A key code in the joystick field
        assert!(parse_slot(&["0", "-1", "5", "1"]).is_none());
        assert!(parse_slot(&["0", "-1", "-3", "1"]).is_some());
    }

    #[test]
    fn memory_preferences() {
        let mut store = MemoryPreferences::default();
        assert_eq!(store.get(BINDINGS_KEY), None);

        store.set(BINDINGS_KEY, "blob".to_string());
        assert_eq!(store.get(BINDINGS_KEY).as_deref(), Some("blob"));

        store.remove(BINDINGS_KEY);
        assert_eq!(store.get(BINDINGS_KEY), None);
    }
}
