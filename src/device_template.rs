//! Controller layouts, describing where each canonical input lives on a particular piece of hardware
//!
//! A [`DeviceTemplate`] is matched against the name a device reports,
//! then cloned into the [`LogicalDevice`](crate::logical_device::LogicalDevice) built for it.
//! Templates are registered, in priority order, in a [`TemplateRegistry`].

use crate::gamepad::{AnalogChannel, JoyButton};
use bevy::log::debug;
use bevy::reflect::Reflect;
use serde::{Deserialize, Serialize};

/// Where a template entry lives on the hardware
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Reflect)]
pub enum HardwareInput {
    /// This device does not have this input
    #[default]
    Unbound,
    /// A raw digital button, numbered by the platform
    Button(u8),
    /// A raw analog axis, numbered by the platform
    Axis(u8),
}

/// Which analog channels of a template report their readings with the opposite sign
///
/// Triggers are never inverted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct Inversion {
    /// Flip the left stick's horizontal axis
    pub left_stick_horizontal: bool,
    /// Flip the left stick's vertical axis
    pub left_stick_vertical: bool,
    /// Flip the right stick's horizontal axis
    pub right_stick_horizontal: bool,
    /// Flip the right stick's vertical axis
    pub right_stick_vertical: bool,
    /// Flip the d-pad's horizontal axis
    pub dpad_horizontal: bool,
    /// Flip the d-pad's vertical axis
    pub dpad_vertical: bool,
}

impl Inversion {
    /// The factor raw readings of this channel are multiplied by
    #[must_use]
    pub fn sign(&self, channel: AnalogChannel) -> f32 {
        let inverted = match channel {
            AnalogChannel::LeftStickHorizontal => self.left_stick_horizontal,
            AnalogChannel::LeftStickVertical => self.left_stick_vertical,
            AnalogChannel::RightStickHorizontal => self.right_stick_horizontal,
            AnalogChannel::RightStickVertical => self.right_stick_vertical,
            AnalogChannel::DPadHorizontal => self.dpad_horizontal,
            AnalogChannel::DPadVertical => self.dpad_vertical,
            AnalogChannel::LeftTrigger | AnalogChannel::RightTrigger => false,
        };

        if inverted {
            -1.0
        } else {
            1.0
        }
    }
}

/// A named controller layout
///
/// Templates are immutable once registered.
/// A template matches every device whose reported name contains the template's name,
/// so a template with an empty name matches everything.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceTemplate {
    name: String,
    table: [HardwareInput; JoyButton::COUNT],
    inversion: Inversion,
}

impl DeviceTemplate {
    /// Creates a template with every entry unbound and nothing inverted
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table: [HardwareInput::Unbound; JoyButton::COUNT],
            inversion: Inversion::default(),
        }
    }

    /// Maps one template entry onto the hardware
    #[must_use]
    pub fn with(mut self, slot: JoyButton, input: HardwareInput) -> Self {
        self.table[slot.index()] = input;
        self
    }

    /// Sets which channels are inverted
    #[must_use]
    pub fn with_inversion(mut self, inversion: Inversion) -> Self {
        self.inversion = inversion;
        self
    }

    /// Builds a template from authored data
    ///
    /// Entries missing from the descriptor, or marked as not existing, are left unbound.
    #[must_use]
    pub fn from_descriptor(descriptor: &TemplateDescriptor) -> Self {
        let mut template =
            DeviceTemplate::new(descriptor.name.clone()).with_inversion(descriptor.inversion);

        for entry in descriptor.inputs.iter().filter(|entry| entry.exists) {
            let input = if entry.is_axis {
                HardwareInput::Axis(entry.number)
            } else {
                HardwareInput::Button(entry.number)
            };
            template.table[entry.slot.index()] = input;
        }

        template
    }

    /// The layout of a wired Xbox 360 controller, as numbered by the Windows desktop driver
    ///
    /// The d-pad is only exposed as a pair of axes, and both stick vertical axes report down as positive.
    #[must_use]
    pub fn xbox_360() -> Self {
        use HardwareInput::{Axis, Button};
        use JoyButton::*;

        DeviceTemplate::new("XBOX 360 For Windows")
            .with(Start, Button(7))
            .with(Select, Button(6))
            .with(A, Button(0))
            .with(B, Button(1))
            .with(X, Button(2))
            .with(Y, Button(3))
            .with(LeftBumper, Button(4))
            .with(RightBumper, Button(5))
            .with(LeftStickClick, Button(8))
            .with(RightStickClick, Button(9))
            .with(LeftTrigger, Axis(8))
            .with(RightTrigger, Axis(9))
            .with(LeftStickHorizontal, Axis(0))
            .with(LeftStickVertical, Axis(1))
            .with(RightStickHorizontal, Axis(3))
            .with(RightStickVertical, Axis(4))
            .with(DPadHorizontal, Axis(5))
            .with(DPadVertical, Axis(6))
            .with_inversion(Inversion {
                left_stick_vertical: true,
                right_stick_vertical: true,
                ..Default::default()
            })
    }

    /// The normalized layout that Bevy reports for every gamepad it recognizes
    ///
    /// Raw numbers follow the order used by [`InputStreams`](crate::input_streams::InputStreams).
    /// This template has an empty name, so it matches any device:
    /// register it last, as a fallback.
    #[must_use]
    pub fn standard_layout() -> Self {
        use HardwareInput::{Axis, Button};
        use JoyButton::*;

        DeviceTemplate::new("")
            .with(A, Button(0))
            .with(B, Button(1))
            .with(Y, Button(2))
            .with(X, Button(3))
            .with(LeftBumper, Button(6))
            .with(RightBumper, Button(8))
            .with(Select, Button(10))
            .with(Start, Button(11))
            .with(LeftStickClick, Button(13))
            .with(RightStickClick, Button(14))
            .with(DPadUp, Button(15))
            .with(DPadDown, Button(16))
            .with(DPadLeft, Button(17))
            .with(DPadRight, Button(18))
            .with(LeftStickHorizontal, Axis(0))
            .with(LeftStickVertical, Axis(1))
            .with(RightStickHorizontal, Axis(3))
            .with(RightStickVertical, Axis(4))
            .with(LeftTrigger, Axis(6))
            .with(RightTrigger, Axis(7))
    }

    /// The name devices are matched against
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Where this template entry lives on the hardware
    #[must_use]
    pub fn hardware(&self, slot: JoyButton) -> HardwareInput {
        self.table[slot.index()]
    }

    /// Which channels are inverted
    #[must_use]
    pub fn inversion(&self) -> &Inversion {
        &self.inversion
    }

    /// Does a device with this name use this template?
    #[must_use]
    pub fn matches(&self, device_name: &str) -> bool {
        device_name.contains(self.name.as_str())
    }
}

/// Authored, serializable form of a [`DeviceTemplate`]
///
/// Convert it with [`DeviceTemplate::from_descriptor`].
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateDescriptor {
    /// The name devices are matched against
    pub name: String,
    /// One entry per template slot that this hardware has
    pub inputs: Vec<InputDescriptor>,
    /// Which channels are inverted
    pub inversion: Inversion,
}

/// Authored description of a single template entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputDescriptor {
    /// The template entry being described
    pub slot: JoyButton,
    /// Does the hardware have this input at all?
    pub exists: bool,
    /// The raw button or axis number
    pub number: u8,
    /// Is the raw input an axis rather than a button?
    pub is_axis: bool,
}

/// The catalogue of known controller layouts
///
/// Lookups return the first registered template whose name matches, so register specific templates first.
#[derive(Debug, Default, Clone)]
pub struct TemplateRegistry {
    templates: Vec<DeviceTemplate>,
}

impl TemplateRegistry {
    /// A registry containing only [`DeviceTemplate::standard_layout`], which matches every device
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = TemplateRegistry::default();
        registry.register(DeviceTemplate::standard_layout());
        registry
    }

    /// Adds a template after every previously registered one
    pub fn register(&mut self, template: DeviceTemplate) -> &mut Self {
        debug!("Registered device template `{}`", template.name());
        self.templates.push(template);
        self
    }

    /// The first template, in registration order, that matches this device name
    #[must_use]
    pub fn find_matching(&self, device_name: &str) -> Option<&DeviceTemplate> {
        self.templates
            .iter()
            .find(|template| template.matches(device_name))
    }

    /// Iterates over every template, in registration order
    pub fn iter(&self) -> impl Iterator<Item = &DeviceTemplate> {
        self.templates.iter()
    }

    /// The number of registered templates
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Are there no templates at all?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
