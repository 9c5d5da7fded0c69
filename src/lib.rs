#![forbid(missing_docs)]
#![forbid(unsafe_code)]
#![warn(clippy::doc_markdown)]
#![doc = include_str!("../README.md")]

pub mod axislike;
pub mod binding;
pub mod buttonlike;
pub mod control;
pub mod control_table;
pub mod device_manager;
pub mod device_template;
mod display_impl;
pub mod errors;
pub mod gamepad;
pub mod input_manager;
mod input_mocking;
pub mod input_streams;
pub mod key_names;
pub mod logical_device;
pub mod persistence;
pub mod platform;
pub mod plugin;
pub mod rebinding;
pub mod settings;
pub mod systems;

// Re-export this at the root level
pub use input_mocking::MockPlatform;

/// Everything you need to get started
pub mod prelude {
    pub use crate::binding::{Domain, MouseAxis};
    pub use crate::control::{ControlDefinition, Direction};
    pub use crate::device_template::{DeviceTemplate, TemplateRegistry};
    pub use crate::gamepad::{AnalogChannel, JoyCode};
    pub use crate::input_manager::InputManager;
    pub use crate::persistence::{MemoryPreferences, PreferenceStore};
    pub use crate::platform::InputPlatform;
    pub use crate::plugin::{InputRemapPlugin, InputRemapSystem};
    pub use crate::settings::InputSettings;
}
