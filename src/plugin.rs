//! Contains main plugin exported by this crate.

use crate::control::ControlDefinition;
use crate::device_template::TemplateRegistry;
use crate::errors::ConfigurationError;
use crate::input_manager::InputManager;
use crate::settings::InputSettings;

use bevy::app::{App, Plugin, PreUpdate};
use bevy::ecs::prelude::*;
use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::input::InputSystem;

/// A [`Plugin`] that reads Bevy's input resources every frame to drive an [`InputManager`] resource
///
/// The authored controls are resolved when the plugin is created,
/// so configuration errors surface before the app is built.
///
/// ## Systems
///
/// **WARNING:** This system runs during [`PreUpdate`].
/// If you have systems that care about controls and also run during this stage,
/// you must define an ordering between your systems or behavior will be very erratic.
/// The stable label for this system is [`InputRemapSystem::Update`].
///
/// - [`update_input_manager`](crate::systems::update_input_manager), which reconciles gamepads,
///   updates every control and drives rebinding
///     - labeled [`InputRemapSystem::Update`]
///
/// ## Resources
///
/// - [`InputManager`], the resource games query controls through
/// - [`InputSettings`], a copy of the settings the manager was created with
#[derive(Debug, Clone)]
pub struct InputRemapPlugin {
    manager: InputManager,
}

impl InputRemapPlugin {
    /// Resolves authored controls with default settings, matching every gamepad to [`TemplateRegistry::standard`]
    pub fn new(definitions: Vec<ControlDefinition>) -> Result<Self, ConfigurationError> {
        Self::with_settings(definitions, TemplateRegistry::standard(), InputSettings::default())
    }

    /// Resolves authored controls with custom templates and settings
    pub fn with_settings(
        definitions: Vec<ControlDefinition>,
        registry: TemplateRegistry,
        settings: InputSettings,
    ) -> Result<Self, ConfigurationError> {
        Ok(Self {
            manager: InputManager::new(definitions, registry, settings)?,
        })
    }
}

impl Plugin for InputRemapPlugin {
    fn build(&self, app: &mut App) {
        use crate::systems::update_input_manager;

        app.add_event::<MouseMotion>()
            .add_event::<MouseWheel>()
            .insert_resource(self.manager.settings().clone())
            .insert_resource(self.manager.clone())
            .configure_sets(PreUpdate, InputRemapSystem::Update.after(InputSystem))
            .add_systems(
                PreUpdate,
                update_input_manager.in_set(InputRemapSystem::Update),
            );
    }
}

/// [`SystemSet`]s for the [`crate::systems`] used by this crate
///
/// `Update` runs after Bevy's [`InputSystem`], so every control reflects this frame's input.
#[derive(SystemSet, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputRemapSystem {
    /// Updates every control and drives rebinding
    Update,
}
