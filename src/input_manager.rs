//! The [`InputManager`]: the single entry point games query controls through

use crate::axislike::AxisIntegrator;
use crate::binding::Domain;
use crate::control::{ControlDefinition, ControlId};
use crate::control_table::{ControlTable, DisplayRow};
use crate::device_manager::DeviceManager;
use crate::device_template::TemplateRegistry;
use crate::errors::{ConfigurationError, LoadError, PersistenceError, UnconfiguredControl};
use crate::logical_device::LogicalDevice;
use crate::persistence::{
    apply_bindings, decode_definitions, encode_bindings, encode_definitions, LoadReport,
    PreferenceStore, BINDINGS_KEY, DEFINITIONS_KEY,
};
use crate::platform::InputPlatform;
use crate::rebinding::{CaptureOutcome, RebindSession, RebindTarget};
use crate::settings::InputSettings;
use bevy::ecs::prelude::Resource;
use bevy::input::keyboard::KeyCode;
use bevy::log::{debug, info};

/// Owns every control, device and rebinding session, and updates them once per tick
///
/// Games read controls by name through [`get_key`](Self::get_key), [`get_axis`](Self::get_axis) and friends.
/// These always read the committed controls:
/// edits made while the editor is open only take effect once [`commit_edits`](Self::commit_edits) is called.
///
/// Under Bevy, this is a [`Resource`] kept up to date by [`InputRemapPlugin`](crate::plugin::InputRemapPlugin).
/// Elsewhere, call [`update`](Self::update) once per tick with your own [`InputPlatform`].
#[derive(Resource, Debug, Clone)]
pub struct InputManager {
    settings: InputSettings,
    registry: TemplateRegistry,
    devices: DeviceManager,
    defaults: Vec<ControlDefinition>,
    committed: ControlTable,
    editor: Option<Editor>,
    last_tick: Option<u64>,
}

#[derive(Debug, Clone)]
struct Editor {
    working: ControlTable,
    session: RebindSession,
    opened_at: Option<u64>,
}

impl InputManager {
    /// Resolves authored controls into a new manager
    pub fn new(
        definitions: Vec<ControlDefinition>,
        registry: TemplateRegistry,
        settings: InputSettings,
    ) -> Result<Self, ConfigurationError> {
        let committed = ControlTable::resolve(&definitions, &settings)?;
        info!(
            "Resolved {} controls for {} players",
            committed.len(),
            committed.total_players()
        );

        Ok(Self {
            devices: DeviceManager::new(settings.max_devices, settings.press_threshold),
            settings,
            registry,
            defaults: definitions,
            committed,
            editor: None,
            last_tick: None,
        })
    }

    /// Advances every control by one tick
    ///
    /// In order: attached devices are reconciled with the connected ones, devices are refreshed,
    /// controls read their inputs, and then the editor handles Escape and rebinding capture.
    pub fn update(&mut self, platform: &dyn InputPlatform) -> CaptureOutcome {
        let names = platform.connected_device_names();
        self.devices.reconcile(&self.registry, &names);
        self.devices.refresh_all(platform);

        let integrator = AxisIntegrator {
            tick_length: self.settings.tick_length,
        };
        self.committed.update(platform, &self.devices, &integrator);

        let tick = platform.current_tick();
        let outcome = self.update_editor(platform, tick);
        self.last_tick = Some(tick);
        outcome
    }

    fn update_editor(&mut self, platform: &dyn InputPlatform, tick: u64) -> CaptureOutcome {
        let Some(editor) = &mut self.editor else {
            return CaptureOutcome::Idle;
        };

        if !editor.session.is_capturing() {
            let just_opened = editor.opened_at == Some(tick);
            if self.settings.escape_closes_editor
                && !just_opened
                && platform.key_pressed(KeyCode::Escape)
            {
                debug!("Escape pressed, closing the editor");
                self.editor = None;
            }
            return CaptureOutcome::Idle;
        }

        editor
            .session
            .update(&mut editor.working, platform, &self.devices, &self.settings)
    }

    fn table_for_queries(&self) -> &ControlTable {
        &self.committed
    }

    /// Is any input bound to this control held?
    pub fn get_key(&self, name: &str) -> Result<bool, UnconfiguredControl> {
        self.table_for_queries()
            .control(name)
            .map(|control| control.pressed())
    }

    /// Did any input bound to this control go down this tick?
    pub fn get_key_down(&self, name: &str) -> Result<bool, UnconfiguredControl> {
        self.table_for_queries()
            .control(name)
            .map(|control| control.just_pressed())
    }

    /// Did any input bound to this control come up this tick?
    pub fn get_key_up(&self, name: &str) -> Result<bool, UnconfiguredControl> {
        self.table_for_queries()
            .control(name)
            .map(|control| control.just_released())
    }

    /// The value of this control
    ///
    /// Axis controls read from `-1.0` to `1.0`, plus any bound mouse motion.
    /// Button controls read `1.0` while held and `0.0` otherwise.
    pub fn get_axis(&self, name: &str) -> Result<f32, UnconfiguredControl> {
        self.table_for_queries()
            .control(name)
            .map(|control| control.value())
    }

    /// Is there a control with this name?
    #[must_use]
    pub fn is_control(&self, name: &str) -> bool {
        self.committed.id(name).is_ok()
    }

    /// The device attached to a player, if any
    #[must_use]
    pub fn controller(&self, player: u8) -> Option<&LogicalDevice> {
        self.devices.controller(player)
    }

    /// Every attached device
    #[must_use]
    pub fn devices(&self) -> &DeviceManager {
        &self.devices
    }

    /// The templates devices are matched against
    #[must_use]
    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    /// Mutable access to the templates devices are matched against
    ///
    /// Newly registered templates apply to devices plugged in afterwards.
    pub fn registry_mut(&mut self) -> &mut TemplateRegistry {
        &mut self.registry
    }

    /// The settings this manager was created with
    #[must_use]
    pub fn settings(&self) -> &InputSettings {
        &self.settings
    }

    /// The controls games read from
    #[must_use]
    pub fn controls(&self) -> &ControlTable {
        &self.committed
    }

    /// Opens the editor on a copy of the current controls
    ///
    /// Does nothing if it is already open.
    pub fn open_editor(&mut self) {
        if self.editor.is_some() {
            return;
        }

        debug!("Opening the editor");
        self.editor = Some(Editor {
            working: self.committed.clone(),
            session: RebindSession::default(),
            opened_at: self.last_tick,
        });
    }

    /// Is the editor open?
    #[must_use]
    pub fn is_editor_open(&self) -> bool {
        self.editor.is_some()
    }

    /// Closes the editor, throwing away every edit
    pub fn close_editor(&mut self) {
        self.discard_edits();
    }

    /// The controls being edited, while the editor is open
    #[must_use]
    pub fn editor_controls(&self) -> Option<&ControlTable> {
        self.editor.as_ref().map(|editor| &editor.working)
    }

    /// The rows an editor screen should show, optionally limited to one tab
    #[must_use]
    pub fn editor_rows(&self, tab: Option<&str>) -> Vec<DisplayRow> {
        self.editor
            .as_ref()
            .map(|editor| editor.working.display_rows(tab))
            .unwrap_or_default()
    }

    /// Starts capturing inputs for a control
    ///
    /// Returns `Ok(false)` if the editor is closed or another control is being rebound.
    pub fn begin_edit(&mut self, name: &str, domain: Domain) -> Result<bool, UnconfiguredControl> {
        let Some(editor) = &mut self.editor else {
            debug!("Cannot rebind `{}` while the editor is closed", name);
            return Ok(false);
        };

        let id = editor.working.id(name)?;
        Ok(editor.session.begin(&editor.working, id, domain))
    }

    /// Stops capturing inputs, keeping whatever was captured so far
    pub fn cancel_edit(&mut self) {
        if let Some(editor) = &mut self.editor {
            editor.session.cancel();
        }
    }

    /// Is a control being rebound?
    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.editing().is_some()
    }

    /// What the rebinding session is waiting on
    #[must_use]
    pub fn editing(&self) -> Option<RebindTarget> {
        self.editor
            .as_ref()
            .and_then(|editor| editor.session.target())
    }

    /// Does a control (or its partner) have a direction with nothing bound?
    ///
    /// Reads the editor's controls while it is open.
    pub fn missing_input(&self, name: &str, domain: Domain) -> Result<bool, UnconfiguredControl> {
        let table = self
            .editor
            .as_ref()
            .map_or(&self.committed, |editor| &editor.working);
        let id: ControlId = table.id(name)?;
        Ok(table.missing_input(id, domain))
    }

    /// Restores every control's authored bindings
    ///
    /// While the editor is open, only the edited copy is reset (and any rebinding is cancelled).
    pub fn reset_to_defaults(&mut self) -> Result<(), ConfigurationError> {
        let table = ControlTable::resolve(&self.defaults, &self.settings)?;

        match &mut self.editor {
            Some(editor) => {
                editor.session.cancel();
                editor.working = table;
            }
            None => self.committed.adopt_bindings(&table),
        }
        Ok(())
    }

    /// Makes every edit live, and closes the editor
    pub fn commit_edits(&mut self) {
        if let Some(editor) = self.editor.take() {
            info!("Committing edited controls");
            self.committed.adopt_bindings(&editor.working);
        }
    }

    /// Throws away every edit, and closes the editor
    pub fn discard_edits(&mut self) {
        if self.editor.take().is_some() {
            debug!("Discarding edited controls");
        }
    }

    /// Saves every control's current bindings
    pub fn save_bindings(&self, store: &mut dyn PreferenceStore) -> Result<(), PersistenceError> {
        let blob = encode_bindings(&self.committed)?;
        store.set(BINDINGS_KEY, blob);
        Ok(())
    }

    /// Loads bindings saved by [`save_bindings`](Self::save_bindings)
    ///
    /// When nothing was saved, every control keeps its current bindings.
    pub fn load_bindings(&mut self, store: &dyn PreferenceStore) -> Result<LoadReport, LoadError> {
        let Some(blob) = store.get(BINDINGS_KEY) else {
            info!("No saved bindings, using defaults");
            return Err(LoadError::Missing {
                key: BINDINGS_KEY.to_string(),
            });
        };

        let report = apply_bindings(&mut self.committed, &blob);
        info!(
            "Loaded saved bindings: {} applied, {} skipped",
            report.applied, report.skipped
        );
        Ok(report)
    }

    /// Saves every control as an authored definition, carrying its current bindings
    pub fn save_definitions(
        &self,
        store: &mut dyn PreferenceStore,
    ) -> Result<(), PersistenceError> {
        let blob = encode_definitions(&self.committed.definitions())?;
        store.set(DEFINITIONS_KEY, blob);
        Ok(())
    }

    /// Replaces every control with definitions saved by [`save_definitions`](Self::save_definitions)
    ///
    /// The loaded definitions become the new defaults. The editor is closed without committing.
    /// If the definitions do not resolve, nothing changes.
    pub fn load_definitions(
        &mut self,
        store: &dyn PreferenceStore,
    ) -> Result<LoadReport, LoadError> {
        let Some(blob) = store.get(DEFINITIONS_KEY) else {
            info!("No saved definitions, using defaults");
            return Err(LoadError::Missing {
                key: DEFINITIONS_KEY.to_string(),
            });
        };

        let (definitions, report) = decode_definitions(&blob);
        let table =
            ControlTable::resolve(&definitions, &self.settings).map_err(LoadError::Invalid)?;

        self.editor = None;
        self.committed = table;
        self.defaults = definitions;
        info!(
            "Loaded {} saved definitions, skipped {}",
            report.applied, report.skipped
        );
        Ok(report)
    }
}
