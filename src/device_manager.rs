//! Matching connected devices to templates, and keeping players attached to their devices as gamepads come and go

use crate::device_template::TemplateRegistry;
use crate::gamepad::{AnalogChannel, JoyCode};
use crate::logical_device::{LogicalDevice, DEFAULT_PRESS_THRESHOLD};
use crate::platform::InputPlatform;
use bevy::log::{debug, info, warn};
use itertools::Itertools;

/// The default number of devices that can be attached at once
pub const DEFAULT_MAX_DEVICES: usize = 4;

/// Owns one [`LogicalDevice`] per attached controller, and tracks which player each platform slot belongs to
///
/// Players are numbered from 1.
/// On startup, slot `n` belongs to player `n + 1`.
/// When a device is unplugged, its player is freed and every later device keeps its player;
/// a newly plugged device takes the lowest free player.
#[derive(Debug, Clone)]
pub struct DeviceManager {
    max_devices: usize,
    press_threshold: f32,
    devices: Vec<LogicalDevice>,
    assignment: Vec<u8>,
    names: Vec<String>,
}

impl Default for DeviceManager {
    fn default() -> Self {
        DeviceManager::new(DEFAULT_MAX_DEVICES, DEFAULT_PRESS_THRESHOLD)
    }
}

impl DeviceManager {
    /// Creates a manager with no devices attached
    #[must_use]
    pub fn new(max_devices: usize, press_threshold: f32) -> Self {
        Self {
            max_devices,
            press_threshold,
            devices: Vec::new(),
            assignment: Vec::new(),
            names: Vec::new(),
        }
    }

    /// Rebuilds every device from scratch for this list of device names
    ///
    /// Each player's assignment is reset, so slot `n` belongs to player `n + 1`.
    /// Devices beyond the maximum, and devices that no template matches, are ignored.
    pub fn resolve_all(&mut self, registry: &TemplateRegistry, names: &[String]) {
        self.devices.clear();
        self.assignment.clear();

        for (slot, name) in names.iter().enumerate().take(self.max_devices) {
            let player = u8::try_from(slot + 1).unwrap_or(u8::MAX);
            self.assignment.push(player);
            self.attach(registry, name, slot, player);
        }

        self.names = names.to_vec();
    }

    /// Brings the attached devices up to date with the platform's list of device names
    ///
    /// Only a single device being plugged in or unplugged since the last call is tracked precisely:
    /// the change is assumed to have happened at the first position where the two lists differ.
    /// Larger changes fall back to [`resolve_all`](Self::resolve_all),
    /// and lists with the same length are assumed to be unchanged.
    pub fn reconcile(&mut self, registry: &TemplateRegistry, names: &[String]) {
        let old_len = self.names.len();
        let new_len = names.len();

        if old_len == new_len {
            if self.names.as_slice() != names {
                debug!("Device names changed without a device being added or removed");
                self.names = names.to_vec();
            }
            return;
        }

        if old_len.abs_diff(new_len) > 1 {
            info!("{} devices connected, reassigning every player", new_len);
            self.resolve_all(registry, names);
            return;
        }

        let index = self
            .names
            .iter()
            .zip(names)
            .position(|(old, new)| old != new)
            .unwrap_or(old_len.min(new_len));

        if new_len < old_len {
            self.remove_slot(registry, names, index);
        } else {
            self.insert_slot(registry, names, index);
        }

        self.names = names.to_vec();
    }

    /// The device belonging to a player
    #[must_use]
    pub fn controller(&self, player: u8) -> Option<&LogicalDevice> {
        self.devices.iter().find(|device| device.player() == player)
    }

    /// Mutable access to the device belonging to a player
    pub fn controller_mut(&mut self, player: u8) -> Option<&mut LogicalDevice> {
        self.devices.iter_mut().find(|device| device.player() == player)
    }

    /// Iterates over every attached device, in player order
    pub fn iter(&self) -> impl Iterator<Item = &LogicalDevice> {
        self.devices.iter().sorted_by_key(|device| device.player())
    }

    /// The number of devices attached to a template
    #[must_use]
    pub fn attached_count(&self) -> usize {
        self.devices.len()
    }

    /// The player each platform slot belongs to, in slot order
    #[must_use]
    pub fn assignment(&self) -> &[u8] {
        &self.assignment
    }

    /// Refreshes every device for the current tick
    pub fn refresh_all(&mut self, platform: &dyn InputPlatform) {
        for device in &mut self.devices {
            device.refresh(platform);
        }
    }

    /// The first button that went down this tick, along with the player that pressed it
    ///
    /// Players are scanned in order, then buttons in [`JoyCode::ALL`] order.
    #[must_use]
    pub fn button_pressed_this_tick(&self) -> Option<(JoyCode, u8)> {
        self.iter()
            .find_map(|device| device.first_just_pressed().map(|code| (code, device.player())))
    }

    /// The first non-trigger analog channel whose reading is further from zero than `threshold`
    ///
    /// Players are scanned in order, then channels in [`AnalogChannel::ALL`] order.
    #[must_use]
    pub fn first_moving_channel(
        &self,
        platform: &dyn InputPlatform,
        threshold: f32,
    ) -> Option<(AnalogChannel, u8)> {
        self.iter().find_map(|device| {
            AnalogChannel::ALL
                .into_iter()
                .filter(|channel| !channel.is_trigger())
                .find(|channel| device.analog_value(platform, *channel).abs() > threshold)
                .map(|channel| (channel, device.player()))
        })
    }

    fn attach(&mut self, registry: &TemplateRegistry, name: &str, slot: usize, player: u8) {
        match registry.find_matching(name) {
            Some(template) => {
                info!(
                    "Device `{}` in slot {} uses template `{}`, assigned to player {}",
                    name,
                    slot,
                    template.name(),
                    player
                );
                self.devices.push(
                    LogicalDevice::new(template.clone(), slot, player)
                        .with_press_threshold(self.press_threshold),
                );
            }
            None => warn!("No device template matches `{}`", name),
        }
    }

    fn remove_slot(&mut self, registry: &TemplateRegistry, names: &[String], index: usize) {
        if index >= self.assignment.len() {
            return;
        }

        let player = self.assignment.remove(index);
        info!("Device in slot {} disconnected, freeing player {}", index, player);

        self.devices.retain(|device| device.slot() != index);
        for device in &mut self.devices {
            if device.slot() > index {
                device.set_slot(device.slot() - 1);
            }
        }

        // A device that was past the maximum has shifted into the freed last slot
        if self.assignment.len() < self.max_devices && names.len() >= self.max_devices {
            let last = self.max_devices - 1;
            let player = self.lowest_free_player();
            self.assignment.push(player);
            self.attach(registry, &names[last], last, player);
        }
    }

    fn insert_slot(&mut self, registry: &TemplateRegistry, names: &[String], index: usize) {
        if index >= self.max_devices {
            return;
        }

        if self.assignment.len() >= self.max_devices {
            let last = self.max_devices - 1;
            self.assignment.truncate(last);
            self.devices.retain(|device| device.slot() != last);
        }

        for device in &mut self.devices {
            if device.slot() >= index {
                device.set_slot(device.slot() + 1);
            }
        }

        let player = self.lowest_free_player();
        self.assignment.insert(index, player);
        if let Some(name) = names.get(index) {
            self.attach(registry, name, index, player);
        }
    }

    fn lowest_free_player(&self) -> u8 {
        (1..=u8::MAX)
            .find(|player| !self.assignment.contains(player))
            .unwrap_or(u8::MAX)
    }
}
