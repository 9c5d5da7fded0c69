//! Capturing the next input a player presses, and binding it to a control
//!
//! A [`RebindSession`] walks through the slots of one control (or one bidirectional pair),
//! waiting for an input in a single [`Domain`] for each slot.
//! Captured inputs are assigned to the control and, unless
//! [`allow_duplicates`](crate::settings::InputSettings::allow_duplicates) is set,
//! unbound from every other control that held them.
//!
//! Axis controls are captured negative side first, then positive.
//! Bidirectional pairs go through all four directions:
//! left, up, right, down.
//! The horizontal slots always belong to the horizontal half of the pair and the vertical slots to the vertical half,
//! whichever half the session was started on.
//! Capturing a mouse axis or an analog channel on the first slot binds the whole control (or pair) at once.

use crate::binding::{AnalogBinding, Binding, Domain, JoystickBinding, MouseAxis};
use crate::control::{ControlId, Direction};
use crate::control_table::ControlTable;
use crate::device_manager::DeviceManager;
use crate::platform::InputPlatform;
use crate::settings::InputSettings;
use bevy::input::keyboard::KeyCode;
use bevy::log::debug;

/// The slot of a control that the next captured input will be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditSlot {
    /// The negative side of the edited control, or of the horizontal half of a pair
    Negative,
    /// The positive side of the vertical half of a pair
    VerticalPositive,
    /// The positive side of the edited control, or of the horizontal half of a pair
    Positive,
    /// The negative side of the vertical half of a pair
    VerticalNegative,
}

/// What a rebinding session is currently waiting on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RebindTarget {
    /// The control being rebound
    pub control: ControlId,
    /// The domain inputs are captured from
    pub domain: Domain,
    /// The slot the next input will be bound to
    pub slot: EditSlot,
}

/// An input seen while capturing
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Candidate {
    /// A key, mouse button or gamepad button
    Digital(Binding),
    /// Mouse motion or scrolling
    MouseAxis(MouseAxis),
    /// A moving analog channel
    Analog(AnalogBinding),
}

/// What happened during one tick of a rebinding session
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureOutcome {
    /// No control is being rebound
    Idle,
    /// Still waiting for a usable input
    Waiting,
    /// Escape was pressed on the first slot: rebinding stopped
    Cancelled,
    /// An input was seen, but cannot go in the current slot
    Rejected(Candidate),
    /// An input was bound
    Assigned {
        /// The input that was bound
        candidate: Candidate,
        /// Every other control that lost this input
        evicted: Vec<ControlId>,
    },
}

/// The rebinding state machine
///
/// Idle until [`begin`](Self::begin) is called, then captures one input per [`update`](Self::update)
/// until every slot of the control is filled or the session is cancelled.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RebindSession {
    target: Option<RebindTarget>,
}

impl RebindSession {
    /// Starts rebinding a control in a domain
    ///
    /// Does nothing, returning `false`, if a control is already being rebound.
    pub fn begin(&mut self, table: &ControlTable, control: ControlId, domain: Domain) -> bool {
        if self.target.is_some() {
            return false;
        }

        let slot = first_slot(table, control);
        debug!(
            "Rebinding `{}` in {:?}, starting from {:?}",
            table.get(control).name(),
            domain,
            slot
        );
        self.target = Some(RebindTarget {
            control,
            domain,
            slot,
        });
        true
    }

    /// Stops rebinding, keeping every input bound so far
    pub fn cancel(&mut self) {
        self.target = None;
    }

    /// Is a control being rebound?
    #[must_use]
    pub fn is_capturing(&self) -> bool {
        self.target.is_some()
    }

    /// What the session is waiting on, if anything
    #[must_use]
    pub fn target(&self) -> Option<RebindTarget> {
        self.target
    }

    /// Looks for an input to capture this tick, and binds it if it fits
    ///
    /// Escape cancels the session when pressed on the first slot, and is ignored on later slots.
    pub fn update(
        &mut self,
        table: &mut ControlTable,
        platform: &dyn InputPlatform,
        devices: &DeviceManager,
        settings: &InputSettings,
    ) -> CaptureOutcome {
        let Some(target) = self.target else {
            return CaptureOutcome::Idle;
        };

        if platform.key_pressed(KeyCode::Escape) {
            if target.slot == first_slot(table, target.control) {
                debug!("Rebinding cancelled");
                self.target = None;
                return CaptureOutcome::Cancelled;
            }
            return CaptureOutcome::Waiting;
        }

        match target.domain {
            Domain::KeyboardMouse => {
                let Some(candidate) = keyboard_mouse_candidate(platform, settings) else {
                    return CaptureOutcome::Waiting;
                };
                self.try_assign(table, target, candidate, settings)
            }
            Domain::Joystick => {
                let analog = devices
                    .first_moving_channel(platform, settings.analog_capture_threshold)
                    .map(|(channel, player)| Candidate::Analog(AnalogBinding { channel, player }));

                if let Some(candidate) = analog {
                    let outcome = self.try_assign(table, target, candidate, settings);
                    if matches!(outcome, CaptureOutcome::Assigned { .. }) {
                        return outcome;
                    }
                }

                match devices.button_pressed_this_tick() {
                    Some((button, player)) => {
                        let binding = Binding::Joystick(JoystickBinding { button, player });
                        self.try_assign(table, target, Candidate::Digital(binding), settings)
                    }
                    None => CaptureOutcome::Waiting,
                }
            }
        }
    }

    fn try_assign(
        &mut self,
        table: &mut ControlTable,
        target: RebindTarget,
        candidate: Candidate,
        settings: &InputSettings,
    ) -> CaptureOutcome {
        let evicted = match candidate {
            Candidate::Digital(binding) => assign_digital(table, target, binding, settings),
            Candidate::MouseAxis(axis) => assign_mouse_axis(table, target, axis, settings),
            Candidate::Analog(analog) => assign_analog(table, target, analog, settings),
        };

        let Some(evicted) = evicted else {
            debug!("Rejected {:?} for {:?}", candidate, target.slot);
            return CaptureOutcome::Rejected(candidate);
        };

        self.target = match candidate {
            Candidate::Digital(_) => next_slot(table, target.control, target.slot)
                .map(|slot| RebindTarget { slot, ..target }),
            Candidate::MouseAxis(_) | Candidate::Analog(_) => None,
        };
        debug!("Bound {:?}, evicting it from {} controls", candidate, evicted.len());

        CaptureOutcome::Assigned { candidate, evicted }
    }
}

/// Does this control rebind as a full bidirectional pair?
fn paired(table: &ControlTable, control: ControlId) -> Option<ControlId> {
    let edited = table.get(control);
    if edited.is_bidirectional() {
        edited.partner()
    } else {
        None
    }
}

/// The horizontal and vertical halves of the control (or pair) being rebound
///
/// Unpaired controls are their own horizontal half.
fn halves(table: &ControlTable, control: ControlId) -> (ControlId, Option<ControlId>) {
    match paired(table, control) {
        Some(partner) if table.get(control).direction() == Direction::Vertical => {
            (partner, Some(control))
        }
        partner => (control, partner),
    }
}

fn first_slot(table: &ControlTable, control: ControlId) -> EditSlot {
    if table.get(control).is_axis() {
        EditSlot::Negative
    } else {
        EditSlot::Positive
    }
}

fn next_slot(table: &ControlTable, control: ControlId, slot: EditSlot) -> Option<EditSlot> {
    let edited = table.get(control);
    if !edited.is_axis() {
        return None;
    }

    if paired(table, control).is_some() {
        match slot {
            EditSlot::Negative => Some(EditSlot::VerticalPositive),
            EditSlot::VerticalPositive => Some(EditSlot::Positive),
            EditSlot::Positive => Some(EditSlot::VerticalNegative),
            EditSlot::VerticalNegative => None,
        }
    } else {
        match slot {
            EditSlot::Negative => Some(EditSlot::Positive),
            _ => None,
        }
    }
}

fn keyboard_mouse_candidate(
    platform: &dyn InputPlatform,
    settings: &InputSettings,
) -> Option<Candidate> {
    let scroll = platform.mouse_axis(MouseAxis::ScrollWheel);
    let x = platform.mouse_axis(MouseAxis::MoveHorizontal).abs();
    let y = platform.mouse_axis(MouseAxis::MoveVertical).abs();
    let threshold = settings.mouse_move_capture_threshold;

    if scroll.abs() > settings.scroll_capture_threshold {
        return Some(Candidate::MouseAxis(MouseAxis::ScrollWheel));
    }
    if x > threshold && x > y {
        return Some(Candidate::MouseAxis(MouseAxis::MoveHorizontal));
    }
    if y > threshold && y > x {
        return Some(Candidate::MouseAxis(MouseAxis::MoveVertical));
    }

    if let Some(button) = platform.first_mouse_button_pressed() {
        return Some(Candidate::Digital(Binding::Mouse(button)));
    }
    platform
        .first_key_pressed()
        .map(|key| Candidate::Digital(Binding::Keyboard(key)))
}

/// Binds a digital input, returning the controls it was evicted from, or `None` if the slot rejects it
fn assign_digital(
    table: &mut ControlTable,
    target: RebindTarget,
    binding: Binding,
    settings: &InputSettings,
) -> Option<Vec<ControlId>> {
    let (horizontal, vertical) = halves(table, target.control);

    let (owner, positive) = match target.slot {
        EditSlot::Negative => (horizontal, false),
        EditSlot::Positive => (horizontal, true),
        EditSlot::VerticalPositive => (vertical?, true),
        EditSlot::VerticalNegative => (vertical?, false),
    };

    if is_duplicate(table, target.slot, horizontal, vertical, &binding) {
        return None;
    }

    let mut keep = vec![horizontal];
    keep.extend(vertical);
    let evicted = if settings.allow_duplicates {
        Vec::new()
    } else {
        table.evict(&binding, &keep)
    };

    let owner = table.get_mut(owner);
    let slot = if positive {
        &mut owner.positive
    } else {
        &mut owner.negative
    };
    slot.clear(target.domain);
    slot.assign(binding);
    owner.clear_continuous(target.domain);

    Some(evicted)
}

/// Is this input already in a slot of the same control (or pair) that was filled earlier this session?
fn is_duplicate(
    table: &ControlTable,
    slot: EditSlot,
    horizontal: ControlId,
    vertical: Option<ControlId>,
    binding: &Binding,
) -> bool {
    let horizontal = table.get(horizontal);
    let vertical_positive = vertical.map_or(false, |vertical| {
        table.get(vertical).positive.holds(binding)
    });

    match slot {
        EditSlot::Negative => false,
        EditSlot::VerticalPositive => horizontal.negative.holds(binding),
        EditSlot::Positive => {
            horizontal.is_axis() && (horizontal.negative.holds(binding) || vertical_positive)
        }
        EditSlot::VerticalNegative => {
            horizontal.positive.holds(binding)
                || horizontal.negative.holds(binding)
                || vertical_positive
        }
    }
}

fn assign_mouse_axis(
    table: &mut ControlTable,
    target: RebindTarget,
    axis: MouseAxis,
    settings: &InputSettings,
) -> Option<Vec<ControlId>> {
    let control = target.control;
    if target.domain != Domain::KeyboardMouse || !continuous_allowed(table, target) {
        return None;
    }

    let mut assignments = vec![(control, axis)];
    if let Some(partner) = paired(table, control) {
        if axis == MouseAxis::ScrollWheel {
            return None;
        }
        assignments = [control, partner]
            .into_iter()
            .map(|id| {
                let axis = match table.get(id).direction() {
                    Direction::Horizontal => MouseAxis::MoveHorizontal,
                    Direction::Vertical => MouseAxis::MoveVertical,
                };
                (id, axis)
            })
            .collect();
    }

    let keep: Vec<ControlId> = assignments.iter().map(|(id, _)| *id).collect();
    let mut evicted = Vec::new();
    for (id, axis) in assignments {
        if !settings.allow_duplicates {
            evicted.extend(table.evict_mouse_axis(axis, &keep));
        }
        let owner = table.get_mut(id);
        owner.positive.clear(Domain::KeyboardMouse);
        owner.negative.clear(Domain::KeyboardMouse);
        owner.mouse_axis = Some(axis);
    }

    Some(evicted)
}

fn assign_analog(
    table: &mut ControlTable,
    target: RebindTarget,
    analog: AnalogBinding,
    settings: &InputSettings,
) -> Option<Vec<ControlId>> {
    let control = target.control;
    if target.domain != Domain::Joystick || !continuous_allowed(table, target) {
        return None;
    }

    let mut assignments = vec![(control, analog)];
    if let Some(partner) = paired(table, control) {
        let (horizontal, vertical) = analog.channel.family()?;
        assignments = [control, partner]
            .into_iter()
            .map(|id| {
                let channel = match table.get(id).direction() {
                    Direction::Horizontal => horizontal,
                    Direction::Vertical => vertical,
                };
                (id, AnalogBinding { channel, ..analog })
            })
            .collect();
    }

    let keep: Vec<ControlId> = assignments.iter().map(|(id, _)| *id).collect();
    let mut evicted = Vec::new();
    for (id, analog) in assignments {
        if !settings.allow_duplicates {
            evicted.extend(table.evict_analog(analog, &keep));
        }
        let owner = table.get_mut(id);
        owner.positive.clear(Domain::Joystick);
        owner.negative.clear(Domain::Joystick);
        owner.joystick_axis = Some(analog);
    }

    Some(evicted)
}

/// Continuous inputs can only be captured on the first slot of an axis control
fn continuous_allowed(table: &ControlTable, target: RebindTarget) -> bool {
    table.get(target.control).is_axis() && target.slot == EditSlot::Negative
}
