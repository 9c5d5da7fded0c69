use input_remapper::device_manager::DeviceManager;
use input_remapper::prelude::*;
use input_remapper::MockPlatform;

fn names(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

fn step(input: &mut InputManager, platform: &mut MockPlatform) {
    input.update(&*platform);
    platform.advance_tick();
}

#[test]
fn devices_are_assigned_in_plug_order() {
    let registry = TemplateRegistry::standard();
    let mut devices = DeviceManager::default();

    devices.reconcile(&registry, &names(&["Pad A"]));
    devices.reconcile(&registry, &names(&["Pad A", "Pad B"]));
    devices.reconcile(&registry, &names(&["Pad A", "Pad B", "Pad C"]));

    assert_eq!(devices.assignment(), &[1, 2, 3]);
    assert_eq!(devices.attached_count(), 3);
    assert_eq!(devices.controller(3).unwrap().slot(), 2);
}

#[test]
fn unplugging_frees_only_that_player() {
    let registry = TemplateRegistry::standard();
    let mut devices = DeviceManager::default();
    devices.reconcile(&registry, &names(&["Pad A"]));
    devices.reconcile(&registry, &names(&["Pad A", "Pad B"]));
    devices.reconcile(&registry, &names(&["Pad A", "Pad B", "Pad C"]));

    devices.reconcile(&registry, &names(&["Pad A", "Pad C"]));

    assert_eq!(devices.assignment(), &[1, 3]);
    assert!(devices.controller(2).is_none());
    assert_eq!(devices.controller(1).unwrap().slot(), 0);
    assert_eq!(devices.controller(3).unwrap().slot(), 1);

    // The next device picks up the freed player
    devices.reconcile(&registry, &names(&["Pad A", "Pad C", "Pad D"]));
    assert_eq!(devices.assignment(), &[1, 3, 2]);
    assert_eq!(devices.controller(2).unwrap().slot(), 2);
}

#[test]
fn plugging_in_before_others_shifts_them() {
    let registry = TemplateRegistry::standard();
    let mut devices = DeviceManager::default();
    devices.reconcile(&registry, &names(&["Pad A"]));
    devices.reconcile(&registry, &names(&["Pad A", "Pad B"]));
    devices.reconcile(&registry, &names(&["Pad B"]));

    devices.reconcile(&registry, &names(&["Pad C", "Pad B"]));

    assert_eq!(devices.assignment(), &[1, 2]);
    assert_eq!(devices.controller(1).unwrap().slot(), 0);
    assert_eq!(devices.controller(2).unwrap().slot(), 1);
}

#[test]
fn large_changes_reassign_everyone() {
    let registry = TemplateRegistry::standard();
    let mut devices = DeviceManager::default();
    devices.reconcile(&registry, &names(&["Pad A"]));
    devices.reconcile(&registry, &names(&["Pad A", "Pad B"]));
    devices.reconcile(&registry, &names(&["Pad B"]));

    devices.reconcile(&registry, &names(&["Pad B", "Pad C", "Pad D"]));

    assert_eq!(devices.assignment(), &[1, 2, 3]);
}

#[test]
fn extra_devices_are_ignored() {
    let registry = TemplateRegistry::standard();
    let mut devices = DeviceManager::new(2, 0.9);

    devices.reconcile(&registry, &names(&["Pad A"]));
    devices.reconcile(&registry, &names(&["Pad A", "Pad B"]));
    devices.reconcile(&registry, &names(&["Pad A", "Pad B", "Pad C"]));

    assert_eq!(devices.attached_count(), 2);
    assert_eq!(devices.assignment(), &[1, 2]);
    assert!(devices.controller(3).is_none());
}

#[test]
fn ignored_devices_move_into_freed_slots() {
    let registry = TemplateRegistry::standard();
    let mut devices = DeviceManager::new(2, 0.9);
    devices.reconcile(&registry, &names(&["Pad A"]));
    devices.reconcile(&registry, &names(&["Pad A", "Pad B"]));
    devices.reconcile(&registry, &names(&["Pad A", "Pad B", "Pad C"]));

    devices.reconcile(&registry, &names(&["Pad B", "Pad C"]));

    assert_eq!(devices.attached_count(), 2);
    assert_eq!(devices.assignment(), &[2, 1]);
    assert_eq!(devices.controller(2).unwrap().slot(), 0);
    assert_eq!(devices.controller(1).unwrap().slot(), 1);
}

#[test]
fn unmatched_devices_hold_their_player() {
    let mut registry = TemplateRegistry::default();
    registry.register(DeviceTemplate::xbox_360());
    let mut devices = DeviceManager::default();

    devices.reconcile(&registry, &names(&["Flight Stick"]));
    devices.reconcile(&registry, &names(&["Flight Stick", "XBOX 360 For Windows"]));

    assert_eq!(devices.attached_count(), 1);
    assert!(devices.controller(1).is_none());
    assert_eq!(devices.controller(2).unwrap().slot(), 1);
}

#[test]
fn controls_follow_their_player_across_slots() {
    let controls = vec![ControlDefinition::button("Jump")
        .with_joystick_button("Joystick A")
        .for_player(2)];
    let mut input =
        InputManager::new(controls, TemplateRegistry::standard(), InputSettings::default())
            .unwrap();
    let mut platform = MockPlatform::default();

    platform.connect("Pad A");
    step(&mut input, &mut platform);
    platform.connect("Pad B");
    step(&mut input, &mut platform);

    // Player 1 pressing A does nothing
    platform.press_joystick_button(0, 0);
    step(&mut input, &mut platform);
    assert!(!input.get_key("Jump").unwrap());

    platform.press_joystick_button(1, 0);
    step(&mut input, &mut platform);
    assert!(input.get_key("Jump").unwrap());

    // Player 1 unplugs: player 2's pad moves down a slot
    platform.disconnect(0);
    step(&mut input, &mut platform);
    assert_eq!(input.controller(2).unwrap().slot(), 0);
    assert!(input.controller(1).is_none());
    assert!(input.get_key("Jump").unwrap());
}
