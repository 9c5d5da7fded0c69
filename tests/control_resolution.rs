use bevy::input::{keyboard::KeyCode, mouse::MouseButton};
use input_remapper::binding::JoystickBinding;
use input_remapper::control_table::ControlTable;
use input_remapper::errors::{ConfigurationError, UnconfiguredControl};
use input_remapper::prelude::*;
use input_remapper::MockPlatform;

fn resolve(definitions: &[ControlDefinition]) -> Result<ControlTable, ConfigurationError> {
    ControlTable::resolve(definitions, &InputSettings::default())
}

fn stick(link: &str) -> [ControlDefinition; 2] {
    [
        ControlDefinition::axis("Move X")
            .linked(link, Direction::Horizontal)
            .with_key("d")
            .with_negative_key("a"),
        ControlDefinition::axis("Move Y")
            .linked(link, Direction::Vertical)
            .with_key("w")
            .with_negative_key("s"),
    ]
}

#[test]
fn names_resolve_loosely() {
    let table = resolve(&[
        ControlDefinition::button("Run").with_key("Left Shift"),
        ControlDefinition::button("Jump")
            .with_key("SPACE")
            .with_mouse_button("right")
            .with_joystick_button("joystick a"),
    ])
    .unwrap();

    let run = table.control("Run").unwrap();
    assert_eq!(run.positive.key, Some(KeyCode::ShiftLeft));

    let jump = table.control("Jump").unwrap();
    assert_eq!(jump.positive.key, Some(KeyCode::Space));
    assert_eq!(jump.positive.mouse, Some(MouseButton::Right));
    assert_eq!(
        jump.positive.joystick,
        Some(JoystickBinding {
            button: JoyCode::A,
            player: 1
        })
    );
}

#[test]
fn unknown_names_are_fatal() {
    let error = resolve(&[ControlDefinition::button("Jump").with_key("not a key")]).unwrap_err();

    assert_eq!(
        error,
        ConfigurationError::UnknownKey {
            control: "Jump".to_string(),
            key: "not a key".to_string(),
        }
    );
}

#[test]
fn gamepad_names_in_keyboard_fields_are_ignored() {
    let table = resolve(&[ControlDefinition::button("Jump").with_key("Joystick A")]).unwrap();

    assert_eq!(table.control("Jump").unwrap().positive.key, None);
}

#[test]
fn gamepad_fields_name_gamepad_buttons() {
    let table = resolve(&[ControlDefinition::axis("Throttle")
        .with_joystick_button("RightTrigger")
        .with_negative_joystick_button("Joystick Left Trigger")])
    .unwrap();

    let throttle = table.control("Throttle").unwrap();
    assert_eq!(
        throttle.positive.joystick.map(|binding| binding.button),
        Some(JoyCode::RightTrigger)
    );
    assert_eq!(
        throttle.negative.joystick.map(|binding| binding.button),
        Some(JoyCode::LeftTrigger)
    );

    let table = resolve(&[ControlDefinition::button("Jump").with_joystick_button("A")]).unwrap();
    assert_eq!(
        table.control("Jump").unwrap().positive.joystick.map(|binding| binding.button),
        Some(JoyCode::A)
    );
}

#[test]
fn keys_in_gamepad_fields_fail_to_resolve() {
    let result = resolve(&[ControlDefinition::button("Jump").with_joystick_button("space")]);

    assert_eq!(
        result.unwrap_err(),
        ConfigurationError::UnknownKey {
            control: "Jump".to_string(),
            key: "space".to_string(),
        }
    );
}

#[test]
fn first_definition_wins() {
    let table = resolve(&[
        ControlDefinition::button("Jump").with_key("space"),
        ControlDefinition::button("Jump").with_key("j"),
    ])
    .unwrap();

    assert_eq!(table.len(), 1);
    assert_eq!(
        table.control("Jump").unwrap().positive.key,
        Some(KeyCode::Space)
    );
}

#[test]
fn players_are_clamped() {
    let table = resolve(&[
        ControlDefinition::button("Nobody").for_player(0),
        ControlDefinition::button("Too Many").for_player(200),
        ControlDefinition::button("Second").for_player(2),
    ])
    .unwrap();

    assert_eq!(table.control("Nobody").unwrap().player(), 1);
    assert_eq!(table.control("Too Many").unwrap().player(), 10);
    assert_eq!(table.total_players(), 10);
}

#[test]
fn tabs_keep_authored_order() {
    let table = resolve(&[
        ControlDefinition::button("Jump").in_tab("Movement"),
        ControlDefinition::button("Fire").in_tab("Combat"),
        ControlDefinition::button("Crouch").in_tab("Movement"),
    ])
    .unwrap();

    assert_eq!(table.tabs(), &["Movement".to_string(), "Combat".to_string()]);
}

#[test]
fn pairs_link_ignoring_spaces() {
    let [horizontal, vertical] = stick("Left Stick");
    let vertical = vertical.linked("LeftStick", Direction::Vertical);
    let table = resolve(&[horizontal, vertical]).unwrap();

    let x = table.id("Move X").unwrap();
    let y = table.id("Move Y").unwrap();
    assert_eq!(table.partner(x), Some(y));
    assert_eq!(table.partner(y), Some(x));
    assert!(table.is_bidirectional("Move X"));
}

#[test]
fn unpaired_axes_are_allowed() {
    let [horizontal, _] = stick("Left Stick");
    let table = resolve(&[horizontal]).unwrap();

    let x = table.id("Move X").unwrap();
    assert_eq!(table.partner(x), None);
}

#[test]
fn link_errors() {
    let error = resolve(&[ControlDefinition::axis("Move X").linked("", Direction::Horizontal)])
        .unwrap_err();
    assert_eq!(
        error,
        ConfigurationError::MissingLinkName {
            control: "Move X".to_string()
        }
    );

    let [horizontal, vertical] = stick("Left Stick");
    let vertical = vertical.linked("Left Stick", Direction::Horizontal);
    let error = resolve(&[horizontal, vertical]).unwrap_err();
    assert_eq!(
        error,
        ConfigurationError::SameDirection {
            control: "Move X".to_string(),
            link: "LeftStick".to_string(),
        }
    );

    let [horizontal, vertical] = stick("Left Stick");
    let third = ControlDefinition::axis("Move Z").linked("Left Stick", Direction::Vertical);
    let error = resolve(&[horizontal, vertical, third]).unwrap_err();
    assert_eq!(
        error,
        ConfigurationError::TooManyLinks {
            control: "Move X".to_string(),
            link: "LeftStick".to_string(),
        }
    );
}

#[test]
fn pairs_are_listed_once() {
    let [horizontal, vertical] = stick("Left Stick");
    let table = resolve(&[
        ControlDefinition::button("Jump"),
        horizontal,
        vertical,
        ControlDefinition::button("Fire").in_tab("Combat"),
    ])
    .unwrap();

    let rows = table.display_rows(None);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1].control, table.id("Move X").unwrap());
    assert_eq!(rows[1].partner, Some(table.id("Move Y").unwrap()));

    let combat = table.display_rows(Some("Combat"));
    assert_eq!(combat.len(), 1);
    assert_eq!(combat[0].control, table.id("Fire").unwrap());
}

#[test]
fn missing_inputs() {
    let [horizontal, vertical] = stick("Left Stick");
    let vertical = vertical.with_negative_key("");
    let table = resolve(&[
        ControlDefinition::button("Jump").with_key("space"),
        ControlDefinition::axis("Throttle").with_key("w"),
        ControlDefinition::axis("Look")
            .with_key("e")
            .with_mouse_axis(MouseAxis::MoveHorizontal),
        horizontal,
        vertical,
    ])
    .unwrap();

    let missing = |name: &str, domain| table.missing_input(table.id(name).unwrap(), domain);
    assert!(!missing("Jump", Domain::KeyboardMouse));
    assert!(missing("Jump", Domain::Joystick));
    assert!(missing("Throttle", Domain::KeyboardMouse));
    assert!(!missing("Look", Domain::KeyboardMouse));
    // Only the vertical half is missing a key, but the pair is shown as one row
    assert!(missing("Move X", Domain::KeyboardMouse));
}

#[test]
fn unknown_controls_are_reported() {
    let input = InputManager::new(
        vec![ControlDefinition::button("Jump")],
        TemplateRegistry::standard(),
        InputSettings::default(),
    )
    .unwrap();

    assert_eq!(
        input.get_key("Fly"),
        Err(UnconfiguredControl {
            name: "Fly".to_string()
        })
    );
    assert!(input.get_axis("Fly").is_err());
    assert!(input.is_control("Jump"));
    assert!(!input.is_control("Fly"));
}

#[test]
fn keys_and_mouse_buttons_press_buttons() {
    let mut input = InputManager::new(
        vec![ControlDefinition::button("Fire")
            .with_key("f")
            .with_mouse_button("left")],
        TemplateRegistry::standard(),
        InputSettings::default(),
    )
    .unwrap();
    let mut platform = MockPlatform::default();

    platform.press_mouse_button(MouseButton::Left);
    input.update(&platform);
    assert!(input.get_key_down("Fire").unwrap());
    assert_eq!(input.get_axis("Fire").unwrap(), 1.0);

    platform.advance_tick();
    platform.press_key(KeyCode::KeyF);
    input.update(&platform);
    assert!(input.get_key("Fire").unwrap());
    // The key went down, so the control did too, even though it was already held
    assert!(input.get_key_down("Fire").unwrap());

    platform.advance_tick();
    platform.release_all();
    input.update(&platform);
    assert!(!input.get_key("Fire").unwrap());
    assert!(input.get_key_up("Fire").unwrap());
    assert_eq!(input.get_axis("Fire").unwrap(), 0.0);
}
