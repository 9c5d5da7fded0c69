use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::input::InputPlugin;
use bevy::prelude::*;
use input_remapper::prelude::*;

fn controls() -> Vec<ControlDefinition> {
    vec![
        ControlDefinition::button("Jump").with_key("space"),
        ControlDefinition::button("Fire").with_mouse_button("left"),
        ControlDefinition::axis("Look").with_mouse_axis(MouseAxis::MoveHorizontal),
        ControlDefinition::axis("Zoom").with_mouse_axis(MouseAxis::ScrollWheel),
    ]
}

fn test_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(InputPlugin)
        .add_plugins(InputRemapPlugin::new(controls()).unwrap());

    app
}

#[test]
fn resources_are_inserted() {
    let app = test_app();

    assert!(app.world().contains_resource::<InputManager>());
    assert_eq!(
        app.world().resource::<InputSettings>(),
        &InputSettings::default()
    );
}

#[test]
fn keys_press_controls() {
    let mut app = test_app();

    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(KeyCode::Space);
    app.update();

    let input = app.world().resource::<InputManager>();
    assert!(input.get_key("Jump").unwrap());
    assert!(!input.get_key("Fire").unwrap());
}

#[test]
fn mouse_buttons_press_controls() {
    let mut app = test_app();

    app.world_mut()
        .resource_mut::<ButtonInput<MouseButton>>()
        .press(MouseButton::Left);
    app.update();

    let input = app.world().resource::<InputManager>();
    assert!(input.get_key("Fire").unwrap());
}

#[test]
fn mouse_events_drive_axes() {
    let mut app = test_app();

    app.world_mut().send_event(MouseMotion {
        delta: Vec2::new(3.0, 0.0),
    });
    app.world_mut().send_event(MouseMotion {
        delta: Vec2::new(2.0, 1.0),
    });
    app.world_mut().send_event(MouseWheel {
        unit: MouseScrollUnit::Line,
        x: 0.0,
        y: -1.0,
        window: Entity::PLACEHOLDER,
    });
    app.update();

    let input = app.world().resource::<InputManager>();
    assert_eq!(input.get_axis("Look").unwrap(), 5.0);
    assert_eq!(input.get_axis("Zoom").unwrap(), -1.0);

    // Events are only read once
    app.update();
    let input = app.world().resource::<InputManager>();
    assert_eq!(input.get_axis("Look").unwrap(), 0.0);
}

#[test]
fn missing_input_resources_read_as_released() {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(InputRemapPlugin::new(controls()).unwrap());

    app.update();

    let input = app.world().resource::<InputManager>();
    assert!(!input.get_key("Jump").unwrap());
    assert_eq!(input.get_axis("Look").unwrap(), 0.0);
}

#[test]
fn bad_controls_fail_before_the_app_is_built() {
    let result = InputRemapPlugin::new(vec![ControlDefinition::button("Jump").with_key("nope")]);

    assert!(result.is_err());
}
