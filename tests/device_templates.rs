use input_remapper::device_template::{DeviceTemplate, HardwareInput, TemplateRegistry};
use input_remapper::gamepad::{AnalogChannel, JoyButton, JoyCode};
use input_remapper::logical_device::LogicalDevice;
use input_remapper::MockPlatform;

const XBOX: &str = "Controller (XBOX 360 For Windows)";

fn xbox_device(platform: &mut MockPlatform) -> LogicalDevice {
    let slot = platform.connect(XBOX);
    LogicalDevice::new(DeviceTemplate::xbox_360(), slot, 1)
}

fn standard_device(platform: &mut MockPlatform) -> LogicalDevice {
    let slot = platform.connect("Generic Gamepad");
    LogicalDevice::new(DeviceTemplate::standard_layout(), slot, 1)
}

#[test]
fn specific_templates_win_over_the_fallback() {
    let mut registry = TemplateRegistry::default();
    registry
        .register(DeviceTemplate::xbox_360())
        .register(DeviceTemplate::standard_layout());

    let xbox = registry.find_matching(XBOX).unwrap();
    assert_eq!(xbox.name(), "XBOX 360 For Windows");

    let other = registry.find_matching("Wireless Controller").unwrap();
    assert_eq!(other.name(), "");
}

#[test]
fn no_template_matches() {
    let mut registry = TemplateRegistry::default();
    registry.register(DeviceTemplate::xbox_360());

    assert!(registry.find_matching("Wireless Controller").is_none());
}

#[test]
fn every_template_entry_is_kept() {
    let hardware = |index: usize| {
        let raw = u8::try_from(index).unwrap();
        if index % 2 == 0 {
            HardwareInput::Button(raw)
        } else {
            HardwareInput::Axis(raw)
        }
    };
    let template = JoyButton::ALL
        .into_iter()
        .enumerate()
        .fold(DeviceTemplate::new("Custom"), |template, (index, slot)| {
            template.with(slot, hardware(index))
        });

    let device = LogicalDevice::new(template, 0, 1);

    for (index, slot) in JoyButton::ALL.into_iter().enumerate() {
        assert_eq!(device.hardware(slot), hardware(index), "{slot:?}");
    }
}

#[test]
fn raw_buttons_map_to_canonical_buttons() {
    let mut platform = MockPlatform::default();
    let mut device = xbox_device(&mut platform);

    platform.press_joystick_button(0, 7);
    assert!(device.digital_state(&platform, JoyCode::Start).just_pressed());
    assert!(device.button_state(JoyCode::A).released());

    assert_eq!(device.reverse_lookup(0), Some(JoyCode::A));
    assert_eq!(device.reverse_lookup(7), Some(JoyCode::Start));
    assert_eq!(device.reverse_lookup(12), None);
}

#[test]
fn refresh_happens_once_per_tick() {
    let mut platform = MockPlatform::default();
    let mut device = xbox_device(&mut platform);

    platform.press_joystick_button(0, 0);
    device.refresh(&platform);
    device.refresh(&platform);
    assert!(device.button_state(JoyCode::A).just_pressed());
    assert_eq!(device.last_refresh(), Some(0));

    platform.advance_tick();
    device.refresh(&platform);
    assert!(device.button_state(JoyCode::A).pressed());
    assert!(!device.button_state(JoyCode::A).just_pressed());

    platform.advance_tick();
    platform.release_joystick_button(0, 0);
    device.refresh(&platform);
    assert!(device.button_state(JoyCode::A).just_released());
}

#[test]
fn inverted_axes_read_up_as_positive() {
    let mut platform = MockPlatform::default();
    let mut device = xbox_device(&mut platform);

    // This driver reports pushing the stick up as a negative reading
    platform.set_analog(0, 1, -0.5);
    platform.set_analog(0, 0, 0.25);
    device.refresh(&platform);

    assert_eq!(device.analog_value(&platform, AnalogChannel::LeftStickVertical), 0.5);
    assert_eq!(device.analog_value(&platform, AnalogChannel::LeftStickHorizontal), 0.25);
}

#[test]
fn axes_past_the_threshold_are_buttons() {
    let mut platform = MockPlatform::default();
    let mut device = xbox_device(&mut platform);

    platform.set_analog(0, 1, -0.95);
    platform.set_analog(0, 5, 1.0);
    device.refresh(&platform);

    assert!(device.button_state(JoyCode::LeftStickUp).just_pressed());
    assert!(device.button_state(JoyCode::LeftStickDown).released());
    assert!(device.button_state(JoyCode::DPadRight).pressed());
    assert!(device.button_state(JoyCode::DPadLeft).released());

    platform.advance_tick();
    platform.set_analog(0, 1, -0.5);
    device.refresh(&platform);
    assert!(device.button_state(JoyCode::LeftStickUp).just_released());
}

#[test]
fn threshold_is_configurable() {
    let mut platform = MockPlatform::default();
    let slot = platform.connect(XBOX);
    let mut device =
        LogicalDevice::new(DeviceTemplate::xbox_360(), slot, 1).with_press_threshold(0.4);

    platform.set_analog(0, 3, 0.5);
    device.refresh(&platform);
    assert!(device.button_state(JoyCode::RightStickRight).pressed());
}

#[test]
fn dpad_buttons_synthesize_an_axis() {
    let mut platform = MockPlatform::default();
    let mut device = standard_device(&mut platform);

    platform.press_joystick_button(0, 18);
    platform.press_joystick_button(0, 15);
    device.refresh(&platform);

    assert!(device.button_state(JoyCode::DPadRight).pressed());
    assert_eq!(device.analog_value(&platform, AnalogChannel::DPadHorizontal), 1.0);
    assert_eq!(device.analog_value(&platform, AnalogChannel::DPadVertical), 1.0);

    platform.advance_tick();
    platform.release_all();
    platform.press_joystick_button(0, 17);
    platform.press_joystick_button(0, 16);
    device.refresh(&platform);
    assert_eq!(device.analog_value(&platform, AnalogChannel::DPadHorizontal), -1.0);
    assert_eq!(device.analog_value(&platform, AnalogChannel::DPadVertical), -1.0);
}

#[test]
fn analog_triggers() {
    let mut platform = MockPlatform::default();
    let mut device = standard_device(&mut platform);

    platform.set_analog(0, 6, 0.5);
    device.refresh(&platform);
    assert_eq!(device.analog_value(&platform, AnalogChannel::LeftTrigger), 0.5);
    assert!(device.button_state(JoyCode::LeftTrigger).released());

    platform.advance_tick();
    platform.set_analog(0, 6, 0.95);
    device.refresh(&platform);
    assert!(device.button_state(JoyCode::LeftTrigger).just_pressed());
}

#[test]
fn digital_triggers() {
    let template = DeviceTemplate::new("Retro Pad")
        .with(JoyButton::LeftTrigger, HardwareInput::Button(4))
        .with(JoyButton::A, HardwareInput::Button(0));

    let mut platform = MockPlatform::default();
    let slot = platform.connect("Retro Pad");
    let mut device = LogicalDevice::new(template, slot, 1);

    platform.press_joystick_button(0, 4);
    device.refresh(&platform);
    assert!(device.button_state(JoyCode::LeftTrigger).pressed());
    assert_eq!(device.analog_value(&platform, AnalogChannel::LeftTrigger), 1.0);
    assert_eq!(device.analog_value(&platform, AnalogChannel::RightTrigger), 0.0);
}

#[test]
fn unbound_sticks_read_zero() {
    let template = DeviceTemplate::new("Retro Pad").with(JoyButton::A, HardwareInput::Button(0));

    let mut platform = MockPlatform::default();
    let slot = platform.connect("Retro Pad");
    let mut device = LogicalDevice::new(template, slot, 1);

    platform.set_analog(0, 0, 1.0);
    device.refresh(&platform);
    assert_eq!(device.analog_value(&platform, AnalogChannel::LeftStickHorizontal), 0.0);
    assert!(device.button_state(JoyCode::LeftStickRight).released());
}
