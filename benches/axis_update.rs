use bevy::input::keyboard::KeyCode;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use input_remapper::axislike::{AxisIntegrator, HeldDirections};
use input_remapper::prelude::*;
use input_remapper::MockPlatform;

const KEYS: [(&str, &str); 8] = [
    ("d", "a"),
    ("w", "s"),
    ("right", "left"),
    ("up", "down"),
    ("l", "j"),
    ("i", "k"),
    ("e", "q"),
    ("x", "z"),
];

fn controls() -> Vec<ControlDefinition> {
    KEYS.iter()
        .enumerate()
        .map(|(index, (positive, negative))| {
            ControlDefinition::axis(format!("Axis {index}"))
                .with_key(*positive)
                .with_negative_key(*negative)
                .with_joystick_axis(AnalogChannel::LeftStickHorizontal)
        })
        .chain((0..16).map(|index| {
            ControlDefinition::button(format!("Button {index}"))
                .with_key(format!("f{}", index % 12 + 1))
                .with_joystick_button("Joystick A")
        }))
        .collect()
}

fn integrate(integrator: &AxisIntegrator) -> f64 {
    let held = HeldDirections {
        positive: true,
        negative: false,
    };
    (0..120).fold(0.0, |value, _| {
        integrator.step(black_box(value), held, 3.0, 3.0)
    })
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let integrator = AxisIntegrator::default();
    c.bench_function("integrate_two_seconds", |b| b.iter(|| integrate(&integrator)));

    // Constructing our test manager and platform outside of the timed benchmark
    let mut input =
        InputManager::new(controls(), TemplateRegistry::standard(), InputSettings::default())
            .expect("benchmark controls should resolve");
    let mut platform = MockPlatform::default();
    platform.connect("Gamepad");
    platform.press_key(KeyCode::KeyD);
    platform.press_key(KeyCode::KeyW);
    platform.press_joystick_button(0, 0);
    platform.set_analog(0, 0, 0.5);

    c.bench_function("update_controls", |b| {
        b.iter(|| {
            platform.advance_tick();
            input.update(&platform)
        })
    });

    c.bench_function("get_axis", |b| {
        b.iter(|| input.get_axis(black_box("Axis 3")))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
