//! Turning held digital inputs into smoothly changing axis values

/// The fixed time step used to integrate digital axes: one sixtieth of a second
pub const TICK_LENGTH: f64 = 1.0 / 60.0;

/// Which directions of an axis control are being held this tick
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HeldDirections {
    /// Is any positive-side input held?
    pub positive: bool,
    /// Is any negative-side input held?
    pub negative: bool,
}

/// Emulates an analog axis with digital inputs
///
/// While an input is held, the accumulated value moves towards that end of `[-1, 1]` at `sensitivity` units per second.
/// Once nothing is held, it falls back towards zero at `gravity` units per second, without overshooting.
/// Holding both directions at once cancels out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisIntegrator {
    /// The time step, in seconds
    pub tick_length: f64,
}

impl Default for AxisIntegrator {
    fn default() -> Self {
        Self {
            tick_length: TICK_LENGTH,
        }
    }
}

impl AxisIntegrator {
    /// Advances an accumulated value by one tick
    #[must_use]
    pub fn step(&self, value: f64, held: HeldDirections, gravity: f32, sensitivity: f32) -> f64 {
        let mut value = value;
        let push = f64::from(sensitivity) * self.tick_length;

        if held.positive {
            value += push;
        }
        if held.negative {
            value -= push;
        }
        value = value.clamp(-1.0, 1.0);

        if !held.positive && !held.negative && value != 0.0 {
            let fall = f64::from(gravity) * self.tick_length;
            value = if value > 0.0 {
                (value - fall).max(0.0)
            } else {
                (value + fall).min(0.0)
            };
        }

        value
    }
}

/// Combines every source of an axis control into its final value
///
/// Digital and gamepad contributions are summed and clamped to `[-1, 1]`.
/// Mouse motion is added afterwards, and is not clamped.
#[inline]
#[must_use]
pub fn blend(accumulated: f64, analog: f32, mouse: f32) -> f32 {
    ((accumulated as f32) + analog).clamp(-1.0, 1.0) + mouse
}

/// The reading of an axis driven by two opposed triggers: the first pushes positive, the second negative
#[inline]
#[must_use]
pub fn opposed_triggers(positive: f32, negative: f32) -> f32 {
    positive.abs() - negative.abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HELD_POSITIVE: HeldDirections = HeldDirections {
        positive: true,
        negative: false,
    };

    #[test]
    fn holding_both_directions_cancels() {
        let integrator = AxisIntegrator::default();
        let held = HeldDirections {
            positive: true,
            negative: true,
        };
        let value = integrator.step(0.5, held, 1.0, 1.0);
        assert!((value - 0.5).abs() < 1e-12);
    }

    #[test]
    fn gravity_never_overshoots() {
        let integrator = AxisIntegrator::default();
        let value = integrator.step(0.01, HeldDirections::default(), 100.0, 1.0);
        assert_eq!(value, 0.0);

        let value = integrator.step(-0.01, HeldDirections::default(), 100.0, 1.0);
        assert_eq!(value, 0.0);
    }

    #[test]
    fn sensitivity_is_clamped() {
        let integrator = AxisIntegrator::default();
        let value = integrator.step(0.99, HELD_POSITIVE, 1.0, 100.0);
        assert_eq!(value, 1.0);
    }

    #[test]
    fn blend_clamps_before_mouse() {
        assert_eq!(blend(1.0, 0.5, 0.0), 1.0);
        assert_eq!(blend(1.0, 0.5, 2.0), 3.0);
        assert_eq!(blend(-0.25, 0.0, 0.0), -0.25);
    }

    #[test]
    fn opposed_triggers_ignore_sign() {
        assert_eq!(opposed_triggers(0.75, 0.25), 0.5);
        assert_eq!(opposed_triggers(-0.75, 0.25), 0.5);
        assert_eq!(opposed_triggers(0.0, 1.0), -1.0);
    }
}
