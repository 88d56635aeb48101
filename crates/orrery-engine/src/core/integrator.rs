//! Orbit and spin integration.
//!
//! Every phase is a running angle in radians kept in [0, 2π). A step is
//! `φ + dt × k × timeScale / |P| × sign(P)`, wrapped. A paused clock makes
//! every step a no-op.

use std::f64::consts::TAU;

use serde::Deserialize;

use crate::core::clock::ClockSnapshot;

/// Per-class speed multipliers. Presentation tuning only.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Calibration {
    /// Planet and dwarf-planet revolution.
    pub orbit: f64,
    /// Planet, dwarf-planet and star spin about their own axis.
    pub spin: f64,
    /// Moon revolution around its parent.
    pub moon_orbit: f64,
    /// Moon spin, rad/s per unit time scale (periodless).
    pub moon_spin: f64,
    /// Asteroid field rotation, rad/s per unit time scale.
    pub belt_spin: f64,
    /// Sun surface rotation, rad/s. Not time-scaled.
    pub sun_spin: f64,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            orbit: 0.5,
            spin: 10.0,
            moon_orbit: 5.0,
            moon_spin: 0.5,
            belt_spin: 0.02,
            sun_spin: 0.1,
        }
    }
}

/// A signed, non-zero, finite period. Sign encodes direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Period(f64);

impl Period {
    pub fn new(value: f64) -> Option<Self> {
        (value.is_finite() && value != 0.0).then_some(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// +1 prograde, -1 retrograde.
    pub fn direction(self) -> f64 {
        self.0.signum()
    }

    /// Unsigned angular speed in rad/s.
    pub fn angular_speed(self, k: f64, time_scale: f64) -> f64 {
        k * time_scale / self.0.abs()
    }
}

/// Reduce any finite angle into [0, 2π).
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Advance a phase by one frame of a periodic motion.
pub fn advance(phase: f64, dt: f64, clock: ClockSnapshot, period: Period, k: f64) -> f64 {
    if clock.paused {
        return phase;
    }
    let omega = period.angular_speed(k, clock.time_scale);
    wrap_angle(phase + dt * omega * period.direction())
}

/// Advance a phase at a fixed rate. When `scaled`, the rate is multiplied
/// by the time scale. Pause always freezes it.
pub fn advance_rate(phase: f64, dt: f64, clock: ClockSnapshot, rate: f64, scaled: bool) -> f64 {
    if clock.paused {
        return phase;
    }
    let scale = if scaled { clock.time_scale } else { 1.0 };
    wrap_angle(phase + dt * rate * scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running(time_scale: f64) -> ClockSnapshot {
        ClockSnapshot {
            time_scale,
            paused: false,
        }
    }

    fn paused() -> ClockSnapshot {
        ClockSnapshot {
            time_scale: 10.0,
            paused: true,
        }
    }

    fn period(p: f64) -> Period {
        Period::new(p).unwrap()
    }

    #[test]
    fn zero_and_non_finite_periods_are_invalid() {
        assert!(Period::new(0.0).is_none());
        assert!(Period::new(-0.0).is_none());
        assert!(Period::new(f64::NAN).is_none());
        assert!(Period::new(f64::INFINITY).is_none());
        assert_eq!(Period::new(-243.0).unwrap().direction(), -1.0);
    }

    #[test]
    fn wrap_stays_in_range() {
        for angle in [-1e-18, -TAU, -7.0, 0.0, TAU, 3.0 * TAU + 0.5, 1e6] {
            let w = wrap_angle(angle);
            assert!((0.0..TAU).contains(&w), "{} wrapped to {}", angle, w);
        }
    }

    #[test]
    fn phase_wraps_for_any_step() {
        let mut phase = 6.0;
        for (dt, ts) in [(0.016, 1.0), (1.0, 1000.0), (5.0, 37.0), (0.3, 10.0)] {
            phase = advance(phase, dt, running(ts), period(0.24), 0.5);
            assert!((0.0..TAU).contains(&phase));
            phase = advance(phase, dt, running(ts), period(-0.24), 5.0);
            assert!((0.0..TAU).contains(&phase));
        }
    }

    #[test]
    fn paused_clock_freezes_every_phase() {
        let mut orbit = 1.234;
        let mut spin = 4.5;
        for dt in [0.016, 0.5, 1.0, 100.0] {
            orbit = advance(orbit, dt, paused(), period(1.0), 0.5);
            spin = advance_rate(spin, dt, paused(), 0.1, false);
        }
        assert_eq!(orbit, 1.234);
        assert_eq!(spin, 4.5);
    }

    #[test]
    fn pause_span_adds_no_phase() {
        let mut phase = 0.0;
        for _ in 0..10 {
            phase = advance(phase, 0.016, running(10.0), period(1.0), 0.5);
        }
        let before = phase;
        for _ in 0..500 {
            phase = advance(phase, 0.016, paused(), period(1.0), 0.5);
        }
        assert_eq!(phase, before);
        let resumed = advance(phase, 0.016, running(10.0), period(1.0), 0.5);
        assert!((resumed - before - 0.08).abs() < 1e-12);
    }

    #[test]
    fn negative_period_turns_the_other_way() {
        let start = 3.0;
        let pro = advance(start, 0.1, running(1.0), period(2.0), 10.0);
        let retro = advance(start, 0.1, running(1.0), period(-2.0), 10.0);
        assert!(pro > start);
        assert!(retro < start);
        assert!(((pro - start) + (retro - start)).abs() < 1e-12);
    }

    #[test]
    fn mercury_outpaces_neptune() {
        let k = Calibration::default().orbit;
        let mercury = period(0.24).angular_speed(k, 10.0);
        let neptune = period(164.8).angular_speed(k, 10.0);
        assert!(mercury > neptune);
        // Accumulated (unwrapped) phase over the same 60 s.
        assert!(mercury * 60.0 > neptune * 60.0 * 100.0);
    }

    #[test]
    fn earth_after_one_hundred_seconds() {
        let k = Calibration::default().orbit;
        let mut phase = 0.0;
        for _ in 0..100 {
            phase = advance(phase, 1.0, running(10.0), period(1.0), k);
        }
        let expected = (100.0 * 1.0 * k * 10.0_f64).rem_euclid(TAU);
        assert!((phase - expected).abs() < 1e-9, "{} vs {}", phase, expected);
    }

    #[test]
    fn unscaled_rate_ignores_time_scale() {
        let a = advance_rate(0.0, 1.0, running(1.0), 0.1, false);
        let b = advance_rate(0.0, 1.0, running(1000.0), 0.1, false);
        assert_eq!(a, b);
        let c = advance_rate(0.0, 1.0, running(10.0), 0.02, true);
        assert!((c - 0.2).abs() < 1e-12);
    }
}
