//! Star specifics: unscaled spin, the pulsing corona and highlight sizing.

use crate::catalog::BodyKind;
use crate::core::clock::ClockSnapshot;
use crate::core::integrator::{self, Calibration};

// ── Corona ───────────────────────────────────────────────────────────

pub const CORONA_SCALE: f32 = 1.2;
pub const CORONA_ALPHA: f32 = 0.3;
const CORONA_PULSE_RATE: f64 = 2.0;
const CORONA_PULSE_DEPTH: f64 = 0.02;

// ── Selection marker ─────────────────────────────────────────────────

pub const HIGHLIGHT_ALPHA: f32 = 0.8;
/// Inner/outer marker radius as multiples of render size.
pub const PLANET_HIGHLIGHT: (f32, f32) = (1.3, 1.4);
pub const SMALL_HIGHLIGHT: (f32, f32) = (1.5, 1.6);

/// Which marker band a target gets. Moons pass `None`.
pub fn highlight_band(kind: Option<BodyKind>) -> (f32, f32) {
    match kind {
        Some(BodyKind::Planet) | Some(BodyKind::DwarfPlanet) => PLANET_HIGHLIGHT,
        Some(BodyKind::Star) | None => SMALL_HIGHLIGHT,
    }
}

/// Corona radius at wall-clock time `elapsed`. Keeps breathing while paused.
pub fn corona_radius(size: f32, elapsed: f64) -> f32 {
    let pulse = 1.0 + (elapsed * CORONA_PULSE_RATE).sin() * CORONA_PULSE_DEPTH;
    size * CORONA_SCALE * pulse as f32
}

/// Star spin: a fixed rate that ignores the time scale but honours pause.
pub fn spin(phase: f64, dt: f64, clock: ClockSnapshot, cal: &Calibration) -> f64 {
    integrator::advance_rate(phase, dt, clock, cal.sun_spin, false)
}
