//! Per-entity animation state. One `BodyState` per catalog body (the star
//! included) and one `MoonState` per moon; both live in flat arenas and
//! moons refer to their parent by index.

use glam::Vec3;

use crate::api::types::EntityId;
use crate::catalog::{BodyKind, CelestialBody, Moon};
use crate::core::integrator::{self, Calibration, Period};
use crate::core::clock::ClockSnapshot;
use crate::core::rng::RandomSource;
use crate::texture::TextureSlot;

// ── Moon scaling ─────────────────────────────────────────────────────

/// Moon orbit radius per unit of (catalog orbital radius × parent size).
pub const MOON_ORBIT_SCALE: f64 = 0.5;
const MOON_MIN_SIZE: f64 = 0.08;
const MOON_MAX_SIZE_RATIO: f64 = 0.15;
const MOON_DIAMETER_UNIT_KM: f64 = 3000.0;

/// Render radius of a moon, bounded by its parent's size.
pub fn moon_render_size(parent_size: f64, diameter_km: f64) -> f64 {
    let scaled = diameter_km / MOON_DIAMETER_UNIT_KM * parent_size;
    (parent_size * MOON_MAX_SIZE_RATIO).min(scaled).max(MOON_MIN_SIZE)
}

pub fn moon_orbit_radius(orbital_radius: f64, parent_size: f64) -> f64 {
    orbital_radius * parent_size * MOON_ORBIT_SCALE
}

/// Point on a circle of `radius` in the shared orbital (XZ) plane.
pub fn orbit_position(phase: f64, radius: f64) -> Vec3 {
    Vec3::new(
        (phase.cos() * radius) as f32,
        0.0,
        (phase.sin() * radius) as f32,
    )
}

/// Textured band around a ringed body.
#[derive(Debug, Clone, Copy)]
pub struct RingState {
    /// Rotation about X of the ring mesh, radians.
    pub tilt: f32,
    pub texture: TextureSlot,
    pub mesh: Option<usize>,
}

/// Ring plane orientation: flat in the orbital plane, then tipped by the
/// body's axial tilt.
pub fn ring_tilt(axial_tilt_deg: f64) -> f32 {
    (std::f64::consts::FRAC_PI_2 + axial_tilt_deg.to_radians()) as f32
}

#[derive(Debug, Clone)]
pub struct BodyState {
    pub entity: EntityId,
    pub kind: BodyKind,
    pub size: f32,
    pub orbit_radius: f64,
    /// `None` for the star, which never leaves the origin.
    pub orbit: Option<Period>,
    pub spin: Option<Period>,
    pub orbit_phase: f64,
    pub spin_phase: f64,
    pub position: Vec3,
    pub texture: TextureSlot,
    pub ring: Option<RingState>,
    pub orbit_guide: Option<usize>,
}

impl BodyState {
    pub fn new(
        entity: EntityId,
        body: &CelestialBody,
        texture: TextureSlot,
        rng: &mut dyn RandomSource,
    ) -> Self {
        let orbit = body.orbit_period();
        Self {
            entity,
            kind: body.kind,
            size: body.size as f32,
            orbit_radius: body.orbital_radius,
            orbit,
            spin: body.spin_period(),
            orbit_phase: if orbit.is_some() { rng.angle() } else { 0.0 },
            spin_phase: 0.0,
            position: Vec3::ZERO,
            texture,
            ring: None,
            orbit_guide: None,
        }
    }

    /// Advance orbit and spin. The star is spun by the sun module instead.
    pub fn integrate(&mut self, dt: f64, clock: ClockSnapshot, cal: &Calibration) {
        if let Some(period) = self.orbit {
            self.orbit_phase = integrator::advance(self.orbit_phase, dt, clock, period, cal.orbit);
        }
        if self.kind != BodyKind::Star {
            if let Some(period) = self.spin {
                self.spin_phase = integrator::advance(self.spin_phase, dt, clock, period, cal.spin);
            }
        }
    }

    pub fn compose(&mut self) {
        self.position = match self.orbit {
            Some(_) => orbit_position(self.orbit_phase, self.orbit_radius),
            None => Vec3::ZERO,
        };
    }
}

#[derive(Debug, Clone)]
pub struct MoonState {
    pub entity: EntityId,
    /// Parent's index in the body arena.
    pub parent: usize,
    /// Position in the parent's moon list.
    pub index: usize,
    pub size: f32,
    pub orbit_radius: f64,
    pub period: Option<Period>,
    pub orbit_phase: f64,
    pub spin_phase: f64,
    pub position: Vec3,
    pub texture: TextureSlot,
    pub orbit_guide: Option<usize>,
}

impl MoonState {
    pub fn new(
        entity: EntityId,
        parent: (usize, &CelestialBody),
        index: usize,
        moon: &Moon,
        texture: TextureSlot,
        rng: &mut dyn RandomSource,
    ) -> Self {
        let (parent_index, parent_body) = parent;
        Self {
            entity,
            parent: parent_index,
            index,
            size: moon_render_size(parent_body.size, moon.diameter) as f32,
            orbit_radius: moon_orbit_radius(moon.orbital_radius, parent_body.size),
            period: moon.period(),
            orbit_phase: rng.angle(),
            spin_phase: 0.0,
            position: Vec3::ZERO,
            texture,
            orbit_guide: None,
        }
    }

    pub fn integrate(&mut self, dt: f64, clock: ClockSnapshot, cal: &Calibration) {
        if let Some(period) = self.period {
            self.orbit_phase =
                integrator::advance(self.orbit_phase, dt, clock, period, cal.moon_orbit);
        }
        self.spin_phase = integrator::advance_rate(self.spin_phase, dt, clock, cal.moon_spin, true);
    }

    /// Offset from the parent's already-composed position.
    pub fn compose(&mut self, parent_position: Vec3) {
        self.position = parent_position + orbit_position(self.orbit_phase, self.orbit_radius);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::load::fixtures::MINI_CATALOG;
    use crate::catalog::Catalog;
    use crate::core::rng::SequenceSource;

    fn running() -> ClockSnapshot {
        ClockSnapshot {
            time_scale: 10.0,
            paused: false,
        }
    }

    #[test]
    fn moon_size_is_bounded() {
        // Earth's moon: 3474 / 3000 = 1.158 > 0.15 cap.
        assert!((moon_render_size(1.0, 3474.0) - 0.15).abs() < 1e-12);
        // A pebble never drops below the floor.
        assert_eq!(moon_render_size(1.0, 10.0), 0.08);
        // Mid-size: 300 km on a size-2 parent = 0.2, under the 0.3 cap.
        assert!((moon_render_size(2.0, 300.0) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn moon_orbit_scales_with_parent() {
        assert_eq!(moon_orbit_radius(2.5, 1.0), 1.25);
        assert!((moon_orbit_radius(5.0, 2.2) - 5.5).abs() < 1e-12);
    }

    #[test]
    fn orbit_position_is_on_the_circle() {
        let p = orbit_position(std::f64::consts::FRAC_PI_2, 16.0);
        assert!(p.x.abs() < 1e-5);
        assert_eq!(p.y, 0.0);
        assert!((p.z - 16.0).abs() < 1e-5);
        assert!((orbit_position(1.234, 8.0).length() - 8.0).abs() < 1e-5);
    }

    #[test]
    fn ring_tilt_adds_axial_tilt() {
        assert!((ring_tilt(0.0) - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert!((ring_tilt(26.7) - (std::f32::consts::FRAC_PI_2 + 0.466)).abs() < 1e-3);
    }

    #[test]
    fn star_stays_at_origin_and_planets_get_random_phase() {
        let catalog = Catalog::from_json(MINI_CATALOG).unwrap();
        let mut src = SequenceSource::constant(0.25);
        let sun = BodyState::new(EntityId(1), catalog.star(), TextureSlot(0), &mut src);
        let (_, earth) = catalog.find_body("earth").unwrap();
        let earth = BodyState::new(EntityId(2), earth, TextureSlot(1), &mut src);
        assert_eq!(sun.orbit_phase, 0.0);
        assert!(sun.orbit.is_none());
        assert!((earth.orbit_phase - std::f64::consts::FRAC_PI_2).abs() < 1e-12);

        let mut sun = sun;
        sun.integrate(1.0, running(), &Calibration::default());
        sun.compose();
        assert_eq!(sun.position, Vec3::ZERO);
        assert_eq!(sun.spin_phase, 0.0);
    }

    #[test]
    fn retrograde_spin_runs_backwards() {
        let catalog = Catalog::from_json(MINI_CATALOG).unwrap();
        let mut src = SequenceSource::constant(0.0);
        let (_, venus) = catalog.find_body("venus").unwrap();
        let mut venus = BodyState::new(EntityId(3), venus, TextureSlot(0), &mut src);
        let mut prograde = venus.clone();
        prograde.spin = Period::new(243.0);
        venus.spin_phase = 3.0;
        prograde.spin_phase = 3.0;
        let cal = Calibration::default();
        let mut last = (3.0, 3.0);
        for _ in 0..5 {
            venus.integrate(0.1, running(), &cal);
            prograde.integrate(0.1, running(), &cal);
            assert!(venus.spin_phase < last.0);
            assert!(prograde.spin_phase > last.1);
            last = (venus.spin_phase, prograde.spin_phase);
        }
    }

    #[test]
    fn retrograde_moon_revolves_backwards() {
        let catalog = Catalog::from_json(MINI_CATALOG).unwrap();
        let (neptune_index, neptune) = catalog.find_body("neptune").unwrap();
        let triton = &neptune.moons[0];
        let mut src = SequenceSource::constant(0.0);
        let mut moon = MoonState::new(
            EntityId(9),
            (neptune_index, neptune),
            0,
            triton,
            TextureSlot(0),
            &mut src,
        );
        assert_eq!(moon.period.unwrap().direction(), -1.0);
        let mut prograde = moon.clone();
        prograde.period = Period::new(5.88);
        moon.orbit_phase = 3.0;
        prograde.orbit_phase = 3.0;

        let cal = Calibration::default();
        moon.integrate(0.1, running(), &cal);
        prograde.integrate(0.1, running(), &cal);
        // 0.1 s × moon_orbit 5 × scale 10 / 5.88
        let step = 0.1 * 5.0 * 10.0 / 5.88;
        assert!((moon.orbit_phase - (3.0 - step)).abs() < 1e-12);
        assert!((prograde.orbit_phase - (3.0 + step)).abs() < 1e-12);

        moon.compose(Vec3::new(84.0, 0.0, 0.0));
        let offset = moon.position - Vec3::new(84.0, 0.0, 0.0);
        assert!((offset.length() as f64 - moon.orbit_radius).abs() < 1e-4);
    }
}
