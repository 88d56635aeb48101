//! The asteroid belt: a static particle cloud that turns as one piece.

use bytemuck::{Pod, Zeroable};

use crate::catalog::AsteroidBeltSpec;
use crate::core::clock::ClockSnapshot;
use crate::core::integrator::{self, Calibration};
use crate::core::rng::RandomSource;

pub const BELT_ALPHA: f32 = 0.8;
const HEIGHT_SPREAD: f64 = 2.0;

/// One asteroid in the field's local frame. 8 floats = 32 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct AsteroidParticle {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub size: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub alpha: f32,
}

impl AsteroidParticle {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

#[derive(Debug, Clone, Default)]
pub struct AsteroidField {
    particles: Vec<AsteroidParticle>,
    /// Rotation of the whole field about Y.
    pub phase: f64,
}

impl AsteroidField {
    /// Scatter `asteroid_count` particles uniformly in angle and radius.
    pub fn generate(spec: &AsteroidBeltSpec, rng: &mut dyn RandomSource) -> Self {
        let particles = (0..spec.asteroid_count)
            .map(|_| {
                let angle = rng.angle();
                let radius = rng.range(spec.inner_radius, spec.outer_radius);
                let height = (rng.next_f64() - 0.5) * HEIGHT_SPREAD;
                let grey = rng.range(0.3, 0.7) as f32;
                let size = rng.range(0.05, 0.2) as f32;
                AsteroidParticle {
                    x: (angle.cos() * radius) as f32,
                    y: height as f32,
                    z: (angle.sin() * radius) as f32,
                    size,
                    r: grey,
                    g: grey * 0.9,
                    b: grey * 0.8,
                    alpha: BELT_ALPHA,
                }
            })
            .collect();
        Self { particles, phase: 0.0 }
    }

    pub fn integrate(&mut self, dt: f64, clock: ClockSnapshot, cal: &Calibration) {
        self.phase = integrator::advance_rate(self.phase, dt, clock, cal.belt_spin, true);
    }

    pub fn particles(&self) -> &[AsteroidParticle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Bilingual;
    use crate::core::rng::Rng;

    fn spec(count: usize) -> AsteroidBeltSpec {
        AsteroidBeltSpec {
            id: "asteroid-belt".into(),
            name: Bilingual::new("小行星带", "Asteroid Belt"),
            description: Bilingual::default(),
            inner_radius: 28.0,
            outer_radius: 34.0,
            asteroid_count: count,
        }
    }

    #[test]
    fn particles_stay_in_the_band() {
        let mut rng = Rng::new(11);
        let field = AsteroidField::generate(&spec(500), &mut rng);
        assert_eq!(field.len(), 500);
        for p in field.particles() {
            let r = (p.x * p.x + p.z * p.z).sqrt();
            assert!((27.99..=34.01).contains(&r), "radius {}", r);
            assert!(p.y.abs() <= 1.0);
            assert!((0.05..0.2).contains(&p.size));
            assert!((0.3..0.7).contains(&p.r));
            assert!((p.g - p.r * 0.9).abs() < 1e-6);
            assert!((p.b - p.r * 0.8).abs() < 1e-6);
        }
    }

    #[test]
    fn field_turns_with_time_scale() {
        let mut rng = Rng::new(11);
        let mut field = AsteroidField::generate(&spec(4), &mut rng);
        let cal = Calibration::default();
        let running = ClockSnapshot {
            time_scale: 10.0,
            paused: false,
        };
        field.integrate(1.0, running, &cal);
        assert!((field.phase - 0.2).abs() < 1e-12);
        let paused = ClockSnapshot {
            paused: true,
            ..running
        };
        field.integrate(1.0, paused, &cal);
        assert!((field.phase - 0.2).abs() < 1e-12);
    }

    #[test]
    fn particle_is_32_bytes() {
        assert_eq!(std::mem::size_of::<AsteroidParticle>(), AsteroidParticle::STRIDE_BYTES);
    }
}
