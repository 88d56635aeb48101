//! Procedural surface textures. Decorative only: every generator draws from
//! the injected random source, so two calls with the same inputs match in
//! statistics, not pixels.

use std::f32::consts::PI;

use glam::Vec2;
use serde::Deserialize;

use crate::catalog::{BodyKind, Rgb8};
use crate::core::rng::RandomSource;
use crate::texture::canvas::{ColorStop, Pixmap, Rgba};

/// Texture dimensions and stamp counts.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct TextureConfig {
    pub planet_size: u32,
    pub moon_size: u32,
    pub ring_width: u32,
    pub ring_height: u32,
    pub sun_size: u32,
    pub blemishes: u32,
    pub craters: u32,
    pub speckles: u32,
}

impl Default for TextureConfig {
    fn default() -> Self {
        Self {
            planet_size: 256,
            moon_size: 128,
            ring_width: 512,
            ring_height: 64,
            sun_size: 512,
            blemishes: 100,
            craters: 30,
            speckles: 5000,
        }
    }
}

// Ring band count across the texture width.
const RING_BANDS: f32 = 20.0;
const RING_MID_BRIGHTNESS: f32 = 175.0;

fn random_point(rng: &mut dyn RandomSource, w: u32, h: u32) -> Vec2 {
    Vec2::new(rng.next_f32() * w as f32, rng.next_f32() * h as f32)
}

/// Surface for a star, planet or dwarf planet.
pub fn body_surface(
    color: Rgb8,
    kind: BodyKind,
    cfg: &TextureConfig,
    rng: &mut dyn RandomSource,
) -> Pixmap {
    let size = cfg.planet_size;
    let mut pix = Pixmap::filled(size, size, Rgba::opaque(color));

    match kind {
        BodyKind::Planet => {
            let sheen = [
                ColorStop::new(0.0, Rgba::WHITE.with_alpha(0.1)),
                ColorStop::new(0.5, Rgba::BLACK.with_alpha(0.1)),
                ColorStop::new(1.0, Rgba::WHITE.with_alpha(0.1)),
            ];
            pix.fill_linear_gradient(Vec2::ZERO, Vec2::splat(size as f32), &sheen);

            for _ in 0..cfg.blemishes {
                let center = random_point(rng, size, size);
                let radius = rng.next_f32() * 8.0 + 2.0;
                let alpha = rng.next_f32() * 0.2;
                pix.fill_circle(center, radius, Rgba::BLACK.with_alpha(alpha));
            }
        }
        BodyKind::DwarfPlanet => {
            pix.fill(Rgba::new(50.0, 50.0, 50.0, 0.3));
        }
        BodyKind::Star => {}
    }
    pix
}

/// Moon surface: base fill with dark craters.
pub fn moon_surface(color: Rgb8, cfg: &TextureConfig, rng: &mut dyn RandomSource) -> Pixmap {
    let size = cfg.moon_size;
    let mut pix = Pixmap::filled(size, size, Rgba::opaque(color));
    for _ in 0..cfg.craters {
        let center = random_point(rng, size, size);
        let radius = rng.next_f32() * 8.0 + 2.0;
        let alpha = rng.next_f32() * 0.3;
        pix.fill_circle(center, radius, Rgba::BLACK.with_alpha(alpha));
    }
    pix
}

/// Ring band: one column at a time, sinusoidal opacity, jittered brightness
/// tinted by the ring color.
pub fn ring_band(color: Rgb8, cfg: &TextureConfig, rng: &mut dyn RandomSource) -> Pixmap {
    let (w, h) = (cfg.ring_width, cfg.ring_height);
    let mut pix = Pixmap::new(w, h);
    let base = Rgba::opaque(color);
    for x in 0..w {
        let alpha = (x as f32 / w as f32 * PI * RING_BANDS).sin() * 0.3 + 0.5;
        let brightness = rng.next_f32() * 50.0 + 150.0;
        // Columns are tinted by the ring color; brightness 175 keeps it as authored.
        let gain = brightness / RING_MID_BRIGHTNESS;
        let column = Rgba::new(base.r * gain, base.g * gain, base.b * gain, alpha);
        pix.fill_rect(x as f32, 0.0, 1.0, h as f32, column);
    }
    pix
}

/// Sun photosphere: hot radial gradient plus faint speckles.
pub fn sun_surface(cfg: &TextureConfig, rng: &mut dyn RandomSource) -> Pixmap {
    let size = cfg.sun_size;
    let half = size as f32 * 0.5;
    let stops = [
        ColorStop::new(0.0, Rgba::WHITE),
        ColorStop::new(0.2, Rgba::opaque(Rgb8::new(0xFF, 0xF5, 0xE0))),
        ColorStop::new(0.4, Rgba::opaque(Rgb8::new(0xFF, 0xD7, 0x00))),
        ColorStop::new(0.6, Rgba::opaque(Rgb8::new(0xFF, 0xA5, 0x00))),
        ColorStop::new(0.8, Rgba::opaque(Rgb8::new(0xFF, 0x8C, 0x00))),
        ColorStop::new(1.0, Rgba::opaque(Rgb8::new(0xFF, 0x45, 0x00))),
    ];
    let mut pix = Pixmap::new(size, size);
    pix.fill_radial_gradient(Vec2::splat(half), half, &stops);

    for _ in 0..cfg.speckles {
        let center = random_point(rng, size, size);
        let radius = rng.next_f32() * 3.0;
        let alpha = rng.next_f32() * 0.3;
        pix.fill_circle(center, radius, Rgba::new(255.0, 255.0, 200.0, alpha));
    }
    pix
}
