use std::collections::HashMap;

use crate::catalog::{BodyKind, Rgb8};
use crate::core::rng::RandomSource;
use crate::texture::canvas::Pixmap;
use crate::texture::surface::{self, TextureConfig};

/// What a texture was generated from. Equal keys share one texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureKey {
    Surface { color: Rgb8, kind: BodyKind },
    Moon(Rgb8),
    Ring(Rgb8),
    Sun,
}

/// Stable index of a cached texture, referenced from render instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureSlot(pub u32);

/// Generated textures memoized by key. Filled at scene construction and
/// read-only from the frame loop afterwards.
#[derive(Debug, Default)]
pub struct TextureCache {
    config: TextureConfig,
    slots: HashMap<TextureKey, TextureSlot>,
    textures: Vec<(TextureKey, Pixmap)>,
}

impl TextureCache {
    pub fn new(config: TextureConfig) -> Self {
        Self {
            config,
            slots: HashMap::new(),
            textures: Vec::new(),
        }
    }

    /// Slot for `key`, generating the texture the first time it is asked for.
    pub fn get_or_generate(&mut self, key: TextureKey, rng: &mut dyn RandomSource) -> TextureSlot {
        if let Some(slot) = self.slots.get(&key) {
            return *slot;
        }
        let cfg = &self.config;
        let pixmap = match key {
            TextureKey::Surface { color, kind } => surface::body_surface(color, kind, cfg, rng),
            TextureKey::Moon(color) => surface::moon_surface(color, cfg, rng),
            TextureKey::Ring(color) => surface::ring_band(color, cfg, rng),
            TextureKey::Sun => surface::sun_surface(cfg, rng),
        };
        let slot = TextureSlot(self.textures.len() as u32);
        log::debug!(
            "texture: generated {:?} in slot {} ({}x{})",
            key,
            slot.0,
            pixmap.width(),
            pixmap.height()
        );
        self.textures.push((key, pixmap));
        self.slots.insert(key, slot);
        slot
    }

    pub fn get(&self, slot: TextureSlot) -> Option<&Pixmap> {
        self.textures.get(slot.0 as usize).map(|(_, pix)| pix)
    }

    pub fn key(&self, slot: TextureSlot) -> Option<TextureKey> {
        self.textures.get(slot.0 as usize).map(|(key, _)| *key)
    }

    pub fn slot(&self, key: &TextureKey) -> Option<TextureSlot> {
        self.slots.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}
