//! Catalog records: the static, hand-authored description of every body.
//!
//! Field names follow the JSON dataset (camelCase). Descriptive sections are
//! optional so that a minimal catalog only needs the numeric parameters.

use serde::{Deserialize, Serialize};

use crate::catalog::color::Rgb8;
use crate::core::integrator::Period;

/// Ring color used when a ringed body does not specify one.
pub const DEFAULT_RING_COLOR: Rgb8 = Rgb8::new(0x88, 0x88, 0x88);

/// Display language for bilingual text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Zh,
    En,
}

/// A piece of text carried in both display languages.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Bilingual {
    pub zh: String,
    pub en: String,
}

impl Bilingual {
    pub fn new(zh: impl Into<String>, en: impl Into<String>) -> Self {
        Self {
            zh: zh.into(),
            en: en.into(),
        }
    }

    pub fn get(&self, language: Language) -> &str {
        match language {
            Language::Zh => &self.zh,
            Language::En => &self.en,
        }
    }
}

/// Closed set of body kinds. Drives texture generation and scene handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BodyKind {
    Star,
    Planet,
    DwarfPlanet,
}

impl BodyKind {
    pub fn as_str(self) -> &'static str {
        match self {
            BodyKind::Star => "star",
            BodyKind::Planet => "planet",
            BodyKind::DwarfPlanet => "dwarf-planet",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrbitalParameters {
    pub semi_major_axis: Bilingual,
    pub eccentricity: Bilingual,
    pub orbital_period: Bilingual,
    pub inclination: Bilingual,
    pub average_velocity: Bilingual,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysicalCharacteristics {
    pub diameter: Bilingual,
    pub mass: Bilingual,
    pub surface_gravity: Bilingual,
    pub escape_velocity: Bilingual,
    pub rotation_period: Bilingual,
    pub axial_tilt: Bilingual,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtmosphericCharacteristics {
    pub composition: Bilingual,
    pub surface_pressure: Bilingual,
    pub temperature: Bilingual,
    pub features: Bilingual,
}

/// A natural satellite, nested under its parent body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Moon {
    pub id: String,
    pub name: Bilingual,
    /// Diameter in km. Only used to derive the render size.
    pub diameter: f64,
    /// Orbit radius as a multiple of the parent's render size.
    pub orbital_radius: f64,
    /// Time units per revolution. Negative means retrograde.
    pub orbital_period: f64,
    pub color: Rgb8,
    #[serde(default)]
    pub description: Bilingual,
}

impl Moon {
    pub fn period(&self) -> Option<Period> {
        Period::new(self.orbital_period)
    }
}

/// A star, planet or dwarf planet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CelestialBody {
    pub id: String,
    pub name: Bilingual,
    #[serde(rename = "type")]
    pub kind: BodyKind,
    pub color: Rgb8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emissive: Option<Rgb8>,
    /// Relative render size (sphere radius).
    pub size: f64,
    /// Relative distance from the star; 0 for the star itself.
    pub orbital_radius: f64,
    /// Time units per revolution. Ignored for the star.
    pub orbital_period: f64,
    /// Time units per spin. Negative means retrograde.
    pub rotation_period: f64,
    /// Degrees. Only orients the ring plane.
    pub axial_tilt: f64,
    /// Degrees. Stored, not applied: orbits share one plane.
    #[serde(default)]
    pub orbital_inclination: f64,
    /// Stored, not applied: orbits are circles.
    #[serde(default)]
    pub orbital_eccentricity: f64,
    #[serde(default)]
    pub has_rings: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ring_color: Option<Rgb8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ring_inner_radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ring_outer_radius: Option<f64>,
    /// Catalog order, which is also render and list order.
    #[serde(default)]
    pub moons: Vec<Moon>,
    #[serde(default)]
    pub description: Bilingual,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orbital_parameters: Option<OrbitalParameters>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical_characteristics: Option<PhysicalCharacteristics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atmospheric_characteristics: Option<AtmosphericCharacteristics>,
    #[serde(default)]
    pub interesting_facts: Vec<Bilingual>,
}

/// Resolved ring band, present only when both radii are authored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingSpec {
    pub color: Rgb8,
    /// Multiple of the body size.
    pub inner: f64,
    /// Multiple of the body size.
    pub outer: f64,
}

impl CelestialBody {
    pub fn is_star(&self) -> bool {
        self.kind == BodyKind::Star
    }

    /// Orbital period, `None` for the star (which never orbits) or a zero period.
    pub fn orbit_period(&self) -> Option<Period> {
        if self.is_star() {
            return None;
        }
        Period::new(self.orbital_period)
    }

    pub fn spin_period(&self) -> Option<Period> {
        Period::new(self.rotation_period)
    }

    pub fn rings(&self) -> Option<RingSpec> {
        if !self.has_rings {
            return None;
        }
        match (self.ring_inner_radius, self.ring_outer_radius) {
            (Some(inner), Some(outer)) => Some(RingSpec {
                color: self.ring_color.unwrap_or(DEFAULT_RING_COLOR),
                inner,
                outer,
            }),
            _ => None,
        }
    }

    pub fn moon(&self, id: &str) -> Option<(usize, &Moon)> {
        self.moons.iter().enumerate().find(|(_, m)| m.id == id)
    }
}

/// The decorative particle band between Mars and Jupiter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AsteroidBeltSpec {
    pub id: String,
    pub name: Bilingual,
    #[serde(default)]
    pub description: Bilingual,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub asteroid_count: usize,
}
