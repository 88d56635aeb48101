use std::collections::HashSet;

use serde::Deserialize;
use serde_json::Value;

use crate::catalog::color::Rgb8;
use crate::catalog::error::CatalogError;
use crate::catalog::model::{AsteroidBeltSpec, BodyKind, CelestialBody, Moon};

/// How to treat a malformed body during load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPolicy {
    /// The first data-integrity error aborts the load.
    #[default]
    Strict,
    /// Malformed bodies are excluded; their diagnostics are returned.
    SkipInvalid,
}

/// Raw document. Entries stay untyped until each one is decoded on its
/// own, so a single malformed body cannot reject the whole file.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogDocument {
    bodies: Vec<Value>,
    #[serde(default)]
    asteroid_belt: Option<Value>,
}

/// Validated, read-only table of bodies. Exactly one star.
#[derive(Debug, Clone)]
pub struct Catalog {
    bodies: Vec<CelestialBody>,
    asteroid_belt: Option<AsteroidBeltSpec>,
    star: usize,
}

impl Catalog {
    /// Parse and validate strictly.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Self::from_json_with(json, LoadPolicy::Strict).map(|(catalog, _)| catalog)
    }

    /// Parse and validate under the given policy. With `SkipInvalid` the
    /// second element lists every excluded entry.
    pub fn from_json_with(
        json: &str,
        policy: LoadPolicy,
    ) -> Result<(Self, Vec<CatalogError>), CatalogError> {
        let doc: CatalogDocument = serde_json::from_str(json)?;
        let entries = doc
            .bodies
            .into_iter()
            .enumerate()
            .map(|(index, value)| decode_body(index, value));
        let belt = doc.asteroid_belt.map(decode_belt);
        Self::assemble(entries, belt, policy)
    }

    pub fn from_parts(
        bodies: Vec<CelestialBody>,
        asteroid_belt: Option<AsteroidBeltSpec>,
        policy: LoadPolicy,
    ) -> Result<(Self, Vec<CatalogError>), CatalogError> {
        Self::assemble(bodies.into_iter().map(Ok), asteroid_belt.map(Ok), policy)
    }

    fn assemble(
        entries: impl Iterator<Item = Result<CelestialBody, CatalogError>>,
        asteroid_belt: Option<Result<AsteroidBeltSpec, CatalogError>>,
        policy: LoadPolicy,
    ) -> Result<(Self, Vec<CatalogError>), CatalogError> {
        let mut accepted: Vec<CelestialBody> = Vec::new();
        let mut skipped = Vec::new();
        let mut body_ids = HashSet::new();
        let mut moon_ids = HashSet::new();
        let mut star = None;

        for entry in entries {
            let checked = entry.and_then(|body| {
                validate_body(&body)?;
                check_unique(&body, &body_ids, &moon_ids)?;
                if body.is_star() && star.is_some() {
                    return Err(CatalogError::ExtraStar(body.id.clone()));
                }
                Ok(body)
            });

            match checked {
                Ok(body) => {
                    if body.is_star() {
                        star = Some(accepted.len());
                    }
                    body_ids.insert(body.id.clone());
                    moon_ids.extend(body.moons.iter().map(|m| m.id.clone()));
                    accepted.push(body);
                }
                Err(err) => match policy {
                    LoadPolicy::Strict => return Err(err),
                    LoadPolicy::SkipInvalid => {
                        log::warn!("catalog: excluding entry: {}", err);
                        skipped.push(err);
                    }
                },
            }
        }

        let star = star.ok_or(CatalogError::MissingStar)?;

        let asteroid_belt = match asteroid_belt.map(|belt| belt.and_then(validate_belt)) {
            Some(Ok(belt)) => Some(belt),
            Some(Err(err)) => match policy {
                LoadPolicy::Strict => return Err(err),
                LoadPolicy::SkipInvalid => {
                    log::warn!("catalog: excluding asteroid belt: {}", err);
                    skipped.push(err);
                    None
                }
            },
            None => None,
        };

        log::info!(
            "catalog: loaded {} bodies, {} moons ({} excluded)",
            accepted.len(),
            accepted.iter().map(|b| b.moons.len()).sum::<usize>(),
            skipped.len()
        );

        Ok((
            Self {
                bodies: accepted,
                asteroid_belt,
                star,
            },
            skipped,
        ))
    }

    /// All bodies in catalog order (star first if authored first).
    pub fn bodies(&self) -> &[CelestialBody] {
        &self.bodies
    }

    pub fn body(&self, index: usize) -> Option<&CelestialBody> {
        self.bodies.get(index)
    }

    pub fn find_body(&self, id: &str) -> Option<(usize, &CelestialBody)> {
        self.bodies.iter().enumerate().find(|(_, b)| b.id == id)
    }

    /// Locate a moon under a specific parent. Returns (body index, moon index).
    pub fn find_moon(&self, parent_id: &str, moon_id: &str) -> Option<(usize, usize)> {
        let (body_index, body) = self.find_body(parent_id)?;
        let (moon_index, _) = body.moon(moon_id)?;
        Some((body_index, moon_index))
    }

    pub fn moon(&self, body_index: usize, moon_index: usize) -> Option<&Moon> {
        self.bodies.get(body_index)?.moons.get(moon_index)
    }

    pub fn star_index(&self) -> usize {
        self.star
    }

    pub fn star(&self) -> &CelestialBody {
        &self.bodies[self.star]
    }

    pub fn planets(&self) -> impl Iterator<Item = &CelestialBody> {
        self.bodies.iter().filter(|b| b.kind == BodyKind::Planet)
    }

    pub fn dwarf_planets(&self) -> impl Iterator<Item = &CelestialBody> {
        self.bodies.iter().filter(|b| b.kind == BodyKind::DwarfPlanet)
    }

    /// Every moon with its parent, in catalog order.
    pub fn moons(&self) -> impl Iterator<Item = (&CelestialBody, &Moon)> {
        self.bodies
            .iter()
            .flat_map(|body| body.moons.iter().map(move |moon| (body, moon)))
    }

    pub fn asteroid_belt(&self) -> Option<&AsteroidBeltSpec> {
        self.asteroid_belt.as_ref()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

/// Label for diagnostics: the entry's id, or its position when it has none.
fn entry_label(index: usize, value: &Value) -> String {
    match value.get("id").and_then(Value::as_str) {
        Some(id) => id.to_owned(),
        None => format!("bodies[{}]", index),
    }
}

/// First color string on a body or its moons that is not valid hex.
fn first_bad_color(value: &Value) -> Option<String> {
    let own = ["color", "emissive", "ringColor"]
        .into_iter()
        .filter_map(|key| value.get(key));
    let moons = value
        .get("moons")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|moon| moon.get("color"));
    own.chain(moons)
        .filter_map(Value::as_str)
        .find(|s| Rgb8::parse_hex(s).is_none())
        .map(str::to_owned)
}

fn decode_body(index: usize, value: Value) -> Result<CelestialBody, CatalogError> {
    let body = entry_label(index, &value);
    if let Some(bad) = first_bad_color(&value) {
        return Err(CatalogError::InvalidColor { body, value: bad });
    }
    serde_json::from_value(value)
        .map_err(|source| CatalogError::MalformedEntry { body, source })
}

fn decode_belt(value: Value) -> Result<AsteroidBeltSpec, CatalogError> {
    serde_json::from_value(value).map_err(|source| CatalogError::MalformedEntry {
        body: String::from("asteroidBelt"),
        source,
    })
}

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn non_zero(value: f64) -> bool {
    value.is_finite() && value != 0.0
}

fn validate_body(body: &CelestialBody) -> Result<(), CatalogError> {
    let id = || body.id.clone();

    if !positive(body.size) {
        return Err(CatalogError::InvalidDimension {
            body: id(),
            field: "size",
            value: body.size,
        });
    }
    if !non_zero(body.rotation_period) {
        return Err(CatalogError::InvalidPeriod {
            body: id(),
            field: "rotationPeriod",
            value: body.rotation_period,
        });
    }

    match body.kind {
        BodyKind::Star => {
            if body.orbital_radius != 0.0 {
                return Err(CatalogError::InvalidOrbitalRadius {
                    body: id(),
                    kind: body.kind.as_str(),
                    value: body.orbital_radius,
                });
            }
        }
        BodyKind::Planet | BodyKind::DwarfPlanet => {
            if !positive(body.orbital_radius) {
                return Err(CatalogError::InvalidOrbitalRadius {
                    body: id(),
                    kind: body.kind.as_str(),
                    value: body.orbital_radius,
                });
            }
            if !non_zero(body.orbital_period) {
                return Err(CatalogError::InvalidPeriod {
                    body: id(),
                    field: "orbitalPeriod",
                    value: body.orbital_period,
                });
            }
        }
    }

    if body.has_rings {
        let inner = body
            .ring_inner_radius
            .ok_or_else(|| CatalogError::MissingRingRadius {
                body: id(),
                missing: "ringInnerRadius",
            })?;
        let outer = body
            .ring_outer_radius
            .ok_or_else(|| CatalogError::MissingRingRadius {
                body: id(),
                missing: "ringOuterRadius",
            })?;
        if !positive(inner) || !positive(outer) || inner >= outer {
            return Err(CatalogError::InvalidRingBand {
                body: id(),
                inner,
                outer,
            });
        }
    }

    for moon in &body.moons {
        validate_moon(body, moon)?;
    }
    Ok(())
}

fn validate_moon(parent: &CelestialBody, moon: &Moon) -> Result<(), CatalogError> {
    let label = || format!("{}/{}", parent.id, moon.id);

    if !non_zero(moon.orbital_period) {
        return Err(CatalogError::InvalidPeriod {
            body: label(),
            field: "orbitalPeriod",
            value: moon.orbital_period,
        });
    }
    if !positive(moon.orbital_radius) {
        return Err(CatalogError::InvalidDimension {
            body: label(),
            field: "orbitalRadius",
            value: moon.orbital_radius,
        });
    }
    if !positive(moon.diameter) {
        return Err(CatalogError::InvalidDimension {
            body: label(),
            field: "diameter",
            value: moon.diameter,
        });
    }
    Ok(())
}

fn check_unique(
    body: &CelestialBody,
    body_ids: &HashSet<String>,
    moon_ids: &HashSet<String>,
) -> Result<(), CatalogError> {
    if body_ids.contains(&body.id) {
        return Err(CatalogError::DuplicateBody(body.id.clone()));
    }
    let mut local = HashSet::new();
    for moon in &body.moons {
        if moon_ids.contains(&moon.id) || !local.insert(moon.id.as_str()) {
            return Err(CatalogError::DuplicateMoon(moon.id.clone()));
        }
    }
    Ok(())
}

fn validate_belt(belt: AsteroidBeltSpec) -> Result<AsteroidBeltSpec, CatalogError> {
    let band_ok = positive(belt.inner_radius)
        && belt.outer_radius.is_finite()
        && belt.inner_radius < belt.outer_radius;
    if band_ok && belt.asteroid_count > 0 {
        Ok(belt)
    } else {
        Err(CatalogError::InvalidBelt {
            inner: belt.inner_radius,
            outer: belt.outer_radius,
            count: belt.asteroid_count,
        })
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    /// Small catalog shared by engine tests: sun, Earth with one moon,
    /// Saturn with rings, Venus spinning retrograde, and Pluto.
    pub const MINI_CATALOG: &str = r##"{
        "bodies": [
            { "id": "sun", "name": { "zh": "太阳", "en": "Sun" }, "type": "star",
              "color": "#FDB813", "emissive": "#FDB813", "size": 5, "orbitalRadius": 0,
              "orbitalPeriod": 0, "rotationPeriod": 25.4, "axialTilt": 7.25 },
            { "id": "mercury", "name": { "zh": "水星", "en": "Mercury" }, "type": "planet",
              "color": "#B5B5B5", "size": 0.4, "orbitalRadius": 8, "orbitalPeriod": 0.24,
              "rotationPeriod": 58.6, "axialTilt": 0.034 },
            { "id": "venus", "name": { "zh": "金星", "en": "Venus" }, "type": "planet",
              "color": "#E6C229", "size": 0.9, "orbitalRadius": 12, "orbitalPeriod": 0.62,
              "rotationPeriod": -243, "axialTilt": 177.4 },
            { "id": "earth", "name": { "zh": "地球", "en": "Earth" }, "type": "planet",
              "color": "#6B93D6", "size": 1, "orbitalRadius": 16, "orbitalPeriod": 1,
              "rotationPeriod": 1, "axialTilt": 23.4,
              "moons": [
                { "id": "moon", "name": { "zh": "月球", "en": "Moon" }, "diameter": 3474,
                  "orbitalRadius": 2.5, "orbitalPeriod": 27.3, "color": "#CCCCCC" }
              ] },
            { "id": "saturn", "name": { "zh": "土星", "en": "Saturn" }, "type": "planet",
              "color": "#F4D59E", "size": 2.2, "orbitalRadius": 52, "orbitalPeriod": 29.46,
              "rotationPeriod": 0.44, "axialTilt": 26.7, "hasRings": true,
              "ringColor": "#C9B896", "ringInnerRadius": 1.5, "ringOuterRadius": 2.8,
              "moons": [
                { "id": "titan", "name": { "zh": "土卫六", "en": "Titan" }, "diameter": 5150,
                  "orbitalRadius": 5.0, "orbitalPeriod": 15.95, "color": "#DAA520" }
              ] },
            { "id": "neptune", "name": { "zh": "海王星", "en": "Neptune" }, "type": "planet",
              "color": "#5B5DDF", "size": 1.5, "orbitalRadius": 84, "orbitalPeriod": 164.8,
              "rotationPeriod": 0.67, "axialTilt": 28.3,
              "moons": [
                { "id": "triton", "name": { "zh": "海卫一", "en": "Triton" }, "diameter": 2707,
                  "orbitalRadius": 2.5, "orbitalPeriod": -5.88, "color": "#FFB6C1" }
              ] },
            { "id": "pluto", "name": { "zh": "冥王星", "en": "Pluto" }, "type": "dwarf-planet",
              "color": "#D2B48C", "size": 0.25, "orbitalRadius": 95, "orbitalPeriod": 248,
              "rotationPeriod": -6.39, "axialTilt": 122.5 }
        ],
        "asteroidBelt": {
            "id": "asteroid-belt", "name": { "zh": "小行星带", "en": "Asteroid Belt" },
            "innerRadius": 28, "outerRadius": 34, "asteroidCount": 64
        }
    }"##;
}
