use wasm_bindgen::prelude::*;
use orrery_engine::SolarSystem;

/// Bilingual catalog: the sun, eight planets, Pluto and the asteroid belt.
pub const CATALOG_JSON: &str = include_str!("../assets/catalog.json");

orrery_web::export_simulation!(SolarSystem, "solar-system", guides, catalog = CATALOG_JSON);
