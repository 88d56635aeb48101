pub mod color;
pub mod error;
pub mod load;
pub mod model;

pub use color::{HexColorError, Rgb8};
pub use error::CatalogError;
pub use load::{Catalog, LoadPolicy};
pub use model::{
    AsteroidBeltSpec, AtmosphericCharacteristics, Bilingual, BodyKind, CelestialBody, Language,
    Moon, OrbitalParameters, PhysicalCharacteristics, RingSpec, DEFAULT_RING_COLOR,
};
