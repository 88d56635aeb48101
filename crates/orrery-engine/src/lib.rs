pub mod api;
pub mod catalog;
pub mod core;
pub mod input;
pub mod renderer;
pub mod scene;
pub mod texture;

// Re-export key types at crate root for convenience
pub use api::config::EngineConfig;
pub use api::sim::{FrameContext, SceneResources, SimEvent, Simulation};
pub use api::types::EntityId;
pub use catalog::{
    AsteroidBeltSpec, Bilingual, BodyKind, Catalog, CatalogError, CelestialBody, Language,
    LoadPolicy, Moon, Rgb8,
};
pub use core::clock::{
    slider_to_time_scale, time_scale_to_slider, ClockSnapshot, ControlError, SimulationClock,
    TIME_SCALE_PRESETS,
};
pub use core::integrator::{Calibration, Period};
pub use core::rng::{RandomSource, Rng};
pub use input::picking::Ray;
pub use input::queue::{ControlEvent, ControlQueue};
pub use input::selection::{Selection, SelectionRecord};
pub use renderer::instance::{InstanceBuffer, InstanceKind, SceneInstance};
pub use scene::belt::AsteroidParticle;
pub use scene::guides::GuideBuffer;
pub use scene::system::SolarSystem;
pub use texture::{Pixmap, TextureCache, TextureConfig, TextureKey, TextureSlot};
