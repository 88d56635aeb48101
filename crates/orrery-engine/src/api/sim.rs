use crate::api::config::EngineConfig;
use crate::catalog::Catalog;
use crate::core::clock::ClockSnapshot;
use crate::core::rng::RandomSource;
use crate::input::queue::ControlEvent;
use crate::input::selection::SelectionRecord;
use crate::renderer::instance::InstanceBuffer;
use crate::scene::belt::AsteroidParticle;
use crate::scene::guides::GuideBuffer;
use crate::texture::TextureCache;

/// Everything one frame needs. Built once per tick from a single clock
/// snapshot so every entity sees the same dt and pause state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    /// Simulated seconds since the previous frame, already clamped.
    pub dt: f64,
    pub clock: ClockSnapshot,
    /// Wall-clock seconds since start. Advances while paused.
    pub elapsed: f64,
}

/// Output for the UI layer.
#[derive(Debug, Clone, PartialEq)]
pub enum SimEvent {
    SelectionChanged(SelectionRecord),
    /// The camera should return to its home position.
    ViewReset,
}

/// Static resources produced at construction.
pub struct SceneResources<'a> {
    pub textures: &'a TextureCache,
    pub guides: &'a GuideBuffer,
    pub particles: &'a [AsteroidParticle],
}

/// The contract a simulation fulfils for the web runner.
pub trait Simulation {
    /// Build the scene. The random source seeds initial phases and textures.
    fn build(catalog: Catalog, config: EngineConfig, rng: &mut dyn RandomSource) -> Self
    where
        Self: Sized;

    fn config(&self) -> &EngineConfig;

    fn catalog(&self) -> &Catalog;

    /// Apply a non-clock control event.
    fn handle(&mut self, event: &ControlEvent);

    /// Advance every entity by one frame and recompose positions.
    fn update(&mut self, frame: &FrameContext);

    /// Write this frame's instances.
    fn render(&self, out: &mut InstanceBuffer);

    /// Events raised since the last drain.
    fn drain_events(&mut self) -> Vec<SimEvent>;

    fn resources(&self) -> SceneResources<'_>;
}
