use orrery_engine::{
    Catalog, CatalogError, ClockSnapshot, ControlEvent, ControlQueue, EngineConfig, FrameContext,
    InstanceBuffer, LoadPolicy, Rng, SelectionRecord, SimEvent, Simulation, SimulationClock,
};

/// Generic simulation runner that wires up the frame loop.
///
/// Each concrete demo creates a `thread_local!` SimRunner and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// generic structs directly.
pub struct SimRunner<S: Simulation> {
    sim: S,
    clock: SimulationClock,
    controls: ControlQueue,
    instances: InstanceBuffer,
    /// Wall-clock seconds since init, paused or not.
    elapsed: f64,
    last_frame: Option<FrameContext>,
    /// Latest selection, serialized for the info panel.
    selection_json: String,
    selection_dirty: bool,
    view_reset: bool,
}

impl<S: Simulation> SimRunner<S> {
    pub fn new(sim: S) -> Self {
        let config = sim.config();
        let clock = SimulationClock::with_bounds(
            config.default_time_scale,
            config.min_time_scale,
            config.max_time_scale,
        );
        let instances = InstanceBuffer::with_capacity(config.max_instances);
        Self {
            sim,
            clock,
            controls: ControlQueue::new(),
            instances,
            elapsed: 0.0,
            last_frame: None,
            selection_json: selection_to_json(&SelectionRecord::Idle),
            selection_dirty: false,
            view_reset: false,
        }
    }

    /// Load the catalog leniently, build the simulation and render frame zero.
    /// Excluded bodies are logged; a catalog without a star is fatal.
    pub fn from_catalog_json(
        json: &str,
        config: EngineConfig,
        seed: u64,
    ) -> Result<Self, CatalogError> {
        let (catalog, skipped) = Catalog::from_json_with(json, LoadPolicy::SkipInvalid)?;
        for err in &skipped {
            log::warn!("catalog: skipped entry: {}", err);
        }
        let mut rng = Rng::new(seed);
        let sim = S::build(catalog, config, &mut rng);
        let mut runner = Self::new(sim);
        runner.sim.render(&mut runner.instances);
        Ok(runner)
    }

    pub fn push_control(&mut self, event: ControlEvent) {
        self.controls.push(event);
    }

    /// Run one frame: apply queued controls, snapshot the clock once, advance
    /// every entity with that snapshot, then rebuild the instance buffer.
    pub fn tick(&mut self, dt: f64) {
        for event in self.controls.drain() {
            if !self.clock.apply(&event) {
                self.sim.handle(&event);
            }
        }

        let dt = self.sim.config().clamp_dt(dt);
        self.elapsed += dt;
        let frame = FrameContext {
            dt,
            clock: self.clock.snapshot(),
            elapsed: self.elapsed,
        };
        self.sim.update(&frame);
        self.last_frame = Some(frame);

        self.instances.clear();
        self.sim.render(&mut self.instances);
        if self.instances.dropped() > 0 {
            log::warn!(
                "runner: instance buffer full, dropped {}",
                self.instances.dropped()
            );
        }

        for event in self.sim.drain_events() {
            match event {
                SimEvent::SelectionChanged(record) => {
                    self.selection_json = selection_to_json(&record);
                    self.selection_dirty = true;
                }
                SimEvent::ViewReset => self.view_reset = true,
            }
        }
    }

    pub fn sim(&self) -> &S {
        &self.sim
    }

    pub fn clock(&self) -> ClockSnapshot {
        self.clock.snapshot()
    }

    pub fn last_frame(&self) -> Option<FrameContext> {
        self.last_frame
    }

    // ---- Selection / camera signals ----

    pub fn selection_json(&self) -> &str {
        &self.selection_json
    }

    /// True once after each selection change.
    pub fn take_selection_changed(&mut self) -> bool {
        std::mem::take(&mut self.selection_dirty)
    }

    /// True once after each reset-view request.
    pub fn take_view_reset(&mut self) -> bool {
        std::mem::take(&mut self.view_reset)
    }

    // ---- Pointer accessors for JS reads ----

    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.instance_count() as u32
    }

    pub fn max_instances(&self) -> u32 {
        self.instances.capacity() as u32
    }

    pub fn texture_count(&self) -> u32 {
        self.sim.resources().textures.len() as u32
    }

    pub fn texture_width(&self, slot: u32) -> u32 {
        self.texture(slot).map_or(0, |t| t.width())
    }

    pub fn texture_height(&self, slot: u32) -> u32 {
        self.texture(slot).map_or(0, |t| t.height())
    }

    /// RGBA8 copy of a texture, empty for an unknown slot.
    pub fn texture_pixels(&self, slot: u32) -> Vec<u8> {
        self.texture(slot).map(|t| t.data().to_vec()).unwrap_or_default()
    }

    fn texture(&self, slot: u32) -> Option<&orrery_engine::Pixmap> {
        self.sim
            .resources()
            .textures
            .get(orrery_engine::TextureSlot(slot))
    }

    pub fn guide_vertices_ptr(&self) -> *const f32 {
        self.sim.resources().guides.vertices_ptr()
    }

    pub fn guide_vertex_count(&self) -> u32 {
        self.sim.resources().guides.vertex_count() as u32
    }

    pub fn guide_ranges_ptr(&self) -> *const u32 {
        self.sim.resources().guides.ranges_ptr()
    }

    pub fn guide_mesh_count(&self) -> u32 {
        self.sim.resources().guides.mesh_count() as u32
    }

    pub fn asteroids_ptr(&self) -> *const f32 {
        self.sim.resources().particles.as_ptr() as *const f32
    }

    pub fn asteroid_count(&self) -> u32 {
        self.sim.resources().particles.len() as u32
    }
}

fn selection_to_json(record: &SelectionRecord) -> String {
    match serde_json::to_string(record) {
        Ok(json) => json,
        Err(e) => {
            log::error!("selection: serialize failed: {}", e);
            String::from(r#"{"state":"idle"}"#)
        }
    }
}
