pub mod runner;

pub use runner::SimRunner;

// Re-exported for the macro expansion in demo crates.
#[doc(hidden)]
pub use console_error_panic_hook;
#[doc(hidden)]
pub use console_log;
#[doc(hidden)]
pub use glam;
#[doc(hidden)]
pub use log;

/// Seed for initial phases and textures. Different on every page load.
pub fn random_seed() -> u64 {
    (js_sys::Math::random() * (1u64 << 53) as f64) as u64
}

/// Generate all `#[wasm_bindgen]` exports for a simulation.
///
/// Generates:
/// - `thread_local!` storage for the SimRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (init, tick, control setters, picking, data accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
/// use orrery_engine::SolarSystem;
///
/// orrery_web::export_simulation!(SolarSystem, "solar-system");
/// // with guide mesh accessors:
/// orrery_web::export_simulation!(SolarSystem, "solar-system", guides);
/// // with guides and a catalog compiled into the module:
/// orrery_web::export_simulation!(SolarSystem, "solar-system", guides, catalog = include_str!("catalog.json"));
/// ```
///
/// # Arguments
///
/// - `$sim_type`: a type implementing `orrery_engine::Simulation`
/// - `$sim_name`: a string literal used in log messages
#[macro_export]
macro_rules! export_simulation {
    ($sim_type:ty, $sim_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::SimRunner<$sim_type>>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::SimRunner<$sim_type>) -> R) -> R {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let runner = borrow.as_mut().expect("Simulation not initialized. Call sim_init() first.");
                f(runner)
            })
        }

        fn push(event: ::orrery_engine::ControlEvent) {
            with_runner(|r| r.push_control(event));
        }

        /// Build the scene from a catalog and an optional config (empty string
        /// for defaults). Malformed bodies are skipped with a console warning.
        #[wasm_bindgen]
        pub fn sim_init_with(catalog_json: &str, config_json: &str) -> Result<(), JsValue> {
            $crate::console_error_panic_hook::set_once();
            let _ = $crate::console_log::init_with_level($crate::log::Level::Info);

            let config = if config_json.trim().is_empty() {
                ::orrery_engine::EngineConfig::default()
            } else {
                ::orrery_engine::EngineConfig::from_json(config_json)
                    .map_err(|e| JsValue::from_str(&format!("config: {}", e)))?
            };
            let runner = $crate::SimRunner::<$sim_type>::from_catalog_json(
                catalog_json,
                config,
                $crate::random_seed(),
            )
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });
            $crate::log::info!("{}: initialized", $sim_name);
            Ok(())
        }

        /// Drop the scene and every generated texture.
        #[wasm_bindgen]
        pub fn sim_shutdown() {
            RUNNER.with(|cell| {
                cell.borrow_mut().take();
            });
            $crate::log::info!("{}: shut down", $sim_name);
        }

        #[wasm_bindgen]
        pub fn sim_tick(dt: f64) {
            with_runner(|r| r.tick(dt));
        }

        // ---- Controls ----

        #[wasm_bindgen]
        pub fn sim_set_time_scale(value: f64) {
            push(::orrery_engine::ControlEvent::SetTimeScale(value));
        }

        /// Log-scale slider position in [0, 3].
        #[wasm_bindgen]
        pub fn sim_set_time_slider(position: f64) {
            push(::orrery_engine::ControlEvent::SetTimeScale(
                ::orrery_engine::slider_to_time_scale(position),
            ));
        }

        #[wasm_bindgen]
        pub fn sim_set_paused(paused: bool) {
            push(::orrery_engine::ControlEvent::SetPaused(paused));
        }

        #[wasm_bindgen]
        pub fn sim_toggle_pause() {
            push(::orrery_engine::ControlEvent::TogglePause);
        }

        #[wasm_bindgen]
        pub fn sim_set_show_orbits(show: bool) {
            push(::orrery_engine::ControlEvent::ShowOrbits(show));
        }

        #[wasm_bindgen]
        pub fn sim_reset_view() {
            push(::orrery_engine::ControlEvent::ResetView);
        }

        #[wasm_bindgen]
        pub fn sim_select_body(id: &str) {
            push(::orrery_engine::ControlEvent::SelectBody(id.to_owned()));
        }

        #[wasm_bindgen]
        pub fn sim_select_moon(moon_id: &str, parent_id: &str) {
            push(::orrery_engine::ControlEvent::SelectMoon {
                moon: moon_id.to_owned(),
                parent: parent_id.to_owned(),
            });
        }

        #[wasm_bindgen]
        pub fn sim_clear_selection() {
            push(::orrery_engine::ControlEvent::ClearSelection);
        }

        /// Pointer click as a world-space ray (camera unprojection is done in JS).
        #[wasm_bindgen]
        pub fn sim_pick(ox: f32, oy: f32, oz: f32, dx: f32, dy: f32, dz: f32) {
            let ray = ::orrery_engine::Ray::new(
                $crate::glam::Vec3::new(ox, oy, oz),
                $crate::glam::Vec3::new(dx, dy, dz),
            );
            push(::orrery_engine::ControlEvent::Pick(ray));
        }

        // ---- Clock readback ----

        #[wasm_bindgen]
        pub fn get_time_scale() -> f64 {
            with_runner(|r| r.clock().time_scale)
        }

        #[wasm_bindgen]
        pub fn get_time_slider() -> f64 {
            with_runner(|r| ::orrery_engine::time_scale_to_slider(r.clock().time_scale))
        }

        #[wasm_bindgen]
        pub fn get_paused() -> bool {
            with_runner(|r| r.clock().paused)
        }

        // ---- Selection / camera ----

        #[wasm_bindgen]
        pub fn get_selection_json() -> String {
            with_runner(|r| r.selection_json().to_owned())
        }

        #[wasm_bindgen]
        pub fn take_selection_changed() -> bool {
            with_runner(|r| r.take_selection_changed())
        }

        #[wasm_bindgen]
        pub fn take_view_reset() -> bool {
            with_runner(|r| r.take_view_reset())
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_instances_ptr() -> *const f32 {
            with_runner(|r| r.instances_ptr())
        }

        #[wasm_bindgen]
        pub fn get_instance_count() -> u32 {
            with_runner(|r| r.instance_count())
        }

        #[wasm_bindgen]
        pub fn get_max_instances() -> u32 {
            with_runner(|r| r.max_instances())
        }

        #[wasm_bindgen]
        pub fn get_texture_count() -> u32 {
            with_runner(|r| r.texture_count())
        }

        #[wasm_bindgen]
        pub fn get_texture_width(slot: u32) -> u32 {
            with_runner(|r| r.texture_width(slot))
        }

        #[wasm_bindgen]
        pub fn get_texture_height(slot: u32) -> u32 {
            with_runner(|r| r.texture_height(slot))
        }

        #[wasm_bindgen]
        pub fn get_texture_pixels(slot: u32) -> Vec<u8> {
            with_runner(|r| r.texture_pixels(slot))
        }

        #[wasm_bindgen]
        pub fn get_asteroids_ptr() -> *const f32 {
            with_runner(|r| r.asteroids_ptr())
        }

        #[wasm_bindgen]
        pub fn get_asteroid_count() -> u32 {
            with_runner(|r| r.asteroid_count())
        }
    };

    // Variant with guide meshes (requires the `guides` feature)
    ($sim_type:ty, $sim_name:literal, guides) => {
        $crate::export_simulation!($sim_type, $sim_name);

        #[wasm_bindgen]
        pub fn get_guide_vertices_ptr() -> *const f32 {
            with_runner(|r| r.guide_vertices_ptr())
        }

        #[wasm_bindgen]
        pub fn get_guide_vertex_count() -> u32 {
            with_runner(|r| r.guide_vertex_count())
        }

        #[wasm_bindgen]
        pub fn get_guide_ranges_ptr() -> *const u32 {
            with_runner(|r| r.guide_ranges_ptr())
        }

        #[wasm_bindgen]
        pub fn get_guide_mesh_count() -> u32 {
            with_runner(|r| r.guide_mesh_count())
        }
    };

    // Variant with a catalog compiled into the module
    ($sim_type:ty, $sim_name:literal, guides, catalog = $catalog:expr) => {
        $crate::export_simulation!($sim_type, $sim_name, guides);

        /// Build the scene from the bundled catalog with default config.
        #[wasm_bindgen]
        pub fn sim_init() -> Result<(), JsValue> {
            sim_init_with($catalog, "")
        }
    };
}
