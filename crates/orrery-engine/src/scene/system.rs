//! The solar-system scene: builds per-entity state from the catalog, runs
//! the integrator each frame, composes positions parent-first and writes
//! render instances.

use std::f32::consts::FRAC_PI_2;

use crate::api::config::EngineConfig;
use crate::api::sim::{FrameContext, SceneResources, SimEvent, Simulation};
use crate::api::types::{EntityId, IdAllocator};
use crate::catalog::{BodyKind, Catalog};
use crate::core::rng::RandomSource;
use crate::input::picking::{pick_nearest, PickSphere, Ray};
use crate::input::queue::ControlEvent;
use crate::input::selection::{BodyRef, MoonRef, Selection, SelectionController};
use crate::renderer::instance::{InstanceBuffer, InstanceKind, SceneInstance};
use crate::scene::belt::AsteroidField;
use crate::scene::bodies::{ring_tilt, BodyState, MoonState, RingState};
use crate::scene::guides::{GuideBuffer, GuideBuilder};
use crate::scene::sun;
use crate::texture::{TextureCache, TextureKey};

// ── Orbit guides ─────────────────────────────────────────────────────

/// Half-width of a planet's orbit band.
const PLANET_GUIDE_HALF_WIDTH: f64 = 0.1;
const MOON_GUIDE_HALF_WIDTH: f64 = 0.02;
pub const PLANET_GUIDE_ALPHA: f32 = 0.4;
pub const MOON_GUIDE_ALPHA: f32 = 0.3;
pub const RING_ALPHA: f32 = 0.8;
/// Guides are authored flat in XY; this lays them into the orbital plane.
const GUIDE_TILT: f32 = -FRAC_PI_2;
const HIGHLIGHT_TILT: f32 = FRAC_PI_2;

/// Shared marker meshes, one per highlight band.
#[derive(Debug, Clone, Copy, Default)]
struct HighlightMeshes {
    planet: Option<usize>,
    small: Option<usize>,
}

pub struct SolarSystem {
    config: EngineConfig,
    catalog: Catalog,
    bodies: Vec<BodyState>,
    moons: Vec<MoonState>,
    star: usize,
    belt: Option<AsteroidField>,
    textures: TextureCache,
    guides: GuideBuffer,
    highlights: HighlightMeshes,
    selection: SelectionController,
    show_orbits: bool,
    elapsed: f64,
    events: Vec<SimEvent>,
}

impl SolarSystem {
    pub fn bodies(&self) -> &[BodyState] {
        &self.bodies
    }

    pub fn moons(&self) -> &[MoonState] {
        &self.moons
    }

    pub fn star(&self) -> &BodyState {
        &self.bodies[self.star]
    }

    pub fn belt(&self) -> Option<&AsteroidField> {
        self.belt.as_ref()
    }

    pub fn selection(&self) -> Selection {
        self.selection.current()
    }

    pub fn show_orbits(&self) -> bool {
        self.show_orbits
    }

    pub fn textures(&self) -> &TextureCache {
        &self.textures
    }

    pub fn body_by_id(&self, id: &str) -> Option<&BodyState> {
        let (index, _) = self.catalog.find_body(id)?;
        self.bodies.get(index)
    }

    pub fn moon_by_id(&self, parent_id: &str, moon_id: &str) -> Option<&MoonState> {
        let (body, moon) = self.catalog.find_moon(parent_id, moon_id)?;
        self.moons.iter().find(|m| m.parent == body && m.index == moon)
    }

    /// Planet positions first, then every moon from its parent's fresh position.
    fn compose(&mut self) {
        for body in &mut self.bodies {
            body.compose();
        }
        let bodies = &self.bodies;
        for moon in &mut self.moons {
            moon.compose(bodies[moon.parent].position);
        }
    }

    fn pick_spheres(&self) -> Vec<PickSphere> {
        let bodies = self.bodies.iter().enumerate().map(|(i, b)| PickSphere {
            target: Selection::Body(BodyRef(i)),
            center: b.position,
            radius: b.size,
        });
        let moons = self.moons.iter().map(|m| PickSphere {
            target: Selection::Moon(MoonRef {
                body: m.parent,
                moon: m.index,
            }),
            center: m.position,
            radius: m.size,
        });
        bodies.chain(moons).collect()
    }

    fn pick(&mut self, ray: &Ray) {
        let spheres = self.pick_spheres();
        match pick_nearest(ray, &spheres) {
            Some(target) => {
                self.selection.select(target);
            }
            None => log::debug!("pick: miss"),
        }
    }

    fn publish_selection(&mut self) {
        if self.selection.take_change() {
            let record = self.selection.record(&self.catalog);
            self.events.push(SimEvent::SelectionChanged(record));
        }
    }

    fn moon_state(&self, r: MoonRef) -> Option<&MoonState> {
        self.moons
            .iter()
            .find(|m| m.parent == r.body && m.index == r.moon)
    }

    fn highlight_instance(&self) -> Option<SceneInstance> {
        let (entity, position, size, kind) = match self.selection.current() {
            Selection::Idle => return None,
            Selection::Body(BodyRef(index)) => {
                let b = self.bodies.get(index)?;
                (b.entity, b.position, b.size, Some(b.kind))
            }
            Selection::Moon(r) => {
                let m = self.moon_state(r)?;
                (m.entity, m.position, m.size, None)
            }
        };
        let mesh = match kind {
            Some(BodyKind::Planet) | Some(BodyKind::DwarfPlanet) => self.highlights.planet,
            _ => self.highlights.small,
        }?;
        Some(
            SceneInstance::new(InstanceKind::Highlight)
                .with_entity(entity.0)
                .with_pos(position)
                .with_tilt(HIGHLIGHT_TILT)
                .with_scale(size)
                .with_mesh(mesh)
                .with_alpha(sun::HIGHLIGHT_ALPHA),
        )
    }
}

fn body_texture_key(kind: BodyKind, color: crate::catalog::Rgb8) -> TextureKey {
    match kind {
        BodyKind::Star => TextureKey::Sun,
        BodyKind::Planet | BodyKind::DwarfPlanet => TextureKey::Surface { color, kind },
    }
}

impl Simulation for SolarSystem {
    fn build(catalog: Catalog, config: EngineConfig, rng: &mut dyn RandomSource) -> Self {
        let mut ids = IdAllocator::new();
        let mut textures = TextureCache::new(config.textures);
        let mut guides = GuideBuilder::new(config.guide_tolerance);

        let mut bodies = Vec::with_capacity(catalog.len());
        for body in catalog.bodies() {
            let texture = textures.get_or_generate(body_texture_key(body.kind, body.color), rng);
            let mut state = BodyState::new(ids.next_id(), body, texture, rng);
            if state.orbit.is_some() {
                let r = body.orbital_radius;
                state.orbit_guide = guides.annulus(
                    (r - PLANET_GUIDE_HALF_WIDTH) as f32,
                    (r + PLANET_GUIDE_HALF_WIDTH) as f32,
                );
            }
            if let Some(ring) = body.rings() {
                state.ring = Some(RingState {
                    tilt: ring_tilt(body.axial_tilt),
                    texture: textures.get_or_generate(TextureKey::Ring(ring.color), rng),
                    mesh: guides.annulus(
                        (body.size * ring.inner) as f32,
                        (body.size * ring.outer) as f32,
                    ),
                });
            }
            bodies.push(state);
        }

        let mut moons = Vec::new();
        for (parent_index, parent) in catalog.bodies().iter().enumerate() {
            for (index, moon) in parent.moons.iter().enumerate() {
                let texture = textures.get_or_generate(TextureKey::Moon(moon.color), rng);
                let mut state = MoonState::new(
                    ids.next_id(),
                    (parent_index, parent),
                    index,
                    moon,
                    texture,
                    rng,
                );
                state.orbit_guide = guides.annulus(
                    (state.orbit_radius - MOON_GUIDE_HALF_WIDTH) as f32,
                    (state.orbit_radius + MOON_GUIDE_HALF_WIDTH) as f32,
                );
                moons.push(state);
            }
        }

        let highlights = HighlightMeshes {
            planet: guides.annulus(sun::PLANET_HIGHLIGHT.0, sun::PLANET_HIGHLIGHT.1),
            small: guides.annulus(sun::SMALL_HIGHLIGHT.0, sun::SMALL_HIGHLIGHT.1),
        };

        let belt = catalog
            .asteroid_belt()
            .map(|spec| AsteroidField::generate(spec, rng));

        let guides = guides.finish();
        log::info!(
            "scene: {} bodies, {} moons, {} asteroids, {} textures, {} guide meshes",
            bodies.len(),
            moons.len(),
            belt.as_ref().map_or(0, |b| b.len()),
            textures.len(),
            guides.mesh_count()
        );

        let mut system = Self {
            star: catalog.star_index(),
            show_orbits: config.show_orbits,
            config,
            catalog,
            bodies,
            moons,
            belt,
            textures,
            guides,
            highlights,
            selection: SelectionController::new(),
            elapsed: 0.0,
            events: Vec::new(),
        };
        system.compose();
        system
    }

    fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    fn handle(&mut self, event: &ControlEvent) {
        match event {
            ControlEvent::ShowOrbits(show) => self.show_orbits = *show,
            ControlEvent::ResetView => {
                self.selection.clear();
                self.events.push(SimEvent::ViewReset);
            }
            ControlEvent::SelectBody(id) => {
                self.selection.select_body(&self.catalog, id);
            }
            ControlEvent::SelectMoon { moon, parent } => {
                self.selection.select_moon(&self.catalog, moon, parent);
            }
            ControlEvent::ClearSelection => {
                self.selection.clear();
            }
            ControlEvent::Pick(ray) => self.pick(ray),
            ControlEvent::SetTimeScale(_)
            | ControlEvent::SetPaused(_)
            | ControlEvent::TogglePause => {
                log::debug!("scene: clock event {:?} ignored", event);
            }
        }
        self.publish_selection();
    }

    fn update(&mut self, frame: &FrameContext) {
        let (dt, clock) = (frame.dt, frame.clock);
        let cal = self.config.calibration;

        for body in &mut self.bodies {
            body.integrate(dt, clock, &cal);
        }
        let star = &mut self.bodies[self.star];
        star.spin_phase = sun::spin(star.spin_phase, dt, clock, &cal);

        for moon in &mut self.moons {
            moon.integrate(dt, clock, &cal);
        }
        if let Some(belt) = &mut self.belt {
            belt.integrate(dt, clock, &cal);
        }
        self.elapsed = frame.elapsed;
        self.compose();
    }

    fn render(&self, out: &mut InstanceBuffer) {
        for (index, body) in self.bodies.iter().enumerate() {
            let kind = match body.kind {
                BodyKind::Star => InstanceKind::Star,
                BodyKind::Planet => InstanceKind::Planet,
                BodyKind::DwarfPlanet => InstanceKind::DwarfPlanet,
            };
            out.push(
                SceneInstance::new(kind)
                    .with_entity(body.entity.0)
                    .with_pos(body.position)
                    .with_spin(body.spin_phase as f32)
                    .with_scale(body.size)
                    .with_texture(body.texture.0)
                    .with_highlight(self.selection.is_selected_body(index)),
            );

            if body.kind == BodyKind::Star {
                out.push(
                    SceneInstance::new(InstanceKind::Corona)
                        .with_entity(body.entity.0)
                        .with_pos(body.position)
                        .with_scale(sun::corona_radius(body.size, self.elapsed))
                        .with_alpha(sun::CORONA_ALPHA),
                );
            }

            if let Some(RingState {
                tilt,
                texture,
                mesh: Some(mesh),
            }) = body.ring
            {
                out.push(
                    SceneInstance::new(InstanceKind::Ring)
                        .with_entity(body.entity.0)
                        .with_pos(body.position)
                        .with_tilt(tilt)
                        .with_texture(texture.0)
                        .with_mesh(mesh)
                        .with_alpha(RING_ALPHA),
                );
            }

            if let (true, Some(mesh)) = (self.show_orbits, body.orbit_guide) {
                out.push(
                    SceneInstance::new(InstanceKind::OrbitGuide)
                        .with_entity(body.entity.0)
                        .with_tilt(GUIDE_TILT)
                        .with_mesh(mesh)
                        .with_alpha(PLANET_GUIDE_ALPHA),
                );
            }
        }

        for moon in &self.moons {
            out.push(
                SceneInstance::new(InstanceKind::Moon)
                    .with_entity(moon.entity.0)
                    .with_pos(moon.position)
                    .with_spin(moon.spin_phase as f32)
                    .with_scale(moon.size)
                    .with_texture(moon.texture.0)
                    .with_highlight(self.selection.is_selected_moon(moon.parent, moon.index)),
            );
            if let (true, Some(mesh)) = (self.show_orbits, moon.orbit_guide) {
                out.push(
                    SceneInstance::new(InstanceKind::OrbitGuide)
                        .with_entity(moon.entity.0)
                        .with_pos(self.bodies[moon.parent].position)
                        .with_tilt(GUIDE_TILT)
                        .with_mesh(mesh)
                        .with_alpha(MOON_GUIDE_ALPHA),
                );
            }
        }

        if let Some(belt) = &self.belt {
            out.push(
                SceneInstance::new(InstanceKind::Belt)
                    .with_spin(belt.phase as f32)
                    .with_alpha(crate::scene::belt::BELT_ALPHA),
            );
        }

        if let Some(marker) = self.highlight_instance() {
            out.push(marker);
        }
    }

    fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    fn resources(&self) -> SceneResources<'_> {
        SceneResources {
            textures: &self.textures,
            guides: &self.guides,
            particles: self.belt.as_ref().map(|b| b.particles()).unwrap_or(&[]),
        }
    }
}

impl SolarSystem {
    /// Entity id of a selection target.
    pub fn entity_of(&self, selection: Selection) -> Option<EntityId> {
        match selection {
            Selection::Idle => None,
            Selection::Body(BodyRef(i)) => self.bodies.get(i).map(|b| b.entity),
            Selection::Moon(r) => self.moon_state(r).map(|m| m.entity),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::load::fixtures::MINI_CATALOG;
    use crate::core::clock::ClockSnapshot;
    use crate::core::rng::Rng;
    use crate::input::selection::SelectionRecord;
    use crate::texture::TextureConfig;
    use glam::Vec3;

    fn tiny_config() -> EngineConfig {
        EngineConfig {
            textures: TextureConfig {
                planet_size: 8,
                moon_size: 8,
                ring_width: 16,
                ring_height: 2,
                sun_size: 8,
                blemishes: 2,
                craters: 2,
                speckles: 4,
            },
            ..EngineConfig::default()
        }
    }

    fn system() -> SolarSystem {
        let catalog = Catalog::from_json(MINI_CATALOG).unwrap();
        SolarSystem::build(catalog, tiny_config(), &mut Rng::new(42))
    }

    fn frame(dt: f64, paused: bool) -> FrameContext {
        FrameContext {
            dt,
            clock: ClockSnapshot {
                time_scale: 10.0,
                paused,
            },
            elapsed: 0.0,
        }
    }

    #[test]
    fn builds_one_state_per_entity() {
        let sys = system();
        assert_eq!(sys.bodies().len(), 7);
        assert_eq!(sys.moons().len(), 3);
        assert_eq!(sys.star().entity, EntityId(1));
        assert_eq!(sys.star().position, Vec3::ZERO);
        assert_eq!(sys.moons()[0].entity, EntityId(8));
        // sun + 6 surfaces + 3 moons + 1 ring
        assert_eq!(sys.textures().len(), 11);
        assert_eq!(sys.belt().unwrap().len(), 64);
        assert!(sys.body_by_id("saturn").unwrap().ring.is_some());
        assert!(sys.body_by_id("earth").unwrap().ring.is_none());
    }

    #[test]
    fn guide_meshes_cover_orbits_rings_and_markers() {
        let sys = system();
        let res = sys.resources();
        // 6 planet orbits + 1 ring + 3 moon orbits + 2 markers
        assert_eq!(res.guides.mesh_count(), 12);
        assert_eq!(res.particles.len(), 64);
        assert!(sys.star().orbit_guide.is_none());
    }

    #[test]
    fn moon_follows_parent_rigidly() {
        let mut sys = system();
        let earth = sys.catalog.find_body("earth").unwrap().0;
        sys.bodies[earth].orbit_phase = 0.3;
        sys.compose();
        let moon_pos = |sys: &SolarSystem| sys.moon_by_id("earth", "moon").unwrap().position;
        let (p0, m0) = (sys.bodies[earth].position, moon_pos(&sys));
        sys.bodies[earth].orbit_phase = 2.1;
        sys.compose();
        let (p1, m1) = (sys.bodies[earth].position, moon_pos(&sys));
        assert!(((m1 - m0) - (p1 - p0)).length() < 1e-5);
        assert!(((m1 - p1).length() - 1.25).abs() < 1e-5);
    }

    #[test]
    fn moons_compose_from_the_current_frame() {
        let mut sys = system();
        sys.update(&frame(0.05, false));
        for moon in sys.moons() {
            let parent = sys.bodies()[moon.parent].position;
            let offset = moon.position - parent;
            assert!((offset.length() as f64 - moon.orbit_radius).abs() < 1e-4);
            assert_eq!(offset.y, 0.0);
        }
    }

    #[test]
    fn paused_frames_change_nothing() {
        let mut sys = system();
        let snapshot = |sys: &SolarSystem| -> Vec<_> {
            sys.bodies()
                .iter()
                .map(|b| (b.orbit_phase, b.spin_phase, b.position))
                .collect()
        };
        let before = snapshot(&sys);
        let moons: Vec<_> = sys.moons().iter().map(|m| m.position).collect();
        for dt in [0.016, 0.1, 0.05] {
            sys.update(&frame(dt, true));
        }
        let after = snapshot(&sys);
        assert_eq!(before, after);
        assert_eq!(moons, sys.moons().iter().map(|m| m.position).collect::<Vec<_>>());
        assert_eq!(sys.belt().unwrap().phase, 0.0);
    }

    #[test]
    fn mercury_laps_neptune() {
        let mut sys = system();
        let mercury = sys.catalog.find_body("mercury").unwrap().0;
        let neptune = sys.catalog.find_body("neptune").unwrap().0;
        let (m0, n0) = (sys.bodies[mercury].orbit_phase, sys.bodies[neptune].orbit_phase);
        sys.update(&frame(0.01, false));
        let dm = crate::core::integrator::wrap_angle(sys.bodies[mercury].orbit_phase - m0);
        let dn = crate::core::integrator::wrap_angle(sys.bodies[neptune].orbit_phase - n0);
        assert!(dm > dn * 100.0, "{} vs {}", dm, dn);
    }

    #[test]
    fn pick_selects_and_reports() {
        let mut sys = system();
        let earth = sys.body_by_id("earth").unwrap().position;
        sys.handle(&ControlEvent::Pick(Ray::new(earth + Vec3::Y * 50.0, Vec3::NEG_Y)));
        assert_eq!(sys.selection(), Selection::Body(BodyRef(3)));
        let events = sys.drain_events();
        assert_eq!(events.len(), 1);
        match &events[0] {
            SimEvent::SelectionChanged(SelectionRecord::Body { body }) => {
                assert_eq!(body.id, "earth")
            }
            other => panic!("unexpected event {:?}", other),
        }
        assert_eq!(sys.entity_of(sys.selection()), Some(EntityId(4)));
    }

    #[test]
    fn pick_miss_keeps_selection() {
        let mut sys = system();
        sys.handle(&ControlEvent::SelectBody("saturn".into()));
        sys.drain_events();
        sys.handle(&ControlEvent::Pick(Ray::new(Vec3::new(0.0, 500.0, 0.0), Vec3::Y)));
        assert_eq!(sys.selection(), Selection::Body(BodyRef(4)));
        assert!(sys.drain_events().is_empty());
    }

    #[test]
    fn selecting_a_moon_clears_the_body() {
        let mut sys = system();
        sys.handle(&ControlEvent::SelectBody("earth".into()));
        sys.handle(&ControlEvent::SelectMoon {
            moon: "titan".into(),
            parent: "saturn".into(),
        });
        assert_eq!(sys.selection(), Selection::Moon(MoonRef { body: 4, moon: 0 }));
        let events = sys.drain_events();
        assert_eq!(events.len(), 2);
        assert!(matches!(
            &events[1],
            SimEvent::SelectionChanged(SelectionRecord::Moon { moon, parent })
                if moon.id == "titan" && parent.id == "saturn"
        ));
    }

    #[test]
    fn reset_view_clears_and_signals() {
        let mut sys = system();
        sys.handle(&ControlEvent::SelectMoon {
            moon: "moon".into(),
            parent: "earth".into(),
        });
        sys.drain_events();
        sys.handle(&ControlEvent::ResetView);
        assert_eq!(sys.selection(), Selection::Idle);
        let events = sys.drain_events();
        assert_eq!(events[0], SimEvent::ViewReset);
        assert_eq!(events[1], SimEvent::SelectionChanged(SelectionRecord::Idle));
    }

    #[test]
    fn unknown_body_lands_on_idle() {
        let mut sys = system();
        sys.handle(&ControlEvent::SelectBody("earth".into()));
        sys.handle(&ControlEvent::SelectBody("vulcan".into()));
        assert_eq!(sys.selection(), Selection::Idle);
    }

    fn count(buf: &InstanceBuffer, kind: InstanceKind) -> usize {
        buf.instances().iter().filter(|i| i.kind == kind.as_f32()).count()
    }

    #[test]
    fn render_writes_every_entity() {
        let sys = system();
        let mut buf = InstanceBuffer::new();
        sys.render(&mut buf);
        assert_eq!(count(&buf, InstanceKind::Star), 1);
        assert_eq!(count(&buf, InstanceKind::Corona), 1);
        assert_eq!(count(&buf, InstanceKind::Planet), 5);
        assert_eq!(count(&buf, InstanceKind::DwarfPlanet), 1);
        assert_eq!(count(&buf, InstanceKind::Moon), 3);
        assert_eq!(count(&buf, InstanceKind::Ring), 1);
        assert_eq!(count(&buf, InstanceKind::OrbitGuide), 9);
        assert_eq!(count(&buf, InstanceKind::Belt), 1);
        assert_eq!(count(&buf, InstanceKind::Highlight), 0);
        let corona = buf
            .instances()
            .iter()
            .find(|i| i.kind == InstanceKind::Corona.as_f32())
            .unwrap();
        assert!((corona.scale - 6.0).abs() < 1e-5);
        assert_eq!(corona.alpha, 0.3);
    }

    #[test]
    fn hiding_orbits_drops_guides_only() {
        let mut sys = system();
        sys.handle(&ControlEvent::ShowOrbits(false));
        let mut buf = InstanceBuffer::new();
        sys.render(&mut buf);
        assert_eq!(count(&buf, InstanceKind::OrbitGuide), 0);
        assert_eq!(count(&buf, InstanceKind::Ring), 1);
    }

    #[test]
    fn highlight_tracks_selected_moon() {
        let mut sys = system();
        sys.handle(&ControlEvent::SelectMoon {
            moon: "moon".into(),
            parent: "earth".into(),
        });
        sys.update(&frame(0.05, false));
        let mut buf = InstanceBuffer::new();
        sys.render(&mut buf);
        let marker = buf
            .instances()
            .iter()
            .find(|i| i.kind == InstanceKind::Highlight.as_f32())
            .copied()
            .unwrap();
        let moon = sys.moon_by_id("earth", "moon").unwrap();
        assert_eq!(marker.entity, moon.entity.0 as f32);
        assert_eq!((marker.x, marker.z), (moon.position.x, moon.position.z));
        assert_eq!(marker.scale, moon.size);
        assert_eq!(marker.mesh as usize, sys.highlights.small.unwrap());
        let flagged: Vec<_> = buf.instances().iter().filter(|i| i.highlight == 1.0).collect();
        assert_eq!(flagged.len(), 1);
        assert_eq!(flagged[0].kind, InstanceKind::Moon.as_f32());
    }
}
