use bytemuck::{Pod, Zeroable};

/// What a `SceneInstance` draws. Stored as its discriminant in `kind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum InstanceKind {
    Star = 0,
    Planet = 1,
    DwarfPlanet = 2,
    Moon = 3,
    /// Textured annulus around a ringed body.
    Ring = 4,
    /// Translucent shell around the star.
    Corona = 5,
    /// The asteroid field. Particles live in their own buffer.
    Belt = 6,
    OrbitGuide = 7,
    /// Selection marker.
    Highlight = 8,
}

impl InstanceKind {
    pub fn as_f32(self) -> f32 {
        self as u8 as f32
    }
}

/// Per-instance render data handed to the JS renderer.
/// 12 floats = 48 bytes per instance.
///
/// Meshes (`mesh >= 0`) lie in their local XY plane; the renderer rotates
/// them by `tilt` about X, scales by `scale` and translates to (x, y, z).
/// Spheres rotate by `spin` about their local Y axis.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct SceneInstance {
    pub kind: f32,
    /// `EntityId` of the body or moon this instance belongs to, 0 for none.
    pub entity: f32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Rotation about X, radians.
    pub tilt: f32,
    /// Rotation about the local Y axis, radians.
    pub spin: f32,
    /// Sphere radius or mesh scale.
    pub scale: f32,
    /// Texture slot, -1 for untextured.
    pub texture: f32,
    /// Guide mesh index, -1 for spheres.
    pub mesh: f32,
    /// 1.0 when the owning entity is selected.
    pub highlight: f32,
    pub alpha: f32,
}

impl SceneInstance {
    pub const FLOATS: usize = 12;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn new(kind: InstanceKind) -> Self {
        Self {
            kind: kind.as_f32(),
            texture: -1.0,
            mesh: -1.0,
            scale: 1.0,
            alpha: 1.0,
            ..Self::default()
        }
    }

    pub fn with_entity(mut self, entity: u32) -> Self {
        self.entity = entity as f32;
        self
    }

    pub fn with_pos(mut self, pos: glam::Vec3) -> Self {
        self.x = pos.x;
        self.y = pos.y;
        self.z = pos.z;
        self
    }

    pub fn with_tilt(mut self, tilt: f32) -> Self {
        self.tilt = tilt;
        self
    }

    pub fn with_spin(mut self, spin: f32) -> Self {
        self.spin = spin;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_texture(mut self, slot: u32) -> Self {
        self.texture = slot as f32;
        self
    }

    pub fn with_mesh(mut self, mesh: usize) -> Self {
        self.mesh = mesh as f32;
        self
    }

    pub fn with_highlight(mut self, on: bool) -> Self {
        self.highlight = if on { 1.0 } else { 0.0 };
        self
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }
}

/// Fixed-capacity buffer of scene instances, rebuilt every frame.
pub struct InstanceBuffer {
    instances: Vec<SceneInstance>,
    max: usize,
    dropped: usize,
}

impl InstanceBuffer {
    pub fn new() -> Self {
        Self::with_capacity(1024)
    }

    pub fn with_capacity(max: usize) -> Self {
        Self {
            instances: Vec::with_capacity(max),
            max,
            dropped: 0,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.dropped = 0;
    }

    /// Pushes past capacity are counted and discarded.
    pub fn push(&mut self, instance: SceneInstance) {
        if self.instances.len() < self.max {
            self.instances.push(instance);
        } else {
            self.dropped += 1;
        }
    }

    pub fn instances(&self) -> &[SceneInstance] {
        &self.instances
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    pub fn capacity(&self) -> usize {
        self.max
    }

    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for InstanceBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_instance_is_48_bytes() {
        assert_eq!(std::mem::size_of::<SceneInstance>(), 48);
        assert_eq!(SceneInstance::STRIDE_BYTES, 48);
    }

    #[test]
    fn new_instance_has_no_resources() {
        let inst = SceneInstance::new(InstanceKind::Moon);
        assert_eq!(inst.kind, 3.0);
        assert_eq!(inst.texture, -1.0);
        assert_eq!(inst.mesh, -1.0);
        assert_eq!(inst.alpha, 1.0);
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&inst));
        assert_eq!(floats.len(), SceneInstance::FLOATS);
        assert_eq!(floats[0], 3.0);
    }

    #[test]
    fn buffer_stops_at_capacity() {
        let mut buf = InstanceBuffer::with_capacity(2);
        for _ in 0..5 {
            buf.push(SceneInstance::new(InstanceKind::Planet));
        }
        assert_eq!(buf.instance_count(), 2);
        assert_eq!(buf.dropped(), 3);
        buf.clear();
        assert_eq!(buf.instance_count(), 0);
        assert_eq!(buf.dropped(), 0);
    }
}
