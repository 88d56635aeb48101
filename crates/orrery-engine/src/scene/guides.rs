//! Flat annulus meshes: orbit guides, planetary rings and selection
//! markers. Tessellated once at scene construction with lyon.
//!
//! Every mesh lies in its local XY plane centered on the origin; render
//! instances place, tilt and scale it.

#[cfg(feature = "guides")]
use lyon::math::point;
#[cfg(feature = "guides")]
use lyon::path::{Path, Winding};
#[cfg(feature = "guides")]
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillRule, FillTessellator, FillVertex, FillVertexConstructor,
    VertexBuffers,
};

/// Triangle-list vertices for every mesh, plus one (first vertex, vertex
/// count) range per mesh.
#[derive(Debug, Clone, Default)]
pub struct GuideBuffer {
    vertices: Vec<f32>,
    ranges: Vec<u32>,
}

impl GuideBuffer {
    /// Floats per vertex: x, y.
    pub const FLOATS: usize = 2;

    pub fn mesh_count(&self) -> usize {
        self.ranges.len() / 2
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / Self::FLOATS
    }

    /// (first vertex, vertex count) of mesh `index`.
    pub fn range(&self, index: usize) -> Option<(u32, u32)> {
        let start = *self.ranges.get(index * 2)?;
        let count = *self.ranges.get(index * 2 + 1)?;
        Some((start, count))
    }

    /// Vertices of mesh `index` as (x, y) pairs.
    pub fn mesh(&self, index: usize) -> Option<&[f32]> {
        let (start, count) = self.range(index)?;
        let a = start as usize * Self::FLOATS;
        let b = a + count as usize * Self::FLOATS;
        self.vertices.get(a..b)
    }

    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    pub fn ranges(&self) -> &[u32] {
        &self.ranges
    }

    pub fn vertices_ptr(&self) -> *const f32 {
        self.vertices.as_ptr()
    }

    pub fn ranges_ptr(&self) -> *const u32 {
        self.ranges.as_ptr()
    }

    fn push_mesh(&mut self, triangles: impl Iterator<Item = [f32; 2]>) -> usize {
        let start = self.vertex_count() as u32;
        for [x, y] in triangles {
            self.vertices.extend_from_slice(&[x, y]);
        }
        let count = self.vertex_count() as u32 - start;
        self.ranges.extend_from_slice(&[start, count]);
        self.mesh_count() - 1
    }
}

#[cfg(feature = "guides")]
struct GuideVertexCtor;

#[cfg(feature = "guides")]
impl FillVertexConstructor<[f32; 2]> for GuideVertexCtor {
    fn new_vertex(&mut self, vertex: FillVertex) -> [f32; 2] {
        let p = vertex.position();
        [p.x, p.y]
    }
}

/// Tessellates annuli into a `GuideBuffer`.
pub struct GuideBuilder {
    #[cfg(feature = "guides")]
    tess: FillTessellator,
    #[cfg(feature = "guides")]
    geometry: VertexBuffers<[f32; 2], u32>,
    tolerance: f32,
    buffer: GuideBuffer,
}

impl GuideBuilder {
    pub fn new(tolerance: f32) -> Self {
        Self {
            #[cfg(feature = "guides")]
            tess: FillTessellator::new(),
            #[cfg(feature = "guides")]
            geometry: VertexBuffers::new(),
            tolerance: if tolerance > 0.0 { tolerance } else { 0.01 },
            buffer: GuideBuffer::default(),
        }
    }

    /// Add a ring band between `inner` and `outer`. Returns its mesh index,
    /// or `None` when the band is empty or tessellation fails.
    #[cfg(feature = "guides")]
    pub fn annulus(&mut self, inner: f32, outer: f32) -> Option<usize> {
        let inner = inner.max(0.0);
        if !(outer > inner) {
            return None;
        }
        let mut builder = Path::builder();
        builder.add_circle(point(0.0, 0.0), outer, Winding::Positive);
        if inner > 0.0 {
            builder.add_circle(point(0.0, 0.0), inner, Winding::Negative);
        }
        let path: Path = builder.build();

        // Scale tolerance with size so large orbits don't explode in vertices.
        let tolerance = self.tolerance * outer.max(1.0).sqrt();
        let options = FillOptions::tolerance(tolerance).with_fill_rule(FillRule::EvenOdd);
        let result = self.tess.tessellate_path(
            &path,
            &options,
            &mut BuffersBuilder::new(&mut self.geometry, GuideVertexCtor),
        );

        let mesh = match result {
            Ok(()) => {
                let geometry = &self.geometry;
                Some(
                    self.buffer
                        .push_mesh(geometry.indices.iter().map(|i| geometry.vertices[*i as usize])),
                )
            }
            Err(e) => {
                log::warn!("guides: annulus [{}, {}] failed: {:?}", inner, outer, e);
                None
            }
        };
        self.geometry.vertices.clear();
        self.geometry.indices.clear();
        mesh
    }

    /// Without tessellation support no meshes are produced.
    #[cfg(not(feature = "guides"))]
    pub fn annulus(&mut self, _inner: f32, _outer: f32) -> Option<usize> {
        let _ = self.tolerance;
        None
    }

    pub fn finish(self) -> GuideBuffer {
        self.buffer
    }
}
