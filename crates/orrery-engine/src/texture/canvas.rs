//! A tiny RGBA8 raster with source-over blending. Enough to paint the
//! procedural surfaces: flat fills, rectangles, discs and gradients.

use glam::Vec2;

use crate::catalog::Rgb8;

/// Paint color: channels 0-255, alpha 0-1 (straight, not premultiplied).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::new(255.0, 255.0, 255.0, 1.0);

    pub fn opaque(color: Rgb8) -> Self {
        Self::new(color.r as f32, color.g as f32, color.b as f32, 1.0)
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }
}

/// Gradient stop at `offset` in [0, 1]. Stops must be sorted by offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Rgba,
}

impl ColorStop {
    pub const fn new(offset: f32, color: Rgba) -> Self {
        Self { offset, color }
    }
}

fn sample_stops(stops: &[ColorStop], t: f32) -> Rgba {
    let t = t.clamp(0.0, 1.0);
    let Some(first) = stops.first() else {
        return Rgba::new(0.0, 0.0, 0.0, 0.0);
    };
    if t <= first.offset {
        return first.color;
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.offset {
            let span = b.offset - a.offset;
            let local = if span > 0.0 { (t - a.offset) / span } else { 1.0 };
            return a.color.lerp(b.color, local);
        }
    }
    stops[stops.len() - 1].color
}

/// Row-major RGBA8 pixel buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Pixmap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Pixmap {
    /// Fully transparent pixmap.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    pub fn filled(width: u32, height: u32, color: Rgba) -> Self {
        let mut pixmap = Self::new(width, height);
        pixmap.fill(color);
        pixmap
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]])
    }

    /// Source-over blend of `color` onto one pixel.
    pub fn blend(&mut self, x: u32, y: u32, color: Rgba) {
        if x >= self.width || y >= self.height {
            return;
        }
        let sa = color.a.clamp(0.0, 1.0);
        if sa <= 0.0 {
            return;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let da = self.data[i + 3] as f32 / 255.0;
        let out_a = sa + da * (1.0 - sa);
        let channel = |src: f32, dst: u8| {
            let c = (src.clamp(0.0, 255.0) * sa + dst as f32 * da * (1.0 - sa)) / out_a;
            c.round().clamp(0.0, 255.0) as u8
        };
        self.data[i] = channel(color.r, self.data[i]);
        self.data[i + 1] = channel(color.g, self.data[i + 1]);
        self.data[i + 2] = channel(color.b, self.data[i + 2]);
        self.data[i + 3] = (out_a * 255.0).round() as u8;
    }

    pub fn fill(&mut self, color: Rgba) {
        self.fill_rect(0.0, 0.0, self.width as f32, self.height as f32, color);
    }

    /// Blend over every pixel whose center lies inside the rectangle.
    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba) {
        let x0 = x.max(0.0).round() as u32;
        let y0 = y.max(0.0).round() as u32;
        let x1 = ((x + w).round().max(0.0) as u32).min(self.width);
        let y1 = ((y + h).round().max(0.0) as u32).min(self.height);
        for py in y0..y1 {
            for px in x0..x1 {
                self.blend(px, py, color);
            }
        }
    }

    /// Blend over every pixel whose center lies inside the disc.
    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        if radius <= 0.0 {
            return;
        }
        let r2 = radius * radius;
        let x0 = (center.x - radius).floor().max(0.0) as u32;
        let y0 = (center.y - radius).floor().max(0.0) as u32;
        let x1 = ((center.x + radius).ceil().max(0.0) as u32).min(self.width);
        let y1 = ((center.y + radius).ceil().max(0.0) as u32).min(self.height);
        for py in y0..y1 {
            for px in x0..x1 {
                let d = Vec2::new(px as f32 + 0.5, py as f32 + 0.5) - center;
                if d.length_squared() <= r2 {
                    self.blend(px, py, color);
                }
            }
        }
    }

    /// Blend a linear gradient running from `start` to `end` over the whole pixmap.
    pub fn fill_linear_gradient(&mut self, start: Vec2, end: Vec2, stops: &[ColorStop]) {
        let axis = end - start;
        let len2 = axis.length_squared();
        for py in 0..self.height {
            for px in 0..self.width {
                let p = Vec2::new(px as f32 + 0.5, py as f32 + 0.5);
                let t = if len2 > 0.0 { (p - start).dot(axis) / len2 } else { 0.0 };
                self.blend(px, py, sample_stops(stops, t));
            }
        }
    }

    /// Blend a radial gradient centered at `center` reaching `radius`.
    pub fn fill_radial_gradient(&mut self, center: Vec2, radius: f32, stops: &[ColorStop]) {
        for py in 0..self.height {
            for px in 0..self.width {
                let p = Vec2::new(px as f32 + 0.5, py as f32 + 0.5);
                let t = if radius > 0.0 { p.distance(center) / radius } else { 1.0 };
                self.blend(px, py, sample_stops(stops, t));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opaque_fill_replaces_pixels() {
        let pix = Pixmap::filled(4, 4, Rgba::opaque(Rgb8::new(10, 20, 30)));
        assert_eq!(pix.pixel(3, 3), Some([10, 20, 30, 255]));
        assert_eq!(pix.pixel(4, 0), None);
        assert_eq!(pix.data().len(), 64);
    }

    #[test]
    fn half_black_over_white_is_mid_grey() {
        let mut pix = Pixmap::filled(2, 2, Rgba::WHITE);
        pix.blend(0, 0, Rgba::BLACK.with_alpha(0.5));
        let [r, g, b, a] = pix.pixel(0, 0).unwrap();
        assert!((127..=128).contains(&r));
        assert_eq!(r, g);
        assert_eq!(g, b);
        assert_eq!(a, 255);
        assert_eq!(pix.pixel(1, 1), Some([255, 255, 255, 255]));
    }

    #[test]
    fn circle_stays_inside_its_bounds() {
        let mut pix = Pixmap::filled(16, 16, Rgba::WHITE);
        pix.fill_circle(Vec2::new(8.0, 8.0), 3.0, Rgba::BLACK);
        assert_eq!(pix.pixel(8, 8), Some([0, 0, 0, 255]));
        assert_eq!(pix.pixel(0, 0), Some([255, 255, 255, 255]));
        assert_eq!(pix.pixel(8, 13), Some([255, 255, 255, 255]));
        // Partially off-canvas discs clip rather than panic.
        pix.fill_circle(Vec2::new(-1.0, 15.5), 4.0, Rgba::BLACK);
        assert_eq!(pix.pixel(0, 15), Some([0, 0, 0, 255]));
    }

    #[test]
    fn radial_gradient_runs_center_to_edge() {
        let stops = [
            ColorStop::new(0.0, Rgba::WHITE),
            ColorStop::new(1.0, Rgba::BLACK),
        ];
        let mut pix = Pixmap::new(64, 64);
        pix.fill_radial_gradient(Vec2::new(32.0, 32.0), 32.0, &stops);
        let center = pix.pixel(32, 32).unwrap()[0];
        let edge = pix.pixel(0, 32).unwrap()[0];
        let corner = pix.pixel(0, 0).unwrap()[0];
        assert!(center > 240);
        assert!(edge < 16);
        assert_eq!(corner, 0);
    }

    #[test]
    fn stop_sampling_interpolates() {
        let stops = [
            ColorStop::new(0.0, Rgba::new(0.0, 0.0, 0.0, 1.0)),
            ColorStop::new(0.5, Rgba::new(100.0, 0.0, 0.0, 1.0)),
            ColorStop::new(1.0, Rgba::new(200.0, 0.0, 0.0, 1.0)),
        ];
        assert_eq!(sample_stops(&stops, 0.25).r, 50.0);
        assert_eq!(sample_stops(&stops, 0.75).r, 150.0);
        assert_eq!(sample_stops(&stops, 2.0).r, 200.0);
        assert_eq!(sample_stops(&[], 0.5).a, 0.0);
    }
}
