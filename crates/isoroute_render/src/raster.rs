//! Image-backed canvas implementation
//!
//! Faces of a solid are painted farthest-first by their mean vertex depth,
//! each shaded by the angle its normal makes with a fixed light direction,
//! then scanline-filled and outlined. The outline uses the fill color, which
//! closes the hairline gaps between adjacent faces.

use image::{Rgba, RgbaImage};
use log::trace;

use isoroute_core::Canvas;
use isoroute_math::{iso, Color, Path, Point3, Solid};

/// Shading strength between faces at different angles to the light
const COLOR_DIFFERENCE: f64 = 0.35;

/// Light direction the faces are shaded against
const LIGHT_POSITION: [f64; 3] = [2.0, -1.0, 3.0];

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// A software-rasterized drawing surface
pub struct RasterCanvas {
    img: RgbaImage,
    origin_x: f64,
    origin_y: f64,
    scale: f64,
    light: [f64; 3],
}

impl RasterCanvas {
    /// Create a canvas with the projection origin centered near the bottom
    /// of the image
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            img: RgbaImage::from_pixel(width, height, BACKGROUND),
            origin_x: f64::from(width) / 2.0,
            origin_y: f64::from(height) * 0.9,
            scale: 40.0,
            light: normalized(LIGHT_POSITION),
        }
    }

    /// Set the pixel size of one world unit
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Set the screen position of the world origin
    pub fn with_origin(mut self, x: f64, y: f64) -> Self {
        self.origin_x = x;
        self.origin_y = y;
        self
    }

    /// The backing image
    pub fn image(&self) -> &RgbaImage {
        &self.img
    }

    /// Write the image as PNG
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> image::ImageResult<()> {
        self.img.save(path)
    }

    fn to_screen(&self, p: Point3) -> (f64, f64) {
        let iso = iso::project(p);
        (
            self.origin_x + iso.h * self.scale,
            self.origin_y - iso.v * self.scale,
        )
    }

    fn put_pixel(&mut self, x: i64, y: i64, color: Rgba<u8>) {
        if x >= 0 && y >= 0 && (x as u32) < self.img.width() && (y as u32) < self.img.height() {
            self.img.put_pixel(x as u32, y as u32, color);
        }
    }

    fn fill_polygon(&mut self, points: &[(f64, f64)], color: Rgba<u8>) {
        let ymin = points.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
        let ymax = points.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
        if !ymin.is_finite() || !ymax.is_finite() {
            return;
        }

        let row_lo = ymin.floor().max(0.0) as i64;
        let row_hi = ymax.ceil().min(f64::from(self.img.height())) as i64;
        let mut crossings: Vec<f64> = Vec::new();

        for row in row_lo..row_hi {
            let scan_y = row as f64 + 0.5;
            crossings.clear();
            for i in 0..points.len() {
                let a = points[i];
                let b = points[(i + 1) % points.len()];
                if (a.1 <= scan_y) != (b.1 <= scan_y) {
                    crossings.push(a.0 + (scan_y - a.1) * (b.0 - a.0) / (b.1 - a.1));
                }
            }
            crossings.sort_by(|p, q| p.partial_cmp(q).expect("finite crossings"));
            for pair in crossings.chunks_exact(2) {
                let x0 = pair[0].round() as i64;
                let x1 = pair[1].round() as i64;
                for x in x0..=x1 {
                    self.put_pixel(x, row, color);
                }
            }
        }
    }

    fn stroke_polygon(&mut self, points: &[(f64, f64)], color: Rgba<u8>) {
        for i in 0..points.len() {
            let a = points[i];
            let b = points[(i + 1) % points.len()];
            self.line(a, b, color);
        }
    }

    fn line(&mut self, a: (f64, f64), b: (f64, f64), color: Rgba<u8>) {
        let (mut x0, mut y0) = (a.0.round() as i64, a.1.round() as i64);
        let (x1, y1) = (b.0.round() as i64, b.1.round() as i64);
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.put_pixel(x0, y0, color);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    fn shade(&self, face: &Path, color: Color) -> Color {
        if face.len() < 3 {
            return color;
        }
        let p0 = face.points[0];
        let p1 = face.points[1];
        let p2 = face.points[2];
        let v1 = [p0.x - p1.x, p0.y - p1.y, p0.z - p1.z];
        let v2 = [p1.x - p2.x, p1.y - p2.y, p1.z - p2.z];
        let normal = [
            v1[1] * v2[2] - v1[2] * v2[1],
            v1[2] * v2[0] - v1[0] * v2[2],
            v1[0] * v2[1] - v1[1] * v2[0],
        ];
        let len = (normal[0] * normal[0] + normal[1] * normal[1] + normal[2] * normal[2]).sqrt();
        if len == 0.0 {
            return color;
        }
        let brightness = (normal[0] * self.light[0]
            + normal[1] * self.light[1]
            + normal[2] * self.light[2])
            / len;
        color.lighten(brightness * COLOR_DIFFERENCE, Color::WHITE)
    }
}

fn normalized(v: [f64; 3]) -> [f64; 3] {
    let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    [v[0] / len, v[1] / len, v[2] / len]
}

/// Mean vertex depth of a face; higher is farther from the viewer
fn face_depth(face: &Path) -> f64 {
    if face.is_empty() {
        return 0.0;
    }
    let total: f64 = face.points.iter().map(|p| p.x + p.y - 2.0 * p.z).sum();
    total / face.len() as f64
}

impl Canvas for RasterCanvas {
    fn add(&mut self, solid: &Solid, color: Color) {
        let mut faces: Vec<&Path> = solid.faces().iter().collect();
        faces.sort_by(|a, b| {
            face_depth(b)
                .partial_cmp(&face_depth(a))
                .expect("face depths are finite")
        });
        trace!("painting {} faces in {}", faces.len(), color);

        for face in faces {
            let shaded = self.shade(face, color);
            let px = Rgba([shaded.r, shaded.g, shaded.b, 255]);
            let screen: Vec<(f64, f64)> =
                face.points.iter().map(|&p| self.to_screen(p)).collect();
            self.fill_polygon(&screen, px);
            self.stroke_polygon(&screen, px);
        }
    }

    fn clear(&mut self, x: u32, y: u32, width: u32, height: u32) {
        let x1 = (x + width).min(self.img.width());
        let y1 = (y + height).min(self.img.height());
        for py in y..y1 {
            for px in x..x1 {
                self.img.put_pixel(px, py, BACKGROUND);
            }
        }
    }

    fn dimensions(&self) -> (u32, u32) {
        (self.img.width(), self.img.height())
    }
}
