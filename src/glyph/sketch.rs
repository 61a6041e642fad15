use super::{Emoji, GlyphRenderer};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{
    draw_filled_ellipse_mut, draw_filled_rect_mut, draw_hollow_ellipse_mut, draw_polygon_mut,
};
use imageproc::point::Point as Vertex;
use imageproc::rect::Rect;
use std::f32::consts::PI;

const FACE: Rgba<u8> = Rgba([255, 204, 77, 255]);
const OUTLINE: Rgba<u8> = Rgba([214, 140, 28, 255]);
const DARK: Rgba<u8> = Rgba([102, 69, 0, 255]);
const BLACK: Rgba<u8> = Rgba([30, 30, 30, 255]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const PINK: Rgba<u8> = Rgba([255, 128, 150, 255]);
const RED: Rgba<u8> = Rgba([228, 38, 62, 255]);
const ORANGE: Rgba<u8> = Rgba([255, 140, 0, 255]);

// below this the features are a few pixels wide at most
const MIN_DETAIL_PX: u32 = 12;

/// Draws emoji out of plain shapes, so no font is needed.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sketch;

impl GlyphRenderer for Sketch {
    fn render(&self, emoji: Emoji, width: u32, height: u32) -> RgbaImage {
        let mut c = FaceCanvas::new(width, height);
        c.face();

        if width.min(height) < MIN_DETAIL_PX {
            return c.img;
        }

        match emoji {
            Emoji::SlightSmile => {
                c.smile();
                c.dot_eyes();
            }
            Emoji::Grin => {
                c.grin();
                c.dot_eyes();
            }
            Emoji::Blush => {
                c.smile();
                c.happy_eye(-0.33);
                c.happy_eye(0.33);
                c.cheeks();
            }
            Emoji::Wink => {
                c.smile();
                c.dot_eye(-0.33);
                c.happy_eye(0.33);
            }
            Emoji::HeartEyes => {
                c.grin();
                c.heart(-0.36, -0.28, 0.22);
                c.heart(0.36, -0.28, 0.22);
            }
            Emoji::Sunglasses => {
                c.smile();
                c.ellipse(-0.36, -0.28, 0.3, 0.2, BLACK);
                c.ellipse(0.36, -0.28, 0.3, 0.2, BLACK);
                c.rect(-0.72, -0.44, 0.72, -0.34, BLACK);
            }
            Emoji::Nerd => {
                c.smile();
                c.rect(-0.13, 0.5, 0.13, 0.72, WHITE);
                c.dot_eyes();
                c.ring(-0.34, -0.3, 0.25, 0.07, BLACK);
                c.ring(0.34, -0.3, 0.25, 0.07, BLACK);
                c.stroke((-0.1, -0.32), (0.1, -0.32), 0.07, BLACK);
            }
            Emoji::Monocle => {
                c.stroke((-0.25, 0.45), (0.25, 0.45), 0.08, DARK);
                c.dot_eyes();
                c.stroke((-0.52, -0.58), (-0.14, -0.66), 0.07, DARK);
                c.ring(0.33, -0.3, 0.23, 0.07, BLACK);
                c.stroke((0.56, -0.22), (0.72, 0.55), 0.03, DARK);
            }
            Emoji::StarStruck => {
                c.grin();
                c.star(-0.36, -0.3, 0.26);
                c.star(0.36, -0.3, 0.26);
            }
        }

        c.img
    }
}

/// Canvas addressed in face units: the face disc spans -1..1 on both
/// axes, x right and y down.
struct FaceCanvas {
    img: RgbaImage,
    cx: f32,
    cy: f32,
    rx: f32,
    ry: f32,
}

impl FaceCanvas {
    fn new(width: u32, height: u32) -> Self {
        let (w, h) = (width as f32, height as f32);
        Self {
            img: RgbaImage::new(width, height),
            cx: w / 2.,
            cy: h / 2.,
            // leave a margin like a font glyph would
            rx: w * 0.47,
            ry: h * 0.47,
        }
    }

    fn at(&self, fx: f32, fy: f32) -> (f32, f32) {
        (self.cx + fx * self.rx, self.cy + fy * self.ry)
    }

    fn px(&self, fx: f32, fy: f32) -> (i32, i32) {
        let (x, y) = self.at(fx, fy);
        (x.round() as i32, y.round() as i32)
    }

    fn unit(&self) -> f32 {
        self.rx.min(self.ry)
    }

    fn ellipse(&mut self, fx: f32, fy: f32, frx: f32, fry: f32, color: Rgba<u8>) {
        let center = self.px(fx, fy);
        let rx = (frx * self.rx).round().max(0.) as i32;
        let ry = (fry * self.ry).round().max(0.) as i32;
        draw_filled_ellipse_mut(&mut self.img, center, rx, ry, color);
    }

    fn rect(&mut self, fx0: f32, fy0: f32, fx1: f32, fy1: f32, color: Rgba<u8>) {
        let (x0, y0) = self.px(fx0, fy0);
        let (x1, y1) = self.px(fx1, fy1);
        if x1 > x0 && y1 > y0 {
            let r = Rect::at(x0, y0).of_size((x1 - x0) as u32, (y1 - y0) as u32);
            draw_filled_rect_mut(&mut self.img, r, color);
        }
    }

    fn ring(&mut self, fx: f32, fy: f32, radius: f32, thickness: f32, color: Rgba<u8>) {
        let center = self.px(fx, fy);
        let r0 = (radius * self.unit()).round() as i32;
        let t = (thickness * self.unit()).round().max(1.) as i32;
        for r in r0..r0 + t {
            draw_hollow_ellipse_mut(&mut self.img, center, r, r, color);
        }
    }

    fn polygon(&mut self, pts: &[(f32, f32)], color: Rgba<u8>) {
        let mut verts: Vec<Vertex<i32>> = Vec::with_capacity(pts.len());
        for (x, y) in pts {
            let v = Vertex::new(x.round() as i32, y.round() as i32);
            if verts.last() != Some(&v) {
                verts.push(v);
            }
        }
        // imageproc rejects closed or degenerate outlines
        while verts.len() > 1 && verts.first() == verts.last() {
            verts.pop();
        }
        if verts.len() >= 3 {
            draw_polygon_mut(&mut self.img, &verts, color);
        }
    }

    /// Thick line between two face-unit points.
    fn stroke(&mut self, from: (f32, f32), to: (f32, f32), width: f32, color: Rgba<u8>) {
        let (x0, y0) = self.at(from.0, from.1);
        let (x1, y1) = self.at(to.0, to.1);
        let (dx, dy) = (x1 - x0, y1 - y0);
        let len = (dx * dx + dy * dy).sqrt();
        if len < 1. {
            return;
        }

        let half = (width * self.unit() / 2.).max(0.75);
        let (nx, ny) = (-dy / len * half, dx / len * half);
        self.polygon(
            &[
                (x0 + nx, y0 + ny),
                (x1 + nx, y1 + ny),
                (x1 - nx, y1 - ny),
                (x0 - nx, y0 - ny),
            ],
            color,
        );
    }

    fn face(&mut self) {
        self.ellipse(0., 0., 1., 1., OUTLINE);
        self.ellipse(0., 0., 0.94, 0.94, FACE);
    }

    fn dot_eye(&mut self, fx: f32) {
        self.ellipse(fx, -0.3, 0.09, 0.15, DARK);
    }

    fn dot_eyes(&mut self) {
        self.dot_eye(-0.33);
        self.dot_eye(0.33);
    }

    /// Closed, smiling eye: an arch cut out of a dark ellipse.
    fn happy_eye(&mut self, fx: f32) {
        self.ellipse(fx, -0.28, 0.16, 0.14, DARK);
        self.ellipse(fx, -0.2, 0.18, 0.14, FACE);
    }

    fn cheeks(&mut self) {
        self.ellipse(-0.56, 0.14, 0.16, 0.09, PINK);
        self.ellipse(0.56, 0.14, 0.16, 0.09, PINK);
    }

    fn smile(&mut self) {
        self.ellipse(0., 0.18, 0.55, 0.5, DARK);
        self.ellipse(0., 0.05, 0.62, 0.5, FACE);
    }

    /// Open mouth with a row of teeth. Draw before the eyes, the cover
    /// rect reaches up to them.
    fn grin(&mut self) {
        self.ellipse(0., 0.25, 0.55, 0.42, DARK);
        self.rect(-0.6, -0.2, 0.6, 0.25, FACE);
        self.rect(-0.42, 0.25, 0.42, 0.38, WHITE);
    }

    fn heart(&mut self, fx: f32, fy: f32, size: f32) {
        self.ellipse(fx - 0.5 * size, fy - 0.2 * size, 0.52 * size, 0.52 * size, RED);
        self.ellipse(fx + 0.5 * size, fy - 0.2 * size, 0.52 * size, 0.52 * size, RED);
        let tri = [
            self.at(fx - 0.98 * size, fy),
            self.at(fx + 0.98 * size, fy),
            self.at(fx, fy + 1.05 * size),
        ];
        self.polygon(&tri, RED);
    }

    fn star(&mut self, fx: f32, fy: f32, size: f32) {
        let pts: Vec<(f32, f32)> = (0..10)
            .map(|k| {
                let theta = -PI / 2. + k as f32 * PI / 5.;
                let r = if k % 2 == 0 { size } else { size * 0.45 };
                self.at(fx + r * theta.cos(), fy + r * theta.sin())
            })
            .collect();
        self.polygon(&pts, ORANGE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_stays_transparent() {
        for emoji in Emoji::ALL {
            let img = Sketch.render(emoji, 100, 100);
            assert_eq!(img.dimensions(), (100, 100));
            // corners lie outside the face disc
            for (x, y) in [(0, 0), (99, 0), (0, 99), (99, 99)] {
                assert_eq!(img.get_pixel(x, y)[3], 0, "{emoji:?} at ({x}, {y})");
            }
            // center of the face is painted
            assert_eq!(img.get_pixel(50, 50)[3], 255, "{emoji:?}");
        }
    }

    #[test]
    fn test_emoji_differ() {
        let a = Sketch.render(Emoji::SlightSmile, 64, 64);
        let b = Sketch.render(Emoji::Sunglasses, 64, 64);
        assert_ne!(a, b);
    }

    #[test]
    fn test_tiny_and_skewed_sizes() {
        for emoji in Emoji::ALL {
            for (w, h) in [(1, 1), (2, 9), (11, 11), (12, 40), (200, 13)] {
                assert_eq!(Sketch.render(emoji, w, h).dimensions(), (w, h));
            }
        }
    }
}
