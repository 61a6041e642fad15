use super::Executable;
use crate::shapes::rect::Rect;
use image::imageops::{FilterType, resize};
use image::{Rgba, RgbaImage};

/// Alpha-composites a glyph over a footprint of the photo. The glyph is
/// stretched to the footprint when their sizes differ; the parts of the
/// footprint outside the photo are dropped.
#[derive(Debug, Clone)]
pub struct Overlay {
    glyph: RgbaImage,
    footprint: Rect,
}

impl Overlay {
    pub fn new(glyph: RgbaImage, footprint: Rect) -> Self {
        Self { glyph, footprint }
    }
}

impl Executable for Overlay {
    fn execute(&self, img: &mut RgbaImage) {
        let Rect { x, y, w, h } = self.footprint;
        if w == 0 || h == 0 {
            return;
        }

        let fitted;
        let glyph = if self.glyph.dimensions() == (w, h) {
            &self.glyph
        } else {
            fitted = resize(&self.glyph, w, h, FilterType::Triangle);
            &fitted
        };

        for (gx, gy, src) in glyph.enumerate_pixels() {
            // fully transparent pixels never touch the photo
            if src[3] == 0 {
                continue;
            }

            let (px, py) = (x + gx as i32, y + gy as i32);
            if px < 0 || py < 0 || px >= img.width() as i32 || py >= img.height() as i32 {
                continue;
            }

            let dst = img.get_pixel_mut(px as u32, py as u32);
            *dst = source_over(*dst, *src);
        }
    }
}

/// Porter-Duff source-over. An opaque destination stays opaque.
fn source_over(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    let sa = src[3] as f32 / 255.;
    let da = dst[3] as f32 / 255.;
    let out_a = sa + da * (1. - sa);
    if out_a <= 0. {
        return Rgba([0, 0, 0, 0]);
    }

    let channel = |i: usize| {
        let c = (src[i] as f32 * sa + dst[i] as f32 * da * (1. - sa)) / out_a;
        c.round().clamp(0., 255.) as u8
    };
    let alpha = if dst[3] == 255 {
        255
    } else {
        (out_a * 255.).round().clamp(0., 255.) as u8
    };

    Rgba([channel(0), channel(1), channel(2), alpha])
}

#[cfg(test)]
mod tests {
    use super::*;

    const GREY: Rgba<u8> = Rgba([90, 90, 90, 255]);
    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

    #[test]
    fn test_transparent_pixels_leave_photo_alone() {
        let mut img = RgbaImage::from_pixel(10, 10, GREY);
        let mut glyph = RgbaImage::new(4, 4);
        glyph.put_pixel(1, 1, RED);

        Overlay::new(glyph, Rect { x: 2, y: 3, w: 4, h: 4 }).execute(&mut img);

        for (x, y, p) in img.enumerate_pixels() {
            if (x, y) == (3, 4) {
                assert_eq!(p, &RED);
            } else {
                assert_eq!(p, &GREY, "({x}, {y})");
            }
        }
    }

    #[test]
    fn test_half_alpha_blends() {
        let mut img = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255]));
        let glyph = RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 128]));
        Overlay::new(glyph, Rect { x: 0, y: 0, w: 2, h: 2 }).execute(&mut img);

        let p = img.get_pixel(0, 0);
        assert!(p[0] > 100 && p[0] < 160, "{p:?}");
        assert_eq!(p[3], 255);
    }

    #[test]
    fn test_opaque_photo_stays_opaque() {
        let mut img = RgbaImage::from_pixel(16, 16, GREY);
        let glyph = RgbaImage::from_fn(16, 16, |x, y| Rgba([255, 0, 0, ((x * 16 + y) % 256) as u8]));
        Overlay::new(glyph, Rect { x: 0, y: 0, w: 16, h: 16 }).execute(&mut img);

        assert!(img.pixels().all(|p| p[3] == 255));
    }

    #[test]
    fn test_source_over_onto_transparent() {
        let out = source_over(Rgba([0, 0, 0, 0]), Rgba([200, 100, 50, 128]));
        assert_eq!(out, Rgba([200, 100, 50, 128]));

        let out = source_over(Rgba([0, 0, 255, 128]), Rgba([255, 0, 0, 128]));
        // 0.502 + 0.502 * 0.498 = 0.752
        assert_eq!(out[3], 192);
        assert!(out[0] > out[2], "{out:?}");
    }

    #[test]
    fn test_footprint_off_the_edge() {
        let mut img = RgbaImage::from_pixel(6, 6, GREY);
        let glyph = RgbaImage::from_pixel(4, 4, RED);
        Overlay::new(glyph, Rect { x: -2, y: 4, w: 4, h: 4 }).execute(&mut img);

        assert_eq!(img.get_pixel(0, 5), &RED);
        assert_eq!(img.get_pixel(1, 4), &RED);
        assert_eq!(img.get_pixel(2, 4), &GREY);
        assert_eq!(img.get_pixel(0, 3), &GREY);
    }

    #[test]
    fn test_glyph_stretched_to_footprint() {
        let mut img = RgbaImage::from_pixel(20, 20, GREY);
        let glyph = RgbaImage::from_pixel(3, 3, RED);
        Overlay::new(glyph, Rect { x: 5, y: 5, w: 10, h: 8 }).execute(&mut img);

        for (x, y, p) in img.enumerate_pixels() {
            let inside = (5..15).contains(&x) && (5..13).contains(&y);
            assert_eq!(p == &RED, inside, "({x}, {y})");
        }
    }
}
