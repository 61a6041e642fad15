use super::Executable;
use crate::shapes::rect::Rect;
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_hollow_rect_mut};

/// Hollow rectangle stroked inward from its edges.
#[derive(Debug, Clone)]
pub struct Outline {
    rect: Rect,
    thickness: u32,
    color: Rgba<u8>,
}

impl Outline {
    pub fn new(rect: Rect, thickness: u32, color: Rgba<u8>) -> Self {
        Self {
            rect,
            thickness: thickness.max(1),
            color,
        }
    }
}

impl Executable for Outline {
    fn execute(&self, img: &mut RgbaImage) {
        for i in 0..self.thickness {
            let w = self.rect.w.saturating_sub(2 * i);
            let h = self.rect.h.saturating_sub(2 * i);
            if w == 0 || h == 0 {
                break;
            }

            let inner = Rect {
                x: self.rect.x + i as i32,
                y: self.rect.y + i as i32,
                w,
                h,
            };
            draw_hollow_rect_mut(img, inner.into(), self.color);
        }
    }
}

#[derive(Debug, Clone)]
pub struct Marker {
    center: (i32, i32),
    radius: i32,
    color: Rgba<u8>,
}

impl Marker {
    pub fn new(center: (i32, i32), radius: i32, color: Rgba<u8>) -> Self {
        Self {
            center,
            radius,
            color,
        }
    }
}

impl Executable for Marker {
    fn execute(&self, img: &mut RgbaImage) {
        draw_filled_circle_mut(img, self.center, self.radius, self.color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outline_thickness() {
        let red = Rgba([255, 0, 0, 255]);
        let mut img = RgbaImage::new(20, 20);
        Outline::new(Rect { x: 2, y: 2, w: 10, h: 10 }, 2, red).execute(&mut img);

        assert_eq!(img.get_pixel(2, 2), &red);
        assert_eq!(img.get_pixel(3, 3), &red);
        assert_eq!(img.get_pixel(11, 6), &red);
        assert_eq!(img.get_pixel(4, 4)[3], 0);
        assert_eq!(img.get_pixel(1, 1)[3], 0);
    }
}
