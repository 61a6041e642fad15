use super::point::Point;
use serde::{Deserialize, Serialize};

/// Pixel rect, top-left anchored. May hang off the image edges.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

/// Float rect, top-left anchored. Used both for normalized detection
/// boxes and for pixel-space geometry before rounding.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RectF32 {
    pub x: f32,
    pub y: f32,
    #[serde(alias = "w", deserialize_with = "non_negative")]
    pub width: f32,
    #[serde(alias = "h", deserialize_with = "non_negative")]
    pub height: f32,
}

fn non_negative<'de, D>(d: D) -> Result<f32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let v = f32::deserialize(d)?;
    Ok(v.max(0.))
}

impl From<RectF32> for Rect {
    fn from(r: RectF32) -> Rect {
        Rect {
            x: r.x.round() as i32,
            y: r.y.round() as i32,
            w: r.width.round().max(0.) as u32,
            h: r.height.round().max(0.) as u32,
        }
    }
}

impl From<Rect> for imageproc::rect::Rect {
    fn from(r: Rect) -> imageproc::rect::Rect {
        imageproc::rect::Rect::at(r.x, r.y).of_size(r.w.max(1), r.h.max(1))
    }
}

impl Rect {
    pub fn left(&self) -> i32 {
        self.x
    }
    pub fn right(&self) -> i32 {
        self.x + self.w as i32
    }
    pub fn top(&self) -> i32 {
        self.y
    }
    pub fn bottom(&self) -> i32 {
        self.y + self.h as i32
    }
    pub fn area(&self) -> u32 {
        self.w * self.h
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left() && x < self.right() && y >= self.top() && y < self.bottom()
    }
}

impl RectF32 {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> RectF32 {
        RectF32 {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2., self.y + self.height / 2.)
    }

    /// Same size, moved so its center sits on `p`.
    pub fn centered_on(&self, p: Point) -> RectF32 {
        RectF32::new(
            p.x - self.width / 2.,
            p.y - self.height / 2.,
            self.width,
            self.height,
        )
    }

    /// Shrinks by `dx` on the left and right and `dy` on the top and
    /// bottom. Negative values grow the rect.
    pub fn inset(&self, dx: f32, dy: f32) -> RectF32 {
        RectF32::new(
            self.x + dx,
            self.y + dy,
            (self.width - 2. * dx).max(0.),
            (self.height - 2. * dy).max(0.),
        )
    }

    pub fn scale(&self, scale_x: f32, scale_y: f32) -> RectF32 {
        RectF32::new(
            self.x * scale_x,
            self.y * scale_y,
            self.width * scale_x,
            self.height * scale_y,
        )
    }
}

/// Size of the axis-aligned box that holds a `w`x`h` rect rotated by
/// `degrees`, floored to whole pixels.
pub fn rotated_bounds(w: u32, h: u32, degrees: f32) -> (u32, u32) {
    let theta = degrees.to_radians();
    let (sin, cos) = (theta.sin().abs(), theta.cos().abs());
    let (w, h) = (w as f32, h as f32);

    // nudge before flooring so 90deg turns don't lose a pixel to rounding
    let new_w = (w * cos + h * sin + 1e-3).floor();
    let new_h = (w * sin + h * cos + 1e-3).floor();

    (new_w.max(1.) as u32, new_h.max(1.) as u32)
}
