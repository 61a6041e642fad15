use crate::shapes::rect::rotated_bounds;
use image::{Rgba, RgbaImage};
use imageproc::geometric_transformations::{Interpolation, Projection, warp_into};
use tracing::{Level, span};

#[derive(Debug, Clone, Copy)]
pub struct Rotate {
    degrees: f32,
}

impl Rotate {
    /// Clockwise on screen.
    pub fn new(degrees: f32) -> Self {
        Self { degrees }
    }

    /// True when the turn is too small to change any pixel worth the
    /// resampling.
    pub fn is_trivial(&self, epsilon: f32) -> bool {
        let d = self.degrees.rem_euclid(360.);
        d.min(360. - d) <= epsilon
    }

    /// Rotates onto a fresh transparent canvas big enough that no corner
    /// of `img` is clipped.
    pub fn apply(&self, img: &RgbaImage) -> RgbaImage {
        let span = span!(Level::TRACE, "rotate");
        let _guard = span.enter();

        let (w, h) = img.dimensions();
        let (out_w, out_h) = rotated_bounds(w, h, self.degrees);
        let mut out = RgbaImage::new(out_w, out_h);

        // center on the origin, turn, then center on the new canvas
        let projection = Projection::translate(-(w as f32) / 2., -(h as f32) / 2.)
            .and_then(Projection::rotate(self.degrees.to_radians()))
            .and_then(Projection::translate(out_w as f32 / 2., out_h as f32 / 2.));

        warp_into(
            img,
            &projection,
            Interpolation::Bilinear,
            Rgba([0, 0, 0, 0]),
            &mut out,
        );

        out
    }
}
