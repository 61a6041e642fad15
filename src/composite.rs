//! Draws one glyph per detected face onto a copy of the photo.

use crate::anchor::{Anchor, resolve};
use crate::detection::{Detection, FaceObservation, ImageFrame};
use crate::glyph::GlyphSource;
use crate::manipulation::{Executable, Marker, Operation, Outline, Overlay, Rotate};
use crate::shapes::rect::Rect;
use image::{Rgba, RgbaImage};
use tracing::{Level, debug, span, trace};

const TRACE_BOUNDS: Rgba<u8> = Rgba([255, 0, 0, 255]);
const TRACE_ANCHOR: Rgba<u8> = Rgba([0, 255, 0, 255]);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlaySettings {
    /// Growth of the footprint on each side, as a fraction of the face
    /// box's own width/height.
    pub padding: f32,
    /// Tilts closer than this to upright are drawn unrotated.
    pub min_rotation_degrees: f32,
    /// Also draw detection boxes and anchor points.
    pub trace: bool,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            padding: 0.3,
            min_rotation_degrees: 0.01,
            trace: false,
        }
    }
}

/// Returns a copy of `base` with a glyph over every face whose anchor
/// resolves. Faces without one are skipped; the rest of the photo is left
/// as it was.
pub fn composite<G>(
    base: &RgbaImage,
    detection: &Detection,
    glyphs: &mut G,
    settings: &OverlaySettings,
) -> RgbaImage
where
    G: GlyphSource + ?Sized,
{
    let span = span!(Level::DEBUG, "composite", faces = detection.face_count());
    let _guard = span.enter();

    let mut output = base.clone();
    let frame = detection.frame(base.width(), base.height());

    let mut ops: Vec<Operation> = Vec::new();
    for (idx, face) in detection.faces.iter().enumerate() {
        ops.extend(face_ops(idx, face, frame, glyphs, settings));
    }

    for op in &ops {
        op.execute(&mut output);
    }

    output
}

fn face_ops<G>(
    idx: usize,
    face: &FaceObservation,
    frame: ImageFrame,
    glyphs: &mut G,
    settings: &OverlaySettings,
) -> Vec<Operation>
where
    G: GlyphSource + ?Sized,
{
    let mut ops = Vec::new();
    let bounds = frame.rect_to_pixels(face.bounding_box);

    if settings.trace {
        let line = (frame.width as f32 * 0.01).round() as u32;
        ops.push(Outline::new(bounds.into(), line, TRACE_BOUNDS).into());
    }

    let anchor = match &face.landmarks {
        Some(landmarks) => resolve(landmarks, frame),
        None => Anchor::unresolved(),
    };
    let Some(center) = anchor.center else {
        debug!("Face {idx}: no landmarks to anchor on, skipping");
        return ops;
    };

    // the detection box and the landmarks don't always agree, trust the landmarks
    let footprint = bounds.centered_on(center).inset(
        -settings.padding * bounds.width,
        -settings.padding * bounds.height,
    );
    let footprint: Rect = footprint.into();
    if footprint.area() == 0 {
        debug!("Face {idx}: footprint {footprint:?} is empty, skipping");
        return ops;
    }
    trace!("Face {idx}: anchor {anchor:?}, footprint {footprint:?}");

    let mut glyph = glyphs.glyph(footprint.w, footprint.h);
    if let Some(angle) = anchor.angle_degrees {
        let rotate = Rotate::new(angle);
        if !rotate.is_trivial(settings.min_rotation_degrees) {
            glyph = rotate.apply(&glyph);
        }
    }
    ops.push(Overlay::new(glyph, footprint).into());

    if settings.trace {
        let radius = (footprint.w.min(footprint.h) / 20).max(2) as i32;
        ops.push(Marker::new(center.rounded(), radius, TRACE_ANCHOR).into());
    }

    ops
}
