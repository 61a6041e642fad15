use crate::composite::{OverlaySettings, composite};
use crate::detection::{Detection, Detector};
use crate::error::Result;
use crate::glyph::GlyphSource;
use image::RgbaImage;
use std::path::Path;
use tracing::{Level, info, span, warn};

mod session;

pub use session::{Detected, Session};

/// A finished photo plus what the UI shows next to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub image: RgbaImage,
    pub face_count: usize,
}

impl Rendered {
    /// The photo as it was, for when detection came back empty-handed.
    pub fn unmodified(image: RgbaImage) -> Self {
        Self {
            image,
            face_count: 0,
        }
    }

    pub fn status_label(&self) -> String {
        let plural = if self.face_count == 1 { "" } else { "s" };
        format!("{} face{plural}", self.face_count)
    }
}

pub fn decode(bytes: &[u8]) -> Result<RgbaImage> {
    Ok(image::load_from_memory(bytes)?.into_rgba8())
}

pub fn open(path: impl AsRef<Path>) -> Result<RgbaImage> {
    decode(&std::fs::read(path)?)
}

/// Detection result in, annotated photo out.
pub struct Pipeline<G: GlyphSource> {
    glyphs: G,
    settings: OverlaySettings,
}

impl<G: GlyphSource> Pipeline<G> {
    pub fn new(glyphs: G, settings: OverlaySettings) -> Self {
        Self { glyphs, settings }
    }

    pub fn render(&mut self, img: &RgbaImage, detection: &Detection) -> Rendered {
        let span = span!(Level::DEBUG, "render");
        let _guard = span.enter();

        let image = composite(img, detection, &mut self.glyphs, &self.settings);
        info!("Drew over {} face(s)", detection.face_count());

        Rendered {
            image,
            face_count: detection.face_count(),
        }
    }

    /// Detects inline on the calling thread, then renders. A failed
    /// detection renders the photo untouched.
    pub fn run(&mut self, img: &RgbaImage, detector: &mut dyn Detector) -> Rendered {
        let detection = match detector.detect(img) {
            Ok(d) => d,
            Err(e) => {
                warn!("Detection unavailable: {e:?}");
                Detection::unavailable()
            }
        };

        self.render(img, &detection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::{FaceLandmarks, FaceObservation, Feature, Origin, StubDetector};
    use crate::error::Error;
    use crate::shapes::point::Point;
    use crate::shapes::rect::RectF32;
    use image::{ImageFormat, Rgba};
    use std::io::Cursor;

    struct Unavailable;

    impl Detector for Unavailable {
        fn detect(&mut self, _img: &RgbaImage) -> anyhow::Result<Detection> {
            anyhow::bail!("no vision framework here")
        }
    }

    fn solid(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_pixel(w, h, Rgba([255, 0, 0, 255]))
    }

    fn one_face() -> Detection {
        let lm = FaceLandmarks::default()
            .with_group(Feature::AllPoints, vec![Point::new(0.5, 0.5)]);
        Detection::new(
            Origin::TopLeft,
            vec![
                FaceObservation {
                    bounding_box: RectF32::new(0.4, 0.4, 0.2, 0.2),
                    landmarks: Some(lm),
                },
                FaceObservation::default(),
            ],
        )
    }

    #[test]
    fn test_status_label() {
        let img = RgbaImage::new(1, 1);
        let mut r = Rendered::unmodified(img);
        assert_eq!(r.status_label(), "0 faces");
        r.face_count = 1;
        assert_eq!(r.status_label(), "1 face");
        r.face_count = 3;
        assert_eq!(r.status_label(), "3 faces");
    }

    #[test]
    fn test_face_count_includes_skipped_faces() {
        let img = RgbaImage::from_pixel(50, 50, Rgba([0, 0, 0, 255]));
        let mut pipeline = Pipeline::new(solid, OverlaySettings::default());
        let rendered = pipeline.run(&img, &mut StubDetector::new(one_face()));

        assert_eq!(rendered.face_count, 2);
        assert_eq!(rendered.image.get_pixel(25, 25), &Rgba([255, 0, 0, 255]));
        assert_eq!(rendered.image.get_pixel(2, 2), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_unavailable_detection_keeps_photo() {
        let img = RgbaImage::from_pixel(8, 8, Rgba([9, 9, 9, 255]));
        let mut pipeline = Pipeline::new(solid, OverlaySettings::default());
        let rendered = pipeline.run(&img, &mut Unavailable);

        assert_eq!(rendered, Rendered::unmodified(img));
    }

    #[test]
    fn test_decode() -> anyhow::Result<()> {
        let img = RgbaImage::from_pixel(3, 2, Rgba([1, 2, 3, 255]));
        let mut png = Vec::new();
        img.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

        assert_eq!(decode(&png)?, img);
        assert!(matches!(decode(b"not an image"), Err(Error::Decode(_))));
        Ok(())
    }

    #[test]
    fn test_open_missing_file_is_io() {
        assert!(matches!(open("/nonexistent/photo.png"), Err(Error::Io(_))));
    }
}
