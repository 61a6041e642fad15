//! Face detection results as handed over by a detection engine, and the
//! trait engines implement.
//!
//! All detection coordinates are normalized to `[0, 1]` along each axis and
//! interpreted in the detection's [`Origin`]. [`ImageFrame`] is the one
//! place they are turned into pixels: output pixels are always top-left
//! anchored with y growing downward, matching the `image` crate.

use crate::shapes::point::Point;
use crate::shapes::rect::RectF32;
use anyhow::Result;
use image::RgbaImage;
use serde::{Deserialize, Serialize};
use tracing::warn;

pub mod json;

pub use json::JsonDetector;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    /// y grows downward from the top-left corner
    #[default]
    TopLeft,
    /// y grows upward from the bottom-left corner
    BottomLeft,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Feature {
    AllPoints,
    LeftPupil,
    LeftEye,
    LeftEyebrow,
    RightPupil,
    RightEye,
    RightEyebrow,
    OuterLips,
    InnerLips,
}

impl Feature {
    pub const ALL: [Feature; 9] = [
        Feature::AllPoints,
        Feature::LeftPupil,
        Feature::LeftEye,
        Feature::LeftEyebrow,
        Feature::RightPupil,
        Feature::RightEye,
        Feature::RightEyebrow,
        Feature::OuterLips,
        Feature::InnerLips,
    ];

    pub fn label(&self) -> &str {
        match self {
            Feature::AllPoints => "all_points",
            Feature::LeftPupil => "left_pupil",
            Feature::LeftEye => "left_eye",
            Feature::LeftEyebrow => "left_eyebrow",
            Feature::RightPupil => "right_pupil",
            Feature::RightEye => "right_eye",
            Feature::RightEyebrow => "right_eyebrow",
            Feature::OuterLips => "outer_lips",
            Feature::InnerLips => "inner_lips",
        }
    }
}

pub type LandmarkGroup = Vec<Point>;

/// Landmark point groups of one face. Any group may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaceLandmarks {
    pub all_points: Option<LandmarkGroup>,
    pub left_pupil: Option<LandmarkGroup>,
    pub left_eye: Option<LandmarkGroup>,
    pub left_eyebrow: Option<LandmarkGroup>,
    pub right_pupil: Option<LandmarkGroup>,
    pub right_eye: Option<LandmarkGroup>,
    pub right_eyebrow: Option<LandmarkGroup>,
    pub outer_lips: Option<LandmarkGroup>,
    pub inner_lips: Option<LandmarkGroup>,
}

impl FaceLandmarks {
    /// Points of `feature`, or `None` when the group is missing or empty.
    pub fn group(&self, feature: Feature) -> Option<&[Point]> {
        let group = match feature {
            Feature::AllPoints => &self.all_points,
            Feature::LeftPupil => &self.left_pupil,
            Feature::LeftEye => &self.left_eye,
            Feature::LeftEyebrow => &self.left_eyebrow,
            Feature::RightPupil => &self.right_pupil,
            Feature::RightEye => &self.right_eye,
            Feature::RightEyebrow => &self.right_eyebrow,
            Feature::OuterLips => &self.outer_lips,
            Feature::InnerLips => &self.inner_lips,
        };

        group.as_deref().filter(|points| !points.is_empty())
    }

    pub fn with_group(mut self, feature: Feature, points: LandmarkGroup) -> Self {
        let slot = match feature {
            Feature::AllPoints => &mut self.all_points,
            Feature::LeftPupil => &mut self.left_pupil,
            Feature::LeftEye => &mut self.left_eye,
            Feature::LeftEyebrow => &mut self.left_eyebrow,
            Feature::RightPupil => &mut self.right_pupil,
            Feature::RightEye => &mut self.right_eye,
            Feature::RightEyebrow => &mut self.right_eyebrow,
            Feature::OuterLips => &mut self.outer_lips,
            Feature::InnerLips => &mut self.inner_lips,
        };
        *slot = Some(points);
        self
    }

    pub fn is_empty(&self) -> bool {
        Feature::ALL.iter().all(|f| self.group(*f).is_none())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FaceObservation {
    pub bounding_box: RectF32,
    #[serde(default)]
    pub landmarks: Option<FaceLandmarks>,
}

/// Every face found in one photo. Face order carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    #[serde(default)]
    pub origin: Origin,
    #[serde(default)]
    pub faces: Vec<FaceObservation>,
}

impl Detection {
    pub fn new(origin: Origin, faces: Vec<FaceObservation>) -> Self {
        Self { origin, faces }
    }

    /// Result used when the engine had nothing to say about a photo.
    pub fn unavailable() -> Self {
        Self::default()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn frame(&self, width: u32, height: u32) -> ImageFrame {
        ImageFrame {
            width,
            height,
            origin: self.origin,
        }
    }

    /// Logs any normalized coordinate outside `[0, 1]`. Such points are
    /// still used as given.
    pub fn check_bounds(&self) {
        let in_range = |p: &Point| (0. ..=1.).contains(&p.x) && (0. ..=1.).contains(&p.y);

        for (idx, face) in self.faces.iter().enumerate() {
            let Some(landmarks) = &face.landmarks else {
                continue;
            };
            for feature in Feature::ALL {
                if let Some(points) = landmarks.group(feature) {
                    if !points.iter().all(in_range) {
                        warn!(
                            "Face {idx}: {} has points outside the normalized range",
                            feature.label()
                        );
                    }
                }
            }
        }
    }
}

/// Pixel dimensions of an image together with the axis convention of the
/// normalized coordinates being mapped onto it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ImageFrame {
    pub width: u32,
    pub height: u32,
    pub origin: Origin,
}

impl ImageFrame {
    pub fn new(width: u32, height: u32, origin: Origin) -> Self {
        Self {
            width,
            height,
            origin,
        }
    }

    pub fn point_to_pixels(&self, p: Point) -> Point {
        let y = match self.origin {
            Origin::TopLeft => p.y,
            Origin::BottomLeft => 1. - p.y,
        };

        Point::new(p.x * self.width as f32, y * self.height as f32)
    }

    pub fn rect_to_pixels(&self, r: RectF32) -> RectF32 {
        let top = match self.origin {
            Origin::TopLeft => r.y,
            // r.y is the bottom edge here
            Origin::BottomLeft => 1. - r.y - r.height,
        };

        RectF32::new(r.x, top, r.width, r.height).scale(self.width as f32, self.height as f32)
    }
}

/// A face detection engine. Detection may take a while, so callers run it
/// off their event loop (see [`crate::pipeline::Session`]).
///
/// An `Err` means detection was unavailable for this photo; callers treat
/// that as zero faces rather than a failure.
pub trait Detector: Send {
    fn detect(&mut self, img: &RgbaImage) -> Result<Detection>;
}

/// Hands back the same detection for every photo.
#[derive(Debug, Clone, Default)]
pub struct StubDetector {
    detection: Detection,
}

impl StubDetector {
    pub fn new(detection: Detection) -> Self {
        Self { detection }
    }
}

impl Detector for StubDetector {
    fn detect(&mut self, _img: &RgbaImage) -> Result<Detection> {
        Ok(self.detection.clone())
    }
}
