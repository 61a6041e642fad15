//! Anchor point and head tilt from facial landmarks.

use crate::detection::{FaceLandmarks, Feature, ImageFrame};
use crate::shapes::point::Point;
use tracing::trace;

/// Where to center an overlay on a face and how far to turn it.
///
/// `angle_degrees` is clockwise on screen, in [0, 360), with 0 meaning
/// the face points straight down the image (upright). Both are `None` when
/// the face has no landmark points at all; without an eye/mouth triad or an
/// all-points group only `center` is.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Anchor {
    pub center: Option<Point>,
    pub angle_degrees: Option<f32>,
}

impl Anchor {
    pub fn unresolved() -> Self {
        Self::default()
    }
}

/// Pixel-space centroid of one landmark group.
fn group_center(landmarks: &FaceLandmarks, feature: Feature, frame: &ImageFrame) -> Option<Point> {
    let points: Vec<Point> = landmarks
        .group(feature)?
        .iter()
        .map(|p| frame.point_to_pixels(*p))
        .collect();

    Point::centroid(&points)
}

fn first_center(landmarks: &FaceLandmarks, prefs: &[Feature], frame: &ImageFrame) -> Option<Point> {
    prefs
        .iter()
        .find_map(|f| group_center(landmarks, *f, frame))
}

pub fn resolve(landmarks: &FaceLandmarks, frame: ImageFrame) -> Anchor {
    if landmarks.is_empty() {
        return Anchor::unresolved();
    }

    let l_eye = first_center(
        landmarks,
        &[Feature::LeftPupil, Feature::LeftEye, Feature::LeftEyebrow],
        &frame,
    );
    let r_eye = first_center(
        landmarks,
        &[Feature::RightPupil, Feature::RightEye, Feature::RightEyebrow],
        &frame,
    );
    let mouth = first_center(landmarks, &[Feature::InnerLips, Feature::OuterLips], &frame);

    if let (Some(l_eye), Some(r_eye), Some(mouth)) = (l_eye, r_eye, mouth) {
        // all Some, centroids of non-empty slices
        let triad = Point::centroid(&[l_eye, r_eye, mouth]).unwrap_or(mouth);
        let eyes = Point::centroid(&[l_eye, r_eye]).unwrap_or(l_eye);
        let angle = eyes.rotation_degrees_to(&triad);
        trace!("eyes {eyes:?}, triad {triad:?}, tilt {angle}");

        return Anchor {
            center: Some(eyes),
            angle_degrees: Some(angle),
        };
    }

    let center = group_center(landmarks, Feature::AllPoints, &frame);
    trace!("No eye/mouth triad, falling back to {center:?}");

    Anchor {
        center,
        angle_degrees: Some(0.),
    }
}
