use super::{Detection, Detector};
use crate::error::Result;
use image::RgbaImage;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Parses a detection from its JSON sidecar form.
pub fn parse(input: &str) -> Result<Detection> {
    let detection: Detection = serde_json::from_str(input)?;
    detection.check_bounds();
    Ok(detection)
}

pub fn read(path: impl AsRef<Path>) -> Result<Detection> {
    parse(&std::fs::read_to_string(path)?)
}

/// Detector backed by a JSON file written by an external engine. The file
/// is re-read on every call so a running session picks up new results.
#[derive(Debug, Clone)]
pub struct JsonDetector {
    path: PathBuf,
}

impl JsonDetector {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Detector for JsonDetector {
    fn detect(&mut self, img: &RgbaImage) -> anyhow::Result<Detection> {
        debug!(
            "Reading faces for {}x{} image from {:?}",
            img.width(),
            img.height(),
            self.path
        );
        Ok(read(&self.path)?)
    }
}
