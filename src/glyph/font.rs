use super::{Emoji, GlyphRenderer, Sketch};
use crate::error::{Error, Result};
use ab_glyph::{Font, FontVec, PxScale};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};
use std::path::Path;
use tracing::warn;

/// Glyph height relative to the canvas, leaving room for ascenders.
const FONT_SCALE: f32 = 0.94;

/// Rasterizes the emoji character from an outline font. Characters the
/// font has no glyph for are drawn with [`Sketch`] instead.
pub struct FontRenderer {
    font: FontVec,
    color: Rgba<u8>,
}

impl FontRenderer {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_bytes(std::fs::read(path)?)
    }

    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let font = FontVec::try_from_vec(data).map_err(|e| Error::Font(e.to_string()))?;
        Ok(Self {
            font,
            color: Rgba([255, 204, 77, 255]),
        })
    }

    fn covers(&self, text: &str) -> bool {
        text.chars().all(|c| self.font.glyph_id(c).0 != 0)
    }
}

impl GlyphRenderer for FontRenderer {
    fn render(&self, emoji: Emoji, width: u32, height: u32) -> RgbaImage {
        let text = emoji.symbol();
        if !self.covers(text) {
            warn!("Font has no glyph for {}, sketching it", emoji.label());
            return Sketch.render(emoji, width, height);
        }

        let mut img = RgbaImage::new(width, height);
        let scale = PxScale::from(height as f32 * FONT_SCALE);
        let (tw, th) = text_size(scale, &self.font, text);
        let x = (width as i32 - tw as i32) / 2;
        let y = (height as i32 - th as i32) / 2;
        draw_text_mut(&mut img, self.color, x, y, scale, &self.font, text);

        img
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_font() {
        let res = FontRenderer::from_bytes(vec![0u8; 32]);
        assert!(matches!(res, Err(Error::Font(_))));
    }

    #[test]
    fn test_missing_font_file() {
        let res = FontRenderer::from_file("/nonexistent/emoji.ttf");
        assert!(matches!(res, Err(Error::Io(_))));
    }
}
