//! Overlay glyphs: the emoji set, how they get rasterized, and how one is
//! picked per face.

use crate::error::Error;
use image::RgbaImage;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::str::FromStr;
use tracing::trace;

mod font;
mod sketch;

pub use font::FontRenderer;
pub use sketch::Sketch;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Emoji {
    SlightSmile,
    Grin,
    Blush,
    Wink,
    HeartEyes,
    Sunglasses,
    Nerd,
    Monocle,
    StarStruck,
}

impl Emoji {
    pub const ALL: [Emoji; 9] = [
        Emoji::SlightSmile,
        Emoji::Grin,
        Emoji::Blush,
        Emoji::Wink,
        Emoji::HeartEyes,
        Emoji::Sunglasses,
        Emoji::Nerd,
        Emoji::Monocle,
        Emoji::StarStruck,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            Emoji::SlightSmile => "🙂",
            Emoji::Grin => "😀",
            Emoji::Blush => "😊",
            Emoji::Wink => "😉",
            Emoji::HeartEyes => "😍",
            Emoji::Sunglasses => "😎",
            Emoji::Nerd => "🤓",
            Emoji::Monocle => "🧐",
            Emoji::StarStruck => "🤩",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Emoji::SlightSmile => "slight_smile",
            Emoji::Grin => "grin",
            Emoji::Blush => "blush",
            Emoji::Wink => "wink",
            Emoji::HeartEyes => "heart_eyes",
            Emoji::Sunglasses => "sunglasses",
            Emoji::Nerd => "nerd",
            Emoji::Monocle => "monocle",
            Emoji::StarStruck => "star_struck",
        }
    }
}

impl FromStr for Emoji {
    type Err = Error;

    /// Accepts either the label (`"wink"`) or the emoji itself.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Emoji::ALL
            .into_iter()
            .find(|e| e.label() == s.to_lowercase() || e.symbol() == s)
            .ok_or_else(|| Error::UnknownEmoji(s.to_owned()))
    }
}

/// Rasterizes an emoji onto a transparent canvas of exactly the given size.
pub trait GlyphRenderer {
    fn render(&self, emoji: Emoji, width: u32, height: u32) -> RgbaImage;
}

impl<T: GlyphRenderer + ?Sized> GlyphRenderer for Box<T> {
    fn render(&self, emoji: Emoji, width: u32, height: u32) -> RgbaImage {
        (**self).render(emoji, width, height)
    }
}

/// Supplies one overlay image per face, sized to that face's footprint.
pub trait GlyphSource {
    fn glyph(&mut self, width: u32, height: u32) -> RgbaImage;
}

impl<F> GlyphSource for F
where
    F: FnMut(u32, u32) -> RgbaImage,
{
    fn glyph(&mut self, width: u32, height: u32) -> RgbaImage {
        self(width, height)
    }
}

/// Picks a random emoji for every face.
pub struct RandomGlyphs<R: GlyphRenderer> {
    renderer: R,
    rng: ChaCha8Rng,
}

impl<R: GlyphRenderer> RandomGlyphs<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            rng: ChaCha8Rng::from_os_rng(),
        }
    }

    /// Same seed, same sequence of emoji.
    pub fn seeded(renderer: R, seed: u64) -> Self {
        Self {
            renderer,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn pick(&mut self) -> Emoji {
        Emoji::ALL[self.rng.random_range(0..Emoji::ALL.len())]
    }
}

impl<R: GlyphRenderer> GlyphSource for RandomGlyphs<R> {
    fn glyph(&mut self, width: u32, height: u32) -> RgbaImage {
        let emoji = self.pick();
        trace!("Rendering {} at {width}x{height}", emoji.label());
        self.renderer.render(emoji, width, height)
    }
}

/// Same emoji on every face.
pub struct FixedGlyph<R: GlyphRenderer> {
    emoji: Emoji,
    renderer: R,
}

impl<R: GlyphRenderer> FixedGlyph<R> {
    pub fn new(emoji: Emoji, renderer: R) -> Self {
        Self { emoji, renderer }
    }
}

impl<R: GlyphRenderer> GlyphSource for FixedGlyph<R> {
    fn glyph(&mut self, width: u32, height: u32) -> RgbaImage {
        self.renderer.render(self.emoji, width, height)
    }
}
