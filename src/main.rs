#![warn(unused_extern_crates)]
use anyhow::Result;
use clap::Parser;
use facemoji::composite::OverlaySettings;
use facemoji::detection::JsonDetector;
use facemoji::glyph::{
    Emoji, FixedGlyph, FontRenderer, GlyphRenderer, GlyphSource, RandomGlyphs, Sketch,
};
use facemoji::pipeline::{self, Detected, Pipeline, Session};
use pollster::FutureExt;
use std::path::PathBuf;
use tracing::{Level, debug, info, span};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct CmdArgs {
    /// Photo to cover faces in
    #[arg(short, long)]
    input: PathBuf,

    /// Where to write the result
    #[arg(short, long, default_value = "facemoji.png")]
    output: PathBuf,

    /// Face detection results for the photo, as JSON
    #[arg(short, long, value_name = "FILE")]
    faces: PathBuf,

    /// How far past the face box the emoji reaches, per side
    #[arg(long, default_value = "0.3")]
    padding: f32,

    /// Seed for picking emoji. Random when unset
    #[arg(long)]
    seed: Option<u64>,

    /// Use this emoji on every face instead of picking at random
    #[arg(long)]
    emoji: Option<Emoji>,

    /// Render emoji with a font instead of the built-in drawings
    #[arg(long, value_name = "FILE")]
    font: Option<PathBuf>,

    /// Draw detection boxes and anchor points too
    #[arg(long)]
    trace: bool,
}

fn main() -> Result<()> {
    let filter = EnvFilter::from_default_env();
    tracing_subscriber::fmt()
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_env_filter(filter)
        .init();

    let args = CmdArgs::parse();

    let span = span!(Level::INFO, "facemoji");
    let _guard = span.enter();

    let photo = pipeline::open(&args.input)?;
    debug!("Loaded {:?} ({}x{})", args.input, photo.width(), photo.height());

    let mut session = Session::spawn(JsonDetector::new(args.faces.clone()));
    session.submit(photo)?;
    let Detected {
        image, detection, ..
    } = session.latest().block_on()?;
    session.shutdown()?;

    let renderer: Box<dyn GlyphRenderer> = match &args.font {
        Some(path) => Box::new(FontRenderer::from_file(path)?),
        None => Box::new(Sketch),
    };
    let mut source: Box<dyn GlyphSource> = match (args.emoji, args.seed) {
        (Some(emoji), _) => Box::new(FixedGlyph::new(emoji, renderer)),
        (None, Some(seed)) => Box::new(RandomGlyphs::seeded(renderer, seed)),
        (None, None) => Box::new(RandomGlyphs::new(renderer)),
    };

    let settings = OverlaySettings {
        padding: args.padding,
        trace: args.trace,
        ..Default::default()
    };
    let mut pipe = Pipeline::new(move |w: u32, h: u32| source.glyph(w, h), settings);
    let rendered = pipe.render(&image, &detection);

    rendered.image.save(&args.output)?;
    info!("Result at {:?}", args.output);
    println!("{}", rendered.status_label());

    Ok(())
}
