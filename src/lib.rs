pub mod anchor;
pub mod composite;
pub mod detection;
pub mod error;
pub mod glyph;
pub mod manipulation;
pub mod pipeline;
pub mod shapes;

pub use error::{Error, Result};
