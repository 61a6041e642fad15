use image::RgbaImage;
pub use outline::{Marker, Outline};
pub use overlay::Overlay;
pub use rotate::Rotate;

mod outline;
mod overlay;
mod rotate;

/// A drawing step queued against the working copy of a photo.
#[derive(Debug, Clone)]
pub enum Operation {
    Overlay(Overlay),
    Outline(Outline),
    Marker(Marker),
}

impl From<Overlay> for Operation {
    fn from(o: Overlay) -> Operation {
        Operation::Overlay(o)
    }
}

impl From<Outline> for Operation {
    fn from(o: Outline) -> Operation {
        Operation::Outline(o)
    }
}

impl From<Marker> for Operation {
    fn from(m: Marker) -> Operation {
        Operation::Marker(m)
    }
}

pub trait Executable {
    fn execute(&self, img: &mut RgbaImage);
}

impl Executable for Operation {
    fn execute(&self, img: &mut RgbaImage) {
        match self {
            Operation::Overlay(o) => o.execute(img),
            Operation::Outline(o) => o.execute(img),
            Operation::Marker(m) => m.execute(img),
        }
    }
}
