use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Malformed detection file: {0}")]
    DetectionFormat(#[from] serde_json::Error),

    #[error("Unusable font: {0}")]
    Font(String),

    #[error("Unknown emoji {0:?}")]
    UnknownEmoji(String),

    #[error("Detection worker is no longer running")]
    SessionClosed,

    #[error("No submitted photo is waiting on detection")]
    NothingPending,
}

pub type Result<T> = std::result::Result<T, Error>;
