use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No slides to slide to")]
    NotReady,

    #[error("The track is not mounted")]
    NotMounted,

    #[error("Animation cancelled before completion")]
    AnimationCancelled,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
