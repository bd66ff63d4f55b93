use crate::clip::ClipName;

#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("failed to read clip: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to fetch clip: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("failed to decode wav: {0}")]
    Decode(#[from] hound::Error),

    #[error("clip {0:?} has no audio frames")]
    Empty(ClipName),
}

pub type Result<T> = std::result::Result<T, AudioError>;
