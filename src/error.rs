use std::path::PathBuf;

pub type SlidereelResult<T> = Result<T, SlidereelError>;

#[derive(thiserror::Error, Debug)]
pub enum SlidereelError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("failed to build clip for image #{index} ('{}'): {source}", path.display())]
    ClipBuild {
        index: usize,
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("encode error: {0}")]
    Encode(String),

    #[error("overlay error: {0}")]
    Overlay(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SlidereelError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    pub fn overlay(msg: impl Into<String>) -> Self {
        Self::Overlay(msg.into())
    }

    pub fn clip_build(
        index: usize,
        path: impl Into<PathBuf>,
        source: impl Into<anyhow::Error>,
    ) -> Self {
        Self::ClipBuild {
            index,
            path: path.into(),
            source: source.into(),
        }
    }
}
