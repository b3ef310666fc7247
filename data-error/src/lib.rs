use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProfileError>;

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parsing error")]
    Parse,
    #[error("Storage error: {0} {1}")]
    Storage(String, String),
    #[error("Avatar rejected: {0}")]
    Avatar(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<serde_json::Error> for ProfileError {
    fn from(_: serde_json::Error) -> Self {
        Self::Parse
    }
}

impl From<Box<dyn std::error::Error>> for ProfileError {
    fn from(e: Box<dyn std::error::Error>) -> Self {
        Self::Other(anyhow::anyhow!(e.to_string()))
    }
}
