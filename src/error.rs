use thiserror::Error;

#[derive(Error, Debug)]
pub enum BranchscopeError {
    #[error("github error: {0}")]
    GitHub(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("store error: {0}")]
    Store(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("toml error: {0}")]
    TomlRead(#[from] toml::de::Error),

    #[error("toml error: {0}")]
    TomlWrite(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, BranchscopeError>;
