use thiserror::Error;

#[derive(Error, Debug)]
pub enum InstallError {
    #[error("Unknown formula: {0}")]
    UnknownFormula(String),

    #[error("{0} is not installed")]
    NotInstalled(String),

    #[error("Source tree is missing {0}")]
    MissingSource(String),

    #[error("Python package installation failed (pip exited with status {0})")]
    PipFailed(i32),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Error: {0}")]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, InstallError>;
