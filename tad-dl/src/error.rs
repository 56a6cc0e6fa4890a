use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building the dataset or fetching its items.
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("feature storage not found at '{}'", .path.display())]
    StorageNotFound { path: PathBuf },
    #[error("malformed annotation database: {message}")]
    MalformedAnnotation { message: String },
    #[error("video '{name}' has no annotated segments")]
    NoAnnotations { name: String },
    #[error("feature shape mismatch: {message}")]
    ShapeMismatch { message: String },
}
