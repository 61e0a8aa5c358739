use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while scanning the gallery or generating derivatives.
///
/// Only `GalleryRoot` (and a failed scan task) ever reach the process boundary;
/// everything else is scoped to a single category or file and is logged
/// by the optimizer before it moves on.
#[derive(Debug, Error)]
pub enum GalleryError {
    /// The gallery root is missing or is not a directory
    #[error("gallery root {}: {}", path.display(), reason)]
    GalleryRoot { path: PathBuf, reason: String },

    /// Filesystem failure on a specific path
    #[error("{}: {}", path.display(), source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Source image could not be read or decoded
    #[error("failed to decode {}: {}", path.display(), source)]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The WebP encoder rejected the image
    #[error("failed to encode {}: {}", path.display(), reason)]
    Encode { path: PathBuf, reason: String },

    #[error("invalid optimizer config: {0}")]
    InvalidConfig(String),

    /// A blocking worker panicked or was cancelled
    #[error("task join error: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl GalleryError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, GalleryError>;
