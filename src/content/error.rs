//! Errors returned by the content repository

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use super::frontmatter::FrontMatterError;
use super::markdown::RenderError;

pub type Result<T> = std::result::Result<T, ContentError>;

/// Content repository errors
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("post not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to parse front matter in {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: FrontMatterError,
    },

    #[error("failed to render {}", .path.display())]
    Render {
        path: PathBuf,
        #[source]
        source: RenderError,
    },

    #[error("failed to serialize front matter for {}", .path.display())]
    Serialization {
        path: PathBuf,
        #[source]
        source: FrontMatterError,
    },

    #[error("I/O error on {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("post already exists: {}", .0.display())]
    AlreadyExists(PathBuf),
}

impl ContentError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ContentError::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the caller sent a bad request, as opposed to a failure
    /// reading or writing content.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ContentError::InvalidArgument(_) | ContentError::AlreadyExists(_)
        )
    }
}
