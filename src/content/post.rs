//! Post model

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::FrontMatter;

/// A blog post, identified by its file path
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Full path of the backing file; empty until the post is persisted
    pub file_path: PathBuf,

    /// Base name of `file_path`
    pub file_name: String,

    /// Front-matter block
    pub metadata: FrontMatter,

    /// Raw markdown source. This is what gets written to disk.
    pub body: String,

    /// Rendered HTML, only present on posts loaded from disk
    pub html: Option<String>,
}

impl Post {
    /// Create an unsaved post from metadata and a markdown body
    pub fn new(metadata: FrontMatter, body: impl Into<String>) -> Self {
        Self {
            metadata,
            body: body.into(),
            ..Default::default()
        }
    }

    /// Point the post at a file, keeping `file_name` in sync
    pub fn set_file_path(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        self.file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.file_path = path;
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Whether the post has been assigned a file
    pub fn is_persisted(&self) -> bool {
        !self.file_path.as_os_str().is_empty()
    }

    pub fn title(&self) -> &str {
        &self.metadata.title
    }

    pub fn slug(&self) -> &str {
        &self.metadata.slug
    }
}
