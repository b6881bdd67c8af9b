//! folio: a small file-backed content manager
//!
//! Blog posts live as markdown files with a YAML front-matter block in a
//! flat content directory. The [`content::ContentRepository`] maps between
//! those files and [`content::Post`] values; everything else in this crate
//! is a thin shell around it.

pub mod commands;
pub mod config;
pub mod content;

use anyhow::Result;
use std::path::{Path, PathBuf};

use content::{ContentRepository, MarkdownRenderer};

/// Config file looked up in the site directory
pub const CONFIG_FILE: &str = "folio.yml";

/// A site on disk
#[derive(Debug, Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Directory holding the posts
    pub content_dir: PathBuf,
}

impl Folio {
    /// Open a site directory, reading `folio.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let content_dir = base_dir.join(&config.content_dir);

        Ok(Self {
            config,
            base_dir,
            content_dir,
        })
    }

    /// Repository configured from the site settings
    pub fn repository(&self) -> ContentRepository {
        ContentRepository::with_renderer(MarkdownRenderer::with_config(&self.config.highlight))
            .with_options(self.config.repository_options())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_defaults_without_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        assert_eq!(folio.content_dir, dir.path().join("content"));
        assert!(folio.repository().options().overwrite_existing);
    }

    #[test]
    fn test_reads_config_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "content_dir: posts\natomic_writes: true\noverwrite_existing: false\n",
        )
        .unwrap();

        let folio = Folio::new(dir.path()).unwrap();
        assert_eq!(folio.content_dir, dir.path().join("posts"));
        let options = folio.repository().options();
        assert!(options.atomic_writes);
        assert!(!options.overwrite_existing);
    }

    #[test]
    fn test_bad_config_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "atomic_writes: [nope").unwrap();
        assert!(Folio::new(dir.path()).is_err());
    }
}
