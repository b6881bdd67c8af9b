//! Create a new post

use anyhow::Result;
use chrono::{Local, SecondsFormat};
use std::fs;

use crate::content::{FrontMatter, Post};
use crate::Folio;

/// Values collected from the command line for a new post
#[derive(Debug, Clone, Default)]
pub struct NewPost {
    pub title: String,
    pub slug: Option<String>,
    /// Raw tag arguments; each may hold several comma-separated tags
    pub tags: Vec<String>,
    pub draft: bool,
    pub body: String,
}

/// Create the post in the site's content directory
pub fn create_post(folio: &Folio, new_post: NewPost) -> Result<Post> {
    let now = Local::now().to_rfc3339_opts(SecondsFormat::Secs, true);

    fs::create_dir_all(&folio.content_dir)?;

    let metadata = FrontMatter {
        title: new_post.title,
        date: now.clone(),
        draft: new_post.draft,
        publish_date: now,
        slug: new_post.slug.unwrap_or_default(),
        tags: split_tags(&new_post.tags),
        ..Default::default()
    };

    let post = folio
        .repository()
        .create(&folio.content_dir, Post::new(metadata, new_post.body))?;

    tracing::info!("Created {:?}", post.file_path);

    Ok(post)
}

/// Split comma-separated tag arguments, trimming each and dropping blanks
pub fn split_tags(raw: &[String]) -> Vec<String> {
    raw.iter()
        .flat_map(|arg| arg.split(','))
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_tags() {
        let raw = vec!["tech, golang".to_string(), "rust".to_string(), " ,".to_string()];
        assert_eq!(split_tags(&raw), vec!["tech", "golang", "rust"]);
        assert!(split_tags(&[]).is_empty());
    }

    #[test]
    fn test_create_post() {
        let dir = tempfile::tempdir().unwrap();
        let folio = Folio::new(dir.path()).unwrap();

        let post = create_post(
            &folio,
            NewPost {
                title: "Auto Generated Post".to_string(),
                tags: vec!["auto".to_string()],
                body: "Content for auto-generated post".to_string(),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(post.file_path, folio.content_dir.join("auto-generated-post.md"));
        assert_eq!(post.metadata.date, post.metadata.publish_date);
        assert!(post.metadata.parsed_date().is_some());

        let loaded = folio.repository().get(&post.file_path).unwrap();
        assert_eq!(loaded.metadata, post.metadata);
        assert_eq!(loaded.body, "Content for auto-generated post");
    }

    #[test]
    fn test_create_post_with_slug() {
        let dir = tempfile::tempdir().unwrap();
        let folio = Folio::new(dir.path()).unwrap();

        let post = create_post(
            &folio,
            NewPost {
                title: "Test Post".to_string(),
                slug: Some("custom".to_string()),
                draft: true,
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(post.file_name, "custom.md");
        assert!(post.metadata.draft);
    }
}
