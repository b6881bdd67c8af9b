//! Edit an existing post in place

use anyhow::Result;
use chrono::{Local, SecondsFormat};
use std::path::Path;

use super::new::split_tags;
use super::show::resolve;
use crate::content::Post;
use crate::Folio;

/// Fields to change; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct PostEdit {
    pub title: Option<String>,
    pub body: Option<String>,
    /// Changes the front matter only; the file keeps its name
    pub slug: Option<String>,
    /// Replaces the whole tag list when non-empty
    pub tags: Vec<String>,
    pub draft: Option<bool>,
    pub date: Option<String>,
    /// Defaults to the current time
    pub last_modified: Option<String>,
}

/// Load the post, apply the edit and write it back from its markdown body
pub fn edit_post(folio: &Folio, path: &Path, edit: PostEdit) -> Result<Post> {
    let repository = folio.repository();
    let mut post = repository.get(resolve(folio, path))?;

    let metadata = &mut post.metadata;
    if let Some(title) = edit.title {
        metadata.title = title;
    }
    if let Some(slug) = edit.slug {
        metadata.slug = slug;
    }
    if !edit.tags.is_empty() {
        metadata.tags = split_tags(&edit.tags);
    }
    if let Some(draft) = edit.draft {
        metadata.draft = draft;
    }
    if let Some(date) = edit.date {
        metadata.date = date;
    }
    metadata.last_modified = edit
        .last_modified
        .unwrap_or_else(|| Local::now().to_rfc3339_opts(SecondsFormat::Secs, true));

    if let Some(body) = edit.body {
        post.body = body;
    }
    // The rendered copy no longer matches and is never written anyway
    post.html = None;

    repository.update(&post)?;
    tracing::info!("Updated {}", post.file_path.display());

    Ok(post)
}
