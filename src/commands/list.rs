//! List posts in the content directory

use anyhow::Result;
use std::io::Write;

use crate::Folio;

/// Print every post, newest first
pub fn run(folio: &Folio, json: bool, out: &mut impl Write) -> Result<()> {
    let posts = folio.repository().list(&folio.content_dir)?;

    if json {
        serde_json::to_writer_pretty(&mut *out, &posts)?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "Posts ({}):", posts.len())?;
    for post in &posts {
        let date = post
            .metadata
            .parsed_date()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| post.metadata.date.clone());
        let draft = if post.metadata.draft { " (draft)" } else { "" };
        writeln!(
            out,
            "  {} - {}{} [{}]",
            date,
            post.title(),
            draft,
            post.file_name
        )?;
    }

    Ok(())
}
