//! List tags with their post counts

use anyhow::Result;
use std::io::Write;

use crate::content::index_by_tag;
use crate::Folio;

/// Print tags, most used first
pub fn run(folio: &Folio, out: &mut impl Write) -> Result<()> {
    let posts = folio.repository().list(&folio.content_dir)?;
    let index = index_by_tag(&posts);

    let mut tags: Vec<_> = index.iter().collect();
    tags.sort_by(|a, b| b.count().cmp(&a.count()));

    writeln!(out, "Tags ({}):", tags.len())?;
    for tag in tags {
        writeln!(out, "  {} ({})", tag.name, tag.count())?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_tags() {
        let dir = tempfile::tempdir().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        fs::create_dir_all(&folio.content_dir).unwrap();
        fs::write(
            folio.content_dir.join("a.md"),
            "---\ntitle: A\ntags: [web, rust]\n---\n",
        )
        .unwrap();
        fs::write(
            folio.content_dir.join("b.md"),
            "---\ntitle: B\ntags: [rust]\n---\n",
        )
        .unwrap();

        let mut out = Vec::new();
        run(&folio, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Tags (2):\n  rust (2)\n  web (1)\n"
        );
    }
}
