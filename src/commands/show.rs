//! Print a single post

use anyhow::Result;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::Folio;

/// Relative paths are looked up in the content directory
pub fn resolve(folio: &Folio, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        folio.content_dir.join(path)
    }
}

/// Print the rendered HTML of a post, or its markdown source with `raw`
pub fn run(folio: &Folio, path: &Path, raw: bool, out: &mut impl Write) -> Result<()> {
    let post = folio.repository().get(resolve(folio, path))?;

    if raw {
        write!(out, "{}", post.body)?;
    } else {
        write!(out, "{}", post.html.unwrap_or_default())?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentError;
    use std::fs;

    #[test]
    fn test_show() {
        let dir = tempfile::tempdir().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        fs::create_dir_all(&folio.content_dir).unwrap();
        fs::write(
            folio.content_dir.join("hello.md"),
            "---\ntitle: Hello\n---\n# Hello\n",
        )
        .unwrap();

        let mut html = Vec::new();
        run(&folio, Path::new("hello.md"), false, &mut html).unwrap();
        assert!(String::from_utf8(html).unwrap().contains("<h1>Hello</h1>"));

        let mut raw = Vec::new();
        let absolute = folio.content_dir.join("hello.md");
        run(&folio, &absolute, true, &mut raw).unwrap();
        assert_eq!(String::from_utf8(raw).unwrap(), "# Hello\n");
    }

    #[test]
    fn test_show_missing_post() {
        let dir = tempfile::tempdir().unwrap();
        let folio = Folio::new(dir.path()).unwrap();

        let err = run(&folio, Path::new("nope.md"), false, &mut Vec::<u8>::new()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ContentError>(),
            Some(ContentError::NotFound(_))
        ));
    }
}
