//! Content repository - maps between the content directory and posts

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Component, Path};
use tempfile::NamedTempFile;
use walkdir::WalkDir;

use super::error::{ContentError, Result};
use super::{slugify, FrontMatter, MarkdownRenderer, Post, Renderer};

/// Permission bits for newly created post files
#[cfg(unix)]
const FILE_MODE: u32 = 0o644;

/// How posts are written back to disk.
///
/// The defaults overwrite files in place and let `create` replace an
/// existing post with the same slug.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepositoryOptions {
    /// Write to a temp file in the same directory, then rename over the target
    pub atomic_writes: bool,
    /// When false, `create` fails with `AlreadyExists` instead of overwriting
    pub overwrite_existing: bool,
}

impl Default for RepositoryOptions {
    fn default() -> Self {
        Self {
            atomic_writes: false,
            overwrite_existing: true,
        }
    }
}

/// Reads and writes posts in a flat content directory.
///
/// Holds no state between calls: every `list` rescans the directory and
/// reparses each file. Calls may run concurrently; there is no locking, so
/// racing writes to the same file are last-write-wins.
pub struct ContentRepository<R = MarkdownRenderer> {
    renderer: R,
    options: RepositoryOptions,
}

impl ContentRepository<MarkdownRenderer> {
    /// Create a repository with the default markdown renderer
    pub fn new() -> Self {
        Self::with_renderer(MarkdownRenderer::new())
    }
}

impl Default for ContentRepository<MarkdownRenderer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Renderer> ContentRepository<R> {
    /// Create a repository rendering bodies with `renderer`
    pub fn with_renderer(renderer: R) -> Self {
        Self {
            renderer,
            options: RepositoryOptions::default(),
        }
    }

    pub fn with_options(mut self, options: RepositoryOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> RepositoryOptions {
        self.options
    }

    /// Load every post in `dir`, newest first.
    ///
    /// Only direct children ending in `.md` or `.markdown` are read. Posts
    /// are ordered by comparing `date` as plain text, so mixed date formats
    /// sort incorrectly. A single unreadable post fails the whole listing.
    pub fn list(&self, dir: impl AsRef<Path>) -> Result<Vec<Post>> {
        let dir = dir.as_ref();
        if dir.as_os_str().is_empty() {
            return Err(ContentError::InvalidArgument(
                "content directory path is empty".to_string(),
            ));
        }

        let metadata = fs::metadata(dir).map_err(|e| ContentError::io(dir, e))?;
        if !metadata.is_dir() {
            return Err(ContentError::io(
                dir,
                io::Error::new(io::ErrorKind::InvalidInput, "not a directory"),
            ));
        }

        tracing::debug!("Scanning {:?} for posts", dir);

        let mut posts = Vec::new();
        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(dir).to_path_buf();
                ContentError::io(path, io::Error::from(e))
            })?;

            let path = entry.path();
            if entry.file_type().is_file() && is_markdown_file(path) {
                posts.push(self.get(path)?);
            }
        }

        sort_by_date(&mut posts);
        tracing::debug!("Loaded {} posts from {:?}", posts.len(), dir);

        Ok(posts)
    }

    /// Load a single post, rendering its body to HTML
    pub fn get(&self, path: impl AsRef<Path>) -> Result<Post> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(ContentError::InvalidArgument("post path is empty".to_string()));
        }

        let document = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ContentError::NotFound(path.to_path_buf()),
            _ => ContentError::io(path, e),
        })?;

        let (metadata, body) = FrontMatter::parse(&document).map_err(|source| ContentError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let html = self
            .renderer
            .render(body)
            .map_err(|source| ContentError::Render {
                path: path.to_path_buf(),
                source,
            })?;

        let mut post = Post::new(metadata, body);
        post.set_file_path(path);
        post.html = Some(html);

        Ok(post)
    }

    /// Save a new post in `dir` and return it with its file path assigned.
    ///
    /// The file is named after `metadata.slug`; when that is empty the slug
    /// is derived from the title and stored back into the metadata. An
    /// existing file with the same name is overwritten unless the
    /// repository was configured otherwise.
    pub fn create(&self, dir: impl AsRef<Path>, mut post: Post) -> Result<Post> {
        let dir = dir.as_ref();
        if dir.as_os_str().is_empty() {
            return Err(ContentError::InvalidArgument(
                "content directory path is empty".to_string(),
            ));
        }

        if post.metadata.slug.is_empty() {
            post.metadata.slug = slugify(&post.metadata.title);
        }
        validate_slug(&post.metadata.slug)?;

        post.set_file_path(dir.join(format!("{}.md", post.metadata.slug)));
        self.write(&post, !self.options.overwrite_existing)?;

        Ok(post)
    }

    /// Replace the post's file with its current metadata and body.
    ///
    /// Only `body` is written; `html` is never persisted.
    pub fn update(&self, post: &Post) -> Result<()> {
        self.write(post, false)
    }

    fn write(&self, post: &Post, create_new: bool) -> Result<()> {
        let path = post.path();
        if !post.is_persisted() {
            return Err(ContentError::InvalidArgument(
                "post has no file path".to_string(),
            ));
        }

        let document =
            post.metadata
                .to_document(&post.body)
                .map_err(|source| ContentError::Serialization {
                    path: path.to_path_buf(),
                    source,
                })?;

        tracing::debug!("Writing {} bytes to {:?}", document.len(), path);

        let written = if self.options.atomic_writes {
            write_atomic(path, &document, create_new)
        } else {
            write_in_place(path, &document, create_new)
        };

        written.map_err(|e| match e.kind() {
            io::ErrorKind::AlreadyExists if create_new => {
                ContentError::AlreadyExists(path.to_path_buf())
            }
            _ => ContentError::io(path, e),
        })
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

/// Newest first by plain string comparison of `date`, then by file name
fn sort_by_date(posts: &mut [Post]) {
    posts.sort_by(|a, b| {
        b.metadata
            .date
            .cmp(&a.metadata.date)
            .then_with(|| a.file_name.cmp(&b.file_name))
    });
}

/// A slug must name a single file inside the content directory
fn validate_slug(slug: &str) -> Result<()> {
    if slug.is_empty() {
        return Err(ContentError::InvalidArgument(
            "post needs a slug or a title that yields one".to_string(),
        ));
    }

    let mut components = Path::new(slug).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) if !slug.contains(['/', '\\']) => Ok(()),
        _ => Err(ContentError::InvalidArgument(format!(
            "slug {:?} is not a plain file name",
            slug
        ))),
    }
}

/// Truncate and rewrite the file in one pass. A failure part way through
/// leaves a partial file behind.
fn write_in_place(path: &Path, contents: &str, create_new: bool) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true);
    if create_new {
        options.create_new(true);
    } else {
        options.create(true).truncate(true);
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(FILE_MODE);
    }

    let mut file = options.open(path)?;
    file.write_all(contents.as_bytes())?;
    file.flush()
}

/// Write next to the target and rename into place
fn write_atomic(path: &Path, contents: &str, create_new: bool) -> io::Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.as_file().sync_all()?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(fs::Permissions::from_mode(FILE_MODE))?;
    }

    if create_new {
        tmp.persist_noclobber(path).map_err(|e| e.error)?;
    } else {
        tmp.persist(path).map_err(|e| e.error)?;
    }

    Ok(())
}
