//! Content module - posts, front matter and the content repository

mod error;
mod frontmatter;
mod markdown;
mod post;
pub mod repository;
mod slug;
mod tags;

pub use error::{ContentError, Result};
pub use frontmatter::{FrontMatter, FrontMatterError, DELIMITER};
pub use markdown::{MarkdownRenderer, RenderError, Renderer};
pub use post::Post;
pub use repository::{ContentRepository, RepositoryOptions};
pub use self::slug::slugify;
pub use tags::{index_by_tag, Tag, TagIndex};
