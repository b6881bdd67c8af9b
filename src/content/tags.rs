//! Tag index built from a post listing

use serde::Serialize;
use std::collections::BTreeMap;

use super::Post;

/// A tag with the posts that carry it
#[derive(Debug, Clone, Serialize)]
pub struct Tag<'a> {
    pub name: String,
    /// URL-friendly form of the name
    pub slug: String,
    pub posts: Vec<&'a Post>,
}

impl Tag<'_> {
    pub fn count(&self) -> usize {
        self.posts.len()
    }
}

/// Tags of a set of posts, ordered by name.
///
/// Borrowed from the listing it was built from and meant to be rebuilt on
/// every listing rather than kept around.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TagIndex<'a> {
    tags: BTreeMap<String, Tag<'a>>,
}

impl<'a> TagIndex<'a> {
    pub fn get(&self, name: &str) -> Option<&Tag<'a>> {
        self.tags.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tag<'a>> {
        self.tags.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tags.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// Group posts by tag, keeping the order of `posts` within each tag
pub fn index_by_tag(posts: &[Post]) -> TagIndex<'_> {
    let mut tags: BTreeMap<String, Tag<'_>> = BTreeMap::new();

    for post in posts {
        for name in &post.metadata.tags {
            let tag = tags.entry(name.clone()).or_insert_with(|| Tag {
                name: name.clone(),
                slug: slug::slugify(name),
                posts: Vec::new(),
            });
            // A post listing the same tag twice is counted once
            if !tag.posts.iter().any(|p| std::ptr::eq(*p, post)) {
                tag.posts.push(post);
            }
        }
    }

    TagIndex { tags }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::FrontMatter;

    fn tagged(title: &str, tags: &[&str]) -> Post {
        Post::new(
            FrontMatter {
                title: title.to_string(),
                tags: tags.iter().map(|t| t.to_string()).collect(),
                ..Default::default()
            },
            "",
        )
    }

    #[test]
    fn test_index_by_tag() {
        let posts = vec![
            tagged("First", &["rust", "web"]),
            tagged("Second", &["rust"]),
            tagged("Third", &[]),
        ];

        let index = index_by_tag(&posts);
        assert_eq!(index.len(), 2);
        assert_eq!(index.names().collect::<Vec<_>>(), vec!["rust", "web"]);

        let rust = index.get("rust").unwrap();
        assert_eq!(rust.count(), 2);
        let titles: Vec<&str> = rust.posts.iter().map(|p| p.title()).collect();
        assert_eq!(titles, vec!["First", "Second"]);

        assert_eq!(index.get("web").unwrap().count(), 1);
        assert!(index.get("missing").is_none());
    }

    #[test]
    fn test_duplicate_tag_counted_once() {
        let posts = vec![tagged("Repeat", &["news", "news"])];
        let index = index_by_tag(&posts);
        assert_eq!(index.get("news").unwrap().count(), 1);
    }

    #[test]
    fn test_tag_slug() {
        let posts = vec![tagged("Spaced", &["Machine Learning"])];
        let index = index_by_tag(&posts);
        assert_eq!(index.get("Machine Learning").unwrap().slug, "machine-learning");
    }

    #[test]
    fn test_index_is_rebuilt_not_accumulated() {
        let posts = vec![tagged("Only", &["solo"])];
        let first = index_by_tag(&posts);
        let second = index_by_tag(&posts);
        assert_eq!(first.get("solo").unwrap().count(), 1);
        assert_eq!(second.get("solo").unwrap().count(), 1);
        assert!(index_by_tag(&[]).is_empty());
    }
}
