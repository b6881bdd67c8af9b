//! Slug derivation for post file names

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SPACE_RUN: Regex = Regex::new(r" +").unwrap();
}

/// Derive a file-name-safe identifier from a post title.
///
/// Lower-cases the title, turns each run of spaces into a single hyphen and
/// then drops everything outside `[a-z0-9-]`. Hyphens left next to each other
/// by dropped characters are kept, so `"a @ b"` becomes `"a--b"`.
/// An empty title gives an empty slug.
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    SPACE_RUN
        .replace_all(&lowered, "-")
        .chars()
        .filter(|c| matches!(c, 'a'..='z' | '0'..='9' | '-'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_examples() {
        let cases = [
            ("Simple Title", "simple-title"),
            ("Title With Numbers 123", "title-with-numbers-123"),
            ("UPPERCASE TITLE", "uppercase-title"),
            ("Title-With-Hyphens", "title-with-hyphens"),
            ("Hello World!", "hello-world"),
            ("Post With Special Characters!@#$%", "post-with-special-characters"),
            ("", ""),
        ];
        for (title, expected) in cases {
            assert_eq!(slugify(title), expected, "title: {:?}", title);
        }
    }

    #[test]
    fn test_stripped_characters_leave_double_hyphen() {
        assert_eq!(
            slugify("Title With Special @#$% Characters"),
            "title-with-special--characters"
        );
    }

    #[test]
    fn test_space_runs_collapse() {
        assert_eq!(slugify("too   many    spaces"), "too-many-spaces");
        assert_eq!(slugify(" padded "), "-padded-");
    }

    #[test]
    fn test_non_ascii_dropped() {
        assert_eq!(slugify("Café Crème"), "caf-crme");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_slugify_is_deterministic() {
        let title = "Same Input, Same Output";
        assert_eq!(slugify(title), slugify(title));
    }
}
