//! Markdown rendering with syntax highlighting

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;
use thiserror::Error;

use crate::config::HighlightConfig;

/// Failure to turn a markdown body into HTML
#[derive(Error, Debug)]
#[error("{message}")]
pub struct RenderError {
    message: String,
}

impl RenderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Converts a post body into display HTML
pub trait Renderer: Send + Sync {
    fn render(&self, markdown: &str) -> Result<String, RenderError>;
}

/// pulldown-cmark renderer with optional syntect highlighting of fenced code
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
    highlight: bool,
    line_numbers: bool,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self::with_config(&HighlightConfig::default())
    }

    /// Create from the highlight section of the site config
    pub fn with_config(config: &HighlightConfig) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: config.theme.clone(),
            highlight: config.enable,
            line_numbers: config.line_number,
        }
    }

    fn theme(&self) -> Result<&Theme, RenderError> {
        self.theme_set
            .themes
            .get(&self.theme_name)
            .ok_or_else(|| RenderError::new(format!("unknown highlight theme `{}`", self.theme_name)))
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> Result<String, RenderError> {
        // Only the first word of the info string names the language
        let lang = lang
            .and_then(|info| info.split_whitespace().next())
            .unwrap_or("text");

        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let highlighted = highlighted_html_for_string(code, &self.syntax_set, syntax, self.theme()?)
            .map_err(|e| RenderError::new(format!("failed to highlight {} code: {}", lang, e)))?;

        let class = html_escape(lang);
        if self.line_numbers {
            Ok(add_line_numbers(&highlighted, &class))
        } else {
            Ok(format!(
                r#"<figure class="highlight {}">{}</figure>"#,
                class, highlighted
            ))
        }
    }
}

impl Renderer for MarkdownRenderer {
    fn render(&self, markdown: &str) -> Result<String, RenderError> {
        // Front matter is split off before rendering, so no metadata blocks here
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_SMART_PUNCTUATION
            | Options::ENABLE_HEADING_ATTRIBUTES;
        let parser = Parser::new_ext(markdown, options);

        if !self.highlight {
            let mut html_output = String::new();
            html::push_html(&mut html_output, parser);
            return Ok(html_output);
        }

        let mut events: Vec<Event> = Vec::new();
        let mut code_block: Option<(Option<String>, String)> = None;

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.to_string()),
                        _ => None,
                    };
                    code_block = Some((lang, String::new()));
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some((lang, code)) = code_block.take() {
                        let highlighted = self.highlight_code(&code, lang.as_deref())?;
                        events.push(Event::Html(CowStr::from(highlighted)));
                    }
                }
                Event::Text(text) => match code_block.as_mut() {
                    Some((_, code)) => code.push_str(&text),
                    None => events.push(Event::Text(text)),
                },
                other => events.push(other),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        Ok(html_output)
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Simple HTML escaping
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Wrap highlighted code in a gutter table; `class` must already be escaped
fn add_line_numbers(code: &str, class: &str) -> String {
    let lines: Vec<&str> = code.lines().collect();

    let gutter = (1..=lines.len())
        .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code">{}</td></tr></table></figure>"#,
        class,
        gutter,
        lines.join("\n")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# Hello World\n\nThis is a test.").unwrap();
        assert!(html.contains("<h1>Hello World</h1>"));
        assert!(html.contains("<p>This is a test.</p>"));
    }

    #[test]
    fn test_render_code_block() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```rust\nfn main() {}\n```").unwrap();
        assert!(html.contains("highlight rust"));
        assert!(html.contains("main"));
        assert!(!html.contains("```"));
    }

    #[test]
    fn test_render_without_highlighting() {
        let renderer = MarkdownRenderer::with_config(&HighlightConfig {
            enable: false,
            ..Default::default()
        });
        let html = renderer.render("```rust\nfn main() {}\n```").unwrap();
        assert!(html.contains(r#"<code class="language-rust">"#));
    }

    #[test]
    fn test_line_numbers() {
        let renderer = MarkdownRenderer::with_config(&HighlightConfig {
            line_number: true,
            ..Default::default()
        });
        let html = renderer.render("```\none\ntwo\n```").unwrap();
        assert!(html.contains(r#"<span class="line-number">2</span>"#));
    }

    #[test]
    fn test_code_block_info_string_attributes() {
        let renderer = MarkdownRenderer::new();
        let html = renderer
            .render("```rust {.x}\"oops\nfn main() {}\n```")
            .unwrap();
        assert!(html.contains(r#"<figure class="highlight rust">"#));
        assert!(!html.contains("oops"));

        let numbered = MarkdownRenderer::with_config(&HighlightConfig {
            line_number: true,
            ..Default::default()
        });
        let html = numbered.render("```a\"b<c\ncode\n```").unwrap();
        assert!(html.contains(r#"<figure class="highlight a&quot;b&lt;c">"#));
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_unknown_theme_is_render_error() {
        let renderer = MarkdownRenderer::with_config(&HighlightConfig {
            theme: "no-such-theme".to_string(),
            ..Default::default()
        });

        // Plain prose never touches the highlighter
        assert!(renderer.render("just text").is_ok());

        let err = renderer.render("```\ncode\n```").unwrap_err();
        assert!(err.to_string().contains("no-such-theme"));
    }
}
