//! Markdown to HTML conversion

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use crate::config::HighlightConfig;
use crate::error::Result;

/// Converts post bodies to HTML, highlighting fenced code blocks
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    config: HighlightConfig,
}

/// A fenced code block being accumulated during the event walk
struct CodeBlock {
    lang: Option<String>,
    code: String,
}

impl MarkdownRenderer {
    /// Create a renderer with the given highlighting settings
    pub fn new(config: HighlightConfig) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            config,
        }
    }

    /// Render a Markdown body to an HTML string
    pub fn render(&self, markdown: &str) -> Result<String> {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        let mut current: Option<CodeBlock> = None;

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) if self.config.enable => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.to_string()),
                        _ => None,
                    };
                    current = Some(CodeBlock {
                        lang,
                        code: String::new(),
                    });
                }
                Event::Text(text) if current.is_some() => {
                    if let Some(block) = current.as_mut() {
                        block.code.push_str(&text);
                    }
                }
                Event::End(TagEnd::CodeBlock) if current.is_some() => {
                    let block = current.take().unwrap_or(CodeBlock {
                        lang: None,
                        code: String::new(),
                    });
                    let highlighted = self.highlight(&block)?;
                    events.push(Event::Html(CowStr::from(highlighted)));
                }
                other if current.is_none() => events.push(other),
                // Non-text events inside a code block (shouldn't occur) are dropped.
                _ => {}
            }
        }

        let mut out = String::new();
        html::push_html(&mut out, events.into_iter());
        Ok(out)
    }

    fn highlight(&self, block: &CodeBlock) -> Result<String> {
        let lang = block.lang.as_deref().unwrap_or("text");
        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let html = highlighted_html_for_string(&block.code, &self.syntax_set, syntax, self.theme())?;

        if self.config.line_numbers {
            Ok(with_line_gutter(&html, lang))
        } else {
            Ok(format!(
                r#"<div class="highlight language-{}">{}</div>"#,
                lang, html
            ))
        }
    }

    fn theme(&self) -> &Theme {
        self.theme_set
            .themes
            .get(&self.config.theme)
            .unwrap_or_else(|| {
                self.theme_set
                    .themes
                    .values()
                    .next()
                    .expect("syntect default themes are never empty")
            })
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new(HighlightConfig::default())
    }
}

/// Wrap highlighted code in a table with a line-number gutter
fn with_line_gutter(code: &str, lang: &str) -> String {
    let line_count = code.lines().count().max(1);
    let gutter: Vec<String> = (1..=line_count)
        .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
        .collect();

    format!(
        r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code">{}</td></tr></table></figure>"#,
        lang,
        gutter.join("\n"),
        code
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_paragraph() {
        let renderer = MarkdownRenderer::default();
        let html = renderer.render("Hello, *world*.").unwrap();
        assert!(html.contains("<p>Hello, <em>world</em>.</p>"));
    }

    #[test]
    fn test_render_heading_and_list() {
        let renderer = MarkdownRenderer::default();
        let html = renderer.render("# Title\n\n- one\n- two\n").unwrap();
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<li>one</li>"));
    }

    #[test]
    fn test_highlighted_code_block() {
        let renderer = MarkdownRenderer::default();
        let html = renderer.render("```rust\nfn main() {}\n```").unwrap();
        assert!(html.contains("highlight"));
        assert!(html.contains("language-rust"));
    }

    #[test]
    fn test_highlighting_disabled() {
        let config = HighlightConfig {
            enable: false,
            ..Default::default()
        };
        let renderer = MarkdownRenderer::new(config);
        let html = renderer.render("```rust\nfn main() {}\n```").unwrap();
        assert!(html.contains("<pre><code"));
        assert!(!html.contains("<figure"));
    }

    #[test]
    fn test_line_gutter() {
        let config = HighlightConfig {
            line_numbers: true,
            ..Default::default()
        };
        let renderer = MarkdownRenderer::new(config);
        let html = renderer.render("```\na\nb\n```").unwrap();
        assert!(html.contains(r#"class="gutter""#));
        assert!(html.contains(r#"<span class="line-number">1</span>"#));
    }

    #[test]
    fn test_gfm_table() {
        let renderer = MarkdownRenderer::default();
        let html = renderer.render("| a | b |\n|---|---|\n| 1 | 2 |\n").unwrap();
        assert!(html.contains("<table>"));
    }
}
