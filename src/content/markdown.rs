//! Markdown rendering with syntax highlighting

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use super::toc::{heading_id, IdAllocator, TocItem};
use crate::config::BlogConfig;

/// Rendered post body
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub html: String,
    pub toc: Vec<TocItem>,
}

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
    highlight: bool,
    line_numbers: bool,
    toc_max_depth: u8,
}

/// A heading whose inner events are being buffered until its text is known
struct PendingHeading<'a> {
    level: HeadingLevel,
    id: Option<CowStr<'a>>,
    classes: Vec<CowStr<'a>>,
    attrs: Vec<(CowStr<'a>, Option<CowStr<'a>>)>,
    text: String,
    events: Vec<Event<'a>>,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self::with_options("base16-ocean.dark", false)
    }

    /// Create with custom settings
    pub fn with_options(theme: &str, line_numbers: bool) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: theme.to_string(),
            highlight: true,
            line_numbers,
            toc_max_depth: 6,
        }
    }

    /// Create from the blog configuration
    pub fn from_config(config: &BlogConfig) -> Self {
        let mut renderer =
            Self::with_options(&config.highlight.theme, config.highlight.line_number);
        renderer.highlight = config.highlight.enable;
        renderer.toc_max_depth = config.toc.max_depth.clamp(1, 6);
        renderer
    }

    /// Render markdown to HTML, collecting headings for the table of contents
    pub fn render(&self, markdown: &str) -> Rendered {
        // YAML metadata blocks stay off; front-matter is stripped before rendering
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_SMART_PUNCTUATION
            | Options::ENABLE_HEADING_ATTRIBUTES
            | Options::ENABLE_GFM;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        let mut toc = Vec::new();
        let mut ids = IdAllocator::default();
        let mut code_block: Option<(Option<String>, String)> = None;
        let mut heading: Option<PendingHeading> = None;

        for event in parser {
            if let Some((_, source)) = code_block.as_mut() {
                match event {
                    Event::Text(text) => source.push_str(&text),
                    Event::End(TagEnd::CodeBlock) => {
                        if let Some((lang, source)) = code_block.take() {
                            let highlighted = self.highlight_code(&source, lang.as_deref());
                            events.push(Event::Html(CowStr::from(highlighted)));
                        }
                    }
                    _ => {}
                }
                continue;
            }

            if heading.is_some() {
                match event {
                    Event::End(TagEnd::Heading(_)) => {
                        if let Some(pending) = heading.take() {
                            self.finish_heading(pending, &mut events, &mut toc, &mut ids);
                        }
                    }
                    other => {
                        if let Some(pending) = heading.as_mut() {
                            if let Event::Text(text) | Event::Code(text) = &other {
                                pending.text.push_str(text);
                            }
                            pending.events.push(other);
                        }
                    }
                }
                continue;
            }

            match event {
                Event::Start(Tag::CodeBlock(kind)) if self.highlight => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(lang) => {
                            // Info strings may carry attributes after the language
                            let lang = lang.split_whitespace().next().unwrap_or("").to_string();
                            (!lang.is_empty()).then_some(lang)
                        }
                        CodeBlockKind::Indented => None,
                    };
                    code_block = Some((lang, String::new()));
                }
                Event::Start(Tag::Heading {
                    level,
                    id,
                    classes,
                    attrs,
                }) => {
                    heading = Some(PendingHeading {
                        level,
                        id,
                        classes,
                        attrs,
                        text: String::new(),
                        events: Vec::new(),
                    });
                }
                other => events.push(other),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        Rendered {
            html: html_output,
            toc,
        }
    }

    /// Emit a buffered heading with an anchor id and record it in the TOC
    fn finish_heading<'a>(
        &self,
        pending: PendingHeading<'a>,
        events: &mut Vec<Event<'a>>,
        toc: &mut Vec<TocItem>,
        ids: &mut IdAllocator,
    ) {
        let text = pending.text.trim().to_string();
        let id = match pending.id {
            Some(explicit) => ids.allocate(explicit.to_string()),
            None => ids.allocate(heading_id(&text)),
        };

        let level = pending.level as u8;
        if level <= self.toc_max_depth && !text.is_empty() {
            toc.push(TocItem {
                id: id.clone(),
                text,
                level,
            });
        }

        events.push(Event::Start(Tag::Heading {
            level: pending.level,
            id: Some(CowStr::from(id)),
            classes: pending.classes,
            attrs: pending.attrs,
        }));
        events.extend(pending.events);
        events.push(Event::End(TagEnd::Heading(pending.level)));
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");

        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = self
            .theme_set
            .themes
            .get(&self.theme_name)
            .or_else(|| self.theme_set.themes.values().next());

        let highlighted = theme.and_then(|theme| {
            highlighted_html_for_string(code, &self.syntax_set, syntax, theme).ok()
        });

        match highlighted {
            Some(highlighted) if self.line_numbers => self.add_line_numbers(&highlighted, lang),
            Some(highlighted) => format!(r#"<figure class="highlight {}">{}</figure>"#, lang, highlighted),
            None => format!(
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                lang,
                html_escape(code)
            ),
        }
    }

    /// Add line numbers to highlighted code
    fn add_line_numbers(&self, code: &str, lang: &str) -> String {
        let lines: Vec<&str> = code.lines().collect();

        let gutter = (1..=lines.len())
            .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code">{}</td></tr></table></figure>"#,
            lang,
            gutter,
            lines.join("\n")
        )
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let rendered = renderer.render("# Hello World\n\nThis is a test.");
        assert!(rendered.html.contains(r#"<h1 id="hello-world">Hello World</h1>"#));
        assert!(rendered.html.contains("<p>This is a test.</p>"));
    }

    #[test]
    fn test_render_code_block() {
        let renderer = MarkdownRenderer::new();
        let rendered = renderer.render("```rust\nfn main() {}\n```");
        assert!(rendered.html.contains("highlight rust"));
        assert!(!rendered.html.contains("```"));
    }

    #[test]
    fn test_render_without_highlight() {
        let mut config = BlogConfig::default();
        config.highlight.enable = false;
        let renderer = MarkdownRenderer::from_config(&config);
        let rendered = renderer.render("```rust\nfn main() {}\n```");
        assert!(rendered.html.contains(r#"<code class="language-rust">"#));
    }

    #[test]
    fn test_toc_collects_headings() {
        let renderer = MarkdownRenderer::new();
        let markdown = "# Intro\n\ntext\n\n## Setup `cargo`\n\n### Intro\n\n```sh\n# not a heading\n```\n";
        let rendered = renderer.render(markdown);

        let ids: Vec<_> = rendered.toc.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["intro", "setup-cargo", "intro-1"]);
        assert_eq!(rendered.toc[1].text, "Setup cargo");
        assert_eq!(rendered.toc[1].level, 2);
        assert!(rendered.html.contains(r#"<h3 id="intro-1">Intro</h3>"#));
    }

    #[test]
    fn test_toc_respects_max_depth() {
        let mut config = BlogConfig::default();
        config.toc.max_depth = 2;
        let renderer = MarkdownRenderer::from_config(&config);
        let rendered = renderer.render("# A\n\n## B\n\n### C\n");
        assert_eq!(rendered.toc.len(), 2);
        // Deeper headings still get anchors
        assert!(rendered.html.contains(r#"<h3 id="c">C</h3>"#));
    }

    #[test]
    fn test_explicit_heading_id() {
        let renderer = MarkdownRenderer::new();
        let rendered = renderer.render("## Custom {#my-anchor}\n");
        assert_eq!(rendered.toc[0].id, "my-anchor");
        assert_eq!(rendered.toc[0].text, "Custom");
    }

    #[test]
    fn test_cjk_heading() {
        let renderer = MarkdownRenderer::new();
        let rendered = renderer.render("## 邊緣 AI 工作流程\n");
        assert_eq!(rendered.toc[0].id, "邊緣-ai-工作流程");
    }

    #[test]
    fn test_heading_ids_are_unique() {
        let renderer = MarkdownRenderer::new();
        let rendered = renderer.render("# Intro\n\n# Intro\n\n# Intro 1\n");
        let ids: Vec<_> = rendered.toc.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["intro", "intro-1", "intro-1-1"]);
    }
}
