//! HTML fragment renderer.
//!
//! Paragraph and list-item text flows through the style-toggle machine; the
//! remaining block kinds are mechanical mappings. Every literal character is
//! HTML-escaped on the way out.

use crate::inline;
use crate::types::{Block, Document, StyleKind, Token};

/// Configuration for standalone page rendering.
#[derive(Debug, Clone, Default)]
pub struct PageConfig {
    /// Page title. Defaults to "Etch document".
    pub title: Option<String>,
    /// Language code for the `<html>` element (default: "en").
    pub lang: Option<String>,
}

/// Render a document as an HTML fragment.
///
/// One element per block, newline-joined. Runs of adjacent list items that
/// agree on `ordered` share a `<ul>` or `<ol>` wrapper; any other block kind
/// closes the open wrapper.
pub fn to_html(doc: &Document) -> String {
    let mut parts: Vec<String> = Vec::new();
    let mut open_list: Option<bool> = None;

    for block in &doc.blocks {
        match block {
            Block::ListItem { ordered, .. } => {
                if open_list != Some(*ordered) {
                    if let Some(prev) = open_list.take() {
                        parts.push(list_close(prev).to_string());
                    }
                    parts.push(list_open(*ordered).to_string());
                    open_list = Some(*ordered);
                }
                parts.push(render_block(block));
            }
            _ => {
                if let Some(prev) = open_list.take() {
                    parts.push(list_close(prev).to_string());
                }
                let fragment = render_block(block);
                if !fragment.is_empty() {
                    parts.push(fragment);
                }
            }
        }
    }
    if let Some(prev) = open_list.take() {
        parts.push(list_close(prev).to_string());
    }

    parts.join("\n")
}

/// Render one block as an HTML fragment. List items come out as bare `<li>`
/// elements; [`to_html`] adds the surrounding wrapper.
pub fn render_block(block: &Block) -> String {
    match block {
        Block::Paragraph { text, styled, .. } => {
            format!("<p>{}</p>", styled_fragment(styled.as_deref(), text))
        }
        Block::Heading { level, text, .. } => {
            let depth = (*level).min(6);
            format!("<h{depth}>{}</h{depth}>", escape_html(text))
        }
        Block::Code { language, text, .. } => {
            let class = match language {
                Some(lang) => format!(" class=\"language-{}\"", escape_html(lang)),
                None => String::new(),
            };
            format!(
                "<pre class=\"etch-code\"><code{class}>{}</code></pre>",
                escape_html(text)
            )
        }
        Block::LineBreak { .. } => String::new(),
        Block::ListItem { level, text, styled, .. } => {
            let depth = match level {
                0 => String::new(),
                d => format!(" data-level=\"{d}\""),
            };
            format!("<li{depth}>{}</li>", styled_fragment(styled.as_deref(), text))
        }
    }
}

/// Inline fragment for a textual block, tokenizing on the fly when the block
/// was built without the inline pass.
fn styled_fragment(styled: Option<&[Token]>, text: &str) -> String {
    match styled {
        Some(tokens) => render_styled(tokens),
        None => render_styled(&inline::tokenize(text)),
    }
}

/// Drive the style-toggle state machine over a token stream.
///
/// Styles toggle independently and may overlap without nesting; each closing
/// tag matches its own style, not the innermost open one. Anything still
/// open at the end of the stream is closed in reverse open order so the
/// fragment stays well-formed.
pub fn render_styled(tokens: &[Token]) -> String {
    let mut out = String::new();
    let mut open: Vec<StyleKind> = Vec::new();

    for token in tokens {
        match token {
            Token::Literal('\n') => out.push(' '),
            Token::Literal(c) => push_escaped(&mut out, *c),
            Token::Toggle(kind) => {
                if let Some(pos) = open.iter().position(|k| k == kind) {
                    open.remove(pos);
                    out.push_str(&format!("</{}>", style_tag(*kind)));
                } else {
                    open.push(*kind);
                    out.push_str(&format!("<{}>", style_tag(*kind)));
                }
            }
            Token::ParagraphBreak => {
                close_open_styles(&mut out, &mut open);
                out.push_str("</p>\n<p>");
            }
        }
    }

    close_open_styles(&mut out, &mut open);
    out
}

fn close_open_styles(out: &mut String, open: &mut Vec<StyleKind>) {
    while let Some(kind) = open.pop() {
        out.push_str(&format!("</{}>", style_tag(kind)));
    }
}

fn style_tag(kind: StyleKind) -> &'static str {
    match kind {
        StyleKind::Bold => "b",
        StyleKind::Italic => "i",
        StyleKind::Underline => "u",
        StyleKind::Strikethrough => "s",
        StyleKind::InlineCode => "code",
    }
}

fn list_open(ordered: bool) -> &'static str {
    if ordered { "<ol class=\"etch-list\">" } else { "<ul class=\"etch-list\">" }
}

fn list_close(ordered: bool) -> &'static str {
    if ordered { "</ol>" } else { "</ul>" }
}

/// Escape HTML special characters to prevent XSS.
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn push_escaped(out: &mut String, c: char) {
    match c {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '"' => out.push_str("&quot;"),
        _ => out.push(c),
    }
}

/// Render a document as a complete standalone HTML page with embedded CSS.
pub fn to_html_page(doc: &Document, config: &PageConfig) -> String {
    let body = to_html(doc);
    let lang = config.lang.as_deref().unwrap_or("en");
    let title = config.title.as_deref().unwrap_or("Etch document");

    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <meta name="generator" content="etch">
    <title>{title}</title>
    <style>{css}</style>
</head>
<body>
<article class="etch">
{body}
</article>
</body>
</html>"#,
        lang = escape_html(lang),
        title = escape_html(title),
        css = ETCH_CSS,
        body = body,
    )
}

/// Embedded stylesheet for standalone pages.
const ETCH_CSS: &str = r#"
:root {
    --bg: #fdfdfc;
    --text: #1a1a1a;
    --rule: #e3e1dc;
    --code-bg: #f4f2ee;
}

* { box-sizing: border-box; }
body { background: var(--bg); color: var(--text); font-family: Georgia, "Times New Roman", serif; margin: 0; }
.etch { max-width: 42rem; margin: 0 auto; padding: 2.5rem 1.25rem 4rem; line-height: 1.65; }
.etch h1, .etch h2, .etch h3, .etch h4, .etch h5, .etch h6 { font-family: -apple-system, "Segoe UI", Helvetica, sans-serif; letter-spacing: -0.01em; margin: 1.75rem 0 0.5rem; }
.etch h1 { font-size: 1.9rem; border-bottom: 1px solid var(--rule); padding-bottom: 0.4rem; }
.etch h2 { font-size: 1.5rem; }
.etch h3 { font-size: 1.2rem; }
.etch p { margin: 0.75rem 0; }
.etch u { text-underline-offset: 2px; }
.etch code { font-family: "SF Mono", Menlo, Consolas, monospace; font-size: 0.88em; background: var(--code-bg); padding: 0.1em 0.35em; border-radius: 3px; }
.etch pre.etch-code { background: var(--code-bg); border: 1px solid var(--rule); border-radius: 6px; padding: 0.9rem 1rem; overflow-x: auto; }
.etch pre.etch-code code { background: transparent; padding: 0; }
.etch ul.etch-list, .etch ol.etch-list { margin: 0.5rem 0; padding-left: 1.6rem; }
.etch li { margin: 0.25rem 0; }
.etch li[data-level="1"] { margin-left: 1.25rem; }
.etch li[data-level="2"] { margin-left: 2.5rem; }
"#;
