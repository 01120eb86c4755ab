//! Advisory checks over a parsed document.
//!
//! The parser accepts everything, so the lint pass is where questionable
//! input gets named: fences that never close, styles left open at the end of
//! a block, headings deeper than HTML can express. Nothing here changes the
//! document or fails.

use serde::{Deserialize, Serialize};

use crate::inline;
use crate::types::{Block, Document, StyleKind, Token};

/// A non-fatal finding about a parsed document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    /// 1-based source line the finding refers to.
    pub line: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// Lint a parsed document and return any diagnostics.
pub fn lint(doc: &Document) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    check_unterminated_fence(doc, &mut diagnostics);

    for block in &doc.blocks {
        check_block(block, &mut diagnostics);
    }

    if doc.blocks.is_empty() {
        diagnostics.push(Diagnostic {
            severity: Severity::Info,
            message: "Document contains no blocks".into(),
            line: 1,
            code: Some("L004".into()),
        });
    }

    diagnostics
}

/// An odd number of fence-marker lines means the last fence swallowed the
/// rest of the document.
fn check_unterminated_fence(doc: &Document, diagnostics: &mut Vec<Diagnostic>) {
    let mut open_line = None;
    for (idx, line) in doc.source.lines().enumerate() {
        if line.starts_with("```") {
            open_line = match open_line {
                None => Some(idx + 1),
                Some(_) => None,
            };
        }
    }
    if let Some(line) = open_line {
        diagnostics.push(Diagnostic {
            severity: Severity::Warning,
            message: "Code fence is never closed; it runs to the end of the document".into(),
            line,
            code: Some("L001".into()),
        });
    }
}

fn check_block(block: &Block, diagnostics: &mut Vec<Diagnostic>) {
    match block {
        Block::Heading { level, span, .. } if *level > 6 => {
            diagnostics.push(Diagnostic {
                severity: Severity::Warning,
                message: format!("Heading level {level} is deeper than h6; HTML output clamps it"),
                line: span.start_line,
                code: Some("L003".into()),
            });
        }
        Block::Paragraph { text, styled, span }
        | Block::ListItem { text, styled, span, .. } => {
            let open = open_styles(styled.as_deref(), text);
            if !open.is_empty() {
                let names: Vec<&str> = open.iter().map(|k| k.name()).collect();
                diagnostics.push(Diagnostic {
                    severity: Severity::Warning,
                    message: format!(
                        "Unterminated {} span; the renderer closes it at the end of the block",
                        names.join(", "),
                    ),
                    line: span.start_line,
                    code: Some("L002".into()),
                });
            }
        }
        _ => {}
    }
}

/// Styles still open after folding a block's token stream, in open order.
fn open_styles(styled: Option<&[Token]>, text: &str) -> Vec<StyleKind> {
    let fallback;
    let tokens = match styled {
        Some(tokens) => tokens,
        None => {
            fallback = inline::tokenize(text);
            &fallback
        }
    };

    let mut open: Vec<StyleKind> = Vec::new();
    for token in tokens {
        if let Token::Toggle(kind) = token {
            if let Some(pos) = open.iter().position(|k| k == kind) {
                open.remove(pos);
            } else {
                open.push(*kind);
            }
        }
    }
    open
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse;
    use pretty_assertions::assert_eq;

    fn codes(diags: &[Diagnostic]) -> Vec<&str> {
        diags.iter().filter_map(|d| d.code.as_deref()).collect()
    }

    #[test]
    fn clean_document_yields_nothing() {
        let doc = parse("= Title\n\nStyling *closes*.\n\n```\nx\n```\n");
        let diags = lint(&doc);
        assert!(diags.is_empty(), "expected no diagnostics, got: {diags:?}");
    }

    #[test]
    fn unterminated_fence_flagged_at_its_opening_line() {
        let doc = parse("fine\n\n```rust\nfn main() {}\n");
        let diags = lint(&doc);
        assert_eq!(codes(&diags), vec!["L001"]);
        assert_eq!(diags[0].line, 3);
        assert_eq!(diags[0].severity, Severity::Warning);
    }

    #[test]
    fn reopened_fence_after_a_closed_one_still_flagged() {
        let doc = parse("```\na\n```\n\n```\nb\n");
        let diags = lint(&doc);
        assert_eq!(codes(&diags), vec!["L001"]);
        assert_eq!(diags[0].line, 5);
    }

    #[test]
    fn unterminated_style_flagged_with_its_name() {
        let doc = parse("an *open marker runs on\n");
        let diags = lint(&doc);
        assert_eq!(codes(&diags), vec!["L002"]);
        assert!(diags[0].message.contains("bold"), "got: {}", diags[0].message);
    }

    #[test]
    fn multiple_open_styles_named_in_open_order() {
        let doc = parse("both *bold and /italic stay open\n");
        let diags = lint(&doc);
        assert_eq!(codes(&diags), vec!["L002"]);
        assert!(diags[0].message.contains("bold, italic"), "got: {}", diags[0].message);
    }

    #[test]
    fn balanced_styles_pass() {
        let doc = parse("all /fine/, both toggles land.\n");
        assert!(lint(&doc).is_empty());
    }

    #[test]
    fn open_style_in_list_item_flagged() {
        let doc = parse("- a ~dangling strike\n");
        let diags = lint(&doc);
        assert_eq!(codes(&diags), vec!["L002"]);
        assert!(diags[0].message.contains("strikethrough"));
    }

    #[test]
    fn deep_heading_flagged() {
        let doc = parse("======= Too deep\n");
        let diags = lint(&doc);
        assert_eq!(codes(&diags), vec!["L003"]);
        assert!(diags[0].message.contains('7'));
    }

    #[test]
    fn six_levels_is_still_fine() {
        let doc = parse("====== At the limit\n");
        assert!(lint(&doc).is_empty());
    }

    #[test]
    fn empty_document_reported_as_info() {
        let diags = lint(&parse(""));
        assert_eq!(codes(&diags), vec!["L004"]);
        assert_eq!(diags[0].severity, Severity::Info);
        assert_eq!(diags[0].line, 1);
    }

    #[test]
    fn line_numbers_point_at_the_block_start() {
        let doc = parse("fine here\n\n*left open\n");
        let diags = lint(&doc);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].line, 3);
    }
}
