//! ANSI terminal renderer.
//!
//! Colored plain-text preview via the `colored` crate. Inline literals
//! accumulate into runs until the open-style set changes, then each run is
//! printed with every open style applied at once.

use colored::Colorize;

use crate::inline;
use crate::types::{Block, Document, StyleKind, Token};

/// Render a document as ANSI-colored terminal text.
pub fn to_terminal(doc: &Document) -> String {
    let mut parts: Vec<String> = Vec::new();
    let mut ordinal = 0usize;

    for block in &doc.blocks {
        // Ordered items number a contiguous run; anything else resets it.
        if matches!(block, Block::ListItem { ordered: true, .. }) {
            ordinal += 1;
        } else {
            ordinal = 0;
        }
        parts.push(render_block(block, ordinal));
    }

    parts.join("\n")
}

fn render_block(block: &Block, ordinal: usize) -> String {
    match block {
        Block::Paragraph { text, styled, .. } => styled_line(styled.as_deref(), text),

        Block::Heading { level, text, .. } => {
            let rule = "=".repeat(*level);
            let title = if *level == 1 {
                format!("{}", text.bold().underline())
            } else {
                format!("{}", text.bold())
            };
            format!("{} {title}", rule.dimmed())
        }

        Block::Code { language, text, .. } => {
            let label = match language {
                Some(lang) => format!(" {}", lang.dimmed()),
                None => String::new(),
            };
            let border = format!("{}", "\u{2500}\u{2500}\u{2500}".dimmed()); // ───
            let mut lines = vec![format!("{border}{label}")];
            for line in text.lines() {
                lines.push(format!("  {line}"));
            }
            lines.push(border);
            lines.join("\n")
        }

        Block::LineBreak { .. } => String::new(),

        Block::ListItem { level, ordered, text, styled, .. } => {
            let indent = "  ".repeat(*level);
            let marker = if *ordered {
                format!("{}", format!("{ordinal}.").bold())
            } else {
                format!("{}", "\u{2022}".bold()) // •
            };
            format!("{indent}{marker} {}", styled_line(styled.as_deref(), text))
        }
    }
}

fn styled_line(styled: Option<&[Token]>, text: &str) -> String {
    match styled {
        Some(tokens) => render_styled(tokens),
        None => render_styled(&inline::tokenize(text)),
    }
}

/// Render an inline token stream with ANSI styling.
fn render_styled(tokens: &[Token]) -> String {
    let mut out = String::new();
    let mut run = String::new();
    let mut open: Vec<StyleKind> = Vec::new();

    for token in tokens {
        match token {
            Token::Literal('\n') => run.push(' '),
            Token::Literal(c) => run.push(*c),
            Token::Toggle(kind) => {
                flush_run(&mut out, &mut run, &open);
                if let Some(pos) = open.iter().position(|k| k == kind) {
                    open.remove(pos);
                } else {
                    open.push(*kind);
                }
            }
            Token::ParagraphBreak => {
                flush_run(&mut out, &mut run, &open);
                open.clear();
                out.push_str("\n\n");
            }
        }
    }
    flush_run(&mut out, &mut run, &open);
    out
}

/// Flush the pending literal run with every open style applied to it.
fn flush_run(out: &mut String, run: &mut String, open: &[StyleKind]) {
    if run.is_empty() {
        return;
    }
    let mut styled = run.as_str().normal();
    for kind in open {
        styled = match kind {
            StyleKind::Bold => styled.bold(),
            StyleKind::Italic => styled.italic(),
            StyleKind::Underline => styled.underline(),
            StyleKind::Strikethrough => styled.strikethrough(),
            StyleKind::InlineCode => styled.yellow(),
        };
    }
    out.push_str(&format!("{styled}"));
    run.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse;

    #[test]
    fn styled_run_carries_ansi_codes() {
        colored::control::set_override(true);
        let doc = parse("*bold*.");
        let output = to_terminal(&doc);
        assert!(output.contains("\x1b["), "expected ANSI escapes, got: {output:?}");
        assert!(output.contains("bold"));
        colored::control::unset_override();
    }

    #[test]
    fn ordered_items_are_numbered() {
        let doc = parse("+ first\n+ second\n+ third\n");
        let output = to_terminal(&doc);
        assert!(output.contains("1."), "got: {output}");
        assert!(output.contains("2."));
        assert!(output.contains("3."));
    }

    #[test]
    fn numbering_restarts_after_interruption() {
        let doc = parse("+ first\n\n+ again\n");
        let output = to_terminal(&doc);
        assert!(!output.contains("2."), "numbering should restart, got: {output}");
    }

    #[test]
    fn unordered_items_use_bullets() {
        let doc = parse("- apples\n- pears\n");
        let output = to_terminal(&doc);
        assert_eq!(output.matches('\u{2022}').count(), 2);
    }

    #[test]
    fn nested_items_are_indented() {
        let doc = parse("- outer\n  - inner\n");
        let output = to_terminal(&doc);
        let indented = output
            .lines()
            .any(|line| line.starts_with("  ") && line.contains('\u{2022}'));
        assert!(indented, "got: {output:?}");
    }

    #[test]
    fn code_block_is_bordered_and_indented() {
        let doc = parse("```sh\necho hi\n```\n");
        let output = to_terminal(&doc);
        assert!(output.contains('\u{2500}'));
        assert!(output.contains("sh"));
        assert!(output.contains("  echo hi"));
    }

    #[test]
    fn heading_keeps_its_marker_run() {
        let doc = parse("== Section name\n");
        let output = to_terminal(&doc);
        assert!(output.contains("=="));
        assert!(output.contains("Section name"));
    }

    #[test]
    fn blank_lines_come_out_blank() {
        let doc = parse("one\n\ntwo\n");
        let output = to_terminal(&doc);
        assert!(output.contains("one\n\ntwo"), "got: {output:?}");
    }

    #[test]
    fn wrapped_paragraph_joins_with_spaces() {
        let doc = parse("first half\nsecond half\n");
        let output = to_terminal(&doc);
        assert!(output.contains("first half second half"));
    }
}
