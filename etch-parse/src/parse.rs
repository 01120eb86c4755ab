//! Document parsing: line scan, block dispatch, and the inline pass.

use crate::blocks::{classify_list_prefix, parse_code_fence, parse_heading, parse_list_item};
use crate::inline;
use crate::types::{Block, Document, Span};

/// Parse Etch source text into a [`Document`].
///
/// This function never fails: every line classifies as some block, malformed
/// constructs degrade to their most literal reading, and an unterminated
/// fence closes at end of input.
pub fn parse(input: &str) -> Document {
    // Normalise CRLF → LF.
    let normalised = input.replace("\r\n", "\n");
    let lines: Vec<&str> = normalised.lines().collect();

    // ---------------------------------------------------------------
    // Pass 1: segment lines into blocks.
    // ---------------------------------------------------------------
    let blocks = segment(&lines);

    // ---------------------------------------------------------------
    // Pass 2: tokenize inline styling for textual blocks.
    // ---------------------------------------------------------------
    let blocks = blocks.into_iter().map(attach_styles).collect();

    Document { blocks, source: normalised }
}

/// Segment source lines into blocks.
///
/// A single left-to-right scan in which each handler consumes a variable
/// number of lines, followed by a merge pass collapsing adjacent paragraphs.
/// Dispatch looks at the line with trailing whitespace removed, so a line of
/// spaces is blank and `- ` with nothing after it is a paragraph.
pub fn segment(lines: &[&str]) -> Vec<Block> {
    let mut blocks: Vec<Block> = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i].trim_end();

        if line.is_empty() {
            blocks.push(Block::LineBreak { span: Span::line(i + 1) });
            i += 1;
        } else if line.starts_with('=') {
            blocks.push(parse_heading(line, i + 1));
            i += 1;
        } else if line.starts_with("```") {
            let (block, consumed) = parse_code_fence(lines, i);
            blocks.push(block);
            i += consumed;
        } else if classify_list_prefix(line).is_some() {
            let (block, consumed) = parse_list_item(lines, i);
            blocks.push(block);
            i += consumed;
        } else {
            blocks.push(Block::Paragraph {
                text: line.trim().to_string(),
                styled: None,
                span: Span::line(i + 1),
            });
            i += 1;
        }
    }

    merge_paragraphs(blocks)
}

/// Collapse runs of adjacent paragraphs into single multi-line paragraphs.
fn merge_paragraphs(blocks: Vec<Block>) -> Vec<Block> {
    let mut merged: Vec<Block> = Vec::with_capacity(blocks.len());
    for block in blocks {
        if let Block::Paragraph { text, span, .. } = &block {
            if let Some(Block::Paragraph { text: prev, span: prev_span, .. }) = merged.last_mut() {
                prev.push('\n');
                prev.push_str(text);
                prev_span.end_line = span.end_line;
                continue;
            }
        }
        merged.push(block);
    }
    merged
}

/// Attach the inline token stream to blocks that carry styled text.
fn attach_styles(block: Block) -> Block {
    match block {
        Block::Paragraph { text, span, .. } => {
            let styled = Some(inline::tokenize(&text));
            Block::Paragraph { text, styled, span }
        }
        Block::ListItem { level, ordered, text, span, .. } => {
            let styled = Some(inline::tokenize(&text));
            Block::ListItem { level, ordered, text, styled, span }
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_input_yields_no_blocks() {
        let doc = parse("");
        assert!(doc.blocks.is_empty());
    }

    #[test]
    fn heading_level_matches_marker_run() {
        for n in 1..=8 {
            let line = format!("{} Title text  ", "=".repeat(n));
            let doc = parse(&line);
            assert_eq!(doc.blocks.len(), 1);
            match &doc.blocks[0] {
                Block::Heading { level, text, .. } => {
                    assert_eq!(*level, n);
                    assert_eq!(text, "Title text");
                }
                other => panic!("Expected Heading, got {other:?}"),
            }
        }
    }

    #[test]
    fn adjacent_paragraph_lines_merge() {
        let doc = parse("first line\nsecond line\n");
        assert_eq!(doc.blocks.len(), 1);
        match &doc.blocks[0] {
            Block::Paragraph { text, span, .. } => {
                assert_eq!(text, "first line\nsecond line");
                assert_eq!(span.start_line, 1);
                assert_eq!(span.end_line, 2);
            }
            other => panic!("Expected Paragraph, got {other:?}"),
        }
    }

    #[test]
    fn blank_line_separates_paragraphs() {
        let doc = parse("one\n\ntwo\n");
        assert_eq!(doc.blocks.len(), 3);
        assert!(matches!(&doc.blocks[0], Block::Paragraph { .. }));
        assert!(matches!(&doc.blocks[1], Block::LineBreak { .. }));
        assert!(matches!(&doc.blocks[2], Block::Paragraph { .. }));
    }

    #[test]
    fn whitespace_only_line_is_blank() {
        let doc = parse("one\n   \ntwo\n");
        assert!(matches!(&doc.blocks[1], Block::LineBreak { .. }));
    }

    #[test]
    fn paragraph_text_is_trimmed() {
        let doc = parse("   padded out   \n");
        match &doc.blocks[0] {
            Block::Paragraph { text, .. } => assert_eq!(text, "padded out"),
            other => panic!("Expected Paragraph, got {other:?}"),
        }
    }

    #[test]
    fn fence_survives_with_language_and_body() {
        let doc = parse("```rust\nfn main() {}\nprintln!();\n```\n");
        assert_eq!(doc.blocks.len(), 1);
        match &doc.blocks[0] {
            Block::Code { language, text, span } => {
                assert_eq!(language.as_deref(), Some("rust"));
                assert_eq!(text, "fn main() {}\nprintln!();");
                assert_eq!(span.start_line, 1);
                assert_eq!(span.end_line, 4);
            }
            other => panic!("Expected Code, got {other:?}"),
        }
    }

    #[test]
    fn unterminated_fence_consumes_rest_of_input() {
        let doc = parse("```sh\necho hi\necho bye");
        assert_eq!(doc.blocks.len(), 1);
        match &doc.blocks[0] {
            Block::Code { language, text, .. } => {
                assert_eq!(language.as_deref(), Some("sh"));
                assert_eq!(text, "echo hi\necho bye");
            }
            other => panic!("Expected Code, got {other:?}"),
        }
    }

    #[test]
    fn fence_body_is_not_merged_or_styled() {
        let doc = parse("```\n*not bold*\n\nstill inside\n```\n");
        assert_eq!(doc.blocks.len(), 1);
        match &doc.blocks[0] {
            Block::Code { text, .. } => assert_eq!(text, "*not bold*\n\nstill inside"),
            other => panic!("Expected Code, got {other:?}"),
        }
    }

    #[test]
    fn list_item_with_continuation() {
        let doc = parse("- top level\n  folded in\nplain\n");
        assert_eq!(doc.blocks.len(), 2);
        match &doc.blocks[0] {
            Block::ListItem { level, ordered, text, .. } => {
                assert_eq!(*level, 0);
                assert!(!ordered);
                assert_eq!(text, "top level\nfolded in");
            }
            other => panic!("Expected ListItem, got {other:?}"),
        }
        assert!(matches!(&doc.blocks[1], Block::Paragraph { .. }));
    }

    #[test]
    fn continuation_depth_is_exact() {
        // Two levels below the item starts a fresh block, as does a line at
        // the item's own level.
        let doc = parse("- item\n    too deep\n");
        assert_eq!(doc.blocks.len(), 2);
        let doc = parse("- item\nnext\n");
        assert_eq!(doc.blocks.len(), 2);
    }

    #[test]
    fn tab_indent_expands_for_continuations() {
        // A tab is four spaces, so it continues a level-one item.
        let doc = parse("  - item\n\tcontinued\n");
        assert_eq!(doc.blocks.len(), 1);
        match &doc.blocks[0] {
            Block::ListItem { level, text, .. } => {
                assert_eq!(*level, 1);
                assert_eq!(text, "item\ncontinued");
            }
            other => panic!("Expected ListItem, got {other:?}"),
        }
    }

    #[test]
    fn ordered_and_unordered_markers() {
        let doc = parse("+ first\n+ second\n- third\n");
        assert_eq!(doc.blocks.len(), 3);
        match &doc.blocks[0] {
            Block::ListItem { ordered, .. } => assert!(ordered),
            other => panic!("Expected ListItem, got {other:?}"),
        }
        match &doc.blocks[2] {
            Block::ListItem { ordered, .. } => assert!(!ordered),
            other => panic!("Expected ListItem, got {other:?}"),
        }
    }

    #[test]
    fn nested_items_keep_levels() {
        let doc = parse("- outer\n  - inner\n");
        assert_eq!(doc.blocks.len(), 2);
        match (&doc.blocks[0], &doc.blocks[1]) {
            (Block::ListItem { level: a, .. }, Block::ListItem { level: b, .. }) => {
                assert_eq!(*a, 0);
                assert_eq!(*b, 1);
            }
            other => panic!("Expected two ListItems, got {other:?}"),
        }
    }

    #[test]
    fn bare_dash_marker_is_a_paragraph() {
        // `- ` with nothing after it loses its trailing space to the
        // right-trim and stops looking like a marker.
        let doc = parse("- \n");
        assert!(matches!(&doc.blocks[0], Block::Paragraph { .. }));
    }

    #[test]
    fn crlf_input_is_normalised() {
        let doc = parse("= Title\r\nbody\r\n");
        assert_eq!(doc.blocks.len(), 2);
        match &doc.blocks[1] {
            Block::Paragraph { text, .. } => assert_eq!(text, "body"),
            other => panic!("Expected Paragraph, got {other:?}"),
        }
    }

    #[test]
    fn textual_blocks_carry_styled_tokens() {
        let doc = parse("some *bold* text\n- an /item/.\n");
        match &doc.blocks[0] {
            Block::Paragraph { styled, .. } => assert!(styled.is_some()),
            other => panic!("Expected Paragraph, got {other:?}"),
        }
        match &doc.blocks[1] {
            Block::ListItem { styled, .. } => assert!(styled.is_some()),
            other => panic!("Expected ListItem, got {other:?}"),
        }
    }

    #[test]
    fn mixed_document_block_sequence() {
        let input = "= Title\n\nintro text\nwraps here\n\n- point\n\n```sh\nls\n```\n";
        let doc = parse(input);
        let kinds: Vec<&str> = doc
            .blocks
            .iter()
            .map(|b| match b {
                Block::Paragraph { .. } => "paragraph",
                Block::Heading { .. } => "heading",
                Block::Code { .. } => "code",
                Block::LineBreak { .. } => "line_break",
                Block::ListItem { .. } => "list_item",
            })
            .collect();
        assert_eq!(
            kinds,
            vec![
                "heading",
                "line_break",
                "paragraph",
                "line_break",
                "list_item",
                "line_break",
                "code",
            ]
        );
    }

    #[test]
    fn spans_are_one_based_and_inclusive() {
        let doc = parse("= Title\npara one\npara two\n");
        assert_eq!(doc.blocks[0].span(), Span::line(1));
        assert_eq!(doc.blocks[1].span(), Span { start_line: 2, end_line: 3 });
    }
}
