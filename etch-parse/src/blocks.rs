//! Per-kind block parsers and the indent/prefix utilities behind them.
//!
//! Each `parse_*` function consumes one or more lines starting at a given
//! index and returns the finished block plus the number of lines eaten. The
//! scan loop in [`crate::parse`] owns dispatch; nothing here decides which
//! rule applies to a line.

use crate::types::{Block, ListMarker, Span};

/// Classify a line's list-marker prefix, ignoring leading whitespace.
///
/// `- ` opens an unordered item and `+ ` an ordered one; the space after the
/// marker is part of the prefix, so `-x` is plain text.
pub fn classify_list_prefix(line: &str) -> Option<ListMarker> {
    let trimmed = line.trim_start();
    if trimmed.starts_with("+ ") {
        Some(ListMarker::Ordered)
    } else if trimmed.starts_with("- ") {
        Some(ListMarker::Unordered)
    } else {
        None
    }
}

/// Indentation depth of a line: tabs expand to four spaces, two spaces per
/// level, odd spaces round down.
pub fn indent_level(line: &str) -> usize {
    let expanded = line.replace('\t', "    ");
    let leading = expanded.len() - expanded.trim_start_matches(' ').len();
    leading / 2
}

/// Parse a heading line. The leading `=` run is the level, the rest of the
/// line (trimmed) is the title.
pub fn parse_heading(line: &str, line_no: usize) -> Block {
    let level = line.chars().take_while(|&c| c == '=').count();
    let text = line[level..].trim().to_string();
    Block::Heading { level, text, span: Span::line(line_no) }
}

/// Parse a fenced code block opened at `start`. Returns the block and the
/// number of lines consumed (opening fence, body, and closing fence when one
/// exists). An unterminated fence runs to the end of the input.
pub fn parse_code_fence(lines: &[&str], start: usize) -> (Block, usize) {
    let opening = lines[start].trim_end();
    let tag = opening.trim_start_matches('`').trim();
    let language = if tag.is_empty() { None } else { Some(tag.to_string()) };

    let mut body: Vec<&str> = Vec::new();
    let mut closed = false;
    for &line in &lines[start + 1..] {
        if line.starts_with("```") {
            closed = true;
            break;
        }
        body.push(line);
    }

    let consumed = body.len() + if closed { 2 } else { 1 };
    let block = Block::Code {
        language,
        text: body.join("\n"),
        span: Span { start_line: start + 1, end_line: start + consumed },
    };
    (block, consumed)
}

/// Parse a list item opened at `start`, folding in continuation lines
/// indented exactly one level deeper than the item. Returns the block and
/// the number of lines consumed.
///
/// Panics when `lines[start]` carries no list marker; the scan loop only
/// dispatches here after [`classify_list_prefix`] matched, so a miss is a
/// dispatch bug.
pub fn parse_list_item(lines: &[&str], start: usize) -> (Block, usize) {
    let first = lines[start];
    let marker = classify_list_prefix(first)
        .expect("list item parser called on a line without a list marker");
    let level = indent_level(first);

    let prefix = match marker {
        ListMarker::Unordered => "- ",
        ListMarker::Ordered => "+ ",
    };
    let head = first
        .trim_start()
        .strip_prefix(prefix)
        .expect("list item parser called on a line without a list marker");

    let mut text_lines = vec![head.trim_end()];
    let mut consumed = 1;
    for &line in &lines[start + 1..] {
        if classify_list_prefix(line).is_some() || indent_level(line) != level + 1 {
            break;
        }
        text_lines.push(line.trim_start());
        consumed += 1;
    }

    let block = Block::ListItem {
        level,
        ordered: marker == ListMarker::Ordered,
        text: text_lines.join("\n"),
        styled: None,
        span: Span { start_line: start + 1, end_line: start + consumed },
    };
    (block, consumed)
}
