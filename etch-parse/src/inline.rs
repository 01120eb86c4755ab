//! Character-level inline tokenizer.
//!
//! Walks the text one character at a time with a single character of
//! lookbehind and lookahead. Escape suppression, the whitespace-adjacency
//! rule, and inline-code opacity all live here, so renderers only ever see
//! the finished token stream.

use crate::types::{StyleKind, Token};

/// Marker characters and the styles they toggle.
pub const STYLE_MARKERS: [(char, StyleKind); 5] = [
    ('*', StyleKind::Bold),
    ('/', StyleKind::Italic),
    ('_', StyleKind::Underline),
    ('~', StyleKind::Strikethrough),
    ('`', StyleKind::InlineCode),
];

fn style_for_marker(c: char) -> Option<StyleKind> {
    STYLE_MARKERS.iter().find(|(marker, _)| *marker == c).map(|(_, kind)| *kind)
}

/// Whitespace that suppresses a marker when it immediately follows one.
/// A newline does not count, and neither does end of input.
fn suppressing_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\x0B')
}

/// Tokenize a run of text into literals, style toggles, and paragraph breaks.
///
/// A marker character toggles its style unless the previous character is a
/// backslash or the next character is horizontal whitespace. While an
/// inline-code span is open, every character except the closing backtick is
/// literal. Outside code spans, a pair of newlines collapses into a
/// [`Token::ParagraphBreak`], emitted at the second newline; a lone newline
/// stays literal.
///
/// Pure and total: the same input always yields the same stream, and no
/// input panics. [`crate::parse::parse`] runs it per textual block, where
/// paragraph breaks cannot occur; running it over a whole raw document also
/// works and yields the breaks.
pub fn tokenize(text: &str) -> Vec<Token> {
    let chars: Vec<char> = text.chars().collect();
    let mut tokens = Vec::with_capacity(chars.len());
    let mut in_code = false;

    for i in 0..chars.len() {
        let c = chars[i];
        let prev = i.checked_sub(1).map(|p| chars[p]);
        let next = chars.get(i + 1).copied();

        if let Some(kind) = style_for_marker(c) {
            let escaped = prev == Some('\\');
            let spaced_off = next.is_some_and(suppressing_space);
            let visible = !in_code || kind == StyleKind::InlineCode;
            if visible && !escaped && !spaced_off {
                if kind == StyleKind::InlineCode {
                    in_code = !in_code;
                }
                tokens.push(Token::Toggle(kind));
            } else {
                tokens.push(Token::Literal(c));
            }
            continue;
        }

        if c == '\n' && !in_code {
            if prev == Some('\n') {
                tokens.push(Token::ParagraphBreak);
                continue;
            }
            if next == Some('\n') {
                // The break lands on the second newline of the pair.
                continue;
            }
        }

        tokens.push(Token::Literal(c));
    }

    tokens
}
