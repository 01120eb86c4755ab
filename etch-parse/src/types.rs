//! Core data model for parsed Etch documents.

use serde::{Deserialize, Serialize};

/// A parsed Etch document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Ordered sequence of blocks in the document body.
    pub blocks: Vec<Block>,
    /// Normalised source text the blocks were parsed from.
    pub source: String,
}

/// Source location of a block. Line numbers are 1-based and inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// 1-based starting line number.
    pub start_line: usize,
    /// 1-based ending line number (inclusive).
    pub end_line: usize,
}

impl Span {
    /// Span covering a single line.
    pub fn line(line: usize) -> Self {
        Span { start_line: line, end_line: line }
    }
}

/// A structural unit of the document.
///
/// Serialized with an explicit `kind` tag so JSON consumers can switch on the
/// block type without probing fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    /// Running text. Adjacent source lines merge into one paragraph,
    /// newline-joined.
    Paragraph {
        text: String,
        /// Inline token stream, attached by the second parse pass.
        #[serde(skip_serializing_if = "Option::is_none")]
        styled: Option<Vec<Token>>,
        span: Span,
    },
    /// Heading opened by a run of `=`. `level` is the length of the run.
    Heading { level: usize, text: String, span: Span },
    /// Fenced code. `language` is the tag after the opening fence, if any.
    Code {
        #[serde(skip_serializing_if = "Option::is_none")]
        language: Option<String>,
        /// Body lines verbatim, newline-joined, fences excluded.
        text: String,
        span: Span,
    },
    /// A blank source line separating blocks.
    LineBreak { span: Span },
    /// One list item. Continuation lines are folded into `text`.
    ListItem {
        /// Indentation depth: two spaces (or half a tab) per level.
        level: usize,
        /// `+ ` items are ordered, `- ` items are not.
        ordered: bool,
        text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        styled: Option<Vec<Token>>,
        span: Span,
    },
}

impl Block {
    /// Source span of this block.
    pub fn span(&self) -> Span {
        match self {
            Block::Paragraph { span, .. }
            | Block::Heading { span, .. }
            | Block::Code { span, .. }
            | Block::LineBreak { span }
            | Block::ListItem { span, .. } => *span,
        }
    }
}

/// List marker classification for a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListMarker {
    Unordered,
    Ordered,
}

/// One unit of tokenized inline text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Token {
    /// A single character emitted as-is.
    Literal(char),
    /// Flip the named style between open and closed.
    Toggle(StyleKind),
    /// Two adjacent newlines collapsed into a block boundary.
    ParagraphBreak,
}

/// Inline styles driven by toggle markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleKind {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    InlineCode,
}

impl StyleKind {
    /// Lowercase display name, used in messages and token dumps.
    pub fn name(self) -> &'static str {
        match self {
            StyleKind::Bold => "bold",
            StyleKind::Italic => "italic",
            StyleKind::Underline => "underline",
            StyleKind::Strikethrough => "strikethrough",
            StyleKind::InlineCode => "inline code",
        }
    }
}
