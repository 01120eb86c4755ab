//! Parser and renderers for the Etch markup dialect.
//!
//! Etch is a line-oriented plain-text markup: runs of `=` open headings,
//! three backticks fence code, `- ` and `+ ` open list items, and inline
//! styling is driven by single-character toggle markers (`*bold*`,
//! `/italic/`, `_underline_`, `~strikethrough~`, `` `code` ``). Parsing
//! never fails; malformed input degrades to literal text and the lint pass
//! reports anything that looks unintended.
//!
//! # Quick start
//!
//! ```
//! let doc = etch_parse::parse("= Notes\n\nShipping *early*.\n");
//! assert_eq!(doc.blocks.len(), 3);
//! assert!(doc.to_html().contains("<h1>Notes</h1>"));
//! ```

pub mod blocks;
pub mod inline;
pub mod lint;
pub mod parse;
pub mod render_html;
#[cfg(feature = "terminal")]
pub mod render_term;
pub mod types;

pub use lint::{Diagnostic, Severity};
pub use parse::parse;
pub use render_html::PageConfig;
pub use types::*;

impl Document {
    /// Render this document as an HTML fragment.
    pub fn to_html(&self) -> String {
        render_html::to_html(self)
    }

    /// Render this document as a complete standalone HTML page.
    pub fn to_html_page(&self, config: &PageConfig) -> String {
        render_html::to_html_page(self, config)
    }

    /// Render this document as ANSI-colored terminal text.
    #[cfg(feature = "terminal")]
    pub fn to_terminal(&self) -> String {
        render_term::to_terminal(self)
    }

    /// Lint this document and return any diagnostics.
    pub fn lint(&self) -> Vec<Diagnostic> {
        lint::lint(self)
    }

    /// Serialize this document as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
