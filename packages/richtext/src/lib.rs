//! # Woosh Rich Text
//!
//! Rich-text content of text and button elements.
//!
//! ```text
//! HTML ──tokenizer──▶ tokens ──parser──▶ Vec<Node> ──serializer──▶ HTML
//!                                           │
//!                               transforms (Range → new nodes)
//! ```
//!
//! Canonical HTML written by [`serialize`] reads back to the same nodes.
//! Arbitrary pasted markup is accepted but only the supported subset
//! survives: block tags, the inline format tags, links and inline styles.

pub mod ast;
mod error;
mod parser;
pub mod selection;
mod serializer;
pub mod tokenizer;
pub mod transforms;

pub use ast::{normalize, Align, BlockKind, ElementNode, Format, Marks, Node, TextNode};
pub use error::{RichTextError, RichTextResult};
pub use parser::deserialize;
pub use selection::{Point, Range};
pub use serializer::serialize;
pub use transforms::{
    apply_style, is_block_active, is_format_active, selection_font_sizes, selection_fonts, set_font, set_font_size,
    step_font_size, toggle_block, toggle_format, toggle_link, BlockFormat, FontStep, StylePatch, MAX_FONT_SIZE,
};

/// Parse and re-serialize a fragment
pub fn canonicalize(html: &str) -> String {
    serialize(&deserialize(html))
}
