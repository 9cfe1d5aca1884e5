//! # Woosh Schema
//!
//! The layout document model behind the email template builder.
//!
//! A template is a strict tree:
//!
//! ```text
//! mjml (Root: title, preview line, fonts)
//!  └─ mj-section (Container, optional stack mode)
//!      └─ mj-column (Container, optional width)
//!          └─ mj-text / mj-button / mj-image / mj-raw (Content)
//!          └─ mj-divider / mj-spacer (Leaf)
//! ```
//!
//! Children are held behind [`Arc`](std::sync::Arc) so that edits can
//! rebuild a single root-to-node path and share every untouched subtree
//! with the previous version.

pub mod attributes;
pub mod element;
pub mod fonts;
pub mod padding;
pub mod stack;
pub mod width;

pub use attributes::{AttrValue, Attributes};
pub use element::{
    Container, Content, Element, Leaf, Root, COLUMN_TAG, ROOT_TAG, SCHEMA_VERSION, SECTION_TAG,
};
pub use fonts::{find_font, font_stack, FontResource, GenericFamily, DEFAULT_FONT, DEFAULT_FONT_SIZE, FONTS};
pub use padding::{compute_padding, padding_attributes, sanitize_padding, Padding, PADDING_KEYS};
pub use stack::StackMode;
pub use width::{Width, WidthParseError};
