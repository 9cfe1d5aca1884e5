//! # Woosh Editor
//!
//! Editing engine for email templates.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ schema: template JSON → Element tree        │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Document versions + mutations       │
//! │  - Pure tree operations (tree)              │
//! │  - Column counts, widths, stacking (layout) │
//! │  - Validated, serializable mutations        │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ compiler-mjml: Element tree → MJML          │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Trees are values**: an edit returns a new root, old roots stay valid
//! 2. **Structural sharing**: only the edited path is rebuilt
//! 3. **Caller holds the latest version**: [`Document`] is a thin holder
//!
//! ## Usage
//!
//! ```rust,ignore
//! use woosh_editor::{Document, Mutation, NodePath};
//! use woosh_schema::Root;
//!
//! let mut doc = Document::new(Root::new("Welcome"));
//! doc.apply(Mutation::AddSection { columns: 2, preset: None })?;
//! doc.apply(Mutation::InsertElement {
//!     parent: NodePath(vec![0, 0]),
//!     index: 0,
//!     tag_name: "mj-text".to_string(),
//! })?;
//!
//! let mjml = doc.compile()?;
//! ```

mod document;
mod errors;
pub mod layout;
mod mutations;
pub mod tree;

pub use document::Document;
pub use errors::{EditError, EditorError, LayoutError};
pub use layout::Direction;
pub use mutations::{Mutation, MutationError, MutationResult, PaddingInput};
pub use tree::{AttributePatch, FieldPatch, NodePath, Replacement};
