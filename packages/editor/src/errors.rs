//! Error types for the editor

use crate::tree::NodePath;
use thiserror::Error;

/// Structural contract violations of the tree operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditError {
    #[error("Child index {index} out of range for {len} children")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Element '{0}' cannot have children")]
    NotAContainer(String),

    #[error("No element at path {0}")]
    InvalidPath(NodePath),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Column count must be between 1 and 4, got {0}")]
    InvalidColumnCount(usize),

    #[error("Element '{0}' is not a section")]
    NotASection(String),

    #[error("No width preset {index} for {columns} columns")]
    UnknownPreset { columns: usize, index: usize },

    #[error("Expected {expected} widths, got {actual}")]
    WidthCount { expected: usize, actual: usize },

    #[error("Column widths must add up to 100%, got {0}")]
    WidthSum(String),

    #[error("No element type registered for '{0}'")]
    MissingElementType(&'static str),

    #[error(transparent)]
    Edit(#[from] EditError),
}

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Mutation error: {0}")]
    Mutation(#[from] crate::mutations::MutationError),

    #[error("Compile error: {0}")]
    Compile(#[from] woosh_compiler_mjml::CompileError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Document root must be an 'mjml' element")]
    NotARoot,
}
