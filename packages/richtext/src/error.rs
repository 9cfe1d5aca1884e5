use crate::ast::BlockKind;
use thiserror::Error;

pub type RichTextResult<T> = Result<T, RichTextError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RichTextError {
    #[error("No text node at {path:?}")]
    NotAText { path: Vec<usize> },

    #[error("Offset {offset} is past the end of the text at {path:?} ({len} characters)")]
    OffsetOutOfRange { path: Vec<usize>, offset: usize, len: usize },

    #[error("<{}> is an inline element and cannot be toggled as a block", .0.tag())]
    NotABlock(BlockKind),

    #[error("Unknown font: {0}")]
    UnknownFont(String),
}

impl RichTextError {
    pub fn not_a_text(path: &[usize]) -> Self {
        Self::NotAText { path: path.to_vec() }
    }

    pub fn offset_out_of_range(path: &[usize], offset: usize, len: usize) -> Self {
        Self::OffsetOutOfRange {
            path: path.to_vec(),
            offset,
            len,
        }
    }
}
