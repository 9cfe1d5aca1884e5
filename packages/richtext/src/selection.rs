//! Selections over a rich-text fragment.
//!
//! A [`Point`] addresses a text leaf by its child-index path and a character
//! offset inside that text. A [`Range`] keeps the anchor (where the user
//! started selecting) and the focus (where they stopped); either may come
//! first in document order.

use crate::ast::{node_at, Node};
use crate::error::{RichTextError, RichTextResult};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub path: Vec<usize>,
    /// Offset in characters
    pub offset: usize,
}

impl Point {
    pub fn new(path: impl Into<Vec<usize>>, offset: usize) -> Self {
        Self {
            path: path.into(),
            offset,
        }
    }

    /// Check that the point lands inside a text leaf of `nodes`
    pub fn validate(&self, nodes: &[Node]) -> RichTextResult<()> {
        let text = node_at(nodes, &self.path)
            .and_then(Node::as_text)
            .ok_or_else(|| RichTextError::not_a_text(&self.path))?;
        let len = text.char_len();
        if self.offset > len {
            return Err(RichTextError::offset_out_of_range(&self.path, self.offset, len));
        }
        Ok(())
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Document order: leaf paths compare lexicographically, then offsets
impl Ord for Point {
    fn cmp(&self, other: &Self) -> Ordering {
        self.path.cmp(&other.path).then(self.offset.cmp(&other.offset))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    pub anchor: Point,
    pub focus: Point,
}

impl Range {
    pub fn new(anchor: Point, focus: Point) -> Self {
        Self { anchor, focus }
    }

    pub fn collapsed(point: Point) -> Self {
        Self {
            anchor: point.clone(),
            focus: point,
        }
    }

    /// Selection inside a single text leaf
    pub fn within(path: impl Into<Vec<usize>>, start: usize, end: usize) -> Self {
        let path = path.into();
        Self::new(Point::new(path.clone(), start), Point::new(path, end))
    }

    pub fn start(&self) -> &Point {
        std::cmp::min(&self.anchor, &self.focus)
    }

    pub fn end(&self) -> &Point {
        std::cmp::max(&self.anchor, &self.focus)
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    pub fn is_backward(&self) -> bool {
        self.focus < self.anchor
    }

    pub fn validate(&self, nodes: &[Node]) -> RichTextResult<()> {
        self.anchor.validate(nodes)?;
        self.focus.validate(nodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::BlockKind;

    #[test]
    fn test_start_and_end_follow_document_order() {
        let range = Range::new(Point::new(vec![1, 0], 2), Point::new(vec![0, 3], 5));

        assert!(range.is_backward());
        assert_eq!(range.start().path, vec![0, 3]);
        assert_eq!(range.end().path, vec![1, 0]);
    }

    #[test]
    fn test_same_leaf_orders_by_offset() {
        let range = Range::within(vec![0, 0], 4, 1);
        assert_eq!(range.start().offset, 1);
        assert_eq!(range.end().offset, 4);
        assert!(!range.is_collapsed());
    }

    #[test]
    fn test_validate() {
        let nodes = vec![Node::element(BlockKind::Paragraph, vec![Node::text("héllo")])];

        assert!(Point::new(vec![0, 0], 5).validate(&nodes).is_ok());
        assert_eq!(
            Point::new(vec![0, 0], 6).validate(&nodes),
            Err(RichTextError::offset_out_of_range(&[0, 0], 6, 5))
        );
        assert_eq!(
            Point::new(vec![0], 0).validate(&nodes),
            Err(RichTextError::not_a_text(&[0]))
        );
    }
}
