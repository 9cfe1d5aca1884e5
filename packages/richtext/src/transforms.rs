//! Selection transforms
//!
//! Every transform takes the current nodes and a [`Range`] and returns new
//! nodes; the input is never modified. Texts are split at the selection
//! edges first, so a style or format only lands on the selected characters:
//!
//! ```text
//! "Hello world", bold over [0, 5)  →  "Hello"(bold) " world"
//! ```
//!
//! Results are passed through [`normalize`], which merges the pieces back
//! together wherever they ended up with the same format.
//!
//! Block toggles work on top-level blocks and on the items of top-level
//! lists. Loose inline content at the top level is wrapped in a new block
//! when a block format is switched on.

use crate::ast::{normalize, Align, BlockKind, ElementNode, Format, Node, TextNode};
use crate::error::{RichTextError, RichTextResult};
use crate::selection::Range;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::debug;
use woosh_common::css_property;
use woosh_schema::{find_font, font_stack, DEFAULT_FONT, DEFAULT_FONT_SIZE};

/// Largest font size, in pixels, that sizes read from the document are clamped to
pub const MAX_FONT_SIZE: u32 = 1000;

/// Style changes: `Some` sets a property, `None` removes it.
/// Keys may be camelCase (`fontSize`) or CSS (`font-size`).
pub type StylePatch = BTreeMap<String, Option<String>>;

/// A block type or an alignment, as offered by the toolbar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BlockFormat {
    Kind(BlockKind),
    Align(Align),
}

impl From<BlockKind> for BlockFormat {
    fn from(kind: BlockKind) -> Self {
        BlockFormat::Kind(kind)
    }
}

impl From<Align> for BlockFormat {
    fn from(align: Align) -> Self {
        BlockFormat::Align(align)
    }
}

impl FromStr for BlockFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(align) = s.parse::<Align>() {
            return Ok(BlockFormat::Align(align));
        }
        BlockKind::from_tag(s)
            .map(BlockFormat::Kind)
            .ok_or_else(|| format!("unknown block format: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStep {
    Larger,
    Smaller,
}

/// Nodes with each text leaf flagged as selected or not
#[derive(Debug, Clone)]
enum Marked {
    /// Element properties (children left empty) and marked children
    Element(ElementNode, Vec<Marked>),
    Text(TextNode, bool),
}

impl Marked {
    fn touches(&self) -> bool {
        match self {
            Marked::Text(_, selected) => *selected,
            Marked::Element(_, children) => children.iter().any(Marked::touches),
        }
    }

    fn is_inline(&self) -> bool {
        match self {
            Marked::Text(..) => true,
            Marked::Element(element, _) => element.kind.is_inline(),
        }
    }

    fn plain_text(&self) -> String {
        match self {
            Marked::Text(text, _) => text.text.clone(),
            Marked::Element(_, children) => children.iter().map(Marked::plain_text).collect(),
        }
    }
}

fn mark(nodes: &[Node], range: &Range) -> RichTextResult<Vec<Marked>> {
    range.validate(nodes)?;
    let mut path = Vec::new();
    Ok(mark_nodes(nodes, range, &mut path))
}

fn mark_nodes(nodes: &[Node], range: &Range, path: &mut Vec<usize>) -> Vec<Marked> {
    let mut marked = Vec::with_capacity(nodes.len());
    for (index, node) in nodes.iter().enumerate() {
        path.push(index);
        match node {
            Node::Element(element) => marked.push(Marked::Element(
                element.with_children(Vec::new()),
                mark_nodes(&element.children, range, path),
            )),
            Node::Text(text) => marked.extend(split_text(text, path, range)),
        }
        path.pop();
    }
    marked
}

/// Split a text at the selection edges that fall inside it
fn split_text(text: &TextNode, path: &[usize], range: &Range) -> Vec<Marked> {
    let (start, end) = (range.start(), range.end());

    if range.is_collapsed() {
        return vec![Marked::Text(text.clone(), path == start.path.as_slice())];
    }
    if path < start.path.as_slice() || path > end.path.as_slice() {
        return vec![Marked::Text(text.clone(), false)];
    }

    let len = text.char_len();
    if len == 0 {
        // an empty leaf counts unless the selection merely ends on it
        return vec![Marked::Text(text.clone(), path != end.path.as_slice())];
    }

    let from = if path == start.path.as_slice() { start.offset } else { 0 };
    let to = if path == end.path.as_slice() { end.offset } else { len };
    if from >= to {
        return vec![Marked::Text(text.clone(), false)];
    }

    let piece = |from: usize, to: usize, selected: bool| {
        let content: String = text.text.chars().skip(from).take(to - from).collect();
        Marked::Text(
            TextNode {
                text: content,
                ..text.clone()
            },
            selected,
        )
    };

    let mut pieces = Vec::with_capacity(3);
    if from > 0 {
        pieces.push(piece(0, from, false));
    }
    pieces.push(piece(from, to, true));
    if to < len {
        pieces.push(piece(to, len, false));
    }
    pieces
}

fn unmark(nodes: Vec<Marked>) -> Vec<Node> {
    nodes
        .into_iter()
        .map(|node| match node {
            Marked::Element(mut element, children) => {
                element.children = unmark(children);
                Node::Element(element)
            }
            Marked::Text(text, _) => Node::Text(text),
        })
        .collect()
}

fn selected_texts(nodes: &[Marked]) -> Vec<&TextNode> {
    fn collect<'a>(nodes: &'a [Marked], texts: &mut Vec<&'a TextNode>) {
        for node in nodes {
            match node {
                Marked::Text(text, true) => texts.push(text),
                Marked::Text(_, false) => {}
                Marked::Element(_, children) => collect(children, texts),
            }
        }
    }

    let mut texts = Vec::new();
    collect(nodes, &mut texts);
    texts
}

fn for_each_selected(nodes: &mut [Marked], f: &mut impl FnMut(&mut TextNode)) {
    for node in nodes {
        match node {
            Marked::Text(text, true) => f(text),
            Marked::Text(_, false) => {}
            Marked::Element(_, children) => for_each_selected(children, f),
        }
    }
}

/// Merge `patch` into the style of every selected text.
///
/// A `None` value removes the property; a style left empty is removed.
/// A collapsed selection changes nothing.
pub fn apply_style(nodes: &[Node], selection: &Range, patch: &StylePatch) -> RichTextResult<Vec<Node>> {
    if selection.is_collapsed() {
        selection.validate(nodes)?;
        return Ok(nodes.to_vec());
    }

    let mut marked = mark(nodes, selection)?;
    for_each_selected(&mut marked, &mut |text| merge_style(text, patch));
    Ok(normalize(unmark(marked)))
}

fn merge_style(text: &mut TextNode, patch: &StylePatch) {
    let mut style = text.style.take().unwrap_or_default();
    for (key, value) in patch {
        let key = css_property(key);
        match value {
            Some(value) => {
                style.insert(key, value.clone());
            }
            None => {
                style.remove(&key);
            }
        }
    }
    text.style = (!style.is_empty()).then_some(style);
}

/// Switch `format` on for every selected text, or off when all of them
/// already have it.
pub fn toggle_format(nodes: &[Node], selection: &Range, format: Format) -> RichTextResult<Vec<Node>> {
    if selection.is_collapsed() {
        selection.validate(nodes)?;
        return Ok(nodes.to_vec());
    }

    let mut marked = mark(nodes, selection)?;
    let texts = selected_texts(&marked);
    let clear = !texts.is_empty() && texts.iter().all(|text| text.marks.get(format));
    debug!(?format, on = !clear, "toggling format");

    for_each_selected(&mut marked, &mut |text| text.marks.set(format, !clear));
    Ok(normalize(unmark(marked)))
}

/// True if any selected text has `format`
pub fn is_format_active(nodes: &[Node], selection: &Range, format: Format) -> RichTextResult<bool> {
    let marked = mark(nodes, selection)?;
    Ok(selected_texts(&marked).iter().any(|text| text.marks.get(format)))
}

fn block_matches(node: &Marked, format: BlockFormat) -> bool {
    let Marked::Element(element, children) = node else {
        return false;
    };
    if !node.touches() {
        return false;
    }
    let matches = match format {
        BlockFormat::Kind(kind) => element.kind == kind,
        BlockFormat::Align(align) => element.align == Some(align),
    };
    matches || children.iter().any(|child| block_matches(child, format))
}

/// True if any element touching the selection has the block type or
/// alignment
pub fn is_block_active(nodes: &[Node], selection: &Range, format: impl Into<BlockFormat>) -> RichTextResult<bool> {
    let format = format.into();
    let marked = mark(nodes, selection)?;
    Ok(marked.iter().any(|node| block_matches(node, format)))
}

struct BlockToggle {
    format: BlockFormat,
    active: bool,
    /// Output nodes, flagged when they are a block the toggle changed
    output: Vec<(Marked, bool)>,
    /// Pending top-level inline nodes
    run: Vec<Marked>,
}

impl BlockToggle {
    fn push_line(&mut self, node: Marked) {
        if node.is_inline() {
            self.run.push(node);
            return;
        }
        self.flush();
        if !node.touches() {
            self.output.push((node, false));
            return;
        }

        match node {
            Marked::Element(element, children) if element.kind.is_list() => {
                match self.format {
                    BlockFormat::Align(_) => self.align_items(element, children),
                    BlockFormat::Kind(_) => self.unwrap_list(element, children),
                }
            }
            Marked::Element(element, children) => {
                let element = self.convert(element);
                self.output.push((Marked::Element(element, children), true));
            }
            text => self.output.push((text, false)),
        }
    }

    fn convert(&self, mut element: ElementNode) -> ElementNode {
        match self.format {
            BlockFormat::Align(align) => {
                element.align = if self.active { None } else { Some(align) };
            }
            BlockFormat::Kind(kind) => {
                element.kind = if self.active {
                    BlockKind::Paragraph
                } else if kind.is_list() {
                    BlockKind::ListItem
                } else {
                    kind
                };
            }
        }
        element
    }

    fn align_items(&mut self, list: ElementNode, children: Vec<Marked>) {
        let children = children
            .into_iter()
            .map(|child| match child {
                Marked::Element(element, grandchildren) if child_touches(&grandchildren) => {
                    Marked::Element(self.convert(element), grandchildren)
                }
                other => other,
            })
            .collect();
        self.output.push((Marked::Element(list, children), false));
    }

    /// Lift the selected items out of the list, leaving the rest in place
    fn unwrap_list(&mut self, list: ElementNode, mut children: Vec<Marked>) {
        let (Some(first), Some(last)) = (
            children.iter().position(Marked::touches),
            children.iter().rposition(Marked::touches),
        ) else {
            self.output.push((Marked::Element(list, children), false));
            return;
        };

        let after = children.split_off(last + 1);
        let selected = children.split_off(first);
        let before = children;

        if !before.is_empty() {
            self.output.push((Marked::Element(list.clone(), before), false));
        }
        for child in selected {
            self.push_line(child);
        }
        self.flush();
        if !after.is_empty() {
            self.output.push((Marked::Element(list, after), false));
        }
    }

    /// Wrap pending inline nodes in a new block if the selection reaches them
    fn flush(&mut self) {
        if self.run.is_empty() {
            return;
        }
        let run = std::mem::take(&mut self.run);
        let text: String = run.iter().map(Marked::plain_text).collect();
        let whitespace = !text.is_empty() && text.trim().is_empty();

        if self.active || whitespace || !child_touches(&run) {
            self.output.extend(run.into_iter().map(|node| (node, false)));
            return;
        }
        let block = self.convert(ElementNode::new(BlockKind::Paragraph, Vec::new()));
        self.output.push((Marked::Element(block, run), true));
    }

    fn finish(mut self) -> Vec<Marked> {
        self.flush();
        let mut output = self.output;

        if let (BlockFormat::Kind(kind), false) = (self.format, self.active) {
            let first = output.iter().position(|(_, changed)| *changed);
            let last = output.iter().rposition(|(_, changed)| *changed);
            if let (true, Some(first), Some(last)) = (kind.is_list(), first, last) {
                let tail = output.split_off(last + 1);
                let items = output.split_off(first).into_iter().map(|(node, _)| node).collect();
                output.push((Marked::Element(ElementNode::new(kind, Vec::new()), items), true));
                output.extend(tail);
            }
        }

        output.into_iter().map(|(node, _)| node).collect()
    }
}

fn child_touches(children: &[Marked]) -> bool {
    children.iter().any(Marked::touches)
}

/// Toggle a block type or alignment on the blocks touching the selection.
///
/// Switching a type on that is already active turns the blocks back into
/// paragraphs (or removes the alignment). Selected list items are lifted
/// out of their list first; a list type then re-wraps them as one list.
pub fn toggle_block(nodes: &[Node], selection: &Range, format: impl Into<BlockFormat>) -> RichTextResult<Vec<Node>> {
    let format = format.into();
    if let BlockFormat::Kind(kind) = format {
        if kind.is_inline() {
            return Err(RichTextError::NotABlock(kind));
        }
    }

    let marked = mark(nodes, selection)?;
    let active = marked.iter().any(|node| block_matches(node, format));
    debug!(?format, active, "toggling block");

    let mut toggle = BlockToggle {
        format,
        active,
        output: Vec::with_capacity(marked.len()),
        run: Vec::new(),
    };
    for node in marked {
        toggle.push_line(node);
    }
    Ok(normalize(unmark(toggle.finish())))
}

/// Remove links from the selection, then link the selected text to `url`
/// when one is given.
///
/// With a collapsed selection, the whole link under the cursor is removed
/// and nothing new is linked.
pub fn toggle_link(nodes: &[Node], selection: &Range, url: Option<&str>) -> RichTextResult<Vec<Node>> {
    let marked = mark(nodes, selection)?;
    let mut marked = unwrap_links(marked, selection.is_collapsed());

    if let Some(url) = url.filter(|_| !selection.is_collapsed()) {
        marked = wrap_links(marked, url);
    }
    Ok(normalize(unmark(marked)))
}

fn unwrap_links(nodes: Vec<Marked>, whole: bool) -> Vec<Marked> {
    let mut output = Vec::with_capacity(nodes.len());
    for node in nodes {
        match node {
            Marked::Element(element, children) if element.kind == BlockKind::Link && child_touches(&children) => {
                let children = unwrap_links(children, whole);
                if whole {
                    output.extend(children);
                    continue;
                }
                let mut before = Vec::new();
                let mut selected = Vec::new();
                let mut after = Vec::new();
                for child in children {
                    if child.touches() {
                        selected.push(child);
                    } else if selected.is_empty() {
                        before.push(child);
                    } else {
                        after.push(child);
                    }
                }
                if !before.is_empty() {
                    output.push(Marked::Element(element.clone(), before));
                }
                output.extend(selected);
                if !after.is_empty() {
                    output.push(Marked::Element(element, after));
                }
            }
            Marked::Element(element, children) => {
                output.push(Marked::Element(element, unwrap_links(children, whole)));
            }
            text => output.push(text),
        }
    }
    output
}

fn wrap_links(nodes: Vec<Marked>, url: &str) -> Vec<Marked> {
    let mut output = Vec::with_capacity(nodes.len());
    let mut group: Vec<Marked> = Vec::new();

    let close = |group: &mut Vec<Marked>, output: &mut Vec<Marked>| {
        if group.is_empty() {
            return;
        }
        let mut link = ElementNode::new(BlockKind::Link, Vec::new());
        link.attributes.insert("href".to_string(), url.to_string());
        link.attributes.insert("target".to_string(), "_blank".to_string());
        output.push(Marked::Element(link, std::mem::take(group)));
    };

    for node in nodes {
        match node {
            text @ Marked::Text(_, true) => group.push(text),
            Marked::Element(element, children) => {
                close(&mut group, &mut output);
                output.push(Marked::Element(element, wrap_links(children, url)));
            }
            other => {
                close(&mut group, &mut output);
                output.push(other);
            }
        }
    }
    close(&mut group, &mut output);
    output
}

/// Set the font family of the selection to a known font and its fallbacks
pub fn set_font(nodes: &[Node], selection: &Range, name: &str) -> RichTextResult<Vec<Node>> {
    let font = find_font(name).ok_or_else(|| RichTextError::UnknownFont(name.to_string()))?;
    let patch = StylePatch::from([("font-family".to_string(), Some(font_stack(font)))]);
    apply_style(nodes, selection, &patch)
}

/// Set the font size of the selection in pixels
pub fn set_font_size(nodes: &[Node], selection: &Range, size: u32) -> RichTextResult<Vec<Node>> {
    let patch = StylePatch::from([("font-size".to_string(), Some(format!("{}px", size)))]);
    apply_style(nodes, selection, &patch)
}

/// One pixel above the largest, or below the smallest, size in the selection
pub fn step_font_size(nodes: &[Node], selection: &Range, step: FontStep) -> RichTextResult<Vec<Node>> {
    let sizes = selection_font_sizes(nodes, selection)?;
    let size = match step {
        FontStep::Larger => sizes.iter().max().map(|size| size.saturating_add(1).min(MAX_FONT_SIZE)),
        FontStep::Smaller => sizes.iter().min().map(|size| size.saturating_sub(1).max(1)),
    };
    match size {
        Some(size) => set_font_size(nodes, selection, size),
        None => Ok(nodes.to_vec()),
    }
}

/// Font names used by the selected texts, in order of appearance
pub fn selection_fonts(nodes: &[Node], selection: &Range) -> RichTextResult<Vec<String>> {
    let marked = mark(nodes, selection)?;
    let mut fonts: Vec<String> = Vec::new();

    for text in selected_texts(&marked) {
        let font = text
            .style
            .as_ref()
            .and_then(|style| style.get("font-family"))
            .and_then(|family| family.split(',').next())
            .map(|name| name.trim().trim_matches(|ch| ch == '"' || ch == '\'').to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_FONT.to_string());
        if !fonts.contains(&font) {
            fonts.push(font);
        }
    }
    Ok(fonts)
}

/// Pixel sizes used by the selected texts, in order of appearance.
/// Sizes that are not a plain number of pixels are left out; larger sizes
/// are clamped to [`MAX_FONT_SIZE`].
pub fn selection_font_sizes(nodes: &[Node], selection: &Range) -> RichTextResult<Vec<u32>> {
    let marked = mark(nodes, selection)?;
    let mut sizes: Vec<u32> = Vec::new();

    for text in selected_texts(&marked) {
        let size = match text.style.as_ref().and_then(|style| style.get("font-size")) {
            Some(value) => match value.trim().trim_end_matches("px").trim().parse::<f64>() {
                Ok(size) if size.is_finite() && size >= 0.0 => size.min(MAX_FONT_SIZE as f64).round() as u32,
                _ => continue,
            },
            None => DEFAULT_FONT_SIZE,
        };
        if !sizes.contains(&size) {
            sizes.push(size);
        }
    }
    Ok(sizes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::deserialize;
    use crate::selection::Point;
    use crate::serializer::serialize;

    fn style_patch(key: &str, value: Option<&str>) -> StylePatch {
        StylePatch::from([(key.to_string(), value.map(str::to_string))])
    }

    fn two_paragraphs() -> Vec<Node> {
        deserialize("<p>Hello world</p><p>Second line</p>")
    }

    #[test]
    fn test_bold_splits_text_at_selection() {
        let nodes = deserialize("<p>Hello world</p>");
        let result = toggle_format(&nodes, &Range::within(vec![0, 0], 0, 5), Format::Bold).unwrap();

        assert_eq!(serialize(&result), "<p><strong>Hello</strong> world</p>");
    }

    #[test]
    fn test_selection_inside_one_text_uses_both_offsets() {
        let nodes = deserialize("<p>Hello world</p>");
        let result = apply_style(&nodes, &Range::within(vec![0, 0], 7, 2), &style_patch("color", Some("red"))).unwrap();

        assert_eq!(serialize(&result), "<p>He<span style=\"color: red\">llo w</span>orld</p>");
    }

    #[test]
    fn test_toggle_format_twice_restores() {
        let nodes = deserialize("<p>Hello world</p>");
        let range = Range::within(vec![0, 0], 6, 11);

        let once = toggle_format(&nodes, &range, Format::Italic).unwrap();
        let selection = Range::within(vec![0, 1], 0, 5);
        let twice = toggle_format(&once, &selection, Format::Italic).unwrap();

        assert_eq!(twice, nodes);
    }

    #[test]
    fn test_toggle_format_sets_when_partially_active() {
        let nodes = deserialize("<p><strong>Hello</strong> world</p>");
        let range = Range::new(Point::new(vec![0, 0], 0), Point::new(vec![0, 1], 6));

        assert!(is_format_active(&nodes, &range, Format::Bold).unwrap());
        let result = toggle_format(&nodes, &range, Format::Bold).unwrap();
        assert_eq!(serialize(&result), "<p><strong>Hello world</strong></p>");
    }

    #[test]
    fn test_collapsed_selection_changes_nothing() {
        let nodes = deserialize("<p>Hello</p>");
        let cursor = Range::collapsed(Point::new(vec![0, 0], 2));

        assert_eq!(toggle_format(&nodes, &cursor, Format::Bold).unwrap(), nodes);
        assert_eq!(
            apply_style(&nodes, &cursor, &style_patch("color", Some("red"))).unwrap(),
            nodes
        );
    }

    #[test]
    fn test_invalid_selection_is_an_error() {
        let nodes = deserialize("<p>Hello</p>");

        let result = toggle_format(&nodes, &Range::within(vec![0], 0, 1), Format::Bold);
        assert_eq!(result, Err(RichTextError::not_a_text(&[0])));

        let result = apply_style(&nodes, &Range::within(vec![0, 0], 0, 9), &StylePatch::new());
        assert_eq!(result, Err(RichTextError::offset_out_of_range(&[0, 0], 9, 5)));
    }

    #[test]
    fn test_apply_style_across_paragraphs() {
        let nodes = two_paragraphs();
        let range = Range::new(Point::new(vec![0, 0], 6), Point::new(vec![1, 0], 6));
        let result = apply_style(&nodes, &range, &style_patch("color", Some("red"))).unwrap();

        assert_eq!(
            serialize(&result),
            "<p>Hello <span style=\"color: red\">world</span></p>\
             <p><span style=\"color: red\">Second</span> line</p>"
        );
    }

    #[test]
    fn test_apply_style_merges_and_removes() {
        let nodes = deserialize(r#"<p><span style="color: red; font-size: 20px">Hi</span></p>"#);
        let range = Range::within(vec![0, 0], 0, 2);

        let patch = StylePatch::from([
            ("color".to_string(), None),
            ("fontWeight".to_string(), Some("600".to_string())),
        ]);
        let result = apply_style(&nodes, &range, &patch).unwrap();
        let style = result[0].children()[0].as_text().unwrap().style.clone().unwrap();

        assert_eq!(style.get("font-size").map(String::as_str), Some("20px"));
        assert_eq!(style.get("font-weight").map(String::as_str), Some("600"));
        assert!(!style.contains_key("color"));
    }

    #[test]
    fn test_removing_last_property_removes_style() {
        let nodes = deserialize(r#"<p><span style="color: red">Hi</span></p>"#);
        let result = apply_style(&nodes, &Range::within(vec![0, 0], 0, 2), &style_patch("color", None)).unwrap();

        assert_eq!(serialize(&result), "<p>Hi</p>");
    }

    #[test]
    fn test_selection_ending_at_offset_zero_skips_that_text() {
        let nodes = two_paragraphs();
        let range = Range::new(Point::new(vec![0, 0], 0), Point::new(vec![1, 0], 0));
        let result = toggle_format(&nodes, &range, Format::Underline).unwrap();

        assert_eq!(serialize(&result), "<p><u>Hello world</u></p><p>Second line</p>");
    }

    #[test]
    fn test_toggle_heading_and_back() {
        let nodes = two_paragraphs();
        let cursor = Range::collapsed(Point::new(vec![1, 0], 3));

        let heading = toggle_block(&nodes, &cursor, BlockKind::H2).unwrap();
        assert_eq!(serialize(&heading), "<p>Hello world</p><h2>Second line</h2>");
        assert!(is_block_active(&heading, &cursor, BlockKind::H2).unwrap());

        let back = toggle_block(&heading, &cursor, BlockKind::H2).unwrap();
        assert_eq!(back, nodes);
    }

    #[test]
    fn test_toggle_list_wraps_blocks() {
        let nodes = two_paragraphs();
        let range = Range::new(Point::new(vec![0, 0], 2), Point::new(vec![1, 0], 2));

        let list = toggle_block(&nodes, &range, BlockKind::BulletedList).unwrap();
        assert_eq!(serialize(&list), "<ul><li>Hello world</li><li>Second line</li></ul>");

        let inside = Range::new(Point::new(vec![0, 0, 0], 2), Point::new(vec![0, 1, 0], 2));
        let back = toggle_block(&list, &inside, BlockKind::BulletedList).unwrap();
        assert_eq!(back, nodes);
    }

    #[test]
    fn test_toggle_list_splits_existing_list() {
        let nodes = deserialize("<ol><li>one</li><li>two</li><li>three</li></ol>");
        let cursor = Range::collapsed(Point::new(vec![0, 1, 0], 1));

        let result = toggle_block(&nodes, &cursor, BlockKind::Paragraph).unwrap();
        assert_eq!(serialize(&result), "<ol><li>one</li></ol><p>two</p><ol><li>three</li></ol>");
    }

    #[test]
    fn test_switch_list_type() {
        let nodes = deserialize("<ol><li>one</li><li>two</li></ol>");
        let range = Range::new(Point::new(vec![0, 0, 0], 0), Point::new(vec![0, 1, 0], 3));

        let result = toggle_block(&nodes, &range, BlockKind::BulletedList).unwrap();
        assert_eq!(serialize(&result), "<ul><li>one</li><li>two</li></ul>");
    }

    #[test]
    fn test_loose_text_is_wrapped_in_block() {
        let nodes = deserialize("Plain <em>text</em>");
        let cursor = Range::collapsed(Point::new(vec![0], 0));

        let result = toggle_block(&nodes, &cursor, BlockKind::H1).unwrap();
        assert_eq!(serialize(&result), "<h1>Plain <em>text</em></h1>");
    }

    #[test]
    fn test_toggle_align() {
        let nodes = two_paragraphs();
        let cursor = Range::collapsed(Point::new(vec![0, 0], 0));

        let centered = toggle_block(&nodes, &cursor, Align::Center).unwrap();
        assert_eq!(serialize(&centered), "<p align=\"center\">Hello world</p><p>Second line</p>");
        assert!(is_block_active(&centered, &cursor, Align::Center).unwrap());
        assert!(!is_block_active(&centered, &cursor, Align::Right).unwrap());

        let back = toggle_block(&centered, &cursor, Align::Center).unwrap();
        assert_eq!(back, nodes);
    }

    #[test]
    fn test_align_list_items() {
        let nodes = deserialize("<ul><li>one</li><li>two</li></ul>");
        let cursor = Range::collapsed(Point::new(vec![0, 1, 0], 0));

        let result = toggle_block(&nodes, &cursor, Align::Right).unwrap();
        assert_eq!(serialize(&result), "<ul><li>one</li><li align=\"right\">two</li></ul>");
    }

    #[test]
    fn test_links_cannot_be_toggled_as_blocks() {
        let nodes = two_paragraphs();
        let cursor = Range::collapsed(Point::new(vec![0, 0], 0));

        assert_eq!(
            toggle_block(&nodes, &cursor, BlockKind::Link),
            Err(RichTextError::NotABlock(BlockKind::Link))
        );
    }

    #[test]
    fn test_link_and_unlink() {
        let nodes = deserialize("<p>Visit our site today</p>");
        let range = Range::within(vec![0, 0], 10, 14);

        let linked = toggle_link(&nodes, &range, Some("https://example.com")).unwrap();
        assert_eq!(
            serialize(&linked),
            "<p>Visit our <a href=\"https://example.com\" target=\"_blank\">site</a> today</p>"
        );
        let cursor = Range::collapsed(Point::new(vec![0, 1, 0], 2));
        assert!(is_block_active(&linked, &cursor, BlockKind::Link).unwrap());

        let unlinked = toggle_link(&linked, &cursor, None).unwrap();
        assert_eq!(unlinked, nodes);
    }

    #[test]
    fn test_partial_unlink_keeps_rest_of_link() {
        let nodes = deserialize(r#"<p><a href="https://x.io">abcdef</a></p>"#);
        let result = toggle_link(&nodes, &Range::within(vec![0, 0, 0], 2, 4), None).unwrap();

        assert_eq!(
            serialize(&result),
            "<p><a href=\"https://x.io\">ab</a>cd<a href=\"https://x.io\">ef</a></p>"
        );
    }

    #[test]
    fn test_set_font_and_query() {
        let nodes = deserialize("<p>Hello world</p>");
        let range = Range::within(vec![0, 0], 0, 5);

        let result = set_font(&nodes, &range, "Roboto").unwrap();
        assert_eq!(
            result[0].children()[0].as_text().unwrap().style.as_ref().and_then(|s| s.get("font-family")),
            Some(&"Roboto, sans-serif".to_string())
        );

        let all = Range::within(vec![0, 0], 0, 5);
        assert_eq!(selection_fonts(&result, &all).unwrap(), vec!["Roboto"]);
        let across = Range::new(Point::new(vec![0, 0], 0), Point::new(vec![0, 1], 3));
        assert_eq!(selection_fonts(&result, &across).unwrap(), vec!["Roboto", DEFAULT_FONT]);
    }

    #[test]
    fn test_unknown_font() {
        let nodes = deserialize("<p>x</p>");
        let result = set_font(&nodes, &Range::within(vec![0, 0], 0, 1), "Comic Sans");
        assert_eq!(result, Err(RichTextError::UnknownFont("Comic Sans".to_string())));
    }

    #[test]
    fn test_font_sizes_and_steps() {
        let nodes = deserialize(r#"<p><span style="font-size: 20px">big</span> normal</p>"#);
        let range = Range::new(Point::new(vec![0, 0], 0), Point::new(vec![0, 1], 7));

        assert_eq!(selection_font_sizes(&nodes, &range).unwrap(), vec![20, DEFAULT_FONT_SIZE]);

        let larger = step_font_size(&nodes, &range, FontStep::Larger).unwrap();
        assert_eq!(serialize(&larger), "<p><span style=\"font-size: 21px\">big normal</span></p>");

        let smaller = step_font_size(&nodes, &range, FontStep::Smaller).unwrap();
        let all = Range::within(vec![0, 0], 0, 10);
        assert_eq!(selection_font_sizes(&smaller, &all).unwrap(), vec![DEFAULT_FONT_SIZE - 1]);
    }

    #[test]
    fn test_huge_pasted_font_size_is_clamped() {
        let nodes = deserialize(r#"<p><span style="font-size: 99999999999px">big</span></p>"#);
        let range = Range::within(vec![0, 0], 0, 3);

        assert_eq!(selection_font_sizes(&nodes, &range).unwrap(), vec![MAX_FONT_SIZE]);

        let larger = step_font_size(&nodes, &range, FontStep::Larger).unwrap();
        assert_eq!(selection_font_sizes(&larger, &range).unwrap(), vec![MAX_FONT_SIZE]);

        let smaller = step_font_size(&nodes, &range, FontStep::Smaller).unwrap();
        assert_eq!(selection_font_sizes(&smaller, &range).unwrap(), vec![MAX_FONT_SIZE - 1]);
    }

    #[test]
    fn test_block_format_from_str() {
        assert_eq!("center".parse::<BlockFormat>(), Ok(BlockFormat::Align(Align::Center)));
        assert_eq!("ul".parse::<BlockFormat>(), Ok(BlockFormat::Kind(BlockKind::BulletedList)));
        assert!("marquee".parse::<BlockFormat>().is_err());
    }
}
