//! Rich-text AST
//!
//! A fragment is a list of [`Node`]s. Elements carry a block or inline kind,
//! optional alignment, their other attributes and a parsed `style` map.
//! Text leaves carry format marks and an optional style map of their own.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use woosh_common::StyleMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockKind {
    #[serde(rename = "p")]
    Paragraph,
    #[serde(rename = "div")]
    Div,
    #[serde(rename = "span")]
    Span,
    #[serde(rename = "a")]
    Link,
    #[serde(rename = "blockquote")]
    Quote,
    #[serde(rename = "h1")]
    H1,
    #[serde(rename = "h2")]
    H2,
    #[serde(rename = "h3")]
    H3,
    #[serde(rename = "h4")]
    H4,
    #[serde(rename = "h5")]
    H5,
    #[serde(rename = "h6")]
    H6,
    #[serde(rename = "li")]
    ListItem,
    #[serde(rename = "ol")]
    NumberedList,
    #[serde(rename = "ul")]
    BulletedList,
    #[serde(rename = "pre")]
    CodeBlock,
}

impl BlockKind {
    pub const ALL: [BlockKind; 15] = [
        BlockKind::Paragraph,
        BlockKind::Div,
        BlockKind::Span,
        BlockKind::Link,
        BlockKind::Quote,
        BlockKind::H1,
        BlockKind::H2,
        BlockKind::H3,
        BlockKind::H4,
        BlockKind::H5,
        BlockKind::H6,
        BlockKind::ListItem,
        BlockKind::NumberedList,
        BlockKind::BulletedList,
        BlockKind::CodeBlock,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            BlockKind::Paragraph => "p",
            BlockKind::Div => "div",
            BlockKind::Span => "span",
            BlockKind::Link => "a",
            BlockKind::Quote => "blockquote",
            BlockKind::H1 => "h1",
            BlockKind::H2 => "h2",
            BlockKind::H3 => "h3",
            BlockKind::H4 => "h4",
            BlockKind::H5 => "h5",
            BlockKind::H6 => "h6",
            BlockKind::ListItem => "li",
            BlockKind::NumberedList => "ol",
            BlockKind::BulletedList => "ul",
            BlockKind::CodeBlock => "pre",
        }
    }

    /// Look up a lowercase tag name
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }

    pub fn is_list(&self) -> bool {
        matches!(self, BlockKind::NumberedList | BlockKind::BulletedList)
    }

    /// Links and spans live inside blocks
    pub fn is_inline(&self) -> bool {
        matches!(self, BlockKind::Link | BlockKind::Span)
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
    Right,
    Justify,
}

impl Align {
    pub fn as_str(&self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
            Align::Justify => "justify",
        }
    }
}

impl FromStr for Align {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Align::Left),
            "center" => Ok(Align::Center),
            "right" => Ok(Align::Right),
            "justify" => Ok(Align::Justify),
            other => Err(format!("unknown alignment: {}", other)),
        }
    }
}

/// Boolean text formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Code,
}

impl Format {
    /// Serialization order, innermost tag first
    pub const ORDER: [Format; 5] = [
        Format::Code,
        Format::Strikethrough,
        Format::Italic,
        Format::Bold,
        Format::Underline,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            Format::Code => "code",
            Format::Strikethrough => "del",
            Format::Italic => "em",
            Format::Bold => "strong",
            Format::Underline => "u",
        }
    }

    /// Inline tags recognized when reading HTML. `b` is left out on purpose.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "code" => Some(Format::Code),
            "del" | "s" => Some(Format::Strikethrough),
            "em" | "i" => Some(Format::Italic),
            "strong" => Some(Format::Bold),
            "u" => Some(Format::Underline),
            _ => None,
        }
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Marks {
    #[serde(default, skip_serializing_if = "is_false")]
    pub bold: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub italic: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub underline: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub strikethrough: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub code: bool,
}

impl Marks {
    pub fn get(&self, format: Format) -> bool {
        match format {
            Format::Bold => self.bold,
            Format::Italic => self.italic,
            Format::Underline => self.underline,
            Format::Strikethrough => self.strikethrough,
            Format::Code => self.code,
        }
    }

    pub fn set(&mut self, format: Format, on: bool) {
        match format {
            Format::Bold => self.bold = on,
            Format::Italic => self.italic = on,
            Format::Underline => self.underline = on,
            Format::Strikethrough => self.strikethrough = on,
            Format::Code => self.code = on,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Marks::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextNode {
    pub text: String,
    #[serde(flatten)]
    pub marks: Marks,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleMap>,
}

impl TextNode {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with(mut self, format: Format) -> Self {
        self.marks.set(format, true);
        self
    }

    pub fn with_style(mut self, key: &str, value: &str) -> Self {
        self.style
            .get_or_insert_with(StyleMap::new)
            .insert(key.to_string(), value.to_string());
        self
    }

    /// Same marks and style, so the two can be merged
    pub fn same_format(&self, other: &TextNode) -> bool {
        self.marks == other.marks && self.style == other.style
    }

    /// A bare empty leaf: no text, no marks, no style
    pub fn is_blank(&self) -> bool {
        self.text.is_empty() && self.marks.is_empty() && self.style.is_none()
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementNode {
    #[serde(rename = "type")]
    pub kind: BlockKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<Align>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleMap>,
    pub children: Vec<Node>,
}

impl ElementNode {
    pub fn new(kind: BlockKind, children: Vec<Node>) -> Self {
        Self {
            kind,
            align: None,
            attributes: BTreeMap::new(),
            style: None,
            children,
        }
    }

    /// Copy of this element's properties around different children
    pub fn with_children(&self, children: Vec<Node>) -> Self {
        Self {
            kind: self.kind,
            align: self.align,
            attributes: self.attributes.clone(),
            style: self.style.clone(),
            children,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Element(ElementNode),
    Text(TextNode),
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(TextNode::new(text))
    }

    pub fn element(kind: BlockKind, children: Vec<Node>) -> Self {
        Node::Element(ElementNode::new(kind, children))
    }

    pub fn as_text(&self) -> Option<&TextNode> {
        match self {
            Node::Text(text) => Some(text),
            Node::Element(_) => None,
        }
    }

    pub fn as_element(&self) -> Option<&ElementNode> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element(element) => &element.children,
            Node::Text(_) => &[],
        }
    }

    /// Concatenated text of this node and its descendants
    pub fn plain_text(&self) -> String {
        match self {
            Node::Text(text) => text.text.clone(),
            Node::Element(element) => element.children.iter().map(Node::plain_text).collect(),
        }
    }
}

impl From<TextNode> for Node {
    fn from(text: TextNode) -> Self {
        Node::Text(text)
    }
}

impl From<ElementNode> for Node {
    fn from(element: ElementNode) -> Self {
        Node::Element(element)
    }
}

/// Node at `path` inside a fragment
pub fn node_at<'a>(nodes: &'a [Node], path: &[usize]) -> Option<&'a Node> {
    let (first, rest) = path.split_first()?;
    let node = nodes.get(*first)?;
    if rest.is_empty() {
        Some(node)
    } else {
        node_at(node.children(), rest)
    }
}

/// Merge adjacent texts with the same format, drop empty texts that have
/// non-empty siblings and give every childless element an empty text.
pub fn normalize(nodes: Vec<Node>) -> Vec<Node> {
    let mut merged: Vec<Node> = Vec::with_capacity(nodes.len());

    for node in nodes {
        let node = match node {
            Node::Element(mut element) => {
                element.children = normalize(std::mem::take(&mut element.children));
                if element.children.is_empty() {
                    element.children.push(Node::text(""));
                }
                Node::Element(element)
            }
            text => text,
        };

        match (merged.last_mut(), node) {
            (Some(Node::Text(previous)), Node::Text(text)) if previous.same_format(&text) => {
                previous.text.push_str(&text.text);
            }
            (_, node) => merged.push(node),
        }
    }

    let has_content = merged
        .iter()
        .any(|node| !matches!(node, Node::Text(text) if text.text.is_empty()));
    if has_content {
        merged.retain(|node| !matches!(node, Node::Text(text) if text.text.is_empty()));
    } else {
        merged.truncate(1);
    }
    merged
}
