//! Layout elements.
//!
//! [`Element`] is deserialized untagged: the variant is picked by which
//! fields are present (`wooshVersion` for the root, `children` for
//! containers, `content` for content blocks, neither for leaves).

use crate::attributes::Attributes;
use crate::stack::StackMode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

pub const ROOT_TAG: &str = "mjml";
pub const SECTION_TAG: &str = "mj-section";
pub const COLUMN_TAG: &str = "mj-column";

/// Current value of the root's `wooshVersion` field.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Element {
    Root(Root),
    Container(Container),
    Content(Content),
    Leaf(Leaf),
}

/// Document root with its head metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Root {
    pub tag_name: String,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub children: Vec<Arc<Element>>,
    #[serde(rename = "wooshVersion")]
    pub version: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_line: Option<String>,
    #[serde(default)]
    pub fonts: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    pub tag_name: String,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<StackMode>,
    pub children: Vec<Arc<Element>>,
}

/// Block whose `content` is inline HTML produced by the rich-text editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    pub tag_name: String,
    #[serde(default)]
    pub attributes: Attributes,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leaf {
    pub tag_name: String,
    #[serde(default)]
    pub attributes: Attributes,
}

impl Root {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            tag_name: ROOT_TAG.to_string(),
            attributes: Attributes::new(),
            children: Vec::new(),
            version: SCHEMA_VERSION,
            title: title.into(),
            preview_line: None,
            fonts: BTreeSet::new(),
        }
    }

    /// Preview line if one is set and non-empty.
    pub fn preview(&self) -> Option<&str> {
        self.preview_line.as_deref().filter(|line| !line.is_empty())
    }
}

impl Element {
    pub fn container(tag_name: &str, attributes: Attributes, children: Vec<Arc<Element>>) -> Self {
        Element::Container(Container {
            tag_name: tag_name.to_string(),
            attributes,
            stack: None,
            children,
        })
    }

    pub fn content(tag_name: &str, attributes: Attributes, content: impl Into<String>) -> Self {
        Element::Content(Content {
            tag_name: tag_name.to_string(),
            attributes,
            content: content.into(),
        })
    }

    pub fn leaf(tag_name: &str, attributes: Attributes) -> Self {
        Element::Leaf(Leaf {
            tag_name: tag_name.to_string(),
            attributes,
        })
    }

    pub fn tag_name(&self) -> &str {
        match self {
            Element::Root(root) => &root.tag_name,
            Element::Container(container) => &container.tag_name,
            Element::Content(content) => &content.tag_name,
            Element::Leaf(leaf) => &leaf.tag_name,
        }
    }

    pub fn attributes(&self) -> &Attributes {
        match self {
            Element::Root(root) => &root.attributes,
            Element::Container(container) => &container.attributes,
            Element::Content(content) => &content.attributes,
            Element::Leaf(leaf) => &leaf.attributes,
        }
    }

    pub fn attributes_mut(&mut self) -> &mut Attributes {
        match self {
            Element::Root(root) => &mut root.attributes,
            Element::Container(container) => &mut container.attributes,
            Element::Content(content) => &mut content.attributes,
            Element::Leaf(leaf) => &mut leaf.attributes,
        }
    }

    /// Children of a root or container; empty for everything else.
    pub fn children(&self) -> &[Arc<Element>] {
        match self {
            Element::Root(root) => &root.children,
            Element::Container(container) => &container.children,
            Element::Content(_) | Element::Leaf(_) => &[],
        }
    }

    /// `None` when the element cannot hold children.
    pub fn children_mut(&mut self) -> Option<&mut Vec<Arc<Element>>> {
        match self {
            Element::Root(root) => Some(&mut root.children),
            Element::Container(container) => Some(&mut container.children),
            Element::Content(_) | Element::Leaf(_) => None,
        }
    }

    pub fn has_children(&self) -> bool {
        matches!(self, Element::Root(_) | Element::Container(_))
    }

    pub fn content_html(&self) -> Option<&str> {
        match self {
            Element::Content(content) => Some(&content.content),
            _ => None,
        }
    }

    pub fn stack(&self) -> Option<StackMode> {
        match self {
            Element::Container(container) => container.stack,
            _ => None,
        }
    }

    pub fn as_root(&self) -> Option<&Root> {
        match self {
            Element::Root(root) => Some(root),
            _ => None,
        }
    }

    /// Number of `mj-column` children.
    pub fn column_count(&self) -> usize {
        self.children()
            .iter()
            .filter(|child| child.tag_name() == COLUMN_TAG)
            .count()
    }

    pub fn with_attr(mut self, key: &str, value: &str) -> Self {
        self.attributes_mut().insert(key, value);
        self
    }

    pub fn with_children(mut self, children: Vec<Element>) -> Self {
        if let Some(slot) = self.children_mut() {
            *slot = children.into_iter().map(Arc::new).collect();
        }
        self
    }
}

impl From<Root> for Element {
    fn from(root: Root) -> Self {
        Element::Root(root)
    }
}
