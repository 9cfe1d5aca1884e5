//! # Tree Operations
//!
//! Pure functions over layout elements. Every operation takes the current
//! element by reference and returns a new one; inputs are never modified.
//!
//! Cloning an element copies its attribute map and its list of child
//! pointers, not the children themselves, so an edit deep in the tree
//! rebuilds only the nodes on the root-to-target path:
//!
//! ```text
//!   before            after update_at([0, 1])
//!   root              root'
//!   ├─ s0             ├─ s0'
//!   │  ├─ c0  ◄────── │  ├─ c0   (shared)
//!   │  └─ c1          │  └─ c1'  (rebuilt)
//!   └─ s1   ◄──────── └─ s1      (shared)
//! ```

use crate::errors::EditError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use woosh_schema::{AttrValue, Element, StackMode};

/// Child indices leading from the root to a node. Empty addresses the root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodePath(pub Vec<usize>);

impl NodePath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    /// Parent path and the index within it. `None` for the root.
    pub fn split_last(&self) -> Option<(NodePath, usize)> {
        let (last, parent) = self.0.split_last()?;
        Some((NodePath(parent.to_vec()), *last))
    }
}

impl From<Vec<usize>> for NodePath {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("/");
        }
        for index in &self.0 {
            write!(f, "/{}", index)?;
        }
        Ok(())
    }
}

/// What to put at a child slot.
///
/// On the wire this is an element, an array of elements, or `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Replacement {
    /// Replace the child at the index (or append when the index is the length).
    Single(Element),
    /// Splice these in place of the child at the index.
    Many(Vec<Element>),
    /// Remove the child at the index.
    Remove,
}

/// Attribute changes; `None` removes the key.
pub type AttributePatch = BTreeMap<String, Option<AttrValue>>;

/// Non-attribute fields to overwrite. Unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldPatch {
    pub stack: Option<Option<StackMode>>,
    pub content: Option<String>,
}

fn container_children(element: &mut Element) -> Result<&mut Vec<Arc<Element>>, EditError> {
    let tag = element.tag_name().to_string();
    element.children_mut().ok_or(EditError::NotAContainer(tag))
}

/// Replace, splice or remove the child at `index`.
///
/// `index` may equal the child count for `Single` and `Many` (append), but
/// must address an existing child for `Remove`.
pub fn replace_child(parent: &Element, index: usize, value: Replacement) -> Result<Element, EditError> {
    let mut updated = parent.clone();
    let children = container_children(&mut updated)?;
    let len = children.len();

    let in_range = match value {
        Replacement::Remove => index < len,
        _ => index <= len,
    };
    if !in_range {
        return Err(EditError::IndexOutOfRange { index, len });
    }

    let end = (index + 1).min(len);
    match value {
        Replacement::Single(child) => {
            children.splice(index..end, std::iter::once(Arc::new(child)));
        }
        Replacement::Many(new_children) => {
            children.splice(index..end, new_children.into_iter().map(Arc::new));
        }
        Replacement::Remove => {
            children.remove(index);
        }
    }

    Ok(updated)
}

/// Insert a child before `index`, shifting later children right.
pub fn insert_child(parent: &Element, index: usize, child: Element) -> Result<Element, EditError> {
    let mut updated = parent.clone();
    let children = container_children(&mut updated)?;
    if index > children.len() {
        return Err(EditError::IndexOutOfRange {
            index,
            len: children.len(),
        });
    }
    children.insert(index, Arc::new(child));
    Ok(updated)
}

/// Assign `patch` over the element's attributes. Other keys are untouched.
pub fn merge_attributes(element: &Element, patch: &AttributePatch) -> Element {
    let mut updated = element.clone();
    let attributes = updated.attributes_mut();
    for (key, value) in patch {
        match value {
            Some(value) => attributes.insert(key.clone(), value.clone()),
            None => {
                attributes.remove(key);
            }
        }
    }
    updated
}

/// Overwrite top-level fields. Fields the element does not have are ignored.
pub fn replace_fields(element: &Element, patch: &FieldPatch) -> Element {
    let mut updated = element.clone();
    match &mut updated {
        Element::Container(container) => {
            if let Some(stack) = patch.stack {
                container.stack = stack;
            }
        }
        Element::Content(content) => {
            if let Some(html) = &patch.content {
                content.content = html.clone();
            }
        }
        Element::Root(_) | Element::Leaf(_) => {}
    }
    updated
}

pub fn get_at<'a>(root: &'a Element, path: &NodePath) -> Option<&'a Element> {
    path.0
        .iter()
        .try_fold(root, |node, index| node.children().get(*index).map(|child| child.as_ref()))
}

/// Rebuild the nodes along `path`, replacing the target with `update`'s
/// result. Subtrees off the path are shared with `root`.
pub fn update_at<F, E>(root: &Element, path: &NodePath, update: F) -> Result<Element, E>
where
    F: FnOnce(&Element) -> Result<Element, E>,
    E: From<EditError>,
{
    update_from(root, path, 0, update)
}

fn update_from<F, E>(node: &Element, path: &NodePath, depth: usize, update: F) -> Result<Element, E>
where
    F: FnOnce(&Element) -> Result<Element, E>,
    E: From<EditError>,
{
    let Some(&index) = path.0.get(depth) else {
        return update(node);
    };

    let child = node
        .children()
        .get(index)
        .ok_or_else(|| EditError::InvalidPath(path.clone()))?;
    let updated_child = update_from(child, path, depth + 1, update)?;

    let mut updated = node.clone();
    let children = container_children(&mut updated)?;
    children[index] = Arc::new(updated_child);
    Ok(updated)
}
