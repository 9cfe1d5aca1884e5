//! # Template Mutations
//!
//! High-level edits a builder UI issues against a template.
//!
//! ## Design Principles
//!
//! 1. **Intent-preserving**: Each mutation is one user action
//! 2. **Validated**: All mutations validate paths and element kinds first
//! 3. **Pure**: Applying returns a new root; the input is never modified
//!
//! Mutations travel as JSON tagged by `type`:
//!
//! ```json
//! {"type": "SetColumnCount", "section": [0], "count": 3}
//! ```

use crate::errors::{EditError, LayoutError};
use crate::layout::{self, Direction};
use crate::tree::{
    get_at, insert_child, merge_attributes, replace_child, replace_fields, update_at, AttributePatch, FieldPatch,
    NodePath, Replacement,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;
use woosh_compiler_mjml::ElementRegistry;
use woosh_schema::{
    compute_padding, padding_attributes, sanitize_padding, Element, Padding, StackMode, Width, SECTION_TAG,
};

/// Semantic mutations (intent-preserving operations)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Mutation {
    /// Append a section with `columns` default columns
    AddSection {
        columns: usize,
        #[serde(default)]
        preset: Option<usize>,
    },

    /// Insert the default schema of a registered element type
    #[serde(rename_all = "camelCase")]
    InsertElement {
        parent: NodePath,
        index: usize,
        tag_name: String,
    },

    /// Replace, splice in, or remove (`null`) the child at `index`
    ReplaceChild {
        parent: NodePath,
        index: usize,
        value: Replacement,
    },

    RemoveElement { path: NodePath },

    /// Assign attributes; `null` values remove the key
    MergeAttributes { path: NodePath, attributes: AttributePatch },

    /// Replace the inline HTML of a content element
    SetContent { path: NodePath, content: String },

    SetColumnCount {
        section: NodePath,
        count: usize,
        #[serde(default)]
        preset: Option<usize>,
    },

    SetColumnWidths { section: NodePath, widths: Vec<Width> },

    CycleColumnWidths { section: NodePath, direction: Direction },

    SetStack { section: NodePath, stack: StackMode },

    /// Set padding sides from raw user input. A `null` side keeps its
    /// resolved value, falling back to the element type's defaults.
    SetPadding { path: NodePath, padding: PaddingInput },

    /// Update document head metadata; unset fields are kept
    #[serde(rename_all = "camelCase")]
    SetMetadata {
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        preview_line: Option<String>,
        #[serde(default)]
        fonts: Option<BTreeSet<String>>,
    },
}

/// `[top, right, bottom, left]` as typed by the user
pub type PaddingInput = [Option<String>; 4];

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error(transparent)]
    Edit(#[from] EditError),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error("Unknown element type: {0}")]
    UnknownElement(String),

    #[error("Element at {0} is not a content element")]
    NotContent(NodePath),

    #[error("Element at {0} is not a section")]
    NotASection(NodePath),

    #[error("Element at {0} cannot have children")]
    NotAContainer(NodePath),

    #[error("The root element cannot be removed or replaced")]
    RootNotEditable,

    #[error("Document root is not an 'mjml' element")]
    NotARoot,
}

impl Mutation {
    /// Apply mutation with validation, returning the new root
    pub fn apply(&self, root: &Element, registry: &ElementRegistry) -> Result<Element, MutationError> {
        self.validate(root, registry)?;

        match self {
            Mutation::AddSection { columns, preset } => {
                let section = registry
                    .default_schema(SECTION_TAG)
                    .ok_or_else(|| MutationError::UnknownElement(SECTION_TAG.to_string()))?;
                let section = layout::set_column_count(registry, &section, *columns, *preset)?;
                let len = root.children().len();
                Ok(replace_child(root, len, Replacement::Single(section))?)
            }

            Mutation::InsertElement { parent, index, tag_name } => {
                let element = registry
                    .default_schema(tag_name)
                    .ok_or_else(|| MutationError::UnknownElement(tag_name.clone()))?;
                update_at(root, parent, |node| Ok(insert_child(node, *index, element)?))
            }

            Mutation::ReplaceChild { parent, index, value } => {
                update_at(root, parent, |node| Ok(replace_child(node, *index, value.clone())?))
            }

            Mutation::RemoveElement { path } => {
                let (parent, index) = path.split_last().ok_or(MutationError::RootNotEditable)?;
                update_at(root, &parent, |node| Ok(replace_child(node, index, Replacement::Remove)?))
            }

            Mutation::MergeAttributes { path, attributes } => {
                update_at(root, path, |node| Ok(merge_attributes(node, attributes)))
            }

            Mutation::SetContent { path, content } => update_at(root, path, |node| {
                Ok(replace_fields(
                    node,
                    &FieldPatch {
                        content: Some(content.clone()),
                        ..Default::default()
                    },
                ))
            }),

            Mutation::SetColumnCount { section, count, preset } => update_at(root, section, |node| {
                Ok(layout::set_column_count(registry, node, *count, *preset)?)
            }),

            Mutation::SetColumnWidths { section, widths } => {
                update_at(root, section, |node| Ok(layout::set_column_widths(node, widths)?))
            }

            Mutation::CycleColumnWidths { section, direction } => {
                update_at(root, section, |node| Ok(layout::cycle_column_widths(node, *direction)?))
            }

            Mutation::SetStack { section, stack } => {
                update_at(root, section, |node| Ok(layout::set_stack(node, *stack)?))
            }

            Mutation::SetPadding { path, padding } => update_at(root, path, |node| {
                let defaults = registry
                    .get(node.tag_name())
                    .and_then(|element_type| element_type.padding_defaults());
                let current = compute_padding(node.attributes(), defaults);
                let resolved: Padding = std::array::from_fn(|side| match &padding[side] {
                    Some(input) => sanitize_padding(input),
                    None => current[side].clone(),
                });
                let patch: AttributePatch = padding_attributes(&resolved)
                    .iter()
                    .map(|(key, value)| (key.clone(), Some(value.clone())))
                    .collect();
                Ok(merge_attributes(node, &patch))
            }),

            Mutation::SetMetadata {
                title,
                preview_line,
                fonts,
            } => {
                let mut updated = root.clone();
                let Element::Root(metadata) = &mut updated else {
                    return Err(MutationError::NotARoot);
                };
                if let Some(title) = title {
                    metadata.title = title.clone();
                }
                if let Some(preview_line) = preview_line {
                    metadata.preview_line = Some(preview_line.clone()).filter(|line| !line.is_empty());
                }
                if let Some(fonts) = fonts {
                    metadata.fonts = fonts.clone();
                }
                Ok(updated)
            }
        }
    }

    /// Validate without applying
    pub fn validate(&self, root: &Element, registry: &ElementRegistry) -> Result<(), MutationError> {
        match self {
            Mutation::AddSection { columns, .. } => {
                if !(1..=layout::MAX_COLUMNS).contains(columns) {
                    return Err(LayoutError::InvalidColumnCount(*columns).into());
                }
                require_container(root, &NodePath::root())
            }

            Mutation::InsertElement { parent, tag_name, .. } => {
                if !registry.contains(tag_name) {
                    return Err(MutationError::UnknownElement(tag_name.clone()));
                }
                require_container(root, parent)
            }

            Mutation::ReplaceChild { parent, .. } => require_container(root, parent),

            Mutation::RemoveElement { path } => {
                if path.is_root() {
                    return Err(MutationError::RootNotEditable);
                }
                find(root, path).map(|_| ())
            }

            Mutation::MergeAttributes { path, .. } | Mutation::SetPadding { path, .. } => {
                find(root, path).map(|_| ())
            }

            Mutation::SetContent { path, .. } => match find(root, path)? {
                Element::Content(_) => Ok(()),
                _ => Err(MutationError::NotContent(path.clone())),
            },

            Mutation::SetColumnCount { section, .. }
            | Mutation::SetColumnWidths { section, .. }
            | Mutation::CycleColumnWidths { section, .. }
            | Mutation::SetStack { section, .. } => {
                let node = find(root, section)?;
                if node.tag_name() == SECTION_TAG && matches!(node, Element::Container(_)) {
                    Ok(())
                } else {
                    Err(MutationError::NotASection(section.clone()))
                }
            }

            Mutation::SetMetadata { .. } => match root {
                Element::Root(_) => Ok(()),
                _ => Err(MutationError::NotARoot),
            },
        }
    }

    /// Get a debug name for this mutation
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::AddSection { .. } => "AddSection",
            Mutation::InsertElement { .. } => "InsertElement",
            Mutation::ReplaceChild { .. } => "ReplaceChild",
            Mutation::RemoveElement { .. } => "RemoveElement",
            Mutation::MergeAttributes { .. } => "MergeAttributes",
            Mutation::SetContent { .. } => "SetContent",
            Mutation::SetColumnCount { .. } => "SetColumnCount",
            Mutation::SetColumnWidths { .. } => "SetColumnWidths",
            Mutation::CycleColumnWidths { .. } => "CycleColumnWidths",
            Mutation::SetStack { .. } => "SetStack",
            Mutation::SetPadding { .. } => "SetPadding",
            Mutation::SetMetadata { .. } => "SetMetadata",
        }
    }
}

fn find<'a>(root: &'a Element, path: &NodePath) -> Result<&'a Element, MutationError> {
    get_at(root, path).ok_or_else(|| EditError::InvalidPath(path.clone()).into())
}

fn require_container(root: &Element, path: &NodePath) -> Result<(), MutationError> {
    if find(root, path)?.has_children() {
        Ok(())
    } else {
        Err(MutationError::NotAContainer(path.clone()))
    }
}

/// Result of applying a mutation
#[derive(Debug, Clone)]
pub struct MutationResult {
    /// New version number
    pub version: u64,
}
