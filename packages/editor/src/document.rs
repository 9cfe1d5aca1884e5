//! # Document Handle
//!
//! Holds the latest version of a template.
//!
//! ## Lifecycle
//!
//! ```text
//! Load → Edit → Compile
//!   ↓      ↓       ↓
//! JSON  Mutations MJML
//! ```
//!
//! Every successful mutation swaps in a new root and bumps the version.
//! Earlier roots stay valid for anyone holding a [`snapshot`](Document::snapshot).

use crate::{EditorError, Mutation, MutationResult};
use std::sync::Arc;
use tracing::{debug, warn};
use woosh_compiler_mjml::{compile_with, CompileOptions, ElementRegistry};
use woosh_schema::{Element, Root};

/// Editable template
#[derive(Clone)]
pub struct Document {
    /// Current version number (increments on each successful mutation)
    pub version: u64,

    root: Arc<Element>,
    registry: &'static ElementRegistry,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("version", &self.version)
            .field("root", &self.root)
            .finish()
    }
}

impl Document {
    /// Create a document around an existing root
    pub fn new(root: Root) -> Self {
        Self::with_registry(root, ElementRegistry::shared())
    }

    pub fn with_registry(root: Root, registry: &'static ElementRegistry) -> Self {
        Self {
            version: 0,
            root: Arc::new(Element::Root(root)),
            registry,
        }
    }

    /// Parse a template saved by the builder
    pub fn from_json(json: &str) -> Result<Self, EditorError> {
        match serde_json::from_str::<Element>(json)? {
            Element::Root(root) => Ok(Self::new(root)),
            _ => Err(EditorError::NotARoot),
        }
    }

    pub fn to_json(&self) -> Result<String, EditorError> {
        Ok(serde_json::to_string(self.root.as_ref())?)
    }

    pub fn to_json_pretty(&self) -> Result<String, EditorError> {
        Ok(serde_json::to_string_pretty(self.root.as_ref())?)
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Shared handle to the current root
    pub fn snapshot(&self) -> Arc<Element> {
        Arc::clone(&self.root)
    }

    pub fn registry(&self) -> &'static ElementRegistry {
        self.registry
    }

    /// Apply a mutation. On error the document is left untouched.
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationResult, EditorError> {
        match mutation.apply(&self.root, self.registry) {
            Ok(root) => {
                self.root = Arc::new(root);
                self.version += 1;
                debug!(mutation = mutation.name(), version = self.version, "applied mutation");
                Ok(MutationResult { version: self.version })
            }
            Err(error) => {
                warn!(mutation = mutation.name(), %error, "rejected mutation");
                Err(error.into())
            }
        }
    }

    /// Compile the current root to MJML
    pub fn compile(&self) -> Result<String, EditorError> {
        self.compile_with(CompileOptions::default())
    }

    pub fn compile_with(&self, options: CompileOptions) -> Result<String, EditorError> {
        Ok(compile_with(self.registry, &self.root, options)?)
    }
}
