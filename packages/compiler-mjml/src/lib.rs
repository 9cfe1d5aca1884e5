//! # Woosh MJML Compiler
//!
//! Turns a layout tree into MJML markup for an external renderer.
//!
//! Tags are resolved through an [`ElementRegistry`]; each registered
//! [`ElementType`] emits its own markup. Unregistered tags compile to
//! nothing, so any tree that parses also compiles.
//!
//! ```rust,ignore
//! use woosh_compiler_mjml::compile;
//!
//! let markup = compile(&schema)?;
//! ```

mod compiler;
mod registry;

pub use compiler::{
    compile, compile_with, unknown_tags, CompileError, CompileOptions, CompileResult, Compiler,
};
pub use registry::{ElementKind, ElementRegistry, ElementType};

#[cfg(test)]
mod tests;
