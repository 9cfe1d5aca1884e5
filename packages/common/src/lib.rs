//! Helpers shared by the compiler, editor and rich-text crates.

pub mod escape;
pub mod style;
pub mod visitor;

pub use escape::*;
pub use style::*;
pub use visitor::*;
