pub mod compile;
pub mod new;
pub mod text;

pub use compile::{compile, CompileArgs};
pub use new::{new, NewArgs};
pub use text::{text, TextArgs};
