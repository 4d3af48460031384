pub mod directive;
pub mod scanner;
pub mod size;

pub use directive::{ResizeDirective, ResizeMode};
pub use scanner::{resolve, ParsedKey, SizedVariant};
pub use size::{ImageExtension, SizeToken};
