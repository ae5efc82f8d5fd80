//! The edges of a build: reading sources, writing documents, and parsing
//! configuration.

mod source;
mod sink;
mod format;

pub use source::*;
pub use sink::*;
pub use format::*;
