#![doc = svgbobdoc::transform!(
//! A toolkit for compiling a directory of Markdown into a static HTML site.
//!
//! # Overview
//!
//! Folio turns source text (posts, pages, and layout fragments) into a set of
//! fully resolved HTML documents. It does not read or write files itself
//! beyond the helpers in [`fstree`] and [`io`]; sources come in as strings and
//! compiled documents come out as `(path, html)` pairs.
//!
//! ```svgbob
//!                    +---------+
//!                    |  Site   |
//!                    +----+----+
//!                         |
//!        +----------------+-----------------+
//!        |                                  |
//!  +-----+-----+                  +---------+----------+
//!  |  Layouts  |                  |       Pages        |
//!  +-----------+                  +--------------------+
//!  |  header   |                  | page  post  index  |
//!  |  footer   |                  | plain markdown     |
//!  +-----------+                  +--------------------+
//! ```
//!
//! ## Compiling
//!
//! [`Site::compile()`] proceeds in three steps:
//!
//! 1. Every page renders its body. Markdown is converted to HTML; posts add a
//!    stylesheet link; the index appends a list of every post, newest first.
//!    All bodies are rendered before the next step begins.
//! 2. Each body is wrapped between the `header` and `footer` layouts inside a
//!    `<main>` element, then every `{{name}}` placeholder is replaced using the
//!    site variables plus the page's `title` and `bytes`.
//! 3. Pages and their attached assets are flattened into documents, keeping
//!    only the first document for each output path.
)]

pub use log;

#[macro_use]
pub mod error;
pub mod util;
pub mod fstree;
pub mod io;
pub mod markdown;
pub mod template;
pub mod taxonomy;
mod variables;

pub use taxonomy::*;
pub use variables::Variables;
