use std::fmt;

use pulldown_cmark::{html, Options, Parser};
use serde::{Deserialize, Serialize};

use crate::error::{Chainable, Result};
use crate::markdown::{AutoHeading, Plugin, SyntaxHighlight};

/// The input flavor of Markdown sources.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// GitHub Flavored Markdown: tables, strikethrough, task lists, footnotes.
    #[default]
    #[serde(alias = "GFM")]
    Gfm,
    /// Plain CommonMark with no extensions.
    #[serde(alias = "CommonMark")]
    CommonMark,
}

impl Dialect {
    pub fn options(self) -> Options {
        match self {
            Dialect::Gfm => Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_FOOTNOTES,
            Dialect::CommonMark => Options::empty(),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::Gfm => "GFM".fmt(f),
            Dialect::CommonMark => "CommonMark".fmt(f),
        }
    }
}

/// Converts Markdown text into an HTML fragment.
pub trait Convert: Sync {
    fn convert(&self, markdown: &str, dialect: Dialect) -> Result<String>;
}

impl<F> Convert for F where F: Fn(&str, Dialect) -> Result<String> + Sync {
    fn convert(&self, markdown: &str, dialect: Dialect) -> Result<String> {
        self(markdown, dialect)
    }
}

/// The default converter: `pulldown-cmark` with generated heading ids and
/// class-based syntax highlighting of fenced code.
#[derive(Debug, Clone)]
pub struct Markdown {
    auto_ids: bool,
    highlight: bool,
}

impl Default for Markdown {
    fn default() -> Self {
        Markdown { auto_ids: true, highlight: true }
    }
}

impl Markdown {
    pub fn new() -> Self {
        Markdown::default()
    }

    pub fn auto_ids(mut self, enabled: bool) -> Self {
        self.auto_ids = enabled;
        self
    }

    pub fn highlight(mut self, enabled: bool) -> Self {
        self.highlight = enabled;
        self
    }
}

impl Convert for Markdown {
    fn convert(&self, markdown: &str, dialect: Dialect) -> Result<String> {
        let mut headings = AutoHeading::default();
        let mut highlight = SyntaxHighlight::default();

        let mut output = String::with_capacity(markdown.len() * 3 / 2);
        let events = Parser::new_ext(markdown, dialect.options());
        match (self.auto_ids, self.highlight) {
            (true, true) => html::push_html(&mut output, highlight.remap(headings.remap(events))),
            (true, false) => html::push_html(&mut output, headings.remap(events)),
            (false, true) => html::push_html(&mut output, highlight.remap(events)),
            (false, false) => html::push_html(&mut output, events),
        }

        headings.finalize()?;
        highlight.finalize().chain_with(|| error! {
            "markdown conversion failed",
            "dialect" => dialect,
        })?;

        Ok(output)
    }
}
