use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::util::file_stem;

/// A raw HTML fragment wrapped around every page, named after the stem of the
/// file it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub name: Arc<str>,
    pub html: Arc<str>,
}

impl Layout {
    pub const HEADER: &'static str = "header";
    pub const FOOTER: &'static str = "footer";

    pub fn new(path: &str, html: impl Into<Arc<str>>) -> Self {
        Layout { name: file_stem(path).into(), html: html.into() }
    }
}

/// The layouts of a site, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct Layouts {
    map: FxHashMap<Arc<str>, Layout>,
}

impl Layouts {
    pub fn new() -> Self {
        Layouts::default()
    }

    pub fn insert(&mut self, layout: Layout) {
        if let Some(existing) = self.map.insert(layout.name.clone(), layout) {
            log::warn!("| layout | {} | replaced by a later layout of the same name", existing.name);
        }
    }

    pub fn get(&self, name: &str) -> Option<&Layout> {
        self.map.get(name)
    }

    /// The html for the slot `name`, or `""` when no such layout exists.
    pub fn slot(&self, name: &str) -> &str {
        self.get(name).map_or("", |layout| &*layout.html)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl FromIterator<Layout> for Layouts {
    fn from_iter<I: IntoIterator<Item = Layout>>(iter: I) -> Self {
        let mut layouts = Layouts::new();
        iter.into_iter().for_each(|layout| layouts.insert(layout));
        layouts
    }
}
