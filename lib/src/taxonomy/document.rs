use std::sync::Arc;

/// A compiled output artifact. `path` is the output-relative, `/`-rooted
/// virtual path and is the identity of the document within a site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub path: Arc<str>,
    pub data: Option<String>,
}

impl Document {
    pub fn new(path: impl Into<Arc<str>>, data: impl Into<String>) -> Self {
        Document { path: path.into(), data: Some(data.into()) }
    }

    /// A document with no data yet.
    pub fn empty(path: impl Into<Arc<str>>) -> Self {
        Document { path: path.into(), data: None }
    }

    pub fn data(&self) -> &str {
        self.data.as_deref().unwrap_or("")
    }

    pub fn into_parts(self) -> (Arc<str>, String) {
        (self.path, self.data.unwrap_or_default())
    }
}
