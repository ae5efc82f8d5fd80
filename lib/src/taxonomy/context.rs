use crate::taxonomy::{Page, Post};
use crate::Variables;

/// What a page may see while rendering: every page of the site, in the order
/// they were added, and the site variables. Read-only.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub pages: &'a [Page],
    pub variables: &'a Variables,
}

impl<'a> RenderContext<'a> {
    pub fn new(pages: &'a [Page], variables: &'a Variables) -> Self {
        RenderContext { pages, variables }
    }

    /// The post pages, in insertion order.
    pub fn posts(&self) -> impl Iterator<Item = (&'a Page, &'a Post)> + 'a {
        self.pages.iter().filter_map(|page| page.as_post().map(|post| (page, post)))
    }
}
