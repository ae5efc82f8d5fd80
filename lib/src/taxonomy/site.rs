use std::sync::Arc;

use rayon::prelude::*;
use rustc_hash::FxHashSet;

use crate::error::{Chainable, Result};
use crate::markdown::Convert;
use crate::taxonomy::*;
use crate::Variables;

/// The layouts and pages of one build.
#[derive(Debug, Default)]
pub struct Site {
    layouts: Layouts,
    pages: Vec<Page>,
}

impl Site {
    pub fn new() -> Site {
        Site::default()
    }

    pub fn using<I: IntoIterator<Item = Layout>>(mut self, layouts: I) -> Site {
        layouts.into_iter().for_each(|layout| self.layouts.insert(layout));
        self
    }

    /// Appends `pages`, in order. Pages sharing an output path are all kept
    /// until [`Site::compile()`].
    pub fn add<I: IntoIterator<Item = Page>>(mut self, pages: I) -> Site {
        self.pages.extend(pages);
        self
    }

    pub fn push(&mut self, page: Page) {
        self.pages.push(page);
    }

    pub fn layouts(&self) -> &Layouts {
        &self.layouts
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn posts(&self) -> impl Iterator<Item = &Page> {
        self.pages.iter().filter(|page| page.is_post())
    }

    /// Renders every page, then wraps and substitutes each, and returns the
    /// documents with one per output path: the first added wins.
    ///
    /// All bodies are rendered before any page is wrapped, so every page sees
    /// every other page in its context regardless of rendering order. The
    /// first page (in insertion order) that fails to render fails the whole
    /// compile.
    pub fn compile<C>(&mut self, variables: &Variables, converter: &C) -> Result<Vec<Document>>
        where C: Convert + ?Sized
    {
        let ctx = RenderContext::new(&self.pages, variables);
        let rendered: Vec<Result<String>> = self.pages.par_iter()
            .map(|page| {
                log::trace!("| render | {}", page.path);
                page.render(&ctx, converter).chain_with(|| error! {
                    "failed to render page",
                    "path" => page.path,
                    "title" => page.title,
                })
            })
            .collect();

        let bodies = rendered.into_iter().collect::<Result<Vec<_>>>()?;
        for (page, body) in self.pages.iter_mut().zip(bodies) {
            page.compile(&self.layouts, &body, variables);
        }

        let mut seen: FxHashSet<Arc<str>> = FxHashSet::default();
        let documents = self.pages.iter()
            .flat_map(|page| page.documents())
            .filter(|doc| match seen.insert(doc.path.clone()) {
                true => true,
                false => {
                    log::debug!("| compile | {} | shadowed by an earlier document", doc.path);
                    false
                }
            })
            .collect::<Vec<_>>();

        log::debug!("| compile | {} pages | {} documents", self.pages.len(), documents.len());
        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::markdown::{Dialect, Markdown, STYLESHEET_PATH};
    use crate::vars;

    static_assertions::assert_impl_all!(Site: Send, Sync);
    static_assertions::assert_impl_all!(Page: Send, Sync);

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn paragraph(markdown: &str, _: Dialect) -> Result<String> {
        Ok(format!("<p>{}</p>", markdown.trim()))
    }

    fn find<'a>(docs: &'a [Document], path: &str) -> &'a Document {
        docs.iter().find(|d| &*d.path == path).unwrap()
    }

    #[test]
    fn first_page_for_a_path_wins() {
        let vars = Variables::new();
        let mut site = Site::new().add([
            Page::plain("/index.html", "hand written", None),
            Page::index("generated"),
        ]);

        let docs = site.compile(&vars, &paragraph).unwrap();
        assert_eq!(docs.len(), 1);

        let mut only_first = Site::new().add([Page::plain("/index.html", "hand written", None)]);
        assert_eq!(docs, only_first.compile(&vars, &paragraph).unwrap());

        // Both pages were compiled, only the output is deduplicated.
        assert!(site.pages().iter().all(Page::is_compiled));
    }

    #[test]
    fn shadowed_posts_are_still_listed() {
        let mut site = Site::new().add([
            Page::plain("/posts/a/index.html", "override", None),
            Page::post("posts/a.md", "# A\n\n2024-03-01", today()),
            Page::index("# Home"),
        ]);

        let docs = site.compile(&Variables::new(), &paragraph).unwrap();
        assert_eq!(docs.len(), 2);
        assert!(find(&docs, "/posts/a/index.html").data().contains("override"));
        assert!(find(&docs, "/index.html").data().contains(r#"<a href="/posts/a">"#));
    }

    #[test]
    fn assets_are_flattened_and_deduplicated() {
        let css = Document::new(STYLESHEET_PATH, ".code {}".to_string());
        let mut site = Site::new().add([
            Page::post("posts/a.md", "# A", today()).with_asset(css.clone()),
            Page::post("posts/b.md", "# B", today()).with_asset(css.clone()),
        ]);

        let docs = site.compile(&Variables::new(), &paragraph).unwrap();
        let paths: Vec<&str> = docs.iter().map(|d| &*d.path).collect();
        assert_eq!(paths, ["/posts/a/index.html", STYLESHEET_PATH, "/posts/b/index.html"]);
    }

    #[test]
    fn conversion_failure_aborts_with_the_failing_page() {
        let failing = |markdown: &str, _: Dialect| -> Result<String> {
            match markdown.contains("bad") {
                true => err!("malformed markdown"),
                false => Ok(markdown.to_string()),
            }
        };

        let mut site = Site::new().add([
            Page::page("pages/ok.md", "# Ok"),
            Page::page("pages/broken.md", "# bad"),
            Page::page("pages/worse.md", "# bad too"),
        ]);

        let error = site.compile(&Variables::new(), &failing).unwrap_err();
        assert_eq!(error.message(), "failed to render page");
        assert!(error.to_string().contains("/broken/index.html"));
        assert!(error.to_string().contains("malformed markdown"));
        assert!(site.pages().iter().all(|page| !page.is_compiled()));
    }

    #[test]
    fn end_to_end() {
        let mut site = Site::new()
            .using([
                Layout::new("_layouts/header.html", "<h>{{title}}</h>"),
                Layout::new("_layouts/footer.html", "<f></f>"),
            ])
            .add([
                Page::post("posts/a.md", "# A\n\n2024-03-01\n\nBody", today()),
                Page::index("# Home"),
            ]);

        let docs = site.compile(&vars!["name" => "blog"], &Markdown::default()).unwrap();
        assert_eq!(docs.len(), 2);

        let post = find(&docs, "/posts/a/index.html").data();
        assert!(post.starts_with("<h>A</h><main class=\"post index\">"));
        assert_eq!(post.matches("<h>A</h>").count(), 1);
        assert!(post.contains("<p>Body</p>"));
        assert!(post.contains(r#"<link rel="stylesheet" href="/public/highlight.css">"#));

        let index = find(&docs, "/index.html").data();
        assert!(index.starts_with("<h>Home</h><main class=\"index index\">"));
        assert!(index.contains("<ul class=\"list\"><li><a href=\"/posts/a\"><h3>A</h3>"));
        assert!(index.contains("Mar, 2024"));
        assert_eq!(index.matches("<li>").count(), 1);
    }

    #[test]
    fn bytes_counts_the_collapsed_wrapped_html() {
        let mut site = Site::new()
            .using([Layout::new("footer.html", "  <f>{{bytes}}</f>  ")])
            .add([Page::plain("/p/index.html", " <p>Hi</p> ", None)]);

        let docs = site.compile(&Variables::new(), &paragraph).unwrap();
        let expected = r#"<mainclass="htmlpageindex"><p>Hi</p></main><f>{{bytes}}</f>"#.len();
        assert!(docs[0].data().contains(&format!("<f>{expected}</f>")));
    }
}
