use std::sync::Arc;

use chrono::NaiveDate;

use crate::error::Result;
use crate::markdown::{Convert, Dialect, STYLESHEET_PATH};
use crate::taxonomy::{listing, Document, Layout, Layouts, RenderContext};
use crate::template::{has_placeholder, substitute, weight};
use crate::util::file_stem;
use crate::Variables;

/// The title of a page whose source has no leading `# ` heading.
pub const UNTITLED: &str = "Untitled";

/// The title of the index page.
pub const HOME: &str = "Home";

/// Date formats tried, in order, on the third line of a post.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%d-%m-%Y",
    "%Y/%m/%d",
    "%d/%m/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
    "%Y%m%d",
];

/// The variant of a page. Decides the output path shape, the title source,
/// and what [`Page::render()`] emits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Kind {
    /// Pre-rendered HTML, emitted as-is.
    Plain,
    /// Markdown at an explicit output path.
    Markdown,
    /// Markdown at `/<stem>/index.html`.
    Page,
    /// A dated entry at `/posts/<stem>/index.html`, listed by the index.
    Post(Post),
    /// The site's home page at `/index.html`, listing every post.
    Index,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub date: NaiveDate,
    /// The directory url of the post, e.g. `/posts/hello`.
    pub link: Arc<str>,
}

impl Kind {
    /// The lowercase tag used as a CSS hook on `<main>`.
    pub fn tag(&self) -> &'static str {
        match self {
            Kind::Plain => "htmlpage",
            Kind::Markdown => "markdownpage",
            Kind::Page => "page",
            Kind::Post(_) => "post",
            Kind::Index => "index",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Page {
    pub path: Arc<str>,
    pub title: Arc<str>,
    pub kind: Kind,
    source: Arc<str>,
    dialect: Dialect,
    assets: Vec<Document>,
    data: Option<String>,
}

/// The text of a leading `# ` heading, or [`UNTITLED`].
///
/// ```
/// use folio::title_of;
///
/// assert_eq!(title_of("# My Title\n\nbody"), "My Title");
/// assert_eq!(title_of("Hello"), "Untitled");
/// assert_eq!(title_of("## Sub"), "Untitled");
/// ```
pub fn title_of(markdown: &str) -> &str {
    markdown.lines()
        .next()
        .and_then(|line| line.strip_prefix("# "))
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .unwrap_or(UNTITLED)
}

/// The date on the third line of a post, or `today` if there is none.
///
/// A line that only starts with a date, like `2024-03-01T10:00` or
/// `2024-03-01 draft`, uses that date.
pub fn date_of(markdown: &str, today: NaiveDate) -> NaiveDate {
    let Some(line) = markdown.lines().nth(2).map(str::trim) else {
        return today;
    };

    let prefix = |format: &&str| {
        let (date, rest) = NaiveDate::parse_and_remainder(line, format).ok()?;
        (!rest.starts_with(|c: char| c.is_ascii_digit())).then_some(date)
    };

    DATE_FORMATS.iter()
        .find_map(|format| NaiveDate::parse_from_str(line, format).ok())
        .or_else(|| DATE_FORMATS.iter().find_map(prefix))
        .unwrap_or_else(|| {
            if !line.is_empty() {
                log::debug!("| date | `{line}` is not a date, using {today}");
            }

            today
        })
}

impl Page {
    fn new(path: impl Into<Arc<str>>, title: &str, kind: Kind, source: Arc<str>) -> Self {
        Page {
            path: path.into(),
            title: title.into(),
            kind,
            source,
            dialect: Dialect::default(),
            assets: vec![],
            data: None,
        }
    }

    /// A page whose body is `html`, verbatim.
    pub fn plain(path: &str, html: impl Into<Arc<str>>, title: Option<&str>) -> Self {
        let title = title.filter(|t| !t.is_empty()).unwrap_or(UNTITLED);
        Page::new(path, title, Kind::Plain, html.into())
    }

    /// A Markdown page at the output path `path`.
    pub fn markdown(path: &str, markdown: impl Into<Arc<str>>, title: Option<&str>) -> Self {
        let markdown = markdown.into();
        let title = title.filter(|t| !t.is_empty()).unwrap_or_else(|| title_of(&markdown));
        let title = title.to_string();
        Page::new(path, &title, Kind::Markdown, markdown)
    }

    /// A Markdown page read from `source_path`, published at
    /// `/<stem>/index.html`.
    pub fn page(source_path: &str, markdown: impl Into<Arc<str>>) -> Self {
        let markdown = markdown.into();
        let path = format!("/{}/index.html", file_stem(source_path));
        Page::new(path, title_of(&markdown), Kind::Page, markdown.clone())
    }

    /// A post read from `source_path`, published at
    /// `/posts/<stem>/index.html`. Its date is read from the third line of
    /// `markdown`, falling back to `today`.
    pub fn post(source_path: &str, markdown: impl Into<Arc<str>>, today: NaiveDate) -> Self {
        let markdown = markdown.into();
        let link = format!("/posts/{}", file_stem(source_path));
        let post = Post { date: date_of(&markdown, today), link: link.as_str().into() };
        Page::new(format!("{link}/index.html"), title_of(&markdown), Kind::Post(post), markdown.clone())
    }

    /// The home page, published at `/index.html` and titled [`HOME`]. Its
    /// Markdown is followed by the list of posts.
    pub fn index(markdown: impl Into<Arc<str>>) -> Self {
        Page::new("/index.html", HOME, Kind::Index, markdown.into())
    }

    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Attaches a document published alongside this page.
    pub fn attach(&mut self, asset: Document) {
        self.assets.push(asset);
    }

    pub fn with_asset(mut self, asset: Document) -> Self {
        self.attach(asset);
        self
    }

    /// The file stem of the output path.
    pub fn name(&self) -> &str {
        file_stem(&self.path)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn assets(&self) -> &[Document] {
        &self.assets
    }

    pub fn as_post(&self) -> Option<&Post> {
        match &self.kind {
            Kind::Post(post) => Some(post),
            _ => None,
        }
    }

    pub fn is_post(&self) -> bool {
        self.as_post().is_some()
    }

    /// The compiled html, once [`Page::compile()`] has run.
    pub fn data(&self) -> Option<&str> {
        self.data.as_deref()
    }

    pub fn is_compiled(&self) -> bool {
        self.data.is_some()
    }

    /// The Markdown source converted to HTML. Plain pages have no Markdown
    /// and render their html unchanged.
    pub fn base_render<C: Convert + ?Sized>(&self, converter: &C) -> Result<String> {
        match self.kind {
            Kind::Plain => Ok(self.source.to_string()),
            _ => converter.convert(&self.source, self.dialect),
        }
    }

    /// The body fragment of this page.
    pub fn render<C: Convert + ?Sized>(&self, ctx: &RenderContext<'_>, converter: &C) -> Result<String> {
        let mut body = self.base_render(converter)?;
        match self.kind {
            Kind::Post(_) => {
                body.push_str(r#"<link rel="stylesheet" href=""#);
                body.push_str(STYLESHEET_PATH);
                body.push_str(r#"">"#);
            }
            Kind::Index => body.push_str(&listing::render(ctx.posts())),
            Kind::Plain | Kind::Markdown | Kind::Page => {}
        }

        Ok(body)
    }

    /// `body` between the `header` and `footer` layouts.
    pub fn wrap(&self, layouts: &Layouts, body: &str) -> String {
        format!("{}<main class=\"{} {}\">{}</main>{}",
            layouts.slot(Layout::HEADER),
            self.kind.tag(),
            self.name(),
            body,
            layouts.slot(Layout::FOOTER))
    }

    /// Wraps the rendered `body` and substitutes placeholders, with this
    /// page's `title` and `bytes` added to `variables`. The result becomes the
    /// page's data. Pages are compiled at most once; later calls do nothing.
    pub fn compile(&mut self, layouts: &Layouts, body: &str, variables: &Variables) -> &str {
        if self.data.is_none() {
            let html = self.wrap(layouts, body);
            self.data = Some(match has_placeholder(&html) {
                true => substitute(&html, &variables.for_page(&self.title, weight(&html))),
                false => html,
            });
        } else {
            log::debug!("| compile | {} | already compiled", self.path);
        }

        self.data.as_deref().unwrap_or_default()
    }

    /// The page's own document followed by its assets.
    pub fn documents(&self) -> impl Iterator<Item = Document> + '_ {
        let page = Document { path: self.path.clone(), data: self.data.clone() };
        std::iter::once(page).chain(self.assets.iter().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vars;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn passthrough(markdown: &str, _: Dialect) -> Result<String> {
        Ok(format!("<p>{markdown}</p>"))
    }

    #[test]
    fn titles() {
        assert_eq!(title_of("Hello"), UNTITLED);
        assert_eq!(title_of("# My Title"), "My Title");
        assert_eq!(title_of("#   Spaced   \nmore"), "Spaced");
        assert_eq!(title_of("# "), UNTITLED);
        assert_eq!(title_of(""), UNTITLED);
        assert_eq!(title_of("\n# Late"), UNTITLED);

        assert_eq!(&*Page::index("# Welcome").title, HOME);
        assert_eq!(&*Page::plain("/x.html", "<p></p>", None).title, UNTITLED);
        assert_eq!(&*Page::markdown("/x.html", "# Md", None).title, "Md");
        assert_eq!(&*Page::markdown("/x.html", "# Md", Some("Given")).title, "Given");
    }

    #[test]
    fn paths() {
        assert_eq!(&*Page::page("pages/about.md", "").path, "/about/index.html");
        assert_eq!(&*Page::index("").path, "/index.html");

        let post = Page::post("site/posts/hello.md", "# Hello", day(2024, 1, 1));
        assert_eq!(&*post.path, "/posts/hello/index.html");
        assert_eq!(&*post.as_post().unwrap().link, "/posts/hello");
        assert_eq!(post.name(), "index");
    }

    #[test]
    fn post_dates() {
        let today = day(2026, 10, 18);
        assert_eq!(date_of("# A\n\n2024-03-01\n\nBody", today), day(2024, 3, 1));
        assert_eq!(date_of("# A\n\n21-10-2021\n", today), day(2021, 10, 21));
        assert_eq!(date_of("# A\n\n  2020/10/15  \n", today), day(2020, 10, 15));
        assert_eq!(date_of("# A\n\nMarch 5, 2023", today), day(2023, 3, 5));
        assert_eq!(date_of("# A\n\n\nBody", today), today);
        assert_eq!(date_of("# A\n\nnot a date", today), today);
        assert_eq!(date_of("# A\n\n2024-13-45", today), today);
        assert_eq!(date_of("# A", today), today);
    }

    #[test]
    fn dates_followed_by_other_text() {
        let today = day(2026, 10, 18);
        assert_eq!(date_of("# A\n\n2024-03-01T10:00", today), day(2024, 3, 1));
        assert_eq!(date_of("# A\n\n2024-03-01 draft\n\nBody", today), day(2024, 3, 1));
        assert_eq!(date_of("# A\n\n21-10-2021 draft", today), day(2021, 10, 21));
        assert_eq!(date_of("# A\n\nMarch 5, 2023 (updated)", today), day(2023, 3, 5));
        assert_eq!(date_of("# A\n\n2024-03-01x", today), day(2024, 3, 1));
        assert_eq!(date_of("# A\n\ndraft 2024-03-01", today), today);
    }

    #[test]
    fn kinds_render_their_own_body() {
        let vars = Variables::new();
        let pages = [
            Page::plain("/raw/index.html", "<b>raw</b>", Some("Raw")),
            Page::page("pages/about.md", "about"),
            Page::post("posts/a.md", "# A", day(2024, 3, 1)),
        ];

        let ctx = RenderContext::new(&pages, &vars);
        assert_eq!(pages[0].render(&ctx, &passthrough).unwrap(), "<b>raw</b>");
        assert_eq!(pages[1].render(&ctx, &passthrough).unwrap(), "<p>about</p>");
        assert_eq!(
            pages[2].render(&ctx, &passthrough).unwrap(),
            r#"<p># A</p><link rel="stylesheet" href="/public/highlight.css">"#
        );
    }

    #[test]
    fn compile_wraps_and_substitutes() {
        let layouts: Layouts = [
            Layout::new("_layouts/header.html", "<h>{{title}} {{name}}</h>"),
            Layout::new("_layouts/footer.html", "<f>{{bytes}}</f>"),
        ].into_iter().collect();

        let mut page = Page::page("pages/about.md", "# About");
        let html = page.compile(&layouts, "<p>x</p>", &vars!["name" => "blog"]).to_string();

        let wrapped = page.wrap(&layouts, "<p>x</p>");
        assert_eq!(wrapped, r#"<h>{{title}} {{name}}</h><main class="page index"><p>x</p></main><f>{{bytes}}</f>"#);
        let bytes = weight(&wrapped);
        assert_eq!(html, format!(r#"<h>About blog</h><main class="page index"><p>x</p></main><f>{bytes}</f>"#));
        assert_eq!(page.data(), Some(&*html));
    }

    #[test]
    fn compile_is_terminal() {
        let layouts = Layouts::new();
        let mut page = Page::page("pages/a.md", "# A");
        page.compile(&layouts, "first", &Variables::new());
        page.compile(&layouts, "second", &Variables::new());
        assert!(page.data().unwrap().contains("first"));
        assert!(!page.data().unwrap().contains("second"));
    }

    #[test]
    fn compile_without_placeholders_keeps_the_wrap() {
        let layouts: Layouts = [Layout::new("_layouts/header.html", "<h>{ {x} }</h>")]
            .into_iter().collect();

        let mut page = Page::page("pages/a.md", "# A");
        let html = page.compile(&layouts, "<p>}}</p>", &vars!["x" => "1"]).to_string();
        assert_eq!(html, page.wrap(&layouts, "<p>}}</p>"));
    }

    #[test]
    fn documents_flatten_assets() {
        let page = Page::post("posts/a.md", "# A", day(2024, 3, 1))
            .with_asset(Document::new(STYLESHEET_PATH, "css".to_string()));

        let paths: Vec<_> = page.documents().map(|d| d.path).collect();
        assert_eq!(paths, [Arc::from("/posts/a/index.html"), Arc::from(STYLESHEET_PATH)]);
        assert_eq!(page.assets().len(), 1);
    }
}
